pub mod map;
pub mod popup;
pub mod selector;
pub mod tables;
