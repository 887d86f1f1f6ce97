/// First row to draw so that `selected_index` stays inside a window of
/// `max_visible_rows`.
pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows {
        return 0;
    }

    if selected_index >= max_visible_rows {
        return selected_index.saturating_sub(max_visible_rows) + 1;
    }

    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_lists_never_scroll() {
        assert_eq!(scroll_offset(4, 7, 3), 0);
    }

    #[test]
    fn highlighted_row_stays_on_screen() {
        assert_eq!(scroll_offset(20, 7, 2), 0);
        assert_eq!(scroll_offset(20, 7, 7), 1);
        assert_eq!(scroll_offset(20, 7, 19), 13);
    }
}
