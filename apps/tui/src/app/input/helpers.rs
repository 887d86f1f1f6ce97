pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}

pub const PAGE_SIZE: usize = 5;

pub const fn page_up(index: usize, _len: usize) -> usize {
    index.saturating_sub(PAGE_SIZE)
}

pub const fn page_down(index: usize, len: usize) -> usize {
    let last = len.saturating_sub(1);
    let next = index + PAGE_SIZE;
    if next > last {
        last
    } else {
        next
    }
}
