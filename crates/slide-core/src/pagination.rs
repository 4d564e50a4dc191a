//! Pagination model

use crate::navigation::Direction;

/// Number of pages needed to show `item_count` items `visible_count` at a time
pub fn total_pages(item_count: usize, visible_count: usize) -> usize {
    if visible_count == 0 {
        return 0;
    }
    item_count.div_ceil(visible_count)
}

/// Clamp a requested page into `[1, total]`
pub fn clamp_page(page: usize, total: usize) -> usize {
    page.clamp(1, total.max(1))
}

/// Whether a directional move from `current` would wrap around
pub fn is_wrapping(loop_around: bool, direction: Direction, current: usize, total: usize) -> bool {
    loop_around && is_at_boundary(direction, current, total)
}

/// Whether `current` is the last page in `direction`
pub fn is_at_boundary(direction: Direction, current: usize, total: usize) -> bool {
    match direction {
        Direction::Previous => current == 1,
        Direction::Next => current == total,
    }
}

/// Page reached by one directional move
pub fn step_page(direction: Direction, current: usize, total: usize, wrapping: bool) -> usize {
    match (direction, wrapping) {
        (Direction::Previous, true) => total,
        (Direction::Next, true) => 1,
        (Direction::Previous, false) => current.saturating_sub(1).max(1),
        (Direction::Next, false) => (current + 1).min(total),
    }
}

/// Direction implied by a jump, for notification metadata
pub fn jump_direction(current: usize, target: usize) -> Direction {
    if current > target {
        Direction::Previous
    } else {
        Direction::Next
    }
}

/// Offset, in item widths, of the first item of `page`
pub fn page_offset(page: usize, visible_count: usize) -> i64 {
    let items = page.saturating_sub(1).saturating_mul(visible_count);
    i64::try_from(items).unwrap_or(i64::MAX)
}

/// Previous/next availability derived from the current page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disablement {
    pub previous: bool,
    pub next: bool,
}

pub fn disablement(loop_around: bool, current: usize, total: usize) -> Disablement {
    Disablement {
        previous: !loop_around && current == 1,
        next: !loop_around && current == total,
    }
}
