//! Slide window calculation
//!
//! A window is the contiguous run of items shown at once. Windows are aligned
//! to pages: page `p` covers `[(p - 1) * visible, p * visible)`.

use crate::navigation::Direction;
use crate::pagination::total_pages;
use crate::state::ItemId;

/// What the next window should be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowRequest {
    /// Step one window; `wrapping` jumps to the opposite end instead
    Step { direction: Direction, wrapping: bool },
    /// The window of a 1-indexed page, clamped to the existing pages
    JumpToPage(usize),
    /// The first window
    FromStart,
}

/// Compute the window that follows `current` for `request`.
///
/// The result holds `visible_count` items unless it runs past an end of the
/// sequence, in which case it is cut short. Stepping never wraps on its own.
pub fn compute_window(
    items: &[ItemId],
    current: &[ItemId],
    request: WindowRequest,
    visible_count: usize,
) -> Vec<ItemId> {
    if visible_count == 0 || items.is_empty() {
        return Vec::new();
    }

    let range = match request {
        _ if current.is_empty() => first_block(items.len(), visible_count),
        WindowRequest::FromStart => first_block(items.len(), visible_count),
        WindowRequest::Step {
            direction: Direction::Next,
            wrapping: true,
        } => first_block(items.len(), visible_count),
        WindowRequest::Step {
            direction: Direction::Previous,
            wrapping: true,
        } => page_range(items.len(), visible_count, total_pages(items.len(), visible_count)),
        WindowRequest::JumpToPage(page) => page_range(items.len(), visible_count, page),
        WindowRequest::Step {
            direction: Direction::Next,
            wrapping: false,
        } => match index_of(items, current.first()) {
            Some(anchor) => {
                let start = anchor.saturating_add(visible_count);
                clamp_range(items.len(), start, start.saturating_add(visible_count))
            }
            None => first_block(items.len(), visible_count),
        },
        WindowRequest::Step {
            direction: Direction::Previous,
            wrapping: false,
        } => match index_of(items, current.last()) {
            Some(anchor) => {
                // Start of the block holding the anchor, then one block back.
                let block_start = anchor / visible_count * visible_count;
                clamp_range(
                    items.len(),
                    block_start.saturating_sub(visible_count),
                    block_start,
                )
            }
            None => first_block(items.len(), visible_count),
        },
    };

    items[range].to_vec()
}

fn index_of(items: &[ItemId], item: Option<&ItemId>) -> Option<usize> {
    let item = item?;
    items.iter().position(|candidate| candidate == item)
}

fn first_block(len: usize, visible_count: usize) -> std::ops::Range<usize> {
    0..visible_count.min(len)
}

fn page_range(len: usize, visible_count: usize, page: usize) -> std::ops::Range<usize> {
    let page = page.clamp(1, total_pages(len, visible_count).max(1));
    let start = (page - 1) * visible_count;
    clamp_range(len, start, start + visible_count)
}

fn clamp_range(len: usize, start: usize, end: usize) -> std::ops::Range<usize> {
    let start = start.min(len);
    start..end.clamp(start, len)
}
