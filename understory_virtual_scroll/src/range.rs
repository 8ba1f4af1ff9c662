// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll offset to index window conversion, and back.

use core::ops::Range;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `floor` and `ceil`

use crate::dimensions::Dimensions;

/// Raw scroll position of the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Scroll offset of the scroll target, in pixels.
    pub scroll_top: f64,
    /// Offset of the viewport inside an external scroll parent; `0.0` otherwise.
    pub offset_top: f64,
}

impl ScrollMetrics {
    /// Creates metrics for a viewport that scrolls itself.
    #[must_use]
    pub const fn new(scroll_top: f64) -> Self {
        Self {
            scroll_top,
            offset_top: 0.0,
        }
    }

    /// Creates metrics for a viewport placed `offset_top` pixels into its scroll parent.
    #[must_use]
    pub const fn with_offset(scroll_top: f64, offset_top: f64) -> Self {
        Self {
            scroll_top,
            offset_top,
        }
    }
}

/// Half-open index window to realize, plus the padding that positions it.
///
/// Always satisfies `start <= end <= item_count`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VisibleWindow {
    /// First realized index.
    pub start: usize,
    /// One past the last realized index.
    pub end: usize,
    /// Pixel offset of the first realized row from the top of the content.
    pub top_padding: f64,
}

impl VisibleWindow {
    /// The empty window at index zero.
    pub const EMPTY: Self = Self {
        start: 0,
        end: 0,
        top_padding: 0.0,
    };

    /// Returns the window as an index range.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of realized items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if nothing is realized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if `start` and `end` match `other`, ignoring padding.
    #[must_use]
    pub fn same_range(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

/// Converts a raw scroll position into an offset relative to the content top.
///
/// Offsets past the end of the content are pulled back to the content end
/// first; the result is never negative.
#[must_use]
pub fn adjusted_scroll_top(scroll: ScrollMetrics, scroll_height: f64) -> f64 {
    let mut scroll_top = scroll.scroll_top;
    if scroll_top > scroll_height {
        scroll_top = scroll_height + scroll.offset_top;
    }
    (scroll_top - scroll.offset_top).max(0.0)
}

/// Computes the window to realize for the given geometry and scroll position.
///
/// One extra row beyond the visible rows is always included; `buffer_amount`
/// more items are then added on each side, clamped to the collection.
///
/// When the position cannot be resolved (for example zero content height with
/// an empty or unmeasured collection) the unbuffered bounds fall back to `-1`,
/// which yields an empty window unless a buffer widens it.
#[must_use]
pub fn compute_window(d: &Dimensions, scroll: ScrollMetrics, buffer_amount: usize) -> VisibleWindow {
    let count = d.item_count as f64;
    let per_row = d.items_per_row.max(1) as f64;
    let per_col = d.items_per_col as f64;
    let buffer = buffer_amount as f64;

    let scroll_top = adjusted_scroll_top(scroll, d.scroll_height);
    let index = scroll_top / d.scroll_height * count / per_row;

    let (start, end, top_padding) = if index.is_finite() {
        let end = count.min(per_row * (index.ceil() + per_col + 1.0));
        let rem = end % per_row;
        let max_start_end = if rem > 0.0 { end + per_row - rem } else { end };
        let max_start = (max_start_end - per_col * per_row - per_row).max(0.0);
        let start = max_start.min(index.floor() * per_row);
        let top_padding =
            d.child_height * (start / per_row).ceil() - d.child_height * start.min(buffer);
        (start, end, top_padding)
    } else {
        (-1.0, -1.0, 0.0)
    };

    let start = (start - buffer).max(0.0);
    let end = (end + buffer).min(count).max(start);

    VisibleWindow {
        start: to_index(start),
        end: to_index(end),
        top_padding: if top_padding.is_finite() {
            top_padding
        } else {
            0.0
        },
    }
}

/// Scroll offset that brings the row of `index` to the top of the viewport.
///
/// The offset is pulled back by up to `buffer_amount` rows so buffered items
/// above the target are in view as well. It may be negative; hosts clamp it.
#[must_use]
pub fn scroll_offset_for_index(d: &Dimensions, index: usize, buffer_amount: usize) -> f64 {
    let row = (index / d.items_per_row.max(1)) as f64;
    row * d.child_height - d.child_height * index.min(buffer_amount) as f64
}

/// Smallest scroll change that makes `index` visible, if any is needed.
///
/// Returns the new offset when `current` is above the highest or below the
/// lowest offset that keeps the item (and its buffer) in view.
#[must_use]
pub fn offset_to_reveal_index(
    d: &Dimensions,
    index: usize,
    buffer_amount: usize,
    current: f64,
) -> Option<f64> {
    let top = (index / d.items_per_row.max(1)) as f64 * d.child_height;
    let buffer = d.child_height * index.min(buffer_amount) as f64;
    let max_scroll_top = top - buffer - d.child_height;
    let min_scroll_top = top - d.view_height + d.child_height + buffer;

    if current > max_scroll_top {
        Some(max_scroll_top)
    } else if current < min_scroll_top {
        Some(min_scroll_top)
    } else {
        None
    }
}

fn to_index(value: f64) -> usize {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Values are clamped to [0, item_count] before conversion"
    )]
    {
        value as usize
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::{
        ScrollMetrics, VisibleWindow, adjusted_scroll_top, compute_window,
        offset_to_reveal_index, scroll_offset_for_index,
    };
    use crate::dimensions::Dimensions;

    /// 100 items, 5 per row, 4 rows visible, 50px rows: 1000px of content.
    fn grid_100() -> Dimensions {
        Dimensions::from_sizes(100, Size::new(250.0, 200.0), Size::new(50.0, 50.0), 0.0)
    }

    #[test]
    fn top_of_grid_starts_at_zero() {
        let w = compute_window(&grid_100(), ScrollMetrics::new(0.0), 0);
        assert_eq!(w.start, 0);
        assert_eq!(w.end, 25);
        assert_eq!(w.top_padding, 0.0);
    }

    #[test]
    fn bottom_of_grid_ends_at_item_count() {
        let d = grid_100();
        let w = compute_window(&d, ScrollMetrics::new(d.scroll_height), 0);
        assert_eq!(w.end, 100);
        assert_eq!(w.start, 75);
        assert_eq!(w.top_padding, 750.0);

        let w = compute_window(&d, ScrollMetrics::new(d.scroll_height - d.view_height), 0);
        assert_eq!(w.end, 100);
    }

    #[test]
    fn middle_of_grid_aligns_to_rows() {
        let w = compute_window(&grid_100(), ScrollMetrics::new(275.0), 0);
        // Fractional row 5.5: start at row 5, end after row 6 + 4 + 1.
        assert_eq!(w.start, 25);
        assert_eq!(w.end, 55);
        assert_eq!(w.top_padding, 250.0);
    }

    #[test]
    fn buffer_widens_both_sides() {
        let d = grid_100();
        let scroll = ScrollMetrics::new(500.0);
        let plain = compute_window(&d, scroll, 0);
        let buffered = compute_window(&d, scroll, 3);
        assert_eq!(buffered.start, plain.start - 3);
        assert_eq!(buffered.end, plain.end + 3);
        assert_eq!(buffered.top_padding, plain.top_padding - 150.0);
    }

    #[test]
    fn buffer_is_clamped_at_the_edges() {
        let d = grid_100();
        let top = compute_window(&d, ScrollMetrics::new(0.0), 7);
        assert_eq!(top.start, 0);
        assert_eq!(top.end, 32);

        let bottom = compute_window(&d, ScrollMetrics::new(d.scroll_height), 7);
        assert_eq!(bottom.end, 100);
        assert_eq!(bottom.start, 68);
    }

    #[test]
    fn empty_collection_yields_empty_window() {
        let d = Dimensions::from_sizes(0, Size::new(250.0, 200.0), Size::new(50.0, 50.0), 0.0);
        assert_eq!(compute_window(&d, ScrollMetrics::new(0.0), 0), VisibleWindow::EMPTY);
        assert_eq!(compute_window(&d, ScrollMetrics::new(120.0), 4), VisibleWindow::EMPTY);
    }

    #[test]
    fn zero_height_items_degrade_without_panicking() {
        let d = Dimensions::from_sizes(10, Size::new(250.0, 200.0), Size::new(50.0, 0.0), 0.0);
        let w = compute_window(&d, ScrollMetrics::new(40.0), 0);
        assert_eq!(w, VisibleWindow::EMPTY);

        // A buffer still widens the sentinel window.
        let w = compute_window(&d, ScrollMetrics::new(40.0), 3);
        assert_eq!(w.range(), 0..2);
        assert_eq!(w.top_padding, 0.0);
    }

    #[test]
    fn invariant_holds_across_positions() {
        for count in [0_usize, 1, 4, 5, 17, 100, 1001] {
            for per_row_width in [50.0, 120.0, 250.0] {
                let d = Dimensions::from_sizes(
                    count,
                    Size::new(250.0, 180.0),
                    Size::new(per_row_width, 30.0),
                    12.0,
                );
                for buffer in [0_usize, 1, 6] {
                    let mut scroll_top = -40.0;
                    while scroll_top < d.scroll_height + 200.0 {
                        let w = compute_window(&d, ScrollMetrics::new(scroll_top), buffer);
                        assert!(w.start <= w.end, "start > end for {w:?}");
                        assert!(w.end <= count, "end past item count for {w:?}");
                        scroll_top += 17.0;
                    }
                }
            }
        }
    }

    #[test]
    fn start_never_decreases_while_scrolling_down() {
        let d = Dimensions::from_sizes(333, Size::new(300.0, 170.0), Size::new(70.0, 23.0), 0.0);
        for offset_top in [0.0, 90.0] {
            let mut last_start = 0;
            let mut scroll_top = 0.0;
            while scroll_top < d.scroll_height + 300.0 {
                let w = compute_window(&d, ScrollMetrics::with_offset(scroll_top, offset_top), 2);
                assert!(w.start >= last_start, "start went back at {scroll_top}");
                last_start = w.start;
                scroll_top += 3.5;
            }
        }
    }

    #[test]
    fn overscroll_is_pulled_back_to_content_end() {
        let scroll = ScrollMetrics::with_offset(1500.0, 100.0);
        assert_eq!(adjusted_scroll_top(scroll, 1000.0), 1000.0);

        let scroll = ScrollMetrics::with_offset(40.0, 100.0);
        assert_eq!(adjusted_scroll_top(scroll, 1000.0), 0.0);

        let scroll = ScrollMetrics::with_offset(400.0, 100.0);
        assert_eq!(adjusted_scroll_top(scroll, 1000.0), 300.0);
    }

    #[test]
    fn scroll_offset_accounts_for_buffer_rows() {
        // 3 per row, 50px rows.
        let d = Dimensions::from_sizes(60, Size::new(150.0, 200.0), Size::new(50.0, 50.0), 0.0);
        for i in [0_usize, 1, 2, 7, 31] {
            let expected = (i / 3) as f64 * 50.0 - 50.0 * i.min(2) as f64;
            assert_eq!(scroll_offset_for_index(&d, i, 2), expected);
        }
    }

    #[test]
    fn reveal_scrolls_the_least_possible() {
        // 1 per row, 20px rows, 100px viewport.
        let d = Dimensions::from_sizes(50, Size::new(100.0, 100.0), Size::new(100.0, 20.0), 0.0);

        // Row 10 spans 200..220; visible offsets are 120..=180.
        assert_eq!(offset_to_reveal_index(&d, 10, 0, 150.0), None);
        assert_eq!(offset_to_reveal_index(&d, 10, 0, 500.0), Some(180.0));
        assert_eq!(offset_to_reveal_index(&d, 10, 0, 0.0), Some(120.0));
    }

    #[test]
    fn hand_built_zero_per_row_acts_as_single_column() {
        let d = Dimensions {
            items_per_row: 0,
            ..Dimensions::from_sizes(10, Size::new(100.0, 100.0), Size::new(100.0, 20.0), 0.0)
        };
        assert_eq!(d.row_count(), 10);
        assert_eq!(scroll_offset_for_index(&d, 3, 0), 60.0);
        assert_eq!(offset_to_reveal_index(&d, 8, 0, 0.0), Some(80.0));
        assert_eq!(compute_window(&d, ScrollMetrics::new(0.0), 0).range(), 0..6);
    }
}
