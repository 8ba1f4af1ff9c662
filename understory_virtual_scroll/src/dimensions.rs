// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item and viewport geometry.
//!
//! [`measure_dimensions`] derives the effective item size and how many items
//! fit per row and per column, either from configured sizes or from live
//! measurements supplied by a [`LayoutProbe`].

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `floor`
use kurbo::Size;

use crate::config::VirtualScrollConfig;
use crate::host::{LayoutProbe, ScrollTarget};

/// Two children belong to the same row when their tops differ by less than this.
const ROW_EPSILON: f64 = 0.5;

/// Geometry snapshot used by the range calculation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    /// Number of items in the collection.
    pub item_count: usize,
    /// Usable viewport width (client width minus scrollbar).
    pub view_width: f64,
    /// Usable viewport height (client height minus scrollbar).
    pub view_height: f64,
    /// Width of one item.
    pub child_width: f64,
    /// Height of one item.
    pub child_height: f64,
    /// Items per row after reconciling the counted and calculated values.
    pub items_per_row: usize,
    /// Rows that fit in the viewport.
    pub items_per_col: usize,
    /// Items per row derived from `view_width / child_width` alone.
    pub items_per_row_by_calc: usize,
    /// Trailing content height included in `scroll_height`.
    pub tail_height: f64,
    /// Total content height: every row plus the tail.
    pub scroll_height: f64,
}

impl Dimensions {
    /// Builds dimensions from known sizes, without any measurement.
    ///
    /// Items per row and per column are both calculated arithmetically.
    #[must_use]
    pub fn from_sizes(item_count: usize, view: Size, item: Size, tail_height: f64) -> Self {
        let items_per_row = fit_count(view.width, item.width);
        let items_per_col = fit_count(view.height, item.height);
        Self::assemble(
            item_count,
            view,
            item,
            items_per_row,
            items_per_col,
            items_per_row,
            tail_height,
        )
    }

    /// Number of rows needed for every item, including a partial last row.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.item_count.div_ceil(self.items_per_row.max(1))
    }

    fn assemble(
        item_count: usize,
        view: Size,
        item: Size,
        items_per_row: usize,
        items_per_col: usize,
        items_per_row_by_calc: usize,
        tail_height: f64,
    ) -> Self {
        let rows = item_count.div_ceil(items_per_row);
        Self {
            item_count,
            view_width: view.width,
            view_height: view.height,
            child_width: item.width,
            child_height: item.height,
            items_per_row,
            items_per_col,
            items_per_row_by_calc,
            tail_height,
            scroll_height: item.height * rows as f64 + tail_height,
        }
    }
}

/// Inputs to [`measure_dimensions`] that do not come from the probe.
#[derive(Debug)]
pub struct MeasureInput<'a, E> {
    /// Number of items in the collection.
    pub item_count: usize,
    /// Configured sizes and scrollbar thickness.
    pub config: &'a VirtualScrollConfig,
    /// Element whose client size and scroll offset are read.
    pub target: &'a ScrollTarget<E>,
    /// Content height from the previous measurement, if any.
    pub previous_scroll_height: Option<f64>,
}

/// Measures the current geometry.
///
/// Item width and height come from the configuration when set, otherwise from
/// the first rendered child, otherwise from the container itself.
///
/// Items per row are counted from the rendered children (consecutive children
/// sharing the first child's top edge). The arithmetic value replaces the
/// counted one only when a single row fits and the scroll position is close
/// enough to the end that the last, possibly short, row is what is rendered.
/// With no rendered children the arithmetic value is used.
pub fn measure_dimensions<P>(probe: &P, input: &MeasureInput<'_, P::Element>) -> Dimensions
where
    P: LayoutProbe + ?Sized,
{
    let config = input.config;
    let client = probe.client_size(input.target);
    let view = Size::new(
        client.width - config.scrollbar_width,
        client.height - config.scrollbar_height,
    );

    let sample = probe.child_rect(0);
    let container = probe.container_rect();
    let item = Size::new(
        config
            .item_width
            .unwrap_or_else(|| sample.map_or(container.width(), |r| r.width())),
        config
            .item_height
            .unwrap_or_else(|| sample.map_or(container.height(), |r| r.height())),
    );

    let items_per_row_by_calc = fit_count(view.width, item.width);
    let items_per_col = fit_count(view.height, item.height);

    let items_per_row = match count_first_row(probe) {
        None => items_per_row_by_calc,
        Some(counted) => {
            let scroll_top = probe.scroll_top(input.target).max(0.0);
            if items_per_col == 1
                && last_row_in_view(
                    scroll_top,
                    input.previous_scroll_height,
                    input.item_count,
                    items_per_row_by_calc,
                )
            {
                items_per_row_by_calc
            } else {
                counted.max(1)
            }
        }
    };

    Dimensions::assemble(
        input.item_count,
        view,
        item,
        items_per_row,
        items_per_col,
        items_per_row_by_calc,
        config.tail_height,
    )
}

/// `max(1, floor(extent / size))`, treating NaN and infinity as 1.
pub(crate) fn fit_count(extent: f64, size: f64) -> usize {
    let count = (extent / size).floor();
    if count.is_finite() && count >= 1.0 {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "Finite and at least one; saturating conversion is intended"
        )]
        {
            count as usize
        }
    } else {
        1
    }
}

fn count_first_row<P>(probe: &P) -> Option<usize>
where
    P: LayoutProbe + ?Sized,
{
    let first_top = probe.child_rect(0)?.y0;
    let mut count = 1;
    while let Some(rect) = probe.child_rect(count) {
        if (rect.y0 - first_top).abs() >= ROW_EPSILON {
            break;
        }
        count += 1;
    }
    Some(count)
}

fn last_row_in_view(
    scroll_top: f64,
    previous_scroll_height: Option<f64>,
    item_count: usize,
    items_per_row_by_calc: usize,
) -> bool {
    let Some(scroll_height) = previous_scroll_height.filter(|h| *h > 0.0) else {
        return false;
    };
    let first_index = (scroll_top / scroll_height * item_count as f64).floor();
    first_index + items_per_row_by_calc as f64 >= item_count as f64
}
