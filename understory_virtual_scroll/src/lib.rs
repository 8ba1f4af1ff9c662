// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_virtual_scroll --heading-base-level=0

//! Understory Virtual Scroll: viewport windowing for uniformly sized items.
//!
//! Given a large ordered collection, the size of one item, the size of the
//! scrollable viewport, and the current scroll offset, this crate computes
//! which contiguous range of items should be rendered (plus a configurable
//! buffer) and how far down that range must be pushed so the scrollbar keeps
//! describing the full collection. Items may be laid out as a single column
//! or as a grid of equally sized cells.
//!
//! The crate is split into small, pure pieces and one controller:
//!
//! - [`measure_dimensions`]: derives item size and items per row/column from
//!   configuration or from live measurements supplied by a [`LayoutProbe`].
//! - [`compute_window`]: converts a scroll offset into a [`VisibleWindow`]
//!   (`[start, end)` plus top padding).
//! - [`ChangeTracker`]: decides which [`ViewportEvent`]s a newly computed
//!   window produces, including the startup settling loop.
//! - [`VirtualScroll`]: owns the items, a [`VirtualScrollConfig`], and a
//!   [`ScrollHost`], coalesces scroll/resize notifications into one pass per
//!   animation frame, manages the external scroll parent subscription, and
//!   offers programmatic scrolling.
//!
//! This crate deliberately does **not** render anything. Host frameworks are
//! responsible for:
//!
//! - Implementing [`ScrollHost`] over their element tree.
//! - Calling [`VirtualScroll::on_animation_frame`] when a requested frame runs.
//! - Rendering [`VirtualScroll::viewport_items`] after an `Update` event,
//!   offset by the top padding they receive through [`ScrollHost::apply_layout`].
//!
//! ## Minimal example
//!
//! The pure functions can be used without any host:
//!
//! ```rust
//! use kurbo::Size;
//! use understory_virtual_scroll::{Dimensions, ScrollMetrics, compute_window};
//!
//! // 100 items in a 250x200 viewport, 50x50 cells: 5 per row, 4 rows visible.
//! let d = Dimensions::from_sizes(100, Size::new(250.0, 200.0), Size::new(50.0, 50.0), 0.0);
//!
//! let top = compute_window(&d, ScrollMetrics::new(0.0), 0);
//! assert_eq!(top.start, 0);
//!
//! let bottom = compute_window(&d, ScrollMetrics::new(d.scroll_height), 0);
//! assert_eq!(bottom.end, 100);
//! ```
//!
//! All lengths are logical pixels. Logging goes through the `log` facade;
//! the crate never installs a logger.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod dimensions;
mod error;
mod host;
mod range;
mod tracker;
mod tween;
mod virtual_scroll;

pub use config::{DEFAULT_SMOOTH_SCROLL_DURATION, VirtualScrollConfig};
pub use dimensions::{Dimensions, MeasureInput, measure_dimensions};
pub use error::{Axis, ConfigError};
pub use host::{
    ContentLayout, LayoutProbe, ScrollEvents, ScrollHost, ScrollParent, ScrollTarget,
    Subscription, window_scroll_offset,
};
pub use range::{
    ScrollMetrics, VisibleWindow, adjusted_scroll_top, compute_window, offset_to_reveal_index,
    scroll_offset_for_index,
};
pub use tracker::{ChangeEvent, ChangeTracker, Observation, Phase, ViewportEvent, ViewportEvents};
pub use tween::{ScrollTween, ease_out_quad};
pub use virtual_scroll::VirtualScroll;
