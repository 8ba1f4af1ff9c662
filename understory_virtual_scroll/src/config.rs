// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static configuration for a [`VirtualScroll`](crate::VirtualScroll).

use crate::error::{Axis, ConfigError};

/// Default duration, in milliseconds, of a smooth programmatic scroll.
pub const DEFAULT_SMOOTH_SCROLL_DURATION: f64 = 500.0;

/// Configuration inputs of a virtual scroll viewport.
///
/// All values are in logical pixels unless noted otherwise. Item width and
/// height are independent: a dimension left as `None` is measured from the
/// first rendered child (or the container itself when nothing is rendered).
///
/// ```rust
/// use understory_virtual_scroll::VirtualScrollConfig;
///
/// let config = VirtualScrollConfig::new()
///     .with_item_size(120.0, 40.0)
///     .with_buffer_amount(4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct VirtualScrollConfig {
    /// Fixed item width; measured when `None`.
    pub item_width: Option<f64>,
    /// Fixed item height; measured when `None`.
    pub item_height: Option<f64>,
    /// Extra items realized before and after the visible window.
    pub buffer_amount: usize,
    /// Thickness of the vertical scrollbar, subtracted from the client width.
    pub scrollbar_width: f64,
    /// Thickness of the horizontal scrollbar, subtracted from the client height.
    pub scrollbar_height: f64,
    /// Height of trailing content rendered after the last row.
    pub tail_height: f64,
    /// Duration of smooth programmatic scrolls, in milliseconds.
    pub smooth_scroll_duration: f64,
}

impl Default for VirtualScrollConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualScrollConfig {
    /// Creates a configuration that measures item sizes and has no buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            item_width: None,
            item_height: None,
            buffer_amount: 0,
            scrollbar_width: 0.0,
            scrollbar_height: 0.0,
            tail_height: 0.0,
            smooth_scroll_duration: DEFAULT_SMOOTH_SCROLL_DURATION,
        }
    }

    /// Sets both item dimensions.
    #[must_use]
    pub const fn with_item_size(mut self, width: f64, height: f64) -> Self {
        self.item_width = Some(width);
        self.item_height = Some(height);
        self
    }

    /// Sets only the item height, leaving the width to measurement.
    #[must_use]
    pub const fn with_item_height(mut self, height: f64) -> Self {
        self.item_height = Some(height);
        self
    }

    /// Sets the buffer amount.
    #[must_use]
    pub const fn with_buffer_amount(mut self, buffer_amount: usize) -> Self {
        self.buffer_amount = buffer_amount;
        self
    }

    /// Sets the scrollbar thicknesses.
    #[must_use]
    pub const fn with_scrollbar_size(mut self, width: f64, height: f64) -> Self {
        self.scrollbar_width = width;
        self.scrollbar_height = height;
        self
    }

    /// Sets the tail height.
    #[must_use]
    pub const fn with_tail_height(mut self, tail_height: f64) -> Self {
        self.tail_height = tail_height;
        self
    }

    /// Sets the smooth scroll duration in milliseconds.
    #[must_use]
    pub const fn with_smooth_scroll_duration(mut self, duration_ms: f64) -> Self {
        self.smooth_scroll_duration = duration_ms;
        self
    }

    /// Checks that every value is usable.
    ///
    /// Item sizes must be finite and strictly positive; all other lengths must
    /// be finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, size) in [
            (Axis::Horizontal, self.item_width),
            (Axis::Vertical, self.item_height),
        ] {
            if let Some(value) = size {
                if !value.is_finite() || value <= 0.0 {
                    return Err(ConfigError::InvalidItemSize { axis, value });
                }
            }
        }
        for (axis, value) in [
            (Axis::Horizontal, self.scrollbar_width),
            (Axis::Vertical, self.scrollbar_height),
        ] {
            if !is_length(value) {
                return Err(ConfigError::InvalidScrollbar { axis, value });
            }
        }
        if !is_length(self.tail_height) {
            return Err(ConfigError::InvalidTailHeight(self.tail_height));
        }
        if !is_length(self.smooth_scroll_duration) {
            return Err(ConfigError::InvalidDuration(self.smooth_scroll_duration));
        }
        Ok(())
    }
}

fn is_length(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
