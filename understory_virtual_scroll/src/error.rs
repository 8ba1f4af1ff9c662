// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Geometric axis a configuration value applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal (widths).
    Horizontal,
    /// Vertical (heights).
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => f.write_str("width"),
            Self::Vertical => f.write_str("height"),
        }
    }
}

/// Error returned when a [`VirtualScrollConfig`](crate::VirtualScrollConfig) is rejected.
///
/// Runtime geometry (zero-sized viewports, empty collections, missing
/// measurements) is never reported through this type; it degrades to an
/// empty or minimal window instead.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    /// A configured item size was zero, negative, or not finite.
    InvalidItemSize {
        /// Which item dimension was rejected.
        axis: Axis,
        /// The rejected value.
        value: f64,
    },
    /// A configured scrollbar thickness was negative or not finite.
    InvalidScrollbar {
        /// Which scrollbar was rejected.
        axis: Axis,
        /// The rejected value.
        value: f64,
    },
    /// The tail height was negative or not finite.
    InvalidTailHeight(f64),
    /// The smooth scroll duration was negative or not finite.
    InvalidDuration(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidItemSize { axis, value } => {
                write!(f, "item {axis} must be finite and positive, got {value}")
            }
            Self::InvalidScrollbar { axis, value } => {
                write!(
                    f,
                    "scrollbar {axis} must be finite and non-negative, got {value}"
                )
            }
            Self::InvalidTailHeight(value) => {
                write!(f, "tail height must be finite and non-negative, got {value}")
            }
            Self::InvalidDuration(value) => {
                write!(
                    f,
                    "smooth scroll duration must be finite and non-negative, got {value}"
                )
            }
        }
    }
}

impl core::error::Error for ConfigError {}
