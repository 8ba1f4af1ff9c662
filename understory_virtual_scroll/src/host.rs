// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capabilities supplied by the embedding UI layer.
//!
//! The windowing algorithm never touches a real rendering host. Everything it
//! needs to read (sizes, offsets, bounding boxes) goes through [`LayoutProbe`],
//! and everything it needs to do (scroll, listen, schedule a frame) goes through
//! [`ScrollHost`]. Tests and benchmarks implement both over plain data.

use alloc::boxed::Box;
use core::fmt;

use bitflags::bitflags;
use kurbo::{Rect, Size};

/// An external element (or the window) that owns scrolling for the viewport.
///
/// When no parent is set, the viewport element scrolls itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScrollParent<E> {
    /// A scrollable ancestor element.
    Element(E),
    /// The top-level window.
    Window,
}

impl<E: Clone> ScrollParent<E> {
    /// Returns the target whose scroll offset and client size are read.
    #[must_use]
    pub fn target(&self) -> ScrollTarget<E> {
        match self {
            Self::Element(element) => ScrollTarget::Element(element.clone()),
            Self::Window => ScrollTarget::Document,
        }
    }

    /// Returns the events to listen for on this parent.
    ///
    /// Resizes only matter for the window; element parents report size changes
    /// through the viewport's own resize notifications.
    #[must_use]
    pub fn events(&self) -> ScrollEvents {
        match self {
            Self::Element(_) => ScrollEvents::SCROLL,
            Self::Window => ScrollEvents::SCROLL | ScrollEvents::RESIZE,
        }
    }
}

/// The element whose scroll offset and client size drive the computation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScrollTarget<E> {
    /// The viewport element itself.
    Own,
    /// An external scroll parent element.
    Element(E),
    /// The document body, used when the window scrolls.
    Document,
}

bitflags! {
    /// Event kinds a [`Subscription`] listens for.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ScrollEvents: u8 {
        /// Scroll offset changes.
        const SCROLL = 1 << 0;
        /// Size changes.
        const RESIZE = 1 << 1;
    }
}

/// Pixel layout the host should apply after a recomputation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentLayout {
    /// Height of the full (virtual) content, used to size the scroll spacer.
    pub content_height: f64,
    /// Offset of the rendered subset from the top of the content.
    pub top_padding: f64,
}

/// Read-only measurement capability.
pub trait LayoutProbe {
    /// Handle type for external scroll parent elements.
    type Element: Clone + PartialEq + fmt::Debug;

    /// Client size (excluding borders) of the given scroll target.
    fn client_size(&self, target: &ScrollTarget<Self::Element>) -> Size;

    /// Current vertical scroll offset of the given scroll target.
    ///
    /// For [`ScrollTarget::Document`] hosts usually report
    /// [`window_scroll_offset`].
    fn scroll_top(&self, target: &ScrollTarget<Self::Element>) -> f64;

    /// Bounding box of the viewport element.
    fn container_rect(&self) -> Rect;

    /// Vertical offset of the viewport element inside its external scroll parent.
    fn container_offset_top(&self) -> f64;

    /// Bounding box of the `index`-th currently rendered child, in render order.
    ///
    /// Returns `None` past the last rendered child.
    fn child_rect(&self, index: usize) -> Option<Rect>;
}

/// Mutating capability of the embedding UI layer.
pub trait ScrollHost: LayoutProbe {
    /// Sets the vertical scroll offset of the given scroll target.
    ///
    /// Hosts are expected to clamp the offset into the scrollable range.
    fn set_scroll_top(&mut self, target: &ScrollTarget<Self::Element>, top: f64);

    /// Starts listening to `events` on `parent`.
    ///
    /// The returned [`Subscription`] must remove the listeners when released.
    fn subscribe(
        &mut self,
        parent: &ScrollParent<Self::Element>,
        events: ScrollEvents,
    ) -> Subscription;

    /// Asks for [`VirtualScroll::on_animation_frame`](crate::VirtualScroll::on_animation_frame)
    /// to be called on the next frame.
    fn request_frame(&mut self);

    /// Drops a previously requested frame.
    fn cancel_frame(&mut self) {}

    /// Applies new content height and top padding.
    ///
    /// Only called when one of the values changed.
    fn apply_layout(&mut self, _layout: ContentLayout) {}
}

/// Owned listener registration.
///
/// The release closure runs exactly once: on [`Subscription::release`] or on
/// drop, whichever comes first.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Creates a subscription that runs `release` when it ends.
    #[must_use]
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Creates a subscription with nothing to release.
    #[must_use]
    pub fn detached() -> Self {
        Self { release: None }
    }

    /// Returns `true` if the release closure has not run yet.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    /// Ends the subscription now.
    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Resolves the window scroll offset from the usual fallback chain.
///
/// Returns the first of `page_y_offset`, `document_scroll_top`, and
/// `body_scroll_top` that is finite and non-zero, or `0.0`.
#[must_use]
pub fn window_scroll_offset(
    page_y_offset: f64,
    document_scroll_top: f64,
    body_scroll_top: f64,
) -> f64 {
    [page_y_offset, document_scroll_top, body_scroll_top]
        .into_iter()
        .find(|value| value.is_finite() && *value != 0.0)
        .unwrap_or(0.0)
}
