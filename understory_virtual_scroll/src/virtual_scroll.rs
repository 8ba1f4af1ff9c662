// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use log::{debug, trace, warn};

use crate::config::VirtualScrollConfig;
use crate::dimensions::{Dimensions, MeasureInput, measure_dimensions};
use crate::error::ConfigError;
use crate::host::{ContentLayout, ScrollHost, ScrollParent, ScrollTarget, Subscription};
use crate::range::{
    ScrollMetrics, VisibleWindow, compute_window, offset_to_reveal_index, scroll_offset_for_index,
};
use crate::tracker::{ChangeTracker, Phase, ViewportEvents};
use crate::tween::ScrollTween;

/// Virtualized viewport over a collection of uniformly sized items.
///
/// `VirtualScroll` owns the items, the configuration, and a [`ScrollHost`].
/// Hosts forward scroll and resize notifications ([`VirtualScroll::on_scroll`],
/// [`VirtualScroll::on_resize`]); those only schedule work. The actual
/// recomputation runs in [`VirtualScroll::on_animation_frame`], so any number
/// of notifications between two frames collapse into a single pass.
///
/// Each pass measures the geometry, converts the scroll offset into a
/// [`VisibleWindow`], pushes content height and top padding to the host when
/// they changed, and returns the resulting [`ViewportEvents`].
#[derive(Debug)]
pub struct VirtualScroll<T, H: ScrollHost> {
    host: H,
    items: Vec<T>,
    config: VirtualScrollConfig,
    parent: Option<ScrollParent<H::Element>>,
    subscription: Option<Subscription>,
    tracker: ChangeTracker,
    window: VisibleWindow,
    last_scroll_height: Option<f64>,
    last_layout: Option<ContentLayout>,
    frame_pending: bool,
    tween: Option<ScrollTween>,
}

impl<T, H: ScrollHost> VirtualScroll<T, H> {
    /// Creates an empty viewport and schedules its first pass.
    pub fn new(host: H, config: VirtualScrollConfig) -> Result<Self, ConfigError> {
        config.validate().inspect_err(|err| warn!("rejected config: {err}"))?;
        let mut this = Self {
            host,
            items: Vec::new(),
            config,
            parent: None,
            subscription: None,
            tracker: ChangeTracker::new(),
            window: VisibleWindow::EMPTY,
            last_scroll_height: None,
            last_layout: None,
            frame_pending: false,
            tween: None,
        };
        this.refresh();
        Ok(this)
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns the host mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Returns the full item collection.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Replaces the item collection.
    ///
    /// Replacing an empty collection restarts the startup loop.
    pub fn set_items(&mut self, items: Vec<T>) {
        let was_empty = self.items.is_empty();
        self.items = items;
        if was_empty {
            self.tracker.enter_startup();
        }
        self.inputs_changed();
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &VirtualScrollConfig {
        &self.config
    }

    /// Replaces the configuration.
    ///
    /// Invalid configurations are rejected and leave the current one in place.
    pub fn set_config(&mut self, config: VirtualScrollConfig) -> Result<(), ConfigError> {
        config.validate().inspect_err(|err| warn!("rejected config: {err}"))?;
        if config != self.config {
            self.config = config;
            self.inputs_changed();
        }
        Ok(())
    }

    /// Sets the number of extra items realized on each side.
    pub fn set_buffer_amount(&mut self, buffer_amount: usize) {
        if self.config.buffer_amount != buffer_amount {
            self.config.buffer_amount = buffer_amount;
            self.inputs_changed();
        }
    }

    /// Sets fixed item dimensions; `None` measures that dimension.
    pub fn set_item_size(
        &mut self,
        width: Option<f64>,
        height: Option<f64>,
    ) -> Result<(), ConfigError> {
        self.set_config(VirtualScrollConfig {
            item_width: width,
            item_height: height,
            ..self.config
        })
    }

    /// Sets scrollbar thicknesses.
    pub fn set_scrollbar_size(&mut self, width: f64, height: f64) -> Result<(), ConfigError> {
        self.set_config(VirtualScrollConfig {
            scrollbar_width: width,
            scrollbar_height: height,
            ..self.config
        })
    }

    /// Returns the external scroll parent, if any.
    #[must_use]
    pub fn parent_scroll(&self) -> Option<&ScrollParent<H::Element>> {
        self.parent.as_ref()
    }

    /// Sets or clears the external scroll parent.
    ///
    /// Listeners on the previous parent are removed before the new parent is
    /// subscribed to. Setting the same parent again does nothing.
    pub fn set_parent_scroll(&mut self, parent: Option<ScrollParent<H::Element>>) {
        if self.parent == parent {
            return;
        }
        if let Some(old) = self.subscription.take() {
            old.release();
        }
        self.parent = parent;
        if let Some(parent) = &self.parent {
            debug!("subscribing to scroll parent {parent:?}");
            self.subscription = Some(self.host.subscribe(parent, parent.events()));
        }
        self.inputs_changed();
    }

    /// Returns `true` if the viewport element scrolls itself.
    ///
    /// Hosts typically hide the viewport's own overflow otherwise.
    #[must_use]
    pub fn owns_scrolling(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns the element whose scroll offset drives the window.
    #[must_use]
    pub fn scroll_target(&self) -> ScrollTarget<H::Element> {
        self.parent
            .as_ref()
            .map_or(ScrollTarget::Own, ScrollParent::target)
    }

    /// Schedules a recomputation on the next animation frame.
    ///
    /// At most one frame is requested until it runs.
    pub fn refresh(&mut self) {
        if !self.frame_pending {
            self.frame_pending = true;
            self.host.request_frame();
        }
    }

    /// Returns `true` if a frame has been requested and not yet run.
    #[must_use]
    pub fn is_frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Scroll notification from the viewport, its parent, or the window.
    pub fn on_scroll(&mut self) {
        self.refresh();
    }

    /// Resize notification from the viewport or the window.
    pub fn on_resize(&mut self) {
        self.refresh();
    }

    /// Runs the pending frame: advances smooth scrolling, then recomputes.
    ///
    /// Frames that were not requested are ignored.
    pub fn on_animation_frame(&mut self, now_ms: f64) -> ViewportEvents {
        if !self.frame_pending {
            return ViewportEvents::new();
        }
        self.frame_pending = false;
        let animating = self.advance_tween(now_ms);
        let events = self.calculate(false);
        if animating {
            self.refresh();
        }
        events
    }

    /// Recomputes immediately, emitting only if the window changed.
    pub fn recompute(&mut self) -> ViewportEvents {
        self.calculate(false)
    }

    /// Recomputes immediately and re-emits the window even if unchanged.
    pub fn force_update(&mut self) -> ViewportEvents {
        self.calculate(true)
    }

    /// Returns the last computed window.
    #[must_use]
    pub fn window(&self) -> VisibleWindow {
        self.window
    }

    /// Returns the items inside the last computed window.
    #[must_use]
    pub fn viewport_items(&self) -> &[T] {
        let end = self.window.end.min(self.items.len());
        let start = self.window.start.min(end);
        &self.items[start..end]
    }

    /// Returns the settling phase of change detection.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.tracker.phase()
    }

    /// Measures the current geometry.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        let target = self.scroll_target();
        measure_dimensions(
            &self.host,
            &MeasureInput {
                item_count: self.items.len(),
                config: &self.config,
                target: &target,
                previous_scroll_height: self.last_scroll_height,
            },
        )
    }

    /// Scrolls so the row of `index` is at the top, less the buffer rows.
    ///
    /// Returns the requested offset, or `None` if `index` is out of range.
    pub fn scroll_to_index(&mut self, index: usize) -> Option<f64> {
        let top = self.offset_for_index(index)?;
        self.tween = None;
        let target = self.scroll_target();
        self.host.set_scroll_top(&target, top);
        self.refresh();
        Some(top)
    }

    /// Like [`VirtualScroll::scroll_to_index`], animated over the configured duration.
    pub fn smooth_scroll_to_index(&mut self, index: usize) -> Option<f64> {
        let top = self.offset_for_index(index)?;
        debug!("smooth scroll to {top}");
        self.tween = Some(ScrollTween::new(top, self.config.smooth_scroll_duration));
        self.refresh();
        Some(top)
    }

    /// Scrolls to the last item.
    pub fn scroll_to_bottom(&mut self) -> Option<f64> {
        let last = self.items.len().checked_sub(1)?;
        self.scroll_to_index(last)
    }

    /// Returns `true` while a smooth scroll is running.
    #[must_use]
    pub fn is_scrolling_smoothly(&self) -> bool {
        self.tween.is_some()
    }

    /// Scrolls the least amount needed to show the item at `index`.
    ///
    /// Returns the new offset, or `None` if the item was already visible or
    /// `index` is out of range. A running smooth scroll is stopped either way
    /// when `index` is in range.
    pub fn ensure_index_visible(&mut self, index: usize) -> Option<f64> {
        if index >= self.items.len() {
            return None;
        }
        self.tween = None;
        let d = self.dimensions();
        let target = self.scroll_target();
        let current = self.host.scroll_top(&target);
        let top = offset_to_reveal_index(&d, index, self.config.buffer_amount, current)?;
        self.host.set_scroll_top(&target, top);
        self.refresh();
        Some(top)
    }

    fn offset_for_index(&self, index: usize) -> Option<f64> {
        if index >= self.items.len() {
            return None;
        }
        let d = self.dimensions();
        Some(scroll_offset_for_index(&d, index, self.config.buffer_amount))
    }

    fn inputs_changed(&mut self) {
        self.tracker.reset_previous();
        self.refresh();
    }

    fn offset_top(&self) -> f64 {
        if self.parent.is_some() {
            self.host.container_offset_top()
        } else {
            0.0
        }
    }

    fn advance_tween(&mut self, now_ms: f64) -> bool {
        let target = self.scroll_target();
        let Some(tween) = &mut self.tween else {
            return false;
        };
        let top = tween.sample(now_ms, self.host.scroll_top(&target));
        let done = tween.is_done(now_ms);
        self.host.set_scroll_top(&target, top);
        if done {
            self.tween = None;
        }
        !done
    }

    fn calculate(&mut self, force: bool) -> ViewportEvents {
        let target = self.scroll_target();
        let d = self.dimensions();
        let metrics = ScrollMetrics::with_offset(self.host.scroll_top(&target), self.offset_top());
        let window = compute_window(&d, metrics, self.config.buffer_amount);
        trace!("virtual scroll pass: {d:?} {metrics:?} -> {window:?}");

        self.last_scroll_height = Some(d.scroll_height);
        self.apply_layout(ContentLayout {
            content_height: d.scroll_height,
            top_padding: window.top_padding,
        });
        self.window = window;

        let was_startup = self.tracker.phase() == Phase::Startup;
        let observation = self.tracker.observe(window.start, window.end, force);
        if observation.applied {
            debug!("visible window {}..{}", window.start, window.end);
        }
        if was_startup && self.tracker.phase() == Phase::Steady {
            debug!("startup loop settled at {}..{}", window.start, window.end);
        }
        if observation.needs_refresh {
            self.refresh();
        }
        observation.events
    }

    fn apply_layout(&mut self, layout: ContentLayout) {
        if self.last_layout != Some(layout) {
            self.last_layout = Some(layout);
            self.host.apply_layout(layout);
        }
    }
}

impl<T: PartialEq, H: ScrollHost> VirtualScroll<T, H> {
    /// Scrolls so `item` is in view, see [`VirtualScroll::scroll_to_index`].
    ///
    /// Returns `None` if the item is not in the collection.
    pub fn scroll_into(&mut self, item: &T) -> Option<f64> {
        let index = self.position_of(item)?;
        self.scroll_to_index(index)
    }

    /// Scrolls the least amount needed to show `item`.
    pub fn ensure_item_visible(&mut self, item: &T) -> Option<f64> {
        let index = self.position_of(item)?;
        self.ensure_index_visible(index)
    }

    fn position_of(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|candidate| candidate == item)
    }
}

impl<T, H: ScrollHost> Drop for VirtualScroll<T, H> {
    fn drop(&mut self) {
        if self.frame_pending {
            self.host.cancel_frame();
        }
        if let Some(subscription) = self.subscription.take() {
            subscription.release();
        }
    }
}
