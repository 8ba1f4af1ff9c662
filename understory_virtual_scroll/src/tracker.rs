// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change detection for computed windows.
//!
//! [`ChangeTracker`] remembers the last emitted window and decides, for each
//! newly computed one, which [`ViewportEvent`]s to emit and whether another
//! recomputation pass is needed.
//!
//! A tracker starts in [`Phase::Startup`]. While starting up every pass asks
//! for one more pass, so the viewport keeps recomputing while its container
//! is still settling on a size. The first pass that finds the window
//! unchanged moves it to [`Phase::Steady`], where events are only emitted for
//! real changes.

use smallvec::SmallVec;

/// A `[start, end)` window reported to listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChangeEvent {
    /// First realized index.
    pub start: usize,
    /// One past the last realized index.
    pub end: usize,
}

/// Notification produced by a recomputation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportEvent {
    /// The realized subset changed; re-read the viewport items.
    Update(ChangeEvent),
    /// The start boundary moved. Not emitted during startup.
    Start(ChangeEvent),
    /// The end boundary moved. Not emitted during startup.
    End(ChangeEvent),
    /// The window changed after startup settled.
    Change(ChangeEvent),
}

/// Events produced by one recomputation, in emission order.
pub type ViewportEvents = SmallVec<[ViewportEvent; 4]>;

/// Settling phase of a [`ChangeTracker`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Still absorbing initial layout; every pass requests another.
    Startup,
    /// Only real window changes are reported.
    Steady,
}

/// Result of [`ChangeTracker::observe`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Observation {
    /// Events to deliver.
    pub events: ViewportEvents,
    /// `true` if the window was (re)applied.
    pub applied: bool,
    /// `true` if another recomputation pass should be scheduled.
    pub needs_refresh: bool,
}

/// Previous-window and startup state used for change detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChangeTracker {
    previous: Option<ChangeEvent>,
    startup_loop: bool,
}

impl Default for ChangeTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeTracker {
    /// Creates a tracker in [`Phase::Startup`] with no previous window.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            previous: None,
            startup_loop: true,
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.startup_loop {
            Phase::Startup
        } else {
            Phase::Steady
        }
    }

    /// Returns the last applied window, if any.
    #[must_use]
    pub fn previous(&self) -> Option<ChangeEvent> {
        self.previous
    }

    /// Forgets the previous window so the next observation is applied.
    pub fn reset_previous(&mut self) {
        self.previous = None;
    }

    /// Re-enters [`Phase::Startup`].
    pub fn enter_startup(&mut self) {
        self.startup_loop = true;
    }

    /// Records a newly computed window.
    ///
    /// With `force` the window is applied even when unchanged.
    pub fn observe(&mut self, start: usize, end: usize, force: bool) -> Observation {
        let window = ChangeEvent { start, end };
        let mut observation = Observation::default();

        if self.previous != Some(window) || force {
            let previous = self.previous;
            observation.events.push(ViewportEvent::Update(window));
            if !self.startup_loop {
                if previous.map(|p| p.start) != Some(start) {
                    observation.events.push(ViewportEvent::Start(window));
                }
                if previous.map(|p| p.end) != Some(end) {
                    observation.events.push(ViewportEvent::End(window));
                }
            }
            self.previous = Some(window);
            observation.applied = true;
            if self.startup_loop {
                observation.needs_refresh = true;
            } else {
                observation.events.push(ViewportEvent::Change(window));
            }
        } else if self.startup_loop {
            self.startup_loop = false;
            observation.needs_refresh = true;
        }

        observation
    }
}
