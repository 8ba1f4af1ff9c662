// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Eased scroll animation driven by frame timestamps.

/// Quadratic ease-out: fast start, slow finish.
#[must_use]
pub fn ease_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * (2.0 - t)
}

/// Animation of a scroll offset towards a target.
///
/// Both the clock and the starting offset are taken at the first
/// [`ScrollTween::sample`] call, so a tween can be created outside of a frame
/// and picked up by the next one without undoing scrolling done in between.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTween {
    from: Option<f64>,
    to: f64,
    start_ms: Option<f64>,
    duration_ms: f64,
}

impl ScrollTween {
    /// Creates a tween to `to` lasting `duration_ms`.
    #[must_use]
    pub fn new(to: f64, duration_ms: f64) -> Self {
        Self {
            from: None,
            to,
            start_ms: None,
            duration_ms: duration_ms.max(0.0),
        }
    }

    /// Final offset.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Returns the offset at `now_ms`.
    ///
    /// On the first call `current` becomes the starting offset; later calls
    /// ignore it.
    pub fn sample(&mut self, now_ms: f64, current: f64) -> f64 {
        let start = *self.start_ms.get_or_insert(now_ms);
        let from = *self.from.get_or_insert(current);
        let t = self.progress(start, now_ms);
        from + (self.to - from) * ease_out_quad(t)
    }

    /// Returns `true` once the tween has reached its target at `now_ms`.
    #[must_use]
    pub fn is_done(&self, now_ms: f64) -> bool {
        match self.start_ms {
            Some(start) => self.progress(start, now_ms) >= 1.0,
            None => self.duration_ms == 0.0,
        }
    }

    fn progress(&self, start: f64, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - start) / self.duration_ms).clamp(0.0, 1.0)
    }
}
