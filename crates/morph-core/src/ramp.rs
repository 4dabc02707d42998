#![forbid(unsafe_code)]

//! Tick-driven progress ramps for settle animations.
//!
//! A [`Ramp`] animates the transition progress from one value to another
//! over a fixed duration with a no-overshoot easing curve. Ramps are
//! cooperative tasks in the tick model: the owner calls `tick(dt)` each
//! frame and reads `value()`; cancelling a ramp is simply dropping it in
//! favor of a newer one, after which it contributes no further writes.
//!
//! [`SettleDelay`] is the short wait between a ramp reaching its target and
//! a follow-up action (hiding the morph shape once the detail content has
//! finished its own entrance).
//!
//! # Invariants
//!
//! 1. `value()` is always within `[min(from, to), max(from, to)]` — the
//!    snappy easing never overshoots.
//! 2. A completed ramp reports exactly `to`, never an epsilon short of it.
//! 3. Zero durations are clamped to 1ns so a ramp always completes on the
//!    next tick rather than dividing by zero.

use std::time::Duration;

/// Duration of every discrete (non-drag) progress ramp.
pub const RAMP_DURATION: Duration = Duration::from_millis(350);

/// Wait after a full open before the morph shape is hidden, giving the
/// detail content time to finish its own entrance.
pub const SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Snappy easing: fast start, decisive stop, no overshoot (cubic ease-out).
#[inline]
#[must_use]
pub fn snappy(t: f32) -> f32 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

// ---------------------------------------------------------------------------
// Ramp
// ---------------------------------------------------------------------------

/// A progress ramp from one value toward a target over a fixed duration,
/// eased with [`snappy`].
#[derive(Debug, Clone, Copy)]
pub struct Ramp {
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
}

impl Ramp {
    /// Create a ramp with the standard duration.
    #[must_use]
    pub fn new(from: f32, to: f32) -> Self {
        Self::with_duration(from, to, RAMP_DURATION)
    }

    /// Create a ramp with an explicit duration (clamped to at least 1ns).
    #[must_use]
    pub fn with_duration(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
        }
    }

    /// Advance the ramp by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    /// Current progress value.
    #[must_use]
    pub fn value(&self) -> f32 {
        if self.is_complete() {
            return self.to;
        }
        let t = (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0) as f32;
        self.from + (self.to - self.from) * snappy(t)
    }

    /// The value this ramp is heading toward.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Whether the ramp has reached its target.
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

// ---------------------------------------------------------------------------
// SettleDelay
// ---------------------------------------------------------------------------

/// A countdown between a completed ramp and its follow-up action.
///
/// The owner ticks it each frame and fires the action once `is_elapsed()`.
/// Discarding the delay discards the pending action with it — a superseded
/// settle never applies its flip after the fact.
#[derive(Debug, Clone, Copy)]
pub struct SettleDelay {
    remaining: Duration,
}

impl SettleDelay {
    /// Create a countdown of `duration`.
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self {
            remaining: duration,
        }
    }

    /// Advance the countdown by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.remaining = self.remaining.saturating_sub(dt);
    }

    /// Whether the countdown has run out.
    #[inline]
    #[must_use]
    pub fn is_elapsed(&self) -> bool {
        self.remaining.is_zero()
    }
}
