#![forbid(unsafe_code)]

//! Edge-drag recognition: transforms raw pointer samples into drag events.
//!
//! [`EdgeDragAdapter`] is the boundary with the platform's input system. It
//! watches the trailing-edge hit region of the detail panel and converts the
//! continuous pointer stream into [`DragEvent`]s that the transition
//! controller consumes, one event per gesture-update tick.
//!
//! # State Machine
//!
//! A gesture is live from the first sample inside the hit region until the
//! pointer lifts (or the adapter is reset). While live, every sample emits
//! `DragEvent::Update` carrying the translation from the gesture start; the
//! lift emits `DragEvent::End` carrying the final offset plus a release
//! velocity estimated from a short window of recent samples.
//!
//! # Invariants
//!
//! 1. A sample outside the hit region never starts a gesture.
//! 2. `Update`/`End` are only emitted while a gesture is live; stray samples
//!    with no prior `begin` are ignored.
//! 3. After `reset()` the adapter is idle and the next gesture starts fresh.
//! 4. The velocity window never holds samples older than the configured
//!    span, so a long stationary hold releases with ~zero velocity.
//!
//! # Failure Modes
//!
//! - Out-of-order timestamps: elapsed time saturates at zero; the affected
//!   velocity estimate degrades to 0 rather than going infinite.
//! - A gesture with a single sample (touch-and-lift) releases with zero
//!   velocity and zero offset.

use std::collections::VecDeque;

use web_time::{Duration, Instant};

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A drag command for the transition controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// One live pointer sample; progress tracks it directly, unanimated.
    Update {
        /// Horizontal translation from the gesture start (negative = leftward).
        translation_x: f32,
        /// Width of the viewport the drag is measured against.
        viewport_width: f32,
    },
    /// The pointer lifted; the controller decides close vs. reopen.
    End {
        /// Final horizontal translation from the gesture start.
        final_offset: f32,
        /// Release velocity in points/second (negative = leftward).
        velocity: f32,
        /// Width of the viewport the drag is measured against.
        viewport_width: f32,
    },
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for edge-drag recognition.
#[derive(Debug, Clone)]
pub struct DragConfig {
    /// Width of the trailing-edge hit region, in points (default: 10.0).
    pub edge_width: f32,
    /// Span of recent samples used for the release-velocity estimate
    /// (default: 100ms).
    pub velocity_window: Duration,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            edge_width: 10.0,
            velocity_window: Duration::from_millis(100),
        }
    }
}

// ---------------------------------------------------------------------------
// EdgeDragAdapter
// ---------------------------------------------------------------------------

/// Tracks one live gesture.
#[derive(Debug)]
struct GestureTracker {
    start_x: f32,
    /// Width snapshotted at gesture start; translation and width must come
    /// from the same frame of reference.
    viewport_width: f32,
    samples: VecDeque<(Instant, f32)>,
}

/// Converts raw pointer samples on the trailing edge into [`DragEvent`]s.
///
/// Timestamps are injected by the caller so tests and replay tooling can
/// drive the adapter deterministically.
#[derive(Debug)]
pub struct EdgeDragAdapter {
    config: DragConfig,
    viewport_width: f32,
    gesture: Option<GestureTracker>,
}

impl EdgeDragAdapter {
    /// Create an adapter for a viewport of the given width.
    #[must_use]
    pub fn new(config: DragConfig, viewport_width: f32) -> Self {
        Self {
            config,
            viewport_width,
            gesture: None,
        }
    }

    /// Update the viewport width (device rotation, window resize).
    ///
    /// Does not disturb a gesture already in flight; the in-flight gesture
    /// keeps the width it started with.
    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width;
    }

    /// Whether a gesture is currently live.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Pointer down at `x`. Starts a gesture only inside the trailing-edge
    /// hit region; returns whether a gesture began.
    pub fn begin(&mut self, x: f32, now: Instant) -> bool {
        if self.gesture.is_some() {
            return false;
        }
        if x < self.viewport_width - self.config.edge_width {
            return false;
        }
        let mut samples = VecDeque::with_capacity(8);
        samples.push_back((now, x));
        self.gesture = Some(GestureTracker {
            start_x: x,
            viewport_width: self.viewport_width,
            samples,
        });
        true
    }

    /// Pointer moved to `x`. Emits an `Update` while a gesture is live.
    pub fn update(&mut self, x: f32, now: Instant) -> Option<DragEvent> {
        let window = self.config.velocity_window;
        let gesture = self.gesture.as_mut()?;
        gesture.samples.push_back((now, x));
        trim_window(&mut gesture.samples, now, window);
        Some(DragEvent::Update {
            translation_x: x - gesture.start_x,
            viewport_width: gesture.viewport_width,
        })
    }

    /// Pointer lifted at `x`. Emits an `End` and returns the adapter to idle.
    pub fn end(&mut self, x: f32, now: Instant) -> Option<DragEvent> {
        let window = self.config.velocity_window;
        let mut gesture = self.gesture.take()?;
        gesture.samples.push_back((now, x));
        trim_window(&mut gesture.samples, now, window);
        Some(DragEvent::End {
            final_offset: x - gesture.start_x,
            velocity: estimate_velocity(&gesture.samples),
            viewport_width: gesture.viewport_width,
        })
    }

    /// Abandon any live gesture without emitting an event.
    pub fn reset(&mut self) {
        self.gesture = None;
    }
}

/// Drop samples older than `window` before `now`, keeping at least the newest.
fn trim_window(samples: &mut VecDeque<(Instant, f32)>, now: Instant, window: Duration) {
    while samples.len() > 1 {
        let (t, _) = samples[0];
        if now.saturating_duration_since(t) > window {
            samples.pop_front();
        } else {
            break;
        }
    }
}

/// Slope of the oldest→newest sample in the window, in points/second.
fn estimate_velocity(samples: &VecDeque<(Instant, f32)>) -> f32 {
    let (Some(&(t0, x0)), Some(&(t1, x1))) = (samples.front(), samples.back()) else {
        return 0.0;
    };
    let dt = t1.saturating_duration_since(t0).as_secs_f32();
    if dt <= 0.0 {
        return 0.0;
    }
    (x1 - x0) / dt
}
