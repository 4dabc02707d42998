#![forbid(unsafe_code)]

//! The transition controller: one state machine owning progress, visibility,
//! drag state, and the anchor capture policy.
//!
//! Commands arrive serialized on one logical owner (a UI-thread-equivalent
//! event queue); the owner also calls [`tick`](TransitionController::tick)
//! once per frame to advance settle animations. Ramps are cooperative
//! tasks: starting a new one replaces whatever is in flight, so overlapping
//! triggers never run two animations against the same progress value, and a
//! superseded settle never applies its visibility flip after the fact.
//!
//! # State Machine
//!
//! `Idle → Opening → Open → (Dragging ⇄ Open) → Closing → Idle`
//!
//! `Opening` covers any ramp toward 1 (the initial open and the
//! drag-release reopen); `Closing` covers any ramp toward 0.
//!
//! # Invariants
//!
//! 1. `selected` is `None` iff the controller is idle.
//! 2. The anchor cache holds a pair only while `selected` is set; it is
//!    emptied exactly when the controller returns to idle.
//! 3. `progress` stays in [0, 1] and is mutated only by commands and ticks,
//!    never by a renderer.
//! 4. While dragging, progress equals the clamped function of the latest
//!    drag sample; no ramp or settle is in flight.
//! 5. `Open` always drives progress to exactly 1 before any visibility
//!    flip; `Close` drives it to exactly 0 before clearing `selected`.
//!
//! # Failure Modes
//!
//! - Commands invalid for the current phase are silent no-ops: input
//!   systems routinely deliver redundant or out-of-order events, and this
//!   machine has no error surface by design.
//! - Anchors that were never reported read as the zero rect and interpolate
//!   to a zero-size (invisible) frame rather than panicking.

use std::time::Duration;

use tracing::{debug, trace};

use morph_core::anchor::{AnchorCache, AnchorPair, AnchorRegistry, ItemId};
use morph_core::geometry::Rect;
use morph_core::gesture::DragEvent;
use morph_core::interpolate::{MorphFrame, interpolate};
use morph_core::ramp::{Ramp, SETTLE_DELAY, SettleDelay};

use crate::observer::{Observers, SubscriptionId};

/// Fraction of the drag translation applied to progress. Slightly over 1 so
/// the morph reaches fully-collapsed before the finger crosses the whole
/// viewport.
const DRAG_RATE: f32 = 1.2;

/// Fraction of the viewport width that `offset + velocity` must exceed
/// (leftward) for a drag release to commit to closing.
const CLOSE_THRESHOLD_FRACTION: f32 = 0.8;

// ---------------------------------------------------------------------------
// Commands and snapshots
// ---------------------------------------------------------------------------

/// A command for the transition controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Tap on a list row: begin a transition episode for `id`, using the
    /// live-measured anchor rects supplied by the collaborators.
    Open {
        /// The tapped row.
        id: ItemId,
        /// Live bounds of the row thumbnail.
        source: Rect,
        /// Live bounds of the detail placeholder.
        dest: Rect,
    },
    /// Tap on the close button: animate back to the list.
    Close,
    /// One live drag sample; progress tracks it directly, unanimated.
    DragUpdate {
        /// Horizontal translation from the gesture start.
        translation_x: f32,
        /// Viewport width the drag is measured against. Must be positive.
        viewport_width: f32,
    },
    /// Drag released: commit to closing or reopening.
    DragEnd {
        /// Final horizontal translation from the gesture start.
        final_offset: f32,
        /// Release velocity in points/second.
        velocity: f32,
        /// Viewport width the drag is measured against. Must be positive.
        viewport_width: f32,
    },
}

impl From<DragEvent> for Command {
    fn from(ev: DragEvent) -> Self {
        match ev {
            DragEvent::Update {
                translation_x,
                viewport_width,
            } => Self::DragUpdate {
                translation_x,
                viewport_width,
            },
            DragEvent::End {
                final_offset,
                velocity,
                viewport_width,
            } => Self::DragEnd {
                final_offset,
                velocity,
                viewport_width,
            },
        }
    }
}

/// Lifecycle phase of the transition episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No episode; the morph shape is not drawn.
    Idle,
    /// A ramp toward 1 is in flight (initial open or drag-release reopen).
    Opening,
    /// Fully expanded; the detail content owns the screen.
    Open,
    /// A live gesture is scrubbing progress.
    Dragging,
    /// A ramp toward 0 is in flight.
    Closing,
}

/// Observable state published to renderers after every change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    /// Current lifecycle phase.
    pub phase: Phase,
    /// Transition progress: 0 = collapsed to the list row, 1 = expanded.
    pub progress: f32,
    /// Whether the morph shape should be drawn.
    pub visible: bool,
    /// Whether a live gesture owns progress right now.
    pub dragging: bool,
    /// The active transition target, if any.
    pub selected: Option<ItemId>,
    /// Interpolated frame for the morph shape; `None` until anchors are
    /// captured for the episode.
    pub morph: Option<MorphFrame>,
}

// ---------------------------------------------------------------------------
// TransitionController
// ---------------------------------------------------------------------------

/// The single owner of transition state.
///
/// Collaborators report anchors via [`report_source_anchor`] and
/// [`report_dest_anchor`], apply [`Command`]s, and call [`tick`] once per
/// frame.
///
/// [`report_source_anchor`]: Self::report_source_anchor
/// [`report_dest_anchor`]: Self::report_dest_anchor
/// [`tick`]: Self::tick
pub struct TransitionController {
    phase: Phase,
    progress: f32,
    visible: bool,
    selected: Option<ItemId>,
    cache: AnchorCache,
    registry: AnchorRegistry,
    ramp: Option<Ramp>,
    /// Settle delay counting down toward a pending visibility flip.
    settle: Option<SettleDelay>,
    /// Delay to schedule once the in-flight ramp reaches 1, if any.
    pending_hide: Option<Duration>,
    /// Bumped on every `Open`; labels log events with their episode.
    episode: u64,
    observers: Observers,
    last_published: Option<Snapshot>,
}

impl std::fmt::Debug for TransitionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionController")
            .field("phase", &self.phase)
            .field("progress", &self.progress)
            .field("visible", &self.visible)
            .field("selected", &self.selected)
            .field("episode", &self.episode)
            .finish_non_exhaustive()
    }
}

impl Default for TransitionController {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionController {
    /// Create an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            progress: 0.0,
            visible: true,
            selected: None,
            cache: AnchorCache::new(),
            registry: AnchorRegistry::new(),
            ramp: None,
            settle: None,
            pending_hide: None,
            episode: 0,
            observers: Observers::new(),
            last_published: None,
        }
    }

    // -- Anchor supply ------------------------------------------------------

    /// Record the live bounds of one list row's thumbnail (every layout pass).
    pub fn report_source_anchor(&mut self, id: ItemId, rect: Rect) {
        self.registry.report_source(id, rect);
    }

    /// Record the live bounds of the detail placeholder (every layout pass).
    pub fn report_dest_anchor(&mut self, rect: Rect) {
        self.registry.report_dest(rect);
    }

    // -- Accessors ----------------------------------------------------------

    /// Current lifecycle phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current transition progress in [0, 1].
    #[inline]
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Whether the morph shape should be drawn.
    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether a live gesture owns progress.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.phase == Phase::Dragging
    }

    /// The active transition target, if any.
    #[inline]
    #[must_use]
    pub fn selected(&self) -> Option<ItemId> {
        self.selected
    }

    /// Build the current observable state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let morph = self
            .cache
            .pair()
            .map(|pair| interpolate(pair.source, pair.dest, self.progress));
        Snapshot {
            phase: self.phase,
            progress: self.progress,
            visible: self.visible,
            dragging: self.is_dragging(),
            selected: self.selected,
            morph,
        }
    }

    /// Register a snapshot observer.
    pub fn subscribe(&mut self, f: impl FnMut(&Snapshot) + 'static) -> SubscriptionId {
        self.observers.subscribe(f)
    }

    /// Remove a snapshot observer.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // -- Commands -----------------------------------------------------------

    /// Apply one command. Invalid commands for the current phase are no-ops.
    pub fn apply(&mut self, cmd: Command) {
        match cmd {
            Command::Open { id, source, dest } => self.open(id, source, dest),
            Command::Close => self.close(),
            Command::DragUpdate {
                translation_x,
                viewport_width,
            } => self.drag_update(translation_x, viewport_width),
            Command::DragEnd {
                final_offset,
                velocity,
                viewport_width,
            } => self.drag_end(final_offset, velocity, viewport_width),
        }
        self.assert_invariants();
        self.publish();
    }

    /// Advance settle animations by `dt`. Call once per frame.
    pub fn tick(&mut self, dt: Duration) {
        if self.phase == Phase::Idle {
            return;
        }
        if let Some(ramp) = self.ramp.as_mut() {
            ramp.tick(dt);
            self.progress = ramp.value();
            if ramp.is_complete() {
                let target = ramp.target();
                self.ramp = None;
                self.finish_ramp(target);
            }
        } else if let Some(settle) = self.settle.as_mut() {
            settle.tick(dt);
            if settle.is_elapsed() {
                self.settle = None;
                debug!(episode = self.episode, "settle elapsed, hiding morph");
                self.visible = false;
            }
        }
        self.assert_invariants();
        self.publish();
    }

    fn open(&mut self, id: ItemId, source: Rect, dest: Rect) {
        if self.phase != Phase::Idle {
            trace!(?id, phase = ?self.phase, "open ignored: already transitioning");
            return;
        }
        self.episode += 1;
        debug!(episode = self.episode, ?id, "open");
        // Keep the registry warm with the rects the collaborators supplied.
        self.registry.report_source(id, source);
        self.registry.report_dest(dest);
        self.selected = Some(id);
        self.cache.capture(AnchorPair::new(source, dest));
        self.visible = true;
        self.phase = Phase::Opening;
        self.ramp_then_hide(1.0, Some(SETTLE_DELAY));
    }

    fn close(&mut self) {
        match self.phase {
            Phase::Idle => {
                trace!("close ignored: idle");
                return;
            }
            Phase::Closing => {
                // One settle animation at a time; the in-flight ramp already
                // targets 0.
                trace!(episode = self.episode, "close ignored: already closing");
                return;
            }
            _ => {}
        }
        debug!(episode = self.episode, phase = ?self.phase, "close");
        self.visible = true;
        self.phase = Phase::Closing;
        self.ramp_then_hide(0.0, None);
    }

    fn drag_update(&mut self, translation_x: f32, viewport_width: f32) {
        if self.phase == Phase::Idle {
            trace!("drag update ignored: idle");
            return;
        }
        debug_assert!(
            viewport_width > 0.0,
            "drag sampled against a non-positive viewport width"
        );
        if !(viewport_width > 0.0) {
            return;
        }

        if self.phase != Phase::Dragging {
            // First sample of a new drag: re-anchor to the live layout and
            // supersede whatever settle animation was playing.
            if let Some(id) = self.selected {
                self.cache.capture(self.registry.pair_for(id));
            }
            self.supersede("drag start");
            self.phase = Phase::Dragging;
        }

        // Only leftward (closing) drags are honored.
        let clamped_translation = translation_x.min(0.0);
        let raw = 1.0 + (clamped_translation * DRAG_RATE) / viewport_width;
        self.progress = raw.clamp(0.0, 1.0);
        self.visible = true;
        trace!(
            episode = self.episode,
            translation_x,
            progress = self.progress,
            "drag update"
        );
    }

    fn drag_end(&mut self, final_offset: f32, velocity: f32, viewport_width: f32) {
        if self.phase != Phase::Dragging {
            trace!(phase = ?self.phase, "drag end ignored: not dragging");
            return;
        }
        debug_assert!(
            viewport_width > 0.0,
            "drag released against a non-positive viewport width"
        );
        let close_threshold = -CLOSE_THRESHOLD_FRACTION * viewport_width;
        // Offset and velocity are summed, not compared independently: a fast
        // flick with a small offset and a slow drag with a large offset are
        // treated identically.
        let committed = final_offset + velocity;
        debug!(
            episode = self.episode,
            final_offset, velocity, close_threshold, "drag end"
        );
        if committed < close_threshold {
            self.phase = Phase::Closing;
            self.ramp_then_hide(0.0, None);
        } else {
            // Reopen: mirrors the tail of `open`, but the detail content is
            // already mounted so the hide needs no settle delay.
            self.phase = Phase::Opening;
            self.ramp_then_hide(1.0, Some(Duration::ZERO));
        }
    }

    // -- Internals ----------------------------------------------------------

    /// Start a ramp from the current progress toward `target`, superseding
    /// any ramp or settle in flight. For `target == 1`, `hide_after` is the
    /// delay before the morph shape is hidden once the ramp completes.
    fn ramp_then_hide(&mut self, target: f32, hide_after: Option<Duration>) {
        self.supersede("new ramp");
        self.ramp = Some(Ramp::new(self.progress, target));
        self.pending_hide = hide_after;
    }

    /// Discard any in-flight ramp, settle countdown, and pending flip.
    fn supersede(&mut self, why: &str) {
        if self.ramp.is_some() || self.settle.is_some() || self.pending_hide.is_some() {
            trace!(episode = self.episode, why, "superseding in-flight settle");
        }
        self.ramp = None;
        self.settle = None;
        self.pending_hide = None;
    }

    fn finish_ramp(&mut self, target: f32) {
        if target >= 1.0 {
            self.phase = Phase::Open;
            match self.pending_hide.take() {
                Some(delay) if delay.is_zero() => {
                    debug!(episode = self.episode, "reopen complete, hiding morph");
                    self.visible = false;
                }
                Some(delay) => {
                    self.settle = Some(SettleDelay::new(delay));
                }
                None => {}
            }
        } else {
            // Reached 0: the episode is over.
            debug!(episode = self.episode, "close complete, back to idle");
            self.progress = 0.0;
            self.phase = Phase::Idle;
            self.selected = None;
            self.cache.invalidate();
            self.pending_hide = None;
            self.visible = true;
        }
    }

    fn publish(&mut self) {
        let snapshot = self.snapshot();
        if self.last_published != Some(snapshot) {
            self.last_published = Some(snapshot);
            self.observers.notify(&snapshot);
        }
    }

    fn assert_invariants(&self) {
        debug_assert_eq!(
            self.selected.is_none(),
            self.phase == Phase::Idle,
            "selected must be set exactly while an episode is live"
        );
        debug_assert!(
            !self.cache.is_captured() || self.selected.is_some(),
            "anchor cache captured without an episode"
        );
        debug_assert!(
            (0.0..=1.0).contains(&self.progress),
            "progress out of bounds: {}",
            self.progress
        );
        debug_assert!(
            self.phase != Phase::Dragging || (self.ramp.is_none() && self.settle.is_none()),
            "a ramp may not run while a gesture owns progress"
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
