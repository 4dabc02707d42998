#![forbid(unsafe_code)]

//! Anchor supply and caching.
//!
//! Collaborators measure anchor rectangles continuously — list rows move
//! with scroll position, the detail placeholder moves on rotation — so the
//! rectangles the interpolator uses must be decoupled from the live
//! measurements or the morph would chase a moving target mid-animation.
//!
//! Two pieces:
//!
//! - [`AnchorRegistry`]: the live side. Renderers report `item id → rect`
//!   source anchors and one well-known destination anchor every layout
//!   pass. Missing entries read as the zero rect.
//! - [`AnchorCache`]: the frozen side. The controller captures a
//!   source/dest pair once per episode (and re-captures at each drag
//!   start), then interpolates against the snapshot until the episode
//!   returns to idle.
//!
//! # Invariants
//!
//! 1. A pair is captured or invalidated as a unit — source and destination
//!    can never be observed half-updated (no tearing).
//! 2. The cache holds a value only while an episode is live; it is emptied
//!    exactly when the engine returns to idle.

use ahash::AHashMap;

use crate::geometry::Rect;

/// Stable identifier for a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(pub u64);

/// A source/destination anchor pair, always handled as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorPair {
    /// Bounds of the list row thumbnail.
    pub source: Rect,
    /// Bounds of the detail placeholder.
    pub dest: Rect,
}

impl AnchorPair {
    /// Create a new pair.
    #[inline]
    pub const fn new(source: Rect, dest: Rect) -> Self {
        Self { source, dest }
    }
}

// ---------------------------------------------------------------------------
// AnchorCache
// ---------------------------------------------------------------------------

/// The frozen anchor pair used for interpolation during one episode.
///
/// `capture` commits a whole pair in one assignment; `invalidate` empties
/// it. Between episodes the cache is empty and interpolation is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorCache {
    pair: Option<AnchorPair>,
}

impl AnchorCache {
    /// Create an empty cache.
    #[inline]
    pub const fn new() -> Self {
        Self { pair: None }
    }

    /// Freeze a pair for the current episode, replacing any previous capture.
    #[inline]
    pub fn capture(&mut self, pair: AnchorPair) {
        self.pair = Some(pair);
    }

    /// Empty the cache. Called when the episode returns to idle.
    #[inline]
    pub fn invalidate(&mut self) {
        self.pair = None;
    }

    /// Whether a pair is currently frozen.
    #[inline]
    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.pair.is_some()
    }

    /// The frozen pair, if any.
    #[inline]
    #[must_use]
    pub fn pair(&self) -> Option<AnchorPair> {
        self.pair
    }
}

// ---------------------------------------------------------------------------
// AnchorRegistry
// ---------------------------------------------------------------------------

/// Live anchor measurements, reported once per layout pass.
///
/// Source anchors are keyed by item id; there is a single well-known
/// destination slot. The engine only ever reads the entry for the selected
/// item plus the destination. An entry that was never reported reads as
/// [`Rect::ZERO`], which interpolates to a zero-size (invisible) frame
/// rather than crashing.
#[derive(Debug, Default)]
pub struct AnchorRegistry {
    sources: AHashMap<ItemId, Rect>,
    dest: Option<Rect>,
}

impl AnchorRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sources: AHashMap::new(),
            dest: None,
        }
    }

    /// Record the current bounds of one list row's thumbnail.
    pub fn report_source(&mut self, id: ItemId, rect: Rect) {
        self.sources.insert(id, rect);
    }

    /// Record the current bounds of the detail placeholder.
    pub fn report_dest(&mut self, rect: Rect) {
        self.dest = Some(rect);
    }

    /// Live source anchor for `id`, or the zero rect if never reported.
    #[inline]
    #[must_use]
    pub fn source(&self, id: ItemId) -> Rect {
        self.sources.get(&id).copied().unwrap_or(Rect::ZERO)
    }

    /// Live destination anchor, or the zero rect if never reported.
    #[inline]
    #[must_use]
    pub fn dest(&self) -> Rect {
        self.dest.unwrap_or(Rect::ZERO)
    }

    /// Live pair for `id`: the source anchor together with the destination.
    #[inline]
    #[must_use]
    pub fn pair_for(&self, id: ItemId) -> AnchorPair {
        AnchorPair::new(self.source(id), self.dest())
    }

    /// Forget all reported anchors.
    pub fn clear(&mut self) {
        self.sources.clear();
        self.dest = None;
    }
}
