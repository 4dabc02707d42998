#![forbid(unsafe_code)]

//! Core: geometry, anchors, ramps, and gesture input for morph transitions.
//!
//! # Role in Morph
//! `morph-core` is the primitive layer. It owns the rectangle type shared by
//! every collaborator, the pure frame interpolator, the anchor cache that
//! freezes interpolation endpoints for the duration of a transition episode,
//! the tick-driven progress ramps used for settle animations, and the
//! edge-drag adapter that turns raw pointer samples into drag events.
//!
//! # Primary responsibilities
//! - **Rect**: axis-aligned rectangle in the shared coordinate space, with a
//!   zero-rect sentinel for "not yet measured".
//! - **interpolate**: pure (source, dest, progress) → frame + corner radius.
//! - **AnchorCache / AnchorRegistry**: frozen vs. live-measured anchors.
//! - **Ramp / SettleDelay**: cooperative, supersedable settle animations.
//! - **EdgeDragAdapter**: pointer samples → [`DragEvent`](gesture::DragEvent).
//!
//! # How it fits in the system
//! The runtime (`morph-runtime`) owns the transition state machine and
//! consumes these primitives; rendering layers consume the interpolated
//! frames. Nothing in this crate mutates transition state on its own.

pub mod anchor;
pub mod geometry;
pub mod gesture;
pub mod interpolate;
pub mod ramp;

pub use anchor::{AnchorCache, AnchorPair, AnchorRegistry, ItemId};
pub use geometry::Rect;
pub use gesture::{DragConfig, DragEvent, EdgeDragAdapter};
pub use interpolate::{MorphFrame, interpolate};
pub use ramp::{Ramp, SettleDelay};
