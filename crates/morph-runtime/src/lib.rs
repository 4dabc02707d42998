#![forbid(unsafe_code)]

//! Runtime: the shared-element transition state machine and its collaborators.
//!
//! # Role in Morph
//! `morph-runtime` owns the single [`TransitionController`] driving a
//! list-to-detail morph transition: commands in, snapshots out. Renderers
//! never mutate transition state directly — they apply [`Command`]s, tick
//! the controller once per frame, and observe [`Snapshot`]s.
//!
//! # Primary responsibilities
//! - **TransitionController**: phase machine, progress ownership, anchor
//!   capture policy, and cancellable settle animations.
//! - **Observers**: snapshot subscription for rendering layers.
//! - **Coordinators**: the list and detail collaborators at the engine
//!   boundary, including the sample profile data.
//!
//! # How it fits in the system
//! `morph-core` supplies the primitives (geometry, interpolation, anchors,
//! ramps, gesture adaptation); this crate arbitrates between discrete
//! programmatic triggers and continuous gesture-driven updates, and decides
//! on release whether a transition completes or cancels.

pub mod controller;
pub mod coordinator;
pub mod observer;

pub use controller::{Command, Phase, Snapshot, TransitionController};
pub use coordinator::{DetailCoordinator, ListHomeCoordinator, Profile, sample_profiles};
pub use observer::{Observers, SubscriptionId};
