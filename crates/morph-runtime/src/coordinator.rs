#![forbid(unsafe_code)]

//! The list and detail collaborators at the engine boundary.
//!
//! Neither coordinator owns transition state. Each one measures its own
//! anchor rectangle, forwards it to the controller every layout pass, turns
//! taps into [`Command`]s, and derives its rendering decisions from the
//! controller's [`Snapshot`]. The coordinators never assign progress.

use ahash::AHashMap;

use morph_core::anchor::ItemId;
use morph_core::geometry::Rect;

use crate::controller::{Command, Snapshot, TransitionController};

/// One row of the list: a chat-style profile entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Stable row identifier, also the anchor key.
    pub id: ItemId,
    /// Display name.
    pub username: String,
    /// Asset name for the avatar thumbnail.
    pub picture: String,
    /// Preview of the most recent message.
    pub last_message: String,
}

impl Profile {
    /// Create a profile row.
    pub fn new(id: ItemId, username: &str, picture: &str, last_message: &str) -> Self {
        Self {
            id,
            username: username.to_string(),
            picture: picture.to_string(),
            last_message: last_message.to_string(),
        }
    }
}

/// The canonical sample rows.
#[must_use]
pub fn sample_profiles() -> Vec<Profile> {
    vec![
        Profile::new(ItemId(1), "John Doe", "profile_pic_1", "Hey"),
        Profile::new(ItemId(2), "Jane Doe", "profile_pic_2", "Hi"),
        Profile::new(ItemId(3), "Michael Scott", "profile_pic_3", "How are you?"),
        Profile::new(ItemId(4), "Dwight Schrute", "profile_pic_4", "I'm fine"),
    ]
}

// ---------------------------------------------------------------------------
// ListHomeCoordinator
// ---------------------------------------------------------------------------

/// Owns the item list: supplies per-row source anchors and turns row taps
/// into `Open` commands.
#[derive(Debug)]
pub struct ListHomeCoordinator {
    profiles: Vec<Profile>,
    rows: AHashMap<ItemId, Rect>,
}

impl ListHomeCoordinator {
    /// Create a coordinator over the given rows.
    #[must_use]
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self {
            profiles,
            rows: AHashMap::new(),
        }
    }

    /// Create a coordinator over the sample rows.
    #[must_use]
    pub fn sample() -> Self {
        Self::new(sample_profiles())
    }

    /// The rows, in list order.
    #[inline]
    #[must_use]
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Report one row thumbnail's measured bounds (every layout pass).
    pub fn report_row_layout(
        &mut self,
        ctrl: &mut TransitionController,
        id: ItemId,
        rect: Rect,
    ) {
        self.rows.insert(id, rect);
        ctrl.report_source_anchor(id, rect);
    }

    /// The last-measured bounds for a row, or the zero rect.
    #[inline]
    #[must_use]
    pub fn row_rect(&self, id: ItemId) -> Rect {
        self.rows.get(&id).copied().unwrap_or(Rect::ZERO)
    }

    /// Tap on a row: the `Open` command for it, carrying the live source
    /// anchor and the supplied destination anchor.
    ///
    /// Returns `None` for an id that is not one of this list's rows.
    #[must_use]
    pub fn tap_row(&self, id: ItemId, dest: Rect) -> Option<Command> {
        if !self.profiles.iter().any(|p| p.id == id) {
            return None;
        }
        Some(Command::Open {
            id,
            source: self.row_rect(id),
            dest,
        })
    }

    /// Whether a row's real thumbnail should be hidden because the morph
    /// shape is substituting for it.
    #[must_use]
    pub fn thumbnail_hidden(&self, snapshot: &Snapshot, id: ItemId) -> bool {
        snapshot.selected == Some(id)
    }
}

// ---------------------------------------------------------------------------
// DetailCoordinator
// ---------------------------------------------------------------------------

/// Owns the detail screen: supplies the destination anchor and derives the
/// panel's slide-in offset from progress.
#[derive(Debug)]
pub struct DetailCoordinator {
    dest: Rect,
    viewport_width: f32,
}

impl DetailCoordinator {
    /// Create a coordinator for a viewport of the given width.
    #[must_use]
    pub fn new(viewport_width: f32) -> Self {
        Self {
            dest: Rect::ZERO,
            viewport_width,
        }
    }

    /// Report the detail placeholder's measured bounds (every layout pass).
    pub fn report_layout(&mut self, ctrl: &mut TransitionController, rect: Rect) {
        self.dest = rect;
        ctrl.report_dest_anchor(rect);
    }

    /// Update the viewport width (rotation, window resize).
    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width;
    }

    /// The last-measured destination anchor, or the zero rect.
    #[inline]
    #[must_use]
    pub fn dest_rect(&self) -> Rect {
        self.dest
    }

    /// Tap on the close button.
    #[inline]
    #[must_use]
    pub fn tap_close(&self) -> Command {
        Command::Close
    }

    /// Horizontal offset of the detail panel: fully off-screen left at
    /// progress 0, flush at progress 1.
    #[inline]
    #[must_use]
    pub fn panel_offset_x(&self, snapshot: &Snapshot) -> f32 {
        self.viewport_width * snapshot.progress - self.viewport_width
    }

    /// Whether the real detail content should be revealed in place of the
    /// morph shape.
    #[inline]
    #[must_use]
    pub fn content_revealed(&self, snapshot: &Snapshot) -> bool {
        !snapshot.visible
    }

    /// The close button fades in only once the morph shape has handed over.
    #[inline]
    #[must_use]
    pub fn close_button_visible(&self, snapshot: &Snapshot) -> bool {
        !snapshot.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Phase;
    use std::time::Duration;

    const ID: ItemId = ItemId(1);

    fn row_rect() -> Rect {
        Rect::new(16.0, 120.0, 50.0, 50.0)
    }

    fn dest_rect() -> Rect {
        Rect::new(120.0, 80.0, 150.0, 150.0)
    }

    fn settle(ctrl: &mut TransitionController) {
        for _ in 0..32 {
            ctrl.tick(Duration::from_millis(16));
        }
    }

    #[test]
    fn sample_rows_match_the_canonical_list() {
        let rows = sample_profiles();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].username, "John Doe");
        assert_eq!(rows[2].last_message, "How are you?");
    }

    #[test]
    fn tap_row_builds_open_from_measured_anchors() {
        let mut ctrl = TransitionController::new();
        let mut list = ListHomeCoordinator::sample();
        list.report_row_layout(&mut ctrl, ID, row_rect());

        let cmd = list.tap_row(ID, dest_rect()).unwrap();
        assert_eq!(
            cmd,
            Command::Open {
                id: ID,
                source: row_rect(),
                dest: dest_rect(),
            }
        );
    }

    #[test]
    fn tap_unknown_row_is_none() {
        let list = ListHomeCoordinator::sample();
        assert!(list.tap_row(ItemId(999), dest_rect()).is_none());
    }

    #[test]
    fn tap_before_layout_degrades_to_zero_source() {
        let list = ListHomeCoordinator::sample();
        let cmd = list.tap_row(ID, dest_rect()).unwrap();
        let Command::Open { source, .. } = cmd else {
            panic!("expected Open");
        };
        assert!(source.is_zero());
    }

    #[test]
    fn thumbnail_hides_only_for_the_selected_row() {
        let mut ctrl = TransitionController::new();
        let mut list = ListHomeCoordinator::sample();
        let mut detail = DetailCoordinator::new(300.0);
        list.report_row_layout(&mut ctrl, ID, row_rect());
        detail.report_layout(&mut ctrl, dest_rect());

        let cmd = list.tap_row(ID, detail.dest_rect()).unwrap();
        ctrl.apply(cmd);

        let snap = ctrl.snapshot();
        assert!(list.thumbnail_hidden(&snap, ID));
        assert!(!list.thumbnail_hidden(&snap, ItemId(2)));
    }

    #[test]
    fn panel_slides_with_progress() {
        let ctrl = TransitionController::new();
        let detail = DetailCoordinator::new(300.0);
        let mut snap = ctrl.snapshot();

        snap.progress = 0.0;
        assert_eq!(detail.panel_offset_x(&snap), -300.0);
        snap.progress = 0.5;
        assert_eq!(detail.panel_offset_x(&snap), -150.0);
        snap.progress = 1.0;
        assert_eq!(detail.panel_offset_x(&snap), 0.0);
    }

    #[test]
    fn content_and_close_button_reveal_after_handover() {
        let mut ctrl = TransitionController::new();
        let mut list = ListHomeCoordinator::sample();
        let mut detail = DetailCoordinator::new(300.0);
        list.report_row_layout(&mut ctrl, ID, row_rect());
        detail.report_layout(&mut ctrl, dest_rect());

        ctrl.apply(list.tap_row(ID, detail.dest_rect()).unwrap());
        let snap = ctrl.snapshot();
        assert!(!detail.content_revealed(&snap));
        assert!(!detail.close_button_visible(&snap));

        settle(&mut ctrl);
        let snap = ctrl.snapshot();
        assert_eq!(snap.phase, Phase::Open);
        assert!(detail.content_revealed(&snap));
        assert!(detail.close_button_visible(&snap));
    }

    #[test]
    fn close_tap_round_trips() {
        let mut ctrl = TransitionController::new();
        let mut list = ListHomeCoordinator::sample();
        let mut detail = DetailCoordinator::new(300.0);
        list.report_row_layout(&mut ctrl, ID, row_rect());
        detail.report_layout(&mut ctrl, dest_rect());

        ctrl.apply(list.tap_row(ID, detail.dest_rect()).unwrap());
        settle(&mut ctrl);
        ctrl.apply(detail.tap_close());
        settle(&mut ctrl);

        let snap = ctrl.snapshot();
        assert_eq!(snap.phase, Phase::Idle);
        assert!(!list.thumbnail_hidden(&snap, ID));
    }
}
