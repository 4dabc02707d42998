#![forbid(unsafe_code)]

//! Frame interpolation for the morph shape.
//!
//! [`interpolate`] is the single pure function mapping two anchor rectangles
//! and a progress value to the frame the morph shape should occupy. It is a
//! total function: no clamping, no side effects, no failure modes. Callers
//! guarantee `progress ∈ [0, 1]` and avoid calling it before real anchors
//! have been captured (a zero-rect endpoint degenerates to a zero-size
//! frame, which draws as nothing).
//!
//! # Invariants
//!
//! 1. At progress 0 the frame equals `source` exactly; at 1 it equals `dest`.
//! 2. Each component is independently linear in progress.
//! 3. The corner radius is derived from the interpolated height (`h / 2`),
//!    never interpolated on its own — the shape stays a capsule when the
//!    frame is square and degrades gracefully when the aspect ratio changes.

use crate::geometry::Rect;

/// The interpolated frame and corner radius of the morph shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphFrame {
    /// Where the morph shape should be drawn.
    pub frame: Rect,
    /// Clip radius; `frame.height / 2` so a square frame reads as a circle.
    pub corner_radius: f32,
}

/// Component-wise linear interpolation between two anchor rectangles.
#[inline]
#[must_use]
pub fn interpolate(source: Rect, dest: Rect, progress: f32) -> MorphFrame {
    let frame = Rect::new(
        lerp(source.x, dest.x, progress),
        lerp(source.y, dest.y, progress),
        lerp(source.width, dest.width, progress),
        lerp(source.height, dest.height, progress),
    );
    MorphFrame {
        frame,
        corner_radius: frame.height / 2.0,
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> Rect {
        Rect::new(0.0, 0.0, 50.0, 50.0)
    }

    fn dest() -> Rect {
        Rect::new(100.0, 200.0, 150.0, 150.0)
    }

    #[test]
    fn endpoints_are_exact() {
        assert_eq!(interpolate(source(), dest(), 0.0).frame, source());
        assert_eq!(interpolate(source(), dest(), 1.0).frame, dest());
    }

    #[test]
    fn midpoint() {
        let m = interpolate(source(), dest(), 0.5);
        assert_eq!(m.frame, Rect::new(50.0, 100.0, 100.0, 100.0));
        assert_eq!(m.corner_radius, 50.0);
    }

    #[test]
    fn corner_radius_tracks_interpolated_height() {
        // Square at both ends: radius is always half the current height.
        for p in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let m = interpolate(source(), dest(), p);
            assert_eq!(m.corner_radius, m.frame.height / 2.0);
        }
    }

    #[test]
    fn corner_radius_is_circular_at_source() {
        // 50x50 source: radius 25 makes the thumbnail a circle.
        let m = interpolate(source(), dest(), 0.0);
        assert_eq!(m.corner_radius, 25.0);
    }

    #[test]
    fn zero_rect_endpoints_degenerate_quietly() {
        let m = interpolate(Rect::ZERO, Rect::ZERO, 0.5);
        assert!(m.frame.is_zero());
        assert_eq!(m.corner_radius, 0.0);

        // One real endpoint still produces a frame scaled toward zero.
        let m = interpolate(Rect::ZERO, dest(), 0.5);
        assert_eq!(m.frame, Rect::new(50.0, 100.0, 75.0, 75.0));
    }

    #[test]
    fn aspect_ratio_change_keeps_radius_height_derived() {
        // Wide destination: radius follows height, not width.
        let wide = Rect::new(0.0, 0.0, 300.0, 100.0);
        let m = interpolate(source(), wide, 1.0);
        assert_eq!(m.corner_radius, 50.0);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn rect() -> impl Strategy<Value = Rect> {
            (-1e4_f32..1e4, -1e4_f32..1e4, 0.0_f32..1e4, 0.0_f32..1e4)
                .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
        }

        proptest! {
            #[test]
            fn progress_zero_is_exactly_the_source(source in rect(), dest in rect()) {
                prop_assert_eq!(interpolate(source, dest, 0.0).frame, source);
            }

            #[test]
            fn progress_one_lands_on_the_dest(source in rect(), dest in rect()) {
                // One rounding step of slack: `a + (b - a)` is an ulp off
                // exact for adversarial component pairs.
                let frame = interpolate(source, dest, 1.0).frame;
                prop_assert!((frame.x - dest.x).abs() < 1e-2);
                prop_assert!((frame.y - dest.y).abs() < 1e-2);
                prop_assert!((frame.width - dest.width).abs() < 1e-2);
                prop_assert!((frame.height - dest.height).abs() < 1e-2);
            }

            #[test]
            fn components_stay_between_the_anchors(
                source in rect(),
                dest in rect(),
                progress in 0.0_f32..=1.0,
            ) {
                let frame = interpolate(source, dest, progress).frame;
                for (v, a, b) in [
                    (frame.x, source.x, dest.x),
                    (frame.y, source.y, dest.y),
                    (frame.width, source.width, dest.width),
                    (frame.height, source.height, dest.height),
                ] {
                    prop_assert!(
                        v >= a.min(b) - 1e-2 && v <= a.max(b) + 1e-2,
                        "component {} outside [{}, {}]", v, a.min(b), a.max(b),
                    );
                }
            }

            #[test]
            fn corner_radius_is_always_half_the_height(
                source in rect(),
                dest in rect(),
                progress in 0.0_f32..=1.0,
            ) {
                let m = interpolate(source, dest, progress);
                prop_assert_eq!(m.corner_radius, m.frame.height / 2.0);
            }
        }
    }
}
