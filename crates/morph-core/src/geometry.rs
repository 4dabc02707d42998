#![forbid(unsafe_code)]

//! Geometric primitives.

/// An axis-aligned rectangle in the shared coordinate space.
///
/// All collaborators (list rows, the detail placeholder, the morph shape)
/// measure and report rectangles in this one space, so two rects are always
/// directly comparable. Equality is exact numeric comparison; the all-zero
/// rect doubles as the sentinel for "not yet measured".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width in points.
    pub width: f32,
    /// Height in points.
    pub height: f32,
}

impl Rect {
    /// The zero rect: sentinel for an anchor that has not been measured yet.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether this is exactly the zero rect (the not-yet-measured sentinel).
    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}
