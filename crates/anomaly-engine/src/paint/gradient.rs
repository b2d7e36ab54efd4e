use crate::coords::Vec2;

use super::Color;

/// A single gradient stop; `t` is expected in [0, 1].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Linear gradient in screen space.
///
/// `start` and `end` live in the same coordinate space as the geometry they
/// fill. Outside the `[start, end]` segment the end stops are extended.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: Vec<ColorStop>,
}

impl LinearGradient {
    pub fn new(start: Vec2, end: Vec2, stops: Vec<ColorStop>) -> Self {
        Self { start, end, stops }
    }

    /// Gradient from `from` at `start` to `to` at `end`.
    pub fn two_stop(start: Vec2, end: Vec2, from: Color, to: Color) -> Self {
        Self::new(start, end, vec![ColorStop::new(0.0, from), ColorStop::new(1.0, to)])
    }

    /// True when the definition can be rendered: finite values, two or more
    /// stops and a non-degenerate axis.
    pub fn is_valid(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.stops.iter().all(|s| s.t.is_finite() && s.color.is_finite())
            && self.stops.len() >= 2
            && self.start != self.end
    }

    /// Color at the projection of `p` onto the gradient axis.
    ///
    /// Matches what the rect shader computes for two-stop gradients.
    pub fn sample(&self, p: Vec2) -> Color {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Color::TRANSPARENT;
        };

        let axis = self.end - self.start;
        let len2 = axis.dot(axis);
        if len2 <= 0.0 {
            return first.color;
        }

        let t = ((p - self.start).dot(axis) / len2).clamp(0.0, 1.0);
        first.color.lerp(last.color, t)
    }
}
