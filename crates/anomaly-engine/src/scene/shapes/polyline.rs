use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Stroked polyline payload. Points are in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineCmd {
    pub points: Vec<Vec2>,
    /// Connects the last point back to the first.
    pub closed: bool,
    /// Stroke width in logical pixels.
    pub width: f32,
    pub color: Color,
}

impl PolylineCmd {
    /// Segments as `(start, end)` pairs, including the closing edge.
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let open = self.points.windows(2).map(|w| (w[0], w[1]));
        let closing = match (self.closed, self.points.first(), self.points.last()) {
            (true, Some(&first), Some(&last)) if self.points.len() > 2 => Some((last, first)),
            _ => None,
        };
        open.chain(closing)
    }
}

impl DrawList {
    /// Records a polyline. Fewer than two points or a non-positive width is a no-op.
    pub fn push_polyline(
        &mut self,
        z: ZIndex,
        points: Vec<Vec2>,
        closed: bool,
        width: f32,
        color: Color,
    ) {
        if points.len() < 2 || !(width > 0.0) {
            return;
        }
        self.push(z, DrawCmd::Polyline(PolylineCmd { points, closed, width, color }));
    }

    /// Records the outline of a closed polygon.
    #[inline]
    pub fn push_polygon_outline(&mut self, z: ZIndex, points: Vec<Vec2>, width: f32, color: Color) {
        self.push_polyline(z, points, true, width, color);
    }

    /// Records a single line segment.
    #[inline]
    pub fn push_line(&mut self, z: ZIndex, a: Vec2, b: Vec2, width: f32, color: Color) {
        self.push_polyline(z, vec![a, b], false, width, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<Vec2> {
        vec![Vec2::new(0.0, 0.0), Vec2::new(30.0, 10.0), Vec2::new(0.0, 20.0)]
    }

    #[test]
    fn closed_outline_adds_closing_edge() {
        let cmd = PolylineCmd { points: triangle(), closed: true, width: 1.0, color: Color::GRAY };
        let segs: Vec<_> = cmd.segments().collect();
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[2], (Vec2::new(0.0, 20.0), Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn open_polyline_has_n_minus_one_segments() {
        let cmd = PolylineCmd { points: triangle(), closed: false, width: 1.0, color: Color::GRAY };
        assert_eq!(cmd.segments().count(), 2);
    }

    #[test]
    fn degenerate_input_is_skipped() {
        let mut list = DrawList::new();
        list.push_polygon_outline(ZIndex::WORLD, vec![Vec2::zero()], 1.0, Color::GRAY);
        list.push_polygon_outline(ZIndex::WORLD, triangle(), 0.0, Color::GRAY);
        list.push_polygon_outline(ZIndex::WORLD, triangle(), f32::NAN, Color::GRAY);
        assert!(list.is_empty());

        list.push_polygon_outline(ZIndex::WORLD, triangle(), 1.0, Color::GRAY);
        assert_eq!(list.len(), 1);
    }
}
