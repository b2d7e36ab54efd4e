use crate::coords::{Rect, Vec2};
use crate::paint::{Color, LinearGradient, Paint};
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Filled rectangle payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub paint: Paint,
}

impl RectCmd {
    #[inline]
    pub fn new(rect: Rect, paint: Paint) -> Self {
        Self { rect, paint }
    }
}

impl DrawList {
    #[inline]
    pub fn push_rect(&mut self, z: ZIndex, rect: Rect, paint: Paint) {
        self.push(z, DrawCmd::Rect(RectCmd::new(rect, paint)));
    }

    #[inline]
    pub fn push_solid_rect(&mut self, z: ZIndex, rect: Rect, color: Color) {
        self.push_rect(z, rect, Paint::Solid(color));
    }

    /// Fills `rect` with a gradient running from its top edge (`top`) to its
    /// bottom edge (`bottom`).
    pub fn push_vertical_gradient_rect(&mut self, z: ZIndex, rect: Rect, top: Color, bottom: Color) {
        let r = rect.normalized();
        let x = r.origin.x;
        let gradient = LinearGradient::two_stop(
            Vec2::new(x, r.origin.y),
            Vec2::new(x, r.origin.y + r.size.y),
            top,
            bottom,
        );
        self.push_rect(z, r, Paint::LinearGradient(gradient));
    }
}
