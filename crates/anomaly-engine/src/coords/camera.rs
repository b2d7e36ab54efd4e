use super::{Rect, Vec2, Viewport};

/// Orthographic 2D camera.
///
/// World space is +Y up; the camera maps it onto screen space (logical pixels,
/// top-left origin, +Y down), which is what the draw list records.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrthoCamera {
    /// World point at the center of the screen.
    pub position: Vec2,
    /// World units visible across the screen.
    viewport_world: Vec2,
    screen: Viewport,
}

impl OrthoCamera {
    /// Camera showing `[0, width] × [0, height]` on a screen of the same size.
    pub fn new(width: f32, height: f32) -> Self {
        let mut cam = Self {
            position: Vec2::zero(),
            viewport_world: Vec2::new(1.0, 1.0),
            screen: Viewport::new(width, height),
        };
        cam.set_to_ortho(width, height);
        cam
    }

    /// Shows `[0, width] × [0, height]` with the camera centered on it.
    ///
    /// The screen size is left alone; `ExtendViewport::apply` owns it.
    pub fn set_to_ortho(&mut self, width: f32, height: f32) {
        self.viewport_world = Vec2::new(width.max(f32::EPSILON), height.max(f32::EPSILON));
        self.position = self.viewport_world * 0.5;
    }

    pub(super) fn set_viewport(&mut self, world: Vec2, screen: Viewport) {
        self.viewport_world = world;
        self.screen = screen;
    }

    #[inline]
    pub fn screen(&self) -> Viewport {
        self.screen
    }

    #[inline]
    pub fn viewport_world(&self) -> Vec2 {
        self.viewport_world
    }

    /// Logical pixels per world unit along each axis.
    #[inline]
    pub fn pixels_per_unit(&self) -> Vec2 {
        Vec2::new(
            self.screen.width / self.viewport_world.x,
            self.screen.height / self.viewport_world.y,
        )
    }

    /// World rectangle currently on screen.
    pub fn visible_world(&self) -> Rect {
        let half = self.viewport_world * 0.5;
        Rect::from_origin_size(self.position - half, self.viewport_world)
    }

    /// World point → screen point.
    pub fn project(&self, p: Vec2) -> Vec2 {
        let min = self.visible_world().min();
        let ppu = self.pixels_per_unit();
        Vec2::new(
            (p.x - min.x) * ppu.x,
            self.screen.height - (p.y - min.y) * ppu.y,
        )
    }

    /// Screen point → world point.
    pub fn unproject(&self, s: Vec2) -> Vec2 {
        let min = self.visible_world().min();
        let ppu = self.pixels_per_unit();
        Vec2::new(
            s.x / ppu.x + min.x,
            (self.screen.height - s.y) / ppu.y + min.y,
        )
    }

    /// World rectangle → screen rectangle (top-left origin).
    pub fn project_rect(&self, r: Rect) -> Rect {
        Rect::from_corners(self.project(r.min()), self.project(r.max()))
    }

    /// Converts world-unit lengths (e.g. line widths) to logical pixels.
    #[inline]
    pub fn project_len(&self, len: f32) -> f32 {
        let ppu = self.pixels_per_unit();
        len * ppu.x.min(ppu.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn world_origin_maps_to_bottom_left() {
        let cam = OrthoCamera::new(1000.0, 1000.0);
        assert!(close(cam.project(Vec2::zero()), Vec2::new(0.0, 1000.0)));
        assert!(close(cam.project(Vec2::new(1000.0, 1000.0)), Vec2::new(1000.0, 0.0)));
    }

    #[test]
    fn projection_scales_to_screen() {
        let mut cam = OrthoCamera::new(1000.0, 1000.0);
        cam.set_viewport(Vec2::new(1000.0, 1000.0), Viewport::new(500.0, 500.0));

        assert!(close(cam.project(Vec2::new(500.0, 250.0)), Vec2::new(250.0, 375.0)));
        assert!((cam.project_len(10.0) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn unproject_inverts_project() {
        let mut cam = OrthoCamera::new(1000.0, 1000.0);
        cam.set_viewport(Vec2::new(1777.0, 1000.0), Viewport::new(1920.0, 1080.0));
        cam.position = Vec2::new(888.5, 500.0);

        let p = Vec2::new(123.0, 456.0);
        assert!(close(cam.unproject(cam.project(p)), p));
    }

    #[test]
    fn project_rect_flips_to_top_left_origin() {
        let cam = OrthoCamera::new(100.0, 100.0);
        let s = cam.project_rect(Rect::new(10.0, 20.0, 30.0, 5.0));

        assert!(close(s.origin, Vec2::new(10.0, 75.0)));
        assert!(close(s.size, Vec2::new(30.0, 5.0)));
    }
}
