use super::Vec2;
use super::camera::OrthoCamera;

/// Window area in logical pixels.
///
/// Renderers use it as the basis for converting logical px positions to NDC.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    #[inline]
    pub fn size(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Keeps at least `min_world` visible and fills the window without bars.
///
/// The minimum world is scaled uniformly to fit the window, then the world is
/// lengthened along whichever axis has space left over.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ExtendViewport {
    min_world: Vec2,
    world: Vec2,
    screen: Viewport,
    scale: f32,
}

impl ExtendViewport {
    pub fn new(min_width: f32, min_height: f32) -> Self {
        let min_world = Vec2::new(min_width.max(1.0), min_height.max(1.0));
        Self {
            min_world,
            world: min_world,
            screen: Viewport::new(min_world.x, min_world.y),
            scale: 1.0,
        }
    }

    /// Recomputes the world size for a new window size.
    ///
    /// Invalid sizes (a minimized window reports 0×0) keep the previous state.
    pub fn update(&mut self, screen: Viewport) {
        if !screen.is_valid() {
            return;
        }

        let scale = (screen.width / self.min_world.x).min(screen.height / self.min_world.y);
        let scaled = self.min_world * scale;

        let mut world = self.min_world;
        if scaled.x < screen.width {
            world.x += (screen.width - scaled.x) / scale;
        } else if scaled.y < screen.height {
            world.y += (screen.height - scaled.y) / scale;
        }

        self.world = world;
        self.screen = screen;
        self.scale = scale;
    }

    /// Points `camera` at this viewport; `center` moves it to the world center.
    pub fn apply(&self, camera: &mut OrthoCamera, center: bool) {
        camera.set_viewport(self.world, self.screen);
        if center {
            camera.position = self.world * 0.5;
        }
    }

    #[inline]
    pub fn world_size(&self) -> Vec2 {
        self.world
    }

    #[inline]
    pub fn screen(&self) -> Viewport {
        self.screen
    }

    /// Logical pixels per world unit.
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-2
    }

    #[test]
    fn wide_window_extends_width() {
        let mut vp = ExtendViewport::new(1000.0, 1000.0);
        vp.update(Viewport::new(1920.0, 1080.0));

        assert!(close(vp.scale(), 1.08));
        assert!(close(vp.world_size().y, 1000.0));
        assert!(close(vp.world_size().x, 1920.0 / 1.08));
    }

    #[test]
    fn tall_window_extends_height() {
        let mut vp = ExtendViewport::new(1000.0, 1000.0);
        vp.update(Viewport::new(800.0, 1200.0));

        assert!(close(vp.scale(), 0.8));
        assert!(close(vp.world_size().x, 1000.0));
        assert!(close(vp.world_size().y, 1500.0));
    }

    #[test]
    fn matching_aspect_keeps_min_world() {
        let mut vp = ExtendViewport::new(1000.0, 1000.0);
        vp.update(Viewport::new(500.0, 500.0));

        assert_eq!(vp.world_size(), Vec2::new(1000.0, 1000.0));
        assert!(close(vp.scale(), 0.5));
    }

    #[test]
    fn minimized_window_keeps_previous_state() {
        let mut vp = ExtendViewport::new(1000.0, 1000.0);
        vp.update(Viewport::new(1920.0, 1080.0));
        let before = vp;

        vp.update(Viewport::new(0.0, 0.0));

        assert_eq!(vp, before);
    }

    #[test]
    fn apply_centers_camera() {
        let mut vp = ExtendViewport::new(1000.0, 1000.0);
        vp.update(Viewport::new(800.0, 1200.0));
        let mut cam = OrthoCamera::new(1000.0, 1000.0);

        vp.apply(&mut cam, true);

        assert!(close(cam.position.x, 500.0));
        assert!(close(cam.position.y, 750.0));
    }
}
