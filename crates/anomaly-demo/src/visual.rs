use anomaly_engine::coords::Vec2;

use crate::physics::BodyPose;

/// Outline polygon with a 2D transform, in world units (y up).
///
/// Vertices are local to the polygon. The transform scales and rotates about
/// `origin` (also local), then translates by `position`, so a vertex equal to
/// `origin` lands exactly on `position + origin`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec2>,
    pub origin: Vec2,
    pub position: Vec2,
    /// Degrees, counter-clockwise.
    pub rotation: f32,
    pub scale: f32,
}

impl Polygon {
    pub fn new(vertices: Vec<Vec2>) -> Self {
        Self {
            vertices,
            origin: Vec2::zero(),
            position: Vec2::zero(),
            rotation: 0.0,
            scale: 1.0,
        }
    }

    /// Axis-aligned square with its lower-left corner at the local origin.
    pub fn square(side: f32) -> Self {
        Self::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(side, 0.0),
            Vec2::new(side, side),
            Vec2::new(0.0, side),
        ])
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn transformed_vertices(&self) -> Vec<Vec2> {
        let radians = self.rotation.to_radians();
        let pivot = self.position + self.origin;
        self.vertices
            .iter()
            .map(|&v| pivot + ((v - self.origin) * self.scale).rotated(radians))
            .collect()
    }

    /// Places the polygon so its origin sits on the body and follows its angle.
    pub fn sync_from_pose(&mut self, pose: BodyPose) {
        self.position = pose.position - self.origin;
        self.rotation = pose.angle.to_degrees();
    }
}
