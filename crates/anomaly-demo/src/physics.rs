//! Rigid-body world over `rapier2d`.
//!
//! World units match the demo's world coordinates (y up). The world is only
//! advanced through [`Steppable`], one fixed step at a time.

use std::fmt;
use std::num::NonZeroUsize;
use std::time::Duration;

use rapier2d::prelude::*;

use anomaly_engine::coords::Vec2;
use anomaly_engine::time::Steppable;

/// Invalid body or collider definition.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    InvalidShape(String),
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::InvalidShape(msg) => write!(f, "invalid shape: {msg}"),
        }
    }
}

impl std::error::Error for PhysicsError {}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BodyKind {
    Static,
    Dynamic,
    /// Moved by assigned velocities; unaffected by forces or contacts.
    Kinematic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodyDef {
    pub kind: BodyKind,
    pub position: Vec2,
    pub linear_damping: f32,
    pub angular_damping: f32,
}

impl BodyDef {
    pub fn new(kind: BodyKind, position: Vec2) -> Self {
        Self { kind, position, linear_damping: 0.0, angular_damping: 0.0 }
    }

    pub fn with_damping(mut self, linear: f32, angular: f32) -> Self {
        self.linear_damping = linear;
        self.angular_damping = angular;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeDef {
    Box { half_width: f32, half_height: f32 },
    /// Convex polygon around the body origin.
    Polygon(Vec<Vec2>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FixtureDef {
    pub shape: ShapeDef,
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl FixtureDef {
    pub fn new(shape: ShapeDef) -> Self {
        Self { shape, density: 1.0, friction: 0.2, restitution: 0.0 }
    }

    pub fn density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }
}

/// Position and rotation of a body's origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BodyPose {
    pub position: Vec2,
    /// Radians, counter-clockwise.
    pub angle: f32,
}

/// Opaque body handle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BodyId(RigidBodyHandle);

pub struct PhysicsWorld {
    gravity: Vector<Real>,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec2, time_step: Duration, solver_iterations: u32) -> Self {
        let mut params = IntegrationParameters::default();
        params.dt = time_step.as_secs_f32();
        params.num_solver_iterations =
            NonZeroUsize::new(solver_iterations as usize).unwrap_or(NonZeroUsize::MIN);

        log::debug!(
            "physics world: gravity ({}, {}), dt {:?}, {} solver iterations",
            gravity.x,
            gravity.y,
            time_step,
            params.num_solver_iterations
        );

        Self {
            gravity: vector![gravity.x, gravity.y],
            params,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Creates a body with a single collider attached.
    pub fn create_body(&mut self, body: &BodyDef, fixture: &FixtureDef) -> Result<BodyId, PhysicsError> {
        let collider = build_collider(fixture)?;

        let builder = match body.kind {
            BodyKind::Static => RigidBodyBuilder::fixed(),
            BodyKind::Dynamic => RigidBodyBuilder::dynamic(),
            BodyKind::Kinematic => RigidBodyBuilder::kinematic_velocity_based(),
        };
        let rb = builder
            .translation(vector![body.position.x, body.position.y])
            .linear_damping(body.linear_damping)
            .angular_damping(body.angular_damping)
            .build();

        let handle = self.bodies.insert(rb);
        self.colliders.insert_with_parent(collider, handle, &mut self.bodies);
        Ok(BodyId(handle))
    }

    #[inline]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn pose(&self, id: BodyId) -> Option<BodyPose> {
        let rb = self.bodies.get(id.0)?;
        let t = rb.translation();
        Some(BodyPose { position: Vec2::new(t.x, t.y), angle: rb.rotation().angle() })
    }

    pub fn linear_velocity(&self, id: BodyId) -> Option<Vec2> {
        let v = self.bodies.get(id.0)?.linvel();
        Some(Vec2::new(v.x, v.y))
    }

    pub fn angular_velocity(&self, id: BodyId) -> Option<f32> {
        Some(self.bodies.get(id.0)?.angvel())
    }

    pub fn set_linear_velocity(&mut self, id: BodyId, v: Vec2) {
        if let Some(rb) = self.bodies.get_mut(id.0) {
            rb.set_linvel(vector![v.x, v.y], true);
        }
    }

    /// Radians per second, counter-clockwise.
    pub fn set_angular_velocity(&mut self, id: BodyId, w: f32) {
        if let Some(rb) = self.bodies.get_mut(id.0) {
            rb.set_angvel(w, true);
        }
    }

    /// Advances the world by the configured time step.
    pub fn step_once(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// World-space outlines of every box and polygon collider, plus the
    /// owning body's center.
    pub fn debug_shapes(&self) -> Vec<DebugShape> {
        self.colliders
            .iter()
            .filter_map(|(_, collider)| {
                let iso = collider.position();
                let local: Vec<Point<Real>> = if let Some(cuboid) = collider.shape().as_cuboid() {
                    let he = cuboid.half_extents;
                    vec![
                        point![-he.x, -he.y],
                        point![he.x, -he.y],
                        point![he.x, he.y],
                        point![-he.x, he.y],
                    ]
                } else if let Some(poly) = collider.shape().as_convex_polygon() {
                    poly.points().to_vec()
                } else {
                    return None;
                };

                let outline = local
                    .iter()
                    .map(|p| {
                        let w = iso * p;
                        Vec2::new(w.x, w.y)
                    })
                    .collect();

                let center = collider
                    .parent()
                    .and_then(|h| self.bodies.get(h))
                    .map(|rb| Vec2::new(rb.translation().x, rb.translation().y))
                    .unwrap_or(Vec2::new(iso.translation.x, iso.translation.y));

                Some(DebugShape { outline, center })
            })
            .collect()
    }
}

impl Steppable for PhysicsWorld {
    fn step(&mut self, dt: Duration) {
        self.params.dt = dt.as_secs_f32();
        self.step_once();
    }
}

/// Collider outline for debug drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugShape {
    pub outline: Vec<Vec2>,
    pub center: Vec2,
}

fn build_collider(fixture: &FixtureDef) -> Result<Collider, PhysicsError> {
    let builder = match &fixture.shape {
        ShapeDef::Box { half_width, half_height } => {
            if !(*half_width > 0.0 && *half_height > 0.0) {
                return Err(PhysicsError::InvalidShape(format!(
                    "box half extents must be positive, got {half_width} x {half_height}"
                )));
            }
            ColliderBuilder::cuboid(*half_width, *half_height)
        }
        ShapeDef::Polygon(vertices) => {
            if vertices.len() < 3 || vertices.iter().any(|v| !v.is_finite()) {
                return Err(PhysicsError::InvalidShape(format!(
                    "polygon needs at least 3 finite vertices, got {}",
                    vertices.len()
                )));
            }
            if polygon_area(vertices).abs() < 1e-6 {
                return Err(PhysicsError::InvalidShape("polygon has no area".to_string()));
            }
            let points: Vec<Point<Real>> = vertices.iter().map(|v| point![v.x, v.y]).collect();
            ColliderBuilder::convex_hull(&points).ok_or_else(|| {
                PhysicsError::InvalidShape("polygon vertices are degenerate".to_string())
            })?
        }
    };

    Ok(builder
        .density(fixture.density)
        .friction(fixture.friction)
        .restitution(fixture.restitution)
        .build())
}

/// Signed shoelace area; positive for counter-clockwise winding.
fn polygon_area(vertices: &[Vec2]) -> f32 {
    let n = vertices.len();
    let twice: f32 = (0..n)
        .map(|i| {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const STEP: Duration = Duration::from_nanos(1_000_000_000 / 60);

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(Vec2::zero(), STEP, 6)
    }

    fn triangle() -> FixtureDef {
        FixtureDef::new(ShapeDef::Polygon(vec![
            Vec2::new(-15.0, -10.0),
            Vec2::new(15.0, 0.0),
            Vec2::new(-15.0, 10.0),
        ]))
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn invalid_shapes_are_rejected() {
        let mut w = world();
        let body = BodyDef::new(BodyKind::Dynamic, Vec2::zero());

        let flat_box = FixtureDef::new(ShapeDef::Box { half_width: 0.0, half_height: 5.0 });
        assert!(matches!(w.create_body(&body, &flat_box), Err(PhysicsError::InvalidShape(_))));

        let two_points = FixtureDef::new(ShapeDef::Polygon(vec![Vec2::zero(), Vec2::new(1.0, 0.0)]));
        assert!(w.create_body(&body, &two_points).is_err());

        let collinear = FixtureDef::new(ShapeDef::Polygon(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 0.0),
        ]));
        assert!(w.create_body(&body, &collinear).is_err());

        assert_eq!(w.body_count(), 0);
    }

    #[test]
    fn pose_starts_at_definition() {
        let mut w = world();
        let id = w
            .create_body(&BodyDef::new(BodyKind::Dynamic, Vec2::new(100.0, 200.0)), &triangle())
            .unwrap();
        let pose = w.pose(id).unwrap();
        assert_eq!(pose.position, Vec2::new(100.0, 200.0));
        assert_eq!(pose.angle, 0.0);
    }

    // ── stepping ──────────────────────────────────────────────────────────

    #[test]
    fn kinematic_body_turns_quarter_in_one_second() {
        let mut w = world();
        let box_fixture = FixtureDef::new(ShapeDef::Box { half_width: 50.0, half_height: 50.0 });
        let id = w
            .create_body(&BodyDef::new(BodyKind::Kinematic, Vec2::new(500.0, 500.0)), &box_fixture)
            .unwrap();

        for _ in 0..60 {
            w.set_angular_velocity(id, FRAC_PI_2);
            w.step(STEP);
        }

        let pose = w.pose(id).unwrap();
        assert!((pose.angle - FRAC_PI_2).abs() < 1e-3, "angle was {}", pose.angle);
        assert!((pose.position - Vec2::new(500.0, 500.0)).length() < 1e-3);
    }

    #[test]
    fn dynamic_body_moves_with_assigned_velocity() {
        let mut w = world();
        let id = w
            .create_body(&BodyDef::new(BodyKind::Dynamic, Vec2::zero()), &triangle())
            .unwrap();

        w.set_linear_velocity(id, Vec2::new(250.0, 0.0));
        w.step(STEP);

        let pose = w.pose(id).unwrap();
        assert!(pose.position.x > 3.0 && pose.position.x <= 250.0 / 60.0 + 1e-3);
        assert!(pose.position.y.abs() < 1e-3);
    }

    #[test]
    fn zero_gravity_leaves_resting_body_in_place() {
        let mut w = world();
        let id = w
            .create_body(&BodyDef::new(BodyKind::Dynamic, Vec2::new(10.0, 10.0)), &triangle())
            .unwrap();
        for _ in 0..30 {
            w.step(STEP);
        }
        let drift = (w.pose(id).unwrap().position - Vec2::new(10.0, 10.0)).length();
        assert!(drift < 1e-4, "drifted {drift}");
    }

    #[test]
    fn shoelace_area_sign_follows_winding() {
        let ccw = [Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0), Vec2::new(0.0, 2.0)];
        assert_eq!(polygon_area(&ccw), 2.0);
        let cw = [ccw[0], ccw[2], ccw[1]];
        assert_eq!(polygon_area(&cw), -2.0);
    }

    // ── debug shapes ──────────────────────────────────────────────────────

    #[test]
    fn box_outline_is_in_world_space() {
        let mut w = world();
        let box_fixture = FixtureDef::new(ShapeDef::Box { half_width: 50.0, half_height: 50.0 });
        w.create_body(&BodyDef::new(BodyKind::Static, Vec2::new(500.0, 500.0)), &box_fixture)
            .unwrap();

        let shapes = w.debug_shapes();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].center, Vec2::new(500.0, 500.0));
        assert_eq!(shapes[0].outline.len(), 4);
        assert!(shapes[0].outline.contains(&Vec2::new(450.0, 450.0)));
        assert!(shapes[0].outline.contains(&Vec2::new(550.0, 550.0)));
    }
}
