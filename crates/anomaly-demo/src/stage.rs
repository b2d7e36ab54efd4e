use std::time::Duration;

use anomaly_engine::coords::{OrthoCamera, Vec2};
use anomaly_engine::input::InputSnapshot;
use anomaly_engine::paint::Color;
use anomaly_engine::scene::{DrawList, ZIndex};
use anomaly_engine::time::Steppable;

use crate::config::{DemoConfig, SceneKind};
use crate::controls::{anomaly_angular_velocity, player_velocity};
use crate::physics::{BodyDef, BodyId, BodyKind, BodyPose, FixtureDef, PhysicsError, PhysicsWorld, ShapeDef};
use crate::visual::Polygon;

const OUTLINE_WIDTH: f32 = 1.5;
const DEBUG_WIDTH: f32 = 1.0;
const CROSS_HALF: f32 = 4.0;
const DEBUG_COLOR: Color = Color::from_premul(0.0, 0.6, 0.0, 0.6);

/// Bodies backing the two visuals.
struct Bodies {
    world: PhysicsWorld,
    player: BodyId,
    anomaly: BodyId,
}

/// Everything that lives in world space: the physics world (when the scene
/// has one) and the outlines that follow it.
pub struct Stage {
    bodies: Option<Bodies>,
    player: Polygon,
    anomaly: Polygon,
    player_speed: f32,
    anomaly_spin: f32,
}

impl Stage {
    /// Lays out the scene inside a `world` sized area.
    pub fn new(config: &DemoConfig, world: Vec2) -> Result<Self, PhysicsError> {
        let player_at = Vec2::new(world.x / 6.0, world.y / 1.5);
        let anomaly_at = Vec2::new(world.x / 2.0, world.y / 2.0);

        let p = &config.player;
        let a = &config.anomaly;

        // Visual triangle shares its shape with the collider, shifted so the
        // local origin is the first vertex.
        let first = p.vertices.first().copied().unwrap_or_default();
        let player_visual = p.vertices.iter().map(|&v| v - first).collect();
        let mut player = Polygon::new(player_visual).with_origin(p.visual_origin);
        player.sync_from_pose(BodyPose { position: player_at, angle: 0.0 });

        let side = a.half_extent * 2.0;
        let mut anomaly = Polygon::square(side).with_origin(Vec2::new(a.half_extent, a.half_extent));
        anomaly.sync_from_pose(BodyPose { position: anomaly_at, angle: 0.0 });

        let bodies = match config.scene {
            SceneKind::Shapes => None,
            SceneKind::Physics => {
                let phys = &config.physics;
                let mut world = PhysicsWorld::new(phys.gravity, phys.time_step, phys.velocity_iterations);

                let player_id = world.create_body(
                    &BodyDef::new(BodyKind::Dynamic, player_at).with_damping(p.linear_damping, p.angular_damping),
                    &FixtureDef::new(ShapeDef::Polygon(p.vertices.clone()))
                        .density(p.density)
                        .friction(p.friction)
                        .restitution(p.restitution),
                )?;
                let anomaly_id = world.create_body(
                    &BodyDef::new(BodyKind::Kinematic, anomaly_at),
                    &FixtureDef::new(ShapeDef::Box { half_width: a.half_extent, half_height: a.half_extent })
                        .friction(a.friction)
                        .restitution(a.restitution),
                )?;

                log::info!("stage: {} bodies, player at ({}, {})", world.body_count(), player_at.x, player_at.y);
                log::debug!(
                    "solver: {} velocity iterations ({} position iterations requested, not used by rapier)",
                    phys.velocity_iterations,
                    phys.position_iterations
                );
                Some(Bodies { world, player: player_id, anomaly: anomaly_id })
            }
        };

        Ok(Self {
            bodies,
            player,
            anomaly,
            player_speed: p.speed,
            anomaly_spin: anomaly_angular_velocity(a.spin_deg_per_sec),
        })
    }

    #[inline]
    pub fn has_physics(&self) -> bool {
        self.bodies.is_some()
    }

    /// Pushes this frame's input into the bodies. Called once per frame,
    /// before stepping.
    pub fn apply_controls(&mut self, input: &InputSnapshot) {
        let Some(b) = self.bodies.as_mut() else { return };

        if let Some(v) = player_velocity(input, self.player_speed) {
            b.world.set_linear_velocity(b.player, v);
        }
        b.world.set_angular_velocity(b.anomaly, self.anomaly_spin);
    }

    /// Copies body poses onto the outlines.
    pub fn sync_visuals(&mut self) {
        let Some(b) = self.bodies.as_ref() else { return };

        if let Some(pose) = b.world.pose(b.player) {
            self.player.sync_from_pose(pose);
        }
        if let Some(pose) = b.world.pose(b.anomaly) {
            self.anomaly.sync_from_pose(pose);
        }
    }

    pub fn player_pose(&self) -> Option<BodyPose> {
        self.bodies.as_ref().and_then(|b| b.world.pose(b.player))
    }

    pub fn anomaly_pose(&self) -> Option<BodyPose> {
        self.bodies.as_ref().and_then(|b| b.world.pose(b.anomaly))
    }

    pub fn player_linear_velocity(&self) -> Option<Vec2> {
        self.bodies.as_ref().and_then(|b| b.world.linear_velocity(b.player))
    }

    /// Anomaly spin in radians per second.
    pub fn anomaly_spin_rate(&self) -> Option<f32> {
        self.bodies.as_ref().and_then(|b| b.world.angular_velocity(b.anomaly))
    }

    pub fn player_visual(&self) -> &Polygon {
        &self.player
    }

    pub fn anomaly_visual(&self) -> &Polygon {
        &self.anomaly
    }

    /// Records the outlines and, when `debug_draw` is set, the collider shapes.
    pub fn push_world(&self, list: &mut DrawList, camera: &OrthoCamera, debug_draw: bool) {
        let width = camera.project_len(OUTLINE_WIDTH).max(1.0);
        for poly in [&self.anomaly, &self.player] {
            let points = poly.transformed_vertices().into_iter().map(|v| camera.project(v)).collect();
            list.push_polygon_outline(ZIndex::WORLD, points, width, Color::GRAY);
        }

        if !debug_draw {
            return;
        }
        let Some(b) = self.bodies.as_ref() else { return };

        let width = camera.project_len(DEBUG_WIDTH).max(1.0);
        for shape in b.world.debug_shapes() {
            let points = shape.outline.into_iter().map(|v| camera.project(v)).collect();
            list.push_polygon_outline(ZIndex::DEBUG, points, width, DEBUG_COLOR);

            let c = camera.project(shape.center);
            let h = camera.project_len(CROSS_HALF).max(2.0);
            list.push_line(ZIndex::DEBUG, c - Vec2::new(h, 0.0), c + Vec2::new(h, 0.0), width, DEBUG_COLOR);
            list.push_line(ZIndex::DEBUG, c - Vec2::new(0.0, h), c + Vec2::new(0.0, h), width, DEBUG_COLOR);
        }
    }
}

impl Steppable for Stage {
    fn step(&mut self, dt: Duration) {
        if let Some(b) = self.bodies.as_mut() {
            b.world.step(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anomaly_engine::input::Key;
    use anomaly_engine::scene::DrawCmd;

    fn world() -> Vec2 {
        Vec2::new(1000.0, 1000.0)
    }

    fn stage(scene: SceneKind) -> Stage {
        let config = DemoConfig { scene, ..DemoConfig::default() };
        Stage::new(&config, world()).unwrap()
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    // ── layout ──────────────────────────────────────────────────────────

    #[test]
    fn bodies_start_at_their_anchor_points() {
        let s = stage(SceneKind::Physics);
        let player = s.player_pose().unwrap();
        let anomaly = s.anomaly_pose().unwrap();
        assert!(close(player.position, Vec2::new(1000.0 / 6.0, 1000.0 / 1.5)));
        assert!(close(anomaly.position, Vec2::new(500.0, 500.0)));
    }

    #[test]
    fn player_outline_matches_collider_triangle() {
        let s = stage(SceneKind::Physics);
        let at = s.player_pose().unwrap().position;
        let got = s.player_visual().transformed_vertices();
        let want = [Vec2::new(-15.0, -10.0), Vec2::new(15.0, 0.0), Vec2::new(-15.0, 10.0)];
        for (g, w) in got.iter().zip(want) {
            assert!(close(*g, at + w), "{g:?} vs {:?}", at + w);
        }
    }

    #[test]
    fn anomaly_outline_is_centered() {
        let s = stage(SceneKind::Physics);
        let verts = s.anomaly_visual().transformed_vertices();
        assert!(close(verts[0], Vec2::new(450.0, 450.0)));
        assert!(close(verts[2], Vec2::new(550.0, 550.0)));
    }

    #[test]
    fn shapes_scene_has_no_bodies() {
        let mut s = stage(SceneKind::Shapes);
        assert!(!s.has_physics());
        assert!(s.player_pose().is_none());
        assert!(s.player_linear_velocity().is_none());
        s.apply_controls(&InputSnapshot::default());
        s.step(Duration::from_millis(16));
        s.sync_visuals();
        assert_eq!(s.anomaly_visual().rotation, 0.0);
    }

    #[test]
    fn controls_set_both_velocities() {
        let mut s = stage(SceneKind::Physics);
        assert_eq!(s.player_linear_velocity(), Some(Vec2::zero()));
        assert_eq!(s.anomaly_spin_rate(), Some(0.0));

        s.apply_controls(&InputSnapshot::with_held([Key::ArrowUp]));
        assert!(close(s.player_linear_velocity().unwrap(), Vec2::new(0.0, 250.0)));
        assert!((s.anomaly_spin_rate().unwrap() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    // ── drawing ─────────────────────────────────────────────────────────

    #[test]
    fn outlines_only_without_debug_draw() {
        let s = stage(SceneKind::Physics);
        let camera = OrthoCamera::new(1000.0, 1000.0);
        let mut list = DrawList::new();
        s.push_world(&mut list, &camera, false);
        assert_eq!(list.len(), 2);
        assert!(list.items().iter().all(|i| i.key.z == ZIndex::WORLD));
        assert!(list.items().iter().all(|i| matches!(&i.cmd, DrawCmd::Polyline(p) if p.closed)));
    }

    #[test]
    fn debug_draw_adds_shape_and_cross_per_collider() {
        let s = stage(SceneKind::Physics);
        let camera = OrthoCamera::new(1000.0, 1000.0);
        let mut list = DrawList::new();
        s.push_world(&mut list, &camera, true);
        // 2 outlines + 2 colliders * (outline + 2 cross lines)
        assert_eq!(list.len(), 8);
        assert_eq!(list.items().iter().filter(|i| i.key.z == ZIndex::DEBUG).count(), 6);
    }
}
