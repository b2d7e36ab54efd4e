use anomaly_engine::coords::Vec2;
use anomaly_engine::input::{InputSnapshot, Key};

const LEFT: &[Key] = &[Key::ArrowLeft, Key::A];
const RIGHT: &[Key] = &[Key::ArrowRight, Key::D];
const UP: &[Key] = &[Key::ArrowUp, Key::W];
const DOWN: &[Key] = &[Key::ArrowDown, Key::S];

/// Direction from the movement keys, components in {-1, 0, 1}.
///
/// Opposing keys do not cancel: right beats left and down beats up.
pub fn player_direction(input: &InputSnapshot) -> Vec2 {
    let x = input.axis(LEFT, RIGHT);
    let y = -input.axis(UP, DOWN);
    Vec2::new(x, y)
}

/// Velocity to assign to the player, or `None` when no direction is held
/// (the body then keeps coasting under damping).
pub fn player_velocity(input: &InputSnapshot, speed: f32) -> Option<Vec2> {
    let dir = player_direction(input);
    if dir.is_zero() {
        return None;
    }
    Some(dir.normalized() * speed)
}

/// Anomaly spin in radians per second.
#[inline]
pub fn anomaly_angular_velocity(deg_per_sec: f32) -> f32 {
    deg_per_sec.to_radians()
}
