use anomaly_engine::coords::{OrthoCamera, Rect, Vec2};
use anomaly_engine::paint::Color;
use anomaly_engine::scene::{DrawList, ZIndex};

use crate::config::BackgroundMode;

/// Background color at height ratio `r` (0 at the bottom, 1 at the top).
pub fn row_color(r: f32) -> Color {
    let r = r.clamp(0.0, 1.0);
    Color::from_straight(0.1 * r, 0.3 * r, 0.5 * r, 1.0)
}

/// Paints the background over the whole `world` area.
pub fn push_background(list: &mut DrawList, camera: &OrthoCamera, world: Vec2, mode: BackgroundMode) {
    if !(world.x > 0.0 && world.y > 0.0) {
        return;
    }

    match mode {
        BackgroundMode::Banded => {
            let rows = world.y as u32;
            for row in 0..rows {
                let y = row as f32;
                let band = Rect::new(0.0, y, world.x, 1.0);
                list.push_solid_rect(ZIndex::BACKGROUND, camera.project_rect(band), row_color(y / world.y));
            }
        }
        BackgroundMode::Gradient => {
            let screen = camera.project_rect(Rect::new(0.0, 0.0, world.x, world.y));
            list.push_vertical_gradient_rect(ZIndex::BACKGROUND, screen, row_color(1.0), row_color(0.0));
        }
    }
}
