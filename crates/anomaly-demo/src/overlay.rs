use anomaly_engine::coords::Vec2;
use anomaly_engine::paint::Color;
use anomaly_engine::scene::{DrawList, ZIndex};
use anomaly_engine::text::FontId;

pub const TEXT_SIZE: f32 = 16.0;
const MARGIN: f32 = 10.0;
const LINE_SPACING: f32 = 20.0;

/// Overlay text lines, top to bottom.
pub fn overlay_lines(fps: u32, physical: (u32, u32)) -> [String; 2] {
    [
        format!("FPS: {fps}"),
        format!("Resolution: {}x{}", physical.0, physical.1),
    ]
}

/// Top-left of overlay line `index`, in logical pixels.
pub fn line_origin(index: usize) -> Vec2 {
    Vec2::new(MARGIN, MARGIN + index as f32 * LINE_SPACING)
}

/// Records the FPS and resolution lines in the top-left corner.
///
/// Positions and the text size are logical pixels, not world units, so the
/// overlay keeps its size when the viewport scales the world.
pub fn push_overlay(list: &mut DrawList, font: FontId, fps: u32, physical: (u32, u32)) {
    for (i, line) in overlay_lines(fps, physical).into_iter().enumerate() {
        list.push_text(ZIndex::OVERLAY, line, font, TEXT_SIZE, Color::WHITE, line_origin(i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_sit_at_fixed_screen_offsets() {
        assert_eq!(line_origin(0), Vec2::new(10.0, 10.0));
        assert_eq!(line_origin(1), Vec2::new(10.0, 30.0));
    }

    #[test]
    fn lines_report_fps_and_resolution() {
        let [fps, res] = overlay_lines(144, (3840, 2160));
        assert_eq!(fps, "FPS: 144");
        assert_eq!(res, "Resolution: 3840x2160");
    }
}
