/// How the window is presented.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WindowMode {
    Windowed,
    /// Exclusive fullscreen on the primary monitor, if it offers this mode.
    /// Otherwise the window opens windowed.
    Fullscreen { width: u32, height: u32, refresh_hz: u32 },
}

/// Plain description of a monitor video mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DisplayMode {
    pub width: u32,
    pub height: u32,
    pub refresh_millihertz: u32,
    pub bit_depth: u16,
}

/// Tolerance for refresh matching; 59.94 Hz counts as 60.
const REFRESH_TOLERANCE_MHZ: u32 = 500;

/// Index of the mode matching `width` × `height` at `refresh_hz`.
///
/// Among matches the deepest color mode wins; earlier entries win ties.
pub fn select_display_mode(
    modes: &[DisplayMode],
    width: u32,
    height: u32,
    refresh_hz: u32,
) -> Option<usize> {
    let target_mhz = refresh_hz.saturating_mul(1000);

    modes
        .iter()
        .enumerate()
        .filter(|(_, m)| {
            m.width == width
                && m.height == height
                && m.refresh_millihertz.abs_diff(target_mhz) <= REFRESH_TOLERANCE_MHZ
        })
        .fold(None, |best: Option<(usize, u16)>, (i, m)| match best {
            Some((_, depth)) if depth >= m.bit_depth => best,
            _ => Some((i, m.bit_depth)),
        })
        .map(|(i, _)| i)
}
