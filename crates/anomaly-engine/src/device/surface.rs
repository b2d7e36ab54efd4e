//! Surface configuration choices, kept free of GPU objects.

use wgpu::{CompositeAlphaMode, PresentMode, TextureFormat};

pub(crate) fn choose_surface_format(
    formats: &[TextureFormat],
    prefer_srgb: bool,
) -> Option<TextureFormat> {
    if prefer_srgb {
        let preferred = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Rgba8UnormSrgb];
        if let Some(f) = preferred.into_iter().find(|f| formats.contains(f)) {
            return Some(f);
        }
    }
    formats.first().copied()
}

pub(crate) fn choose_alpha_mode(
    modes: &[CompositeAlphaMode],
    requested: Option<CompositeAlphaMode>,
) -> CompositeAlphaMode {
    requested
        .filter(|m| modes.contains(m))
        .or_else(|| modes.first().copied())
        .unwrap_or(CompositeAlphaMode::Auto)
}

/// `Fifo` for vsync; otherwise the lowest-latency supported mode.
pub(crate) fn choose_present_mode(modes: &[PresentMode], vsync: bool) -> PresentMode {
    if vsync {
        return PresentMode::Fifo;
    }
    [PresentMode::Immediate, PresentMode::Mailbox]
        .into_iter()
        .find(|m| modes.contains(m))
        .unwrap_or(PresentMode::Fifo)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn srgb_preferred_when_available() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Rgba8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, true), Some(TextureFormat::Rgba8UnormSrgb));
        assert_eq!(choose_surface_format(&formats, false), Some(TextureFormat::Bgra8Unorm));
        assert_eq!(choose_surface_format(&[], true), None);
    }

    // ── alpha ─────────────────────────────────────────────────────────────

    #[test]
    fn unsupported_alpha_falls_back_to_first() {
        let modes = [CompositeAlphaMode::Opaque, CompositeAlphaMode::PreMultiplied];
        assert_eq!(
            choose_alpha_mode(&modes, Some(CompositeAlphaMode::PostMultiplied)),
            CompositeAlphaMode::Opaque
        );
        assert_eq!(
            choose_alpha_mode(&modes, Some(CompositeAlphaMode::PreMultiplied)),
            CompositeAlphaMode::PreMultiplied
        );
        assert_eq!(choose_alpha_mode(&[], None), CompositeAlphaMode::Auto);
    }

    // ── present mode ──────────────────────────────────────────────────────

    #[test]
    fn vsync_off_prefers_immediate() {
        let all = [PresentMode::Fifo, PresentMode::Mailbox, PresentMode::Immediate];
        assert_eq!(choose_present_mode(&all, false), PresentMode::Immediate);
        assert_eq!(choose_present_mode(&all, true), PresentMode::Fifo);

        let no_immediate = [PresentMode::Fifo, PresentMode::Mailbox];
        assert_eq!(choose_present_mode(&no_immediate, false), PresentMode::Mailbox);
        assert_eq!(choose_present_mode(&[PresentMode::Fifo], false), PresentMode::Fifo);
    }
}
