/// Requested settings for a display surface.
///
/// Keep this structure stable and minimal: three precision hints, nothing
/// else. Values are requests, not guarantees. The context layer resolves
/// them against adapter capabilities and downgrades silently, the same way
/// display drivers treat pixel-format hints.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct DisplaySettings {
    /// Requested depth-buffer precision, in bits.
    ///
    /// Typical hardware values: 0, 16, 24, 32.
    pub depth_bits: u32,

    /// Requested stencil-buffer precision, in bits.
    ///
    /// Typical hardware values: 0 or 8.
    pub stencil_bits: u32,

    /// Requested antialiasing sample count.
    ///
    /// Powers of two up to 16; 0 and 1 both mean "no antialiasing".
    pub antialiasing: u32,
}

/// Settings actually obtained for a display surface.
///
/// Reported after resolution so callers can see what the request was
/// downgraded to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GrantedSettings {
    pub depth_bits: u32,
    pub stencil_bits: u32,
    pub antialiasing: u32,
}

impl GrantedSettings {
    /// Derives the granted values from a resolved depth/stencil format and
    /// the final sample count.
    pub(crate) fn from_resolved(
        format: Option<wgpu::TextureFormat>,
        sample_count: u32,
    ) -> Self {
        let (depth_bits, stencil_bits) = match format {
            None => (0, 0),
            Some(wgpu::TextureFormat::Depth16Unorm) => (16, 0),
            Some(wgpu::TextureFormat::Depth24Plus) => (24, 0),
            Some(wgpu::TextureFormat::Depth24PlusStencil8) => (24, 8),
            Some(wgpu::TextureFormat::Depth32Float) => (32, 0),
            Some(wgpu::TextureFormat::Stencil8) => (0, 8),
            // Not produced by resolution; report as no depth/stencil.
            Some(_) => (0, 0),
        };

        Self {
            depth_bits,
            stencil_bits,
            // Sample count 1 is the "off" state; report it as 0 so granted
            // values read like the request vocabulary.
            antialiasing: if sample_count > 1 { sample_count } else { 0 },
        }
    }
}

/// Picks the depth/stencil texture format for a settings request.
///
/// Returns `None` when neither precision is requested. Requests the packed
/// formats cannot represent are downgraded, never rejected: anything above
/// 24 depth bits combined with stencil collapses to 24+8, since the wider
/// combined format is an optional wgpu feature and the required-features set
/// stays empty.
pub(crate) fn depth_stencil_format(settings: DisplaySettings) -> Option<wgpu::TextureFormat> {
    match (settings.depth_bits, settings.stencil_bits) {
        (0, 0) => None,
        (0, _) => Some(wgpu::TextureFormat::Stencil8),
        (d, 0) if d <= 16 => Some(wgpu::TextureFormat::Depth16Unorm),
        (d, 0) if d <= 24 => Some(wgpu::TextureFormat::Depth24Plus),
        (_, 0) => Some(wgpu::TextureFormat::Depth32Float),
        (_, _) => Some(wgpu::TextureFormat::Depth24PlusStencil8),
    }
}

/// Downgrades an antialiasing request to a usable sample count.
///
/// Walks power-of-two counts from the request downward and returns the first
/// one `is_supported` accepts, ending at 1 (no antialiasing). Non-power-of-two
/// requests therefore round down; requests above 16 are treated as 16.
pub(crate) fn downgrade_samples(requested: u32, is_supported: impl Fn(u32) -> bool) -> u32 {
    [16u32, 8, 4, 2]
        .into_iter()
        .find(|&count| count <= requested && is_supported(count))
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat;

    // ── depth/stencil format resolution ───────────────────────────────────

    #[test]
    fn no_request_means_no_format() {
        assert_eq!(depth_stencil_format(DisplaySettings::default()), None);
    }

    #[test]
    fn depth_and_stencil_resolve_to_packed_format() {
        let s = DisplaySettings {
            depth_bits: 24,
            stencil_bits: 8,
            antialiasing: 0,
        };
        assert_eq!(
            depth_stencil_format(s),
            Some(TextureFormat::Depth24PlusStencil8)
        );
    }

    #[test]
    fn stencil_only() {
        let s = DisplaySettings {
            stencil_bits: 8,
            ..Default::default()
        };
        assert_eq!(depth_stencil_format(s), Some(TextureFormat::Stencil8));
    }

    #[test]
    fn shallow_depth_only() {
        let s = DisplaySettings {
            depth_bits: 16,
            ..Default::default()
        };
        assert_eq!(depth_stencil_format(s), Some(TextureFormat::Depth16Unorm));
    }

    #[test]
    fn mid_depth_rounds_up_to_24() {
        let s = DisplaySettings {
            depth_bits: 17,
            ..Default::default()
        };
        assert_eq!(depth_stencil_format(s), Some(TextureFormat::Depth24Plus));
    }

    #[test]
    fn deep_depth_only() {
        let s = DisplaySettings {
            depth_bits: 32,
            ..Default::default()
        };
        assert_eq!(depth_stencil_format(s), Some(TextureFormat::Depth32Float));
    }

    #[test]
    fn deep_depth_with_stencil_downgrades_to_packed() {
        let s = DisplaySettings {
            depth_bits: 32,
            stencil_bits: 8,
            antialiasing: 0,
        };
        assert_eq!(
            depth_stencil_format(s),
            Some(TextureFormat::Depth24PlusStencil8)
        );
    }

    // ── sample-count downgrade ────────────────────────────────────────────

    #[test]
    fn zero_and_one_request_no_antialiasing() {
        assert_eq!(downgrade_samples(0, |_| true), 1);
        assert_eq!(downgrade_samples(1, |_| true), 1);
    }

    #[test]
    fn exact_supported_count_is_kept() {
        assert_eq!(downgrade_samples(2, |_| true), 2);
        assert_eq!(downgrade_samples(8, |_| true), 8);
    }

    #[test]
    fn non_power_of_two_rounds_down() {
        assert_eq!(downgrade_samples(3, |_| true), 2);
        assert_eq!(downgrade_samples(6, |_| true), 4);
    }

    #[test]
    fn unsupported_counts_fall_through() {
        let only_low = |c: u32| c <= 4;
        assert_eq!(downgrade_samples(16, only_low), 4);
    }

    #[test]
    fn nothing_supported_means_single_sample() {
        assert_eq!(downgrade_samples(16, |_| false), 1);
    }

    #[test]
    fn oversized_request_is_capped() {
        assert_eq!(downgrade_samples(64, |_| true), 16);
    }

    // ── granted settings ──────────────────────────────────────────────────

    #[test]
    fn granted_from_nothing_is_all_zero() {
        let g = GrantedSettings::from_resolved(None, 1);
        assert_eq!(
            g,
            GrantedSettings {
                depth_bits: 0,
                stencil_bits: 0,
                antialiasing: 0
            }
        );
    }

    #[test]
    fn granted_reports_packed_format_bits() {
        let g = GrantedSettings::from_resolved(Some(TextureFormat::Depth24PlusStencil8), 2);
        assert_eq!(g.depth_bits, 24);
        assert_eq!(g.stencil_bits, 8);
        assert_eq!(g.antialiasing, 2);
    }

    #[test]
    fn granted_single_sample_reads_as_zero() {
        let g = GrantedSettings::from_resolved(Some(TextureFormat::Depth32Float), 1);
        assert_eq!(g.antialiasing, 0);
    }
}
