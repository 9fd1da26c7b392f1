use serde::{Deserialize, Serialize};

use crate::capability::{DeviceProfile, DeviceTier};

/// Coarse DPR banding used to pick a rendering-quality trade-off.
///
/// Ordered: a higher category always means a higher dpr band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZoomCategory {
    Standard,
    Slight,
    Moderate,
    High,
    Extreme,
}

/// A classified zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomLevel {
    pub category: ZoomCategory,
    pub description: &'static str,
}

/// Classify a device pixel ratio into a zoom band.
///
/// Total partition of `(0, ∞)`: `[1, 1.1)` standard, `[1.1, 1.5)` slight,
/// `[1.5, 2)` moderate, `[2, 3)` high, `[3, ∞)` extreme. Sub-unit and
/// non-finite dprs fold into standard.
pub fn zoom_level(dpr: f64) -> ZoomLevel {
    let dpr = if dpr.is_finite() { dpr } else { 1.0 };
    let (category, description) = if dpr < 1.1 {
        (ZoomCategory::Standard, "no meaningful zoom, full quality")
    } else if dpr < 1.5 {
        (ZoomCategory::Slight, "slight zoom, full quality")
    } else if dpr < 2.0 {
        (ZoomCategory::Moderate, "moderate zoom, minor reduction")
    } else if dpr < 3.0 {
        (ZoomCategory::High, "high zoom, reduced quality")
    } else {
        (ZoomCategory::Extreme, "extreme zoom, strongest reduction")
    };
    ZoomLevel {
        category,
        description,
    }
}

/// Quality trade-offs for one `(zoom, device profile)` combination.
///
/// `quality_reduction` is a multiplicative fidelity factor in `[0.8, 1.0]`;
/// `frame_skip` is the number of animation frames between redraws, in
/// `[1, 2]`. Both degrade gradually as zoom escalates — controlled fidelity
/// loss instead of uncontrolled frame drops.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveSettings {
    /// Stroke width in device pixels.
    pub line_width: f64,
    pub anti_aliasing: bool,
    pub quality_reduction: f64,
    pub frame_skip: u32,
    pub enable_effects: bool,
}

const QUALITY_FLOOR: f64 = 0.8;
const FRAME_SKIP_CAP: u32 = 2;

/// Derive adaptive settings from the dpr and the device profile.
///
/// Pure and deterministic: identical inputs give bit-identical outputs.
/// Lower tiers reduce harder than higher tiers at the same zoom.
pub fn adaptive_settings(dpr: f64, profile: &DeviceProfile) -> AdaptiveSettings {
    let level = zoom_level(dpr);

    let (base_reduction, base_skip): (f64, u32) = match level.category {
        ZoomCategory::Standard | ZoomCategory::Slight => (1.0, 1),
        ZoomCategory::Moderate => (0.95, 1),
        ZoomCategory::High => (0.9, 2),
        ZoomCategory::Extreme => (0.85, 2),
    };

    let tier_penalty = match profile.tier {
        DeviceTier::Low => 0.05,
        DeviceTier::Standard => 0.0,
        DeviceTier::High => -0.05,
    };

    let quality_reduction = (base_reduction - tier_penalty).clamp(QUALITY_FLOOR, 1.0);
    let frame_skip = if profile.tier == DeviceTier::Low && level.category >= ZoomCategory::Moderate
    {
        FRAME_SKIP_CAP
    } else {
        base_skip.min(FRAME_SKIP_CAP)
    };

    AdaptiveSettings {
        line_width: 1.0,
        anti_aliasing: profile.settings.anti_aliasing,
        quality_reduction,
        frame_skip,
        enable_effects: profile.settings.advanced_effects
            && level.category < ZoomCategory::Extreme,
    }
}

/// Backing-store scale the embedder should actually allocate: the display
/// dpr capped at the profile's `max_dpr_scaling`. Advisory — coordinate
/// transforms stay bound to the real dpr.
pub fn effective_dpr(dpr: f64, profile: &DeviceProfile) -> f64 {
    let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    dpr.min(profile.settings.max_dpr_scaling)
}
