use serde::{Deserialize, Serialize};

/// Source of hardware capability signals.
///
/// Abstracted behind a trait so the detector never reads ambient globals
/// directly: embedders plug in whatever their platform exposes (browser
/// `navigator` fields, sysinfo, a config file) and tests use
/// [`FixedCapabilities`]. Every signal is optional — an unavailable signal
/// is a normal condition, not an error.
pub trait CapabilityProvider {
    /// Approximate device memory in gigabytes, if known.
    fn device_memory_gb(&self) -> Option<f64>;

    /// Number of logical CPU cores, if known.
    fn logical_cores(&self) -> Option<usize>;

    /// Current device pixel ratio, if known.
    fn device_pixel_ratio(&self) -> Option<f64>;
}

/// Capability provider backed by what the standard library can see.
///
/// Core count comes from `available_parallelism`; memory and DPR have no
/// portable std source, so they report unknown and the detector falls back
/// to its defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCapabilities;

impl CapabilityProvider for SystemCapabilities {
    fn device_memory_gb(&self) -> Option<f64> {
        None
    }

    fn logical_cores(&self) -> Option<usize> {
        std::thread::available_parallelism().map(usize::from).ok()
    }

    fn device_pixel_ratio(&self) -> Option<f64> {
        None
    }
}

/// Deterministic capability provider for tests and embedders that already
/// know their hardware.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedCapabilities {
    pub memory_gb: Option<f64>,
    pub cores: Option<usize>,
    pub dpr: Option<f64>,
}

impl CapabilityProvider for FixedCapabilities {
    fn device_memory_gb(&self) -> Option<f64> {
        self.memory_gb
    }

    fn logical_cores(&self) -> Option<usize> {
        self.cores
    }

    fn device_pixel_ratio(&self) -> Option<f64> {
        self.dpr
    }
}

/// Coarse device capability tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeviceTier {
    Low,
    Standard,
    High,
}

impl std::fmt::Display for DeviceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Standard => write!(f, "standard"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Rendering capabilities granted to a tier.
///
/// `max_dpr_scaling` is non-decreasing low → standard → high.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileSettings {
    /// Cap on the backing-store scale the embedder should allocate.
    pub max_dpr_scaling: f64,
    pub anti_aliasing: bool,
    pub advanced_effects: bool,
}

/// A device capability classification, selected once per rendering config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceProfile {
    pub tier: DeviceTier,
    pub description: &'static str,
    pub settings: ProfileSettings,
}

impl DeviceProfile {
    pub fn low() -> Self {
        Self {
            tier: DeviceTier::Low,
            description: "constrained device, capped scaling, effects off",
            settings: ProfileSettings {
                max_dpr_scaling: 1.5,
                anti_aliasing: false,
                advanced_effects: false,
            },
        }
    }

    pub fn standard() -> Self {
        Self {
            tier: DeviceTier::Standard,
            description: "typical device, full scaling up to 2x",
            settings: ProfileSettings {
                max_dpr_scaling: 2.0,
                anti_aliasing: true,
                advanced_effects: false,
            },
        }
    }

    pub fn high() -> Self {
        Self {
            tier: DeviceTier::High,
            description: "high-end device, full scaling and effects",
            settings: ProfileSettings {
                max_dpr_scaling: 3.0,
                anti_aliasing: true,
                advanced_effects: true,
            },
        }
    }
}

/// Memory assumed when the provider cannot report it (matches the common
/// browser fallback of 4 GB for `navigator.deviceMemory`).
const DEFAULT_MEMORY_GB: f64 = 4.0;
const DEFAULT_CORES: usize = 4;

/// Classify the device by memory and core count.
///
/// Total over any provider output: missing signals take the defaults above,
/// so a host with no signals at all classifies as `standard`. Never panics.
pub fn detect_device_profile(provider: &dyn CapabilityProvider) -> DeviceProfile {
    let memory_gb = provider
        .device_memory_gb()
        .filter(|m| m.is_finite() && *m > 0.0)
        .unwrap_or(DEFAULT_MEMORY_GB);
    let cores = provider.logical_cores().unwrap_or(DEFAULT_CORES);

    let profile = if memory_gb >= 8.0 && cores >= 8 {
        DeviceProfile::high()
    } else if memory_gb <= 2.0 || cores <= 2 {
        DeviceProfile::low()
    } else {
        DeviceProfile::standard()
    };

    log::debug!(
        "device profile: {} (memory={memory_gb}GB cores={cores})",
        profile.tier
    );
    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_end_needs_memory_and_cores() {
        let p = detect_device_profile(&FixedCapabilities {
            memory_gb: Some(16.0),
            cores: Some(12),
            dpr: Some(3.0),
        });
        assert_eq!(p.tier, DeviceTier::High);
        assert!(p.settings.advanced_effects);
    }

    #[test]
    fn low_end_on_either_signal() {
        let low_mem = detect_device_profile(&FixedCapabilities {
            memory_gb: Some(1.0),
            cores: Some(2),
            dpr: Some(1.0),
        });
        assert_eq!(low_mem.tier, DeviceTier::Low);
        assert!(!low_mem.settings.anti_aliasing);

        let low_cores = detect_device_profile(&FixedCapabilities {
            memory_gb: Some(16.0),
            cores: Some(2),
            dpr: None,
        });
        assert_eq!(low_cores.tier, DeviceTier::Low);
    }

    #[test]
    fn all_signals_absent_is_standard() {
        let p = detect_device_profile(&FixedCapabilities::default());
        assert_eq!(p.tier, DeviceTier::Standard);
    }

    #[test]
    fn garbage_memory_signal_falls_back() {
        let p = detect_device_profile(&FixedCapabilities {
            memory_gb: Some(f64::NAN),
            cores: Some(4),
            dpr: None,
        });
        assert_eq!(p.tier, DeviceTier::Standard);
    }

    #[test]
    fn max_dpr_scaling_is_monotone_across_tiers() {
        let low = DeviceProfile::low().settings.max_dpr_scaling;
        let std_ = DeviceProfile::standard().settings.max_dpr_scaling;
        let high = DeviceProfile::high().settings.max_dpr_scaling;
        assert!(low <= std_ && std_ <= high);
    }

    #[test]
    fn system_provider_never_panics() {
        let p = detect_device_profile(&SystemCapabilities);
        // Whatever the host, we get one of the three tiers.
        assert!(p.settings.max_dpr_scaling >= 1.5);
    }
}
