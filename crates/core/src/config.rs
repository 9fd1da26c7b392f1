use crisp_canvas_protocol::{CanvasDimensions, CssSize, DeviceSize};
use thiserror::Error;

use crate::capability::{CapabilityProvider, DeviceProfile, SystemCapabilities, detect_device_profile};
use crate::coords::CoordinateTransformer;
use crate::lines::CrispLineRenderer;
use crate::monitor::{MonitorOptions, PerformanceMonitor};
use crate::zoom::{AdaptiveSettings, ZoomLevel, adaptive_settings, effective_dpr, zoom_level};

/// Why a `CanvasDimensions` failed validation.
///
/// Reported for diagnostics only — the factory substitutes safe defaults
/// instead of surfacing these to callers.
#[derive(Debug, Error, PartialEq)]
pub enum DimensionError {
    #[error("dpr is not a finite number")]
    NonFiniteDpr,
    #[error("dpr {0} is not positive")]
    NonPositiveDpr(f64),
    #[error("canvas backing store is empty ({width}x{height})")]
    EmptyCanvas { width: f64, height: f64 },
    #[error("canvas CSS area is empty ({width}x{height})")]
    EmptyCanvasArea { width: f64, height: f64 },
    #[error("backing store {canvas} does not match css area x dpr ({expected})")]
    BackingStoreMismatch { canvas: f64, expected: f64 },
}

/// Check the `canvas ≈ canvas_area × dpr` contract and basic sanity.
pub fn validate_dimensions(dims: &CanvasDimensions) -> Result<(), DimensionError> {
    if !dims.dpr.is_finite() {
        return Err(DimensionError::NonFiniteDpr);
    }
    if dims.dpr <= 0.0 {
        return Err(DimensionError::NonPositiveDpr(dims.dpr));
    }
    if !(dims.canvas.width > 0.0 && dims.canvas.height > 0.0) {
        return Err(DimensionError::EmptyCanvas {
            width: dims.canvas.width,
            height: dims.canvas.height,
        });
    }
    if !(dims.canvas_area.width > 0.0 && dims.canvas_area.height > 0.0) {
        return Err(DimensionError::EmptyCanvasArea {
            width: dims.canvas_area.width,
            height: dims.canvas_area.height,
        });
    }
    let expected = dims.canvas_area.width * dims.dpr;
    if (dims.canvas.width - expected).abs() > 1.0 {
        return Err(DimensionError::BackingStoreMismatch {
            canvas: dims.canvas.width,
            expected,
        });
    }
    Ok(())
}

/// Replace malformed fields with safe defaults (dpr 1.0, 1×1 surfaces) so a
/// usable, if degraded, config can always be built. Each substitution is
/// logged at warn level.
pub fn sanitize_dimensions(dims: CanvasDimensions) -> CanvasDimensions {
    let mut out = dims;

    if !(out.dpr.is_finite() && out.dpr > 0.0) {
        log::warn!("malformed dpr {:?}, substituting 1.0", out.dpr);
        out.dpr = 1.0;
    }
    if !(out.canvas_area.width.is_finite() && out.canvas_area.width > 0.0)
        || !(out.canvas_area.height.is_finite() && out.canvas_area.height > 0.0)
    {
        log::warn!(
            "malformed css area {}x{}, substituting 1x1",
            out.canvas_area.width,
            out.canvas_area.height
        );
        out.canvas_area = CssSize::new(
            if out.canvas_area.width.is_finite() && out.canvas_area.width > 0.0 {
                out.canvas_area.width
            } else {
                1.0
            },
            if out.canvas_area.height.is_finite() && out.canvas_area.height > 0.0 {
                out.canvas_area.height
            } else {
                1.0
            },
        );
    }
    if !(out.canvas.width.is_finite() && out.canvas.width > 0.0)
        || !(out.canvas.height.is_finite() && out.canvas.height > 0.0)
    {
        log::warn!(
            "malformed backing store {}x{}, deriving from css area",
            out.canvas.width,
            out.canvas.height
        );
        out.canvas = DeviceSize::new(
            (out.canvas_area.width * out.dpr).round().max(1.0),
            (out.canvas_area.height * out.dpr).round().max(1.0),
        );
    }
    out
}

/// Factory options.
#[derive(Debug, Clone, Copy)]
pub struct ConfigOptions {
    /// Skip detection and use this profile.
    pub device_profile: Option<DeviceProfile>,
    pub enable_performance_monitoring: bool,
    pub monitor: MonitorOptions,
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            device_profile: None,
            enable_performance_monitoring: true,
            monitor: MonitorOptions::default(),
        }
    }
}

/// Everything one canvas instance needs per frame: the resolved profile and
/// settings plus live coordinate, drawing, and monitoring handles.
///
/// Created per canvas/display instance and discarded on teardown; never
/// cached globally and never persisted.
#[derive(Debug)]
pub struct RenderingConfig {
    pub dimensions: CanvasDimensions,
    pub device_profile: DeviceProfile,
    pub zoom_level: ZoomLevel,
    pub adaptive_settings: AdaptiveSettings,
    pub coordinates: CoordinateTransformer,
    pub line_renderer: CrispLineRenderer,
    pub monitor: Option<PerformanceMonitor>,
}

impl RenderingConfig {
    /// The sanitized dpr every handle in this config is bound to.
    pub fn dpr(&self) -> f64 {
        self.coordinates.dpr()
    }

    /// Backing-store scale the embedder should allocate: display dpr capped
    /// at the profile's `max_dpr_scaling`.
    pub fn recommended_backing_scale(&self) -> f64 {
        effective_dpr(self.dimensions.dpr, &self.device_profile)
    }

    pub fn monitor_mut(&mut self) -> Option<&mut PerformanceMonitor> {
        self.monitor.as_mut()
    }
}

/// Build a [`RenderingConfig`] for one canvas, detecting the device profile
/// with [`SystemCapabilities`] unless the options carry an override.
///
/// Total over malformed input: a NaN dpr or zero sizes degrade to safe
/// defaults instead of panicking.
pub fn create_dpr_rendering_config(
    dimensions: CanvasDimensions,
    options: &ConfigOptions,
) -> RenderingConfig {
    create_dpr_rendering_config_with(&SystemCapabilities, dimensions, options)
}

/// [`create_dpr_rendering_config`] with an injected capability provider.
pub fn create_dpr_rendering_config_with(
    provider: &dyn CapabilityProvider,
    dimensions: CanvasDimensions,
    options: &ConfigOptions,
) -> RenderingConfig {
    if let Err(err) = validate_dimensions(&dimensions) {
        log::warn!("canvas dimensions rejected ({err}), sanitizing");
    }
    let dims = sanitize_dimensions(dimensions);

    let device_profile = options
        .device_profile
        .unwrap_or_else(|| detect_device_profile(provider));
    let zoom = zoom_level(dims.dpr);
    let settings = adaptive_settings(dims.dpr, &device_profile);

    let monitor = options
        .enable_performance_monitoring
        .then(|| {
            let mut m = PerformanceMonitor::new(options.monitor);
            m.start();
            m
        });

    RenderingConfig {
        dimensions: dims,
        device_profile,
        zoom_level: zoom,
        adaptive_settings: settings,
        coordinates: CoordinateTransformer::new(dims.dpr),
        line_renderer: CrispLineRenderer::new(dims.dpr, &settings),
        monitor,
    }
}
