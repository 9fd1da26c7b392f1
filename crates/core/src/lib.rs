//! DPR-aware coordinate transforms and adaptive rendering for real-time
//! canvas visualizations.
//!
//! ```text
//!   CanvasDimensions ──▶ create_dpr_rendering_config ──▶ RenderingConfig
//!                              │                              │
//!        CapabilityProvider ──▶ DeviceProfile                 ├─ coordinates (CSS ↔ device px)
//!                              │                              ├─ line_renderer (1-px crisp strokes)
//!                     dpr ────▶ ZoomLevel ─▶ AdaptiveSettings └─ monitor (frame timings → advice)
//! ```
//!
//! Per animation frame the owning renderer maps domain values to CSS
//! coordinates, converts through `coordinates`, draws via `line_renderer`
//! into a [`crisp_canvas_protocol::CanvasContext`], and reports timing to
//! the monitor. Quality adjustment is advisory: callers sample
//! [`analyze_performance`] and decide whether to apply a revised
//! [`AdaptiveSettings`]. Everything is synchronous and single-threaded;
//! one config per canvas, no globals.

pub mod capability;
pub mod config;
pub mod coords;
pub mod lines;
pub mod monitor;
pub mod zoom;

pub use capability::{
    CapabilityProvider, DeviceProfile, DeviceTier, FixedCapabilities, ProfileSettings,
    SystemCapabilities, detect_device_profile,
};
pub use config::{
    ConfigOptions, DimensionError, RenderingConfig, create_dpr_rendering_config,
    create_dpr_rendering_config_with, sanitize_dimensions, validate_dimensions,
};
pub use coords::CoordinateTransformer;
pub use lines::{CrispLineRenderer, LineStyle};
pub use monitor::{
    FrameSample, MonitorOptions, PerformanceLevel, PerformanceMetrics, PerformanceMonitor,
    PerformanceReport, analyze_performance,
};
pub use zoom::{AdaptiveSettings, ZoomCategory, ZoomLevel, adaptive_settings, effective_dpr, zoom_level};
