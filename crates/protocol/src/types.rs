use serde::{Deserialize, Serialize};

/// A coordinate in logical CSS-pixel space — DPR-independent.
///
/// Layout, hit-testing, and domain→pixel mapping happen in this space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CssPoint {
    pub x: f64,
    pub y: f64,
}

impl CssPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A coordinate in device-pixel (backing-store) space.
///
/// Equal to the CSS-space coordinate scaled by the device pixel ratio.
/// Keeping the two spaces as distinct types means a caller cannot pass a
/// logical coordinate where a backing-store coordinate is expected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DevicePoint {
    pub x: f64,
    pub y: f64,
}

impl DevicePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CssSize {
    pub width: f64,
    pub height: f64,
}

impl CssSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceSize {
    pub width: f64,
    pub height: f64,
}

impl DeviceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Straight-alpha RGBA color, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// The pixel geometry of one canvas element, as reported by the
/// layout/canvas-sizing collaborator on creation or resize.
///
/// `canvas` is the backing-store size in device pixels, `canvas_area` the
/// element size in CSS pixels; a well-formed pair satisfies
/// `canvas.width ≈ canvas_area.width × dpr` (rounded). Malformed values
/// (NaN dpr, zero sizes) are representable here on purpose — the core
/// sanitizes them instead of rejecting the whole config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasDimensions {
    pub dpr: f64,
    pub canvas: DeviceSize,
    pub canvas_area: CssSize,
}

impl CanvasDimensions {
    /// Build dimensions from a CSS-pixel area and a dpr, deriving the
    /// backing-store size by rounding.
    pub fn from_css_area(canvas_area: CssSize, dpr: f64) -> Self {
        Self {
            dpr,
            canvas: DeviceSize::new(
                (canvas_area.width * dpr).round(),
                (canvas_area.height * dpr).round(),
            ),
            canvas_area,
        }
    }
}
