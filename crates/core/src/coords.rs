use crisp_canvas_protocol::{CssPoint, CssSize, DevicePoint};

/// CSS↔device-pixel coordinate mapping, bound to one sanitized dpr.
///
/// Two families of transform live here and they are deliberately not the
/// same thing:
///
/// - the *logical* pair [`css_to_canvas`](Self::css_to_canvas) /
///   [`canvas_to_css_precise`](Self::canvas_to_css_precise) are exact
///   inverses (`×dpr` / `÷dpr`) — use these for hit-testing and any
///   round-trip;
/// - the *drawing* transforms [`css_to_canvas_precise`](Self::css_to_canvas_precise)
///   (adds a `+0.5` pixel-center offset) and
///   [`snap_to_pixel_center`](Self::snap_to_pixel_center) exist so that
///   1-device-pixel strokes land on a pixel center instead of bleeding
///   across two rows. Never round-trip through these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransformer {
    dpr: f64,
}

impl CoordinateTransformer {
    /// Bind a transformer to a dpr. Non-finite or non-positive values are
    /// treated as 1.0.
    pub fn new(dpr: f64) -> Self {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        Self { dpr }
    }

    /// The sanitized dpr this transformer is bound to.
    pub fn dpr(&self) -> f64 {
        self.dpr
    }

    /// CSS → device pixels, no alignment offset.
    ///
    /// Exact inverse of [`canvas_to_css_precise`](Self::canvas_to_css_precise).
    pub fn css_to_canvas(&self, p: CssPoint) -> DevicePoint {
        DevicePoint::new(p.x * self.dpr, p.y * self.dpr)
    }

    /// CSS → device pixels with the `+0.5` pixel-center draw alignment.
    ///
    /// Drawing-oriented: feed the result to a stroke call, not back through
    /// the inverse transform.
    pub fn css_to_canvas_precise(&self, p: CssPoint) -> DevicePoint {
        DevicePoint::new(p.x * self.dpr + 0.5, p.y * self.dpr + 0.5)
    }

    /// Device pixels → CSS, on raw (unaligned) device coordinates.
    pub fn canvas_to_css_precise(&self, p: DevicePoint) -> CssPoint {
        CssPoint::new(p.x / self.dpr, p.y / self.dpr)
    }

    /// Snap a CSS-axis value onto the center of the device pixel it falls
    /// in: `floor(v × dpr) + 0.5`. This is the alignment applied at the
    /// final draw call so crisp strokes hold at any dpr.
    pub fn snap_to_pixel_center(&self, v: f64) -> f64 {
        (v * self.dpr).floor() + 0.5
    }

    /// Clamp a device-pixel coordinate into the surface implied by a
    /// CSS-pixel bounds rectangle, preventing out-of-surface drawing.
    pub fn clamp_to_canvas_bounds(&self, p: DevicePoint, css_bounds: CssSize) -> DevicePoint {
        let max_x = (css_bounds.width * self.dpr).max(0.0);
        let max_y = (css_bounds.height * self.dpr).max(0.0);
        DevicePoint::new(p.x.clamp(0.0, max_x), p.y.clamp(0.0, max_y))
    }
}
