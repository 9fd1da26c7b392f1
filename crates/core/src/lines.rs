use crisp_canvas_protocol::{CanvasContext, Color, DevicePoint};

use crate::coords::CoordinateTransformer;
use crate::zoom::AdaptiveSettings;

/// Stroke styling for a single crisp line. Width is in device pixels;
/// anything below one pixel is clamped up so the stroke stays visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub line_width: f64,
}

impl LineStyle {
    pub fn new(color: Color, line_width: f64) -> Self {
        Self {
            color,
            line_width: line_width.max(1.0),
        }
    }
}

/// Draws axis-aligned lines that occupy exactly one device-pixel row or
/// column at any dpr.
///
/// All inputs are CSS-pixel coordinates; the renderer owns the conversion to
/// aligned device pixels. Stateless with respect to the context: identical
/// arguments always emit identical commands.
#[derive(Debug, Clone, Copy)]
pub struct CrispLineRenderer {
    transform: CoordinateTransformer,
    anti_aliasing: bool,
    line_width: f64,
}

impl CrispLineRenderer {
    pub fn new(dpr: f64, settings: &AdaptiveSettings) -> Self {
        Self {
            transform: CoordinateTransformer::new(dpr),
            anti_aliasing: settings.anti_aliasing,
            line_width: settings.line_width.max(1.0),
        }
    }

    pub fn transform(&self) -> &CoordinateTransformer {
        &self.transform
    }

    /// Push a drawing state configured for crisp strokes: smoothing off
    /// unless the profile allows anti-aliasing, line width from the adaptive
    /// settings.
    ///
    /// Emits `save`; the caller owns the matching `ctx.restore()`. That
    /// pairing is the serialization discipline between layers sharing one
    /// canvas — leaking the configured state into a sibling layer is a bug
    /// on the caller's side, not recoverable here.
    pub fn configure_for_crisp_lines(&self, ctx: &mut dyn CanvasContext) {
        ctx.save();
        ctx.set_image_smoothing(self.anti_aliasing);
        ctx.set_line_width(self.line_width);
    }

    /// Stroke a horizontal line from `x_start` to `x_end` at row `y`
    /// (all CSS pixels). The row is snapped to a device-pixel center; the
    /// endpoints are rounded to whole device pixels.
    pub fn draw_horizontal_line(
        &self,
        ctx: &mut dyn CanvasContext,
        x_start: f64,
        x_end: f64,
        y: f64,
        style: &LineStyle,
    ) {
        let dpr = self.transform.dpr();
        let y_dev = self.transform.snap_to_pixel_center(y);
        let from = DevicePoint::new((x_start * dpr).round(), y_dev);
        let to = DevicePoint::new((x_end * dpr).round(), y_dev);
        ctx.stroke_line(from, to, style.color, style.line_width);
    }

    /// Stroke a vertical line at column `x` from `y_start` to `y_end`
    /// (all CSS pixels).
    pub fn draw_vertical_line(
        &self,
        ctx: &mut dyn CanvasContext,
        x: f64,
        y_start: f64,
        y_end: f64,
        style: &LineStyle,
    ) {
        let dpr = self.transform.dpr();
        let x_dev = self.transform.snap_to_pixel_center(x);
        let from = DevicePoint::new(x_dev, (y_start * dpr).round());
        let to = DevicePoint::new(x_dev, (y_end * dpr).round());
        ctx.stroke_line(from, to, style.color, style.line_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zoom::adaptive_settings;
    use crate::capability::DeviceProfile;
    use crisp_canvas_protocol::{CanvasCommand, CommandRecorder};

    fn renderer(dpr: f64) -> CrispLineRenderer {
        let settings = adaptive_settings(dpr, &DeviceProfile::standard());
        CrispLineRenderer::new(dpr, &settings)
    }

    fn white() -> LineStyle {
        LineStyle::new(Color::rgba(1.0, 1.0, 1.0, 1.0), 1.0)
    }

    #[test]
    fn configure_pushes_state_and_leaves_restore_to_caller() {
        let r = renderer(2.0);
        let mut rec = CommandRecorder::new();
        r.configure_for_crisp_lines(&mut rec);
        assert_eq!(rec.save_depth(), 1);
        assert_eq!(rec.commands()[0], CanvasCommand::Save);
        rec.restore();
        assert_eq!(rec.save_depth(), 0);
    }

    #[test]
    fn horizontal_line_lands_on_pixel_center() {
        for dpr in [1.0, 1.25, 1.5, 2.0, 3.0] {
            let r = renderer(dpr);
            let mut rec = CommandRecorder::new();
            r.draw_horizontal_line(&mut rec, 10.0, 110.0, 40.3, &white());
            match rec.commands() {
                [CanvasCommand::StrokeLine { from, to, .. }] => {
                    assert_eq!(from.y, to.y);
                    assert_eq!(from.y.fract(), 0.5, "dpr {dpr}");
                    assert_eq!(from.x.fract(), 0.0);
                    assert_eq!(to.x.fract(), 0.0);
                }
                other => panic!("expected one stroke, got {other:?}"),
            }
        }
    }

    #[test]
    fn vertical_line_lands_on_pixel_center() {
        let r = renderer(1.5);
        let mut rec = CommandRecorder::new();
        r.draw_vertical_line(&mut rec, 33.4, 0.0, 120.0, &white());
        match rec.commands() {
            [CanvasCommand::StrokeLine { from, to, .. }] => {
                assert_eq!(from.x, to.x);
                assert_eq!(from.x.fract(), 0.5);
            }
            other => panic!("expected one stroke, got {other:?}"),
        }
    }

    #[test]
    fn identical_calls_emit_identical_commands() {
        let r = renderer(2.0);
        let mut a = CommandRecorder::new();
        let mut b = CommandRecorder::new();
        r.draw_horizontal_line(&mut a, 0.0, 50.0, 12.7, &white());
        r.draw_horizontal_line(&mut b, 0.0, 50.0, 12.7, &white());
        assert_eq!(a.commands(), b.commands());
    }

    #[test]
    fn sub_pixel_width_is_clamped() {
        let style = LineStyle::new(Color::rgba(0.0, 0.0, 0.0, 1.0), 0.25);
        assert_eq!(style.line_width, 1.0);
    }
}
