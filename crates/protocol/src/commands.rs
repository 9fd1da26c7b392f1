use serde::{Deserialize, Serialize};

use crate::types::{Color, DevicePoint};

/// A single canvas drawing instruction.
///
/// The core emits these through a [`crate::CanvasContext`]; a backend
/// (web canvas, egui painter, SVG writer, test recorder) consumes them
/// sequentially. Stroke commands carry all the data they need; the
/// `Save`/`Restore` and `Set*` commands mirror the small slice of 2D-canvas
/// drawing state this subsystem touches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CanvasCommand {
    /// Push the current drawing state (smoothing, line width, ...).
    ///
    /// Always paired with a later `Restore`; the pairing is caller-owned,
    /// like `PushTransform`/`PopTransform` in an immediate-mode renderer.
    Save,

    /// Pop the most recently saved drawing state.
    Restore,

    /// Toggle image smoothing (anti-aliasing) for subsequent strokes.
    SetImageSmoothing { enabled: bool },

    /// Set the stroke width, in device pixels, for subsequent strokes.
    SetLineWidth { width: f64 },

    /// Stroke a line segment between two device-pixel coordinates.
    StrokeLine {
        from: DevicePoint,
        to: DevicePoint,
        color: Color,
        width: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_roundtrip() {
        let cmd = CanvasCommand::StrokeLine {
            from: DevicePoint::new(10.0, 40.5),
            to: DevicePoint::new(200.0, 40.5),
            color: Color::rgba(1.0, 0.0, 0.0, 1.0),
            width: 1.0,
        };
        let json = serde_json::to_string(&cmd).unwrap_or_default();
        let back: CanvasCommand = match serde_json::from_str(&json) {
            Ok(c) => c,
            Err(_) => CanvasCommand::Restore,
        };
        assert_eq!(back, cmd);
    }

    #[test]
    fn save_is_a_unit_variant() {
        let json = serde_json::to_string(&CanvasCommand::Save).unwrap_or_default();
        assert_eq!(json, "\"Save\"");
    }
}
