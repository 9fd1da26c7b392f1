use crate::commands::CanvasCommand;
use crate::types::{Color, DevicePoint};

/// The drawing-surface seam between the pure core and a concrete backend.
///
/// All coordinates are device pixels — callers are expected to have gone
/// through a coordinate transform already. Implementations map each call
/// onto their native surface (an HTML canvas 2D context, an egui painter,
/// an SVG writer) or record it for later replay.
///
/// State discipline: `save` and `restore` are paired, and the pairing is
/// owned by whoever called `save`. When multiple logical layers share one
/// surface within a frame, that pairing is the only serialization mechanism
/// between them.
pub trait CanvasContext {
    /// Push the current drawing state.
    fn save(&mut self);

    /// Pop the most recently saved drawing state.
    fn restore(&mut self);

    /// Toggle image smoothing (anti-aliasing) for subsequent strokes.
    fn set_image_smoothing(&mut self, enabled: bool);

    /// Set the stroke width for subsequent strokes, in device pixels.
    fn set_line_width(&mut self, width: f64);

    /// Stroke a line segment between two device-pixel coordinates.
    fn stroke_line(&mut self, from: DevicePoint, to: DevicePoint, color: Color, width: f64);
}

/// A [`CanvasContext`] that records commands instead of drawing.
///
/// Used by headless renderers (serialize the list, ship it across a WASM
/// boundary) and by tests asserting exactly what would be drawn. Tracks
/// save/restore depth so unbalanced state handling is observable; a
/// `restore` at depth zero is dropped rather than underflowing.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<CanvasCommand>,
    save_depth: usize,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded so far, in draw order.
    pub fn commands(&self) -> &[CanvasCommand] {
        &self.commands
    }

    /// Consume the recorder, yielding the command list.
    pub fn into_commands(self) -> Vec<CanvasCommand> {
        self.commands
    }

    /// Current save/restore nesting depth. Zero means balanced.
    pub fn save_depth(&self) -> usize {
        self.save_depth
    }

    /// Drop all recorded commands and reset the depth.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.save_depth = 0;
    }
}

impl CanvasContext for CommandRecorder {
    fn save(&mut self) {
        self.save_depth += 1;
        self.commands.push(CanvasCommand::Save);
    }

    fn restore(&mut self) {
        if self.save_depth == 0 {
            return;
        }
        self.save_depth -= 1;
        self.commands.push(CanvasCommand::Restore);
    }

    fn set_image_smoothing(&mut self, enabled: bool) {
        self.commands.push(CanvasCommand::SetImageSmoothing { enabled });
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(CanvasCommand::SetLineWidth { width });
    }

    fn stroke_line(&mut self, from: DevicePoint, to: DevicePoint, color: Color, width: f64) {
        self.commands.push(CanvasCommand::StrokeLine {
            from,
            to,
            color,
            width,
        });
    }
}
