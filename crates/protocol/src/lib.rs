pub mod commands;
pub mod context;
pub mod types;

pub use commands::CanvasCommand;
pub use context::{CanvasContext, CommandRecorder};
pub use types::{CanvasDimensions, Color, CssPoint, CssSize, DevicePoint, DeviceSize};
