mod formatting;
mod rich_text;
mod sink;
mod types;
pub(crate) mod utils;
mod webvtt;

pub use formatting::{ControlCodeInterpreter, RenderState, RenderedLine};
pub use rich_text::TagStackRenderer;
pub use sink::{pump, CueSink};
pub use types::{Cue, Justification, RenderMode};
pub use webvtt::WebVttWriter;

// Exports for testing
pub use utils::format_timestamp;
