//! Live preview of an app: projection, composition and the sandboxed
//! surface it is rendered into.

pub mod chat_input;
pub mod composition;
pub mod surface;
pub mod view;

pub use chat_input::{estimate_rows, ChatInput, Key, KeyOutcome, KeyPress};
pub use composition::{compose, render_preview, PreviewContent};
pub use surface::{HostEnvironment, HostStylesheet, PreviewSurface, SurfaceOptions};
pub use view::AppViewConfig;
