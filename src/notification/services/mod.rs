//! Application services for rendering and delivering notifications.

mod dispatcher;
mod renderer;

pub use dispatcher::{DispatchError, DispatchReport, OutboxDispatcher};
pub use renderer::{EmailRenderer, RenderError, RenderedEmail};
