//! Charts module - static map rendering

mod renderer;

pub use renderer::{MapRenderer, RenderError};
