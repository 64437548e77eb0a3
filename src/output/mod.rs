//! Output module
//! Renders word diffs and enhancement reports in multiple formats

pub mod renderer;

pub use renderer::{save_output_to_file, ConsoleRenderer, DiffRenderer, RendererSet};
