//! CV enhancer library

pub mod cli;
pub mod config;
pub mod cv;
pub mod diff;
pub mod enhance;
pub mod error;
pub mod output;

pub use config::Config;
pub use diff::{compute_diff, DiffOptions, DiffStats, Span, SpanKind, WordDiff};
pub use error::{CvEnhancerError, Result};
