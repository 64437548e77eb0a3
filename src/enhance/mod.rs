//! AI enhancement module

pub mod client;
pub mod enhancer;
pub mod fallback;
pub mod prompts;
