//! CLI library components for csvq.

pub mod logging;
pub mod pipeline;
pub mod render;
