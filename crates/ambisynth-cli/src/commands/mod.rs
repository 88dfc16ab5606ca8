//! CLI command implementations

pub mod analyze;
pub mod render;
pub mod source;
pub mod stream;
pub mod validate;
