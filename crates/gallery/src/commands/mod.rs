//! CLI command implementations.

pub mod build;
pub mod dev;
pub mod index;
pub mod list;
pub mod render;
pub mod serve;
