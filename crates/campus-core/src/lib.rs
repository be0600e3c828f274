//! Ambient service plumbing shared across campus binaries.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
