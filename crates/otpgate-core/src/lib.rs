//! Ambient service plumbing shared by Otpgate services.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
