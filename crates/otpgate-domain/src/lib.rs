//! Shared domain types for Otpgate services.

pub mod mobile;
pub mod user;
