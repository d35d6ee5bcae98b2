//! Auth types shared across Otpgate crates.
//!
//! Provides session-token claims and validation, and the bearer `Identity` extractor.

pub mod identity;
pub mod token;
