//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`GenerationParams`] - sampling controls forwarded with every request

pub mod generation_params;

pub use generation_params::GenerationParams;
