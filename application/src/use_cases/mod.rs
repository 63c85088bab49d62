//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod chat_controller;
pub mod handle_query;
pub mod session_catalog;
#[cfg(test)]
pub(crate) mod test_support;
