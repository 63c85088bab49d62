//! Progress reporting around LLM requests

pub mod reporter;
