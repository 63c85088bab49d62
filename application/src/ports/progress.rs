//! Progress notification port
//!
//! Lets the presentation layer show that a request is in flight.

/// Callback for progress updates around the LLM call
pub trait ProgressNotifier: Send + Sync {
    /// Called right before the request is sent.
    fn on_request_start(&self, model: &str);

    /// Called once the request finished, successfully or not.
    fn on_request_end(&self, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_request_start(&self, _model: &str) {}
    fn on_request_end(&self, _success: bool) {}
}
