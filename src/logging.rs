use crate::capability::Notifier;

/// A [`Notifier`] that emits each message as a `tracing` warning.
///
/// Useful for headless runs where there is no toast surface. The message
/// is attached as a structured field so subscribers can route it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier {
    _private: (),
}

impl TracingNotifier {
    /// Creates a new TracingNotifier.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for TracingNotifier {
    fn notify_error(&self, message: &str) {
        tracing::warn!(notification = %message, "user notified");
    }
}
