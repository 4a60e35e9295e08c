use std::cell::RefCell;

/// Fire-and-forget user-facing error notifications (toasts).
pub trait Notifier {
    /// Shows `message` to the user.
    fn notify_error(&self, message: &str);
}

/// Replaces the pending navigation target.
pub trait Navigator {
    /// Navigates to `path`.
    fn redirect(&self, path: &str);
}

/// A [`Notifier`] that records messages instead of displaying them.
///
/// # Examples
///
/// ```
/// use ride_guard::{Notifier, RecordingNotifier};
///
/// let notifier = RecordingNotifier::new();
/// notifier.notify_error("Session expired. Please log in again.");
/// assert_eq!(notifier.messages(), vec!["Session expired. Please log in again."]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of recorded messages, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    /// Returns the number of recorded messages.
    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_error(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

/// A [`Navigator`] that records redirect targets.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every path navigated to, oldest first.
    pub fn visits(&self) -> Vec<String> {
        self.visits.borrow().clone()
    }

    /// Returns the most recent path, if any.
    pub fn current(&self) -> Option<String> {
        self.visits.borrow().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &str) {
        self.visits.borrow_mut().push(path.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        assert!(notifier.is_empty());

        notifier.notify_error("first");
        notifier.notify_error("second");

        assert_eq!(notifier.len(), 2);
        assert_eq!(notifier.messages(), vec!["first", "second"]);
    }

    #[test]
    fn recording_navigator_tracks_current() {
        let navigator = RecordingNavigator::new();
        assert_eq!(navigator.current(), None);

        navigator.redirect("/find-ride");
        navigator.redirect("/");

        assert_eq!(navigator.visits(), vec!["/find-ride", "/"]);
        assert_eq!(navigator.current().as_deref(), Some("/"));
    }

    #[test]
    fn capabilities_work_as_trait_objects() {
        let notifier = RecordingNotifier::new();
        let dyn_notifier: &dyn Notifier = &notifier;
        dyn_notifier.notify_error("boxed");

        assert_eq!(notifier.messages(), vec!["boxed"]);
    }
}
