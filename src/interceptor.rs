//! Reaction to backend authorization failures.
//!
//! Every backend call's result passes through
//! [`ResponseInterceptor::on_response`]. Successes pass through untouched.
//! A failure the server classifies as an authorization rejection purges the
//! local session, tells the user, sends them to the entry route, and is
//! still returned to the caller.

use std::fmt;

use serde::Deserialize;

use crate::capability::{Navigator, Notifier};
use crate::route::ROOT_PATH;
use crate::session::SessionStore;
use crate::storage::Storage;

/// A failed backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendFailure {
    /// HTTP-like status, absent when no response arrived
    pub status: Option<u16>,
    /// Description of the failure
    pub message: String,
}

impl BackendFailure {
    /// A failure carrying a response status.
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// A failure with no response (network error, timeout).
    pub fn no_response(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for BackendFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "Backend failure ({}): {}", status, self.message),
            None => write!(f, "Backend failure (no response): {}", self.message),
        }
    }
}

impl std::error::Error for BackendFailure {}

/// How a backend failure is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// The server rejected the session
    AuthorizationRejected,
    /// Any other status
    Other,
    /// No response arrived
    NoResponse,
}

/// Interceptor settings.
///
/// ```
/// use ride_guard::{BackendFailure, FailureClass, InterceptorConfig};
///
/// let config = InterceptorConfig::default();
/// assert_eq!(
///     config.classify(&BackendFailure::with_status(401, "expired")),
///     FailureClass::AuthorizationRejected
/// );
/// assert_eq!(
///     config.classify(&BackendFailure::with_status(403, "forbidden")),
///     FailureClass::Other
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InterceptorConfig {
    /// Statuses that mean the server rejected the session
    pub rejection_statuses: Vec<u16>,
    /// Route to send the user to after invalidation
    pub root_path: String,
    /// Shown after invalidation
    pub session_expired_message: String,
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self {
            rejection_statuses: vec![401],
            root_path: ROOT_PATH.to_string(),
            session_expired_message: "Session expired. Please log in again.".to_string(),
        }
    }
}

impl InterceptorConfig {
    /// Classifies a failure by its status.
    pub fn classify(&self, failure: &BackendFailure) -> FailureClass {
        match failure.status {
            None => FailureClass::NoResponse,
            Some(status) if self.rejection_statuses.contains(&status) => {
                FailureClass::AuthorizationRejected
            }
            Some(_) => FailureClass::Other,
        }
    }
}

/// Invalidates the session when the backend rejects it.
///
/// This is the only writer of session state in the crate.
///
/// # Examples
///
/// ```
/// use ride_guard::{
///     BackendFailure, MemoryStorage, RecordingNavigator, RecordingNotifier,
///     ResponseInterceptor, SessionStore, Storage,
/// };
///
/// let session = SessionStore::new(MemoryStorage::new());
/// session.storage().set("authToken", "t");
/// let notifier = RecordingNotifier::new();
/// let navigator = RecordingNavigator::new();
/// let interceptor = ResponseInterceptor::new(&session, &notifier, &navigator);
///
/// let result: Result<(), _> = interceptor.on_response(Err(BackendFailure::with_status(401, "expired")));
///
/// assert!(result.is_err());
/// assert!(!session.read().is_authenticated);
/// assert_eq!(navigator.current().as_deref(), Some("/"));
/// ```
pub struct ResponseInterceptor<'a, S> {
    session: &'a SessionStore<S>,
    notifier: &'a dyn Notifier,
    navigator: &'a dyn Navigator,
    config: InterceptorConfig,
}

impl<'a, S: Storage> ResponseInterceptor<'a, S> {
    /// Creates an interceptor with the default configuration.
    pub fn new(
        session: &'a SessionStore<S>,
        notifier: &'a dyn Notifier,
        navigator: &'a dyn Navigator,
    ) -> Self {
        Self::with_config(session, notifier, navigator, InterceptorConfig::default())
    }

    /// Creates an interceptor with a custom configuration.
    pub fn with_config(
        session: &'a SessionStore<S>,
        notifier: &'a dyn Notifier,
        navigator: &'a dyn Navigator,
        config: InterceptorConfig,
    ) -> Self {
        Self {
            session,
            notifier,
            navigator,
            config,
        }
    }

    /// Returns the interceptor configuration.
    pub fn config(&self) -> &InterceptorConfig {
        &self.config
    }

    /// Observes a backend result and returns it unchanged.
    ///
    /// On an authorization rejection this first clears the session, then
    /// notifies the user, then redirects to the root route. The failure is
    /// always handed back to the caller.
    pub fn on_response<T>(&self, result: Result<T, BackendFailure>) -> Result<T, BackendFailure> {
        if let Err(failure) = &result {
            self.on_failure(failure);
        }
        result
    }

    fn on_failure(&self, failure: &BackendFailure) {
        match self.config.classify(failure) {
            FailureClass::AuthorizationRejected => {
                tracing::info!(
                    status = failure.status,
                    redirect = %self.config.root_path,
                    "session rejected by backend, clearing"
                );
                self.session.clear();
                self.notifier.notify_error(&self.config.session_expired_message);
                self.navigator.redirect(&self.config.root_path);
            }
            class => {
                tracing::debug!(status = failure.status, ?class, "backend failure passed through");
            }
        }
    }
}

impl<S> fmt::Debug for ResponseInterceptor<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseInterceptor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
