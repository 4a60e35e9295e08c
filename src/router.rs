//! Wires the pure guard to session state and the navigation capabilities.

use std::fmt;

use crate::capability::{Navigator, Notifier};
use crate::error::Error;
use crate::gate::{Decision, NavigationGuard};
use crate::route::RouteTable;
use crate::session::SessionStore;
use crate::storage::Storage;

/// Runs the guard for each navigation attempt and applies its decision.
///
/// A fresh [`SessionSnapshot`](crate::SessionSnapshot) is read per attempt;
/// nothing is cached between attempts. A caller that starts a newer
/// navigation simply ignores the older attempt's returned decision.
///
/// # Examples
///
/// ```
/// use ride_guard::{
///     MemoryStorage, NavigationGuard, RecordingNavigator, RecordingNotifier, Router,
///     RouteTable, SessionStore,
/// };
///
/// let session = SessionStore::new(MemoryStorage::new());
/// let notifier = RecordingNotifier::new();
/// let navigator = RecordingNavigator::new();
/// let router = Router::new(
///     RouteTable::ride_share(),
///     NavigationGuard::default(),
///     &session,
///     &notifier,
///     &navigator,
/// );
///
/// let decision = router.navigate("/offer-ride").unwrap();
/// assert_eq!(decision.redirect_path(), Some("/"));
/// assert_eq!(navigator.current().as_deref(), Some("/"));
/// assert_eq!(notifier.len(), 1);
/// ```
pub struct Router<'a, S> {
    routes: RouteTable,
    guard: NavigationGuard,
    session: &'a SessionStore<S>,
    notifier: &'a dyn Notifier,
    navigator: &'a dyn Navigator,
}

impl<'a, S: Storage> Router<'a, S> {
    /// Creates a router over the given table and capabilities.
    pub fn new(
        routes: RouteTable,
        guard: NavigationGuard,
        session: &'a SessionStore<S>,
        notifier: &'a dyn Notifier,
        navigator: &'a dyn Navigator,
    ) -> Self {
        Self {
            routes,
            guard,
            session,
            notifier,
            navigator,
        }
    }

    /// Returns the route table.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Returns the guard.
    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }

    /// Attempts to navigate to `path`.
    ///
    /// On `Allow` the navigator is sent to `path`. On a redirect the
    /// message, if any, is shown and the navigator is sent to the redirect
    /// target instead.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownRoute` if `path` is not in the table. The
    /// navigator is not touched in that case.
    pub fn navigate(&self, path: &str) -> Result<Decision, Error> {
        let target = self
            .routes
            .resolve(path)
            .ok_or_else(|| Error::UnknownRoute(path.to_string()))?;

        let snapshot = self.session.read();
        let decision = self.guard.decide(target, &snapshot);

        match &decision {
            Decision::Allow => self.navigator.redirect(&target.path),
            Decision::RedirectTo(redirect) => {
                if let Some(message) = &redirect.message {
                    self.notifier.notify_error(message);
                }
                self.navigator.redirect(&redirect.path);
            }
        }

        Ok(decision)
    }

    /// Attempts to navigate to the route named `name`.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownRoute` if no route has that name.
    pub fn navigate_named(&self, name: &str) -> Result<Decision, Error> {
        let path = self
            .routes
            .by_name(name)
            .map(|r| r.path.clone())
            .ok_or_else(|| Error::UnknownRoute(name.to_string()))?;
        self.navigate(&path)
    }
}

impl<S> fmt::Debug for Router<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .field("guard", &self.guard)
            .finish_non_exhaustive()
    }
}
