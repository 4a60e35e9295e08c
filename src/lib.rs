//! Navigation authorization for the ride-sharing client.
//!
//! This crate decides, for every attempted screen transition, whether the
//! transition proceeds given the stored session and the user's document
//! verification status. It also reacts to backend authorization failures by
//! invalidating the local session.
//!
//! These checks are advisory. The backend must enforce authorization on its own.
//!
//! # Core Types
//!
//! - [`SessionStore`]: The single handle over persisted session entries
//! - [`NavigationGuard`]: Pure decision over a route and a [`SessionSnapshot`]
//! - [`RULES`]: The prioritized redirect rules the guard evaluates
//! - [`Router`]: Applies guard decisions through [`Notifier`] and [`Navigator`]
//! - [`ResponseInterceptor`]: Purges the session on server-side rejection
//!
//! # Examples
//!
//! ```
//! use ride_guard::{
//!     BackendFailure, MemoryStorage, NavigationGuard, RecordingNavigator, RecordingNotifier,
//!     ResponseInterceptor, Router, RouteTable, SessionStore, Storage,
//! };
//!
//! let session = SessionStore::new(MemoryStorage::new());
//! let notifier = RecordingNotifier::new();
//! let navigator = RecordingNavigator::new();
//!
//! session.storage().set("authToken", "token");
//! session.storage().set("user", r#"{"user_type":"other"}"#);
//! session.storage().set("verification_status", r#"{"id_front":1,"id_back":1,"selfie":1}"#);
//!
//! let router = Router::new(
//!     RouteTable::ride_share(),
//!     NavigationGuard::default(),
//!     &session,
//!     &notifier,
//!     &navigator,
//! );
//! assert!(router.navigate("/find-ride").unwrap().is_allowed());
//!
//! // The backend rejects the session; the next attempt is bounced home.
//! let interceptor = ResponseInterceptor::new(&session, &notifier, &navigator);
//! let _ = interceptor.on_response::<()>(Err(BackendFailure::with_status(401, "expired")));
//! assert_eq!(router.navigate("/find-ride").unwrap().redirect_path(), Some("/"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod capability;
mod error;
mod gate;
mod interceptor;
mod logging;
mod policy;
mod profile;
mod route;
mod router;
mod session;
mod storage;

pub use capability::{Navigator, Notifier, RecordingNavigator, RecordingNotifier};
pub use error::{Error, RouteViolation, RouteViolationKind};
pub use gate::{Decision, GuardConfig, NavigationGuard, Redirect};
pub use interceptor::{BackendFailure, FailureClass, InterceptorConfig, ResponseInterceptor};
pub use logging::TracingNotifier;
pub use policy::{GuardRule, RedirectReason, RuleInput, RULES};
pub use profile::{
    required_documents, DocumentKind, UserProfile, UserType, VerificationRecord, UNVERIFIED,
    VERIFIED,
};
pub use route::{RouteDescriptor, RouteTable, ROOT_PATH};
pub use router::Router;
pub use session::{SessionSnapshot, SessionStore, StorageKeys};
pub use storage::{MemoryStorage, Storage};
