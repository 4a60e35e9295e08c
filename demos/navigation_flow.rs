//! End-to-end navigation flow for a ride-sharing client.
//!
//! Walks a new user from anonymous browsing through verification to
//! offering a ride, then expires the session from the backend side.
//!
//! Run with: `cargo run --example navigation_flow`

use ride_guard::{
    BackendFailure, Decision, MemoryStorage, NavigationGuard, RecordingNavigator,
    ResponseInterceptor, Router, RouteTable, SessionStore, Storage, TracingNotifier,
};

fn report(path: &str, decision: &Decision) {
    match decision {
        Decision::Allow => tracing::info!(path, "allowed"),
        Decision::RedirectTo(r) => {
            tracing::info!(path, redirect = %r.path, reason = %r.reason, "redirected")
        }
    }
}

fn main() -> Result<(), ride_guard::Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let session = SessionStore::new(MemoryStorage::new());
    let notifier = TracingNotifier::new();
    let navigator = RecordingNavigator::new();
    let router = Router::new(
        RouteTable::ride_share(),
        NavigationGuard::default(),
        &session,
        &notifier,
        &navigator,
    );
    let interceptor = ResponseInterceptor::new(&session, &notifier, &navigator);

    tracing::info!("=== Anonymous ===");
    for path in ["/", "/find-ride"] {
        report(path, &router.navigate(path)?);
    }

    tracing::info!("=== Logged in, nothing verified ===");
    session.storage().set("authToken", "demo-token");
    session
        .storage()
        .set("user", r#"{"user_type":"student","name":"Riley"}"#);
    for path in ["/find-ride", "/user-verification"] {
        report(path, &router.navigate(path)?);
    }

    tracing::info!("=== Identity verified, no license ===");
    session.storage().set(
        "verification_status",
        r#"{"id_front":1,"id_back":1,"selfie":1,"student_id":1}"#,
    );
    for path in ["/find-ride", "/offer-ride"] {
        report(path, &router.navigate(path)?);
    }

    tracing::info!("=== License approved ===");
    session.storage().set(
        "verification_status",
        r#"{"id_front":1,"id_back":1,"selfie":1,"student_id":1,"license_front":1,"license_back":1}"#,
    );
    report("/offer-ride", &router.navigate("/offer-ride")?);

    tracing::info!("=== Backend rejects the session ===");
    let result = interceptor.on_response::<()>(Err(BackendFailure::with_status(401, "token expired")));
    if let Err(failure) = result {
        tracing::warn!(%failure, "request failed");
    }
    report("/offer-ride", &router.navigate("/offer-ride")?);

    tracing::info!(visits = ?navigator.visits(), "navigation history");
    Ok(())
}
