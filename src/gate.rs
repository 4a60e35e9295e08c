use serde::Deserialize;

use crate::policy::{GuardRule, RedirectReason, RuleInput, RULES};
use crate::route::{RouteDescriptor, ROOT_PATH};
use crate::session::SessionSnapshot;

/// Paths and messages the guard works with.
///
/// Defaults match the ride-sharing client. Missing fields in a JSON
/// document take their default; a message set to `null` disables it.
///
/// ```
/// use ride_guard::GuardConfig;
///
/// let config: GuardConfig = serde_json::from_str(r#"{"license_route":"/drive"}"#).unwrap();
/// assert_eq!(config.license_route, "/drive");
/// assert_eq!(config.verification_path, "/user-verification");
/// assert!(config.is_open("/user-register"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Unauthenticated entry route
    pub root_path: String,
    /// Where unverified users are sent
    pub verification_path: String,
    /// Routes exempt from verification checks
    pub open_routes: Vec<String>,
    /// Route that additionally needs a verified license
    pub license_route: String,
    /// Shown when a session is required
    pub login_message: Option<String>,
    /// Shown when verification is incomplete
    pub verification_message: Option<String>,
    /// Shown when a license is required
    pub license_message: Option<String>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            root_path: ROOT_PATH.to_string(),
            verification_path: "/user-verification".to_string(),
            open_routes: vec![
                ROOT_PATH.to_string(),
                "/user-register".to_string(),
                "/user-verification".to_string(),
            ],
            license_route: "/offer-ride".to_string(),
            login_message: Some("You must be logged in to access this page.".to_string()),
            verification_message: Some(
                "Please complete your account verification to continue.".to_string(),
            ),
            license_message: Some(
                "You need an approved driver's license to offer a ride.".to_string(),
            ),
        }
    }
}

impl GuardConfig {
    /// Returns true if `path` is exempt from verification checks.
    pub fn is_open(&self, path: &str) -> bool {
        self.open_routes.iter().any(|p| p == path)
    }

    /// Adds a route to the open allowlist.
    pub fn with_open_route(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        if !self.is_open(&path) {
            self.open_routes.push(path);
        }
        self
    }

    fn redirect_for(&self, reason: RedirectReason) -> Redirect {
        let (path, message) = match reason {
            RedirectReason::Unauthenticated => (&self.root_path, &self.login_message),
            RedirectReason::Unverified => (&self.verification_path, &self.verification_message),
            RedirectReason::LicenseRequired => (&self.verification_path, &self.license_message),
        };
        Redirect {
            path: path.clone(),
            reason,
            message: message.clone(),
        }
    }
}

/// Where a blocked navigation goes instead, and what to tell the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// Replacement navigation target
    pub path: String,
    /// Rule outcome that caused the redirect
    pub reason: RedirectReason,
    /// User-facing message, if any
    pub message: Option<String>,
}

/// Outcome of a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The navigation proceeds
    Allow,
    /// The navigation is replaced by another target
    RedirectTo(Redirect),
}

impl Decision {
    /// Returns true for [`Decision::Allow`].
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Returns the redirect target, if redirected.
    pub fn redirect_path(&self) -> Option<&str> {
        match self {
            Decision::Allow => None,
            Decision::RedirectTo(r) => Some(&r.path),
        }
    }

    /// Returns the redirect reason, if redirected.
    pub fn reason(&self) -> Option<RedirectReason> {
        match self {
            Decision::Allow => None,
            Decision::RedirectTo(r) => Some(r.reason),
        }
    }
}

/// The navigation guard.
///
/// `decide` is pure: it reads only its arguments and performs no side
/// effects beyond a debug log event. Surfacing the message and performing
/// the redirect are left to the caller (see [`Router`](crate::Router)).
///
/// # Examples
///
/// ```
/// use ride_guard::{Decision, NavigationGuard, RouteTable, SessionSnapshot};
///
/// let guard = NavigationGuard::default();
/// let routes = RouteTable::ride_share();
/// let find_ride = routes.resolve("/find-ride").unwrap();
///
/// let decision = guard.decide(find_ride, &SessionSnapshot::anonymous());
/// assert_eq!(decision.redirect_path(), Some("/"));
///
/// let home = routes.resolve("/").unwrap();
/// assert_eq!(guard.decide(home, &SessionSnapshot::anonymous()), Decision::Allow);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NavigationGuard {
    config: GuardConfig,
}

impl NavigationGuard {
    /// Creates a guard with the given configuration.
    pub fn new(config: GuardConfig) -> Self {
        Self { config }
    }

    /// Returns the guard configuration.
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Returns the rules in evaluation order.
    pub fn rules(&self) -> &'static [GuardRule] {
        &RULES
    }

    /// Returns the first rule that fires for this attempt, if any.
    pub fn matching_rule(
        &self,
        target: &RouteDescriptor,
        snapshot: &SessionSnapshot,
    ) -> Option<&'static GuardRule> {
        let input = RuleInput {
            target,
            snapshot,
            config: &self.config,
        };
        self.rules().iter().find(|rule| rule.applies(&input))
    }

    /// Decides whether navigating to `target` proceeds.
    pub fn decide(&self, target: &RouteDescriptor, snapshot: &SessionSnapshot) -> Decision {
        match self.matching_rule(target, snapshot) {
            Some(rule) => {
                let redirect = self.config.redirect_for(rule.reason);
                tracing::debug!(
                    path = %target.path,
                    rule = rule.name,
                    redirect = %redirect.path,
                    "navigation redirected"
                );
                Decision::RedirectTo(redirect)
            }
            None => {
                tracing::debug!(path = %target.path, "navigation allowed");
                Decision::Allow
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{DocumentKind, UserProfile, UserType, VerificationRecord, VERIFIED};
    use crate::route::RouteTable;

    fn authed(user_type: Option<UserType>, docs: &[DocumentKind]) -> SessionSnapshot {
        SessionSnapshot {
            is_authenticated: true,
            user: user_type.map(UserProfile::new),
            verification: docs.iter().map(|k| (*k, VERIFIED)).collect::<VerificationRecord>(),
        }
    }

    fn route(path: &str) -> RouteDescriptor {
        RouteTable::ride_share()
            .resolve(path)
            .cloned()
            .expect("route declared")
    }

    const BASE: [DocumentKind; 3] = [DocumentKind::IdFront, DocumentKind::IdBack, DocumentKind::Selfie];

    #[test]
    fn unauthenticated_protected_route_redirects_home_with_message() {
        let guard = NavigationGuard::default();
        let decision = guard.decide(&route("/offer-ride"), &SessionSnapshot::anonymous());

        assert_eq!(
            decision,
            Decision::RedirectTo(Redirect {
                path: "/".to_string(),
                reason: RedirectReason::Unauthenticated,
                message: Some("You must be logged in to access this page.".to_string()),
            })
        );
    }

    #[test]
    fn unauthenticated_open_route_is_allowed() {
        let guard = NavigationGuard::default();
        for path in ["/", "/user-register"] {
            assert!(guard.decide(&route(path), &SessionSnapshot::anonymous()).is_allowed());
        }
    }

    #[test]
    fn student_missing_student_id_goes_to_verification() {
        let guard = NavigationGuard::default();
        let decision = guard.decide(&route("/find-ride"), &authed(Some(UserType::Student), &BASE));

        assert_eq!(decision.redirect_path(), Some("/user-verification"));
        assert_eq!(decision.reason(), Some(RedirectReason::Unverified));
    }

    #[test]
    fn verified_other_user_can_find_ride() {
        let guard = NavigationGuard::default();
        let decision = guard.decide(&route("/find-ride"), &authed(Some(UserType::Other), &BASE));
        assert!(decision.is_allowed());
    }

    #[test]
    fn absent_profile_uses_base_documents() {
        let guard = NavigationGuard::default();
        assert!(guard
            .decide(&route("/find-ride"), &authed(None, &BASE))
            .is_allowed());
    }

    #[test]
    fn verification_takes_priority_over_license() {
        let guard = NavigationGuard::default();
        let decision = guard.decide(&route("/offer-ride"), &authed(Some(UserType::Other), &[]));
        assert_eq!(decision.reason(), Some(RedirectReason::Unverified));
    }

    #[test]
    fn professional_with_half_license_cannot_offer_ride() {
        let guard = NavigationGuard::default();
        let mut snapshot = authed(
            Some(UserType::Professional),
            &[
                DocumentKind::IdFront,
                DocumentKind::IdBack,
                DocumentKind::Selfie,
                DocumentKind::WorkId,
                DocumentKind::LicenseFront,
            ],
        );
        snapshot.verification = snapshot.verification.with(DocumentKind::LicenseBack, 0);

        let decision = guard.decide(&route("/offer-ride"), &snapshot);
        match decision {
            Decision::RedirectTo(r) => {
                assert_eq!(r.path, "/user-verification");
                assert_eq!(r.reason, RedirectReason::LicenseRequired);
                assert_eq!(
                    r.message.as_deref(),
                    Some("You need an approved driver's license to offer a ride.")
                );
            }
            Decision::Allow => panic!("half a license must not pass"),
        }
    }

    #[test]
    fn missing_license_only_matters_for_offer_ride() {
        let guard = NavigationGuard::default();
        let snapshot = authed(Some(UserType::Other), &BASE);
        assert!(guard.decide(&route("/find-ride"), &snapshot).is_allowed());
    }

    #[test]
    fn fully_verified_student_can_offer_ride() {
        let guard = NavigationGuard::default();
        let snapshot = authed(
            Some(UserType::Student),
            &[
                DocumentKind::IdFront,
                DocumentKind::IdBack,
                DocumentKind::Selfie,
                DocumentKind::StudentId,
                DocumentKind::LicenseFront,
                DocumentKind::LicenseBack,
            ],
        );
        assert_eq!(guard.decide(&route("/offer-ride"), &snapshot), Decision::Allow);
    }

    #[test]
    fn unverified_user_may_stay_on_verification_page() {
        let guard = NavigationGuard::default();
        let decision = guard.decide(&route("/user-verification"), &authed(Some(UserType::Student), &[]));
        assert!(decision.is_allowed());
    }

    #[test]
    fn extra_open_route_skips_verification() {
        let guard = NavigationGuard::new(GuardConfig::default().with_open_route("/help"));
        let help = RouteDescriptor::protected("/help", "help");
        assert!(guard.decide(&help, &authed(None, &[])).is_allowed());
    }

    #[test]
    fn disabled_message_yields_silent_redirect() {
        let config = GuardConfig {
            login_message: None,
            ..GuardConfig::default()
        };
        let decision =
            NavigationGuard::new(config).decide(&route("/find-ride"), &SessionSnapshot::anonymous());

        match decision {
            Decision::RedirectTo(r) => assert!(r.message.is_none()),
            Decision::Allow => panic!("expected redirect"),
        }
    }

    #[test]
    fn with_open_route_does_not_duplicate() {
        let config = GuardConfig::default().with_open_route("/");
        assert_eq!(config.open_routes.len(), 3);
    }

    #[test]
    fn config_null_message_disables_it() {
        let config: GuardConfig = serde_json::from_str(r#"{"license_message":null}"#).unwrap();
        assert!(config.license_message.is_none());
        assert!(config.login_message.is_some());
    }
}
