//! Prioritized redirect rules.
//!
//! Rules are evaluated in the order of [`RULES`] and the first one whose
//! predicate holds decides the outcome. The verification rule precedes the
//! license rule, so a user who is missing both is sent to finish general
//! verification first.

use std::fmt;

use crate::gate::GuardConfig;
use crate::profile::{required_documents, DocumentKind};
use crate::route::RouteDescriptor;
use crate::session::SessionSnapshot;

/// Why a navigation attempt was redirected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// Target needs a session and none is present
    Unauthenticated,
    /// Session present but required identity documents are not verified
    Unverified,
    /// Offering a ride without both sides of a verified license
    LicenseRequired,
}

impl fmt::Display for RedirectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedirectReason::Unauthenticated => write!(f, "Unauthenticated"),
            RedirectReason::Unverified => write!(f, "Unverified"),
            RedirectReason::LicenseRequired => write!(f, "License required"),
        }
    }
}

/// Everything a rule predicate may look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    /// Destination being navigated to
    pub target: &'a RouteDescriptor,
    /// Session read for this attempt
    pub snapshot: &'a SessionSnapshot,
    /// Guard configuration
    pub config: &'a GuardConfig,
}

/// A single redirect rule: a predicate over the input and the reason it yields.
#[derive(Clone, Copy)]
pub struct GuardRule {
    /// Stable rule name used in log events
    pub name: &'static str,
    /// Outcome when the predicate holds
    pub reason: RedirectReason,
    applies: fn(&RuleInput<'_>) -> bool,
}

impl GuardRule {
    /// Returns true if this rule fires for `input`.
    pub fn applies(&self, input: &RuleInput<'_>) -> bool {
        (self.applies)(input)
    }
}

impl fmt::Debug for GuardRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardRule")
            .field("name", &self.name)
            .field("reason", &self.reason)
            .finish()
    }
}

/// The redirect rules, highest priority first.
pub static RULES: [GuardRule; 3] = [
    GuardRule {
        name: "session-required",
        reason: RedirectReason::Unauthenticated,
        applies: session_required,
    },
    GuardRule {
        name: "verification-incomplete",
        reason: RedirectReason::Unverified,
        applies: verification_incomplete,
    },
    GuardRule {
        name: "license-required",
        reason: RedirectReason::LicenseRequired,
        applies: license_required,
    },
];

fn session_required(input: &RuleInput<'_>) -> bool {
    input.target.requires_auth && !input.snapshot.is_authenticated
}

// Verification applies to authenticated users heading anywhere but an open route.
fn verification_gated(input: &RuleInput<'_>) -> bool {
    input.snapshot.is_authenticated && !input.config.is_open(&input.target.path)
}

fn verification_incomplete(input: &RuleInput<'_>) -> bool {
    verification_gated(input)
        && required_documents(input.snapshot.user_type())
            .into_iter()
            .any(|kind| !input.snapshot.verification.is_verified(kind))
}

fn license_required(input: &RuleInput<'_>) -> bool {
    verification_gated(input)
        && input.target.path == input.config.license_route
        && DocumentKind::LICENSE
            .iter()
            .any(|kind| !input.snapshot.verification.is_verified(*kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{UserProfile, UserType, VerificationRecord, VERIFIED};

    fn snapshot(user_type: UserType, docs: &[DocumentKind]) -> SessionSnapshot {
        SessionSnapshot {
            is_authenticated: true,
            user: Some(UserProfile::new(user_type)),
            verification: docs.iter().map(|k| (*k, VERIFIED)).collect::<VerificationRecord>(),
        }
    }

    fn fired(target: &RouteDescriptor, snapshot: &SessionSnapshot) -> Vec<&'static str> {
        let config = GuardConfig::default();
        let input = RuleInput {
            target,
            snapshot,
            config: &config,
        };
        RULES
            .iter()
            .filter(|r| r.applies(&input))
            .map(|r| r.name)
            .collect()
    }

    #[test]
    fn rule_order_is_session_verification_license() {
        let names: Vec<_> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            ["session-required", "verification-incomplete", "license-required"]
        );
    }

    #[test]
    fn verification_and_license_can_both_fire() {
        let target = RouteDescriptor::protected("/offer-ride", "offerride");
        let snap = snapshot(UserType::Other, &[]);

        assert_eq!(
            fired(&target, &snap),
            ["verification-incomplete", "license-required"]
        );
    }

    #[test]
    fn open_routes_skip_verification_rules() {
        let target = RouteDescriptor::protected("/user-verification", "userverification");
        let snap = snapshot(UserType::Student, &[]);

        assert!(fired(&target, &snap).is_empty());
    }

    #[test]
    fn anonymous_on_open_route_fires_nothing() {
        let target = RouteDescriptor::open("/", "home");
        assert!(fired(&target, &SessionSnapshot::anonymous()).is_empty());
    }

    #[test]
    fn anonymous_on_unprotected_gated_path_fires_nothing() {
        // Not authenticated, so the verification rules never apply.
        let target = RouteDescriptor::open("/about", "about");
        assert!(fired(&target, &SessionSnapshot::anonymous()).is_empty());
    }

    #[test]
    fn debug_output_omits_predicate() {
        let out = format!("{:?}", RULES[0]);
        assert_eq!(
            out,
            "GuardRule { name: \"session-required\", reason: Unauthenticated }"
        );
    }
}
