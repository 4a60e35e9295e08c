use std::fmt;

/// Errors that can occur while routing navigation attempts.
///
/// None of these are fatal: an unknown route is reported to the caller, and
/// route-table problems surface once at startup when the table is built.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// The requested path is not declared in the route table
    UnknownRoute(String),
    /// The route table failed validation
    InvalidRoute(RouteViolation),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownRoute(path) => write!(f, "No route declared for '{}'", path),
            Error::InvalidRoute(v) => write!(f, "Invalid route table: {}", v),
        }
    }
}

impl std::error::Error for Error {}

impl From<RouteViolation> for Error {
    fn from(v: RouteViolation) -> Self {
        Error::InvalidRoute(v)
    }
}

/// A route table entry that breaks a table invariant.
#[derive(Debug, PartialEq, Eq)]
pub struct RouteViolation {
    /// What is wrong with the table
    pub kind: RouteViolationKind,
    /// The offending path or name
    pub subject: String,
}

impl RouteViolation {
    /// Creates a new violation.
    pub fn new(kind: RouteViolationKind, subject: impl Into<String>) -> Self {
        Self {
            kind,
            subject: subject.into(),
        }
    }
}

impl fmt::Display for RouteViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: '{}'", self.kind, self.subject)
    }
}

impl std::error::Error for RouteViolation {}

/// The kind of route table violation.
#[derive(Debug, PartialEq, Eq)]
pub enum RouteViolationKind {
    /// Path is empty or does not start with `/`
    MalformedPath,
    /// Two entries share a path
    DuplicatePath,
    /// Two entries share a name
    DuplicateName,
    /// No open entry route at the root path
    MissingRoot,
    /// The root path is declared as requiring authentication
    ProtectedRoot,
}

impl fmt::Display for RouteViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteViolationKind::MalformedPath => write!(f, "Malformed path"),
            RouteViolationKind::DuplicatePath => write!(f, "Duplicate path"),
            RouteViolationKind::DuplicateName => write!(f, "Duplicate name"),
            RouteViolationKind::MissingRoot => write!(f, "Missing root route"),
            RouteViolationKind::ProtectedRoot => write!(f, "Root route requires auth"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_route_display_names_path() {
        let err = Error::UnknownRoute("/nowhere".to_string());
        assert_eq!(err.to_string(), "No route declared for '/nowhere'");
    }

    #[test]
    fn route_violation_converts_into_error() {
        let err: Error = RouteViolation::new(RouteViolationKind::DuplicatePath, "/find-ride").into();
        assert_eq!(
            err.to_string(),
            "Invalid route table: Duplicate path: '/find-ride'"
        );
    }
}
