//! Static route table.

use std::collections::HashSet;

use crate::error::{RouteViolation, RouteViolationKind};

/// Path of the open entry route.
pub const ROOT_PATH: &str = "/";

/// A navigable destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// URL path, always starting with `/`
    pub path: String,
    /// Unique route name
    pub name: String,
    /// Whether the destination needs an authenticated session
    pub requires_auth: bool,
}

impl RouteDescriptor {
    /// Declares a destination reachable without a session.
    pub fn open(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            requires_auth: false,
        }
    }

    /// Declares a destination that needs an authenticated session.
    pub fn protected(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            requires_auth: true,
        }
    }
}

/// Ordered, validated list of destinations.
///
/// # Examples
///
/// ```
/// use ride_guard::RouteTable;
///
/// let routes = RouteTable::ride_share();
/// let offer = routes.resolve("/offer-ride").expect("declared");
/// assert!(offer.requires_auth);
/// assert_eq!(routes.by_name("home").map(|r| r.path.as_str()), Some("/"));
/// ```
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    /// Builds a table after checking its invariants.
    ///
    /// # Errors
    ///
    /// Returns a `RouteViolation` if a path is malformed, a path or name is
    /// repeated, or there is no open route at `/`.
    pub fn new(routes: Vec<RouteDescriptor>) -> Result<Self, RouteViolation> {
        let mut paths = HashSet::new();
        let mut names = HashSet::new();

        for route in &routes {
            if !route.path.starts_with('/') {
                return Err(RouteViolation::new(
                    RouteViolationKind::MalformedPath,
                    &route.path,
                ));
            }
            if !paths.insert(route.path.as_str()) {
                return Err(RouteViolation::new(
                    RouteViolationKind::DuplicatePath,
                    &route.path,
                ));
            }
            if !names.insert(route.name.as_str()) {
                return Err(RouteViolation::new(
                    RouteViolationKind::DuplicateName,
                    &route.name,
                ));
            }
        }

        let root_requires_auth = routes
            .iter()
            .find(|r| r.path == ROOT_PATH)
            .map(|r| r.requires_auth);

        match root_requires_auth {
            None => Err(RouteViolation::new(
                RouteViolationKind::MissingRoot,
                ROOT_PATH,
            )),
            Some(true) => Err(RouteViolation::new(
                RouteViolationKind::ProtectedRoot,
                ROOT_PATH,
            )),
            Some(false) => Ok(Self { routes }),
        }
    }

    /// The ride-sharing client's destinations.
    pub fn ride_share() -> Self {
        Self {
            routes: vec![
                RouteDescriptor::open(ROOT_PATH, "home"),
                RouteDescriptor::open("/user-register", "userregister"),
                RouteDescriptor::protected("/user-verification", "userverification"),
                RouteDescriptor::protected("/find-ride", "findride"),
                RouteDescriptor::protected("/offer-ride", "offerride"),
            ],
        }
    }

    /// Finds the route declared for `path`.
    pub fn resolve(&self, path: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|r| r.path == path)
    }

    /// Finds the route with the given name.
    pub fn by_name(&self, name: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Iterates routes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter()
    }

    /// Returns the number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if the table has no routes. A validated table never is.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ride_share_table_is_valid() {
        let table = RouteTable::ride_share();
        let rebuilt = RouteTable::new(table.iter().cloned().collect());
        assert!(rebuilt.is_ok());
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn ride_share_table_has_single_open_root() {
        let table = RouteTable::ride_share();
        let roots: Vec<_> = table.iter().filter(|r| r.path == ROOT_PATH).collect();
        assert_eq!(roots.len(), 1);
        assert!(!roots[0].requires_auth);
    }

    #[test]
    fn rejects_missing_root() {
        let err = RouteTable::new(vec![RouteDescriptor::protected("/find-ride", "findride")])
            .unwrap_err();
        assert_eq!(err.kind, RouteViolationKind::MissingRoot);
    }

    #[test]
    fn rejects_protected_root() {
        let err = RouteTable::new(vec![RouteDescriptor::protected("/", "home")]).unwrap_err();
        assert_eq!(err.kind, RouteViolationKind::ProtectedRoot);
    }

    #[test]
    fn rejects_duplicates_and_malformed_paths() {
        let dup_path = RouteTable::new(vec![
            RouteDescriptor::open("/", "home"),
            RouteDescriptor::open("/", "home2"),
        ])
        .unwrap_err();
        assert_eq!(dup_path.kind, RouteViolationKind::DuplicatePath);

        let dup_name = RouteTable::new(vec![
            RouteDescriptor::open("/", "home"),
            RouteDescriptor::open("/again", "home"),
        ])
        .unwrap_err();
        assert_eq!(dup_name.kind, RouteViolationKind::DuplicateName);

        let malformed =
            RouteTable::new(vec![RouteDescriptor::open("find-ride", "findride")]).unwrap_err();
        assert_eq!(malformed.kind, RouteViolationKind::MalformedPath);
        assert_eq!(malformed.subject, "find-ride");
    }

    #[test]
    fn unknown_path_does_not_resolve() {
        assert!(RouteTable::ride_share().resolve("/admin").is_none());
    }
}
