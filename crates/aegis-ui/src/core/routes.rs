//! Static route table consulted by the navigation guard.

use crate::core::auth::Role;
use crate::core::config::{path_segments, strip_location_suffix};

/// Access metadata for one route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// Path pattern; `:name` segments match any single segment.
    pub path: &'static str,
    /// Whether a credential is needed to view the route.
    pub requires_auth: bool,
    /// Roles allowed on the route; empty means any authenticated user.
    pub required_roles: &'static [Role],
    /// Alias target the route forwards to.
    pub redirect: Option<&'static str>,
}

impl RouteDescriptor {
    /// Authenticated route with no role restriction.
    #[must_use]
    pub const fn protected(path: &'static str) -> Self {
        Self {
            path,
            requires_auth: true,
            required_roles: &[],
            redirect: None,
        }
    }

    /// Route reachable without a credential.
    #[must_use]
    pub const fn public(path: &'static str) -> Self {
        Self {
            path,
            requires_auth: false,
            required_roles: &[],
            redirect: None,
        }
    }

    /// Restrict the route to `roles`.
    #[must_use]
    pub const fn with_roles(mut self, roles: &'static [Role]) -> Self {
        self.required_roles = roles;
        self
    }

    /// Forward the route to `target`.
    #[must_use]
    pub const fn redirecting_to(mut self, target: &'static str) -> Self {
        self.redirect = Some(target);
        self
    }

    /// Whether `path` (without query or fragment) matches this pattern.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let mut pattern = path_segments(self.path);
        let mut candidate = path_segments(path);
        loop {
            match (pattern.next(), candidate.next()) {
                (None, None) => return true,
                (Some(expected), Some(actual)) => {
                    if !expected.starts_with(':') && expected != actual {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }
}

/// Ordered route list; the first matching descriptor wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    /// Table from an ordered list.
    #[must_use]
    pub const fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes }
    }

    /// Descriptor for `path`, ignoring query and fragment.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&RouteDescriptor> {
        let path = strip_location_suffix(path);
        self.routes.iter().find(|route| route.matches(path))
    }

    /// All descriptors in order.
    #[must_use]
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }
}

const OPERATORS: &[Role] = &[Role::Operator, Role::Admin];
const ADMINS: &[Role] = &[Role::Admin];

/// Route table of the security console.
#[must_use]
pub fn console_routes() -> RouteTable {
    RouteTable::new(vec![
        RouteDescriptor::protected("/").redirecting_to("/defense"),
        RouteDescriptor::public("/login"),
        RouteDescriptor::public("/forbidden"),
        RouteDescriptor::protected("/defense"),
        RouteDescriptor::protected("/scan").with_roles(OPERATORS),
        RouteDescriptor::protected("/scan/:id").with_roles(OPERATORS),
        RouteDescriptor::protected("/ai").with_roles(OPERATORS),
        RouteDescriptor::protected("/reports"),
        RouteDescriptor::protected("/system").with_roles(ADMINS),
    ])
}
