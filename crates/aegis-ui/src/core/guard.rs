//! Navigation guard evaluated before every route transition.
//!
//! # Design
//! - Pure decision over the route table and a session snapshot; never fails.
//! - Rules are evaluated in a fixed order and the first match wins.

use crate::core::auth::{Role, has_access};
use crate::core::config::{ClientConfig, strip_location_suffix};
use crate::core::routes::RouteTable;
use crate::core::storage::CredentialStore;

/// Authentication facts the guard needs, read fresh for every evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Whether a usable token is stored.
    pub authenticated: bool,
    /// Cached role; `None` when absent or unknown.
    pub role: Option<Role>,
}

impl SessionSnapshot {
    /// No credential.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            authenticated: false,
            role: None,
        }
    }

    /// Authenticated with `role`.
    #[must_use]
    pub const fn signed_in(role: Option<Role>) -> Self {
        Self {
            authenticated: true,
            role,
        }
    }

    /// Snapshot of the credential store as it is right now.
    #[must_use]
    pub fn from_store(store: &CredentialStore) -> Self {
        store
            .credential()
            .map_or_else(Self::anonymous, |credential| Self::signed_in(credential.role()))
    }
}

/// Outcome of a guard evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the target.
    Allow,
    /// Navigate to this path instead.
    Redirect(String),
}

/// Route-level authentication and role gate.
#[derive(Clone, Debug)]
pub struct NavigationGuard {
    routes: RouteTable,
    config: ClientConfig,
}

impl NavigationGuard {
    /// Guard over `routes` using the paths from `config`.
    #[must_use]
    pub const fn new(routes: RouteTable, config: ClientConfig) -> Self {
        Self { routes, config }
    }

    /// Decide whether `target` (path with optional query) may be shown.
    #[must_use]
    pub fn evaluate(&self, target: &str, session: SessionSnapshot) -> GuardDecision {
        let path = strip_location_suffix(target);
        let route = self.routes.resolve(path);
        let requires_auth = route.is_none_or(|route| route.requires_auth);

        if requires_auth && !session.authenticated {
            return redirect_to(self.config.login_redirect(target));
        }
        if session.authenticated && self.config.is_login_path(path) {
            return redirect_to(self.config.landing_path.clone());
        }
        let Some(route) = route else {
            return redirect_to(self.config.landing_path.clone());
        };
        if route.requires_auth && !has_access(route.required_roles, session.role) {
            return redirect_to(self.config.forbidden_path.clone());
        }
        if let Some(alias) = route.redirect {
            return redirect_to(alias.to_string());
        }
        GuardDecision::Allow
    }

    /// Where to go after a successful login, given the login URL's query string.
    ///
    /// The return path is honoured only when it is an in-app absolute path that
    /// is not the login view itself.
    #[must_use]
    pub fn post_login_target(&self, query: &str) -> String {
        let query = query.trim_start_matches('?');
        let requested = query.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            if key != self.config.return_param {
                return None;
            }
            urlencoding::decode(value).ok().map(|value| value.into_owned())
        });
        match requested {
            Some(path)
                if path.starts_with('/')
                    && !path.starts_with("//")
                    && !self.config.is_login_path(&path) =>
            {
                path
            }
            _ => self.config.landing_path.clone(),
        }
    }

    /// Login view path, where signed-out users are sent.
    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.config.login_path
    }

    /// Route table in use.
    #[must_use]
    pub const fn routes(&self) -> &RouteTable {
        &self.routes
    }
}

fn redirect_to(to: String) -> GuardDecision {
    tracing::debug!(to = %to, "navigation guard redirect");
    GuardDecision::Redirect(to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::routes::console_routes;

    fn guard() -> NavigationGuard {
        NavigationGuard::new(console_routes(), ClientConfig::default())
    }

    fn redirect(path: &str) -> GuardDecision {
        GuardDecision::Redirect(path.to_string())
    }

    #[test]
    fn anonymous_users_go_to_login_with_return_path() {
        let guard = guard();
        assert_eq!(
            guard.evaluate("/defense", SessionSnapshot::anonymous()),
            redirect("/login?redirect=%2Fdefense")
        );
        assert_eq!(
            guard.evaluate("/scan/5?tab=ports", SessionSnapshot::anonymous()),
            redirect("/login?redirect=%2Fscan%2F5%3Ftab%3Dports")
        );
    }

    #[test]
    fn anonymous_users_reach_public_routes() {
        let guard = guard();
        assert_eq!(guard.evaluate("/login", SessionSnapshot::anonymous()), GuardDecision::Allow);
        assert_eq!(
            guard.evaluate("/forbidden", SessionSnapshot::anonymous()),
            GuardDecision::Allow
        );
    }

    #[test]
    fn unknown_routes_require_auth_then_land() {
        let guard = guard();
        assert_eq!(
            guard.evaluate("/nope", SessionSnapshot::anonymous()),
            redirect("/login?redirect=%2Fnope")
        );
        assert_eq!(
            guard.evaluate("/nope", SessionSnapshot::signed_in(Some(Role::Admin))),
            redirect("/defense")
        );
    }

    #[test]
    fn authenticated_users_are_sent_away_from_login() {
        let guard = guard();
        assert_eq!(
            guard.evaluate("/login?redirect=%2Fscan", SessionSnapshot::signed_in(Some(Role::Viewer))),
            redirect("/defense")
        );
    }

    #[test]
    fn trailing_slash_login_is_still_the_login_view() {
        let guard = guard();
        assert_eq!(
            guard.evaluate("/login/", SessionSnapshot::signed_in(Some(Role::Admin))),
            redirect("/defense")
        );
        assert_eq!(guard.evaluate("/login/", SessionSnapshot::anonymous()), GuardDecision::Allow);
        assert_eq!(guard.post_login_target("redirect=%2Flogin%2F"), "/defense");
    }

    #[test]
    fn signed_out_users_land_on_login_without_a_bounce() {
        let guard = guard();
        assert_eq!(guard.login_path(), "/login");
        assert_eq!(
            guard.evaluate(guard.login_path(), SessionSnapshot::anonymous()),
            GuardDecision::Allow
        );
    }

    #[test]
    fn viewers_are_forbidden_from_operator_routes() {
        let guard = guard();
        let viewer = SessionSnapshot::signed_in(Some(Role::Viewer));
        assert_eq!(guard.evaluate("/scan", viewer), redirect("/forbidden"));
        assert_eq!(guard.evaluate("/ai", viewer), redirect("/forbidden"));
        assert_eq!(guard.evaluate("/defense", viewer), GuardDecision::Allow);
    }

    #[test]
    fn unknown_role_is_treated_as_viewer() {
        let guard = guard();
        let unknown = SessionSnapshot::signed_in(None);
        assert_eq!(guard.evaluate("/scan/1", unknown), redirect("/forbidden"));
        assert_eq!(guard.evaluate("/reports", unknown), GuardDecision::Allow);
    }

    #[test]
    fn admins_reach_every_restricted_route() {
        let guard = guard();
        let admin = SessionSnapshot::signed_in(Some(Role::Admin));
        for route in guard.routes().routes() {
            if route.required_roles.is_empty() {
                continue;
            }
            let path = route.path.replace(":id", "1");
            assert_eq!(guard.evaluate(&path, admin), GuardDecision::Allow, "{path}");
        }
    }

    #[test]
    fn operators_cannot_reach_system() {
        let guard = guard();
        let operator = SessionSnapshot::signed_in(Some(Role::Operator));
        assert_eq!(guard.evaluate("/scan", operator), GuardDecision::Allow);
        assert_eq!(guard.evaluate("/system", operator), redirect("/forbidden"));
    }

    #[test]
    fn root_alias_forwards_to_landing() {
        let guard = guard();
        assert_eq!(
            guard.evaluate("/", SessionSnapshot::signed_in(Some(Role::Viewer))),
            redirect("/defense")
        );
        assert_eq!(
            guard.evaluate("/", SessionSnapshot::anonymous()),
            redirect("/login?redirect=%2F")
        );
    }

    #[test]
    fn snapshot_reflects_cleared_store_immediately() -> Result<(), crate::core::storage::StorageError> {
        let store = CredentialStore::in_memory();
        store.store(&crate::core::auth::Credential {
            access_token: "tok".to_string(),
            user_info: Some(aegis_api_models::UserInfo {
                username: "ops".to_string(),
                role: "operator".to_string(),
            }),
        })?;
        let guard = guard();
        assert_eq!(
            guard.evaluate("/scan", SessionSnapshot::from_store(&store)),
            GuardDecision::Allow
        );
        store.clear();
        assert_eq!(
            guard.evaluate("/scan", SessionSnapshot::from_store(&store)),
            redirect("/login?redirect=%2Fscan")
        );
        Ok(())
    }

    #[test]
    fn post_login_target_honours_safe_return_paths() {
        let guard = guard();
        assert_eq!(guard.post_login_target("?redirect=%2Fscan%2F5"), "/scan/5");
        assert_eq!(guard.post_login_target("foo=1&redirect=%2Fai"), "/ai");
        assert_eq!(guard.post_login_target(""), "/defense");
        assert_eq!(guard.post_login_target("redirect=https%3A%2F%2Fevil"), "/defense");
        assert_eq!(guard.post_login_target("redirect=%2F%2Fevil.example"), "/defense");
        assert_eq!(guard.post_login_target("redirect=%2Flogin"), "/defense");
    }
}
