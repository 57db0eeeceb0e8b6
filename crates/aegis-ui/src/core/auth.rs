//! Authentication primitives shared across the UI.
//!
//! # Design
//! - Keep credentials as simple data so callers can store/clear them without side effects.
//! - Treat blank tokens as unauthenticated.
//! - Role checks are table-driven; unknown roles get the least-privileged access set.

use aegis_api_models::UserInfo;
use std::fmt;

/// Console roles, ordered by containment: `Admin ⊇ Operator ⊇ Viewer`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// Full access, including system administration.
    Admin,
    /// Can run scans and drive the AI center.
    Operator,
    /// Read-only access.
    Viewer,
}

const ADMIN_ACCESS: &[Role] = &[Role::Admin, Role::Operator, Role::Viewer];
const OPERATOR_ACCESS: &[Role] = &[Role::Operator, Role::Viewer];
const VIEWER_ACCESS: &[Role] = &[Role::Viewer];

impl Role {
    /// Parse a server-reported role name. Returns `None` for unknown names.
    #[must_use]
    pub fn from_claim(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "operator" => Some(Self::Operator),
            "viewer" => Some(Self::Viewer),
            _ => None,
        }
    }

    /// Wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Operator => "operator",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Roles that `role` may satisfy. Missing roles resolve like [`Role::Viewer`].
#[must_use]
pub const fn resolve(role: Option<Role>) -> &'static [Role] {
    match role {
        Some(Role::Admin) => ADMIN_ACCESS,
        Some(Role::Operator) => OPERATOR_ACCESS,
        Some(Role::Viewer) | None => VIEWER_ACCESS,
    }
}

/// Whether `role` satisfies at least one of `required`. Empty means unrestricted.
#[must_use]
pub fn has_access(required: &[Role], role: Option<Role>) -> bool {
    if required.is_empty() {
        return true;
    }
    let granted = resolve(role);
    required.iter().any(|needed| granted.contains(needed))
}

/// Persisted session credential.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credential {
    /// Bearer token attached to outbound requests.
    pub access_token: String,
    /// Last identity reported by login or profile fetch.
    pub user_info: Option<UserInfo>,
}

impl Credential {
    /// Whether the credential carries a usable token.
    #[must_use]
    pub fn has_token(&self) -> bool {
        !self.access_token.trim().is_empty()
    }

    /// Cached role, if the server reported a known one.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user_info
            .as_ref()
            .and_then(|info| Role::from_claim(&info.role))
    }
}
