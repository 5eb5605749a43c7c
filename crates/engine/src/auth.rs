//! Caller identity and role checks
//!
//! Authentication itself happens outside the engine. Actions only need to
//! ask "does the caller hold one of these roles?", which is what
//! [`AuthContext`] answers.

use serde::{Deserialize, Serialize};
use warehaus_core::{Error, Result};

/// A user's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including schema and lab management
    Admin,
    /// Regular operator
    User,
    /// Automated agent (heartbeats)
    Bot,
    /// Deactivated account
    Deleted,
}

impl Role {
    /// Lowercase role name
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Bot => "bot",
            Role::Deleted => "deleted",
        }
    }

    /// Whether accounts with this role may log in interactively.
    pub fn can_login(&self) -> bool {
        matches!(self, Role::Admin | Role::User)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            "bot" => Ok(Role::Bot),
            "deleted" => Ok(Role::Deleted),
            other => Err(Error::bad_request(format!("unknown role '{}'", other))),
        }
    }
}

/// Roles admitted by `require_user`.
pub const USER_ROLES: &[Role] = &[Role::User, Role::Bot, Role::Admin];

/// Roles admitted by `require_admin`.
pub const ADMIN_ROLES: &[Role] = &[Role::Admin];

/// What the engine needs to know about the caller.
pub trait AuthContext: Send + Sync {
    /// The caller's role, `None` when unauthenticated.
    fn role(&self) -> Option<Role>;

    /// The caller's user id, `None` when unauthenticated.
    fn user_id(&self) -> Option<&str>;

    /// Fail unless the caller holds one of `allowed`.
    fn require_role(&self, allowed: &[Role]) -> Result<()> {
        match self.role() {
            None => Err(Error::Unauthorized {
                reason: "authentication required".to_string(),
            }),
            Some(role) if allowed.contains(&role) => Ok(()),
            Some(_) => Err(Error::Forbidden {
                reason: format!(
                    "This API is for {} only",
                    allowed.iter().map(Role::as_str).collect::<Vec<_>>().join(", ")
                ),
            }),
        }
    }

    /// Fail unless the caller is a user, bot or admin.
    fn require_user(&self) -> Result<()> {
        self.require_role(USER_ROLES)
    }

    /// Fail unless the caller is an admin.
    fn require_admin(&self) -> Result<()> {
        self.require_role(ADMIN_ROLES)
    }
}

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User id
    pub user_id: String,
    /// Role
    pub role: Role,
}

impl Identity {
    /// Create an identity
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Identity {
            user_id: user_id.into(),
            role,
        }
    }
}

impl AuthContext for Identity {
    fn role(&self) -> Option<Role> {
        Some(self.role)
    }

    fn user_id(&self) -> Option<&str> {
        Some(&self.user_id)
    }
}

/// An unauthenticated caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl AuthContext for Anonymous {
    fn role(&self) -> Option<Role> {
        None
    }

    fn user_id(&self) -> Option<&str> {
        None
    }
}
