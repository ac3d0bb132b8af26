//! User domain entity and request principal

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Facility administrator
    Admin,
    /// Regular player who books slots
    Player,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Player => "player",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "admin" => Self::Admin,
            _ => Self::Player,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Registered user account
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub fullname: String,
    pub password_hash: String,
    pub role: Role,
    pub location: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Authenticated principal passed into every service operation.
///
/// Resolved once at the request boundary from the JWT, so services never
/// reach back into auth state for role checks.
#[derive(Debug, Clone, Copy)]
pub struct Principal {
    pub id: Uuid,
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_roundtrip() {
        assert_eq!(Role::from_str(Role::Admin.as_str()), Role::Admin);
        assert_eq!(Role::from_str(Role::Player.as_str()), Role::Player);
    }

    #[test]
    fn unknown_role_defaults_to_player() {
        assert_eq!(Role::from_str("superuser"), Role::Player);
    }

    #[test]
    fn principal_admin_check() {
        let p = Principal {
            id: Uuid::new_v4(),
            role: Role::Admin,
        };
        assert!(p.is_admin());

        let p = Principal {
            id: Uuid::new_v4(),
            role: Role::Player,
        };
        assert!(!p.is_admin());
    }
}
