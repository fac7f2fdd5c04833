//! User model and roles

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role attached to an authenticated principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// End user: requests, cancels and reviews reservations
    User,
    /// Venue operator: approves and rejects pending reservations
    Partner,
    /// Administrator: privileged operations (e.g. review removal)
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Partner => "partner",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown role name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl std::str::FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "partner" => Ok(Self::Partner),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// User entity (storage representation)
///
/// The Argon2 PHC hash must survive storage round-trips; API responses
/// expose users through a separate view that omits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    /// Unix timestamp in milliseconds
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serde() {
        assert_eq!(
            serde_json::to_string(&UserRole::Partner).unwrap(),
            "\"partner\""
        );
        let role: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, UserRole::Admin);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("partner".parse::<UserRole>().unwrap(), UserRole::Partner);
        assert!("owner".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_user_storage_roundtrip_keeps_hash() {
        let user = User {
            id: 1,
            email: "a@b.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: UserRole::User,
            created_at: 0,
        };
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back.password_hash, user.password_hash);
    }
}
