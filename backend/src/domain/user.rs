//! User and role domain types.
//!
//! `User` carries the stored password hash, so it never implements
//! `Serialize`; handlers expose their own DTOs instead.

use std::fmt;

use uuid::Uuid;

/// Validation errors for [`Username`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameValidationError {
    /// Name was empty once trimmed.
    Empty,
}

impl fmt::Display for UsernameValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "username must not be empty"),
        }
    }
}

impl std::error::Error for UsernameValidationError {}

/// Unique user name.
///
/// ## Invariants
/// - Trimmed and non-empty. Uniqueness across users is enforced by the
///   store's unique index, not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Construct a username from a raw string, trimming surrounding
    /// whitespace.
    pub fn new(raw: &str) -> Result<Self, UsernameValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UsernameValidationError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a role record.
pub type RoleId = i64;

/// Named permission grouping, lookup-only from this core's perspective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    /// Role identifier.
    pub id: RoleId,
    /// Role name.
    pub name: String,
}

/// Stored user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: Uuid,
    name: Username,
    password_hash: String,
    role_ids: Vec<RoleId>,
}

impl User {
    /// Assemble a user from its stored parts.
    pub fn new(id: Uuid, name: Username, password_hash: String, role_ids: Vec<RoleId>) -> Self {
        Self {
            id,
            name,
            password_hash,
            role_ids,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Unique name.
    pub fn name(&self) -> &Username {
        &self.name
    }

    /// Stored password hash, opaque to everything but the hasher.
    pub fn password_hash(&self) -> &str {
        self.password_hash.as_str()
    }

    /// Assigned role ids.
    pub fn role_ids(&self) -> &[RoleId] {
        &self.role_ids
    }
}
