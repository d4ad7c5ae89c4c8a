//! Role tags granted to portal users by the hosted backend.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// A single role tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Moderator,
    Player,
    Pro,
    Parents,
    Trainer,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::Moderator,
        Role::Player,
        Role::Pro,
        Role::Parents,
        Role::Trainer,
    ];

    /// Tag as stored by the backend.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Moderator => "MODERATOR",
            Role::Player => "PLAYER",
            Role::Pro => "PRO",
            Role::Parents => "PARENTS",
            Role::Trainer => "TRAINER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.as_tag().eq_ignore_ascii_case(tag))
            .ok_or_else(|| ValidationError::invalid_format("role", format!("unknown role '{}'", tag)))
    }
}

/// Set of roles held by one user. Empty means "no special access".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, role: Role) -> bool {
        self.0.insert(role)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }

    /// ADMIN or MODERATOR.
    pub fn is_staff(&self) -> bool {
        self.contains(Role::Admin) || self.contains(Role::Moderator)
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
