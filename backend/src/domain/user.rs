//! User accounts as seen by the ordering core.
//!
//! Registration lives outside this service; the core only reads users to
//! resolve the request principal and to report loyalty balances.

use serde::{Deserialize, Serialize};

use super::UserId;

/// Access role stored on every user record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular customer placing orders.
    #[default]
    Customer,
    /// Staff member allowed to advance orders through the kitchen.
    Admin,
}

impl Role {
    /// Stored string form of the role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
        }
    }

    /// Parse the stored string form.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "customer" => Some(Self::Customer),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// Authenticated principal and loyalty holder.
///
/// `points` and `salad_streak` are never negative; the store enforces the
/// same constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Record identifier.
    pub id: UserId,
    /// Unique login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Default delivery address, if any.
    pub address: Option<String>,
    /// Accumulated loyalty points.
    pub points: u32,
    /// Consecutive ordering streak.
    pub salad_streak: u32,
    /// Access role.
    pub role: Role,
}

impl User {
    /// Whether the user may perform administrative commands.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
