//! Loyalty balance derived from the resolved principal.

use serde::{Deserialize, Serialize};

use super::User;

/// Points and streak reported by `GET /api/loyalty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoyaltySummary {
    /// Accumulated loyalty points.
    pub points: u32,
    /// Consecutive ordering streak.
    pub salad_streak: u32,
}

impl From<&User> for LoyaltySummary {
    fn from(user: &User) -> Self {
        Self {
            points: user.points,
            salad_streak: user.salad_streak,
        }
    }
}
