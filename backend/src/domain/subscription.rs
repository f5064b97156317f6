//! Recurring salad delivery subscriptions.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{SubscriptionId, UserId};

/// Smallest number of salads a cycle may contain.
pub const SALADS_PER_CYCLE_MIN: u8 = 1;
/// Largest number of salads a cycle may contain.
pub const SALADS_PER_CYCLE_MAX: u8 = 21;
/// Days between creation and the first delivery.
pub const FIRST_DELIVERY_DAYS: i64 = 7;

/// Billing plan of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    /// Billed weekly.
    Weekly,
    /// Billed monthly.
    Monthly,
}

impl Plan {
    /// Stored string form of the plan.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Parse the stored string form.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for subscription input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubscriptionValidationError {
    /// Plan is not `weekly` or `monthly`.
    #[error("plan must be one of weekly, monthly")]
    UnknownPlan {
        /// Plan as sent by the client.
        value: String,
    },
    /// Count outside the accepted range.
    #[error("salads_per_cycle must be between {SALADS_PER_CYCLE_MIN} and {SALADS_PER_CYCLE_MAX}")]
    SaladsPerCycleOutOfRange {
        /// Count as sent by the client.
        value: i64,
    },
}

/// Number of salads delivered per cycle, within `1..=21`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct SaladsPerCycle(u8);

impl SaladsPerCycle {
    /// Validate a raw count.
    ///
    /// # Examples
    /// ```
    /// use salad_backend::domain::SaladsPerCycle;
    ///
    /// assert_eq!(SaladsPerCycle::new(5).map(|n| n.get()), Ok(5));
    /// assert!(SaladsPerCycle::new(0).is_err());
    /// ```
    pub fn new(value: i64) -> Result<Self, SubscriptionValidationError> {
        u8::try_from(value)
            .ok()
            .filter(|n| (SALADS_PER_CYCLE_MIN..=SALADS_PER_CYCLE_MAX).contains(n))
            .map(Self)
            .ok_or(SubscriptionValidationError::SaladsPerCycleOutOfRange { value })
    }

    /// The validated count.
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for SaladsPerCycle {
    type Error = SubscriptionValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SaladsPerCycle> for u8 {
    fn from(value: SaladsPerCycle) -> Self {
        value.0
    }
}

/// Persisted subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Record identifier.
    pub id: SubscriptionId,
    /// Owning user.
    pub user_id: UserId,
    /// Billing plan.
    pub plan: Plan,
    /// Salads delivered per cycle.
    pub salads_per_cycle: SaladsPerCycle,
    /// Whether deliveries are still scheduled.
    pub active: bool,
    /// Next scheduled delivery.
    pub next_delivery: DateTime<Utc>,
    /// Creation time.
    pub created: DateTime<Utc>,
}

/// Subscription ready to be inserted; the store assigns `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscription {
    /// Owning user.
    pub user_id: UserId,
    /// Billing plan.
    pub plan: Plan,
    /// Salads delivered per cycle.
    pub salads_per_cycle: SaladsPerCycle,
    /// Always `true` on creation.
    pub active: bool,
    /// `created` plus seven days.
    pub next_delivery: DateTime<Utc>,
    /// Creation time.
    pub created: DateTime<Utc>,
}

impl NewSubscription {
    /// Build an active subscription whose first delivery is a week after
    /// `created`, whatever the plan.
    pub fn starting_at(
        user_id: UserId,
        plan: Plan,
        salads_per_cycle: SaladsPerCycle,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            plan,
            salads_per_cycle,
            active: true,
            next_delivery: created + Duration::days(FIRST_DELIVERY_DAYS),
            created,
        }
    }
}
