/// Subscription record and derived billing state
///
/// The subscription row is tenant-scoped and fetched fresh on every tenant
/// switch. The cancellation sub-state mirrors the payment provider's model:
/// a subscription may be scheduled to end at a future date
/// (`cancel_at_period_end` with `cancel_at`) while still being usable.
///
/// All derived fields are pure functions of the record and are recomputed on
/// every access; nothing here is cached.
///
/// # Example
///
/// ```
/// use tenantflow_core::models::subscription::{SubscriptionRecord, SubscriptionStatus};
///
/// let sub = SubscriptionRecord {
///     status: SubscriptionStatus::Trialing,
///     plan_id: "plan-pro".to_string(),
///     plan_name: Some("Pro".to_string()),
///     current_period_end: Some("2030-02-01".to_string()),
///     price_cents: Some(2900),
///     cancel_at: Some("2030-01-01".to_string()),
///     cancel_at_period_end: true,
///     canceled_at: None,
/// };
///
/// assert!(sub.is_active());
/// assert!(sub.is_canceling());
/// assert_eq!(sub.ends_at(), Some("2030-01-01"));
/// ```

use serde::{Deserialize, Serialize};

/// Subscription status as reported by the billing backend
///
/// Statuses the client does not know about deserialize to `Unknown` instead
/// of failing the whole read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Paid and usable
    Active,

    /// In trial, usable
    Trialing,

    /// Payment failed, grace period
    PastDue,

    /// Terminated
    Canceled,

    /// Any status this client version does not recognize
    #[serde(other)]
    Unknown,
}

impl SubscriptionStatus {
    /// Converts status to its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Trialing => "trialing",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Canceled => "canceled",
            SubscriptionStatus::Unknown => "unknown",
        }
    }

    /// A subscription is usable while active or trialing
    pub fn is_active(&self) -> bool {
        matches!(self, SubscriptionStatus::Active | SubscriptionStatus::Trialing)
    }
}

/// Tenant-scoped subscription record
///
/// Replaced wholesale on every load; a tenant switch clears it before the
/// next fetch starts so the previous tenant's row is never visible under the
/// new tenant's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    /// Billing status
    pub status: SubscriptionStatus,

    /// Subscribed plan ID
    pub plan_id: String,

    /// Plan display name (joined from the plan catalog)
    #[serde(default)]
    pub plan_name: Option<String>,

    /// End of the current billing period (ISO 8601)
    #[serde(default)]
    pub current_period_end: Option<String>,

    /// Plan price in cents (joined from the plan catalog)
    #[serde(default)]
    pub price_cents: Option<i64>,

    /// Scheduled end date if a cancellation is pending (ISO 8601)
    #[serde(default)]
    pub cancel_at: Option<String>,

    /// Whether the subscription ends at the current period boundary
    #[serde(default)]
    pub cancel_at_period_end: bool,

    /// When the cancellation was requested (ISO 8601)
    #[serde(default)]
    pub canceled_at: Option<String>,
}

impl SubscriptionRecord {
    /// Whether the subscription is currently usable
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Whether a cancellation is scheduled but the subscription still runs
    pub fn is_canceling(&self) -> bool {
        self.cancel_at_period_end
    }

    /// The date the subscription stops being usable
    ///
    /// Prefers the scheduled cancellation date over the period end.
    pub fn ends_at(&self) -> Option<&str> {
        self.cancel_at
            .as_deref()
            .or(self.current_period_end.as_deref())
    }
}
