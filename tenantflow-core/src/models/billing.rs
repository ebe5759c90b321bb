/// Plan catalog and billing projection models
///
/// The plan catalog is global (not tenant-scoped) and listed ordered by
/// ascending price by the repository. The billing row is the payment-provider
/// projection of a tenant's subscription: plan linkage plus the provider-side
/// customer/subscription identifiers the checkout flow needs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::subscription::SubscriptionStatus;

/// One purchasable plan from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Plan ID
    pub id: String,

    /// Display name
    pub name: String,

    /// Price in cents
    pub price_cents: i64,

    /// ISO 4217 currency code
    pub currency: String,

    /// Payment-provider price identifier, if billing is wired up
    #[serde(default)]
    pub stripe_price_id: Option<String>,

    /// When the plan was created
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Billing projection of a tenant's subscription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingRow {
    /// Owning tenant ID
    pub tenant_id: String,

    /// Subscribed plan ID
    pub plan_id: String,

    /// Billing status
    pub status: SubscriptionStatus,

    /// End of the current billing period (ISO 8601)
    #[serde(default)]
    pub current_period_end: Option<String>,

    /// Payment-provider customer identifier
    #[serde(default)]
    pub stripe_customer_id: Option<String>,

    /// Payment-provider subscription identifier
    #[serde(default)]
    pub stripe_subscription_id: Option<String>,
}

impl BillingRow {
    /// Whether the subscription is currently usable
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}
