//! Tenant context store and dependent domain stores
//!
//! `TenantStore` owns the single authoritative tenant selection; every other
//! store here re-derives itself whenever that selection changes, following
//! the shared lifecycle protocol in `lifecycle`.

pub mod automations;
pub mod billing;
pub mod lifecycle;
pub mod subscription;
pub mod tenant;

pub use automations::AutomationsStore;
pub use billing::BillingStore;
pub use lifecycle::AsyncStatus;
pub use subscription::SubscriptionStore;
pub use tenant::TenantStore;
