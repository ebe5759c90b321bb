//! Domain models for tenant-scoped state
//!
//! Every record here is replaced wholesale when its store reloads; nothing is
//! partially patched, so a record never mixes fields from two tenants.

pub mod automation;
pub mod billing;
pub mod subscription;
pub mod tenant;

pub use automation::AutomationRow;
pub use billing::{BillingRow, Plan};
pub use subscription::{SubscriptionRecord, SubscriptionStatus};
pub use tenant::{TenantItem, TenantRole};
