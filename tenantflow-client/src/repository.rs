/// Remote repository capability
///
/// The data-query transport is an external collaborator: the stores describe
/// what they read, and the host application injects an implementation that
/// speaks whatever wire protocol its backend uses. All reads are scoped by
/// tenant id except the tenant listing itself (the caller's identity is
/// implied by the transport's credential) and the global plan catalog.
///
/// Absence of a row is a valid, non-error outcome: domain reads return
/// `Option` and map "no record" to `None` rather than an error.

use async_trait::async_trait;
use tenantflow_core::models::{AutomationRow, BillingRow, Plan, SubscriptionRecord, TenantItem};

/// Procedure name of the tenant-listing read
///
/// Must match the backend exactly for interoperability.
pub const GET_MY_TENANTS: &str = "get_my_tenants";

/// Procedure name of the automation dashboard read (takes a `tid` argument)
pub const DASHBOARD_AUTOMATIONS_FOR_TENANT: &str = "dashboard_automations_for_tenant";

/// Repository error types
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The transport failed (network, timeout, backend unavailable)
    #[error("repository transport error: {0}")]
    Transport(String),

    /// The backend answered with data the client could not decode
    #[error("repository returned malformed data: {0}")]
    Decode(String),
}

/// Read access to tenant-scoped data
#[async_trait]
pub trait RemoteRepository: Send + Sync {
    /// Lists the caller's tenant memberships via `get_my_tenants`
    ///
    /// The returned order is authoritative; callers must not re-sort it.
    async fn list_my_tenants(&self) -> Result<Vec<TenantItem>, RepositoryError>;

    /// Fetches the subscription record for a tenant, `None` if unsubscribed
    async fn subscription_for_tenant(
        &self,
        tenant_id: &str,
    ) -> Result<Option<SubscriptionRecord>, RepositoryError>;

    /// Fetches the billing projection for a tenant, `None` if unsubscribed
    async fn billing_row_for_tenant(
        &self,
        tenant_id: &str,
    ) -> Result<Option<BillingRow>, RepositoryError>;

    /// Lists the plan catalog ordered by ascending price
    async fn list_plans(&self) -> Result<Vec<Plan>, RepositoryError>;

    /// Lists a tenant's automations via `dashboard_automations_for_tenant`
    async fn automations_for_tenant(
        &self,
        tenant_id: &str,
    ) -> Result<Vec<AutomationRow>, RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_procedure_names_match_backend() {
        assert_eq!(GET_MY_TENANTS, "get_my_tenants");
        assert_eq!(
            DASHBOARD_AUTOMATIONS_FOR_TENANT,
            "dashboard_automations_for_tenant"
        );
    }

    #[test]
    fn test_error_display() {
        let err = RepositoryError::Transport("connection refused".to_string());
        assert_eq!(
            err.to_string(),
            "repository transport error: connection refused"
        );
    }
}
