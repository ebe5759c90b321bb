/// Member administration
///
/// Role changes and removals go through the member procedures under the
/// current tenant context. Unlike the checkout flow these return an opaque
/// success payload with no redirect. Member administration keeps its own
/// status so an in-flight role change never masquerades as a tenant-list
/// load.
///
/// The caller's role is checked client-side before any network call; the
/// server enforces authorization independently, this just fails the obvious
/// cases fast.

use crate::error::{StoreError, StoreResult};
use crate::gateway::{MutationGateway, MEMBER_REMOVE, MEMBER_UPDATE_ROLE};
use crate::session::SessionProvider;
use crate::stores::lifecycle::AsyncStatus;
use crate::stores::tenant::TenantStore;
use serde_json::{json, Value as JsonValue};
use std::sync::{Arc, Mutex};
use tenantflow_core::models::TenantRole;

/// Orchestrator for member role changes and removals
pub struct MemberAdmin {
    gateway: Arc<dyn MutationGateway>,
    session: Arc<dyn SessionProvider>,
    tenants: Arc<TenantStore>,
    status: Mutex<AsyncStatus>,
}

impl MemberAdmin {
    /// Creates the orchestrator with its injected capabilities
    pub fn new(
        gateway: Arc<dyn MutationGateway>,
        session: Arc<dyn SessionProvider>,
        tenants: Arc<TenantStore>,
    ) -> Self {
        MemberAdmin {
            gateway,
            session,
            tenants,
            status: Mutex::new(AsyncStatus::idle()),
        }
    }

    /// Changes a member's role within the current tenant
    pub async fn update_role(&self, user_id: &str, role: TenantRole) -> StoreResult<JsonValue> {
        self.member_call(MEMBER_UPDATE_ROLE, user_id, Some(role))
            .await
    }

    /// Removes a member from the current tenant
    pub async fn remove(&self, user_id: &str) -> StoreResult<JsonValue> {
        self.member_call(MEMBER_REMOVE, user_id, None).await
    }

    async fn member_call(
        &self,
        procedure: &str,
        user_id: &str,
        role: Option<TenantRole>,
    ) -> StoreResult<JsonValue> {
        if user_id.trim().is_empty() {
            return Err(StoreError::MissingInput("user id"));
        }
        let tenant_id = self
            .tenants
            .current_tenant_id()
            .ok_or(StoreError::MissingInput("tenant id"))?;

        let caller_role = self.tenants.current_role();
        if !caller_role.map(|r| r.can_manage_members()).unwrap_or(false) {
            return Err(StoreError::Forbidden(
                "member management requires an owner or admin role".to_string(),
            ));
        }

        // Member procedures use camelCase payload keys, unlike billing.
        let mut payload = json!({ "tenantId": tenant_id, "userId": user_id });
        if let Some(role) = role {
            payload["role"] = json!(role.as_str());
        }

        self.status.lock().unwrap().begin();
        tracing::info!(procedure, %tenant_id, user_id, "starting member procedure");

        let result = async {
            let token = self.session.access_token().await?;
            Ok::<_, StoreError>(self.gateway.invoke(procedure, payload, &token).await?)
        }
        .await;

        let mut status = self.status.lock().unwrap();
        match &result {
            Ok(_) => status.succeed(),
            Err(err) => {
                tracing::error!(procedure, error = %err, "member procedure failed");
                status.fail(err.to_string());
            }
        }

        result
    }

    /// Current mutation status
    pub fn status(&self) -> AsyncStatus {
        self.status.lock().unwrap().clone()
    }

    /// Returns to the construction-time state (logout)
    pub fn reset(&self) {
        *self.status.lock().unwrap() = AsyncStatus::idle();
    }
}
