/// Automations store
///
/// Holds the current tenant's feature automations and follows the shared
/// tenant-switch lifecycle. The rows come from the dashboard query, which
/// pairs each automation with its per-tenant toggle and plan allowance.

use crate::events::TenantSubscriber;
use crate::repository::RemoteRepository;
use crate::stores::lifecycle::{AsyncStatus, ScopedState};
use crate::stores::tenant::TenantStore;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tenantflow_core::models::AutomationRow;

/// Store for the current tenant's automations
pub struct AutomationsStore {
    repo: Arc<dyn RemoteRepository>,
    tenants: Arc<TenantStore>,
    state: Mutex<ScopedState<Vec<AutomationRow>>>,
}

impl AutomationsStore {
    /// Creates the store with its injected capabilities
    pub fn new(repo: Arc<dyn RemoteRepository>, tenants: Arc<TenantStore>) -> Arc<Self> {
        Arc::new(AutomationsStore {
            repo,
            tenants,
            state: Mutex::new(ScopedState::new()),
        })
    }

    /// Loads the automations for the current tenant
    ///
    /// Same discipline as every dependent store: no-op without a selection,
    /// wholesale replacement on success, stale in-flight reads discarded.
    pub async fn load(&self) {
        let Some(tenant_id) = self.tenants.current_tenant_id() else {
            return;
        };

        let token = { self.state.lock().unwrap().begin_load() };
        tracing::debug!(%tenant_id, "loading automations");

        let result = self.repo.automations_for_tenant(&tenant_id).await;

        let mut state = self.state.lock().unwrap();
        match result {
            Ok(rows) => {
                if !state.finish_ok(token, rows) {
                    tracing::debug!(%tenant_id, "discarding stale automations read");
                }
            }
            Err(err) => {
                tracing::warn!(%tenant_id, error = %err, "automations load failed");
                state.finish_err(token, err.to_string());
            }
        }
    }

    /// Returns to the construction-time state (logout)
    pub fn reset(&self) {
        self.state.lock().unwrap().reset();
    }

    /// The current tenant's automations
    pub fn automations(&self) -> Vec<AutomationRow> {
        self.state.lock().unwrap().record.clone()
    }

    /// Current load status
    pub fn status(&self) -> AsyncStatus {
        self.state.lock().unwrap().status.clone()
    }
}

#[async_trait]
impl TenantSubscriber for AutomationsStore {
    fn clear_for_switch(&self) {
        self.state.lock().unwrap().clear_for_switch();
    }

    async fn reload(&self) {
        self.load().await;
    }
}
