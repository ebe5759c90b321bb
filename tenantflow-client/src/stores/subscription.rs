/// Subscription store
///
/// Holds the current tenant's subscription record with its cancellation
/// sub-state. Re-derives itself on every tenant switch via the selection bus
/// and exposes the derived billing views as pure functions of the record.

use crate::events::TenantSubscriber;
use crate::repository::RemoteRepository;
use crate::stores::lifecycle::{AsyncStatus, ScopedState};
use crate::stores::tenant::TenantStore;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tenantflow_core::models::SubscriptionRecord;

/// Store for the current tenant's subscription
pub struct SubscriptionStore {
    repo: Arc<dyn RemoteRepository>,
    tenants: Arc<TenantStore>,
    state: Mutex<ScopedState<Option<SubscriptionRecord>>>,
}

impl SubscriptionStore {
    /// Creates the store with its injected capabilities
    pub fn new(repo: Arc<dyn RemoteRepository>, tenants: Arc<TenantStore>) -> Arc<Self> {
        Arc::new(SubscriptionStore {
            repo,
            tenants,
            state: Mutex::new(ScopedState::new()),
        })
    }

    /// Loads the subscription for the current tenant
    ///
    /// No-op when no tenant is selected. Exactly one tenant-scoped read is
    /// issued; the response is discarded if a tenant switch happened while it
    /// was in flight. On failure the previous record stays visible and the
    /// error lands on the status.
    pub async fn load(&self) {
        let Some(tenant_id) = self.tenants.current_tenant_id() else {
            return;
        };

        let token = { self.state.lock().unwrap().begin_load() };
        tracing::debug!(%tenant_id, "loading subscription");

        let result = self.repo.subscription_for_tenant(&tenant_id).await;

        let mut state = self.state.lock().unwrap();
        match result {
            Ok(record) => {
                if !state.finish_ok(token, record) {
                    tracing::debug!(%tenant_id, "discarding stale subscription read");
                }
            }
            Err(err) => {
                tracing::warn!(%tenant_id, error = %err, "subscription load failed");
                state.finish_err(token, err.to_string());
            }
        }
    }

    /// Returns to the construction-time state (logout)
    pub fn reset(&self) {
        self.state.lock().unwrap().reset();
    }

    /// The current subscription record, if any
    pub fn record(&self) -> Option<SubscriptionRecord> {
        self.state.lock().unwrap().record.clone()
    }

    /// Current load status
    pub fn status(&self) -> AsyncStatus {
        self.state.lock().unwrap().status.clone()
    }

    /// Whether the subscription is usable (active or trialing)
    pub fn is_active(&self) -> bool {
        self.state
            .lock()
            .unwrap()
            .record
            .as_ref()
            .map(|r| r.is_active())
            .unwrap_or(false)
    }

    /// Whether a cancellation is scheduled but the subscription still runs
    pub fn is_canceling(&self) -> bool {
        self.state
            .lock()
            .unwrap()
            .record
            .as_ref()
            .map(|r| r.is_canceling())
            .unwrap_or(false)
    }

    /// The date the subscription stops being usable
    pub fn ends_at(&self) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .record
            .as_ref()
            .and_then(|r| r.ends_at().map(|s| s.to_string()))
    }
}

#[async_trait]
impl TenantSubscriber for SubscriptionStore {
    fn clear_for_switch(&self) {
        self.state.lock().unwrap().clear_for_switch();
    }

    async fn reload(&self) {
        self.load().await;
    }
}
