/// Billing store
///
/// Two records live here with separate lifecycles:
///
/// - the plan catalog, which is global and survives tenant switches
/// - the tenant's billing row (plan linkage plus payment-provider ids),
///   which follows the shared tenant-switch lifecycle
///
/// The checkout flow reports its loading/error status into the billing row's
/// status, exactly like a normal load cycle, so a UI watching this store sees
/// mutations and reads through one lens.

use crate::events::TenantSubscriber;
use crate::repository::RemoteRepository;
use crate::stores::lifecycle::{AsyncStatus, ScopedState};
use crate::stores::tenant::TenantStore;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tenantflow_core::models::{BillingRow, Plan};

/// Store for the plan catalog and the current tenant's billing row
pub struct BillingStore {
    repo: Arc<dyn RemoteRepository>,
    tenants: Arc<TenantStore>,
    plans: Mutex<ScopedState<Vec<Plan>>>,
    row: Mutex<ScopedState<Option<BillingRow>>>,
}

impl BillingStore {
    /// Creates the store with its injected capabilities
    pub fn new(repo: Arc<dyn RemoteRepository>, tenants: Arc<TenantStore>) -> Arc<Self> {
        Arc::new(BillingStore {
            repo,
            tenants,
            plans: Mutex::new(ScopedState::new()),
            row: Mutex::new(ScopedState::new()),
        })
    }

    /// Loads the plan catalog
    ///
    /// Not tenant-scoped; the catalog keeps repository order (ascending
    /// price).
    pub async fn fetch_plans(&self) {
        let token = { self.plans.lock().unwrap().begin_load() };
        tracing::debug!("loading plan catalog");

        let result = self.repo.list_plans().await;

        let mut plans = self.plans.lock().unwrap();
        match result {
            Ok(list) => {
                plans.finish_ok(token, list);
            }
            Err(err) => {
                tracing::warn!(error = %err, "plan catalog load failed");
                plans.finish_err(token, err.to_string());
            }
        }
    }

    /// Loads the billing row for the current tenant
    pub async fn load(&self) {
        let Some(tenant_id) = self.tenants.current_tenant_id() else {
            return;
        };

        let token = { self.row.lock().unwrap().begin_load() };
        tracing::debug!(%tenant_id, "loading billing row");

        let result = self.repo.billing_row_for_tenant(&tenant_id).await;

        let mut row = self.row.lock().unwrap();
        match result {
            Ok(record) => {
                if !row.finish_ok(token, record) {
                    tracing::debug!(%tenant_id, "discarding stale billing read");
                }
            }
            Err(err) => {
                tracing::warn!(%tenant_id, error = %err, "billing load failed");
                row.finish_err(token, err.to_string());
            }
        }
    }

    /// Returns to the construction-time state (logout)
    ///
    /// Unlike a tenant switch, this drops the plan catalog too.
    pub fn reset(&self) {
        self.plans.lock().unwrap().reset();
        self.row.lock().unwrap().reset();
    }

    /// The plan catalog, in repository order
    pub fn plans(&self) -> Vec<Plan> {
        self.plans.lock().unwrap().record.clone()
    }

    /// Plan catalog load status
    pub fn plans_status(&self) -> AsyncStatus {
        self.plans.lock().unwrap().status.clone()
    }

    /// The current tenant's billing row, if any
    pub fn row(&self) -> Option<BillingRow> {
        self.row.lock().unwrap().record.clone()
    }

    /// Billing row status; also reflects in-flight checkout mutations
    pub fn status(&self) -> AsyncStatus {
        self.row.lock().unwrap().status.clone()
    }

    /// Whether the billing row has been loaded for the current tenant
    pub fn is_loaded(&self) -> bool {
        self.row.lock().unwrap().loaded
    }

    /// Whether the subscription is usable (active or trialing)
    pub fn is_active(&self) -> bool {
        self.row
            .lock()
            .unwrap()
            .record
            .as_ref()
            .map(|r| r.is_active())
            .unwrap_or(false)
    }

    /// The currently subscribed plan id
    pub fn current_plan_id(&self) -> Option<String> {
        self.row
            .lock()
            .unwrap()
            .record
            .as_ref()
            .map(|r| r.plan_id.clone())
    }

    /// End of the current billing period
    pub fn current_period_end(&self) -> Option<String> {
        self.row
            .lock()
            .unwrap()
            .record
            .as_ref()
            .and_then(|r| r.current_period_end.clone())
    }

    /// Marks a mutation as started on this store's status
    pub(crate) fn begin_operation(&self) {
        self.row.lock().unwrap().status.begin();
    }

    /// Marks a mutation as completed
    pub(crate) fn complete_operation(&self) {
        self.row.lock().unwrap().status.succeed();
    }

    /// Marks a mutation as failed
    pub(crate) fn fail_operation(&self, message: impl Into<String>) {
        self.row.lock().unwrap().status.fail(message);
    }
}

#[async_trait]
impl TenantSubscriber for BillingStore {
    fn clear_for_switch(&self) {
        // The plan catalog is global; only the tenant-scoped row clears.
        self.row.lock().unwrap().clear_for_switch();
    }

    async fn reload(&self) {
        self.load().await;
    }
}
