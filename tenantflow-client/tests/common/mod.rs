//! Common test doubles for integration tests
//!
//! This module provides shared infrastructure for integration tests:
//! - A scriptable mock repository with per-tenant rows, failure injection,
//!   call counting, and response gating for race tests
//! - A mock gateway recording every invocation
//! - A mock session provider
//! - A harness wiring everything into a `SessionContext`

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use tenantflow_client::context::SessionContext;
use tenantflow_client::gateway::{GatewayError, MutationGateway};
use tenantflow_client::repository::{RemoteRepository, RepositoryError};
use tenantflow_client::selection::{MemorySlot, SelectionSlot};
use tenantflow_client::session::{SessionError, SessionProvider};
use tenantflow_core::config::{ClientConfig, GatewayConfig, ReconcileConfig};
use tenantflow_core::models::{
    AutomationRow, BillingRow, Plan, SubscriptionRecord, SubscriptionStatus, TenantItem,
    TenantRole,
};

/// Builds a tenant list entry
pub fn tenant(id: &str, name: &str, role: TenantRole) -> TenantItem {
    TenantItem {
        tenant_id: id.to_string(),
        tenant_name: name.to_string(),
        role,
    }
}

/// Builds a minimal subscription record
pub fn subscription(plan_id: &str, status: SubscriptionStatus) -> SubscriptionRecord {
    SubscriptionRecord {
        status,
        plan_id: plan_id.to_string(),
        plan_name: None,
        current_period_end: Some("2030-02-01".to_string()),
        price_cents: None,
        cancel_at: None,
        cancel_at_period_end: false,
        canceled_at: None,
    }
}

/// Builds a catalog plan
pub fn plan(id: &str, name: &str, price_cents: i64) -> Plan {
    Plan {
        id: id.to_string(),
        name: name.to_string(),
        price_cents,
        currency: "usd".to_string(),
        stripe_price_id: None,
        created_at: None,
    }
}

/// Builds a minimal billing row
pub fn billing_row(tenant_id: &str, plan_id: &str) -> BillingRow {
    BillingRow {
        tenant_id: tenant_id.to_string(),
        plan_id: plan_id.to_string(),
        status: SubscriptionStatus::Active,
        current_period_end: Some("2030-02-01".to_string()),
        stripe_customer_id: None,
        stripe_subscription_id: None,
    }
}

/// Scriptable in-memory repository
#[derive(Default)]
pub struct MockRepository {
    pub tenants: Mutex<Vec<TenantItem>>,
    pub subscriptions: Mutex<HashMap<String, SubscriptionRecord>>,
    pub billing_rows: Mutex<HashMap<String, BillingRow>>,
    pub plans: Mutex<Vec<Plan>>,
    pub automations: Mutex<HashMap<String, Vec<AutomationRow>>>,

    pub fail_tenants: AtomicBool,
    pub fail_subscriptions: AtomicBool,

    pub tenant_calls: AtomicUsize,
    pub subscription_calls: AtomicUsize,
    pub billing_calls: AtomicUsize,

    held_subscriptions: Mutex<HashSet<String>>,
    released: Notify,
}

impl MockRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(MockRepository::default())
    }

    pub fn set_tenants(&self, tenants: Vec<TenantItem>) {
        *self.tenants.lock().unwrap() = tenants;
    }

    pub fn set_subscription(&self, tenant_id: &str, record: SubscriptionRecord) {
        self.subscriptions
            .lock()
            .unwrap()
            .insert(tenant_id.to_string(), record);
    }

    pub fn set_billing_row(&self, tenant_id: &str, row: BillingRow) {
        self.billing_rows
            .lock()
            .unwrap()
            .insert(tenant_id.to_string(), row);
    }

    pub fn set_plans(&self, plans: Vec<Plan>) {
        *self.plans.lock().unwrap() = plans;
    }

    pub fn set_automations(&self, tenant_id: &str, rows: Vec<AutomationRow>) {
        self.automations
            .lock()
            .unwrap()
            .insert(tenant_id.to_string(), rows);
    }

    /// Gates subscription reads for a tenant until `release_subscriptions`
    pub fn hold_subscription(&self, tenant_id: &str) {
        self.held_subscriptions
            .lock()
            .unwrap()
            .insert(tenant_id.to_string());
    }

    /// Lets every gated subscription read complete
    pub fn release_subscriptions(&self) {
        self.held_subscriptions.lock().unwrap().clear();
        self.released.notify_waiters();
    }
}

#[async_trait]
impl RemoteRepository for MockRepository {
    async fn list_my_tenants(&self) -> Result<Vec<TenantItem>, RepositoryError> {
        self.tenant_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_tenants.load(Ordering::SeqCst) {
            return Err(RepositoryError::Transport("tenant list unavailable".to_string()));
        }
        Ok(self.tenants.lock().unwrap().clone())
    }

    async fn subscription_for_tenant(
        &self,
        tenant_id: &str,
    ) -> Result<Option<SubscriptionRecord>, RepositoryError> {
        self.subscription_calls.fetch_add(1, Ordering::SeqCst);

        loop {
            let notified = self.released.notified();
            if !self.held_subscriptions.lock().unwrap().contains(tenant_id) {
                break;
            }
            notified.await;
        }

        if self.fail_subscriptions.load(Ordering::SeqCst) {
            return Err(RepositoryError::Transport("subscription read failed".to_string()));
        }
        Ok(self.subscriptions.lock().unwrap().get(tenant_id).cloned())
    }

    async fn billing_row_for_tenant(
        &self,
        tenant_id: &str,
    ) -> Result<Option<BillingRow>, RepositoryError> {
        self.billing_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.billing_rows.lock().unwrap().get(tenant_id).cloned())
    }

    async fn list_plans(&self) -> Result<Vec<Plan>, RepositoryError> {
        Ok(self.plans.lock().unwrap().clone())
    }

    async fn automations_for_tenant(
        &self,
        tenant_id: &str,
    ) -> Result<Vec<AutomationRow>, RepositoryError> {
        Ok(self
            .automations
            .lock()
            .unwrap()
            .get(tenant_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Gateway double recording every invocation
#[derive(Default)]
pub struct MockGateway {
    pub invocations: Mutex<Vec<(String, JsonValue)>>,
    pub responses: Mutex<HashMap<String, JsonValue>>,
    pub failures: Mutex<HashMap<String, String>>,
}

impl MockGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(MockGateway::default())
    }

    pub fn respond(&self, procedure: &str, body: JsonValue) {
        self.responses
            .lock()
            .unwrap()
            .insert(procedure.to_string(), body);
    }

    pub fn fail(&self, procedure: &str, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(procedure.to_string(), message.to_string());
    }

    pub fn call_count(&self) -> usize {
        self.invocations.lock().unwrap().len()
    }

    pub fn last_invocation(&self) -> Option<(String, JsonValue)> {
        self.invocations.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl MutationGateway for MockGateway {
    async fn invoke(
        &self,
        procedure: &str,
        payload: JsonValue,
        _token: &str,
    ) -> Result<JsonValue, GatewayError> {
        self.invocations
            .lock()
            .unwrap()
            .push((procedure.to_string(), payload));

        if let Some(message) = self.failures.lock().unwrap().get(procedure) {
            return Err(GatewayError::Procedure {
                procedure: procedure.to_string(),
                message: message.clone(),
            });
        }

        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(procedure)
            .cloned()
            .unwrap_or_else(|| json!({})))
    }
}

/// Session double with a switchable token
pub struct MockSession {
    pub token: Mutex<Option<String>>,
}

impl MockSession {
    pub fn signed_in() -> Arc<Self> {
        Arc::new(MockSession {
            token: Mutex::new(Some("jwt-test-token".to_string())),
        })
    }

    pub fn signed_out() -> Arc<Self> {
        Arc::new(MockSession {
            token: Mutex::new(None),
        })
    }
}

#[async_trait]
impl SessionProvider for MockSession {
    async fn access_token(&self) -> Result<String, SessionError> {
        self.token
            .lock()
            .unwrap()
            .clone()
            .ok_or(SessionError::NoActiveSession)
    }
}

/// Everything a test needs, wired into one session context
pub struct Harness {
    pub repo: Arc<MockRepository>,
    pub gateway: Arc<MockGateway>,
    pub session: Arc<MockSession>,
    pub slot: Arc<MemorySlot>,
    pub ctx: SessionContext,
}

impl Harness {
    /// Builds a context over the given tenant list with a short settle delay
    pub fn new(tenants: Vec<TenantItem>) -> Self {
        let repo = MockRepository::new();
        repo.set_tenants(tenants);
        let gateway = MockGateway::new();
        let session = MockSession::signed_in();
        let slot = Arc::new(MemorySlot::new());

        let config = ClientConfig {
            gateway: GatewayConfig {
                base_url: "https://gateway.test".to_string(),
                timeout_ms: 1000,
            },
            reconcile: ReconcileConfig { settle_delay_ms: 5 },
            selection_path: None,
        };

        let ctx = SessionContext::new(
            repo.clone(),
            session.clone(),
            gateway.clone(),
            slot.clone(),
            &config,
        );

        Harness {
            repo,
            gateway,
            session,
            slot,
            ctx,
        }
    }

    /// Reads the persisted selection slot
    pub fn persisted_selection(&self) -> Option<String> {
        self.slot.get()
    }
}
