/// Checkout and cancellation flow
///
/// Drives the hosted checkout procedures under the current tenant context.
/// Both operations expect a redirect URL in the response: without one the
/// user agent has nowhere to go and the operation cannot be considered
/// complete, so its absence is an error in its own right.
///
/// Input violations (missing plan id, no selected tenant) fail before any
/// network activity. Execution failures are recorded on the billing store's
/// status **and** returned, because navigating on success is the caller's
/// responsibility and it must know synchronously whether to proceed.
///
/// # Post-checkout Reconciliation
///
/// The subscription is activated by an asynchronous backend webhook, so
/// `refresh_after_return` waits a fixed settling delay before re-reading.
/// Best effort only: callers must tolerate needing one extra manual
/// refresh.

use crate::error::{StoreError, StoreResult};
use crate::gateway::{MutationGateway, CANCEL_SUBSCRIPTION, CREATE_CHECKOUT_SESSION};
use crate::session::SessionProvider;
use crate::stores::billing::BillingStore;
use crate::stores::subscription::SubscriptionStore;
use crate::stores::tenant::TenantStore;
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// Orchestrator for checkout and subscription cancellation
pub struct CheckoutFlow {
    gateway: Arc<dyn MutationGateway>,
    session: Arc<dyn SessionProvider>,
    tenants: Arc<TenantStore>,
    billing: Arc<BillingStore>,
    subscription: Arc<SubscriptionStore>,
    settle_delay: Duration,
}

impl CheckoutFlow {
    /// Creates the flow with its injected capabilities
    pub fn new(
        gateway: Arc<dyn MutationGateway>,
        session: Arc<dyn SessionProvider>,
        tenants: Arc<TenantStore>,
        billing: Arc<BillingStore>,
        subscription: Arc<SubscriptionStore>,
        settle_delay: Duration,
    ) -> Self {
        CheckoutFlow {
            gateway,
            session,
            tenants,
            billing,
            subscription,
            settle_delay,
        }
    }

    /// Starts a hosted checkout for a plan
    ///
    /// Returns the redirect URL the caller must navigate to.
    pub async fn start_checkout(&self, plan_id: &str) -> StoreResult<String> {
        self.redirect_call(CREATE_CHECKOUT_SESSION, plan_id).await
    }

    /// Starts the cancellation flow for the current subscription
    ///
    /// Returns the redirect URL the caller must navigate to.
    pub async fn start_cancel(&self, plan_id: &str) -> StoreResult<String> {
        self.redirect_call(CANCEL_SUBSCRIPTION, plan_id).await
    }

    async fn redirect_call(&self, procedure: &str, plan_id: &str) -> StoreResult<String> {
        if plan_id.trim().is_empty() {
            return Err(StoreError::MissingInput("plan id"));
        }
        let tenant_id = self
            .tenants
            .current_tenant_id()
            .ok_or(StoreError::MissingInput("tenant id"))?;

        self.billing.begin_operation();
        tracing::info!(procedure, %tenant_id, plan_id, "starting billing procedure");

        let result = self
            .invoke(
                procedure,
                json!({ "tenant_id": tenant_id, "plan_id": plan_id }),
            )
            .await
            .and_then(|body| match body.get("url").and_then(|v| v.as_str()) {
                Some(url) => Ok(url.to_string()),
                None => Err(StoreError::MissingRedirect {
                    procedure: procedure.to_string(),
                }),
            });

        match &result {
            Ok(_) => self.billing.complete_operation(),
            Err(err) => {
                tracing::error!(procedure, error = %err, "billing procedure failed");
                self.billing.fail_operation(err.to_string());
            }
        }

        result
    }

    async fn invoke(&self, procedure: &str, payload: JsonValue) -> StoreResult<JsonValue> {
        let token = self.session.access_token().await?;
        Ok(self.gateway.invoke(procedure, payload, &token).await?)
    }

    /// Re-reads subscription state after the user returns from checkout
    ///
    /// Waits the configured settling delay so the backend webhook can land,
    /// then reloads the subscription and billing stores. No-op without a
    /// selected tenant.
    pub async fn refresh_after_return(&self) {
        if self.tenants.current_tenant_id().is_none() {
            return;
        }

        sleep(self.settle_delay).await;
        self.subscription.load().await;
        self.billing.load().await;
    }
}
