/// Session context
///
/// One context is constructed per signed-in session from the injected
/// capabilities. It builds every store, registers the dependent stores on
/// the tenant store's selection bus exactly once, and exposes the mutation
/// orchestrators. Explicit dependency injection instead of ambient
/// singletons, so components can be tested in isolation.
///
/// # Lifecycle
///
/// ```text
/// SessionContext::new()      wire stores + subscriptions
///   └─> start()              load tenant list, restore + resolve selection,
///                            dependent stores load through the bus
///   └─> tenants.set_current_tenant(id)
///                            clear-then-load propagation to every dependent
///   └─> reset()              logout: every store back to construction state
/// ```

use crate::gateway::MutationGateway;
use crate::mutations::{CheckoutFlow, MemberAdmin};
use crate::repository::RemoteRepository;
use crate::selection::SelectionSlot;
use crate::session::SessionProvider;
use crate::stores::{AutomationsStore, BillingStore, SubscriptionStore, TenantStore};
use std::sync::Arc;
use std::time::Duration;
use tenantflow_core::config::ClientConfig;

/// All tenant-scoped state for one signed-in session
pub struct SessionContext {
    /// Tenant memberships and the current selection
    pub tenants: Arc<TenantStore>,

    /// Current tenant's subscription
    pub subscription: Arc<SubscriptionStore>,

    /// Current tenant's automations
    pub automations: Arc<AutomationsStore>,

    /// Plan catalog and the current tenant's billing row
    pub billing: Arc<BillingStore>,

    /// Checkout and cancellation flow
    pub checkout: CheckoutFlow,

    /// Member administration
    pub members: MemberAdmin,
}

impl SessionContext {
    /// Wires up a session from its injected capabilities
    pub fn new(
        repo: Arc<dyn RemoteRepository>,
        session: Arc<dyn SessionProvider>,
        gateway: Arc<dyn MutationGateway>,
        slot: Arc<dyn SelectionSlot>,
        config: &ClientConfig,
    ) -> Self {
        let tenants = TenantStore::new(repo.clone(), slot);
        let subscription = SubscriptionStore::new(repo.clone(), tenants.clone());
        let automations = AutomationsStore::new(repo.clone(), tenants.clone());
        let billing = BillingStore::new(repo, tenants.clone());

        // Subscribed once for the life of the session; store resets never
        // detach them.
        tenants.subscribe(subscription.clone());
        tenants.subscribe(automations.clone());
        tenants.subscribe(billing.clone());

        let checkout = CheckoutFlow::new(
            gateway.clone(),
            session.clone(),
            tenants.clone(),
            billing.clone(),
            subscription.clone(),
            Duration::from_millis(config.reconcile.settle_delay_ms),
        );
        let members = MemberAdmin::new(gateway, session, tenants.clone());

        SessionContext {
            tenants,
            subscription,
            automations,
            billing,
            checkout,
            members,
        }
    }

    /// Cold start: load the tenant list and let resolution fan out
    ///
    /// The persisted selection is restored inside resolution, before any
    /// dependent store is allowed to load.
    pub async fn start(&self) {
        self.tenants.load_tenants().await;
    }

    /// Logout: every store back to its construction-time state
    pub fn reset(&self) {
        self.tenants.reset();
        self.subscription.reset();
        self.automations.reset();
        self.billing.reset();
        self.members.reset();
    }
}
