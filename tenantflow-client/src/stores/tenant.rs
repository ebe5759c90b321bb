/// Tenant context store
///
/// Owns the list of tenants the user belongs to and the single authoritative
/// "current tenant" selection, the root of the synchronization graph. Every
/// dependent domain store reacts to selection changes published on this
/// store's bus; nothing else in the client may change the selection.
///
/// # Selection Resolution
///
/// After every successful list load, the selection is resolved once:
/// restore the persisted id if it appears in the fresh list, otherwise keep
/// the in-memory selection if it is still a member, otherwise fall back to
/// the first tenant in repository order, otherwise (empty list) leave the
/// selection unset. Resolution can only ever pick an id present in the list,
/// which keeps the selection invariant without a separate validation pass.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use tenantflow_client::selection::MemorySlot;
/// use tenantflow_client::stores::TenantStore;
///
/// # async fn example(repo: Arc<dyn tenantflow_client::repository::RemoteRepository>) {
/// let store = TenantStore::new(repo, Arc::new(MemorySlot::new()));
/// store.load_tenants().await;
///
/// if let Some(tenant) = store.current_tenant() {
///     println!("operating as {} ({})", tenant.tenant_name, tenant.role.as_str());
/// }
/// # }
/// ```

use crate::error::{StoreError, StoreResult};
use crate::events::{SelectionBus, SelectionChange, TenantSubscriber};
use crate::repository::RemoteRepository;
use crate::selection::SelectionSlot;
use crate::stores::lifecycle::AsyncStatus;
use std::sync::{Arc, Mutex};
use tenantflow_core::models::{TenantItem, TenantRole};

#[derive(Debug, Default)]
struct TenantState {
    tenants: Vec<TenantItem>,
    current_tenant_id: Option<String>,
    is_loaded: bool,
    status: AsyncStatus,
}

/// Store for tenant memberships and the current tenant selection
pub struct TenantStore {
    repo: Arc<dyn RemoteRepository>,
    slot: Arc<dyn SelectionSlot>,
    bus: SelectionBus,
    state: Mutex<TenantState>,
}

impl TenantStore {
    /// Creates the store with its injected capabilities
    pub fn new(repo: Arc<dyn RemoteRepository>, slot: Arc<dyn SelectionSlot>) -> Arc<Self> {
        Arc::new(TenantStore {
            repo,
            slot,
            bus: SelectionBus::new(),
            state: Mutex::new(TenantState::default()),
        })
    }

    /// Registers a dependent store on the selection bus
    ///
    /// Called once per store at session-context construction.
    pub fn subscribe(&self, subscriber: Arc<dyn TenantSubscriber>) {
        self.bus.subscribe(subscriber);
    }

    /// Loads the caller's tenant memberships and resolves the selection
    ///
    /// On success the list is replaced atomically and the resolved selection
    /// change (if any) is published to dependent stores. On repository
    /// failure the error is recorded and any prior selection stays untouched.
    pub async fn load_tenants(&self) {
        {
            self.state.lock().unwrap().status.begin();
        }

        match self.repo.list_my_tenants().await {
            Ok(tenants) => {
                let change = {
                    let mut state = self.state.lock().unwrap();
                    let previous = state.current_tenant_id.clone();

                    state.tenants = tenants;
                    state.is_loaded = true;
                    state.status.succeed();

                    let resolved = self.resolve_selection(&state.tenants, previous.as_deref());
                    state.current_tenant_id = resolved.clone();

                    tracing::info!(
                        tenant_count = state.tenants.len(),
                        selected = ?resolved,
                        "tenant list loaded"
                    );

                    if resolved != previous {
                        Some(resolved)
                    } else {
                        None
                    }
                };

                if let Some(tenant_id) = change {
                    // A dropped selection clears the slot too, so the durable
                    // state never disagrees with the in-memory selection.
                    let persisted = match &tenant_id {
                        Some(id) => self.slot.set(id),
                        None => self.slot.clear(),
                    };
                    if let Err(err) = persisted {
                        tracing::warn!(error = %err, "failed to persist tenant selection");
                    }
                    self.bus.publish(SelectionChange { tenant_id }).await;
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "tenant list load failed");
                self.state.lock().unwrap().status.fail(err.to_string());
            }
        }
    }

    /// Picks the selection for a freshly loaded list
    ///
    /// Restores the persisted id when it is still a member of the list, then
    /// keeps a still-valid in-memory selection, then falls back to the first
    /// tenant in repository order, else nothing.
    fn resolve_selection(&self, tenants: &[TenantItem], previous: Option<&str>) -> Option<String> {
        let member = |id: &str| tenants.iter().any(|t| t.tenant_id == id);

        if let Some(saved) = self.slot.get() {
            if member(&saved) {
                return Some(saved);
            }
            tracing::debug!(%saved, "persisted tenant no longer in list, falling back");
        }

        if let Some(prev) = previous {
            if member(prev) {
                return Some(prev.to_string());
            }
        }

        tenants.first().map(|t| t.tenant_id.clone())
    }

    /// Switches the current tenant
    ///
    /// Persists the selection durably and publishes the change; dependent
    /// stores clear and reload through the bus, never directly from here.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::MissingInput` for an empty id.
    pub async fn set_current_tenant(&self, tenant_id: &str) -> StoreResult<()> {
        if tenant_id.trim().is_empty() {
            return Err(StoreError::MissingInput("tenant id"));
        }

        {
            let mut state = self.state.lock().unwrap();
            state.current_tenant_id = Some(tenant_id.to_string());
        }

        if let Err(err) = self.slot.set(tenant_id) {
            tracing::warn!(tenant_id, error = %err, "failed to persist tenant selection");
        }

        self.bus
            .publish(SelectionChange {
                tenant_id: Some(tenant_id.to_string()),
            })
            .await;

        Ok(())
    }

    /// Returns the store to its construction-time state (logout)
    ///
    /// Clears the list, selection, loaded flag, status, and the durable
    /// slot. Dependent stores are reset by the session context, not through
    /// the bus.
    pub fn reset(&self) {
        {
            let mut state = self.state.lock().unwrap();
            *state = TenantState::default();
        }

        if let Err(err) = self.slot.clear() {
            tracing::warn!(error = %err, "failed to clear persisted tenant selection");
        }
    }

    /// The currently selected tenant id
    pub fn current_tenant_id(&self) -> Option<String> {
        self.state.lock().unwrap().current_tenant_id.clone()
    }

    /// The currently selected tenant, `None` if unset or not in the list
    pub fn current_tenant(&self) -> Option<TenantItem> {
        let state = self.state.lock().unwrap();
        let id = state.current_tenant_id.as_deref()?;
        state.tenants.iter().find(|t| t.tenant_id == id).cloned()
    }

    /// The caller's role within the current tenant
    pub fn current_role(&self) -> Option<TenantRole> {
        self.current_tenant().map(|t| t.role)
    }

    /// The current tenant list, in repository order
    pub fn tenants(&self) -> Vec<TenantItem> {
        self.state.lock().unwrap().tenants.clone()
    }

    /// Whether the list has been loaded at least once
    pub fn is_loaded(&self) -> bool {
        self.state.lock().unwrap().is_loaded
    }

    /// Current load status
    pub fn status(&self) -> AsyncStatus {
        self.state.lock().unwrap().status.clone()
    }
}
