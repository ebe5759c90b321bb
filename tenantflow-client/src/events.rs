/// Selection change bus
///
/// The tenant context store is the root of the synchronization graph: when
/// the current tenant changes, every dependent domain store must discard its
/// record and re-derive itself. Rather than an implicit reactive graph, the
/// propagation is an explicit publish/subscribe step with a hard ordering
/// guarantee:
///
/// 1. `clear_for_switch()` runs synchronously on **every** subscriber before
///    the first suspension point, so no observer can see one tenant's stale
///    record next to another tenant's selection, even momentarily.
/// 2. Only then are the reloads awaited, one subscriber at a time.
///
/// Subscribers register once at session-context construction and stay
/// registered for the life of the session; `reset()` on a store never touches
/// its subscription.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// A change to the current tenant selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    /// The newly selected tenant, `None` when the selection was dropped
    pub tenant_id: Option<String>,
}

/// A store that re-derives itself from the current tenant
#[async_trait]
pub trait TenantSubscriber: Send + Sync {
    /// Synchronously drops the previous tenant's record
    ///
    /// Must not suspend: the bus relies on every clear completing before any
    /// reload starts. Implementations also bump their generation counter here
    /// so in-flight reads from before the switch are discarded on completion.
    fn clear_for_switch(&self);

    /// Reloads the store for the (already switched) current tenant
    ///
    /// Never propagates errors; failures land in the store's own status.
    async fn reload(&self);
}

/// Publishes selection changes to registered stores
#[derive(Default)]
pub struct SelectionBus {
    subscribers: Mutex<Vec<Arc<dyn TenantSubscriber>>>,
}

impl SelectionBus {
    /// Creates an empty bus
    pub fn new() -> Self {
        SelectionBus::default()
    }

    /// Registers a subscriber; called once per store at construction
    pub fn subscribe(&self, subscriber: Arc<dyn TenantSubscriber>) {
        self.subscribers.lock().unwrap().push(subscriber);
    }

    /// Publishes a selection change: clear everything, then reload
    pub async fn publish(&self, change: SelectionChange) {
        let subscribers: Vec<_> = self.subscribers.lock().unwrap().clone();

        tracing::info!(tenant_id = ?change.tenant_id, "tenant selection changed");

        // All clears happen before the first await below.
        for subscriber in &subscribers {
            subscriber.clear_for_switch();
        }

        if change.tenant_id.is_some() {
            for subscriber in &subscribers {
                subscriber.reload().await;
            }
        }
    }
}
