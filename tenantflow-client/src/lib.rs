//! # Tenantflow Client
//!
//! This crate implements the tenant-scoped synchronization core: a set of
//! domain stores kept consistent as the user switches between tenant
//! organizations, plus the orchestrators that drive mutating operations
//! (checkout, cancellation, member management) through a remote function-call
//! boundary.
//!
//! ## Modules
//!
//! - `repository`, `session`, `gateway`, `selection`: capability seams the
//!   host application injects (data reads, credentials, serverless
//!   procedures, durable selection persistence)
//! - `stores`: the tenant context store and its dependent domain stores
//! - `events`: the selection change bus wiring stores together
//! - `mutations`: checkout/cancel and member-administration orchestrators
//! - `context`: one-per-session wiring of everything above
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tenantflow_client::context::SessionContext;
//! use tenantflow_client::gateway::HttpGateway;
//! use tenantflow_client::selection::MemorySlot;
//! use tenantflow_core::config::ClientConfig;
//!
//! # async fn example(
//! #     repo: Arc<dyn tenantflow_client::repository::RemoteRepository>,
//! #     session: Arc<dyn tenantflow_client::session::SessionProvider>,
//! # ) -> anyhow::Result<()> {
//! let config = ClientConfig::from_env()?;
//! let gateway = Arc::new(HttpGateway::new(&config.gateway)?);
//! let slot = Arc::new(MemorySlot::new());
//!
//! let ctx = SessionContext::new(repo, session, gateway, slot, &config);
//! ctx.start().await;
//!
//! if let Some(tenant) = ctx.tenants.current_tenant() {
//!     println!("operating as {}", tenant.tenant_name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod error;
pub mod events;
pub mod gateway;
pub mod mutations;
pub mod repository;
pub mod selection;
pub mod session;
pub mod stores;

pub use error::StoreError;
