/// Error handling for stores and mutation orchestrators
///
/// This module provides the unified error type surfaced by store operations
/// and mutation orchestrators. Load operations never propagate errors out of
/// the store (failures are stringified onto the store's own status field);
/// mutation orchestrators both record the error on their owning store and
/// return it, since the caller must know synchronously whether to navigate.
///
/// # Taxonomy
///
/// - `MissingInput`: a required identifier is absent; fails before any
///   network activity
/// - `NotAuthenticated`: no active session when a credential is required
/// - `Repository`: a read against the remote repository failed
/// - `Gateway`: a serverless procedure returned a non-success response
/// - `MissingRedirect`: a checkout-style procedure succeeded but returned no
///   navigation target, so the operation cannot be considered complete
/// - `Forbidden`: the caller's role does not permit the operation client-side
///   (the server enforces authorization independently)

use crate::gateway::GatewayError;
use crate::repository::RepositoryError;
use crate::session::SessionError;

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Unified error type for store and orchestrator operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A required identifier was not supplied
    #[error("missing required input: {0}")]
    MissingInput(&'static str),

    /// No active session when a credential was required
    #[error("not signed in")]
    NotAuthenticated,

    /// A remote repository read failed
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// A mutation gateway call failed
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A successful mutation lacked its expected redirect target
    #[error("{procedure} returned no redirect url")]
    MissingRedirect {
        /// The procedure that was invoked
        procedure: String,
    },

    /// The caller's role does not permit the operation
    #[error("forbidden: {0}")]
    Forbidden(String),
}

impl From<SessionError> for StoreError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NoActiveSession => StoreError::NotAuthenticated,
        }
    }
}
