/// Session credential capability
///
/// The authentication subsystem is an external collaborator: the stores only
/// need a bearer token on demand. The host application injects an
/// implementation at construction; tests inject a scriptable mock.

use async_trait::async_trait;

/// Session error types
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No user is signed in
    #[error("no active session")]
    NoActiveSession,
}

/// Supplies a bearer credential for authenticated remote calls
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Returns the current session's access token
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSession` if no user is signed in.
    async fn access_token(&self) -> Result<String, SessionError>;
}

/// Session provider backed by a fixed token
///
/// Useful for service contexts and tests where the token is known up front.
#[derive(Debug, Clone)]
pub struct StaticSession {
    token: String,
}

impl StaticSession {
    /// Creates a provider that always returns the given token
    pub fn new(token: impl Into<String>) -> Self {
        StaticSession {
            token: token.into(),
        }
    }
}

#[async_trait]
impl SessionProvider for StaticSession {
    async fn access_token(&self) -> Result<String, SessionError> {
        if self.token.is_empty() {
            return Err(SessionError::NoActiveSession);
        }
        Ok(self.token.clone())
    }
}
