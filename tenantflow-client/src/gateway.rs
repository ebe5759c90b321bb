/// Mutation gateway for serverless procedures
///
/// Mutating operations (checkout, cancellation, member management) go through
/// named serverless procedures rather than direct data writes. The gateway
/// posts a JSON payload with a bearer credential and returns the JSON result;
/// any non-success response is surfaced as an error carrying the
/// server-supplied message when one is present.
///
/// # Endpoint Construction
///
/// `{base_url}/functions/v1/{procedure}`; the path segment is fixed by the
/// backend's function router.
///
/// # Example
///
/// ```no_run
/// use tenantflow_client::gateway::{HttpGateway, MutationGateway, CREATE_CHECKOUT_SESSION};
/// use tenantflow_core::config::GatewayConfig;
/// use serde_json::json;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = GatewayConfig {
///     base_url: "https://project.supabase.co".to_string(),
///     timeout_ms: 10_000,
/// };
/// let gateway = HttpGateway::new(&config)?;
///
/// let body = gateway
///     .invoke(
///         CREATE_CHECKOUT_SESSION,
///         json!({ "tenant_id": "t-1", "plan_id": "plan-pro" }),
///         "jwt-token",
///     )
///     .await?;
/// println!("redirect: {:?}", body.get("url"));
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tenantflow_core::config::GatewayConfig;
use uuid::Uuid;

/// Procedure name for starting a hosted checkout
pub const CREATE_CHECKOUT_SESSION: &str = "create-checkout-session";

/// Procedure name for cancelling a subscription
pub const CANCEL_SUBSCRIPTION: &str = "cancel-subscription";

/// Procedure name for changing a member's role
pub const MEMBER_UPDATE_ROLE: &str = "member-update-role";

/// Procedure name for removing a member
pub const MEMBER_REMOVE: &str = "member-remove";

/// Gateway error types
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The configured base URL is empty
    #[error("gateway base url is not configured")]
    BaseUrlMissing,

    /// The request never produced a response
    #[error("request to {procedure} failed: {message}")]
    Request {
        /// The procedure that was invoked
        procedure: String,
        /// Transport-level failure message
        message: String,
    },

    /// The procedure answered with a non-success status
    #[error("{procedure} failed: {message}")]
    Procedure {
        /// The procedure that was invoked
        procedure: String,
        /// Server-supplied message, or the raw response body
        message: String,
    },
}

/// Invokes named serverless procedures with a JSON payload
#[async_trait]
pub trait MutationGateway: Send + Sync {
    /// Invokes `procedure` with `payload` under the given bearer token
    async fn invoke(
        &self,
        procedure: &str,
        payload: JsonValue,
        token: &str,
    ) -> Result<JsonValue, GatewayError>;
}

/// HTTP implementation of the mutation gateway
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl HttpGateway {
    /// Creates a gateway from configuration
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::BaseUrlMissing` if the configured base URL is
    /// empty.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let trimmed = config.base_url.trim();
        if trimmed.is_empty() {
            return Err(GatewayError::BaseUrlMissing);
        }

        Ok(HttpGateway {
            base_url: trimmed.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(config.timeout_ms.max(250)),
            http: reqwest::Client::new(),
        })
    }

    /// Builds the endpoint URL for a procedure
    pub fn endpoint(&self, procedure: &str) -> String {
        format!("{}/functions/v1/{}", self.base_url, procedure.trim())
    }
}

#[async_trait]
impl MutationGateway for HttpGateway {
    async fn invoke(
        &self,
        procedure: &str,
        payload: JsonValue,
        token: &str,
    ) -> Result<JsonValue, GatewayError> {
        let response = self
            .http
            .post(self.endpoint(procedure))
            .header("x-request-id", format!("req_{}", Uuid::new_v4().simple()))
            .bearer_auth(token)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|err| GatewayError::Request {
                procedure: procedure.to_string(),
                message: err.to_string(),
            })?;

        let status = response.status();

        // An unparseable body is treated as empty rather than a hard error;
        // the status code decides success.
        let body: JsonValue = response
            .json()
            .await
            .unwrap_or_else(|_| JsonValue::Object(Default::default()));

        if !status.is_success() {
            let message =
                extract_error_message(&body).unwrap_or_else(|| body.to_string());
            tracing::warn!(procedure, status = %status, "gateway procedure failed");
            return Err(GatewayError::Procedure {
                procedure: procedure.to_string(),
                message,
            });
        }

        Ok(body)
    }
}

/// Pulls the server-supplied message out of an error response body
///
/// Checks `error` first, then `message`, matching the backend's function
/// error envelope.
pub fn extract_error_message(body: &JsonValue) -> Option<String> {
    body.get("error")
        .or_else(|| body.get("message"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}
