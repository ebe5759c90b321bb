/// Configuration management for the client state layer
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `TENANTFLOW_FUNCTIONS_URL`: Base URL of the mutation gateway (required)
/// - `TENANTFLOW_GATEWAY_TIMEOUT_MS`: Gateway request timeout (default: 10000)
/// - `TENANTFLOW_SETTLE_DELAY_MS`: Post-checkout settling delay (default: 800)
/// - `TENANTFLOW_SELECTION_PATH`: File path for the durable tenant selection
///   slot; when unset the selection only lives in memory
///
/// # Example
///
/// ```no_run
/// use tenantflow_core::config::ClientConfig;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = ClientConfig::from_env()?;
/// println!("Gateway at {}", config.gateway.base_url);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Complete client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Mutation gateway configuration
    pub gateway: GatewayConfig,

    /// Reconciliation timing
    pub reconcile: ReconcileConfig,

    /// Durable selection slot path, if file-backed persistence is wanted
    pub selection_path: Option<PathBuf>,
}

/// Mutation gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL the serverless procedures are invoked against
    pub base_url: String,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

/// Reconciliation timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Delay before re-reading the subscription after checkout returns
    ///
    /// The subscription is activated by an asynchronous backend webhook; this
    /// delay gives it time to land. Best effort, not a guarantee.
    pub settle_delay_ms: u64,
}

impl ClientConfig {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `TENANTFLOW_FUNCTIONS_URL` is missing or a numeric
    /// variable fails to parse.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let base_url = env::var("TENANTFLOW_FUNCTIONS_URL").map_err(|_| {
            anyhow::anyhow!("TENANTFLOW_FUNCTIONS_URL environment variable is required")
        })?;

        let timeout_ms = env::var("TENANTFLOW_GATEWAY_TIMEOUT_MS")
            .unwrap_or_else(|_| "10000".to_string())
            .parse::<u64>()?;

        let settle_delay_ms = env::var("TENANTFLOW_SETTLE_DELAY_MS")
            .unwrap_or_else(|_| "800".to_string())
            .parse::<u64>()?;

        let selection_path = env::var("TENANTFLOW_SELECTION_PATH").ok().map(PathBuf::from);

        Ok(Self {
            gateway: GatewayConfig {
                base_url,
                timeout_ms,
            },
            reconcile: ReconcileConfig { settle_delay_ms },
            selection_path,
        })
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        ReconcileConfig {
            settle_delay_ms: 800,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settle_delay() {
        assert_eq!(ReconcileConfig::default().settle_delay_ms, 800);
    }

    // Environment variables are process-global, so every from_env path runs
    // inside one test to keep the parallel test runner out of the way.
    #[test]
    fn test_from_env_paths() {
        env::set_var("TENANTFLOW_FUNCTIONS_URL", "https://project.supabase.co");
        env::remove_var("TENANTFLOW_GATEWAY_TIMEOUT_MS");
        env::remove_var("TENANTFLOW_SETTLE_DELAY_MS");
        env::remove_var("TENANTFLOW_SELECTION_PATH");

        // Defaults apply when only the required variable is set.
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.gateway.base_url, "https://project.supabase.co");
        assert_eq!(config.gateway.timeout_ms, 10_000);
        assert_eq!(config.reconcile.settle_delay_ms, 800);
        assert!(config.selection_path.is_none());

        // Explicit values win over defaults.
        env::set_var("TENANTFLOW_GATEWAY_TIMEOUT_MS", "2500");
        env::set_var("TENANTFLOW_SETTLE_DELAY_MS", "50");
        env::set_var("TENANTFLOW_SELECTION_PATH", "/var/lib/tenantflow/selection");
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.gateway.timeout_ms, 2500);
        assert_eq!(config.reconcile.settle_delay_ms, 50);
        assert_eq!(
            config.selection_path,
            Some(PathBuf::from("/var/lib/tenantflow/selection"))
        );

        // A non-numeric timeout is a parse error, not a silent default.
        env::set_var("TENANTFLOW_GATEWAY_TIMEOUT_MS", "soon");
        assert!(ClientConfig::from_env().is_err());
        env::set_var("TENANTFLOW_GATEWAY_TIMEOUT_MS", "2500");

        // The gateway URL has no default.
        env::remove_var("TENANTFLOW_FUNCTIONS_URL");
        let err = ClientConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("TENANTFLOW_FUNCTIONS_URL"));

        env::remove_var("TENANTFLOW_GATEWAY_TIMEOUT_MS");
        env::remove_var("TENANTFLOW_SETTLE_DELAY_MS");
        env::remove_var("TENANTFLOW_SELECTION_PATH");
    }

    #[test]
    fn test_manual_construction() {
        let config = ClientConfig {
            gateway: GatewayConfig {
                base_url: "https://project.supabase.co".to_string(),
                timeout_ms: 5000,
            },
            reconcile: ReconcileConfig::default(),
            selection_path: None,
        };

        assert_eq!(config.gateway.timeout_ms, 5000);
        assert!(config.selection_path.is_none());
    }
}
