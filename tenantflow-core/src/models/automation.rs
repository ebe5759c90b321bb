/// Automation row model
///
/// Automations are tenant-scoped feature toggles: each row pairs a feature
/// automation with whether the tenant enabled it and whether the tenant's
/// plan allows it at all.

use serde::{Deserialize, Serialize};

/// One automation as returned by the dashboard query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationRow {
    /// Unique automation ID
    pub automation_id: String,

    /// Stable machine-readable code
    pub code: String,

    /// Display name
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Whether the tenant enabled this automation; `None` means never toggled
    #[serde(default)]
    pub is_enabled: Option<bool>,

    /// Whether the tenant's plan allows this automation
    pub allowed_by_plan: bool,
}

impl AutomationRow {
    /// Effectively on: enabled by the tenant and allowed by the plan
    pub fn is_effective(&self) -> bool {
        self.allowed_by_plan && self.is_enabled.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_requires_plan_and_toggle() {
        let json = serde_json::json!({
            "automation_id": "a-1",
            "code": "lead_followup",
            "name": "Lead follow-up",
            "is_enabled": true,
            "allowed_by_plan": false
        });

        let row: AutomationRow = serde_json::from_value(json).unwrap();
        assert!(!row.is_effective());
    }

    #[test]
    fn test_untoggled_defaults_off() {
        let json = serde_json::json!({
            "automation_id": "a-2",
            "code": "invoice_reminder",
            "name": "Invoice reminder",
            "allowed_by_plan": true
        });

        let row: AutomationRow = serde_json::from_value(json).unwrap();
        assert_eq!(row.is_enabled, None);
        assert!(!row.is_effective());
    }
}
