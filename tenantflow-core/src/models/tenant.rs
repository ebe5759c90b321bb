/// Tenant membership model
///
/// A tenant is the organizational account scoping billing, membership, and
/// feature data. A user belongs to one or more tenants, each membership
/// carrying a role that gates what the client may attempt (the server
/// enforces authorization independently).
///
/// # Roles
///
/// - **owner**: Full control, including billing and member management
/// - **admin**: Can manage members, but not billing
/// - **member**: Regular access, no administration
///
/// # Example
///
/// ```
/// use tenantflow_core::models::tenant::{TenantItem, TenantRole};
///
/// let item = TenantItem {
///     tenant_id: "t-acme".to_string(),
///     tenant_name: "Acme Corp".to_string(),
///     role: TenantRole::Admin,
/// };
///
/// assert!(item.role.can_manage_members());
/// assert!(!item.role.can_manage_billing());
/// ```

use serde::{Deserialize, Serialize};

/// Membership role within a tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantRole {
    /// Full control: billing, member management
    Owner,

    /// Can manage members
    Admin,

    /// Regular access
    Member,
}

impl TenantRole {
    /// Converts role to its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantRole::Owner => "owner",
            TenantRole::Admin => "admin",
            TenantRole::Member => "member",
        }
    }

    /// Parses a role from its wire string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "owner" => Some(TenantRole::Owner),
            "admin" => Some(TenantRole::Admin),
            "member" => Some(TenantRole::Member),
            _ => None,
        }
    }

    /// Can change member roles or remove members
    pub fn can_manage_members(&self) -> bool {
        matches!(self, TenantRole::Owner | TenantRole::Admin)
    }

    /// Can start checkout or cancel the subscription
    pub fn can_manage_billing(&self) -> bool {
        matches!(self, TenantRole::Owner)
    }

    /// Checks if this role meets the required permission level
    ///
    /// Hierarchy: Owner > Admin > Member
    pub fn has_permission(&self, required: &TenantRole) -> bool {
        self.permission_level() >= required.permission_level()
    }

    fn permission_level(&self) -> u8 {
        match self {
            TenantRole::Owner => 3,
            TenantRole::Admin => 2,
            TenantRole::Member => 1,
        }
    }
}

/// One tenant membership as returned by the tenant-listing procedure
///
/// Entries are immutable between full list reloads; the list order returned
/// by the repository is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantItem {
    /// Unique tenant ID
    pub tenant_id: String,

    /// Organization/account display name
    pub tenant_name: String,

    /// The caller's role within this tenant
    pub role: TenantRole,
}
