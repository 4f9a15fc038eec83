//! Identity data models: credentials, sub-users, roles, and permissions.

use serde::{Deserialize, Serialize};

/// An EC2-style API credential (access/secret key pair).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credential {
    /// Owning user ID.
    #[serde(default)]
    pub user_id: String,
    /// Owning project ID.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project_id: String,
    /// Owning tenant ID.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tenant_id: String,
    /// Access key.
    pub access: String,
    /// Secret key.
    pub secret: String,
    /// Trust ID, when delegated.
    #[serde(default)]
    pub trust_id: Option<String>,
}

/// A sub-user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubUser {
    /// Sub-user ID.
    pub id: String,
    /// Sub-user name.
    #[serde(default)]
    pub name: String,
    /// Roles held by the sub-user.
    #[serde(default)]
    pub roles: Vec<Role>,
}

/// A role reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    /// Role ID.
    pub id: String,
    /// Role name.
    #[serde(default)]
    pub name: String,
}

/// A role with its permissions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleDetail {
    /// Role ID.
    pub id: String,
    /// Role name.
    #[serde(default)]
    pub name: String,
    /// Role visibility.
    #[serde(default)]
    pub visibility: String,
    /// Permissions granted by the role.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
}

/// Request payload for creating a sub-user.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateSubUserOpts<'a> {
    pub password: &'a str,
    pub roles: &'a [String],
}

/// Request payload for creating a role.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateRoleOpts<'a> {
    pub name: &'a str,
    pub permissions: &'a [String],
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn credential_parses_nullable_trust() {
        let credential: Credential = serde_json::from_value(json!({
            "user_id": "user-1",
            "project_id": "proj-1",
            "access": "AKIA...",
            "secret": "secret",
            "trust_id": null
        }))
        .unwrap();

        assert_eq!(credential.access, "AKIA...");
        assert!(credential.trust_id.is_none());
    }

    #[test]
    fn role_detail_skips_empty_permissions() {
        let role = RoleDetail {
            id: "role-1".into(),
            name: "observer".into(),
            visibility: "public".into(),
            permissions: vec![],
        };
        let value = serde_json::to_value(&role).unwrap();
        assert!(value.get("permissions").is_none());
    }
}
