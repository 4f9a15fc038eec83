//! Asynchronous Identity service client for resource management.
//!
//! Token issuance lives on the core [`Client`] (`authenticate` /
//! `authenticate_by_name`); this client covers the identity resources
//! beneath it.

use crate::models::{Credential, CreateRoleOpts, CreateSubUserOpts, RoleDetail, SubUser};
use crate::Result;
use ecloud_core::envelope::Named;
use ecloud_core::{Client, ServiceKind};
use reqwest::Method;
use std::collections::HashMap;

/// Client for the Identity service family's resource operations.
#[derive(Clone)]
pub struct IdentityClient {
    core: Client,
}

impl IdentityClient {
    /// Create an identity client sharing the given core client.
    #[must_use]
    pub fn new(core: &Client) -> Self {
        Self { core: core.clone() }
    }

    fn base(&self) -> String {
        self.core.endpoint(ServiceKind::Identity)
    }

    // ------------------------------------------------------------
    // EC2-style credentials
    // ------------------------------------------------------------

    /// List a user's credentials.
    pub async fn list_credentials(&self, user_id: &str) -> Result<Vec<Credential>> {
        let url = format!("{}/users/{user_id}/credentials/OS-EC2", self.base());
        self.core.fetch_resource(&url, "credentials").await
    }

    /// Create a credential for a user.
    pub async fn create_credential(&self, user_id: &str, tenant_id: &str) -> Result<Credential> {
        let url = format!("{}/users/{user_id}/credentials/OS-EC2", self.base());
        let mut body = HashMap::new();
        body.insert("tenant_id", tenant_id);
        self.core
            .send_resource(Method::POST, &url, Some(&body), "credential")
            .await
    }

    /// Fetch one credential.
    pub async fn get_credential(&self, user_id: &str, credential_id: &str) -> Result<Credential> {
        let url = format!("{}/users/{user_id}/credentials/OS-EC2/{credential_id}", self.base());
        self.core.fetch_resource(&url, "credential").await
    }

    /// Delete a credential.
    pub async fn delete_credential(&self, user_id: &str, credential_id: &str) -> Result<()> {
        let url = format!("{}/users/{user_id}/credentials/OS-EC2/{credential_id}", self.base());
        self.core.send_discard::<()>(Method::DELETE, &url, None).await
    }

    // ------------------------------------------------------------
    // Sub-users
    // ------------------------------------------------------------

    /// List sub-users.
    pub async fn list_sub_users(&self) -> Result<Vec<SubUser>> {
        let url = format!("{}/sub-users", self.base());
        self.core.fetch_resource(&url, "users").await
    }

    /// Create a sub-user with the given roles.
    pub async fn create_sub_user(&self, password: &str, roles: &[String]) -> Result<SubUser> {
        let url = format!("{}/sub-users", self.base());
        let opts = CreateSubUserOpts { password, roles };
        self.core
            .send_resource(Method::POST, &url, Some(&Named::new("user", &opts)), "user")
            .await
    }

    /// Fetch a sub-user.
    pub async fn get_sub_user(&self, sub_user_id: &str) -> Result<SubUser> {
        let url = format!("{}/sub-users/{sub_user_id}", self.base());
        self.core.fetch_resource(&url, "user").await
    }

    /// Update a sub-user's password.
    pub async fn update_sub_user(&self, sub_user_id: &str, password: &str) -> Result<SubUser> {
        let url = format!("{}/sub-users/{sub_user_id}", self.base());
        let mut fields = HashMap::new();
        fields.insert("password", password);
        self.core
            .send_resource(Method::PUT, &url, Some(&Named::new("user", &fields)), "user")
            .await
    }

    /// Delete a sub-user.
    pub async fn delete_sub_user(&self, sub_user_id: &str) -> Result<()> {
        let url = format!("{}/sub-users/{sub_user_id}", self.base());
        self.core.send_discard::<()>(Method::DELETE, &url, None).await
    }

    /// Assign roles to a sub-user.
    pub async fn assign_roles_to_sub_user(
        &self,
        sub_user_id: &str,
        role_ids: &[String],
    ) -> Result<SubUser> {
        let url = format!("{}/sub-users/{sub_user_id}/assign", self.base());
        self.core
            .send_resource(Method::POST, &url, Some(&Named::new("roles", &role_ids)), "user")
            .await
    }

    /// Remove roles from a sub-user.
    pub async fn unassign_roles_from_sub_user(
        &self,
        sub_user_id: &str,
        role_ids: &[String],
    ) -> Result<SubUser> {
        let url = format!("{}/sub-users/{sub_user_id}/unassign", self.base());
        self.core
            .send_resource(Method::POST, &url, Some(&Named::new("roles", &role_ids)), "user")
            .await
    }

    // ------------------------------------------------------------
    // Roles
    // ------------------------------------------------------------

    /// List roles.
    pub async fn list_roles(&self) -> Result<Vec<RoleDetail>> {
        let url = format!("{}/sub-users/roles", self.base());
        self.core.fetch_resource(&url, "roles").await
    }

    /// Create a role with permissions.
    pub async fn create_role(&self, name: &str, permissions: &[String]) -> Result<RoleDetail> {
        let url = format!("{}/sub-users/roles", self.base());
        let opts = CreateRoleOpts { name, permissions };
        self.core
            .send_resource(Method::POST, &url, Some(&Named::new("role", &opts)), "role")
            .await
    }

    /// Fetch a role.
    pub async fn get_role(&self, role_id: &str) -> Result<RoleDetail> {
        let url = format!("{}/sub-users/roles/{role_id}", self.base());
        self.core.fetch_resource(&url, "role").await
    }

    /// Rename a role.
    pub async fn update_role(&self, role_id: &str, name: &str) -> Result<RoleDetail> {
        let url = format!("{}/sub-users/roles/{role_id}", self.base());
        let mut fields = HashMap::new();
        fields.insert("name", name);
        self.core
            .send_resource(Method::PUT, &url, Some(&Named::new("role", &fields)), "role")
            .await
    }

    /// Delete a role.
    pub async fn delete_role(&self, role_id: &str) -> Result<()> {
        let url = format!("{}/sub-users/roles/{role_id}", self.base());
        self.core.send_discard::<()>(Method::DELETE, &url, None).await
    }

    // ------------------------------------------------------------
    // Permissions
    // ------------------------------------------------------------

    /// List all available permissions.
    pub async fn list_permissions(&self) -> Result<Vec<String>> {
        let url = format!("{}/permissions", self.base());
        self.core.fetch_resource(&url, "permissions").await
    }

    /// Grant permissions to a role.
    pub async fn assign_permissions_to_role(
        &self,
        role_id: &str,
        permissions: &[String],
    ) -> Result<RoleDetail> {
        let url = format!("{}/sub-users/roles/{role_id}/assign", self.base());
        self.core
            .send_resource(Method::POST, &url, Some(&Named::new("permissions", &permissions)), "role")
            .await
    }

    /// Revoke permissions from a role.
    pub async fn unassign_permissions_from_role(
        &self,
        role_id: &str,
        permissions: &[String],
    ) -> Result<RoleDetail> {
        let url = format!("{}/sub-users/roles/{role_id}/unassign", self.base());
        self.core
            .send_resource(Method::POST, &url, Some(&Named::new("permissions", &permissions)), "role")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> IdentityClient {
        let core = Client::builder().identity_url(server.uri()).build();
        core.set_token("test-token");
        IdentityClient::new(&core)
    }

    #[tokio::test]
    async fn list_credentials_unwraps_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/users/user-1/credentials/OS-EC2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "credentials": [
                    {"user_id": "user-1", "access": "AK", "secret": "SK", "trust_id": null}
                ]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let credentials = client.list_credentials("user-1").await.unwrap();
        assert_eq!(credentials.len(), 1);
        assert_eq!(credentials[0].access, "AK");
    }

    #[tokio::test]
    async fn create_credential_posts_bare_tenant_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/users/user-1/credentials/OS-EC2"))
            .and(body_json(json!({"tenant_id": "tenant-1"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "credential": {"user_id": "user-1", "access": "AK2", "secret": "SK2", "trust_id": null}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let credential = client.create_credential("user-1", "tenant-1").await.unwrap();
        assert_eq!(credential.access, "AK2");
    }

    #[tokio::test]
    async fn create_sub_user_wraps_user_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/sub-users"))
            .and(body_json(json!({
                "user": {"password": "s3cret!", "roles": ["role-1"]}
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "user": {"id": "sub-1", "name": "generated-name", "roles": [{"id": "role-1", "name": "observer"}]}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let sub_user = client.create_sub_user("s3cret!", &["role-1".into()]).await.unwrap();
        assert_eq!(sub_user.id, "sub-1");
        assert_eq!(sub_user.roles[0].name, "observer");
    }

    #[tokio::test]
    async fn assign_roles_posts_bare_list_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/sub-users/sub-1/assign"))
            .and(body_json(json!({"roles": ["role-2"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": {"id": "sub-1", "roles": [{"id": "role-2", "name": "admin"}]}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let sub_user = client
            .assign_roles_to_sub_user("sub-1", &["role-2".into()])
            .await
            .unwrap();
        assert_eq!(sub_user.roles[0].id, "role-2");
    }

    #[tokio::test]
    async fn list_permissions_returns_plain_strings() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/permissions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "permissions": ["compute:read", "compute:write"]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let permissions = client.list_permissions().await.unwrap();
        assert_eq!(permissions, vec!["compute:read", "compute:write"]);
    }
}
