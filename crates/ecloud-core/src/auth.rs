//! Token issuance against the Identity service.
//!
//! Authentication exchanges credentials for a short-lived token and a
//! service catalog. The issuance request itself is the one request that
//! must not carry whatever token the client already holds. On success the
//! provider returns the new token in the `X-Subject-Token` response header
//! and the catalog in the body; token, tenant ID, and catalog-discovered
//! endpoint URLs are committed to the client atomically.

use crate::client::Client;
use crate::endpoint::{CatalogService, ServiceKind};
use crate::error::{Error, Result};
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Response header carrying the newly issued token.
pub const SUBJECT_TOKEN_HEADER: &str = "x-subject-token";

/// Request body for token issuance.
#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest {
    /// Identity and scope for the authentication.
    pub auth: AuthBody,
}

/// Identity and scope for authentication.
#[derive(Debug, Clone, Serialize)]
pub struct AuthBody {
    /// The authentication method and credentials.
    pub identity: AuthIdentity,
    /// The project scope, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<AuthScope>,
}

/// The authentication method.
#[derive(Debug, Clone, Serialize)]
pub struct AuthIdentity {
    /// Methods in use; always `["password"]` here.
    pub methods: Vec<String>,
    /// Password credentials.
    pub password: AuthPassword,
}

/// Password credential container.
#[derive(Debug, Clone, Serialize)]
pub struct AuthPassword {
    /// The authenticating user.
    pub user: AuthUser,
}

/// User identification for password authentication.
#[derive(Debug, Clone, Serialize)]
pub struct AuthUser {
    /// User ID; mutually exclusive with `name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// User name; mutually exclusive with `id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The password.
    pub password: String,
}

/// Project scope for the issued token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthScope {
    /// The scoped project.
    pub project: AuthProject,
}

/// Project identification within the scope.
#[derive(Debug, Clone, Serialize)]
pub struct AuthProject {
    /// Project ID; mutually exclusive with `name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Project name; mutually exclusive with `id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The token returned by authentication.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Token {
    /// Audit IDs.
    #[serde(default)]
    pub audit_ids: Vec<String>,
    /// Service catalog used to seed endpoint URLs.
    #[serde(default)]
    pub catalog: Vec<CatalogService>,
    /// Expiry timestamp.
    #[serde(default)]
    pub expires_at: String,
    /// Issuance timestamp.
    #[serde(default)]
    pub issued_at: String,
    /// Authentication methods that produced this token.
    #[serde(default)]
    pub methods: Vec<String>,
    /// The scoped project.
    #[serde(default)]
    pub project: TokenProject,
    /// Roles held by the token.
    #[serde(default)]
    pub roles: Vec<Role>,
    /// The authenticated user.
    #[serde(default)]
    pub user: TokenUser,
}

/// Project info embedded in a token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenProject {
    /// Owning domain.
    #[serde(default)]
    pub domain: DomainRef,
    /// Project ID.
    #[serde(default)]
    pub id: String,
    /// Project name.
    #[serde(default)]
    pub name: String,
}

/// Reference to an identity domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainRef {
    /// Domain ID.
    #[serde(default)]
    pub id: String,
    /// Domain name.
    #[serde(default)]
    pub name: String,
}

/// User info embedded in a token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUser {
    /// Owning domain.
    #[serde(default)]
    pub domain: DomainRef,
    /// User ID.
    #[serde(default)]
    pub id: String,
    /// User name.
    #[serde(default)]
    pub name: String,
    /// Password expiry timestamp, if set.
    #[serde(default)]
    pub password_expires_at: Option<String>,
}

/// A role attached to a token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Role {
    /// Role ID.
    #[serde(default)]
    pub id: String,
    /// Role name.
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    token: Token,
}

impl AuthRequest {
    fn password(user: AuthUser, project: AuthProject) -> Self {
        Self {
            auth: AuthBody {
                identity: AuthIdentity {
                    methods: vec!["password".to_string()],
                    password: AuthPassword { user },
                },
                scope: Some(AuthScope { project }),
            },
        }
    }
}

impl Client {
    /// Authenticate with a user ID, scoped to a project by ID. On success
    /// the client's token, tenant ID, and unpinned endpoint URLs are
    /// updated atomically; on failure no state changes.
    pub async fn authenticate(&self, user_id: &str, password: &str, tenant_id: &str) -> Result<Token> {
        let request = AuthRequest::password(
            AuthUser {
                id: Some(user_id.to_string()),
                name: None,
                password: password.to_string(),
            },
            AuthProject {
                id: Some(tenant_id.to_string()),
                name: None,
            },
        );
        self.issue_token(&request, tenant_id).await
    }

    /// Authenticate with a user name, scoped to a project by name. The
    /// tenant ID is taken from the token body's project.
    pub async fn authenticate_by_name(
        &self,
        user_name: &str,
        password: &str,
        tenant_name: &str,
    ) -> Result<Token> {
        let request = AuthRequest::password(
            AuthUser {
                id: None,
                name: Some(user_name.to_string()),
                password: password.to_string(),
            },
            AuthProject {
                id: None,
                name: Some(tenant_name.to_string()),
            },
        );
        self.issue_token(&request, "").await
    }

    async fn issue_token(&self, request: &AuthRequest, tenant_id: &str) -> Result<Token> {
        let url = format!("{}/auth/tokens", self.endpoint(ServiceKind::Identity));
        let payload = Bytes::from(serde_json::to_vec(request).map_err(Error::Encode)?);

        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        // with_token = false: the issuance request never carries a
        // previously held token.
        let response = self.execute(Method::POST, &url, Some(payload), headers, false).await?;

        let subject_token = response
            .headers
            .get(SUBJECT_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let decoded = if response.body.is_empty() {
            TokenResponse::default()
        } else {
            serde_json::from_slice::<TokenResponse>(&response.body).map_err(Error::Decode)?
        };

        let tenant = if tenant_id.is_empty() {
            decoded.token.project.id.clone()
        } else {
            tenant_id.to_string()
        };
        self.apply_auth_success(subject_token, tenant, &decoded.token.catalog);

        Ok(decoded.token)
    }
}
