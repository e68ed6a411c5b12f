// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hosted authentication boundary.
//!
//! Sign-in, token lookup and sign-out are delegated to the hosted auth
//! service. [`MemoryAuth`] stands in for it during local development and
//! tests.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::backend::http::APPLICATION_NAME;
use crate::error::PersistenceError;

/// bcrypt cost for accounts held by [`MemoryAuth`].
const MEMORY_HASH_COST: u32 = 4;

/// Request timeout for auth calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// The identity behind an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// A signed-in session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: AuthUser,
}

/// Credential and token operations of the hosted auth service.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Signs in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::AuthFailed` if the credentials are rejected.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, PersistenceError>;

    /// Resolves the user behind an access token.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::AuthFailed` if the token is invalid or
    /// expired.
    async fn user(&self, access_token: &str) -> Result<AuthUser, PersistenceError>;

    /// Revokes an access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the auth service cannot be reached.
    async fn sign_out(&self, access_token: &str) -> Result<(), PersistenceError>;
}

/// Client for the hosted auth API.
#[derive(Debug, Clone)]
pub struct HostedAuth {
    client: Client,
    auth_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

impl HostedAuth {
    /// Creates a client for the project at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Transport` if the HTTP client cannot be
    /// built.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, PersistenceError> {
        let client: Client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(PersistenceError::from)?;

        Ok(Self {
            client,
            auth_url: format!("{}/auth/v1", base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
        })
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}/{path}", self.auth_url))
            .header("apikey", &self.api_key)
            .header("x-application-name", APPLICATION_NAME)
    }

    /// Maps 400/401/403/422 to `AuthFailed`, anything else non-2xx to
    /// `UnexpectedStatus`.
    async fn check(response: Response) -> Result<Response, PersistenceError> {
        let status: StatusCode = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: String = response.text().await.unwrap_or_default();
        match status {
            StatusCode::BAD_REQUEST
            | StatusCode::UNAUTHORIZED
            | StatusCode::FORBIDDEN
            | StatusCode::UNPROCESSABLE_ENTITY => {
                warn!(status = %status, "Auth service rejected the request");
                Err(PersistenceError::AuthFailed(String::from(
                    "invalid credentials or session",
                )))
            }
            _ => Err(PersistenceError::unexpected_status(status.as_u16(), &body)),
        }
    }
}

#[async_trait]
impl AuthGateway for HostedAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, PersistenceError> {
        debug!(email, "Signing in with password grant");
        let response: Response = self
            .post("token")
            .query(&[("grant_type", "password")])
            .json(&PasswordGrant { email, password })
            .send()
            .await?;
        let session: AuthSession = Self::check(response).await?.json().await?;
        info!(user_id = %session.user.id, "Signed in");
        Ok(session)
    }

    async fn user(&self, access_token: &str) -> Result<AuthUser, PersistenceError> {
        let response: Response = self
            .client
            .get(format!("{}/user", self.auth_url))
            .header("apikey", &self.api_key)
            .header("x-application-name", APPLICATION_NAME)
            .bearer_auth(access_token)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), PersistenceError> {
        let response: Response = self.post("logout").bearer_auth(access_token).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[derive(Debug)]
struct Account {
    password_hash: String,
    user: AuthUser,
}

/// In-process auth service for local development and tests.
#[derive(Debug, Default)]
pub struct MemoryAuth {
    accounts: RwLock<HashMap<String, Account>>,
    sessions: RwLock<HashMap<String, AuthUser>>,
    next_token: AtomicU64,
}

impl MemoryAuth {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account; the email is matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the password cannot be hashed.
    pub fn add_user(&self, id: &str, email: &str, password: &str) -> Result<(), PersistenceError> {
        let password_hash: String = bcrypt::hash(password, MEMORY_HASH_COST)
            .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

        self.accounts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                email.to_lowercase(),
                Account {
                    password_hash,
                    user: AuthUser {
                        id: id.to_string(),
                        email: Some(email.to_string()),
                    },
                },
            );
        Ok(())
    }

    /// Issues a session for `user` without checking credentials.
    #[must_use]
    pub fn issue_session(&self, user: AuthUser) -> AuthSession {
        let next: u64 = self.next_token.fetch_add(1, Ordering::Relaxed) + 1;
        let access_token: String = format!("memory-token-{next}");
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(access_token.clone(), user.clone());

        AuthSession {
            access_token,
            refresh_token: None,
            expires_in: None,
            user,
        }
    }
}

#[async_trait]
impl AuthGateway for MemoryAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, PersistenceError> {
        let candidate: Option<(String, AuthUser)> = self
            .accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&email.to_lowercase())
            .map(|account| (account.password_hash.clone(), account.user.clone()));

        let Some((password_hash, user)) = candidate else {
            return Err(PersistenceError::AuthFailed(String::from(
                "invalid credentials or session",
            )));
        };

        let verified: bool = bcrypt::verify(password, &password_hash)
            .map_err(|e| PersistenceError::Other(format!("Failed to verify password: {e}")))?;
        if !verified {
            return Err(PersistenceError::AuthFailed(String::from(
                "invalid credentials or session",
            )));
        }

        Ok(self.issue_session(user))
    }

    async fn user(&self, access_token: &str) -> Result<AuthUser, PersistenceError> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(access_token)
            .cloned()
            .ok_or_else(|| PersistenceError::AuthFailed(String::from("invalid or expired session")))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), PersistenceError> {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(access_token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_with_admin() -> MemoryAuth {
        let auth: MemoryAuth = MemoryAuth::new();
        auth.add_user("u-1", "Admin@M5.com", "segredo-forte").unwrap();
        auth
    }

    #[tokio::test]
    async fn test_sign_in_and_lookup() {
        let auth: MemoryAuth = auth_with_admin();

        let session: AuthSession = auth.sign_in("admin@m5.com", "segredo-forte").await.unwrap();
        let user: AuthUser = auth.user(&session.access_token).await.unwrap();

        assert_eq!(user.id, "u-1");
        assert_eq!(user.email.as_deref(), Some("Admin@M5.com"));
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let auth: MemoryAuth = auth_with_admin();

        let result = auth.sign_in("admin@m5.com", "errada").await;

        assert!(matches!(result, Err(PersistenceError::AuthFailed(_))));
    }

    #[tokio::test]
    async fn test_unknown_email_is_rejected() {
        let auth: MemoryAuth = auth_with_admin();
        let result = auth.sign_in("ninguem@m5.com", "segredo-forte").await;
        assert!(matches!(result, Err(PersistenceError::AuthFailed(_))));
    }

    #[tokio::test]
    async fn test_sign_out_invalidates_token() {
        let auth: MemoryAuth = auth_with_admin();
        let session: AuthSession = auth.sign_in("admin@m5.com", "segredo-forte").await.unwrap();

        auth.sign_out(&session.access_token).await.unwrap();

        assert!(auth.user(&session.access_token).await.is_err());
    }

    #[test]
    fn test_session_decodes_hosted_payload() {
        let payload: &str = r#"{
            "access_token": "jwt",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "r",
            "user": {"id": "abc", "email": "a@b.com", "role": "authenticated"}
        }"#;

        let session: AuthSession = serde_json::from_str(payload).unwrap();

        assert_eq!(session.user.id, "abc");
        assert_eq!(session.expires_in, Some(3600));
    }
}
