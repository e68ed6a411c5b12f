// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use m5_max_persistence::{
    AuthGateway, AuthSession, AuthUser, PersistenceError, ProfileRow, Query, RemoteStore,
    decode_rows, tables,
};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::AuthError;

/// Staff roles stored on the profile row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    /// Full access to the admin area.
    Admin,
    /// Any other role the profile table carries.
    Other(String),
}

impl Role {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Other(role) => role,
        }
    }
}

impl FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed: &str = s.trim();
        if trimmed.eq_ignore_ascii_case("admin") {
            Ok(Self::Admin)
        } else {
            Ok(Self::Other(trimmed.to_string()))
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A signed-in staff member, joined with their profile when one exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The auth service's user identifier.
    pub id: String,
    pub email: Option<String>,
    /// Display name from the profile.
    pub name: Option<String>,
    /// `None` when the profile is missing or could not be read.
    pub role: Option<Role>,
}

impl AuthenticatedActor {
    /// Builds an actor from the session user alone, without a role.
    #[must_use]
    pub fn from_user(user: &AuthUser) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: None,
            role: None,
        }
    }

    /// Joins the session user with a profile row.
    #[must_use]
    pub fn with_profile(user: &AuthUser, profile: ProfileRow) -> Self {
        Self {
            id: user.id.clone(),
            email: profile.email.or_else(|| user.email.clone()),
            name: profile.nome,
            role: profile
                .role
                .filter(|role| !role.trim().is_empty())
                .and_then(|role| role.parse().ok()),
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}

/// Authorization service for the admin area.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that the actor holds the admin role.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` for any other role or no role.
    pub fn require_admin(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        if actor.is_admin() {
            return Ok(());
        }
        debug!(actor_id = %actor.id, role = ?actor.role, "Admin role required");
        Err(AuthError::Unauthorized {
            action: String::from("admin_area"),
            required_role: String::from("admin"),
        })
    }
}

/// Session handling on top of the hosted auth service.
#[derive(Clone)]
pub struct AuthenticationService {
    gateway: Arc<dyn AuthGateway>,
    store: Arc<dyn RemoteStore>,
}

impl AuthenticationService {
    #[must_use]
    pub fn new(gateway: Arc<dyn AuthGateway>, store: Arc<dyn RemoteStore>) -> Self {
        Self { gateway, store }
    }

    /// Signs in and resolves the actor behind the new session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if the credentials are
    /// rejected or the auth service fails.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(AuthSession, AuthenticatedActor), AuthError> {
        let session: AuthSession = self
            .gateway
            .sign_in(email, password)
            .await
            .map_err(Self::map_persistence_error)?;
        let actor: AuthenticatedActor = self
            .join_profile(&session.user, &session.access_token)
            .await;

        info!(actor_id = %actor.id, role = ?actor.role, "Staff member signed in");
        Ok((session, actor))
    }

    /// Resolves the actor behind an access token.
    ///
    /// The session user is joined with its `usuarios` profile. A missing
    /// profile, or a failure reading it, yields the session user without a
    /// role rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if the token is invalid.
    pub async fn resolve_session(&self, access_token: &str) -> Result<AuthenticatedActor, AuthError> {
        let user: AuthUser = self
            .gateway
            .user(access_token)
            .await
            .map_err(Self::map_persistence_error)?;
        Ok(self.join_profile(&user, access_token).await)
    }

    /// Signs out.
    ///
    /// # Errors
    ///
    /// Returns an error if the auth service cannot be reached.
    pub async fn logout(&self, access_token: &str) -> Result<(), AuthError> {
        self.gateway
            .sign_out(access_token)
            .await
            .map_err(Self::map_persistence_error)
    }

    async fn join_profile(&self, user: &AuthUser, access_token: &str) -> AuthenticatedActor {
        let store: Arc<dyn RemoteStore> = self.store.with_session(access_token);
        let query: Query = Query::table(tables::PROFILES)
            .select("id,email,nome,role")
            .eq("id", &user.id)
            .range(0, 0);

        let profile: Result<Option<ProfileRow>, PersistenceError> = match store.select(&query).await
        {
            Ok(page) => decode_rows::<ProfileRow>(page.rows).map(|rows| rows.into_iter().next()),
            Err(e) => Err(e),
        };

        match profile {
            Ok(Some(profile)) => AuthenticatedActor::with_profile(user, profile),
            Ok(None) => {
                debug!(user_id = %user.id, "No profile row for session user");
                AuthenticatedActor::from_user(user)
            }
            Err(e) => {
                warn!(user_id = %user.id, error = %e, "Failed to read profile; continuing without role");
                AuthenticatedActor::from_user(user)
            }
        }
    }

    /// Maps persistence errors to authentication errors.
    fn map_persistence_error(err: PersistenceError) -> AuthError {
        match err {
            PersistenceError::AuthFailed(reason) => AuthError::AuthenticationFailed { reason },
            _ => AuthError::AuthenticationFailed {
                reason: format!("Auth service error: {err}"),
            },
        }
    }
}
