// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The admin area gate.
//!
//! Gated handlers take an [`AdminSession`]. Extraction resolves the access
//! token (an `Authorization: Bearer` header, or the session cookie set at
//! login), joins the user with its profile, and requires the admin role.
//! A failed check never reaches the handler: the visitor is redirected to
//! the login page, or to the access-denied page when signed in without the
//! admin role.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use m5_max_api::{AuthenticatedActor, AuthorizationService};
use tracing::{debug, info, warn};

use crate::AppState;

/// Name of the cookie carrying the access token.
pub const SESSION_COOKIE: &str = "m5_session";

pub const LOGIN_PATH: &str = "/admin/login";
pub const ACCESS_DENIED_PATH: &str = "/admin/acesso-negado";

/// Reads the access token from the request headers.
///
/// A bearer token wins over the session cookie.
#[must_use]
pub fn access_token(headers: &HeaderMap) -> Option<String> {
    let bearer: Option<&str> = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(Cookie::value)
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
}

/// The cookie storing a session token.
#[must_use]
pub fn session_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/admin")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// A cookie that removes the session cookie from the browser.
#[must_use]
pub fn cleared_session_cookie() -> Cookie<'static> {
    let mut cookie: Cookie<'static> = session_cookie("");
    cookie.make_removal();
    cookie
}

/// A signed-in admin and the token their session was resolved from.
pub struct AdminSession {
    pub actor: AuthenticatedActor,
    pub token: String,
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = GateRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token: String = access_token(&parts.headers).ok_or_else(|| {
            debug!(path = %parts.uri.path(), "No session on gated request");
            GateRejection::SignIn
        })?;

        let actor: AuthenticatedActor =
            state.auth.resolve_session(&token).await.map_err(|e| {
                warn!(error = %e, "Session could not be resolved");
                GateRejection::SignIn
            })?;

        AuthorizationService::require_admin(&actor).map_err(|e| {
            info!(actor_id = %actor.id, error = %e, "Non-admin refused at gate");
            GateRejection::Denied
        })?;

        Ok(Self { actor, token })
    }
}

/// Where a visitor who fails the gate is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    /// No session, or one that could not be resolved.
    SignIn,
    /// Signed in without the admin role.
    Denied,
}

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        match self {
            Self::SignIn => Redirect::to(LOGIN_PATH).into_response(),
            Self::Denied => Redirect::to(ACCESS_DENIED_PATH).into_response(),
        }
    }
}
