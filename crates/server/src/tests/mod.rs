// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Router tests against the in-memory backend.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use m5_max_api::{AuthenticationService, LeadService, Settings};
use m5_max_persistence::{AuthSession, AuthUser, MemoryAuth, MemoryStore, RemoteStore};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use crate::{AppState, build_router, demo};

pub const TEST_PHONE: &str = "5561900001111";

/// A router over seeded in-memory data, with handles on the backends.
pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
    pub auth: Arc<MemoryAuth>,
}

impl TestApp {
    pub fn new() -> Self {
        let store: MemoryStore = MemoryStore::new();
        demo::seed_store(&store).unwrap();
        let auth: Arc<MemoryAuth> = Arc::new(MemoryAuth::new());
        demo::seed_accounts(&auth).unwrap();

        let shared: Arc<dyn RemoteStore> = Arc::new(store.clone());
        let state: AppState = AppState {
            auth: AuthenticationService::new(auth.clone(), Arc::clone(&shared)),
            store: shared,
            leads: LeadService::new(None),
            settings: Arc::new(Settings {
                remote: None,
                leads: None,
                whatsapp_number: TEST_PHONE.to_string(),
            }),
        };

        Self {
            router: build_router(state),
            store,
            auth,
        }
    }

    /// Issues a session for one of the seeded accounts.
    pub fn session_for(&self, user_id: &str) -> String {
        let session: AuthSession = self.auth.issue_session(AuthUser {
            id: user_id.to_string(),
            email: None,
        });
        session.access_token
    }

    pub fn admin_token(&self) -> String {
        self.session_for("demo-admin")
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: &Value,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}
