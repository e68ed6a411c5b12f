// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Incoming requests from the public site's lead form.

use m5_max_domain::{LeadSubmission, Solicitation};
use m5_max_persistence::{Page, Query, RemoteStore, tables};
use std::sync::Arc;
use tracing::debug;

use crate::error::translate_persistence_error;
use crate::events::fail;
use crate::notification::Outcome;

/// Reads leads from the optional secondary project.
#[derive(Clone, Default)]
pub struct LeadService {
    store: Option<Arc<dyn RemoteStore>>,
}

impl LeadService {
    #[must_use]
    pub fn new(store: Option<Arc<dyn RemoteStore>>) -> Self {
        Self { store }
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    /// Lists leads, newest first, as solicitations.
    ///
    /// Empty without a notification when no lead source is configured.
    pub async fn list_leads(&self) -> Outcome<Vec<Solicitation>> {
        let Some(store) = &self.store else {
            debug!("No lead source configured");
            return Outcome::quiet(Vec::new());
        };

        let query: Query = Query::table(tables::LEADS).order("created_at", false);
        match store.select(&query).await.and_then(Page::decode::<LeadSubmission>) {
            Ok(leads) => Outcome::quiet(leads.iter().map(Solicitation::from).collect()),
            Err(e) => fail(
                Vec::new(),
                "Erro ao buscar solicitações",
                translate_persistence_error(e),
            ),
        }
    }
}
