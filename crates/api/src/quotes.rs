// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Quote editing.

use m5_max_domain::{Event, QuoteEdit};
use m5_max_persistence::{NewLineItem, Query, QuotePatch, RemoteStore, decode_rows, tables};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::events::fail;
use crate::notification::{Notification, Outcome};

const FAILURE_TITLE: &str = "Erro";
const FAILURE_DESCRIPTION: &str = "Não foi possível atualizar o orçamento";

/// Line replacement steps of a quote edit, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    RemoveLines,
    InsertLines,
}

impl Step {
    const fn as_str(self) -> &'static str {
        match self {
            Self::RemoveLines => "remove_lines",
            Self::InsertLines => "insert_lines",
        }
    }
}

/// Writes edited quotes back to the store.
#[derive(Clone)]
pub struct QuoteService {
    store: Arc<dyn RemoteStore>,
}

impl QuoteService {
    #[must_use]
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    /// Saves an edited quote.
    ///
    /// The header (including the recomputed total) is updated first, then
    /// every line of the quote is replaced by the edit's lines. The steps are
    /// not atomic: a failure after the header write leaves the header saved
    /// and is reported like any other failure.
    pub async fn update_quote(&self, id: &str, edit: &QuoteEdit) -> Outcome<Option<Event>> {
        if let Err(e) = edit.validate() {
            return Self::failure(translate_domain_error(e));
        }
        info!(
            quote_id = id,
            lines = edit.produtos.len(),
            total = edit.total(),
            "Updating quote"
        );

        let event: Event = match self.write_header(id, edit).await {
            Ok(event) => event,
            Err(e) => return Self::failure(e),
        };

        if let Err((step, e)) = self.replace_lines(id, edit).await {
            warn!(
                quote_id = id,
                step = step.as_str(),
                error = %e,
                "Quote header saved but line items were not fully replaced"
            );
            return Self::failure(e);
        }

        Outcome::notified(
            Some(event),
            Notification::success(
                "Orçamento atualizado!",
                "O orçamento foi atualizado com sucesso.",
            ),
        )
    }

    async fn write_header(&self, id: &str, edit: &QuoteEdit) -> Result<Event, ApiError> {
        let patch: Value =
            serde_json::to_value(QuotePatch::from(edit)).map_err(|e| ApiError::Internal {
                message: format!("Failed to encode quote: {e}"),
            })?;
        let rows: Vec<Value> = self
            .store
            .update(&Query::table(tables::QUOTES).eq("id", id), patch)
            .await
            .map_err(translate_persistence_error)?;
        decode_rows::<Event>(rows)
            .map_err(translate_persistence_error)?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::ResourceNotFound {
                resource_type: String::from("Quote"),
                message: format!("No quote with id {id}"),
            })
    }

    async fn replace_lines(&self, id: &str, edit: &QuoteEdit) -> Result<(), (Step, ApiError)> {
        self.store
            .delete(&Query::table(tables::LINE_ITEMS).eq("orcamento_id", id))
            .await
            .map_err(|e| (Step::RemoveLines, translate_persistence_error(e)))?;

        if edit.produtos.is_empty() {
            return Ok(());
        }

        let rows: Vec<Value> = edit
            .produtos
            .iter()
            .map(|draft| serde_json::to_value(NewLineItem::from_draft(id, draft)))
            .collect::<Result<_, _>>()
            .map_err(|e| {
                (
                    Step::InsertLines,
                    ApiError::Internal {
                        message: format!("Failed to encode line item: {e}"),
                    },
                )
            })?;
        self.store
            .insert(tables::LINE_ITEMS, rows)
            .await
            .map_err(|e| (Step::InsertLines, translate_persistence_error(e)))?;
        Ok(())
    }

    fn failure(err: ApiError) -> Outcome<Option<Event>> {
        let mut outcome: Outcome<Option<Event>> = fail(None, FAILURE_TITLE, err);
        if let Some(notification) = outcome.notification.as_mut() {
            notification.description = FAILURE_DESCRIPTION.to_string();
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_names() {
        assert_eq!(Step::RemoveLines.as_str(), "remove_lines");
        assert_eq!(Step::InsertLines.as_str(), "insert_lines");
    }
}
