// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leads imported from the external website project.

use serde::{Deserialize, Serialize};

/// A prospective-customer submission from the lead source (`lead_submissions`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub event_type: Option<String>,
    pub event_date: Option<String>,
    pub audience_size: Option<String>,
    pub budget: Option<String>,
    pub noise_restrictions: Option<bool>,
    pub audience: Option<String>,
    pub audience_profile: Option<String>,
    pub source: Option<String>,
    pub page: Option<String>,
    pub lead_score: Option<i64>,
    pub message: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub firework_points: Option<String>,
}

/// A lead in the shape the quotes page lists incoming requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solicitation {
    pub id: String,
    pub nome_completo: String,
    pub whatsapp: String,
    pub email: String,
    pub tipo_solicitacao: String,
    pub tipo_evento: Option<String>,
    pub data_evento: Option<String>,
    pub localizacao_evento: Option<String>,
    pub kit_selecionado: Option<String>,
    pub observacoes: Option<String>,
    pub enviado_email: bool,
    pub created_at: Option<String>,
}

/// Returns the value when present and not blank.
fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}

impl From<&LeadSubmission> for Solicitation {
    fn from(lead: &LeadSubmission) -> Self {
        let event_type: Option<String> = non_empty(lead.event_type.as_ref());
        Self {
            id: lead.id.to_string(),
            nome_completo: non_empty(lead.name.as_ref())
                .unwrap_or_else(|| String::from("Lead sem nome")),
            whatsapp: non_empty(lead.phone.as_ref()).unwrap_or_default(),
            email: non_empty(lead.email.as_ref()).unwrap_or_default(),
            tipo_solicitacao: event_type
                .clone()
                .or_else(|| non_empty(lead.source.as_ref()))
                .unwrap_or_else(|| String::from("lead")),
            tipo_evento: event_type,
            data_evento: non_empty(lead.event_date.as_ref()),
            localizacao_evento: non_empty(lead.city.as_ref()),
            kit_selecionado: non_empty(lead.firework_points.as_ref()),
            observacoes: non_empty(lead.message.as_ref()),
            enviado_email: false,
            created_at: non_empty(lead.created_at.as_ref()),
        }
    }
}
