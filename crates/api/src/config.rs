// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service configuration.
//!
//! Values come from the process environment (after a `.env` file, when
//! present, has been loaded by the binary):
//!
//! - `SUPABASE_URL`: required base URL of the hosted project
//! - `SUPABASE_ANON_KEY`: required project key
//! - `LEADS_SUPABASE_URL` / `LEADS_SUPABASE_ANON_KEY`: optional lead
//!   source; it exists only when both are set
//! - `WHATSAPP_NUMBER`: contact phone shown on the dashboard

use reqwest::Url;
use thiserror::Error;
use tracing::{info, warn};

/// Contact phone used when `WHATSAPP_NUMBER` is not set.
pub const DEFAULT_WHATSAPP_NUMBER: &str = "5561982735575";

/// Configuration errors. Any of these aborts startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    MissingVariable(&'static str),

    #[error("{variable} is not a valid http(s) URL: {value}")]
    InvalidUrl {
        variable: &'static str,
        value: String,
    },

    #[error("{0} must not be empty")]
    EmptyKey(&'static str),
}

/// Connection settings for one hosted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSettings {
    pub url: String,
    pub anon_key: String,
}

/// Validated service settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Primary project; `None` only when running against the in-memory store.
    pub remote: Option<RemoteSettings>,
    /// Optional secondary project holding lead submissions.
    pub leads: Option<RemoteSettings>,
    pub whatsapp_number: String,
}

impl Settings {
    /// Loads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a required value is missing or invalid.
    pub fn from_env(in_memory: bool) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok(), in_memory)
    }

    /// Loads settings through an arbitrary variable lookup.
    ///
    /// With `in_memory` set, the primary project settings are optional.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a required value is missing or invalid.
    pub fn from_lookup<F>(lookup: F, in_memory: bool) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| -> Option<String> {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let remote: Option<RemoteSettings> = match (get("SUPABASE_URL"), get("SUPABASE_ANON_KEY")) {
            (Some(url), Some(key)) => Some(remote_settings("SUPABASE_URL", url, key)?),
            (None, _) | (_, None) if in_memory => None,
            (None, _) => return Err(ConfigError::MissingVariable("SUPABASE_URL")),
            (Some(_), None) => return Err(ConfigError::EmptyKey("SUPABASE_ANON_KEY")),
        };

        let leads: Option<RemoteSettings> =
            match (get("LEADS_SUPABASE_URL"), get("LEADS_SUPABASE_ANON_KEY")) {
                (Some(url), Some(key)) => Some(remote_settings("LEADS_SUPABASE_URL", url, key)?),
                (None, None) => None,
                (Some(_), None) => {
                    warn!(missing = "LEADS_SUPABASE_ANON_KEY", "Lead source disabled");
                    None
                }
                (None, Some(_)) => {
                    warn!(missing = "LEADS_SUPABASE_URL", "Lead source disabled");
                    None
                }
            };

        let settings: Self = Self {
            remote,
            leads,
            whatsapp_number: get("WHATSAPP_NUMBER")
                .unwrap_or_else(|| DEFAULT_WHATSAPP_NUMBER.to_string()),
        };

        info!(
            remote = settings.remote.as_ref().map(|r| r.url.as_str()),
            leads = settings.leads.is_some(),
            in_memory,
            "Loaded configuration"
        );
        Ok(settings)
    }
}

fn remote_settings(
    variable: &'static str,
    url: String,
    anon_key: String,
) -> Result<RemoteSettings, ConfigError> {
    validate_url(variable, &url)?;
    Ok(RemoteSettings { url, anon_key })
}

/// Checks that a value is an absolute http(s) URL with a host.
///
/// # Errors
///
/// Returns `ConfigError::InvalidUrl` otherwise.
pub fn validate_url(variable: &'static str, value: &str) -> Result<(), ConfigError> {
    let invalid = || ConfigError::InvalidUrl {
        variable,
        value: value.to_string(),
    };
    let url: Url = Url::parse(value).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }
    Ok(())
}
