// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User-facing notifications and hook outcomes.
//!
//! Hooks never return remote errors to their callers. A failure becomes a
//! destructive [`Notification`] plus an empty value, and callers treat the
//! empty value as "nothing to do, already reported".

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Default,
    Destructive,
}

/// A short message shown to staff after an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub variant: Variant,
}

impl Notification {
    #[must_use]
    pub fn success(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            variant: Variant::Default,
        }
    }

    #[must_use]
    pub fn failure(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            variant: Variant::Destructive,
        }
    }

    #[must_use]
    pub const fn is_destructive(&self) -> bool {
        matches!(self.variant, Variant::Destructive)
    }
}

/// The value a hook produced and the notification it raised, if any.
///
/// `error` records why a failed hook produced an empty value; it is not
/// serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome<T> {
    pub value: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
    #[serde(skip)]
    pub error: Option<ApiError>,
}

impl<T> Outcome<T> {
    /// A successful outcome without a notification.
    #[must_use]
    pub const fn quiet(value: T) -> Self {
        Self {
            value,
            notification: None,
            error: None,
        }
    }

    /// A successful outcome announcing itself.
    #[must_use]
    pub const fn notified(value: T, notification: Notification) -> Self {
        Self {
            value,
            notification: Some(notification),
            error: None,
        }
    }

    /// A failed outcome carrying the empty value.
    #[must_use]
    pub const fn failed(empty: T, notification: Notification, error: ApiError) -> Self {
        Self {
            value: empty,
            notification: Some(notification),
            error: Some(error),
        }
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    /// Transforms the value, keeping notification and error.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            notification: self.notification,
            error: self.error,
        }
    }
}
