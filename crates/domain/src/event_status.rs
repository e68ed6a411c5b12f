// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event status tracking and transition logic.
//!
//! A quote moves forward through `pendente → confirmado → realizado`.
//! Cancellation is reachable from the two non-terminal states. Status
//! transitions are operator-initiated only.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of an event/quote record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventStatus {
    /// Quote received, awaiting confirmation.
    #[serde(rename = "pendente")]
    Pending,
    /// Client confirmed the engagement.
    #[serde(rename = "confirmado")]
    Confirmed,
    /// The show or sale took place.
    #[serde(rename = "realizado")]
    Performed,
    /// The engagement was called off.
    #[serde(rename = "cancelado")]
    Cancelled,
}

impl EventStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Confirmed,
        Self::Performed,
        Self::Cancelled,
    ];

    /// Returns the wire representation stored in the `status` column.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pendente",
            Self::Confirmed => "confirmado",
            Self::Performed => "realizado",
            Self::Cancelled => "cancelado",
        }
    }

    /// Returns the label shown to staff.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pendente",
            Self::Confirmed => "Confirmado",
            Self::Performed => "Realizado",
            Self::Cancelled => "Cancelado",
        }
    }

    /// Returns the timestamp column stamped when a record enters this status.
    ///
    /// `Pending` is the initial state and has no timestamp of its own.
    #[must_use]
    pub const fn timestamp_column(&self) -> Option<&'static str> {
        match self {
            Self::Pending => None,
            Self::Confirmed => Some("confirmado_em"),
            Self::Performed => Some("realizado_em"),
            Self::Cancelled => Some("cancelado_em"),
        }
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Performed | Self::Cancelled)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }

        let valid: bool = match self {
            Self::Pending => matches!(new_status, Self::Confirmed | Self::Cancelled),
            Self::Confirmed => matches!(new_status, Self::Performed | Self::Cancelled),
            Self::Performed | Self::Cancelled => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by status lifecycle rules".to_string(),
            })
        }
    }
}

impl FromStr for EventStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pendente" => Ok(Self::Pending),
            "confirmado" => Ok(Self::Confirmed),
            "realizado" => Ok(Self::Performed),
            "cancelado" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidEventStatus {
                status: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_round_trip() {
        for status in EventStatus::ALL {
            let s: &str = status.as_str();
            match s.parse::<EventStatus>() {
                Ok(parsed) => assert_eq!(status, parsed),
                Err(e) => panic!("Failed to parse status string: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            "Confirmado".parse::<EventStatus>(),
            Ok(EventStatus::Confirmed)
        );
    }

    #[test]
    fn test_invalid_status_string() {
        assert!("arquivado".parse::<EventStatus>().is_err());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!EventStatus::Pending.is_terminal());
        assert!(!EventStatus::Confirmed.is_terminal());
        assert!(EventStatus::Performed.is_terminal());
        assert!(EventStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_forward_transitions() {
        assert!(
            EventStatus::Pending
                .validate_transition(EventStatus::Confirmed)
                .is_ok()
        );
        assert!(
            EventStatus::Confirmed
                .validate_transition(EventStatus::Performed)
                .is_ok()
        );
    }

    #[test]
    fn test_cancellation_reachable_from_open_states() {
        assert!(
            EventStatus::Pending
                .validate_transition(EventStatus::Cancelled)
                .is_ok()
        );
        assert!(
            EventStatus::Confirmed
                .validate_transition(EventStatus::Cancelled)
                .is_ok()
        );
    }

    #[test]
    fn test_no_skipping_or_going_back() {
        assert!(
            EventStatus::Pending
                .validate_transition(EventStatus::Performed)
                .is_err()
        );
        assert!(
            EventStatus::Confirmed
                .validate_transition(EventStatus::Pending)
                .is_err()
        );
        assert!(
            EventStatus::Pending
                .validate_transition(EventStatus::Pending)
                .is_err()
        );
    }

    #[test]
    fn test_no_transitions_from_terminal_states() {
        for terminal in [EventStatus::Performed, EventStatus::Cancelled] {
            for target in EventStatus::ALL {
                assert!(terminal.validate_transition(target).is_err());
            }
        }
    }

    #[test]
    fn test_timestamp_columns() {
        assert_eq!(EventStatus::Pending.timestamp_column(), None);
        assert_eq!(
            EventStatus::Confirmed.timestamp_column(),
            Some("confirmado_em")
        );
        assert_eq!(
            EventStatus::Performed.timestamp_column(),
            Some("realizado_em")
        );
        assert_eq!(
            EventStatus::Cancelled.timestamp_column(),
            Some("cancelado_em")
        );
    }
}
