// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use m5_max::CoreError;
use m5_max_domain::DomainError;
use m5_max_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The remote store or auth service failed.
    Upstream {
        /// A description of the remote failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Upstream { message } => {
                write!(f, "Remote service error: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidEventStatus { status } => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown event status '{status}'"),
        },
        DomainError::InvalidEngagementType { engagement } => ApiError::InvalidInput {
            field: String::from("tipo"),
            message: format!("Unknown engagement type '{engagement}'"),
        },
        DomainError::InvalidStatusTransition { from, to, reason } => {
            ApiError::DomainRuleViolation {
                rule: String::from("status_lifecycle"),
                message: format!("Cannot move event from {from} to {to}: {reason}"),
            }
        }
        DomainError::MissingField { field } => ApiError::InvalidInput {
            field: field.to_string(),
            message: String::from("Field is required"),
        },
        DomainError::InvalidQuantity { index, quantity } => ApiError::InvalidInput {
            field: format!("produtos[{index}].quantidade"),
            message: format!("Quantity must be at least 1, got {quantity}"),
        },
        DomainError::InvalidUnitPrice { index, price } => ApiError::InvalidInput {
            field: format!("produtos[{index}].valor_unitario"),
            message: format!("Unit price must be a non-negative number, got {price}"),
        },
        DomainError::LineItemNotFound { index, len } => ApiError::ResourceNotFound {
            resource_type: String::from("Line item"),
            message: format!("No line at index {index} (draft has {len})"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::InvalidSortOrder(value) => ApiError::InvalidInput {
            field: String::from("order"),
            message: format!("Unknown sort direction '{value}'"),
        },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        PersistenceError::AuthFailed(reason) => ApiError::AuthenticationFailed { reason },
        PersistenceError::InvalidQuery(message) => ApiError::Internal { message },
        other @ (PersistenceError::Transport(_)
        | PersistenceError::UnexpectedStatus { .. }
        | PersistenceError::Decode(_)
        | PersistenceError::Other(_)) => ApiError::Upstream {
            message: other.to_string(),
        },
    }
}
