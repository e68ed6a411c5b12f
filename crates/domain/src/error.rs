// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Event status string is not one of the known lifecycle states.
    InvalidEventStatus {
        /// The rejected status string.
        status: String,
    },
    /// Engagement type string is not recognised.
    InvalidEngagementType {
        /// The rejected type string.
        engagement: String,
    },
    /// A status transition is not permitted by the lifecycle rules.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was rejected.
        reason: String,
    },
    /// A required text field is empty.
    MissingField {
        /// The field name.
        field: &'static str,
    },
    /// A line item quantity must be at least one.
    InvalidQuantity {
        /// Position of the line item in the draft.
        index: usize,
        /// The rejected quantity.
        quantity: u32,
    },
    /// A line item unit price must be a finite, non-negative amount.
    InvalidUnitPrice {
        /// Position of the line item in the draft.
        index: usize,
        /// The rejected price.
        price: f64,
    },
    /// A draft line item index is out of range.
    LineItemNotFound {
        /// The requested index.
        index: usize,
        /// Number of line items in the draft.
        len: usize,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEventStatus { status } => {
                write!(f, "Invalid event status: '{status}'")
            }
            Self::InvalidEngagementType { engagement } => {
                write!(f, "Invalid engagement type: '{engagement}'")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Invalid status transition from {from} to {to}: {reason}")
            }
            Self::MissingField { field } => write!(f, "Field '{field}' must not be empty"),
            Self::InvalidQuantity { index, quantity } => {
                write!(
                    f,
                    "Line item {index} has invalid quantity {quantity}: must be at least 1"
                )
            }
            Self::InvalidUnitPrice { index, price } => {
                write!(
                    f,
                    "Line item {index} has invalid unit price {price}: must be a non-negative amount"
                )
            }
            Self::LineItemNotFound { index, len } => {
                write!(f, "Line item {index} does not exist (draft has {len} items)")
            }
        }
    }
}

impl std::error::Error for DomainError {}
