// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Filter selections and sort directions chosen in the dashboard.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Sentinel meaning "no restriction" in a filter selection.
pub const ALL: &str = "all";

/// A filter selection: either everything, or exactly one value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection<T> {
    /// The filter is bypassed.
    #[default]
    All,
    /// Only records equal to this value pass.
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    /// Returns true if the value passes this selection.
    #[must_use]
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }
}

impl<T> Selection<T> {
    /// Returns true if this selection bypasses the filter.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Returns the selected value, if any.
    #[must_use]
    pub const fn as_only(&self) -> Option<&T> {
        match self {
            Self::All => None,
            Self::Only(value) => Some(value),
        }
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    /// Parses `"all"` (any case) or a blank string as [`Selection::All`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed: &str = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            return Ok(Self::All);
        }
        trimmed.parse().map(Self::Only)
    }
}

/// Direction of a sort selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// No ordering on this key.
    #[default]
    None,
    /// Smallest first.
    Asc,
    /// Largest first.
    Desc,
}

impl SortOrder {
    /// Returns true unless this is [`SortOrder::None`].
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Orients an ascending comparison result in this direction.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Desc => ordering.reverse(),
            Self::None | Self::Asc => ordering,
        }
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(CoreError::InvalidSortOrder(s.to_string())),
        }
    }
}
