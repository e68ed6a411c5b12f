// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur while building pipeline criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A sort order string was not `none`, `asc` or `desc`.
    InvalidSortOrder(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSortOrder(value) => {
                write!(
                    f,
                    "Invalid sort order '{value}': expected 'none', 'asc' or 'desc'"
                )
            }
        }
    }
}

impl std::error::Error for CoreError {}
