// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Effect family classification for catalog filtering.
//!
//! Product effect tags are free text. The catalog filter groups them into
//! coarse families through an explicit table; a filter value that names no
//! family falls back to a raw substring match.

use serde::{Deserialize, Serialize};

/// Coarse grouping of product effect tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectFamily {
    /// Fan-shaped "W" pattern.
    LequeW,
    /// Fan-shaped "Z" pattern.
    LequeZ,
    /// Any fan-shaped pattern.
    Leque,
    /// Straight vertical shots.
    Reto,
    /// Smoke effects.
    Fumaca,
}

/// Classification table: family and the lowercase needle a tag must contain.
///
/// More specific families come first so a lookup by needle is unambiguous.
pub const EFFECT_FAMILIES: [(EffectFamily, &str); 5] = [
    (EffectFamily::LequeW, "leque w"),
    (EffectFamily::LequeZ, "leque z"),
    (EffectFamily::Leque, "leque"),
    (EffectFamily::Reto, "reto"),
    (EffectFamily::Fumaca, "fumaça"),
];

impl EffectFamily {
    /// Returns the lowercase substring identifying this family in an effect tag.
    #[must_use]
    pub fn needle(&self) -> &'static str {
        EFFECT_FAMILIES
            .iter()
            .find(|entry| entry.0 == *self)
            .map_or("", |entry| entry.1)
    }

    /// Looks up the family named by a filter value (case-insensitive).
    #[must_use]
    pub fn from_filter(value: &str) -> Option<Self> {
        let value: String = value.trim().to_lowercase();
        EFFECT_FAMILIES
            .iter()
            .find(|entry| entry.1 == value)
            .map(|entry| entry.0)
    }

    /// Returns true if an effect tag belongs to this family.
    #[must_use]
    pub fn contains(&self, effect: &str) -> bool {
        effect.to_lowercase().contains(self.needle())
    }
}

/// Returns true if a product's effect tag satisfies an effect filter value.
///
/// Products without an effect tag never match. A recognised family is
/// matched by its needle; anything else is a raw case-insensitive substring
/// match.
#[must_use]
pub fn effect_matches(effect: Option<&str>, filter: &str) -> bool {
    let Some(effect) = effect else {
        return false;
    };

    EffectFamily::from_filter(filter).map_or_else(
        || {
            effect
                .to_lowercase()
                .contains(filter.trim().to_lowercase().as_str())
        },
        |family| family.contains(effect),
    )
}
