//! Year-to-edition classification and the edition color table.
//!
//! The event recurs yearly; each yearly instance is an "edition" with a
//! symbolic label (`33C3`, `34C3`, ...) and a display color. The label
//! derivation rule and the color table are explicit configuration built once
//! at startup, never process-global state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// Symbolic label for one yearly edition of the event, e.g. `34C3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditionId(String);

impl EditionId {
    pub fn new(label: impl Into<String>) -> Self {
        EditionId(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EditionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EditionId {
    fn from(label: &str) -> Self {
        EditionId(label.to_string())
    }
}

/// Raised when a caller asks for the color of an edition the table does not
/// carry. Year-derived editions never trigger this; only bad filter input does.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("unknown edition: {0}")]
    UnknownEdition(EditionId),
}

/// How a calendar year maps to an edition label.
///
/// Both rules were in production use at different times; which one applies
/// is explicit configuration, never inferred from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditionPolicy {
    /// `{year - 1983}C3` for every year.
    #[default]
    Offset1983,
    /// `{year - 1983}C3` before 2020, `{year - 1986}C3` from 2020 on.
    Cutover2020,
}

/// Display colors for the editions the charts know about, in legend order.
static DEFAULT_COLORS: &[(&str, &str)] = &[
    ("33C3", "#01a89e"),
    ("34C3", "#a10632"),
    ("35C3", "#0084B0"),
    ("36C3", "#00A357"),
];

/// Ordered `EditionId -> display color` table plus the year derivation rule.
///
/// Insertion order is significant: it defines the canonical legend and
/// series ordering, so charts stay visually stable across filters.
#[derive(Debug, Clone)]
pub struct EditionTable {
    policy: EditionPolicy,
    colors: Vec<(EditionId, String)>,
}

impl EditionTable {
    pub fn new(policy: EditionPolicy, colors: Vec<(EditionId, String)>) -> Self {
        EditionTable { policy, colors }
    }

    /// Builds a table with the stock congress colors.
    pub fn with_default_colors(policy: EditionPolicy) -> Self {
        let colors = DEFAULT_COLORS
            .iter()
            .map(|(id, color)| (EditionId::from(*id), color.to_string()))
            .collect();
        EditionTable { policy, colors }
    }

    pub fn policy(&self) -> EditionPolicy {
        self.policy
    }

    /// Maps a calendar year to its edition label under the configured policy.
    ///
    /// Total over all years: nonsensical years still produce a syntactically
    /// valid label, they just won't be in the color table.
    pub fn classify(&self, year: i32) -> EditionId {
        let number = match self.policy {
            EditionPolicy::Offset1983 => year - 1983,
            EditionPolicy::Cutover2020 => {
                if year >= 2020 {
                    year - 1986
                } else {
                    year - 1983
                }
            }
        };
        EditionId(format!("{}C3", number))
    }

    /// Editions the table carries, in canonical order.
    pub fn editions(&self) -> impl Iterator<Item = &EditionId> {
        self.colors.iter().map(|(id, _)| id)
    }

    /// Position of an edition in the canonical table, if it is known.
    pub fn canonical_index(&self, edition: &EditionId) -> Option<usize> {
        self.colors.iter().position(|(id, _)| id == edition)
    }

    /// Colors for the requested editions, in canonical table order regardless
    /// of the input set's ordering.
    ///
    /// # Errors
    ///
    /// [`LookupError::UnknownEdition`] if any requested edition is not in the
    /// table.
    pub fn colors_for(&self, editions: &BTreeSet<EditionId>) -> Result<Vec<String>, LookupError> {
        if let Some(unknown) = editions.iter().find(|e| self.canonical_index(e).is_none()) {
            return Err(LookupError::UnknownEdition(unknown.clone()));
        }

        Ok(self
            .colors
            .iter()
            .filter(|(id, _)| editions.contains(id))
            .map(|(_, color)| color.clone())
            .collect())
    }
}

impl Default for EditionTable {
    fn default() -> Self {
        EditionTable::with_default_colors(EditionPolicy::default())
    }
}
