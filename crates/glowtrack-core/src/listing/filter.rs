//! Filter stage: free-text search plus facet predicates.
//!
//! Categories combine with AND, values within a categorical facet with OR.
//! A record lacking the field a facet inspects never matches that facet.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reads a searchable or categorical text field.
pub type TextAccessor<T> = fn(&T) -> Option<&str>;
/// Reads a numeric field for range facets.
pub type NumberAccessor<T> = fn(&T) -> Option<f64>;
/// Reads a calendar date for date-range facets.
pub type DateAccessor<T> = fn(&T) -> Option<NaiveDate>;

/// How a facet inspects a record.
pub enum FacetKind<T> {
    Categorical(TextAccessor<T>),
    NumberRange(NumberAccessor<T>),
    DateRange(DateAccessor<T>),
}

impl<T> Clone for FacetKind<T> {
    fn clone(&self) -> Self {
        match self {
            FacetKind::Categorical(f) => FacetKind::Categorical(*f),
            FacetKind::NumberRange(f) => FacetKind::NumberRange(*f),
            FacetKind::DateRange(f) => FacetKind::DateRange(*f),
        }
    }
}

impl<T> FacetKind<T> {
    pub fn shape(&self) -> FacetShape {
        match self {
            FacetKind::Categorical(_) => FacetShape::Categorical,
            FacetKind::NumberRange(_) => FacetShape::NumberRange,
            FacetKind::DateRange(_) => FacetShape::DateRange,
        }
    }
}

/// A named filter dimension.
pub struct FacetDef<T> {
    pub name: &'static str,
    pub kind: FacetKind<T>,
}

impl<T> Clone for FacetDef<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            kind: self.kind.clone(),
        }
    }
}

impl<T> FacetDef<T> {
    pub fn categorical(name: &'static str, get: TextAccessor<T>) -> Self {
        Self { name, kind: FacetKind::Categorical(get) }
    }

    pub fn number_range(name: &'static str, get: NumberAccessor<T>) -> Self {
        Self { name, kind: FacetKind::NumberRange(get) }
    }

    pub fn date_range(name: &'static str, get: DateAccessor<T>) -> Self {
        Self { name, kind: FacetKind::DateRange(get) }
    }

    /// Whether `record` satisfies `selection` for this facet.
    pub fn matches(&self, record: &T, selection: &FacetSelection) -> bool {
        match (&self.kind, selection) {
            (FacetKind::Categorical(get), FacetSelection::Values(values)) => {
                values.is_empty() || get(record).is_some_and(|v| values.contains(v))
            }
            (FacetKind::NumberRange(get), FacetSelection::NumberRange { min, max }) => {
                get(record).is_some_and(|v| v >= *min && v <= *max)
            }
            (FacetKind::DateRange(get), FacetSelection::DateRange { start, end }) => {
                get(record).is_some_and(|d| d >= *start && d <= *end)
            }
            // Shape mismatches are rejected by the controller.
            _ => true,
        }
    }
}

/// Kind of selection a facet accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetShape {
    Categorical,
    NumberRange,
    DateRange,
}

impl std::fmt::Display for FacetShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FacetShape::Categorical => "categorical",
            FacetShape::NumberRange => "number range",
            FacetShape::DateRange => "date range",
        })
    }
}

/// The user's current choice for one facet. Ranges are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetSelection {
    Values(BTreeSet<String>),
    NumberRange { min: f64, max: f64 },
    DateRange { start: NaiveDate, end: NaiveDate },
}

impl FacetSelection {
    pub fn shape(&self) -> FacetShape {
        match self {
            FacetSelection::Values(_) => FacetShape::Categorical,
            FacetSelection::NumberRange { .. } => FacetShape::NumberRange,
            FacetSelection::DateRange { .. } => FacetShape::DateRange,
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            FacetSelection::Values(values) => !values.is_empty(),
            _ => true,
        }
    }

    /// Contribution to the "N filters" badge.
    pub fn active_count(&self) -> usize {
        match self {
            FacetSelection::Values(values) => values.len(),
            _ => 1,
        }
    }
}

/// True when `needle` (already lowercased) occurs in any of `fields`.
///
/// An empty needle matches everything; absent fields never match.
pub fn matches_search<T>(record: &T, fields: &[TextAccessor<T>], needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .filter_map(|get| get(record))
        .any(|value| value.to_lowercase().contains(needle))
}
