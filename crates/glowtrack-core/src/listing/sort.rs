//! Sort stage.
//!
//! Records are always sorted ascending with a stable sort; descending is the
//! reverse of that sequence.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::collation::Collation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn from_descending(descending: bool) -> Self {
        if descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }

    pub fn is_descending(self) -> bool {
        self == SortDirection::Descending
    }
}

/// Selected sort key and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    pub fn ascending(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Ascending)
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Descending)
    }
}

/// How a sort key extracts and compares its value.
pub enum SortKind<T> {
    /// Compared with the injected collation.
    Text(fn(&T) -> Cow<'_, str>),
    Number(fn(&T) -> f64),
    /// Missing dates sort first.
    Date(fn(&T) -> Option<NaiveDate>),
    /// Missing timestamps sort first.
    Timestamp(fn(&T) -> Option<DateTime<Utc>>),
}

impl<T> Clone for SortKind<T> {
    fn clone(&self) -> Self {
        match self {
            SortKind::Text(f) => SortKind::Text(*f),
            SortKind::Number(f) => SortKind::Number(*f),
            SortKind::Date(f) => SortKind::Date(*f),
            SortKind::Timestamp(f) => SortKind::Timestamp(*f),
        }
    }
}

/// A named sort key offered by a listing screen.
pub struct SortKeyDef<T> {
    pub name: &'static str,
    pub kind: SortKind<T>,
}

impl<T> Clone for SortKeyDef<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            kind: self.kind.clone(),
        }
    }
}

impl<T> SortKeyDef<T> {
    pub fn text(name: &'static str, get: fn(&T) -> Cow<'_, str>) -> Self {
        Self { name, kind: SortKind::Text(get) }
    }

    pub fn number(name: &'static str, get: fn(&T) -> f64) -> Self {
        Self { name, kind: SortKind::Number(get) }
    }

    pub fn date(name: &'static str, get: fn(&T) -> Option<NaiveDate>) -> Self {
        Self { name, kind: SortKind::Date(get) }
    }

    pub fn timestamp(name: &'static str, get: fn(&T) -> Option<DateTime<Utc>>) -> Self {
        Self { name, kind: SortKind::Timestamp(get) }
    }

    /// Order `items` by this key.
    pub fn sort<'a, C>(&self, mut items: Vec<&'a T>, direction: SortDirection, collation: &C) -> Vec<&'a T>
    where
        C: Collation + ?Sized,
    {
        match &self.kind {
            SortKind::Text(get) => {
                // Extract once; collation keys are comparatively expensive.
                let mut keyed: Vec<(Cow<'a, str>, &'a T)> =
                    items.into_iter().map(|r| (get(r), r)).collect();
                keyed.sort_by(|a, b| collation.compare(&a.0, &b.0));
                items = keyed.into_iter().map(|(_, r)| r).collect();
            }
            SortKind::Number(get) => items.sort_by(|a, b| get(a).total_cmp(&get(b))),
            SortKind::Date(get) => items.sort_by_key(|r| get(r)),
            SortKind::Timestamp(get) => items.sort_by_key(|r| get(r)),
        }

        if direction.is_descending() {
            items.reverse();
        }
        items
    }
}
