//! Query state and the controller that mutates it.
//!
//! Any change to search text, facet selections or page size sends the user
//! back to page 1. Moving between pages touches nothing else.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::trace;

use super::filter::{FacetSelection, FacetShape};
use super::sort::{SortDirection, SortSpec};
use super::{ListingError, ListingResult};

/// Snapshot of one listing screen's search, facets, sort and page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryState {
    search: String,
    facets: BTreeMap<String, FacetSelection>,
    sort: SortSpec,
    page: u32,
    page_size: u32,
}

impl QueryState {
    pub fn new(sort: SortSpec, page_size: u32) -> Self {
        Self {
            search: String::new(),
            facets: BTreeMap::new(),
            sort,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn facet(&self, name: &str) -> Option<&FacetSelection> {
        self.facets.get(name)
    }

    /// Active facet selections, keyed by facet name.
    pub fn facets(&self) -> impl Iterator<Item = (&str, &FacetSelection)> {
        self.facets
            .iter()
            .filter(|(_, sel)| sel.is_active())
            .map(|(name, sel)| (name.as_str(), sel))
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn has_active_filters(&self) -> bool {
        self.facets.values().any(FacetSelection::is_active)
    }

    /// Selected categorical values plus one per active range.
    pub fn active_filter_count(&self) -> usize {
        self.facets.values().map(FacetSelection::active_count).sum()
    }
}

/// Facet names/shapes and sort keys a listing accepts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySchema {
    pub facets: Vec<(&'static str, FacetShape)>,
    pub sort_keys: Vec<&'static str>,
}

impl QuerySchema {
    fn facet_shape(&self, name: &str) -> ListingResult<FacetShape> {
        self.facets
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, shape)| *shape)
            .ok_or_else(|| ListingError::UnknownFacet(name.to_string()))
    }

    fn expect_shape(&self, name: &str, requested: FacetShape) -> ListingResult<()> {
        let shape = self.facet_shape(name)?;
        if shape == requested {
            Ok(())
        } else {
            Err(ListingError::FacetMismatch {
                facet: name.to_string(),
                expected: shape,
            })
        }
    }
}

/// Owns a [`QueryState`] and enforces the page-reset rule.
#[derive(Debug, Clone)]
pub struct QueryController {
    schema: QuerySchema,
    defaults: QueryState,
    state: QueryState,
}

impl QueryController {
    pub fn new(schema: QuerySchema, defaults: QueryState) -> Self {
        Self {
            schema,
            state: defaults.clone(),
            defaults,
        }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn schema(&self) -> &QuerySchema {
        &self.schema
    }

    // =========================================================================
    // Filter inputs (reset to page 1)
    // =========================================================================

    pub fn set_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.state.search {
            self.state.search = text;
            self.reset_page();
        }
    }

    pub fn clear_search(&mut self) {
        self.set_search(String::new());
    }

    /// Add `value` to a categorical facet, or remove it if already selected.
    pub fn toggle_value(&mut self, facet: &str, value: &str) -> ListingResult<()> {
        self.schema.expect_shape(facet, FacetShape::Categorical)?;

        let mut values = match self.state.facets.remove(facet) {
            Some(FacetSelection::Values(values)) => values,
            _ => BTreeSet::new(),
        };
        if !values.remove(value) {
            values.insert(value.to_string());
        }
        if !values.is_empty() {
            self.state
                .facets
                .insert(facet.to_string(), FacetSelection::Values(values));
        }
        self.reset_page();
        Ok(())
    }

    /// Replace the selected values of a categorical facet.
    pub fn set_values<I, S>(&mut self, facet: &str, values: I) -> ListingResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schema.expect_shape(facet, FacetShape::Categorical)?;

        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            self.state.facets.remove(facet);
        } else {
            self.state
                .facets
                .insert(facet.to_string(), FacetSelection::Values(values));
        }
        self.reset_page();
        Ok(())
    }

    /// Set or clear an inclusive numeric range. Reversed bounds are swapped.
    pub fn set_number_range(&mut self, facet: &str, range: Option<(f64, f64)>) -> ListingResult<()> {
        self.schema.expect_shape(facet, FacetShape::NumberRange)?;

        match range {
            Some((a, b)) => {
                let (min, max) = if a <= b { (a, b) } else { (b, a) };
                self.state
                    .facets
                    .insert(facet.to_string(), FacetSelection::NumberRange { min, max });
            }
            None => {
                self.state.facets.remove(facet);
            }
        }
        self.reset_page();
        Ok(())
    }

    /// Set or clear an inclusive calendar-date range. Reversed bounds are swapped.
    pub fn set_date_range(
        &mut self,
        facet: &str,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> ListingResult<()> {
        self.schema.expect_shape(facet, FacetShape::DateRange)?;

        match range {
            Some((a, b)) => {
                let (start, end) = if a <= b { (a, b) } else { (b, a) };
                self.state
                    .facets
                    .insert(facet.to_string(), FacetSelection::DateRange { start, end });
            }
            None => {
                self.state.facets.remove(facet);
            }
        }
        self.reset_page();
        Ok(())
    }

    pub fn clear_facet(&mut self, facet: &str) -> ListingResult<()> {
        self.schema.facet_shape(facet)?;
        self.state.facets.remove(facet);
        self.reset_page();
        Ok(())
    }

    /// Reset every facet and return to page 1 in one step. Search text is kept.
    pub fn clear_filters(&mut self) {
        self.state.facets.clear();
        self.reset_page();
    }

    pub fn set_page_size(&mut self, page_size: u32) -> ListingResult<()> {
        if page_size == 0 {
            return Err(ListingError::InvalidPageSize);
        }
        self.state.page_size = page_size;
        self.reset_page();
        Ok(())
    }

    // =========================================================================
    // Sort (does not affect the page)
    // =========================================================================

    pub fn set_sort(&mut self, key: &str, direction: SortDirection) -> ListingResult<()> {
        if !self.schema.sort_keys.iter().any(|k| *k == key) {
            return Err(ListingError::UnknownSortKey(key.to_string()));
        }
        self.state.sort = SortSpec::new(key, direction);
        Ok(())
    }

    pub fn toggle_sort_direction(&mut self) {
        self.state.sort.direction = self.state.sort.direction.toggled();
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Jump to `page`; 0 is treated as 1.
    pub fn set_page(&mut self, page: u32) {
        self.state.page = page.max(1);
    }

    pub fn first_page(&mut self) {
        self.state.page = 1;
    }

    pub fn previous_page(&mut self) {
        self.state.page = self.state.page.saturating_sub(1).max(1);
    }

    /// Advance unless already on the last page.
    pub fn next_page(&mut self, total_pages: u32) {
        if self.state.page < total_pages {
            self.state.page += 1;
        }
    }

    pub fn last_page(&mut self, total_pages: u32) {
        self.state.page = total_pages.max(1);
    }

    /// Return to the screen's initial state.
    pub fn reset(&mut self) {
        self.state = self.defaults.clone();
    }

    fn reset_page(&mut self) {
        if self.state.page != 1 {
            trace!(from = self.state.page, "query input changed, back to page 1");
        }
        self.state.page = 1;
    }
}
