//! The full listing pipeline: filter → sort → paginate.
//!
//! A pure function of (records, query state). Every change to the state
//! recomputes from the untouched source records.

use tracing::debug;

use super::collation::Collation;
use super::filter::{matches_search, FacetDef, TextAccessor};
use super::paginate::{paginate, PageInfo};
use super::query::{QueryController, QuerySchema, QueryState};
use super::sort::{SortKeyDef, SortSpec};

/// Field accessors and defaults describing one listing screen.
pub struct ListingConfig<T> {
    pub search_fields: Vec<TextAccessor<T>>,
    pub facets: Vec<FacetDef<T>>,
    pub sort_keys: Vec<SortKeyDef<T>>,
    pub default_sort: SortSpec,
    pub default_page_size: u32,
}

impl<T> Clone for ListingConfig<T> {
    fn clone(&self) -> Self {
        Self {
            search_fields: self.search_fields.clone(),
            facets: self.facets.clone(),
            sort_keys: self.sort_keys.clone(),
            default_sort: self.default_sort.clone(),
            default_page_size: self.default_page_size,
        }
    }
}

impl<T> ListingConfig<T> {
    pub fn schema(&self) -> QuerySchema {
        QuerySchema {
            facets: self.facets.iter().map(|f| (f.name, f.kind.shape())).collect(),
            sort_keys: self.sort_keys.iter().map(|k| k.name).collect(),
        }
    }

    /// Query state as it is when the screen mounts.
    pub fn initial_state(&self) -> QueryState {
        QueryState::new(self.default_sort.clone(), self.default_page_size)
    }

    /// A controller validated against this configuration.
    pub fn controller(&self) -> QueryController {
        QueryController::new(self.schema(), self.initial_state())
    }

    pub fn facet(&self, name: &str) -> Option<&FacetDef<T>> {
        self.facets.iter().find(|f| f.name == name)
    }

    pub fn sort_key(&self, name: &str) -> Option<&SortKeyDef<T>> {
        self.sort_keys.iter().find(|k| k.name == name)
    }
}

/// One rendered page plus the counts the pagination controls need.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage<'a, T> {
    pub items: Vec<&'a T>,
    /// Matches before pagination
    pub total_filtered: usize,
    pub total_pages: u32,
    pub info: PageInfo,
}

impl<T> ListingPage<'_, T> {
    /// Nothing matched the search and facets.
    pub fn is_empty(&self) -> bool {
        self.total_filtered == 0
    }
}

/// Generic listing pipeline with an injected collation.
pub struct ListingPipeline<T, C> {
    config: ListingConfig<T>,
    collation: C,
}

impl<T, C: Collation> ListingPipeline<T, C> {
    pub fn new(config: ListingConfig<T>, collation: C) -> Self {
        Self { config, collation }
    }

    pub fn config(&self) -> &ListingConfig<T> {
        &self.config
    }

    pub fn collation(&self) -> &C {
        &self.collation
    }

    pub fn controller(&self) -> QueryController {
        self.config.controller()
    }

    /// Records matching the search text and every active facet, in input order.
    pub fn filter<'a>(&self, records: &'a [T], state: &QueryState) -> Vec<&'a T> {
        let needle = state.search().to_lowercase();

        // Unknown facet names cannot come through the controller; skip them.
        let active: Vec<_> = state
            .facets()
            .filter_map(|(name, selection)| self.config.facet(name).map(|def| (def, selection)))
            .collect();

        records
            .iter()
            .filter(|record| matches_search(*record, &self.config.search_fields, &needle))
            .filter(|record| active.iter().all(|(def, sel)| def.matches(record, sel)))
            .collect()
    }

    /// Order `items` by `sort`. An unknown key falls back to the default sort
    /// key and, failing that, keeps input order.
    pub fn sort<'a>(&self, items: Vec<&'a T>, sort: &SortSpec) -> Vec<&'a T> {
        let key = self
            .config
            .sort_key(&sort.key)
            .or_else(|| self.config.sort_key(&self.config.default_sort.key));

        match key {
            Some(key) => key.sort(items, sort.direction, &self.collation),
            None => items,
        }
    }

    /// Run all three stages.
    pub fn run<'a>(&self, records: &'a [T], state: &QueryState) -> ListingPage<'a, T> {
        let filtered = self.filter(records, state);
        let total_filtered = filtered.len();
        let sorted = self.sort(filtered, state.sort());
        let (slice, info) = paginate(&sorted, state.page(), state.page_size());

        debug!(
            records = records.len(),
            filtered = total_filtered,
            page = info.page,
            total_pages = info.total_pages,
            sort = %state.sort().key,
            "listing recomputed"
        );

        ListingPage {
            items: slice.to_vec(),
            total_filtered,
            total_pages: info.total_pages,
            info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::collation::CodepointCollation;
    use crate::listing::sort::SortDirection;
    use std::borrow::Cow;

    #[derive(Debug, PartialEq)]
    struct Row {
        name: &'static str,
        level: Option<&'static str>,
        score: f64,
    }

    fn name(r: &Row) -> Option<&str> {
        Some(r.name)
    }

    fn level(r: &Row) -> Option<&str> {
        r.level
    }

    fn name_key(r: &Row) -> Cow<'_, str> {
        Cow::Borrowed(r.name)
    }

    fn score(r: &Row) -> f64 {
        r.score
    }

    fn config() -> ListingConfig<Row> {
        ListingConfig {
            search_fields: vec![name as TextAccessor<Row>],
            facets: vec![FacetDef::categorical("level", level)],
            sort_keys: vec![
                SortKeyDef::text("name", name_key),
                SortKeyDef::number("score", score),
            ],
            default_sort: SortSpec::ascending("name"),
            default_page_size: 2,
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "delta", level: Some("good"), score: 10.0 },
            Row { name: "alpha", level: Some("fair"), score: 40.0 },
            Row { name: "charlie", level: None, score: 30.0 },
            Row { name: "bravo", level: Some("good"), score: 20.0 },
            Row { name: "echo", level: Some("good"), score: 50.0 },
        ]
    }

    fn names(page: &ListingPage<'_, Row>) -> Vec<&'static str> {
        page.items.iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_default_state_lists_everything() {
        let pipeline = ListingPipeline::new(config(), CodepointCollation);
        let data = rows();
        let state = pipeline.config().initial_state();
        let page = pipeline.run(&data, &state);
        assert_eq!(page.total_filtered, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(names(&page), vec!["alpha", "bravo"]);
    }

    #[test]
    fn test_facet_and_sort_and_page() {
        let pipeline = ListingPipeline::new(config(), CodepointCollation);
        let data = rows();
        let mut controller = pipeline.controller();
        controller.toggle_value("level", "good").unwrap();
        controller.set_sort("score", SortDirection::Descending).unwrap();
        controller.set_page(2);

        let page = pipeline.run(&data, controller.state());
        assert_eq!(page.total_filtered, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(names(&page), vec!["delta"]);
        assert_eq!(page.info.displayed_range, Some((3, 3)));
    }

    #[test]
    fn test_missing_facet_field_excluded() {
        let pipeline = ListingPipeline::new(config(), CodepointCollation);
        let data = rows();
        let mut controller = pipeline.controller();
        controller.set_values("level", ["good", "fair"]).unwrap();
        controller.set_page_size(10).unwrap();

        let page = pipeline.run(&data, controller.state());
        assert!(!names(&page).contains(&"charlie"));
        assert_eq!(page.total_filtered, 4);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let pipeline = ListingPipeline::new(config(), CodepointCollation);
        let data = rows();
        let mut controller = pipeline.controller();
        controller.set_search("zulu");

        let page = pipeline.run(&data, controller.state());
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_unknown_sort_key_falls_back_to_default() {
        let pipeline = ListingPipeline::new(config(), CodepointCollation);
        let data = rows();
        let sorted = pipeline.sort(data.iter().collect(), &SortSpec::ascending("height"));
        assert_eq!(sorted[0].name, "alpha");
    }
}
