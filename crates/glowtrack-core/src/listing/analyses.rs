//! Analysis history screen.

use std::borrow::Cow;

use chrono::NaiveDate;

use super::filter::{FacetDef, TextAccessor};
use super::paginate::DEFAULT_PAGE_SIZE;
use super::pipeline::ListingConfig;
use super::sort::{SortKeyDef, SortSpec};
use crate::models::AnalysisRecord;

pub const EFFECT_LEVEL_FACET: &str = "effect_level";
pub const TREATMENT_TYPE_FACET: &str = "treatment_type";
pub const ANALYSIS_DATE_FACET: &str = "analysis_date";

pub const SORT_BY_DATE: &str = "analysis_date";
pub const SORT_BY_IMPROVEMENT: &str = "overall_improvement";
pub const SORT_BY_PATIENT: &str = "patient_name";

fn patient_name(a: &AnalysisRecord) -> Option<&str> {
    Some(&a.patient_name)
}

fn treatment_type(a: &AnalysisRecord) -> Option<&str> {
    Some(&a.treatment_type)
}

fn treatment_area(a: &AnalysisRecord) -> Option<&str> {
    Some(&a.treatment_area)
}

fn effect_level(a: &AnalysisRecord) -> Option<&str> {
    Some(a.effect_level.as_str())
}

fn analysis_date(a: &AnalysisRecord) -> Option<NaiveDate> {
    Some(a.analysis_date)
}

fn improvement(a: &AnalysisRecord) -> f64 {
    a.overall_improvement
}

fn patient_sort_name(a: &AnalysisRecord) -> Cow<'_, str> {
    Cow::Borrowed(&a.patient_name)
}

/// Search by patient, treatment type or area; newest analyses first.
pub fn analysis_listing() -> ListingConfig<AnalysisRecord> {
    let search_fields: Vec<TextAccessor<AnalysisRecord>> =
        vec![patient_name, treatment_type, treatment_area];

    ListingConfig {
        search_fields,
        facets: vec![
            FacetDef::categorical(EFFECT_LEVEL_FACET, effect_level),
            FacetDef::categorical(TREATMENT_TYPE_FACET, treatment_type),
            FacetDef::date_range(ANALYSIS_DATE_FACET, analysis_date),
        ],
        sort_keys: vec![
            SortKeyDef::date(SORT_BY_DATE, analysis_date),
            SortKeyDef::number(SORT_BY_IMPROVEMENT, improvement),
            SortKeyDef::text(SORT_BY_PATIENT, patient_sort_name),
        ],
        default_sort: SortSpec::descending(SORT_BY_DATE),
        default_page_size: DEFAULT_PAGE_SIZE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::collation::IcuCollation;
    use crate::listing::pipeline::ListingPipeline;
    use crate::listing::sort::SortDirection;
    use crate::models::EffectLevel;

    fn record(id: &str, name: &str, improvement: f64, day: u32) -> AnalysisRecord {
        let analysis_date = NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        let treatment_date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        AnalysisRecord {
            id: id.into(),
            patient_id: format!("patient-{}", id),
            patient_name: name.into(),
            treatment_type: "玻尿酸填充".into(),
            treatment_area: "苹果肌".into(),
            analysis_date,
            treatment_date,
            days_after: (analysis_date - treatment_date).num_days() as u32,
            overall_improvement: improvement,
            effect_level: EffectLevel::from_improvement(improvement),
            wrinkles_score: 0.0,
            skin_quality_score: 0.0,
            contour_score: 0.0,
            before_image_url: None,
            after_image_url: None,
        }
    }

    fn pipeline() -> ListingPipeline<AnalysisRecord, IcuCollation> {
        ListingPipeline::new(analysis_listing(), IcuCollation::default_locale().unwrap())
    }

    fn names(page: &crate::listing::ListingPage<'_, AnalysisRecord>) -> Vec<String> {
        page.items.iter().map(|a| a.patient_name.clone()).collect()
    }

    #[test]
    fn test_improvement_descending() {
        let data = vec![
            record("1", "张三", 50.0, 1),
            record("2", "李四", 80.0, 2),
            record("3", "王五", 30.0, 3),
        ];
        let p = pipeline();
        let mut c = p.controller();
        c.set_sort(SORT_BY_IMPROVEMENT, SortDirection::Descending).unwrap();
        let page = p.run(&data, c.state());
        assert_eq!(names(&page), vec!["李四", "张三", "王五"]);
    }

    #[test]
    fn test_default_is_newest_first() {
        let data = vec![
            record("1", "张三", 50.0, 1),
            record("2", "李四", 80.0, 9),
            record("3", "王五", 30.0, 5),
        ];
        let p = pipeline();
        let page = p.run(&data, p.controller().state());
        assert_eq!(names(&page), vec!["李四", "王五", "张三"]);
    }

    #[test]
    fn test_effect_level_and_date_range() {
        let data = vec![
            record("1", "张三", 55.0, 1),
            record("2", "李四", 35.0, 10),
            record("3", "王五", 60.0, 20),
            record("4", "赵六", 5.0, 10),
        ];
        let p = pipeline();
        let mut c = p.controller();
        c.toggle_value(EFFECT_LEVEL_FACET, EffectLevel::Excellent.as_str()).unwrap();
        c.toggle_value(EFFECT_LEVEL_FACET, EffectLevel::Good.as_str()).unwrap();
        c.set_date_range(
            ANALYSIS_DATE_FACET,
            Some((
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            )),
        )
        .unwrap();

        let page = p.run(&data, c.state());
        assert_eq!(page.total_filtered, 2);
        assert_eq!(names(&page), vec!["李四", "张三"]);
        assert_eq!(c.state().active_filter_count(), 3);
    }

    #[test]
    fn test_search_treatment_area() {
        let mut other = record("2", "李四", 35.0, 10);
        other.treatment_area = "额头".into();
        let data = vec![record("1", "张三", 55.0, 1), other];
        let p = pipeline();
        let mut c = p.controller();
        c.set_search("额");
        let page = p.run(&data, c.state());
        assert_eq!(names(&page), vec!["李四"]);
    }
}
