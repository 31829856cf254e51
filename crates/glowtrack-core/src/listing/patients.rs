//! Patient list screen.

use std::borrow::Cow;

use chrono::{DateTime, Utc};

use super::filter::{FacetDef, TextAccessor};
use super::paginate::DEFAULT_PAGE_SIZE;
use super::pipeline::ListingConfig;
use super::sort::{SortKeyDef, SortSpec};
use crate::models::Patient;

pub const SKIN_TYPE_FACET: &str = "skin_type";
pub const TREATMENT_COUNT_FACET: &str = "total_treatments";

pub const SORT_BY_NAME: &str = "name";
pub const SORT_BY_CREATED: &str = "created_at";
pub const SORT_BY_TREATMENTS: &str = "total_treatments";

/// A preset in the treatment-count filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreatmentCountRange {
    pub label: &'static str,
    pub min: u32,
    pub max: u32,
}

pub const TREATMENT_COUNT_RANGES: [TreatmentCountRange; 4] = [
    TreatmentCountRange { label: "无治疗", min: 0, max: 0 },
    TreatmentCountRange { label: "1-3次", min: 1, max: 3 },
    TreatmentCountRange { label: "4-10次", min: 4, max: 10 },
    TreatmentCountRange { label: "10次以上", min: 11, max: 999 },
];

impl TreatmentCountRange {
    /// The preset whose bounds equal `(min, max)`, for the selected-filter chips.
    pub fn find(min: f64, max: f64) -> Option<&'static TreatmentCountRange> {
        TREATMENT_COUNT_RANGES
            .iter()
            .find(|r| f64::from(r.min) == min && f64::from(r.max) == max)
    }

    pub fn bounds(&self) -> (f64, f64) {
        (f64::from(self.min), f64::from(self.max))
    }
}

fn first_name(p: &Patient) -> Option<&str> {
    Some(&p.first_name)
}

fn last_name(p: &Patient) -> Option<&str> {
    Some(&p.last_name)
}

fn email(p: &Patient) -> Option<&str> {
    p.email.as_deref()
}

fn phone(p: &Patient) -> Option<&str> {
    p.phone.as_deref()
}

fn skin_type(p: &Patient) -> Option<&str> {
    p.skin_type.as_ref().map(|t| t.as_str())
}

fn treatment_count(p: &Patient) -> Option<f64> {
    Some(f64::from(p.total_treatments))
}

fn full_name(p: &Patient) -> Cow<'_, str> {
    Cow::Owned(p.full_name())
}

fn created_at(p: &Patient) -> Option<DateTime<Utc>> {
    p.created_at
}

fn total_treatments(p: &Patient) -> f64 {
    f64::from(p.total_treatments)
}

/// Search by name, email or phone; filter by skin type and treatment count.
pub fn patient_listing() -> ListingConfig<Patient> {
    let search_fields: Vec<TextAccessor<Patient>> = vec![first_name, last_name, email, phone];

    ListingConfig {
        search_fields,
        facets: vec![
            FacetDef::categorical(SKIN_TYPE_FACET, skin_type),
            FacetDef::number_range(TREATMENT_COUNT_FACET, treatment_count),
        ],
        sort_keys: vec![
            SortKeyDef::text(SORT_BY_NAME, full_name),
            SortKeyDef::timestamp(SORT_BY_CREATED, created_at),
            SortKeyDef::number(SORT_BY_TREATMENTS, total_treatments),
        ],
        default_sort: SortSpec::ascending(SORT_BY_NAME),
        default_page_size: DEFAULT_PAGE_SIZE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::collation::IcuCollation;
    use crate::listing::pipeline::ListingPipeline;
    use crate::listing::sort::SortDirection;
    use crate::models::SkinType;

    fn patient(id: &str, first: &str, last: &str) -> Patient {
        Patient::new(id, "clinic-demo-001", first, last)
    }

    fn pipeline() -> ListingPipeline<Patient, IcuCollation> {
        ListingPipeline::new(patient_listing(), IcuCollation::default_locale().unwrap())
    }

    #[test]
    fn test_search_by_surname_character() {
        let data = vec![patient("1", "张", "三"), patient("2", "李", "四")];
        let p = pipeline();
        let mut c = p.controller();
        c.set_search("张");
        let page = p.run(&data, c.state());
        assert_eq!(page.total_filtered, 1);
        assert_eq!(page.items[0].id, "1");
    }

    #[test]
    fn test_search_email_and_phone() {
        let mut a = patient("1", "Ann", "Lee");
        a.email = Some("Ann.Lee@Example.com".into());
        let mut b = patient("2", "Bo", "Wu");
        b.phone = Some("138-0000-1234".into());
        let data = vec![a, b];

        let p = pipeline();
        let mut c = p.controller();
        c.set_search("example.COM".to_lowercase());
        assert_eq!(p.run(&data, c.state()).items[0].id, "1");
        c.set_search("1234");
        assert_eq!(p.run(&data, c.state()).items[0].id, "2");
    }

    #[test]
    fn test_skin_type_facet_excludes_unknown() {
        let mut oily = patient("1", "王", "五");
        oily.skin_type = Some(SkinType::Oily);
        let unknown = patient("2", "赵", "六");
        let data = vec![oily, unknown];

        let p = pipeline();
        let mut c = p.controller();
        c.toggle_value(SKIN_TYPE_FACET, SkinType::Oily.as_str()).unwrap();
        let page = p.run(&data, c.state());
        assert_eq!(page.total_filtered, 1);
        assert_eq!(page.items[0].id, "1");
    }

    #[test]
    fn test_treatment_count_preset() {
        let mut data = Vec::new();
        for (i, count) in [0u32, 2, 5, 12].iter().enumerate() {
            let mut p = patient(&i.to_string(), "A", "B");
            p.total_treatments = *count;
            data.push(p);
        }

        let p = pipeline();
        let mut c = p.controller();
        let preset = TREATMENT_COUNT_RANGES[2];
        c.set_number_range(TREATMENT_COUNT_FACET, Some(preset.bounds())).unwrap();
        let page = p.run(&data, c.state());
        assert_eq!(page.total_filtered, 1);
        assert_eq!(page.items[0].total_treatments, 5);
        assert_eq!(TreatmentCountRange::find(4.0, 10.0).map(|r| r.label), Some("4-10次"));
    }

    #[test]
    fn test_name_sort_uses_pinyin() {
        let data = vec![
            patient("1", "张", "三"),
            patient("2", "李", "四"),
            patient("3", "王", "五"),
        ];
        let p = pipeline();
        let c = p.controller();
        let page = p.run(&data, c.state());
        let ids: Vec<&str> = page.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "1"]);
    }

    #[test]
    fn test_sort_by_treatments_descending() {
        let mut data = Vec::new();
        for (id, count) in [("a", 3u32), ("b", 9), ("c", 1)] {
            let mut p = patient(id, "X", "Y");
            p.total_treatments = count;
            data.push(p);
        }
        let p = pipeline();
        let mut c = p.controller();
        c.set_sort(SORT_BY_TREATMENTS, SortDirection::Descending).unwrap();
        let page = p.run(&data, c.state());
        let ids: Vec<&str> = page.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }
}
