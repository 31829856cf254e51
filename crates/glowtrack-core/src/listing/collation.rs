//! String collation used by text sort keys.
//!
//! The dashboard's primary locale is zh-CN, where code-point order puts
//! 张 before 李. Collation is therefore always passed in explicitly.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};
use icu_locid::Locale;

use super::{ListingError, ListingResult};

/// Display locale of the clinics' dashboards.
pub const DEFAULT_LOCALE: &str = "zh-CN";

/// Total order over display strings.
pub trait Collation {
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

impl<C: Collation + ?Sized> Collation for &C {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        (**self).compare(a, b)
    }
}

impl<C: Collation + ?Sized> Collation for Box<C> {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        (**self).compare(a, b)
    }
}

/// Locale-aware collation backed by CLDR data.
pub struct IcuCollation {
    locale: String,
    collator: Collator,
}

impl IcuCollation {
    /// Build a collator for a BCP-47 tag such as `zh-CN` or `en-US`.
    pub fn new(tag: &str) -> ListingResult<Self> {
        let locale: Locale = tag.parse().map_err(|e| ListingError::InvalidLocale {
            tag: tag.to_string(),
            reason: format!("{}", e),
        })?;

        let collator = Collator::try_new(&(&locale).into(), CollatorOptions::new()).map_err(|e| {
            ListingError::InvalidLocale {
                tag: tag.to_string(),
                reason: format!("{}", e),
            }
        })?;

        Ok(Self {
            locale: locale.to_string(),
            collator,
        })
    }

    /// Collator for the dashboard's default locale.
    pub fn default_locale() -> ListingResult<Self> {
        Self::new(DEFAULT_LOCALE)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl std::fmt::Debug for IcuCollation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IcuCollation")
            .field("locale", &self.locale)
            .finish()
    }
}

impl Collation for IcuCollation {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        self.collator.compare(a, b)
    }
}

/// Plain Unicode code-point order.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodepointCollation;

impl Collation for CodepointCollation {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        a.cmp(b)
    }
}
