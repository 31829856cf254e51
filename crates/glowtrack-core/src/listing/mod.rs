//! Search, facet, sort and paginate pipeline shared by the list screens.
//!
//! Pipeline: records → Filter → Sort → Paginate → page + counts
//!
//! The pipeline is generic over the record type; each screen supplies a
//! [`ListingConfig`] of field accessors (see [`patients`] and [`analyses`]).

mod collation;
mod filter;
mod paginate;
mod pipeline;
mod query;
mod sort;

pub mod analyses;
pub mod patients;

pub use collation::*;
pub use filter::*;
pub use paginate::*;
pub use pipeline::*;
pub use query::*;
pub use sort::*;

use thiserror::Error;

/// Listing errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ListingError {
    #[error("Unknown facet: {0}")]
    UnknownFacet(String),

    #[error("Facet {facet} expects a {expected} selection")]
    FacetMismatch { facet: String, expected: FacetShape },

    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("Page size must be at least 1")]
    InvalidPageSize,

    #[error("Invalid locale '{tag}': {reason}")]
    InvalidLocale { tag: String, reason: String },
}

pub type ListingResult<T> = Result<T, ListingError>;
