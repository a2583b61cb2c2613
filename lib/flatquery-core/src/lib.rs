//! Core types and traits for flatquery.
//!
//! This crate provides the foundational types used by flatquery:
//! - [`Value`], [`Record`] and [`Scalar`] - Untyped description of a value's shape
//! - [`Introspect`] - Trait exposing a typed value as a [`Value`]
//! - [`to_value`] - Capture of any `serde::Serialize` type as a [`Value`]
//! - [`Flattener`] and [`FlattenConfig`] - Conversion of a [`Value`] to key/value pairs
//! - [`ResultMap`] - Ordered multimap produced by the flattener
//! - [`Error`] and [`Result`] - Error handling
//! - [`ToQueryPairs`] - Trait for converting types to query parameter pairs
//! - [`is_success_status`] and [`first_non_empty`] - Small helpers

mod capture;
mod config;
mod error;
mod flatten;
mod introspect;
pub mod prelude;
mod result_map;
mod status;
mod text;
mod value;

pub use capture::to_value;
pub use config::{DEFAULT_MAX_DEPTH, DEFAULT_SEPARATOR, FlattenConfig, FlattenConfigBuilder};
pub use error::{Error, Result};
pub use flatten::{Flattener, flatten, flatten_serialize, to_query_string};
pub use introspect::Introspect;
pub use result_map::ResultMap;
pub use status::is_success_status;
pub use text::first_non_empty;
pub use value::{Field, FieldDescriptor, Record, Scalar, Value};

/// Trait for types that can be converted to query parameter pairs.
///
/// Implemented by [`ResultMap`], so flattened values plug into any API that
/// takes a list of pairs.
///
/// # Example
///
/// ```
/// use flatquery_core::{ResultMap, ToQueryPairs};
///
/// let map: ResultMap = [("q", "rust"), ("page", "2")].into_iter().collect();
/// assert_eq!(map.to_query_pairs().len(), 2);
/// ```
pub trait ToQueryPairs {
    /// Convert this type to a vector of key-value pairs for query parameters.
    fn to_query_pairs(&self) -> Vec<(String, String)>;
}
