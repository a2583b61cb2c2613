//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use flatquery_core::prelude::*;
//! ```

pub use crate::{
    Error, FlattenConfig, Flattener, Introspect, ResultMap, Result, ToQueryPairs, Value, flatten,
    flatten_serialize, to_query_string, to_value,
};
