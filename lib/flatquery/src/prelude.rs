//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types, functions, and macros
//! for easy glob importing:
//!
//! ```ignore
//! use flatquery::prelude::*;
//! ```

pub use crate::{
    Error, FlattenConfig, Flattener, Introspect, Redirect, Result, ResultMap, ToQueryPairs, Value,
    flatten, flatten_serialize, to_query_string,
};
pub use serde::Serialize;
