//! Flatten nested values into query-string key/value pairs.
//!
//! Records, mappings and sequences are walked recursively; every non-blank
//! leaf becomes one `path=value` pair, with path segments joined by `.`.
//!
//! # Example
//!
//! ```
//! use flatquery::prelude::*;
//!
//! #[derive(Introspect)]
//! struct Dimens {
//!     width: u32,
//!     height: u32,
//! }
//!
//! #[derive(Introspect)]
//! struct Logo {
//!     #[flatquery(tag = "url,omitempty")]
//!     url: String,
//!     dimens: Option<Dimens>,
//! }
//!
//! let logo = Logo {
//!     url: "https://x.test/favicon.ico".to_string(),
//!     dimens: Some(Dimens { width: 100, height: 120 }),
//! };
//!
//! let query = flatquery::to_query_string(&logo)?;
//! assert_eq!(
//!     query,
//!     "dimens.height=120&dimens.width=100&url=https%3A%2F%2Fx.test%2Ffavicon.ico"
//! );
//! # Ok::<(), flatquery::Error>(())
//! ```
//!
//! Types deriving `serde::Serialize` work too, through [`flatten_serialize`].
//!
//! The crate also ships a [`Redirect`] tower service and a [`serve`] loop to
//! run it, for sending plain HTTP traffic to another origin.

mod redirect;
mod server;
pub mod prelude;

pub use redirect::Redirect;
pub use server::serve;

// Re-export tower for service composition
pub use tower;

// Re-export core types
pub use flatquery_core::{
    DEFAULT_MAX_DEPTH, DEFAULT_SEPARATOR, Error, Field, FieldDescriptor, FlattenConfig,
    FlattenConfigBuilder, Flattener, Introspect, Record, Result, ResultMap, Scalar, ToQueryPairs,
    Value, first_non_empty, flatten, flatten_serialize, is_success_status, to_query_string,
    to_value,
};

// Re-export crates used in public signatures
pub use url;

// Re-export macros
pub use flatquery_macro::Introspect;
