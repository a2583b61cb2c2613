//! Procedural macros for flatquery.
//!
//! This crate provides `#[derive(Introspect)]`, which describes a struct as a
//! `flatquery::Value::Record` so it can be flattened into query parameters.
//!
//! # Example
//!
//! ```ignore
//! use flatquery::prelude::*;
//!
//! #[derive(Introspect)]
//! struct Logo {
//!     #[flatquery(tag = "url,omitempty")]
//!     url: String,
//!     dimens: Option<Dimens>,
//! }
//!
//! let query = flatquery::to_query_string(&logo)?;
//! ```

mod introspect_derive;

use proc_macro::TokenStream;

/// Derive the `Introspect` trait for a struct.
///
/// The generated implementation returns a record named after the struct,
/// with one field per struct field in declaration order. A unit struct
/// carries no data and is described as `Value::Empty`.
///
/// # Struct Attributes
///
/// - `#[flatquery(rename_all = "camelCase")]` - Rename the declared name of every field
///
/// Supported case conventions:
/// - `lowercase`, `UPPERCASE`
/// - `camelCase`, `PascalCase`
/// - `snake_case`, `SCREAMING_SNAKE_CASE`
/// - `kebab-case`, `SCREAMING-KEBAB-CASE`
///
/// # Field Attributes
///
/// - `#[flatquery(tag = "name,omitempty")]` - Field annotation; its first comma segment is the external name
/// - `#[flatquery(rename = "name")]` - Shorthand for a tag holding only the name
/// - `#[flatquery(skip)]` - Leave the field out of the record
///
/// # Example
///
/// ```ignore
/// use flatquery::Introspect;
///
/// #[derive(Introspect)]
/// #[flatquery(rename_all = "camelCase")]
/// struct Search {
///     search_query: String,            // declared as "searchQuery"
///     #[flatquery(tag = "page,omitempty")]
///     page_number: Option<u32>,        // external name "page"
///     #[flatquery(skip)]
///     cache_key: String,
/// }
/// ```
#[proc_macro_derive(Introspect, attributes(flatquery))]
pub fn derive_introspect(input: TokenStream) -> TokenStream {
    introspect_derive::expand_introspect_derive(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
