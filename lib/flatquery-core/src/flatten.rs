//! Recursive flattening of nested values into path-keyed pairs.
//!
//! Records contribute their fields' external names as path segments, mappings
//! contribute the rendered map key and sequences contribute the element
//! index. Segments are joined with the configured separator (`.` by default).
//!
//! Errors raised below the top level are best-effort: a nested value that
//! fails to flatten is skipped and its siblings are kept. The only exception
//! is [`Error::DepthExceeded`], which always reaches the caller.
//!
//! # Example
//!
//! ```
//! use flatquery_core::{FieldDescriptor, Flattener, Record, Value};
//!
//! let dimens = Record::new("Dimens")
//!     .field(FieldDescriptor::new("width"), Value::from(100_u64))
//!     .field(FieldDescriptor::new("height"), Value::from(120_u64));
//! let logo = Record::new("Logo")
//!     .field(FieldDescriptor::new("url"), Value::from("https://x.test/favicon.ico"))
//!     .field(FieldDescriptor::new("dimens"), dimens.into());
//!
//! let map = Flattener::new()
//!     .flatten(&logo.into())
//!     .expect("flatten")
//!     .unwrap_or_default();
//!
//! assert_eq!(map.get("dimens.width"), Some("100"));
//! assert_eq!(map.get("url"), Some("https://x.test/favicon.ico"));
//! ```

use serde::Serialize;
use tracing::{trace, warn};

use crate::{Error, FlattenConfig, Introspect, Record, ResultMap, Result, Value, to_value};

/// Outcome of flattening a value nested inside a container.
enum Nested {
    /// Not a container: the caller renders the value itself.
    Leaf,
    /// A container, flattened into its own map.
    Composite(ResultMap),
    /// Flattening failed; the value is dropped.
    Skipped,
}

/// Flattens [`Value`]s into [`ResultMap`]s.
///
/// The flattener is stateless apart from its configuration; one instance can
/// be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct Flattener {
    config: FlattenConfig,
}

impl Flattener {
    /// Create a flattener with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a flattener with a custom configuration.
    #[must_use]
    pub fn with_config(config: FlattenConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &FlattenConfig {
        &self.config
    }

    /// Flatten a value.
    ///
    /// Returns `Ok(None)` when the value has nothing to contribute on its
    /// own: a nil pointer, a scalar, or an empty sequence. Records and
    /// mappings always produce a map, possibly empty.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidValue`] if a pointer dereferences to another pointer.
    /// - [`Error::DepthExceeded`] if nesting goes past the configured maximum.
    pub fn flatten(&self, value: &Value) -> Result<Option<ResultMap>> {
        self.flatten_at(value, 0)
    }

    /// Flatten a sequence, keying composite elements by index.
    ///
    /// Each composite element is encoded as a single query string. Elements
    /// that are not containers are dropped at this level.
    pub fn flatten_sequence(&self, items: &[Value]) -> Result<Option<ResultMap>> {
        self.flatten_sequence_at(items, 0)
    }

    /// Flatten the entries of a mapping, keyed by the rendered map key.
    pub fn flatten_mapping(&self, entries: &[(Value, Value)]) -> Result<Option<ResultMap>> {
        self.flatten_mapping_at(entries, 0).map(Some)
    }

    /// Flatten anything implementing [`Introspect`].
    pub fn flatten_introspect<T: Introspect + ?Sized>(&self, value: &T) -> Result<ResultMap> {
        self.flatten(&value.introspect())
            .map(Option::unwrap_or_default)
    }

    /// Flatten anything implementing [`serde::Serialize`].
    pub fn flatten_serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<ResultMap> {
        let value = to_value(value)?;
        self.flatten(&value).map(Option::unwrap_or_default)
    }

    fn flatten_at(&self, value: &Value, depth: usize) -> Result<Option<ResultMap>> {
        let value = match value {
            Value::Pointer(None) => return Ok(None),
            Value::Pointer(Some(target)) => target.as_ref(),
            other => other,
        };

        match value {
            Value::Record(record) => {
                self.check_depth(depth)?;
                self.flatten_record(record, depth).map(Some)
            }
            Value::Sequence(items) => {
                self.check_depth(depth)?;
                self.flatten_sequence_at(items, depth)
            }
            Value::Mapping(entries) => {
                self.check_depth(depth)?;
                self.flatten_mapping_at(entries, depth).map(Some)
            }
            Value::Scalar(_) | Value::Empty => Ok(None),
            // Only one level of indirection is followed.
            Value::Pointer(_) => Err(Error::InvalidValue),
        }
    }

    fn flatten_record(&self, record: &Record, depth: usize) -> Result<ResultMap> {
        let mut out = ResultMap::new();

        for field in record.fields() {
            let Some(value) = field.value().deref_once() else {
                continue;
            };
            let name = field.name();

            match value {
                Value::Empty => {}
                // Only one level of indirection is followed.
                Value::Pointer(_) => {
                    trace!(
                        path = name,
                        error = %Error::InvalidValue,
                        "skipping value that failed to flatten"
                    );
                }
                Value::Mapping(entries) => {
                    for (key, entry) in self.ordered(entries) {
                        let path = self.join(name, &key);
                        let nested = self.nested(entry, depth + 2, &path)?;
                        self.emit(&mut out, path, entry, nested);
                    }
                }
                // One nested level is unrolled here; deeper levels come from
                // the recursive call.
                Value::Record(inner) => {
                    for inner_field in inner.fields() {
                        let path = self.join(name, inner_field.name());
                        let nested = self.nested(inner_field.value(), depth + 2, &path)?;
                        self.emit(&mut out, path, inner_field.value(), nested);
                    }
                }
                other => {
                    if !other.is_blank() {
                        out.add(name, other.to_string());
                    }
                }
            }
        }

        Ok(out)
    }

    fn flatten_sequence_at(&self, items: &[Value], depth: usize) -> Result<Option<ResultMap>> {
        if items.is_empty() {
            return Ok(None);
        }

        let mut out = ResultMap::new();
        for (index, item) in items.iter().enumerate() {
            let path = index.to_string();
            if let Nested::Composite(inner) = self.nested(item, depth + 1, &path)? {
                if !inner.is_empty() {
                    out.add(path, inner.encode());
                }
            }
        }

        Ok(Some(out))
    }

    fn flatten_mapping_at(&self, entries: &[(Value, Value)], depth: usize) -> Result<ResultMap> {
        let mut out = ResultMap::new();

        for (key, entry) in self.ordered(entries) {
            let nested = self.nested(entry, depth + 1, &key)?;
            self.emit(&mut out, key, entry, nested);
        }

        Ok(out)
    }

    /// Flatten a nested value, swallowing every error but depth overflow.
    fn nested(&self, value: &Value, depth: usize, path: &str) -> Result<Nested> {
        match self.flatten_at(value, depth) {
            Ok(Some(map)) => Ok(Nested::Composite(map)),
            Ok(None) => Ok(Nested::Leaf),
            Err(err @ Error::DepthExceeded { .. }) => Err(err),
            Err(err) => {
                trace!(path, error = %err, "skipping value that failed to flatten");
                Ok(Nested::Skipped)
            }
        }
    }

    fn emit(&self, out: &mut ResultMap, path: String, value: &Value, nested: Nested) {
        match nested {
            Nested::Leaf => {
                if !value.is_blank() {
                    out.add(path, value.to_string());
                }
            }
            Nested::Composite(inner) => out.merge_prefixed(&path, &self.config.separator, inner),
            Nested::Skipped => {}
        }
    }

    /// Mapping entries with rendered keys, in visiting order.
    fn ordered<'a>(&self, entries: &'a [(Value, Value)]) -> Vec<(String, &'a Value)> {
        let mut ordered: Vec<_> = entries
            .iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();
        if self.config.sort_map_keys {
            ordered.sort_by(|(a, _), (b, _)| a.cmp(b));
        }
        ordered
    }

    fn join(&self, parent: &str, child: &str) -> String {
        format!("{parent}{}{child}", self.config.separator)
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        let max = self.config.max_depth;
        if depth > max {
            warn!(max, "value nesting exceeds maximum depth");
            return Err(Error::DepthExceeded { max });
        }
        Ok(())
    }
}

/// Flatten a value with the default configuration.
///
/// A value with nothing to contribute yields an empty map.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
///
/// let mut filters = BTreeMap::new();
/// filters.insert("lang", "rust");
/// filters.insert("sort", "");
///
/// let map = flatquery_core::flatten(&filters).expect("flatten");
/// assert_eq!(map.get("lang"), Some("rust"));
/// assert!(!map.contains_key("sort"));
/// ```
pub fn flatten<T: Introspect + ?Sized>(value: &T) -> Result<ResultMap> {
    Flattener::new().flatten_introspect(value)
}

/// Flatten a `serde::Serialize` value with the default configuration.
pub fn flatten_serialize<T: Serialize + ?Sized>(value: &T) -> Result<ResultMap> {
    Flattener::new().flatten_serialize(value)
}

/// Flatten a value and encode it as a query string.
pub fn to_query_string<T: Introspect + ?Sized>(value: &T) -> Result<String> {
    flatten(value).map(|map| map.encode())
}
