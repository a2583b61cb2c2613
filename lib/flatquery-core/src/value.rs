//! Dynamic value model.
//!
//! A [`Value`] is the untyped shape the flattener walks. It is produced either
//! by the [`Introspect`](crate::Introspect) trait (usually derived) or by
//! capturing any `serde::Serialize` type with [`to_value`](crate::to_value).
//!
//! # Example
//!
//! ```
//! use flatquery_core::{FieldDescriptor, Record, Scalar, Value};
//!
//! let logo = Record::new("Logo")
//!     .field(FieldDescriptor::tagged("URL", "url,omitempty"), Value::from("https://x.test/favicon.ico"));
//!
//! assert_eq!(logo.fields().len(), 1);
//! assert_eq!(logo.fields().first().map(|f| f.name()), Some("url"));
//! ```

use std::borrow::Cow;
use std::fmt;

// ============================================================================
// Scalar
// ============================================================================

/// A leaf value rendered with its `Display` form.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Boolean, rendered as `true` / `false`.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point number.
    Float(f64),
    /// Single character.
    Char(char),
    /// String.
    Str(String),
}

impl Scalar {
    /// Returns `true` for the empty string.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Str(s) if s.is_empty())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
        }
    }
}

// ============================================================================
// Fields and records
// ============================================================================

/// Serialization-facing metadata of one record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    declared: Cow<'static, str>,
    annotation: Option<Cow<'static, str>>,
}

impl FieldDescriptor {
    /// Descriptor for a field without annotation.
    #[must_use]
    pub fn new(declared: impl Into<Cow<'static, str>>) -> Self {
        Self {
            declared: declared.into(),
            annotation: None,
        }
    }

    /// Descriptor for a field carrying a serialization annotation
    /// such as `"name,omitempty"`.
    #[must_use]
    pub fn tagged(
        declared: impl Into<Cow<'static, str>>,
        annotation: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            declared: declared.into(),
            annotation: Some(annotation.into()),
        }
    }

    /// Name the field was declared with.
    #[must_use]
    pub fn declared(&self) -> &str {
        &self.declared
    }

    /// Raw annotation, if any.
    #[must_use]
    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    /// The name used in flattened keys.
    ///
    /// The first comma-delimited segment of the annotation wins; an absent
    /// annotation or an empty first segment falls back to the declared name.
    #[must_use]
    pub fn external_name(&self) -> &str {
        self.annotation()
            .and_then(|tag| tag.split(',').next())
            .filter(|name| !name.is_empty())
            .unwrap_or(&*self.declared)
    }
}

/// A record field: descriptor plus value.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    descriptor: FieldDescriptor,
    value: Value,
}

impl Field {
    /// Creates a new field.
    #[must_use]
    pub fn new(descriptor: FieldDescriptor, value: Value) -> Self {
        Self { descriptor, value }
    }

    /// Field metadata.
    #[must_use]
    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    /// External name of the field.
    #[must_use]
    pub fn name(&self) -> &str {
        self.descriptor.external_name()
    }

    /// Field value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// A struct-like value with named fields in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    name: Cow<'static, str>,
    fields: Vec<Field>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, descriptor: FieldDescriptor, value: Value) -> Self {
        self.push(descriptor, value);
        self
    }

    /// Appends a field in place.
    pub fn push(&mut self, descriptor: FieldDescriptor, value: Value) {
        self.fields.push(Field::new(descriptor, value));
    }

    /// Type name of the record.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

// ============================================================================
// Value
// ============================================================================

/// Untyped input of the flattener.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Nil / absent.
    #[default]
    Empty,
    /// Leaf value.
    Scalar(Scalar),
    /// Struct-like value.
    Record(Record),
    /// Ordered sequence.
    Sequence(Vec<Value>),
    /// Key/value entries in insertion order.
    Mapping(Vec<(Value, Value)>),
    /// Nullable indirection, dereferenced transparently.
    Pointer(Option<Box<Value>>),
}

impl Value {
    /// A pointer to the given value.
    #[must_use]
    pub fn pointer(value: Value) -> Self {
        Self::Pointer(Some(Box::new(value)))
    }

    /// The nil pointer.
    #[must_use]
    pub const fn null() -> Self {
        Self::Pointer(None)
    }

    /// Dereference one pointer level.
    ///
    /// Returns `None` for a nil pointer; non-pointer values are returned as is.
    #[must_use]
    pub fn deref_once(&self) -> Option<&Value> {
        match self {
            Self::Pointer(target) => target.as_deref(),
            other => Some(other),
        }
    }

    /// Follow pointers down to the first non-pointer value.
    #[must_use]
    pub fn resolve(&self) -> Option<&Value> {
        let mut current = self;
        while let Self::Pointer(target) = current {
            current = target.as_deref()?;
        }
        Some(current)
    }

    /// Returns `true` if this value contributes nothing to a query string.
    ///
    /// Blank values are: nil / absent, the empty string, sequences whose
    /// elements are all blank (including the empty one) and zero-length
    /// mappings. Pointers are judged by their target.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self.resolve() {
            None | Some(Self::Empty) => true,
            Some(Self::Scalar(scalar)) => scalar.is_blank(),
            Some(Self::Sequence(items)) => items.iter().all(Self::is_blank),
            Some(Self::Mapping(entries)) => entries.is_empty(),
            Some(Self::Record(_) | Self::Pointer(_)) => false,
        }
    }

    /// Returns `true` for records, sequences and mappings (through pointers).
    #[must_use]
    pub fn is_composite(&self) -> bool {
        matches!(
            self.resolve(),
            Some(Self::Record(_) | Self::Sequence(_) | Self::Mapping(_))
        )
    }
}

/// Default human-readable rendering.
///
/// Scalars use their own `Display`, sequences join their non-blank elements
/// with `,`, records and mappings render as `{key:value,...}`. Blank values
/// render as the empty string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty | Self::Pointer(None) => Ok(()),
            Self::Pointer(Some(target)) => target.fmt(f),
            Self::Scalar(scalar) => scalar.fmt(f),
            Self::Sequence(items) => {
                let mut first = true;
                for item in items.iter().filter(|item| !item.is_blank()) {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    item.fmt(f)?;
                }
                Ok(())
            }
            Self::Record(record) => {
                let entries = record
                    .fields()
                    .iter()
                    .map(|field| (field.name().to_string(), field.value()));
                write_braced(f, entries)
            }
            Self::Mapping(entries) => {
                let entries = entries.iter().map(|(key, value)| (key.to_string(), value));
                write_braced(f, entries)
            }
        }
    }
}

fn write_braced<'a>(
    f: &mut fmt::Formatter<'_>,
    entries: impl Iterator<Item = (String, &'a Value)>,
) -> fmt::Result {
    f.write_str("{")?;
    let mut first = true;
    for (key, value) in entries.filter(|(_, value)| !value.is_blank()) {
        if !first {
            f.write_str(",")?;
        }
        first = false;
        write!(f, "{key}:{value}")?;
    }
    f.write_str("}")
}

// ============================================================================
// Conversions
// ============================================================================

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Self::Record(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Scalar(Scalar::Str(value.to_string()))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Scalar(Scalar::Str(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Scalar(Scalar::Bool(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Scalar(Scalar::Int(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Scalar(Scalar::UInt(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Scalar(Scalar::Float(value))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Self::Sequence(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        Self::Pointer(value.map(|inner| Box::new(inner.into())))
    }
}
