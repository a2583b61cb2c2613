//! Runtime shape inspection.
//!
//! [`Introspect`] turns a typed value into the untyped [`Value`] the
//! flattener walks. Implement it with `#[derive(Introspect)]` for structs;
//! the implementations below cover the standard library.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use crate::{Scalar, Value};

/// Trait for types that expose their shape as a [`Value`].
///
/// This is automatically implemented by the `#[derive(Introspect)]` macro.
///
/// # Example
///
/// ```ignore
/// use flatquery::Introspect;
///
/// #[derive(Introspect)]
/// struct Logo {
///     #[flatquery(tag = "url,omitempty")]
///     url: String,
///     dimens: Option<Dimens>,
/// }
/// ```
pub trait Introspect {
    /// Describe this value.
    fn introspect(&self) -> Value;
}

impl Introspect for Value {
    fn introspect(&self) -> Value {
        self.clone()
    }
}

macro_rules! introspect_scalar {
    ($variant:ident as $target:ty: $($ty:ty),+) => {
        $(
            impl Introspect for $ty {
                fn introspect(&self) -> Value {
                    Value::Scalar(Scalar::$variant(<$target>::from(*self)))
                }
            }
        )+
    };
}

introspect_scalar!(Int as i64: i8, i16, i32, i64);
introspect_scalar!(UInt as u64: u8, u16, u32, u64);
introspect_scalar!(Float as f64: f32, f64);
introspect_scalar!(Bool as bool: bool);
introspect_scalar!(Char as char: char);

impl Introspect for isize {
    fn introspect(&self) -> Value {
        // isize is at most 64 bits on supported targets
        i64::try_from(*self).map_or_else(|_| Value::from(self.to_string()), Value::from)
    }
}

impl Introspect for usize {
    fn introspect(&self) -> Value {
        u64::try_from(*self).map_or_else(|_| Value::from(self.to_string()), Value::from)
    }
}

impl Introspect for str {
    fn introspect(&self) -> Value {
        Value::from(self)
    }
}

impl Introspect for String {
    fn introspect(&self) -> Value {
        Value::from(self.as_str())
    }
}

impl Introspect for () {
    fn introspect(&self) -> Value {
        Value::Empty
    }
}

impl<T: Introspect> Introspect for Option<T> {
    fn introspect(&self) -> Value {
        Value::Pointer(self.as_ref().map(|inner| Box::new(inner.introspect())))
    }
}

impl<T: Introspect + ?Sized> Introspect for &T {
    fn introspect(&self) -> Value {
        (**self).introspect()
    }
}

impl<T: Introspect + ?Sized> Introspect for Box<T> {
    fn introspect(&self) -> Value {
        (**self).introspect()
    }
}

impl<T: Introspect + ?Sized> Introspect for Rc<T> {
    fn introspect(&self) -> Value {
        (**self).introspect()
    }
}

impl<T: Introspect + ?Sized> Introspect for Arc<T> {
    fn introspect(&self) -> Value {
        (**self).introspect()
    }
}

impl<T: Introspect> Introspect for [T] {
    fn introspect(&self) -> Value {
        Value::Sequence(self.iter().map(Introspect::introspect).collect())
    }
}

impl<T: Introspect, const N: usize> Introspect for [T; N] {
    fn introspect(&self) -> Value {
        self.as_slice().introspect()
    }
}

impl<T: Introspect> Introspect for Vec<T> {
    fn introspect(&self) -> Value {
        self.as_slice().introspect()
    }
}

impl<T: Introspect> Introspect for VecDeque<T> {
    fn introspect(&self) -> Value {
        Value::Sequence(self.iter().map(Introspect::introspect).collect())
    }
}

impl<K: Introspect, V: Introspect, S> Introspect for HashMap<K, V, S> {
    fn introspect(&self) -> Value {
        Value::Mapping(
            self.iter()
                .map(|(key, value)| (key.introspect(), value.introspect()))
                .collect(),
        )
    }
}

impl<K: Introspect, V: Introspect> Introspect for BTreeMap<K, V> {
    fn introspect(&self) -> Value {
        Value::Mapping(
            self.iter()
                .map(|(key, value)| (key.introspect(), value.introspect()))
                .collect(),
        )
    }
}
