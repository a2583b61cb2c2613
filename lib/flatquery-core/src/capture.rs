//! Capture of `serde::Serialize` types into [`Value`].
//!
//! Any type deriving `Serialize` can be flattened: its serialized form is
//! recorded as a [`Value`] tree first. Serde field names (after `rename` /
//! `rename_all`) become the declared names of record fields.
//!
//! | serde data model | [`Value`] |
//! |------------------|-----------|
//! | struct | `Record` |
//! | seq, tuple, tuple struct, bytes | `Sequence` |
//! | map | `Mapping` (scalar keys only) |
//! | `Option` | `Pointer` |
//! | unit, unit struct | `Empty` |
//! | unit variant | `Scalar::Str(variant)` |
//! | newtype / tuple / struct variant | single-entry `Mapping` keyed by variant |

use serde::Serialize;
use serde::ser::{self, Error as _};

use crate::{Error, FieldDescriptor, Record, Result, Scalar, Value};

/// Capture a serializable value as a [`Value`].
///
/// # Errors
///
/// Returns [`Error::Capture`] if the value's `Serialize` implementation fails
/// or a map key is not a scalar.
///
/// # Example
///
/// ```
/// use flatquery_core::{Value, to_value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Search { q: String, page: Option<u32> }
///
/// let value = to_value(&Search { q: "rust".to_string(), page: None }).expect("capture");
/// let Value::Record(record) = value else { panic!("expected a record") };
/// assert_eq!(record.name(), "Search");
/// assert_eq!(record.fields().len(), 2);
/// ```
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueCapture)
}

struct ValueCapture;

impl ser::Serializer for ValueCapture {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = CaptureSeq;
    type SerializeTuple = CaptureSeq;
    type SerializeTupleStruct = CaptureSeq;
    type SerializeTupleVariant = CaptureTupleVariant;
    type SerializeMap = CaptureMap;
    type SerializeStruct = CaptureStruct;
    type SerializeStructVariant = CaptureStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Scalar(Scalar::Bool(v)))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Scalar(Scalar::Int(v)))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        Ok(i64::try_from(v).map_or_else(|_| Value::from(v.to_string()), Value::from))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::Scalar(Scalar::UInt(v)))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        Ok(u64::try_from(v).map_or_else(|_| Value::from(v.to_string()), Value::from))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Scalar(Scalar::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::Scalar(Scalar::Char(v)))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Sequence(
            v.iter().map(|b| Value::from(u64::from(*b))).collect(),
        ))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::null())
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self).map(Value::pointer)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Empty)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Empty)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::from(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let inner = value.serialize(self)?;
        Ok(tagged(variant, inner))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(CaptureSeq {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(CaptureTupleVariant {
            variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(CaptureMap {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            pending_key: None,
        })
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(CaptureStruct {
            record: Record::new(name),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(CaptureStructVariant {
            variant,
            record: Record::new(variant),
        })
    }
}

/// Externally tagged enum variant: `{variant: inner}`.
fn tagged(variant: &'static str, inner: Value) -> Value {
    Value::Mapping(vec![(Value::from(variant), inner)])
}

struct CaptureSeq {
    items: Vec<Value>,
}

impl ser::SerializeSeq for CaptureSeq {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Sequence(self.items))
    }
}

impl ser::SerializeTuple for CaptureSeq {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for CaptureSeq {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

struct CaptureTupleVariant {
    variant: &'static str,
    items: Vec<Value>,
}

impl ser::SerializeTupleVariant for CaptureTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(tagged(self.variant, Value::Sequence(self.items)))
    }
}

struct CaptureMap {
    entries: Vec<(Value, Value)>,
    pending_key: Option<Value>,
}

impl ser::SerializeMap for CaptureMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = to_value(key)?;
        if !matches!(key.resolve(), Some(Value::Scalar(_))) {
            return Err(Error::custom("map key must be a scalar"));
        }
        self.pending_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| Error::custom("map value serialized before its key"))?;
        self.entries.push((key, to_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Mapping(self.entries))
    }
}

struct CaptureStruct {
    record: Record,
}

impl ser::SerializeStruct for CaptureStruct {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.record.push(FieldDescriptor::new(key), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Record(self.record))
    }
}

struct CaptureStructVariant {
    variant: &'static str,
    record: Record,
}

impl ser::SerializeStructVariant for CaptureStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.record.push(FieldDescriptor::new(key), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(tagged(self.variant, Value::Record(self.record)))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use assert2::let_assert;
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Dimens {
        width: u32,
        #[serde(rename = "h")]
        height: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        depth: Option<u32>,
    }

    #[derive(Serialize)]
    enum Shape {
        Circle,
        Square(u32),
        Rect(u32, u32),
        Poly { sides: u8 },
    }

    #[test]
    fn struct_becomes_record() {
        let value = to_value(&Dimens {
            width: 100,
            height: 120,
            depth: None,
        })
        .expect("capture");

        let_assert!(Value::Record(record) = value);
        assert_eq!(record.name(), "Dimens");
        let names: Vec<_> = record.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["width", "h"]);
    }

    #[test]
    fn options_become_pointers() {
        assert_eq!(to_value(&Some(1_u8)).expect("capture"), Value::pointer(Value::from(1_u64)));
        assert_eq!(to_value(&None::<u8>).expect("capture"), Value::null());
    }

    #[test]
    fn enum_variants() {
        assert_eq!(to_value(&Shape::Circle).expect("capture"), Value::from("Circle"));
        assert_eq!(
            to_value(&Shape::Square(3)).expect("capture"),
            Value::Mapping(vec![(Value::from("Square"), Value::from(3_u64))])
        );
        assert_eq!(
            to_value(&Shape::Rect(1, 2)).expect("capture"),
            Value::Mapping(vec![(Value::from("Rect"), Value::from(vec![1_u64, 2]))])
        );

        let_assert!(Value::Mapping(entries) = to_value(&Shape::Poly { sides: 5 }).expect("capture"));
        let_assert!(Some((key, Value::Record(record))) = entries.first());
        assert_eq!(key, &Value::from("Poly"));
        assert_eq!(record.fields().len(), 1);
    }

    #[test]
    fn maps_keep_entries() {
        let map = BTreeMap::from([("a", 1_i32), ("b", -2)]);
        assert_eq!(
            to_value(&map).expect("capture"),
            Value::Mapping(vec![
                (Value::from("a"), Value::from(1_i64)),
                (Value::from("b"), Value::from(-2_i64)),
            ])
        );
    }

    #[test]
    fn non_scalar_map_keys_are_rejected() {
        let map = BTreeMap::from([(vec![1_u8], "x")]);
        let_assert!(Err(Error::Capture(message)) = to_value(&map));
        assert!(message.contains("scalar"), "unexpected message: {message}");
    }

    #[test]
    fn unit_and_tuples() {
        assert_eq!(to_value(&()).expect("capture"), Value::Empty);
        assert_eq!(
            to_value(&("a", 1_u8)).expect("capture"),
            Value::Sequence(vec![Value::from("a"), Value::from(1_u64)])
        );
    }

    #[test]
    fn large_integers_fall_back_to_strings() {
        assert_eq!(
            to_value(&u128::MAX).expect("capture"),
            Value::from(u128::MAX.to_string())
        );
        assert_eq!(to_value(&7_i128).expect("capture"), Value::from(7_i64));
    }

    #[test]
    fn json_values_are_captured() {
        let json = serde_json::json!({"q": "rust", "page": {"size": 20}});
        let_assert!(Value::Mapping(entries) = to_value(&json).expect("capture"));
        assert_eq!(entries.len(), 2);
    }
}
