//! Field extraction from producer structs.
//!
//! This module provides serde serializers that turn any `T: Serialize` struct (or
//! string-keyed map) into a [`FieldMap`]. Producers describe one entity kind as a
//! plain Rust struct instead of setting attributes dynamically; field order
//! follows declaration order.
//!
//! ## Mapping
//!
//! | Rust | Field |
//! |------|-------|
//! | `bool`, integers, floats | [`Scalar`] |
//! | `&str`, `String`, `char` | [`Scalar::Text`] |
//! | unit enum variant (`Order::FIRST`) | text of the variant name |
//! | `None`, `()` | field omitted |
//! | `Vec<_>`, tuples, arrays of the above | [`Value::List`] |
//! | [`Reference`] | [`Value::Reference`] |
//! | `Vec<Reference>` | [`Value::References`] |
//! | nested struct / map, data-carrying enum variant | [`Error::UnsupportedType`] |
//!
//! ## Examples
//!
//! ```rust
//! use moose_input::{to_fields, Reference, Value};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! #[allow(non_camel_case_types)]
//! enum Transform { SCALE }
//!
//! #[derive(Serialize)]
//! struct TransformGenerator {
//!     input: Reference,
//!     transform: Transform,
//!     vector_value: [f64; 3],
//!     #[serde(skip_serializing_if = "Option::is_none")]
//!     comment: Option<String>,
//! }
//!
//! let fields = to_fields(&TransformGenerator {
//!     input: Reference::to("filemesh"),
//!     transform: Transform::SCALE,
//!     vector_value: [0.01, 0.01, 0.01],
//!     comment: None,
//! }).unwrap();
//!
//! let keys: Vec<_> = fields.keys().cloned().collect();
//! assert_eq!(keys, vec!["input", "transform", "vector_value"]);
//! assert_eq!(fields.get("transform"), Some(&Value::from("SCALE")));
//! ```

use crate::map::FieldMap;
use crate::value::{Number, Reference, Scalar, Value};
use crate::{Error, Result};
use serde::ser::{self, Impossible};
use serde::Serialize;

const REF_TOKEN: &str = "$moose_input::Reference";
const PORT_REF_TOKEN: &str = "$moose_input::PortReference";

impl Serialize for Reference {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        match self.port_name() {
            Some(port) => serializer.serialize_newtype_struct(PORT_REF_TOKEN, &(self.target(), port)),
            None => serializer.serialize_newtype_struct(REF_TOKEN, self.target()),
        }
    }
}

/// Serializes a producer struct or map into an ordered [`FieldMap`].
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] when `producer` is not a struct or
/// string-keyed map, or when one of its fields has no field representation.
pub fn to_fields<T>(producer: &T) -> Result<FieldMap>
where
    T: ?Sized + Serialize,
{
    producer.serialize(FieldsSerializer)
}

/// Serializes a single value. `Ok(None)` means the value is absent (`None` or unit).
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] for nested structures.
pub fn to_field_value<T>(value: &T) -> Result<Option<Value>>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Serializer for the top level of a producer: only structs and maps are accepted.
pub struct FieldsSerializer;

/// Serializer for one field value.
pub struct ValueSerializer;

pub struct FieldCollector {
    fields: FieldMap,
    current_key: Option<String>,
}

pub struct ListCollector {
    items: Vec<Value>,
}

fn top_level(what: &str) -> Error {
    Error::unsupported_type(&format!(
        "producer must be a struct or map, found {}",
        what
    ))
}

fn nested(what: &str) -> Error {
    Error::unsupported_type(&format!("{} cannot be a field value", what))
}

impl ser::Serializer for FieldsSerializer {
    type Ok = FieldMap;
    type Error = Error;

    type SerializeSeq = Impossible<FieldMap, Error>;
    type SerializeTuple = Impossible<FieldMap, Error>;
    type SerializeTupleStruct = Impossible<FieldMap, Error>;
    type SerializeTupleVariant = Impossible<FieldMap, Error>;
    type SerializeMap = FieldCollector;
    type SerializeStruct = FieldCollector;
    type SerializeStructVariant = Impossible<FieldMap, Error>;

    fn serialize_bool(self, _v: bool) -> Result<FieldMap> {
        Err(top_level("bool"))
    }

    fn serialize_i8(self, _v: i8) -> Result<FieldMap> {
        Err(top_level("integer"))
    }

    fn serialize_i16(self, _v: i16) -> Result<FieldMap> {
        Err(top_level("integer"))
    }

    fn serialize_i32(self, _v: i32) -> Result<FieldMap> {
        Err(top_level("integer"))
    }

    fn serialize_i64(self, _v: i64) -> Result<FieldMap> {
        Err(top_level("integer"))
    }

    fn serialize_u8(self, _v: u8) -> Result<FieldMap> {
        Err(top_level("integer"))
    }

    fn serialize_u16(self, _v: u16) -> Result<FieldMap> {
        Err(top_level("integer"))
    }

    fn serialize_u32(self, _v: u32) -> Result<FieldMap> {
        Err(top_level("integer"))
    }

    fn serialize_u64(self, _v: u64) -> Result<FieldMap> {
        Err(top_level("integer"))
    }

    fn serialize_f32(self, _v: f32) -> Result<FieldMap> {
        Err(top_level("float"))
    }

    fn serialize_f64(self, _v: f64) -> Result<FieldMap> {
        Err(top_level("float"))
    }

    fn serialize_char(self, _v: char) -> Result<FieldMap> {
        Err(top_level("char"))
    }

    fn serialize_str(self, _v: &str) -> Result<FieldMap> {
        Err(top_level("string"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<FieldMap> {
        Err(top_level("bytes"))
    }

    fn serialize_none(self) -> Result<FieldMap> {
        Ok(FieldMap::new())
    }

    fn serialize_some<T>(self, value: &T) -> Result<FieldMap>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<FieldMap> {
        Ok(FieldMap::new())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<FieldMap> {
        Ok(FieldMap::new())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<FieldMap> {
        Err(top_level("enum variant"))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<FieldMap>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<FieldMap>
    where
        T: ?Sized + Serialize,
    {
        Err(top_level("enum variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(top_level("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(top_level("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(top_level("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(top_level("enum variant"))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<FieldCollector> {
        Ok(FieldCollector::new(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<FieldCollector> {
        Ok(FieldCollector::new(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(top_level("enum variant"))
    }
}

impl FieldCollector {
    fn new(capacity: usize) -> Self {
        FieldCollector {
            fields: FieldMap::with_capacity(capacity),
            current_key: None,
        }
    }

    fn push<T>(&mut self, key: String, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let value = value.serialize(ValueSerializer).map_err(|e| match e {
            Error::UnsupportedType(msg) => {
                Error::unsupported_type(&format!("field '{}': {}", key, msg))
            }
            other => other,
        })?;
        if let Some(value) = value {
            self.fields.insert(key, value);
        }
        Ok(())
    }
}

impl ser::SerializeMap for FieldCollector {
    type Ok = FieldMap;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match key.serialize(ValueSerializer)? {
            Some(Value::Scalar(Scalar::Text(s))) => {
                self.current_key = Some(s);
                Ok(())
            }
            Some(other) => Err(Error::unsupported_type(&format!(
                "field names must be strings, found {:?}",
                other
            ))),
            None => Err(Error::unsupported_type("field names must be strings, found none")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.push(key, value)
    }

    fn end(self) -> Result<FieldMap> {
        Ok(self.fields)
    }
}

impl ser::SerializeStruct for FieldCollector {
    type Ok = FieldMap;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(key.to_string(), value)
    }

    fn end(self) -> Result<FieldMap> {
        Ok(self.fields)
    }
}

fn scalar(s: impl Into<Scalar>) -> Result<Option<Value>> {
    Ok(Some(Value::Scalar(s.into())))
}

impl ser::Serializer for ValueSerializer {
    type Ok = Option<Value>;
    type Error = Error;

    type SerializeSeq = ListCollector;
    type SerializeTuple = ListCollector;
    type SerializeTupleStruct = ListCollector;
    type SerializeTupleVariant = Impossible<Option<Value>, Error>;
    type SerializeMap = Impossible<Option<Value>, Error>;
    type SerializeStruct = Impossible<Option<Value>, Error>;
    type SerializeStructVariant = Impossible<Option<Value>, Error>;

    fn serialize_bool(self, v: bool) -> Result<Option<Value>> {
        scalar(v)
    }

    fn serialize_i8(self, v: i8) -> Result<Option<Value>> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Option<Value>> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Option<Value>> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<Option<Value>> {
        scalar(v)
    }

    fn serialize_u8(self, v: u8) -> Result<Option<Value>> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u16(self, v: u16) -> Result<Option<Value>> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u32(self, v: u32) -> Result<Option<Value>> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u64(self, v: u64) -> Result<Option<Value>> {
        if v <= i64::MAX as u64 {
            scalar(Scalar::Number(Number::Integer(v as i64)))
        } else {
            scalar(Scalar::Number(Number::Float(v as f64)))
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Option<Value>> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<Option<Value>> {
        scalar(v)
    }

    fn serialize_char(self, v: char) -> Result<Option<Value>> {
        scalar(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<Option<Value>> {
        scalar(v)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Option<Value>> {
        let items = v
            .iter()
            .map(|&b| Scalar::Number(Number::Integer(b as i64)))
            .collect();
        Ok(Some(Value::List(items)))
    }

    fn serialize_none(self) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Option<Value>> {
        scalar(variant)
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        match name {
            REF_TOKEN => match value.serialize(self)? {
                Some(Value::Scalar(Scalar::Text(target))) => {
                    Ok(Some(Value::Reference(Reference::to(target))))
                }
                _ => Err(Error::unsupported_type("reference target must be a string")),
            },
            PORT_REF_TOKEN => match value.serialize(self)? {
                Some(Value::List(parts)) => match parts.as_slice() {
                    [Scalar::Text(target), Scalar::Text(port)] => Ok(Some(Value::Reference(
                        Reference::port(target.as_str(), port.as_str()),
                    ))),
                    _ => Err(Error::unsupported_type("port reference must be (target, port)")),
                },
                _ => Err(Error::unsupported_type("port reference must be (target, port)")),
            },
            _ => value.serialize(self),
        }
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        Err(nested("newtype variant"))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<ListCollector> {
        Ok(ListCollector::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<ListCollector> {
        Ok(ListCollector::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<ListCollector> {
        Ok(ListCollector::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(nested("tuple variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(nested("map"))
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(nested(&format!("struct {}", name)))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(nested("struct variant"))
    }
}

impl ListCollector {
    fn new(capacity: usize) -> Self {
        ListCollector {
            items: Vec::with_capacity(capacity),
        }
    }

    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match value.serialize(ValueSerializer)? {
            Some(item) => {
                self.items.push(item);
                Ok(())
            }
            None => Err(Error::unsupported_type("empty element in list")),
        }
    }

    /// A list is either all references or all scalars.
    fn finish(self) -> Result<Option<Value>> {
        let all_refs =
            !self.items.is_empty() && self.items.iter().all(|v| matches!(v, Value::Reference(_)));

        if all_refs {
            let refs = self
                .items
                .into_iter()
                .filter_map(|v| match v {
                    Value::Reference(r) => Some(r),
                    _ => None,
                })
                .collect();
            return Ok(Some(Value::References(refs)));
        }

        let scalars = self
            .items
            .into_iter()
            .map(|v| match v {
                Value::Scalar(s) => Ok(s),
                Value::Reference(_) => Err(Error::unsupported_type(
                    "list mixes references and literals",
                )),
                Value::List(_) | Value::References(_) => {
                    Err(Error::unsupported_type("nested list"))
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(Value::List(scalars)))
    }
}

impl ser::SerializeSeq for ListCollector {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeTuple for ListCollector {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for ListCollector {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    #[allow(non_camel_case_types)]
    enum Order {
        FIRST,
    }

    #[derive(Serialize)]
    struct Variable {
        order: Order,
        family: &'static str,
        block: Option<&'static str>,
    }

    #[test]
    fn test_struct_fields_in_declaration_order() {
        let fields = to_fields(&Variable {
            order: Order::FIRST,
            family: "LAGRANGE",
            block: Some("hs:copper"),
        })
        .unwrap();

        let keys: Vec<_> = fields.keys().cloned().collect();
        assert_eq!(keys, vec!["order", "family", "block"]);
        assert_eq!(fields.get("order"), Some(&Value::from("FIRST")));
    }

    #[test]
    fn test_none_field_omitted() {
        let fields = to_fields(&Variable {
            order: Order::FIRST,
            family: "LAGRANGE",
            block: None,
        })
        .unwrap();
        assert!(!fields.contains_key("block"));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_references() {
        #[derive(Serialize)]
        struct Smp {
            displacements: Vec<Reference>,
            input: Reference,
        }

        let fields = to_fields(&Smp {
            displacements: vec![Reference::to("disp_x"), Reference::to("disp_y")],
            input: Reference::port("pipe", "out"),
        })
        .unwrap();

        assert_eq!(
            fields.get("displacements"),
            Some(&Value::references(["disp_x", "disp_y"]))
        );
        assert_eq!(
            fields.get("input"),
            Some(&Value::Reference(Reference::port("pipe", "out")))
        );
    }

    #[test]
    fn test_map_producer() {
        let mut outputs = BTreeMap::new();
        outputs.insert("csv", true);
        outputs.insert("exodus", true);
        let fields = to_fields(&outputs).unwrap();
        assert_eq!(fields.get("csv"), Some(&Value::from(true)));
    }

    #[test]
    fn test_non_string_map_key_rejected() {
        let mut by_index = BTreeMap::new();
        by_index.insert(1, true);

        let err = to_fields(&by_index).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType(ref msg) if msg.contains("field names")));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_nested_struct_rejected() {
        #[derive(Serialize)]
        struct Inner {
            x: i32,
        }
        #[derive(Serialize)]
        struct Outer {
            inner: Inner,
        }

        let err = to_fields(&Outer { inner: Inner { x: 1 } }).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType(ref msg) if msg.contains("'inner'")));
    }

    #[test]
    fn test_mixed_list_rejected() {
        #[derive(Serialize)]
        struct Mixed {
            items: (Reference, i32),
        }
        assert!(to_fields(&Mixed {
            items: (Reference::to("a"), 1)
        })
        .is_err());
    }

    #[test]
    fn test_top_level_scalar_rejected() {
        assert!(matches!(to_fields(&42), Err(Error::UnsupportedType(_))));
    }

    #[test]
    fn test_single_value() {
        assert_eq!(to_field_value(&1.5).unwrap(), Some(Value::from(1.5)));
        assert_eq!(to_field_value(&Option::<i32>::None).unwrap(), None);
        assert_eq!(
            to_field_value(&vec![1, 2, 3]).unwrap(),
            Some(Value::from(vec![1, 2, 3]))
        );
    }

    #[test]
    fn test_reference_is_plain_data_elsewhere() {
        assert_eq!(
            serde_json::to_string(&Reference::to("disp_x")).unwrap(),
            "\"disp_x\""
        );
        assert_eq!(
            serde_json::to_string(&Reference::port("pipe", "in")).unwrap(),
            "[\"pipe\",\"in\"]"
        );
    }
}
