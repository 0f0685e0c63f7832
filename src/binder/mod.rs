//! # Structure Binder
//!
//! Maps a resolved [`Value`] tree onto any `serde::Deserialize` type.
//!
//! ## Architecture Overview
//!
//! ```text
//! binder/
//! ├── mod.rs    - ValueDeserializer, seq/map access, bind()
//! ├── hook.rs   - DecodeHook trait, StandardHook, scalar parsers
//! └── error.rs  - BindError
//! ```
//!
//! Every scalar request (`deserialize_bool`, `deserialize_u16`, ...) goes
//! through the configured [`DecodeHook`] first. When the hook returns
//! [`Coerced::Unchanged`] the node is visited as-is, which for a string node
//! means the target's own `visit_str` decides.
//!
//! ## Usage
//!
//! ```rust
//! use proptree::Parser;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Db {
//!     host: String,
//!     port: u16,
//! }
//!
//! let mut parser = Parser::new();
//! parser.parse("db.host = localhost\ndb.port = 5432").unwrap();
//! let db: Db = parser.bind_to("db").unwrap();
//! assert_eq!(db.port, 5432);
//! ```

mod error;
mod hook;

pub use error::BindError;
pub use hook::{
    parse_bool, parse_duration, parse_float, parse_signed, parse_unsigned, Coerced, DecodeHook,
    SourceKind, StandardHook, TargetKind,
};

use std::collections::btree_map;
use std::time::Duration;

use serde::de::{self, DeserializeOwned, Visitor};
use serde::forward_to_deserialize_any;

use crate::model::{FieldCase, Map, Value};

/// Bind `value` onto `T`.
pub fn bind<T: DeserializeOwned>(
    value: &Value,
    hook: &dyn DecodeHook,
    case: FieldCase,
) -> Result<T, BindError> {
    T::deserialize(ValueDeserializer::new(value, hook, case))
}

/// Settings shared by every node of one bind call.
#[derive(Clone, Copy)]
struct Binding<'a> {
    hook: &'a dyn DecodeHook,
    case: FieldCase,
}

/// Deserializer over a borrowed tree node.
pub struct ValueDeserializer<'a> {
    value: &'a Value,
    binding: Binding<'a>,
}

impl<'a> ValueDeserializer<'a> {
    pub fn new(value: &'a Value, hook: &'a dyn DecodeHook, case: FieldCase) -> Self {
        Self {
            value,
            binding: Binding { hook, case },
        }
    }

    fn deserialize_scalar<'de, V: Visitor<'de>>(
        self,
        to: TargetKind,
        visitor: V,
    ) -> Result<V::Value, BindError> {
        let coerced = self
            .binding
            .hook
            .decode(SourceKind::of(self.value), to, self.value)?;

        match coerced {
            Coerced::Unchanged => de::Deserializer::deserialize_any(self, visitor),
            Coerced::Bool(b) => visitor.visit_bool(b),
            Coerced::Signed(i) => visitor.visit_i64(i),
            Coerced::Unsigned(u) => visitor.visit_u64(u),
            Coerced::Float(f) => visitor.visit_f64(f),
            Coerced::Str(s) => visitor.visit_string(s),
            Coerced::Duration(d) => visit_duration(d, visitor),
        }
    }
}

/// Feed a `Duration` to its derived visitor as `{secs, nanos}`.
fn visit_duration<'de, V: Visitor<'de>>(duration: Duration, visitor: V) -> Result<V::Value, BindError> {
    let fields = vec![
        ("secs", duration.as_secs()),
        ("nanos", u64::from(duration.subsec_nanos())),
    ];
    visitor.visit_map(de::value::MapDeserializer::<_, BindError>::new(fields.into_iter()))
}

fn is_duration(name: &str, fields: &[&str]) -> bool {
    name == "Duration" && fields == &["secs", "nanos"][..]
}

impl<'de, 'a> de::Deserializer<'de> for ValueDeserializer<'a> {
    type Error = BindError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::String(s) => visitor.visit_str(s),
            Value::List(items) => visitor.visit_seq(SeqAccess::new(items, self.binding)),
            Value::Map(map) => visitor.visit_map(MapAccess::new(map, &[], self.binding)),
        }
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        self.deserialize_scalar(TargetKind::Bool, visitor)
    }

    fn deserialize_i8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        self.deserialize_scalar(TargetKind::Signed, visitor)
    }

    fn deserialize_i16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        self.deserialize_scalar(TargetKind::Signed, visitor)
    }

    fn deserialize_i32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        self.deserialize_scalar(TargetKind::Signed, visitor)
    }

    fn deserialize_i64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        self.deserialize_scalar(TargetKind::Signed, visitor)
    }

    fn deserialize_u8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        self.deserialize_scalar(TargetKind::Unsigned, visitor)
    }

    fn deserialize_u16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        self.deserialize_scalar(TargetKind::Unsigned, visitor)
    }

    fn deserialize_u32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        self.deserialize_scalar(TargetKind::Unsigned, visitor)
    }

    fn deserialize_u64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        self.deserialize_scalar(TargetKind::Unsigned, visitor)
    }

    fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        self.deserialize_scalar(TargetKind::Float, visitor)
    }

    fn deserialize_f64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        self.deserialize_scalar(TargetKind::Float, visitor)
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        self.deserialize_scalar(TargetKind::Str, visitor)
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        self.deserialize_scalar(TargetKind::Str, visitor)
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        self.deserialize_scalar(TargetKind::Str, visitor)
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, BindError> {
        visitor.visit_newtype_struct(self)
    }

    /// Lists bind element-wise. With weak typing a single string is lifted
    /// into a one-element sequence and an empty string into an empty one.
    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        let weak = self.binding.hook.weakly_typed();

        match self.value {
            Value::List(items) => visitor.visit_seq(SeqAccess::new(items, self.binding)),
            Value::String(s) if weak && s.is_empty() => {
                visitor.visit_seq(SeqAccess::new(&[], self.binding))
            }
            Value::String(_) if weak => visitor.visit_seq(SeqAccess::new(
                std::slice::from_ref(self.value),
                self.binding,
            )),
            _ => self.deserialize_any(visitor),
        }
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value, BindError> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, BindError> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, BindError> {
        match self.value {
            Value::Map(map) => visitor.visit_map(MapAccess::new(map, fields, self.binding)),
            _ if is_duration(name, fields) => self.deserialize_scalar(TargetKind::Duration, visitor),
            _ => self.deserialize_any(visitor),
        }
    }

    /// Unit variants only: the node must be the variant name.
    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, BindError> {
        match self.value {
            Value::String(s) => {
                visitor.visit_enum(de::value::StrDeserializer::<BindError>::new(s))
            }
            _ => self.deserialize_any(visitor),
        }
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        i128 u128 bytes byte_buf unit unit_struct map identifier
    }
}

struct SeqAccess<'a> {
    iter: std::slice::Iter<'a, Value>,
    binding: Binding<'a>,
}

impl<'a> SeqAccess<'a> {
    fn new(items: &'a [Value], binding: Binding<'a>) -> Self {
        Self {
            iter: items.iter(),
            binding,
        }
    }
}

impl<'de, 'a> de::SeqAccess<'de> for SeqAccess<'a> {
    type Error = BindError;

    fn next_element_seed<T: de::DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>, BindError> {
        match self.iter.next() {
            Some(value) => seed
                .deserialize(ValueDeserializer {
                    value,
                    binding: self.binding,
                })
                .map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

/// Map access that renames keys to the record's field names per
/// [`FieldCase`].
struct MapAccess<'a> {
    iter: btree_map::Iter<'a, String, Value>,
    value: Option<&'a Value>,
    fields: &'static [&'static str],
    binding: Binding<'a>,
}

impl<'a> MapAccess<'a> {
    fn new(map: &'a Map, fields: &'static [&'static str], binding: Binding<'a>) -> Self {
        Self {
            iter: map.iter(),
            value: None,
            fields,
            binding,
        }
    }

    fn field_name(&self, key: &'a str) -> &'a str {
        self.fields
            .iter()
            .find(|field| self.binding.case.matches(field, key))
            .copied()
            .unwrap_or(key)
    }
}

impl<'de, 'a> de::MapAccess<'de> for MapAccess<'a> {
    type Error = BindError;

    fn next_key_seed<K: de::DeserializeSeed<'de>>(
        &mut self,
        seed: K,
    ) -> Result<Option<K::Value>, BindError> {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                let name = self.field_name(key);
                seed.deserialize(de::value::StrDeserializer::<BindError>::new(name))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V: de::DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value, BindError> {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer {
                value,
                binding: self.binding,
            }),
            None => Err(de::Error::custom("value is missing")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}
