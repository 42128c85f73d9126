// This file is part of the tf-azurerm-network project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Tri-state [`Value`] attributes

use std::{
    collections::BTreeMap,
    fmt::{Debug, Display},
    marker::PhantomData,
};

use serde::{de::Visitor, Deserialize, Serialize};

use crate::utils::serde_unknown;

/// Attribute of a configuration, a plan or a state
///
/// Besides being set or null, an attribute can be [`Value::Unknown`] while planning, when
/// it refers to something only known after apply, such as the ID of a resource not created
/// yet. The unknown marker is kept as a MessagePack extension on the wire.
#[derive(Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash, Default, Serialize)]
#[serde(untagged)]
pub enum Value<T> {
    /// Value is present
    Value(T),
    /// No value is present
    #[default]
    Null,
    /// Value is unknown
    #[serde(with = "serde_unknown")]
    Unknown,
}

macro_rules! forward_visit {
    ([ -> ]) => {
        serde::de::IntoDeserializer::into_deserializer
    };
    ([ -> $de:ident]) => {
        serde::de::value::$de::new
    };
    ($($visit:ident($value:ty)$(-> $de:ident)?),*$(,)?) => {
        $(
            fn $visit<E>(self, v: $value) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                T::deserialize(forward_visit!([-> $($de)?])(v)).map(Value::Value)
            }
        )*
    };
}

macro_rules! forward_visit_trait {
    ([ ($v:ident) ]) => {
        $v
    };
    ([ $de:ident($v:ident)]) => {
        serde::de::value::$de::new($v)
    };
    ($($visit:ident($($trait:tt)*)$(-> $de:ident)?),*$(,)?) => {
        $(
            fn $visit<E>(self, v: E) -> Result<Self::Value, E::Error>
            where
                E: $($trait)*,
            {
                T::deserialize(forward_visit_trait!([$($de)?(v)])).map(Value::Value)
            }
        )*
    };
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Value<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ValueVisitor<T>(PhantomData<T>);
        impl<'de, T: Deserialize<'de>> Visitor<'de> for ValueVisitor<T> {
            type Value = Value<T>;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(formatter, "any value")
            }

            forward_visit!(
                visit_bool(bool),
                visit_borrowed_bytes(&'de [u8]) -> BorrowedBytesDeserializer,
                visit_borrowed_str(&'de str) -> BorrowedStrDeserializer,
                visit_byte_buf(Vec<u8>),
                visit_bytes(&[u8]),
                visit_char(char),
                visit_f32(f32),
                visit_f64(f64),
                visit_i8(i8),
                visit_i16(i16),
                visit_i32(i32),
                visit_i64(i64),
                visit_u8(u8),
                visit_u16(u16),
                visit_u32(u32),
                visit_u64(u64),
                visit_str(&str),
                visit_string(String),
            );
            forward_visit_trait!(
                visit_map(serde::de::MapAccess<'de>) -> MapAccessDeserializer,
                visit_seq(serde::de::SeqAccess<'de>) -> SeqAccessDeserializer,
                visit_some(serde::Deserializer<'de>),
            );

            fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                serde_unknown::deserialize(deserializer).map(|()| Value::Unknown)
            }
            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Value::Null)
            }
            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Value::Null)
            }
        }
        deserializer.deserialize_any(ValueVisitor(PhantomData))
    }
}

pub type ValueString = Value<String>;
pub type ValueNumber = Value<i64>;
pub type ValueBool = Value<bool>;
pub type ValueList<T> = Value<Vec<T>>;
pub type ValueMap<T> = Value<BTreeMap<String, T>>;

/// Serde codec to encode a nullable as a vec that has either zero or one element
pub mod serde_as_vec {
    use anyhow::anyhow;
    use serde::{de::Error, ser::SerializeSeq, Deserialize, Serialize};

    use super::Value;

    /// Serialize a nullable Value into a Vec of Values with 0 or 1 element
    pub fn serialize<T, S>(value: &Value<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
        T: Serialize,
    {
        let mut seq = serializer.serialize_seq(Some(value.is_value() as usize))?;
        if let Value::Value(value) = value {
            seq.serialize_element(value)?;
        }
        seq.end()
    }

    /// Deserialize a Vec of values into a single, nullable, Value
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Value<T>, D::Error>
    where
        D: serde::Deserializer<'de>,
        T: Deserialize<'de>,
    {
        let vec: Value<Vec<Value<T>>> = Deserialize::deserialize(deserializer)?;
        match vec {
            Value::Value(vec) => {
                let mut iter = vec.into_iter();
                match (iter.next(), iter.next()) {
                    (None, _) => Ok(Value::Null),
                    (Some(value), None) => Ok(value),
                    (Some(_), Some(_)) => {
                        Err(anyhow!("Try to store multiple elements in a single Value"))
                            .map_err(D::Error::custom)
                    }
                }
            }
            Value::Null => Ok(Value::Null),
            Value::Unknown => Ok(Value::Unknown),
        }
    }
}

impl<T> Value<T> {
    /// Check if the value is known and present
    #[inline]
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Check if the value is null
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if the value is unknown
    #[inline]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Converts from `&Value<T>` to `Value<&T>`
    #[inline]
    pub const fn as_ref(&self) -> Value<&T> {
        match *self {
            Self::Value(ref x) => Value::Value(x),
            Self::Null => Value::Null,
            Self::Unknown => Value::Unknown,
        }
    }

    /// Returns the contained value or a default
    ///
    /// Both [`Value::Null`] and [`Value::Unknown`] yield the default.
    #[inline]
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        match self {
            Self::Value(x) => x,
            _ => Default::default(),
        }
    }

    /// Maps a `Value<T>` to `Value<U>` by applying a function to a contained value
    #[inline]
    pub fn map<U, F>(self, f: F) -> Value<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Value(x) => Value::Value(f(x)),
            Self::Null => Value::Null,
            Self::Unknown => Value::Unknown,
        }
    }

    /// Convert the value into an [`Option`], unknown values become [`None`]
    #[inline]
    pub fn as_option(self) -> Option<T> {
        match self {
            Self::Value(x) => Some(x),
            _ => None,
        }
    }

    /// Convert a reference to the value into an [`Option`], unknown values become [`None`]
    #[inline]
    pub fn as_ref_option(&self) -> Option<&T> {
        match self {
            Self::Value(x) => Some(x),
            _ => None,
        }
    }

    /// Iterate over the known value, if any
    #[inline]
    pub fn iter(&self) -> std::option::IntoIter<&T> {
        self.as_ref_option().into_iter()
    }
}

impl Value<String> {
    /// Get the string, or an empty string if the value is not known
    pub fn as_str(&self) -> &str {
        match self {
            Self::Value(x) => x.as_str(),
            _ => "",
        }
    }

    /// Get the string if it is known and not empty
    ///
    /// Attributes left unset in configuration are sent as empty strings by some hosts,
    /// hence the empty string being treated like null.
    pub fn non_empty(&self) -> Option<&str> {
        match self {
            Self::Value(x) if !x.is_empty() => Some(x.as_str()),
            _ => None,
        }
    }

    /// Check if the value is set or will be set once known
    pub fn is_provided(&self) -> bool {
        self.is_unknown() || self.non_empty().is_some()
    }
}

impl<T> Value<Vec<Value<T>>> {
    /// Iterate over the known elements of a list, along with their position in the list
    pub fn known_items(&self) -> impl Iterator<Item = (usize, &T)> {
        self.iter()
            .flatten()
            .enumerate()
            .filter_map(|(i, item)| item.as_ref_option().map(|item| (i, item)))
    }

    /// Number of known elements of a list
    pub fn known_len(&self) -> usize {
        self.known_items().count()
    }
}

impl Value<Vec<Value<String>>> {
    /// Known and non empty strings of a list
    pub fn strings(&self) -> Vec<String> {
        self.known_items()
            .filter(|(_, s)| !s.is_empty())
            .map(|(_, s)| s.clone())
            .collect()
    }
}

impl<T: Debug> Debug for Value<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(value) => Debug::fmt(value, f),
            Self::Null => f.write_str("Null"),
            Self::Unknown => f.write_str("Unknown"),
        }
    }
}

impl<T> From<T> for Value<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T> From<Option<T>> for Value<T> {
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(x) => Self::Value(x),
            None => Self::Null,
        }
    }
}

impl From<&str> for Value<String> {
    fn from(value: &str) -> Self {
        Self::Value(value.to_owned())
    }
}

impl Display for Value<String> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sku {
        name: ValueString,
        capacity: ValueNumber,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Gateway {
        #[serde(with = "serde_as_vec")]
        sku: Value<Sku>,
        zones: ValueList<ValueString>,
    }

    #[test]
    fn json_null_and_values() {
        let gw: Gateway = serde_json::from_str(
            r#"{"sku": [{"name": "Standard_v2", "capacity": null}], "zones": null}"#,
        )
        .unwrap();
        assert_eq!(
            gw,
            Gateway {
                sku: Value::Value(Sku {
                    name: "Standard_v2".into(),
                    capacity: Value::Null,
                }),
                zones: Value::Null,
            }
        );
    }

    #[test]
    fn as_vec_empty_list_is_null() {
        let gw: Gateway = serde_json::from_str(r#"{"sku": [], "zones": ["1", "2"]}"#).unwrap();
        assert!(gw.sku.is_null());
        assert_eq!(gw.zones.strings(), vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn as_vec_rejects_multiple_elements() {
        let res: Result<Gateway, _> = serde_json::from_str(
            r#"{"sku": [{"name": "a", "capacity": 1}, {"name": "b", "capacity": 2}], "zones": []}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn as_vec_round_trip_message_pack() {
        let gw = Gateway {
            sku: Value::Value(Sku {
                name: "WAF_v2".into(),
                capacity: Value::Value(2),
            }),
            zones: Value::Unknown,
        };
        let bytes = rmp_serde::to_vec_named(&gw).unwrap();
        let back: Gateway = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(back, gw);
    }

    #[test]
    fn provided_strings() {
        assert!(ValueString::Unknown.is_provided());
        assert!(!ValueString::Null.is_provided());
        assert!(!ValueString::from("").is_provided());
        assert!(ValueString::from("x").is_provided());
    }

    #[test]
    fn known_items_skip_unknown_elements() {
        let list: ValueList<ValueNumber> =
            Value::Value(vec![Value::Value(1), Value::Unknown, Value::Value(3)]);
        let items: Vec<_> = list.known_items().collect();
        assert_eq!(items, vec![(0, &1), (2, &3)]);
    }

    #[test]
    fn iter_yields_only_known_values() {
        assert_eq!(ValueNumber::Value(3).iter().collect::<Vec<_>>(), vec![&3]);
        assert_eq!(ValueNumber::Null.iter().count(), 0);
        assert_eq!(ValueNumber::Unknown.iter().count(), 0);

        let tags: ValueMap<ValueString> =
            Value::Value(BTreeMap::from([("env".to_owned(), "prod".into())]));
        let keys: Vec<_> = tags.iter().flatten().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, ["env"]);
    }
}
