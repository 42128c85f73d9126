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

//! Terraform schemas of the provider block, the resources and the data sources

use std::{collections::HashMap, fmt};

use serde::{ser::SerializeMap, Serialize};

/// Plain text shown by `terraform providers schema` and the documentation
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Description(pub String);

impl Description {
    pub fn plain<T: ToString>(content: T) -> Self {
        Self(content.to_string())
    }
}

impl<T: ToString> From<T> for Description {
    fn from(value: T) -> Self {
        Description::plain(value)
    }
}

/// Repeated block, such as `http_listener` or `nat_rule`
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NestedBlock {
    /// Exactly one occurrence
    Single(Block),
    /// Ordered occurrences
    List(Block),
    /// At most one occurrence; the field is encoded as a list with `value::serde_as_vec`
    Optional(Block),
}

impl NestedBlock {
    pub fn block(&self) -> &Block {
        match self {
            NestedBlock::Single(block) | NestedBlock::List(block) | NestedBlock::Optional(block) => {
                block
            }
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Block {
    pub version: i64,
    pub attributes: HashMap<String, Attribute>,
    pub blocks: HashMap<String, NestedBlock>,
    pub description: Description,
    pub deprecated: bool,
}

impl Default for Block {
    fn default() -> Block {
        Block {
            version: 1,
            attributes: HashMap::new(),
            blocks: HashMap::new(),
            description: Description::default(),
            deprecated: false,
        }
    }
}

/// Type of an attribute, serialized in the cty type notation
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AttributeType {
    String,
    Number,
    Bool,
    List(Box<AttributeType>),
    Map(Box<AttributeType>),
    /// Object of nested attributes
    AttributeSingle(HashMap<String, Attribute>),
    /// List of objects of nested attributes
    AttributeList(HashMap<String, Attribute>),
}

/// Object type built from the types of nested attributes
struct ObjectType<'a>(&'a HashMap<String, Attribute>);

impl Serialize for ObjectType<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut fields = serializer.serialize_map(Some(self.0.len()))?;
        for (name, attribute) in self.0 {
            fields.serialize_entry(name, &attribute.attr_type)?;
        }
        fields.end()
    }
}

impl Serialize for AttributeType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AttributeType::String => serializer.serialize_str("string"),
            AttributeType::Number => serializer.serialize_str("number"),
            AttributeType::Bool => serializer.serialize_str("bool"),
            AttributeType::List(inner) => ("list", inner).serialize(serializer),
            AttributeType::Map(inner) => ("map", inner).serialize(serializer),
            AttributeType::AttributeSingle(fields) => {
                ("object", ObjectType(fields)).serialize(serializer)
            }
            AttributeType::AttributeList(fields) => {
                ("list", ("object", ObjectType(fields))).serialize(serializer)
            }
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&encoded)
    }
}

/// Who may set the attribute: the configuration, the remote API, or both
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum AttributeConstraint {
    /// Filled by the remote API only
    Computed,
    Optional,
    /// Filled by the remote API when left out of the configuration
    OptionalComputed,
    Required,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Attribute {
    pub attr_type: AttributeType,
    pub description: Description,
    pub constraint: AttributeConstraint,
    /// Redacted from plan output; used for keys, passwords and certificate data
    pub sensitive: bool,
    pub deprecated: bool,
}

impl Default for Attribute {
    fn default() -> Self {
        Self::with_constraint(
            AttributeType::String,
            "",
            AttributeConstraint::OptionalComputed,
        )
    }
}

impl Attribute {
    fn with_constraint(
        attr_type: AttributeType,
        description: &str,
        constraint: AttributeConstraint,
    ) -> Self {
        Self {
            attr_type,
            description: Description::plain(description),
            constraint,
            sensitive: false,
            deprecated: false,
        }
    }

    pub fn required(attr_type: AttributeType, description: &str) -> Self {
        Self::with_constraint(attr_type, description, AttributeConstraint::Required)
    }

    pub fn optional(attr_type: AttributeType, description: &str) -> Self {
        Self::with_constraint(attr_type, description, AttributeConstraint::Optional)
    }

    pub fn optional_computed(attr_type: AttributeType, description: &str) -> Self {
        Self::with_constraint(attr_type, description, AttributeConstraint::OptionalComputed)
    }

    pub fn computed(attr_type: AttributeType, description: &str) -> Self {
        Self::with_constraint(attr_type, description, AttributeConstraint::Computed)
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }
}

/// Versioned root block
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Schema {
    pub version: i64,
    pub block: Block,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map;

    #[test]
    fn attribute_type_display() {
        assert_eq!(AttributeType::String.to_string(), "\"string\"");
        assert_eq!(
            AttributeType::Map(AttributeType::String.into()).to_string(),
            "[\"map\",\"string\"]"
        );
        let single = AttributeType::AttributeSingle(map! {
            "enabled" => Attribute::optional(AttributeType::Bool, "enabled"),
        });
        assert_eq!(single.to_string(), "[\"object\",{\"enabled\":\"bool\"}]");
        let list = AttributeType::AttributeList(map! {
            "port" => Attribute::required(AttributeType::Number, "port"),
        });
        assert_eq!(list.to_string(), "[\"list\",[\"object\",{\"port\":\"number\"}]]");
    }

    #[test]
    fn sensitive_keeps_the_constraint() {
        let key = Attribute::optional(AttributeType::String, "Shared key").sensitive();
        assert!(key.sensitive);
        assert_eq!(key.constraint, AttributeConstraint::Optional);
    }
}
