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

use std::fmt;

use serde::{
    de::{SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use serde_bytes::ByteBuf;

use crate::{diagnostics::Diagnostics, error::Error, schema::Schema};

/// Static schema attached to a state structure
pub trait WithSchema {
    fn schema() -> Schema;
}

pub(crate) trait OptionFactor {
    type Output;
    fn factor(self) -> Self::Output;
}

pub(crate) trait ExtractDiagnostics {
    type Output;
    fn extract_diagnostics(self, diags: &mut Diagnostics) -> Self::Output;
}

impl<T> ExtractDiagnostics for Result<T, Error> {
    type Output = Option<T>;
    fn extract_diagnostics(self, diags: &mut Diagnostics) -> Self::Output {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                diags.report(err);
                None
            }
        }
    }
}

macro_rules! impl_factor {
    ($($e:ident)+) => {
        impl<$($e),+> OptionFactor for ($(Option<$e>,)+) {
            type Output = Option<($($e,)+)>;
            #[allow(non_snake_case)]
            fn factor(self) -> Self::Output {
                let ($($e,)+) = self;
                Some(($($e?,)+))
            }
        }
    };
}

impl_factor!(A);
impl_factor!(A B);
impl_factor!(A B C);
impl_factor!(A B C D);

/// MessagePack extension carrying the unknown marker
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename = "_ExtStruct")]
pub(crate) struct ExtStruct(pub (i8, ByteBuf));

impl<'de> Deserialize<'de> for ExtStruct {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ExtVisitor;
        impl<'de> Visitor<'de> for ExtVisitor {
            type Value = ExtStruct;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "a MessagePack extension")
            }

            fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                <(i8, ByteBuf)>::deserialize(deserializer).map(ExtStruct)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let tag = seq
                    .next_element::<i8>()?
                    .ok_or_else(|| serde::de::Error::invalid_length(0, &self))?;
                let data = seq.next_element::<ByteBuf>()?.unwrap_or_default();
                Ok(ExtStruct((tag, data)))
            }
        }
        deserializer.deserialize_newtype_struct("_ExtStruct", ExtVisitor)
    }
}

/// Serde codec for the unknown variant of [`Value`](crate::value::Value)
pub(crate) mod serde_unknown {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_bytes::ByteBuf;

    use super::ExtStruct;

    pub fn serialize<S>(serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ExtStruct((0, ByteBuf::from(vec![0u8]))).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<(), D::Error>
    where
        D: Deserializer<'de>,
    {
        ExtStruct::deserialize(deserializer).map(|_| ())
    }
}
