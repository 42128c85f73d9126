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

//! Read-only [`DataSource`] lookups

use crate::diagnostics::Diagnostics;
use crate::raw::RawValue;
use crate::schema::Schema;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

/// Data source working on typed states
///
/// The lookup attributes are the only configurable ones; everything else is filled by
/// [`DataSource::read`].
#[async_trait]
pub trait DataSource: Send + Sync {
    type State: Serialize + DeserializeOwned + Send;

    fn schema(&self, diags: &mut Diagnostics) -> Option<Schema>;

    async fn validate(&self, diags: &mut Diagnostics, config: Self::State) -> Option<()> {
        _ = (diags, config);
        Some(())
    }

    /// Look the remote object up; a missing object is an error
    async fn read(&self, diags: &mut Diagnostics, config: Self::State) -> Option<Self::State>;
}

/// Type-erased [`DataSource`]
#[async_trait]
pub trait DynamicDataSource: Send + Sync {
    fn schema(&self, diags: &mut Diagnostics) -> Option<Schema>;
    async fn validate(&self, diags: &mut Diagnostics, config: RawValue) -> Option<()>;
    async fn read(&self, diags: &mut Diagnostics, config: RawValue) -> Option<RawValue>;
}

#[async_trait]
impl<D: DataSource> DynamicDataSource for D {
    fn schema(&self, diags: &mut Diagnostics) -> Option<Schema> {
        DataSource::schema(self, diags)
    }

    async fn validate(&self, diags: &mut Diagnostics, config: RawValue) -> Option<()> {
        let config: D::State = config.deserialize(diags)?;
        DataSource::validate(self, diags, config).await
    }

    async fn read(&self, diags: &mut Diagnostics, config: RawValue) -> Option<RawValue> {
        let config: D::State = config.deserialize(diags)?;
        let found = DataSource::read(self, diags, config).await?;
        RawValue::serialize(diags, &found)
    }
}
