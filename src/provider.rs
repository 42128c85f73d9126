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

//! Host-facing [`Provider`] surface
//!
//! The plugin runtime knows the provider only through [`DynamicProvider`]: configurations
//! arrive as [`RawValue`] payloads, and resources and data sources are looked up by their
//! Terraform type name (`azurerm_*`) in the registries returned here.

use std::collections::HashMap;

use crate::data_source::DynamicDataSource;
use crate::diagnostics::Diagnostics;
use crate::raw::RawValue;
use crate::resource::DynamicResource;
use crate::schema::Schema;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

/// Resources served by a provider, keyed by Terraform type name
pub type ResourceRegistry = HashMap<String, Box<dyn DynamicResource>>;

/// Data sources served by a provider, keyed by Terraform type name
pub type DataSourceRegistry = HashMap<String, Box<dyn DynamicDataSource>>;

/// Provider whose configuration block is decoded into [`Provider::Config`]
#[async_trait]
pub trait Provider: Send + Sync + 'static {
    /// `provider "azurerm"` block
    type Config: Serialize + DeserializeOwned + Send;

    fn schema(&self, diags: &mut Diagnostics) -> Option<Schema>;

    /// Check the provider block before any value is resolved
    async fn validate(&self, diags: &mut Diagnostics, config: Self::Config) -> Option<()>;

    /// Resolve the settings shared by every resource
    ///
    /// Resource operations issued before this returns fail with a configuration error.
    async fn configure(
        &self,
        diags: &mut Diagnostics,
        terraform_version: String,
        config: Self::Config,
    ) -> Option<()>;

    fn get_resources(&self, diags: &mut Diagnostics) -> Option<ResourceRegistry>;

    fn get_data_sources(&self, diags: &mut Diagnostics) -> Option<DataSourceRegistry>;

    /// Request a graceful stop
    ///
    /// Operations still waiting on the remote API return a cancellation error.
    async fn stop(&self, diags: &mut Diagnostics) -> Option<()> {
        _ = diags;
        Some(())
    }
}

/// Type-erased [`Provider`], as seen by the plugin runtime
#[async_trait]
pub trait DynamicProvider: Send + Sync + 'static {
    fn schema(&self, diags: &mut Diagnostics) -> Option<Schema>;
    async fn validate(&self, diags: &mut Diagnostics, config: RawValue) -> Option<()>;
    async fn configure(
        &self,
        diags: &mut Diagnostics,
        terraform_version: String,
        config: RawValue,
    ) -> Option<()>;
    fn get_resources(&self, diags: &mut Diagnostics) -> Option<ResourceRegistry>;
    fn get_data_sources(&self, diags: &mut Diagnostics) -> Option<DataSourceRegistry>;
    async fn stop(&self, diags: &mut Diagnostics) -> Option<()>;
}

#[async_trait]
impl<P: Provider> DynamicProvider for P {
    fn schema(&self, diags: &mut Diagnostics) -> Option<Schema> {
        Provider::schema(self, diags)
    }

    async fn validate(&self, diags: &mut Diagnostics, config: RawValue) -> Option<()> {
        let config: P::Config = config.deserialize(diags)?;
        Provider::validate(self, diags, config).await
    }

    async fn configure(
        &self,
        diags: &mut Diagnostics,
        terraform_version: String,
        config: RawValue,
    ) -> Option<()> {
        let config: P::Config = config.deserialize(diags)?;
        Provider::configure(self, diags, terraform_version, config).await
    }

    fn get_resources(&self, diags: &mut Diagnostics) -> Option<ResourceRegistry> {
        Provider::get_resources(self, diags)
    }

    fn get_data_sources(&self, diags: &mut Diagnostics) -> Option<DataSourceRegistry> {
        Provider::get_data_sources(self, diags)
    }

    async fn stop(&self, diags: &mut Diagnostics) -> Option<()> {
        Provider::stop(self, diags).await
    }
}
