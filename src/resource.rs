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

//! Managed [`Resource`] lifecycle, as driven by `terraform plan` and `terraform apply`

use crate::attribute_path::AttributePath;
use crate::diagnostics::Diagnostics;
use crate::raw::RawValue;
use crate::schema::Schema;
use crate::utils::OptionFactor;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

/// Resource working on typed states
///
/// Every operation returns [`None`] iff an error has been reported in `diags`.
/// The `config` argument is the block as written by the user, before defaults and
/// computed attributes are filled in.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Terraform state of the resource
    ///
    /// A null state means the remote object is gone.
    type State: Serialize + DeserializeOwned + Send;

    fn schema(&self, diags: &mut Diagnostics) -> Option<Schema>;

    /// Static checks on the configuration; unknown values are skipped
    async fn validate(&self, diags: &mut Diagnostics, config: Self::State) -> Option<()>;

    /// Refresh `state` from the remote object
    async fn read(&self, diags: &mut Diagnostics, state: Self::State) -> Option<Self::State>;

    /// Mark what only the remote API can know as unknown
    async fn plan_create(
        &self,
        diags: &mut Diagnostics,
        proposed: Self::State,
        config: Self::State,
    ) -> Option<Self::State>;

    /// Planned state, with the attribute paths that force a replacement
    async fn plan_update(
        &self,
        diags: &mut Diagnostics,
        prior: Self::State,
        proposed: Self::State,
        config: Self::State,
    ) -> Option<(Self::State, Vec<AttributePath>)>;

    async fn plan_destroy(&self, diags: &mut Diagnostics, prior: Self::State) -> Option<()> {
        _ = (diags, prior);
        Some(())
    }

    async fn create(
        &self,
        diags: &mut Diagnostics,
        planned: Self::State,
        config: Self::State,
    ) -> Option<Self::State>;

    async fn update(
        &self,
        diags: &mut Diagnostics,
        prior: Self::State,
        planned: Self::State,
        config: Self::State,
    ) -> Option<Self::State>;

    async fn destroy(&self, diags: &mut Diagnostics, prior: Self::State) -> Option<()>;

    /// State of an existing remote object, from its resource ID
    async fn import(&self, diags: &mut Diagnostics, id: String) -> Option<Self::State> {
        diags.root_error_short(format!("{id} cannot be imported"));
        None
    }
}

/// Type-erased [`Resource`]: states travel as [`RawValue`] payloads
#[async_trait]
pub trait DynamicResource: Send + Sync {
    fn schema(&self, diags: &mut Diagnostics) -> Option<Schema>;
    async fn validate(&self, diags: &mut Diagnostics, config: RawValue) -> Option<()>;
    async fn read(&self, diags: &mut Diagnostics, state: RawValue) -> Option<RawValue>;
    async fn plan_create(
        &self,
        diags: &mut Diagnostics,
        proposed: RawValue,
        config: RawValue,
    ) -> Option<RawValue>;
    async fn plan_update(
        &self,
        diags: &mut Diagnostics,
        prior: RawValue,
        proposed: RawValue,
        config: RawValue,
    ) -> Option<(RawValue, Vec<AttributePath>)>;
    async fn plan_destroy(&self, diags: &mut Diagnostics, prior: RawValue) -> Option<()>;
    async fn create(
        &self,
        diags: &mut Diagnostics,
        planned: RawValue,
        config: RawValue,
    ) -> Option<RawValue>;
    async fn update(
        &self,
        diags: &mut Diagnostics,
        prior: RawValue,
        planned: RawValue,
        config: RawValue,
    ) -> Option<RawValue>;
    async fn destroy(&self, diags: &mut Diagnostics, prior: RawValue) -> Option<()>;
    async fn import(&self, diags: &mut Diagnostics, id: String) -> Option<RawValue>;
}

/// Encode the outcome of a typed operation
fn encode<S: Serialize>(diags: &mut Diagnostics, state: Option<S>) -> Option<RawValue> {
    RawValue::serialize(diags, &state?)
}

#[async_trait]
impl<R: Resource> DynamicResource for R {
    fn schema(&self, diags: &mut Diagnostics) -> Option<Schema> {
        Resource::schema(self, diags)
    }

    async fn validate(&self, diags: &mut Diagnostics, config: RawValue) -> Option<()> {
        let config: R::State = config.deserialize(diags)?;
        Resource::validate(self, diags, config).await
    }

    async fn read(&self, diags: &mut Diagnostics, state: RawValue) -> Option<RawValue> {
        let state: R::State = state.deserialize(diags)?;
        let refreshed = Resource::read(self, diags, state).await;
        encode(diags, refreshed)
    }

    async fn plan_create(
        &self,
        diags: &mut Diagnostics,
        proposed: RawValue,
        config: RawValue,
    ) -> Option<RawValue> {
        let (proposed, config): (R::State, R::State) =
            (proposed.deserialize(diags), config.deserialize(diags)).factor()?;
        let planned = Resource::plan_create(self, diags, proposed, config).await;
        encode(diags, planned)
    }

    async fn plan_update(
        &self,
        diags: &mut Diagnostics,
        prior: RawValue,
        proposed: RawValue,
        config: RawValue,
    ) -> Option<(RawValue, Vec<AttributePath>)> {
        let (prior, proposed, config): (R::State, R::State, R::State) = (
            prior.deserialize(diags),
            proposed.deserialize(diags),
            config.deserialize(diags),
        )
            .factor()?;
        let (planned, replace) = Resource::plan_update(self, diags, prior, proposed, config).await?;
        Some((encode(diags, Some(planned))?, replace))
    }

    async fn plan_destroy(&self, diags: &mut Diagnostics, prior: RawValue) -> Option<()> {
        let prior: R::State = prior.deserialize(diags)?;
        Resource::plan_destroy(self, diags, prior).await
    }

    async fn create(
        &self,
        diags: &mut Diagnostics,
        planned: RawValue,
        config: RawValue,
    ) -> Option<RawValue> {
        let (planned, config): (R::State, R::State) =
            (planned.deserialize(diags), config.deserialize(diags)).factor()?;
        let created = Resource::create(self, diags, planned, config).await;
        encode(diags, created)
    }

    async fn update(
        &self,
        diags: &mut Diagnostics,
        prior: RawValue,
        planned: RawValue,
        config: RawValue,
    ) -> Option<RawValue> {
        let (prior, planned, config): (R::State, R::State, R::State) = (
            prior.deserialize(diags),
            planned.deserialize(diags),
            config.deserialize(diags),
        )
            .factor()?;
        let updated = Resource::update(self, diags, prior, planned, config).await;
        encode(diags, updated)
    }

    async fn destroy(&self, diags: &mut Diagnostics, prior: RawValue) -> Option<()> {
        let prior: R::State = prior.deserialize(diags)?;
        Resource::destroy(self, diags, prior).await
    }

    async fn import(&self, diags: &mut Diagnostics, id: String) -> Option<RawValue> {
        let imported = Resource::import(self, diags, id).await;
        encode(diags, imported)
    }
}
