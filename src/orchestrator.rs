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

//! Generic lifecycle of a managed remote resource
//!
//! Every resource type follows the same state machine:
//! `NotExists -> Creating -> Exists -> {Reading, Updating, Deleting} -> NotExists`.
//! [`Managed`] implements it once, a [`ResourceStrategy`] supplies the parts that
//! differ between resource types.

use std::{collections::BTreeSet, fmt::Debug, future::Future, sync::Arc, time::Duration};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, info, warn};

use crate::{
    attribute_path::AttributePath,
    client::{ApiError, PollError, Poller, ResourceClient},
    config::{OperationTimeouts, TimeoutsState},
    context::ProviderContext,
    diagnostics::Diagnostics,
    error::{Error, Operation},
    ids::ResourceId,
    resource::Resource,
    schema::Schema,
    utils::{ExtractDiagnostics, WithSchema},
    value::{Value, ValueString},
};

/// State of a managed resource
pub trait ManagedState:
    WithSchema
    + Clone
    + Default
    + PartialEq
    + Debug
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    fn id(&self) -> &ValueString;
    fn id_mut(&mut self) -> &mut ValueString;
    fn timeouts(&self) -> &Value<TimeoutsState>;
    fn timeouts_mut(&mut self) -> &mut Value<TimeoutsState>;
}

/// Document to submit for an update
#[derive(Debug, Clone, PartialEq)]
pub struct Update<M> {
    pub model: M,
    /// The resource must be stopped before submitting, and started afterwards
    pub restart: bool,
}

impl<M> Update<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            restart: false,
        }
    }
}

/// Parts of the lifecycle specific to a resource type
pub trait ResourceStrategy: Send + Sync + 'static {
    type Id: ResourceId + Default;
    type Model: Clone + Send + Sync + 'static;
    type State: ManagedState;

    /// Terraform type name
    const TYPE_NAME: &'static str;
    const TIMEOUTS: OperationTimeouts;
    /// Top-level attributes whose change requires replacing the resource
    const FORCE_NEW: &'static [&'static str] = &[];

    fn client(&self) -> Arc<dyn ResourceClient<Self::Id, Self::Model>>;

    /// Identifier of the resource described by a configuration
    fn id_from_config(&self, ctx: &ProviderContext, state: &Self::State)
        -> Result<Self::Id, Error>;

    /// Identifier of the resource recorded in a state
    fn id_from_state(&self, state: &Self::State) -> Result<Self::Id, Error> {
        Self::Id::parse_insensitively(state.id().as_str())
    }

    /// Static checks of the configuration
    ///
    /// By default, the configuration is expanded against a placeholder identifier.
    fn validate(&self, state: &Self::State, diags: &mut Diagnostics) {
        if let Err(err) = self.expand(&Self::Id::default(), state) {
            diags.report(err);
        }
    }

    /// Mark the attributes computed by the service as unknown
    fn plan_computed(&self, prior: Option<&Self::State>, planned: &mut Self::State) {
        _ = prior;
        _ = planned;
    }

    /// Locks to hold while the resource is written, parents first
    fn lock_keys(&self, id: &Self::Id) -> Vec<(String, &'static str)> {
        _ = id;
        Vec::new()
    }

    /// Build the document to submit on creation
    fn expand(&self, id: &Self::Id, state: &Self::State) -> Result<Self::Model, Error>;

    /// Build the document to submit on update
    ///
    /// `changed` holds the top-level attributes that differ between `prior` and `planned`.
    fn expand_update(
        &self,
        id: &Self::Id,
        existing: Self::Model,
        prior: &Self::State,
        planned: &Self::State,
        changed: &BTreeSet<String>,
    ) -> Result<Update<Self::Model>, Error> {
        _ = (existing, prior, changed);
        self.expand(id, planned).map(Update::new)
    }

    /// Build the state from a fetched document
    ///
    /// `previous` is the last known state, used to recover write-only attributes.
    fn flatten(
        &self,
        id: &Self::Id,
        model: Self::Model,
        previous: &Self::State,
    ) -> Result<Self::State, Error>;

    /// Check if an error means the remote object does not exist
    fn is_absent(&self, err: &ApiError) -> bool {
        err.was_not_found()
    }

    /// Check if an error of the existence check preceding a creation means the remote
    /// object does not exist
    fn is_absent_before_create(&self, err: &ApiError) -> bool {
        self.is_absent(err)
    }
}

/// Top-level attributes whose value differs between two states
pub fn changed_fields<T: Serialize>(prior: &T, planned: &T) -> Result<BTreeSet<String>, Error> {
    let prior = serde_json::to_value(prior)?;
    let planned = serde_json::to_value(planned)?;
    let empty = serde_json::Map::new();
    let prior = prior.as_object().unwrap_or(&empty);
    let planned = planned.as_object().unwrap_or(&empty);

    Ok(prior
        .keys()
        .chain(planned.keys())
        .filter(|key| prior.get(*key) != planned.get(*key))
        .cloned()
        .collect())
}

/// [`Resource`] implemented once for every [`ResourceStrategy`]
///
/// A null state means the remote object does not exist.
pub struct Managed<S> {
    strategy: S,
    ctx: ProviderContext,
}

impl<S: ResourceStrategy> Managed<S> {
    pub fn new(strategy: S, ctx: ProviderContext) -> Self {
        Self { strategy, ctx }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    fn timeouts(&self, state: &S::State) -> Result<OperationTimeouts, Error> {
        match state.timeouts() {
            Value::Value(timeouts) => timeouts.resolve(S::TIMEOUTS),
            _ => Ok(S::TIMEOUTS),
        }
    }

    /// Run `fut` under `timeout`, interrupted when the provider stops
    async fn guarded<T, F>(
        &self,
        operation: Operation,
        id: &str,
        timeout: Duration,
        fut: F,
    ) -> Result<T, Error>
    where
        F: Future<Output = Result<T, Error>>,
    {
        tokio::select! {
            biased;
            _ = self.ctx.cancel.cancelled() => Err(Error::Cancelled {
                operation,
                id: id.to_owned(),
            }),
            result = tokio::time::timeout(timeout, fut) => match result {
                Ok(result) => result,
                Err(_) => Err(Error::Timeout {
                    operation,
                    id: id.to_owned(),
                    timeout,
                }),
            },
        }
    }

    /// Wait for a long-running operation
    async fn wait(&self, operation: Operation, id: &S::Id, poller: Poller) -> Result<(), Error> {
        debug!(resource_type = S::TYPE_NAME, %id, %operation, "waiting for completion");
        poller
            .wait(&self.ctx.cancel)
            .await
            .map_err(|err| match err {
                PollError::Failed(source) => Error::remote(operation, id, source),
                PollError::Cancelled => Error::Cancelled {
                    operation,
                    id: id.id(),
                },
            })
    }

    fn flatten(
        &self,
        id: &S::Id,
        model: S::Model,
        previous: &S::State,
    ) -> Result<S::State, Error> {
        let mut state = self.strategy.flatten(id, model, previous)?;
        *state.id_mut() = id.id().into();
        *state.timeouts_mut() = previous.timeouts().clone();
        Ok(state)
    }

    /// Fetch the document after a write
    async fn read_back(
        &self,
        operation: Operation,
        id: &S::Id,
        previous: &S::State,
    ) -> Result<S::State, Error> {
        match self.strategy.client().get(id).await {
            Ok(model) => self.flatten(id, model, previous),
            Err(err) if self.strategy.is_absent(&err) => Err(Error::NotFound(id.id())),
            Err(err) => Err(Error::remote(operation, id, err)),
        }
    }

    async fn create_resource(&self, planned: &S::State) -> Result<S::State, Error> {
        let id = self.strategy.id_from_config(&self.ctx, planned)?;
        let timeouts = self.timeouts(planned)?;
        let model = self.strategy.expand(&id, planned)?;
        let operation = Operation::Creating;
        let client = self.strategy.client();

        self.guarded(operation, &id.id(), timeouts.create, async {
            match client.get(&id).await {
                Ok(_) => {
                    return Err(Error::ImportRequired {
                        resource_type: S::TYPE_NAME.into(),
                        id: id.id(),
                    })
                }
                Err(err) if self.strategy.is_absent_before_create(&err) => (),
                Err(err) => return Err(Error::remote(Operation::Retrieving, &id, err)),
            }

            let guards = self
                .ctx
                .locks
                .acquire_all(&self.strategy.lock_keys(&id))
                .await;
            info!(resource_type = S::TYPE_NAME, %id, %operation, "submitting");
            let poller = client
                .create_or_update(&id, model)
                .await
                .map_err(|err| Error::remote(operation, &id, err))?;
            self.wait(operation, &id, poller).await?;
            drop(guards);

            self.read_back(operation, &id, planned).await
        })
        .await
    }

    async fn read_resource(&self, state: &S::State) -> Result<Option<S::State>, Error> {
        let id = self.strategy.id_from_state(state)?;
        let timeouts = self.timeouts(state)?;
        let operation = Operation::Retrieving;

        self.guarded(operation, &id.id(), timeouts.read, async {
            match self.strategy.client().get(&id).await {
                Ok(model) => self.flatten(&id, model, state).map(Some),
                Err(err) if self.strategy.is_absent(&err) => {
                    debug!(
                        resource_type = S::TYPE_NAME,
                        %id,
                        "remote object was not found, removing from state"
                    );
                    Ok(None)
                }
                Err(err) => Err(Error::remote(operation, &id, err)),
            }
        })
        .await
    }

    async fn update_resource(
        &self,
        prior: &S::State,
        planned: &S::State,
    ) -> Result<S::State, Error> {
        let id = self.strategy.id_from_state(prior)?;
        let timeouts = self.timeouts(planned)?;
        let changed = changed_fields(prior, planned)?;
        let operation = Operation::Updating;
        let client = self.strategy.client();

        self.guarded(operation, &id.id(), timeouts.update, async {
            let guards = self
                .ctx
                .locks
                .acquire_all(&self.strategy.lock_keys(&id))
                .await;

            let existing = client
                .get(&id)
                .await
                .map_err(|err| Error::remote(Operation::Retrieving, &id, err))?;
            let Update { model, restart } =
                self.strategy
                    .expand_update(&id, existing, prior, planned, &changed)?;

            if restart {
                info!(resource_type = S::TYPE_NAME, %id, "stopping before update");
                let poller = client
                    .stop(&id)
                    .await
                    .map_err(|err| Error::remote(Operation::Stopping, &id, err))?;
                self.wait(Operation::Stopping, &id, poller).await?;
            }

            info!(resource_type = S::TYPE_NAME, %id, %operation, changed = ?changed, "submitting");
            let poller = client
                .create_or_update(&id, model)
                .await
                .map_err(|err| Error::remote(operation, &id, err))?;
            self.wait(operation, &id, poller).await?;

            if restart {
                info!(resource_type = S::TYPE_NAME, %id, "starting after update");
                let poller = client
                    .start(&id)
                    .await
                    .map_err(|err| Error::remote(Operation::Starting, &id, err))?;
                self.wait(Operation::Starting, &id, poller).await?;
            }
            drop(guards);

            self.read_back(operation, &id, planned).await
        })
        .await
    }

    async fn delete_resource(&self, prior: &S::State) -> Result<(), Error> {
        let id = self.strategy.id_from_state(prior)?;
        let timeouts = self.timeouts(prior)?;
        let operation = Operation::Deleting;
        let client = self.strategy.client();

        self.guarded(operation, &id.id(), timeouts.delete, async {
            let _guards = self
                .ctx
                .locks
                .acquire_all(&self.strategy.lock_keys(&id))
                .await;

            info!(resource_type = S::TYPE_NAME, %id, %operation, "submitting");
            let poller = match client.delete(&id).await {
                Ok(poller) => poller,
                Err(err) if self.strategy.is_absent(&err) => {
                    warn!(resource_type = S::TYPE_NAME, %id, "already deleted");
                    return Ok(());
                }
                Err(err) => return Err(Error::remote(operation, &id, err)),
            };
            match poller.wait(&self.ctx.cancel).await {
                Ok(()) => Ok(()),
                Err(PollError::Failed(err)) if self.strategy.is_absent(&err) => {
                    warn!(resource_type = S::TYPE_NAME, %id, "deleted while waiting");
                    Ok(())
                }
                Err(PollError::Failed(err)) => Err(Error::remote(operation, &id, err)),
                Err(PollError::Cancelled) => Err(Error::Cancelled {
                    operation,
                    id: id.id(),
                }),
            }
        })
        .await
    }

    async fn import_resource(&self, raw_id: &str) -> Result<S::State, Error> {
        let id = S::Id::parse_insensitively(raw_id)?;
        let operation = Operation::Importing;

        self.guarded(operation, &id.id(), S::TIMEOUTS.read, async {
            match self.strategy.client().get(&id).await {
                Ok(model) => self.flatten(&id, model, &S::State::default()),
                Err(err) if self.strategy.is_absent(&err) => Err(Error::ImportNotFound(id.id())),
                Err(err) => Err(Error::remote(operation, &id, err)),
            }
        })
        .await
    }

    fn report<T>(&self, diags: &mut Diagnostics, result: Result<T, Error>) -> Option<T> {
        if let Err(err) = &result {
            if !err.is_validation() {
                error!(resource_type = S::TYPE_NAME, error = %err, "operation failed");
            }
        }
        result.extract_diagnostics(diags)
    }
}

#[async_trait]
impl<S: ResourceStrategy> Resource for Managed<S> {
    type State = Value<S::State>;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(S::State::schema())
    }

    async fn validate(&self, diags: &mut Diagnostics, config: Self::State) -> Option<()> {
        if let Value::Value(config) = &config {
            self.strategy.validate(config, diags);
            if let Value::Value(timeouts) = config.timeouts() {
                timeouts.validate(diags);
            }
        }

        if diags.errors.len() == 0 {
            Some(())
        } else {
            None
        }
    }

    async fn read(&self, diags: &mut Diagnostics, state: Self::State) -> Option<Self::State> {
        let state = match state {
            Value::Value(state) => state,
            gone => return Some(gone),
        };
        let state = self.report(diags, self.read_resource(&state).await)?;
        Some(state.into())
    }

    async fn plan_create(
        &self,
        _diags: &mut Diagnostics,
        proposed_state: Self::State,
        _config_state: Self::State,
    ) -> Option<Self::State> {
        let mut state = match proposed_state {
            Value::Value(state) => state,
            proposed => return Some(proposed),
        };
        *state.id_mut() = ValueString::Unknown;
        self.strategy.plan_computed(None, &mut state);
        Some(Value::Value(state))
    }

    async fn plan_update(
        &self,
        diags: &mut Diagnostics,
        prior_state: Self::State,
        proposed_state: Self::State,
        _config_state: Self::State,
    ) -> Option<(Self::State, Vec<AttributePath>)> {
        let (prior, mut state) = match (prior_state, proposed_state) {
            (Value::Value(prior), Value::Value(state)) => (prior, state),
            (_, proposed) => return Some((proposed, Vec::new())),
        };
        *state.id_mut() = prior.id().clone();

        let changed = changed_fields(&prior, &state).extract_diagnostics(diags)?;
        let trigger_replace = S::FORCE_NEW
            .iter()
            .filter(|name| changed.contains(**name))
            .map(|name| AttributePath::new(*name))
            .collect();

        self.strategy.plan_computed(Some(&prior), &mut state);
        Some((Value::Value(state), trigger_replace))
    }

    async fn create(
        &self,
        diags: &mut Diagnostics,
        planned_state: Self::State,
        _config_state: Self::State,
    ) -> Option<Self::State> {
        let Value::Value(planned) = planned_state else {
            diags.root_error_short("Cannot create a resource without configuration");
            return None;
        };
        let state = self.report(diags, self.create_resource(&planned).await)?;
        Some(Value::Value(state))
    }

    async fn update(
        &self,
        diags: &mut Diagnostics,
        prior_state: Self::State,
        planned_state: Self::State,
        _config_state: Self::State,
    ) -> Option<Self::State> {
        let (Value::Value(prior), Value::Value(planned)) = (prior_state, planned_state) else {
            diags.root_error_short("Cannot update a resource that does not exist");
            return None;
        };
        let state = self.report(diags, self.update_resource(&prior, &planned).await)?;
        Some(Value::Value(state))
    }

    async fn destroy(&self, diags: &mut Diagnostics, prior_state: Self::State) -> Option<()> {
        let Value::Value(prior) = prior_state else {
            return Some(());
        };
        self.report(diags, self.delete_resource(&prior).await)
    }

    async fn import(&self, diags: &mut Diagnostics, id: String) -> Option<Self::State> {
        let state = self.report(diags, self.import_resource(&id).await)?;
        Some(Value::Value(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        id: ValueString,
        name: ValueString,
        tags: Value<Vec<ValueString>>,
    }

    #[test]
    fn changed_top_level_fields() {
        let prior = Sample {
            id: "a".into(),
            name: "one".into(),
            tags: Value::Value(vec!["x".into()]),
        };
        let mut planned = prior.clone();
        assert!(changed_fields(&prior, &planned).unwrap().is_empty());

        planned.name = "two".into();
        planned.tags = Value::Null;
        let changed = changed_fields(&prior, &planned).unwrap();
        assert_eq!(
            changed.into_iter().collect::<Vec<_>>(),
            vec!["name".to_string(), "tags".to_string()]
        );
    }
}
