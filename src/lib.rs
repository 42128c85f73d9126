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

//! Azure networking resources for Terraform and OpenTofu providers
//!
//! The crate implements the lifecycle of `azurerm_application_gateway`,
//! `azurerm_firewall_policy_rule_group` and `azurerm_express_route_circuit_peering`,
//! and the `azurerm_application_gateway` data source.
//!
//! The remote API is reached through the [`client::ResourceClient`] trait, implemented by
//! the embedder. [`AzureNetworkProvider`] registers every resource behind the [`Provider`]
//! trait, and the host plugin runtime talks to it through [`DynamicProvider`].

mod attribute_path;
mod data_source;
mod diagnostics;
mod network_provider;
mod provider;
mod raw;
mod resource;
mod utils;

pub mod client;
pub mod config;
pub mod context;
pub mod encoding;
pub mod error;
pub mod ids;
pub mod locks;
pub mod logging;
pub mod models;
pub mod orchestrator;
pub mod schema;
pub mod services;
pub mod value;

pub use attribute_path::{AttributePath, AttributePathStep};
pub use data_source::{DataSource, DynamicDataSource};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{Error, Operation};
pub use network_provider::AzureNetworkProvider;
pub use provider::{DynamicProvider, Provider};
pub use raw::RawValue;
pub use resource::{DynamicResource, Resource};
pub use utils::WithSchema;

/// Build a `HashMap`, converting keys and values with [`Into::into`]
///
/// Used to declare schema attributes and blocks.
///
/// ```
/// # use tf_azurerm_network::map;
/// # use std::collections::HashMap;
/// let tags: HashMap<String, String> = map! {
///     "environment" => "production",
///     "cost-center" => "networking",
/// };
/// assert_eq!(tags["environment"], "production");
/// ```
#[macro_export]
macro_rules! map {
    {$($key:expr => $value:expr),* $(,)?} => {{
        let mut map = ::std::collections::HashMap::default();
        $(map.insert($key.into(), $value.into());)*
        map
    }};
}
