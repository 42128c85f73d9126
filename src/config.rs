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

//! Provider configuration and per-resource timeouts

use std::{env, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    attribute_path::AttributePath,
    diagnostics::Diagnostics,
    error::Error,
    map,
    schema::{Attribute, AttributeType, Block, Description, Schema},
    utils::WithSchema,
    value::{ValueBool, ValueString},
};

const ENVIRONMENTS: &[&str] = &["public", "usgovernment", "german", "china"];

/// Configuration block of the provider
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub subscription_id: ValueString,
    pub tenant_id: ValueString,
    pub environment: ValueString,
    pub skip_provider_registration: ValueBool,
    pub partner_id: ValueString,
}

impl WithSchema for ProviderConfig {
    fn schema() -> Schema {
        Schema {
            version: 1,
            block: Block {
                version: 1,
                attributes: map! {
                    "subscription_id" => Attribute::optional(
                        AttributeType::String,
                        "Subscription ID which should be used. Defaults to `ARM_SUBSCRIPTION_ID`",
                    ),
                    "tenant_id" => Attribute::optional(
                        AttributeType::String,
                        "Tenant ID which should be used. Defaults to `ARM_TENANT_ID`",
                    ),
                    "environment" => Attribute::optional(
                        AttributeType::String,
                        "Cloud environment: `public`, `usgovernment`, `german` or `china`. Defaults to `ARM_ENVIRONMENT`, then `public`",
                    ),
                    "skip_provider_registration" => Attribute::optional(
                        AttributeType::Bool,
                        "Do not register the resource providers used by this provider",
                    ),
                    "partner_id" => Attribute::optional(
                        AttributeType::String,
                        "GUID used for partner attribution",
                    ),
                },
                description: Description::plain("Azure networking provider"),
                ..Default::default()
            },
        }
    }
}

/// Resolved provider settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub subscription_id: String,
    pub tenant_id: Option<String>,
    pub environment: String,
    pub skip_provider_registration: bool,
    pub partner_id: Option<String>,
}

impl ProviderConfig {
    /// Check the attributes that are known
    pub fn validate(&self, diags: &mut Diagnostics) {
        if let Some(environment) = self.environment.non_empty() {
            if !ENVIRONMENTS.contains(&environment.to_lowercase().as_str()) {
                diags.error_short(
                    format!(
                        "Unknown environment {environment:?}, expected one of {}",
                        ENVIRONMENTS.join(", ")
                    ),
                    AttributePath::new("environment"),
                );
            }
        }
    }

    /// Fill unset attributes with the variables returned by `lookup`
    pub fn resolve_with<F>(&self, lookup: F) -> Result<ProviderSettings, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |value: &ValueString, var: &str| {
            value
                .non_empty()
                .map(str::to_owned)
                .or_else(|| lookup(var).filter(|v| !v.is_empty()))
        };

        let Some(subscription_id) = pick(&self.subscription_id, "ARM_SUBSCRIPTION_ID") else {
            return Err(Error::validation(
                "`subscription_id` must be set, either in the provider block or with `ARM_SUBSCRIPTION_ID`",
                AttributePath::new("subscription_id"),
            ));
        };
        let environment = pick(&self.environment, "ARM_ENVIRONMENT")
            .unwrap_or_else(|| "public".into())
            .to_lowercase();
        if !ENVIRONMENTS.contains(&environment.as_str()) {
            return Err(Error::validation(
                format!(
                    "Unknown environment {environment:?}, expected one of {}",
                    ENVIRONMENTS.join(", ")
                ),
                AttributePath::new("environment"),
            ));
        }

        Ok(ProviderSettings {
            subscription_id,
            tenant_id: pick(&self.tenant_id, "ARM_TENANT_ID"),
            environment,
            skip_provider_registration: self
                .skip_provider_registration
                .as_ref_option()
                .copied()
                .unwrap_or_default(),
            partner_id: self.partner_id.non_empty().map(str::to_owned),
        })
    }

    /// Fill unset attributes with the process environment
    pub fn resolve(&self) -> Result<ProviderSettings, Error> {
        self.resolve_with(|var| env::var(var).ok())
    }
}

/// Time allowed for each operation on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationTimeouts {
    pub create: Duration,
    pub read: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl OperationTimeouts {
    pub const fn minutes(create: u64, read: u64, update: u64, delete: u64) -> Self {
        Self {
            create: Duration::from_secs(create * 60),
            read: Duration::from_secs(read * 60),
            update: Duration::from_secs(update * 60),
            delete: Duration::from_secs(delete * 60),
        }
    }
}

/// `timeouts` block accepted by every managed resource
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeoutsState {
    pub create: ValueString,
    pub read: ValueString,
    pub update: ValueString,
    pub delete: ValueString,
}

impl TimeoutsState {
    pub fn block() -> Block {
        let attr = |op: &str| {
            Attribute::optional(
                AttributeType::String,
                &format!("Time allowed to {op} the resource, like `30m` or `1h30m`"),
            )
        };
        Block {
            attributes: map! {
                "create" => attr("create"),
                "read" => attr("read"),
                "update" => attr("update"),
                "delete" => attr("delete"),
            },
            description: Description::plain("Operation timeouts"),
            ..Default::default()
        }
    }

    fn fields(&self) -> [(&'static str, &ValueString); 4] {
        [
            ("create", &self.create),
            ("read", &self.read),
            ("update", &self.update),
            ("delete", &self.delete),
        ]
    }

    /// Report invalid durations on `timeouts.<op>`
    pub fn validate(&self, diags: &mut Diagnostics) {
        for (op, value) in self.fields() {
            if let Some(text) = value.non_empty() {
                if let Err(reason) = parse_duration(text) {
                    diags.error_short(
                        format!("Invalid duration {text:?}: {reason}"),
                        AttributePath::new("timeouts").index(0).attribute(op),
                    );
                }
            }
        }
    }

    /// Overlay the configured durations on `defaults`
    pub fn resolve(&self, defaults: OperationTimeouts) -> Result<OperationTimeouts, Error> {
        let get = |op: &'static str, value: &ValueString, default: Duration| match value.non_empty()
        {
            Some(text) => parse_duration(text).map_err(|reason| {
                Error::validation(
                    format!("Invalid duration {text:?}: {reason}"),
                    AttributePath::new("timeouts").index(0).attribute(op),
                )
            }),
            None => Ok(default),
        };
        Ok(OperationTimeouts {
            create: get("create", &self.create, defaults.create)?,
            read: get("read", &self.read, defaults.read)?,
            update: get("update", &self.update, defaults.update)?,
            delete: get("delete", &self.delete, defaults.delete)?,
        })
    }
}

/// Parse a duration like `90m`, `1h30m`, `45s` or `1500ms`
pub fn parse_duration(text: &str) -> Result<Duration, String> {
    let mut total = Duration::ZERO;
    let mut rest = text.trim();
    if rest.is_empty() {
        return Err("empty duration".into());
    }
    if rest == "0" {
        return Ok(total);
    }

    while !rest.is_empty() {
        let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        if digits == 0 {
            return Err(format!("expected a number at {rest:?}"));
        }
        let amount: u64 = rest[..digits]
            .parse()
            .map_err(|err| format!("invalid number {:?}: {err}", &rest[..digits]))?;
        rest = &rest[digits..];

        let unit_len = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
        let unit = match &rest[..unit_len] {
            "h" => Duration::from_secs(3600),
            "m" => Duration::from_secs(60),
            "s" => Duration::from_secs(1),
            "ms" => Duration::from_millis(1),
            "" => return Err(format!("missing unit after {amount}")),
            other => return Err(format!("unknown unit {other:?}")),
        };
        rest = &rest[unit_len..];

        let amount = u32::try_from(amount).map_err(|_| format!("{amount} is too large"))?;
        total = unit
            .checked_mul(amount)
            .and_then(|part| total.checked_add(part))
            .ok_or_else(|| format!("duration {text:?} is too large"))?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(parse_duration("90m"), Ok(Duration::from_secs(90 * 60)));
        assert_eq!(parse_duration("1h30m"), Ok(Duration::from_secs(90 * 60)));
        assert_eq!(parse_duration("45s"), Ok(Duration::from_secs(45)));
        assert_eq!(parse_duration("1500ms"), Ok(Duration::from_millis(1500)));
        assert_eq!(parse_duration("0"), Ok(Duration::ZERO));
        for invalid in ["", "m", "10", "10x", "1h-5m", "1.5h"] {
            assert!(parse_duration(invalid).is_err(), "{invalid} should be rejected");
        }
    }

    #[test]
    fn timeouts_overlay_defaults() {
        let defaults = OperationTimeouts::minutes(90, 5, 90, 90);
        let state = TimeoutsState {
            create: "2h".into(),
            ..Default::default()
        };
        let timeouts = state.resolve(defaults).unwrap();
        assert_eq!(timeouts.create, Duration::from_secs(7200));
        assert_eq!(timeouts.read, Duration::from_secs(300));
    }

    #[test]
    fn invalid_timeout_points_to_attribute() {
        let state = TimeoutsState {
            delete: "soon".into(),
            ..Default::default()
        };
        let mut diags = Diagnostics::default();
        state.validate(&mut diags);
        assert_eq!(diags.errors.len(), 1);
        assert_eq!(diags.errors[0].attribute.to_string(), "timeouts[0].delete");
        assert!(state
            .resolve(OperationTimeouts::minutes(1, 1, 1, 1))
            .is_err());
    }

    #[test]
    fn settings_from_environment() {
        let config = ProviderConfig {
            tenant_id: "tenant-from-config".into(),
            ..Default::default()
        };
        let settings = config
            .resolve_with(|var| match var {
                "ARM_SUBSCRIPTION_ID" => Some("sub-from-env".into()),
                "ARM_TENANT_ID" => Some("tenant-from-env".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(settings.subscription_id, "sub-from-env");
        assert_eq!(settings.tenant_id.as_deref(), Some("tenant-from-config"));
        assert_eq!(settings.environment, "public");
        assert!(!settings.skip_provider_registration);
    }

    #[test]
    fn subscription_is_required() {
        let err = ProviderConfig::default().resolve_with(|_| None).unwrap_err();
        assert!(err.is_validation());

        let config = ProviderConfig {
            subscription_id: "sub".into(),
            environment: "mars".into(),
            ..Default::default()
        };
        assert!(config.resolve_with(|_| None).is_err());
        let mut diags = Diagnostics::default();
        config.validate(&mut diags);
        assert!(diags.has_errors());
    }
}
