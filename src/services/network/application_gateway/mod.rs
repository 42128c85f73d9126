//! `azurerm_application_gateway`
//!
//! The gateway is a single remote document: every child (listener, pool, rule, ...) is
//! written along with the whole gateway, and referenced by a synthetic
//! `{gatewayID}/{kind}/{name}` identifier.

mod data_source;
mod expand;
mod flatten;
mod state;

use std::{collections::BTreeSet, sync::Arc};

use crate::{
    client::{ApplicationGatewaysClient, ResourceClient},
    config::{OperationTimeouts, TimeoutsState},
    context::ProviderContext,
    error::Error,
    ids::{ApplicationGatewayId, PathRuleId, ResourceId, SubResourceKind},
    models::ApplicationGateway,
    orchestrator::{ManagedState, ResourceStrategy, Update},
    services::network::common::find_previous,
    value::{Value, ValueList, ValueString},
};

pub use data_source::ApplicationGatewayDataSource;
pub use state::*;

use flatten::child_id;

pub const TYPE_NAME: &str = "azurerm_application_gateway";

impl ManagedState for ApplicationGatewayState {
    fn id(&self) -> &ValueString {
        &self.id
    }
    fn id_mut(&mut self) -> &mut ValueString {
        &mut self.id
    }
    fn timeouts(&self) -> &Value<TimeoutsState> {
        &self.timeouts
    }
    fn timeouts_mut(&mut self) -> &mut Value<TimeoutsState> {
        &mut self.timeouts
    }
}

/// Lifecycle of an application gateway
#[derive(Clone)]
pub struct ApplicationGatewayStrategy {
    client: ApplicationGatewaysClient,
}

impl ApplicationGatewayStrategy {
    pub fn new(client: ApplicationGatewaysClient) -> Self {
        Self { client }
    }
}

impl ResourceStrategy for ApplicationGatewayStrategy {
    type Id = ApplicationGatewayId;
    type Model = ApplicationGateway;
    type State = ApplicationGatewayState;

    const TYPE_NAME: &'static str = TYPE_NAME;
    const TIMEOUTS: OperationTimeouts = OperationTimeouts::minutes(90, 5, 90, 90);
    const FORCE_NEW: &'static [&'static str] = &["name", "resource_group_name", "location"];

    fn client(&self) -> Arc<dyn ResourceClient<ApplicationGatewayId, ApplicationGateway>> {
        self.client.clone()
    }

    fn id_from_config(
        &self,
        ctx: &ProviderContext,
        state: &ApplicationGatewayState,
    ) -> Result<ApplicationGatewayId, Error> {
        Ok(ApplicationGatewayId::new(
            ctx.subscription_id()?,
            state.resource_group_name.as_str(),
            state.name.as_str(),
        ))
    }

    fn plan_computed(
        &self,
        prior: Option<&ApplicationGatewayState>,
        planned: &mut ApplicationGatewayState,
    ) {
        let gateway = prior.and_then(|prior| {
            ApplicationGatewayId::parse_insensitively(prior.id.as_str()).ok()
        });
        let empty = ApplicationGatewayState::default();
        plan_children(gateway.as_ref(), prior.unwrap_or(&empty), planned);
    }

    fn expand(
        &self,
        id: &ApplicationGatewayId,
        state: &ApplicationGatewayState,
    ) -> Result<ApplicationGateway, Error> {
        expand::expand_gateway(id, state)
    }

    fn expand_update(
        &self,
        id: &ApplicationGatewayId,
        existing: ApplicationGateway,
        prior: &ApplicationGatewayState,
        planned: &ApplicationGatewayState,
        changed: &BTreeSet<String>,
    ) -> Result<Update<ApplicationGateway>, Error> {
        expand::expand_gateway_update(id, existing, prior, planned, changed)
    }

    fn flatten(
        &self,
        id: &ApplicationGatewayId,
        model: ApplicationGateway,
        previous: &ApplicationGatewayState,
    ) -> Result<ApplicationGatewayState, Error> {
        flatten::flatten_gateway(id, model, previous)
    }
}

/// ID of the child `name`, as long as both the gateway and the name are known
fn planned_id(
    gateway: Option<&ApplicationGatewayId>,
    kind: SubResourceKind,
    name: &ValueString,
) -> ValueString {
    match (gateway, name) {
        (_, Value::Null) => Value::Null,
        (_, Value::Value(name)) if name.is_empty() => Value::Null,
        (Some(gateway), Value::Value(name)) => child_id(gateway, kind, name),
        _ => Value::Unknown,
    }
}

fn each<S>(list: &mut ValueList<Value<S>>, mut f: impl FnMut(&mut S)) {
    if let Value::Value(items) = list {
        for item in items.iter_mut() {
            if let Value::Value(item) = item {
                f(item);
            }
        }
    }
}

/// Fill the IDs of the children, which are derived from the gateway ID
///
/// On creation the gateway ID is not known yet, so neither are the children IDs.
fn plan_children(
    gateway: Option<&ApplicationGatewayId>,
    prior: &ApplicationGatewayState,
    planned: &mut ApplicationGatewayState,
) {
    use SubResourceKind::*;
    let id = |kind, name: &ValueString| planned_id(gateway, kind, name);

    each(&mut planned.gateway_ip_configuration, |config| {
        config.id = id(GatewayIpConfigurations, &config.name);
    });
    each(&mut planned.frontend_port, |port| {
        port.id = id(FrontendPorts, &port.name);
    });
    each(&mut planned.frontend_ip_configuration, |config| {
        config.id = id(FrontendIpConfigurations, &config.name);
        if config.private_ip_address.is_null() {
            config.private_ip_address =
                match find_previous(&prior.frontend_ip_configuration, config.name.as_str()) {
                    Some(previous) => previous.private_ip_address.clone(),
                    None => Value::Unknown,
                };
        }
    });
    each(&mut planned.backend_address_pool, |pool| {
        pool.id = id(BackendAddressPools, &pool.name);
    });
    each(&mut planned.backend_http_settings, |settings| {
        settings.id = id(BackendHttpSettingsCollection, &settings.name);
        settings.probe_id = id(Probes, &settings.probe_name);
        each(&mut settings.authentication_certificate, |cert| {
            cert.id = id(AuthenticationCertificates, &cert.name);
        });
    });
    each(&mut planned.http_listener, |listener| {
        listener.id = id(HttpListeners, &listener.name);
        listener.frontend_ip_configuration_id = id(
            FrontendIpConfigurations,
            &listener.frontend_ip_configuration_name,
        );
        listener.frontend_port_id = id(FrontendPorts, &listener.frontend_port_name);
        listener.ssl_certificate_id = id(SslCertificates, &listener.ssl_certificate_name);
    });
    each(&mut planned.request_routing_rule, |rule| {
        rule.id = id(RequestRoutingRules, &rule.name);
        rule.http_listener_id = id(HttpListeners, &rule.http_listener_name);
        rule.backend_address_pool_id = id(BackendAddressPools, &rule.backend_address_pool_name);
        rule.backend_http_settings_id =
            id(BackendHttpSettingsCollection, &rule.backend_http_settings_name);
        rule.redirect_configuration_id =
            id(RedirectConfigurations, &rule.redirect_configuration_name);
        rule.url_path_map_id = id(UrlPathMaps, &rule.url_path_map_name);
    });
    each(&mut planned.probe, |probe| {
        probe.id = id(Probes, &probe.name);
    });
    each(&mut planned.redirect_configuration, |redirect| {
        redirect.id = id(RedirectConfigurations, &redirect.name);
        redirect.target_listener_id = id(HttpListeners, &redirect.target_listener_name);
    });
    each(&mut planned.url_path_map, |map| {
        map.id = id(UrlPathMaps, &map.name);
        map.default_backend_address_pool_id =
            id(BackendAddressPools, &map.default_backend_address_pool_name);
        map.default_backend_http_settings_id = id(
            BackendHttpSettingsCollection,
            &map.default_backend_http_settings_name,
        );
        map.default_redirect_configuration_id =
            id(RedirectConfigurations, &map.default_redirect_configuration_name);
        let map_name = map.name.clone();
        each(&mut map.path_rule, |rule| {
            rule.id = match (gateway, &map_name, &rule.name) {
                (Some(gateway), Value::Value(map_name), Value::Value(name)) => PathRuleId::new(
                    &gateway.subscription_id,
                    &gateway.resource_group,
                    &gateway.name,
                    map_name,
                    name,
                )
                .id()
                .into(),
                _ => Value::Unknown,
            };
            rule.backend_address_pool_id =
                id(BackendAddressPools, &rule.backend_address_pool_name);
            rule.backend_http_settings_id =
                id(BackendHttpSettingsCollection, &rule.backend_http_settings_name);
            rule.redirect_configuration_id =
                id(RedirectConfigurations, &rule.redirect_configuration_name);
        });
    });
    each(&mut planned.authentication_certificate, |cert| {
        cert.id = id(AuthenticationCertificates, &cert.name);
    });
    each(&mut planned.trusted_root_certificate, |cert| {
        cert.id = id(TrustedRootCertificates, &cert.name);
    });
    each(&mut planned.ssl_certificate, |cert| {
        cert.id = id(SslCertificates, &cert.name);
        cert.public_cert_data = match find_previous(&prior.ssl_certificate, cert.name.as_str()) {
            Some(previous)
                if previous.data == cert.data
                    && previous.key_vault_secret_id == cert.key_vault_secret_id =>
            {
                previous.public_cert_data.clone()
            }
            _ => Value::Unknown,
        };
    });
}
