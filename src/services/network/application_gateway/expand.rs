use std::{collections::BTreeSet, mem};

use crate::{
    attribute_path::AttributePath,
    encoding::base64_encode_if_not,
    error::Error,
    ids::{ApplicationGatewayId, SubResourceKind},
    models::{
        ApplicationGateway, ApplicationGatewayProperties, ApplicationGatewaySku,
        AuthenticationCertificateProperties, AutoscaleConfiguration, BackendAddress,
        BackendAddressPoolProperties, BackendHttpSettingsProperties, ConnectionDraining,
        FrontendIpConfigurationProperties, FrontendPortProperties,
        GatewayIpConfigurationProperties, HttpListenerProperties, Named, PathRuleProperties,
        ProbeMatch, ProbeProperties, RedirectConfigurationProperties,
        RequestRoutingRuleProperties, SslCertificateProperties, SubResource,
        TrustedRootCertificateProperties, UrlPathMapProperties,
        WebApplicationFirewallConfiguration,
    },
    orchestrator::Update,
    services::network::common::{
        conflict, known_bool, non_empty, none_of, positive, sub_resource, sub_resources, Presence,
    },
    value::Value,
};

use super::state::{ApplicationGatewayState, PathRuleState};

/// Rule set used when the WAF configuration does not name one
pub(super) const DEFAULT_RULE_SET_TYPE: &str = "OWASP";
const MAX_UPLOAD_LIMIT_MB: i64 = 500;

fn path(block: &'static str, index: usize) -> AttributePath {
    AttributePath::new(block).index(index as i64)
}

type Children<P> = Result<Vec<Named<P>>, Error>;

/// Build the full gateway document
pub(super) fn expand_gateway(
    id: &ApplicationGatewayId,
    state: &ApplicationGatewayState,
) -> Result<ApplicationGateway, Error> {
    validate_waf(state)?;

    Ok(ApplicationGateway {
        id: None,
        name: id.name.clone(),
        location: state.location.as_str().to_owned(),
        tags: state
            .tags
            .iter()
            .flatten()
            .filter_map(|(key, value)| Some((key.clone(), value.as_ref_option()?.clone())))
            .collect(),
        zones: state.zones.strings(),
        properties: ApplicationGatewayProperties {
            sku: state.sku.as_ref_option().map(|sku| ApplicationGatewaySku {
                name: sku.name.as_str().to_owned(),
                tier: sku.tier.as_str().to_owned(),
                capacity: positive(&sku.capacity),
            }),
            autoscale_configuration: state.autoscale_configuration.as_ref_option().map(
                |autoscale| AutoscaleConfiguration {
                    min_capacity: autoscale.min_capacity.unwrap_or_default(),
                    max_capacity: positive(&autoscale.max_capacity),
                },
            ),
            gateway_ip_configurations: expand_gateway_ip_configurations(state),
            frontend_ports: expand_frontend_ports(state),
            frontend_ip_configurations: expand_frontend_ip_configurations(state),
            backend_address_pools: expand_backend_address_pools(state),
            backend_http_settings_collection: expand_backend_http_settings(id, state)?,
            http_listeners: expand_http_listeners(id, state)?,
            request_routing_rules: expand_request_routing_rules(id, state)?,
            probes: expand_probes(state)?,
            redirect_configurations: expand_redirect_configurations(id, state)?,
            url_path_maps: expand_url_path_maps(id, state)?,
            authentication_certificates: expand_authentication_certificates(state),
            trusted_root_certificates: expand_trusted_root_certificates(state)?,
            ssl_certificates: expand_ssl_certificates(state)?,
            web_application_firewall_configuration: expand_waf_configuration(state),
            enable_http2: known_bool(&state.enable_http2),
            firewall_policy: SubResource::optional(state.firewall_policy_id.as_str()),
            operational_state: None,
            provisioning_state: None,
        },
    })
}

/// Merge the sections that changed into the fetched document
pub(super) fn expand_gateway_update(
    id: &ApplicationGatewayId,
    existing: ApplicationGateway,
    prior: &ApplicationGatewayState,
    planned: &ApplicationGatewayState,
    changed: &BTreeSet<String>,
) -> Result<Update<ApplicationGateway>, Error> {
    let mut desired = expand_gateway(id, planned)?;
    let mut model = existing;
    let restart = changed.contains("gateway_ip_configuration")
        && gateway_ip_configurations_moved(prior, planned);

    let from = &mut desired.properties;
    let into = &mut model.properties;
    for field in changed {
        match field.as_str() {
            "tags" => model.tags = mem::take(&mut desired.tags),
            "zones" => model.zones = mem::take(&mut desired.zones),
            "enable_http2" => into.enable_http2 = from.enable_http2.take(),
            "firewall_policy_id" => into.firewall_policy = from.firewall_policy.take(),
            "sku" => into.sku = from.sku.take(),
            "autoscale_configuration" => {
                into.autoscale_configuration = from.autoscale_configuration.take()
            }
            "gateway_ip_configuration" => {
                into.gateway_ip_configurations = mem::take(&mut from.gateway_ip_configurations)
            }
            "frontend_port" => into.frontend_ports = mem::take(&mut from.frontend_ports),
            "frontend_ip_configuration" => {
                into.frontend_ip_configurations =
                    mem::take(&mut from.frontend_ip_configurations)
            }
            "backend_address_pool" => {
                into.backend_address_pools = mem::take(&mut from.backend_address_pools)
            }
            "backend_http_settings" => {
                into.backend_http_settings_collection =
                    mem::take(&mut from.backend_http_settings_collection)
            }
            "http_listener" => into.http_listeners = mem::take(&mut from.http_listeners),
            "request_routing_rule" => {
                into.request_routing_rules = mem::take(&mut from.request_routing_rules)
            }
            "probe" => into.probes = mem::take(&mut from.probes),
            "redirect_configuration" => {
                into.redirect_configurations = mem::take(&mut from.redirect_configurations)
            }
            "url_path_map" => into.url_path_maps = mem::take(&mut from.url_path_maps),
            "authentication_certificate" => {
                into.authentication_certificates =
                    mem::take(&mut from.authentication_certificates)
            }
            "trusted_root_certificate" => {
                into.trusted_root_certificates = mem::take(&mut from.trusted_root_certificates)
            }
            "ssl_certificate" => into.ssl_certificates = mem::take(&mut from.ssl_certificates),
            "waf_configuration" => {
                into.web_application_firewall_configuration =
                    from.web_application_firewall_configuration.take()
            }
            _ => (),
        }
    }

    Ok(Update { model, restart })
}

/// The gateway must be stopped when it moves to other subnets
///
/// Adding the first gateway IP configuration does not need a restart.
pub(super) fn gateway_ip_configurations_moved(
    prior: &ApplicationGatewayState,
    planned: &ApplicationGatewayState,
) -> bool {
    let subnets = |state: &ApplicationGatewayState| -> Vec<String> {
        state
            .gateway_ip_configuration
            .known_items()
            .map(|(_, config)| config.subnet_id.as_str().to_owned())
            .collect()
    };
    let old = subnets(prior);
    if old.is_empty() {
        return false;
    }
    let new = subnets(planned);
    old.len() != new.len() || old.iter().zip(&new).any(|(old, new)| old != new)
}

fn expand_gateway_ip_configurations(
    state: &ApplicationGatewayState,
) -> Vec<Named<GatewayIpConfigurationProperties>> {
    state
        .gateway_ip_configuration
        .known_items()
        .map(|(_, config)| {
            Named::new(
                config.name.as_str(),
                GatewayIpConfigurationProperties {
                    subnet: SubResource::optional(config.subnet_id.as_str()),
                },
            )
        })
        .collect()
}

fn expand_frontend_ports(state: &ApplicationGatewayState) -> Vec<Named<FrontendPortProperties>> {
    state
        .frontend_port
        .known_items()
        .map(|(_, port)| {
            Named::new(
                port.name.as_str(),
                FrontendPortProperties {
                    port: port.port.as_option(),
                },
            )
        })
        .collect()
}

fn expand_frontend_ip_configurations(
    state: &ApplicationGatewayState,
) -> Vec<Named<FrontendIpConfigurationProperties>> {
    state
        .frontend_ip_configuration
        .known_items()
        .map(|(_, config)| {
            Named::new(
                config.name.as_str(),
                FrontendIpConfigurationProperties {
                    private_ip_address: non_empty(&config.private_ip_address),
                    private_ip_allocation_method: non_empty(&config.private_ip_address_allocation),
                    subnet: SubResource::optional(config.subnet_id.as_str()),
                    public_ip_address: SubResource::optional(config.public_ip_address_id.as_str()),
                },
            )
        })
        .collect()
}

fn expand_backend_address_pools(
    state: &ApplicationGatewayState,
) -> Vec<Named<BackendAddressPoolProperties>> {
    state
        .backend_address_pool
        .known_items()
        .map(|(_, pool)| {
            let fqdns = pool.fqdns.strings().into_iter().map(|fqdn| BackendAddress {
                fqdn: Some(fqdn),
                ip_address: None,
            });
            let ip_addresses = pool.ip_addresses.strings().into_iter().map(|ip| BackendAddress {
                fqdn: None,
                ip_address: Some(ip),
            });
            Named::new(
                pool.name.as_str(),
                BackendAddressPoolProperties {
                    backend_addresses: fqdns.chain(ip_addresses).collect(),
                },
            )
        })
        .collect()
}

fn expand_backend_http_settings(
    gateway: &ApplicationGatewayId,
    state: &ApplicationGatewayState,
) -> Children<BackendHttpSettingsProperties> {
    state
        .backend_http_settings
        .known_items()
        .map(|(i, settings)| {
            if conflict(&settings.host_name, &settings.pick_host_name_from_backend_address) {
                return Err(Error::validation(
                    "Only one of `host_name` or `pick_host_name_from_backend_address` can be set",
                    path("backend_http_settings", i),
                ));
            }

            let authentication_certificates = settings
                .authentication_certificate
                .known_items()
                .map(|(_, cert)| cert.name.as_str().to_owned());
            Ok(Named::new(
                settings.name.as_str(),
                BackendHttpSettingsProperties {
                    port: settings.port.as_option(),
                    protocol: non_empty(&settings.protocol),
                    cookie_based_affinity: non_empty(&settings.cookie_based_affinity),
                    affinity_cookie_name: non_empty(&settings.affinity_cookie_name),
                    path: non_empty(&settings.path),
                    request_timeout: positive(&settings.request_timeout),
                    host_name: non_empty(&settings.host_name),
                    pick_host_name_from_backend_address: known_bool(
                        &settings.pick_host_name_from_backend_address,
                    ),
                    probe: sub_resource(gateway, SubResourceKind::Probes, &settings.probe_name),
                    authentication_certificates: sub_resources(
                        gateway,
                        SubResourceKind::AuthenticationCertificates,
                        authentication_certificates,
                    ),
                    trusted_root_certificates: sub_resources(
                        gateway,
                        SubResourceKind::TrustedRootCertificates,
                        settings.trusted_root_certificate_names.strings(),
                    ),
                    connection_draining: settings.connection_draining.as_ref_option().map(
                        |draining| ConnectionDraining {
                            enabled: draining.enabled.unwrap_or_default(),
                            drain_timeout_in_sec: draining.drain_timeout_sec.unwrap_or_default(),
                        },
                    ),
                },
            ))
        })
        .collect()
}

fn expand_http_listeners(
    gateway: &ApplicationGatewayId,
    state: &ApplicationGatewayState,
) -> Children<HttpListenerProperties> {
    state
        .http_listener
        .known_items()
        .map(|(i, listener)| {
            if conflict(&listener.host_name, &listener.host_names) {
                return Err(Error::validation(
                    "`host_name` and `host_names` cannot be specified together",
                    path("http_listener", i),
                ));
            }

            Ok(Named::new(
                listener.name.as_str(),
                HttpListenerProperties {
                    frontend_ip_configuration: sub_resource(
                        gateway,
                        SubResourceKind::FrontendIpConfigurations,
                        &listener.frontend_ip_configuration_name,
                    ),
                    frontend_port: sub_resource(
                        gateway,
                        SubResourceKind::FrontendPorts,
                        &listener.frontend_port_name,
                    ),
                    protocol: non_empty(&listener.protocol),
                    host_name: non_empty(&listener.host_name),
                    host_names: listener.host_names.strings(),
                    require_server_name_indication: known_bool(&listener.require_sni),
                    ssl_certificate: sub_resource(
                        gateway,
                        SubResourceKind::SslCertificates,
                        &listener.ssl_certificate_name,
                    ),
                    firewall_policy: SubResource::optional(listener.firewall_policy_id.as_str()),
                },
            ))
        })
        .collect()
}

fn expand_request_routing_rules(
    gateway: &ApplicationGatewayId,
    state: &ApplicationGatewayState,
) -> Children<RequestRoutingRuleProperties> {
    let rules = state
        .request_routing_rule
        .known_items()
        .map(|(i, rule)| {
            if conflict(&rule.backend_address_pool_name, &rule.redirect_configuration_name) {
                return Err(Error::validation(
                    "Conflict between `backend_address_pool_name` and `redirect_configuration_name` (back-end pool not applicable when redirection specified)",
                    path("request_routing_rule", i),
                ));
            }
            if conflict(&rule.backend_http_settings_name, &rule.redirect_configuration_name) {
                return Err(Error::validation(
                    "Conflict between `backend_http_settings_name` and `redirect_configuration_name` (back-end settings not applicable when redirection specified)",
                    path("request_routing_rule", i),
                ));
            }

            Ok(Named::new(
                rule.name.as_str(),
                RequestRoutingRuleProperties {
                    rule_type: non_empty(&rule.rule_type),
                    priority: positive(&rule.priority),
                    http_listener: sub_resource(
                        gateway,
                        SubResourceKind::HttpListeners,
                        &rule.http_listener_name,
                    ),
                    backend_address_pool: sub_resource(
                        gateway,
                        SubResourceKind::BackendAddressPools,
                        &rule.backend_address_pool_name,
                    ),
                    backend_http_settings: sub_resource(
                        gateway,
                        SubResourceKind::BackendHttpSettingsCollection,
                        &rule.backend_http_settings_name,
                    ),
                    redirect_configuration: sub_resource(
                        gateway,
                        SubResourceKind::RedirectConfigurations,
                        &rule.redirect_configuration_name,
                    ),
                    url_path_map: sub_resource(
                        gateway,
                        SubResourceKind::UrlPathMaps,
                        &rule.url_path_map_name,
                    ),
                },
            ))
        })
        .collect::<Children<_>>()?;

    validate_priorities(state)?;
    Ok(rules)
}

/// Priorities are set either on every routing rule or on none
///
/// Zero means unset. A priority still unknown is assumed to be set.
pub(super) fn validate_priorities(state: &ApplicationGatewayState) -> Result<(), Error> {
    let priorities = || {
        state
            .request_routing_rule
            .known_items()
            .map(|(_, rule)| &rule.priority)
    };
    let any_set = priorities().any(|priority| priority.is_set());
    let any_unset = priorities().any(|priority| !priority.may_be_set());
    if any_set && any_unset {
        return Err(Error::validation(
            "If you wish to use rule priority, you will have to specify rule-priority field values for all the existing request routing rules.",
            AttributePath::new("request_routing_rule"),
        ));
    }
    Ok(())
}

fn expand_probes(state: &ApplicationGatewayState) -> Children<ProbeProperties> {
    state
        .probe
        .known_items()
        .map(|(i, probe)| {
            let pick = &probe.pick_host_name_from_backend_http_settings;
            if none_of(&probe.host, pick) {
                return Err(Error::validation(
                    "One of `host` or `pick_host_name_from_backend_http_settings` must be set",
                    path("probe", i),
                ));
            }
            if conflict(&probe.host, pick) {
                return Err(Error::validation(
                    "Only one of `host` or `pick_host_name_from_backend_http_settings` can be set",
                    path("probe", i),
                ));
            }

            Ok(Named::new(
                probe.name.as_str(),
                ProbeProperties {
                    protocol: non_empty(&probe.protocol),
                    host: non_empty(&probe.host),
                    path: non_empty(&probe.path),
                    interval: probe.interval.as_option(),
                    timeout: probe.timeout.as_option(),
                    unhealthy_threshold: probe.unhealthy_threshold.as_option(),
                    pick_host_name_from_backend_http_settings: known_bool(pick),
                    min_servers: positive(&probe.minimum_servers),
                    port: positive(&probe.port),
                    match_: probe.match_.as_ref_option().map(|matching| ProbeMatch {
                        body: non_empty(&matching.body),
                        status_codes: matching.status_code.strings(),
                    }),
                },
            ))
        })
        .collect()
}

fn expand_redirect_configurations(
    gateway: &ApplicationGatewayId,
    state: &ApplicationGatewayState,
) -> Children<RedirectConfigurationProperties> {
    state
        .redirect_configuration
        .known_items()
        .map(|(i, redirect)| {
            if conflict(&redirect.target_listener_name, &redirect.target_url) {
                return Err(Error::validation(
                    "Conflict between `target_listener_name` and `target_url` (redirection is either to URL or target listener)",
                    path("redirect_configuration", i),
                ));
            }
            if none_of(&redirect.target_listener_name, &redirect.target_url) {
                return Err(Error::validation(
                    "Set either `target_listener_name` or `target_url`",
                    path("redirect_configuration", i),
                ));
            }

            Ok(Named::new(
                redirect.name.as_str(),
                RedirectConfigurationProperties {
                    redirect_type: non_empty(&redirect.redirect_type),
                    target_listener: sub_resource(
                        gateway,
                        SubResourceKind::HttpListeners,
                        &redirect.target_listener_name,
                    ),
                    target_url: non_empty(&redirect.target_url),
                    include_path: known_bool(&redirect.include_path),
                    include_query_string: known_bool(&redirect.include_query_string),
                },
            ))
        })
        .collect()
}

fn expand_url_path_maps(
    gateway: &ApplicationGatewayId,
    state: &ApplicationGatewayState,
) -> Children<UrlPathMapProperties> {
    state
        .url_path_map
        .known_items()
        .map(|(i, map)| {
            let pool = &map.default_backend_address_pool_name;
            let settings = &map.default_backend_http_settings_name;
            let redirect = &map.default_redirect_configuration_name;
            if conflict(pool, redirect) {
                return Err(Error::validation(
                    "Conflict between `default_backend_address_pool_name` and `default_redirect_configuration_name` (back-end pool not applicable when redirection specified)",
                    path("url_path_map", i),
                ));
            }
            if conflict(settings, redirect) {
                return Err(Error::validation(
                    "Conflict between `default_backend_http_settings_name` and `default_redirect_configuration_name` (back-end settings not applicable when redirection specified)",
                    path("url_path_map", i),
                ));
            }
            let backend = pool.may_be_set() && settings.may_be_set();
            if !backend && !redirect.may_be_set() {
                return Err(Error::validation(
                    "both the `default_backend_address_pool_name` and `default_backend_http_settings_name` or `default_redirect_configuration_name` must be specified",
                    path("url_path_map", i),
                ));
            }

            let path_rules = map
                .path_rule
                .known_items()
                .map(|(j, rule)| {
                    expand_path_rule(gateway, rule)
                        .map_err(|message| {
                            Error::validation(
                                message,
                                path("url_path_map", i).attribute("path_rule").index(j as i64),
                            )
                        })
                })
                .collect::<Children<_>>()?;

            Ok(Named::new(
                map.name.as_str(),
                UrlPathMapProperties {
                    default_backend_address_pool: sub_resource(
                        gateway,
                        SubResourceKind::BackendAddressPools,
                        pool,
                    ),
                    default_backend_http_settings: sub_resource(
                        gateway,
                        SubResourceKind::BackendHttpSettingsCollection,
                        settings,
                    ),
                    default_redirect_configuration: sub_resource(
                        gateway,
                        SubResourceKind::RedirectConfigurations,
                        redirect,
                    ),
                    path_rules,
                },
            ))
        })
        .collect()
}

fn expand_path_rule(
    gateway: &ApplicationGatewayId,
    rule: &PathRuleState,
) -> Result<Named<PathRuleProperties>, &'static str> {
    if conflict(&rule.backend_address_pool_name, &rule.redirect_configuration_name) {
        return Err("Conflict between `backend_address_pool_name` and `redirect_configuration_name` (back-end pool not applicable when redirection specified)");
    }
    if conflict(&rule.backend_http_settings_name, &rule.redirect_configuration_name) {
        return Err("Conflict between `backend_http_settings_name` and `redirect_configuration_name` (back-end settings not applicable when redirection specified)");
    }

    Ok(Named::new(
        rule.name.as_str(),
        PathRuleProperties {
            paths: rule.paths.strings(),
            backend_address_pool: sub_resource(
                gateway,
                SubResourceKind::BackendAddressPools,
                &rule.backend_address_pool_name,
            ),
            backend_http_settings: sub_resource(
                gateway,
                SubResourceKind::BackendHttpSettingsCollection,
                &rule.backend_http_settings_name,
            ),
            redirect_configuration: sub_resource(
                gateway,
                SubResourceKind::RedirectConfigurations,
                &rule.redirect_configuration_name,
            ),
        },
    ))
}

fn expand_authentication_certificates(
    state: &ApplicationGatewayState,
) -> Vec<Named<AuthenticationCertificateProperties>> {
    state
        .authentication_certificate
        .known_items()
        .map(|(_, cert)| {
            Named::new(
                cert.name.as_str(),
                AuthenticationCertificateProperties {
                    data: cert.data.non_empty().map(base64_encode_if_not),
                },
            )
        })
        .collect()
}

fn expand_trusted_root_certificates(
    state: &ApplicationGatewayState,
) -> Children<TrustedRootCertificateProperties> {
    state
        .trusted_root_certificate
        .known_items()
        .map(|(i, cert)| {
            let name = cert.name.as_str();
            if conflict(&cert.data, &cert.key_vault_secret_id) {
                return Err(Error::validation(
                    format!("only one of `key_vault_secret_id` or `data` must be specified for the `trusted_root_certificate` block {name:?}"),
                    path("trusted_root_certificate", i),
                ));
            }
            if none_of(&cert.data, &cert.key_vault_secret_id) {
                return Err(Error::validation(
                    format!("either `key_vault_secret_id` or `data` must be specified for the `trusted_root_certificate` block {name:?}"),
                    path("trusted_root_certificate", i),
                ));
            }

            Ok(Named::new(
                name,
                TrustedRootCertificateProperties {
                    data: cert.data.non_empty().map(base64_encode_if_not),
                    key_vault_secret_id: non_empty(&cert.key_vault_secret_id),
                },
            ))
        })
        .collect()
}

fn expand_ssl_certificates(state: &ApplicationGatewayState) -> Children<SslCertificateProperties> {
    state
        .ssl_certificate
        .known_items()
        .map(|(i, cert)| {
            let name = cert.name.as_str();
            if conflict(&cert.data, &cert.key_vault_secret_id) {
                return Err(Error::validation(
                    format!("only one of `key_vault_secret_id` or `data` must be specified for the `ssl_certificate` block {name:?}"),
                    path("ssl_certificate", i),
                ));
            }
            if conflict(&cert.password, &cert.key_vault_secret_id) {
                return Err(Error::validation(
                    format!("only one of `key_vault_secret_id` or `password` must be specified for the `ssl_certificate` block {name:?}"),
                    path("ssl_certificate", i),
                ));
            }
            if none_of(&cert.data, &cert.key_vault_secret_id) {
                return Err(Error::validation(
                    format!("either `key_vault_secret_id` or `data` must be specified for the `ssl_certificate` block {name:?}"),
                    path("ssl_certificate", i),
                ));
            }

            Ok(Named::new(
                name,
                SslCertificateProperties {
                    data: cert.data.non_empty().map(base64_encode_if_not),
                    password: non_empty(&cert.password),
                    key_vault_secret_id: non_empty(&cert.key_vault_secret_id),
                    public_cert_data: None,
                },
            ))
        })
        .collect()
}

fn validate_waf(state: &ApplicationGatewayState) -> Result<(), Error> {
    let (Value::Value(sku), Value::Value(waf)) = (&state.sku, &state.waf_configuration) else {
        return Ok(());
    };
    let limit = waf.file_upload_limit_mb.unwrap_or_default();
    if limit > MAX_UPLOAD_LIMIT_MB && sku.tier.non_empty().is_some_and(|tier| tier != "WAF_v2") {
        return Err(Error::validation(
            "Only SKU `WAF_v2` allows `file_upload_limit_mb` to exceed 500MB",
            AttributePath::new("waf_configuration")
                .index(0)
                .attribute("file_upload_limit_mb"),
        ));
    }
    Ok(())
}

fn expand_waf_configuration(
    state: &ApplicationGatewayState,
) -> Option<WebApplicationFirewallConfiguration> {
    state
        .waf_configuration
        .as_ref_option()
        .map(|waf| WebApplicationFirewallConfiguration {
            enabled: waf.enabled.unwrap_or_default(),
            firewall_mode: waf.firewall_mode.as_str().to_owned(),
            rule_set_type: waf
                .rule_set_type
                .non_empty()
                .unwrap_or(DEFAULT_RULE_SET_TYPE)
                .to_owned(),
            rule_set_version: waf.rule_set_version.as_str().to_owned(),
            file_upload_limit_in_mb: positive(&waf.file_upload_limit_mb),
            request_body_check: known_bool(&waf.request_body_check),
            max_request_body_size_in_kb: positive(&waf.max_request_body_size_kb),
        })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::services::network::application_gateway::state::{
        GatewayIpConfigurationState, RequestRoutingRuleState,
    };

    fn with_priorities(priorities: &[Value<i64>]) -> ApplicationGatewayState {
        let rules = priorities
            .iter()
            .enumerate()
            .map(|(i, priority)| {
                Value::Value(RequestRoutingRuleState {
                    name: format!("rule-{i}").into(),
                    rule_type: "Basic".into(),
                    priority: *priority,
                    ..Default::default()
                })
            })
            .collect();
        ApplicationGatewayState {
            request_routing_rule: Value::Value(rules),
            ..Default::default()
        }
    }

    fn with_subnets(subnets: &[&str]) -> ApplicationGatewayState {
        let configs = subnets
            .iter()
            .enumerate()
            .map(|(i, subnet)| {
                Value::Value(GatewayIpConfigurationState {
                    name: format!("gw-ip-{i}").into(),
                    subnet_id: (*subnet).into(),
                    ..Default::default()
                })
            })
            .collect();
        ApplicationGatewayState {
            gateway_ip_configuration: Value::Value(configs),
            ..Default::default()
        }
    }

    fn priority() -> impl Strategy<Value = Value<i64>> {
        prop_oneof![
            Just(Value::Null),
            Just(Value::Value(0)),
            Just(Value::Unknown),
            (1i64..20000).prop_map(Value::Value),
        ]
    }

    proptest! {
        #[test]
        fn priorities_all_or_nothing(priorities in prop::collection::vec(priority(), 0..6)) {
            let state = with_priorities(&priorities);
            let set = priorities.iter().filter(|p| matches!(p, Value::Value(n) if *n > 0)).count();
            let unset = priorities
                .iter()
                .filter(|p| matches!(p, Value::Null | Value::Value(0)))
                .count();
            let result = validate_priorities(&state);
            prop_assert_eq!(result.is_err(), set > 0 && unset > 0);
        }
    }

    #[test]
    fn priority_error_message() {
        let err = validate_priorities(&with_priorities(&[Value::Value(10), Value::Null]))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(err
            .to_string()
            .starts_with("If you wish to use rule priority"));
    }

    #[test]
    fn restart_on_subnet_change_only() {
        let a = "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/vnet/subnets/a";
        let b = "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/vnet/subnets/b";
        assert!(!gateway_ip_configurations_moved(&with_subnets(&[]), &with_subnets(&[a])));
        assert!(!gateway_ip_configurations_moved(&with_subnets(&[a]), &with_subnets(&[a])));
        assert!(gateway_ip_configurations_moved(&with_subnets(&[a]), &with_subnets(&[b])));
        assert!(gateway_ip_configurations_moved(&with_subnets(&[a]), &with_subnets(&[a, b])));
        assert!(gateway_ip_configurations_moved(&with_subnets(&[a, b]), &with_subnets(&[a])));
    }
}
