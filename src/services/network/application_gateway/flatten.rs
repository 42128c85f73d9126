use crate::{
    error::Error,
    ids::{ApplicationGatewayId, PathRuleId, ResourceId, SubResourceId, SubResourceKind},
    models::{
        ApplicationGateway, BackendHttpSettingsProperties, Named, SubResource,
        UrlPathMapProperties,
    },
    services::network::common::{
        find_previous, location, optional, optional_id, reference, string_list, NamedBlock,
    },
    value::{Value, ValueList, ValueString},
};

use super::{
    expand::DEFAULT_RULE_SET_TYPE,
    state::{
        ApplicationGatewayState, AuthenticationCertificateState, AutoscaleState,
        BackendAddressPoolState, BackendHttpSettingsState, CertificateReferenceState,
        ConnectionDrainingState, FrontendIpConfigurationState, FrontendPortState,
        GatewayIpConfigurationState, HttpListenerState, PathRuleState, ProbeMatchState, ProbeState,
        RedirectConfigurationState, RequestRoutingRuleState, SkuState, SslCertificateState,
        TrustedRootCertificateState, UrlPathMapState, WafConfigurationState,
    },
};

/// Build the gateway state from the remote document
///
/// Write-only certificate data and passwords are taken from the block with the same name
/// in `previous`, and left null when there is none.
pub(super) fn flatten_gateway(
    id: &ApplicationGatewayId,
    model: ApplicationGateway,
    previous: &ApplicationGatewayState,
) -> Result<ApplicationGatewayState, Error> {
    let properties = model.properties;
    let previous_sku = previous.sku.as_ref_option().cloned().unwrap_or_default();
    let previous_waf = previous
        .waf_configuration
        .as_ref_option()
        .cloned()
        .unwrap_or_default();

    let tags = if model.tags.is_empty() && !previous.tags.is_value() {
        Value::Null
    } else {
        Value::Value(
            model
                .tags
                .into_iter()
                .map(|(key, value)| (key, Value::Value(value)))
                .collect(),
        )
    };

    Ok(ApplicationGatewayState {
        id: id.id().into(),
        name: id.name.clone().into(),
        resource_group_name: id.resource_group.clone().into(),
        location: location(model.location, &previous.location),
        zones: string_list(model.zones, &previous.zones),
        tags,
        enable_http2: optional(properties.enable_http2, &previous.enable_http2),
        firewall_policy_id: optional_id(properties.firewall_policy.as_ref()),
        sku: properties
            .sku
            .map(|sku| SkuState {
                name: sku.name.into(),
                tier: sku.tier.into(),
                capacity: optional(sku.capacity, &previous_sku.capacity),
            })
            .into(),
        autoscale_configuration: properties
            .autoscale_configuration
            .map(|autoscale| {
                let previous = previous
                    .autoscale_configuration
                    .as_ref_option()
                    .cloned()
                    .unwrap_or_default();
                AutoscaleState {
                    min_capacity: autoscale.min_capacity.into(),
                    max_capacity: optional(autoscale.max_capacity, &previous.max_capacity),
                }
            })
            .into(),
        gateway_ip_configuration: children(
            properties.gateway_ip_configurations,
            &previous.gateway_ip_configuration,
            |config, _| {
                Ok(GatewayIpConfigurationState {
                    id: child_id(id, SubResourceKind::GatewayIpConfigurations, &config.name),
                    name: config.name.into(),
                    subnet_id: optional_id(config.properties.subnet.as_ref()),
                })
            },
        )?,
        frontend_port: children(properties.frontend_ports, &previous.frontend_port, |port, _| {
            Ok(FrontendPortState {
                id: child_id(id, SubResourceKind::FrontendPorts, &port.name),
                name: port.name.into(),
                port: port.properties.port.into(),
            })
        })?,
        frontend_ip_configuration: children(
            properties.frontend_ip_configurations,
            &previous.frontend_ip_configuration,
            |config, previous| {
                let properties = config.properties;
                Ok(FrontendIpConfigurationState {
                    id: child_id(id, SubResourceKind::FrontendIpConfigurations, &config.name),
                    name: config.name.into(),
                    subnet_id: optional_id(properties.subnet.as_ref()),
                    private_ip_address: properties.private_ip_address.into(),
                    public_ip_address_id: optional_id(properties.public_ip_address.as_ref()),
                    private_ip_address_allocation: optional(
                        properties.private_ip_allocation_method,
                        &previous.private_ip_address_allocation,
                    ),
                })
            },
        )?,
        backend_address_pool: children(
            properties.backend_address_pools,
            &previous.backend_address_pool,
            |pool, previous| {
                let (fqdns, ip_addresses): (Vec<_>, Vec<_>) = pool
                    .properties
                    .backend_addresses
                    .into_iter()
                    .partition(|address| address.fqdn.as_deref().is_some_and(|f| !f.is_empty()));
                Ok(BackendAddressPoolState {
                    id: child_id(id, SubResourceKind::BackendAddressPools, &pool.name),
                    name: pool.name.into(),
                    fqdns: string_list(
                        fqdns.into_iter().filter_map(|address| address.fqdn).collect(),
                        &previous.fqdns,
                    ),
                    ip_addresses: string_list(
                        ip_addresses
                            .into_iter()
                            .filter_map(|address| address.ip_address)
                            .collect(),
                        &previous.ip_addresses,
                    ),
                })
            },
        )?,
        backend_http_settings: children(
            properties.backend_http_settings_collection,
            &previous.backend_http_settings,
            |settings, previous| flatten_backend_http_settings(id, settings, previous),
        )?,
        http_listener: children(
            properties.http_listeners,
            &previous.http_listener,
            |listener, previous| {
                let properties = listener.properties;
                let (frontend_ip_configuration_name, frontend_ip_configuration_id) = reference(
                    properties.frontend_ip_configuration.as_ref(),
                    SubResourceKind::FrontendIpConfigurations,
                )?;
                let (frontend_port_name, frontend_port_id) = reference(
                    properties.frontend_port.as_ref(),
                    SubResourceKind::FrontendPorts,
                )?;
                let (ssl_certificate_name, ssl_certificate_id) = reference(
                    properties.ssl_certificate.as_ref(),
                    SubResourceKind::SslCertificates,
                )?;
                Ok(HttpListenerState {
                    id: child_id(id, SubResourceKind::HttpListeners, &listener.name),
                    name: listener.name.into(),
                    frontend_ip_configuration_name,
                    frontend_ip_configuration_id,
                    frontend_port_name,
                    frontend_port_id,
                    protocol: properties.protocol.into(),
                    host_name: optional(properties.host_name, &previous.host_name),
                    host_names: string_list(properties.host_names, &previous.host_names),
                    require_sni: optional(
                        properties.require_server_name_indication,
                        &previous.require_sni,
                    ),
                    ssl_certificate_name,
                    ssl_certificate_id,
                    firewall_policy_id: optional_id(properties.firewall_policy.as_ref()),
                })
            },
        )?,
        request_routing_rule: children(
            properties.request_routing_rules,
            &previous.request_routing_rule,
            |rule, previous| {
                let properties = rule.properties;
                let (http_listener_name, http_listener_id) = reference(
                    properties.http_listener.as_ref(),
                    SubResourceKind::HttpListeners,
                )?;
                let (backend_address_pool_name, backend_address_pool_id) = reference(
                    properties.backend_address_pool.as_ref(),
                    SubResourceKind::BackendAddressPools,
                )?;
                let (backend_http_settings_name, backend_http_settings_id) = reference(
                    properties.backend_http_settings.as_ref(),
                    SubResourceKind::BackendHttpSettingsCollection,
                )?;
                let (redirect_configuration_name, redirect_configuration_id) = reference(
                    properties.redirect_configuration.as_ref(),
                    SubResourceKind::RedirectConfigurations,
                )?;
                let (url_path_map_name, url_path_map_id) = reference(
                    properties.url_path_map.as_ref(),
                    SubResourceKind::UrlPathMaps,
                )?;
                Ok(RequestRoutingRuleState {
                    id: child_id(id, SubResourceKind::RequestRoutingRules, &rule.name),
                    name: rule.name.into(),
                    rule_type: properties.rule_type.into(),
                    priority: optional(properties.priority, &previous.priority),
                    http_listener_name,
                    http_listener_id,
                    backend_address_pool_name,
                    backend_address_pool_id,
                    backend_http_settings_name,
                    backend_http_settings_id,
                    redirect_configuration_name,
                    redirect_configuration_id,
                    url_path_map_name,
                    url_path_map_id,
                })
            },
        )?,
        probe: children(properties.probes, &previous.probe, |probe, previous| {
            let properties = probe.properties;
            let previous_match = previous.match_.as_ref_option().cloned().unwrap_or_default();
            Ok(ProbeState {
                id: child_id(id, SubResourceKind::Probes, &probe.name),
                name: probe.name.into(),
                protocol: properties.protocol.into(),
                path: properties.path.into(),
                host: optional(properties.host, &previous.host),
                pick_host_name_from_backend_http_settings: optional(
                    properties.pick_host_name_from_backend_http_settings,
                    &previous.pick_host_name_from_backend_http_settings,
                ),
                interval: properties.interval.into(),
                timeout: properties.timeout.into(),
                unhealthy_threshold: properties.unhealthy_threshold.into(),
                port: optional(properties.port, &previous.port),
                minimum_servers: optional(properties.min_servers, &previous.minimum_servers),
                match_: properties
                    .match_
                    .map(|matching| ProbeMatchState {
                        body: optional(matching.body, &previous_match.body),
                        status_code: Value::Value(
                            matching.status_codes.into_iter().map(Value::Value).collect(),
                        ),
                    })
                    .into(),
            })
        })?,
        redirect_configuration: children(
            properties.redirect_configurations,
            &previous.redirect_configuration,
            |redirect, previous| {
                let properties = redirect.properties;
                let (target_listener_name, target_listener_id) = reference(
                    properties.target_listener.as_ref(),
                    SubResourceKind::HttpListeners,
                )?;
                Ok(RedirectConfigurationState {
                    id: child_id(id, SubResourceKind::RedirectConfigurations, &redirect.name),
                    name: redirect.name.into(),
                    redirect_type: properties.redirect_type.into(),
                    target_listener_name,
                    target_listener_id,
                    target_url: optional(properties.target_url, &previous.target_url),
                    include_path: optional(properties.include_path, &previous.include_path),
                    include_query_string: optional(
                        properties.include_query_string,
                        &previous.include_query_string,
                    ),
                })
            },
        )?,
        url_path_map: children(
            properties.url_path_maps,
            &previous.url_path_map,
            |map, previous| flatten_url_path_map(id, map, previous),
        )?,
        authentication_certificate: children(
            properties.authentication_certificates,
            &previous.authentication_certificate,
            |cert, previous| {
                Ok(AuthenticationCertificateState {
                    id: child_id(id, SubResourceKind::AuthenticationCertificates, &cert.name),
                    name: cert.name.into(),
                    data: previous.data.clone(),
                })
            },
        )?,
        trusted_root_certificate: children(
            properties.trusted_root_certificates,
            &previous.trusted_root_certificate,
            |cert, previous| {
                let key_vault_secret_id =
                    optional(cert.properties.key_vault_secret_id, &previous.key_vault_secret_id);
                // The service returns the encoded form, keep the configured one
                let data = if key_vault_secret_id.is_value() {
                    Value::Null
                } else {
                    previous.data.clone()
                };
                Ok(TrustedRootCertificateState {
                    id: child_id(id, SubResourceKind::TrustedRootCertificates, &cert.name),
                    name: cert.name.into(),
                    data,
                    key_vault_secret_id,
                })
            },
        )?,
        ssl_certificate: children(
            properties.ssl_certificates,
            &previous.ssl_certificate,
            |cert, previous| {
                Ok(SslCertificateState {
                    id: child_id(id, SubResourceKind::SslCertificates, &cert.name),
                    name: cert.name.into(),
                    data: previous.data.clone(),
                    password: previous.password.clone(),
                    key_vault_secret_id: optional(
                        cert.properties.key_vault_secret_id,
                        &previous.key_vault_secret_id,
                    ),
                    public_cert_data: cert.properties.public_cert_data.into(),
                })
            },
        )?,
        waf_configuration: properties
            .web_application_firewall_configuration
            .map(|waf| WafConfigurationState {
                enabled: waf.enabled.into(),
                firewall_mode: waf.firewall_mode.into(),
                rule_set_type: if waf.rule_set_type == DEFAULT_RULE_SET_TYPE
                    && previous_waf.rule_set_type.is_null()
                {
                    Value::Null
                } else {
                    waf.rule_set_type.into()
                },
                rule_set_version: waf.rule_set_version.into(),
                file_upload_limit_mb: optional(
                    waf.file_upload_limit_in_mb,
                    &previous_waf.file_upload_limit_mb,
                ),
                request_body_check: optional(
                    waf.request_body_check,
                    &previous_waf.request_body_check,
                ),
                max_request_body_size_kb: optional(
                    waf.max_request_body_size_in_kb,
                    &previous_waf.max_request_body_size_kb,
                ),
            })
            .into(),
        timeouts: previous.timeouts.clone(),
    })
}

/// Canonical ID of the child `name` of `gateway`
pub(super) fn child_id(
    gateway: &ApplicationGatewayId,
    kind: SubResourceKind,
    name: &str,
) -> ValueString {
    kind.format(gateway, name).into()
}

/// Flatten every child, along with the block of `previous` with the same name
///
/// Blocks without counterpart in `previous` are flattened against an empty block.
fn children<P, S, F>(
    items: Vec<Named<P>>,
    previous: &ValueList<Value<S>>,
    mut flatten: F,
) -> Result<ValueList<Value<S>>, Error>
where
    S: NamedBlock + Default,
    F: FnMut(Named<P>, &S) -> Result<S, Error>,
{
    let empty = S::default();
    items
        .into_iter()
        .map(|item| {
            let previous = find_previous(previous, &item.name).unwrap_or(&empty);
            flatten(item, previous).map(Value::Value)
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Value)
}

fn flatten_backend_http_settings(
    gateway: &ApplicationGatewayId,
    settings: Named<BackendHttpSettingsProperties>,
    previous: &BackendHttpSettingsState,
) -> Result<BackendHttpSettingsState, Error> {
    let properties = settings.properties;
    let (probe_name, probe_id) = reference(properties.probe.as_ref(), SubResourceKind::Probes)?;

    let authentication_certificate = properties
        .authentication_certificates
        .iter()
        .map(|cert| {
            let (name, id) = reference(Some(cert), SubResourceKind::AuthenticationCertificates)?;
            Ok(Value::Value(CertificateReferenceState { id, name }))
        })
        .collect::<Result<Vec<_>, Error>>()?;
    let trusted_root_certificate_names = names(
        &properties.trusted_root_certificates,
        SubResourceKind::TrustedRootCertificates,
    )?;
    Ok(BackendHttpSettingsState {
        id: child_id(gateway, SubResourceKind::BackendHttpSettingsCollection, &settings.name),
        name: settings.name.into(),
        port: properties.port.into(),
        protocol: properties.protocol.into(),
        cookie_based_affinity: properties.cookie_based_affinity.into(),
        affinity_cookie_name: optional(
            properties.affinity_cookie_name,
            &previous.affinity_cookie_name,
        ),
        path: optional(properties.path, &previous.path),
        request_timeout: optional(properties.request_timeout, &previous.request_timeout),
        host_name: optional(properties.host_name, &previous.host_name),
        pick_host_name_from_backend_address: optional(
            properties.pick_host_name_from_backend_address,
            &previous.pick_host_name_from_backend_address,
        ),
        probe_name,
        probe_id,
        trusted_root_certificate_names: string_list(
            trusted_root_certificate_names,
            &previous.trusted_root_certificate_names,
        ),
        authentication_certificate: Value::Value(authentication_certificate),
        connection_draining: properties
            .connection_draining
            .map(|draining| ConnectionDrainingState {
                enabled: draining.enabled.into(),
                drain_timeout_sec: draining.drain_timeout_in_sec.into(),
            })
            .into(),
    })
}

fn flatten_url_path_map(
    gateway: &ApplicationGatewayId,
    map: Named<UrlPathMapProperties>,
    previous: &UrlPathMapState,
) -> Result<UrlPathMapState, Error> {
    let properties = map.properties;
    let (default_backend_address_pool_name, default_backend_address_pool_id) = reference(
        properties.default_backend_address_pool.as_ref(),
        SubResourceKind::BackendAddressPools,
    )?;
    let (default_backend_http_settings_name, default_backend_http_settings_id) = reference(
        properties.default_backend_http_settings.as_ref(),
        SubResourceKind::BackendHttpSettingsCollection,
    )?;
    let (default_redirect_configuration_name, default_redirect_configuration_id) = reference(
        properties.default_redirect_configuration.as_ref(),
        SubResourceKind::RedirectConfigurations,
    )?;

    let path_rule = children(properties.path_rules, &previous.path_rule, |rule, previous| {
        let properties = rule.properties;
        let (backend_address_pool_name, backend_address_pool_id) = reference(
            properties.backend_address_pool.as_ref(),
            SubResourceKind::BackendAddressPools,
        )?;
        let (backend_http_settings_name, backend_http_settings_id) = reference(
            properties.backend_http_settings.as_ref(),
            SubResourceKind::BackendHttpSettingsCollection,
        )?;
        let (redirect_configuration_name, redirect_configuration_id) = reference(
            properties.redirect_configuration.as_ref(),
            SubResourceKind::RedirectConfigurations,
        )?;
        Ok(PathRuleState {
            id: PathRuleId::new(
                &gateway.subscription_id,
                &gateway.resource_group,
                &gateway.name,
                &map.name,
                &rule.name,
            )
            .id()
            .into(),
            name: rule.name.into(),
            paths: string_list(properties.paths, &previous.paths),
            backend_address_pool_name,
            backend_address_pool_id,
            backend_http_settings_name,
            backend_http_settings_id,
            redirect_configuration_name,
            redirect_configuration_id,
        })
    })?;

    Ok(UrlPathMapState {
        id: child_id(gateway, SubResourceKind::UrlPathMaps, &map.name),
        name: map.name.into(),
        default_backend_address_pool_name,
        default_backend_address_pool_id,
        default_backend_http_settings_name,
        default_backend_http_settings_id,
        default_redirect_configuration_name,
        default_redirect_configuration_id,
        path_rule,
    })
}

/// Names of the children referenced by the service
fn names(references: &[SubResource], kind: SubResourceKind) -> Result<Vec<String>, Error> {
    references
        .iter()
        .map(|reference| {
            SubResourceId::parse_insensitively(&reference.id, kind).map(|id| id.name)
        })
        .collect()
}
