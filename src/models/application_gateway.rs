use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Named, SubResource};

/// `Microsoft.Network/applicationGateways` document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationGateway {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    #[serde(default)]
    pub zones: Vec<String>,
    #[serde(default)]
    pub properties: ApplicationGatewayProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationGatewayProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<ApplicationGatewaySku>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoscale_configuration: Option<AutoscaleConfiguration>,
    #[serde(rename = "gatewayIPConfigurations")]
    pub gateway_ip_configurations: Vec<Named<GatewayIpConfigurationProperties>>,
    pub frontend_ports: Vec<Named<FrontendPortProperties>>,
    #[serde(rename = "frontendIPConfigurations")]
    pub frontend_ip_configurations: Vec<Named<FrontendIpConfigurationProperties>>,
    pub backend_address_pools: Vec<Named<BackendAddressPoolProperties>>,
    pub backend_http_settings_collection: Vec<Named<BackendHttpSettingsProperties>>,
    pub http_listeners: Vec<Named<HttpListenerProperties>>,
    pub request_routing_rules: Vec<Named<RequestRoutingRuleProperties>>,
    pub probes: Vec<Named<ProbeProperties>>,
    pub redirect_configurations: Vec<Named<RedirectConfigurationProperties>>,
    pub url_path_maps: Vec<Named<UrlPathMapProperties>>,
    pub authentication_certificates: Vec<Named<AuthenticationCertificateProperties>>,
    pub trusted_root_certificates: Vec<Named<TrustedRootCertificateProperties>>,
    pub ssl_certificates: Vec<Named<SslCertificateProperties>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_application_firewall_configuration: Option<WebApplicationFirewallConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_http2: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_policy: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operational_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationGatewaySku {
    pub name: String,
    pub tier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoscaleConfiguration {
    pub min_capacity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GatewayIpConfigurationProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet: Option<SubResource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrontendPortProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrontendIpConfigurationProperties {
    #[serde(rename = "privateIPAddress", skip_serializing_if = "Option::is_none")]
    pub private_ip_address: Option<String>,
    #[serde(rename = "privateIPAllocationMethod", skip_serializing_if = "Option::is_none")]
    pub private_ip_allocation_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet: Option<SubResource>,
    #[serde(rename = "publicIPAddress", skip_serializing_if = "Option::is_none")]
    pub public_ip_address: Option<SubResource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackendAddressPoolProperties {
    pub backend_addresses: Vec<BackendAddress>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackendAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fqdn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackendHttpSettingsProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie_based_affinity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affinity_cookie_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pick_host_name_from_backend_address: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe: Option<SubResource>,
    pub authentication_certificates: Vec<SubResource>,
    pub trusted_root_certificates: Vec<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_draining: Option<ConnectionDraining>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionDraining {
    pub enabled: bool,
    pub drain_timeout_in_sec: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpListenerProperties {
    #[serde(rename = "frontendIPConfiguration", skip_serializing_if = "Option::is_none")]
    pub frontend_ip_configuration: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontend_port: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    pub host_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_server_name_indication: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_certificate: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_policy: Option<SubResource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestRoutingRuleProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_listener: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_address_pool: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_http_settings: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_configuration: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_path_map: Option<SubResource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProbeProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unhealthy_threshold: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pick_host_name_from_backend_http_settings: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_servers: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_: Option<ProbeMatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProbeMatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub status_codes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RedirectConfigurationProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_listener: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_path: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_query_string: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UrlPathMapProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_backend_address_pool: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_backend_http_settings: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_redirect_configuration: Option<SubResource>,
    pub path_rules: Vec<Named<PathRuleProperties>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PathRuleProperties {
    pub paths: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_address_pool: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_http_settings: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_configuration: Option<SubResource>,
}

/// `data` is write-only: the service never returns it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthenticationCertificateProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrustedRootCertificateProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_vault_secret_id: Option<String>,
}

/// `data` and `password` are write-only: the service never returns them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SslCertificateProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_vault_secret_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_cert_data: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebApplicationFirewallConfiguration {
    pub enabled: bool,
    pub firewall_mode: String,
    pub rule_set_type: String,
    pub rule_set_version: String,
    #[serde(rename = "fileUploadLimitInMb", skip_serializing_if = "Option::is_none")]
    pub file_upload_limit_in_mb: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body_check: Option<bool>,
    #[serde(rename = "maxRequestBodySizeInKb", skip_serializing_if = "Option::is_none")]
    pub max_request_body_size_in_kb: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arm_property_names() {
        let gateway: ApplicationGateway = serde_json::from_value(serde_json::json!({
            "name": "gw",
            "location": "westeurope",
            "properties": {
                "sku": {"name": "Standard_v2", "tier": "Standard_v2", "capacity": 2},
                "gatewayIPConfigurations": [
                    {"name": "gw-ip", "properties": {"subnet": {"id": "/subnets/a"}}}
                ],
                "frontendIPConfigurations": [
                    {"name": "fe", "properties": {"privateIPAddress": "10.0.0.4"}}
                ],
                "webApplicationFirewallConfiguration": {
                    "enabled": true,
                    "firewallMode": "Prevention",
                    "ruleSetType": "OWASP",
                    "ruleSetVersion": "3.2",
                    "fileUploadLimitInMb": 100
                }
            }
        }))
        .unwrap();

        let properties = &gateway.properties;
        assert_eq!(properties.gateway_ip_configurations[0].name, "gw-ip");
        assert_eq!(
            properties.frontend_ip_configurations[0]
                .properties
                .private_ip_address
                .as_deref(),
            Some("10.0.0.4")
        );
        assert!(properties.http_listeners.is_empty());
        assert_eq!(
            properties
                .web_application_firewall_configuration
                .as_ref()
                .and_then(|waf| waf.file_upload_limit_in_mb),
            Some(100)
        );

        let json = serde_json::to_value(&gateway).unwrap();
        assert!(json["properties"]["gatewayIPConfigurations"].is_array());
        assert!(json["properties"].get("enableHttp2").is_none());
    }
}
