use serde::{Deserialize, Serialize};

use crate::{
    config::TimeoutsState,
    map,
    schema::{Attribute, AttributeType, Block, Description, NestedBlock, Schema},
    services::network::common::NamedBlock,
    utils::WithSchema,
    value::{self, Value, ValueBool, ValueList, ValueMap, ValueNumber, ValueString},
};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationGatewayState {
    pub id: ValueString,
    pub name: ValueString,
    pub resource_group_name: ValueString,
    pub location: ValueString,
    pub zones: ValueList<ValueString>,
    pub tags: ValueMap<ValueString>,
    pub enable_http2: ValueBool,
    pub firewall_policy_id: ValueString,
    pub sku: Value<SkuState>,
    #[serde(with = "value::serde_as_vec")]
    pub autoscale_configuration: Value<AutoscaleState>,
    pub gateway_ip_configuration: ValueList<Value<GatewayIpConfigurationState>>,
    pub frontend_port: ValueList<Value<FrontendPortState>>,
    pub frontend_ip_configuration: ValueList<Value<FrontendIpConfigurationState>>,
    pub backend_address_pool: ValueList<Value<BackendAddressPoolState>>,
    pub backend_http_settings: ValueList<Value<BackendHttpSettingsState>>,
    pub http_listener: ValueList<Value<HttpListenerState>>,
    pub request_routing_rule: ValueList<Value<RequestRoutingRuleState>>,
    pub probe: ValueList<Value<ProbeState>>,
    pub redirect_configuration: ValueList<Value<RedirectConfigurationState>>,
    pub url_path_map: ValueList<Value<UrlPathMapState>>,
    pub authentication_certificate: ValueList<Value<AuthenticationCertificateState>>,
    pub trusted_root_certificate: ValueList<Value<TrustedRootCertificateState>>,
    pub ssl_certificate: ValueList<Value<SslCertificateState>>,
    #[serde(with = "value::serde_as_vec")]
    pub waf_configuration: Value<WafConfigurationState>,
    #[serde(with = "value::serde_as_vec")]
    pub timeouts: Value<TimeoutsState>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuState {
    pub name: ValueString,
    pub tier: ValueString,
    pub capacity: ValueNumber,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoscaleState {
    pub min_capacity: ValueNumber,
    pub max_capacity: ValueNumber,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayIpConfigurationState {
    pub id: ValueString,
    pub name: ValueString,
    pub subnet_id: ValueString,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendPortState {
    pub id: ValueString,
    pub name: ValueString,
    pub port: ValueNumber,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendIpConfigurationState {
    pub id: ValueString,
    pub name: ValueString,
    pub subnet_id: ValueString,
    pub private_ip_address: ValueString,
    pub public_ip_address_id: ValueString,
    pub private_ip_address_allocation: ValueString,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendAddressPoolState {
    pub id: ValueString,
    pub name: ValueString,
    pub fqdns: ValueList<ValueString>,
    pub ip_addresses: ValueList<ValueString>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendHttpSettingsState {
    pub id: ValueString,
    pub name: ValueString,
    pub port: ValueNumber,
    pub protocol: ValueString,
    pub cookie_based_affinity: ValueString,
    pub affinity_cookie_name: ValueString,
    pub path: ValueString,
    pub request_timeout: ValueNumber,
    pub host_name: ValueString,
    pub pick_host_name_from_backend_address: ValueBool,
    pub probe_name: ValueString,
    pub probe_id: ValueString,
    pub trusted_root_certificate_names: ValueList<ValueString>,
    pub authentication_certificate: ValueList<Value<CertificateReferenceState>>,
    #[serde(with = "value::serde_as_vec")]
    pub connection_draining: Value<ConnectionDrainingState>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateReferenceState {
    pub id: ValueString,
    pub name: ValueString,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDrainingState {
    pub enabled: ValueBool,
    pub drain_timeout_sec: ValueNumber,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpListenerState {
    pub id: ValueString,
    pub name: ValueString,
    pub frontend_ip_configuration_name: ValueString,
    pub frontend_ip_configuration_id: ValueString,
    pub frontend_port_name: ValueString,
    pub frontend_port_id: ValueString,
    pub protocol: ValueString,
    pub host_name: ValueString,
    pub host_names: ValueList<ValueString>,
    pub require_sni: ValueBool,
    pub ssl_certificate_name: ValueString,
    pub ssl_certificate_id: ValueString,
    pub firewall_policy_id: ValueString,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRoutingRuleState {
    pub id: ValueString,
    pub name: ValueString,
    pub rule_type: ValueString,
    pub priority: ValueNumber,
    pub http_listener_name: ValueString,
    pub http_listener_id: ValueString,
    pub backend_address_pool_name: ValueString,
    pub backend_address_pool_id: ValueString,
    pub backend_http_settings_name: ValueString,
    pub backend_http_settings_id: ValueString,
    pub redirect_configuration_name: ValueString,
    pub redirect_configuration_id: ValueString,
    pub url_path_map_name: ValueString,
    pub url_path_map_id: ValueString,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeState {
    pub id: ValueString,
    pub name: ValueString,
    pub protocol: ValueString,
    pub path: ValueString,
    pub host: ValueString,
    pub pick_host_name_from_backend_http_settings: ValueBool,
    pub interval: ValueNumber,
    pub timeout: ValueNumber,
    pub unhealthy_threshold: ValueNumber,
    pub port: ValueNumber,
    pub minimum_servers: ValueNumber,
    #[serde(rename = "match", with = "value::serde_as_vec")]
    pub match_: Value<ProbeMatchState>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeMatchState {
    pub body: ValueString,
    pub status_code: ValueList<ValueString>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectConfigurationState {
    pub id: ValueString,
    pub name: ValueString,
    pub redirect_type: ValueString,
    pub target_listener_name: ValueString,
    pub target_listener_id: ValueString,
    pub target_url: ValueString,
    pub include_path: ValueBool,
    pub include_query_string: ValueBool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlPathMapState {
    pub id: ValueString,
    pub name: ValueString,
    pub default_backend_address_pool_name: ValueString,
    pub default_backend_address_pool_id: ValueString,
    pub default_backend_http_settings_name: ValueString,
    pub default_backend_http_settings_id: ValueString,
    pub default_redirect_configuration_name: ValueString,
    pub default_redirect_configuration_id: ValueString,
    pub path_rule: ValueList<Value<PathRuleState>>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRuleState {
    pub id: ValueString,
    pub name: ValueString,
    pub paths: ValueList<ValueString>,
    pub backend_address_pool_name: ValueString,
    pub backend_address_pool_id: ValueString,
    pub backend_http_settings_name: ValueString,
    pub backend_http_settings_id: ValueString,
    pub redirect_configuration_name: ValueString,
    pub redirect_configuration_id: ValueString,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationCertificateState {
    pub id: ValueString,
    pub name: ValueString,
    pub data: ValueString,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustedRootCertificateState {
    pub id: ValueString,
    pub name: ValueString,
    pub data: ValueString,
    pub key_vault_secret_id: ValueString,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SslCertificateState {
    pub id: ValueString,
    pub name: ValueString,
    pub data: ValueString,
    pub password: ValueString,
    pub key_vault_secret_id: ValueString,
    pub public_cert_data: ValueString,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WafConfigurationState {
    pub enabled: ValueBool,
    pub firewall_mode: ValueString,
    pub rule_set_type: ValueString,
    pub rule_set_version: ValueString,
    pub file_upload_limit_mb: ValueNumber,
    pub request_body_check: ValueBool,
    pub max_request_body_size_kb: ValueNumber,
}

macro_rules! impl_named_block {
    ($($block:ty),* $(,)?) => {
        $(
            impl NamedBlock for $block {
                fn name(&self) -> &ValueString {
                    &self.name
                }
            }
        )*
    };
}

impl_named_block!(
    GatewayIpConfigurationState,
    FrontendPortState,
    FrontendIpConfigurationState,
    BackendAddressPoolState,
    BackendHttpSettingsState,
    CertificateReferenceState,
    HttpListenerState,
    RequestRoutingRuleState,
    ProbeState,
    RedirectConfigurationState,
    UrlPathMapState,
    PathRuleState,
    AuthenticationCertificateState,
    TrustedRootCertificateState,
    SslCertificateState,
);

fn string_list() -> AttributeType {
    AttributeType::List(Box::new(AttributeType::String))
}

fn computed_id() -> Attribute {
    Attribute::computed(AttributeType::String, "ID of the element")
}

fn reference(description: &str) -> [Attribute; 2] {
    [
        Attribute::optional(AttributeType::String, description),
        Attribute::computed(AttributeType::String, "ID of the referenced element"),
    ]
}

fn sku_block() -> Block {
    Block {
        attributes: map! {
            "name" => Attribute::required(AttributeType::String, "Name of the SKU: `Standard_Small`, `Standard_v2`, `WAF_v2`, ..."),
            "tier" => Attribute::required(AttributeType::String, "Tier of the SKU: `Standard`, `Standard_v2`, `WAF` or `WAF_v2`"),
            "capacity" => Attribute::optional(AttributeType::Number, "Number of instances, when autoscaling is not configured"),
        },
        description: Description::plain("SKU of the gateway"),
        ..Default::default()
    }
}

fn autoscale_block() -> Block {
    Block {
        attributes: map! {
            "min_capacity" => Attribute::required(AttributeType::Number, "Minimum number of instances"),
            "max_capacity" => Attribute::optional(AttributeType::Number, "Maximum number of instances"),
        },
        description: Description::plain("Autoscaling of v2 SKUs"),
        ..Default::default()
    }
}

fn backend_http_settings_block() -> Block {
    let [probe_name, probe_id] = reference("Name of the probe checking the backends");
    Block {
        attributes: map! {
            "id" => computed_id(),
            "name" => Attribute::required(AttributeType::String, "Name of the settings"),
            "port" => Attribute::required(AttributeType::Number, "Port of the backends"),
            "protocol" => Attribute::required(AttributeType::String, "`Http` or `Https`"),
            "cookie_based_affinity" => Attribute::required(AttributeType::String, "`Enabled` or `Disabled`"),
            "affinity_cookie_name" => Attribute::optional(AttributeType::String, "Name of the affinity cookie"),
            "path" => Attribute::optional(AttributeType::String, "Path prefix of the requests to the backends"),
            "request_timeout" => Attribute::optional(AttributeType::Number, "Request timeout in seconds"),
            "host_name" => Attribute::optional(AttributeType::String, "Host header sent to the backends"),
            "pick_host_name_from_backend_address" => Attribute::optional(AttributeType::Bool, "Use the backend address as host header"),
            "probe_name" => probe_name,
            "probe_id" => probe_id,
            "trusted_root_certificate_names" => Attribute::optional(string_list(), "Trusted root certificates of the backends"),
        },
        blocks: map! {
            "authentication_certificate" => NestedBlock::List(Block {
                attributes: map! {
                    "id" => computed_id(),
                    "name" => Attribute::required(AttributeType::String, "Name of the authentication certificate"),
                },
                description: Description::plain("Authentication certificate of the backends"),
                ..Default::default()
            }),
            "connection_draining" => NestedBlock::Optional(Block {
                attributes: map! {
                    "enabled" => Attribute::required(AttributeType::Bool, "Enable connection draining"),
                    "drain_timeout_sec" => Attribute::required(AttributeType::Number, "Draining timeout in seconds"),
                },
                description: Description::plain("Connection draining"),
                ..Default::default()
            }),
        },
        description: Description::plain("Settings of the connections to the backends"),
        ..Default::default()
    }
}

fn http_listener_block() -> Block {
    let [ssl_certificate_name, ssl_certificate_id] = reference("Name of the SSL certificate");
    Block {
        attributes: map! {
            "id" => computed_id(),
            "name" => Attribute::required(AttributeType::String, "Name of the listener"),
            "frontend_ip_configuration_name" => Attribute::required(AttributeType::String, "Name of the frontend IP configuration"),
            "frontend_ip_configuration_id" => Attribute::computed(AttributeType::String, "ID of the frontend IP configuration"),
            "frontend_port_name" => Attribute::required(AttributeType::String, "Name of the frontend port"),
            "frontend_port_id" => Attribute::computed(AttributeType::String, "ID of the frontend port"),
            "protocol" => Attribute::required(AttributeType::String, "`Http` or `Https`"),
            "host_name" => Attribute::optional(AttributeType::String, "Host name to listen on"),
            "host_names" => Attribute::optional(string_list(), "Host names to listen on"),
            "require_sni" => Attribute::optional(AttributeType::Bool, "Require Server Name Indication"),
            "ssl_certificate_name" => ssl_certificate_name,
            "ssl_certificate_id" => ssl_certificate_id,
            "firewall_policy_id" => Attribute::optional(AttributeType::String, "Firewall policy of the listener"),
        },
        description: Description::plain("HTTP listener"),
        ..Default::default()
    }
}

fn request_routing_rule_block() -> Block {
    let [backend_address_pool_name, backend_address_pool_id] =
        reference("Name of the backend address pool");
    let [backend_http_settings_name, backend_http_settings_id] =
        reference("Name of the backend HTTP settings");
    let [redirect_configuration_name, redirect_configuration_id] =
        reference("Name of the redirect configuration");
    let [url_path_map_name, url_path_map_id] = reference("Name of the URL path map");
    Block {
        attributes: map! {
            "id" => computed_id(),
            "name" => Attribute::required(AttributeType::String, "Name of the rule"),
            "rule_type" => Attribute::required(AttributeType::String, "`Basic` or `PathBasedRouting`"),
            "priority" => Attribute::optional(AttributeType::Number, "Priority of the rule, between 1 and 20000"),
            "http_listener_name" => Attribute::required(AttributeType::String, "Name of the listener"),
            "http_listener_id" => Attribute::computed(AttributeType::String, "ID of the listener"),
            "backend_address_pool_name" => backend_address_pool_name,
            "backend_address_pool_id" => backend_address_pool_id,
            "backend_http_settings_name" => backend_http_settings_name,
            "backend_http_settings_id" => backend_http_settings_id,
            "redirect_configuration_name" => redirect_configuration_name,
            "redirect_configuration_id" => redirect_configuration_id,
            "url_path_map_name" => url_path_map_name,
            "url_path_map_id" => url_path_map_id,
        },
        description: Description::plain("Request routing rule"),
        ..Default::default()
    }
}

fn probe_block() -> Block {
    Block {
        attributes: map! {
            "id" => computed_id(),
            "name" => Attribute::required(AttributeType::String, "Name of the probe"),
            "protocol" => Attribute::required(AttributeType::String, "`Http` or `Https`"),
            "path" => Attribute::required(AttributeType::String, "Path of the probe request"),
            "host" => Attribute::optional(AttributeType::String, "Host header of the probe request"),
            "pick_host_name_from_backend_http_settings" => Attribute::optional(AttributeType::Bool, "Use the host name of the backend HTTP settings"),
            "interval" => Attribute::required(AttributeType::Number, "Interval between probes in seconds"),
            "timeout" => Attribute::required(AttributeType::Number, "Timeout of a probe in seconds"),
            "unhealthy_threshold" => Attribute::required(AttributeType::Number, "Number of failed probes before a backend is unhealthy"),
            "port" => Attribute::optional(AttributeType::Number, "Port of the probe request"),
            "minimum_servers" => Attribute::optional(AttributeType::Number, "Minimum number of servers always marked healthy"),
        },
        blocks: map! {
            "match" => NestedBlock::Optional(Block {
                attributes: map! {
                    "body" => Attribute::optional(AttributeType::String, "Expected body snippet"),
                    "status_code" => Attribute::required(string_list(), "Expected status codes or ranges"),
                },
                description: Description::plain("Healthy response"),
                ..Default::default()
            }),
        },
        description: Description::plain("Health probe"),
        ..Default::default()
    }
}

fn redirect_configuration_block() -> Block {
    Block {
        attributes: map! {
            "id" => computed_id(),
            "name" => Attribute::required(AttributeType::String, "Name of the redirect configuration"),
            "redirect_type" => Attribute::required(AttributeType::String, "`Permanent`, `Temporary`, `Found` or `SeeOther`"),
            "target_listener_name" => Attribute::optional(AttributeType::String, "Listener to redirect to"),
            "target_listener_id" => Attribute::computed(AttributeType::String, "ID of the listener to redirect to"),
            "target_url" => Attribute::optional(AttributeType::String, "URL to redirect to"),
            "include_path" => Attribute::optional(AttributeType::Bool, "Keep the path of the request"),
            "include_query_string" => Attribute::optional(AttributeType::Bool, "Keep the query string of the request"),
        },
        description: Description::plain("Redirect configuration"),
        ..Default::default()
    }
}

fn url_path_map_block() -> Block {
    let [pool_name, pool_id] = reference("Name of the backend address pool");
    let [settings_name, settings_id] = reference("Name of the backend HTTP settings");
    let [redirect_name, redirect_id] = reference("Name of the redirect configuration");
    let [default_pool_name, default_pool_id] = reference("Name of the default backend address pool");
    let [default_settings_name, default_settings_id] =
        reference("Name of the default backend HTTP settings");
    let [default_redirect_name, default_redirect_id] =
        reference("Name of the default redirect configuration");
    Block {
        attributes: map! {
            "id" => computed_id(),
            "name" => Attribute::required(AttributeType::String, "Name of the URL path map"),
            "default_backend_address_pool_name" => default_pool_name,
            "default_backend_address_pool_id" => default_pool_id,
            "default_backend_http_settings_name" => default_settings_name,
            "default_backend_http_settings_id" => default_settings_id,
            "default_redirect_configuration_name" => default_redirect_name,
            "default_redirect_configuration_id" => default_redirect_id,
        },
        blocks: map! {
            "path_rule" => NestedBlock::List(Block {
                attributes: map! {
                    "id" => computed_id(),
                    "name" => Attribute::required(AttributeType::String, "Name of the path rule"),
                    "paths" => Attribute::required(string_list(), "Paths matched by the rule"),
                    "backend_address_pool_name" => pool_name,
                    "backend_address_pool_id" => pool_id,
                    "backend_http_settings_name" => settings_name,
                    "backend_http_settings_id" => settings_id,
                    "redirect_configuration_name" => redirect_name,
                    "redirect_configuration_id" => redirect_id,
                },
                description: Description::plain("Path rule"),
                ..Default::default()
            }),
        },
        description: Description::plain("URL path map"),
        ..Default::default()
    }
}

fn waf_configuration_block() -> Block {
    Block {
        attributes: map! {
            "enabled" => Attribute::required(AttributeType::Bool, "Enable the web application firewall"),
            "firewall_mode" => Attribute::required(AttributeType::String, "`Detection` or `Prevention`"),
            "rule_set_type" => Attribute::optional(AttributeType::String, "Rule set type, `OWASP` by default"),
            "rule_set_version" => Attribute::required(AttributeType::String, "Version of the rule set"),
            "file_upload_limit_mb" => Attribute::optional(AttributeType::Number, "Maximum size of uploaded files in MB"),
            "request_body_check" => Attribute::optional(AttributeType::Bool, "Inspect request bodies"),
            "max_request_body_size_kb" => Attribute::optional(AttributeType::Number, "Maximum size of inspected request bodies in KB"),
        },
        description: Description::plain("Web application firewall"),
        ..Default::default()
    }
}

impl WithSchema for ApplicationGatewayState {
    fn schema() -> Schema {
        Schema {
            version: 1,
            block: Block {
                version: 1,
                attributes: map! {
                    "id" => Attribute::computed(AttributeType::String, "ID of the application gateway"),
                    "name" => Attribute::required(AttributeType::String, "Name of the application gateway"),
                    "resource_group_name" => Attribute::required(AttributeType::String, "Resource group of the application gateway"),
                    "location" => Attribute::required(AttributeType::String, "Azure region of the application gateway"),
                    "zones" => Attribute::optional(string_list(), "Availability zones"),
                    "tags" => Attribute::optional(AttributeType::Map(Box::new(AttributeType::String)), "Tags of the application gateway"),
                    "enable_http2" => Attribute::optional(AttributeType::Bool, "Enable HTTP/2"),
                    "firewall_policy_id" => Attribute::optional(AttributeType::String, "Web application firewall policy"),
                },
                blocks: map! {
                    "sku" => NestedBlock::Single(sku_block()),
                    "autoscale_configuration" => NestedBlock::Optional(autoscale_block()),
                    "gateway_ip_configuration" => NestedBlock::List(Block {
                        attributes: map! {
                            "id" => computed_id(),
                            "name" => Attribute::required(AttributeType::String, "Name of the gateway IP configuration"),
                            "subnet_id" => Attribute::required(AttributeType::String, "Subnet hosting the gateway"),
                        },
                        description: Description::plain("Subnet of the gateway"),
                        ..Default::default()
                    }),
                    "frontend_port" => NestedBlock::List(Block {
                        attributes: map! {
                            "id" => computed_id(),
                            "name" => Attribute::required(AttributeType::String, "Name of the frontend port"),
                            "port" => Attribute::required(AttributeType::Number, "Port number"),
                        },
                        description: Description::plain("Frontend port"),
                        ..Default::default()
                    }),
                    "frontend_ip_configuration" => NestedBlock::List(Block {
                        attributes: map! {
                            "id" => computed_id(),
                            "name" => Attribute::required(AttributeType::String, "Name of the frontend IP configuration"),
                            "subnet_id" => Attribute::optional(AttributeType::String, "Subnet of the private frontend"),
                            "private_ip_address" => Attribute::optional_computed(AttributeType::String, "Private IP address"),
                            "public_ip_address_id" => Attribute::optional(AttributeType::String, "Public IP address"),
                            "private_ip_address_allocation" => Attribute::optional(AttributeType::String, "`Dynamic` or `Static`"),
                        },
                        description: Description::plain("Frontend IP configuration"),
                        ..Default::default()
                    }),
                    "backend_address_pool" => NestedBlock::List(Block {
                        attributes: map! {
                            "id" => computed_id(),
                            "name" => Attribute::required(AttributeType::String, "Name of the backend address pool"),
                            "fqdns" => Attribute::optional(string_list(), "FQDNs of the backends"),
                            "ip_addresses" => Attribute::optional(string_list(), "IP addresses of the backends"),
                        },
                        description: Description::plain("Backend address pool"),
                        ..Default::default()
                    }),
                    "backend_http_settings" => NestedBlock::List(backend_http_settings_block()),
                    "http_listener" => NestedBlock::List(http_listener_block()),
                    "request_routing_rule" => NestedBlock::List(request_routing_rule_block()),
                    "probe" => NestedBlock::List(probe_block()),
                    "redirect_configuration" => NestedBlock::List(redirect_configuration_block()),
                    "url_path_map" => NestedBlock::List(url_path_map_block()),
                    "authentication_certificate" => NestedBlock::List(Block {
                        attributes: map! {
                            "id" => computed_id(),
                            "name" => Attribute::required(AttributeType::String, "Name of the authentication certificate"),
                            "data" => Attribute::required(AttributeType::String, "Contents of the certificate").sensitive(),
                        },
                        description: Description::plain("Authentication certificate"),
                        ..Default::default()
                    }),
                    "trusted_root_certificate" => NestedBlock::List(Block {
                        attributes: map! {
                            "id" => computed_id(),
                            "name" => Attribute::required(AttributeType::String, "Name of the trusted root certificate"),
                            "data" => Attribute::optional(AttributeType::String, "Contents of the certificate").sensitive(),
                            "key_vault_secret_id" => Attribute::optional(AttributeType::String, "Key Vault secret holding the certificate"),
                        },
                        description: Description::plain("Trusted root certificate"),
                        ..Default::default()
                    }),
                    "ssl_certificate" => NestedBlock::List(Block {
                        attributes: map! {
                            "id" => computed_id(),
                            "name" => Attribute::required(AttributeType::String, "Name of the SSL certificate"),
                            "data" => Attribute::optional(AttributeType::String, "PFX contents of the certificate").sensitive(),
                            "password" => Attribute::optional(AttributeType::String, "Password of the PFX").sensitive(),
                            "key_vault_secret_id" => Attribute::optional(AttributeType::String, "Key Vault secret holding the certificate"),
                            "public_cert_data" => Attribute::computed(AttributeType::String, "Public part of the certificate"),
                        },
                        description: Description::plain("SSL certificate"),
                        ..Default::default()
                    }),
                    "waf_configuration" => NestedBlock::Optional(waf_configuration_block()),
                    "timeouts" => NestedBlock::Optional(TimeoutsState::block()),
                },
                description: Description::plain("Azure application gateway"),
                deprecated: false,
            },
        }
    }
}
