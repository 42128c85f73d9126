//! Fixtures shared by the lifecycle tests
//!
//! Add `mod common;` to a test file to use them. Resources run against
//! [`InMemoryClient`] documents, with a provider context already configured.

#![allow(dead_code)]

use std::sync::Arc;

use tf_azurerm_network::{
    client::InMemoryClient,
    config::ProviderSettings,
    context::ProviderContext,
    ids::{ApplicationGatewayId, ExpressRouteCircuitPeeringId, FirewallPolicyRuleGroupId},
    models::{ApplicationGateway, ExpressRouteCircuitPeering, FirewallPolicyRuleGroup},
    orchestrator::Managed,
    services::network::{
        application_gateway::{
            ApplicationGatewayState, BackendAddressPoolState, BackendHttpSettingsState,
            FrontendIpConfigurationState, FrontendPortState, GatewayIpConfigurationState,
            HttpListenerState, RequestRoutingRuleState, SkuState,
        },
        express_route_circuit_peering::ExpressRouteCircuitPeeringState,
        firewall_policy_rule_group::{
            ApplicationConditionState, FilterRuleState, FirewallPolicyRuleGroupState,
            ProtocolState,
        },
        ApplicationGatewayStrategy, ExpressRouteCircuitPeeringStrategy,
        FirewallPolicyRuleGroupStrategy,
    },
    value::{Value, ValueList, ValueString},
    Diagnostics,
};

pub const SUBSCRIPTION: &str = "00000000-0000-0000-0000-000000000000";
pub const SUBNET_A: &str = "/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/vnet/subnets/gateway-a";
pub const SUBNET_B: &str = "/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/vnet/subnets/gateway-b";

pub type GatewayClient = Arc<InMemoryClient<ApplicationGatewayId, ApplicationGateway>>;
pub type RuleGroupClient = Arc<InMemoryClient<FirewallPolicyRuleGroupId, FirewallPolicyRuleGroup>>;
pub type PeeringClient =
    Arc<InMemoryClient<ExpressRouteCircuitPeeringId, ExpressRouteCircuitPeering>>;

pub fn context() -> ProviderContext {
    ProviderContext::with_settings(ProviderSettings {
        subscription_id: SUBSCRIPTION.into(),
        tenant_id: None,
        environment: "public".into(),
        skip_provider_registration: false,
        partner_id: None,
    })
}

pub fn gateways(client: &GatewayClient, ctx: &ProviderContext) -> Managed<ApplicationGatewayStrategy> {
    Managed::new(ApplicationGatewayStrategy::new(client.clone()), ctx.clone())
}

pub fn rule_groups(
    client: &RuleGroupClient,
    ctx: &ProviderContext,
) -> Managed<FirewallPolicyRuleGroupStrategy> {
    Managed::new(FirewallPolicyRuleGroupStrategy::new(client.clone()), ctx.clone())
}

pub fn peerings(
    client: &PeeringClient,
    ctx: &ProviderContext,
) -> Managed<ExpressRouteCircuitPeeringStrategy> {
    Managed::new(ExpressRouteCircuitPeeringStrategy::new(client.clone()), ctx.clone())
}

pub fn strings(items: &[&str]) -> ValueList<ValueString> {
    Value::Value(items.iter().map(|item| Value::Value((*item).to_owned())).collect())
}

pub fn blocks<T>(items: Vec<T>) -> ValueList<Value<T>> {
    Value::Value(items.into_iter().map(Value::Value).collect())
}

/// Single listener routing HTTP traffic on port 80 to one backend pool
pub fn gateway(name: &str) -> ApplicationGatewayState {
    ApplicationGatewayState {
        name: name.into(),
        resource_group_name: "rg".into(),
        location: "West Europe".into(),
        sku: Value::Value(SkuState {
            name: "Standard_v2".into(),
            tier: "Standard_v2".into(),
            capacity: Value::Value(2),
        }),
        gateway_ip_configuration: blocks(vec![GatewayIpConfigurationState {
            name: "gateway-ip".into(),
            subnet_id: SUBNET_A.into(),
            ..Default::default()
        }]),
        frontend_port: blocks(vec![FrontendPortState {
            name: "port-80".into(),
            port: Value::Value(80),
            ..Default::default()
        }]),
        frontend_ip_configuration: blocks(vec![FrontendIpConfigurationState {
            name: "frontend".into(),
            subnet_id: SUBNET_A.into(),
            private_ip_address: "10.0.0.10".into(),
            private_ip_address_allocation: "Static".into(),
            ..Default::default()
        }]),
        backend_address_pool: blocks(vec![BackendAddressPoolState {
            name: "pool".into(),
            ip_addresses: strings(&["10.0.1.4", "10.0.1.5"]),
            ..Default::default()
        }]),
        backend_http_settings: blocks(vec![BackendHttpSettingsState {
            name: "settings".into(),
            port: Value::Value(80),
            protocol: "Http".into(),
            cookie_based_affinity: "Disabled".into(),
            request_timeout: Value::Value(30),
            ..Default::default()
        }]),
        http_listener: blocks(vec![HttpListenerState {
            name: "http".into(),
            frontend_ip_configuration_name: "frontend".into(),
            frontend_port_name: "port-80".into(),
            protocol: "Http".into(),
            ..Default::default()
        }]),
        request_routing_rule: blocks(vec![RequestRoutingRuleState {
            name: "rule".into(),
            rule_type: "Basic".into(),
            http_listener_name: "http".into(),
            backend_address_pool_name: "pool".into(),
            backend_http_settings_name: "settings".into(),
            ..Default::default()
        }]),
        ..Default::default()
    }
}

/// Rule group allowing HTTPS traffic to a single FQDN
pub fn rule_group(policy: &str, name: &str) -> FirewallPolicyRuleGroupState {
    FirewallPolicyRuleGroupState {
        name: name.into(),
        firewall_policy_name: policy.into(),
        resource_group_name: "rg".into(),
        priority: Value::Value(200),
        filter_rule: blocks(vec![FilterRuleState {
            name: "allow-web".into(),
            priority: Value::Value(300),
            action_type: "Allow".into(),
            application_condition: blocks(vec![ApplicationConditionState {
                name: "web".into(),
                source_addresses: strings(&["10.0.0.0/24"]),
                target_fqdns: strings(&["www.example.com"]),
                protocols: blocks(vec![ProtocolState {
                    protocol_type: "Https".into(),
                    port: Value::Value(443),
                }]),
                ..Default::default()
            }]),
            ..Default::default()
        }]),
        ..Default::default()
    }
}

pub fn private_peering(circuit: &str) -> ExpressRouteCircuitPeeringState {
    ExpressRouteCircuitPeeringState {
        peering_type: "AzurePrivatePeering".into(),
        express_route_circuit_name: circuit.into(),
        resource_group_name: "rg".into(),
        primary_peer_address_prefix: "192.168.1.0/30".into(),
        secondary_peer_address_prefix: "192.168.2.0/30".into(),
        vlan_id: Value::Value(100),
        peer_asn: Value::Value(65001),
        shared_key: "s3cr3t".into(),
        ..Default::default()
    }
}

/// Summaries of the errors reported so far
pub fn errors(diags: &Diagnostics) -> Vec<String> {
    diags.errors.iter().map(|diag| diag.summary.to_string()).collect()
}
