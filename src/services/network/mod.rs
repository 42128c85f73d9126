//! Resources and data sources of the `Microsoft.Network` provider

pub(crate) mod common;

pub mod application_gateway;
pub mod express_route_circuit_peering;
pub mod firewall_policy_rule_group;

pub use application_gateway::{
    ApplicationGatewayDataSource, ApplicationGatewayState, ApplicationGatewayStrategy,
};
pub use express_route_circuit_peering::{
    ExpressRouteCircuitPeeringState, ExpressRouteCircuitPeeringStrategy,
};
pub use firewall_policy_rule_group::{
    FirewallPolicyRuleGroupState, FirewallPolicyRuleGroupStrategy,
};
