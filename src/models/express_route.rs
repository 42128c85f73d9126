use serde::{Deserialize, Serialize};

use super::SubResource;

/// `Microsoft.Network/expressRouteCircuits/peerings` document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressRouteCircuitPeering {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub properties: ExpressRouteCircuitPeeringProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpressRouteCircuitPeeringProperties {
    pub peering_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_peer_address_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_peer_address_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan_id: Option<i64>,
    /// Write-only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_key: Option<String>,
    #[serde(rename = "peerASN", skip_serializing_if = "Option::is_none")]
    pub peer_asn: Option<i64>,
    #[serde(rename = "azureASN", skip_serializing_if = "Option::is_none")]
    pub azure_asn: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_azure_port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_azure_port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_filter: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub microsoft_peering_config: Option<MicrosoftPeeringConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MicrosoftPeeringConfig {
    pub advertised_public_prefixes: Vec<String>,
    #[serde(rename = "customerASN", skip_serializing_if = "Option::is_none")]
    pub customer_asn: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_registry_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advertised_public_prefixes_state: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asn_field_names() {
        let peering = ExpressRouteCircuitPeering {
            name: "MicrosoftPeering".into(),
            properties: ExpressRouteCircuitPeeringProperties {
                peering_type: "MicrosoftPeering".into(),
                peer_asn: Some(100),
                microsoft_peering_config: Some(MicrosoftPeeringConfig {
                    advertised_public_prefixes: vec!["123.1.0.0/24".into()],
                    customer_asn: Some(200),
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        };
        let json = serde_json::to_value(&peering).unwrap();
        assert_eq!(json["properties"]["peerASN"], 100);
        assert_eq!(json["properties"]["microsoftPeeringConfig"]["customerASN"], 200);
        assert!(json["properties"].get("sharedKey").is_none());

        let back: ExpressRouteCircuitPeering = serde_json::from_value(json).unwrap();
        assert_eq!(back, peering);
    }
}
