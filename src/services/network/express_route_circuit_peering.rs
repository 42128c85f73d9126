//! `azurerm_express_route_circuit_peering`
//!
//! A peering is named after its type: a circuit holds at most one peering of each type.

use std::{ops::RangeInclusive, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    attribute_path::AttributePath,
    client::{ExpressRouteCircuitPeeringsClient, ResourceClient},
    config::{OperationTimeouts, TimeoutsState},
    context::ProviderContext,
    error::Error,
    ids::{ExpressRouteCircuitPeeringId, ResourceId},
    map,
    models::{
        ExpressRouteCircuitPeering, ExpressRouteCircuitPeeringProperties, MicrosoftPeeringConfig,
        SubResource,
    },
    orchestrator::{ManagedState, ResourceStrategy},
    schema::{Attribute, AttributeType, Block, Description, NestedBlock, Schema},
    services::network::common::{
        check_one_of, check_range, non_empty, optional, optional_id, positive, string_list,
    },
    utils::WithSchema,
    value::{self, Value, ValueList, ValueNumber, ValueString},
};

pub const TYPE_NAME: &str = "azurerm_express_route_circuit_peering";
const CIRCUIT_TYPE_NAME: &str = "azurerm_express_route_circuit";

pub const MICROSOFT_PEERING: &str = "MicrosoftPeering";
const PEERING_TYPES: &[&str] = &["AzurePrivatePeering", "AzurePublicPeering", MICROSOFT_PEERING];
const VLAN_IDS: RangeInclusive<i64> = 1..=4094;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressRouteCircuitPeeringState {
    pub id: ValueString,
    pub peering_type: ValueString,
    pub express_route_circuit_name: ValueString,
    pub resource_group_name: ValueString,
    pub primary_peer_address_prefix: ValueString,
    pub secondary_peer_address_prefix: ValueString,
    pub vlan_id: ValueNumber,
    pub shared_key: ValueString,
    pub peer_asn: ValueNumber,
    pub route_filter_id: ValueString,
    #[serde(with = "value::serde_as_vec")]
    pub microsoft_peering_config: Value<MicrosoftPeeringConfigState>,
    pub azure_asn: ValueNumber,
    pub primary_azure_port: ValueString,
    pub secondary_azure_port: ValueString,
    #[serde(with = "value::serde_as_vec")]
    pub timeouts: Value<TimeoutsState>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MicrosoftPeeringConfigState {
    pub advertised_public_prefixes: ValueList<ValueString>,
    pub customer_asn: ValueNumber,
    pub routing_registry_name: ValueString,
}

impl WithSchema for ExpressRouteCircuitPeeringState {
    fn schema() -> Schema {
        Schema {
            version: 1,
            block: Block {
                version: 1,
                attributes: map! {
                    "id" => Attribute::computed(AttributeType::String, "ID of the peering"),
                    "peering_type" => Attribute::required(AttributeType::String, "`AzurePrivatePeering`, `AzurePublicPeering` or `MicrosoftPeering`"),
                    "express_route_circuit_name" => Attribute::required(AttributeType::String, "Circuit holding the peering"),
                    "resource_group_name" => Attribute::required(AttributeType::String, "Resource group of the circuit"),
                    "primary_peer_address_prefix" => Attribute::required(AttributeType::String, "/30 subnet of the primary link"),
                    "secondary_peer_address_prefix" => Attribute::required(AttributeType::String, "/30 subnet of the secondary link"),
                    "vlan_id" => Attribute::required(AttributeType::Number, "VLAN ID, between 1 and 4094"),
                    "shared_key" => Attribute::optional(AttributeType::String, "MD5 key of the BGP sessions").sensitive(),
                    "peer_asn" => Attribute::optional_computed(AttributeType::Number, "ASN of the peer"),
                    "route_filter_id" => Attribute::optional(AttributeType::String, "Route filter applied to a Microsoft peering"),
                    "azure_asn" => Attribute::computed(AttributeType::Number, "ASN of the Azure side"),
                    "primary_azure_port" => Attribute::computed(AttributeType::String, "Port of the primary link"),
                    "secondary_azure_port" => Attribute::computed(AttributeType::String, "Port of the secondary link"),
                },
                blocks: map! {
                    "microsoft_peering_config" => NestedBlock::Optional(Block {
                        attributes: map! {
                            "advertised_public_prefixes" => Attribute::required(
                                AttributeType::List(Box::new(AttributeType::String)),
                                "Prefixes advertised over the peering",
                            ),
                            "customer_asn" => Attribute::optional(AttributeType::Number, "ASN of the customer, when the peer is a provider"),
                            "routing_registry_name" => Attribute::optional(AttributeType::String, "Routing registry of the prefixes"),
                        },
                        description: Description::plain("Configuration of a Microsoft peering"),
                        ..Default::default()
                    }),
                    "timeouts" => NestedBlock::Optional(TimeoutsState::block()),
                },
                description: Description::plain("Peering of an express route circuit"),
                deprecated: false,
            },
        }
    }
}

impl ManagedState for ExpressRouteCircuitPeeringState {
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

fn expand_peering(state: &ExpressRouteCircuitPeeringState) -> Result<ExpressRouteCircuitPeering, Error> {
    check_one_of(
        &state.peering_type,
        PEERING_TYPES,
        AttributePath::new("peering_type"),
        "peering_type",
    )?;
    check_range(
        &state.vlan_id,
        VLAN_IDS,
        AttributePath::new("vlan_id"),
        "vlan_id",
    )?;
    if state.peering_type.as_str() == MICROSOFT_PEERING
        && !state.microsoft_peering_config.is_value()
        && !state.microsoft_peering_config.is_unknown()
    {
        return Err(Error::validation(
            "`microsoft_peering_config` must be specified when `peering_type` is set to `MicrosoftPeering`",
            AttributePath::new("microsoft_peering_config"),
        ));
    }

    let microsoft_peering_config =
        state
            .microsoft_peering_config
            .as_ref_option()
            .map(|config| MicrosoftPeeringConfig {
                advertised_public_prefixes: config.advertised_public_prefixes.strings(),
                customer_asn: positive(&config.customer_asn),
                routing_registry_name: non_empty(&config.routing_registry_name),
                advertised_public_prefixes_state: None,
            });

    Ok(ExpressRouteCircuitPeering {
        id: None,
        name: state.peering_type.as_str().to_owned(),
        properties: ExpressRouteCircuitPeeringProperties {
            peering_type: state.peering_type.as_str().to_owned(),
            primary_peer_address_prefix: non_empty(&state.primary_peer_address_prefix),
            secondary_peer_address_prefix: non_empty(&state.secondary_peer_address_prefix),
            vlan_id: positive(&state.vlan_id),
            shared_key: non_empty(&state.shared_key),
            peer_asn: positive(&state.peer_asn),
            route_filter: SubResource::optional(state.route_filter_id.as_str()),
            microsoft_peering_config,
            ..Default::default()
        },
    })
}

/// Build the peering state from the remote document
///
/// The service never returns the shared key: it is kept from `previous`.
fn flatten_peering(
    id: &ExpressRouteCircuitPeeringId,
    model: ExpressRouteCircuitPeering,
    previous: &ExpressRouteCircuitPeeringState,
) -> ExpressRouteCircuitPeeringState {
    let properties = model.properties;
    let previous_config = previous
        .microsoft_peering_config
        .as_ref_option()
        .cloned()
        .unwrap_or_default();
    let microsoft_peering_config = match properties.microsoft_peering_config {
        Some(config) => Value::Value(MicrosoftPeeringConfigState {
            advertised_public_prefixes: string_list(
                config.advertised_public_prefixes,
                &previous_config.advertised_public_prefixes,
            ),
            customer_asn: optional(config.customer_asn, &previous_config.customer_asn),
            routing_registry_name: optional(
                config.routing_registry_name,
                &previous_config.routing_registry_name,
            ),
        }),
        None => Value::Null,
    };
    let shared_key = match properties.shared_key {
        Some(key) if !key.is_empty() => key.into(),
        _ => previous.shared_key.clone(),
    };

    ExpressRouteCircuitPeeringState {
        id: id.id().into(),
        peering_type: id.name.clone().into(),
        express_route_circuit_name: id.circuit.clone().into(),
        resource_group_name: id.resource_group.clone().into(),
        primary_peer_address_prefix: properties.primary_peer_address_prefix.into(),
        secondary_peer_address_prefix: properties.secondary_peer_address_prefix.into(),
        vlan_id: properties.vlan_id.into(),
        shared_key,
        peer_asn: properties.peer_asn.into(),
        route_filter_id: optional_id(properties.route_filter.as_ref()),
        microsoft_peering_config,
        azure_asn: properties.azure_asn.into(),
        primary_azure_port: properties.primary_azure_port.into(),
        secondary_azure_port: properties.secondary_azure_port.into(),
        timeouts: previous.timeouts.clone(),
    }
}

/// Lifecycle of an express route circuit peering
#[derive(Clone)]
pub struct ExpressRouteCircuitPeeringStrategy {
    client: ExpressRouteCircuitPeeringsClient,
}

impl ExpressRouteCircuitPeeringStrategy {
    pub fn new(client: ExpressRouteCircuitPeeringsClient) -> Self {
        Self { client }
    }
}

impl ResourceStrategy for ExpressRouteCircuitPeeringStrategy {
    type Id = ExpressRouteCircuitPeeringId;
    type Model = ExpressRouteCircuitPeering;
    type State = ExpressRouteCircuitPeeringState;

    const TYPE_NAME: &'static str = TYPE_NAME;
    const TIMEOUTS: OperationTimeouts = OperationTimeouts::minutes(30, 5, 30, 30);
    const FORCE_NEW: &'static [&'static str] = &[
        "peering_type",
        "express_route_circuit_name",
        "resource_group_name",
    ];

    fn client(
        &self,
    ) -> Arc<dyn ResourceClient<ExpressRouteCircuitPeeringId, ExpressRouteCircuitPeering>> {
        self.client.clone()
    }

    fn id_from_config(
        &self,
        ctx: &ProviderContext,
        state: &ExpressRouteCircuitPeeringState,
    ) -> Result<ExpressRouteCircuitPeeringId, Error> {
        Ok(ExpressRouteCircuitPeeringId::new(
            ctx.subscription_id()?,
            state.resource_group_name.as_str(),
            state.express_route_circuit_name.as_str(),
            state.peering_type.as_str(),
        ))
    }

    fn plan_computed(
        &self,
        prior: Option<&ExpressRouteCircuitPeeringState>,
        planned: &mut ExpressRouteCircuitPeeringState,
    ) {
        // Known once the peering exists: kept from the prior state on update
        fn fill<T: Clone>(planned: &mut Value<T>, prior: Option<&Value<T>>) {
            if planned.is_null() {
                *planned = prior.cloned().unwrap_or(Value::Unknown);
            }
        }
        fill(&mut planned.peer_asn, prior.map(|p| &p.peer_asn));
        fill(&mut planned.azure_asn, prior.map(|p| &p.azure_asn));
        fill(
            &mut planned.primary_azure_port,
            prior.map(|p| &p.primary_azure_port),
        );
        fill(
            &mut planned.secondary_azure_port,
            prior.map(|p| &p.secondary_azure_port),
        );
    }

    fn lock_keys(&self, id: &ExpressRouteCircuitPeeringId) -> Vec<(String, &'static str)> {
        vec![(id.circuit.clone(), CIRCUIT_TYPE_NAME)]
    }

    fn expand(
        &self,
        _id: &ExpressRouteCircuitPeeringId,
        state: &ExpressRouteCircuitPeeringState,
    ) -> Result<ExpressRouteCircuitPeering, Error> {
        expand_peering(state)
    }

    fn flatten(
        &self,
        id: &ExpressRouteCircuitPeeringId,
        model: ExpressRouteCircuitPeering,
        previous: &ExpressRouteCircuitPeeringState,
    ) -> Result<ExpressRouteCircuitPeeringState, Error> {
        Ok(flatten_peering(id, model, previous))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::InMemoryClient;

    fn private_peering() -> ExpressRouteCircuitPeeringState {
        ExpressRouteCircuitPeeringState {
            peering_type: "AzurePrivatePeering".into(),
            express_route_circuit_name: "circuit1".into(),
            resource_group_name: "rg".into(),
            primary_peer_address_prefix: "192.168.1.0/30".into(),
            secondary_peer_address_prefix: "192.168.2.0/30".into(),
            vlan_id: Value::Value(100),
            shared_key: "ItsASecret".into(),
            peer_asn: Value::Value(100),
            ..Default::default()
        }
    }

    #[test]
    fn microsoft_peering_needs_config() {
        let state = ExpressRouteCircuitPeeringState {
            peering_type: MICROSOFT_PEERING.into(),
            ..private_peering()
        };
        let err = expand_peering(&state).unwrap_err();
        assert_eq!(
            err.to_string(),
            "`microsoft_peering_config` must be specified when `peering_type` is set to `MicrosoftPeering`"
        );

        let pending = ExpressRouteCircuitPeeringState {
            microsoft_peering_config: Value::Unknown,
            ..state.clone()
        };
        assert!(expand_peering(&pending).is_ok());

        let configured = ExpressRouteCircuitPeeringState {
            microsoft_peering_config: Value::Value(MicrosoftPeeringConfigState {
                advertised_public_prefixes: Value::Value(vec!["123.1.0.0/24".into()]),
                ..Default::default()
            }),
            ..state
        };
        let peering = expand_peering(&configured).unwrap();
        assert_eq!(peering.name, MICROSOFT_PEERING);
        assert_eq!(
            peering
                .properties
                .microsoft_peering_config
                .unwrap()
                .advertised_public_prefixes,
            vec!["123.1.0.0/24".to_owned()]
        );
    }

    #[test]
    fn vlan_id_is_bounded() {
        let state = ExpressRouteCircuitPeeringState {
            vlan_id: Value::Value(5000),
            ..private_peering()
        };
        assert!(expand_peering(&state).unwrap_err().is_validation());
    }

    #[test]
    fn shared_key_recovered_from_previous_state() {
        let id = ExpressRouteCircuitPeeringId::new("sub", "rg", "circuit1", "AzurePrivatePeering");
        let config = private_peering();
        let mut model = expand_peering(&config).unwrap();
        model.properties.shared_key = None;
        model.properties.azure_asn = Some(12076);
        model.properties.primary_azure_port = Some("port1".into());

        let state = flatten_peering(&id, model.clone(), &config);
        assert_eq!(state.shared_key, ValueString::from("ItsASecret"));
        assert_eq!(state.azure_asn, Value::Value(12076));
        assert_eq!(state.primary_azure_port, ValueString::from("port1"));
        assert!(state.secondary_azure_port.is_null());
        assert_eq!(state.id.as_str(), id.id());

        let imported = flatten_peering(&id, model, &ExpressRouteCircuitPeeringState::default());
        assert!(imported.shared_key.is_null());
        assert_eq!(imported.peering_type, config.peering_type);
    }

    #[test]
    fn computed_attributes_unknown_on_create() {
        let strategy = ExpressRouteCircuitPeeringStrategy::new(Arc::new(InMemoryClient::new()));
        let mut planned = private_peering();
        planned.peer_asn = Value::Null;
        strategy.plan_computed(None, &mut planned);
        assert!(planned.peer_asn.is_unknown());
        assert!(planned.azure_asn.is_unknown());
        assert!(planned.primary_azure_port.is_unknown());

        let id = ExpressRouteCircuitPeeringId::new("sub", "rg", "circuit1", "AzurePrivatePeering");
        assert_eq!(
            strategy.lock_keys(&id),
            vec![("circuit1".to_owned(), "azurerm_express_route_circuit")]
        );
    }
}
