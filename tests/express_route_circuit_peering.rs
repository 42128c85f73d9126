//! Lifecycle of `azurerm_express_route_circuit_peering` against in-memory documents

mod common;

use std::{sync::Arc, time::Duration};

use common::*;
use tf_azurerm_network::{
    client::{ApiError, ClientOperation, InMemoryClient},
    config::TimeoutsState,
    context::ProviderContext,
    ids::{ExpressRouteCircuitPeeringId, ResourceId},
    models::{ExpressRouteCircuitPeering, ExpressRouteCircuitPeeringProperties},
    services::network::express_route_circuit_peering::{
        ExpressRouteCircuitPeeringState, MicrosoftPeeringConfigState,
    },
    value::Value,
    Diagnostics, Resource,
};

fn peering_id(circuit: &str, peering_type: &str) -> ExpressRouteCircuitPeeringId {
    ExpressRouteCircuitPeeringId::new(SUBSCRIPTION, "rg", circuit, peering_type)
}

/// Client behaving like the service: the shared key is never returned and the Azure
/// side of the peering is filled in
fn service() -> PeeringClient {
    Arc::new(InMemoryClient::new().on_write(
        |_: &ExpressRouteCircuitPeeringId, peering: &mut ExpressRouteCircuitPeering| {
            peering.properties.shared_key = None;
            peering.properties.azure_asn = Some(12076);
            peering.properties.primary_azure_port = Some("MSEE-1".into());
            peering.properties.secondary_azure_port = Some("MSEE-2".into());
        },
    ))
}

async fn create_with(
    client: &PeeringClient,
    ctx: &ProviderContext,
    config: ExpressRouteCircuitPeeringState,
) -> (Option<ExpressRouteCircuitPeeringState>, Diagnostics) {
    let resource = peerings(client, ctx);
    let mut diags = Diagnostics::default();
    let planned = resource
        .plan_create(&mut diags, Value::Value(config.clone()), Value::Value(config.clone()))
        .await
        .unwrap();
    let created = resource
        .create(&mut diags, planned, Value::Value(config))
        .await
        .and_then(|state| state.as_option());
    (created, diags)
}

#[tokio::test]
async fn service_attributes_planned_then_filled() {
    let client = service();
    let resource = peerings(&client, &context());
    let mut diags = Diagnostics::default();
    let config = private_peering("circuit");

    let Some(Value::Value(planned)) = resource
        .plan_create(&mut diags, Value::Value(config.clone()), Value::Value(config.clone()))
        .await
    else {
        panic!("a plan should be produced");
    };
    assert!(planned.id.is_unknown());
    assert!(planned.azure_asn.is_unknown());
    assert!(planned.primary_azure_port.is_unknown());

    let (created, diags) = create_with(&client, &context(), config).await;
    assert!(diags.errors.is_empty());
    let created = created.unwrap();
    assert_eq!(created.id.as_str(), peering_id("circuit", "AzurePrivatePeering").id());
    assert_eq!(created.azure_asn, Value::Value(12076));
    assert_eq!(created.primary_azure_port.as_str(), "MSEE-1");
    assert_eq!(created.shared_key.as_str(), "s3cr3t");

    let stored = client
        .document(&peering_id("circuit", "AzurePrivatePeering"))
        .unwrap();
    assert_eq!(stored.properties.vlan_id, Some(100));
    assert_eq!(stored.properties.peer_asn, Some(65001));
}

#[tokio::test]
async fn shared_key_recovered_on_read() {
    let client = service();
    let (created, _) = create_with(&client, &context(), private_peering("circuit")).await;
    let created = created.unwrap();

    let resource = peerings(&client, &context());
    let mut diags = Diagnostics::default();
    let read = resource
        .read(&mut diags, Value::Value(created.clone()))
        .await
        .unwrap();
    assert_eq!(read, Value::Value(created));
}

#[tokio::test]
async fn unchanged_peering_plans_no_diff() {
    for client in [service(), Arc::new(InMemoryClient::new())] {
        let (created, diags) = create_with(&client, &context(), private_peering("circuit")).await;
        assert!(diags.errors.is_empty());
        let created = created.unwrap();

        let resource = peerings(&client, &context());
        let mut diags = Diagnostics::default();
        let (planned, replace) = resource
            .plan_update(
                &mut diags,
                Value::Value(created.clone()),
                Value::Value(created.clone()),
                Value::Value(created.clone()),
            )
            .await
            .unwrap();
        assert!(replace.is_empty());
        assert_eq!(planned, Value::Value(created));
    }
}

#[tokio::test]
async fn existing_peering_must_be_imported() {
    let client = service();
    let id = peering_id("circuit", "AzurePrivatePeering");
    client.insert(
        &id,
        ExpressRouteCircuitPeering {
            name: "AzurePrivatePeering".into(),
            properties: ExpressRouteCircuitPeeringProperties {
                peering_type: "AzurePrivatePeering".into(),
                vlan_id: Some(100),
                ..Default::default()
            },
            ..Default::default()
        },
    );

    let (created, diags) = create_with(&client, &context(), private_peering("circuit")).await;
    assert!(created.is_none());
    assert_eq!(
        errors(&diags),
        [format!(
            "A resource with the ID {:?} already exists - to be managed via Terraform this resource needs to be imported into the State. Please see the resource documentation for \"azurerm_express_route_circuit_peering\" for more information.",
            id.id()
        )]
    );
    assert_eq!(client.count(ClientOperation::CreateOrUpdate), 0);

    let resource = peerings(&client, &context());
    let mut diags = Diagnostics::default();
    let Some(Value::Value(imported)) = resource.import(&mut diags, id.id()).await else {
        panic!("the peering should be importable");
    };
    assert_eq!(imported.peering_type.as_str(), "AzurePrivatePeering");
    assert_eq!(imported.express_route_circuit_name.as_str(), "circuit");
    assert!(imported.shared_key.is_null());
}

#[tokio::test]
async fn import_is_case_insensitive_but_requires_the_object() {
    let client = service();
    let resource = peerings(&client, &context());
    let mut diags = Diagnostics::default();
    let lowered = "/subscriptions/00000000-0000-0000-0000-000000000000/resourcegroups/rg/providers/Microsoft.Network/expressroutecircuits/circuit/peerings/AzurePrivatePeering";

    assert!(resource.import(&mut diags, lowered.into()).await.is_none());
    assert_eq!(
        errors(&diags),
        [format!(
            "Cannot import non-existent remote object {}",
            peering_id("circuit", "AzurePrivatePeering").id()
        )]
    );

    let mut diags = Diagnostics::default();
    assert!(resource
        .import(&mut diags, "/subscriptions/x/resourceGroups/rg".into())
        .await
        .is_none());
    assert_eq!(diags.errors.len(), 1);
}

#[tokio::test]
async fn peering_deleted_out_of_band_leaves_the_state() {
    let client = service();
    let (created, _) = create_with(&client, &context(), private_peering("circuit")).await;
    client.remove(&peering_id("circuit", "AzurePrivatePeering"));

    let resource = peerings(&client, &context());
    let mut diags = Diagnostics::default();
    let read = resource
        .read(&mut diags, Value::Value(created.unwrap()))
        .await;
    assert_eq!(read, Some(Value::Null));
    assert!(diags.errors.is_empty());
}

#[tokio::test]
async fn remote_failures_are_reported() {
    let client = service();
    client.fail_next_poll(
        ClientOperation::CreateOrUpdate,
        ApiError::new(409, "Conflict", "circuit is being provisioned"),
    );

    let (created, diags) = create_with(&client, &context(), private_peering("circuit")).await;
    assert!(created.is_none());
    assert_eq!(
        errors(&diags),
        [format!(
            "creating {}: unexpected status 409 with error: Conflict: circuit is being provisioned",
            peering_id("circuit", "AzurePrivatePeering")
        )]
    );
}

#[tokio::test(start_paused = true)]
async fn configured_timeout_bounds_the_operation() {
    let client: PeeringClient =
        Arc::new(InMemoryClient::new().with_latency(Duration::from_secs(3600)));
    let mut config = private_peering("circuit");
    config.timeouts = Value::Value(TimeoutsState {
        create: "10m".into(),
        ..Default::default()
    });

    let (created, diags) = create_with(&client, &context(), config).await;
    assert!(created.is_none());
    assert_eq!(diags.errors.len(), 1);
    assert!(diags.errors[0].summary.starts_with("timed out after 600s while creating"));
}

#[tokio::test]
async fn stopped_provider_cancels_operations() {
    let client = service();
    let ctx = context();
    ctx.cancel.cancel();

    let (created, diags) = create_with(&client, &ctx, private_peering("circuit")).await;
    assert!(created.is_none());
    assert!(diags.errors[0].summary.ends_with("was cancelled"));
    assert_eq!(client.count(ClientOperation::CreateOrUpdate), 0);
}

#[tokio::test]
async fn invalid_configuration_is_rejected() {
    let client = service();
    let resource = peerings(&client, &context());

    let mut config = private_peering("circuit");
    config.timeouts = Value::Value(TimeoutsState {
        delete: "soon".into(),
        ..Default::default()
    });
    config.vlan_id = Value::Value(5000);
    let mut diags = Diagnostics::default();
    assert!(resource
        .validate(&mut diags, Value::Value(config))
        .await
        .is_none());
    assert_eq!(diags.errors.len(), 2);

    let microsoft = ExpressRouteCircuitPeeringState {
        peering_type: "MicrosoftPeering".into(),
        microsoft_peering_config: Value::Value(MicrosoftPeeringConfigState {
            advertised_public_prefixes: strings(&["123.1.0.0/24"]),
            customer_asn: Value::Value(64511),
            ..Default::default()
        }),
        ..private_peering("circuit")
    };
    let mut diags = Diagnostics::default();
    assert!(resource
        .validate(&mut diags, Value::Value(microsoft))
        .await
        .is_some());
}

#[tokio::test]
async fn unconfigured_provider_is_reported() {
    let client = service();
    let (created, diags) =
        create_with(&client, &ProviderContext::new(), private_peering("circuit")).await;
    assert!(created.is_none());
    assert!(diags.errors[0]
        .summary
        .starts_with("the provider has not been configured"));
}
