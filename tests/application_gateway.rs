//! Lifecycle of `azurerm_application_gateway` against in-memory documents

mod common;

use std::sync::Arc;

use common::*;
use tf_azurerm_network::{
    client::{ClientOperation, InMemoryClient},
    ids::{ApplicationGatewayId, ResourceId},
    models::{ApplicationGateway, SslCertificateProperties},
    services::network::{
        application_gateway::{
            ApplicationGatewayState, BackendHttpSettingsState, GatewayIpConfigurationState,
            HttpListenerState, ProbeState, RedirectConfigurationState, SkuState,
            SslCertificateState, TrustedRootCertificateState,
        },
        ApplicationGatewayDataSource,
    },
    value::Value,
    DataSource, Diagnostics, Resource,
};

async fn create(client: &GatewayClient, config: ApplicationGatewayState) -> ApplicationGatewayState {
    let resource = gateways(client, &context());
    let mut diags = Diagnostics::default();
    let planned = resource
        .plan_create(&mut diags, Value::Value(config.clone()), Value::Value(config.clone()))
        .await
        .unwrap();
    let created = resource
        .create(&mut diags, planned, Value::Value(config))
        .await;
    assert_eq!(errors(&diags), Vec::<String>::new());
    match created {
        Some(Value::Value(state)) => state,
        other => panic!("gateway should have been created, got {other:?}"),
    }
}

fn gateway_id(name: &str) -> ApplicationGatewayId {
    ApplicationGatewayId::new(SUBSCRIPTION, "rg", name)
}

fn listener(state: &ApplicationGatewayState) -> &HttpListenerState {
    state
        .http_listener
        .known_items()
        .map(|(_, listener)| listener)
        .next()
        .expect("a listener")
}

#[tokio::test]
async fn created_gateway_reads_back_without_drift() {
    let client: GatewayClient = Arc::new(InMemoryClient::new());
    let created = create(&client, gateway("gw")).await;

    assert_eq!(created.id.as_str(), gateway_id("gw").id());
    assert_eq!(
        listener(&created).frontend_port_id.as_str(),
        format!("{}/frontendPorts/port-80", gateway_id("gw").id())
    );

    let resource = gateways(&client, &context());
    let mut diags = Diagnostics::default();
    let read = resource
        .read(&mut diags, Value::Value(created.clone()))
        .await
        .unwrap();
    assert_eq!(read, Value::Value(created.clone()));

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
    assert!(diags.errors.is_empty());
}

#[tokio::test]
async fn configured_location_spelling_is_kept() {
    let client: GatewayClient = Arc::new(InMemoryClient::new().on_write(
        |_: &ApplicationGatewayId, document: &mut ApplicationGateway| {
            document.location = document.location.to_lowercase().replace(' ', "");
        },
    ));
    let created = create(&client, gateway("gw")).await;

    assert_eq!(client.document(&gateway_id("gw")).unwrap().location, "westeurope");
    assert_eq!(created.location.as_str(), "West Europe");
}

#[tokio::test]
async fn certificate_secrets_survive_reads_but_not_imports() {
    let client: GatewayClient = Arc::new(InMemoryClient::new().on_write(
        |_: &ApplicationGatewayId, document: &mut ApplicationGateway| {
            for cert in &mut document.properties.ssl_certificates {
                cert.properties = SslCertificateProperties {
                    public_cert_data: Some("MIIBpublic".into()),
                    ..Default::default()
                };
            }
        },
    ));
    let mut config = gateway("gw");
    config.ssl_certificate = blocks(vec![SslCertificateState {
        name: "cert".into(),
        data: "cGZ4LWJ5dGVz".into(),
        password: "hunter2".into(),
        ..Default::default()
    }]);
    let created = create(&client, config).await;

    let stored = client.document(&gateway_id("gw")).unwrap();
    assert_eq!(stored.properties.ssl_certificates[0].properties.data, None);

    let cert = created.ssl_certificate.known_items().next().unwrap().1.clone();
    assert_eq!(cert.data.as_str(), "cGZ4LWJ5dGVz");
    assert_eq!(cert.password.as_str(), "hunter2");
    assert_eq!(cert.public_cert_data.as_str(), "MIIBpublic");

    let resource = gateways(&client, &context());
    let mut diags = Diagnostics::default();
    let Some(Value::Value(read)) = resource.read(&mut diags, Value::Value(created.clone())).await
    else {
        panic!("gateway should still exist");
    };
    assert_eq!(read.ssl_certificate, created.ssl_certificate);

    let Some(Value::Value(imported)) = resource.import(&mut diags, gateway_id("gw").id()).await
    else {
        panic!("gateway should be importable");
    };
    let cert = imported.ssl_certificate.known_items().next().unwrap().1.clone();
    assert!(cert.data.is_null());
    assert!(cert.password.is_null());
    assert_eq!(cert.public_cert_data.as_str(), "MIIBpublic");
}

#[tokio::test]
async fn moving_subnets_restarts_the_gateway() {
    let client: GatewayClient = Arc::new(InMemoryClient::new());
    let created = create(&client, gateway("gw")).await;
    assert_eq!(client.count(ClientOperation::Stop), 0);

    let resource = gateways(&client, &context());
    let mut diags = Diagnostics::default();

    let mut retagged = created.clone();
    retagged.tags = Value::Value([("env".to_owned(), Value::Value("test".to_owned()))].into());
    let updated = resource
        .update(
            &mut diags,
            Value::Value(created.clone()),
            Value::Value(retagged.clone()),
            Value::Value(retagged.clone()),
        )
        .await
        .unwrap();
    assert_eq!(client.count(ClientOperation::Stop), 0);
    let Value::Value(updated) = updated else {
        panic!("gateway should still exist");
    };
    assert_eq!(
        client.document(&gateway_id("gw")).unwrap().tags["env"],
        "test"
    );

    let mut moved = updated.clone();
    moved.gateway_ip_configuration = blocks(vec![GatewayIpConfigurationState {
        name: "gateway-ip".into(),
        subnet_id: SUBNET_B.into(),
        ..Default::default()
    }]);
    let before = client.calls().len();
    resource
        .update(
            &mut diags,
            Value::Value(updated),
            Value::Value(moved.clone()),
            Value::Value(moved),
        )
        .await
        .unwrap();
    assert!(diags.errors.is_empty());

    let writes: Vec<_> = client.calls()[before..]
        .iter()
        .map(|call| call.operation)
        .filter(|operation| *operation != ClientOperation::Get)
        .collect();
    assert_eq!(
        writes,
        [
            ClientOperation::Stop,
            ClientOperation::CreateOrUpdate,
            ClientOperation::Start,
        ]
    );
    let stored = client.document(&gateway_id("gw")).unwrap();
    let subnet = stored.properties.gateway_ip_configurations[0]
        .properties
        .subnet
        .clone()
        .unwrap();
    assert_eq!(subnet.id, SUBNET_B);
}

#[tokio::test]
async fn update_keeps_sections_left_untouched() {
    let client: GatewayClient = Arc::new(InMemoryClient::new());
    let created = create(&client, gateway("gw")).await;

    // A section managed out of band survives updates of other sections
    let mut remote = client.document(&gateway_id("gw")).unwrap();
    remote.properties.enable_http2 = Some(true);
    client.insert(&gateway_id("gw"), remote);

    let mut planned = created.clone();
    planned.sku = Value::Value(SkuState {
        name: "Standard_v2".into(),
        tier: "Standard_v2".into(),
        capacity: Value::Value(3),
    });
    let resource = gateways(&client, &context());
    let mut diags = Diagnostics::default();
    resource
        .update(
            &mut diags,
            Value::Value(created),
            Value::Value(planned.clone()),
            Value::Value(planned),
        )
        .await
        .unwrap();

    let stored = client.document(&gateway_id("gw")).unwrap();
    assert_eq!(stored.properties.enable_http2, Some(true));
    assert_eq!(stored.properties.sku.unwrap().capacity, Some(3));
}

#[tokio::test]
async fn renaming_forces_replacement() {
    let client: GatewayClient = Arc::new(InMemoryClient::new());
    let created = create(&client, gateway("gw")).await;
    let mut renamed = created.clone();
    renamed.name = "gw-2".into();

    let resource = gateways(&client, &context());
    let mut diags = Diagnostics::default();
    let (_, replace) = resource
        .plan_update(
            &mut diags,
            Value::Value(created),
            Value::Value(renamed.clone()),
            Value::Value(renamed),
        )
        .await
        .unwrap();
    assert_eq!(replace.len(), 1);
}

#[tokio::test]
async fn host_name_sources_are_exclusive() {
    let client: GatewayClient = Arc::new(InMemoryClient::new());
    let resource = gateways(&client, &context());

    let mut config = gateway("gw");
    config.backend_http_settings = blocks(vec![BackendHttpSettingsState {
        name: "settings".into(),
        port: Value::Value(80),
        protocol: "Http".into(),
        cookie_based_affinity: "Disabled".into(),
        host_name: "backend.example.com".into(),
        pick_host_name_from_backend_address: Value::Value(true),
        ..Default::default()
    }]);
    let mut diags = Diagnostics::default();
    assert!(resource
        .validate(&mut diags, Value::Value(config))
        .await
        .is_none());
    assert_eq!(
        errors(&diags),
        ["Only one of `host_name` or `pick_host_name_from_backend_address` can be set"]
    );

    let probe = |host: &str, pick: bool| ProbeState {
        name: "probe".into(),
        protocol: "Http".into(),
        path: "/health".into(),
        host: if host.is_empty() { Value::Null } else { host.into() },
        pick_host_name_from_backend_http_settings: Value::Value(pick),
        interval: Value::Value(30),
        timeout: Value::Value(30),
        unhealthy_threshold: Value::Value(3),
        ..Default::default()
    };
    let cases = [
        ("", false, Some("One of `host` or `pick_host_name_from_backend_http_settings` must be set")),
        ("backend.example.com", true, Some("Only one of `host` or `pick_host_name_from_backend_http_settings` can be set")),
        ("backend.example.com", false, None),
        ("", true, None),
    ];
    for (host, pick, expected) in cases {
        let mut config = gateway("gw");
        config.probe = blocks(vec![probe(host, pick)]);
        let mut diags = Diagnostics::default();
        resource.validate(&mut diags, Value::Value(config)).await;
        assert_eq!(
            errors(&diags),
            expected.into_iter().map(String::from).collect::<Vec<_>>(),
            "host {host:?}, pick {pick}"
        );
    }
}

fn optional(value: &str) -> Value<String> {
    if value.is_empty() {
        Value::Null
    } else {
        value.into()
    }
}

#[tokio::test]
async fn redirect_needs_exactly_one_target() {
    let client: GatewayClient = Arc::new(InMemoryClient::new());
    let resource = gateways(&client, &context());

    let cases = [
        ("", "", Some("Set either `target_listener_name` or `target_url`")),
        ("http", "https://example.com", Some("Conflict between `target_listener_name` and `target_url` (redirection is either to URL or target listener)")),
        ("http", "", None),
        ("", "https://example.com", None),
    ];
    for (listener, url, expected) in cases {
        let mut config = gateway("gw");
        config.redirect_configuration = blocks(vec![RedirectConfigurationState {
            name: "redirect".into(),
            redirect_type: "Permanent".into(),
            target_listener_name: optional(listener),
            target_url: optional(url),
            ..Default::default()
        }]);
        let mut diags = Diagnostics::default();
        resource.validate(&mut diags, Value::Value(config)).await;
        assert_eq!(
            errors(&diags),
            expected.into_iter().map(String::from).collect::<Vec<_>>(),
            "listener {listener:?}, url {url:?}"
        );
    }
}

#[tokio::test]
async fn certificate_secret_sources_are_exclusive() {
    let client: GatewayClient = Arc::new(InMemoryClient::new());
    let resource = gateways(&client, &context());
    const SECRET: &str = "https://vault.vault.azure.net/secrets/cert";

    let cases = [
        ("MIIC", "", "", None),
        ("MIIC", "secret", "", None),
        ("", "", SECRET, None),
        ("MIIC", "", SECRET, Some("only one of `key_vault_secret_id` or `data` must be specified for the `ssl_certificate` block \"cert\"")),
        ("", "secret", SECRET, Some("only one of `key_vault_secret_id` or `password` must be specified for the `ssl_certificate` block \"cert\"")),
        ("", "", "", Some("either `key_vault_secret_id` or `data` must be specified for the `ssl_certificate` block \"cert\"")),
    ];
    for (data, password, secret, expected) in cases {
        let mut config = gateway("gw");
        config.ssl_certificate = blocks(vec![SslCertificateState {
            name: "cert".into(),
            data: optional(data),
            password: optional(password),
            key_vault_secret_id: optional(secret),
            ..Default::default()
        }]);
        let mut diags = Diagnostics::default();
        resource.validate(&mut diags, Value::Value(config)).await;
        assert_eq!(
            errors(&diags),
            expected.into_iter().map(String::from).collect::<Vec<_>>(),
            "ssl data {data:?}, password {password:?}, secret {secret:?}"
        );
    }

    let cases = [
        ("MIIC", "", None),
        ("", SECRET, None),
        ("MIIC", SECRET, Some("only one of `key_vault_secret_id` or `data` must be specified for the `trusted_root_certificate` block \"root\"")),
        ("", "", Some("either `key_vault_secret_id` or `data` must be specified for the `trusted_root_certificate` block \"root\"")),
    ];
    for (data, secret, expected) in cases {
        let mut config = gateway("gw");
        config.trusted_root_certificate = blocks(vec![TrustedRootCertificateState {
            name: "root".into(),
            data: optional(data),
            key_vault_secret_id: optional(secret),
            ..Default::default()
        }]);
        let mut diags = Diagnostics::default();
        resource.validate(&mut diags, Value::Value(config)).await;
        assert_eq!(
            errors(&diags),
            expected.into_iter().map(String::from).collect::<Vec<_>>(),
            "trusted root data {data:?}, secret {secret:?}"
        );
    }
}

#[tokio::test]
async fn unknown_values_are_not_validated_yet() {
    let client: GatewayClient = Arc::new(InMemoryClient::new());
    let resource = gateways(&client, &context());

    let mut config = gateway("gw");
    config.backend_http_settings = blocks(vec![BackendHttpSettingsState {
        name: "settings".into(),
        host_name: Value::Unknown,
        pick_host_name_from_backend_address: Value::Value(true),
        ..Default::default()
    }]);
    let mut diags = Diagnostics::default();
    assert!(resource
        .validate(&mut diags, Value::Value(config))
        .await
        .is_some());
}

#[tokio::test]
async fn data_source_reads_existing_gateway() {
    let client: GatewayClient = Arc::new(InMemoryClient::new());
    let created = create(&client, gateway("gw")).await;
    let data_source = ApplicationGatewayDataSource::new(client.clone(), context());

    let lookup = ApplicationGatewayState {
        name: "gw".into(),
        resource_group_name: "rg".into(),
        ..Default::default()
    };
    let mut diags = Diagnostics::default();
    let found = data_source.read(&mut diags, lookup.clone()).await.unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(listener(&found).name.as_str(), "http");

    client.remove(&gateway_id("gw"));
    assert!(data_source.read(&mut diags, lookup).await.is_none());
    assert_eq!(
        errors(&diags),
        [format!("`{}` was not found", gateway_id("gw").id())]
    );
}
