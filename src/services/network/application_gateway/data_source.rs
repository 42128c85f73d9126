use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;

use crate::{
    attribute_path::AttributePath,
    client::ApplicationGatewaysClient,
    context::ProviderContext,
    data_source::DataSource,
    diagnostics::Diagnostics,
    error::{Error, Operation},
    ids::{ApplicationGatewayId, ResourceId},
    orchestrator::ResourceStrategy,
    schema::{Attribute, AttributeConstraint, AttributeType, Block, NestedBlock, Schema},
    utils::{ExtractDiagnostics, WithSchema},
    value::Value,
};

use super::{flatten::flatten_gateway, ApplicationGatewayState, ApplicationGatewayStrategy};

/// Look up an existing application gateway by name
pub struct ApplicationGatewayDataSource {
    client: ApplicationGatewaysClient,
    ctx: ProviderContext,
}

impl ApplicationGatewayDataSource {
    pub fn new(client: ApplicationGatewaysClient, ctx: ProviderContext) -> Self {
        Self { client, ctx }
    }

    async fn lookup(
        &self,
        config: &ApplicationGatewayState,
    ) -> Result<ApplicationGatewayState, Error> {
        let id = ApplicationGatewayId::new(
            self.ctx.subscription_id()?,
            config.resource_group_name.as_str(),
            config.name.as_str(),
        );
        let timeout = ApplicationGatewayStrategy::TIMEOUTS.read;

        debug!(%id, "looking up application gateway");
        let model = match tokio::time::timeout(timeout, self.client.get(&id)).await {
            Ok(Ok(model)) => model,
            Ok(Err(err)) if err.was_not_found() => return Err(Error::NotFound(id.id())),
            Ok(Err(err)) => return Err(Error::remote(Operation::Retrieving, &id, err)),
            Err(_) => {
                return Err(Error::Timeout {
                    operation: Operation::Retrieving,
                    id: id.id(),
                    timeout,
                })
            }
        };
        flatten_gateway(&id, model, &ApplicationGatewayState::default())
    }
}

/// Attributes of `block`, with every nested block turned into a computed attribute
fn computed_attributes(block: &Block) -> HashMap<String, Attribute> {
    let mut attributes: HashMap<String, Attribute> = block
        .attributes
        .iter()
        .map(|(name, attribute)| {
            let attribute = Attribute {
                constraint: AttributeConstraint::Computed,
                ..attribute.clone()
            };
            (name.clone(), attribute)
        })
        .collect();

    for (name, nested) in &block.blocks {
        let inner = computed_attributes(nested.block());
        let attr_type = match nested {
            NestedBlock::Single(_) => AttributeType::AttributeSingle(inner),
            _ => AttributeType::AttributeList(inner),
        };
        attributes.insert(
            name.clone(),
            Attribute {
                attr_type,
                description: nested.block().description.clone(),
                constraint: AttributeConstraint::Computed,
                ..Default::default()
            },
        );
    }
    attributes
}

#[async_trait]
impl DataSource for ApplicationGatewayDataSource {
    type State = ApplicationGatewayState;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        let resource = ApplicationGatewayState::schema();
        let mut attributes = computed_attributes(&resource.block);
        for argument in ["name", "resource_group_name"] {
            if let Some(attribute) = attributes.get_mut(argument) {
                attribute.constraint = AttributeConstraint::Required;
            }
        }

        Some(Schema {
            version: 1,
            block: Block {
                attributes,
                description: "Look up an existing application gateway".into(),
                ..Default::default()
            },
        })
    }

    async fn validate(&self, diags: &mut Diagnostics, config: Self::State) -> Option<()> {
        for (name, value) in [
            ("name", &config.name),
            ("resource_group_name", &config.resource_group_name),
        ] {
            if let Value::Value(value) = value {
                if value.is_empty() {
                    diags.error_short(
                        format!("`{name}` should not be empty"),
                        AttributePath::new(name),
                    );
                }
            }
        }

        if diags.errors.len() == 0 {
            Some(())
        } else {
            None
        }
    }

    async fn read(&self, diags: &mut Diagnostics, config: Self::State) -> Option<Self::State> {
        self.lookup(&config).await.extract_diagnostics(diags)
    }
}
