use async_trait::async_trait;
use tracing::info;

use crate::{
    client::NetworkClients,
    config::ProviderConfig,
    context::ProviderContext,
    diagnostics::Diagnostics,
    orchestrator::Managed,
    provider::{DataSourceRegistry, Provider, ResourceRegistry},
    schema::Schema,
    services::network::{
        application_gateway, express_route_circuit_peering, firewall_policy_rule_group,
        ApplicationGatewayDataSource, ApplicationGatewayStrategy,
        ExpressRouteCircuitPeeringStrategy, FirewallPolicyRuleGroupStrategy,
    },
    utils::{ExtractDiagnostics, WithSchema},
};

/// Provider of the Azure networking resources
///
/// Resources share the provider context: the named locks, the settings resolved by
/// `configure`, and the stop token.
#[derive(Debug)]
pub struct AzureNetworkProvider {
    clients: NetworkClients,
    ctx: ProviderContext,
}

impl AzureNetworkProvider {
    pub fn new(clients: NetworkClients) -> Self {
        Self::with_context(clients, ProviderContext::new())
    }

    pub fn with_context(clients: NetworkClients, ctx: ProviderContext) -> Self {
        Self { clients, ctx }
    }

    pub fn context(&self) -> &ProviderContext {
        &self.ctx
    }
}

#[async_trait]
impl Provider for AzureNetworkProvider {
    type Config = ProviderConfig;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(ProviderConfig::schema())
    }

    async fn validate(&self, diags: &mut Diagnostics, config: Self::Config) -> Option<()> {
        config.validate(diags);

        if diags.errors.len() == 0 {
            Some(())
        } else {
            None
        }
    }

    async fn configure(
        &self,
        diags: &mut Diagnostics,
        terraform_version: String,
        config: Self::Config,
    ) -> Option<()> {
        let settings = config.resolve().extract_diagnostics(diags)?;
        info!(
            terraform_version,
            subscription_id = %settings.subscription_id,
            environment = %settings.environment,
            "provider configured"
        );
        self.ctx.configure(settings);
        Some(())
    }

    fn get_resources(&self, _diags: &mut Diagnostics) -> Option<ResourceRegistry> {
        let mut resources = ResourceRegistry::default();
        resources.insert(
            application_gateway::TYPE_NAME.into(),
            Box::new(Managed::new(
                ApplicationGatewayStrategy::new(self.clients.application_gateways.clone()),
                self.ctx.clone(),
            )) as _,
        );
        resources.insert(
            firewall_policy_rule_group::TYPE_NAME.into(),
            Box::new(Managed::new(
                FirewallPolicyRuleGroupStrategy::new(
                    self.clients.firewall_policy_rule_groups.clone(),
                ),
                self.ctx.clone(),
            )) as _,
        );
        resources.insert(
            express_route_circuit_peering::TYPE_NAME.into(),
            Box::new(Managed::new(
                ExpressRouteCircuitPeeringStrategy::new(
                    self.clients.express_route_circuit_peerings.clone(),
                ),
                self.ctx.clone(),
            )) as _,
        );
        Some(resources)
    }

    fn get_data_sources(&self, _diags: &mut Diagnostics) -> Option<DataSourceRegistry> {
        let mut data_sources = DataSourceRegistry::default();
        data_sources.insert(
            application_gateway::TYPE_NAME.into(),
            Box::new(ApplicationGatewayDataSource::new(
                self.clients.application_gateways.clone(),
                self.ctx.clone(),
            )) as _,
        );
        Some(data_sources)
    }

    async fn stop(&self, _diags: &mut Diagnostics) -> Option<()> {
        info!("stopping, cancelling in-flight operations");
        self.ctx.cancel.cancel();
        Some(())
    }
}
