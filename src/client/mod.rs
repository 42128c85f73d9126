//! Boundary with the remote Azure Resource Manager API
//!
//! The actual HTTP client is provided by the embedder through [`ResourceClient`];
//! resources only see typed identifiers, wire models and long-running operation handles.

mod memory;
mod poller;

use std::{fmt, sync::Arc};

use async_trait::async_trait;

use crate::{
    ids::{
        ApplicationGatewayId, ExpressRouteCircuitPeeringId, FirewallPolicyRuleGroupId, ResourceId,
    },
    models::{ApplicationGateway, ExpressRouteCircuitPeering, FirewallPolicyRuleGroup},
};

pub use memory::{ClientCall, ClientOperation, InMemoryClient};
pub use poller::{PollError, Poller};

/// Error returned by the remote API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status of the response, if a response was received
    pub status: Option<u16>,
    /// Service error code
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(id: &str) -> Self {
        Self::new(404, "ResourceNotFound", format!("{id} was not found"))
    }

    /// Error raised without any response from the service
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            code: "TransportError".into(),
            message: message.into(),
        }
    }

    pub fn unsupported(operation: &str) -> Self {
        Self {
            status: None,
            code: "NotSupported".into(),
            message: format!("{operation} is not supported by this client"),
        }
    }

    pub fn was_status(&self, status: u16) -> bool {
        self.status == Some(status)
    }

    pub fn was_not_found(&self) -> bool {
        self.was_status(404)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(
                f,
                "unexpected status {} with error: {}: {}",
                status, self.code, self.message
            ),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

impl std::error::Error for ApiError {}

/// Operations of the remote API on one kind of resource
///
/// Writes return a [`Poller`] tracking the long-running operation.
#[async_trait]
pub trait ResourceClient<I, M>: Send + Sync
where
    I: ResourceId,
    M: Send + 'static,
{
    /// Fetch the remote document
    async fn get(&self, id: &I) -> Result<M, ApiError>;
    /// Submit a full document
    async fn create_or_update(&self, id: &I, model: M) -> Result<Poller, ApiError>;
    /// Submit a deletion
    async fn delete(&self, id: &I) -> Result<Poller, ApiError>;
    /// Quiesce the resource before a disruptive change
    async fn stop(&self, id: &I) -> Result<Poller, ApiError> {
        _ = id;
        Err(ApiError::unsupported("stop"))
    }
    /// Resume the resource after a disruptive change
    async fn start(&self, id: &I) -> Result<Poller, ApiError> {
        _ = id;
        Err(ApiError::unsupported("start"))
    }
}

pub type ApplicationGatewaysClient =
    Arc<dyn ResourceClient<ApplicationGatewayId, ApplicationGateway>>;
pub type FirewallPolicyRuleGroupsClient =
    Arc<dyn ResourceClient<FirewallPolicyRuleGroupId, FirewallPolicyRuleGroup>>;
pub type ExpressRouteCircuitPeeringsClient =
    Arc<dyn ResourceClient<ExpressRouteCircuitPeeringId, ExpressRouteCircuitPeering>>;

/// Clients of the network services
#[derive(Clone)]
pub struct NetworkClients {
    pub application_gateways: ApplicationGatewaysClient,
    pub firewall_policy_rule_groups: FirewallPolicyRuleGroupsClient,
    pub express_route_circuit_peerings: ExpressRouteCircuitPeeringsClient,
}

impl NetworkClients {
    /// Clients backed by in-memory documents
    pub fn in_memory() -> Self {
        Self {
            application_gateways: Arc::new(InMemoryClient::new()),
            firewall_policy_rule_groups: Arc::new(InMemoryClient::new()),
            express_route_circuit_peerings: Arc::new(InMemoryClient::new()),
        }
    }
}

impl fmt::Debug for NetworkClients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkClients").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_classification() {
        assert!(ApiError::not_found("x").was_not_found());
        assert!(!ApiError::new(400, "BadRequest", "x").was_not_found());
        assert!(!ApiError::transport("reset").was_not_found());
    }

    #[test]
    fn transport_error_display() {
        assert_eq!(
            ApiError::transport("connection reset").to_string(),
            "TransportError: connection reset"
        );
    }
}
