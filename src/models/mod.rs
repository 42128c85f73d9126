//! Wire models of the Azure Resource Manager network API
//!
//! Collections and optional objects are defaulted while deserializing, so missing
//! properties in a response never need to be checked for presence when flattening.

mod application_gateway;
mod express_route;
mod firewall_policy;

use serde::{Deserialize, Serialize};

pub use application_gateway::*;
pub use express_route::*;
pub use firewall_policy::*;

/// Reference to another remote object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubResource {
    #[serde(default)]
    pub id: String,
}

impl SubResource {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Reference to `id` if it is not empty
    pub fn optional(id: &str) -> Option<Self> {
        if id.is_empty() {
            None
        } else {
            Some(Self::new(id))
        }
    }
}

/// Named child element embedded in a parent document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Named<P> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub properties: P,
}

impl<P> Named<P> {
    pub fn new(name: impl Into<String>, properties: P) -> Self {
        Self {
            id: None,
            name: name.into(),
            properties,
        }
    }

    /// Find the element called `name` in `items`
    pub fn find<'a>(items: &'a [Named<P>], name: &str) -> Option<&'a Named<P>> {
        items.iter().find(|item| item.name == name)
    }
}
