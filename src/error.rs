//! Errors raised by resource operations

use std::{fmt, time::Duration};

use crate::{attribute_path::AttributePath, client::ApiError};

/// Remote operation an error is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Creating,
    Retrieving,
    Updating,
    Deleting,
    Stopping,
    Starting,
    Importing,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Creating => "creating",
            Operation::Retrieving => "retrieving",
            Operation::Updating => "updating",
            Operation::Deleting => "deleting",
            Operation::Stopping => "stopping",
            Operation::Starting => "starting",
            Operation::Importing => "importing",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("`{0}` was not found")]
    NotFound(String),

    #[error("A resource with the ID {id:?} already exists - to be managed via Terraform this resource needs to be imported into the State. Please see the resource documentation for {resource_type:?} for more information.")]
    ImportRequired { resource_type: String, id: String },

    #[error("{message}")]
    Validation {
        message: String,
        attribute: AttributePath,
    },

    #[error("{operation} {id}: {source}")]
    Remote {
        operation: Operation,
        id: String,
        #[source]
        source: ApiError,
    },

    #[error("timed out after {timeout:?} while {operation} {id}")]
    Timeout {
        operation: Operation,
        id: String,
        timeout: Duration,
    },

    #[error("{operation} {id} was cancelled")]
    Cancelled { operation: Operation, id: String },

    #[error("parsing {input:?}: {reason}")]
    InvalidId { input: String, reason: String },

    #[error("the provider has not been configured: {0}")]
    NotConfigured(String),

    #[error("Cannot import non-existent remote object {0}")]
    ImportNotFound(String),

    #[error("encoding the state: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Validation error on a configuration attribute
    pub fn validation<M: Into<String>>(message: M, attribute: AttributePath) -> Self {
        Error::Validation {
            message: message.into(),
            attribute,
        }
    }

    /// Remote API failure of `operation` on the resource `id`
    pub fn remote(operation: Operation, id: impl fmt::Display, source: ApiError) -> Self {
        Error::Remote {
            operation,
            id: id.to_string(),
            source,
        }
    }

    /// Malformed resource identifier
    pub fn invalid_id(input: &str, reason: impl Into<String>) -> Self {
        Error::InvalidId {
            input: input.to_owned(),
            reason: reason.into(),
        }
    }

    /// Check if the error originates from the configuration
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_required_message() {
        let err = Error::ImportRequired {
            resource_type: "azurerm_application_gateway".into(),
            id: "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Network/applicationGateways/gw".into(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("A resource with the ID \"/subscriptions/s/"));
        assert!(msg.contains("\"azurerm_application_gateway\""));
    }

    #[test]
    fn remote_message_names_operation_and_id() {
        let err = Error::remote(
            Operation::Deleting,
            "/subscriptions/s/resourceGroups/rg",
            ApiError::new(409, "Conflict", "busy"),
        );
        assert_eq!(
            err.to_string(),
            "deleting /subscriptions/s/resourceGroups/rg: unexpected status 409 with error: Conflict: busy"
        );
    }
}
