// This file is part of the tf-azurerm-network project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Errors and warnings reported back to Terraform

use std::borrow::Cow;

use crate::{attribute_path::AttributePath, error::Error};

type Text = Cow<'static, str>;

/// Diagnostics collected while serving a single request
///
/// Operations return [`None`] iff at least one error has been pushed here.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Diagnostics {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn error<S: Into<Text>, D: Into<Text>>(
        &mut self,
        summary: S,
        detail: D,
        attribute: AttributePath,
    ) {
        self.errors.push(Diagnostic::new(summary, detail, attribute));
    }

    /// Error on a configuration attribute
    pub fn error_short<S: Into<Text>>(&mut self, summary: S, attribute: AttributePath) {
        self.error(summary, "", attribute);
    }

    /// Error on the resource as a whole
    pub fn root_error_short<S: Into<Text>>(&mut self, summary: S) {
        self.error(summary, "", AttributePath::default());
    }

    pub fn warning_short<S: Into<Text>>(&mut self, summary: S, attribute: AttributePath) {
        self.warnings.push(Diagnostic::new(summary, "", attribute));
    }

    /// Report a crate error
    ///
    /// Validation errors keep their attribute; remote failures carry the service error
    /// code in the detail.
    pub fn report(&mut self, err: Error) {
        self.errors.push(err.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Diagnostic {
    pub summary: Text,
    pub detail: Text,
    pub attribute: AttributePath,
}

impl Diagnostic {
    pub fn new<S: Into<Text>, D: Into<Text>>(summary: S, detail: D, attribute: AttributePath) -> Self {
        Self {
            summary: summary.into(),
            detail: detail.into(),
            attribute,
        }
    }
}

impl From<Error> for Diagnostic {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation { message, attribute } => Diagnostic::new(message, "", attribute),
            Error::Remote { ref source, .. } => {
                let detail = match source.status {
                    Some(status) => format!("status {status}, code {:?}", source.code),
                    None => format!("code {:?}", source.code),
                };
                Diagnostic::new(err.to_string(), detail, AttributePath::default())
            }
            err => Diagnostic::new(err.to_string(), "", AttributePath::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{client::ApiError, error::Operation};

    #[test]
    fn validation_error_keeps_attribute() {
        let mut diags = Diagnostics::default();
        diags.report(Error::validation(
            "Set either `target_listener_name` or `target_url`",
            AttributePath::new("redirect_configuration").index(0),
        ));
        assert!(diags.has_errors());
        assert_eq!(
            diags.errors[0].attribute.to_string(),
            "redirect_configuration[0]"
        );
        assert_eq!(
            diags.errors[0].summary,
            "Set either `target_listener_name` or `target_url`"
        );
    }

    #[test]
    fn remote_error_detail_names_the_service_code() {
        let mut diags = Diagnostics::default();
        diags.report(Error::Remote {
            operation: Operation::Deleting,
            id: "gw".into(),
            source: ApiError::new(409, "InUseSubnetCannotBeDeleted", "subnet in use"),
        });
        assert_eq!(
            diags.errors[0].detail,
            "status 409, code \"InUseSubnetCannotBeDeleted\""
        );
        assert!(diags.errors[0].attribute.is_root());
    }
}
