//! Canonical Azure resource identifiers
//!
//! An identifier is a sequence of `/key/value` segments, for instance
//! `/subscriptions/{sub}/resourceGroups/{rg}/providers/Microsoft.Network/applicationGateways/{name}`.
//! Keys are matched case-insensitively by the insensitive parsers, values always keep
//! their case.

use std::fmt;

use crate::error::Error;

/// Expected segment of an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment {
    /// `/key/{value}` where the value is captured
    Value(&'static str),
    /// `/key/value` where the value is fixed
    Fixed(&'static str, &'static str),
}

impl Segment {
    fn key(&self) -> &'static str {
        match self {
            Segment::Value(key) | Segment::Fixed(key, _) => key,
        }
    }
}

fn same(a: &str, b: &str, insensitively: bool) -> bool {
    if insensitively {
        a.eq_ignore_ascii_case(b)
    } else {
        a == b
    }
}

/// Parse `input` against `segments`, returning the captured values in order
pub(crate) fn parse_segments(
    input: &str,
    segments: &[Segment],
    insensitively: bool,
) -> Result<Vec<String>, Error> {
    let Some(rest) = input.strip_prefix('/') else {
        return Err(Error::invalid_id(input, "the ID must start with '/'"));
    };
    let mut parts = rest.split('/');
    let mut values = Vec::with_capacity(segments.len());

    for segment in segments {
        let key = segment.key();
        let found = match parts.next() {
            Some(found) if !found.is_empty() => found,
            _ => {
                return Err(Error::invalid_id(
                    input,
                    format!("missing segment {key:?}"),
                ))
            }
        };
        if !same(found, key, insensitively) {
            return Err(Error::invalid_id(
                input,
                format!("expected segment {key:?}, found {found:?}"),
            ));
        }
        let value = match parts.next() {
            Some(value) if !value.is_empty() => value,
            _ => {
                return Err(Error::invalid_id(
                    input,
                    format!("segment {key:?} has no value"),
                ))
            }
        };
        match segment {
            Segment::Value(_) => values.push(value.to_owned()),
            Segment::Fixed(_, expected) => {
                if !same(value, expected, insensitively) {
                    return Err(Error::invalid_id(
                        input,
                        format!("expected {key:?} to be {expected:?}, found {value:?}"),
                    ));
                }
            }
        }
    }

    if let Some(extra) = parts.next() {
        return Err(Error::invalid_id(
            input,
            format!("unexpected trailing segment {extra:?}"),
        ));
    }
    Ok(values)
}

/// Format captured `values` along `segments`
pub(crate) fn format_segments(segments: &[Segment], values: &[&str]) -> String {
    let mut values = values.iter();
    let mut id = String::new();
    for segment in segments {
        match segment {
            Segment::Value(key) => {
                id.push('/');
                id.push_str(key);
                id.push('/');
                id.push_str(values.next().copied().unwrap_or_default());
            }
            Segment::Fixed(key, value) => {
                id.push('/');
                id.push_str(key);
                id.push('/');
                id.push_str(value);
            }
        }
    }
    id
}

/// Typed identifier of a remote resource
pub trait ResourceId: Sized + Clone + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Canonical string form
    fn id(&self) -> String;
    /// Parse an identifier, segment keys compared either exactly or ignoring case
    fn parse_with(input: &str, insensitively: bool) -> Result<Self, Error>;

    /// Parse an identifier whose segment keys have the canonical case
    fn parse(input: &str) -> Result<Self, Error> {
        Self::parse_with(input, false)
    }
    /// Parse an identifier ignoring the case of the segment keys
    fn parse_insensitively(input: &str) -> Result<Self, Error> {
        Self::parse_with(input, true)
    }
}

macro_rules! resource_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident($namespace:literal) {
            $($field:ident: $key:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
        pub struct $name {
            pub subscription_id: String,
            pub resource_group: String,
            $(pub $field: String,)+
        }

        impl $name {
            pub(crate) const SEGMENTS: &'static [Segment] = &[
                Segment::Value("subscriptions"),
                Segment::Value("resourceGroups"),
                Segment::Fixed("providers", $namespace),
                $(Segment::Value($key),)+
            ];

            pub fn new(
                subscription_id: impl Into<String>,
                resource_group: impl Into<String>,
                $($field: impl Into<String>,)+
            ) -> Self {
                Self {
                    subscription_id: subscription_id.into(),
                    resource_group: resource_group.into(),
                    $($field: $field.into(),)+
                }
            }
        }

        impl ResourceId for $name {
            fn id(&self) -> String {
                format_segments(
                    Self::SEGMENTS,
                    &[
                        self.subscription_id.as_str(),
                        self.resource_group.as_str(),
                        $(self.$field.as_str(),)+
                    ],
                )
            }

            fn parse_with(input: &str, insensitively: bool) -> Result<Self, Error> {
                let mut values = parse_segments(input, Self::SEGMENTS, insensitively)?.into_iter();
                let mut next = || values.next().unwrap_or_default();
                Ok(Self {
                    subscription_id: next(),
                    resource_group: next(),
                    $($field: next(),)+
                })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.id())
            }
        }
    };
}

resource_id! {
    /// Application gateway
    pub struct ApplicationGatewayId("Microsoft.Network") {
        name: "applicationGateways",
    }
}

resource_id! {
    /// Path rule of a URL path map of an application gateway
    pub struct PathRuleId("Microsoft.Network") {
        gateway_name: "applicationGateways",
        url_path_map: "urlPathMaps",
        name: "pathRules",
    }
}

resource_id! {
    /// Firewall policy
    pub struct FirewallPolicyId("Microsoft.Network") {
        name: "firewallPolicies",
    }
}

resource_id! {
    /// Rule group of a firewall policy
    pub struct FirewallPolicyRuleGroupId("Microsoft.Network") {
        firewall_policy: "firewallPolicies",
        name: "ruleGroups",
    }
}

resource_id! {
    /// Express route circuit
    pub struct ExpressRouteCircuitId("Microsoft.Network") {
        name: "expressRouteCircuits",
    }
}

resource_id! {
    /// Peering of an express route circuit
    pub struct ExpressRouteCircuitPeeringId("Microsoft.Network") {
        circuit: "expressRouteCircuits",
        name: "peerings",
    }
}

impl FirewallPolicyRuleGroupId {
    pub fn policy_id(&self) -> FirewallPolicyId {
        FirewallPolicyId::new(
            &self.subscription_id,
            &self.resource_group,
            &self.firewall_policy,
        )
    }
}

impl ExpressRouteCircuitPeeringId {
    pub fn circuit_id(&self) -> ExpressRouteCircuitId {
        ExpressRouteCircuitId::new(&self.subscription_id, &self.resource_group, &self.circuit)
    }
}

/// Kind of child element of an application gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubResourceKind {
    AuthenticationCertificates,
    TrustedRootCertificates,
    BackendAddressPools,
    BackendHttpSettingsCollection,
    FrontendIpConfigurations,
    FrontendPorts,
    GatewayIpConfigurations,
    HttpListeners,
    PrivateLinkConfigurations,
    Probes,
    RedirectConfigurations,
    RequestRoutingRules,
    RewriteRuleSets,
    SslCertificates,
    SslProfiles,
    UrlPathMaps,
}

impl SubResourceKind {
    /// Path segment of the kind
    pub const fn segment(self) -> &'static str {
        match self {
            SubResourceKind::AuthenticationCertificates => "authenticationCertificates",
            SubResourceKind::TrustedRootCertificates => "trustedRootCertificates",
            SubResourceKind::BackendAddressPools => "backendAddressPools",
            SubResourceKind::BackendHttpSettingsCollection => "backendHttpSettingsCollection",
            SubResourceKind::FrontendIpConfigurations => "frontendIPConfigurations",
            SubResourceKind::FrontendPorts => "frontendPorts",
            SubResourceKind::GatewayIpConfigurations => "gatewayIPConfigurations",
            SubResourceKind::HttpListeners => "httpListeners",
            SubResourceKind::PrivateLinkConfigurations => "privateLinkConfigurations",
            SubResourceKind::Probes => "probes",
            SubResourceKind::RedirectConfigurations => "redirectConfigurations",
            SubResourceKind::RequestRoutingRules => "requestRoutingRules",
            SubResourceKind::RewriteRuleSets => "rewriteRuleSets",
            SubResourceKind::SslCertificates => "sslCertificates",
            SubResourceKind::SslProfiles => "sslProfiles",
            SubResourceKind::UrlPathMaps => "urlPathMaps",
        }
    }

    /// Reference to the child `name` of `gateway`
    pub fn format(self, gateway: &ApplicationGatewayId, name: &str) -> String {
        SubResourceId::new(gateway.clone(), self, name).id()
    }
}

/// Reference to a child element of an application gateway: `{gatewayID}/{kind}/{name}`
///
/// Children are not standalone remote objects, their identifier is derived from the
/// gateway identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubResourceId {
    pub gateway: ApplicationGatewayId,
    pub kind: SubResourceKind,
    pub name: String,
}

impl SubResourceId {
    pub fn new(gateway: ApplicationGatewayId, kind: SubResourceKind, name: impl Into<String>) -> Self {
        Self {
            gateway,
            kind,
            name: name.into(),
        }
    }

    pub fn id(&self) -> String {
        format!("{}/{}/{}", self.gateway.id(), self.kind.segment(), self.name)
    }

    fn segments(kind: SubResourceKind) -> Vec<Segment> {
        let mut segments = ApplicationGatewayId::SEGMENTS.to_vec();
        segments.push(Segment::Value(kind.segment()));
        segments
    }

    fn parse_with(input: &str, kind: SubResourceKind, insensitively: bool) -> Result<Self, Error> {
        let mut values = parse_segments(input, &Self::segments(kind), insensitively)?.into_iter();
        let mut next = || values.next().unwrap_or_default();
        let gateway = ApplicationGatewayId {
            subscription_id: next(),
            resource_group: next(),
            name: next(),
        };
        Ok(Self {
            gateway,
            kind,
            name: next(),
        })
    }

    pub fn parse(input: &str, kind: SubResourceKind) -> Result<Self, Error> {
        Self::parse_with(input, kind, false)
    }

    pub fn parse_insensitively(input: &str, kind: SubResourceKind) -> Result<Self, Error> {
        Self::parse_with(input, kind, true)
    }
}

impl fmt::Display for SubResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}
