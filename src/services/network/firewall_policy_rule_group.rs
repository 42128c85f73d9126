//! `azurerm_firewall_policy_rule_group`
//!
//! The group document is replaced as a whole on every write. Writes hold the lock of
//! the parent policy, then the lock of the group.

use std::{collections::HashMap, ops::RangeInclusive, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    attribute_path::AttributePath,
    client::{ApiError, FirewallPolicyRuleGroupsClient, ResourceClient},
    config::{OperationTimeouts, TimeoutsState},
    context::ProviderContext,
    error::Error,
    ids::{FirewallPolicyRuleGroupId, ResourceId},
    map,
    models::{
        ApplicationProtocol, ApplicationRuleCondition, FirewallPolicyFilterRule,
        FirewallPolicyNatRule, FirewallPolicyRule, FirewallPolicyRuleGroup,
        FirewallPolicyRuleGroupProperties, NatRuleCondition, NetworkRuleCondition, RuleAction,
        RuleCondition,
    },
    orchestrator::{ManagedState, ResourceStrategy},
    schema::{Attribute, AttributeType, Block, Description, NestedBlock, Schema},
    services::network::common::{
        check_one_of, check_range, non_empty, optional, positive, string_list,
    },
    utils::WithSchema,
    value::{self, Value, ValueList, ValueNumber, ValueString},
};

pub const TYPE_NAME: &str = "azurerm_firewall_policy_rule_group";
const FIREWALL_POLICY_TYPE_NAME: &str = "azurerm_firewall_policy";

const PRIORITIES: RangeInclusive<i64> = 100..=65000;
const PORTS: RangeInclusive<i64> = 0..=64000;
const FILTER_ACTIONS: &[&str] = &["Allow", "Deny"];
const NAT_ACTIONS: &[&str] = &["DNAT"];
const APPLICATION_PROTOCOLS: &[&str] = &["Http", "Https"];

/// Action of a NAT rule when none is configured
pub const DEFAULT_NAT_ACTION: &str = "DNAT";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallPolicyRuleGroupState {
    pub id: ValueString,
    pub name: ValueString,
    pub firewall_policy_name: ValueString,
    pub resource_group_name: ValueString,
    pub priority: ValueNumber,
    pub filter_rule: ValueList<Value<FilterRuleState>>,
    pub nat_rule: ValueList<Value<NatRuleState>>,
    #[serde(with = "value::serde_as_vec")]
    pub timeouts: Value<TimeoutsState>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRuleState {
    pub name: ValueString,
    pub priority: ValueNumber,
    pub action_type: ValueString,
    pub application_condition: ValueList<Value<ApplicationConditionState>>,
    pub nat_condition: ValueList<Value<NatConditionState>>,
    pub network_condition: ValueList<Value<NetworkConditionState>>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatRuleState {
    pub name: ValueString,
    pub priority: ValueNumber,
    pub action_type: ValueString,
    pub translated_address: ValueString,
    pub translated_port: ValueString,
    pub application_condition: ValueList<Value<ApplicationConditionState>>,
    pub nat_condition: ValueList<Value<NatConditionState>>,
    pub network_condition: ValueList<Value<NetworkConditionState>>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConditionState {
    pub name: ValueString,
    pub destination_addresses: ValueList<ValueString>,
    pub fqdn_tags: ValueList<ValueString>,
    pub protocols: ValueList<Value<ProtocolState>>,
    pub source_addresses: ValueList<ValueString>,
    pub source_ip_groups: ValueList<ValueString>,
    pub target_fqdns: ValueList<ValueString>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolState {
    #[serde(rename = "type")]
    pub protocol_type: ValueString,
    pub port: ValueNumber,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatConditionState {
    pub name: ValueString,
    pub destination_addresses: ValueList<ValueString>,
    pub destination_ports: ValueList<ValueString>,
    pub ip_protocols: ValueList<ValueString>,
    pub source_addresses: ValueList<ValueString>,
    pub source_ip_groups: ValueList<ValueString>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConditionState {
    pub name: ValueString,
    pub destination_addresses: ValueList<ValueString>,
    pub destination_ip_groups: ValueList<ValueString>,
    pub destination_ports: ValueList<ValueString>,
    pub ip_protocols: ValueList<ValueString>,
    pub source_addresses: ValueList<ValueString>,
    pub source_ip_groups: ValueList<ValueString>,
}

fn string_list_type() -> AttributeType {
    AttributeType::List(Box::new(AttributeType::String))
}

fn addresses(description: &str) -> Attribute {
    Attribute::optional(string_list_type(), description)
}

fn condition_blocks() -> HashMap<String, NestedBlock> {
    map! {
        "application_condition" => NestedBlock::List(Block {
            attributes: map! {
                "name" => Attribute::optional(AttributeType::String, "Name of the condition"),
                "destination_addresses" => addresses("Destination IP addresses or ranges"),
                "fqdn_tags" => addresses("FQDN tags"),
                "source_addresses" => addresses("Source IP addresses or ranges"),
                "source_ip_groups" => addresses("Source IP groups"),
                "target_fqdns" => addresses("Target FQDNs"),
            },
            blocks: map! {
                "protocols" => NestedBlock::List(Block {
                    attributes: map! {
                        "type" => Attribute::required(AttributeType::String, "`Http` or `Https`"),
                        "port" => Attribute::required(AttributeType::Number, "Port, between 0 and 64000"),
                    },
                    description: Description::plain("Application protocol"),
                    ..Default::default()
                }),
            },
            description: Description::plain("Condition on application traffic"),
            ..Default::default()
        }),
        "nat_condition" => NestedBlock::List(Block {
            attributes: map! {
                "name" => Attribute::optional(AttributeType::String, "Name of the condition"),
                "destination_addresses" => addresses("Destination IP addresses or ranges"),
                "destination_ports" => addresses("Destination ports or port ranges"),
                "ip_protocols" => addresses("IP protocols: `TCP`, `UDP`, `Any` or `ICMP`"),
                "source_addresses" => addresses("Source IP addresses or ranges"),
                "source_ip_groups" => addresses("Source IP groups"),
            },
            description: Description::plain("Condition on translated traffic"),
            ..Default::default()
        }),
        "network_condition" => NestedBlock::List(Block {
            attributes: map! {
                "name" => Attribute::optional(AttributeType::String, "Name of the condition"),
                "destination_addresses" => addresses("Destination IP addresses or ranges"),
                "destination_ip_groups" => addresses("Destination IP groups"),
                "destination_ports" => addresses("Destination ports or port ranges"),
                "ip_protocols" => addresses("IP protocols: `TCP`, `UDP`, `Any` or `ICMP`"),
                "source_addresses" => addresses("Source IP addresses or ranges"),
                "source_ip_groups" => addresses("Source IP groups"),
            },
            description: Description::plain("Condition on network traffic"),
            ..Default::default()
        }),
    }
}

impl WithSchema for FirewallPolicyRuleGroupState {
    fn schema() -> Schema {
        Schema {
            version: 1,
            block: Block {
                version: 1,
                attributes: map! {
                    "id" => Attribute::computed(AttributeType::String, "ID of the rule group"),
                    "name" => Attribute::required(AttributeType::String, "Name of the rule group"),
                    "firewall_policy_name" => Attribute::required(AttributeType::String, "Firewall policy holding the rule group"),
                    "resource_group_name" => Attribute::required(AttributeType::String, "Resource group of the firewall policy"),
                    "priority" => Attribute::optional(AttributeType::Number, "Priority of the rule group, between 100 and 65000"),
                },
                blocks: map! {
                    "filter_rule" => NestedBlock::List(Block {
                        attributes: map! {
                            "name" => Attribute::optional(AttributeType::String, "Name of the rule"),
                            "priority" => Attribute::optional(AttributeType::Number, "Priority of the rule, between 100 and 65000"),
                            "action_type" => Attribute::required(AttributeType::String, "`Allow` or `Deny`"),
                        },
                        blocks: condition_blocks(),
                        description: Description::plain("Rule filtering traffic"),
                        ..Default::default()
                    }),
                    "nat_rule" => NestedBlock::List(Block {
                        attributes: map! {
                            "name" => Attribute::optional(AttributeType::String, "Name of the rule"),
                            "priority" => Attribute::optional(AttributeType::Number, "Priority of the rule, between 100 and 65000"),
                            "action_type" => Attribute::optional(AttributeType::String, "Action of the rule, `DNAT` if not set"),
                            "translated_address" => Attribute::required(AttributeType::String, "Address the traffic is translated to"),
                            "translated_port" => Attribute::required(AttributeType::String, "Port the traffic is translated to"),
                        },
                        blocks: condition_blocks(),
                        description: Description::plain("Rule translating traffic, with a single condition"),
                        ..Default::default()
                    }),
                    "timeouts" => NestedBlock::Optional(TimeoutsState::block()),
                },
                description: Description::plain("Rule group of an Azure firewall policy"),
                deprecated: false,
            },
        }
    }
}

impl ManagedState for FirewallPolicyRuleGroupState {
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

/// Condition blocks of a rule
struct Conditions<'a> {
    application: &'a ValueList<Value<ApplicationConditionState>>,
    nat: &'a ValueList<Value<NatConditionState>>,
    network: &'a ValueList<Value<NetworkConditionState>>,
}

impl<'a> Conditions<'a> {
    /// Number of condition blocks, if all lists are known
    fn count(&self) -> Option<usize> {
        Some(
            self.application.as_ref_option()?.len()
                + self.nat.as_ref_option()?.len()
                + self.network.as_ref_option()?.len(),
        )
    }

    /// Conditions in the order application, NAT, network
    fn expand(&self, path: &AttributePath) -> Result<Vec<RuleCondition>, Error> {
        let mut conditions = Vec::new();
        for (i, condition) in self.application.known_items() {
            let path = path
                .clone()
                .attribute("application_condition")
                .index(i as i64);
            conditions.push(RuleCondition::ApplicationRuleCondition(
                expand_application_condition(condition, path)?,
            ));
        }
        for (_, condition) in self.nat.known_items() {
            conditions.push(RuleCondition::NatRuleCondition(NatRuleCondition {
                name: non_empty(&condition.name),
                destination_addresses: condition.destination_addresses.strings(),
                destination_ports: condition.destination_ports.strings(),
                ip_protocols: condition.ip_protocols.strings(),
                source_addresses: condition.source_addresses.strings(),
                source_ip_groups: condition.source_ip_groups.strings(),
            }));
        }
        for (_, condition) in self.network.known_items() {
            conditions.push(RuleCondition::NetworkRuleCondition(NetworkRuleCondition {
                name: non_empty(&condition.name),
                destination_addresses: condition.destination_addresses.strings(),
                destination_ip_groups: condition.destination_ip_groups.strings(),
                destination_ports: condition.destination_ports.strings(),
                ip_protocols: condition.ip_protocols.strings(),
                source_addresses: condition.source_addresses.strings(),
                source_ip_groups: condition.source_ip_groups.strings(),
            }));
        }
        Ok(conditions)
    }
}

fn expand_application_condition(
    condition: &ApplicationConditionState,
    path: AttributePath,
) -> Result<ApplicationRuleCondition, Error> {
    let mut protocols = Vec::new();
    for (i, protocol) in condition.protocols.known_items() {
        let path = path.clone().attribute("protocols").index(i as i64);
        check_one_of(
            &protocol.protocol_type,
            APPLICATION_PROTOCOLS,
            path.clone().attribute("type"),
            "type",
        )?;
        check_range(&protocol.port, PORTS, path.attribute("port"), "port")?;
        protocols.push(ApplicationProtocol {
            protocol_type: protocol.protocol_type.as_str().to_owned(),
            port: protocol.port.as_ref_option().copied(),
        });
    }

    Ok(ApplicationRuleCondition {
        name: non_empty(&condition.name),
        destination_addresses: condition.destination_addresses.strings(),
        fqdn_tags: condition.fqdn_tags.strings(),
        protocols,
        source_addresses: condition.source_addresses.strings(),
        source_ip_groups: condition.source_ip_groups.strings(),
        target_fqdns: condition.target_fqdns.strings(),
    })
}

fn expand_filter_rule(
    rule: &FilterRuleState,
    path: AttributePath,
) -> Result<FirewallPolicyFilterRule, Error> {
    check_range(
        &rule.priority,
        PRIORITIES,
        path.clone().attribute("priority"),
        "priority",
    )?;
    check_one_of(
        &rule.action_type,
        FILTER_ACTIONS,
        path.clone().attribute("action_type"),
        "action_type",
    )?;
    let conditions = Conditions {
        application: &rule.application_condition,
        nat: &rule.nat_condition,
        network: &rule.network_condition,
    };

    Ok(FirewallPolicyFilterRule {
        name: non_empty(&rule.name),
        priority: positive(&rule.priority),
        action: non_empty(&rule.action_type).map(|action_type| RuleAction { action_type }),
        rule_conditions: conditions.expand(&path)?,
    })
}

fn expand_nat_rule(rule: &NatRuleState, path: AttributePath) -> Result<FirewallPolicyNatRule, Error> {
    check_range(
        &rule.priority,
        PRIORITIES,
        path.clone().attribute("priority"),
        "priority",
    )?;
    check_one_of(
        &rule.action_type,
        NAT_ACTIONS,
        path.clone().attribute("action_type"),
        "action_type",
    )?;
    let conditions = Conditions {
        application: &rule.application_condition,
        nat: &rule.nat_condition,
        network: &rule.network_condition,
    };
    if conditions.count().is_some_and(|count| count != 1) {
        return Err(Error::validation(
            "Only a single condition is allowed for NAT rules.",
            path,
        ));
    }
    let action_type =
        non_empty(&rule.action_type).unwrap_or_else(|| DEFAULT_NAT_ACTION.to_owned());

    Ok(FirewallPolicyNatRule {
        name: non_empty(&rule.name),
        priority: positive(&rule.priority),
        action: Some(RuleAction { action_type }),
        translated_address: non_empty(&rule.translated_address),
        translated_port: non_empty(&rule.translated_port),
        rule_condition: conditions.expand(&path)?.pop(),
    })
}

/// Build the rule group document, filter rules first
fn expand_rule_group(
    id: &FirewallPolicyRuleGroupId,
    state: &FirewallPolicyRuleGroupState,
) -> Result<FirewallPolicyRuleGroup, Error> {
    check_range(
        &state.priority,
        PRIORITIES,
        AttributePath::new("priority"),
        "priority",
    )?;

    let mut rules = Vec::new();
    for (i, rule) in state.filter_rule.known_items() {
        let path = AttributePath::new("filter_rule").index(i as i64);
        rules.push(FirewallPolicyRule::FirewallPolicyFilterRule(
            expand_filter_rule(rule, path)?,
        ));
    }
    for (i, rule) in state.nat_rule.known_items() {
        let path = AttributePath::new("nat_rule").index(i as i64);
        rules.push(FirewallPolicyRule::FirewallPolicyNatRule(expand_nat_rule(
            rule, path,
        )?));
    }

    Ok(FirewallPolicyRuleGroup {
        id: None,
        name: id.name.clone(),
        properties: FirewallPolicyRuleGroupProperties {
            priority: positive(&state.priority),
            rules,
            provisioning_state: None,
        },
    })
}

/// Block at `index` in `previous`, or an empty one
fn nth<T: Clone + Default>(previous: &ValueList<Value<T>>, index: usize) -> T {
    previous
        .as_ref_option()
        .and_then(|items| items.get(index))
        .and_then(Value::as_ref_option)
        .cloned()
        .unwrap_or_default()
}

/// Condition blocks read back from the service
#[derive(Default)]
struct FlatConditions {
    application: Vec<Value<ApplicationConditionState>>,
    nat: Vec<Value<NatConditionState>>,
    network: Vec<Value<NetworkConditionState>>,
}

impl FlatConditions {
    fn new(conditions: impl IntoIterator<Item = RuleCondition>, previous: Conditions<'_>) -> Self {
        let mut flat = Self::default();
        for condition in conditions {
            match condition {
                RuleCondition::ApplicationRuleCondition(condition) => {
                    let previous = nth(previous.application, flat.application.len());
                    flat.application
                        .push(Value::Value(flatten_application_condition(condition, &previous)));
                }
                RuleCondition::NatRuleCondition(condition) => {
                    let previous = nth(previous.nat, flat.nat.len());
                    flat.nat.push(Value::Value(NatConditionState {
                        name: optional(condition.name, &previous.name),
                        destination_addresses: string_list(
                            condition.destination_addresses,
                            &previous.destination_addresses,
                        ),
                        destination_ports: string_list(
                            condition.destination_ports,
                            &previous.destination_ports,
                        ),
                        ip_protocols: string_list(condition.ip_protocols, &previous.ip_protocols),
                        source_addresses: string_list(
                            condition.source_addresses,
                            &previous.source_addresses,
                        ),
                        source_ip_groups: string_list(
                            condition.source_ip_groups,
                            &previous.source_ip_groups,
                        ),
                    }));
                }
                RuleCondition::NetworkRuleCondition(condition) => {
                    let previous = nth(previous.network, flat.network.len());
                    flat.network.push(Value::Value(NetworkConditionState {
                        name: optional(condition.name, &previous.name),
                        destination_addresses: string_list(
                            condition.destination_addresses,
                            &previous.destination_addresses,
                        ),
                        destination_ip_groups: string_list(
                            condition.destination_ip_groups,
                            &previous.destination_ip_groups,
                        ),
                        destination_ports: string_list(
                            condition.destination_ports,
                            &previous.destination_ports,
                        ),
                        ip_protocols: string_list(condition.ip_protocols, &previous.ip_protocols),
                        source_addresses: string_list(
                            condition.source_addresses,
                            &previous.source_addresses,
                        ),
                        source_ip_groups: string_list(
                            condition.source_ip_groups,
                            &previous.source_ip_groups,
                        ),
                    }));
                }
            }
        }
        flat
    }
}

fn flatten_application_condition(
    condition: ApplicationRuleCondition,
    previous: &ApplicationConditionState,
) -> ApplicationConditionState {
    let protocols = condition
        .protocols
        .into_iter()
        .map(|protocol| {
            Value::Value(ProtocolState {
                protocol_type: protocol.protocol_type.into(),
                port: protocol.port.into(),
            })
        })
        .collect();

    ApplicationConditionState {
        name: optional(condition.name, &previous.name),
        destination_addresses: string_list(
            condition.destination_addresses,
            &previous.destination_addresses,
        ),
        fqdn_tags: string_list(condition.fqdn_tags, &previous.fqdn_tags),
        protocols: Value::Value(protocols),
        source_addresses: string_list(condition.source_addresses, &previous.source_addresses),
        source_ip_groups: string_list(condition.source_ip_groups, &previous.source_ip_groups),
        target_fqdns: string_list(condition.target_fqdns, &previous.target_fqdns),
    }
}

/// Build the rule group state from the remote document
///
/// Blocks without a name are matched with `previous` by position.
fn flatten_rule_group(
    id: &FirewallPolicyRuleGroupId,
    model: FirewallPolicyRuleGroup,
    previous: &FirewallPolicyRuleGroupState,
) -> FirewallPolicyRuleGroupState {
    let properties = model.properties;
    let mut filter_rules = Vec::new();
    let mut nat_rules = Vec::new();

    for rule in properties.rules {
        match rule {
            FirewallPolicyRule::FirewallPolicyFilterRule(rule) => {
                let previous = nth(&previous.filter_rule, filter_rules.len());
                let conditions = FlatConditions::new(
                    rule.rule_conditions,
                    Conditions {
                        application: &previous.application_condition,
                        nat: &previous.nat_condition,
                        network: &previous.network_condition,
                    },
                );
                filter_rules.push(Value::Value(FilterRuleState {
                    name: optional(rule.name, &previous.name),
                    priority: optional(rule.priority, &previous.priority),
                    action_type: rule.action.map(|action| action.action_type).into(),
                    application_condition: Value::Value(conditions.application),
                    nat_condition: Value::Value(conditions.nat),
                    network_condition: Value::Value(conditions.network),
                }));
            }
            FirewallPolicyRule::FirewallPolicyNatRule(rule) => {
                let previous = nth(&previous.nat_rule, nat_rules.len());
                let conditions = FlatConditions::new(
                    rule.rule_condition,
                    Conditions {
                        application: &previous.application_condition,
                        nat: &previous.nat_condition,
                        network: &previous.network_condition,
                    },
                );
                let action_type = match rule.action {
                    Some(action)
                        if action.action_type != DEFAULT_NAT_ACTION
                            || previous.action_type.is_value() =>
                    {
                        action.action_type.into()
                    }
                    _ => Value::Null,
                };
                nat_rules.push(Value::Value(NatRuleState {
                    name: optional(rule.name, &previous.name),
                    priority: optional(rule.priority, &previous.priority),
                    action_type,
                    translated_address: rule.translated_address.into(),
                    translated_port: rule.translated_port.into(),
                    application_condition: Value::Value(conditions.application),
                    nat_condition: Value::Value(conditions.nat),
                    network_condition: Value::Value(conditions.network),
                }));
            }
        }
    }

    FirewallPolicyRuleGroupState {
        id: id.id().into(),
        name: id.name.clone().into(),
        firewall_policy_name: id.firewall_policy.clone().into(),
        resource_group_name: id.resource_group.clone().into(),
        priority: optional(properties.priority, &previous.priority),
        filter_rule: Value::Value(filter_rules),
        nat_rule: Value::Value(nat_rules),
        timeouts: previous.timeouts.clone(),
    }
}

/// Lifecycle of a firewall policy rule group
#[derive(Clone)]
pub struct FirewallPolicyRuleGroupStrategy {
    client: FirewallPolicyRuleGroupsClient,
}

impl FirewallPolicyRuleGroupStrategy {
    pub fn new(client: FirewallPolicyRuleGroupsClient) -> Self {
        Self { client }
    }
}

impl ResourceStrategy for FirewallPolicyRuleGroupStrategy {
    type Id = FirewallPolicyRuleGroupId;
    type Model = FirewallPolicyRuleGroup;
    type State = FirewallPolicyRuleGroupState;

    const TYPE_NAME: &'static str = TYPE_NAME;
    const TIMEOUTS: OperationTimeouts = OperationTimeouts::minutes(90, 5, 90, 90);
    const FORCE_NEW: &'static [&'static str] =
        &["name", "firewall_policy_name", "resource_group_name"];

    fn client(&self) -> Arc<dyn ResourceClient<FirewallPolicyRuleGroupId, FirewallPolicyRuleGroup>> {
        self.client.clone()
    }

    fn id_from_config(
        &self,
        ctx: &ProviderContext,
        state: &FirewallPolicyRuleGroupState,
    ) -> Result<FirewallPolicyRuleGroupId, Error> {
        Ok(FirewallPolicyRuleGroupId::new(
            ctx.subscription_id()?,
            state.resource_group_name.as_str(),
            state.firewall_policy_name.as_str(),
            state.name.as_str(),
        ))
    }

    fn lock_keys(&self, id: &FirewallPolicyRuleGroupId) -> Vec<(String, &'static str)> {
        vec![
            (id.firewall_policy.clone(), FIREWALL_POLICY_TYPE_NAME),
            (id.name.clone(), TYPE_NAME),
        ]
    }

    fn expand(
        &self,
        id: &FirewallPolicyRuleGroupId,
        state: &FirewallPolicyRuleGroupState,
    ) -> Result<FirewallPolicyRuleGroup, Error> {
        expand_rule_group(id, state)
    }

    fn flatten(
        &self,
        id: &FirewallPolicyRuleGroupId,
        model: FirewallPolicyRuleGroup,
        previous: &FirewallPolicyRuleGroupState,
    ) -> Result<FirewallPolicyRuleGroupState, Error> {
        Ok(flatten_rule_group(id, model, previous))
    }

    /// The service answers 400 instead of 404 for a missing rule group
    fn is_absent_before_create(&self, err: &ApiError) -> bool {
        err.was_not_found() || err.was_status(400)
    }
}
