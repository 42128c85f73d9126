use serde::{Deserialize, Serialize};

/// `Microsoft.Network/firewallPolicies/ruleGroups` document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirewallPolicyRuleGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub properties: FirewallPolicyRuleGroupProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FirewallPolicyRuleGroupProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    pub rules: Vec<FirewallPolicyRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
}

/// Rule of a rule group, discriminated by `ruleType`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "ruleType")]
pub enum FirewallPolicyRule {
    FirewallPolicyFilterRule(FirewallPolicyFilterRule),
    FirewallPolicyNatRule(FirewallPolicyNatRule),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FirewallPolicyFilterRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<RuleAction>,
    pub rule_conditions: Vec<RuleCondition>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FirewallPolicyNatRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<RuleAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_condition: Option<RuleCondition>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleAction {
    #[serde(rename = "type", default)]
    pub action_type: String,
}

/// Condition of a rule, discriminated by `ruleConditionType`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "ruleConditionType")]
pub enum RuleCondition {
    ApplicationRuleCondition(ApplicationRuleCondition),
    NatRuleCondition(NatRuleCondition),
    NetworkRuleCondition(NetworkRuleCondition),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationRuleCondition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub destination_addresses: Vec<String>,
    pub fqdn_tags: Vec<String>,
    pub protocols: Vec<ApplicationProtocol>,
    pub source_addresses: Vec<String>,
    #[serde(rename = "sourceIpGroups")]
    pub source_ip_groups: Vec<String>,
    pub target_fqdns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationProtocol {
    pub protocol_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NatRuleCondition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub destination_addresses: Vec<String>,
    pub destination_ports: Vec<String>,
    #[serde(rename = "ipProtocols")]
    pub ip_protocols: Vec<String>,
    pub source_addresses: Vec<String>,
    #[serde(rename = "sourceIpGroups")]
    pub source_ip_groups: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkRuleCondition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub destination_addresses: Vec<String>,
    #[serde(rename = "destinationIpGroups")]
    pub destination_ip_groups: Vec<String>,
    pub destination_ports: Vec<String>,
    #[serde(rename = "ipProtocols")]
    pub ip_protocols: Vec<String>,
    pub source_addresses: Vec<String>,
    #[serde(rename = "sourceIpGroups")]
    pub source_ip_groups: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminated_rules() {
        let group: FirewallPolicyRuleGroup = serde_json::from_value(serde_json::json!({
            "name": "group1",
            "properties": {
                "priority": 200,
                "rules": [
                    {
                        "ruleType": "FirewallPolicyNatRule",
                        "name": "dnat",
                        "action": {"type": "DNAT"},
                        "translatedAddress": "10.0.0.5",
                        "translatedPort": "8080",
                        "ruleCondition": {
                            "ruleConditionType": "NatRuleCondition",
                            "ipProtocols": ["TCP"],
                            "destinationPorts": ["80"]
                        }
                    },
                    {
                        "ruleType": "FirewallPolicyFilterRule",
                        "priority": 300,
                        "ruleConditions": [
                            {"ruleConditionType": "NetworkRuleCondition", "sourceAddresses": ["*"]}
                        ]
                    }
                ]
            }
        }))
        .unwrap();

        let rules = &group.properties.rules;
        let FirewallPolicyRule::FirewallPolicyNatRule(nat) = &rules[0] else {
            panic!("expected a NAT rule, got {:?}", rules[0]);
        };
        assert_eq!(nat.translated_port.as_deref(), Some("8080"));
        assert!(matches!(
            nat.rule_condition,
            Some(RuleCondition::NatRuleCondition(_))
        ));
        let FirewallPolicyRule::FirewallPolicyFilterRule(filter) = &rules[1] else {
            panic!("expected a filter rule, got {:?}", rules[1]);
        };
        assert_eq!(filter.priority, Some(300));
        assert_eq!(filter.action, None);

        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(json["properties"]["rules"][0]["ruleType"], "FirewallPolicyNatRule");
        assert_eq!(
            json["properties"]["rules"][1]["ruleConditions"][0]["ruleConditionType"],
            "NetworkRuleCondition"
        );
    }
}
