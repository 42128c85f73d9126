//! Helpers shared by the network resources

use std::ops::RangeInclusive;

use crate::{
    attribute_path::AttributePath,
    error::Error,
    ids::{ApplicationGatewayId, SubResourceId, SubResourceKind},
    models::SubResource,
    value::{Value, ValueBool, ValueList, ValueNumber, ValueString},
};

/// Presence of an optional attribute in a configuration
///
/// Zero values (empty string, `0`, `false`, empty list) count as unset.
pub(crate) trait Presence {
    /// The attribute is known and not zero
    fn is_set(&self) -> bool;
    fn is_unknown_value(&self) -> bool;

    /// The attribute is set, or will be once known
    fn may_be_set(&self) -> bool {
        self.is_set() || self.is_unknown_value()
    }
}

impl Presence for ValueString {
    fn is_set(&self) -> bool {
        self.non_empty().is_some()
    }
    fn is_unknown_value(&self) -> bool {
        self.is_unknown()
    }
}

impl Presence for ValueBool {
    fn is_set(&self) -> bool {
        matches!(self, Value::Value(true))
    }
    fn is_unknown_value(&self) -> bool {
        self.is_unknown()
    }
}

impl Presence for ValueNumber {
    fn is_set(&self) -> bool {
        matches!(self, Value::Value(n) if *n != 0)
    }
    fn is_unknown_value(&self) -> bool {
        self.is_unknown()
    }
}

impl<T> Presence for ValueList<T> {
    fn is_set(&self) -> bool {
        matches!(self, Value::Value(items) if !items.is_empty())
    }
    fn is_unknown_value(&self) -> bool {
        self.is_unknown()
    }
}

/// Both attributes are set
///
/// Unknown values never conflict.
pub(crate) fn conflict(a: &dyn Presence, b: &dyn Presence) -> bool {
    a.is_set() && b.is_set()
}

/// Neither attribute is set, nor can be once known
pub(crate) fn none_of(a: &dyn Presence, b: &dyn Presence) -> bool {
    !a.may_be_set() && !b.may_be_set()
}

/// Block identified by its `name`
pub(crate) trait NamedBlock {
    fn name(&self) -> &ValueString;
}

/// Block of `previous` with exactly the same name
pub(crate) fn find_previous<'a, T: NamedBlock>(
    previous: &'a ValueList<Value<T>>,
    name: &str,
) -> Option<&'a T> {
    previous
        .known_items()
        .map(|(_, block)| block)
        .find(|block| block.name().as_str() == name)
}

/// Optional attribute read back from the service
///
/// A zero value is rendered as null, unless the previous state explicitly held zero.
pub(crate) fn optional<T: Default + PartialEq>(remote: Option<T>, previous: &Value<T>) -> Value<T> {
    match remote {
        Some(value) if value != T::default() => Value::Value(value),
        _ => match previous {
            Value::Value(previous) if *previous == T::default() => Value::Value(T::default()),
            _ => Value::Null,
        },
    }
}

/// Optional list of strings read back from the service
pub(crate) fn string_list(
    remote: Vec<String>,
    previous: &ValueList<ValueString>,
) -> ValueList<ValueString> {
    if remote.is_empty() && !previous.is_value() {
        Value::Null
    } else {
        Value::Value(remote.into_iter().map(Value::Value).collect())
    }
}

fn normalize_location(location: &str) -> String {
    location
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Location read back from the service
///
/// The service normalizes locations (`West Europe` becomes `westeurope`): the previous
/// spelling is kept when both designate the same region.
pub(crate) fn location(remote: String, previous: &ValueString) -> ValueString {
    match previous.non_empty() {
        Some(spelling) if normalize_location(spelling) == normalize_location(&remote) => {
            previous.clone()
        }
        _ => remote.into(),
    }
}

/// Reference to the child `name` of `gateway`, if a name is configured
pub(crate) fn sub_resource(
    gateway: &ApplicationGatewayId,
    kind: SubResourceKind,
    name: &ValueString,
) -> Option<SubResource> {
    name.non_empty()
        .map(|name| SubResource::new(kind.format(gateway, name)))
}

/// References to the children `names` of `gateway`
pub(crate) fn sub_resources(
    gateway: &ApplicationGatewayId,
    kind: SubResourceKind,
    names: impl IntoIterator<Item = String>,
) -> Vec<SubResource> {
    names
        .into_iter()
        .filter(|name| !name.is_empty())
        .map(|name| SubResource::new(kind.format(gateway, &name)))
        .collect()
}

/// Name and canonical ID of a child referenced by the service
///
/// Both are null without reference.
pub(crate) fn reference(
    reference: Option<&SubResource>,
    kind: SubResourceKind,
) -> Result<(ValueString, ValueString), Error> {
    match reference {
        Some(reference) if !reference.id.is_empty() => {
            let id = SubResourceId::parse_insensitively(&reference.id, kind)?;
            Ok((id.name.clone().into(), id.id().into()))
        }
        _ => Ok((Value::Null, Value::Null)),
    }
}

/// ID of a remote object, null when empty
pub(crate) fn optional_id(reference: Option<&SubResource>) -> ValueString {
    match reference {
        Some(reference) if !reference.id.is_empty() => reference.id.clone().into(),
        _ => Value::Null,
    }
}

/// Positive number, or nothing
pub(crate) fn positive(value: &ValueNumber) -> Option<i64> {
    value.as_ref_option().copied().filter(|value| *value > 0)
}

/// Non-empty string, or nothing
pub(crate) fn non_empty(value: &ValueString) -> Option<String> {
    value.non_empty().map(str::to_owned)
}

/// Known boolean, or nothing
pub(crate) fn known_bool(value: &ValueBool) -> Option<bool> {
    value.as_ref_option().copied()
}

/// Number within `range`, zero counting as unset
pub(crate) fn check_range(
    value: &ValueNumber,
    range: RangeInclusive<i64>,
    attribute: AttributePath,
    name: &str,
) -> Result<(), Error> {
    match value {
        Value::Value(n) if *n != 0 && !range.contains(n) => Err(Error::validation(
            format!(
                "expected {name} to be in the range ({} - {}), got {n}",
                range.start(),
                range.end()
            ),
            attribute,
        )),
        _ => Ok(()),
    }
}

/// String among `allowed`
pub(crate) fn check_one_of(
    value: &ValueString,
    allowed: &[&str],
    attribute: AttributePath,
    name: &str,
) -> Result<(), Error> {
    match value {
        Value::Value(value) if !allowed.contains(&value.as_str()) => Err(Error::validation(
            format!("expected {name} to be one of {allowed:?}, got {value}"),
            attribute,
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_never_conflicts() {
        let set = ValueString::from("x");
        let unknown = ValueString::Unknown;
        assert!(conflict(&set, &ValueBool::Value(true)));
        assert!(!conflict(&set, &ValueBool::Value(false)));
        assert!(!conflict(&set, &unknown));
        assert!(!none_of(&ValueString::Null, &unknown));
        assert!(none_of(&ValueString::from(""), &ValueNumber::Value(0)));
    }

    #[test]
    fn zero_or_previous() {
        assert_eq!(optional(Some(0), &Value::Null), Value::Null);
        assert_eq!(optional(Some(0), &Value::Value(0)), Value::Value(0));
        assert_eq!(optional(None, &Value::Value(5)), Value::Null);
        assert_eq!(optional(Some(5), &Value::Null), Value::Value(5));
        assert_eq!(
            optional(Some(String::new()), &Value::Unknown),
            ValueString::Null
        );
    }

    #[test]
    fn location_spelling_is_kept() {
        let previous = ValueString::from("West Europe");
        assert_eq!(location("westeurope".into(), &previous), previous);
        assert_eq!(
            location("northeurope".into(), &previous),
            ValueString::from("northeurope")
        );
        assert_eq!(
            location("westeurope".into(), &Value::Null),
            ValueString::from("westeurope")
        );
    }

    #[test]
    fn empty_lists_keep_previous_shape() {
        assert_eq!(string_list(Vec::new(), &Value::Null), Value::Null);
        assert_eq!(
            string_list(Vec::new(), &Value::Value(Vec::new())),
            Value::Value(Vec::new())
        );
    }

    #[test]
    fn references_are_canonical() {
        let gateway = ApplicationGatewayId::new("sub", "rg", "gw");
        let lowered = SubResource::new(
            "/subscriptions/sub/resourcegroups/rg/providers/microsoft.network/applicationgateways/gw/probes/Probe1",
        );
        let (name, id) = reference(Some(&lowered), SubResourceKind::Probes).unwrap();
        assert_eq!(name, ValueString::from("Probe1"));
        assert_eq!(
            id,
            ValueString::from(SubResourceKind::Probes.format(&gateway, "Probe1"))
        );
        assert_eq!(
            reference(None, SubResourceKind::Probes).unwrap(),
            (Value::Null, Value::Null)
        );
    }
}
