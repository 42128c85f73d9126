use std::{borrow::Cow, fmt};

/// Location of an attribute inside a resource block, such as `probe[0].match`
///
/// The root path designates the resource itself.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct AttributePath {
    pub steps: Vec<AttributePathStep>,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum AttributePathStep {
    Attribute(Cow<'static, str>),
    Key(Cow<'static, str>),
    Index(i64),
}

impl AttributePath {
    /// Path to a top-level attribute
    pub fn new<T: Into<Cow<'static, str>>>(name: T) -> Self {
        Self::default().attribute(name)
    }

    pub fn attribute<T: Into<Cow<'static, str>>>(self, name: T) -> Self {
        self.step(AttributePathStep::Attribute(name.into()))
    }

    /// Entry of a map attribute, like `tags`
    pub fn key<T: Into<Cow<'static, str>>>(self, key: T) -> Self {
        self.step(AttributePathStep::Key(key.into()))
    }

    /// Element of a list of blocks
    pub fn index<T: Into<i64>>(self, idx: T) -> Self {
        self.step(AttributePathStep::Index(idx.into()))
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    fn step(mut self, step: AttributePathStep) -> Self {
        self.steps.push(step);
        self
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                AttributePathStep::Attribute(name) if i == 0 => write!(f, "{name}")?,
                AttributePathStep::Attribute(name) => write!(f, ".{name}")?,
                AttributePathStep::Key(key) => write!(f, "[{key:?}]")?,
                AttributePathStep::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_nested_block_path() {
        let path = AttributePath::new("request_routing_rule")
            .index(2)
            .attribute("priority");
        assert_eq!(path.to_string(), "request_routing_rule[2].priority");
    }

    #[test]
    fn display_map_key() {
        let path = AttributePath::new("tags").key("env");
        assert_eq!(path.to_string(), "tags[\"env\"]");
        assert!(!path.is_root());
        assert!(AttributePath::default().is_root());
    }
}
