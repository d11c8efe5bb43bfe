//! Hierarchical key/value state used to persist tab order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Kind of the child element storing one part.
pub const TAG_PART: &str = "part";
/// Attribute holding a serialized part id.
pub const TAG_ID: &str = "id";
/// Kind of the root element of a saved presentation.
pub const TAG_PRESENTATION: &str = "presentation";

/// A node of a saved-state tree: a kind, string attributes and ordered
/// children.
pub trait Memento {
    fn kind(&self) -> &str;

    /// Append a child of the given kind and return it.
    fn create_child(&mut self, kind: &str) -> &mut dyn Memento;

    /// Children of the given kind in insertion order.
    fn children(&self, kind: &str) -> Vec<&dyn Memento>;

    fn put_string(&mut self, key: &str, value: &str);

    fn get_string(&self, key: &str) -> Option<&str>;
}

/// [`Memento`] backed by `serde_json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonMemento {
    kind: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<JsonMemento>,
}

impl JsonMemento {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Memento for JsonMemento {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn create_child(&mut self, kind: &str) -> &mut dyn Memento {
        self.children.push(JsonMemento::new(kind));
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    fn children(&self, kind: &str) -> Vec<&dyn Memento> {
        self.children
            .iter()
            .filter(|child| child.kind == kind)
            .map(|child| child as &dyn Memento)
            .collect()
    }

    fn put_string(&mut self, key: &str, value: &str) {
        self.attributes.insert(key.to_owned(), value.to_owned());
    }

    fn get_string(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_are_filtered_by_kind_in_order() {
        let mut root = JsonMemento::new(TAG_PRESENTATION);
        root.create_child(TAG_PART).put_string(TAG_ID, "a");
        root.create_child("other");
        root.create_child(TAG_PART).put_string(TAG_ID, "b");

        let ids: Vec<_> = root
            .children(TAG_PART)
            .iter()
            .filter_map(|child| child.get_string(TAG_ID))
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn json_keeps_structure() {
        let mut root = JsonMemento::new(TAG_PRESENTATION);
        root.create_child(TAG_PART).put_string(TAG_ID, "7");

        let json = root.to_json().expect("serialize");
        let restored = JsonMemento::from_json(&json).expect("deserialize");
        assert_eq!(restored, root);
    }

    #[test]
    fn malformed_json_is_a_memento_error() {
        let err = JsonMemento::from_json("{ not json").unwrap_err();
        assert!(matches!(err, crate::StackError::Memento(_)));
    }
}
