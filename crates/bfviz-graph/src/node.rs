//! Vertex labels.

use std::borrow::Borrow;
use std::fmt;

/// Label of a vertex.
///
/// Labels are case sensitive text. Integer labels convert to their decimal
/// form, so a graph built from numbers and one built from the same digits as
/// strings are identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeName(String);

impl NodeName {
    /// Create a label from any text.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for NodeName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&NodeName> for NodeName {
    fn from(name: &NodeName) -> Self {
        name.clone()
    }
}

macro_rules! node_name_from_int {
    ($($int:ty),*) => {
        $(
            impl From<$int> for NodeName {
                fn from(id: $int) -> Self {
                    Self(id.to_string())
                }
            }
        )*
    };
}

node_name_from_int!(i32, i64, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn integer_and_text_labels_agree() {
        assert_eq!(NodeName::from(42), NodeName::from("42"));
        assert_eq!(NodeName::from(7u64).as_str(), "7");
    }

    #[test]
    fn lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(NodeName::from("A"), 1);
        assert_eq!(map.get("A"), Some(&1));
        assert_eq!(map.get("a"), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&NodeName::from(3)).unwrap();
        assert_eq!(json, "\"3\"");
    }
}
