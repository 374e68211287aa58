//! Tree nodes and the lookup / lookup-or-create walks over a sibling list.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One named key in the hierarchy.
///
/// A node's `value` is `None` while it only exists as the container of
/// deeper keys; it becomes `Some` once a value is set or loaded for it,
/// even if that value is the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    key: String,
    #[cfg_attr(feature = "serde", serde(default))]
    value: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            skip_serializing_if = "Vec::is_empty",
            deserialize_with = "unique_siblings"
        )
    )]
    children: Vec<Node>,
}

impl Node {
    /// Create a node with no value and no children.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
            children: Vec::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Look up a direct child by key.
    pub fn child(&self, key: &str) -> Option<&Node> {
        find(&self.children, key)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }
}

/// The first key that appears more than once among `nodes`.
#[cfg(any(feature = "serde", test))]
fn duplicate_key(nodes: &[Node]) -> Option<&str> {
    let mut seen = std::collections::HashSet::new();
    nodes
        .iter()
        .map(Node::key)
        .find(|key| !seen.insert(*key))
}

/// Deserialize a sibling list, rejecting repeated keys.
#[cfg(feature = "serde")]
pub(crate) fn unique_siblings<'de, D>(deserializer: D) -> Result<Vec<Node>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error as _;

    let nodes = Vec::<Node>::deserialize(deserializer)?;
    if let Some(key) = duplicate_key(&nodes) {
        return Err(D::Error::custom(format!("duplicate sibling key `{}`", key)));
    }
    Ok(nodes)
}

/// Find a node by exact key among siblings.
pub(crate) fn find<'a>(nodes: &'a [Node], key: &str) -> Option<&'a Node> {
    nodes.iter().find(|n| n.key == key)
}

/// Index of the sibling with `key`, appending a new node if absent.
pub(crate) fn position_or_insert(nodes: &mut Vec<Node>, key: &str) -> usize {
    match nodes.iter().position(|n| n.key == key) {
        Some(index) => index,
        None => {
            nodes.push(Node::new(key));
            nodes.len() - 1
        }
    }
}

/// Find a node by exact key among siblings, appending a new one if absent.
pub(crate) fn find_or_insert<'a>(nodes: &'a mut Vec<Node>, key: &str) -> &'a mut Node {
    let index = position_or_insert(nodes, key);
    &mut nodes[index]
}

/// Walk existing nodes along `path`. Never creates anything.
///
/// Returns `None` for an empty path or when any segment is missing.
pub(crate) fn descend<'a, S: AsRef<str>>(nodes: &'a [Node], path: &[S]) -> Option<&'a Node> {
    let (first, rest) = path.split_first()?;
    let mut node = find(nodes, first.as_ref())?;
    for segment in rest {
        node = find(&node.children, segment.as_ref())?;
    }
    Some(node)
}

/// Walk along `path`, creating every missing segment as an empty node.
///
/// Returns `None` only for an empty path.
pub(crate) fn descend_or_create<'a, S: AsRef<str>>(
    nodes: &'a mut Vec<Node>,
    path: &[S],
) -> Option<&'a mut Node> {
    let (first, rest) = path.split_first()?;
    let mut node = find_or_insert(nodes, first.as_ref());
    for segment in rest {
        node = find_or_insert(&mut node.children, segment.as_ref());
    }
    Some(node)
}
