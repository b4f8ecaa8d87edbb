//! Recursive transformation of nested data.
//!
//! Nested values are modelled as a [`Node`]: either a mapping, a sequence or
//! a leaf. [`Node::map_leaves`] rebuilds the tree with a function applied to
//! every leaf, keeping every key and the order of every sequence.
//!
//! ```
//! use latexbuild_core::transform::Node;
//!
//! let node: Node<String> = serde_json::from_str(r#"{"title": "draft", "authors": ["a", "b"]}"#)?;
//! let upper = node.map_leaves(|s| s.to_uppercase());
//! assert_eq!(
//!     serde_json::to_string(&upper)?,
//!     r#"{"authors":["A","B"],"title":"DRAFT"}"#
//! );
//! # Ok::<(), serde_json::Error>(())
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A nested structure of mappings and sequences with `T` at the leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node<T> {
    Mapping(BTreeMap<String, Node<T>>),
    Sequence(Vec<Node<T>>),
    Leaf(T),
}

impl<T> Node<T> {
    /// Applies `f` to every leaf, preserving the shape of the tree.
    pub fn map_leaves<U, F>(self, mut f: F) -> Node<U>
    where
        F: FnMut(T) -> U,
    {
        self.map_with(&mut f)
    }

    fn map_with<U, F>(self, f: &mut F) -> Node<U>
    where
        F: FnMut(T) -> U,
    {
        match self {
            Node::Mapping(map) => Node::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, value.map_with(f)))
                    .collect(),
            ),
            Node::Sequence(items) => {
                Node::Sequence(items.into_iter().map(|item| item.map_with(f)).collect())
            }
            Node::Leaf(value) => Node::Leaf(f(value)),
        }
    }

    /// Number of leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Mapping(map) => map.values().map(Node::leaf_count).sum(),
            Node::Sequence(items) => items.iter().map(Node::leaf_count).sum(),
            Node::Leaf(_) => 1,
        }
    }
}

/// Applies `f` to every non-container value inside `value`.
///
/// Objects and arrays are rebuilt with their keys and order intact; every
/// other JSON value (including `null`) is a leaf.
pub fn apply_recursively<F>(value: Value, mut f: F) -> Value
where
    F: FnMut(Value) -> Value,
{
    apply_with(value, &mut f)
}

fn apply_with<F>(value: Value, f: &mut F) -> Value
where
    F: FnMut(Value) -> Value,
{
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, apply_with(value, f)))
                .collect(),
        ),
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|item| apply_with(item, f)).collect())
        }
        leaf => f(leaf),
    }
}
