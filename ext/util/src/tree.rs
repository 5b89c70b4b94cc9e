//! Tree building from a flat list of parent-referencing records.
//!
//! Records are plain objects carrying an id field and a parent-reference
//! field. [`list_to_tree`] links them into a single rooted tree by adding a
//! children array to every record.
//!
//! Failures are explicit: a list without a root, a parent reference that
//! names no record, or a parent chain that never reaches the root is an
//! error, never a silently shortened tree.

use casekit::{Object, Value};
use std::collections::HashMap;

/// Errors from [`list_to_tree`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// No record has a `Null` or `Undefined` parent reference.
    #[error("no root record: every record has a parent reference")]
    MissingRoot,

    /// A parent reference matches no record id.
    #[error("record {id} references missing parent {parent}")]
    DanglingReference {
        /// The referencing record's id, rendered.
        id: String,
        /// The parent reference, rendered.
        parent: String,
    },

    /// A record is not a plain object.
    #[error("record at index {index} is not a plain object")]
    NotAnObject {
        /// Position in the input list.
        index: usize,
    },

    /// Records whose parent chain loops instead of reaching a root.
    #[error("{count} record(s) are not reachable from any root (cyclic parent references)")]
    Unreachable {
        /// How many records are caught in cycles.
        count: usize,
    },
}

/// Field names used by [`list_to_tree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeKeys {
    id: String,
    parent: String,
    children: String,
}

impl TreeKeys {
    /// Name the id field, the parent-reference field, and the children
    /// field that is written to every record.
    pub fn new(
        id: impl Into<String>,
        parent: impl Into<String>,
        children: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            parent: parent.into(),
            children: children.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn parent(&self) -> &str {
        &self.parent
    }

    pub fn children(&self) -> &str {
        &self.children
    }
}

impl Default for TreeKeys {
    fn default() -> Self {
        Self::new("id", "parent", "children")
    }
}

/// Hashable form of a primitive id, equal exactly when the ids are
/// strictly equal.
#[derive(Debug, PartialEq, Eq, Hash)]
enum IdKey {
    Bool(bool),
    Number(u64),
    String(String),
}

impl IdKey {
    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::Bool(*b)),
            // NaN is never strictly equal to anything, so it cannot be referenced.
            Value::Number(n) if n.is_nan() => None,
            Value::Number(n) if *n == 0.0 => Some(Self::Number(0)),
            Value::Number(n) => Some(Self::Number(n.to_bits())),
            Value::String(s) => Some(Self::String(s.clone())),
            _ => None,
        }
    }
}

/// Link `records` into a single tree.
///
/// # Semantics
///
/// - The root is the first record whose parent field is `Null` or
///   `Undefined`. `0`, `false` and `""` are ordinary references. Further
///   root candidates are dropped together with their subtrees, with a
///   warning.
/// - Ids are matched by strict equality. When several records share an id,
///   references resolve to the first of them.
/// - Every record in the result gains a children array (named by
///   [`TreeKeys::children`]) in input order, replacing any existing field
///   of that name.
///
/// # Errors
///
/// - [`TreeError::NotAnObject`] — a record is not a plain object
/// - [`TreeError::MissingRoot`] — no root candidate (including an empty list)
/// - [`TreeError::DanglingReference`] — a parent reference matches no id
/// - [`TreeError::Unreachable`] — some records sit on parent cycles
///
/// # Example
///
/// ```
/// use casekit::Value;
/// use casekit_util::{list_to_tree, TreeKeys};
/// use serde_json::json;
///
/// let records: Vec<Value> = [
///     json!({ "id": 1, "parent": null }),
///     json!({ "id": 2, "parent": 1 }),
///     json!({ "id": 3, "parent": 1 }),
/// ]
/// .into_iter()
/// .map(Value::from)
/// .collect();
///
/// let tree = list_to_tree(&TreeKeys::new("id", "parent", "children"), &records).unwrap();
/// assert_eq!(
///     tree,
///     Value::from(json!({
///         "id": 1, "parent": null,
///         "children": [
///             { "id": 2, "parent": 1, "children": [] },
///             { "id": 3, "parent": 1, "children": [] }
///         ]
///     }))
/// );
/// ```
pub fn list_to_tree(keys: &TreeKeys, records: &[Value]) -> Result<Value, TreeError> {
    let objects = records
        .iter()
        .enumerate()
        .map(|(index, record)| record.as_object().ok_or(TreeError::NotAnObject { index }))
        .collect::<Result<Vec<&Object>, _>>()?;

    let mut index_by_id: HashMap<IdKey, usize> = HashMap::new();
    for (i, record) in records.iter().enumerate() {
        if let Some(key) = IdKey::of(record.get(&keys.id)) {
            index_by_id.entry(key).or_insert(i);
        }
    }

    let mut roots = Vec::new();
    let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    for (i, record) in records.iter().enumerate() {
        let parent = record.get(&keys.parent);
        if parent.is_nil() {
            roots.push(i);
            continue;
        }
        let parent_index = IdKey::of(parent)
            .and_then(|key| index_by_id.get(&key).copied())
            .ok_or_else(|| TreeError::DanglingReference {
                id: record.get(&keys.id).to_string(),
                parent: parent.to_string(),
            })?;
        children_of[parent_index].push(i);
    }

    let Some((&root, extra_roots)) = roots.split_first() else {
        return Err(TreeError::MissingRoot);
    };

    let order = preorder(root, &children_of);
    let dropped: usize = extra_roots
        .iter()
        .map(|&r| preorder(r, &children_of).len())
        .sum();
    if !extra_roots.is_empty() {
        tracing::warn!(
            roots = roots.len(),
            dropped,
            "multiple root records; keeping the first"
        );
    }

    let unreachable = records.len() - order.len() - dropped;
    if unreachable > 0 {
        return Err(TreeError::Unreachable { count: unreachable });
    }

    // Children follow their parent in preorder, so building in reverse
    // completes every child before its parent needs it.
    let mut built: Vec<Option<Value>> = vec![None; records.len()];
    for &i in order.iter().rev() {
        let children = children_of[i]
            .iter()
            .filter_map(|&c| built[c].take())
            .collect();
        let mut node = objects[i].clone();
        node.insert(keys.children.clone(), Value::Array(children));
        built[i] = Some(Value::Object(node));
    }

    built[root].take().ok_or(TreeError::MissingRoot)
}

/// Indices reachable from `start`, parents before children.
fn preorder(start: usize, children_of: &[Vec<usize>]) -> Vec<usize> {
    let mut order = Vec::new();
    let mut stack = vec![start];
    while let Some(i) = stack.pop() {
        order.push(i);
        stack.extend(children_of[i].iter().rev());
    }
    order
}

/// The keys-only form of [`list_to_tree`]: a reusable builder.
pub fn tree_builder(keys: TreeKeys) -> impl Fn(&[Value]) -> Result<Value, TreeError> {
    move |records| list_to_tree(&keys, records)
}
