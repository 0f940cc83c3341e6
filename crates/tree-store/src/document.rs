//! The portable document format of a tree
//!
//! A document is the nested `{ "name": ..., "children": [...] }` shape used
//! both on the wire and for save files. The empty tree is the empty object
//! `{}`.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::TreeError;
use crate::node::Node;
use crate::store::{TreeStore, MAX_DEPTH};

/// A whole tree in document form, `None` being the empty tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document(pub Option<Node>);

impl Document {
    /// The empty document, `{}`
    pub fn empty() -> Self {
        Self(None)
    }

    /// A document rooted at `root`
    pub fn new(root: Node) -> Self {
        Self(Some(root))
    }

    /// Returns true if this document describes the empty tree
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// The root node, if any
    pub fn root(&self) -> Option<&Node> {
        self.0.as_ref()
    }

    /// Consume the document, returning its root
    pub fn into_root(self) -> Option<Node> {
        self.0
    }

    /// Decode a document from JSON text
    pub fn from_json_str(text: &str) -> Result<Self, TreeError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| TreeError::malformed(format!("invalid JSON: {e}")))?;
        Self::from_value(&value)
    }

    /// Decode a document from raw JSON bytes (for example an uploaded file)
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, TreeError> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| TreeError::malformed(format!("invalid JSON: {e}")))?;
        Self::from_value(&value)
    }

    /// Decode a document from an already parsed JSON value
    ///
    /// Validates the shape recursively and rejects repeated names and trees
    /// deeper than [`MAX_DEPTH`]. Keys other than `name` and `children` are
    /// ignored, so older saves carrying an `id` per node still load.
    pub fn from_value(value: &Value) -> Result<Self, TreeError> {
        let object = value
            .as_object()
            .ok_or_else(|| TreeError::malformed("document must be a JSON object"))?;

        if object.is_empty() {
            return Ok(Self::empty());
        }

        let mut seen = std::collections::HashSet::new();
        let root = node_from_object(object, "$", 0, &mut seen)?;
        Ok(Self::new(root))
    }

    /// Encode as a JSON value
    pub fn to_value(&self) -> Value {
        match &self.0 {
            Some(root) => node_to_value(root),
            None => Value::Object(Map::new()),
        }
    }

    /// Encode as compact JSON text
    pub fn to_json_string(&self) -> String {
        self.to_value().to_string()
    }

    /// Encode as indented JSON text, the save file format
    pub fn to_json_pretty(&self) -> String {
        // Serializing a `Value` cannot fail
        serde_json::to_string_pretty(&self.to_value()).unwrap_or_else(|_| self.to_json_string())
    }
}

fn node_to_value(node: &Node) -> Value {
    let mut map = Map::new();
    map.insert("name".into(), Value::String(node.name.clone()));
    map.insert(
        "children".into(),
        Value::Array(node.children.iter().map(node_to_value).collect()),
    );
    Value::Object(map)
}

fn node_from_object(
    object: &Map<String, Value>,
    path: &str,
    depth: usize,
    seen: &mut std::collections::HashSet<String>,
) -> Result<Node, TreeError> {
    if depth > MAX_DEPTH {
        return Err(TreeError::malformed(format!(
            "node at {path} is deeper than {MAX_DEPTH} levels"
        )));
    }

    let name = match object.get("name") {
        Some(Value::String(name)) => name.clone(),
        Some(_) => {
            return Err(TreeError::malformed(format!(
                "node at {path} has a non-string name"
            )))
        }
        None => {
            return Err(TreeError::malformed(format!(
                "node at {path} has no name"
            )))
        }
    };

    if !seen.insert(name.clone()) {
        return Err(TreeError::malformed(format!(
            "duplicate node name '{name}'"
        )));
    }

    let children = match object.get("children") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => {
            let mut children = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let child_path = format!("{path}.children[{i}]");
                let child = item.as_object().ok_or_else(|| {
                    TreeError::malformed(format!("node at {child_path} is not an object"))
                })?;
                children.push(node_from_object(child, &child_path, depth + 1, seen)?);
            }
            children
        }
        Some(_) => {
            return Err(TreeError::malformed(format!(
                "children of '{name}' must be an array"
            )))
        }
    };

    Ok(Node { name, children })
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(root) => root.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Document::from_value(&value).map_err(de::Error::custom)
    }
}

/// Encode the store's current tree as a document
pub fn to_document(store: &TreeStore) -> Document {
    Document(store.get_tree())
}

/// Build a fresh store from a document
pub fn from_document(document: &Document) -> Result<TreeStore, TreeError> {
    let mut store = TreeStore::new();
    store.replace(document.root())?;
    Ok(store)
}

impl TreeStore {
    /// Encode the current tree as a document
    pub fn to_document(&self) -> Document {
        to_document(self)
    }

    /// Build a fresh store from a document
    pub fn from_document(document: &Document) -> Result<Self, TreeError> {
        from_document(document)
    }
}
