// src/domain/document.rs
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Root node type every stored document must carry.
const ROOT_TYPE: &str = "doc";

/// One node of the structured document tree produced by the editor.
///
/// The service never interprets node kinds beyond the root: unknown types,
/// marks, and extra fields round-trip untouched so newer editors keep
/// working against an older server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocNode {
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<Vec<Mark>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<DocNode>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DocNode {
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            attrs: None,
            marks: None,
            text: None,
            content: None,
            extra: Map::new(),
        }
    }

    pub fn with_content(mut self, content: Vec<DocNode>) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Inline formatting mark attached to a node. Mark types are opaque here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub mark_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A validated document body: a tree whose root is a `"doc"` node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DocNode", into = "DocNode")]
pub struct Document(DocNode);

impl Document {
    pub fn new(root: DocNode) -> DomainResult<Self> {
        if root.node_type == ROOT_TYPE {
            Ok(Self(root))
        } else {
            Err(DomainError::Validation(format!(
                "document root must be '{ROOT_TYPE}', got '{}'",
                root.node_type
            )))
        }
    }

    /// The default body for an article without content: a doc holding a
    /// single empty paragraph.
    pub fn empty() -> Self {
        Self(DocNode::new(ROOT_TYPE).with_content(vec![
            DocNode::new("paragraph").with_content(Vec::new()),
        ]))
    }

    pub fn root(&self) -> &DocNode {
        &self.0
    }

    pub fn from_value(value: Value) -> DomainResult<Self> {
        let root: DocNode = serde_json::from_value(value)
            .map_err(|err| DomainError::Validation(format!("malformed document body: {err}")))?;
        Self::new(root)
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(&self.0).unwrap_or(Value::Null)
    }
}

impl TryFrom<DocNode> for Document {
    type Error = DomainError;

    fn try_from(root: DocNode) -> Result<Self, Self::Error> {
        Self::new(root)
    }
}

impl From<Document> for DocNode {
    fn from(doc: Document) -> Self {
        doc.0
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}
