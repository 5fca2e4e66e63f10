//! Dialogue Documents
//!
//! A dialogue is a flat JSON array of nodes linked by id:
//!
//! ```json
//! [
//!   { "id": "a", "text": "Hi", "nextId": null,
//!     "responses": [ { "text": "Bye", "nextId": "end" } ] }
//! ]
//! ```
//!
//! Nodes are keyed by id on load and never change afterwards.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::DialogueError;

/// Responses a node can offer as buttons; later ones are unreachable
pub const MAX_CHOICES: usize = 4;

/// Ids that end a conversation (compared case-insensitively)
pub const TERMINAL_IDS: [&str; 2] = ["end", "exit"];

/// Whether a link ends the conversation: missing, empty, `end` or `exit`.
pub fn is_terminal(next_id: Option<&str>) -> bool {
    match next_id {
        None => true,
        Some(id) => {
            id.is_empty() || TERMINAL_IDS.iter().any(|t| id.eq_ignore_ascii_case(t))
        }
    }
}

/// One selectable answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueResponse {
    pub text: String,
    #[serde(default)]
    pub next_id: Option<String>,
}

/// One line of dialogue with either a continuation or choices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueNode {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub next_id: Option<String>,
    #[serde(default)]
    responses: Option<Vec<DialogueResponse>>,
}

impl DialogueNode {
    pub fn new(id: impl Into<String>, text: impl Into<String>, next_id: Option<&str>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            next_id: next_id.map(str::to_owned),
            responses: None,
        }
    }

    pub fn with_response(mut self, text: impl Into<String>, next_id: &str) -> Self {
        self.responses
            .get_or_insert_with(Vec::new)
            .push(DialogueResponse {
                text: text.into(),
                next_id: Some(next_id.to_owned()),
            });
        self
    }

    /// Choices offered at this node; empty for linear nodes.
    pub fn responses(&self) -> &[DialogueResponse] {
        self.responses.as_deref().unwrap_or(&[])
    }
}

/// Immutable keyed lookup of dialogue nodes.
#[derive(Debug, Clone, Default)]
pub struct DialogueDocument {
    nodes: HashMap<String, DialogueNode>,
}

impl DialogueDocument {
    /// Key nodes by id. On duplicate ids the later node wins.
    pub fn from_nodes(nodes: Vec<DialogueNode>) -> Self {
        let mut map = HashMap::with_capacity(nodes.len());
        for node in nodes {
            if map.contains_key(&node.id) {
                log::warn!("Duplicate dialogue node id '{}', keeping the last one", node.id);
            }
            if node.responses().len() > MAX_CHOICES {
                log::warn!(
                    "Dialogue node '{}' has {} responses; only the first {MAX_CHOICES} can be picked",
                    node.id,
                    node.responses().len()
                );
            }
            map.insert(node.id.clone(), node);
        }
        Self { nodes: map }
    }

    pub fn from_json(json: &str) -> Result<Self, DialogueError> {
        let nodes: Vec<DialogueNode> = serde_json::from_str(json)?;
        let document = Self::from_nodes(nodes);
        log::info!("Loaded {} dialogue nodes", document.len());
        Ok(document)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DialogueError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| DialogueError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn get(&self, id: &str) -> Option<&DialogueNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_ids() {
        assert!(is_terminal(None));
        assert!(is_terminal(Some("")));
        assert!(is_terminal(Some("end")));
        assert!(is_terminal(Some("EXIT")));
        assert!(is_terminal(Some("End")));
        assert!(!is_terminal(Some("intro_2")));
    }

    #[test]
    fn test_parse_optional_fields() {
        let json = r#"[
            { "id": "a", "text": "Hi", "nextId": null, "responses": null },
            { "id": "b", "text": "Yo" },
            { "id": "c", "text": "Pick", "responses": [ { "text": "x", "nextId": "a" } ] }
        ]"#;
        let doc = DialogueDocument::from_json(json).unwrap();
        assert_eq!(doc.len(), 3);
        assert!(doc.get("a").unwrap().responses().is_empty());
        assert!(doc.get("b").unwrap().next_id.is_none());
        assert_eq!(doc.get("c").unwrap().responses()[0].next_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_duplicate_id_last_wins() {
        let doc = DialogueDocument::from_nodes(vec![
            DialogueNode::new("a", "first", None),
            DialogueNode::new("a", "second", None),
        ]);
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get("a").unwrap().text, "second");
    }

    #[test]
    fn test_responses_beyond_button_limit_are_kept() {
        let node = (0..=MAX_CHOICES).fold(DialogueNode::new("many", "Pick one", None), |n, i| {
            n.with_response(format!("option {i}"), "end")
        });
        let doc = DialogueDocument::from_nodes(vec![node]);
        assert_eq!(doc.get("many").unwrap().responses().len(), MAX_CHOICES + 1);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            DialogueDocument::from_json("{ not json"),
            Err(DialogueError::Json(_))
        ));
    }
}
