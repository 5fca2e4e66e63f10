//! Dialogue
//!
//! Branching conversations loaded from JSON and driven by a single
//! traversal state machine. Two front-ends configure it differently:
//!
//! - [`QuestGiver`] - advances on Enter, opens the game on its first start
//! - [`DialogueManager`] - opened with Q, lines advance on their own

pub mod document;
pub mod manager;
pub mod quest_giver;
pub mod runner;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use document::{
    DialogueDocument, DialogueNode, DialogueResponse, MAX_CHOICES, is_terminal,
};
pub use manager::DialogueManager;
pub use quest_giver::{CONTINUE_PROMPT, QuestGiver};
pub use runner::{AdvancePolicy, DialogueEvent, DialogueRunner, DialogueState};

/// Dialogue loading and traversal errors
#[derive(Debug, Error)]
pub enum DialogueError {
    #[error("failed to read dialogue {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid dialogue JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("dialogue node '{0}' not found")]
    UnknownNode(String),
    #[error("choice {index} out of range ({count} responses)")]
    InvalidChoice { index: usize, count: usize },
    #[error("no choices are on screen")]
    NotAwaitingChoice,
}

/// Player intent routed to a dialogue front-end for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueInput {
    /// Open the conversation (Q)
    Begin,
    /// Continue a line without choices (Enter)
    Advance,
    /// Pick response `n`, by number key or button click
    Choose(usize),
    /// A click that missed every choice button
    ClickAway,
}

/// Where dialogue comes from and how the two front-ends start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueSettings {
    /// Dialogue JSON file
    pub path: PathBuf,
    /// First node the quest giver shows
    pub quest_start_id: String,
    /// First node the Q-key dialogue shows
    pub manager_start_id: String,
    /// Seconds before a line without choices moves on in the Q-key dialogue
    pub auto_advance_delay: f32,
}

impl Default for DialogueSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("assets/dialogue.json"),
            quest_start_id: "intro_1".to_owned(),
            manager_start_id: "intro_1".to_owned(),
            auto_advance_delay: 2.0,
        }
    }
}
