//! Quest Giver
//!
//! The conversation that opens the game. It waits for Enter on plain
//! lines, and whenever it closes the scene starts the session.

use std::sync::Arc;

use glam::Vec3;

use super::DialogueInput;
use super::document::DialogueDocument;
use super::runner::{AdvancePolicy, DialogueEvent, DialogueRunner};

/// Shown under lines that wait for Enter
pub const CONTINUE_PROMPT: &str = "Press Enter to continue";

/// Input-driven dialogue front-end.
#[derive(Debug, Clone)]
pub struct QuestGiver {
    runner: DialogueRunner,
    start_id: String,
    /// Where the quest giver stands
    pub position: Vec3,
}

impl QuestGiver {
    pub fn new(document: Arc<DialogueDocument>, start_id: impl Into<String>, position: Vec3) -> Self {
        Self {
            runner: DialogueRunner::new(document, AdvancePolicy::OnInput),
            start_id: start_id.into(),
            position,
        }
    }

    pub fn runner(&self) -> &DialogueRunner {
        &self.runner
    }

    pub fn is_active(&self) -> bool {
        self.runner.is_active()
    }

    /// Whether the continue prompt should be visible.
    pub fn shows_prompt(&self) -> bool {
        self.runner.is_awaiting_continue()
    }

    /// Open the intro conversation.
    ///
    /// A missing start node closes the dialogue straight away, so the
    /// caller still sees `Ended` and the game can begin.
    pub fn show_initial_message(&mut self) -> DialogueEvent {
        match self.runner.begin(&self.start_id) {
            Ok(event) => event,
            Err(e) => {
                log::error!("Quest giver cannot open: {e}");
                self.runner.end();
                DialogueEvent::Ended
            }
        }
    }

    pub fn handle(&mut self, input: DialogueInput) -> Option<DialogueEvent> {
        match input {
            DialogueInput::Advance => self.runner.advance(),
            DialogueInput::Choose(index) if self.runner.is_awaiting_choice() => {
                match self.runner.choose(index) {
                    Ok(event) => Some(event),
                    Err(e) => {
                        log::warn!("{e}");
                        None
                    }
                }
            }
            _ => None,
        }
    }

    pub fn end(&mut self) -> Option<DialogueEvent> {
        self.runner.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::dialogue::DialogueNode;

    fn giver(start: &str) -> QuestGiver {
        let doc = DialogueDocument::from_nodes(vec![
            DialogueNode::new("intro_1", "Hello", Some("intro_2")),
            DialogueNode::new("intro_2", "Help?", None)
                .with_response("Yes", "exit")
                .with_response("Tell me more", "intro_1"),
        ]);
        QuestGiver::new(Arc::new(doc), start, Vec3::ZERO)
    }

    #[test]
    fn test_enter_then_choice_exits() {
        let mut q = giver("intro_1");
        assert!(matches!(q.show_initial_message(), DialogueEvent::Shown { .. }));
        assert!(q.shows_prompt());
        assert!(matches!(q.handle(DialogueInput::Advance), Some(DialogueEvent::Shown { .. })));
        assert!(!q.shows_prompt());
        assert_eq!(q.handle(DialogueInput::Choose(0)), Some(DialogueEvent::Ended));
        assert!(!q.is_active());
    }

    #[test]
    fn test_click_away_ignored() {
        let mut q = giver("intro_1");
        q.show_initial_message();
        assert_eq!(q.handle(DialogueInput::ClickAway), None);
        assert!(q.is_active());
    }

    #[test]
    fn test_missing_start_ends() {
        let mut q = giver("nowhere");
        assert_eq!(q.show_initial_message(), DialogueEvent::Ended);
        assert!(!q.is_active());
    }
}
