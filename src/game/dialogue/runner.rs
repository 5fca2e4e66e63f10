//! Dialogue Runner
//!
//! Walks a [`DialogueDocument`] one node at a time. Each call does a single
//! step, so cyclic documents are fine: the runner only moves when asked.

use std::sync::Arc;

use crate::clock::DelayedQueue;

use super::DialogueError;
use super::document::{DialogueDocument, DialogueNode, DialogueResponse, is_terminal};

/// How a node without choices moves on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AdvancePolicy {
    /// Wait for an explicit advance
    OnInput,
    /// Advance on its own after the delay (seconds); explicit advance also works
    Timed(f32),
}

/// Where the runner is.
///
/// Displaying a node is instantaneous: the runner goes straight to waiting
/// for a choice or for a continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueState {
    Inactive,
    AwaitingChoice(String),
    AwaitingContinue(String),
}

/// What a transition produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueEvent {
    /// A node is on screen
    Shown {
        node_id: String,
        text: String,
        choices: Vec<String>,
    },
    /// The conversation is over
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DialogueTimer {
    AutoAdvance,
}

/// Dialogue traversal state machine.
#[derive(Debug, Clone)]
pub struct DialogueRunner {
    document: Arc<DialogueDocument>,
    policy: AdvancePolicy,
    state: DialogueState,
    timers: DelayedQueue<DialogueTimer>,
}

impl DialogueRunner {
    pub fn new(document: Arc<DialogueDocument>, policy: AdvancePolicy) -> Self {
        Self {
            document,
            policy,
            state: DialogueState::Inactive,
            timers: DelayedQueue::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> &DialogueState {
        &self.state
    }

    #[inline]
    pub fn policy(&self) -> AdvancePolicy {
        self.policy
    }

    pub fn is_active(&self) -> bool {
        self.state != DialogueState::Inactive
    }

    pub fn is_awaiting_continue(&self) -> bool {
        matches!(self.state, DialogueState::AwaitingContinue(_))
    }

    pub fn is_awaiting_choice(&self) -> bool {
        matches!(self.state, DialogueState::AwaitingChoice(_))
    }

    pub fn document(&self) -> &DialogueDocument {
        &self.document
    }

    /// Node currently on screen
    pub fn current_node(&self) -> Option<&DialogueNode> {
        match &self.state {
            DialogueState::Inactive => None,
            DialogueState::AwaitingChoice(id) | DialogueState::AwaitingContinue(id) => {
                self.document.get(id)
            }
        }
    }

    /// Choices on screen; empty unless awaiting a choice
    pub fn choices(&self) -> &[DialogueResponse] {
        match &self.state {
            DialogueState::AwaitingChoice(_) => {
                self.current_node().map(DialogueNode::responses).unwrap_or(&[])
            }
            _ => &[],
        }
    }

    /// Start at `start_id`. An unknown id leaves the state untouched.
    pub fn begin(&mut self, start_id: &str) -> Result<DialogueEvent, DialogueError> {
        if !self.document.contains(start_id) {
            log::error!("Dialogue node '{start_id}' not found");
            return Err(DialogueError::UnknownNode(start_id.to_owned()));
        }
        log::debug!("Beginning dialogue at '{start_id}'");
        Ok(self.display(start_id))
    }

    /// Pick a response. Rejected choices leave the state untouched.
    pub fn choose(&mut self, index: usize) -> Result<DialogueEvent, DialogueError> {
        let DialogueState::AwaitingChoice(id) = &self.state else {
            return Err(DialogueError::NotAwaitingChoice);
        };
        let responses = self
            .document
            .get(id)
            .map(DialogueNode::responses)
            .unwrap_or(&[]);
        let Some(response) = responses.get(index) else {
            log::error!("Invalid choice {index} of {}", responses.len());
            return Err(DialogueError::InvalidChoice {
                index,
                count: responses.len(),
            });
        };
        let next = response.next_id.clone();
        log::debug!("Choice {index} selected, next '{}'", next.as_deref().unwrap_or(""));
        Ok(self.follow(next.as_deref()))
    }

    /// Continue past a node without choices. Ignored in any other state.
    pub fn advance(&mut self) -> Option<DialogueEvent> {
        let DialogueState::AwaitingContinue(id) = &self.state else {
            return None;
        };
        let next = self.document.get(id).and_then(|n| n.next_id.clone());
        Some(self.follow(next.as_deref()))
    }

    /// Run pending timed advances.
    pub fn update(&mut self, dt: f32) -> Option<DialogueEvent> {
        let fired = self.timers.advance(dt);
        if fired.contains(&DialogueTimer::AutoAdvance) {
            return self.advance();
        }
        None
    }

    /// Stop from any state.
    pub fn end(&mut self) -> Option<DialogueEvent> {
        if self.state == DialogueState::Inactive {
            return None;
        }
        Some(self.finish())
    }

    fn follow(&mut self, next_id: Option<&str>) -> DialogueEvent {
        match next_id {
            next if is_terminal(next) => self.finish(),
            Some(id) if self.document.contains(id) => self.display(id),
            Some(id) => {
                log::error!("No dialogue node found for id '{id}', ending dialogue");
                self.finish()
            }
            None => self.finish(),
        }
    }

    fn display(&mut self, id: &str) -> DialogueEvent {
        self.timers.clear();
        let Some(node) = self.document.get(id) else {
            return self.finish();
        };
        let choices: Vec<String> = node.responses().iter().map(|r| r.text.clone()).collect();
        let text = node.text.clone();

        if choices.is_empty() {
            self.state = DialogueState::AwaitingContinue(id.to_owned());
            if let AdvancePolicy::Timed(delay) = self.policy {
                self.timers.schedule(delay, DialogueTimer::AutoAdvance);
            }
        } else {
            self.state = DialogueState::AwaitingChoice(id.to_owned());
        }
        log::debug!("Displaying node '{id}'");

        DialogueEvent::Shown {
            node_id: id.to_owned(),
            text,
            choices,
        }
    }

    fn finish(&mut self) -> DialogueEvent {
        self.timers.clear();
        self.state = DialogueState::Inactive;
        log::info!("Dialogue ended");
        DialogueEvent::Ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner(policy: AdvancePolicy) -> DialogueRunner {
        let doc = DialogueDocument::from_nodes(vec![
            DialogueNode::new("a", "Hi", None).with_response("Bye", "end"),
            DialogueNode::new("line", "One", Some("line2")),
            DialogueNode::new("line2", "Two", Some("exit")),
        ]);
        DialogueRunner::new(Arc::new(doc), policy)
    }

    #[test]
    fn test_begin_unknown_is_noop() {
        let mut r = runner(AdvancePolicy::OnInput);
        assert!(matches!(r.begin("nope"), Err(DialogueError::UnknownNode(_))));
        assert_eq!(r.state(), &DialogueState::Inactive);
    }

    #[test]
    fn test_choice_to_end() {
        let mut r = runner(AdvancePolicy::OnInput);
        let shown = r.begin("a").unwrap();
        assert_eq!(
            shown,
            DialogueEvent::Shown {
                node_id: "a".into(),
                text: "Hi".into(),
                choices: vec!["Bye".into()],
            }
        );
        assert_eq!(r.choose(0).unwrap(), DialogueEvent::Ended);
        assert!(!r.is_active());
    }

    #[test]
    fn test_invalid_choice_keeps_state() {
        let mut r = runner(AdvancePolicy::OnInput);
        r.begin("a").unwrap();
        assert!(matches!(
            r.choose(3),
            Err(DialogueError::InvalidChoice { index: 3, count: 1 })
        ));
        assert_eq!(r.state(), &DialogueState::AwaitingChoice("a".into()));
    }

    #[test]
    fn test_advance_ignored_while_choosing() {
        let mut r = runner(AdvancePolicy::OnInput);
        r.begin("a").unwrap();
        assert_eq!(r.advance(), None);
        assert!(r.is_awaiting_choice());
    }

    #[test]
    fn test_choose_while_continuing_is_rejected() {
        let mut r = runner(AdvancePolicy::OnInput);
        r.begin("line").unwrap();
        assert!(matches!(r.choose(0), Err(DialogueError::NotAwaitingChoice)));
    }

    #[test]
    fn test_linear_advance() {
        let mut r = runner(AdvancePolicy::OnInput);
        r.begin("line").unwrap();
        assert!(matches!(r.advance(), Some(DialogueEvent::Shown { .. })));
        assert_eq!(r.current_node().unwrap().id, "line2");
        assert_eq!(r.advance(), Some(DialogueEvent::Ended));
    }

    #[test]
    fn test_on_input_never_times_out() {
        let mut r = runner(AdvancePolicy::OnInput);
        r.begin("line").unwrap();
        assert_eq!(r.update(100.0), None);
        assert_eq!(r.current_node().unwrap().id, "line");
    }

    #[test]
    fn test_end_from_any_state() {
        let mut r = runner(AdvancePolicy::Timed(1.0));
        r.begin("line").unwrap();
        assert_eq!(r.end(), Some(DialogueEvent::Ended));
        assert_eq!(r.end(), None);
        // Pending auto-advance was dropped with the conversation
        assert_eq!(r.update(5.0), None);
    }
}
