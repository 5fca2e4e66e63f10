//! Dialogue Manager
//!
//! The on-demand conversation opened with Q. Plain lines advance by
//! themselves after a delay, or on a click that misses every button.

use std::sync::Arc;

use super::DialogueInput;
use super::document::DialogueDocument;
use super::runner::{AdvancePolicy, DialogueEvent, DialogueRunner};

/// Timed dialogue front-end.
#[derive(Debug, Clone)]
pub struct DialogueManager {
    runner: DialogueRunner,
    start_id: String,
}

impl DialogueManager {
    pub fn new(document: Arc<DialogueDocument>, start_id: impl Into<String>, delay: f32) -> Self {
        Self {
            runner: DialogueRunner::new(document, AdvancePolicy::Timed(delay)),
            start_id: start_id.into(),
        }
    }

    pub fn runner(&self) -> &DialogueRunner {
        &self.runner
    }

    pub fn is_active(&self) -> bool {
        self.runner.is_active()
    }

    pub fn handle(&mut self, input: DialogueInput) -> Option<DialogueEvent> {
        match input {
            DialogueInput::Begin if !self.runner.is_active() => {
                log::debug!("Starting dialogue at '{}'", self.start_id);
                self.runner.begin(&self.start_id).ok()
            }
            DialogueInput::Choose(index) if self.runner.is_awaiting_choice() => {
                match self.runner.choose(index) {
                    Ok(event) => Some(event),
                    Err(e) => {
                        log::warn!("{e}");
                        None
                    }
                }
            }
            DialogueInput::Advance | DialogueInput::ClickAway => self.runner.advance(),
            _ => None,
        }
    }

    /// Advance the auto-advance clock.
    pub fn update(&mut self, dt: f32) -> Option<DialogueEvent> {
        self.runner.update(dt)
    }

    pub fn end(&mut self) -> Option<DialogueEvent> {
        self.runner.end()
    }
}
