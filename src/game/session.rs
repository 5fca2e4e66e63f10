//! Game Session
//!
//! Score, countdown and win/lose state for one play-through, plus the HUD
//! strings derived from them.

use serde::{Deserialize, Serialize};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    Active,
    Ended(Outcome),
}

/// Session rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Countdown length in seconds
    pub duration: f32,
    /// Pickups needed to win
    pub target_score: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            duration: 90.0,
            target_score: 10,
        }
    }
}

/// Score and timer state machine.
///
/// While active the timer only decreases and the score only increases;
/// once ended, neither changes until the next [`GameSession::start`].
#[derive(Debug, Clone)]
pub struct GameSession {
    settings: SessionSettings,
    phase: SessionPhase,
    score: u32,
    remaining: f32,
}

impl GameSession {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            phase: SessionPhase::NotStarted,
            score: 0,
            remaining: settings.duration,
        }
    }

    /// Begin play: score back to zero, timer back to the full duration.
    pub fn start(&mut self) {
        self.phase = SessionPhase::Active;
        self.score = 0;
        self.remaining = self.settings.duration;
        log::info!(
            "Session started: {} pickups in {:.0} s",
            self.settings.target_score,
            self.settings.duration
        );
    }

    /// Advance the countdown. Returns the outcome on the tick the session ends.
    ///
    /// The tick that drains the timer to zero ends the session.
    pub fn tick(&mut self, dt: f32) -> Option<Outcome> {
        if self.phase != SessionPhase::Active {
            return None;
        }
        self.remaining = (self.remaining - dt).max(0.0);
        (self.remaining <= 0.0).then(|| self.end(Outcome::Lose))
    }

    /// Count a pickup. Ignored unless active. Returns the resulting phase.
    pub fn pickup(&mut self) -> SessionPhase {
        if self.phase == SessionPhase::Active {
            self.score += 1;
            if self.score >= self.settings.target_score {
                self.end(Outcome::Win);
            }
        }
        self.phase
    }

    fn end(&mut self, outcome: Outcome) -> Outcome {
        self.phase = SessionPhase::Ended(outcome);
        match outcome {
            Outcome::Win => log::info!("Session won in {:.2} s", self.elapsed()),
            Outcome::Lose => log::info!(
                "Session lost with {} / {}",
                self.score,
                self.settings.target_score
            ),
        }
        outcome
    }

    #[inline]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            SessionPhase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn target(&self) -> u32 {
        self.settings.target_score
    }

    /// Seconds left on the countdown
    #[inline]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Seconds played
    pub fn elapsed(&self) -> f32 {
        self.settings.duration - self.remaining
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// `Score: 3 / 10`
    pub fn score_text(&self) -> String {
        format!("Score: {} / {}", self.score, self.settings.target_score)
    }

    /// Remaining time as `MM:SS`
    pub fn timer_text(&self) -> String {
        let remaining = self.remaining.max(0.0);
        let minutes = (remaining / 60.0).floor() as u32;
        let seconds = (remaining % 60.0).floor() as u32;
        format!("{minutes:02}:{seconds:02}")
    }

    /// End panel text, once the session has ended
    pub fn end_text(&self) -> Option<String> {
        match self.outcome()? {
            Outcome::Win => Some(format!("You Win!\nTime: {:.2} seconds", self.elapsed())),
            Outcome::Lose => Some(format!(
                "Time's Up!\nScore: {} / {}",
                self.score, self.settings.target_score
            )),
        }
    }
}
