//! Session state machine
//!
//! Owns score, lives and the phase gate every other component checks before
//! mutating. `Idle -> Playing -> Over`, with `start()` re-entering `Playing`
//! from either `Idle` or `Over` and `stop()` dropping back to `Idle`.

use serde::{Deserialize, Serialize};

use super::schedule::ScheduleHandle;

/// Exactly one of these holds at any time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Never started, or stopped manually
    Idle,
    /// Active gameplay
    Playing,
    /// Lives ran out
    Over,
}

/// Timers armed for the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionHandles {
    pub spawn: ScheduleHandle,
    pub frame: ScheduleHandle,
}

/// Result of one pass through the life-loss path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifeLoss {
    pub lives_left: u32,
    /// This loss was the terminal one
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    score: u64,
    lives: u32,
    /// Reserved for progression; nothing in the simulation changes it
    level: u32,
    phase: Phase,
    starting_lives: u32,
    handles: Option<SessionHandles>,
}

impl SessionState {
    pub fn new(starting_lives: u32) -> Self {
        Self {
            score: 0,
            lives: starting_lives,
            level: 1,
            phase: Phase::Idle,
            starting_lives,
            handles: None,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub fn handles(&self) -> Option<SessionHandles> {
        self.handles
    }

    /// Reset for a fresh run and enter `Playing`.
    ///
    /// Returns the previous session's handles (if any) so the caller can
    /// cancel them before arming new ones.
    pub fn start(&mut self, handles: SessionHandles) -> Option<SessionHandles> {
        self.score = 0;
        self.lives = self.starting_lives;
        self.phase = Phase::Playing;
        self.handles.replace(handles)
    }

    /// Manual abort. Never marks the session over.
    ///
    /// Returns the handles to cancel.
    pub fn stop(&mut self) -> Option<SessionHandles> {
        if self.phase == Phase::Playing {
            self.phase = Phase::Idle;
        }
        self.handles.take()
    }

    /// Release handles without touching the phase (teardown, game over)
    pub fn take_handles(&mut self) -> Option<SessionHandles> {
        self.handles.take()
    }

    /// Add points. No-op outside `Playing`.
    pub fn add_score(&mut self, points: u32) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.score += u64::from(points);
        true
    }

    /// The single life-loss path shared by hazard hits and misses.
    ///
    /// Decrement and terminal transition happen together: nothing can
    /// observe `lives == 0` while still `Playing`. No-op outside `Playing`,
    /// so a burst of losses fires the transition exactly once.
    pub fn lose_life(&mut self) -> Option<LifeLoss> {
        if !self.is_playing() {
            return None;
        }
        self.lives = self.lives.saturating_sub(1);
        let game_over = self.lives == 0;
        if game_over {
            self.phase = Phase::Over;
        }
        Some(LifeLoss {
            lives_left: self.lives,
            game_over,
        })
    }
}
