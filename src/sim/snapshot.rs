//! Per-frame view handed to the presentation layer

use serde::Serialize;

use super::entity::Entity;
use super::session::{Phase, SessionState};
use crate::tuning::PlayArea;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub phase: Phase,
    pub is_playing: bool,
    pub is_over: bool,
    pub area: PlayArea,
    /// Live entities in spawn order
    pub entities: Vec<Entity>,
}

impl Snapshot {
    pub fn capture(session: &SessionState, area: PlayArea, entities: &[Entity]) -> Self {
        Self {
            score: session.score(),
            lives: session.lives(),
            level: session.level(),
            phase: session.phase(),
            is_playing: session.is_playing(),
            is_over: session.is_over(),
            area,
            entities: entities.to_vec(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
