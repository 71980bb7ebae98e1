//! Effect events for the presentation layer
//!
//! Emitted, never read back by the simulation. Sound, particles and score
//! popups are driven entirely from this stream.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{EntityId, EntityKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectKind {
    /// Scorable entity selected
    Hit,
    /// Hazard selected
    HazardHit,
    /// Scorable entity fell unresolved
    Miss,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectEvent {
    pub pos: Vec2,
    pub kind: EffectKind,
    /// Points gained for `Hit`, lives lost otherwise
    pub magnitude: u32,
    pub entity_id: EntityId,
    pub entity_kind: EntityKind,
}

/// Ordered queue of pending effects
#[derive(Debug, Clone, Default)]
pub struct EffectQueue {
    pending: Vec<EffectEvent>,
}

impl EffectQueue {
    pub fn push(&mut self, event: EffectEvent) {
        self.pending.push(event);
    }

    /// Hand every pending event to the caller, oldest first
    pub fn drain(&mut self) -> Vec<EffectEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
