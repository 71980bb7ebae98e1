//! Idle/demo mode - picks what a careful player would slice next

use super::entity::EntityId;
use super::live::LiveSet;
use crate::tuning::PlayArea;

/// Most urgent scorable entity: on screen, already falling, lowest first.
/// Hazards are never chosen.
pub fn choose_target(live: &LiveSet, area: &PlayArea) -> Option<EntityId> {
    live.iter()
        .filter(|e| e.kind.is_scorable())
        .filter(|e| e.vel.y > 0.0)
        .filter(|e| area.contains(e.pos.x, e.pos.y))
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|e| e.id)
}
