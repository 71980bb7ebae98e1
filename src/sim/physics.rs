//! Per-frame integration and bounds culling
//!
//! Every live entity moves by its velocity, then gravity is added to `vy`.
//! Entities that leave the play bounds are removed in the same step; a
//! scorable entity falling out the bottom is a miss and costs a life.

use super::entity::Entity;
use super::events::{EffectEvent, EffectKind, EffectQueue};
use super::live::LiveSet;
use super::session::SessionState;
use crate::tuning::{PlayArea, Tuning};

/// Why an entity left play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Dropped below `height + FALL_MARGIN`
    Fell,
    /// Drifted past a side bound
    Sideways,
}

/// An entity culled by the integrator
#[derive(Debug, Clone, PartialEq)]
pub struct Exit {
    pub entity: Entity,
    pub reason: ExitReason,
}

impl Exit {
    /// Unresolved scorable entity falling out of play
    pub fn is_miss(&self) -> bool {
        self.reason == ExitReason::Fell && self.entity.kind.is_scorable()
    }
}

/// Outcome of one gated frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub exits: Vec<Exit>,
    pub lives_lost: u32,
    /// This frame ended the session
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct Integrator {
    area: PlayArea,
    gravity: f32,
}

impl Integrator {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            area: tuning.area,
            gravity: tuning.gravity,
        }
    }

    /// Classify a post-update position
    fn exit_reason(&self, entity: &Entity) -> Option<ExitReason> {
        if entity.pos.y > self.area.fall_line() {
            Some(ExitReason::Fell)
        } else if self.area.outside_sides(entity.pos.x) {
            Some(ExitReason::Sideways)
        } else {
            None
        }
    }

    /// Advance every live entity one step and remove the ones that left.
    ///
    /// Ungated: [`frame`] is the entry point that checks the session.
    pub fn step(&self, live: &mut LiveSet) -> Vec<Exit> {
        let mut next = Vec::with_capacity(live.len());
        let mut exits = Vec::new();

        for entity in live.as_slice() {
            let moved = entity.stepped(self.gravity);
            match self.exit_reason(&moved) {
                Some(reason) => exits.push(Exit {
                    entity: moved,
                    reason,
                }),
                None => next.push(moved),
            }
        }

        live.replace(next);
        exits
    }
}

/// One integrator tick against the session gate.
///
/// Outside `Playing` nothing moves. Misses route through the session's
/// life-loss path; once it reports game over, later misses in the same
/// frame are no-ops.
pub fn frame(
    integrator: &Integrator,
    live: &mut LiveSet,
    session: &mut SessionState,
    effects: &mut EffectQueue,
) -> FrameReport {
    if !session.is_playing() {
        return FrameReport::default();
    }

    let exits = integrator.step(live);
    let mut report = FrameReport::default();

    for exit in exits.iter().filter(|e| e.is_miss()) {
        let Some(loss) = session.lose_life() else {
            continue;
        };
        log::debug!(
            "miss #{} {:?}, {} lives left",
            exit.entity.id,
            exit.entity.kind,
            loss.lives_left
        );
        report.lives_lost += 1;
        report.game_over |= loss.game_over;
        effects.push(EffectEvent {
            pos: exit.entity.pos,
            kind: EffectKind::Miss,
            magnitude: 1,
            entity_id: exit.entity.id,
            entity_kind: exit.entity.kind,
        });
    }

    if !exits.is_empty() {
        log::trace!(
            "frame culled {} entities, {} live",
            exits.len(),
            live.len()
        );
    }
    report.exits = exits;
    report
}
