//! Selection hit-testing and dispatch resolution

use glam::Vec2;

use super::entity::{EntityId, Payoff};
use super::events::{EffectEvent, EffectKind, EffectQueue};
use super::live::LiveSet;
use super::session::SessionState;

/// Result of resolving a selected entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Scored { points: u32, score: u64 },
    LifeLost { lives_left: u32, game_over: bool },
}

/// Topmost live entity under `point`.
///
/// Later spawns draw over earlier ones, so the search runs newest first.
pub fn pick(live: &LiveSet, point: Vec2, radius: f32) -> Option<EntityId> {
    live.iter()
        .rev()
        .find(|e| e.contains(point, radius))
        .map(|e| e.id)
}

/// Resolve a player selection.
///
/// Ignored (returns `None`, nothing mutated, nothing emitted) when the
/// session is not playing or the entity is already gone. Otherwise the
/// entity leaves the live set before any scoring happens, so a duplicate or
/// late selection for the same id always lands in the ignored case.
pub fn resolve(
    id: EntityId,
    live: &mut LiveSet,
    session: &mut SessionState,
    effects: &mut EffectQueue,
) -> Option<Outcome> {
    if !session.is_playing() {
        return None;
    }
    let entity = live.remove(id)?;

    let (outcome, kind, magnitude) = match entity.payoff {
        Payoff::Points(points) => {
            session.add_score(points);
            (
                Outcome::Scored {
                    points,
                    score: session.score(),
                },
                EffectKind::Hit,
                points,
            )
        }
        Payoff::LifeCost => {
            // Gate was checked above, so the life-loss path always applies here
            let loss = session.lose_life()?;
            (
                Outcome::LifeLost {
                    lives_left: loss.lives_left,
                    game_over: loss.game_over,
                },
                EffectKind::HazardHit,
                1,
            )
        }
    };

    log::debug!("resolve #{} {:?} -> {:?}", entity.id, entity.kind, outcome);
    effects.push(EffectEvent {
        pos: entity.pos,
        kind,
        magnitude,
        entity_id: entity.id,
        entity_kind: entity.kind,
    });
    Some(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Entity, EntityKind, Launch};
    use crate::sim::schedule::{Job, Scheduler};
    use crate::sim::session::SessionHandles;

    fn entity(id: EntityId, kind: EntityKind, pos: Vec2) -> Entity {
        let payoff = match kind {
            EntityKind::Regular => Payoff::Points(10),
            EntityKind::Hazard => Payoff::LifeCost,
            EntityKind::Bonus => Payoff::Points(50),
        };
        Entity::new(
            id,
            Launch {
                kind,
                variant: 0,
                pos,
                vel: Vec2::ZERO,
                rotation_speed: 0.0,
                payoff,
            },
        )
    }

    fn playing_session() -> SessionState {
        let mut scheduler = Scheduler::new();
        let mut session = SessionState::new(3);
        session.start(SessionHandles {
            spawn: scheduler.schedule(Job::Spawn, 1500.0),
            frame: scheduler.schedule(Job::Frame, 16.0),
        });
        session
    }

    #[test]
    fn test_regular_hit_scores() {
        let mut live = LiveSet::new();
        let mut session = playing_session();
        let mut effects = EffectQueue::default();
        live.insert(entity(1, EntityKind::Regular, Vec2::new(200.0, 300.0)));

        let outcome = resolve(1, &mut live, &mut session, &mut effects);

        assert_eq!(outcome, Some(Outcome::Scored { points: 10, score: 10 }));
        assert_eq!(session.score(), 10);
        assert_eq!(session.lives(), 3);
        assert!(!session.is_over());
        assert!(live.is_empty());

        let events = effects.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EffectKind::Hit);
        assert_eq!(events[0].magnitude, 10);
        assert_eq!(events[0].pos, Vec2::new(200.0, 300.0));
    }

    #[test]
    fn test_bonus_hit_scores_fifty() {
        let mut live = LiveSet::new();
        let mut session = playing_session();
        let mut effects = EffectQueue::default();
        live.insert(entity(1, EntityKind::Bonus, Vec2::ZERO));

        resolve(1, &mut live, &mut session, &mut effects);
        assert_eq!(session.score(), 50);
    }

    #[test]
    fn test_three_hazards_end_the_session() {
        let mut live = LiveSet::new();
        let mut session = playing_session();
        let mut effects = EffectQueue::default();
        for id in 1..=3 {
            live.insert(entity(id, EntityKind::Hazard, Vec2::ZERO));
        }

        resolve(1, &mut live, &mut session, &mut effects);
        resolve(2, &mut live, &mut session, &mut effects);
        let last = resolve(3, &mut live, &mut session, &mut effects);

        assert_eq!(
            last,
            Some(Outcome::LifeLost {
                lives_left: 0,
                game_over: true
            })
        );
        assert_eq!(session.lives(), 0);
        assert!(session.is_over());
        assert!(!session.is_playing());
        assert!(effects.drain().iter().all(|e| e.kind == EffectKind::HazardHit));
    }

    #[test]
    fn test_unknown_id_is_ignored() {
        let mut live = LiveSet::new();
        let mut session = playing_session();
        let mut effects = EffectQueue::default();
        live.insert(entity(1, EntityKind::Regular, Vec2::ZERO));

        assert!(resolve(99, &mut live, &mut session, &mut effects).is_none());
        assert_eq!(live.len(), 1);
        assert_eq!(session.score(), 0);
        assert_eq!(session.lives(), 3);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_duplicate_selection_resolves_once() {
        let mut live = LiveSet::new();
        let mut session = playing_session();
        let mut effects = EffectQueue::default();
        live.insert(entity(1, EntityKind::Regular, Vec2::ZERO));

        assert!(resolve(1, &mut live, &mut session, &mut effects).is_some());
        assert!(resolve(1, &mut live, &mut session, &mut effects).is_none());
        assert_eq!(session.score(), 10);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn test_selection_ignored_when_not_playing() {
        let mut live = LiveSet::new();
        let mut session = SessionState::new(3);
        let mut effects = EffectQueue::default();
        live.insert(entity(1, EntityKind::Regular, Vec2::ZERO));

        assert!(resolve(1, &mut live, &mut session, &mut effects).is_none());
        assert!(live.contains(1));
        assert_eq!(session.score(), 0);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_pick_prefers_newest_overlap() {
        let mut live = LiveSet::new();
        live.insert(entity(1, EntityKind::Regular, Vec2::new(100.0, 100.0)));
        live.insert(entity(2, EntityKind::Hazard, Vec2::new(120.0, 100.0)));
        live.insert(entity(3, EntityKind::Bonus, Vec2::new(500.0, 500.0)));

        assert_eq!(pick(&live, Vec2::new(110.0, 100.0), 40.0), Some(2));
        assert_eq!(pick(&live, Vec2::new(70.0, 100.0), 40.0), Some(1));
        assert_eq!(pick(&live, Vec2::new(300.0, 300.0), 40.0), None);
    }
}
