//! Game state and the commands the outside world can issue
//!
//! [`Game`] owns everything the simulation mutates: the session, the live
//! entities, the pending effects, the seeded RNG and the scheduler that
//! drives spawning and integration. Hosts call [`Game::start`],
//! [`Game::stop`], [`Game::select`] and [`Game::advance`] from one thread.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::dispatch::{self, Outcome};
use super::entity::{Entity, EntityId, Launch};
use super::events::{EffectEvent, EffectQueue};
use super::live::LiveSet;
use super::physics::{self, FrameReport, Integrator};
use super::schedule::{Job, ScheduleHandle, Scheduler};
use super::session::{SessionHandles, SessionState};
use super::snapshot::Snapshot;
use super::spawner::Spawner;
use crate::tuning::{Tuning, TuningError};

#[derive(Debug, Clone)]
pub struct Game {
    /// Run seed for reproducibility
    seed: u64,
    rng: Pcg32,
    tuning: Tuning,
    spawner: Spawner,
    integrator: Integrator,
    pub(super) scheduler: Scheduler,
    session: SessionState,
    live: LiveSet,
    effects: EffectQueue,
    /// Next entity ID
    next_id: EntityId,
}

impl Game {
    /// Create an idle game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(Tuning::default(), seed)
    }

    /// Create an idle game with validated custom tuning
    pub fn with_tuning(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(tuning, seed))
    }

    fn build(tuning: Tuning, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            spawner: Spawner::new(&tuning),
            integrator: Integrator::new(&tuning),
            scheduler: Scheduler::new(),
            session: SessionState::new(tuning.starting_lives),
            live: LiveSet::new(),
            effects: EffectQueue::default(),
            next_id: 1,
            tuning,
        }
    }

    /// Install new tuning. The play area is fixed while a session is playing.
    pub fn retune(&mut self, tuning: Tuning) -> Result<(), TuningError> {
        if self.session.is_playing() {
            log::warn!("rejected retune during an active session");
            return Err(TuningError::SessionActive);
        }
        tuning.validate()?;
        self.spawner = Spawner::new(&tuning);
        self.integrator = Integrator::new(&tuning);
        self.session = SessionState::new(tuning.starting_lives);
        self.live.clear();
        self.effects.clear();
        self.tuning = tuning;
        Ok(())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn live(&self) -> &LiveSet {
        &self.live
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Begin a fresh session, from `Idle` or after game over.
    ///
    /// Resets score and lives, clears entities and pending effects, and arms
    /// the spawn and frame timers. Any timers from a previous session are
    /// cancelled first.
    pub fn start(&mut self) -> SessionHandles {
        if let Some(previous) = self.session.take_handles() {
            self.cancel(previous);
        }
        self.live.clear();
        self.effects.clear();

        let handles = SessionHandles {
            spawn: self
                .scheduler
                .schedule(Job::Spawn, self.tuning.spawn_period_ms),
            frame: self
                .scheduler
                .schedule(Job::Frame, self.tuning.frame_period_ms),
        };
        self.session.start(handles);
        log::info!(
            "session started (seed {}, {} lives)",
            self.seed,
            self.session.lives()
        );
        handles
    }

    /// Manual pause/abort. Cancels both timers; does not mark the game over.
    pub fn stop(&mut self) {
        let was_playing = self.session.is_playing();
        if let Some(handles) = self.session.stop() {
            self.cancel(handles);
        }
        if was_playing {
            log::info!("session stopped at score {}", self.session.score());
        }
    }

    /// Unmount: stop and cancel every timer, whether or not a session ever ran
    pub fn teardown(&mut self) {
        self.stop();
        let cancelled = self.scheduler.cancel_all();
        log::info!("teardown cancelled {} timers", cancelled);
    }

    /// True while this game's session timers are armed
    pub fn is_scheduled(&self) -> bool {
        self.session.handles().is_some_and(|h| {
            self.scheduler.is_active(h.spawn) || self.scheduler.is_active(h.frame)
        })
    }

    pub(super) fn owns(&self, handle: ScheduleHandle) -> bool {
        self.session
            .handles()
            .is_some_and(|h| h.spawn == handle || h.frame == handle)
    }

    fn cancel(&mut self, handles: SessionHandles) {
        self.scheduler.cancel(handles.spawn);
        self.scheduler.cancel(handles.frame);
    }

    /// Halt spawning and integration once the session has ended itself
    fn release_if_over(&mut self) {
        if !self.session.is_over() {
            return;
        }
        if let Some(handles) = self.session.take_handles() {
            self.cancel(handles);
            log::info!("game over - final score {}", self.session.score());
        }
    }

    /// Put an entity into play. Ignored unless playing, and rejected when
    /// its kind and payoff disagree.
    pub fn launch(&mut self, launch: Launch) -> Option<EntityId> {
        if !self.session.is_playing() {
            return None;
        }
        if !launch.is_consistent() {
            log::warn!("rejected {:?} launch paying {:?}", launch.kind, launch.payoff);
            return None;
        }
        let id = self.next_entity_id();
        self.live.insert(Entity::new(id, launch));
        Some(id)
    }

    /// One spawner tick. Ignored unless playing.
    pub fn spawn_now(&mut self) -> Option<Entity> {
        if !self.session.is_playing() {
            return None;
        }
        let id = self.next_entity_id();
        Some(self.spawner.spawn(&mut self.rng, id, &mut self.live))
    }

    /// One integrator tick. Ignored unless playing.
    pub fn frame_now(&mut self) -> FrameReport {
        let report = physics::frame(
            &self.integrator,
            &mut self.live,
            &mut self.session,
            &mut self.effects,
        );
        self.release_if_over();
        report
    }

    /// Inbound "entity selected"
    pub fn select(&mut self, id: EntityId) -> Option<Outcome> {
        let outcome = dispatch::resolve(id, &mut self.live, &mut self.session, &mut self.effects);
        self.release_if_over();
        outcome
    }

    /// Topmost live entity under a pointer position
    pub fn pick(&self, point: Vec2) -> Option<EntityId> {
        dispatch::pick(&self.live, point, self.tuning.hit_radius)
    }

    /// Pointer selection: hit-test, then resolve
    pub fn select_at(&mut self, point: Vec2) -> Option<Outcome> {
        if !self.session.is_playing() {
            return None;
        }
        let id = self.pick(point)?;
        self.select(id)
    }

    /// Hand pending effect events to the presentation layer, oldest first
    pub fn drain_events(&mut self) -> Vec<EffectEvent> {
        self.effects.drain()
    }

    pub fn pending_events(&self) -> usize {
        self.effects.len()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.session, self.tuning.area, self.live.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{EntityKind, Payoff};
    use crate::sim::events::EffectKind;
    use crate::sim::session::Phase;

    fn launch_at(kind: EntityKind, pos: Vec2, vel: Vec2) -> Launch {
        let payoff = match kind {
            EntityKind::Regular => Payoff::Points(10),
            EntityKind::Hazard => Payoff::LifeCost,
            EntityKind::Bonus => Payoff::Points(50),
        };
        Launch {
            kind,
            variant: 0,
            pos,
            vel,
            rotation_speed: 0.0,
            payoff,
        }
    }

    #[test]
    fn test_new_game_is_idle_and_unscheduled() {
        let game = Game::new(1);
        assert_eq!(game.session().phase(), Phase::Idle);
        assert_eq!(game.session().lives(), 3);
        assert_eq!(game.session().score(), 0);
        assert!(!game.is_scheduled());
        assert!(game.live().is_empty());
    }

    #[test]
    fn test_scenario_regular_hit() {
        let mut game = Game::new(1);
        game.start();
        let id = game
            .launch(launch_at(EntityKind::Regular, Vec2::new(300.0, 300.0), Vec2::ZERO))
            .expect("playing");

        assert_eq!(game.select(id), Some(Outcome::Scored { points: 10, score: 10 }));
        assert_eq!(game.session().score(), 10);
        assert_eq!(game.session().lives(), 3);
        assert!(!game.session().is_over());
    }

    #[test]
    fn test_scenario_three_hazards() {
        let mut game = Game::new(1);
        game.start();
        for _ in 0..3 {
            let id = game
                .launch(launch_at(EntityKind::Hazard, Vec2::new(300.0, 300.0), Vec2::ZERO))
                .expect("playing");
            game.select(id);
        }

        assert_eq!(game.session().lives(), 0);
        assert!(game.session().is_over());
        assert!(!game.session().is_playing());
        assert!(!game.is_scheduled());
    }

    #[test]
    fn test_scenario_fallen_regular_costs_life() {
        let mut game = Game::new(1);
        game.start();
        let height = game.tuning().area.height;
        let fallen = Vec2::new(400.0, height + 101.0);
        let id = game
            .launch(launch_at(EntityKind::Regular, fallen, Vec2::ZERO))
            .expect("playing");

        game.frame_now();

        assert!(!game.live().contains(id));
        assert_eq!(game.session().lives(), 2);
    }

    #[test]
    fn test_scenario_unknown_selection() {
        let mut game = Game::new(1);
        game.start();
        game.launch(launch_at(EntityKind::Regular, Vec2::new(300.0, 300.0), Vec2::ZERO));
        let before = game.snapshot();

        assert!(game.select(12345).is_none());
        assert_eq!(game.snapshot(), before);
        assert_eq!(game.pending_events(), 0);
    }

    #[test]
    fn test_start_clears_previous_run() {
        let mut game = Game::new(5);
        let first = game.start();
        game.spawn_now();
        game.launch(launch_at(EntityKind::Hazard, Vec2::new(10.0, 10.0), Vec2::ZERO));
        game.select_at(Vec2::new(10.0, 10.0));
        assert!(game.pending_events() > 0);

        let second = game.start();

        assert_ne!(first, second);
        assert!(!game.scheduler.is_active(first.spawn));
        assert!(!game.scheduler.is_active(first.frame));
        assert!(game.is_scheduled());
        assert!(game.live().is_empty());
        assert_eq!(game.pending_events(), 0);
        assert_eq!(game.session().lives(), 3);
    }

    #[test]
    fn test_stop_cancels_and_gates() {
        let mut game = Game::new(5);
        game.start();
        game.stop();

        assert_eq!(game.session().phase(), Phase::Idle);
        assert!(!game.session().is_over());
        assert!(!game.is_scheduled());
        assert!(game.spawn_now().is_none());
        assert!(game.launch(launch_at(EntityKind::Regular, Vec2::ZERO, Vec2::ZERO)).is_none());
    }

    #[test]
    fn test_launch_rejects_mismatched_payoff() {
        let mut game = Game::new(5);
        game.start();
        let regular_costing_life = Launch {
            payoff: Payoff::LifeCost,
            ..launch_at(EntityKind::Regular, Vec2::new(300.0, 300.0), Vec2::ZERO)
        };
        let paying_hazard = Launch {
            payoff: Payoff::Points(10),
            ..launch_at(EntityKind::Hazard, Vec2::new(300.0, 300.0), Vec2::ZERO)
        };

        assert!(game.launch(regular_costing_life).is_none());
        assert!(game.launch(paying_hazard).is_none());
        assert!(game.live().is_empty());
        assert_eq!(game.session().lives(), 3);
    }

    #[test]
    fn test_teardown_without_start() {
        let mut game = Game::new(5);
        game.teardown();
        assert_eq!(game.scheduler.active_count(), 0);
        assert_eq!(game.session().phase(), Phase::Idle);
    }

    #[test]
    fn test_teardown_cancels_running_session() {
        let mut game = Game::new(5);
        game.start();
        game.teardown();
        assert_eq!(game.scheduler.active_count(), 0);
        assert!(!game.session().is_playing());
    }

    #[test]
    fn test_select_at_uses_hit_radius() {
        let mut game = Game::new(5);
        game.start();
        let id = game
            .launch(launch_at(EntityKind::Bonus, Vec2::new(200.0, 200.0), Vec2::ZERO))
            .expect("playing");

        assert_eq!(game.pick(Vec2::new(230.0, 200.0)), Some(id));
        assert!(game.select_at(Vec2::new(300.0, 200.0)).is_none());
        assert_eq!(
            game.select_at(Vec2::new(230.0, 200.0)),
            Some(Outcome::Scored { points: 50, score: 50 })
        );

        let events = game.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EffectKind::Hit);
        assert_eq!(events[0].magnitude, 50);
    }

    #[test]
    fn test_retune_rejected_while_playing() {
        let mut game = Game::new(5);
        game.start();
        let err = game.retune(Tuning::with_area(1024.0, 768.0)).unwrap_err();
        assert!(matches!(err, TuningError::SessionActive));

        game.stop();
        game.retune(Tuning::with_area(1024.0, 768.0)).expect("idle retune");
        assert_eq!(game.tuning().area.width, 1024.0);
    }

    #[test]
    fn test_with_tuning_validates() {
        let bad = Tuning {
            starting_lives: 0,
            ..Tuning::default()
        };
        assert!(Game::with_tuning(bad, 1).is_err());

        let game = Game::with_tuning(
            Tuning {
                starting_lives: 5,
                ..Tuning::default()
            },
            1,
        )
        .expect("valid");
        assert_eq!(game.session().lives(), 5);
    }

    #[test]
    fn test_ids_unique_across_spawns_and_launches() {
        let mut game = Game::new(3);
        game.start();
        let mut ids = Vec::new();
        for _ in 0..20 {
            ids.push(game.spawn_now().expect("playing").id);
            ids.push(
                game.launch(launch_at(EntityKind::Regular, Vec2::ZERO, Vec2::ZERO))
                    .expect("playing"),
            );
        }
        let mut deduped = ids.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }
}
