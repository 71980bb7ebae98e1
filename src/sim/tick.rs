//! Scheduler-driven simulation advance
//!
//! The host reports how much wall-clock time passed; every spawn and frame
//! fire that fell due in that window runs in timestamp order.

use super::entity::EntityId;
use super::schedule::Job;
use super::state::Game;

/// What one `advance` call did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickSummary {
    pub spawned: Vec<EntityId>,
    pub frames: u32,
    /// Entities the integrator removed, misses and silent culls alike
    pub culled: Vec<EntityId>,
    pub lives_lost: u32,
    pub game_over: bool,
}

impl Game {
    /// Advance the simulation by `elapsed_ms` of host time
    pub fn advance(&mut self, elapsed_ms: f64) -> TickSummary {
        let mut summary = TickSummary::default();
        let horizon = self.scheduler.horizon(elapsed_ms);

        while let Some(fire) = self.scheduler.pop_due(horizon) {
            // A fire from a timer this session no longer owns is stale
            if !self.owns(fire.handle) {
                log::warn!("dropping stale {:?} fire at {:.1}ms", fire.job, fire.at_ms);
                self.scheduler.cancel(fire.handle);
                continue;
            }

            match fire.job {
                Job::Spawn => {
                    if let Some(entity) = self.spawn_now() {
                        summary.spawned.push(entity.id);
                    }
                }
                Job::Frame => {
                    let report = self.frame_now();
                    summary.frames += 1;
                    summary.culled.extend(report.exits.iter().map(|exit| exit.entity.id));
                    summary.lives_lost += report.lives_lost;
                    summary.game_over |= report.game_over;
                }
            }
        }

        summary
    }
}
