//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-supplied time only, fixed-period jobs
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autoplay;
pub mod dispatch;
pub mod entity;
pub mod events;
pub mod live;
pub mod physics;
pub mod schedule;
pub mod session;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autoplay::choose_target;
pub use dispatch::{Outcome, pick, resolve};
pub use entity::{Entity, EntityId, EntityKind, Launch, Payoff};
pub use events::{EffectEvent, EffectKind, EffectQueue};
pub use live::LiveSet;
pub use physics::{Exit, ExitReason, FrameReport, Integrator, frame};
pub use schedule::{Fire, Horizon, Job, ScheduleHandle, Scheduler};
pub use session::{LifeLoss, Phase, SessionHandles, SessionState};
pub use snapshot::Snapshot;
pub use spawner::{Side, Spawner, kind_for_roll};
pub use state::Game;
pub use tick::TickSummary;
