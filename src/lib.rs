//! Sky Slice - a launch-and-slice arcade reflex game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, dispatch, session state)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, audio and UI chrome live outside this crate. They read
//! [`sim::Snapshot`]s and drain [`sim::EffectEvent`]s.

pub mod sim;
pub mod tuning;

pub use sim::{EffectEvent, EffectKind, EntityId, EntityKind, Game, Phase, Snapshot};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Play area defaults (screen-space, y grows downward)
    pub const PLAY_WIDTH: f32 = 800.0;
    pub const PLAY_HEIGHT: f32 = 600.0;

    /// Downward acceleration added to `vy` every frame (units/tick²)
    pub const GRAVITY: f32 = 0.5;

    /// Spawner period
    pub const SPAWN_PERIOD_MS: f64 = 1500.0;
    /// Integrator period (display refresh, ~60 Hz)
    pub const FRAME_PERIOD_MS: f64 = 1000.0 / 60.0;
    /// Longest host gap honoured by one `advance` call (backgrounded tab, debugger pause)
    pub const MAX_FRAME_GAP_MS: f64 = 250.0;
    /// Shortest timer period the scheduler arms
    pub const MIN_PERIOD_MS: f64 = 1.0;

    /// Entities enter this far outside the left/right edge
    pub const EDGE_OFFSET: f32 = 60.0;
    /// Entities launch this far above the bottom edge
    pub const LAUNCH_OFFSET: f32 = 100.0;
    /// Entity is culled once `y > height + FALL_MARGIN`
    pub const FALL_MARGIN: f32 = 100.0;
    /// Entity is culled once `x <= -SIDE_MARGIN` or `x >= width + SIDE_MARGIN`
    pub const SIDE_MARGIN: f32 = 100.0;

    /// Horizontal speed magnitude range (sign depends on launch side)
    pub const HORIZONTAL_SPEED_MIN: f32 = 2.0;
    pub const HORIZONTAL_SPEED_MAX: f32 = 6.0;
    /// Upward launch speed range (negative = up)
    pub const LAUNCH_SPEED_MIN: f32 = -14.0;
    pub const LAUNCH_SPEED_MAX: f32 = -8.0;
    /// Cosmetic spin range (degrees/tick)
    pub const SPIN_MIN: f32 = -5.0;
    pub const SPIN_MAX: f32 = 5.0;

    /// Kind roll thresholds: below REGULAR -> Regular, below HAZARD -> Hazard, else Bonus
    pub const REGULAR_THRESHOLD: f64 = 0.70;
    pub const HAZARD_THRESHOLD: f64 = 0.85;

    pub const REGULAR_POINTS: u32 = 10;
    pub const BONUS_POINTS: u32 = 50;
    /// Number of visual variants a Regular entity can take
    pub const REGULAR_VARIANTS: u8 = 10;

    pub const STARTING_LIVES: u32 = 3;

    /// Pointer hit-test radius around an entity's center
    pub const HIT_RADIUS: f32 = 40.0;
}

/// Normalized angle to [-180, 180) degrees
#[inline]
pub fn normalize_degrees(mut angle: f32) -> f32 {
    while angle >= 180.0 {
        angle -= 360.0;
    }
    while angle < -180.0 {
        angle += 360.0;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(190.0), -170.0);
        assert_eq!(normalize_degrees(-190.0), 170.0);
        assert_eq!(normalize_degrees(180.0), -180.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
    }
}
