//! Data-driven game balance
//!
//! Every tunable number the simulation reads lives in [`Tuning`]. Defaults
//! come from [`crate::consts`]; a JSON document can override any subset of
//! fields and missing keys fall back to the defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or installing a [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
    #[error("tuning cannot change while a session is playing")]
    SessionActive,
}

/// Screen-space play area, fixed for a session's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayArea {
    fn default() -> Self {
        Self {
            width: PLAY_WIDTH,
            height: PLAY_HEIGHT,
        }
    }
}

impl PlayArea {
    /// Entities below this line have fallen out of play
    pub fn fall_line(&self) -> f32 {
        self.height + FALL_MARGIN
    }

    /// True if `x` is past either horizontal cull bound
    pub fn outside_sides(&self, x: f32) -> bool {
        x <= -SIDE_MARGIN || x >= self.width + SIDE_MARGIN
    }

    /// True if the point is on screen
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

/// Inclusive range for uniform draws
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub area: PlayArea,
    pub gravity: f32,
    /// Horizontal speed magnitude; left launches draw `[min, max]`, right launches `[-max, -min]`
    pub horizontal_speed: Span,
    pub launch_speed: Span,
    pub spin: Span,
    pub spawn_period_ms: f64,
    pub frame_period_ms: f64,
    pub regular_threshold: f64,
    pub hazard_threshold: f64,
    pub regular_points: u32,
    pub bonus_points: u32,
    pub regular_variants: u8,
    pub starting_lives: u32,
    pub hit_radius: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            area: PlayArea::default(),
            gravity: GRAVITY,
            horizontal_speed: Span::new(HORIZONTAL_SPEED_MIN, HORIZONTAL_SPEED_MAX),
            launch_speed: Span::new(LAUNCH_SPEED_MIN, LAUNCH_SPEED_MAX),
            spin: Span::new(SPIN_MIN, SPIN_MAX),
            spawn_period_ms: SPAWN_PERIOD_MS,
            frame_period_ms: FRAME_PERIOD_MS,
            regular_threshold: REGULAR_THRESHOLD,
            hazard_threshold: HAZARD_THRESHOLD,
            regular_points: REGULAR_POINTS,
            bonus_points: BONUS_POINTS,
            regular_variants: REGULAR_VARIANTS,
            starting_lives: STARTING_LIVES,
            hit_radius: HIT_RADIUS,
        }
    }
}

impl Tuning {
    /// Default tuning with a custom play area
    pub fn with_area(width: f32, height: f32) -> Self {
        Self {
            area: PlayArea { width, height },
            ..Self::default()
        }
    }

    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for dumping the active balance)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |field: &'static str, reason: &'static str| -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        };

        if !(self.area.width.is_finite() && self.area.width > 0.0) {
            return invalid("area.width", "must be positive and finite");
        }
        if !(self.area.height.is_finite() && self.area.height > 0.0) {
            return invalid("area.height", "must be positive and finite");
        }
        if !self.gravity.is_finite() {
            return invalid("gravity", "must be finite");
        }
        if !self.horizontal_speed.is_valid() || self.horizontal_speed.min < 0.0 {
            return invalid("horizontal_speed", "must be a non-negative min <= max range");
        }
        if !self.launch_speed.is_valid() {
            return invalid("launch_speed", "must be a finite min <= max range");
        }
        if !self.spin.is_valid() {
            return invalid("spin", "must be a finite min <= max range");
        }
        if !(self.spawn_period_ms.is_finite() && self.spawn_period_ms >= MIN_PERIOD_MS) {
            return invalid("spawn_period_ms", "must be finite and at least 1 ms");
        }
        if !(self.frame_period_ms.is_finite() && self.frame_period_ms >= MIN_PERIOD_MS) {
            return invalid("frame_period_ms", "must be finite and at least 1 ms");
        }
        if !(0.0..=1.0).contains(&self.regular_threshold)
            || !(0.0..=1.0).contains(&self.hazard_threshold)
            || self.regular_threshold > self.hazard_threshold
        {
            return invalid(
                "regular_threshold/hazard_threshold",
                "must satisfy 0 <= regular <= hazard <= 1",
            );
        }
        if self.starting_lives == 0 {
            return invalid("starting_lives", "must be at least 1");
        }
        if self.regular_variants == 0 {
            return invalid("regular_variants", "must be at least 1");
        }
        if !(self.hit_radius.is_finite() && self.hit_radius >= 0.0) {
            return invalid("hit_radius", "must be non-negative and finite");
        }
        Ok(())
    }
}
