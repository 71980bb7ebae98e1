//! Launched entities and their physical/semantic attributes

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::normalize_degrees;

/// Stable identifier, assigned at spawn
pub type EntityId = u32;

/// Entity category, fixed at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Scorable
    Regular,
    /// Costs a life when selected; letting it fall is the correct play
    Hazard,
    /// High-value scorable
    Bonus,
}

impl EntityKind {
    /// Regular and Bonus entities cost a life when they fall unresolved
    pub fn is_scorable(self) -> bool {
        !matches!(self, EntityKind::Hazard)
    }

    /// Hazards cost a life when selected, every other kind pays points
    pub fn accepts(self, payoff: Payoff) -> bool {
        self.is_scorable() == matches!(payoff, Payoff::Points(_))
    }
}

/// What resolving an entity by selection is worth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payoff {
    Points(u32),
    LifeCost,
}

/// Everything the spawner decides for a new entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub kind: EntityKind,
    /// Visual variant index, only meaningful for Regular
    pub variant: u8,
    pub pos: Vec2,
    pub vel: Vec2,
    pub rotation_speed: f32,
    pub payoff: Payoff,
}

impl Launch {
    /// Kind and payoff agree, so selection and falling treat the entity alike
    pub fn is_consistent(&self) -> bool {
        self.kind.accepts(self.payoff)
    }
}

/// A launched object
///
/// Treated as a value: the integrator produces a stepped copy each frame
/// instead of editing fields in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub variant: u8,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Degrees, cosmetic
    pub rotation: f32,
    /// Degrees per tick, cosmetic
    pub rotation_speed: f32,
    pub payoff: Payoff,
}

impl Entity {
    pub fn new(id: EntityId, launch: Launch) -> Self {
        debug_assert!(launch.is_consistent(), "{:?} cannot pay {:?}", launch.kind, launch.payoff);
        Self {
            id,
            kind: launch.kind,
            variant: launch.variant,
            pos: launch.pos,
            vel: launch.vel,
            rotation: 0.0,
            rotation_speed: launch.rotation_speed,
            payoff: launch.payoff,
        }
    }

    /// One integration step: move by the current velocity, then apply gravity and spin
    #[must_use]
    pub fn stepped(&self, gravity: f32) -> Self {
        Self {
            pos: self.pos + self.vel,
            vel: Vec2::new(self.vel.x, self.vel.y + gravity),
            rotation: normalize_degrees(self.rotation + self.rotation_speed),
            ..self.clone()
        }
    }

    /// Pointer hit-test
    pub fn contains(&self, point: Vec2, radius: f32) -> bool {
        self.pos.distance_squared(point) <= radius * radius
    }
}
