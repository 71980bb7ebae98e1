//! Spawn policy
//!
//! One call manufactures one entity off the left or right edge with a random
//! kind, launch velocity and spin. The random source is injected so runs are
//! reproducible from a seed.

use glam::Vec2;
use rand::Rng;

use super::entity::{Entity, EntityId, EntityKind, Launch, Payoff};
use super::live::LiveSet;
use crate::consts::{EDGE_OFFSET, LAUNCH_OFFSET};
use crate::tuning::{PlayArea, Span, Tuning};

/// Edge an entity is launched from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Map a uniform `[0, 1)` roll to a kind
pub fn kind_for_roll(roll: f64, regular_threshold: f64, hazard_threshold: f64) -> EntityKind {
    if roll < regular_threshold {
        EntityKind::Regular
    } else if roll < hazard_threshold {
        EntityKind::Hazard
    } else {
        EntityKind::Bonus
    }
}

#[derive(Debug, Clone)]
pub struct Spawner {
    area: PlayArea,
    horizontal_speed: Span,
    launch_speed: Span,
    spin: Span,
    regular_threshold: f64,
    hazard_threshold: f64,
    regular_points: u32,
    bonus_points: u32,
    regular_variants: u8,
}

impl Spawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            area: tuning.area,
            horizontal_speed: tuning.horizontal_speed,
            launch_speed: tuning.launch_speed,
            spin: tuning.spin,
            regular_threshold: tuning.regular_threshold,
            hazard_threshold: tuning.hazard_threshold,
            regular_points: tuning.regular_points,
            bonus_points: tuning.bonus_points,
            regular_variants: tuning.regular_variants,
        }
    }

    /// Draw every random attribute of a new entity
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> Launch {
        let side = if rng.random_bool(0.5) {
            Side::Left
        } else {
            Side::Right
        };

        let kind = kind_for_roll(
            rng.random::<f64>(),
            self.regular_threshold,
            self.hazard_threshold,
        );
        let (variant, payoff) = match kind {
            EntityKind::Regular => (
                rng.random_range(0..self.regular_variants),
                Payoff::Points(self.regular_points),
            ),
            EntityKind::Hazard => (0, Payoff::LifeCost),
            EntityKind::Bonus => (0, Payoff::Points(self.bonus_points)),
        };

        let speed = draw(rng, self.horizontal_speed);
        let (x, vx) = match side {
            Side::Left => (-EDGE_OFFSET, speed),
            Side::Right => (self.area.width + EDGE_OFFSET, -speed),
        };
        let vy = draw(rng, self.launch_speed);
        let rotation_speed = draw(rng, self.spin);

        Launch {
            kind,
            variant,
            pos: Vec2::new(x, self.area.height - LAUNCH_OFFSET),
            vel: Vec2::new(vx, vy),
            rotation_speed,
            payoff,
        }
    }

    /// Manufacture one entity and add it to the live set.
    ///
    /// Callers gate this on the session playing.
    pub fn spawn<R: Rng + ?Sized>(&self, rng: &mut R, id: EntityId, live: &mut LiveSet) -> Entity {
        let entity = Entity::new(id, self.roll(rng));
        log::debug!(
            "spawn #{} {:?} at ({:.0}, {:.0}) vel ({:.1}, {:.1})",
            entity.id,
            entity.kind,
            entity.pos.x,
            entity.pos.y,
            entity.vel.x,
            entity.vel.y
        );
        live.insert(entity.clone());
        entity
    }
}

fn draw<R: Rng + ?Sized>(rng: &mut R, span: Span) -> f32 {
    rng.random_range(span.min..=span.max)
}
