//! Asteroids and splitting

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind};
use super::torus::ToroidalSpace;
use crate::consts::*;
use crate::normalize_angle;

/// Asteroid size; the ordinal drives radius and speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SizeTier {
    Small = 1,
    Medium = 2,
    Large = 3,
}

impl SizeTier {
    pub fn ordinal(self) -> u32 {
        self as u32
    }

    pub fn radius(self) -> f32 {
        ASTEROID_RADIUS_PER_TIER * self.ordinal() as f32
    }

    /// Travel speed; smaller tiers are faster
    pub fn speed(self) -> f32 {
        ASTEROID_BASE_SPEED + (4 - self.ordinal()) as f32 * ASTEROID_SPEED_STEP
    }

    /// Tier produced by splitting, `None` for the smallest
    pub fn smaller(self) -> Option<SizeTier> {
        match self {
            SizeTier::Large => Some(SizeTier::Medium),
            SizeTier::Medium => Some(SizeTier::Small),
            SizeTier::Small => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeTier::Small => "small",
            SizeTier::Medium => "medium",
            SizeTier::Large => "large",
        }
    }
}

/// Asteroid-specific state (fixed at construction)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub size: SizeTier,
    /// Cosmetic rotation speed, radians per second
    pub spin: f32,
    /// Per-vertex radius multipliers for the drawn outline
    pub outline: Vec<f32>,
}

impl Asteroid {
    /// Create an asteroid entity with random heading, spin and outline
    pub fn spawn<R: Rng + ?Sized>(pos: Vec2, size: SizeTier, rng: &mut R) -> Entity {
        let angle = rng.random_range(0.0..TAU);
        let vel = Vec2::from_angle(angle) * size.speed();
        let spin = rng.random_range(-ASTEROID_MAX_SPIN..ASTEROID_MAX_SPIN);
        let outline = (0..ASTEROID_OUTLINE_VERTICES)
            .map(|_| 1.0 + rng.random_range(-ASTEROID_OUTLINE_JITTER..ASTEROID_OUTLINE_JITTER))
            .collect();

        Entity::new(pos, vel, EntityKind::Asteroid(Asteroid { size, spin, outline }))
    }

    pub fn radius(&self) -> f32 {
        self.size.radius()
    }

    /// Outline vertices relative to the asteroid center
    pub fn outline_points(&self, rotation: f32) -> Vec<Vec2> {
        let radius = self.radius();
        let count = self.outline.len().max(1) as f32;
        self.outline
            .iter()
            .enumerate()
            .map(|(i, scale)| {
                let angle = rotation + (i as f32 / count) * TAU;
                Vec2::from_angle(angle) * radius * scale
            })
            .collect()
    }
}

/// Break an asteroid into its children.
///
/// Small asteroids vanish (empty result). Larger ones yield exactly two
/// asteroids one tier smaller near the parent, each with a fresh random
/// velocity.
pub fn split<R: Rng + ?Sized>(entity: &Entity, rng: &mut R) -> Vec<Entity> {
    let Some(child_size) = entity.as_asteroid().and_then(|a| a.size.smaller()) else {
        return Vec::new();
    };

    (0..2)
        .map(|_| {
            let offset = Vec2::new(
                rng.random_range(-SPLIT_JITTER..SPLIT_JITTER),
                rng.random_range(-SPLIT_JITTER..SPLIT_JITTER),
            );
            Asteroid::spawn(entity.pos + offset, child_size, rng)
        })
        .collect()
}

pub(crate) fn update(entity: &mut Entity, delta: f32, space: &ToroidalSpace) {
    let Entity {
        pos,
        vel,
        rotation,
        kind: EntityKind::Asteroid(asteroid),
        ..
    } = entity
    else {
        return;
    };

    *rotation = normalize_angle(*rotation + asteroid.spin * delta / 1000.0);
    *pos = space.wrap(super::entity::integrate(*pos, *vel, delta));
}
