//! Projectiles fired by the ship

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind};
use super::torus::ToroidalSpace;
use crate::consts::*;
use crate::heading;

/// Projectile-specific state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Projectile {
    /// Milliseconds since firing
    pub time_alive: f32,
}

impl Projectile {
    pub const RADIUS: f32 = PROJECTILE_RADIUS;

    /// Fire from `pos` along the heading for `rotation`
    pub fn spawn(pos: Vec2, rotation: f32) -> Entity {
        let mut entity = Entity::new(
            pos,
            heading(rotation) * PROJECTILE_SPEED,
            EntityKind::Projectile(Projectile::default()),
        );
        entity.rotation = rotation;
        entity
    }

    /// Milliseconds until expiry
    pub fn remaining(&self) -> f32 {
        (PROJECTILE_LIFETIME_MS - self.time_alive).max(0.0)
    }
}

pub(crate) fn update(entity: &mut Entity, delta: f32, space: &ToroidalSpace) {
    let Entity {
        pos,
        vel,
        active,
        kind: EntityKind::Projectile(projectile),
        ..
    } = entity
    else {
        return;
    };

    projectile.time_alive += delta;
    if projectile.time_alive >= PROJECTILE_LIFETIME_MS {
        *active = false;
        return;
    }

    *pos = space.wrap(super::entity::integrate(*pos, *vel, delta));
}
