//! Tagged entity record
//!
//! Ships, asteroids and projectiles share one record for the motion state
//! every body has. Per-kind data lives in [`EntityKind`], and the free
//! functions [`update`] and [`collision_radius`] dispatch on the tag.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::asteroid::{self, Asteroid};
use super::projectile::{self, Projectile};
use super::ship::{self, Ship};
use super::torus::ToroidalSpace;
use crate::input::TickInput;

/// Per-kind behavior data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EntityKind {
    Ship(Ship),
    Asteroid(Asteroid),
    Projectile(Projectile),
}

/// A moving body in the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub pos: Vec2,
    /// Units per second
    pub vel: Vec2,
    /// Radians, 0 = facing up
    pub rotation: f32,
    /// Cleared to destroy; the owning collection sweeps it
    pub active: bool,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(pos: Vec2, vel: Vec2, kind: EntityKind) -> Self {
        Self {
            pos,
            vel,
            rotation: 0.0,
            active: true,
            kind,
        }
    }

    /// Move by velocity over `delta` milliseconds
    pub fn integrate(&mut self, delta: f32) {
        self.pos = integrate(self.pos, self.vel, delta);
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn as_ship(&self) -> Option<&Ship> {
        match &self.kind {
            EntityKind::Ship(ship) => Some(ship),
            _ => None,
        }
    }

    pub fn as_ship_mut(&mut self) -> Option<&mut Ship> {
        match &mut self.kind {
            EntityKind::Ship(ship) => Some(ship),
            _ => None,
        }
    }

    pub fn as_asteroid(&self) -> Option<&Asteroid> {
        match &self.kind {
            EntityKind::Asteroid(asteroid) => Some(asteroid),
            _ => None,
        }
    }

    pub fn as_projectile(&self) -> Option<&Projectile> {
        match &self.kind {
            EntityKind::Projectile(projectile) => Some(projectile),
            _ => None,
        }
    }
}

/// Position after moving at `vel` (units/s) for `delta` milliseconds
#[inline]
pub fn integrate(pos: Vec2, vel: Vec2, delta: f32) -> Vec2 {
    pos + vel * (delta / 1000.0)
}

/// Radius used for overlap tests and ghost placement
pub fn collision_radius(entity: &Entity) -> f32 {
    match &entity.kind {
        EntityKind::Ship(_) => Ship::RADIUS,
        EntityKind::Asteroid(asteroid) => asteroid.radius(),
        EntityKind::Projectile(_) => Projectile::RADIUS,
    }
}

/// Advance one entity by `delta` milliseconds.
///
/// Inactive entities and non-positive deltas are skipped.
pub fn update(entity: &mut Entity, delta: f32, space: &ToroidalSpace, input: &TickInput) {
    if !entity.active || !(delta > 0.0) {
        return;
    }
    match entity.kind {
        EntityKind::Ship(_) => ship::update(entity, delta, space, input),
        EntityKind::Asteroid(_) => asteroid::update(entity, delta, space),
        EntityKind::Projectile(_) => projectile::update(entity, delta, space),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SizeTier;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_integrate_uses_milliseconds() {
        let mut e = Projectile::spawn(Vec2::new(100.0, 100.0), 0.0);
        e.vel = Vec2::new(100.0, -50.0);
        e.integrate(500.0);
        assert!((e.pos - Vec2::new(150.0, 75.0)).length() < 1e-4);
    }

    #[test]
    fn test_collision_radius_by_kind() {
        let mut rng = Pcg32::seed_from_u64(1);
        let ship = Ship::spawn(Vec2::ZERO);
        let rock = Asteroid::spawn(Vec2::ZERO, SizeTier::Large, &mut rng);
        let shot = Projectile::spawn(Vec2::ZERO, 0.0);
        assert_eq!(collision_radius(&ship), 15.0);
        assert_eq!(collision_radius(&rock), 30.0);
        assert_eq!(collision_radius(&shot), 2.0);
    }

    #[test]
    fn test_update_skips_bad_delta() {
        let space = ToroidalSpace::new(800.0, 600.0);
        let mut shot = Projectile::spawn(Vec2::new(400.0, 300.0), 0.0);
        let before = shot.pos;

        update(&mut shot, 0.0, &space, &TickInput::default());
        update(&mut shot, -16.0, &space, &TickInput::default());
        update(&mut shot, f32::NAN, &space, &TickInput::default());
        assert_eq!(shot.pos, before);
        assert_eq!(shot.as_projectile().map(|p| p.time_alive), Some(0.0));
    }

    #[test]
    fn test_update_skips_inactive() {
        let space = ToroidalSpace::new(800.0, 600.0);
        let mut shot = Projectile::spawn(Vec2::new(400.0, 300.0), 0.0);
        shot.active = false;
        let before = shot.pos;
        update(&mut shot, 16.0, &space, &TickInput::default());
        assert_eq!(shot.pos, before);
    }
}
