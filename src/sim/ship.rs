//! Player ship
//!
//! Two modes:
//! - `Flying`: reads held actions, integrates thrust/reverse/friction and
//!   fires rate-limited projectiles
//! - `Exploding`: the hull breaks into four line fragments that drift
//!   outward and fade, then the ship goes inactive
//!
//! The ship owns the projectiles it fires.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{self, Entity, EntityKind};
use super::projectile::Projectile;
use super::torus::ToroidalSpace;
use crate::consts::*;
use crate::input::TickInput;
use crate::{heading, normalize_angle, rotate};

/// Ship flight mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipMode {
    Flying,
    Exploding,
}

/// One piece of a destroyed hull, relative to the ship position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub start: Vec2,
    pub end: Vec2,
    pub vel: Vec2,
}

/// Ship-specific state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub mode: ShipMode,
    pub thrusting: bool,
    pub reversing: bool,
    /// Milliseconds since thrust/reverse last changed (drives flame fade)
    pub thrust_timer: f32,
    /// Milliseconds until the next shot is allowed
    pub fire_cooldown: f32,
    pub projectiles: Vec<Entity>,
    pub fragments: Vec<Fragment>,
    /// Milliseconds since the explosion started
    pub explosion_time: f32,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            mode: ShipMode::Flying,
            thrusting: false,
            reversing: false,
            // Start fully faded so a fresh ship shows no flame
            thrust_timer: THRUST_FADE_MS,
            fire_cooldown: SHIP_FIRE_INTERVAL_MS,
            projectiles: Vec::new(),
            fragments: Vec::new(),
            explosion_time: 0.0,
        }
    }
}

impl Ship {
    pub const RADIUS: f32 = SHIP_RADIUS;

    /// Create a stationary ship facing up
    pub fn spawn(pos: Vec2) -> Entity {
        Entity::new(pos, Vec2::ZERO, EntityKind::Ship(Ship::default()))
    }

    pub fn is_flying(&self) -> bool {
        self.mode == ShipMode::Flying
    }

    pub fn is_exploding(&self) -> bool {
        self.mode == ShipMode::Exploding
    }

    /// Flame opacity: fades in over the fade window while thrusting and
    /// fades out over the same window after release
    pub fn thrust_alpha(&self) -> f32 {
        if self.thrusting {
            (self.thrust_timer / THRUST_FADE_MS).min(1.0)
        } else if self.thrust_timer < THRUST_FADE_MS {
            1.0 - self.thrust_timer / THRUST_FADE_MS
        } else {
            0.0
        }
    }

    /// Fragment opacity while exploding
    pub fn explosion_alpha(&self) -> f32 {
        (1.0 - self.explosion_time / EXPLOSION_DURATION_MS).clamp(0.0, 1.0)
    }

    fn update_projectiles(&mut self, delta: f32, space: &ToroidalSpace, input: &TickInput) {
        self.projectiles.retain(|p| p.active);
        for projectile in &mut self.projectiles {
            entity::update(projectile, delta, space, input);
        }
    }
}

/// Hull outline in local space: nose, right flank, chevron base, left flank
pub fn hull() -> [Vec2; 4] {
    [
        Vec2::new(0.0, -SHIP_NOSE_LENGTH),
        Vec2::new(SHIP_HALF_WIDTH, SHIP_NOSE_LENGTH),
        Vec2::new(0.0, SHIP_NOSE_LENGTH - SHIP_CHEVRON_DEPTH),
        Vec2::new(-SHIP_HALF_WIDTH, SHIP_NOSE_LENGTH),
    ]
}

/// Hull outline rotated to `rotation`, relative to the ship center
pub fn hull_points(rotation: f32) -> [Vec2; 4] {
    hull().map(|p| rotate(p, rotation))
}

/// Thrust flame (open polyline) rotated to `rotation`
pub fn flame_points(rotation: f32) -> [Vec2; 3] {
    [
        Vec2::new(-5.0, SHIP_NOSE_LENGTH),
        Vec2::new(0.0, SHIP_NOSE_LENGTH + 5.0),
        Vec2::new(5.0, SHIP_NOSE_LENGTH),
    ]
    .map(|p| rotate(p, rotation))
}

/// Break the ship apart.
///
/// Returns `true` on the Flying -> Exploding transition. A ship already
/// exploding (or a non-ship entity) is left untouched.
pub fn explode(entity: &mut Entity) -> bool {
    let rotation = entity.rotation;
    let Some(ship) = entity.as_ship_mut() else {
        return false;
    };
    if ship.is_exploding() {
        return false;
    }

    ship.mode = ShipMode::Exploding;
    ship.explosion_time = 0.0;
    ship.thrusting = false;
    ship.reversing = false;
    ship.thrust_timer = 0.0;

    let points = hull_points(rotation);
    ship.fragments = (0..points.len())
        .map(|i| {
            let start = points[i];
            let end = points[(i + 1) % points.len()];
            let center = (start + end) * 0.5;
            Fragment {
                start,
                end,
                vel: center.normalize_or_zero() * FRAGMENT_SPEED,
            }
        })
        .collect();
    true
}

pub(crate) fn update(entity: &mut Entity, delta: f32, space: &ToroidalSpace, input: &TickInput) {
    let Entity {
        pos,
        vel,
        rotation,
        active,
        kind: EntityKind::Ship(ship),
    } = entity
    else {
        return;
    };

    match ship.mode {
        ShipMode::Exploding => {
            ship.update_projectiles(delta, space, input);

            ship.explosion_time += delta;
            if ship.explosion_time >= EXPLOSION_DURATION_MS {
                *active = false;
                return;
            }

            let dt = delta / 1000.0;
            for fragment in &mut ship.fragments {
                let step = fragment.vel * dt;
                fragment.start += step;
                fragment.end += step;
            }
        }
        ShipMode::Flying => {
            let dt = delta / 1000.0;

            if input.rotate_left {
                *rotation -= SHIP_ROTATION_SPEED * dt;
            }
            if input.rotate_right {
                *rotation += SHIP_ROTATION_SPEED * dt;
            }
            *rotation = normalize_angle(*rotation);

            // Thrust and reverse cancel each other out
            let was_thrusting = ship.thrusting;
            let was_reversing = ship.reversing;
            let both = input.thrust && input.reverse;
            ship.thrusting = input.thrust && !both;
            ship.reversing = input.reverse && !both;
            if ship.thrusting != was_thrusting || ship.reversing != was_reversing {
                ship.thrust_timer = 0.0;
            }
            ship.thrust_timer = (ship.thrust_timer + delta).min(THRUST_FADE_MS);

            let dir = heading(*rotation);
            if ship.thrusting {
                *vel = (*vel + dir * SHIP_ACCELERATION * dt).clamp_length_max(SHIP_MAX_SPEED);
            } else if ship.reversing {
                // Brake along the heading only; never push backwards
                let forward = vel.dot(dir);
                if forward > 0.0 {
                    let decel = (SHIP_DECELERATION * dt).min(forward);
                    *vel -= dir * decel;
                }
            }

            if input.fire && ship.fire_cooldown <= 0.0 {
                let nose = *pos + dir * SHIP_NOSE_LENGTH;
                ship.projectiles.push(Projectile::spawn(nose, *rotation));
                ship.fire_cooldown = SHIP_FIRE_INTERVAL_MS;
            }

            *vel *= SHIP_FRICTION.powf(dt);
            *pos = space.wrap(entity::integrate(*pos, *vel, delta));

            ship.update_projectiles(delta, space, input);
            ship.fire_cooldown = (ship.fire_cooldown - delta).max(0.0);
        }
    }
}
