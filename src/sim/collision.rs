//! Collision detection and scoring
//!
//! Every overlap test is ghost-aware: the distance between two bodies is
//! the smallest distance between any of their wrapped copies, so a shot
//! at the left edge still hits an asteroid hanging off the right edge.

use glam::Vec2;
use rand::Rng;

use super::asteroid::{SizeTier, split};
use super::entity::{Entity, collision_radius};
use super::ship::explode;
use super::torus::ToroidalSpace;
use crate::consts::POINTS_PER_ASTEROID;

/// An asteroid destroyed by a projectile this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsteroidHit {
    pub size: SizeTier,
    pub pos: Vec2,
}

/// Everything a collision pass changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionOutcome {
    pub hits: Vec<AsteroidHit>,
    /// Fragments added by splitting
    pub spawned: usize,
    /// Points earned this pass
    pub points: u64,
    /// The ship went from Flying to Exploding
    pub ship_hit: bool,
}

/// Whether two bodies overlap closer than `threshold` anywhere on the torus
#[inline]
pub fn wrapped_overlap(space: &ToroidalSpace, a: &Entity, b: &Entity, threshold: f32) -> bool {
    space.min_wrapped_distance(a.pos, collision_radius(a), b.pos, collision_radius(b)) < threshold
}

/// Resolve projectile hits against the asteroid list.
///
/// A projectile destroys at most one asteroid, and a destroyed asteroid is
/// removed before the next projectile is tested. Split children join the
/// list after the pass.
pub fn resolve_projectiles<R: Rng + ?Sized>(
    projectiles: &mut [Entity],
    asteroids: &mut Vec<Entity>,
    space: &ToroidalSpace,
    rng: &mut R,
    outcome: &mut CollisionOutcome,
) {
    let mut children = Vec::new();

    for projectile in projectiles.iter_mut().filter(|p| p.active) {
        let shot: &Entity = projectile;
        let hit = asteroids.iter().position(|asteroid| {
            asteroid.active && wrapped_overlap(space, shot, asteroid, collision_radius(asteroid))
        });
        let Some(index) = hit else {
            continue;
        };

        projectile.active = false;
        let asteroid = asteroids.remove(index);
        if let Some(rock) = asteroid.as_asteroid() {
            outcome.hits.push(AsteroidHit {
                size: rock.size,
                pos: asteroid.pos,
            });
        }
        outcome.points += POINTS_PER_ASTEROID;
        children.extend(split(&asteroid, rng));
    }

    outcome.spawned += children.len();
    asteroids.extend(children);
}

/// Test a flying ship against every asteroid and explode it on contact.
///
/// Returns `true` only on the transition; an exploding ship is ignored.
pub fn resolve_ship(ship: &mut Entity, asteroids: &[Entity], space: &ToroidalSpace) -> bool {
    let flying = ship.active && ship.as_ship().is_some_and(|s| s.is_flying());
    if !flying {
        return false;
    }

    let ship_radius = collision_radius(ship);
    let touching = asteroids.iter().any(|asteroid| {
        asteroid.active && wrapped_overlap(space, ship, asteroid, ship_radius + collision_radius(asteroid))
    });

    touching && explode(ship)
}

/// Full collision pass: ship projectiles vs asteroids, then ship vs asteroids
pub fn resolve<R: Rng + ?Sized>(
    ship: &mut Entity,
    asteroids: &mut Vec<Entity>,
    space: &ToroidalSpace,
    rng: &mut R,
) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();

    if let Some(state) = ship.as_ship_mut() {
        resolve_projectiles(&mut state.projectiles, asteroids, space, rng, &mut outcome);
    }
    outcome.ship_hit = resolve_ship(ship, asteroids, space);

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Asteroid, Projectile, Ship};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn space() -> ToroidalSpace {
        ToroidalSpace::new(800.0, 600.0)
    }

    fn still_rock(pos: Vec2, size: SizeTier, rng: &mut Pcg32) -> Entity {
        let mut rock = Asteroid::spawn(pos, size, rng);
        rock.vel = Vec2::ZERO;
        rock
    }

    #[test]
    fn test_projectile_hits_through_wrap_edge() {
        let mut rng = Pcg32::seed_from_u64(1);
        let space = space();
        let mut shots = vec![Projectile::spawn(Vec2::new(10.0, 300.0), 0.0)];
        let mut rocks = vec![still_rock(Vec2::new(798.0, 300.0), SizeTier::Medium, &mut rng)];

        // Raw distance is far beyond the radius
        assert!(shots[0].pos.distance(rocks[0].pos) > SizeTier::Medium.radius());

        let mut outcome = CollisionOutcome::default();
        resolve_projectiles(&mut shots, &mut rocks, &space, &mut rng, &mut outcome);

        assert!(!shots[0].active);
        assert_eq!(outcome.hits.len(), 1);
        assert_eq!(outcome.hits[0].size, SizeTier::Medium);
        assert_eq!(outcome.points, POINTS_PER_ASTEROID);
        assert_eq!(outcome.spawned, 2);
        assert_eq!(rocks.len(), 2);
        assert!(rocks.iter().all(|r| r.as_asteroid().map(|a| a.size) == Some(SizeTier::Small)));
    }

    #[test]
    fn test_projectile_miss() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut shots = vec![Projectile::spawn(Vec2::new(100.0, 100.0), 0.0)];
        let mut rocks = vec![still_rock(Vec2::new(400.0, 300.0), SizeTier::Large, &mut rng)];
        let mut outcome = CollisionOutcome::default();
        resolve_projectiles(&mut shots, &mut rocks, &space(), &mut rng, &mut outcome);
        assert!(shots[0].active);
        assert_eq!(rocks.len(), 1);
        assert_eq!(outcome, CollisionOutcome::default());
    }

    #[test]
    fn test_projectile_destroys_at_most_one() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut shots = vec![Projectile::spawn(Vec2::new(400.0, 300.0), 0.0)];
        let mut rocks = vec![
            still_rock(Vec2::new(402.0, 300.0), SizeTier::Small, &mut rng),
            still_rock(Vec2::new(398.0, 300.0), SizeTier::Small, &mut rng),
        ];
        let mut outcome = CollisionOutcome::default();
        resolve_projectiles(&mut shots, &mut rocks, &space(), &mut rng, &mut outcome);
        assert_eq!(outcome.hits.len(), 1);
        assert_eq!(rocks.len(), 1);
    }

    #[test]
    fn test_destroyed_asteroid_not_hit_twice() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut shots = vec![
            Projectile::spawn(Vec2::new(400.0, 300.0), 0.0),
            Projectile::spawn(Vec2::new(401.0, 300.0), 0.0),
        ];
        let mut rocks = vec![still_rock(Vec2::new(400.0, 300.0), SizeTier::Small, &mut rng)];
        let mut outcome = CollisionOutcome::default();
        resolve_projectiles(&mut shots, &mut rocks, &space(), &mut rng, &mut outcome);
        assert_eq!(outcome.hits.len(), 1);
        assert!(!shots[0].active);
        assert!(shots[1].active);
        assert!(rocks.is_empty());
    }

    #[test]
    fn test_inactive_projectiles_ignored() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut shot = Projectile::spawn(Vec2::new(400.0, 300.0), 0.0);
        shot.active = false;
        let mut shots = vec![shot];
        let mut rocks = vec![still_rock(Vec2::new(400.0, 300.0), SizeTier::Small, &mut rng)];
        let mut outcome = CollisionOutcome::default();
        resolve_projectiles(&mut shots, &mut rocks, &space(), &mut rng, &mut outcome);
        assert_eq!(rocks.len(), 1);
    }

    #[test]
    fn test_ship_hit_uses_combined_radius() {
        let mut rng = Pcg32::seed_from_u64(2);
        let space = space();
        let rocks = vec![still_rock(Vec2::new(400.0, 344.0), SizeTier::Large, &mut rng)];

        let mut ship = Ship::spawn(Vec2::new(400.0, 300.0));
        assert!(resolve_ship(&mut ship, &rocks, &space));
        assert!(ship.as_ship().is_some_and(|s| s.is_exploding()));

        let far = vec![still_rock(Vec2::new(400.0, 346.0), SizeTier::Large, &mut rng)];
        let mut ship = Ship::spawn(Vec2::new(400.0, 300.0));
        assert!(!resolve_ship(&mut ship, &far, &space));
    }

    #[test]
    fn test_ship_hit_across_corner() {
        let mut rng = Pcg32::seed_from_u64(2);
        let rocks = vec![still_rock(Vec2::new(795.0, 595.0), SizeTier::Small, &mut rng)];
        let mut ship = Ship::spawn(Vec2::new(5.0, 5.0));
        assert!(resolve_ship(&mut ship, &rocks, &space()));
    }

    #[test]
    fn test_exploding_ship_not_retriggered() {
        let mut rng = Pcg32::seed_from_u64(2);
        let rocks = vec![still_rock(Vec2::new(400.0, 300.0), SizeTier::Large, &mut rng)];
        let mut ship = Ship::spawn(Vec2::new(400.0, 300.0));
        assert!(resolve_ship(&mut ship, &rocks, &space()));
        let fragments = ship.as_ship().map(|s| s.fragments.clone());
        assert!(!resolve_ship(&mut ship, &rocks, &space()));
        assert_eq!(ship.as_ship().map(|s| s.fragments.clone()), fragments);
    }

    #[test]
    fn test_full_pass_scores_and_explodes() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut ship = Ship::spawn(Vec2::new(400.0, 300.0));
        if let Some(state) = ship.as_ship_mut() {
            state.projectiles.push(Projectile::spawn(Vec2::new(100.0, 100.0), 0.0));
        }
        let mut rocks = vec![
            still_rock(Vec2::new(100.0, 100.0), SizeTier::Large, &mut rng),
            still_rock(Vec2::new(400.0, 320.0), SizeTier::Small, &mut rng),
        ];

        let outcome = resolve(&mut ship, &mut rocks, &space(), &mut rng);
        assert_eq!(outcome.points, POINTS_PER_ASTEROID);
        assert_eq!(outcome.spawned, 2);
        assert!(outcome.ship_hit);
        assert_eq!(rocks.len(), 3);
    }
}
