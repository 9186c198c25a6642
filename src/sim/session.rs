//! Session state and the per-tick update
//!
//! The session owns every entity, the score and the level counter. It is
//! the only thing that mutates them, and only from inside [`Session::update`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::{Asteroid, SizeTier};
use super::collision::{self, CollisionOutcome};
use super::entity::{self, Entity};
use super::ship::Ship;
use super::torus::ToroidalSpace;
use crate::config::SimConfig;
use crate::consts::LEVEL_ASTEROID_BASE;
use crate::input::{InputSource, TickInput};

/// Something the host may want to react to (HUD, effects)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    LevelStarted { level: u32, asteroids: usize },
    AsteroidDestroyed { size: SizeTier, pos: Vec2, score: u64 },
    ShipExploded { pos: Vec2 },
    ShipRespawned { pos: Vec2 },
}

/// Large asteroids seeded at the start of `level`
pub fn asteroid_count_for_level(level: u32, initial: u32) -> usize {
    if level <= 1 {
        initial as usize
    } else {
        (LEVEL_ASTEROID_BASE + level) as usize
    }
}

/// One running game
#[derive(Debug, Clone)]
pub struct Session {
    pub config: SimConfig,
    pub space: ToroidalSpace,
    pub score: u64,
    /// Current level (1-based)
    pub level: u32,
    pub ship: Entity,
    pub asteroids: Vec<Entity>,
    /// Simulated milliseconds since the session started
    pub time_ms: f64,
    /// When the destroyed ship gets replaced
    pub respawn_at: Option<f64>,
    rng: Pcg32,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Start a session at level 1 with the ship at the arena center.
    ///
    /// `config` must pass [`SimConfig::validate`]; a zero-sized arena cannot
    /// place asteroids.
    pub fn new(config: SimConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid session config: {config:?}");
        let space = config.space();
        let mut session = Self {
            space,
            score: 0,
            level: 1,
            ship: Ship::spawn(space.center()),
            asteroids: Vec::new(),
            time_ms: 0.0,
            respawn_at: None,
            rng: Pcg32::seed_from_u64(config.seed),
            events: Vec::new(),
            config,
        };
        session.start_level();
        session
    }

    /// Replace the asteroid field with the current level's Large asteroids.
    ///
    /// They spawn on the arena boundary so nothing appears on top of the
    /// ship at the center.
    pub fn start_level(&mut self) {
        let count = asteroid_count_for_level(self.level, self.config.initial_asteroids);
        self.asteroids.clear();
        for _ in 0..count {
            let pos = self.space.random_edge_point(&mut self.rng);
            self.asteroids.push(Asteroid::spawn(pos, SizeTier::Large, &mut self.rng));
        }

        log::info!("Level {} started with {} asteroids", self.level, count);
        self.events.push(SessionEvent::LevelStarted {
            level: self.level,
            asteroids: count,
        });
    }

    fn advance_level(&mut self) {
        self.level += 1;
        self.start_level();
    }

    /// Advance the simulation by `delta` milliseconds.
    ///
    /// Input is polled once. Order: respawn timer, ship, asteroids,
    /// collisions, then a level change if the field was cleared.
    /// Non-positive or non-finite deltas do nothing.
    pub fn update<I: InputSource + ?Sized>(&mut self, delta: f32, input: &I) {
        if !(delta > 0.0 && delta.is_finite()) {
            return;
        }
        let input = TickInput::poll(input);

        self.time_ms += f64::from(delta);
        self.respawn_if_due();

        if self.asteroids.is_empty() {
            self.advance_level();
        }

        entity::update(&mut self.ship, delta, &self.space, &input);
        for asteroid in &mut self.asteroids {
            entity::update(asteroid, delta, &self.space, &input);
        }
        self.asteroids.retain(|a| a.active);

        let outcome = collision::resolve(&mut self.ship, &mut self.asteroids, &self.space, &mut self.rng);
        self.apply(outcome);

        if self.asteroids.is_empty() {
            self.advance_level();
        }
    }

    fn apply(&mut self, outcome: CollisionOutcome) {
        self.score += outcome.points;
        if !outcome.hits.is_empty() {
            log::debug!(
                "{} asteroids destroyed, {} fragments spawned, score {}",
                outcome.hits.len(),
                outcome.spawned,
                self.score
            );
        }
        for hit in &outcome.hits {
            log::debug!("{} asteroid destroyed at {}", hit.size.as_str(), hit.pos);
            self.events.push(SessionEvent::AsteroidDestroyed {
                size: hit.size,
                pos: hit.pos,
                score: self.score,
            });
        }

        if outcome.ship_hit {
            let at = self.time_ms + self.config.respawn_delay_ms;
            self.respawn_at = Some(at);
            log::info!("Ship destroyed at {}, respawn at {:.0}ms", self.ship.pos, at);
            self.events.push(SessionEvent::ShipExploded { pos: self.ship.pos });
        }
    }

    fn respawn_if_due(&mut self) {
        let Some(at) = self.respawn_at else {
            return;
        };
        if self.time_ms < at {
            return;
        }

        let pos = self.space.center();
        self.ship = Ship::spawn(pos);
        self.respawn_at = None;
        log::info!("Ship respawned");
        self.events.push(SessionEvent::ShipRespawned { pos });
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn ship(&self) -> &Entity {
        &self.ship
    }

    pub fn asteroids(&self) -> &[Entity] {
        &self.asteroids
    }

    /// Projectiles currently owned by the ship
    pub fn projectiles(&self) -> &[Entity] {
        self.ship.as_ship().map_or(&[], |s| s.projectiles.as_slice())
    }

    pub fn is_respawn_pending(&self) -> bool {
        self.respawn_at.is_some()
    }

    /// Events since the last drain
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }
}
