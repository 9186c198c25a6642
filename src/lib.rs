//! Drift Rocks - a wrap-around asteroid field shooter
//!
//! Core modules:
//! - `sim`: Simulation (toroidal space, entities, collisions, session)
//! - `clock`: Fixed-step driver fed by the host's frame callback
//! - `input`: Held-action input capability
//! - `render`: Render surface capability and wrap-aware drawing
//! - `config`: Arena and loop configuration

pub mod clock;
pub mod config;
pub mod input;
pub mod render;
pub mod sim;

pub use clock::SimulationClock;
pub use config::{ConfigError, SimConfig};
pub use input::{Action, HeldActions, InputSource, TickInput};

use glam::Vec2;

/// Game configuration constants
///
/// Times are milliseconds, speeds are arena units per second.
pub mod consts {
    use std::f32::consts::PI;

    /// Fixed simulation tick rate
    pub const TICK_RATE_HZ: u32 = 60;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Ship handling
    pub const SHIP_ROTATION_SPEED: f32 = PI; // radians per second
    pub const SHIP_ACCELERATION: f32 = 200.0;
    pub const SHIP_DECELERATION: f32 = 300.0; // reverse brakes harder than thrust
    /// Velocity multiplier applied per second
    pub const SHIP_FRICTION: f32 = 0.99;
    pub const SHIP_MAX_SPEED: f32 = 400.0;
    pub const SHIP_FIRE_INTERVAL_MS: f32 = 250.0;
    pub const SHIP_RADIUS: f32 = 15.0;
    /// Distance from ship center to nose (and flank depth)
    pub const SHIP_NOSE_LENGTH: f32 = 15.0;
    pub const SHIP_HALF_WIDTH: f32 = 10.0;
    /// How far the base point is pulled up into the hull
    pub const SHIP_CHEVRON_DEPTH: f32 = 5.0;
    pub const THRUST_FADE_MS: f32 = 600.0;

    /// Ship explosion
    pub const EXPLOSION_DURATION_MS: f32 = 2000.0;
    pub const FRAGMENT_SPEED: f32 = 100.0;

    /// Projectiles
    pub const PROJECTILE_SPEED: f32 = 500.0;
    pub const PROJECTILE_LIFETIME_MS: f32 = 1000.0;
    pub const PROJECTILE_RADIUS: f32 = 2.0;

    /// Asteroids: radius and speed scale with size tier ordinal (1..=3)
    pub const ASTEROID_RADIUS_PER_TIER: f32 = 10.0;
    pub const ASTEROID_BASE_SPEED: f32 = 50.0;
    pub const ASTEROID_SPEED_STEP: f32 = 25.0;
    /// Cosmetic spin range is +/- this
    pub const ASTEROID_MAX_SPIN: f32 = PI / 2.0;
    /// Split children land within +/- this of the parent
    pub const SPLIT_JITTER: f32 = 10.0;
    pub const ASTEROID_OUTLINE_VERTICES: usize = 8;
    pub const ASTEROID_OUTLINE_JITTER: f32 = 0.2;

    /// Session rules
    pub const POINTS_PER_ASTEROID: u64 = 100;
    pub const INITIAL_ASTEROIDS: u32 = 4;
    /// Later levels spawn `LEVEL_ASTEROID_BASE + level` asteroids
    pub const LEVEL_ASTEROID_BASE: u32 = 2;
    pub const RESPAWN_DELAY_MS: f64 = 2000.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Rotate a vector by `angle` radians (clockwise on screen, y points down)
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}

/// Unit vector a body with the given rotation points along.
///
/// Rotation 0 faces the top of the arena.
#[inline]
pub fn heading(rotation: f32) -> Vec2 {
    rotate(Vec2::NEG_Y, rotation)
}
