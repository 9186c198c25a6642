//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Caller-supplied step length only (the clock decides when to step)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod asteroid;
pub mod collision;
pub mod entity;
pub mod projectile;
pub mod session;
pub mod ship;
pub mod torus;

pub use asteroid::{Asteroid, SizeTier, split};
pub use collision::{AsteroidHit, CollisionOutcome};
pub use entity::{Entity, EntityKind, collision_radius, update};
pub use projectile::Projectile;
pub use session::{Session, SessionEvent, asteroid_count_for_level};
pub use ship::{Fragment, Ship, ShipMode, explode};
pub use torus::{GhostPositions, ToroidalSpace};
