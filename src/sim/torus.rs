//! Toroidal arena geometry
//!
//! The arena's left/right and top/bottom edges are joined. A body that
//! leaves one edge re-enters on the opposite edge, and a body close to an
//! edge also occupies space across it. That second part is handled with
//! ghost copies: translated duplicates of the body's position used for
//! both collision tests and drawing.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Maximum number of positions a body can occupy (itself + 3 ghosts)
pub const MAX_GHOSTS: usize = 4;

/// Rectangular wrap-around play field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToroidalSpace {
    pub width: f32,
    pub height: f32,
}

/// Positions a body occupies, true position first
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostPositions {
    points: [Vec2; MAX_GHOSTS],
    len: usize,
}

impl GhostPositions {
    fn single(pos: Vec2) -> Self {
        Self {
            points: [pos; MAX_GHOSTS],
            len: 1,
        }
    }

    fn push(&mut self, pos: Vec2) {
        self.points[self.len] = pos;
        self.len += 1;
    }

    pub fn as_slice(&self) -> &[Vec2] {
        &self.points[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vec2> {
        self.as_slice().iter()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Never true; the true position is always present
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl ToroidalSpace {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Bring a position back into bounds.
    ///
    /// A coordinate below zero jumps to the far bound and one past the far
    /// bound jumps to zero. Values exactly on a bound are left alone. This
    /// is a crossing rule, not a modulo: a body moving more than an arena
    /// width in one tick lands on the edge rather than at its modular
    /// position.
    pub fn wrap(&self, pos: Vec2) -> Vec2 {
        let mut wrapped = pos;
        if wrapped.x < 0.0 {
            wrapped.x = self.width;
        } else if wrapped.x > self.width {
            wrapped.x = 0.0;
        }
        if wrapped.y < 0.0 {
            wrapped.y = self.height;
        } else if wrapped.y > self.height {
            wrapped.y = 0.0;
        }
        wrapped
    }

    /// Every position at which a body of `radius` could touch something.
    ///
    /// Within `radius` of a vertical edge adds a copy shifted by one arena
    /// width toward the far side; horizontal edges likewise. Near a corner
    /// the diagonal copy is added too.
    pub fn ghost_positions(&self, pos: Vec2, radius: f32) -> GhostPositions {
        let shift_x = if pos.x < radius {
            Some(self.width)
        } else if self.width - pos.x < radius {
            Some(-self.width)
        } else {
            None
        };
        let shift_y = if pos.y < radius {
            Some(self.height)
        } else if self.height - pos.y < radius {
            Some(-self.height)
        } else {
            None
        };

        let mut ghosts = GhostPositions::single(pos);
        if let Some(dx) = shift_x {
            ghosts.push(pos + Vec2::new(dx, 0.0));
        }
        if let Some(dy) = shift_y {
            ghosts.push(pos + Vec2::new(0.0, dy));
        }
        if let (Some(dx), Some(dy)) = (shift_x, shift_y) {
            ghosts.push(pos + Vec2::new(dx, dy));
        }
        ghosts
    }

    /// Smallest distance between any ghost of `a` and any ghost of `b`
    pub fn min_wrapped_distance(&self, a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> f32 {
        let a_ghosts = self.ghost_positions(a, a_radius);
        let b_ghosts = self.ghost_positions(b, b_radius);

        a_ghosts
            .iter()
            .flat_map(|pa| b_ghosts.iter().map(move |pb| pa.distance(*pb)))
            .fold(f32::INFINITY, f32::min)
    }

    /// Random point on the arena boundary (never the interior)
    pub fn random_edge_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        match rng.random_range(0..4) {
            0 => Vec2::new(rng.random_range(0.0..self.width), 0.0),
            1 => Vec2::new(self.width, rng.random_range(0.0..self.height)),
            2 => Vec2::new(rng.random_range(0.0..self.width), self.height),
            _ => Vec2::new(0.0, rng.random_range(0.0..self.height)),
        }
    }

    /// Whether a point lies on the closed arena rectangle
    pub fn contains(&self, pos: Vec2) -> bool {
        (0.0..=self.width).contains(&pos.x) && (0.0..=self.height).contains(&pos.y)
    }
}
