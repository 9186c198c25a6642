//! Wrap-aware outline drawing
//!
//! The sim never draws. A host implements [`RenderSurface`] and calls
//! [`draw_session`] once per frame; every body is drawn at each of its ghost
//! positions so it stays visible while straddling an arena edge.

use glam::Vec2;

use crate::sim::{Entity, GhostPositions, Session, ToroidalSpace, collision_radius, ship};

/// HUD text anchors (top-left, y-down)
pub const SCORE_TEXT_POS: Vec2 = Vec2::new(10.0, 30.0);
pub const LEVEL_TEXT_POS: Vec2 = Vec2::new(10.0, 60.0);

/// Line-drawing capability supplied by the host
pub trait RenderSurface {
    /// Closed outline through `points`
    fn stroke_polygon(&mut self, points: &[Vec2], alpha: f32);
    /// Open line through `points`
    fn stroke_polyline(&mut self, points: &[Vec2], alpha: f32);
    fn stroke_segment(&mut self, start: Vec2, end: Vec2, alpha: f32);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, alpha: f32);
    fn draw_text(&mut self, pos: Vec2, text: &str);
}

fn translated<const N: usize>(points: [Vec2; N], origin: Vec2) -> [Vec2; N] {
    points.map(|p| p + origin)
}

fn ghosts(space: &ToroidalSpace, entity: &Entity) -> GhostPositions {
    space.ghost_positions(entity.pos, collision_radius(entity))
}

fn draw_asteroid<S: RenderSurface + ?Sized>(surface: &mut S, space: &ToroidalSpace, entity: &Entity) {
    let Some(asteroid) = entity.as_asteroid() else {
        return;
    };
    let outline = asteroid.outline_points(entity.rotation);
    for &origin in ghosts(space, entity).iter() {
        let points: Vec<Vec2> = outline.iter().map(|&p| p + origin).collect();
        surface.stroke_polygon(&points, 1.0);
    }
}

fn draw_ship<S: RenderSurface + ?Sized>(surface: &mut S, space: &ToroidalSpace, entity: &Entity) {
    let Some(state) = entity.as_ship() else {
        return;
    };
    if !entity.active {
        return;
    }

    for &origin in ghosts(space, entity).iter() {
        if state.is_exploding() {
            let alpha = state.explosion_alpha();
            for fragment in &state.fragments {
                surface.stroke_segment(origin + fragment.start, origin + fragment.end, alpha);
            }
            continue;
        }

        surface.stroke_polygon(&translated(ship::hull_points(entity.rotation), origin), 1.0);
        let flame = state.thrust_alpha();
        if flame > 0.0 {
            surface.stroke_polyline(&translated(ship::flame_points(entity.rotation), origin), flame);
        }
    }
}

fn draw_projectile<S: RenderSurface + ?Sized>(surface: &mut S, space: &ToroidalSpace, entity: &Entity) {
    if !entity.active {
        return;
    }
    let radius = collision_radius(entity);
    for &origin in ghosts(space, entity).iter() {
        surface.stroke_circle(origin, radius, 1.0);
    }
}

/// Draw the whole session: asteroids, ship, projectiles, then the HUD
pub fn draw_session<S: RenderSurface + ?Sized>(surface: &mut S, session: &Session) {
    let space = &session.space;

    for asteroid in session.asteroids().iter().filter(|a| a.active) {
        draw_asteroid(surface, space, asteroid);
    }
    draw_ship(surface, space, session.ship());
    for projectile in session.projectiles() {
        draw_projectile(surface, space, projectile);
    }

    surface.draw_text(SCORE_TEXT_POS, &format!("Score: {}", session.score()));
    surface.draw_text(LEVEL_TEXT_POS, &format!("Level: {}", session.level()));
}
