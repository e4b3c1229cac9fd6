//! Rendering module
//!
//! The simulation only needs two drawing primitives: fill the whole
//! background and fill a circle with an optional alpha. `DrawSurface` is
//! that capability; `CanvasSurface` implements it on a 2D canvas and
//! `DrawLog` records calls for headless runs.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCall, DrawLog};

use glam::Vec2;

use crate::sim::{Color, Entity, Session};

/// Rendering surface errors
#[derive(thiserror::Error, Debug)]
pub enum SurfaceError {
    /// No 2D drawing context could be obtained
    #[error("no 2d drawing surface: {0}")]
    Missing(String),
}

/// Minimal 2D drawing capability
pub trait DrawSurface {
    /// Paint the entire surface
    fn fill_background(&mut self, color: Color);
    /// Filled circle, `alpha` in [0,1]
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32);
}

fn draw_entity(surface: &mut dyn DrawSurface, entity: &Entity) {
    surface.fill_circle(entity.pos, entity.radius, entity.color, entity.alpha());
}

/// Draw one frame: background, player, then particles, projectiles, enemies
pub fn render(session: &Session, surface: &mut dyn DrawSurface) {
    surface.fill_background(Color::BACKGROUND);
    draw_entity(surface, &session.player);
    for particle in &session.particles {
        draw_entity(surface, particle);
    }
    for projectile in &session.projectiles {
        draw_entity(surface, projectile);
    }
    for enemy in &session.enemies {
        draw_entity(surface, enemy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYER_RADIUS;
    use crate::sim::Playfield;

    #[test]
    fn test_render_order() {
        let mut session = Session::new(Playfield::new(200.0, 100.0), 5);
        session.fire_at(Vec2::new(0.0, 0.0));
        session.burst(Vec2::new(10.0, 10.0), Color::rgb(1, 2, 3));

        let mut log = DrawLog::default();
        render(&session, &mut log);

        assert_eq!(log.calls[0], DrawCall::Background(Color::BACKGROUND));
        assert_eq!(
            log.calls[1],
            DrawCall::Circle {
                center: Vec2::new(100.0, 50.0),
                radius: PLAYER_RADIUS,
                color: Color::RED,
                alpha: 1.0,
            }
        );
        // background + player + 8 particles + 1 projectile
        assert_eq!(log.calls.len(), 11);
        assert_eq!(log.circles().count(), 10);
    }
}
