//! Entity model: drawable, moving and fading circles
//!
//! Every on-screen object is one `Entity`. What it does per frame is decided
//! by its `Motion`, not by its type:
//! - `Static`: the player avatar
//! - `Moving`: enemies and projectiles (Euler step, one frame)
//! - `Fading`: hit particles, which also lose alpha every frame

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::PARTICLE_FADE;

/// Opaque display colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Playfield background (#1f1a30)
    pub const BACKGROUND: Color = Color::rgb(0x1f, 0x1a, 0x30);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uniform sample of each channel
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::rgb(rng.random(), rng.random(), rng.random())
    }

    /// CSS colour string for canvas fill styles
    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Per-frame behaviour attached to a circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Never moves
    Static,
    /// Constant velocity (units per frame)
    Moving { vel: Vec2 },
    /// Constant velocity, alpha decreasing toward 0
    Fading { vel: Vec2, alpha: f32 },
}

/// A circle on the playfield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
    pub motion: Motion,
}

impl Entity {
    pub fn new(id: u32, pos: Vec2, radius: f32, color: Color, motion: Motion) -> Self {
        Self {
            id,
            pos,
            radius,
            color,
            motion,
        }
    }

    /// Step one frame: position += velocity, fading circles lose alpha
    pub fn advance(&mut self) {
        match &mut self.motion {
            Motion::Static => {}
            Motion::Moving { vel } => self.pos += *vel,
            Motion::Fading { vel, alpha } => {
                self.pos += *vel;
                *alpha -= PARTICLE_FADE;
            }
        }
    }

    /// Current opacity (1.0 unless fading)
    pub fn alpha(&self) -> f32 {
        match self.motion {
            Motion::Fading { alpha, .. } => alpha,
            _ => 1.0,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        match self.motion {
            Motion::Static => Vec2::ZERO,
            Motion::Moving { vel } | Motion::Fading { vel, .. } => vel,
        }
    }

    /// Faded out, or shrunk to nothing.
    ///
    /// Bounds checks are the caller's business: only projectiles are
    /// removed for leaving the playfield.
    pub fn is_expired(&self) -> bool {
        self.radius <= 0.0 || self.alpha() <= 0.0
    }
}

/// Rectangular playfield bounds, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whole circle inside [0,width]x[0,height]
    pub fn contains_circle(&self, pos: Vec2, radius: f32) -> bool {
        pos.x - radius >= 0.0
            && pos.x + radius <= self.width
            && pos.y - radius >= 0.0
            && pos.y + radius <= self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn particle(alpha: f32) -> Entity {
        Entity::new(
            1,
            Vec2::ZERO,
            2.0,
            Color::WHITE,
            Motion::Fading {
                vel: Vec2::new(1.0, -0.5),
                alpha,
            },
        )
    }

    #[test]
    fn test_moving_entity_advances_by_velocity() {
        let mut e = Entity::new(
            1,
            Vec2::new(10.0, 10.0),
            5.0,
            Color::WHITE,
            Motion::Moving {
                vel: Vec2::new(2.0, -3.0),
            },
        );
        e.advance();
        e.advance();
        assert_eq!(e.pos, Vec2::new(14.0, 4.0));
        assert!(!e.is_expired());
    }

    #[test]
    fn test_static_entity_never_moves() {
        let mut player = Entity::new(0, Vec2::new(5.0, 5.0), 10.0, Color::RED, Motion::Static);
        for _ in 0..100 {
            player.advance();
        }
        assert_eq!(player.pos, Vec2::new(5.0, 5.0));
        assert_eq!(player.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_particle_expires_when_alpha_reaches_zero() {
        let mut p = particle(0.015);
        p.advance();
        assert!(!p.is_expired());
        p.advance();
        assert!(p.is_expired());
    }

    #[test]
    fn test_full_particle_lives_about_a_hundred_frames() {
        let mut p = particle(1.0);
        let mut frames = 0;
        while !p.is_expired() {
            p.advance();
            frames += 1;
        }
        // f32 drift may land the crossing one frame either side
        assert!((99..=101).contains(&frames), "lived {frames} frames");
    }

    #[test]
    fn test_playfield_contains_circle_edges() {
        let field = Playfield::new(100.0, 50.0);
        assert!(field.contains_circle(Vec2::new(5.0, 5.0), 5.0));
        assert!(!field.contains_circle(Vec2::new(4.9, 25.0), 5.0));
        assert!(!field.contains_circle(Vec2::new(50.0, 45.1), 5.0));
        assert_eq!(field.center(), Vec2::new(50.0, 25.0));
    }

    #[test]
    fn test_color_css() {
        assert_eq!(Color::rgb(1, 2, 3).to_css(), "rgb(1, 2, 3)");
    }

    proptest! {
        #[test]
        fn prop_alpha_never_increases(start in 0.0f32..1.0, frames in 1usize..200) {
            let mut p = particle(start);
            let mut last = p.alpha();
            for _ in 0..frames {
                p.advance();
                prop_assert!(p.alpha() <= last);
                last = p.alpha();
            }
        }
    }
}
