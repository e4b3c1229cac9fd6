//! Draw-call recorder for headless runs

use glam::Vec2;

use super::DrawSurface;
use crate::sim::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCall {
    Background(Color),
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: f32,
    },
}

/// Surface that keeps the calls of the latest frame
#[derive(Debug, Default)]
pub struct DrawLog {
    pub calls: Vec<DrawCall>,
    /// Frames started (background fills)
    pub frames: u64,
}

impl DrawLog {
    pub fn circles(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Circle { .. }))
    }
}

impl DrawSurface for DrawLog {
    fn fill_background(&mut self, color: Color) {
        self.calls.clear();
        self.frames += 1;
        self.calls.push(DrawCall::Background(color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }
}
