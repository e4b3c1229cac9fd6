//! 2D canvas implementation of `DrawSurface`

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{DrawSurface, SurfaceError};
use crate::sim::Color;

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    /// Grab the canvas' 2D context. Failing here is fatal for the game.
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| SurfaceError::Missing(format!("{:?}", e)))?
            .ok_or_else(|| SurfaceError::Missing("canvas has no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::Missing("context is not 2d".into()))?;
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }
}

impl DrawSurface for CanvasSurface {
    fn fill_background(&mut self, color: Color) {
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
        self.ctx.begin_path();
        if self
            .ctx
            .arc(
                center.x as f64,
                center.y as f64,
                radius.max(0.0) as f64,
                0.0,
                std::f64::consts::TAU,
            )
            .is_ok()
        {
            self.ctx.set_fill_style_str(&color.to_css());
            self.ctx.fill();
        }
        self.ctx.set_global_alpha(1.0);
    }
}
