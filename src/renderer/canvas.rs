//! Canvas 2D renderer
//!
//! Clears the whole surface each frame and redraws the current state.

use std::f64::consts::PI;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::{basket, heart_path};
use crate::sim::{GamePhase, GameState, Heart, Particle, Player};

const BOWL_COLOR: &str = "#ff4d6d";
const HANDLE_COLOR: &str = "#c9184a";
const HANDLE_WIDTH: f64 = 5.0;
const PARTICLE_COLOR: &str = "rgba(255, 255, 255, 0.8)";

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        Ok(Self { canvas, ctx })
    }

    /// Match the backing store to the viewport
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    pub fn render(&self, state: &GameState) {
        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
        self.ctx.clear_rect(0.0, 0.0, w, h);

        match state.phase {
            GamePhase::Start => {}
            GamePhase::Playing => {
                self.draw_player(&state.player);
                self.draw_scene(state);
            }
            GamePhase::Proposal | GamePhase::Celebration => self.draw_scene(state),
        }
    }

    fn draw_scene(&self, state: &GameState) {
        for heart in &state.hearts {
            self.draw_heart(heart);
        }
        for particle in &state.particles {
            self.draw_particle(particle);
        }
    }

    fn draw_player(&self, player: &Player) {
        let shape = basket(player);
        let ctx = &self.ctx;

        ctx.set_fill_style_str(BOWL_COLOR);
        ctx.begin_path();
        let _ = ctx.arc(
            shape.bowl_center.x as f64,
            shape.bowl_center.y as f64,
            shape.radius as f64,
            0.0,
            PI,
        );
        ctx.fill();

        ctx.begin_path();
        ctx.set_stroke_style_str(HANDLE_COLOR);
        ctx.set_line_width(HANDLE_WIDTH);
        let _ = ctx.arc(
            shape.handle_center.x as f64,
            shape.handle_center.y as f64,
            shape.radius as f64,
            PI,
            0.0,
        );
        ctx.stroke();
    }

    fn draw_heart(&self, heart: &Heart) {
        let path = heart_path(heart.pos, heart.size);
        let ctx = &self.ctx;

        ctx.set_fill_style_str(&heart.css_color());
        ctx.begin_path();
        ctx.move_to(path.start.x as f64, path.start.y as f64);
        for c in &path.curves {
            ctx.bezier_curve_to(
                c.c1.x as f64,
                c.c1.y as f64,
                c.c2.x as f64,
                c.c2.y as f64,
                c.end.x as f64,
                c.end.y as f64,
            );
        }
        ctx.fill();
    }

    fn draw_particle(&self, particle: &Particle) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(PARTICLE_COLOR);
        ctx.set_global_alpha(particle.alpha() as f64);
        ctx.begin_path();
        let _ = ctx.arc(
            particle.pos.x as f64,
            particle.pos.y as f64,
            particle.size as f64,
            0.0,
            PI * 2.0,
        );
        ctx.fill();
        ctx.set_global_alpha(1.0);
    }
}
