//! Per-frame canvas painting
//!
//! Clears and redraws the whole scene every frame: starfield, anchor pad,
//! sling cord, orb, particles, enemies, hearts, and the reload bar. The
//! score readout lives in the DOM and is updated by the platform layer.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::shapes;
use crate::color::Hsl;
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{EnemyShape, GameState};

/// The orb, sling cord, and anchor pad share the signature neon cyan
const NEON_CYAN: &str = "#00ffff";
const HEART_COLOR: &str = "#ff0000";
const RELOAD_BAR_COLOR: &str = "#ffffff";

/// Anchor pad geometry (a short horizontal bar under the orb's rest position)
const PAD_WIDTH: f64 = 100.0;
const PAD_HEIGHT: f64 = 5.0;
const PAD_DROP: f64 = 30.0;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Redraw the full scene for the current state
    pub fn render(&self, state: &GameState, settings: &Settings) -> Result<(), JsValue> {
        self.ctx.clear_rect(
            0.0,
            0.0,
            f64::from(state.bounds.x),
            f64::from(state.bounds.y),
        );

        if settings.starfield {
            self.draw_stars(state)?;
        }
        self.draw_anchor_pad(state);
        self.draw_sling(state);
        self.draw_orb(state, settings)?;
        if settings.particles {
            self.draw_particles(state)?;
        }
        self.draw_enemies(state, settings)?;
        self.draw_hearts(state);
        self.draw_reload_bar(state);

        Ok(())
    }

    fn draw_stars(&self, state: &GameState) -> Result<(), JsValue> {
        for star in &state.stars {
            self.ctx.begin_path();
            self.ctx.arc(
                f64::from(star.pos.x),
                f64::from(star.pos.y),
                f64::from(star.size),
                0.0,
                TAU,
            )?;
            self.ctx.set_fill_style_str(&star.color.css());
            self.ctx.fill();
        }
        Ok(())
    }

    fn draw_anchor_pad(&self, state: &GameState) {
        let anchor = state.anchor;
        self.ctx.set_fill_style_str(NEON_CYAN);
        self.ctx.fill_rect(
            f64::from(anchor.x) - PAD_WIDTH / 2.0,
            f64::from(anchor.y) + PAD_DROP,
            PAD_WIDTH,
            PAD_HEIGHT,
        );
    }

    /// Cord from just above the pad to wherever the orb currently is
    fn draw_sling(&self, state: &GameState) {
        let anchor = state.anchor;
        self.ctx.begin_path();
        self.ctx
            .move_to(f64::from(anchor.x), f64::from(anchor.y) + PAD_DROP - 15.0);
        self.ctx
            .line_to(f64::from(state.orb.pos.x), f64::from(state.orb.pos.y));
        self.ctx.set_stroke_style_str(NEON_CYAN);
        self.ctx.set_line_width(4.0);
        self.ctx.stroke();
    }

    fn draw_orb(&self, state: &GameState, settings: &Settings) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.arc(
            f64::from(state.orb.pos.x),
            f64::from(state.orb.pos.y),
            f64::from(state.orb.radius),
            0.0,
            TAU,
        )?;
        self.ctx.set_fill_style_str(NEON_CYAN);
        if settings.glow {
            self.ctx.set_shadow_blur(20.0);
            self.ctx.set_shadow_color(NEON_CYAN);
        }
        self.ctx.fill();
        self.ctx.set_shadow_blur(0.0);
        Ok(())
    }

    fn draw_particles(&self, state: &GameState) -> Result<(), JsValue> {
        for particle in &state.particles {
            self.ctx.begin_path();
            self.ctx.arc(
                f64::from(particle.pos.x),
                f64::from(particle.pos.y),
                f64::from(particle.size),
                0.0,
                TAU,
            )?;
            let rgb = Hsl::neon(particle.hue).to_rgb();
            self.ctx
                .set_fill_style_str(&rgb.css_with_alpha(particle.alpha));
            self.ctx.fill();
        }
        Ok(())
    }

    fn draw_enemies(&self, state: &GameState, settings: &Settings) -> Result<(), JsValue> {
        for enemy in &state.enemies {
            let x = f64::from(enemy.pos.x);
            let y = f64::from(enemy.pos.y);
            let size = f64::from(enemy.size);
            let css = Hsl::neon(enemy.hue).to_rgb().css();

            self.ctx.begin_path();
            match enemy.shape {
                EnemyShape::Circle => {
                    self.ctx.arc(x, y, size, 0.0, TAU)?;
                }
                EnemyShape::Triangle => {
                    let [apex, left, right] = shapes::triangle_vertices(x, y, size);
                    self.ctx.move_to(apex.0, apex.1);
                    self.ctx.line_to(left.0, left.1);
                    self.ctx.line_to(right.0, right.1);
                    self.ctx.close_path();
                }
                EnemyShape::Square => {
                    let (rx, ry, side) = shapes::square_rect(x, y, size);
                    self.ctx.rect(rx, ry, side, side);
                }
                EnemyShape::Star => {
                    for (i, (vx, vy)) in
                        shapes::star_vertices(x, y, 5, size, size / 2.0).iter().enumerate()
                    {
                        if i == 0 {
                            self.ctx.move_to(*vx, *vy);
                        } else {
                            self.ctx.line_to(*vx, *vy);
                        }
                    }
                    self.ctx.close_path();
                }
            }

            self.ctx.set_fill_style_str(&css);
            if settings.glow {
                self.ctx.set_shadow_blur(15.0);
                self.ctx.set_shadow_color(&css);
            }
            self.ctx.fill();
            self.ctx.set_shadow_blur(0.0);
        }
        Ok(())
    }

    fn draw_hearts(&self, state: &GameState) {
        self.ctx.set_fill_style_str(HEART_COLOR);
        for i in 0..state.hearts {
            let heart = shapes::heart_path(50.0 + f64::from(i) * 40.0, 60.0, 15.0);
            self.ctx.begin_path();
            self.ctx.move_to(heart.start.0, heart.start.1);
            for [c1, c2, end] in heart.curves {
                self.ctx
                    .bezier_curve_to(c1.0, c1.1, c2.0, c2.1, end.0, end.1);
            }
            self.ctx.close_path();
            self.ctx.fill();
        }
    }

    /// Bar along the bottom edge that fills while the next shot reloads
    fn draw_reload_bar(&self, state: &GameState) {
        if state.reload_ticks == 0 {
            return;
        }
        let progress = 1.0 - f64::from(state.reload_ticks) / f64::from(RELOAD_TICKS);
        self.ctx.set_fill_style_str(RELOAD_BAR_COLOR);
        self.ctx.fill_rect(
            0.0,
            f64::from(state.bounds.y) - 10.0,
            f64::from(state.bounds.x) * progress,
            10.0,
        );
    }
}
