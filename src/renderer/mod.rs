//! Frame rendering module
//!
//! `frame` composes a full frame from game state against the `Canvas`
//! contract; backends only supply primitives. The web backend draws into a
//! 2D canvas context, the recording backend captures a draw-call log for
//! tests and headless runs.

pub mod frame;
pub mod record;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use frame::draw_frame;
pub use record::{DrawCall, RecordingCanvas};
#[cfg(target_arch = "wasm32")]
pub use web::Context2dCanvas;

use glam::Vec2;

use crate::sim::Rect;

/// An RGBA color, channels in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS `rgba(...)` form for the 2D-context backend
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            self.a
        )
    }
}

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// The drawing contract the frame composer needs from a backend.
///
/// A fixed 400x800 logical surface with filled primitives, a
/// translate+rotate transform scope for the car sprite, and HUD text.
pub trait Canvas {
    /// Wipe the whole surface
    fn clear(&mut self);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    fn fill_polygon(&mut self, points: &[Vec2], color: Color);

    fn fill_text(&mut self, text: &str, pos: Vec2, size_px: f32, align: TextAlign, color: Color);

    /// Begin a translate+rotate scope; subsequent coordinates are relative
    /// to `translation` with `rotation` applied. Scopes nest.
    fn push_transform(&mut self, translation: Vec2, rotation: f32);

    fn pop_transform(&mut self);

    /// Whether a car sprite asset is loaded and drawable. Backends without
    /// one return false and the composer falls back to the polygon car.
    fn car_sprite_ready(&self) -> bool {
        false
    }

    /// Draw the car sprite centered on the current transform origin
    fn draw_car_sprite(&mut self, size: Vec2);
}
