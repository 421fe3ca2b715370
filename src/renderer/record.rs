//! Draw-call recording backend
//!
//! Captures the frame composer's output as data for tests and headless
//! runs, including whether the sprite or the polygon-fallback car path ran.

use glam::Vec2;

use super::{Canvas, Color, TextAlign};
use crate::sim::Rect;

/// One recorded primitive call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Rect {
        rect: Rect,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Polygon {
        points: Vec<Vec2>,
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        size_px: f32,
        align: TextAlign,
        color: Color,
    },
    PushTransform {
        translation: Vec2,
        rotation: f32,
    },
    PopTransform,
    CarSprite {
        size: Vec2,
    },
}

/// A `Canvas` that records every call instead of drawing
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
    sprite_ready: bool,
}

impl RecordingCanvas {
    /// A backend with no car sprite (exercises the polygon fallback)
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that reports a loaded car sprite
    pub fn with_sprite() -> Self {
        Self {
            calls: Vec::new(),
            sprite_ready: true,
        }
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::Rect { rect, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.calls.push(DrawCall::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, size_px: f32, align: TextAlign, color: Color) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            pos,
            size_px,
            align,
            color,
        });
    }

    fn push_transform(&mut self, translation: Vec2, rotation: f32) {
        self.calls.push(DrawCall::PushTransform {
            translation,
            rotation,
        });
    }

    fn pop_transform(&mut self) {
        self.calls.push(DrawCall::PopTransform);
    }

    fn car_sprite_ready(&self) -> bool {
        self.sprite_ready
    }

    fn draw_car_sprite(&mut self, size: Vec2) {
        self.calls.push(DrawCall::CarSprite { size });
    }
}
