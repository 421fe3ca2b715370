//! Browser 2D-context backend
//!
//! Implements the `Canvas` contract on a `CanvasRenderingContext2d`. The
//! car sprite is an `HtmlImageElement` loaded lazily by the browser; until
//! it is complete the composer takes the polygon fallback path.

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Canvas, Color, TextAlign};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::sim::Rect;

pub struct Context2dCanvas {
    ctx: CanvasRenderingContext2d,
    car_image: HtmlImageElement,
}

impl Context2dCanvas {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let car_image = HtmlImageElement::new()?;
        car_image.set_src("car.png");

        Ok(Self { ctx, car_image })
    }

    fn set_fill(&self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
    }
}

impl Canvas for Context2dCanvas {
    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.set_fill(color);
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.set_fill(color);
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.fill();
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        let Some(first) = points.first() else { return };
        self.set_fill(color);
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in &points[1..] {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, size_px: f32, align: TextAlign, color: Color) {
        self.set_fill(color);
        self.ctx.set_font(&format!("{size_px}px Arial"));
        self.ctx.set_text_align(match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
        let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }

    fn push_transform(&mut self, translation: Vec2, rotation: f32) {
        self.ctx.save();
        let _ = self
            .ctx
            .translate(translation.x as f64, translation.y as f64);
        let _ = self.ctx.rotate(rotation as f64);
    }

    fn pop_transform(&mut self) {
        self.ctx.restore();
    }

    fn car_sprite_ready(&self) -> bool {
        self.car_image.complete() && self.car_image.natural_height() != 0
    }

    fn draw_car_sprite(&mut self, size: Vec2) {
        let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            &self.car_image,
            (-size.x / 2.0) as f64,
            (-size.y / 2.0) as f64,
            size.x as f64,
            size.y as f64,
        );
    }
}
