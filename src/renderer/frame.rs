//! Deterministic frame composition
//!
//! Pure routine from game state to `Canvas` primitive calls. Weather
//! particles come from a throwaway RNG seeded by the frame counter, so the
//! same state always composes the same frame.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{Canvas, Color, TextAlign};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::sim::{GamePhase, GameState, Obstacle, ObstacleColor, Rect, Tree, Weather};

/// Road surface
const ROAD: Color = Color::rgb(0.267, 0.267, 0.267);
/// Lane markings and HUD text
const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
/// Fallback car body
const CAR_BODY: Color = Color::rgb(0.0, 0.0, 1.0);
/// Windshields and car windows (light blue)
const GLASS: Color = Color::rgb(0.678, 0.847, 0.902);
/// Tree canopy
const CANOPY: Color = Color::rgb(0.0, 0.502, 0.0);
/// Tree trunks
const TRUNK: Color = Color::rgb(0.647, 0.165, 0.165);
/// Obstacle wheels
const WHEEL: Color = Color::rgb(0.2, 0.2, 0.2);
/// Start screen backdrop
const BACKDROP: Color = Color::rgb(0.2, 0.2, 0.2);
/// Game over dimmer
const DIM: Color = Color::rgba(0.0, 0.0, 0.0, 0.7);
/// "GAME OVER" banner
const BANNER: Color = Color::rgb(1.0, 0.0, 0.0);
/// Rain streaks
const RAIN: Color = Color::rgba(0.678, 0.847, 0.902, 0.5);
/// Snow flakes
const SNOW: Color = Color::rgba(1.0, 1.0, 1.0, 0.7);
/// Night dimmer (dark blue)
const NIGHT: Color = Color::rgba(0.0, 0.0, 0.196, 0.4);

const RAIN_STREAKS: u32 = 100;
const SNOW_FLAKES: u32 = 50;

fn paint(color: ObstacleColor) -> Color {
    match color {
        ObstacleColor::Red => Color::rgb(1.0, 0.0, 0.0),
        ObstacleColor::Green => Color::rgb(0.0, 0.502, 0.0),
        ObstacleColor::Purple => Color::rgb(0.502, 0.0, 0.502),
        ObstacleColor::Orange => Color::rgb(1.0, 0.647, 0.0),
        ObstacleColor::Gray => Color::rgb(0.502, 0.502, 0.502),
        ObstacleColor::Brown => Color::rgb(0.647, 0.165, 0.165),
    }
}

/// Compose one frame for the current phase.
///
/// The game over screen dims the last playing frame, so it composes the
/// playing scene first and overlays it.
pub fn draw_frame(state: &GameState, canvas: &mut dyn Canvas) {
    match state.phase {
        GamePhase::NotStarted => draw_start_screen(canvas),
        GamePhase::Playing => draw_playing(state, canvas),
        GamePhase::GameOver => {
            draw_playing(state, canvas);
            draw_game_over(state, canvas);
        }
    }
}

fn draw_start_screen(canvas: &mut dyn Canvas) {
    canvas.clear();
    canvas.fill_rect(Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT), BACKDROP);

    let center_x = CANVAS_WIDTH / 2.0;
    let center_y = CANVAS_HEIGHT / 2.0;
    canvas.fill_text(
        "PRINCE DRIVING",
        Vec2::new(center_x, center_y - 50.0),
        48.0,
        TextAlign::Center,
        WHITE,
    );
    canvas.fill_text(
        "Press SPACE to Start",
        Vec2::new(center_x, center_y + 20.0),
        24.0,
        TextAlign::Center,
        WHITE,
    );
    canvas.fill_text(
        "Use Arrow Keys or WASD to Drive",
        Vec2::new(center_x, center_y + 60.0),
        18.0,
        TextAlign::Center,
        WHITE,
    );
}

fn draw_playing(state: &GameState, canvas: &mut dyn Canvas) {
    canvas.clear();
    canvas.fill_rect(Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT), ROAD);

    draw_weather(state, canvas);
    draw_lane_markings(state, canvas);
    draw_car(state, canvas);

    for tree in &state.trees {
        draw_tree(tree, canvas);
    }
    for obstacle in &state.obstacles {
        draw_obstacle(obstacle, canvas);
    }

    draw_hud(state, canvas);
}

/// Three dashed lane lines, phase-shifted by the road scroll offset
fn draw_lane_markings(state: &GameState, canvas: &mut dyn Canvas) {
    let lane_width = 10.0;
    let dash = 20.0;
    let num_lanes = 3;
    let dashes = (CANVAS_HEIGHT / (dash * 2.0)) as u32;

    for i in 0..num_lanes {
        let x = CANVAS_WIDTH / (num_lanes + 1) as f32 * (i + 1) as f32 - lane_width / 2.0;
        for j in 0..dashes {
            let y = (j as f32 * dash * 2.0 + state.road.y).rem_euclid(CANVAS_HEIGHT);
            canvas.fill_rect(Rect::new(x, y, lane_width, dash), WHITE);
        }
    }
}

/// The player car, rotated about its center.
///
/// Uses the sprite when the backend has one; otherwise the procedural
/// polygon body and windshield.
fn draw_car(state: &GameState, canvas: &mut dyn Canvas) {
    let car = &state.car;
    let center = Vec2::new(car.x + car.width / 2.0, car.y + car.height / 2.0);
    let (w, h) = (car.width, car.height);

    canvas.push_transform(center, car.angle);
    if canvas.car_sprite_ready() {
        canvas.draw_car_sprite(Vec2::new(w, h));
    } else {
        let body = [
            Vec2::new(0.0, -h / 2.0),
            Vec2::new(w / 2.0, -h / 2.0 + 20.0),
            Vec2::new(w / 2.0 - 10.0, h / 2.0),
            Vec2::new(-w / 2.0 + 10.0, h / 2.0),
            Vec2::new(-w / 2.0, -h / 2.0 + 20.0),
        ];
        canvas.fill_polygon(&body, CAR_BODY);

        let windshield = [
            Vec2::new(-w / 4.0, -h / 2.0 + 15.0),
            Vec2::new(w / 4.0, -h / 2.0 + 15.0),
            Vec2::new(w / 4.0 - 5.0, 0.0),
            Vec2::new(-w / 4.0 + 5.0, 0.0),
        ];
        canvas.fill_polygon(&windshield, GLASS);
    }
    canvas.pop_transform();
}

/// Trunk at the bottom, triangular canopy above
fn draw_tree(tree: &Tree, canvas: &mut dyn Canvas) {
    canvas.fill_rect(
        Rect::new(
            tree.x,
            tree.y + tree.height * 0.7,
            tree.width,
            tree.height * 0.3,
        ),
        TRUNK,
    );

    let canopy = [
        Vec2::new(tree.x + tree.width / 2.0, tree.y),
        Vec2::new(tree.x - tree.width * 0.5, tree.y + tree.height * 0.8),
        Vec2::new(tree.x + tree.width * 1.5, tree.y + tree.height * 0.8),
    ];
    canvas.fill_polygon(&canopy, CANOPY);
}

/// Body, two window bands, four wheels
fn draw_obstacle(obstacle: &Obstacle, canvas: &mut dyn Canvas) {
    let (x, y, w, h) = (obstacle.x, obstacle.y, obstacle.width, obstacle.height);

    canvas.fill_rect(Rect::new(x, y, w, h), paint(obstacle.color));
    canvas.fill_rect(Rect::new(x + w * 0.1, y + h * 0.1, w * 0.8, h * 0.3), GLASS);
    canvas.fill_rect(Rect::new(x + w * 0.1, y + h * 0.6, w * 0.8, h * 0.3), GLASS);

    for (wx, wy) in [
        (x - w * 0.1, y + h * 0.2),
        (x + w * 0.9, y + h * 0.2),
        (x - w * 0.1, y + h * 0.6),
        (x + w * 0.9, y + h * 0.6),
    ] {
        canvas.fill_rect(Rect::new(wx, wy, w * 0.2, h * 0.2), WHEEL);
    }
}

/// Weather overlay pass; particle placement is reseeded from the frame
/// counter so composition stays reproducible.
fn draw_weather(state: &GameState, canvas: &mut dyn Canvas) {
    match state.weather {
        Weather::Sunny => {}
        Weather::Rainy => {
            let mut rng = Pcg32::seed_from_u64(state.time_ticks);
            for _ in 0..RAIN_STREAKS {
                let x = rng.random_range(0.0..CANVAS_WIDTH);
                let y = rng.random_range(0.0..CANVAS_HEIGHT);
                canvas.fill_rect(Rect::new(x, y, 2.0, 10.0), RAIN);
            }
        }
        Weather::Snowy => {
            let mut rng = Pcg32::seed_from_u64(state.time_ticks);
            for _ in 0..SNOW_FLAKES {
                let x = rng.random_range(0.0..CANVAS_WIDTH);
                let y = rng.random_range(0.0..CANVAS_HEIGHT);
                canvas.fill_circle(Vec2::new(x, y), 3.0, SNOW);
            }
        }
        Weather::Night => {
            canvas.fill_rect(Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT), NIGHT);
        }
    }
}

fn draw_hud(state: &GameState, canvas: &mut dyn Canvas) {
    let lines = [
        format!("Score: {}", state.score),
        format!("Speed: {} km/h", (state.car.speed * 10.0).floor() as i32),
        format!("Level: {}", state.level),
        format!("Weather: {}", state.weather.as_str().to_uppercase()),
    ];
    for (i, line) in lines.iter().enumerate() {
        canvas.fill_text(
            line,
            Vec2::new(10.0, 30.0 + i as f32 * 30.0),
            24.0,
            TextAlign::Left,
            WHITE,
        );
    }
}

fn draw_game_over(state: &GameState, canvas: &mut dyn Canvas) {
    canvas.fill_rect(Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT), DIM);

    let center_x = CANVAS_WIDTH / 2.0;
    let center_y = CANVAS_HEIGHT / 2.0;
    canvas.fill_text(
        "GAME OVER",
        Vec2::new(center_x, center_y - 40.0),
        48.0,
        TextAlign::Center,
        BANNER,
    );
    canvas.fill_text(
        &format!("Final Score: {}", state.score),
        Vec2::new(center_x, center_y + 10.0),
        30.0,
        TextAlign::Center,
        WHITE,
    );
    canvas.fill_text(
        &format!("Level Reached: {}", state.level),
        Vec2::new(center_x, center_y + 40.0),
        30.0,
        TextAlign::Center,
        WHITE,
    );
    canvas.fill_text(
        "Press SPACE to Restart",
        Vec2::new(center_x, center_y + 70.0),
        20.0,
        TextAlign::Center,
        WHITE,
    );
}
