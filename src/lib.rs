//! Road Rush - a vertical-scrolling arcade driving game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (car physics, collisions, spawning, game state)
//! - `renderer`: Frame composition against the canvas drawing contract
//! - `audio`: Procedural engine loop and crash cue
//! - `settings`: In-memory preferences

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical drawing surface dimensions
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 800.0;

    /// Car defaults
    pub const CAR_WIDTH: f32 = 50.0;
    pub const CAR_HEIGHT: f32 = 80.0;
    pub const CAR_MAX_SPEED: f32 = 10.0;
    pub const CAR_ACCELERATION: f32 = 0.2;
    pub const CAR_DECELERATION: f32 = 0.05;
    pub const CAR_TURN_SPEED: f32 = 0.05;
    /// Vertical gap between the car's starting position and the canvas bottom
    pub const CAR_START_MARGIN: f32 = 100.0;

    /// Road defaults
    pub const ROAD_START_SPEED: f32 = 5.0;

    /// Obstacle spawning (frames between automatic spawns)
    pub const SPAWN_INTERVAL_START: u32 = 100;
    pub const SPAWN_INTERVAL_FLOOR: u32 = 50;
    pub const SPAWN_INTERVAL_STEP: u32 = 10;

    /// Probability of a tree pair appearing on any given frame
    pub const TREE_SPAWN_CHANCE: f64 = 0.5;
    /// Distance from the canvas edge to each roadside tree
    pub const TREE_MARGIN: f32 = 20.0;

    /// Score points per level step
    pub const LEVEL_SCORE_STEP: i64 = 500;
    /// Road speed gained per level
    pub const LEVEL_ROAD_SPEED_STEP: f32 = 0.5;
    /// Car max speed gained per level
    pub const LEVEL_MAX_SPEED_STEP: f32 = 0.5;
    /// Score accrued per frame is `floor(speed * SCORE_SPEED_FACTOR)`
    pub const SCORE_SPEED_FACTOR: f32 = 0.1;
}
