//! Game state and core simulation types
//!
//! One `GameState` holds the whole session; it is reinitialized wholesale
//! on reset and never shared across threads.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::spawn;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, waiting for the start input
    NotStarted,
    /// Active gameplay
    Playing,
    /// Run ended by a collision
    GameOver,
}

/// Visual weather mode, cycled manually by the player. No gameplay effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Weather {
    #[default]
    Sunny,
    Rainy,
    Snowy,
    Night,
}

impl Weather {
    /// Cycle order: sunny -> rainy -> snowy -> night -> sunny
    pub fn next(self) -> Self {
        match self {
            Weather::Sunny => Weather::Rainy,
            Weather::Rainy => Weather::Snowy,
            Weather::Snowy => Weather::Night,
            Weather::Night => Weather::Sunny,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Sunny => "Sunny",
            Weather::Rainy => "Rainy",
            Weather::Snowy => "Snowy",
            Weather::Night => "Night",
        }
    }
}

/// The player's car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    /// Top-left corner
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Signed scalar speed along the heading (negative = reversing)
    pub speed: f32,
    /// Heading in radians, 0 = straight up
    pub angle: f32,
    pub max_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    pub turn_speed: f32,
}

impl Default for Car {
    fn default() -> Self {
        Self {
            x: CANVAS_WIDTH / 2.0 - CAR_WIDTH / 2.0,
            y: CANVAS_HEIGHT - CAR_START_MARGIN,
            width: CAR_WIDTH,
            height: CAR_HEIGHT,
            speed: 0.0,
            angle: 0.0,
            max_speed: CAR_MAX_SPEED,
            acceleration: CAR_ACCELERATION,
            deceleration: CAR_DECELERATION,
            turn_speed: CAR_TURN_SPEED,
        }
    }
}

impl Car {
    /// Un-rotated bounding box used for all hit testing
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// A car with non-finite kinematics or degenerate dimensions cannot be
    /// simulated; the step skips the frame instead of propagating NaNs.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.speed.is_finite()
            && self.angle.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// Road scroll state, used for the lane-marking animation phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Road {
    /// Scroll offset, wraps at canvas height
    pub y: f32,
    /// Downward speed of obstacles and trees; rises with level
    pub speed: f32,
}

impl Default for Road {
    fn default() -> Self {
        Self {
            y: 0.0,
            speed: ROAD_START_SPEED,
        }
    }
}

/// Obstacle paint colors, picked uniformly at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleColor {
    Red,
    Green,
    Purple,
    Orange,
    Gray,
    Brown,
}

impl ObstacleColor {
    /// The fixed spawn palette
    pub const PALETTE: [Self; 6] = [
        Self::Red,
        Self::Green,
        Self::Purple,
        Self::Orange,
        Self::Gray,
        Self::Brown,
    ];
}

/// An obstacle car scrolling down the road
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: ObstacleColor,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A decorative roadside tree; excluded from collision checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Complete game session state (deterministic for a given seed + inputs)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// All randomness (spawn attributes, tree coin flips) flows through here
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub weather: Weather,
    pub car: Car,
    pub road: Road,
    pub obstacles: Vec<Obstacle>,
    pub trees: Vec<Tree>,
    /// Frames since the last automatic obstacle spawn
    pub spawn_timer: u32,
    /// Current frames-between-spawns; shrinks with level down to a floor
    pub spawn_interval: u32,
    pub score: i64,
    pub level: u32,
    /// Frame counter, also seeds the per-frame weather effect pass
    pub time_ticks: u64,
}

impl GameState {
    /// Create a fresh session showing the start screen
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::NotStarted,
            weather: Weather::Sunny,
            car: Car::default(),
            road: Road::default(),
            obstacles: Vec::new(),
            trees: Vec::new(),
            spawn_timer: 0,
            spawn_interval: SPAWN_INTERVAL_START,
            score: 0,
            level: 1,
            time_ticks: 0,
        }
    }

    /// Reinitialize everything for a new run and enter Playing.
    ///
    /// One obstacle is spawned immediately so the run never starts empty.
    /// The RNG stream carries across resets; the whole session stays
    /// reproducible from the construction seed.
    pub fn reset(&mut self) {
        self.car = Car::default();
        self.road = Road::default();
        self.obstacles.clear();
        self.trees.clear();
        self.spawn_timer = 0;
        self.spawn_interval = SPAWN_INTERVAL_START;
        self.score = 0;
        self.level = 1;
        self.weather = Weather::Sunny;
        self.phase = GamePhase::Playing;
        let obstacle = spawn::spawn_obstacle(&mut self.rng);
        self.obstacles.push(obstacle);
        log::info!("Game reset (seed {})", self.seed);
    }

    /// Advance the weather enum; accepted in any phase
    pub fn cycle_weather(&mut self) {
        self.weather = self.weather.next();
        log::info!("Weather changed to {}", self.weather.as_str());
    }
}
