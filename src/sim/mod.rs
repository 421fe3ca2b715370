//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per animation frame, fixed virtual timestep
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! Side effects (crash cue, level-up) are reported as `GameEvent`s for the
//! platform layer to act on.

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, overlaps};
pub use spawn::{spawn_obstacle, spawn_tree_pair};
pub use state::{Car, GamePhase, GameState, Obstacle, ObstacleColor, Road, Tree, Weather};
pub use tick::{GameEvent, TickInput, step, tick};
