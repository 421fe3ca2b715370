//! Procedural obstacle and tree generation
//!
//! Every spawn draws from the injected generator and is purely additive;
//! calls in the same frame do not correlate beyond sharing the stream.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Obstacle, ObstacleColor, Tree};
use crate::consts::{CANVAS_WIDTH, TREE_MARGIN};

/// Obstacle width range
const OBSTACLE_WIDTH: std::ops::Range<f32> = 40.0..70.0;
/// Obstacle height range
const OBSTACLE_HEIGHT: std::ops::Range<f32> = 60.0..100.0;
/// Tree width range
const TREE_WIDTH: std::ops::Range<f32> = 20.0..30.0;
/// Tree height range
const TREE_HEIGHT: std::ops::Range<f32> = 50.0..80.0;

/// Generate one obstacle just above the top edge, with randomized size,
/// lane position, and paint color.
pub fn spawn_obstacle(rng: &mut Pcg32) -> Obstacle {
    let width = rng.random_range(OBSTACLE_WIDTH);
    let height = rng.random_range(OBSTACLE_HEIGHT);
    let x = rng.random_range(0.0..CANVAS_WIDTH - width);
    let color = ObstacleColor::PALETTE[rng.random_range(0..ObstacleColor::PALETTE.len())];

    Obstacle {
        x,
        y: -height,
        width,
        height,
        color,
    }
}

/// Generate a symmetric pair of roadside trees just above the top edge.
///
/// Both trees share one randomized size; they sit at fixed left/right
/// offsets from the canvas edges.
pub fn spawn_tree_pair(rng: &mut Pcg32) -> [Tree; 2] {
    let width = rng.random_range(TREE_WIDTH);
    let height = rng.random_range(TREE_HEIGHT);
    let y = -height;

    [
        Tree {
            x: TREE_MARGIN,
            y,
            width,
            height,
        },
        Tree {
            x: CANVAS_WIDTH - TREE_MARGIN - width,
            y,
            width,
            height,
        },
    ]
}
