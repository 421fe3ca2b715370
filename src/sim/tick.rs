//! Per-frame simulation tick
//!
//! One `tick` call = one animation frame at a fixed virtual timestep. The
//! controller routes between the start screen, active play, and the game
//! over screen; `step` advances active play by exactly one frame.

use rand::Rng;

use super::collision::overlaps;
use super::spawn;
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Input snapshot for a single tick (deterministic)
///
/// Held keys arrive as booleans sampled at the start of the tick. `start`
/// and `cycle_weather` are one-shot triggers, already debounced by the
/// platform layer.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Accelerate forward
    pub accelerate: bool,
    /// Brake, then reverse
    pub reverse: bool,
    pub steer_left: bool,
    pub steer_right: bool,
    /// Start or restart a run
    pub start: bool,
    /// Advance the weather mode
    pub cycle_weather: bool,
}

/// Side effects reported to the platform layer (audio, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The car hit an obstacle; fire the crash cue once
    Crashed,
    /// Difficulty stepped up to the given level
    LevelUp(u32),
}

/// Advance the controller by one animation tick.
///
/// In `NotStarted` and `GameOver` no simulation runs; the start input
/// performs a full reset into `Playing`. Weather cycling is honored in
/// every phase.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.cycle_weather {
        state.cycle_weather();
    }

    match state.phase {
        GamePhase::NotStarted | GamePhase::GameOver => {
            if input.start {
                state.reset();
            }
        }
        GamePhase::Playing => step(state, input, &mut events),
    }

    events
}

/// One simulation frame.
///
/// Mutates car kinematics, road scroll, score/level, entity sets, and the
/// game phase. An invalid car makes the whole step a no-op.
pub fn step(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    if !state.car.is_valid() {
        log::warn!("Car state is invalid; skipping frame");
        return;
    }

    state.time_ticks += 1;

    let car = &mut state.car;

    // Longitudinal control: accelerate, reverse, or coast down to zero
    // without overshooting it.
    if input.accelerate {
        car.speed = (car.speed + car.acceleration).min(car.max_speed);
    } else if input.reverse {
        car.speed = (car.speed - car.acceleration).max(-car.max_speed / 2.0);
    } else if car.speed > 0.0 {
        car.speed = (car.speed - car.deceleration).max(0.0);
    } else if car.speed < 0.0 {
        car.speed = (car.speed + car.deceleration).min(0.0);
    }

    // Steering turns the heading regardless of speed
    if input.steer_left {
        car.angle -= car.turn_speed;
    }
    if input.steer_right {
        car.angle += car.turn_speed;
    }

    // Move along the heading vector; angle 0 points straight up
    car.x += car.angle.sin() * car.speed;
    car.y -= car.angle.cos() * car.speed;

    let speed = car.speed;

    // Road scroll drives the lane-marking animation phase
    state.road.y += speed;
    if state.road.y >= CANVAS_HEIGHT {
        state.road.y = 0.0;
    }

    // Clamp fully inside the canvas on all four sides. Overshoot is
    // silently capped; velocity is left alone.
    let car = &mut state.car;
    car.x = car.x.clamp(0.0, CANVAS_WIDTH - car.width);
    car.y = car.y.clamp(0.0, CANVAS_HEIGHT - car.height);

    // Score follows speed; reversing can pull it back but never below zero
    state.score += (speed * SCORE_SPEED_FACTOR).floor() as i64;
    state.score = state.score.max(0);

    // At most one level-up per frame, even when the score jumps past
    // several thresholds at once.
    if state.score > state.level as i64 * LEVEL_SCORE_STEP {
        state.level += 1;
        state.road.speed += LEVEL_ROAD_SPEED_STEP;
        state.spawn_interval = state
            .spawn_interval
            .saturating_sub(SPAWN_INTERVAL_STEP)
            .max(SPAWN_INTERVAL_FLOOR);
        state.car.max_speed += LEVEL_MAX_SPEED_STEP;
        events.push(GameEvent::LevelUp(state.level));
        log::info!(
            "Level up! level={} road_speed={} spawn_interval={}",
            state.level,
            state.road.speed,
            state.spawn_interval
        );
    }

    // Timed obstacle spawning
    state.spawn_timer += 1;
    if state.spawn_timer >= state.spawn_interval {
        let obstacle = spawn::spawn_obstacle(&mut state.rng);
        state.obstacles.push(obstacle);
        state.spawn_timer = 0;
    }

    // Tree pairs appear on a coin flip each frame
    if state.rng.random_bool(TREE_SPAWN_CHANCE) {
        let [left, right] = spawn::spawn_tree_pair(&mut state.rng);
        state.trees.push(left);
        state.trees.push(right);
    }

    // Advance obstacles, cull the off-screen ones, hit-test the rest.
    // Reverse index iteration allows in-place removal. The first overlap
    // ends the run; later obstacles still advance but report nothing more.
    let car_rect = state.car.rect();
    for i in (0..state.obstacles.len()).rev() {
        state.obstacles[i].y += state.road.speed;
        if state.obstacles[i].y > CANVAS_HEIGHT {
            state.obstacles.remove(i);
            continue;
        }
        if state.phase == GamePhase::Playing && overlaps(&car_rect, &state.obstacles[i].rect()) {
            state.phase = GamePhase::GameOver;
            events.push(GameEvent::Crashed);
            log::info!("Crash! final score {} (level {})", state.score, state.level);
        }
    }

    // Trees share the obstacle lifecycle minus the hit test
    for i in (0..state.trees.len()).rev() {
        state.trees[i].y += state.road.speed;
        if state.trees[i].y > CANVAS_HEIGHT {
            state.trees.remove(i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Obstacle, ObstacleColor, Weather};
    use proptest::prelude::*;

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        state
    }

    /// A started state with the road kept clear (no initial obstacle, timed
    /// spawning pushed out of reach), so long runs cannot crash.
    fn started_clear(seed: u64) -> GameState {
        let mut state = started(seed);
        state.obstacles.clear();
        state.spawn_interval = u32::MAX;
        state
    }

    fn held(accelerate: bool, reverse: bool, left: bool, right: bool) -> TickInput {
        TickInput {
            accelerate,
            reverse,
            steer_left: left,
            steer_right: right,
            ..Default::default()
        }
    }

    #[test]
    fn test_start_resets_and_enters_playing() {
        let mut state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::NotStarted);

        // Ticks without the start input stay on the start screen
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.time_ticks, 0);

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_no_simulation_in_game_over() {
        let mut state = started(1);
        state.phase = GamePhase::GameOver;
        let ticks_before = state.time_ticks;

        tick(&mut state, &held(true, false, false, false));
        assert_eq!(state.time_ticks, ticks_before);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = started(1);
        state.phase = GamePhase::GameOver;
        state.score = 777;

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_weather_cycles_in_any_phase() {
        let mut state = GameState::new(1);
        let input = TickInput {
            cycle_weather: true,
            ..Default::default()
        };

        tick(&mut state, &input);
        assert_eq!(state.weather, Weather::Rainy);

        state.phase = GamePhase::GameOver;
        tick(&mut state, &input);
        assert_eq!(state.weather, Weather::Snowy);
    }

    #[test]
    fn test_speed_clamps_forward_and_reverse() {
        let mut state = started_clear(2);

        for _ in 0..200 {
            tick(&mut state, &held(true, false, false, false));
        }
        assert_eq!(state.car.speed, state.car.max_speed);

        for _ in 0..400 {
            tick(&mut state, &held(false, true, false, false));
        }
        assert_eq!(state.car.speed, -state.car.max_speed / 2.0);
    }

    #[test]
    fn test_coasting_decays_to_zero_without_overshoot() {
        let mut state = started_clear(2);
        state.car.speed = 0.03; // below one deceleration step

        tick(&mut state, &TickInput::default());
        assert_eq!(state.car.speed, 0.0);

        state.car.speed = -0.03;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.car.speed, 0.0);
    }

    #[test]
    fn test_steering_turns_heading_at_any_speed() {
        let mut state = started_clear(2);
        assert_eq!(state.car.speed, 0.0);

        tick(&mut state, &held(false, false, true, false));
        assert!(state.car.angle < 0.0);

        let angle = state.car.angle;
        tick(&mut state, &held(false, false, false, true));
        assert!(state.car.angle > angle);
    }

    #[test]
    fn test_car_stays_inside_canvas() {
        let mut state = started_clear(3);

        // Drive straight up until well past the top edge
        for _ in 0..500 {
            tick(&mut state, &held(true, false, false, false));
        }
        assert_eq!(state.car.y, 0.0);
        assert!(state.car.speed > 0.0); // clamping does not zero velocity

        // Point the heading right and drive into the side wall
        state.car.angle = std::f32::consts::FRAC_PI_2;
        for _ in 0..500 {
            tick(&mut state, &held(true, false, false, false));
        }
        assert_eq!(state.car.x, CANVAS_WIDTH - state.car.width);
    }

    #[test]
    fn test_score_accrues_from_speed_and_never_goes_negative() {
        let mut state = started_clear(4);
        state.car.speed = state.car.max_speed;

        tick(&mut state, &held(true, false, false, false));
        assert_eq!(state.score, 1); // floor(10 * 0.1)

        // Reverse at half max speed: floor(-0.5) = -1 per frame
        state.score = 2;
        state.car.speed = -state.car.max_speed / 2.0;
        for _ in 0..10 {
            tick(&mut state, &held(false, true, false, false));
        }
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_level_up_applies_difficulty_steps() {
        let mut state = started_clear(5);
        state.spawn_interval = SPAWN_INTERVAL_START;
        state.score = 500;
        state.car.speed = state.car.max_speed;

        let events = tick(&mut state, &held(true, false, false, false));
        assert_eq!(state.level, 2);
        assert_eq!(state.road.speed, ROAD_START_SPEED + LEVEL_ROAD_SPEED_STEP);
        assert_eq!(state.spawn_interval, SPAWN_INTERVAL_START - SPAWN_INTERVAL_STEP);
        assert_eq!(state.car.max_speed, CAR_MAX_SPEED + LEVEL_MAX_SPEED_STEP);
        assert!(events.contains(&GameEvent::LevelUp(2)));
    }

    #[test]
    fn test_at_most_one_level_up_per_frame() {
        let mut state = started_clear(5);
        state.score = 5000; // past many thresholds at once
        state.car.speed = state.car.max_speed;

        tick(&mut state, &held(true, false, false, false));
        assert_eq!(state.level, 2);

        tick(&mut state, &held(true, false, false, false));
        assert_eq!(state.level, 3);
    }

    #[test]
    fn test_spawn_interval_floor() {
        let mut state = started_clear(5);
        state.spawn_interval = SPAWN_INTERVAL_FLOOR + 5;
        state.score = i64::MAX / 2;
        state.car.speed = state.car.max_speed;

        tick(&mut state, &held(true, false, false, false));
        assert_eq!(state.spawn_interval, SPAWN_INTERVAL_FLOOR);

        state.level = 2;
        tick(&mut state, &held(true, false, false, false));
        assert_eq!(state.spawn_interval, SPAWN_INTERVAL_FLOOR);
    }

    #[test]
    fn test_obstacle_spawns_at_interval() {
        let mut state = started_clear(6);
        state.spawn_interval = SPAWN_INTERVAL_START;

        for _ in 0..SPAWN_INTERVAL_START - 1 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.obstacles.len(), 0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.spawn_timer, 0);
    }

    #[test]
    fn test_offscreen_entities_are_culled() {
        let mut state = started_clear(7);
        state.obstacles.push(Obstacle {
            x: 100.0,
            y: CANVAS_HEIGHT + 0.5,
            width: 50.0,
            height: 70.0,
            color: ObstacleColor::Red,
        });
        state.obstacles.push(Obstacle {
            x: 100.0,
            y: CANVAS_HEIGHT + 9000.0, // far overshoot is culled just the same
            width: 50.0,
            height: 70.0,
            color: ObstacleColor::Gray,
        });

        tick(&mut state, &TickInput::default());
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_collision_ends_run_with_one_crash_event() {
        let mut state = started_clear(8);
        // Two obstacles both overlapping the car; placed so road advance
        // keeps them overlapping.
        for _ in 0..2 {
            state.obstacles.push(Obstacle {
                x: state.car.x,
                y: state.car.y - state.road.speed,
                width: 50.0,
                height: 70.0,
                color: ObstacleColor::Purple,
            });
        }

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            events.iter().filter(|e| **e == GameEvent::Crashed).count(),
            1
        );
    }

    #[test]
    fn test_trees_never_collide() {
        let mut state = started_clear(9);
        state.trees.push(crate::sim::state::Tree {
            x: state.car.x,
            y: state.car.y,
            width: 25.0,
            height: 60.0,
        });

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(events.is_empty());
    }

    #[test]
    fn test_invalid_car_makes_step_a_no_op() {
        let mut state = started_clear(10);
        state.car.x = f32::NAN;
        let ticks = state.time_ticks;
        let score = state.score;
        let obstacles = state.obstacles.len();

        let events = tick(&mut state, &held(true, false, false, false));
        assert!(events.is_empty());
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.score, score);
        assert_eq!(state.obstacles.len(), obstacles);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_determinism_same_seed_same_inputs() {
        let mut a = started(42);
        let mut b = started(42);

        let script = [
            held(true, false, false, false),
            held(true, false, true, false),
            held(true, false, false, true),
            held(false, true, false, false),
            TickInput::default(),
        ];
        for _ in 0..100 {
            for input in &script {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.level, b.level);
        assert_eq!(a.obstacles.len(), b.obstacles.len());
        assert_eq!(a.trees.len(), b.trees.len());
        assert_eq!(a.car.x, b.car.x);
        assert_eq!(a.car.y, b.car.y);
        assert_eq!(a.car.speed, b.car.speed);
    }

    proptest! {
        /// Spec invariants hold for arbitrary input sequences: speed stays
        /// in [-max/2, max] and the car rect inside the canvas.
        #[test]
        fn prop_speed_and_bounds_invariants(
            seed in any::<u64>(),
            inputs in proptest::collection::vec(
                (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()),
                1..300,
            ),
        ) {
            let mut state = started(seed);
            for (a, r, l, s) in inputs {
                tick(&mut state, &held(a, r, l, s));
                let car = &state.car;
                prop_assert!(car.speed <= car.max_speed);
                prop_assert!(car.speed >= -car.max_speed / 2.0);
                prop_assert!(car.x >= 0.0 && car.x + car.width <= CANVAS_WIDTH);
                prop_assert!(car.y >= 0.0 && car.y + car.height <= CANVAS_HEIGHT);
                prop_assert!(state.score >= 0);
            }
        }
    }
}
