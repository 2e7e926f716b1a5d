//! Obstacle spawning
//!
//! Two independent producers feed one collection: the initial batch created
//! on start/reset, and the fixed-period continuous spawner. Both run on the
//! run-loop thread, so the obstacle list keeps a single writer.

use rand::Rng;

use super::state::{GameState, RunPhase};
use crate::consts::*;

/// Create the initial batch: exactly [`INITIAL_OBSTACLES`] obstacles with
/// lane ~ U[-3, 3] and forward position ~ U[0, 500)
pub fn initial_batch(state: &mut GameState) {
    for _ in 0..INITIAL_OBSTACLES {
        let lane = state.rng.random_range(-LANE_LIMIT..=LANE_LIMIT);
        let z = state.rng.random_range(0.0..INITIAL_SPAWN_RANGE);
        if state.add_obstacle(lane, z).is_none() {
            break;
        }
    }
}

/// Spawn probability per tick for the given travel distance
pub fn spawn_probability(distance: f32) -> f64 {
    if (SPAWN_DENSE_BAND.0..=SPAWN_DENSE_BAND.1).contains(&distance) {
        SPAWN_DENSE_PROB
    } else if distance >= SPAWN_MIN_DISTANCE {
        SPAWN_BASE_PROB
    } else {
        0.0
    }
}

/// One firing of the spawn timer; yields at most one new obstacle.
///
/// Only fires while Running and below the active-obstacle cap. New
/// obstacles land 500..1300 units ahead of the character.
pub fn spawn_tick(state: &mut GameState) {
    if state.phase != RunPhase::Running || state.obstacles.len() >= MAX_OBSTACLES {
        return;
    }

    let lane = state.rng.random_range(-LANE_LIMIT..=LANE_LIMIT);
    let z = state.character_z + state.rng.random_range(SPAWN_AHEAD_MIN..SPAWN_AHEAD_MAX);

    let p = spawn_probability(state.distance_traveled);
    if p > 0.0 && state.rng.random_bool(p) {
        state.add_obstacle(lane, z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drained(state: &mut GameState) -> GameState {
        state.take_events();
        state.clone()
    }

    #[test]
    fn test_probability_schedule() {
        assert_eq!(spawn_probability(0.0), 0.0);
        assert_eq!(spawn_probability(99.9), 0.0);
        assert_eq!(spawn_probability(100.0), SPAWN_BASE_PROB);
        assert_eq!(spawn_probability(150.0), SPAWN_BASE_PROB);
        assert_eq!(spawn_probability(200.0), SPAWN_DENSE_PROB);
        assert_eq!(spawn_probability(400.0), SPAWN_DENSE_PROB);
        assert_eq!(spawn_probability(400.1), SPAWN_BASE_PROB);
        assert_eq!(spawn_probability(1000.0), SPAWN_BASE_PROB);
    }

    #[test]
    fn test_no_spawn_before_min_distance() {
        let mut state = drained(&mut GameState::new(1));
        state.obstacles.clear();
        state.distance_traveled = 50.0;

        for _ in 0..1000 {
            spawn_tick(&mut state);
        }
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_spawn_respects_cap() {
        let mut state = drained(&mut GameState::new(2));
        state.distance_traveled = 250.0;

        // Initial batch already at the cap
        for _ in 0..1000 {
            spawn_tick(&mut state);
            assert!(state.obstacles.len() <= MAX_OBSTACLES);
        }
        assert_eq!(state.obstacles.len(), MAX_OBSTACLES);
    }

    #[test]
    fn test_spawn_lands_ahead_of_character() {
        let mut state = drained(&mut GameState::new(3));
        state.obstacles.clear();
        state.distance_traveled = 250.0;
        state.character_z = 250.0;

        while state.obstacles.is_empty() {
            spawn_tick(&mut state);
        }
        let o = state.obstacles[0];
        assert!((-LANE_LIMIT..=LANE_LIMIT).contains(&o.lane));
        assert!(o.z >= state.character_z + SPAWN_AHEAD_MIN);
        assert!(o.z < state.character_z + SPAWN_AHEAD_MAX);
    }

    #[test]
    fn test_no_spawn_after_game_over() {
        let mut state = drained(&mut GameState::new(4));
        state.obstacles.clear();
        state.distance_traveled = 250.0;
        state.phase = RunPhase::Ended;

        for _ in 0..1000 {
            spawn_tick(&mut state);
        }
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_dense_band_spawn_rate() {
        // Statistical: at distance 250 the per-tick rate is ~0.5
        let mut state = drained(&mut GameState::new(0xDECAF));
        state.distance_traveled = 250.0;

        let ticks = 10_000;
        let mut spawned = 0u32;
        for _ in 0..ticks {
            state.obstacles.clear();
            spawn_tick(&mut state);
            spawned += state.obstacles.len() as u32;
            state.take_events();
        }

        let rate = f64::from(spawned) / f64::from(ticks);
        assert!(
            (rate - SPAWN_DENSE_PROB).abs() < 0.03,
            "observed spawn rate {rate} too far from {SPAWN_DENSE_PROB}"
        );
    }
}
