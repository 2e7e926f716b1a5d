//! Run state and core simulation types
//!
//! The whole run lives in one owned [`GameState`] value; the run loop and
//! the reset operation are the only writers. No ambient globals.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::checkpoint::CHECKPOINTS;
use super::scheduler::{Scheduler, TimerHandle, TimerKind};
use super::spawn;
use crate::consts::*;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Distance accumulates, obstacles spawn and move, collisions are checked
    Running,
    /// Entered on collision; all mutation suspended except reset
    Ended,
}

/// An obstacle on the road
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Identity, used for removal and scene sync
    pub id: u32,
    /// Lateral position in [-3, 3]
    pub lane: f32,
    /// Forward position along the lane
    pub z: f32,
}

/// Chase-camera pose, recomputed every frame for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub pos: Vec3,
    pub target: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            pos: Vec3::new(0.0, CAMERA_HEIGHT, -CAMERA_BACK),
            target: Vec3::ZERO,
        }
    }
}

/// Events emitted by the sim for the shell and the scene layer.
///
/// The core never touches a display layer; everything user-visible flows
/// through this queue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstacleSpawned { id: u32, lane: f32, z: f32 },
    ObstacleRemoved { id: u32 },
    /// Index into [`CHECKPOINTS`]
    PanelShown { index: usize },
    PanelHidden,
    /// Present the yes/no continuation prompt
    ContinuePromptRequested,
    /// The startup instructional banner is done
    BannerDismissed,
    /// The run hit an obstacle; shell acknowledges, then resets
    Collision { obstacle_id: u32 },
}

/// Complete run state (single owned value, single-writer)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Total travel distance this run
    pub distance_traveled: f32,
    /// Current forward speed (units per frame)
    pub speed: f32,
    /// Lateral position, clamped to [-LANE_LIMIT, LANE_LIMIT]
    pub player_lane: f32,
    /// Character forward position (tracks distance_traveled)
    pub character_z: f32,
    pub phase: RunPhase,
    /// Instructional banner dismissed
    pub game_started: bool,
    /// Character model loaded; gameplay updates are gated on this
    pub character_ready: bool,
    /// Active obstacles; membership matters, order is incidental
    pub obstacles: Vec<Obstacle>,
    pub camera: CameraPose,
    pub scheduler: Scheduler,
    /// Checkpoint panel currently on screen, as an index into [`CHECKPOINTS`]
    pub visible_panel: Option<usize>,
    /// Hundred-unit speed bands already applied (edge-triggered ramp)
    pub(crate) speed_bands: u32,
    /// One-shot flags: checkpoint already presented this run
    pub(crate) checkpoints_shown: [bool; CHECKPOINTS.len()],
    pub(crate) panel_hide: Option<TimerHandle>,
    pub(crate) prompt_timer: Option<TimerHandle>,
    pub(crate) spawn_timer: Option<TimerHandle>,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a fresh run: banner timer, spawn timer, initial obstacle batch
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            distance_traveled: 0.0,
            speed: BASE_SPEED,
            player_lane: 0.0,
            character_z: 0.0,
            phase: RunPhase::Running,
            game_started: false,
            character_ready: false,
            obstacles: Vec::with_capacity(MAX_OBSTACLES),
            camera: CameraPose::default(),
            scheduler: Scheduler::new(),
            visible_panel: None,
            speed_bands: 0,
            checkpoints_shown: [false; CHECKPOINTS.len()],
            panel_hide: None,
            prompt_timer: None,
            spawn_timer: None,
            events: Vec::new(),
            next_id: 1,
        };

        state
            .scheduler
            .schedule_once(TimerKind::DismissBanner, BANNER_SECS);
        state.spawn_timer = Some(
            state
                .scheduler
                .schedule_repeating(TimerKind::SpawnTick, SPAWN_PERIOD),
        );
        spawn::initial_batch(&mut state);

        state
    }

    /// Allocate a new entity id
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// True once the run has ended on a collision
    pub fn game_over(&self) -> bool {
        self.phase == RunPhase::Ended
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain the event queue; the shell calls this once per frame
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Asset gate: the character model finished loading
    pub fn set_character_ready(&mut self) {
        if !self.character_ready {
            log::info!("Character model ready, gameplay enabled");
            self.character_ready = true;
        }
    }

    /// Add an obstacle, respecting the active-count cap.
    ///
    /// Returns the new id, or None when the cap is reached.
    pub(crate) fn add_obstacle(&mut self, lane: f32, z: f32) -> Option<u32> {
        if self.obstacles.len() >= MAX_OBSTACLES {
            return None;
        }
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle { id, lane, z });
        self.push_event(GameEvent::ObstacleSpawned { id, lane, z });
        Some(id)
    }

    /// Remove an obstacle by id and notify the scene layer
    pub(crate) fn remove_obstacle(&mut self, id: u32) {
        self.obstacles.retain(|o| o.id != id);
        self.push_event(GameEvent::ObstacleRemoved { id });
    }

    /// Ended -> Running transition (also safe from Running).
    ///
    /// Restores base speed and zero distance, destroys every obstacle,
    /// regenerates the initial batch and restarts the spawn timer.
    pub fn reset(&mut self) {
        log::info!(
            "Run reset at distance {:.0} (speed {:.2})",
            self.distance_traveled,
            self.speed
        );

        self.distance_traveled = 0.0;
        self.speed = BASE_SPEED;
        self.speed_bands = 0;
        self.player_lane = 0.0;
        self.character_z = 0.0;
        self.camera = CameraPose::default();
        self.phase = RunPhase::Running;
        self.checkpoints_shown = [false; CHECKPOINTS.len()];

        let ids: Vec<u32> = self.obstacles.iter().map(|o| o.id).collect();
        for id in ids {
            self.remove_obstacle(id);
        }

        if self.visible_panel.take().is_some() {
            self.push_event(GameEvent::PanelHidden);
        }
        if let Some(handle) = self.panel_hide.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = self.prompt_timer.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = self.spawn_timer.take() {
            self.scheduler.cancel(handle);
        }
        self.spawn_timer = Some(
            self.scheduler
                .schedule_repeating(TimerKind::SpawnTick, SPAWN_PERIOD),
        );

        spawn::initial_batch(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_invariants() {
        let state = GameState::new(42);
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.speed, BASE_SPEED);
        assert_eq!(state.distance_traveled, 0.0);
        assert_eq!(state.obstacles.len(), INITIAL_OBSTACLES);
        for o in &state.obstacles {
            assert!((-LANE_LIMIT..=LANE_LIMIT).contains(&o.lane));
            assert!((0.0..INITIAL_SPAWN_RANGE).contains(&o.z));
        }
    }

    #[test]
    fn test_obstacle_cap_enforced() {
        let mut state = GameState::new(42);
        // Initial batch already fills the cap
        assert_eq!(state.add_obstacle(0.0, 100.0), None);
        assert_eq!(state.obstacles.len(), MAX_OBSTACLES);
    }

    #[test]
    fn test_reset_restores_invariants() {
        let mut state = GameState::new(42);
        state.distance_traveled = 512.0;
        state.speed = 0.29;
        state.player_lane = -2.0;
        state.phase = RunPhase::Ended;

        state.reset();

        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.speed, BASE_SPEED);
        assert_eq!(state.distance_traveled, 0.0);
        assert_eq!(state.obstacles.len(), INITIAL_OBSTACLES);
    }

    #[test]
    fn test_reset_is_idempotent_on_invariants() {
        let mut state = GameState::new(7);
        state.reset();
        let obstacles_after_first = state.obstacles.len();
        state.reset();
        assert_eq!(state.obstacles.len(), obstacles_after_first);
        assert_eq!(state.speed, BASE_SPEED);
        assert_eq!(state.distance_traveled, 0.0);
        assert_eq!(state.phase, RunPhase::Running);
    }

    #[test]
    fn test_reset_emits_scene_events() {
        let mut state = GameState::new(42);
        state.take_events();
        state.reset();

        let events = state.take_events();
        let removed = events
            .iter()
            .filter(|e| matches!(e, GameEvent::ObstacleRemoved { .. }))
            .count();
        let spawned = events
            .iter()
            .filter(|e| matches!(e, GameEvent::ObstacleSpawned { .. }))
            .count();
        assert_eq!(removed, INITIAL_OBSTACLES);
        assert_eq!(spawned, INITIAL_OBSTACLES);
    }

    #[test]
    fn test_same_seed_same_initial_batch() {
        let a = GameState::new(99999);
        let b = GameState::new(99999);
        assert_eq!(a.obstacles, b.obstacles);
    }
}
