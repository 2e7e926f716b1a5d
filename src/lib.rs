//! Portfolio Runner - an endless-runner portfolio showcase
//!
//! Core modules:
//! - `sim`: Deterministic simulation (run loop, obstacles, checkpoints)
//! - `scene`: Visual-sync seam consumed by an external renderer
//! - `settings`: User preferences persisted to LocalStorage

pub mod scene;
pub mod settings;
pub mod sim;

pub use scene::{LogScene, SceneSync};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Forward speed at the start of a run (units per frame)
    pub const BASE_SPEED: f32 = 0.2;
    /// Speed gained per 100-unit travel band
    pub const SPEED_INCREMENT: f32 = 0.01;
    /// Width of one speed-ramp band (travel units)
    pub const SPEED_RAMP_BAND: f32 = 100.0;

    /// Lateral extent of the lane; the character is clamped to [-LANE_LIMIT, LANE_LIMIT]
    pub const LANE_LIMIT: f32 = 3.0;
    /// Lateral distance of one step command
    pub const LANE_STEP: f32 = 1.0;

    /// Hard cap on simultaneously active obstacles
    pub const MAX_OBSTACLES: usize = 10;
    /// Size of the batch created on start and on reset
    pub const INITIAL_OBSTACLES: usize = 10;
    /// Obstacles further than this behind the character are pruned
    pub const PRUNE_BEHIND: f32 = 50.0;

    /// Initial batch forward range: [0, 500)
    pub const INITIAL_SPAWN_RANGE: f32 = 500.0;
    /// Continuous spawns land this far ahead of the character (min)
    pub const SPAWN_AHEAD_MIN: f32 = 500.0;
    /// Continuous spawns land this far ahead of the character (max, exclusive)
    pub const SPAWN_AHEAD_MAX: f32 = 1300.0;

    /// Spawn timer period in seconds
    pub const SPAWN_PERIOD: f64 = 1.0;
    /// No spawns at all below this travel distance
    pub const SPAWN_MIN_DISTANCE: f32 = 100.0;
    /// Baseline spawn probability per tick
    pub const SPAWN_BASE_PROB: f64 = 0.3;
    /// Raised spawn probability inside the dense band
    pub const SPAWN_DENSE_PROB: f64 = 0.5;
    /// Travel-distance band with raised spawn probability (inclusive)
    pub const SPAWN_DENSE_BAND: (f32, f32) = (200.0, 400.0);

    /// Seconds a checkpoint panel stays visible
    pub const PANEL_SECS: f64 = 5.0;
    /// Delay after the contact panel hides before the continue prompt
    pub const PROMPT_DELAY_SECS: f64 = 1.0;
    /// Seconds the instructional banner is shown at startup
    pub const BANNER_SECS: f64 = 3.0;

    /// Camera height above the road
    pub const CAMERA_HEIGHT: f32 = 1.5;
    /// Camera trails the character by this forward offset
    pub const CAMERA_BACK: f32 = 5.0;

    /// Character bounding volume half-extents (box around the running model)
    pub const CHARACTER_HALF_EXTENTS: Vec3 = Vec3::new(0.4, 0.9, 0.4);
    /// Character bounding volume center height
    pub const CHARACTER_CENTER_Y: f32 = 0.9;
    /// Obstacle bounding volume half-extents (box around the r=0.5 h=1 cylinder)
    pub const OBSTACLE_HALF_EXTENTS: Vec3 = Vec3::new(0.5, 0.5, 0.5);
    /// Obstacle bounding volume center height
    pub const OBSTACLE_CENTER_Y: f32 = 0.5;
}
