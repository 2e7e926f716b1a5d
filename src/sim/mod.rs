//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Timers via the explicit scheduler, never ambient callbacks
//! - No rendering or platform dependencies

pub mod checkpoint;
pub mod collision;
pub mod scheduler;
pub mod spawn;
pub mod state;
pub mod tick;

pub use checkpoint::{CHECKPOINTS, Checkpoint, PanelKind, checkpoint_at};
pub use collision::{Aabb, character_aabb, first_hit, obstacle_aabb};
pub use scheduler::{Scheduler, TimerHandle, TimerKind};
pub use spawn::{spawn_probability, spawn_tick};
pub use state::{CameraPose, GameEvent, GameState, Obstacle, RunPhase};
pub use tick::{TickInput, tick};
