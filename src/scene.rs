//! Visual-sync seam
//!
//! The sim never reaches into a display layer; the shell drains
//! [`GameEvent`]s and pose data and pushes them through this trait to
//! whatever actually draws (a JS renderer in the browser, a logger in
//! headless runs).

use glam::Vec3;

use crate::sim::{CameraPose, GameEvent, GameState};

/// Consumer of scene changes, implemented by the rendering collaborator
pub trait SceneSync {
    fn obstacle_added(&mut self, id: u32, lane: f32, z: f32);
    fn obstacle_removed(&mut self, id: u32);
    fn set_character(&mut self, pos: Vec3);
    fn set_camera(&mut self, camera: &CameraPose);
}

/// Forward this frame's obstacle changes and poses to the scene
pub fn sync_frame(scene: &mut impl SceneSync, state: &GameState, events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::ObstacleSpawned { id, lane, z } => scene.obstacle_added(*id, *lane, *z),
            GameEvent::ObstacleRemoved { id } => scene.obstacle_removed(*id),
            _ => {}
        }
    }
    scene.set_character(Vec3::new(state.player_lane, 0.0, state.character_z));
    scene.set_camera(&state.camera);
}

/// Log-only scene for native/headless runs
#[derive(Debug, Default)]
pub struct LogScene {
    pub obstacle_count: usize,
}

impl SceneSync for LogScene {
    fn obstacle_added(&mut self, id: u32, lane: f32, z: f32) {
        self.obstacle_count += 1;
        log::debug!("scene: obstacle {id} added at lane {lane:.1}, z {z:.0}");
    }

    fn obstacle_removed(&mut self, id: u32) {
        self.obstacle_count = self.obstacle_count.saturating_sub(1);
        log::debug!("scene: obstacle {id} removed");
    }

    fn set_character(&mut self, pos: Vec3) {
        log::trace!("scene: character at {pos}");
    }

    fn set_camera(&mut self, camera: &CameraPose) {
        log::trace!("scene: camera at {}", camera.pos);
    }
}
