//! Per-frame run-loop update
//!
//! Invoked once per rendered frame by the shell. The frame callback and the
//! spawn timer are the only producers, and both are processed here, so the
//! obstacle collection keeps a single writer.

use glam::Vec3;

use super::checkpoint::{self, CHECKPOINTS, PanelKind};
use super::collision;
use super::scheduler::TimerKind;
use super::spawn;
use super::state::{GameEvent, GameState, RunPhase};
use crate::consts::*;

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Step one lane unit left
    pub step_left: bool,
    /// Step one lane unit right
    pub step_right: bool,
    /// Dismiss the instructional banner early
    pub dismiss_banner: bool,
}

/// Advance the run by one rendered frame.
///
/// `dt` is wall-clock seconds since the previous frame and feeds only the
/// timer scheduler; forward motion is per-frame. While the character model
/// is still loading, only timers advance (no movement, no collision
/// checks). While `Ended`, everything is suspended until
/// [`GameState::reset`].
pub fn tick(state: &mut GameState, input: &TickInput, dt: f64) {
    if state.phase == RunPhase::Ended {
        return;
    }

    if input.dismiss_banner {
        dismiss_banner(state);
    }

    for kind in state.scheduler.advance(dt) {
        match kind {
            TimerKind::SpawnTick => spawn::spawn_tick(state),
            TimerKind::HidePanel => hide_panel(state),
            TimerKind::ContinuePrompt => {
                state.prompt_timer = None;
                state.push_event(GameEvent::ContinuePromptRequested);
            }
            TimerKind::DismissBanner => dismiss_banner(state),
        }
    }

    // Asset gate: no gameplay until the character model is in the scene
    if !state.character_ready {
        return;
    }

    // 1. Advance forward and accumulate distance
    state.character_z += state.speed;
    state.distance_traveled += state.speed;

    // 2. Lateral input applied directly, clamped to the lane
    if input.step_left {
        state.player_lane = (state.player_lane - LANE_STEP).max(-LANE_LIMIT);
    }
    if input.step_right {
        state.player_lane = (state.player_lane + LANE_STEP).min(LANE_LIMIT);
    }

    // 3. Speed ramp: once per 100-unit band crossed (edge-triggered)
    let band = (state.distance_traveled / SPEED_RAMP_BAND) as u32;
    while state.speed_bands < band {
        state.speed_bands += 1;
        state.speed += SPEED_INCREMENT;
        log::info!(
            "Speed ramp: band {} reached, speed now {:.2}",
            state.speed_bands,
            state.speed
        );
    }

    // 4. Checkpoint panels, one-shot per window entry
    if let Some(index) = checkpoint::checkpoint_at(state.distance_traveled) {
        if !state.checkpoints_shown[index] {
            state.checkpoints_shown[index] = true;
            show_panel(state, index);
        }
    }

    // 5. Prune obstacles that fell behind the character
    let cutoff = state.character_z - PRUNE_BEHIND;
    let stale: Vec<u32> = state
        .obstacles
        .iter()
        .filter(|o| o.z < cutoff)
        .map(|o| o.id)
        .collect();
    for id in stale {
        state.remove_obstacle(id);
    }

    // 6. Camera follows the character
    state.camera.pos = Vec3::new(0.0, CAMERA_HEIGHT, state.character_z - CAMERA_BACK);
    state.camera.target = Vec3::new(state.player_lane, 0.0, state.character_z);

    // 7. Collision check; first overlap ends the run
    if let Some(obstacle_id) =
        collision::first_hit(state.player_lane, state.character_z, &state.obstacles)
    {
        log::info!(
            "Collision with obstacle {} at distance {:.0}",
            obstacle_id,
            state.distance_traveled
        );
        state.phase = RunPhase::Ended;
        if let Some(handle) = state.spawn_timer.take() {
            state.scheduler.cancel(handle);
        }
        state.push_event(GameEvent::Collision { obstacle_id });
    }
}

fn dismiss_banner(state: &mut GameState) {
    if !state.game_started {
        state.game_started = true;
        state.push_event(GameEvent::BannerDismissed);
        log::info!("Instructional banner dismissed");
    }
}

/// Present a checkpoint panel, replacing any panel already on screen.
///
/// The previous panel's pending hide timer is cancelled so it cannot race
/// the new panel's display window.
fn show_panel(state: &mut GameState, index: usize) {
    if let Some(handle) = state.panel_hide.take() {
        state.scheduler.cancel(handle);
    }
    state.visible_panel = Some(index);
    state.panel_hide = Some(state.scheduler.schedule_once(TimerKind::HidePanel, PANEL_SECS));
    state.push_event(GameEvent::PanelShown { index });
    log::info!("Checkpoint panel shown: {}", CHECKPOINTS[index].title);
}

fn hide_panel(state: &mut GameState) {
    state.panel_hide = None;
    if let Some(index) = state.visible_panel.take() {
        state.push_event(GameEvent::PanelHidden);
        // The contact panel chains a continuation prompt after a short delay
        if CHECKPOINTS[index].kind == PanelKind::Contact {
            state.prompt_timer = Some(
                state
                    .scheduler
                    .schedule_once(TimerKind::ContinuePrompt, PROMPT_DELAY_SECS),
            );
        }
    }
}
