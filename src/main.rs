//! Portfolio Runner entry point
//!
//! The browser shell wires keyboard input, the DOM overlay and the external
//! JS renderer to the sim; the native build runs the sim headless against a
//! logging scene.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use portfolio_runner::Settings;
    use portfolio_runner::scene::{self, SceneSync};
    use portfolio_runner::sim::{
        CHECKPOINTS, CameraPose, GameEvent, GameState, TickInput, tick,
    };

    // Bindings to the external 3D renderer. Model/texture loading, the
    // scene graph and viewport resize all live on the JS side behind
    // `window.portfolioRenderer`.
    #[wasm_bindgen(inline_js = "
        function renderer() {
            const r = window.portfolioRenderer;
            if (!r) { console.error('window.portfolioRenderer is missing'); }
            return r;
        }
        export function renderer_init(reducedMotion) {
            const r = renderer();
            if (r) { r.init(reducedMotion); }
        }
        export function renderer_spawn_obstacle(id, x, z) {
            const r = renderer();
            if (r) { r.spawnObstacle(id, x, z); }
        }
        export function renderer_remove_obstacle(id) {
            const r = renderer();
            if (r) { r.removeObstacle(id); }
        }
        export function renderer_set_character(x, z) {
            const r = renderer();
            if (r) { r.setCharacter(x, z); }
        }
        export function renderer_set_camera(x, y, z, tx, ty, tz) {
            const r = renderer();
            if (r) { r.setCamera(x, y, z, tx, ty, tz); }
        }
        export function renderer_character_ready() {
            const r = window.portfolioRenderer;
            return !!(r && r.characterReady);
        }
        export function renderer_render() {
            const r = renderer();
            if (r) { r.render(); }
        }
    ")]
    extern "C" {
        fn renderer_init(reduced_motion: bool);
        fn renderer_spawn_obstacle(id: u32, x: f32, z: f32);
        fn renderer_remove_obstacle(id: u32);
        fn renderer_set_character(x: f32, z: f32);
        fn renderer_set_camera(x: f32, y: f32, z: f32, tx: f32, ty: f32, tz: f32);
        fn renderer_character_ready() -> bool;
        fn renderer_render();
    }

    /// SceneSync implementation forwarding to the JS renderer
    struct JsScene;

    impl SceneSync for JsScene {
        fn obstacle_added(&mut self, id: u32, lane: f32, z: f32) {
            renderer_spawn_obstacle(id, lane, z);
        }

        fn obstacle_removed(&mut self, id: u32) {
            renderer_remove_obstacle(id);
        }

        fn set_character(&mut self, pos: glam::Vec3) {
            renderer_set_character(pos.x, pos.z);
        }

        fn set_camera(&mut self, camera: &CameraPose) {
            renderer_set_camera(
                camera.pos.x,
                camera.pos.y,
                camera.pos.z,
                camera.target.x,
                camera.target.y,
                camera.target.z,
            );
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        scene: JsScene,
        input: TickInput,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                scene: JsScene,
                input: TickInput::default(),
                last_time: 0.0,
            }
        }

        /// One rendered frame: tick the sim, dispatch events, sync the scene
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time) / 1000.0
            } else {
                1.0 / 60.0
            };
            self.last_time = time;

            // Asset gate: poll the JS renderer for model readiness
            if !self.state.character_ready && renderer_character_ready() {
                self.state.set_character_ready();
            }

            tick(&mut self.state, &self.input, dt);
            // Steps are one-shot commands
            self.input = TickInput::default();

            let mut events = self.state.take_events();
            if events
                .iter()
                .any(|e| matches!(e, GameEvent::Collision { .. }))
            {
                // Blocking acknowledgement, then a synchronous reset
                alert("Game Over! Restarting...");
                self.state.reset();
                events.extend(self.state.take_events());
            }

            for event in &events {
                handle_ui_event(event);
            }
            scene::sync_frame(&mut self.scene, &self.state, &events);
            renderer_render();
        }
    }

    fn handle_ui_event(event: &GameEvent) {
        match event {
            GameEvent::PanelShown { index } => {
                let checkpoint = &CHECKPOINTS[*index];
                if let Some(el) = element("portfolio-info") {
                    el.set_inner_html(&format!(
                        "<div class=\"portfolio-box\"><h2>{}</h2><p>{}</p></div>",
                        checkpoint.title, checkpoint.body
                    ));
                    let _ = el.set_attribute("class", "");
                }
            }
            GameEvent::PanelHidden => {
                if let Some(el) = element("portfolio-info") {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
            GameEvent::BannerDismissed => {
                if let Some(el) = element("banner") {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
            GameEvent::ContinuePromptRequested => {
                let keep_going = web_sys::window()
                    .and_then(|w| w.confirm_with_message("Do you want to continue playing?").ok())
                    .unwrap_or(true);
                log::info!("Continue prompt answered: {keep_going}");
            }
            _ => {}
        }
    }

    fn element(id: &str) -> Option<web_sys::Element> {
        web_sys::window()?.document()?.get_element_by_id(id)
    }

    fn alert(message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Portfolio Runner starting...");

        let settings = Settings::load();
        renderer_init(settings.reduced_motion);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {seed}");

        // Push the initial obstacle batch into the scene before the loop
        {
            let mut g = game.borrow_mut();
            let events = g.state.take_events();
            let Game { state, scene, .. } = &mut *g;
            scene::sync_frame(scene, state, &events);
        }

        setup_keyboard(game.clone());
        request_animation_frame(game);

        log::info!("Portfolio Runner running");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.key().as_str() {
                "ArrowLeft" => {
                    g.input.step_left = true;
                    g.input.dismiss_banner = true;
                }
                "ArrowRight" => {
                    g.input.step_right = true;
                    g.input.dismiss_banner = true;
                }
                _ => {}
            }
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().update(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use portfolio_runner::scene::{LogScene, sync_frame};
    use portfolio_runner::sim::{CHECKPOINTS, GameEvent, GameState, TickInput, tick};

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0FFEE);
    log::info!("Portfolio Runner (native headless) starting with seed {seed}");

    let mut state = GameState::new(seed);
    state.set_character_ready();
    let mut scene = LogScene::default();

    let input = TickInput::default();
    let dt = 1.0 / 60.0;
    let max_frames: u32 = 60 * 120;

    let mut frames = 0u32;
    while !state.game_over() && frames < max_frames {
        tick(&mut state, &input, dt);
        let events = state.take_events();
        for event in &events {
            match event {
                GameEvent::PanelShown { index } => {
                    let checkpoint = &CHECKPOINTS[*index];
                    println!("--- {} ---\n{}\n", checkpoint.title, checkpoint.body);
                }
                GameEvent::ContinuePromptRequested => {
                    println!("Do you want to continue playing?");
                }
                _ => {}
            }
        }
        sync_frame(&mut scene, &state, &events);
        frames += 1;
    }

    log::info!(
        "Run ended after {} frames at distance {:.0} (speed {:.2}, {} obstacles active)",
        frames,
        state.distance_traveled,
        state.speed,
        state.obstacles.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
