use macroquad::prelude::*;
use exploding_atoms::{
    GameConfig, GameState, Camera,
    rendering::{self, AtomScene},
    ui, input,
};

fn window_conf() -> Conf {
    Conf {
        window_title: "Exploding Atoms".to_owned(),
        window_width: 900,
        window_height: 700,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let config = match GameConfig::load() {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}; falling back to defaults");
            GameConfig::default()
        }
    };

    let mut state = match GameState::new(&config) {
        Ok(state) => state,
        Err(err) => {
            log::error!("cannot start game: {err}");
            return;
        }
    };
    log::info!(
        "starting {}x{} game, exploding every {}s",
        config.width,
        config.height,
        config.explode_interval_secs
    );

    let mut camera = Camera::new(config.cell_size);
    let scene = AtomScene::attach(&state.game);
    let mut seen_restarts = state.restarts;

    loop {
        let mouse_pos = mouse_position();
        let buttons = ui::create_buttons();

        input::handle_zoom(&mut camera);
        camera.center_on(state.game.dims(), ui::board_area_width(), ui::board_area_height());

        let hover = input::hovered_cell(&state, &camera, mouse_pos);
        input::handle_board_click(&mut state, hover);
        state = input::process_button_clicks(state, &buttons, mouse_pos);
        state = input::process_keyboard_input(state, &mut camera);

        // Restart drops the old atoms; the engine keeps our listener
        if state.restarts != seen_restarts {
            scene.clear();
            seen_restarts = state.restarts;
        }

        let dt = get_frame_time();
        state = state.tick(dt);
        scene.update(dt);

        clear_background(BLACK);
        rendering::draw_board(&state.game, &camera, hover);
        rendering::draw_atoms(&scene, &camera);
        rendering::draw_controls(&state, &buttons, mouse_pos);

        next_frame().await;
    }
}
