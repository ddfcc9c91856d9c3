use macroquad::prelude::*;

use crate::application::{Camera, GameState};
use crate::domain::GridPos;
use crate::ui::{Button, ButtonAction, board_area_width};

/// Handle zoom with mouse wheel
pub fn handle_zoom(camera: &mut Camera) {
    let wheel = mouse_wheel().1;
    if wheel > 0.0 {
        camera.zoom_in(1.1);
    } else if wheel < 0.0 {
        camera.zoom_out(1.1);
    }
}

/// Board cell under the mouse, ignoring the side panel
pub fn hovered_cell(state: &GameState, camera: &Camera, mouse_pos: (f32, f32)) -> Option<GridPos> {
    if mouse_pos.0 >= board_area_width() {
        return None;
    }
    camera.screen_to_grid(mouse_pos.0, mouse_pos.1, state.game.dims())
}

/// Place an atom on left click when the move is legal
pub fn handle_board_click(state: &mut GameState, hover: Option<GridPos>) {
    if !is_mouse_button_pressed(MouseButton::Left) {
        return;
    }
    let Some(pos) = hover else {
        return;
    };
    if !state.can_place(pos) {
        log::debug!("ignored click on ({}, {})", pos.x, pos.y);
        return;
    }
    if let Err(err) = state.place(pos) {
        log::warn!("placement failed: {err}");
    }
}

/// Apply a panel or keyboard command
pub fn apply_action(state: GameState, action: ButtonAction) -> GameState {
    match action {
        ButtonAction::TogglePause => state.toggle_running(),
        ButtonAction::Restart => {
            log::info!("restarting game");
            state.restart()
        }
        ButtonAction::Settle => {
            let mut state = state;
            let cycles = state.settle();
            log::debug!("settled board in {cycles} explode cycles");
            state
        }
    }
}

/// Process keyboard input functionally
pub fn process_keyboard_input(state: GameState, camera: &mut Camera) -> GameState {
    let actions: [(KeyCode, ButtonAction); 3] = [
        (KeyCode::Space, ButtonAction::TogglePause),
        (KeyCode::S, ButtonAction::Settle),
        (KeyCode::R, ButtonAction::Restart),
    ];

    let new_state = actions.iter().fold(state, |s, (key, action)| {
        if is_key_pressed(*key) { apply_action(s, *action) } else { s }
    });

    // Reset zoom with 'H' (home)
    if is_key_pressed(KeyCode::H) {
        camera.reset();
    }

    new_state
}

/// Process button clicks functionally
pub fn process_button_clicks(state: GameState, buttons: &[Button], mouse_pos: (f32, f32)) -> GameState {
    buttons
        .iter()
        .filter(|btn| btn.is_clicked(mouse_pos))
        .fold(state, |s, btn| apply_action(s, btn.action()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::domain::Player;

    fn state() -> GameState {
        GameState::new(&GameConfig::default()).unwrap()
    }

    #[test]
    fn test_toggle_pause_action() {
        let s = apply_action(state(), ButtonAction::TogglePause);
        assert!(!s.is_running);
        let s = apply_action(s, ButtonAction::TogglePause);
        assert!(s.is_running);
    }

    #[test]
    fn test_settle_action_stabilises_board() {
        let mut s = state();
        s.place(GridPos::new(0, 0)).unwrap();
        s.place(GridPos::new(9, 9)).unwrap();
        s.place(GridPos::new(0, 0)).unwrap();
        let s = apply_action(s, ButtonAction::Settle);
        assert!(s.game.is_stable());
        assert_eq!(s.game.owner(GridPos::new(1, 0)), Ok(Some(Player::One)));
    }

    #[test]
    fn test_restart_action_resets_turn() {
        let mut s = state();
        s.place(GridPos::new(3, 3)).unwrap();
        let s = apply_action(s, ButtonAction::Restart);
        assert_eq!(s.game.current_player(), Player::One);
        assert_eq!(s.game.turns_played(), 0);
    }
}
