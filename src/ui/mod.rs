mod button;

pub use button::Button;

use macroquad::prelude::{screen_width, screen_height};

pub const PANEL_WIDTH: f32 = 180.0;
pub const BUTTON_HEIGHT: f32 = 40.0;

/// Get the X position where the panel starts (right side)
pub fn panel_x() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Get the width of the board area
pub fn board_area_width() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Get the height of the board area
pub fn board_area_height() -> f32 {
    screen_height()
}

/// What a panel button does when clicked
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    TogglePause,
    Settle,
    Restart,
}

/// Create panel buttons with standard layout
pub fn create_buttons() -> Vec<Button> {
    let px = panel_x();
    vec![
        Button::new(px, 20.0, PANEL_WIDTH, BUTTON_HEIGHT, "Pause/Resume", ButtonAction::TogglePause),
        Button::new(px, 65.0, PANEL_WIDTH, BUTTON_HEIGHT, "Settle", ButtonAction::Settle),
        Button::new(px, 110.0, PANEL_WIDTH, BUTTON_HEIGHT, "Restart", ButtonAction::Restart),
    ]
}
