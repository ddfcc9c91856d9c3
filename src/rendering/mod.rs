use macroquad::prelude::*;

use crate::application::{Camera, GameState};
use crate::domain::{AtomGame, GridPos, Player};
use crate::ui::{Button, PANEL_WIDTH, panel_x};

mod scene;

pub use scene::{AtomScene, AtomSprite, SLOT_OFFSET, rest_position, slot_offset};

/// Display colour for a player's atoms and cells
pub fn player_color(player: Player) -> Color {
    match player {
        Player::One => Color::from_rgba(230, 60, 60, 255),  // Red
        Player::Two => Color::from_rgba(60, 110, 240, 255), // Blue
    }
}

/// Draw the board: owner tint per cell, hover highlight, grid lines
pub fn draw_board(game: &AtomGame, camera: &Camera, hover: Option<GridPos>) {
    let cell_size = camera.scaled_cell();
    let grid_line_color = Color::from_rgba(200, 200, 60, 255);
    let empty_color = Color::from_rgba(20, 20, 20, 255);

    for cell in game.cells() {
        let pos = cell.pos();
        let (screen_x, screen_y) = camera.grid_to_screen(pos.x as f32, pos.y as f32);

        let mut fill = match cell.owner() {
            Some(owner) => {
                let base = player_color(owner);
                Color::new(base.r * 0.25, base.g * 0.25, base.b * 0.25, 1.0)
            }
            None => empty_color,
        };
        // Cells about to burst glow
        if cell.is_explosive() {
            fill = Color::new(fill.r + 0.3, fill.g + 0.2, fill.b, 1.0);
        }
        draw_rectangle(screen_x, screen_y, cell_size, cell_size, fill);

        if hover == Some(pos) {
            draw_rectangle(
                screen_x,
                screen_y,
                cell_size,
                cell_size,
                Color::from_rgba(255, 255, 255, 40),
            );
        }

        draw_rectangle_lines(screen_x, screen_y, cell_size, cell_size, 1.0, grid_line_color);
    }
}

/// Draw every atom sprite at its eased position
pub fn draw_atoms(scene: &AtomScene, camera: &Camera) {
    let radius = camera.scaled_cell() * 0.18;
    for sprite in scene.sprites() {
        let (x, y) = camera.grid_to_screen(sprite.pos.x, sprite.pos.y);
        draw_circle(x, y, radius, player_color(sprite.player));
        draw_circle_lines(x, y, radius, 1.0, Color::from_rgba(255, 255, 255, 120));
    }
}

/// Draw control panel background
fn draw_panel_background() {
    draw_rectangle(
        panel_x(),
        0.0,
        PANEL_WIDTH,
        screen_height(),
        Color::from_rgba(30, 30, 30, 255)
    );
}

/// Draw the side panel: buttons, turn, counts and help
pub fn draw_controls(state: &GameState, buttons: &[Button], mouse_pos: (f32, f32)) {
    draw_panel_background();
    buttons.iter().for_each(|btn| btn.draw(mouse_pos));

    let px = panel_x() + 10.0;
    let game = &state.game;

    match state.winner {
        Some(winner) => {
            draw_text(&format!("Player {} wins!", winner.index() + 1), px, 160.0, 22.0, player_color(winner));
        }
        None => {
            let player = game.current_player();
            draw_text("To move:", px, 160.0, 16.0, WHITE);
            draw_text(&format!("Player {}", player.index() + 1), px, 180.0, 20.0, player_color(player));
        }
    }

    let status = if !game.is_stable() {
        ("Reacting...", Color::from_rgba(255, 165, 0, 255))
    } else if state.is_running {
        ("Stable", Color::from_rgba(0, 255, 0, 255))
    } else {
        ("Paused", Color::from_rgba(255, 165, 0, 255))
    };

    let labels: [(&str, f32, f32, f32, Color); 12] = [
        ("Status:", px, 215.0, 16.0, WHITE),
        (status.0, px, 233.0, 16.0, status.1),
        (&format!("Red atoms: {}", game.atom_count(Player::One)), px, 265.0, 14.0, player_color(Player::One)),
        (&format!("Blue atoms: {}", game.atom_count(Player::Two)), px, 282.0, 14.0, player_color(Player::Two)),
        (&format!("Turns: {}", game.turns_played()), px, 305.0, 14.0, GRAY),
        (&format!("Explosions: {}", state.cycles), px, 322.0, 14.0, GRAY),
        ("Controls:", px, 360.0, 14.0, WHITE),
        ("LMB: Place atom", px, 375.0, 12.0, GRAY),
        ("Space: Pause", px, 388.0, 12.0, GRAY),
        ("S: Settle board", px, 401.0, 12.0, GRAY),
        ("R: Restart", px, 414.0, 12.0, GRAY),
        ("Wheel: Zoom", px, 427.0, 12.0, GRAY),
    ];

    labels.iter().for_each(|(text, x, y, size, color)| {
        draw_text(text, *x, *y, *size, *color);
    });
}
