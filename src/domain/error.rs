use super::Player;

/// Errors raised by the game engine.
///
/// Normal play never produces these; they surface caller contract
/// violations as explicit results instead of panics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Coordinate lies outside the board.
    #[error("position ({x}, {y}) is outside the {size_x}x{size_y} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        size_x: usize,
        size_y: usize,
    },

    /// Placement refused by the strict entry point.
    #[error("player {player} may not place an atom at ({x}, {y})")]
    IllegalMove { x: usize, y: usize, player: Player },

    /// The game already has a winner.
    #[error("game is over, player {winner} won")]
    GameOver { winner: Player },

    /// A board needs at least one cell.
    #[error("grid dimensions {size_x}x{size_y} must both be non-zero")]
    EmptyGrid { size_x: usize, size_y: usize },
}

pub type GameResult<T> = Result<T, GameError>;
