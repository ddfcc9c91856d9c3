// Domain layer - board, atoms, explosion rules, change notification
pub mod domain;

// Application layer - explode cadence, win detection, camera
pub mod application;

// Configuration
pub mod config;

// Infrastructure layer - UI, rendering, input
pub mod ui;
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use domain::{Atom, AtomGame, AtomState, GameError, GridPos, Player};
pub use application::{GameState, Camera};
pub use config::GameConfig;
