mod atom;
mod cell;
mod engine;
mod error;
mod grid;
pub mod notify;

pub use atom::{Atom, AtomId, AtomState, Player};
pub use cell::Cell;
pub use engine::{AtomGame, PARALLEL_SCAN_THRESHOLD};
pub use error::{GameError, GameResult};
pub use grid::{CellKind, GridDims, GridPos};
pub use notify::{BehaviorSubject, Observable, Subject, Subscription, Watch};
