use std::fmt;

use super::notify::{BehaviorSubject, Watch};

/// One of the two players. Player one always moves first.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Player {
    #[default]
    One,
    Two,
}

impl Player {
    /// Zero-based player number (0 or 1).
    pub const fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    pub const fn from_index(index: usize) -> Self {
        if index % 2 == 0 { Player::One } else { Player::Two }
    }

    pub const fn next(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Stable identity of an atom for the lifetime of a game.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct AtomId(pub u32);

/// Everything an observer needs to draw an atom.
///
/// `slot_index` is the atom's position inside its cell's stack and only
/// matters for visual placement.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AtomState {
    pub x: usize,
    pub y: usize,
    pub slot_index: usize,
    pub player: Player,
}

/// A single game piece.
///
/// Clones share the same underlying state stream, so a handle passed to an
/// observer stays live as the engine moves the atom around. Only the engine
/// can publish new states.
#[derive(Clone)]
pub struct Atom {
    id: AtomId,
    state: std::sync::Arc<BehaviorSubject<AtomState>>,
}

impl Atom {
    pub(crate) fn new(id: AtomId, initial: AtomState) -> Self {
        Self {
            id,
            state: std::sync::Arc::new(BehaviorSubject::new(initial)),
        }
    }

    pub const fn id(&self) -> AtomId {
        self.id
    }

    /// Latest-value stream of this atom's position and owner.
    pub fn state(&self) -> Watch<AtomState> {
        self.state.watch()
    }

    pub fn current(&self) -> AtomState {
        self.state.value()
    }

    pub fn player(&self) -> Player {
        self.current().player
    }

    pub(crate) fn publish(&self, next: AtomState) {
        self.state.next(next);
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Atom {}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Atom")
            .field("id", &self.id)
            .field("state", &self.current())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn state(x: usize, y: usize, slot_index: usize, player: Player) -> AtomState {
        AtomState { x, y, slot_index, player }
    }

    #[test]
    fn test_player_alternation() {
        assert_eq!(Player::One.next(), Player::Two);
        assert_eq!(Player::Two.next(), Player::One);
        assert_eq!(Player::from_index(4), Player::One);
        assert_eq!(Player::from_index(7), Player::Two);
        assert_eq!(Player::Two.to_string(), "1");
    }

    #[test]
    fn test_clones_share_state() {
        let atom = Atom::new(AtomId(3), state(0, 0, 0, Player::One));
        let handle = atom.clone();
        atom.publish(state(1, 0, 0, Player::Two));
        assert_eq!(handle.current(), state(1, 0, 0, Player::Two));
        assert_eq!(handle.player(), Player::Two);
        assert_eq!(handle, atom);
    }

    #[test]
    fn test_state_emits_initial_then_changes() {
        let atom = Atom::new(AtomId(0), state(2, 2, 0, Player::One));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = atom.state().subscribe(move |s| sink.lock().unwrap().push(*s));
        atom.publish(state(3, 2, 1, Player::One));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![state(2, 2, 0, Player::One), state(3, 2, 1, Player::One)]
        );
    }
}
