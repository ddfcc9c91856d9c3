use super::{Atom, GridPos, Player};

/// Cell is one board position and the stack of atoms sitting on it.
/// Oldest atom first; the first atom's player owns the cell.
#[derive(Clone, Debug)]
pub struct Cell {
    pos: GridPos,
    capacity: usize,
    atoms: Vec<Atom>,
}

impl Cell {
    pub(crate) fn new(pos: GridPos, capacity: usize) -> Self {
        Self {
            pos,
            capacity,
            atoms: Vec::with_capacity(capacity),
        }
    }

    pub const fn pos(&self) -> GridPos {
        self.pos
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn occupancy(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Reached or passed capacity; will burst on the next explode.
    pub fn is_explosive(&self) -> bool {
        self.atoms.len() >= self.capacity
    }

    /// Derived from the first atom rather than stored separately.
    pub fn owner(&self) -> Option<Player> {
        self.atoms.first().map(Atom::player)
    }

    /// Empty cells are open to anyone, owned cells only to their owner.
    pub fn accepts(&self, player: Player) -> bool {
        self.owner().is_none_or(|owner| owner == player)
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub(crate) fn push(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }

    pub(crate) fn pop(&mut self) -> Option<Atom> {
        self.atoms.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AtomId, AtomState};

    fn atom(id: u32, player: Player) -> Atom {
        Atom::new(AtomId(id), AtomState { x: 0, y: 0, slot_index: 0, player })
    }

    #[test]
    fn test_empty_cell_accepts_both_players() {
        let cell = Cell::new(GridPos::new(0, 0), 2);
        assert!(cell.accepts(Player::One));
        assert!(cell.accepts(Player::Two));
        assert_eq!(cell.owner(), None);
        assert!(!cell.is_explosive());
    }

    #[test]
    fn test_owner_follows_first_atom() {
        let mut cell = Cell::new(GridPos::new(0, 0), 2);
        cell.push(atom(0, Player::Two));
        assert_eq!(cell.owner(), Some(Player::Two));
        assert!(cell.accepts(Player::Two));
        assert!(!cell.accepts(Player::One));
    }

    #[test]
    fn test_explosive_at_capacity() {
        let mut cell = Cell::new(GridPos::new(0, 0), 2);
        cell.push(atom(0, Player::One));
        assert!(!cell.is_explosive());
        cell.push(atom(1, Player::One));
        assert!(cell.is_explosive());
    }

    #[test]
    fn test_pop_takes_newest() {
        let mut cell = Cell::new(GridPos::new(1, 1), 4);
        cell.push(atom(0, Player::One));
        cell.push(atom(1, Player::One));
        assert_eq!(cell.pop().map(|a| a.id()), Some(AtomId(1)));
        assert_eq!(cell.occupancy(), 1);
    }
}
