//! The chain-reaction game engine.
//!
//! [`AtomGame`] owns every cell and the turn counter. All mutation goes
//! through [`AtomGame::add_atom`] and [`AtomGame::explode`]; observers learn
//! about changes from [`AtomGame::on_new_atom`] and each atom's own
//! [`Atom::state`] stream.

use rayon::prelude::*;

use super::notify::{Observable, Subject};
use super::{Atom, AtomId, AtomState, Cell, GameError, GameResult, GridDims, GridPos, Player};

/// Boards at least this large scan for explosive cells with rayon.
pub const PARALLEL_SCAN_THRESHOLD: usize = 4096;

fn empty_cells(dims: GridDims) -> Vec<Cell> {
    let mut cells = Vec::with_capacity(dims.cell_count());
    cells.extend(dims.positions().map(|pos| Cell::new(pos, dims.capacity(pos))));
    cells
}

#[derive(Debug)]
pub struct AtomGame {
    dims: GridDims,
    cells: Vec<Cell>,
    player: Player,
    turns_played: u64,
    next_atom_id: u32,
    on_new_atom: Subject<Atom>,
}

impl AtomGame {
    /// Create a board of `size_x * size_y` empty cells with player one to move.
    pub fn new(size_x: usize, size_y: usize) -> GameResult<Self> {
        let dims = GridDims::new(size_x, size_y)?;
        Ok(Self {
            dims,
            cells: empty_cells(dims),
            player: Player::One,
            turns_played: 0,
            next_atom_id: 0,
            on_new_atom: Subject::new(),
        })
    }

    pub const fn dims(&self) -> GridDims {
        self.dims
    }

    /// Get grid dimensions
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.dims.size_x(), self.dims.size_y())
    }

    /// Player whose atom the next `add_atom` creates.
    pub const fn current_player(&self) -> Player {
        self.player
    }

    pub const fn turns_played(&self) -> u64 {
        self.turns_played
    }

    /// Stream of every atom created from now on. No replay.
    pub fn on_new_atom(&self) -> Observable<Atom> {
        self.on_new_atom.observable()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, pos: GridPos) -> GameResult<&Cell> {
        let index = self.dims.to_index(pos)?;
        Ok(&self.cells[index])
    }

    pub fn occupancy(&self, pos: GridPos) -> GameResult<usize> {
        self.cell(pos).map(Cell::occupancy)
    }

    pub fn owner(&self, pos: GridPos) -> GameResult<Option<Player>> {
        self.cell(pos).map(Cell::owner)
    }

    /// Number of atoms on the board currently coloured for `player`.
    pub fn atom_count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .flat_map(Cell::atoms)
            .filter(|atom| atom.player() == player)
            .count()
    }

    /// No cell is at or over capacity.
    pub fn is_stable(&self) -> bool {
        !self.cells.iter().any(Cell::is_explosive)
    }

    /// Empty every cell and hand the move back to player one.
    ///
    /// Existing `on_new_atom` subscribers stay attached; atoms from the old
    /// board are simply dropped by the engine. Atom ids keep counting up.
    pub fn reset(&mut self) {
        self.cells = empty_cells(self.dims);
        self.player = Player::One;
        self.turns_played = 0;
        log::info!(
            "board reset to {}x{}, {} new-atom listeners kept",
            self.dims.size_x(),
            self.dims.size_y(),
            self.on_new_atom.listener_count()
        );
    }

    /// Whether the current player may place at `pos` right now.
    ///
    /// The target must be empty or already theirs, and the whole board must
    /// be stable: placements are locked while any cell waits to explode.
    /// Off-board positions are never placeable.
    pub fn can_add_atom(&self, pos: GridPos) -> bool {
        let Ok(cell) = self.cell(pos) else {
            return false;
        };
        cell.accepts(self.player) && self.is_stable()
    }

    /// Place an atom for the current player and pass the turn.
    ///
    /// Ownership and the move lock are not checked here; gate calls with
    /// [`AtomGame::can_add_atom`] or use [`AtomGame::try_add_atom`]. Only an
    /// off-board position fails, and then nothing changes.
    pub fn add_atom(&mut self, pos: GridPos) -> GameResult<Atom> {
        let index = self.dims.to_index(pos)?;
        let player = self.player;
        let cell = &mut self.cells[index];

        let atom = Atom::new(
            AtomId(self.next_atom_id),
            AtomState {
                x: pos.x,
                y: pos.y,
                slot_index: cell.occupancy(),
                player,
            },
        );
        self.next_atom_id += 1;
        cell.push(atom.clone());
        log::debug!("player {player} placed {:?} at ({}, {})", atom.id(), pos.x, pos.y);

        self.on_new_atom.emit(&atom);
        self.player = player.next();
        self.turns_played += 1;
        Ok(atom)
    }

    /// [`AtomGame::add_atom`] that refuses illegal placements without side effects.
    pub fn try_add_atom(&mut self, pos: GridPos) -> GameResult<Atom> {
        self.dims.to_index(pos)?;
        if !self.can_add_atom(pos) {
            return Err(GameError::IllegalMove {
                x: pos.x,
                y: pos.y,
                player: self.player,
            });
        }
        self.add_atom(pos)
    }

    /// Run one explode cycle and return how many cells burst.
    ///
    /// The set of exploding cells is fixed before any atom moves, so a cell
    /// pushed over capacity by a neighbour waits for the next cycle. Each
    /// exploding cell sends one atom to every in-bounds neighbour (right,
    /// down, left, up); a corner keeps anything beyond its two.
    pub fn explode(&mut self) -> usize {
        let explosive = self.explosive_cells();

        for &index in &explosive {
            let source = self.dims.to_pos(index);
            for target in self.dims.neighbours(source) {
                self.move_atom(index, target);
            }
        }

        if !explosive.is_empty() {
            log::debug!("explode cycle burst {} cells", explosive.len());
        }
        explosive.len()
    }

    /// Indices of explosive cells in row-major order.
    fn explosive_cells(&self) -> Vec<usize> {
        if self.cells.len() >= PARALLEL_SCAN_THRESHOLD {
            self.cells
                .par_iter()
                .enumerate()
                .filter(|(_, cell)| cell.is_explosive())
                .map(|(index, _)| index)
                .collect()
        } else {
            self.cells
                .iter()
                .enumerate()
                .filter(|(_, cell)| cell.is_explosive())
                .map(|(index, _)| index)
                .collect()
        }
    }

    /// Move the newest atom of cell `from` onto `to` and recolour the
    /// whole destination stack for the mover.
    fn move_atom(&mut self, from: usize, to: GridPos) {
        let Some(atom) = self.cells[from].pop() else {
            return;
        };
        let mover = atom.player();
        let cell = &mut self.cells[self.dims.index_of(to)];
        cell.push(atom);

        for (slot_index, resident) in cell.atoms().iter().enumerate() {
            if resident.player() != mover {
                log::trace!("{:?} captured by player {mover} at ({}, {})", resident.id(), to.x, to.y);
            }
            resident.publish(AtomState {
                x: to.x,
                y: to.y,
                slot_index,
                player: mover,
            });
        }
    }
}
