use super::{GameError, GameResult};

/// A cell coordinate on the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct GridPos {
    pub x: usize,
    pub y: usize,
}

impl GridPos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for GridPos {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

/// Positional class of a cell, which fixes its capacity.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CellKind {
    Corner,
    Edge,
    Interior,
}

/// Board dimensions plus the pure addressing math built on them.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GridDims {
    size_x: usize,
    size_y: usize,
}

impl GridDims {
    /// Both dimensions must be non-zero.
    pub fn new(size_x: usize, size_y: usize) -> GameResult<Self> {
        if size_x == 0 || size_y == 0 {
            return Err(GameError::EmptyGrid { size_x, size_y });
        }
        Ok(Self { size_x, size_y })
    }

    pub const fn size_x(&self) -> usize {
        self.size_x
    }

    pub const fn size_y(&self) -> usize {
        self.size_y
    }

    pub const fn cell_count(&self) -> usize {
        self.size_x * self.size_y
    }

    pub const fn contains(&self, pos: GridPos) -> bool {
        pos.x < self.size_x && pos.y < self.size_y
    }

    /// Row-major index, range checked.
    pub fn to_index(&self, pos: GridPos) -> GameResult<usize> {
        if !self.contains(pos) {
            return Err(GameError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                size_x: self.size_x,
                size_y: self.size_y,
            });
        }
        Ok(self.index_of(pos))
    }

    /// Unchecked row-major index for coordinates produced by this grid.
    pub(crate) const fn index_of(&self, pos: GridPos) -> usize {
        pos.y * self.size_x + pos.x
    }

    /// Inverse of `to_index` for indices already known to be valid.
    pub const fn to_pos(&self, index: usize) -> GridPos {
        GridPos::new(index % self.size_x, index / self.size_x)
    }

    pub const fn is_edge_x(&self, x: usize) -> bool {
        x == 0 || x == self.size_x - 1
    }

    pub const fn is_edge_y(&self, y: usize) -> bool {
        y == 0 || y == self.size_y - 1
    }

    pub const fn classify(&self, pos: GridPos) -> CellKind {
        match (self.is_edge_x(pos.x), self.is_edge_y(pos.y)) {
            (true, true) => CellKind::Corner,
            (true, false) | (false, true) => CellKind::Edge,
            (false, false) => CellKind::Interior,
        }
    }

    /// Atoms a cell holds before it becomes explosive: 2, 3 or 4.
    pub const fn capacity(&self, pos: GridPos) -> usize {
        match self.classify(pos) {
            CellKind::Corner => 2,
            CellKind::Edge => 3,
            CellKind::Interior => 4,
        }
    }

    /// In-bounds orthogonal neighbours in explosion order: right, down, left, up.
    pub fn neighbours(&self, pos: GridPos) -> impl Iterator<Item = GridPos> + use<> {
        let GridPos { x, y } = pos;
        let candidates = [
            (x + 1 < self.size_x).then(|| GridPos::new(x + 1, y)),
            (y + 1 < self.size_y).then(|| GridPos::new(x, y + 1)),
            (x > 0).then(|| GridPos::new(x - 1, y)),
            (y > 0).then(|| GridPos::new(x, y - 1)),
        ];
        candidates.into_iter().flatten()
    }

    /// Every coordinate in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = GridPos> + use<> {
        let size_x = self.size_x;
        (0..self.size_y).flat_map(move |y| (0..size_x).map(move |x| GridPos::new(x, y)))
    }
}
