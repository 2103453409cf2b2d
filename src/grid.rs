//! Board geometry: positions, players, walls and the blocked-edge matrices.

use std::fmt;

use ndarray::Array2;

/// The board is always 9x9.
pub const BOARD_SIZE: i32 = 9;
/// Wall anchors live on the 8x8 lattice of inner intersections.
pub const WALL_GRID_SIZE: i32 = BOARD_SIZE - 1;
pub const MAX_WALLS_PER_PLAYER: u8 = 10;

/// A cell on the board. Signed so that a computed destination can fall off the
/// board and still be represented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    pub fn offset(&self, delta_row: i32, delta_col: i32) -> Self {
        Self::new(self.row + delta_row, self.col + delta_col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    /// Starts at the bottom (row 8), aims for row 0.
    A,
    /// Starts at the top (row 0), aims for row 8.
    B,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::A, Player::B];

    pub const fn index(self) -> usize {
        match self {
            Player::A => 0,
            Player::B => 1,
        }
    }

    pub const fn opponent(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    pub const fn start(self) -> Position {
        match self {
            Player::A => Position::new(BOARD_SIZE - 1, BOARD_SIZE / 2),
            Player::B => Position::new(0, BOARD_SIZE / 2),
        }
    }

    pub const fn target_row(self) -> i32 {
        match self {
            Player::A => 0,
            Player::B => BOARD_SIZE - 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::A => write!(f, "A"),
            Player::B => write!(f, "B"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub const fn symbol(self) -> char {
        match self {
            Orientation::Horizontal => '-',
            Orientation::Vertical => '|',
        }
    }
}

/// A placed barrier spanning two cells.
///
/// A horizontal wall at `(r, c)` blocks stepping between rows `r` and `r + 1`
/// in columns `c` and `c + 1`. A vertical wall at `(r, c)` blocks stepping
/// between columns `c` and `c + 1` in rows `r` and `r + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Wall {
    pub orientation: Orientation,
    pub row: i32,
    pub col: i32,
    pub owner: Player,
}

impl Wall {
    pub const fn new(orientation: Orientation, row: i32, col: i32, owner: Player) -> Self {
        Self {
            orientation,
            row,
            col,
            owner,
        }
    }

    pub fn in_bounds(&self) -> bool {
        (0..WALL_GRID_SIZE).contains(&self.row) && (0..WALL_GRID_SIZE).contains(&self.col)
    }

    /// Whether two walls cannot coexist on the board.
    pub fn overlaps_with(&self, other: &Wall) -> bool {
        match (self.orientation, other.orientation) {
            // Parallel walls collide on the same anchor or when shifted by one
            // along their span. Each edge belongs to at most one wall, so
            // rolling one back never clears another's edge.
            (Orientation::Horizontal, Orientation::Horizontal) => {
                self.row == other.row && (self.col - other.col).abs() <= 1
            }
            (Orientation::Vertical, Orientation::Vertical) => {
                self.col == other.col && (self.row - other.row).abs() <= 1
            }
            (Orientation::Horizontal, Orientation::Vertical) => {
                (self.row == other.row || self.row == other.row + 1)
                    && (self.col == other.col || self.col + 1 == other.col)
            }
            (Orientation::Vertical, Orientation::Horizontal) => {
                (self.col == other.col || self.col == other.col + 1)
                    && (self.row == other.row || self.row + 1 == other.row)
            }
        }
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.orientation {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        };
        write!(f, "{} {} wall at ({},{})", self.owner, kind, self.row, self.col)
    }
}

/// Which movement edges are currently blocked.
///
/// * `horizontal_walls` has shape (8, 9): `[r, c]` blocks `(r, c) <-> (r + 1, c)`.
/// * `vertical_walls` has shape (9, 8): `[r, c]` blocks `(r, c) <-> (r, c + 1)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockedEdges {
    pub horizontal_walls: Array2<bool>,
    pub vertical_walls: Array2<bool>,
}

impl Default for BlockedEdges {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockedEdges {
    pub fn new() -> Self {
        let n = BOARD_SIZE as usize;
        Self {
            horizontal_walls: Array2::from_elem((n - 1, n), false),
            vertical_walls: Array2::from_elem((n, n - 1), false),
        }
    }

    /// Rebuild the matrices from scratch out of a wall list.
    pub fn from_walls<'a, I>(walls: I) -> Self
    where
        I: IntoIterator<Item = &'a Wall>,
    {
        let mut edges = Self::new();
        for wall in walls {
            edges.set_wall_edges(wall, true);
        }
        edges
    }

    /// Whether the step between two orthogonally adjacent cells is blocked.
    ///
    /// Cells that are not adjacent, or off the board, count as blocked.
    pub fn is_blocked(&self, a: Position, b: Position) -> bool {
        if !a.in_bounds() || !b.in_bounds() {
            return true;
        }
        let delta_row = b.row - a.row;
        let delta_col = b.col - a.col;
        match (delta_row.abs(), delta_col.abs()) {
            (1, 0) => {
                let row = a.row.min(b.row) as usize;
                self.horizontal_walls[[row, a.col as usize]]
            }
            (0, 1) => {
                let col = a.col.min(b.col) as usize;
                self.vertical_walls[[a.row as usize, col]]
            }
            _ => true,
        }
    }

    /// The two matrix entries a wall occupies, as (matrix, index) pairs.
    fn wall_entries(wall: &Wall) -> [(Orientation, [usize; 2]); 2] {
        let row = wall.row as usize;
        let col = wall.col as usize;
        match wall.orientation {
            Orientation::Horizontal => [
                (Orientation::Horizontal, [row, col]),
                (Orientation::Horizontal, [row, col + 1]),
            ],
            Orientation::Vertical => [
                (Orientation::Vertical, [row, col]),
                (Orientation::Vertical, [row + 1, col]),
            ],
        }
    }

    fn entry_mut(&mut self, matrix: Orientation, index: [usize; 2]) -> &mut bool {
        match matrix {
            Orientation::Horizontal => &mut self.horizontal_walls[index],
            Orientation::Vertical => &mut self.vertical_walls[index],
        }
    }

    fn entry(&self, matrix: Orientation, index: [usize; 2]) -> bool {
        match matrix {
            Orientation::Horizontal => self.horizontal_walls[index],
            Orientation::Vertical => self.vertical_walls[index],
        }
    }

    /// Set both edges covered by the wall to `blocked`.
    ///
    /// Panics if the wall anchor is out of bounds.
    pub fn set_wall_edges(&mut self, wall: &Wall, blocked: bool) {
        assert!(wall.in_bounds(), "wall anchor out of bounds: {}", wall);
        for (matrix, index) in Self::wall_entries(wall) {
            *self.entry_mut(matrix, index) = blocked;
        }
    }

    /// Check whether both edges covered by the wall equal `blocked`.
    pub fn check_wall_edges(&self, wall: &Wall, blocked: bool) -> bool {
        assert!(wall.in_bounds(), "wall anchor out of bounds: {}", wall);
        Self::wall_entries(wall)
            .into_iter()
            .all(|(matrix, index)| self.entry(matrix, index) == blocked)
    }

    pub fn count_blocked(&self) -> usize {
        self.horizontal_walls.iter().filter(|&&b| b).count()
            + self.vertical_walls.iter().filter(|&&b| b).count()
    }
}
