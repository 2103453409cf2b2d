use std::fmt;

use log::{debug, info};
use thiserror::Error;

use crate::actions::{Diagonal, Direction};
use crate::grid::{
    BlockedEdges, Orientation, Player, Position, Wall, BOARD_SIZE, MAX_WALLS_PER_PLAYER,
};
use crate::validation::{can_move_pawn, place_wall_speculative, Occupancy, WallRejection};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("quoridor requires exactly 2 players, got {0}")]
    WrongPlayerCount(usize),
}

/// A player's token: where it is and which row it is racing to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pawn {
    pub owner: Player,
    pub position: Position,
    pub target_row: i32,
}

impl Pawn {
    /// A pawn on its owner's starting cell.
    pub fn new(owner: Player) -> Self {
        Self {
            owner,
            position: owner.start(),
            target_row: owner.target_row(),
        }
    }

    pub fn has_won(&self) -> bool {
        self.position.row == self.target_row
    }
}

/// What a renderer should draw in a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Piece {
    Empty,
    Pawn { owner: Player, target_row: i32 },
    /// Marks the anchor cell of a placed wall.
    Wall { orientation: Orientation, owner: Player },
}

/// Raw data a presentation layer needs to draw the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderSnapshot {
    pub cells: [[Piece; BOARD_SIZE as usize]; BOARD_SIZE as usize],
    pub edges: BlockedEdges,
    pub walls: Vec<Wall>,
    pub walls_remaining: [u8; 2],
}

/// The complete state of one game.
///
/// Pawn positions live only in `pawns`; the piece grid is derived from them
/// on demand. The edge matrices always equal the union of the edges of
/// `placed_walls`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardState {
    names: [String; 2],
    pawns: [Pawn; 2],
    placed_walls: Vec<Wall>,
    edges: BlockedEdges,
    walls_remaining: [u8; 2],
}

impl BoardState {
    /// Player A starts at (8,4) heading for row 0, player B at (0,4) heading
    /// for row 8. Each gets 10 walls.
    pub fn new(name_a: impl Into<String>, name_b: impl Into<String>) -> Self {
        Self {
            names: [name_a.into(), name_b.into()],
            pawns: [Pawn::new(Player::A), Pawn::new(Player::B)],
            placed_walls: Vec::new(),
            edges: BlockedEdges::new(),
            walls_remaining: [MAX_WALLS_PER_PLAYER; 2],
        }
    }

    pub fn from_names(names: &[String]) -> Result<Self, SetupError> {
        match names {
            [a, b] => Ok(Self::new(a.clone(), b.clone())),
            _ => Err(SetupError::WrongPlayerCount(names.len())),
        }
    }

    pub fn name(&self, player: Player) -> &str {
        &self.names[player.index()]
    }

    pub fn pawn(&self, player: Player) -> &Pawn {
        &self.pawns[player.index()]
    }

    pub fn pawns(&self) -> &[Pawn; 2] {
        &self.pawns
    }

    pub fn pawn_at(&self, position: Position) -> Option<&Pawn> {
        self.pawns.iter().find(|pawn| pawn.position == position)
    }

    pub fn placed_walls(&self) -> &[Wall] {
        &self.placed_walls
    }

    pub fn edges(&self) -> &BlockedEdges {
        &self.edges
    }

    pub fn remaining_walls(&self, player: Player) -> u8 {
        self.walls_remaining[player.index()]
    }

    /// Validated move of `player`'s pawn to any destination.
    pub fn move_pawn_to(&mut self, player: Player, destination: Position) -> bool {
        let from = self.pawn(player).position;
        if !can_move_pawn(from, destination, &self.pawns, &self.edges) {
            debug!("rejected move of {} from {} to {}", player, from, destination);
            return false;
        }
        self.relocate(player, destination);
        true
    }

    /// Move one cell in `direction`.
    pub fn move_pawn(&mut self, player: Player, direction: Direction) -> bool {
        let (delta_row, delta_col) = direction.delta();
        let destination = self.pawn(player).position.offset(delta_row, delta_col);
        self.move_pawn_to(player, destination)
    }

    /// Jump two cells in `direction`, over an adjacent pawn.
    pub fn attempt_two_step_jump(&mut self, player: Player, direction: Direction) -> bool {
        let (delta_row, delta_col) = direction.delta();
        let from = self.pawn(player).position;
        let destination = from.offset(2 * delta_row, 2 * delta_col);
        if !can_move_pawn(from, destination, &self.pawns, &self.edges) {
            debug!("rejected jump of {} from {} to {}", player, from, destination);
            return false;
        }
        self.move_pawn_two_steps(player, direction);
        true
    }

    /// Side-step diagonally around a pawn whose straight jump is blocked.
    pub fn attempt_side_step(&mut self, player: Player, diagonal: Diagonal) -> bool {
        let (delta_row, delta_col) = diagonal.delta();
        let destination = self.pawn(player).position.offset(delta_row, delta_col);
        self.move_pawn_to(player, destination)
    }

    pub fn attempt_pawn_move(&mut self, player: Player, direction: Direction) -> bool {
        self.move_pawn(player, direction)
    }

    /// Unchecked two-cell relocation. Callers must have validated the jump.
    pub(crate) fn move_pawn_two_steps(&mut self, player: Player, direction: Direction) {
        let (delta_row, delta_col) = direction.delta();
        let destination = self
            .pawn(player)
            .position
            .offset(2 * delta_row, 2 * delta_col);
        self.relocate(player, destination);
    }

    fn relocate(&mut self, player: Player, destination: Position) {
        debug_assert!(destination.in_bounds());
        debug_assert!(!self.pawns.has_pawn(destination));
        self.pawns[player.index()].position = destination;
        if self.pawns[player.index()].has_won() {
            info!("{} ({}) reached row {}", self.name(player), player, destination.row);
        }
    }

    /// Place a wall, reporting why it was refused.
    ///
    /// On `Err` the board is unchanged.
    pub fn try_place_wall(
        &mut self,
        orientation: Orientation,
        row: i32,
        col: i32,
        player: Player,
    ) -> Result<(), WallRejection> {
        let wall = Wall::new(orientation, row, col, player);
        let remaining = self.remaining_walls(player);
        let result = place_wall_speculative(
            &mut self.edges,
            &self.placed_walls,
            &self.pawns,
            remaining,
            &wall,
        );
        match result {
            Ok(()) => {
                self.placed_walls.push(wall);
                self.walls_remaining[player.index()] -= 1;
                info!(
                    "placed {}; {} has {} walls left",
                    wall,
                    self.name(player),
                    self.remaining_walls(player)
                );
                debug_assert!(self.is_consistent());
                Ok(())
            }
            Err(reason) => {
                debug!("rejected {}: {}", wall, reason);
                Err(reason)
            }
        }
    }

    pub fn place_wall(
        &mut self,
        orientation: Orientation,
        row: i32,
        col: i32,
        player: Player,
    ) -> bool {
        self.try_place_wall(orientation, row, col, player).is_ok()
    }

    pub fn attempt_wall_placement(
        &mut self,
        orientation: Orientation,
        row: i32,
        col: i32,
        player: Player,
    ) -> bool {
        self.place_wall(orientation, row, col, player)
    }

    pub fn winner(&self) -> Option<Player> {
        self.pawns.iter().find(|pawn| pawn.has_won()).map(|pawn| pawn.owner)
    }

    pub fn is_solved(&self) -> bool {
        self.winner().is_some()
    }

    /// Whether the edge matrices still match the wall list exactly.
    pub fn is_consistent(&self) -> bool {
        BlockedEdges::from_walls(&self.placed_walls) == self.edges
    }

    pub fn render_snapshot(&self) -> RenderSnapshot {
        let n = BOARD_SIZE as usize;
        let mut cells = [[Piece::Empty; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        for wall in &self.placed_walls {
            cells[wall.row as usize][wall.col as usize] = Piece::Wall {
                orientation: wall.orientation,
                owner: wall.owner,
            };
        }
        // Pawns take precedence over wall markers.
        for pawn in &self.pawns {
            let (row, col) = (pawn.position.row as usize, pawn.position.col as usize);
            debug_assert!(row < n && col < n);
            cells[row][col] = Piece::Pawn {
                owner: pawn.owner,
                target_row: pawn.target_row,
            };
        }
        RenderSnapshot {
            cells,
            edges: self.edges.clone(),
            walls: self.placed_walls.clone(),
            walls_remaining: self.walls_remaining,
        }
    }

    /// First letter of the owner's name, or `A`/`B` when the initials clash.
    fn pawn_symbol(&self, player: Player) -> char {
        let initial = |p: Player| {
            self.name(p)
                .chars()
                .next()
                .map(|c| c.to_ascii_uppercase())
        };
        match initial(player) {
            Some(c) if initial(player.opponent()) != Some(c) => c,
            _ => match player {
                Player::A => 'A',
                Player::B => 'B',
            },
        }
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nQuoridor Board:")?;
        write!(f, "   ")?;
        for col in 0..BOARD_SIZE {
            write!(f, " {}", col)?;
        }
        writeln!(f)?;

        for row in 0..BOARD_SIZE {
            write!(f, "{:2}  ", row)?;
            for col in 0..BOARD_SIZE {
                let here = Position::new(row, col);
                match self.pawn_at(here) {
                    Some(pawn) => write!(f, "{}", self.pawn_symbol(pawn.owner))?,
                    None => write!(f, "·")?,
                }
                if col < BOARD_SIZE - 1 {
                    let blocked = self.edges.vertical_walls[[row as usize, col as usize]];
                    write!(f, "{}", if blocked { '|' } else { ' ' })?;
                }
            }
            writeln!(f)?;

            if row < BOARD_SIZE - 1 {
                write!(f, "    ")?;
                for col in 0..BOARD_SIZE {
                    let blocked = self.edges.horizontal_walls[[row as usize, col as usize]];
                    write!(f, "{}", if blocked { '-' } else { ' ' })?;
                    if col < BOARD_SIZE - 1 {
                        write!(f, " ")?;
                    }
                }
                writeln!(f)?;
            }
        }

        writeln!(f, "\nWalls Remaining:")?;
        for player in Player::ALL {
            writeln!(f, "{}: {}", self.name(player), self.remaining_walls(player))?;
        }
        Ok(())
    }
}
