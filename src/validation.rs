use thiserror::Error;

use crate::game_state::Pawn;
use crate::grid::{BlockedEdges, Player, Position, Wall};
use crate::pathfinding::has_path;

/// Every cell offset `get_valid_moves` considers: the four orthogonal steps,
/// then the four diagonals. Two-cell jumps are deliberately absent.
pub const MOVE_OFFSETS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Which cells currently hold a pawn.
///
/// Implemented for the board's pawn pair; tests can supply any occupancy.
pub trait Occupancy {
    fn has_pawn(&self, position: Position) -> bool;
}

impl Occupancy for [Pawn; 2] {
    fn has_pawn(&self, position: Position) -> bool {
        self.iter().any(|pawn| pawn.position == position)
    }
}

impl Occupancy for [Position] {
    fn has_pawn(&self, position: Position) -> bool {
        self.contains(&position)
    }
}

/// Why a wall could not be placed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WallRejection {
    #[error("player {0} has no walls remaining")]
    NoWallsRemaining(Player),
    #[error("wall anchor ({row},{col}) is outside the board")]
    OutOfBounds { row: i32, col: i32 },
    #[error("overlaps existing {0}")]
    Overlaps(Wall),
    #[error("would cut player {player} off from their goal row")]
    BlocksPath { player: Player },
}

/// Validate whether a pawn may travel from `from` to `to`.
///
/// Rules are tried in order, first match wins: bounds, occupancy, orthogonal
/// step, straight jump over an adjacent pawn, diagonal side-step around a pawn
/// whose jump is blocked.
pub fn can_move_pawn<O: Occupancy + ?Sized>(
    from: Position,
    to: Position,
    pawns: &O,
    edges: &BlockedEdges,
) -> bool {
    // Bounds checking
    if !from.in_bounds() || !to.in_bounds() {
        return false;
    }

    if !pawns.has_pawn(from) || pawns.has_pawn(to) {
        return false;
    }

    let delta_row = to.row - from.row;
    let delta_col = to.col - from.col;

    match (delta_row.abs(), delta_col.abs()) {
        // Single step moves
        (1, 0) | (0, 1) => !edges.is_blocked(from, to),
        // Jump over a pawn (straight)
        (2, 0) | (0, 2) => {
            let middle = from.offset(delta_row / 2, delta_col / 2);
            pawns.has_pawn(middle)
                && !edges.is_blocked(from, middle)
                && !edges.is_blocked(middle, to)
        }
        // Diagonal side-step, via either the vertical or the horizontal leg
        (1, 1) => {
            can_side_step(from, from.offset(delta_row, 0), to, pawns, edges)
                || can_side_step(from, from.offset(0, delta_col), to, pawns, edges)
        }
        _ => false,
    }
}

/// A side-step through `neighbor` needs a pawn there that cannot be jumped
/// straight over, with both legs of the dog-leg open.
fn can_side_step<O: Occupancy + ?Sized>(
    from: Position,
    neighbor: Position,
    to: Position,
    pawns: &O,
    edges: &BlockedEdges,
) -> bool {
    if !neighbor.in_bounds() || !pawns.has_pawn(neighbor) {
        return false;
    }
    let beyond = neighbor.offset(neighbor.row - from.row, neighbor.col - from.col);
    !edges.is_blocked(from, neighbor)
        && is_jump_blocked(neighbor, beyond, edges)
        && !edges.is_blocked(neighbor, to)
}

/// Only a wall behind the jumped pawn opens up the side-step; the edge of the
/// board does not.
fn is_jump_blocked(neighbor: Position, beyond: Position, edges: &BlockedEdges) -> bool {
    beyond.in_bounds() && edges.is_blocked(neighbor, beyond)
}

/// Get all single-step and diagonal destinations reachable from `position`.
pub fn get_valid_moves<O: Occupancy + ?Sized>(
    position: Position,
    pawns: &O,
    edges: &BlockedEdges,
) -> Vec<Position> {
    MOVE_OFFSETS
        .iter()
        .map(|&(delta_row, delta_col)| position.offset(delta_row, delta_col))
        .filter(|&destination| can_move_pawn(position, destination, pawns, edges))
        .collect()
}

pub fn has_valid_moves<O: Occupancy + ?Sized>(
    position: Position,
    pawns: &O,
    edges: &BlockedEdges,
) -> bool {
    !get_valid_moves(position, pawns, edges).is_empty()
}

/// Validate a wall and, if legal, leave its edges written into `edges`.
///
/// The wall's edges are written speculatively, both pawns are checked for a
/// remaining path, and the exact two entries are erased again if either pawn
/// is cut off. On `Err` the edge matrices are unchanged. The caller commits
/// the wall to its wall list and decrements the owner's count on `Ok`.
pub fn place_wall_speculative(
    edges: &mut BlockedEdges,
    placed_walls: &[Wall],
    pawns: &[Pawn; 2],
    walls_remaining: u8,
    wall: &Wall,
) -> Result<(), WallRejection> {
    // Check if player has walls remaining
    if walls_remaining == 0 {
        return Err(WallRejection::NoWallsRemaining(wall.owner));
    }

    if !wall.in_bounds() {
        return Err(WallRejection::OutOfBounds {
            row: wall.row,
            col: wall.col,
        });
    }

    if let Some(existing) = placed_walls.iter().find(|w| w.overlaps_with(wall)) {
        return Err(WallRejection::Overlaps(*existing));
    }

    // Overlap rules guarantee both entries are currently free.
    debug_assert!(edges.check_wall_edges(wall, false));

    // Place the wall temporarily
    edges.set_wall_edges(wall, true);

    // Check that all players can still reach their goal
    if let Some(pawn) = pawns.iter().find(|pawn| !has_path(pawn, edges)) {
        // Restore the edges
        edges.set_wall_edges(wall, false);
        return Err(WallRejection::BlocksPath { player: pawn.owner });
    }

    Ok(())
}
