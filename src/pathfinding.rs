use log::trace;

use crate::grid::{BlockedEdges, Position, BOARD_SIZE};
use crate::game_state::Pawn;

const CELLS: usize = (BOARD_SIZE * BOARD_SIZE) as usize;

// Down, up, right, left.
const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Calculate the shortest distance from a position to a target row using BFS.
///
/// Pawns are ignored; only walls stop movement. The visited set and the queue
/// are fixed-size stack arrays, since a 9x9 board never enqueues more than 81
/// cells.
///
/// # Returns
/// The minimum number of steps to reach the target row, or `None` if every
/// route is walled off.
pub fn distance_to_row(edges: &BlockedEdges, start: Position, target_row: i32) -> Option<u32> {
    if !start.in_bounds() {
        return None;
    }
    // Already at target
    if start.row == target_row {
        return Some(0);
    }

    let index = |p: Position| (p.row * BOARD_SIZE + p.col) as usize;

    let mut visited = [false; CELLS];
    visited[index(start)] = true;

    let mut queue = [(start, 0u32); CELLS];
    let mut queue_head: usize = 0;
    let mut queue_tail: usize = 1;

    while queue_head < queue_tail {
        let (cell, steps) = queue[queue_head];
        queue_head += 1;

        for (delta_row, delta_col) in NEIGHBOR_OFFSETS {
            let next = cell.offset(delta_row, delta_col);
            if !next.in_bounds() || visited[index(next)] || edges.is_blocked(cell, next) {
                continue;
            }
            visited[index(next)] = true;
            if next.row == target_row {
                return Some(steps + 1);
            }
            queue[queue_tail] = (next, steps + 1);
            queue_tail += 1;
        }
    }

    // No path found
    None
}

/// Whether the pawn can still reach its target row.
///
/// Safe to call against speculative edge state; it only reads `edges`.
pub fn has_path(pawn: &Pawn, edges: &BlockedEdges) -> bool {
    let distance = distance_to_row(edges, pawn.position, pawn.target_row);
    trace!(
        "path check for {} from {} to row {}: {:?}",
        pawn.owner,
        pawn.position,
        pawn.target_row,
        distance
    );
    distance.is_some()
}
