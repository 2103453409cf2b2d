//! Rules engine for Quoridor on the standard 9x9 board.
//!
//! [`BoardState`] owns the pawns, the placed walls and the blocked-edge
//! matrices. Pawn moves are checked by [`validation::can_move_pawn`]; walls go
//! through [`validation::place_wall_speculative`], which writes the wall's
//! edges, verifies with a BFS that both players can still reach their goal
//! row, and erases the edges again if not.

pub mod actions;
pub mod game_runner;
pub mod game_state;
pub mod grid;
pub mod pathfinding;
#[cfg(feature = "binary")]
pub mod session_config;
pub mod validation;

pub use actions::{Command, Diagonal, Direction, ParseCommandError};
pub use game_runner::{play_game, CommandSource, GameResult, GameSession};
pub use game_state::{BoardState, Pawn, Piece, RenderSnapshot, SetupError};
pub use grid::{
    BlockedEdges, Orientation, Player, Position, Wall, BOARD_SIZE, MAX_WALLS_PER_PLAYER,
};
pub use validation::WallRejection;
