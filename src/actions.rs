use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::game_state::BoardState;
use crate::grid::{Orientation, Player, Wall, WALL_GRID_SIZE};
use crate::validation::{can_move_pawn, place_wall_speculative};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (row, col) offset of one step.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Diagonal {
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Diagonal {
    pub const ALL: [Diagonal; 4] = [
        Diagonal::UpLeft,
        Diagonal::UpRight,
        Diagonal::DownLeft,
        Diagonal::DownRight,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Diagonal::UpLeft => (-1, -1),
            Diagonal::UpRight => (-1, 1),
            Diagonal::DownLeft => (1, -1),
            Diagonal::DownRight => (1, 1),
        }
    }
}

/// One turn's worth of input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// One step, falling back to a two-cell jump in the same direction.
    Step(Direction),
    SideStep(Diagonal),
    Wall {
        orientation: Orientation,
        row: i32,
        col: i32,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("wall orientation must be 'h' or 'v', got {0:?}")]
    BadOrientation(String),
    #[error("wall coordinate is not a number: {0:?}")]
    BadCoordinate(String),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    /// Accepts `up`, `down`, `left`, `right`, the four `up-left` style
    /// diagonals, and `wall h|v <row> <col>`. Case-insensitive.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let lowered = input.trim().to_ascii_lowercase();
        let parts: Vec<&str> = lowered.split_whitespace().collect();

        match parts.as_slice() {
            [] => Err(ParseCommandError::Empty),
            ["up"] => Ok(Command::Step(Direction::Up)),
            ["down"] => Ok(Command::Step(Direction::Down)),
            ["left"] => Ok(Command::Step(Direction::Left)),
            ["right"] => Ok(Command::Step(Direction::Right)),
            ["up-left"] => Ok(Command::SideStep(Diagonal::UpLeft)),
            ["up-right"] => Ok(Command::SideStep(Diagonal::UpRight)),
            ["down-left"] => Ok(Command::SideStep(Diagonal::DownLeft)),
            ["down-right"] => Ok(Command::SideStep(Diagonal::DownRight)),
            ["wall", orientation, row, col] => {
                let orientation = match *orientation {
                    "h" | "horizontal" => Orientation::Horizontal,
                    "v" | "vertical" => Orientation::Vertical,
                    other => return Err(ParseCommandError::BadOrientation(other.to_string())),
                };
                let parse = |s: &str| {
                    s.parse::<i32>()
                        .map_err(|_| ParseCommandError::BadCoordinate(s.to_string()))
                };
                Ok(Command::Wall {
                    orientation,
                    row: parse(*row)?,
                    col: parse(*col)?,
                })
            }
            _ => Err(ParseCommandError::Unknown(input.trim().to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Step(direction) => {
                let name = match direction {
                    Direction::Up => "up",
                    Direction::Down => "down",
                    Direction::Left => "left",
                    Direction::Right => "right",
                };
                write!(f, "{}", name)
            }
            Command::SideStep(diagonal) => {
                let name = match diagonal {
                    Diagonal::UpLeft => "up-left",
                    Diagonal::UpRight => "up-right",
                    Diagonal::DownLeft => "down-left",
                    Diagonal::DownRight => "down-right",
                };
                write!(f, "{}", name)
            }
            Command::Wall {
                orientation,
                row,
                col,
            } => {
                let o = match orientation {
                    Orientation::Horizontal => 'h',
                    Orientation::Vertical => 'v',
                };
                write!(f, "wall {} {} {}", o, row, col)
            }
        }
    }
}

/// Get all pawn commands `player` could play right now.
pub fn get_valid_move_commands(board: &BoardState, player: Player) -> Vec<Command> {
    let from = board.pawn(player).position;
    let pawns = board.pawns();
    let edges = board.edges();
    let mut commands = Vec::new();

    for direction in Direction::ALL {
        let (delta_row, delta_col) = direction.delta();
        let step = from.offset(delta_row, delta_col);
        let jump = from.offset(2 * delta_row, 2 * delta_col);
        if can_move_pawn(from, step, pawns, edges) || can_move_pawn(from, jump, pawns, edges) {
            commands.push(Command::Step(direction));
        }
    }
    for diagonal in Diagonal::ALL {
        let (delta_row, delta_col) = diagonal.delta();
        if can_move_pawn(from, from.offset(delta_row, delta_col), pawns, edges) {
            commands.push(Command::SideStep(diagonal));
        }
    }
    commands
}

/// Get all wall commands `player` could play right now.
///
/// Each candidate is tried speculatively on one scratch copy of the edge
/// matrices and erased again before the next.
pub fn get_valid_wall_commands(board: &BoardState, player: Player) -> Vec<Command> {
    let mut commands = Vec::new();
    let remaining = board.remaining_walls(player);
    if remaining == 0 {
        return commands;
    }

    // Make a mutable copy of the edges for in-place validation
    let mut edges = board.edges().clone();

    for row in 0..WALL_GRID_SIZE {
        for col in 0..WALL_GRID_SIZE {
            for orientation in [Orientation::Horizontal, Orientation::Vertical] {
                let wall = Wall::new(orientation, row, col, player);
                let placed = place_wall_speculative(
                    &mut edges,
                    board.placed_walls(),
                    board.pawns(),
                    remaining,
                    &wall,
                );
                if placed.is_ok() {
                    edges.set_wall_edges(&wall, false);
                    commands.push(Command::Wall {
                        orientation,
                        row,
                        col,
                    });
                }
            }
        }
    }
    debug_assert_eq!(&edges, board.edges());

    commands
}

pub fn get_valid_commands(board: &BoardState, player: Player) -> Vec<Command> {
    let mut commands = get_valid_move_commands(board, player);
    commands.extend(get_valid_wall_commands(board, player));
    commands
}
