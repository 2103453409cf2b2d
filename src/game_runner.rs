//! Turn loop driving a [`BoardState`].
//!
//! Input is abstracted behind the [`CommandSource`] trait so the runner can be
//! driven from a terminal, a script, or a mock in tests.

use log::{debug, info};

use crate::actions::Command;
use crate::game_state::BoardState;
use crate::grid::Player;

/// Anything that can produce the next command for the player to move.
pub trait CommandSource {
    /// Returns `Ok(None)` when input is exhausted.
    fn next_command(
        &mut self,
        board: &BoardState,
        player: Player,
    ) -> anyhow::Result<Option<Command>>;

    /// Called after a command was refused by the rules engine.
    fn rejected(&mut self, _board: &BoardState, _player: Player, _command: Command) {}
}

/// A board plus whose turn it is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSession {
    board: BoardState,
    current_player: Player,
}

impl GameSession {
    /// Player A moves first.
    pub fn new(board: BoardState) -> Self {
        Self {
            board,
            current_player: Player::A,
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn winner(&self) -> Option<Player> {
        self.board.winner()
    }

    /// Apply a command for the player to move.
    ///
    /// A step that fails is retried as a two-cell jump in the same direction.
    /// On success the turn passes to the opponent unless the game is over.
    /// Rejected commands, and any command after the game is won, leave the
    /// session untouched.
    pub fn apply(&mut self, command: Command) -> bool {
        if self.board.is_solved() {
            return false;
        }

        let player = self.current_player;
        let accepted = match command {
            Command::Step(direction) => {
                self.board.move_pawn(player, direction)
                    || self.board.attempt_two_step_jump(player, direction)
            }
            Command::SideStep(diagonal) => self.board.attempt_side_step(player, diagonal),
            Command::Wall {
                orientation,
                row,
                col,
            } => self.board.place_wall(orientation, row, col, player),
        };

        if accepted && !self.board.is_solved() {
            self.current_player = player.opponent();
        }
        accepted
    }
}

/// Result of a complete game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameResult {
    /// `Some(player)` if that player won, `None` if input ran out or the turn
    /// limit was hit.
    pub winner: Option<Player>,
    /// Number of accepted commands.
    pub num_turns: usize,
    /// Number of commands the rules engine refused.
    pub rejected: usize,
    pub board: BoardState,
}

/// Play until someone wins, the source runs dry, or `max_turns` accepted
/// commands have been played.
pub fn play_game<S: CommandSource>(
    source: &mut S,
    board: BoardState,
    max_turns: usize,
) -> anyhow::Result<GameResult> {
    let mut session = GameSession::new(board);
    let mut num_turns = 0;
    let mut rejected = 0;

    while num_turns < max_turns && session.winner().is_none() {
        let player = session.current_player();
        let Some(command) = source.next_command(session.board(), player)? else {
            debug!("command source exhausted after {} turns", num_turns);
            break;
        };

        if session.apply(command) {
            num_turns += 1;
        } else {
            rejected += 1;
            source.rejected(session.board(), player, command);
        }
    }

    let winner = session.winner();
    if let Some(player) = winner {
        info!(
            "{} wins after {} turns",
            session.board().name(player),
            num_turns
        );
    }

    Ok(GameResult {
        winner,
        num_turns,
        rejected,
        board: session.board,
    })
}
