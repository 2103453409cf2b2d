use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use quoridor_rules::actions::get_valid_commands;
use quoridor_rules::pathfinding::has_path;
use quoridor_rules::{
    BlockedEdges, BoardState, Command, Direction, GameSession, Orientation, Piece, Player,
    Position, Wall, WallRejection,
};

fn new_board() -> BoardState {
    BoardState::new("Alice", "Bob")
}

fn pawn_count(board: &BoardState) -> usize {
    board
        .render_snapshot()
        .cells
        .iter()
        .flatten()
        .filter(|cell| matches!(cell, Piece::Pawn { .. }))
        .count()
}

#[test]
fn fresh_board() {
    let board = new_board();
    assert_eq!(board.pawn(Player::A).position, Position::new(8, 4));
    assert_eq!(board.pawn(Player::A).target_row, 0);
    assert_eq!(board.pawn(Player::B).position, Position::new(0, 4));
    assert_eq!(board.pawn(Player::B).target_row, 8);
    assert_eq!(board.remaining_walls(Player::A), 10);
    assert_eq!(board.remaining_walls(Player::B), 10);
    assert_eq!(board.winner(), None);
    assert_eq!(pawn_count(&board), 2);
}

#[test]
fn pawn_cannot_enter_occupied_cell() {
    let mut board = new_board();
    assert!(board.attempt_pawn_move(Player::A, Direction::Up));
    assert_eq!(board.pawn(Player::A).position, Position::new(7, 4));
    assert!(board.attempt_pawn_move(Player::A, Direction::Up));
    assert_eq!(board.pawn(Player::A).position, Position::new(6, 4));

    for _ in 0..5 {
        assert!(board.attempt_pawn_move(Player::B, Direction::Down));
    }
    // B at (5,4), directly above A
    let before = board.clone();
    assert!(!board.attempt_pawn_move(Player::B, Direction::Down));
    assert_eq!(board, before);
    assert_eq!(pawn_count(&board), 2);
}

#[test]
fn horizontal_wall_blocks_two_row_edges() {
    let mut board = new_board();
    assert!(board.attempt_wall_placement(Orientation::Horizontal, 3, 3, Player::A));
    assert_eq!(board.remaining_walls(Player::A), 9);

    let edges = board.edges();
    assert!(edges.is_blocked(Position::new(3, 3), Position::new(4, 3)));
    assert!(edges.is_blocked(Position::new(3, 4), Position::new(4, 4)));
    assert!(!edges.is_blocked(Position::new(3, 5), Position::new(4, 5)));
    assert_eq!(edges.count_blocked(), 2);

    for orientation in [Orientation::Horizontal, Orientation::Vertical] {
        let before = board.clone();
        assert!(!board.attempt_wall_placement(orientation, 3, 3, Player::A));
        assert!(!board.attempt_wall_placement(orientation, 3, 3, Player::B));
        assert_eq!(board, before);
    }
    assert_eq!(board.remaining_walls(Player::A), 9);
}

#[test]
fn out_of_bounds_walls_are_rejected() {
    let mut board = new_board();
    let before = board.clone();
    for (row, col) in [(-1, 0), (0, -1), (8, 0), (0, 8), (8, 8)] {
        assert_eq!(
            board.try_place_wall(Orientation::Vertical, row, col, Player::A),
            Err(WallRejection::OutOfBounds { row, col })
        );
    }
    assert_eq!(board, before);
}

#[test]
fn wall_that_seals_player_b_in_is_rejected() {
    let mut board = new_board();
    // B sits at (0,4). Pen in row 0, columns 3..=8: the top and right board
    // edges, a vertical wall on the left, and three horizontal walls below.
    assert!(board.place_wall(Orientation::Vertical, 0, 2, Player::A));
    assert!(board.place_wall(Orientation::Horizontal, 0, 3, Player::A));
    assert!(board.place_wall(Orientation::Horizontal, 0, 5, Player::A));

    let before = board.clone();
    assert_eq!(
        board.try_place_wall(Orientation::Horizontal, 0, 7, Player::A),
        Err(WallRejection::BlocksPath { player: Player::B })
    );
    assert_eq!(board, before);
    assert_eq!(board.remaining_walls(Player::A), 7);
    assert_eq!(board.placed_walls().len(), 3);
    assert!(board.is_consistent());

    // Had the wall been applied, B would have had no path.
    let mut hypothetical = board.edges().clone();
    hypothetical.set_wall_edges(&Wall::new(Orientation::Horizontal, 0, 7, Player::A), true);
    assert!(!has_path(board.pawn(Player::B), &hypothetical));
    assert!(has_path(board.pawn(Player::A), &hypothetical));
}

#[test]
fn wall_that_seals_player_a_in_is_rejected_for_either_owner() {
    let mut board = new_board();
    // Mirror image at the bottom around A at (8,4).
    assert!(board.place_wall(Orientation::Vertical, 7, 2, Player::B));
    assert!(board.place_wall(Orientation::Horizontal, 7, 3, Player::B));
    assert!(board.place_wall(Orientation::Horizontal, 7, 5, Player::B));

    for owner in Player::ALL {
        assert_eq!(
            board.try_place_wall(Orientation::Horizontal, 7, 7, owner),
            Err(WallRejection::BlocksPath { player: Player::A })
        );
    }
}

#[test]
fn jump_but_no_side_step_when_jump_is_open() {
    let mut session = GameSession::new(new_board());
    // Walk A up to (4,4) and B down to (3,4).
    for _ in 0..3 {
        assert!(session.apply(Command::Step(Direction::Up)));
        assert!(session.apply(Command::Step(Direction::Down)));
    }
    assert!(session.apply(Command::Step(Direction::Up)));
    assert!(session.apply(Command::Wall {
        orientation: Orientation::Vertical,
        row: 6,
        col: 0
    }));

    let mut board = session.board().clone();
    assert_eq!(board.pawn(Player::A).position, Position::new(4, 4));
    assert_eq!(board.pawn(Player::B).position, Position::new(3, 4));

    let before = board.clone();
    assert!(!board.move_pawn_to(Player::A, Position::new(3, 3)));
    assert!(!board.move_pawn_to(Player::A, Position::new(3, 5)));
    assert_eq!(board, before);

    assert!(board.attempt_two_step_jump(Player::A, Direction::Up));
    assert_eq!(board.pawn(Player::A).position, Position::new(2, 4));
}

#[test]
fn jump_is_refused_through_a_wall_between_the_pawns() {
    let mut board = new_board();
    for _ in 0..4 {
        assert!(board.move_pawn(Player::A, Direction::Up));
    }
    for _ in 0..3 {
        assert!(board.move_pawn(Player::B, Direction::Down));
    }
    // A (4,4), B (3,4), wall on the edge between them.
    assert!(board.place_wall(Orientation::Horizontal, 3, 4, Player::B));

    let before = board.clone();
    assert!(!board.attempt_two_step_jump(Player::A, Direction::Up));
    assert!(!board.move_pawn_to(Player::A, Position::new(3, 3)));
    assert!(!board.move_pawn_to(Player::A, Position::new(3, 5)));
    assert_eq!(board, before);
}

#[test]
fn side_step_when_wall_stands_behind_opponent() {
    let mut board = new_board();
    for _ in 0..4 {
        assert!(board.move_pawn(Player::A, Direction::Up));
    }
    for _ in 0..3 {
        assert!(board.move_pawn(Player::B, Direction::Down));
    }
    assert!(board.place_wall(Orientation::Horizontal, 2, 3, Player::B));

    assert!(!board.attempt_two_step_jump(Player::A, Direction::Up));
    assert!(board.move_pawn_to(Player::A, Position::new(3, 5)));
    assert_eq!(pawn_count(&board), 2);
}

/// Plays random legal (and some illegal) commands and checks every invariant
/// after each one.
#[test]
fn random_playouts_keep_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..20 {
        let mut session = GameSession::new(new_board());
        for _ in 0..300 {
            if session.winner().is_some() {
                break;
            }
            let player = session.current_player();
            let commands = get_valid_commands(session.board(), player);
            if commands.is_empty() {
                // Stuck behind the opponent with no walls left.
                break;
            }

            // Throw in an arbitrary, probably illegal, wall now and then.
            let stray = Command::Wall {
                orientation: Orientation::Vertical,
                row: (commands.len() % 9) as i32,
                col: (commands.len() % 7) as i32,
            };
            if !commands.contains(&stray) {
                let before = session.clone();
                assert!(!session.apply(stray));
                assert_eq!(session, before);
            }

            let command = *commands.choose(&mut rng).unwrap();
            assert!(session.apply(command), "{command} was listed as legal");

            let board = session.board();
            assert_eq!(pawn_count(board), 2);
            assert_ne!(board.pawn(Player::A).position, board.pawn(Player::B).position);
            assert_eq!(BlockedEdges::from_walls(board.placed_walls()), *board.edges());
            assert_eq!(board.edges().count_blocked(), 2 * board.placed_walls().len());
            for pawn in board.pawns() {
                assert!(has_path(pawn, board.edges()));
            }
            let used = board.placed_walls().len();
            let left = board.remaining_walls(Player::A) as usize
                + board.remaining_walls(Player::B) as usize;
            assert_eq!(used + left, 20);
        }
    }
}

#[test]
fn no_side_step_around_pawn_on_board_edge() {
    let mut session = GameSession::new(new_board());
    // A walks up to (1,4) while B shuffles along row 0, then B steps back
    // onto (0,4) directly above A.
    for i in 0..7 {
        assert!(session.apply(Command::Step(Direction::Up)));
        let shuffle = if i % 2 == 0 { Direction::Right } else { Direction::Left };
        assert!(session.apply(Command::Step(shuffle)));
    }
    assert_eq!(session.board().pawn(Player::A).position, Position::new(1, 4));
    assert_eq!(session.board().pawn(Player::B).position, Position::new(0, 5));
    assert!(session.apply("wall v 6 0".parse::<Command>().unwrap()));
    assert!(session.apply(Command::Step(Direction::Left)));
    assert_eq!(session.board().pawn(Player::B).position, Position::new(0, 4));
    assert_eq!(session.current_player(), Player::A);

    let before = session.clone();
    for command in ["up", "up-left", "up-right"] {
        assert!(!session.apply(command.parse::<Command>().unwrap()));
    }
    assert_eq!(session, before);
    assert!(!get_valid_commands(session.board(), Player::A)
        .iter()
        .any(|c| matches!(c, Command::SideStep(_))));
}

#[test]
fn rejected_neighbouring_wall_keeps_shared_row_edges() {
    let mut board = new_board();
    assert!(board.place_wall(Orientation::Horizontal, 3, 3, Player::A));

    for col in [2, 4] {
        assert_eq!(
            board.try_place_wall(Orientation::Horizontal, 3, col, Player::B),
            Err(WallRejection::Overlaps(Wall::new(
                Orientation::Horizontal,
                3,
                3,
                Player::A
            )))
        );
    }
    let edges = board.edges();
    assert!(edges.horizontal_walls[[3, 3]]);
    assert!(edges.horizontal_walls[[3, 4]]);
    assert_eq!(edges.count_blocked(), 2);
    assert!(board.is_consistent());
}
