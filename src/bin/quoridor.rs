//! Terminal Quoridor.
//!
//! Reads one command per line from stdin (or a script file) and prints the
//! board after every accepted move:
//!
//! ```text
//! up | down | left | right
//! up-left | up-right | down-left | down-right
//! wall h <row> <col> | wall v <row> <col>
//! quit
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use flexi_logger::{AdaptiveFormat, Logger, WriteMode};

use quoridor_rules::session_config::load_config;
use quoridor_rules::{play_game, BoardState, Command, CommandSource, Player};

const DEFAULT_MAX_TURNS: usize = 1000;

#[derive(Parser, Debug)]
#[command(name = "quoridor", about = "Play Quoridor in the terminal", version)]
struct Args {
    /// YAML session config (player names, log level, turn limit)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Name of the player starting at the bottom
    #[arg(long)]
    player_a: Option<String>,

    /// Name of the player starting at the top
    #[arg(long)]
    player_b: Option<String>,

    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Stop after this many accepted commands
    #[arg(long)]
    max_turns: Option<usize>,

    /// Log spec for flexi_logger, e.g. "debug" or "quoridor_rules=trace"
    #[arg(long)]
    log_level: Option<String>,
}

/// Pulls commands from a line-oriented reader, printing the board and a
/// prompt before each read.
struct LineSource<R> {
    reader: R,
    interactive: bool,
}

impl<R: BufRead> LineSource<R> {
    fn new(reader: R, interactive: bool) -> Self {
        Self {
            reader,
            interactive,
        }
    }
}

impl<R: BufRead> CommandSource for LineSource<R> {
    fn next_command(&mut self, board: &BoardState, player: Player) -> Result<Option<Command>> {
        println!("{}", board);
        loop {
            print!("{}'s turn ({}) > ", board.name(player), player);
            io::stdout().flush()?;

            let mut line = String::new();
            if self.reader.read_line(&mut line).context("Failed to read command")? == 0 {
                println!();
                return Ok(None);
            }
            let line = line.trim();
            if !self.interactive {
                println!("{}", line);
            }
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.eq_ignore_ascii_case("quit") {
                return Ok(None);
            }
            match line.parse::<Command>() {
                Ok(command) => return Ok(Some(command)),
                Err(e) => println!("{}", e),
            }
        }
    }

    fn rejected(&mut self, board: &BoardState, player: Player, command: Command) {
        println!(
            "Illegal move '{}' for {}, try again. ({} walls left)",
            command,
            board.name(player),
            board.remaining_walls(player)
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = args.config.as_ref().map(load_config).transpose()?;

    let log_spec = args
        .log_level
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let _logger = Logger::try_with_env_or_str(&log_spec)?
        .write_mode(WriteMode::Direct)
        .log_to_stderr()
        .adaptive_format_for_stderr(AdaptiveFormat::Default)
        .start()?;

    let name_a = args
        .player_a
        .clone()
        .or_else(|| config.as_ref().map(|c| c.players.a.clone()))
        .unwrap_or_else(|| "Player 1".to_string());
    let name_b = args
        .player_b
        .clone()
        .or_else(|| config.as_ref().map(|c| c.players.b.clone()))
        .unwrap_or_else(|| "Player 2".to_string());
    let max_turns = args
        .max_turns
        .or_else(|| config.as_ref().and_then(|c| c.max_turns))
        .unwrap_or(DEFAULT_MAX_TURNS);

    println!("Welcome to Quoridor!");
    println!("Be the first to reach the opposite side!");

    let board = BoardState::new(name_a, name_b);
    let result = match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script: {}", path.display()))?;
            play_game(&mut LineSource::new(BufReader::new(file), false), board, max_turns)?
        }
        None => {
            let stdin = io::stdin();
            play_game(&mut LineSource::new(stdin.lock(), true), board, max_turns)?
        }
    };

    println!("{}", result.board);
    match result.winner {
        Some(player) => println!(
            "{} wins! You reached the opposite side!",
            result.board.name(player)
        ),
        None => println!("Game over after {} turns, no winner.", result.num_turns),
    }
    log::info!(
        "game finished: {} turns, {} rejected commands",
        result.num_turns,
        result.rejected
    );
    Ok(())
}
