//! Mancala-Rust: Kalah on the terminal.
//!
//! ## Usage
//!
//! - `mancala-rust` - Two alpha-beta agents play each other
//! - `mancala-rust play` - Play against an agent
//! - `mancala-rust bots` - Agent-versus-agent match with custom settings
//!
//! Set `RUST_LOG=debug` to see search statistics for every move.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use mancala_rust::agent::{Agent, AlphaBetaAgent, RandomAgent};
use mancala_rust::board::{BoardState, Player};
use mancala_rust::console::ConsoleGame;
use mancala_rust::constants::DEFAULT_DEPTH;
use mancala_rust::eval::EvalKind;
use mancala_rust::game::play_match;

/// Mancala-Rust: Kalah with an alpha-beta opponent
#[derive(Parser)]
#[command(name = "mancala-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against an agent in the terminal
    Play {
        /// Let the agent move first
        #[arg(long)]
        second: bool,
        /// Opponent to play against
        #[arg(long, value_enum, default_value_t = Opponent::AlphaBeta)]
        opponent: Opponent,
        /// Evaluation used by the alpha-beta opponent
        #[arg(long, value_enum, default_value_t = Eval::Capture)]
        eval: Eval,
        /// Search depth of the alpha-beta opponent
        #[arg(long, default_value_t = DEFAULT_DEPTH, value_parser = clap::value_parser!(u32).range(1..))]
        depth: u32,
        /// Seed for the random opponent
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Let two alpha-beta agents play each other
    Bots {
        /// Search depth of player 1
        #[arg(long, default_value_t = DEFAULT_DEPTH, value_parser = clap::value_parser!(u32).range(1..))]
        depth_one: u32,
        /// Evaluation used by player 1
        #[arg(long, value_enum, default_value_t = Eval::Naive)]
        eval_one: Eval,
        /// Search depth of player 2
        #[arg(long, default_value_t = DEFAULT_DEPTH, value_parser = clap::value_parser!(u32).range(1..))]
        depth_two: u32,
        /// Evaluation used by player 2
        #[arg(long, value_enum, default_value_t = Eval::Capture)]
        eval_two: Eval,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Eval {
    /// Mancala difference
    Naive,
    /// Mancala difference plus latent captures
    Capture,
}

impl From<Eval> for EvalKind {
    fn from(eval: Eval) -> Self {
        match eval {
            Eval::Naive => EvalKind::Naive,
            Eval::Capture => EvalKind::CapturePotential,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Opponent {
    AlphaBeta,
    Random,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play {
            second,
            opponent,
            eval,
            depth,
            seed,
        }) => {
            let human = if second { Player::Two } else { Player::One };
            let bot: Box<dyn Agent> = match opponent {
                Opponent::AlphaBeta => {
                    Box::new(AlphaBetaAgent::with_eval(human.opponent(), depth, eval.into()))
                }
                Opponent::Random => match seed {
                    Some(seed) => Box::new(RandomAgent::seeded(seed)),
                    None => Box::new(RandomAgent::new()),
                },
            };
            ConsoleGame::new(bot, human)
                .run()
                .context("console session failed")
        }
        Some(Commands::Bots {
            depth_one,
            eval_one,
            depth_two,
            eval_two,
        }) => run_bots(depth_one, eval_one, depth_two, eval_two),
        None => run_bots(DEFAULT_DEPTH, Eval::Naive, DEFAULT_DEPTH, Eval::Capture),
    }
}

fn run_bots(depth_one: u32, eval_one: Eval, depth_two: u32, eval_two: Eval) -> Result<()> {
    println!("Mancala-Rust: alpha-beta vs alpha-beta\n");
    let mut one = AlphaBetaAgent::with_eval(Player::One, depth_one, eval_one.into());
    let mut two = AlphaBetaAgent::with_eval(Player::Two, depth_two, eval_two.into());

    let report = play_match(&mut one, &mut two, BoardState::initial())
        .context("match between the alpha-beta agents failed")?;

    for (turn, (player, move_index)) in report.moves.iter().enumerate() {
        println!("{:>3}. {player} chose move {move_index}", turn + 1);
    }
    println!();
    print!("{}", report.final_state);
    println!("Elapsed: {:.3}s", report.elapsed.as_secs_f64());
    Ok(())
}
