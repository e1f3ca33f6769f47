//! Mancala-Rust: a Kalah rule engine with a depth-limited alpha-beta player.
//!
//! The board is the standard six-slot, two-mancala Kalah layout. Search
//! trees survive between moves: after a move is played the agent re-roots
//! its tree at the matching child instead of starting over.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and engine defaults
//! - [`error`] - Error type shared by the rules and the agents
//! - [`board`] - Board state, sowing, captures and game end
//! - [`eval`] - Static evaluators used at the search frontier
//! - [`search`] - Search tree and alpha-beta with subtree reuse
//! - [`agent`] - Alpha-beta and random agents
//! - [`game`] - Game session and agent-versus-agent matches
//! - [`console`] - Human-versus-agent play on the terminal
//!
//! ## Example
//!
//! ```
//! use mancala_rust::board::{BoardState, Player};
//! use mancala_rust::eval::NaiveDifference;
//! use mancala_rust::search::{SearchNode, best_move, run_search};
//!
//! let mut root = SearchNode::new(BoardState::initial());
//! run_search(&mut root, 4, &NaiveDifference, Player::One);
//! let chosen = best_move(&root).unwrap();
//! let next = root.state.play(chosen).unwrap();
//! println!("{next}");
//! ```

pub mod agent;
pub mod board;
pub mod console;
pub mod constants;
pub mod error;
pub mod eval;
pub mod game;
pub mod search;

pub use error::{Error, Result};
