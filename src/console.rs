//! Interactive human-versus-agent play on the terminal.
//!
//! The human types one command per line. After every legal human move the
//! agent answers with as many moves as it gets (extra turns included), then
//! the board is printed again.
//!
//! ## Supported Commands
//!
//! - `0` to `5` - Pick up the slot with that index on your side
//! - `board` - Print the board
//! - `moves` - List your legal moves
//! - `help` - List the commands
//! - `quit` - Leave the game
//!
//! ## Example
//!
//! ```ignore
//! use mancala_rust::agent::RandomAgent;
//! use mancala_rust::board::Player;
//! use mancala_rust::console::ConsoleGame;
//! let mut game = ConsoleGame::new(Box::new(RandomAgent::new()), Player::One);
//! game.run().unwrap();
//! ```

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use crate::agent::Agent;
use crate::board::{BoardState, Player};
use crate::error::{Error, Result};
use crate::game::GameSession;

const HELP: &str = "commands: 0-5 (play that slot), board, moves, help, quit";

/// A game between a human on the terminal and an agent.
pub struct ConsoleGame {
    session: GameSession,
    bot: Box<dyn Agent>,
    human: Player,
}

impl ConsoleGame {
    /// Start a standard game with the human playing `human`.
    pub fn new(bot: Box<dyn Agent>, human: Player) -> Self {
        Self::with_state(bot, human, BoardState::initial())
    }

    /// Start from an arbitrary position.
    pub fn with_state(mut bot: Box<dyn Agent>, human: Player, state: BoardState) -> Self {
        bot.set_initial_state(state);
        Self {
            session: GameSession::new(state),
            bot,
            human,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Let the agent open if it moves first. Returns (success, response).
    pub fn start(&mut self) -> (bool, String) {
        match self.bot_turns() {
            Ok(moves) => (true, self.describe(&moves)),
            Err(err) => (false, err.to_string()),
        }
    }

    /// Run the command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        match self.human {
            Player::One => writeln!(stdout, "You are player 1. Your slots are 0-5.")?,
            Player::Two => writeln!(
                stdout,
                "You are player 2. Your slots are 6-11: enter 0 for slot 6, 1 for slot 7 and so on."
            )?,
        }
        let (_, opening) = self.start();
        writeln!(stdout, "{opening}")?;
        if self.session.is_over() {
            return Ok(());
        }
        write!(stdout, "Choose your move (0-5): ")?;
        stdout.flush()?;

        for line in stdin.lock().lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (success, message) = self.execute(line);
            if success {
                writeln!(stdout, "{message}")?;
            } else {
                writeln!(stdout, "? {message}")?;
            }

            if line.eq_ignore_ascii_case("quit") || self.session.is_over() {
                break;
            }
            write!(stdout, "Choose your move (0-5): ")?;
            stdout.flush()?;
        }
        Ok(())
    }

    /// Execute one line of input and return (success, response).
    pub fn execute(&mut self, line: &str) -> (bool, String) {
        let command = line.trim().to_lowercase();
        match command.as_str() {
            "help" => (true, HELP.to_string()),
            "board" => (true, self.session.state().to_string()),
            "moves" => {
                let moves: Vec<String> = self
                    .session
                    .legal_moves()
                    .iter()
                    .map(usize::to_string)
                    .collect();
                (true, moves.join(" "))
            }
            "quit" => (true, String::new()),
            other => match other.parse::<usize>() {
                Ok(move_index) => self.human_move(move_index),
                Err(_) => (false, format!("unknown command: {other}")),
            },
        }
    }

    fn human_move(&mut self, move_index: usize) -> (bool, String) {
        if self.session.is_over() {
            return (false, "the game is over".to_string());
        }
        if self.session.to_move() != self.human {
            return (false, "invalid move: it is not your turn".to_string());
        }
        if let Err(err) = self.session.play(move_index) {
            return match err {
                Error::InvalidArgument { .. } => {
                    (false, "invalid move: choose a slot between 0 and 5".to_string())
                }
                err => (false, err.to_string()),
            };
        }

        let answer = self
            .bot
            .advance(move_index)
            .and_then(|()| self.bot_turns());
        match answer {
            Ok(moves) => (true, self.describe(&moves)),
            Err(err) => (false, err.to_string()),
        }
    }

    /// Let the agent play until it is the human's turn or the game ends.
    fn bot_turns(&mut self) -> Result<Vec<usize>> {
        let mut played = Vec::new();
        while !self.session.is_over() && self.session.to_move() != self.human {
            let move_index = self.bot.best_move()?;
            self.session.play(move_index)?;
            self.bot.advance(move_index)?;
            played.push(move_index);
        }
        Ok(played)
    }

    fn describe(&self, bot_moves: &[usize]) -> String {
        let mut out = String::new();
        for move_index in bot_moves {
            let _ = writeln!(out, "{} chose move {move_index}", self.bot.name());
        }
        out.push_str(&self.session.state().to_string());
        out
    }
}
