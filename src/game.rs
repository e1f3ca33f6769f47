//! Game session and the loop that plays two agents against each other.

use std::time::{Duration, Instant};

use log::{debug, info};

use crate::agent::Agent;
use crate::board::{BoardState, Outcome, Player};
use crate::error::{Error, Result};

/// The live game: current position plus every move played so far.
#[derive(Debug, Clone, Default)]
pub struct GameSession {
    state: BoardState,
    history: Vec<(Player, usize)>,
}

impl GameSession {
    pub fn new(state: BoardState) -> Self {
        Self {
            state,
            history: Vec::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    #[inline]
    pub fn to_move(&self) -> Player {
        self.state.to_move()
    }

    pub fn legal_moves(&self) -> Vec<usize> {
        self.state.legal_moves()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome()
    }

    /// Moves played so far, with the player who made each one.
    pub fn history(&self) -> &[(Player, usize)] {
        &self.history
    }

    /// Play `move_index` for the side to move.
    ///
    /// # Errors
    /// - `Error::InvalidArgument` if `move_index` is not in `0..=5`
    /// - `Error::IllegalMove` if the chosen slot is empty
    pub fn play(&mut self, move_index: usize) -> Result<BoardState> {
        let mover = self.state.to_move();
        self.state = self.state.play(move_index)?;
        self.history.push((mover, move_index));
        Ok(self.state)
    }
}

/// Summary of a finished match.
#[derive(Debug, Clone)]
pub struct MatchReport {
    pub final_state: BoardState,
    pub moves: Vec<(Player, usize)>,
    pub elapsed: Duration,
}

impl MatchReport {
    pub fn outcome(&self) -> Option<Outcome> {
        self.final_state.outcome()
    }
}

/// Play a full game between two agents starting from `initial`.
///
/// Both agents are told about every move, whichever side played it.
pub fn play_match(
    agent_one: &mut dyn Agent,
    agent_two: &mut dyn Agent,
    initial: BoardState,
) -> Result<MatchReport> {
    let start = Instant::now();
    let mut session = GameSession::new(initial);
    agent_one.set_initial_state(initial);
    agent_two.set_initial_state(initial);

    while !session.is_over() {
        let mover = session.to_move();
        let chosen = match mover {
            Player::One => agent_one.best_move()?,
            Player::Two => agent_two.best_move()?,
        };
        session.play(chosen)?;
        agent_one.advance(chosen)?;
        agent_two.advance(chosen)?;
        debug!("{mover} chose move {chosen}");
    }

    let final_state = *session.state();
    if final_state.total_pebbles() != initial.total_pebbles() {
        return Err(Error::InvariantViolation("pebble count changed during the match"));
    }
    let elapsed = start.elapsed();
    info!(
        "{} vs {} finished {}-{} after {} moves in {:?}",
        agent_one.name(),
        agent_two.name(),
        final_state.mancala_one(),
        final_state.mancala_two(),
        session.history().len(),
        elapsed
    );

    Ok(MatchReport {
        final_state,
        moves: session.history().to_vec(),
        elapsed,
    })
}
