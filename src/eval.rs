//! Static evaluation of board states for the alpha-beta search.
//!
//! Every evaluator scores a position from one player's perspective:
//! positive values favour that player.

use crate::board::{BoardState, Player};
use crate::constants::{CAPTURE_THREAT_WEIGHT, SIDE_SLOTS, SLOT_COUNT};

/// Scores a board state from the point of view of `perspective`.
pub trait Evaluator {
    fn evaluate(&self, state: &BoardState, perspective: Player) -> f64;
}

impl<F> Evaluator for F
where
    F: Fn(&BoardState, Player) -> f64,
{
    fn evaluate(&self, state: &BoardState, perspective: Player) -> f64 {
        self(state, perspective)
    }
}

/// Flip a player-one-relative score to the requested perspective.
#[inline]
fn from_perspective(score: f64, perspective: Player) -> f64 {
    match perspective {
        Player::One => score,
        Player::Two => -score,
    }
}

/// Banked pebbles of player one minus those of player two.
#[inline]
fn mancala_difference(state: &BoardState) -> f64 {
    f64::from(state.mancala_one()) - f64::from(state.mancala_two())
}

/// Mancala difference only.
#[derive(Debug, Default, Clone, Copy)]
pub struct NaiveDifference;

impl Evaluator for NaiveDifference {
    fn evaluate(&self, state: &BoardState, perspective: Player) -> f64 {
        from_perspective(mancala_difference(state), perspective)
    }
}

/// Mancala difference with a bonus for every latent capture.
///
/// An empty slot facing a non-empty one is a capture waiting to happen for
/// the slot's owner.
#[derive(Debug, Default, Clone, Copy)]
pub struct CapturePotential;

impl Evaluator for CapturePotential {
    fn evaluate(&self, state: &BoardState, perspective: Player) -> f64 {
        let threat = |slot: usize| state.slot(slot) == 0 && state.slot(SLOT_COUNT - 1 - slot) > 0;
        let one = (0..SIDE_SLOTS).filter(|&s| threat(s)).count() as f64;
        let two = (SIDE_SLOTS..SLOT_COUNT).filter(|&s| threat(s)).count() as f64;
        let score = mancala_difference(state) + CAPTURE_THREAT_WEIGHT * (one - two);
        from_perspective(score, perspective)
    }
}

/// Evaluator choice, made once when an agent is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvalKind {
    #[default]
    Naive,
    CapturePotential,
}

impl EvalKind {
    pub fn evaluator(self) -> Box<dyn Evaluator> {
        match self {
            EvalKind::Naive => Box::new(NaiveDifference),
            EvalKind::CapturePotential => Box::new(CapturePotential),
        }
    }
}
