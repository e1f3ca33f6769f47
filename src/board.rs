//! Kalah board state and the move-transition rules.
//!
//! This module provides the core game logic:
//! - Board state representation (12 slots, two mancalas, side to move)
//! - Sowing with full laps that skip the opponent's mancala
//! - Capture, extra-turn and starvation end-game rules
//!
//! A [`BoardState`] is never mutated once built: every move produces a new
//! state, so positions can be shared freely between the search tree and the
//! game session.

use std::fmt;

use crate::constants::{DEFAULT_PEBBLES, LAP, MOVE_COUNT, SIDE_SLOTS, SLOT_COUNT, STORE_POSITION};
use crate::error::{Error, Result};

/// One of the two players. Player one owns slots 0-5 and mancala one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The other player.
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Index of the first slot owned by this player.
    #[inline]
    pub fn base(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => SIDE_SLOTS,
        }
    }

    /// Whether `slot` lies on this player's side.
    #[inline]
    pub fn owns(self, slot: usize) -> bool {
        (self.base()..self.base() + SIDE_SLOTS).contains(&slot)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

/// Result of a finished game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Winner(Player),
    Draw,
}

/// A pit reached while sowing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Pit {
    Slot(usize),
    Store,
}

/// Map a mover-relative ring position (0..13) to a pit.
///
/// The ring runs over the mover's six slots, their mancala, then the
/// opponent's six slots.
#[inline]
fn pit_at(mover: Player, position: usize) -> Pit {
    let base = mover.base();
    match position {
        p if p < STORE_POSITION => Pit::Slot(base + p),
        STORE_POSITION => Pit::Store,
        p => Pit::Slot((base + p - 1) % SLOT_COUNT),
    }
}

/// A Kalah position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoardState {
    to_move: Player,
    slots: [u32; SLOT_COUNT],
    mancala_one: u32,
    mancala_two: u32,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::initial()
    }
}

impl BoardState {
    /// Build an arbitrary position.
    pub fn new(to_move: Player, slots: [u32; SLOT_COUNT], mancala_one: u32, mancala_two: u32) -> Self {
        Self {
            to_move,
            slots,
            mancala_one,
            mancala_two,
        }
    }

    /// The standard opening: four pebbles per slot, player one to move.
    pub fn initial() -> Self {
        Self::with_pebbles(DEFAULT_PEBBLES)
    }

    /// An opening with `pebbles` in every slot, player one to move.
    pub fn with_pebbles(pebbles: u32) -> Self {
        Self::new(Player::One, [pebbles; SLOT_COUNT], 0, 0)
    }

    #[inline]
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    #[inline]
    pub fn is_player_one_turn(&self) -> bool {
        self.to_move == Player::One
    }

    #[inline]
    pub fn slots(&self) -> &[u32; SLOT_COUNT] {
        &self.slots
    }

    #[inline]
    pub fn slot(&self, index: usize) -> u32 {
        self.slots[index]
    }

    #[inline]
    pub fn mancala_one(&self) -> u32 {
        self.mancala_one
    }

    #[inline]
    pub fn mancala_two(&self) -> u32 {
        self.mancala_two
    }

    /// The mancala owned by `player`.
    #[inline]
    pub fn mancala(&self, player: Player) -> u32 {
        match player {
            Player::One => self.mancala_one,
            Player::Two => self.mancala_two,
        }
    }

    fn mancala_mut(&mut self, player: Player) -> &mut u32 {
        match player {
            Player::One => &mut self.mancala_one,
            Player::Two => &mut self.mancala_two,
        }
    }

    /// The six slots owned by `player`, in sowing order.
    pub fn side(&self, player: Player) -> &[u32] {
        let base = player.base();
        &self.slots[base..base + SIDE_SLOTS]
    }

    /// Pebbles on the board and in both mancalas.
    pub fn total_pebbles(&self) -> u32 {
        self.slots.iter().sum::<u32>() + self.mancala_one + self.mancala_two
    }

    /// The game is over once every slot is empty.
    pub fn is_terminal(&self) -> bool {
        self.slots.iter().all(|&p| p == 0)
    }

    /// Translate a move index into the board slot it picks up from.
    ///
    /// # Errors
    /// `Error::InvalidArgument` if `move_index` is not in `0..=5`.
    pub fn slot_for_move(&self, move_index: usize) -> Result<usize> {
        if move_index >= MOVE_COUNT {
            return Err(Error::InvalidArgument { move_index });
        }
        Ok(self.to_move.base() + move_index)
    }

    /// Whether `move_index` is in range and picks up a non-empty slot.
    pub fn is_legal(&self, move_index: usize) -> bool {
        self.slot_for_move(move_index)
            .is_ok_and(|slot| self.slots[slot] > 0)
    }

    /// All legal move indices in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..MOVE_COUNT).filter(|&m| self.is_legal(m)).collect()
    }

    /// Compute the state after the player to move picks up `move_index`.
    ///
    /// Returns `Ok(None)` when the chosen slot is empty.
    ///
    /// # Errors
    /// `Error::InvalidArgument` if `move_index` is not in `0..=5`.
    pub fn successor(&self, move_index: usize) -> Result<Option<BoardState>> {
        let origin = self.slot_for_move(move_index)?;
        let pebbles = self.slots[origin];
        if pebbles == 0 {
            return Ok(None);
        }

        let mover = self.to_move;
        let mut next = *self;
        next.slots[origin] = 0;

        // Every full lap drops one pebble in each slot and the mover's mancala.
        let laps = pebbles / LAP as u32;
        if laps > 0 {
            for slot in &mut next.slots {
                *slot += laps;
            }
            *next.mancala_mut(mover) += laps;
        }

        for step in 1..=(pebbles as usize % LAP) {
            match pit_at(mover, (move_index + step) % LAP) {
                Pit::Slot(slot) => next.slots[slot] += 1,
                Pit::Store => *next.mancala_mut(mover) += 1,
            }
        }

        // The last pebble's position counts the laps too.
        match pit_at(mover, (move_index + pebbles as usize) % LAP) {
            Pit::Store => {}
            Pit::Slot(slot) => {
                if mover.owns(slot) && next.slots[slot] == 1 {
                    let opposite = SLOT_COUNT - 1 - slot;
                    let captured = next.slots[slot] + next.slots[opposite];
                    next.slots[slot] = 0;
                    next.slots[opposite] = 0;
                    *next.mancala_mut(mover) += captured;
                }
                next.to_move = mover.opponent();
            }
        }

        next.sweep_starved_side();
        Ok(Some(next))
    }

    /// Like [`successor`](Self::successor), but reports an empty slot as an error.
    ///
    /// # Errors
    /// - `Error::InvalidArgument` if `move_index` is not in `0..=5`
    /// - `Error::IllegalMove` if the chosen slot is empty
    pub fn play(&self, move_index: usize) -> Result<BoardState> {
        let slot = self.slot_for_move(move_index)?;
        self.successor(move_index)?
            .ok_or(Error::IllegalMove { move_index, slot })
    }

    /// Successor states indexed by move, `None` where the move is illegal.
    pub fn legal_successors(&self) -> [Option<BoardState>; MOVE_COUNT] {
        std::array::from_fn(|m| self.successor(m).ok().flatten())
    }

    /// The result of the game, or `None` while it is still running.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.is_terminal() {
            return None;
        }
        Some(match self.mancala_one.cmp(&self.mancala_two) {
            std::cmp::Ordering::Greater => Outcome::Winner(Player::One),
            std::cmp::Ordering::Less => Outcome::Winner(Player::Two),
            std::cmp::Ordering::Equal => Outcome::Draw,
        })
    }

    /// If one side has run dry, bank everything left on the other side.
    fn sweep_starved_side(&mut self) {
        for player in [Player::One, Player::Two] {
            if self.side(player).iter().all(|&p| p == 0) {
                let other = player.opponent();
                let base = other.base();
                let swept: u32 = self.side(other).iter().sum();
                self.slots[base..base + SIDE_SLOTS].fill(0);
                *self.mancala_mut(other) += swept;
                return;
            }
        }
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(outcome) = self.outcome() {
            writeln!(f, "Player 1: {}", self.mancala_one)?;
            writeln!(f, "Player 2: {}", self.mancala_two)?;
            return match outcome {
                Outcome::Winner(player) => writeln!(f, "{player} wins!"),
                Outcome::Draw => writeln!(f, "Draw!"),
            };
        }

        writeln!(f, "{} to move", self.to_move)?;
        write!(f, "      ")?;
        for slot in (SIDE_SLOTS..SLOT_COUNT).rev() {
            write!(f, "{slot:>4}")?;
        }
        writeln!(f)?;
        write!(f, "      ")?;
        for slot in (SIDE_SLOTS..SLOT_COUNT).rev() {
            write!(f, "{:>4}", self.slots[slot])?;
        }
        writeln!(f)?;
        writeln!(f, "M2 {:>3}{:>24}  M1 {}", self.mancala_two, "", self.mancala_one)?;
        write!(f, "      ")?;
        for slot in 0..SIDE_SLOTS {
            write!(f, "{:>4}", self.slots[slot])?;
        }
        writeln!(f)?;
        write!(f, "      ")?;
        for slot in 0..SIDE_SLOTS {
            write!(f, "{slot:>4}")?;
        }
        writeln!(f)
    }
}
