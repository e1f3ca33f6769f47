//! Constants for board geometry and engine defaults.
//!
//! The board is a ring of 13 positions as seen by the player to move:
//! their own six slots, their own mancala, then the opponent's six slots.
//! The opponent's mancala is never sown into.

// =============================================================================
// Board Geometry
// =============================================================================

/// Slots owned by each player.
pub const SIDE_SLOTS: usize = 6;

/// Total slots on the board (mancalas excluded).
pub const SLOT_COUNT: usize = 2 * SIDE_SLOTS;

/// Positions in one full sowing lap: every slot plus the mover's own mancala.
pub const LAP: usize = SLOT_COUNT + 1;

/// Mover-relative position of the mover's own mancala in the sowing ring.
pub const STORE_POSITION: usize = SIDE_SLOTS;

/// Number of move indices a player can choose from (one per own slot).
pub const MOVE_COUNT: usize = SIDE_SLOTS;

// =============================================================================
// Game Setup
// =============================================================================

/// Pebbles placed in each slot at the start of a standard game.
pub const DEFAULT_PEBBLES: u32 = 4;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default alpha-beta depth in plies.
pub const DEFAULT_DEPTH: u32 = 6;

/// Weight of a single latent capture threat in the capture-potential evaluator.
pub const CAPTURE_THREAT_WEIGHT: f64 = 0.5;
