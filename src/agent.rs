//! Move-choosing agents.
//!
//! Every agent follows the same lifecycle: it is given the starting
//! position, asked for a move when its side is to play, and told about every
//! move actually played (its own and the opponent's) so it can keep its view
//! of the board in step with the game.

use log::debug;

use crate::board::{BoardState, Player};
use crate::error::{Error, Result};
use crate::eval::{EvalKind, Evaluator};
use crate::search::{SearchNode, best_move, dump_children, run_search};

const NO_STATE: &str = "agent used before set_initial_state";

/// A player in a game of Kalah.
pub trait Agent {
    /// Short label for logs and match reports.
    fn name(&self) -> &str;

    /// Forget everything and start tracking `state`.
    fn set_initial_state(&mut self, state: BoardState);

    /// Choose a move index (0-5) for the side to move.
    fn best_move(&mut self) -> Result<usize>;

    /// Apply a move played by either side.
    fn advance(&mut self, move_index: usize) -> Result<()>;
}

/// Alpha-beta search agent that keeps its tree between moves.
pub struct AlphaBetaAgent {
    player: Player,
    depth: u32,
    evaluator: Box<dyn Evaluator>,
    root: Option<SearchNode>,
}

impl AlphaBetaAgent {
    /// Create an agent searching `depth` plies for `player`.
    pub fn new(player: Player, depth: u32, evaluator: Box<dyn Evaluator>) -> Self {
        Self {
            player,
            depth,
            evaluator,
            root: None,
        }
    }

    /// Create an agent using one of the built-in evaluators.
    pub fn with_eval(player: Player, depth: u32, kind: EvalKind) -> Self {
        Self::new(player, depth, kind.evaluator())
    }

    #[inline]
    pub fn player(&self) -> Player {
        self.player
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The current root of the search tree.
    pub fn root(&self) -> Option<&SearchNode> {
        self.root.as_ref()
    }
}

impl Agent for AlphaBetaAgent {
    fn name(&self) -> &str {
        "alpha-beta"
    }

    fn set_initial_state(&mut self, state: BoardState) {
        self.root = Some(SearchNode::new(state));
    }

    fn best_move(&mut self) -> Result<usize> {
        if self.depth == 0 {
            return Err(Error::InvariantViolation("search depth must be at least 1"));
        }
        let root = self.root.as_mut().ok_or(Error::InvariantViolation(NO_STATE))?;
        let stats = run_search(root, self.depth, self.evaluator.as_ref(), self.player);
        debug!(
            "{} depth {}: value {:?}, {} nodes visited, {} expanded, {} evaluations, {} cutoffs",
            self.player,
            self.depth,
            root.value(),
            stats.nodes_visited,
            stats.nodes_expanded,
            stats.evaluations,
            stats.cutoffs
        );
        dump_children(root);

        best_move(root).ok_or(Error::InvariantViolation(
            "no child of the root carries the root's value",
        ))
    }

    fn advance(&mut self, move_index: usize) -> Result<()> {
        let root = self.root.as_ref().ok_or(Error::InvariantViolation(NO_STATE))?;
        let slot = root.state.slot_for_move(move_index)?;
        let illegal = Error::IllegalMove { move_index, slot };

        let next = if root.is_expanded() {
            if root.child(move_index).is_none() {
                return Err(illegal);
            }
            debug!("{}: reusing subtree of move {}", self.player, move_index);
            self.root
                .take()
                .and_then(|root| root.into_child(move_index))
        } else {
            let state = root.state.successor(move_index)?.ok_or(illegal)?;
            Some(SearchNode::new(state))
        };
        self.root = next;
        Ok(())
    }
}

/// Picks uniformly among the legal moves.
pub struct RandomAgent {
    state: Option<BoardState>,
    rng: fastrand::Rng,
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomAgent {
    pub fn new() -> Self {
        Self {
            state: None,
            rng: fastrand::Rng::new(),
        }
    }

    /// A random agent with reproducible choices.
    pub fn seeded(seed: u64) -> Self {
        Self {
            state: None,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn state(&self) -> Option<&BoardState> {
        self.state.as_ref()
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn set_initial_state(&mut self, state: BoardState) {
        self.state = Some(state);
    }

    fn best_move(&mut self) -> Result<usize> {
        let state = self.state.as_ref().ok_or(Error::InvariantViolation(NO_STATE))?;
        let moves = state.legal_moves();
        if moves.is_empty() {
            return Err(Error::InvariantViolation("no legal move to choose from"));
        }
        Ok(moves[self.rng.usize(..moves.len())])
    }

    fn advance(&mut self, move_index: usize) -> Result<()> {
        let state = self.state.as_ref().ok_or(Error::InvariantViolation(NO_STATE))?;
        self.state = Some(state.play(move_index)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::NaiveDifference;
    use crate::search::minimax_best_move;

    fn alpha_beta(player: Player, depth: u32) -> AlphaBetaAgent {
        AlphaBetaAgent::new(player, depth, Box::new(NaiveDifference))
    }

    #[test]
    fn test_lifecycle_errors() {
        let mut agent = alpha_beta(Player::One, 3);
        assert!(matches!(agent.best_move(), Err(Error::InvariantViolation(_))));
        assert!(matches!(agent.advance(0), Err(Error::InvariantViolation(_))));

        let mut random = RandomAgent::seeded(7);
        assert!(matches!(random.best_move(), Err(Error::InvariantViolation(_))));
        assert!(matches!(random.advance(0), Err(Error::InvariantViolation(_))));
    }

    #[test]
    fn test_zero_depth_is_rejected() {
        let mut agent = alpha_beta(Player::One, 0);
        agent.set_initial_state(BoardState::initial());
        assert!(matches!(agent.best_move(), Err(Error::InvariantViolation(_))));
    }

    #[test]
    fn test_best_move_matches_minimax() {
        let state = BoardState::initial();
        let mut agent = alpha_beta(Player::One, 4);
        agent.set_initial_state(state);
        let chosen = agent.best_move().unwrap();
        assert_eq!(
            Some(chosen),
            minimax_best_move(&state, 4, &NaiveDifference, Player::One)
        );
    }

    #[test]
    fn test_advance_reuses_searched_child() {
        let mut agent = alpha_beta(Player::One, 3);
        agent.set_initial_state(BoardState::initial());
        let chosen = agent.best_move().unwrap();
        let expected = agent.root().unwrap().child(chosen).unwrap().state;

        agent.advance(chosen).unwrap();
        let root = agent.root().unwrap();
        assert_eq!(root.state, expected);
        assert!(root.is_expanded());
    }

    #[test]
    fn test_advance_without_tree_uses_rules() {
        let mut agent = alpha_beta(Player::Two, 3);
        agent.set_initial_state(BoardState::initial());
        agent.advance(2).unwrap();
        let root = agent.root().unwrap();
        assert_eq!(root.state, BoardState::initial().play(2).unwrap());
        assert!(!root.is_expanded());
    }

    #[test]
    fn test_advance_rejects_illegal_moves() {
        let state = BoardState::new(Player::One, [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1], 0, 0);
        let mut agent = alpha_beta(Player::One, 2);
        agent.set_initial_state(state);

        // Unexpanded root.
        assert_eq!(
            agent.advance(0),
            Err(Error::IllegalMove {
                move_index: 0,
                slot: 0
            })
        );
        assert_eq!(agent.advance(6), Err(Error::InvalidArgument { move_index: 6 }));

        // Expanded root.
        agent.best_move().unwrap();
        assert!(matches!(agent.advance(0), Err(Error::IllegalMove { .. })));
        assert_eq!(agent.root().unwrap().state, state);
    }

    #[test]
    fn test_random_agent_plays_legal_moves() {
        let state = BoardState::new(Player::One, [0, 0, 3, 0, 2, 0, 1, 1, 1, 1, 1, 1], 0, 0);
        let mut agent = RandomAgent::seeded(42);
        agent.set_initial_state(state);
        for _ in 0..50 {
            let m = agent.best_move().unwrap();
            assert!(m == 2 || m == 4, "move {m} is illegal");
        }
    }

    #[test]
    fn test_random_agent_is_reproducible() {
        let play = |seed| {
            let mut agent = RandomAgent::seeded(seed);
            agent.set_initial_state(BoardState::initial());
            let mut moves = Vec::new();
            while !agent.state().unwrap().is_terminal() {
                let m = agent.best_move().unwrap();
                agent.advance(m).unwrap();
                moves.push(m);
            }
            moves
        };
        assert_eq!(play(3), play(3));
    }

    #[test]
    fn test_random_agent_rejects_illegal_advance() {
        let state = BoardState::new(Player::One, [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1], 0, 0);
        let mut agent = RandomAgent::seeded(1);
        agent.set_initial_state(state);
        assert!(matches!(agent.advance(0), Err(Error::IllegalMove { .. })));
        assert_eq!(agent.state(), Some(&state));
    }
}
