//! Depth-limited alpha-beta search over a reusable game tree.
//!
//! The search keeps a tree of [`SearchNode`]s where each node owns the
//! children reachable by the six move indices. Nodes store:
//! - a provisional value: the best score backed up from the children explored so far
//! - a final value, set once the node's depth-limited evaluation is complete
//!
//! Instead of separate alpha/beta scalars, every node on the current path
//! exposes its provisional value to its descendants. A node stops exploring
//! children as soon as its provisional value passes a provisional value held
//! by an ancestor of the other side, since that ancestor would never let the
//! game reach it.
//!
//! Children are built lazily on the first visit and kept across searches. An
//! agent re-roots the tree at the child for the move actually played, so the
//! next search starts with most of the tree already built.

use log::trace;

use crate::board::{BoardState, Player};
use crate::constants::MOVE_COUNT;
use crate::eval::Evaluator;

/// A node in the alpha-beta search tree.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// The position at this node
    pub state: BoardState,
    /// One entry per move index, `None` where the move is illegal. Built on first expansion.
    children: Option<Vec<Option<SearchNode>>>,
    /// Final value from the last completed search
    value: Option<f64>,
    /// Best value backed up from the children explored so far
    provisional: Option<f64>,
}

impl SearchNode {
    /// Create an unexpanded node for the given position.
    pub fn new(state: BoardState) -> Self {
        Self {
            state,
            children: None,
            value: None,
            provisional: None,
        }
    }

    #[inline]
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    #[inline]
    pub fn provisional_value(&self) -> Option<f64> {
        self.provisional
    }

    #[inline]
    pub fn is_expanded(&self) -> bool {
        self.children.is_some()
    }

    /// The child list indexed by move, if this node has been expanded.
    pub fn children(&self) -> Option<&[Option<SearchNode>]> {
        self.children.as_deref()
    }

    /// The child reached by `move_index`, if expanded and legal.
    pub fn child(&self, move_index: usize) -> Option<&SearchNode> {
        self.children()?.get(move_index)?.as_ref()
    }

    /// Detach the child reached by `move_index`, dropping the rest of the tree.
    pub fn into_child(self, move_index: usize) -> Option<SearchNode> {
        self.children?.into_iter().nth(move_index).flatten()
    }

    /// Number of nodes in this subtree, this node included.
    pub fn size(&self) -> usize {
        1 + self
            .children()
            .map(|children| children.iter().flatten().map(SearchNode::size).sum())
            .unwrap_or(0)
    }

    fn set_value(&mut self, value: f64) {
        self.provisional = Some(value);
        self.value = Some(value);
    }
}

/// Counters collected during one call to [`run_search`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes entered, leaves included
    pub nodes_visited: usize,
    /// Nodes whose child list was built during this search
    pub nodes_expanded: usize,
    /// Calls to the evaluator
    pub evaluations: usize,
    /// Nodes that stopped before exploring all of their children
    pub cutoffs: usize,
}

/// Build the child list of a node. Returns `false` if it already existed.
pub fn expand(node: &mut SearchNode) -> bool {
    if node.children.is_some() {
        return false;
    }
    let children = node
        .state
        .legal_successors()
        .into_iter()
        .map(|successor| successor.map(SearchNode::new))
        .collect();
    node.children = Some(children);
    true
}

/// Fold a child's value into a running best value.
#[inline]
fn back_up(best: Option<f64>, value: f64, maximizing: bool) -> f64 {
    match best {
        None => value,
        Some(best) if maximizing => best.max(value),
        Some(best) => best.min(value),
    }
}

/// The provisional value of one node on the current search path.
#[derive(Debug, Clone, Copy)]
struct PathEntry {
    /// The node belongs to the searching player and maximizes
    maximizing: bool,
    provisional: Option<f64>,
}

struct AlphaBeta<'a> {
    evaluator: &'a dyn Evaluator,
    perspective: Player,
    path: Vec<PathEntry>,
    stats: SearchStats,
}

impl AlphaBeta<'_> {
    fn visit(&mut self, node: &mut SearchNode, depth: u32) -> f64 {
        self.stats.nodes_visited += 1;
        node.value = None;
        node.provisional = None;

        if depth == 0 || node.state.is_terminal() {
            return self.evaluate(node);
        }
        if expand(node) {
            self.stats.nodes_expanded += 1;
        }

        let maximizing = node.state.to_move() == self.perspective;
        let frame = self.path.len();
        self.path.push(PathEntry {
            maximizing,
            provisional: None,
        });

        if let Some(children) = node.children.as_mut() {
            for child in children.iter_mut().flatten() {
                let value = self.visit(child, depth - 1);
                let entry = &mut self.path[frame];
                entry.provisional = Some(back_up(entry.provisional, value, maximizing));
                node.provisional = entry.provisional;
                if self.should_prune() {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
        }

        match self.path.pop().and_then(|entry| entry.provisional) {
            Some(value) => {
                node.set_value(value);
                value
            }
            // Only hand-built positions leave the mover without a legal move.
            None => self.evaluate(node),
        }
    }

    fn evaluate(&mut self, node: &mut SearchNode) -> f64 {
        self.stats.evaluations += 1;
        let value = self.evaluator.evaluate(&node.state, self.perspective);
        node.set_value(value);
        value
    }

    /// Check the path for an ancestor that makes the current node irrelevant.
    ///
    /// A maximizing node is cut once it beats a minimizing ancestor's
    /// provisional value; a minimizing node once it drops below a maximizing
    /// ancestor's.
    fn should_prune(&self) -> bool {
        let Some((current, ancestors)) = self.path.split_last() else {
            return false;
        };
        let Some(value) = current.provisional else {
            return false;
        };
        ancestors.iter().any(|ancestor| match ancestor.provisional {
            Some(bound) if ancestor.maximizing != current.maximizing => {
                if current.maximizing {
                    bound < value
                } else {
                    bound > value
                }
            }
            _ => false,
        })
    }
}

/// Run a depth-limited alpha-beta search from `root`.
///
/// Values are scored by `evaluator` from the point of view of `perspective`;
/// nodes where `perspective` is to move maximize, the others minimize.
/// Every visited node is re-evaluated, so the same tree can be searched
/// repeatedly. Afterwards `root.value()` holds the minimax value and
/// [`best_move`] picks the move.
pub fn run_search(
    root: &mut SearchNode,
    depth: u32,
    evaluator: &dyn Evaluator,
    perspective: Player,
) -> SearchStats {
    let mut search = AlphaBeta {
        evaluator,
        perspective,
        path: Vec::with_capacity(depth as usize + 1),
        stats: SearchStats::default(),
    };
    search.visit(root, depth);
    search.stats
}

/// The lowest move index whose child's value equals the node's value.
///
/// Only meaningful right after [`run_search`] with a depth of at least one.
pub fn best_move(node: &SearchNode) -> Option<usize> {
    let target = node.value?;
    node.children()?
        .iter()
        .position(|child| child.as_ref().and_then(SearchNode::value) == Some(target))
}

/// Exhaustive minimax value without pruning or tree reuse.
pub fn minimax(
    state: &BoardState,
    depth: u32,
    evaluator: &dyn Evaluator,
    perspective: Player,
) -> f64 {
    if depth == 0 || state.is_terminal() {
        return evaluator.evaluate(state, perspective);
    }
    let maximizing = state.to_move() == perspective;
    state
        .legal_successors()
        .iter()
        .flatten()
        .map(|successor| minimax(successor, depth - 1, evaluator, perspective))
        .fold(None, |best, value| Some(back_up(best, value, maximizing)))
        .unwrap_or_else(|| evaluator.evaluate(state, perspective))
}

/// The move an exhaustive minimax search would pick, lowest index on ties.
pub fn minimax_best_move(
    state: &BoardState,
    depth: u32,
    evaluator: &dyn Evaluator,
    perspective: Player,
) -> Option<usize> {
    if depth == 0 || state.is_terminal() {
        return None;
    }
    let maximizing = state.to_move() == perspective;
    let values: [Option<f64>; MOVE_COUNT] = std::array::from_fn(|m| {
        state
            .successor(m)
            .ok()
            .flatten()
            .map(|successor| minimax(&successor, depth - 1, evaluator, perspective))
    });
    let target = values
        .iter()
        .flatten()
        .fold(None, |best, &value| Some(back_up(best, value, maximizing)))?;
    values.iter().position(|&value| value == Some(target))
}

/// Log the root's children and their values.
pub fn dump_children(root: &SearchNode) {
    let Some(children) = root.children() else {
        return;
    };
    for (move_index, child) in children.iter().enumerate() {
        match child {
            Some(child) => trace!(
                "move {} value={:?} subtree={}",
                move_index,
                child.value(),
                child.size()
            ),
            None => trace!("move {move_index} illegal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::NaiveDifference;

    #[test]
    fn test_expand_marks_illegal_moves() {
        let state = BoardState::new(Player::One, [0, 3, 0, 1, 1, 0, 1, 1, 1, 1, 1, 1], 0, 0);
        let mut node = SearchNode::new(state);
        assert!(!node.is_expanded());
        assert!(expand(&mut node));
        assert!(!expand(&mut node));

        let present: Vec<bool> = node
            .children()
            .unwrap()
            .iter()
            .map(Option::is_some)
            .collect();
        assert_eq!(present, vec![false, true, false, true, true, false]);
    }

    #[test]
    fn test_depth_zero_evaluates_root() {
        let mut root = SearchNode::new(BoardState::new(Player::One, [1; 12], 5, 2));
        let stats = run_search(&mut root, 0, &NaiveDifference, Player::One);
        assert_eq!(root.value(), Some(3.0));
        assert_eq!(root.provisional_value(), Some(3.0));
        assert_eq!(stats.evaluations, 1);
        assert!(!root.is_expanded());
    }

    #[test]
    fn test_terminal_root_is_a_leaf() {
        let mut root = SearchNode::new(BoardState::new(Player::Two, [0; 12], 20, 28));
        run_search(&mut root, 4, &NaiveDifference, Player::Two);
        assert_eq!(root.value(), Some(8.0));
        assert_eq!(best_move(&root), None);
    }

    #[test]
    fn test_root_value_backs_up_from_children() {
        let mut root = SearchNode::new(BoardState::initial());
        run_search(&mut root, 3, &NaiveDifference, Player::One);

        let best = root
            .children()
            .unwrap()
            .iter()
            .flatten()
            .filter_map(SearchNode::value)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(root.value(), Some(best));
        assert_eq!(root.value(), root.provisional_value());
    }

    #[test]
    fn test_matches_exhaustive_minimax() {
        let state = BoardState::initial().play(0).unwrap();
        for perspective in [Player::One, Player::Two] {
            for depth in 1..=4 {
                let mut root = SearchNode::new(state);
                run_search(&mut root, depth, &NaiveDifference, perspective);
                assert_eq!(
                    root.value(),
                    Some(minimax(&state, depth, &NaiveDifference, perspective))
                );
                assert_eq!(
                    best_move(&root),
                    minimax_best_move(&state, depth, &NaiveDifference, perspective)
                );
            }
        }
    }

    #[test]
    fn test_pruning_skips_refuted_moves() {
        // Scores positions by how empty slot 0 is. Move 0 empties it and the
        // opponent can refill it by at most one, so move 1 is refuted as soon
        // as the first reply leaves four pebbles there.
        let empty_first_slot = |s: &BoardState, _: Player| -f64::from(s.slot(0));
        let state = BoardState::initial();
        let mut root = SearchNode::new(state);
        let stats = run_search(&mut root, 2, &empty_first_slot, Player::One);

        assert!(stats.cutoffs > 0);
        assert_eq!(root.value(), Some(minimax(&state, 2, &empty_first_slot, Player::One)));
        assert_eq!(
            best_move(&root),
            minimax_best_move(&state, 2, &empty_first_slot, Player::One)
        );
    }

    #[test]
    fn test_repeated_search_reuses_children() {
        let mut root = SearchNode::new(BoardState::initial());
        let first = run_search(&mut root, 3, &NaiveDifference, Player::One);
        let size = root.size();
        let second = run_search(&mut root, 3, &NaiveDifference, Player::One);

        assert!(first.nodes_expanded > 0);
        assert_eq!(second.nodes_expanded, 0);
        assert_eq!(first.nodes_visited, second.nodes_visited);
        assert_eq!(root.size(), size);
    }

    #[test]
    fn test_into_child_keeps_subtree() {
        let mut root = SearchNode::new(BoardState::initial());
        run_search(&mut root, 2, &NaiveDifference, Player::One);
        let expected = root.child(3).unwrap().state;
        let child = root.into_child(3).unwrap();
        assert_eq!(child.state, expected);
        assert!(child.is_expanded());
    }
}
