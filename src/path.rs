use tracing::debug;

use crate::board::Board;
use crate::domain::{Action, Domain};
use crate::error::{Error, Result};
use crate::node::{NodeId, Tree};
use crate::search::{Problem, Stats, Strategy};

/// A validated path from the initial board to the goal.
#[derive(Clone, Debug)]
pub struct Solution {
    pub strategy: Strategy,
    pub domain: Domain,
    pub initial: Board,
    /// Initial-to-goal order.
    pub actions: Vec<Action>,
    pub path_cost: u32,
    pub stats: Stats,
}

impl Solution {
    /// Every board along the path, starting with the initial one and ending
    /// with the goal.
    pub fn boards(&self) -> impl Iterator<Item = Board> + '_ {
        let domain = self.domain;
        std::iter::once(self.initial).chain(self.actions.iter().scan(
            self.initial,
            move |board, &action| {
                *board = domain.result(board, action);
                Some(*board)
            },
        ))
    }
}

pub fn replay(domain: Domain, initial: Board, actions: &[Action]) -> Board {
    actions
        .iter()
        .fold(initial, |board, &action| domain.result(&board, action))
}

/// Collects the actions from the root to `terminal` and checks that
/// replaying them from the initial board lands on the goal.
pub(crate) fn reconstruct(
    problem: &Problem,
    strategy: Strategy,
    tree: &Tree,
    terminal: NodeId,
    stats: Stats,
) -> Result<Solution> {
    let mut actions: Vec<Action> = tree.ancestry(terminal).filter_map(|n| n.action).collect();
    actions.reverse();

    let solution = Solution {
        strategy,
        domain: problem.domain,
        initial: problem.initial,
        actions,
        path_cost: tree[terminal].path_cost,
        stats,
    };
    debug_assert_eq!(solution.actions.len(), solution.path_cost as usize);

    let expected = problem.domain.goal();
    let mut found = problem.initial;
    for board in solution.boards() {
        debug!(%board, "replay");
        found = board;
    }

    if found != expected || solution.actions.len() != solution.path_cost as usize {
        return Err(Error::ReplayMismatch {
            strategy,
            expected,
            found,
        });
    }

    Ok(solution)
}
