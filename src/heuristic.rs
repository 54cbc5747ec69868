use std::fmt::Display;

use crate::board::{Board, SIDE};
use crate::domain::Domain;

/// Estimates of the number of moves left to reach the goal.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum Heuristic {
    /// Always 0; Greedy and A* then order by path cost alone.
    Zero,
    Manhattan,
    /// Manhattan distance plus two moves per linear conflict.
    ManhattanLinearConflict,
}

impl Heuristic {
    pub fn evaluate(self, domain: Domain, board: &Board) -> u32 {
        match self {
            Heuristic::Zero => 0,
            Heuristic::Manhattan => manhattan_distance(domain, board),
            Heuristic::ManhattanLinearConflict => {
                manhattan_distance(domain, board) + 2 * linear_conflicts(board)
            }
        }
    }

    /// The heuristic each domain is solved with unless told otherwise.
    pub fn default_for(domain: Domain) -> Heuristic {
        match domain {
            Domain::SingleBlank => Heuristic::Manhattan,
            Domain::MultiBlank => Heuristic::ManhattanLinearConflict,
        }
    }
}

impl Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Heuristic::Zero => "zero",
            Heuristic::Manhattan => "manhattan",
            Heuristic::ManhattanLinearConflict => "manhattan-linear-conflict",
        })
    }
}

/// Sum of grid distances between every tile and its goal cell. Tile `t`
/// belongs at cell `t - 1` in both domains; blanks are not counted.
pub fn manhattan_distance(domain: Domain, board: &Board) -> u32 {
    let positions = board.positions();
    (1..=domain.max_tile() as usize)
        .map(|tile| {
            let (at, goal) = (positions[tile], tile - 1);
            let rows = (at / SIDE).abs_diff(goal / SIDE);
            let cols = (at % SIDE).abs_diff(goal % SIDE);
            (rows + cols) as u32
        })
        .sum()
}

// (tile, at, other tile, at): each pair sits in the shared goal row or column
// of both tiles, but swapped relative to the goal order.
const CONFLICTS: [(usize, usize, usize, usize); 7] = [
    (1, 1, 2, 0),
    (1, 3, 4, 0),
    (2, 4, 5, 1),
    (2, 2, 3, 1),
    (3, 5, 6, 2),
    (4, 4, 5, 3),
    (5, 5, 6, 4),
];

/// Counts a fixed set of adjacent reversed tile pairs among tiles 1–6.
/// Each one needs at least two moves beyond the Manhattan distance.
pub fn linear_conflicts(board: &Board) -> u32 {
    let positions = board.positions();
    CONFLICTS
        .iter()
        .filter(|&&(a, at_a, b, at_b)| positions[a] == at_a && positions[b] == at_b)
        .count() as u32
}
