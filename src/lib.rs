//! State-space search over 3×3 sliding-tile puzzles.
//!
//! Five strategies (BFS, DFS, UCS, Greedy, A*) share one engine. Boards come
//! in two domains: the classic puzzle with a single blank, and a variant with
//! three blanks that can each move.

pub mod board;
pub mod domain;
pub mod error;
pub mod frontier;
pub mod heuristic;
pub mod node;
pub mod path;
pub mod report;
pub mod search;

pub use board::Board;
pub use domain::{Action, Direction, Domain};
pub use error::{Error, ParseError, Result};
pub use frontier::TieBreak;
pub use heuristic::Heuristic;
pub use path::Solution;
pub use search::{search, Problem, SearchOptions, Stats, Strategy};

/// Parses `input` for `domain` and runs `strategy` on it with default options.
pub fn solve(domain: Domain, input: &str, strategy: Strategy) -> Result<Solution> {
    let initial = domain.parse(input)?;
    search(&Problem::new(domain, initial), strategy, &SearchOptions::default())
}

#[cfg(test)]
mod test {
    use super::*;

    const TEST_INPUT: &str = "
1 2 4
5 0 6
7 3 8
";

    #[test]
    fn check_expected() {
        let solution = solve(Domain::SingleBlank, TEST_INPUT, Strategy::AStar).unwrap();

        assert_eq!(solution.path_cost, 16); // minimal moves is 16
        assert_eq!(solution.boards().last(), Some(Domain::SingleBlank.goal()));
    }

    #[test]
    fn malformed_input_fails_before_search() {
        match solve(Domain::MultiBlank, TEST_INPUT, Strategy::AStar) {
            Err(Error::Parse(ParseError::TileOutOfRange { tile: 7, max: 6 })) => {}
            other => panic!("expected a parse error, got {other:?}"),
        }
    }
}
