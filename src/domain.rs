use std::fmt::{Display, Write};

use smallvec::SmallVec;

use crate::board::{Board, BLANK, CELLS, SIDE};
use crate::error::ParseError;

/// Direction a blank cell moves in. Declaration order is the tie-break
/// priority: `Up < Right < Down < Left`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

pub const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Right,
    Direction::Down,
    Direction::Left,
];

impl Direction {
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn letter(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Right => 'R',
            Direction::Down => 'D',
            Direction::Left => 'L',
        }
    }

    /// Whether a blank at `index` can move this way without leaving the grid.
    pub fn is_legal_at(self, index: usize) -> bool {
        let (row, col) = (index / SIDE, index % SIDE);
        match self {
            Direction::Up => row > 0,
            Direction::Right => col < SIDE - 1,
            Direction::Down => row < SIDE - 1,
            Direction::Left => col > 0,
        }
    }

    // only valid when `is_legal_at(index)` holds
    fn target(self, index: usize) -> usize {
        match self {
            Direction::Up => index - SIDE,
            Direction::Right => index + 1,
            Direction::Down => index + SIDE,
            Direction::Left => index - 1,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char(self.letter())
    }
}

/// A move of the blank at cell `blank` one step in `direction`.
///
/// In the single-blank domain `blank` is always the only blank cell, but it
/// is carried anyway so both domains share one action type.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Action {
    pub blank: usize,
    pub direction: Direction,
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.direction, self.blank)
    }
}

/// Up to three blanks with up to four moves each.
pub type Actions = SmallVec<[Action; 12]>;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum Domain {
    /// Tiles 1–8 and one blank; goal `123456780`.
    #[value(name = "single")]
    SingleBlank,
    /// Tiles 1–6 and three blanks; goal `123456000`.
    #[value(name = "multi")]
    MultiBlank,
}

impl Domain {
    pub fn blank_count(self) -> usize {
        match self {
            Domain::SingleBlank => 1,
            Domain::MultiBlank => 3,
        }
    }

    pub fn max_tile(self) -> u8 {
        (CELLS - self.blank_count()) as u8
    }

    /// Tiles in row-major order, then the blanks.
    pub fn goal(self) -> Board {
        let mut cells = [BLANK; CELLS];
        for tile in 1..=self.max_tile() {
            cells[tile as usize - 1] = tile;
        }

        Board::new(cells)
    }

    pub fn goal_test(self, board: &Board) -> bool {
        *board == self.goal()
    }

    pub fn parse(self, text: &str) -> Result<Board, ParseError> {
        let board: Board = text.parse()?;
        self.validate(&board)?;
        Ok(board)
    }

    /// Checks that `board` holds exactly the tiles `1..=max_tile` once each
    /// and the right number of blanks.
    pub fn validate(self, board: &Board) -> Result<(), ParseError> {
        let max = self.max_tile();
        let mut seen = [false; CELLS];
        let mut blanks = 0;
        for &c in board.cells() {
            if c == BLANK {
                blanks += 1;
            } else if c > max {
                return Err(ParseError::TileOutOfRange { tile: c, max });
            } else if std::mem::replace(&mut seen[c as usize], true) {
                return Err(ParseError::DuplicateTile { tile: c });
            }
        }

        if blanks != self.blank_count() {
            return Err(ParseError::BlankCount {
                expected: self.blank_count(),
                found: blanks,
            });
        }

        Ok(())
    }

    /// Every legal action, grouped by blank cell (ascending index) and
    /// ordered `Up, Right, Down, Left` within a group.
    pub fn actions(self, board: &Board) -> Actions {
        let mut out = Actions::new();
        for blank in board.blanks().take(self.blank_count()) {
            for direction in DIRECTIONS {
                if direction.is_legal_at(blank) {
                    out.push(Action { blank, direction });
                }
            }
        }

        out
    }

    /// Applies `action` by swapping its blank with the neighbouring cell.
    /// `action` must come from [`Domain::actions`] for this board.
    pub fn result(self, board: &Board, action: Action) -> Board {
        debug_assert_eq!(board[action.blank], BLANK);
        board.swapped(action.blank, action.direction.target(action.blank))
    }

    /// The single-blank puzzle only reaches the goal from boards with an even
    /// number of inversions. With three blanks every arrangement is reachable.
    pub fn is_solvable(self, board: &Board) -> bool {
        match self {
            Domain::SingleBlank => board.inversions() % 2 == 0,
            Domain::MultiBlank => true,
        }
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Domain::SingleBlank => "single-blank",
            Domain::MultiBlank => "multi-blank",
        })
    }
}

#[cfg(test)]
mod test {
    use itertools::Itertools;

    use super::*;

    fn directions_at(board: &str) -> (usize, String) {
        let board = Domain::SingleBlank.parse(board).unwrap();
        let actions = Domain::SingleBlank.actions(&board);
        assert!(actions.iter().all(|a| a.blank == actions[0].blank));

        (
            actions[0].blank,
            actions.iter().map(|a| a.direction.letter()).collect(),
        )
    }

    #[test]
    fn action_table_matches_grid_edges() {
        assert_eq!(directions_at("012345678"), (0, "RD".to_string()));
        assert_eq!(directions_at("102345678"), (1, "RDL".to_string()));
        assert_eq!(directions_at("120345678"), (2, "DL".to_string()));
        assert_eq!(directions_at("123045678"), (3, "URD".to_string()));
        assert_eq!(directions_at("123405678"), (4, "URDL".to_string()));
        assert_eq!(directions_at("123450678"), (5, "UDL".to_string()));
        assert_eq!(directions_at("123456078"), (6, "UR".to_string()));
        assert_eq!(directions_at("123456708"), (7, "URL".to_string()));
        assert_eq!(directions_at("123456780"), (8, "UL".to_string()));
    }

    #[test]
    fn result_swaps_blank_with_neighbour() {
        let domain = Domain::SingleBlank;
        let board = domain.parse("124506738").unwrap();
        let step = |direction| domain.result(&board, Action { blank: 4, direction }).to_string();

        assert_eq!(step(Direction::Up), "104526738");
        assert_eq!(step(Direction::Right), "124560738");
        assert_eq!(step(Direction::Down), "124536708");
        assert_eq!(step(Direction::Left), "124056738");
    }

    #[test]
    fn goals() {
        assert_eq!(Domain::SingleBlank.goal().to_string(), "123456780");
        assert_eq!(Domain::MultiBlank.goal().to_string(), "123456000");
        assert!(Domain::MultiBlank.goal_test(&"123456000".parse().unwrap()));
        assert!(!Domain::SingleBlank.goal_test(&"123456708".parse().unwrap()));
    }

    #[test]
    fn multi_blank_actions_only_move_blanks() {
        let domain = Domain::MultiBlank;
        let board = domain.parse("102340560").unwrap();
        let actions = domain.actions(&board);

        // corner 8 has two moves, edges 1 and 5 have three each
        assert_eq!(actions.len(), 8);
        for action in &actions {
            assert_eq!(board[action.blank], BLANK);
        }

        let groups: Vec<usize> = actions.iter().map(|a| a.blank).dedup().collect();
        assert_eq!(groups, vec![1, 5, 8]);
    }

    #[test]
    fn validation_rejects_bad_boards() {
        assert_eq!(
            Domain::SingleBlank.parse("123456788"),
            Err(ParseError::DuplicateTile { tile: 8 })
        );
        assert_eq!(
            Domain::SingleBlank.parse("123456700"),
            Err(ParseError::BlankCount {
                expected: 1,
                found: 2
            })
        );
        assert_eq!(
            Domain::MultiBlank.parse("123456780"),
            Err(ParseError::TileOutOfRange { tile: 7, max: 6 })
        );
        assert_eq!(
            Domain::SingleBlank.parse("123456789"),
            Err(ParseError::TileOutOfRange { tile: 9, max: 8 })
        );
        assert_eq!(
            Domain::SingleBlank.parse("12345678"),
            Err(ParseError::SymbolCount { found: 8 })
        );
    }

    #[test]
    fn parity_decides_single_blank_solvability() {
        let domain = Domain::SingleBlank;
        assert!(domain.is_solvable(&domain.parse("124506738").unwrap()));
        assert!(!domain.is_solvable(&domain.parse("123456870").unwrap()));
    }
}
