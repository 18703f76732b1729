//! Connect-four on a small gravity board
//!
//! Discs drop to the lowest empty row of a column. Four in a row
//! horizontally, vertically or diagonally wins. The maximizer plays `X`, the
//! minimizer `O`. The default board is 4x4.

use std::fmt;

use rand::{Rng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    identifiers::StateKey,
    ports::{Evaluator, Game, Role},
};

/// Discs in a row needed to win
pub const CONNECT: usize = 4;

/// Largest supported board side
pub const MAX_SIDE: usize = 16;

/// A move: drop a disc into this column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Column(pub usize);

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column {}", self.0)
    }
}

/// Connect-four board, row 0 at the top
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectFour {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Role>>,
    lines: Vec<[usize; CONNECT]>,
}

impl ConnectFour {
    /// Create an empty board.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either side is zero or larger
    /// than [`MAX_SIDE`].
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 || rows > MAX_SIDE || cols > MAX_SIDE {
            return Err(Error::InvalidDimensions {
                rows,
                cols,
                reason: format!("each side must be between 1 and {MAX_SIDE}"),
            });
        }

        Ok(Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
            lines: winning_lines(rows, cols),
        })
    }

    /// The classic 6x7 board
    pub fn standard() -> Self {
        Self {
            rows: 6,
            cols: 7,
            cells: vec![None; 42],
            lines: winning_lines(6, 7),
        }
    }

    /// Parse a board written row by row, top row first, rows separated by `/`.
    ///
    /// `X` is the maximizer, `O` the minimizer and `.` an empty cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use gamesearch::games::ConnectFour;
    ///
    /// let board = ConnectFour::from_string("..../..../O.../XX.O").unwrap();
    /// assert_eq!(board.rows(), 4);
    /// assert_eq!(board.disc_count(), 4);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns error if rows have different lengths, a character is not a
    /// cell, or a disc floats above an empty cell.
    pub fn from_string(s: &str) -> Result<Self> {
        let rows: Vec<Vec<char>> = s
            .split(['/', '\n'])
            .map(|row| row.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        let cols = rows.first().map(Vec::len).unwrap_or(0);
        let mut board = Self::new(rows.len(), cols)?;

        for (r, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::InvalidBoardLength {
                    expected: cols,
                    got: row.len(),
                    context: s.to_string(),
                });
            }
            for (c, &ch) in row.iter().enumerate() {
                board.cells[r * cols + c] = parse_cell(ch).ok_or_else(|| {
                    Error::InvalidCellCharacter {
                        character: ch,
                        position: r * cols + c,
                        context: s.to_string(),
                    }
                })?;
            }
        }

        for c in 0..cols {
            let mut empty_below = false;
            for r in (0..board.rows).rev() {
                match board.cells[r * cols + c] {
                    None => empty_below = true,
                    Some(_) if empty_below => {
                        return Err(Error::FloatingPiece {
                            column: c,
                            context: s.to_string(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        Ok(board)
    }

    /// Play a random legal game of `plies` plies (rounded down to even, so
    /// the maximizer is to move), never making a move that ends the game.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, plies: usize, rng: &mut R) -> Result<Self> {
        let mut board = Self::new(rows, cols)?;
        let mut played = Vec::new();
        let mut role = Role::Maximizer;

        for _ in 0..plies - plies % 2 {
            let quiet: Vec<Column> = board
                .legal_moves()
                .into_iter()
                .filter(|mv| {
                    board.apply_move(mv, role);
                    let quiet = !board.is_terminal();
                    board.undo_move(mv, role);
                    quiet
                })
                .collect();
            let Some(&mv) = quiet.choose(rng) else {
                break;
            };
            board.apply_move(&mv, role);
            played.push((mv, role));
            role = role.opponent();
        }

        if played.len() % 2 == 1 {
            if let Some((mv, role)) = played.pop() {
                board.undo_move(&mv, role);
            }
        }

        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Disc at `(row, col)`, row 0 at the top
    pub fn get(&self, row: usize, col: usize) -> Option<Role> {
        self.cells[row * self.cols + col]
    }

    /// Number of discs on the board
    pub fn disc_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    /// Whether every column is full
    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|c| self.cells[c].is_some())
    }

    /// Whether `role` has four in a row
    pub fn has_won(&self, role: Role) -> bool {
        self.lines
            .iter()
            .any(|line| line.iter().all(|&idx| self.cells[idx] == Some(role)))
    }

    /// Drop a disc for `role`, checking that the move is legal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] on a finished game and
    /// [`Error::IllegalMove`] for a full or missing column.
    pub fn play(&mut self, column: Column, role: Role) -> Result<()> {
        if self.is_terminal() {
            return Err(Error::GameOver);
        }
        if column.0 >= self.cols || self.cells[column.0].is_some() {
            return Err(Error::IllegalMove {
                mv: column.to_string(),
                reason: "column is full or off the board".to_string(),
            });
        }
        self.apply_move(&column, role);
        Ok(())
    }

    /// Canonical text encoding without the role suffix
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&cell| cell_char(cell)).collect()
    }

    fn landing_row(&self, col: usize) -> Option<usize> {
        (0..self.rows)
            .rev()
            .find(|&r| self.cells[r * self.cols + col].is_none())
    }

    fn top_row(&self, col: usize) -> Option<usize> {
        (0..self.rows).find(|&r| self.cells[r * self.cols + col].is_some())
    }

    fn line_cells(&self, line: &[usize; CONNECT]) -> [Option<Role>; CONNECT] {
        line.map(|idx| self.cells[idx])
    }
}

impl Default for ConnectFour {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 4,
            cells: vec![None; 16],
            lines: winning_lines(4, 4),
        }
    }
}

impl Game for ConnectFour {
    type Move = Column;
    type Key = StateKey;

    fn is_terminal(&self) -> bool {
        self.has_won(Role::Maximizer) || self.has_won(Role::Minimizer) || self.is_full()
    }

    fn winner(&self, _to_move: Role) -> Option<Role> {
        if self.has_won(Role::Maximizer) {
            Some(Role::Maximizer)
        } else if self.has_won(Role::Minimizer) {
            Some(Role::Minimizer)
        } else {
            None
        }
    }

    fn legal_moves(&self) -> Vec<Column> {
        (0..self.cols)
            .filter(|&c| self.cells[c].is_none())
            .map(Column)
            .collect()
    }

    fn apply_move(&mut self, mv: &Column, role: Role) {
        let row = self.landing_row(mv.0);
        debug_assert!(row.is_some(), "apply_move on full {mv}");
        if let Some(row) = row {
            self.cells[row * self.cols + mv.0] = Some(role);
        }
    }

    fn undo_move(&mut self, mv: &Column, role: Role) {
        let row = self.top_row(mv.0);
        debug_assert!(row.is_some(), "undo_move on empty {mv}");
        if let Some(row) = row {
            let idx = row * self.cols + mv.0;
            debug_assert_eq!(self.cells[idx], Some(role));
            self.cells[idx] = None;
        }
    }

    fn state_key(&self, to_move: Role) -> StateKey {
        StateKey::new(format!("{}_{}", self.encode(), to_move.symbol()))
    }
}

impl fmt::Display for ConnectFour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            let row: Vec<String> = (0..self.cols)
                .map(|c| cell_char(self.get(r, c)).to_string())
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        let indices: Vec<String> = (0..self.cols).map(|c| (c % 10).to_string()).collect();
        write!(f, "{}", indices.join(" "))
    }
}

/// Centre control plus open four-cell windows
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectFourHeuristic;

impl ConnectFourHeuristic {
    const CENTRE_BONUS: i32 = 3;
    const FOUR: i32 = 100;
    const OPEN_THREE: i32 = 5;
    const OPEN_TWO: i32 = 2;
    const OPPONENT_OPEN_THREE: i32 = -4;

    fn score_window(window: &[Option<Role>; CONNECT], role: Role) -> i32 {
        let own = window.iter().filter(|&&cell| cell == Some(role)).count();
        let theirs = window
            .iter()
            .filter(|&&cell| cell == Some(role.opponent()))
            .count();
        let empty = CONNECT - own - theirs;

        let mut score = match (own, empty) {
            (4, _) => Self::FOUR,
            (3, 1) => Self::OPEN_THREE,
            (2, 2) => Self::OPEN_TWO,
            _ => 0,
        };
        if theirs == 3 && empty == 1 {
            score += Self::OPPONENT_OPEN_THREE;
        }
        score
    }
}

impl Evaluator<ConnectFour> for ConnectFourHeuristic {
    fn heuristic(&self, game: &ConnectFour, _to_move: Role) -> i32 {
        let role = Role::Maximizer;
        let centre = game.cols / 2;
        let centre_discs = (0..game.rows)
            .filter(|&r| game.get(r, centre) == Some(role))
            .count() as i32;

        let windows: i32 = game
            .lines
            .iter()
            .map(|line| Self::score_window(&game.line_cells(line), role))
            .sum();

        centre_discs * Self::CENTRE_BONUS + windows
    }
}

fn parse_cell(c: char) -> Option<Option<Role>> {
    match c {
        '.' | '·' | '_' => Some(None),
        'X' | 'x' => Some(Some(Role::Maximizer)),
        'O' | 'o' | '0' => Some(Some(Role::Minimizer)),
        _ => None,
    }
}

fn cell_char(cell: Option<Role>) -> char {
    cell.map(Role::symbol).unwrap_or('.')
}

/// Every run of [`CONNECT`] cells: rows, columns and both diagonals
fn winning_lines(rows: usize, cols: usize) -> Vec<[usize; CONNECT]> {
    let directions: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];
    let span = CONNECT as isize - 1;
    let mut lines = Vec::new();

    for r in 0..rows as isize {
        for c in 0..cols as isize {
            for (dr, dc) in directions {
                let (end_r, end_c) = (r + dr * span, c + dc * span);
                if end_r < 0 || end_r >= rows as isize || end_c >= cols as isize {
                    continue;
                }
                let line: [usize; CONNECT] = std::array::from_fn(|i| {
                    let i = i as isize;
                    ((r + dr * i) * cols as isize + (c + dc * i)) as usize
                });
                lines.push(line);
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn four_by_four_has_ten_lines() {
        // 4 rows + 4 columns + 2 diagonals
        assert_eq!(ConnectFour::default().lines.len(), 10);
        // 24 horizontal + 21 vertical + 12 + 12 diagonal on 6x7
        assert_eq!(ConnectFour::standard().lines.len(), 69);
    }

    #[test]
    fn discs_stack_from_the_bottom() {
        let mut board = ConnectFour::default();
        board.apply_move(&Column(1), Role::Maximizer);
        board.apply_move(&Column(1), Role::Minimizer);
        assert_eq!(board.get(3, 1), Some(Role::Maximizer));
        assert_eq!(board.get(2, 1), Some(Role::Minimizer));

        board.undo_move(&Column(1), Role::Minimizer);
        assert_eq!(board.get(2, 1), None);
        assert_eq!(board.get(3, 1), Some(Role::Maximizer));
    }

    #[test]
    fn full_column_is_not_legal() {
        let board = ConnectFour::from_string("O.../X.../O.../X...").unwrap();
        assert_eq!(board.legal_moves(), vec![Column(1), Column(2), Column(3)]);
    }

    #[test]
    fn detects_every_direction() {
        let row = ConnectFour::from_string("..../..../..../XXXX").unwrap();
        let column = ConnectFour::from_string("O.../O.../O.../O...").unwrap();
        let rising = ConnectFour::from_string("...X/..XO/.XOO/XOOX").unwrap();
        let falling = ConnectFour::from_string("O.../XO../XXO./XXXO").unwrap();

        assert_eq!(row.winner(Role::Minimizer), Some(Role::Maximizer));
        assert_eq!(column.winner(Role::Maximizer), Some(Role::Minimizer));
        assert_eq!(rising.winner(Role::Minimizer), Some(Role::Maximizer));
        assert_eq!(falling.winner(Role::Maximizer), Some(Role::Minimizer));
        assert!(row.is_terminal() && column.is_terminal());
    }

    #[test]
    fn winner_does_not_depend_on_who_is_to_move() {
        let board = ConnectFour::from_string("..../..../OOO./XXXX").unwrap();
        assert_eq!(board.winner(Role::Maximizer), Some(Role::Maximizer));
        assert_eq!(board.winner(Role::Minimizer), Some(Role::Maximizer));
    }

    #[test]
    fn full_board_without_line_is_a_draw() {
        let board = ConnectFour::from_string("XXOO/OOXX/XXOO/OOXX").unwrap();
        assert!(board.is_terminal());
        assert_eq!(board.winner(Role::Maximizer), None);
    }

    #[test]
    fn rejects_floating_discs_and_bad_rows() {
        assert!(matches!(
            ConnectFour::from_string("X.../..../..../...."),
            Err(Error::FloatingPiece { column: 0, .. })
        ));
        assert!(matches!(
            ConnectFour::from_string("..../.../..../...."),
            Err(Error::InvalidBoardLength { .. })
        ));
        assert!(matches!(
            ConnectFour::from_string("..../..../..../Z..."),
            Err(Error::InvalidCellCharacter { character: 'Z', .. })
        ));
        assert!(ConnectFour::new(0, 4).is_err());
    }

    #[test]
    fn play_checks_legality() {
        let mut board = ConnectFour::from_string("O.../X.../O.../X...").unwrap();
        assert!(board.play(Column(0), Role::Maximizer).is_err());
        assert!(board.play(Column(9), Role::Maximizer).is_err());
        assert!(board.play(Column(2), Role::Maximizer).is_ok());

        let mut won = ConnectFour::from_string("..../..../..../XXXX").unwrap();
        assert!(matches!(won.play(Column(0), Role::Minimizer), Err(Error::GameOver)));
    }

    #[test]
    fn state_key_includes_role() {
        let board = ConnectFour::default();
        assert_ne!(board.state_key(Role::Maximizer), board.state_key(Role::Minimizer));
        assert_eq!(board.state_key(Role::Maximizer), "................_X");
    }

    #[test]
    fn heuristic_rewards_centre_and_open_threes() {
        let empty = ConnectFour::default();
        assert_eq!(ConnectFourHeuristic.heuristic(&empty, Role::Maximizer), 0);

        // One X in the centre column (col 2): centre bonus only
        let centre = ConnectFour::from_string("..../..../..../..X.").unwrap();
        assert_eq!(ConnectFourHeuristic.heuristic(&centre, Role::Minimizer), 3);

        // Open three on the bottom row for O costs X four points
        let threat = ConnectFour::from_string("..../..../..../OOO.").unwrap();
        assert_eq!(ConnectFourHeuristic.heuristic(&threat, Role::Maximizer), -4);
    }

    #[test]
    fn random_positions_are_quiet_and_even() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let board = ConnectFour::random(4, 4, 7, &mut rng).unwrap();
            assert!(!board.is_terminal());
            assert_eq!(board.disc_count() % 2, 0);
            assert!(ConnectFour::from_string(&board.to_string_rows()).is_ok());
        }
    }

    impl ConnectFour {
        fn to_string_rows(&self) -> String {
            let encoded = self.encode();
            let chars: Vec<char> = encoded.chars().collect();
            chars
                .chunks(self.cols)
                .map(|row| row.iter().collect::<String>())
                .collect::<Vec<_>>()
                .join("/")
        }
    }
}
