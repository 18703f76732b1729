//! Dots and boxes on a square grid of boxes
//!
//! Players alternately draw one line between adjacent dots. Drawing the
//! fourth side of a box claims it for the player who drew it. Roles strictly
//! alternate every ply: completing a box does not grant an extra move. The
//! game ends when every line is drawn and the player with more boxes wins.

use std::fmt;

use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    identifiers::StateKey,
    ports::{Evaluator, Game, Role},
};

/// Largest supported grid, in boxes per side
pub const MAX_SIZE: usize = 5;

/// Direction of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A move: draw one line.
///
/// Horizontal lines are indexed `row in 0..=size`, `col in 0..size`; vertical
/// lines `row in 0..size`, `col in 0..=size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    pub orientation: Orientation,
    pub row: usize,
    pub col: usize,
}

impl Line {
    pub fn horizontal(row: usize, col: usize) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            row,
            col,
        }
    }

    pub fn vertical(row: usize, col: usize) -> Self {
        Self {
            orientation: Orientation::Vertical,
            row,
            col,
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.orientation {
            Orientation::Horizontal => 'h',
            Orientation::Vertical => 'v',
        };
        write!(f, "{tag}({}, {})", self.row, self.col)
    }
}

/// A dots-and-boxes position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotsAndBoxes {
    size: usize,
    h_lines: Vec<bool>,
    v_lines: Vec<bool>,
    boxes: Vec<Option<Role>>,
}

impl DotsAndBoxes {
    /// Empty grid of `size` x `size` boxes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] unless `1 <= size <= MAX_SIZE`.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 || size > MAX_SIZE {
            return Err(Error::InvalidDimensions {
                rows: size,
                cols: size,
                reason: format!("grid size must be between 1 and {MAX_SIZE}"),
            });
        }

        Ok(Self {
            size,
            h_lines: vec![false; (size + 1) * size],
            v_lines: vec![false; size * (size + 1)],
            boxes: vec![None; size * size],
        })
    }

    /// Random position reached by alternating play of an even number of
    /// lines, about two thirds of the grid, starting with the maximizer.
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self> {
        let mut game = Self::new(size)?;
        let mut lines = game.legal_moves();
        lines.shuffle(rng);

        let count = lines.len() * 2 / 3;
        let mut role = Role::Maximizer;
        for line in lines.iter().take(count - count % 2) {
            game.apply_move(line, role);
            role = role.opponent();
        }

        Ok(game)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of lines on the grid
    pub fn line_count(&self) -> usize {
        self.h_lines.len() + self.v_lines.len()
    }

    /// Whether `line` has been drawn
    pub fn is_drawn(&self, line: &Line) -> bool {
        match line.orientation {
            Orientation::Horizontal => self.h_lines[line.row * self.size + line.col],
            Orientation::Vertical => self.v_lines[line.row * (self.size + 1) + line.col],
        }
    }

    /// Owner of the box at `(row, col)`
    pub fn owner(&self, row: usize, col: usize) -> Option<Role> {
        self.boxes[row * self.size + col]
    }

    /// Boxes claimed by `role`
    pub fn score(&self, role: Role) -> usize {
        self.boxes.iter().filter(|&&owner| owner == Some(role)).count()
    }

    /// Draw `line` for `role`, checking that it is legal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] on a full grid and [`Error::IllegalMove`]
    /// for a line off the grid or already drawn.
    pub fn play(&mut self, line: Line, role: Role) -> Result<()> {
        if self.is_terminal() {
            return Err(Error::GameOver);
        }
        let (rows, cols) = self.line_bounds(line.orientation);
        if line.row >= rows || line.col >= cols {
            return Err(Error::IllegalMove {
                mv: line.to_string(),
                reason: "line is off the grid".to_string(),
            });
        }
        if self.is_drawn(&line) {
            return Err(Error::IllegalMove {
                mv: line.to_string(),
                reason: "line already drawn".to_string(),
            });
        }
        self.apply_move(&line, role);
        Ok(())
    }

    fn line_bounds(&self, orientation: Orientation) -> (usize, usize) {
        match orientation {
            Orientation::Horizontal => (self.size + 1, self.size),
            Orientation::Vertical => (self.size, self.size + 1),
        }
    }

    fn set_line(&mut self, line: &Line, drawn: bool) {
        let slot = match line.orientation {
            Orientation::Horizontal => &mut self.h_lines[line.row * self.size + line.col],
            Orientation::Vertical => &mut self.v_lines[line.row * (self.size + 1) + line.col],
        };
        *slot = drawn;
    }

    fn is_complete(&self, row: usize, col: usize) -> bool {
        self.is_drawn(&Line::horizontal(row, col))
            && self.is_drawn(&Line::horizontal(row + 1, col))
            && self.is_drawn(&Line::vertical(row, col))
            && self.is_drawn(&Line::vertical(row, col + 1))
    }

    /// Boxes bordered by `line`: one or two
    fn adjacent_boxes(&self, line: &Line) -> Vec<(usize, usize)> {
        let mut boxes = Vec::with_capacity(2);
        match line.orientation {
            Orientation::Horizontal => {
                if line.row > 0 {
                    boxes.push((line.row - 1, line.col));
                }
                if line.row < self.size {
                    boxes.push((line.row, line.col));
                }
            }
            Orientation::Vertical => {
                if line.col > 0 {
                    boxes.push((line.row, line.col - 1));
                }
                if line.col < self.size {
                    boxes.push((line.row, line.col));
                }
            }
        }
        boxes
    }
}

impl Default for DotsAndBoxes {
    fn default() -> Self {
        let size = 3;
        Self {
            size,
            h_lines: vec![false; (size + 1) * size],
            v_lines: vec![false; size * (size + 1)],
            boxes: vec![None; size * size],
        }
    }
}

impl Game for DotsAndBoxes {
    type Move = Line;
    type Key = StateKey;

    fn is_terminal(&self) -> bool {
        self.h_lines.iter().chain(&self.v_lines).all(|&drawn| drawn)
    }

    fn winner(&self, _to_move: Role) -> Option<Role> {
        if !self.is_terminal() {
            return None;
        }
        let max = self.score(Role::Maximizer);
        let min = self.score(Role::Minimizer);
        match max.cmp(&min) {
            std::cmp::Ordering::Greater => Some(Role::Maximizer),
            std::cmp::Ordering::Less => Some(Role::Minimizer),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Horizontal lines first, then vertical, each in row-major order
    fn legal_moves(&self) -> Vec<Line> {
        let size = self.size;
        let horizontal = (0..=size)
            .flat_map(|row| (0..size).map(move |col| Line::horizontal(row, col)));
        let vertical = (0..size)
            .flat_map(|row| (0..=size).map(move |col| Line::vertical(row, col)));

        horizontal
            .chain(vertical)
            .filter(|line| !self.is_drawn(line))
            .collect()
    }

    fn apply_move(&mut self, mv: &Line, role: Role) {
        debug_assert!(!self.is_drawn(mv), "{mv} already drawn");
        self.set_line(mv, true);
        for (row, col) in self.adjacent_boxes(mv) {
            if self.boxes[row * self.size + col].is_none() && self.is_complete(row, col) {
                self.boxes[row * self.size + col] = Some(role);
            }
        }
    }

    fn undo_move(&mut self, mv: &Line, _role: Role) {
        debug_assert!(self.is_drawn(mv), "{mv} not drawn");
        self.set_line(mv, false);
        // A box next to the erased line can only have been claimed by it
        for (row, col) in self.adjacent_boxes(mv) {
            self.boxes[row * self.size + col] = None;
        }
    }

    fn state_key(&self, to_move: Role) -> StateKey {
        let lines: String = self
            .h_lines
            .iter()
            .chain(&self.v_lines)
            .map(|&drawn| if drawn { '1' } else { '0' })
            .collect();
        let boxes: String = self
            .boxes
            .iter()
            .map(|owner| owner.map(Role::symbol).unwrap_or('.'))
            .collect();
        StateKey::new(format!("{lines}|{boxes}_{}", to_move.symbol()))
    }
}

impl fmt::Display for DotsAndBoxes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size;
        for row in 0..=size {
            let mut dots = String::from("+");
            for col in 0..size {
                dots.push_str(if self.is_drawn(&Line::horizontal(row, col)) {
                    "---"
                } else {
                    "   "
                });
                dots.push('+');
            }
            write!(f, "{dots}")?;

            if row == size {
                break;
            }

            let mut walls = String::new();
            for col in 0..=size {
                walls.push(if self.is_drawn(&Line::vertical(row, col)) {
                    '|'
                } else {
                    ' '
                });
                if col < size {
                    let owner = self.owner(row, col).map(Role::symbol).unwrap_or(' ');
                    walls.push_str(&format!(" {owner} "));
                }
            }
            write!(f, "\n{}\n", walls.trim_end())?;
        }
        Ok(())
    }
}

/// Box difference from the maximizer's point of view
#[derive(Debug, Clone, Copy, Default)]
pub struct DotsAndBoxesHeuristic;

impl Evaluator<DotsAndBoxes> for DotsAndBoxesHeuristic {
    fn heuristic(&self, game: &DotsAndBoxes, _to_move: Role) -> i32 {
        game.score(Role::Maximizer) as i32 - game.score(Role::Minimizer) as i32
    }
}
