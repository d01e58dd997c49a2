//! Winning line generation and win detection

use tracing::debug;

use crate::board::{rotate_index, Board, Cell, GameState};
use crate::error::{Error, Result};
use crate::{MAX_BOARD_SIZE, MIN_RUN};

/// A run of cell indices, ascending along its direction
pub type Line = Vec<usize>;

/// The four directions a winning line can run in
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Direction {
    Row,
    Column,
    /// Top left to bottom right
    DownDiagonal,
    /// Top right to bottom left
    UpDiagonal,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Row,
        Direction::Column,
        Direction::DownDiagonal,
        Direction::UpDiagonal,
    ];

    /// The index step between neighbouring cells of a line on an `size`×`size` board
    pub fn stride(&self, size: usize) -> usize {
        match self {
            Direction::Row => 1,
            Direction::Column => size,
            Direction::DownDiagonal => size + 1,
            Direction::UpDiagonal => size - 1,
        }
    }

    /// Whether a run of `run` cells starting at `start` stays on the board
    /// without wrapping across a row boundary
    pub fn admits(&self, size: usize, run: usize, start: usize) -> bool {
        let (row, col) = (start / size, start % size);
        let fits_right = col + run <= size;
        let fits_down = row + run <= size;
        match self {
            Direction::Row => fits_right,
            Direction::Column => fits_down,
            Direction::DownDiagonal => fits_right && fits_down,
            Direction::UpDiagonal => col + 1 >= run && fits_down,
        }
    }
}

/// The complete set of winning lines for one board geometry
#[derive(Clone, Debug)]
pub struct WinningLines {
    lines: Vec<Line>,
    size: usize,
    run: usize,
}

impl WinningLines {
    /// Enumerates every winning line of `run` cells on a `size`×`size` board
    pub fn generate(size: usize, run: usize) -> Result<Self> {
        if run < MIN_RUN || run > size || size > MAX_BOARD_SIZE {
            return Err(Error::InvalidGeometry { size, run });
        }

        let mut lines: Vec<Line> = Vec::new();
        for direction in Direction::ALL.iter() {
            let stride = direction.stride(size);
            for start in 0..size * size {
                if direction.admits(size, run, start) {
                    lines.push((0..run).map(|step| start + step * stride).collect());
                }
            }
        }
        debug!(size, run, lines = lines.len(), "generated winning lines");

        Ok(Self { lines, size, run })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// The number of marks in a row needed to win
    pub fn run(&self) -> usize {
        self.run
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// Returns the owner of the first fully claimed line, or `Cell::Empty`
    ///
    /// # Panics
    /// If `board` is smaller than the board these lines were generated for
    pub fn winner(&self, board: &Board) -> Cell {
        let cells = board.cells();
        for line in self.lines.iter() {
            let first = cells[line[0]];
            if !first.is_empty() && line[1..].iter().all(|&index| cells[index] == first) {
                return first;
            }
        }
        Cell::Empty
    }

    pub fn state(&self, board: &Board) -> GameState {
        match self.winner(board) {
            Cell::PlayerX => GameState::PlayerXWin,
            Cell::PlayerO => GameState::PlayerOWin,
            Cell::Empty if board.is_full() => GameState::Draw,
            Cell::Empty => GameState::Playing,
        }
    }

    /// The same lines with every cell turned a quarter turn clockwise
    pub fn rotated(&self) -> Self {
        let lines = self
            .lines
            .iter()
            .map(|line| {
                line.iter()
                    .map(|&index| rotate_index(self.size, index))
                    .collect::<Line>()
            })
            .collect();
        Self {
            lines,
            size: self.size,
            run: self.run,
        }
    }

    pub(crate) fn check_board(&self, board: &Board) -> Result<()> {
        if board.size() != self.size {
            return Err(Error::GeometryMismatch {
                board: board.size(),
                lines: self.size,
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a WinningLines {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Generates the winning lines for a `size`×`size` board and a run of `run`
pub fn generate_winning_lines(size: usize, run: usize) -> Result<WinningLines> {
    WinningLines::generate(size, run)
}

/// The owner of a completed line on `board`, or `Cell::Empty`
///
/// Fails with `Error::GeometryMismatch` when `lines` belong to another board size.
pub fn evaluate_winner(board: &Board, lines: &WinningLines) -> Result<Cell> {
    lines.check_board(board)?;
    Ok(lines.winner(board))
}

/// True when no cell of `board` is empty
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}
