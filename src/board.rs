use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use crate::error::{Error, IndexFault, Result};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    PlayerX,
    PlayerO,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The player owning this cell, if any
    pub fn player(&self) -> Option<Player> {
        match self {
            Cell::PlayerX => Some(Player::X),
            Cell::PlayerO => Some(Player::O),
            Cell::Empty => None,
        }
    }

    fn symbol(&self) -> char {
        match self {
            Cell::PlayerX => 'X',
            Cell::PlayerO => 'O',
            Cell::Empty => '-',
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// The mark this player leaves on the board
    pub fn cell(&self) -> Cell {
        match self {
            Player::X => Cell::PlayerX,
            Player::O => Cell::PlayerO,
        }
    }

    pub fn opponent(&self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cell().symbol())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    PlayerXWin,
    PlayerOWin,
    Draw,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameState::Playing)
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            GameState::PlayerXWin => Some(Player::X),
            GameState::PlayerOWin => Some(Player::O),
            _ => None,
        }
    }
}

/// Maps a cell index to its position after turning an `n`×`n` board a quarter
/// turn clockwise
pub fn rotate_index(size: usize, index: usize) -> usize {
    let (row, col) = (index / size, index % size);
    col * size + (size - 1 - row)
}

/// A square board of cells, stored row by row from the top left
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Board {
    cells: Vec<Cell>,
    size: usize,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![Cell::Empty; size * size],
            size,
        }
    }

    /// The width (and height) of the board
    pub fn size(&self) -> usize {
        self.size
    }

    /// The total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when no cell holds a mark
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Indices of the empty cells in ascending order
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
    }

    pub fn num_moves(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Checks that `index` names an empty cell on this board
    pub fn check_index(&self, index: usize) -> Result<()> {
        match self.cells.get(index) {
            None => Err(Error::InvalidIndex {
                index,
                reason: IndexFault::OutOfRange {
                    cells: self.cells.len(),
                },
            }),
            Some(cell) if !cell.is_empty() => Err(Error::InvalidIndex {
                index,
                reason: IndexFault::Occupied,
            }),
            Some(_) => Ok(()),
        }
    }

    /// Places a mark for `player`, refusing out of range or taken cells
    pub fn play_checked(&mut self, index: usize, player: Player) -> Result<()> {
        self.check_index(index)?;
        self.cells[index] = player.cell();
        Ok(())
    }

    /// Places `cell` at `index` for as long as the returned guard lives
    ///
    /// The square gets its previous value back when the guard is dropped, so
    /// every exit from the scope that holds it restores the board.
    pub(crate) fn speculate(&mut self, index: usize, cell: Cell) -> Placement<'_> {
        let previous = std::mem::replace(&mut self.cells[index], cell);
        Placement {
            board: self,
            index,
            previous,
        }
    }

    /// This board turned a quarter turn clockwise
    pub fn rotated(&self) -> Self {
        let mut rotated = Self::new(self.size);
        for (index, &cell) in self.cells.iter().enumerate() {
            rotated.cells[rotate_index(self.size, index)] = cell;
        }
        rotated
    }
}

/// A speculative move, undone when dropped
pub struct Placement<'a> {
    board: &'a mut Board,
    index: usize,
    previous: Cell,
}

impl Deref for Placement<'_> {
    type Target = Board;

    fn deref(&self) -> &Self::Target {
        self.board
    }
}

impl DerefMut for Placement<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.board
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        self.board.cells[self.index] = self.previous;
    }
}

impl FromStr for Board {
    type Err = Error;

    /// Parses cells row by row, `X` and `O` for marks and `-` or `.` for empty
    /// squares. Whitespace is ignored.
    fn from_str(s: &str) -> Result<Self> {
        let mut cells = Vec::new();
        for (position, character) in s.chars().filter(|c| !c.is_whitespace()).enumerate() {
            cells.push(match character.to_ascii_uppercase() {
                'X' => Cell::PlayerX,
                'O' => Cell::PlayerO,
                '-' | '.' => Cell::Empty,
                _ => return Err(Error::InvalidCell { character, position }),
            });
        }

        let size = (0..=crate::MAX_BOARD_SIZE)
            .find(|size| size * size == cells.len())
            .filter(|&size| size > 0)
            .ok_or(Error::BoardLength { len: cells.len() })?;
        Ok(Self { cells, size })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size.max(1)) {
            let line: String = row.iter().map(Cell::symbol).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
