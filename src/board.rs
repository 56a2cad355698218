//! The game board, tile placement and line detection

use std::fmt;

use crate::{HEIGHT, WIDTH, WINDOW};

/// A player, used both to mark tiles and as the perspective of an evaluation
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Piece {
    PlayerOne,
    PlayerTwo,
}

impl Piece {
    pub fn opponent(self) -> Self {
        match self {
            Piece::PlayerOne => Piece::PlayerTwo,
            Piece::PlayerTwo => Piece::PlayerOne,
        }
    }

    /// The player number as shown to humans
    pub fn number(self) -> usize {
        match self {
            Piece::PlayerOne => 1,
            Piece::PlayerTwo => 2,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn piece(&self) -> Option<Piece> {
        match self {
            Cell::PlayerOne => Some(Piece::PlayerOne),
            Cell::PlayerTwo => Some(Piece::PlayerTwo),
            Cell::Empty => None,
        }
    }
}

impl From<Piece> for Cell {
    fn from(piece: Piece) -> Self {
        match piece {
            Piece::PlayerOne => Cell::PlayerOne,
            Piece::PlayerTwo => Cell::PlayerTwo,
        }
    }
}

/// Whether an error comes from bad caller input or from an illegal game state
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ErrorKind {
    InvalidInput,
    InvalidState,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum BoardError {
    #[error("column {0} out of range, columns must be between 0 and {}", WIDTH - 1)]
    InvalidColumn(usize),

    #[error("row {0} out of range, rows must be between 0 and {}", HEIGHT - 1)]
    InvalidRow(usize),

    #[error("could not parse '{0}' as a valid move")]
    Parse(char),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("cell at row {row}, column {column} is already occupied")]
    CellOccupied { row: usize, column: usize },

    #[error("the game is already over")]
    GameOver,
}

impl BoardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BoardError::InvalidColumn(_) | BoardError::InvalidRow(_) | BoardError::Parse(_) => {
                ErrorKind::InvalidInput
            }
            BoardError::ColumnFull(_) | BoardError::CellOccupied { .. } | BoardError::GameOver => {
                ErrorKind::InvalidState
            }
        }
    }
}

/// A line along which four tiles can be aligned
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// bottom-left to top-right
    DiagonalUp,
    /// top-left to bottom-right
    DiagonalDown,
}

static DIRECTIONS: [Direction; 4] = [
    Direction::Horizontal,
    Direction::Vertical,
    Direction::DiagonalUp,
    Direction::DiagonalDown,
];

impl Direction {
    pub fn all() -> impl Iterator<Item = Direction> {
        DIRECTIONS.iter().copied()
    }

    /// (row step, column step) between consecutive cells of a window
    pub fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalUp => (1, 1),
            Direction::DiagonalDown => (-1, 1),
        }
    }

    /// All cells from which a full window fits inside the board in this direction
    pub fn window_starts(self) -> impl Iterator<Item = (usize, usize)> {
        let (d_row, d_column) = self.step();
        let reach = WINDOW as isize - 1;
        (0..HEIGHT)
            .flat_map(|row| (0..WIDTH).map(move |column| (row, column)))
            .filter(move |&(row, column)| {
                let end_row = row as isize + d_row * reach;
                let end_column = column as isize + d_column * reach;
                end_row >= 0
                    && end_row < HEIGHT as isize
                    && end_column >= 0
                    && end_column < WIDTH as isize
            })
    }
}

/// A 6x7 Connect 4 board
///
/// Row 0 is the bottom of the board. Tiles only ever land on the lowest empty
/// row of a column, so a column's tiles always form an unbroken run from row 0.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Board {
    cells: [[Cell; WIDTH]; HEIGHT],
}

impl Board {
    /// Creates an empty board
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; WIDTH]; HEIGHT],
        }
    }

    /// Creates a board from a string of one-indexed columns, alternating
    /// players starting with player one
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self, BoardError> {
        let mut board = Self::new();
        let mut piece = Piece::PlayerOne;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    board.play(column - 1, piece)?;
                    piece = piece.opponent();
                }
                _ => return Err(BoardError::Parse(column_char)),
            }
        }
        Ok(board)
    }

    pub fn get(&self, row: usize, column: usize) -> Result<Cell, BoardError> {
        if column >= WIDTH {
            return Err(BoardError::InvalidColumn(column));
        }
        if row >= HEIGHT {
            return Err(BoardError::InvalidRow(row));
        }
        Ok(self.cells[row][column])
    }

    // unchecked read for coordinates already known to be on the board
    pub(crate) fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[row][column]
    }

    pub fn is_column_open(&self, column: usize) -> Result<bool, BoardError> {
        if column >= WIDTH {
            return Err(BoardError::InvalidColumn(column));
        }
        Ok(self.cells[HEIGHT - 1][column].is_empty())
    }

    /// Returns the lowest empty row of a column
    pub fn next_open_row(&self, column: usize) -> Result<usize, BoardError> {
        if column >= WIDTH {
            return Err(BoardError::InvalidColumn(column));
        }
        (0..HEIGHT)
            .find(|&row| self.cells[row][column].is_empty())
            .ok_or(BoardError::ColumnFull(column))
    }

    /// Places a tile at a cell obtained from [`Board::next_open_row`]
    ///
    /// Rejected writes leave the board unchanged.
    pub fn drop_piece(&mut self, row: usize, column: usize, piece: Piece) -> Result<(), BoardError> {
        if column >= WIDTH {
            return Err(BoardError::InvalidColumn(column));
        }
        if row >= HEIGHT {
            return Err(BoardError::InvalidRow(row));
        }
        if !self.cells[row][column].is_empty() {
            return Err(BoardError::CellOccupied { row, column });
        }
        self.place(row, column, piece);
        Ok(())
    }

    /// Drops a tile into a column, returning the row it landed on
    pub fn play(&mut self, column: usize, piece: Piece) -> Result<usize, BoardError> {
        let row = self.next_open_row(column)?;
        self.place(row, column, piece);
        Ok(row)
    }

    // unchecked write, callers guarantee (row, column) is the next open cell
    pub(crate) fn place(&mut self, row: usize, column: usize, piece: Piece) {
        self.cells[row][column] = piece.into();
    }

    /// Columns which can still take a tile, left to right
    pub fn open_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..WIDTH).filter(move |&column| self.cells[HEIGHT - 1][column].is_empty())
    }

    /// Legal moves as (column, landing row) pairs, left to right
    pub(crate) fn open_moves(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.open_columns().filter_map(move |column| {
            (0..HEIGHT)
                .find(|&row| self.cells[row][column].is_empty())
                .map(|row| (column, row))
        })
    }

    // only valid for starts produced by `Direction::window_starts`
    pub(crate) fn window(&self, row: usize, column: usize, direction: Direction) -> [Cell; WINDOW] {
        let (d_row, d_column) = direction.step();
        let mut window = [Cell::Empty; WINDOW];
        for (i, cell) in window.iter_mut().enumerate() {
            let r = (row as isize + d_row * i as isize) as usize;
            let c = (column as isize + d_column * i as isize) as usize;
            *cell = self.cells[r][c];
        }
        window
    }

    /// Every window of four cells in every direction
    pub fn windows(&self) -> impl Iterator<Item = [Cell; WINDOW]> + '_ {
        Direction::all().flat_map(move |direction| {
            direction
                .window_starts()
                .map(move |(row, column)| self.window(row, column, direction))
        })
    }

    pub fn has_winning_line(&self, piece: Piece) -> bool {
        let target = Cell::from(piece);
        self.windows()
            .any(|window| window.iter().all(|&cell| cell == target))
    }

    pub fn is_full(&self) -> bool {
        self.cells[HEIGHT - 1].iter().all(|cell| !cell.is_empty())
    }

    pub fn is_terminal(&self) -> bool {
        self.has_winning_line(Piece::PlayerOne)
            || self.has_winning_line(Piece::PlayerTwo)
            || self.is_full()
    }

    pub fn winner(&self) -> Option<Piece> {
        if self.has_winning_line(Piece::PlayerTwo) {
            Some(Piece::PlayerTwo)
        } else if self.has_winning_line(Piece::PlayerOne) {
            Some(Piece::PlayerOne)
        } else {
            None
        }
    }

    /// The same position with the players' tiles exchanged
    pub fn swapped(&self) -> Self {
        let mut board = *self;
        for cell in board.cells.iter_mut().flat_map(|row| row.iter_mut()) {
            *cell = match cell.piece() {
                Some(piece) => piece.opponent().into(),
                None => Cell::Empty,
            };
        }
        board
    }

    pub fn num_tiles(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| !cell.is_empty())
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

// top row first, so the board reads the way it stands
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter().rev() {
            for cell in row.iter() {
                let symbol = match cell {
                    Cell::PlayerOne => 'X',
                    Cell::PlayerTwo => 'O',
                    Cell::Empty => '.',
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        let columns: String = (1..=WIDTH).map(|x| x.to_string()).collect();
        writeln!(f, "{}", columns)
    }
}
