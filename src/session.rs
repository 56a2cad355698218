//! A single game of Connect 4, from the first tile to the result

use anyhow::{anyhow, Result};

use std::io::{BufRead, Write};

use crate::board::{Board, BoardError, Piece};
use crate::solver::Solver;
use crate::WIDTH;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    Won(Piece),
    Draw,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameState::Playing)
    }
}

/// Who controls the two players
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Mode {
    HumanVsHuman,
    /// Player one is human, player two is the computer
    HumanVsComputer,
}

/// The presentation layer driving a game
///
/// Column indices passed across this boundary are zero-indexed.
pub trait Host {
    /// Draws the board, highlighting the last column played into
    fn render(&mut self, board: &Board, highlight: Option<usize>) -> Result<()>;

    /// Asks the human controlling `piece` for a column
    fn column_choice(&mut self, piece: Piece) -> Result<usize>;

    /// Called when a human move was refused, before asking again
    fn rejected(&mut self, _error: &BoardError) {}

    /// Called after the computer played into `column`
    fn computer_moved(&mut self, _column: usize) {}
}

/// Parses a one-indexed column typed by a player into a zero-indexed column
pub fn parse_column(input: &str) -> Result<usize> {
    let input = input.trim();
    match input.parse::<usize>() {
        Ok(column @ 1..=WIDTH) => Ok(column - 1),
        Ok(_) => Err(anyhow!(
            "Invalid move, columns must be between 1 and {}",
            WIDTH
        )),
        Err(_) => Err(anyhow!("Invalid number: {}", input)),
    }
}

/// Prompts on `output` until a valid column is read from `input`
///
/// Fails once the input is closed.
pub fn read_column<R: BufRead, W: Write>(input: &mut R, output: &mut W, piece: Piece) -> Result<usize> {
    loop {
        write!(output, "{} move input > ", piece)?;
        output.flush()?;

        let mut input_str = String::new();
        if input.read_line(&mut input_str)? == 0 {
            return Err(anyhow!("input closed"));
        }

        match parse_column(&input_str) {
            Ok(column) => return Ok(column),
            Err(err) => writeln!(output, "{}", err)?,
        }
    }
}

/// The state of a game in progress
///
/// The session owns the authoritative board; the solver only ever sees copies.
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    mode: Mode,
    to_move: Piece,
    state: GameState,
    moves: Vec<usize>,
}

impl GameSession {
    pub fn new(mode: Mode, first: Piece) -> Self {
        Self {
            board: Board::new(),
            mode,
            to_move: first,
            state: GameState::Playing,
            moves: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn to_move(&self) -> Piece {
        self.to_move
    }

    /// Columns played so far, zero-indexed
    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    pub fn last_move(&self) -> Option<usize> {
        self.moves.last().copied()
    }

    pub fn is_computer_turn(&self) -> bool {
        self.mode == Mode::HumanVsComputer && self.to_move == Piece::PlayerTwo
    }

    /// Drops the current player's tile into `column` and updates the game state
    ///
    /// A refused move leaves the session unchanged.
    pub fn play(&mut self, column: usize) -> Result<GameState, BoardError> {
        if self.state.is_over() {
            return Err(BoardError::GameOver);
        }
        if !self.board.is_column_open(column)? {
            return Err(BoardError::ColumnFull(column));
        }
        let row = self.board.next_open_row(column)?;
        self.board.drop_piece(row, column, self.to_move)?;
        self.moves.push(column);

        self.state = if self.board.has_winning_line(self.to_move) {
            GameState::Won(self.to_move)
        } else if self.board.is_full() {
            GameState::Draw
        } else {
            GameState::Playing
        };
        self.to_move = self.to_move.opponent();

        Ok(self.state)
    }

    /// Lets the solver choose and play a move for the side to move
    pub fn play_computer(&mut self, solver: &mut Solver, verbose: bool) -> Result<usize, BoardError> {
        if self.state.is_over() {
            return Err(BoardError::GameOver);
        }
        let choice = if verbose {
            solver.choose_move_for_verbose(&self.board, self.to_move)
        } else {
            solver.choose_move_for(&self.board, self.to_move)
        };
        let column = choice.ok_or(BoardError::GameOver)?;
        self.play(column)?;
        Ok(column)
    }

    /// Runs the game loop until the game is won or drawn
    pub fn run<H: Host>(&mut self, host: &mut H, solver: &mut Solver, verbose: bool) -> Result<GameState> {
        loop {
            host.render(&self.board, self.last_move())?;

            if self.state.is_over() {
                return Ok(self.state);
            }

            if self.is_computer_turn() {
                let column = self.play_computer(solver, verbose)?;
                host.computer_moved(column);
            } else {
                let column = host.column_choice(self.to_move)?;
                if let Err(err) = self.play(column) {
                    host.rejected(&err);
                }
            }
        }
    }
}
