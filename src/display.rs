use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdin, stdout, Write};
use std::thread;
use std::time::Duration;

use connect4_minimax::board::{Board, BoardError, Cell, Piece};
use connect4_minimax::session::{read_column, Host};
use connect4_minimax::{HEIGHT, WIDTH};

/// Plays through the terminal, reading one-indexed columns from stdin
pub struct TerminalHost {
    /// print the board as plain text instead of drawing it with colours
    pub plain: bool,
    /// pause before the computer's tile is shown
    pub delay: Duration,
}

impl TerminalHost {
    fn draw(&self, board: &Board, highlight: Option<usize>) -> Result<()> {
        let mut stdout = stdout();

        // marker above the last column played into
        let marker: String = (0..WIDTH)
            .map(|column| if Some(column) == highlight { 'v' } else { ' ' })
            .collect();
        stdout.queue(PrintStyledContent(style(marker + "\n").attribute(Attribute::Bold)))?;

        let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
        stdout.queue(PrintStyledContent(style(cols + "\n")))?;
        for _ in 0..HEIGHT {
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.flush()?;

        let (origin_x, origin_y) = crossterm::cursor::position()?;

        for row in 0..HEIGHT {
            for column in 0..WIDTH {
                let (pos_x, pos_y) = (origin_x + column as u16, origin_y - row as u16);
                let color = match board.get(row, column)? {
                    Cell::PlayerOne => Color::Red,
                    Cell::PlayerTwo => Color::Yellow,
                    Cell::Empty => Color::DarkBlue,
                };

                stdout
                    .queue(MoveTo(pos_x, pos_y))?
                    .queue(PrintStyledContent(
                        style("O")
                            .attribute(Attribute::Bold)
                            .on(Color::DarkBlue)
                            .with(color),
                    ))?;
            }
        }
        stdout
            .queue(MoveTo(origin_x + WIDTH as u16, origin_y))?
            .queue(PrintStyledContent(style("\n")))?;
        stdout.flush()?;
        Ok(())
    }
}

impl Host for TerminalHost {
    fn render(&mut self, board: &Board, highlight: Option<usize>) -> Result<()> {
        if self.plain {
            if let Some(column) = highlight {
                println!("Last move: {}", column + 1);
            }
            print!("{}", board);
            stdout().flush()?;
            Ok(())
        } else {
            self.draw(board, highlight)
        }
    }

    fn column_choice(&mut self, piece: Piece) -> Result<usize> {
        let stdin = stdin();
        let mut input = stdin.lock();
        read_column(&mut input, &mut stdout(), piece)
    }

    fn rejected(&mut self, error: &BoardError) {
        match error {
            BoardError::InvalidColumn(_) => {
                println!("Invalid move, columns must be between 1 and {}", WIDTH)
            }
            BoardError::ColumnFull(column) => println!("Invalid move, column {} full", column + 1),
            _ => println!("{}", error),
        }
    }

    fn computer_moved(&mut self, column: usize) {
        thread::sleep(self.delay);
        println!("Computer plays column {}", column + 1);
    }
}
