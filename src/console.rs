use anyhow::{anyhow, Result};
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdin, stdout, Write};

use tictactoe_ai::{Board, Cell, Error, Player};

/// Draws the board, showing the index of every empty cell
pub fn display(board: &Board) -> Result<()> {
    let mut stdout = stdout();
    let width = board.len().saturating_sub(1).to_string().len();

    stdout.queue(PrintStyledContent(style(String::from("\n"))))?;
    for (idx, cell) in board.cells().iter().enumerate() {
        let styled = match cell {
            Cell::PlayerX => style(format!("{:>1$}", "X", width))
                .attribute(Attribute::Bold)
                .with(Color::Red),
            Cell::PlayerO => style(format!("{:>1$}", "O", width))
                .attribute(Attribute::Bold)
                .with(Color::Yellow),
            Cell::Empty => style(format!("{:>1$}", idx, width)).with(Color::DarkGrey),
        };
        let separator = if (idx + 1) % board.size() == 0 { "\n" } else { " " };

        stdout
            .queue(PrintStyledContent(styled))?
            .queue(PrintStyledContent(style(String::from(separator))))?;
    }
    stdout.flush()?;
    Ok(())
}

/// Asks for a cell until the player names an empty one on the board
pub fn read_move(board: &Board, player: Player) -> Result<usize> {
    let stdin = stdin();
    loop {
        print!("Player {} move > ", player);
        stdout().flush()?;

        let mut input_str = String::new();
        if stdin.read_line(&mut input_str)? == 0 {
            return Err(anyhow!("input closed before player {} moved", player));
        }

        let index = match input_str.trim().parse::<usize>() {
            Err(_) => {
                println!("Invalid number: {}", input_str.trim());
                continue;
            }
            Ok(index) => index,
        };

        match board.check_index(index) {
            Ok(()) => return Ok(index),
            // try the move again
            Err(err @ Error::InvalidIndex { .. }) => println!("{}", err),
            Err(err) => return Err(err.into()),
        }
    }
}
