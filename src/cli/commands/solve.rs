//! Solve command - query the exact search engine for a position

use anyhow::Result;
use clap::Parser;

use crate::{game::Board, search};

#[derive(Parser, Debug)]
#[command(about = "Compute the optimal move for a position")]
pub struct SolveArgs {
    /// Board literal, e.g. "XO..X...O" (optionally with a _X/_O suffix
    /// to set the side to move)
    pub board: String,

    /// Depth bound for the search (defaults to full depth)
    #[arg(long)]
    pub depth: Option<usize>,
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let mut board = Board::from_string(&args.board)?;
    println!("{board}");
    println!("Side to move: {:?}", board.to_move());

    if board.is_terminal() {
        println!("Position is terminal: {:?}", board.status());
        return Ok(());
    }

    let for_player = board.to_move();
    let depth = args.depth.unwrap_or_else(|| board.legal_moves().len());
    let result = search::best_move(&mut board, depth, for_player)?;

    match (result.position, result.row(), result.col()) {
        (Some(pos), Some(row), Some(col)) => {
            let verdict = match result.score {
                score if score > 0 => "win",
                score if score < 0 => "loss",
                _ => "draw",
            };
            println!(
                "Best move: position {pos} (row {row}, col {col}), score {} ({verdict} with optimal play)",
                result.score
            );
        }
        _ => println!("No move within the depth bound; score {}", result.score),
    }

    Ok(())
}
