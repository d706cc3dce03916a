use std::{io::BufRead, thread, time::Instant};

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use tictally::{cli::GameArgs, Command, Game, MoveReport, Next, Snapshot};

/// Tic-tac-toe on the command line.
///
/// Type 1-9 to play a square (left to right, top to bottom), `r` for a new
/// game, `s` to clear the scores, `mode pvp` or `mode ai` to switch
/// opponents and `q` to quit.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    game: GameArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tictally::cli::env_filter())
        .with_writer(std::io::stderr)
        .init();

    let mut game = Game::new(cli.game.config());

    println!("Welcome to Tic Tac Toe!\n");
    println!("{} mode, X plays first!\n", game.mode());
    print_game(&game);

    let stdin = std::io::stdin().lock();
    for line in stdin.lines() {
        let line = line?;
        if matches!(line.trim(), "q" | "quit") {
            break;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{}", err);
                continue;
            }
        };

        match game.handle(command) {
            Ok(Some(report)) => {
                print_move(&report);
                if let Next::Computer(handle) = report.next {
                    print_game(&game);
                    thread::sleep(handle.remaining(Instant::now()));
                    if let Some(reply) = game.poll(handle.due()) {
                        print_move(&reply);
                    }
                }
            }
            Ok(None) => debug!(?command, "applied"),
            Err(err) => println!("{}", err),
        }

        print_game(&game);
    }

    Ok(())
}

fn print_move(report: &MoveReport) {
    println!("\n{}s took space {}:", report.mark, report.index + 1);
}

fn print_game(game: &Game) {
    let snapshot = Snapshot::of(game);
    println!("{}", game.state().board());
    println!("{}", snapshot.status);
    if let Some(line) = snapshot.highlight {
        let squares: Vec<String> = line.iter().map(|i| (i + 1).to_string()).collect();
        println!("Winning line: {}", squares.join("-"));
    }
    println!("[{}]\n", snapshot.scores);
}
