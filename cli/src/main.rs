use anyhow::{Context, Result};
use cavern_core::*;
use clap::{Parser, Subcommand};

mod level;
mod render;

use level::LevelArgs;
use render::{render_board, render_status};

#[derive(Parser, Debug)]
#[command(version, about = "Generate and explore cavern levels", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    level: LevelArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a level and reveal its start
    Show {
        /// Show every cell instead of what the player knows
        #[arg(long)]
        reveal_all: bool,

        /// Print the board as JSON
        #[arg(long)]
        json: bool,
    },
    /// Walk the player through a sequence of targets, given as x,y
    Walk {
        #[arg(required = true, value_parser = parse_coords)]
        targets: Vec<Coord2>,
    },
}

fn parse_coords(text: &str) -> Result<Coord2, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {:?}", text))?;
    let x = x.trim().parse().map_err(|_| format!("bad x in {:?}", text))?;
    let y = y.trim().parse().map_err(|_| format!("bad y in {:?}", text))?;
    Ok((x, y))
}

fn show(mut board: Board, reveal_all: bool, json: bool) -> Result<()> {
    board.reveal_start();
    if reveal_all {
        board.reveal_all();
    }

    if json {
        let text = serde_json::to_string_pretty(&board).context("Failed to serialize board")?;
        println!("{}", text);
    } else {
        print!("{}", render_board(&board));
        println!("{}", render_status(&board));
    }
    Ok(())
}

fn walk(mut board: Board, targets: &[Coord2]) -> Result<()> {
    board.reveal_start();

    for &target in targets {
        board
            .grid()
            .validate_coords(target)
            .with_context(|| format!("Target {:?} is outside the board", target))?;

        let path = board.move_player(target);
        if path.is_empty() {
            println!("cannot move to {:?}", target);
            continue;
        }

        let outcome = board.reveal(board.player());
        println!("{:?} -> {:?}: {:?}", path[0], board.player(), outcome);
        if outcome.is_terminal() {
            board.reveal_all();
            break;
        }
    }

    print!("{}", render_board(&board));
    println!("{}", render_status(&board));
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let board = args.level.generate()?;
    log::debug!("Board ready, state {:?}", board.state());

    match args.command {
        Command::Show { reveal_all, json } => show(board, reveal_all, json),
        Command::Walk { targets } => walk(board, &targets),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coords_parse_from_pairs() {
        assert_eq!(parse_coords("3,4"), Ok((3, 4)));
        assert_eq!(parse_coords(" 10 , 2 "), Ok((10, 2)));
        assert!(parse_coords("3").is_err());
        assert!(parse_coords("3,-1").is_err());
        assert!(parse_coords("300,1").is_err());
    }

    #[test]
    fn level_flags_apply_to_subcommands() {
        let args = Args::try_parse_from([
            "cavern", "walk", "2,3", "4,4", "--width", "12", "--entrance", "east", "--seed", "5",
        ])
        .unwrap();

        let config = args.level.level_config().unwrap();
        assert_eq!(config.size, (12, 10));
        assert_eq!(config.entrance, Compass::East);
        assert_eq!(args.level.seed(), 5);
        assert!(matches!(args.command, Command::Walk { ref targets } if targets == &[(2, 3), (4, 4)]));
    }

    #[test]
    fn bad_entrance_is_a_usage_error() {
        assert!(Args::try_parse_from(["cavern", "show", "--entrance", "up"]).is_err());
    }

    #[test]
    fn commands_run_on_a_shop() {
        let args = LevelArgs {
            shop: true,
            ..Default::default()
        };

        show(args.generate().unwrap(), false, true).unwrap();
        walk(args.generate().unwrap(), &[(7, 5), (1, 1)]).unwrap();
        assert!(walk(args.generate().unwrap(), &[(40, 1)]).is_err());
    }
}
