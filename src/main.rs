use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cubetris::constants::DEFAULT_STARTING_PIECES;
use cubetris::{Game, GameConfig, OriginalPiece, SpecialIndex, SquareId, TurnResult};

#[derive(Parser, Debug)]
#[command(name = "cubetris", about = "Place tetrominoes on the corner of a cube")]
struct Args {
    /// Pieces in the inventory at the start of each game.
    #[arg(long, default_value_t = DEFAULT_STARTING_PIECES)]
    pieces: u32,

    /// Seed for the piece generator. Omit for a random session.
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter, e.g. `debug` or `cubetris=trace`. RUST_LOG wins if set.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Hover(SquareId),
    Unhover,
    Rotate { clockwise: bool },
    Toggle,
    Place,
    New,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            bail!("empty command");
        };
        let command = match name {
            "hover" | "h" => {
                let mut coord = || -> Result<usize> {
                    let word = words.next().ok_or_else(|| anyhow!("hover needs <face> <row> <col>"))?;
                    word.parse().with_context(|| format!("bad coordinate `{word}`"))
                };
                let (face, row, col) = (coord()?, coord()?, coord()?);
                Command::Hover(
                    SquareId::new(face, row, col)
                        .ok_or_else(|| anyhow!("({face},{row},{col}) is off the board"))?,
                )
            }
            "unhover" => Command::Unhover,
            "rotate" | "r" => Command::Rotate {
                clockwise: !matches!(words.next(), Some("ccw")),
            },
            "toggle" | "t" => Command::Toggle,
            "place" | "p" => Command::Place,
            "new" => Command::New,
            "help" | "?" => Command::Help,
            "quit" | "q" => Command::Quit,
            other => bail!("unknown command `{other}`, try `help`"),
        };
        Ok(command)
    }
}

const HELP: &str = "\
commands:
  hover <face> <row> <col>   move the piece over a square
  unhover                    take the piece off the board
  rotate [ccw]               rotate the piece (clockwise by default)
  toggle                     switch the special square between golden and destroyer
  place                      place the piece
  new                        start a new game
  quit";

fn describe(piece: Option<OriginalPiece>) -> String {
    match piece {
        Some(OriginalPiece { shape, special }) => match special {
            SpecialIndex::Center => format!("{shape:?}*"),
            SpecialIndex::Offset(i) => format!("{shape:?}{}", i + 1),
        },
        None => "-".to_string(),
    }
}

fn print_status(out: &mut impl Write, game: &Game) -> io::Result<()> {
    let queue = game.queue();
    writeln!(out, "{}", game.board())?;
    writeln!(
        out,
        "score {}  remaining {}  special {}  hand {}  next {} {}",
        game.score(),
        game.remaining(),
        if game.use_gold() { "golden" } else { "destroyer" },
        describe(queue.current),
        describe(queue.next[0]),
        describe(queue.next[1]),
    )?;
    if let Some(preview) = game.preview() {
        let targets: Vec<String> = preview.targets().map(|t| t.to_string()).collect();
        writeln!(out, "preview {:?} {}", preview.status, targets.join(" "))?;
    }
    if let Some(over) = game.game_over() {
        writeln!(out, "game over: {over} (type `new` to play again)")?;
    }
    Ok(())
}

fn print_turn(out: &mut impl Write, result: &TurnResult) -> io::Result<()> {
    let spread: Vec<String> = result.spread.iter().map(|s| s.to_string()).collect();
    let cleared: Vec<String> = result
        .cleared
        .iter()
        .map(|c| format!("{}:{}", c.square, c.previous.glyph()))
        .collect();
    writeln!(out, "spread  [{}]", spread.join(" "))?;
    writeln!(out, "cleared [{}]", cleared.join(" "))?;
    writeln!(out, "+{} points", result.score_delta)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&args.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut game = Game::new(GameConfig {
        starting_pieces: args.pieces,
        seed: args.seed,
    });

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    print_status(&mut out, &game)?;
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err:#}")?;
                continue;
            }
        };
        match command {
            Command::Hover(id) => game.set_hover(Some(id)),
            Command::Unhover => game.set_hover(None),
            Command::Rotate { clockwise } => game.rotate(clockwise),
            Command::Toggle => game.toggle_special_type(),
            Command::Place => match game.place() {
                Ok(result) => print_turn(&mut out, &result)?,
                Err(err) => writeln!(out, "not placed: {err}")?,
            },
            Command::New => game.new_game(),
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Command::Quit => break,
        }
        print_status(&mut out, &game)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(
            "hover 1 2 0".parse::<Command>().unwrap(),
            Command::Hover(SquareId::new(1, 2, 0).unwrap())
        );
        assert_eq!("r ccw".parse::<Command>().unwrap(), Command::Rotate { clockwise: false });
        assert_eq!("rotate".parse::<Command>().unwrap(), Command::Rotate { clockwise: true });
        assert_eq!("p".parse::<Command>().unwrap(), Command::Place);
    }

    #[test]
    fn rejects_bad_input() {
        assert!("hover 3 0 0".parse::<Command>().is_err());
        assert!("hover 0 x 0".parse::<Command>().is_err());
        assert!("hover 0 0".parse::<Command>().is_err());
        assert!("jump".parse::<Command>().is_err());
    }

    #[test]
    fn describes_pieces() {
        assert_eq!(describe(None), "-");
        let piece = OriginalPiece::new(cubetris::ShapeId::T, SpecialIndex::Offset(0));
        assert_eq!(describe(Some(piece)), "T1");
    }
}
