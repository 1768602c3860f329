//! Command-line parsing for the arcade binary.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::core::{GameSettings, RoundConfig, TileConfig};
use crate::types::{GameKind, DEFAULT_DURATION_MS, TICK_MS};

pub const USAGE: &str = "\
usage: puzzle-arcade [list|tiles|memory|code|typing|lock] [options]

options:
  --duration-ms N   round countdown length (default 30000)
  --tick-ms N       countdown tick interval (default 16)
  --rows N          tile board rows
  --columns N       tile board columns
  --palette N       tile colors (1-6)
  --seed N          rng seed (default: from the clock)
  --analytics PATH  append round records as JSON lines
  --log PATH        write debug logs to PATH
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Help,
    Play(PlayOptions),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOptions {
    pub game: GameKind,
    pub round: RoundConfig,
    pub settings: GameSettings,
    pub seed: Option<u32>,
    pub analytics: Option<PathBuf>,
    pub log: Option<PathBuf>,
}

/// Parse arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<Command> {
    let mut game = GameKind::Tiles;
    let mut rest = args;

    if let Some(first) = args.first().filter(|a| !a.starts_with('-')) {
        match first.as_str() {
            "list" => return Ok(Command::List),
            "help" => return Ok(Command::Help),
            name => {
                game = GameKind::from_str(name).ok_or_else(|| anyhow!("unknown game: {}", name))?;
            }
        }
        rest = &args[1..];
    }

    let mut duration_ms = DEFAULT_DURATION_MS;
    let mut tick_ms = TICK_MS;
    let defaults = TileConfig::default();
    let (mut rows, mut columns, mut palette) =
        (defaults.rows(), defaults.columns(), defaults.palette_size());
    let mut seed = None;
    let mut analytics = None;
    let mut log = None;

    let mut i = 0usize;
    while i < rest.len() {
        let flag = rest[i].as_str();
        match flag {
            "-h" | "--help" => return Ok(Command::Help),
            "--duration-ms" => duration_ms = number(flag, rest.get(i + 1))?,
            "--tick-ms" => tick_ms = number(flag, rest.get(i + 1))?,
            "--rows" => rows = number(flag, rest.get(i + 1))?,
            "--columns" => columns = number(flag, rest.get(i + 1))?,
            "--palette" => palette = number(flag, rest.get(i + 1))?,
            "--seed" => seed = Some(number(flag, rest.get(i + 1))?),
            "--analytics" => analytics = Some(path(flag, rest.get(i + 1))?),
            "--log" => log = Some(path(flag, rest.get(i + 1))?),
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 2;
    }

    let round = RoundConfig::new(duration_ms)
        .context("invalid --duration-ms")?
        .with_tick_ms(tick_ms)
        .context("invalid --tick-ms")?;
    let tiles = TileConfig::new(rows, columns, palette).context("invalid tile board")?;

    Ok(Command::Play(PlayOptions {
        game,
        round,
        settings: GameSettings {
            tiles,
            ..GameSettings::default()
        },
        seed,
        analytics,
        log,
    }))
}

fn value<'a>(flag: &str, v: Option<&'a String>) -> Result<&'a String> {
    v.ok_or_else(|| anyhow!("missing value for {}", flag))
}

fn number<T: std::str::FromStr>(flag: &str, v: Option<&String>) -> Result<T> {
    let v = value(flag, v)?;
    v.parse::<T>()
        .map_err(|_| anyhow!("invalid {} value: {}", flag, v))
}

fn path(flag: &str, v: Option<&String>) -> Result<PathBuf> {
    value(flag, v).map(PathBuf::from)
}

/// `list` output: one game per line.
pub fn game_list() -> String {
    GameKind::ALL
        .iter()
        .map(|k| format!("{:<8}{}\n", k.as_str(), k.description()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn play(list: &[&str]) -> PlayOptions {
        match parse_args(&args(list)).unwrap() {
            Command::Play(opts) => opts,
            other => panic!("expected play, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults() {
        let opts = play(&[]);
        assert_eq!(opts.game, GameKind::Tiles);
        assert_eq!(opts.round, RoundConfig::default());
        assert_eq!(opts.settings, GameSettings::default());
        assert_eq!(opts.seed, None);
    }

    #[test]
    fn test_game_and_flags() {
        let opts = play(&[
            "memory",
            "--duration-ms",
            "5000",
            "--seed",
            "42",
            "--rows",
            "4",
            "--columns",
            "5",
            "--palette",
            "2",
            "--analytics",
            "rounds.jsonl",
        ]);
        assert_eq!(opts.game, GameKind::Memory);
        assert_eq!(opts.round.duration_ms(), 5000);
        assert_eq!(opts.seed, Some(42));
        assert_eq!(opts.settings.tiles, TileConfig::new(4, 5, 2).unwrap());
        assert_eq!(opts.analytics, Some(PathBuf::from("rounds.jsonl")));
        assert_eq!(opts.log, None);
    }

    #[test]
    fn test_tick_interval() {
        assert_eq!(play(&[]).round.tick_ms(), TICK_MS);
        let opts = play(&["lock", "--tick-ms", "50"]);
        assert_eq!(opts.round.tick_ms(), 50);
        assert_eq!(opts.round.duration_ms(), DEFAULT_DURATION_MS);
    }

    #[test]
    fn test_list_and_help() {
        assert_eq!(parse_args(&args(&["list"])).unwrap(), Command::List);
        assert_eq!(parse_args(&args(&["help"])).unwrap(), Command::Help);
        assert_eq!(parse_args(&args(&["code", "--help"])).unwrap(), Command::Help);
        assert!(game_list().lines().count() == GameKind::ALL.len());
    }

    #[test]
    fn test_errors() {
        assert!(parse_args(&args(&["pinball"])).is_err());
        assert!(parse_args(&args(&["--duration-ms"])).is_err());
        assert!(parse_args(&args(&["--duration-ms", "soon"])).is_err());
        assert!(parse_args(&args(&["--duration-ms", "0"])).is_err());
        assert!(parse_args(&args(&["--tick-ms", "0"])).is_err());
        assert!(parse_args(&args(&["--tick-ms", "-5"])).is_err());
        assert!(parse_args(&args(&["--palette", "9"])).is_err());
        assert!(parse_args(&args(&["--verbose"])).is_err());
    }
}
