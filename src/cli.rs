//! Argument parsing and text output for `blockfall-sim`

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::core::Board;
use crate::engine::EngineConfig;
use crate::types::Cell;

pub const USAGE: &str =
    "usage: blockfall-sim [--seed N] [--rows R] [--cols C] [--pieces N] [--config FILE]";

pub const DEFAULT_PIECES: u32 = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimArgs {
    pub seed: Option<u64>,
    pub rows: Option<u32>,
    pub cols: Option<u32>,
    pub pieces: u32,
    pub config: Option<PathBuf>,
}

impl Default for SimArgs {
    fn default() -> Self {
        Self {
            seed: None,
            rows: None,
            cols: None,
            pieces: DEFAULT_PIECES,
            config: None,
        }
    }
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a String> {
    args.get(i)
        .ok_or_else(|| anyhow!("blockfall-sim: missing value for {}", flag))
}

fn parse_number<T: std::str::FromStr>(value: &str, flag: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| anyhow!("blockfall-sim: invalid {} value: {}", flag, value))
}

/// Parse the arguments after the program name
///
/// Returns `Ok(None)` when help was requested.
pub fn parse_sim_args(args: &[String]) -> Result<Option<SimArgs>> {
    let mut out = SimArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-h" | "--help" => return Ok(None),
            "--seed" => {
                i += 1;
                out.seed = Some(parse_number(flag_value(args, i, flag)?, flag)?);
            }
            "--rows" => {
                i += 1;
                out.rows = Some(parse_number(flag_value(args, i, flag)?, flag)?);
            }
            "--cols" => {
                i += 1;
                out.cols = Some(parse_number(flag_value(args, i, flag)?, flag)?);
            }
            "--pieces" => {
                i += 1;
                out.pieces = parse_number(flag_value(args, i, flag)?, flag)?;
            }
            "--config" => {
                i += 1;
                out.config = Some(PathBuf::from(flag_value(args, i, flag)?));
            }
            other => {
                return Err(anyhow!("blockfall-sim: unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(Some(out))
}

/// Build the engine configuration: config file first, then flag overrides
pub fn engine_config(args: &SimArgs) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            parse_engine_config(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.cols = cols;
    }
    config.validate()?;
    Ok(config)
}

/// Parse a JSON engine configuration; missing fields take their defaults
pub fn parse_engine_config(text: &str) -> Result<EngineConfig> {
    Ok(serde_json::from_str(text)?)
}

/// Board as text, one line per row: `.` for empty, the lowercase kind letter otherwise
pub fn board_text(board: &Board) -> String {
    let mut out = String::with_capacity((board.cols() as usize + 1) * board.rows() as usize);
    for row in board.iter_rows() {
        for cell in row {
            match cell {
                Cell::Empty => out.push('.'),
                Cell::Locked(kind) => out.push_str(kind.as_str()),
            }
        }
        out.push('\n');
    }
    out
}

/// Final summary printed after a run
pub fn summary_text(score: u64, level: u32, lines: u32, pieces: u32, game_over: bool) -> String {
    let state = if game_over { "GAME_OVER" } else { "PLAY" };
    format!(
        "SCORE {}\nLEVEL {}\nLINES {}\nPIECES {}\nSTATE {}\n",
        score, level, lines, pieces, state
    )
}
