//! Headless simulation runner (default binary).
//!
//! Plays one game with the greedy placement policy and prints the result.
//! There is no timer, renderer or input here: every piece goes straight
//! through the engine's placement helper.
//!
//! Set `RUST_LOG=debug` to follow each placement.

use anyhow::Result;
use log::info;

use blockfall::autoplay;
use blockfall::cli::{board_text, engine_config, parse_sim_args, summary_text, USAGE};
use blockfall::engine::GameEngine;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(sim) = parse_sim_args(&args)? else {
        println!("{}", USAGE);
        return Ok(());
    };

    let config = engine_config(&sim)?;
    info!(
        "starting {}x{} game, seed {:?}, {:?} randomizer",
        config.rows, config.cols, config.seed, config.randomizer
    );
    let mut engine = GameEngine::from_config(config)?;

    let stats = autoplay::play(&mut engine, sim.pieces);

    print!(
        "{}",
        summary_text(
            engine.score(),
            engine.level(),
            engine.lines_cleared(),
            stats.pieces_placed,
            engine.is_game_over(),
        )
    );
    println!(
        "CLEARS single {} double {} triple {} tetris {}",
        stats.clears[1], stats.clears[2], stats.clears[3], stats.clears[4]
    );
    println!();
    print!("{}", board_text(engine.board()));
    Ok(())
}
