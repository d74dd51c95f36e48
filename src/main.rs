use clap::Parser;
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::{Config, WriteLogger};
use std::fs::File;

use snekroom::config::Settings;
use snekroom::{registry, GameLoop, GameState, SnekError};

fn main() -> Result<(), SnekError> {
    let settings = Settings::parse();

    // Set up logging before anything else; the terminal belongs to the display
    WriteLogger::init(
        settings.log_level.into(),
        Config::default(),
        File::create(&settings.log_file)?,
    )?;

    info!("Starting snekroom with {:?}", settings);

    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let room = settings.room()?;
    let mut game = GameState::centered(
        room,
        settings.length,
        settings.egg_placement.into(),
        &mut rng,
    )?;
    let mut display = registry::create_display(&settings.display)?;
    let mut input = registry::create_input(&settings.input, settings.seed)?;

    let mut game_loop = GameLoop::with_rng(settings.tick_rate(), rng);

    // The loop restores the terminal before any of these get reported
    match game_loop.run(&mut game, &mut input, &mut display) {
        Ok(summary) => {
            info!("Finished: {:?}", summary);
            println!("Game over! Score: {} after {} ticks", summary.score, summary.ticks);
        }
        Err(SnekError::Quit) => {
            info!("Player quit with score {}", game.score());
            println!("Bye! Score: {}", game.score());
        }
        Err(e) => {
            error!("Game aborted: {}", e);
            return Err(e);
        }
    }

    Ok(())
}
