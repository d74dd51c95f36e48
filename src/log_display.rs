use log::{debug, info};

use crate::device::Display;
use crate::error::SnekError;
use crate::geometry::Pos;
use crate::state::GameState;

/// Headless display that writes every frame to the log. Handy with a bot
/// driving the snake.
#[derive(Debug, Default)]
pub struct LogDisplay {
    frames: u64,
    eggs: u64,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn eggs(&self) -> u64 {
        self.eggs
    }
}

impl Display for LogDisplay {
    fn render(&mut self, game: &GameState) -> Result<(), SnekError> {
        self.frames += 1;
        let segments: Vec<Pos> = game.snake().segments().collect();
        debug!(
            "Frame {}: {:?} snake {:?} egg {} score {}",
            self.frames,
            game.status(),
            segments,
            game.egg(),
            game.score()
        );
        Ok(())
    }

    fn on_eat_egg(&mut self) {
        self.eggs += 1;
        info!("Egg #{} eaten", self.eggs);
    }

    fn teardown(&mut self) -> Result<(), SnekError> {
        info!("Log display closed after {} frames", self.frames);
        Ok(())
    }
}
