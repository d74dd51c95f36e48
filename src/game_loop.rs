use log::{debug, info, warn};
use rand::rngs::ThreadRng;
use rand::Rng;
use std::thread;
use std::time::{Duration, Instant};

use crate::device::{Display, InputDevice};
use crate::error::SnekError;
use crate::state::GameState;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickRate {
    /// Ticks per second.
    Hz(f64),
    /// Run ticks back to back.
    Unbounded,
}

impl TickRate {
    /// Anything that is not a positive, finite rate means unbounded.
    pub fn from_hz(hz: f64) -> Self {
        if hz.is_finite() && hz > 0.0 {
            TickRate::Hz(hz)
        } else {
            TickRate::Unbounded
        }
    }

    pub fn period(&self) -> Option<Duration> {
        match *self {
            // Periods too long for a Duration saturate
            TickRate::Hz(hz) if hz.is_finite() && hz > 0.0 => {
                Some(Duration::try_from_secs_f64(1.0 / hz).unwrap_or(Duration::MAX))
            }
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoopSummary {
    pub ticks: u64,
    pub score: u32,
}

/// Drives a [`GameState`] at a fixed rate: render, read input, step, sleep.
pub struct GameLoop<R = ThreadRng> {
    rate: TickRate,
    rng: R,
}

impl GameLoop<ThreadRng> {
    pub fn new(rate: TickRate) -> Self {
        GameLoop::with_rng(rate, rand::thread_rng())
    }
}

impl<R: Rng> GameLoop<R> {
    /// `rng` decides where eggs land.
    pub fn with_rng(rate: TickRate, rng: R) -> Self {
        GameLoop { rate, rng }
    }

    pub fn rate(&self) -> TickRate {
        self.rate
    }

    /// Runs until the game is over, then renders the final frame once more.
    ///
    /// The display is set up first, then the input. Every device whose setup
    /// succeeded is torn down exactly once afterwards, also when a render,
    /// input poll or the other setup failed. The first error encountered is
    /// returned.
    pub fn run<I, D>(
        &mut self,
        game: &mut GameState,
        input: &mut I,
        display: &mut D,
    ) -> Result<LoopSummary, SnekError>
    where
        I: InputDevice + ?Sized,
        D: Display + ?Sized,
    {
        let (display_ready, input_ready, mut result) = match display.setup() {
            Err(e) => (false, false, Err(e)),
            Ok(()) => match input.setup() {
                Err(e) => (true, false, Err(e)),
                Ok(()) => (true, true, self.run_ticks(game, input, display)),
            },
        };

        let mut teardowns = Vec::with_capacity(2);
        if input_ready {
            teardowns.push(input.teardown());
        }
        if display_ready {
            teardowns.push(display.teardown());
        }
        for outcome in teardowns {
            if let Err(e) = outcome {
                warn!("Device teardown failed: {}", e);
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        result
    }

    fn run_ticks<I, D>(
        &mut self,
        game: &mut GameState,
        input: &mut I,
        display: &mut D,
    ) -> Result<LoopSummary, SnekError>
    where
        I: InputDevice + ?Sized,
        D: Display + ?Sized,
    {
        info!("Game loop starting at {:?}", self.rate);
        let period = self.rate.period();
        let mut ticks = 0;

        while !game.is_over() {
            let tick_start = Instant::now();

            display.render(game)?;

            let actions = input.get_actions(game)?;
            game.process_actions(actions);

            let result = game.step(&mut self.rng);
            ticks += 1;
            if result.nommed() {
                display.on_eat_egg();
            }

            if game.is_over() {
                debug!("Tick {ticks}: {:?}", result);
                break;
            }

            if let Some(remaining) = period.and_then(|p| p.checked_sub(tick_start.elapsed())) {
                thread::sleep(remaining);
            }
        }

        display.render(game)?;

        info!("Game over after {} ticks, score {}", ticks, game.score());
        Ok(LoopSummary {
            ticks,
            score: game.score(),
        })
    }
}
