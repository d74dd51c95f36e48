//! Name → constructor tables for everything the binary can plug into the
//! game loop.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::bots::{EggSeekerBot, RandomBot};
use crate::device::{Display, InputDevice};
use crate::error::SnekError;
use crate::log_display::LogDisplay;
use crate::terminal::{KeyboardInput, TerminalDisplay};

pub type DisplayFactory = fn() -> Box<dyn Display>;

/// Input devices get the run's seed so bots can be replayed.
pub type InputFactory = fn(Option<u64>) -> Box<dyn InputDevice>;

const DISPLAYS: &[(&str, DisplayFactory)] = &[
    ("terminal", terminal_display),
    ("log", log_display),
];

const INPUTS: &[(&str, InputFactory)] = &[
    ("keyboard", keyboard_input),
    ("random", random_bot),
    ("egg-seeker", egg_seeker_bot),
];

fn terminal_display() -> Box<dyn Display> {
    Box::new(TerminalDisplay::new())
}

fn log_display() -> Box<dyn Display> {
    Box::new(LogDisplay::new())
}

fn keyboard_input(_seed: Option<u64>) -> Box<dyn InputDevice> {
    Box::new(KeyboardInput::new())
}

fn random_bot(seed: Option<u64>) -> Box<dyn InputDevice> {
    let rng = match seed {
        // Keep the bot's stream apart from the egg stream of the same seed
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_entropy(),
    };
    Box::new(RandomBot::with_rng(rng))
}

fn egg_seeker_bot(_seed: Option<u64>) -> Box<dyn InputDevice> {
    Box::new(EggSeekerBot::new())
}

pub fn display_names() -> impl Iterator<Item = &'static str> {
    DISPLAYS.iter().map(|(name, _)| *name)
}

pub fn input_names() -> impl Iterator<Item = &'static str> {
    INPUTS.iter().map(|(name, _)| *name)
}

pub fn create_display(name: &str) -> Result<Box<dyn Display>, SnekError> {
    DISPLAYS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, factory)| factory())
        .ok_or_else(|| unknown("display", name, display_names()))
}

pub fn create_input(name: &str, seed: Option<u64>) -> Result<Box<dyn InputDevice>, SnekError> {
    INPUTS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, factory)| factory(seed))
        .ok_or_else(|| unknown("input", name, input_names()))
}

fn unknown<'a>(kind: &str, name: &str, known: impl Iterator<Item = &'a str>) -> SnekError {
    let known: Vec<&str> = known.collect();
    SnekError::invalid(format!(
        "unknown {kind} {name:?}, expected one of: {}",
        known.join(", ")
    ))
}
