use clap::{Parser, ValueEnum};
use simplelog::LevelFilter;
use std::path::PathBuf;

use crate::error::SnekError;
use crate::game_loop::TickRate;
use crate::room::Room;
use crate::state::EggPlacement;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EggPlacementArg {
    /// Anywhere in the room, even on walls or the snake
    Anywhere,
    /// Only on free cells the snake does not cover
    FreeCell,
}

impl From<EggPlacementArg> for EggPlacement {
    fn from(arg: EggPlacementArg) -> Self {
        match arg {
            EggPlacementArg::Anywhere => EggPlacement::Anywhere,
            EggPlacementArg::FreeCell => EggPlacement::FreeCell,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "snekroom")]
#[command(version, about = "Snake in a walled room, in your terminal")]
pub struct Settings {
    /// Room width in cells
    #[arg(long, default_value_t = 60)]
    pub width: u16,

    /// Room height in cells
    #[arg(long, default_value_t = 40)]
    pub height: u16,

    /// Initial snake length
    #[arg(long, default_value_t = 1)]
    pub length: usize,

    /// Ticks per second; 0 runs as fast as possible
    #[arg(long, default_value_t = 10.0)]
    pub rate: f64,

    /// Display to draw with (terminal, log)
    #[arg(long, default_value = "terminal")]
    pub display: String,

    /// Who steers the snake (keyboard, random, egg-seeker)
    #[arg(long, default_value = "keyboard")]
    pub input: String,

    /// Surround the room with walls
    #[arg(long)]
    pub walls: bool,

    /// Where new eggs may appear
    #[arg(long, value_enum, default_value_t = EggPlacementArg::Anywhere)]
    pub egg_placement: EggPlacementArg,

    /// Seed for egg placement and bots
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value = "snekroom.log")]
    pub log_file: PathBuf,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Settings {
    pub fn room(&self) -> Result<Room, SnekError> {
        if self.walls {
            Room::bordered(self.width, self.height)
        } else {
            Room::new(self.width, self.height)
        }
    }

    pub fn tick_rate(&self) -> TickRate {
        TickRate::from_hz(self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::Field;
    use crate::geometry::Pos;

    #[test]
    fn test_defaults() {
        let settings = Settings::try_parse_from(["snekroom"]).unwrap();

        assert_eq!(settings.width, 60);
        assert_eq!(settings.height, 40);
        assert_eq!(settings.length, 1);
        assert_eq!(settings.tick_rate(), TickRate::Hz(10.0));
        assert_eq!(settings.display, "terminal");
        assert_eq!(settings.input, "keyboard");
        assert!(!settings.walls);
        assert_eq!(EggPlacement::from(settings.egg_placement), EggPlacement::Anywhere);
        assert_eq!(settings.seed, None);
        assert_eq!(LevelFilter::from(settings.log_level), LevelFilter::Info);
    }

    #[test]
    fn test_custom_settings() {
        let settings = Settings::try_parse_from([
            "snekroom",
            "--width",
            "20",
            "--height",
            "12",
            "--rate",
            "0",
            "--input",
            "egg-seeker",
            "--display",
            "log",
            "--walls",
            "--egg-placement",
            "free-cell",
            "--seed",
            "99",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(settings.tick_rate(), TickRate::Unbounded);
        assert_eq!(settings.input, "egg-seeker");
        assert_eq!(settings.display, "log");
        assert_eq!(EggPlacement::from(settings.egg_placement), EggPlacement::FreeCell);
        assert_eq!(settings.seed, Some(99));
        assert_eq!(LevelFilter::from(settings.log_level), LevelFilter::Debug);

        let room = settings.room().unwrap();
        assert_eq!((room.width(), room.height()), (20, 12));
        assert_eq!(room.get_field_value(Pos::new(0, 0)).unwrap(), Field::Wall);
    }

    #[test]
    fn test_zero_sized_room_rejected() {
        let settings = Settings::try_parse_from(["snekroom", "--width", "0"]).unwrap();
        assert!(matches!(settings.room(), Err(SnekError::InvalidArgument(_))));
    }

    #[test]
    fn test_bad_egg_placement_rejected() {
        assert!(Settings::try_parse_from(["snekroom", "--egg-placement", "nowhere"]).is_err());
    }
}
