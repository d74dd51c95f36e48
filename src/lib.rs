//! Snake in a walled room.
//!
//! The simulation ([`room`], [`snake`], [`state`]) is pure and deterministic
//! given an RNG. [`game_loop`] drives it at a fixed rate against the
//! [`device`] traits, which [`terminal`], [`log_display`] and [`bots`]
//! implement.

pub mod bots;
pub mod config;
pub mod device;
pub mod error;
pub mod game_loop;
pub mod geometry;
pub mod log_display;
pub mod registry;
pub mod room;
pub mod snake;
pub mod state;
pub mod terminal;

pub use device::{Display, InputDevice};
pub use error::SnekError;
pub use game_loop::{GameLoop, LoopSummary, TickRate};
pub use geometry::{Direction, Pos};
pub use room::{Field, Room};
pub use snake::Snake;
pub use state::{EggPlacement, GameState, Status, StepResult};
