//! The two capabilities the game loop talks to.
//!
//! Both have a `setup`/`teardown` pair that [`GameLoop::run`] calls exactly
//! once per run, teardown included when the run fails.
//!
//! [`GameLoop::run`]: crate::game_loop::GameLoop::run

use crate::error::SnekError;
use crate::geometry::Direction;
use crate::state::GameState;

pub trait Display {
    /// Claims whatever the display draws on.
    fn setup(&mut self) -> Result<(), SnekError> {
        Ok(())
    }

    /// Gives back what `setup` claimed.
    fn teardown(&mut self) -> Result<(), SnekError> {
        Ok(())
    }

    /// Paints the current state. Fails with [`SnekError::Size`] if the surface
    /// cannot fit the room.
    fn render(&mut self, game: &GameState) -> Result<(), SnekError>;

    /// Called on every tick that ate an egg.
    fn on_eat_egg(&mut self) {}
}

pub trait InputDevice {
    fn setup(&mut self) -> Result<(), SnekError> {
        Ok(())
    }

    fn teardown(&mut self) -> Result<(), SnekError> {
        Ok(())
    }

    /// Direction changes requested since the last call, oldest first. Must not
    /// block; returns an empty batch when nothing is pending.
    ///
    /// `game` is read-only: devices steer only through the returned actions.
    fn get_actions(&mut self, game: &GameState) -> Result<Vec<Direction>, SnekError>;
}

impl<D: Display + ?Sized> Display for Box<D> {
    fn setup(&mut self) -> Result<(), SnekError> {
        (**self).setup()
    }

    fn teardown(&mut self) -> Result<(), SnekError> {
        (**self).teardown()
    }

    fn render(&mut self, game: &GameState) -> Result<(), SnekError> {
        (**self).render(game)
    }

    fn on_eat_egg(&mut self) {
        (**self).on_eat_egg()
    }
}

impl<I: InputDevice + ?Sized> InputDevice for Box<I> {
    fn setup(&mut self) -> Result<(), SnekError> {
        (**self).setup()
    }

    fn teardown(&mut self) -> Result<(), SnekError> {
        (**self).teardown()
    }

    fn get_actions(&mut self, game: &GameState) -> Result<Vec<Direction>, SnekError> {
        (**self).get_actions(game)
    }
}
