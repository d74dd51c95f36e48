use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SnekError;
use crate::geometry::{Direction, Pos};
use crate::room::Room;
use crate::snake::Snake;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Running,
    GameOver,
}

/// Where a new egg may land.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EggPlacement {
    /// Uniform over the whole room, walls and snake included.
    #[default]
    Anywhere,
    /// Uniform over free cells not covered by the snake. Falls back to
    /// `Anywhere` once no such cell is left.
    FreeCell,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// The game was already over; nothing moved.
    Halted,
    /// Normal movement, no special events
    Ongoing,
    /// Ate the egg and survived.
    Nommed,
    /// The move ended the game. `nommed` is set when the fatal cell also held
    /// the egg; the point still counts.
    Collision { wall: bool, body: bool, nommed: bool },
}

impl StepResult {
    pub fn nommed(&self) -> bool {
        matches!(
            self,
            StepResult::Nommed | StepResult::Collision { nommed: true, .. }
        )
    }
}

/// The whole game: room, snake, egg, score and status.
///
/// Advances one tick per [`GameState::step`]. Once [`Status::GameOver`] is
/// reached nothing changes any more.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    room: Room,
    snake: Snake,
    egg: Pos,
    score: u32,
    status: Status,
    #[serde(default)]
    egg_placement: EggPlacement,
}

impl GameState {
    /// Starts a running game and drops the first egg using `rng`.
    pub fn new<R: Rng>(
        room: Room,
        snake: Snake,
        egg_placement: EggPlacement,
        rng: &mut R,
    ) -> Self {
        let mut state = GameState {
            room,
            snake,
            egg: Pos::default(),
            score: 0,
            status: Status::Running,
            egg_placement,
        };
        state.egg = state.new_egg(rng);
        state
    }

    /// A snake of `length` segments coiled in the middle of the room, heading
    /// right.
    pub fn centered<R: Rng>(
        room: Room,
        length: usize,
        egg_placement: EggPlacement,
        rng: &mut R,
    ) -> Result<Self, SnekError> {
        let start = Pos::new(room.width() as i32 / 2, room.height() as i32 / 2);
        let snake = Snake::new(start, Direction::Right, length)?;
        Ok(GameState::new(room, snake, egg_placement, rng))
    }

    /// Replaces the current egg. Useful for setting up fixtures.
    pub fn with_egg(mut self, egg: Pos) -> Self {
        self.egg = egg;
        self
    }

    /// Applies direction changes in order. Each one overwrites the previous,
    /// so only the last action of a batch steers the next step.
    pub fn process_actions<I>(&mut self, actions: I)
    where
        I: IntoIterator<Item = Direction>,
    {
        for direction in actions {
            self.snake.set_direction(direction);
        }
    }

    /// Advances the game by one tick.
    ///
    /// Eating is checked before collisions, so a fatal move onto the egg still
    /// scores.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> StepResult {
        if self.status == Status::GameOver {
            return StepResult::Halted;
        }

        self.snake.step();
        let head = self.snake.head();

        let nommed = head == self.egg;
        if nommed {
            self.snake.enlarge(1);
            self.egg = self.new_egg(rng);
            self.score += 1;
            debug!("Egg eaten at {head}, score {}, next egg at {}", self.score, self.egg);
        }

        // Wall fields only steer bots; leaving the room is what kills
        let wall = !self.room.is_inside(head);
        let body = self.snake.in_self_collision();
        if wall || body {
            debug!("Game over at {head} (wall: {wall}, body: {body})");
            self.status = Status::GameOver;
            return StepResult::Collision { wall, body, nommed };
        }

        if nommed {
            StepResult::Nommed
        } else {
            StepResult::Ongoing
        }
    }

    /// Forces the game into [`Status::GameOver`].
    pub fn end(&mut self) {
        self.status = Status::GameOver;
    }

    fn new_egg<R: Rng>(&self, rng: &mut R) -> Pos {
        if self.egg_placement == EggPlacement::FreeCell {
            let candidates: Vec<Pos> = self
                .room
                .cells()
                .filter(|pos| self.room.is_free(*pos) && !self.snake.occupies(*pos))
                .collect();
            if let Some(pos) = candidates.choose(rng) {
                return *pos;
            }
        }

        Pos::new(
            rng.gen_range(0..self.room.width() as i32),
            rng.gen_range(0..self.room.height() as i32),
        )
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status == Status::GameOver
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn egg(&self) -> Pos {
        self.egg
    }

    pub fn egg_placement(&self) -> EggPlacement {
        self.egg_placement
    }

    pub fn width(&self) -> u16 {
        self.room.width()
    }

    pub fn height(&self) -> u16 {
        self.room.height()
    }

    pub fn to_json(&self) -> Result<String, SnekError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnekError> {
        Ok(serde_json::from_str(json)?)
    }
}
