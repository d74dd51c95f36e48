use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::error::SnekError;
use crate::geometry::{Direction, Pos};

/// Body segments with the head at the front and the tail at the back.
///
/// The snake only knows how to move and grow. Whether a move was legal is
/// decided by the [`GameState`](crate::state::GameState) that owns it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SnakeFields")]
pub struct Snake {
    body: VecDeque<Pos>,
    direction: Direction,
}

#[derive(Deserialize)]
struct SnakeFields {
    body: VecDeque<Pos>,
    direction: Direction,
}

impl TryFrom<SnakeFields> for Snake {
    type Error = SnekError;

    fn try_from(raw: SnakeFields) -> Result<Self, Self::Error> {
        if raw.body.is_empty() {
            return Err(SnekError::invalid("snake needs at least one segment"));
        }
        Ok(Snake {
            body: raw.body,
            direction: raw.direction,
        })
    }
}

impl Snake {
    /// A snake coiled up on `start`: every segment starts on the same cell and
    /// they spread out as it moves.
    pub fn new(start: Pos, direction: Direction, length: usize) -> Result<Self, SnekError> {
        if length == 0 {
            return Err(SnekError::invalid("snake length must be > 0"));
        }
        Ok(Snake {
            body: std::iter::repeat(start).take(length).collect(),
            direction,
        })
    }

    pub fn step(&mut self) {
        let new_head = self.head() + self.direction;
        self.body.pop_back();
        self.body.push_front(new_head);
    }

    /// Takes effect on the next [`Snake::step`]. Reversing into the body is
    /// allowed; avoiding it is up to whoever picks the direction.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Grows by `n` segments at once, stacked on the current tail.
    pub fn enlarge(&mut self, n: usize) {
        let tail = self.tail();
        self.body.extend(std::iter::repeat(tail).take(n));
    }

    pub fn head(&self) -> Pos {
        self.body[0]
    }

    pub fn tail(&self) -> Pos {
        self.body[self.body.len() - 1]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least one segment.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Head first.
    pub fn segments(&self) -> impl Iterator<Item = Pos> + '_ {
        self.body.iter().copied()
    }

    pub fn in_self_collision(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    pub fn occupies(&self, pos: Pos) -> bool {
        self.body.contains(&pos)
    }
}
