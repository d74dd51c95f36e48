use serde::{Deserialize, Serialize};

use crate::error::SnekError;
use crate::geometry::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    Free,
    Wall,
}

/// Static bounded grid the snake lives in. Never changes after construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RoomFields")]
pub struct Room {
    width: u16,
    height: u16,
    fields: Vec<Field>,
}

#[derive(Deserialize)]
struct RoomFields {
    width: u16,
    height: u16,
    fields: Vec<Field>,
}

impl TryFrom<RoomFields> for Room {
    type Error = SnekError;

    fn try_from(raw: RoomFields) -> Result<Self, Self::Error> {
        check_dimensions(raw.width, raw.height)?;
        let expected = raw.width as usize * raw.height as usize;
        if raw.fields.len() != expected {
            return Err(SnekError::invalid(format!(
                "room {}x{} needs {} fields, got {}",
                raw.width,
                raw.height,
                expected,
                raw.fields.len()
            )));
        }
        Ok(Room {
            width: raw.width,
            height: raw.height,
            fields: raw.fields,
        })
    }
}

fn check_dimensions(width: u16, height: u16) -> Result<(), SnekError> {
    if width == 0 || height == 0 {
        return Err(SnekError::invalid(format!(
            "room dimensions must be positive, got {width}x{height}"
        )));
    }
    Ok(())
}

impl Room {
    pub fn new(width: u16, height: u16) -> Result<Self, SnekError> {
        check_dimensions(width, height)?;
        Ok(Room {
            width,
            height,
            fields: vec![Field::Free; width as usize * height as usize],
        })
    }

    /// A room whose outermost ring of cells is wall.
    pub fn bordered(width: u16, height: u16) -> Result<Self, SnekError> {
        let mut room = Room::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    room.fields[y as usize * width as usize + x as usize] = Field::Wall;
                }
            }
        }
        Ok(room)
    }

    /// Parses rows of `#` (wall) and `.` (free). Surrounding blank lines and
    /// indentation are ignored.
    pub fn from_layout(layout: &str) -> Result<Self, SnekError> {
        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .collect();

        let height = rows.len();
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        let (width, height) = match (u16::try_from(width), u16::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => return Err(SnekError::invalid("room layout is too large")),
        };
        check_dimensions(width, height)?;

        let mut fields = Vec::with_capacity(width as usize * height as usize);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width as usize {
                return Err(SnekError::invalid(format!(
                    "layout row {y} has {} cells, expected {width}",
                    row.chars().count()
                )));
            }
            for glyph in row.chars() {
                fields.push(match glyph {
                    '.' => Field::Free,
                    '#' => Field::Wall,
                    other => {
                        return Err(SnekError::invalid(format!(
                            "unknown layout glyph {other:?} in row {y}"
                        )))
                    }
                });
            }
        }

        Ok(Room {
            width,
            height,
            fields,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Looks up the terrain at `pos`.
    ///
    /// The lookup tolerates `x == width` and `y == height`; those fringe cells
    /// have no storage and read as [`Field::Wall`]. Anything further out is an
    /// [`SnekError::OutOfRange`]. Note that [`Room::is_inside`] is strict on
    /// the upper edge.
    pub fn get_field_value(&self, pos: Pos) -> Result<Field, SnekError> {
        let (width, height) = (self.width as i32, self.height as i32);
        if pos.x < 0 || pos.x > width || pos.y < 0 || pos.y > height {
            return Err(SnekError::OutOfRange {
                pos,
                width: self.width,
                height: self.height,
            });
        }
        if pos.x == width || pos.y == height {
            return Ok(Field::Wall);
        }
        Ok(self.fields[pos.y as usize * self.width as usize + pos.x as usize])
    }

    pub fn is_inside(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    pub fn is_free(&self, pos: Pos) -> bool {
        self.is_inside(pos) && matches!(self.get_field_value(pos), Ok(Field::Free))
    }

    /// Every in-bounds position, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Pos> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| Pos::new(x, y)))
    }
}
