use std::fmt;

/// A single coordinate as reported by the simulation.
///
/// Integer and fractional values are kept apart so an integer position nudges to an
/// integer target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coord {
    Int(i64),
    Float(f64),
}

impl Coord {
    pub fn offset(self, delta: i64) -> Self {
        match self {
            Coord::Int(value) => match value.checked_add(delta) {
                Some(next) => Coord::Int(next),
                // Past i64 range; keep moving as a float.
                None => Coord::Float(value as f64 + delta as f64),
            },
            Coord::Float(value) => Coord::Float(value + delta as f64),
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coord::Int(value) => write!(f, "{value}"),
            Coord::Float(value) => write!(f, "{value}"),
        }
    }
}

/// Player position on the simulation grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: Coord,
    pub y: Coord,
}

impl Position {
    pub fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// One unit east of this position. No bounds or obstacle checks.
    pub fn nudged_east(self) -> Self {
        Self {
            x: self.x.offset(1),
            y: self.y,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
