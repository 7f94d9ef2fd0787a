//! Grid cell coordinates and entity color labels

use std::fmt;

/// One cell coordinate, row-major from the top-left of the level
///
/// Signed so that compass deltas can be applied before bounds checking;
/// positions outside the level simply fail the free-cell test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    /// Row index, increasing southward
    pub row: i32,
    /// Column index, increasing eastward
    pub col: i32,
}

impl Position {
    /// Create a position from row and column indices
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The position reached by applying a (row, col) delta
    pub const fn offset(self, delta: (i32, i32)) -> Self {
        Self {
            row: self.row + delta.0,
            col: self.col + delta.1,
        }
    }

    /// Manhattan distance to another position
    pub const fn distance(self, other: Self) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Affiliation label shared by agents and the boxes they may manipulate
///
/// The server vocabulary is closed; unknown names are a level-format error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// Blue
    Blue,
    /// Red
    Red,
    /// Cyan
    Cyan,
    /// Purple
    Purple,
    /// Green
    Green,
    /// Orange
    Orange,
    /// Pink
    Pink,
    /// Grey
    Grey,
    /// Light blue
    Lightblue,
    /// Brown
    Brown,
}

impl Color {
    /// Parse a server color name, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "blue" => Some(Self::Blue),
            "red" => Some(Self::Red),
            "cyan" => Some(Self::Cyan),
            "purple" => Some(Self::Purple),
            "green" => Some(Self::Green),
            "orange" => Some(Self::Orange),
            "pink" => Some(Self::Pink),
            "grey" => Some(Self::Grey),
            "lightblue" => Some(Self::Lightblue),
            "brown" => Some(Self::Brown),
            _ => None,
        }
    }
}
