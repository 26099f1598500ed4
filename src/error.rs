use crate::cell::Cell;
use core::fmt;

/// Errors surfaced by the maze core. "No path exists" is not an error; the
/// solvers report it as an empty path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MazeError {
    /// A cell coordinate fell outside the maze bounds.
    OutOfRange {
        cell: Cell,
        height: usize,
        width: usize,
    },
    /// A serialized maze could not be loaded.
    Deserialize(DeserializeError),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::OutOfRange {
                cell,
                height,
                width,
            } => write!(f, "cell {cell} out of range for {height}x{width} maze"),
            Self::Deserialize(e) => write!(f, "failed to deserialize maze: {e}"),
        }
    }
}

impl std::error::Error for MazeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Deserialize(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DeserializeError> for MazeError {
    fn from(e: DeserializeError) -> MazeError {
        MazeError::Deserialize(e)
    }
}

/// Reasons a serialized maze is rejected. Deserialization never leaves a
/// partially loaded grid behind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeserializeError {
    /// The text did not split into the four `:`-separated fields.
    FieldCount(usize),
    /// A dimension field was not a decimal number.
    BadDimension(&'static str),
    /// The encoded dimensions do not match the target grid.
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// A wall field was not a well-formed hex byte run.
    Walls {
        field: &'static str,
        source: HexError,
    },
}

impl fmt::Display for DeserializeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::FieldCount(found) => write!(f, "expected 4 fields, found {found}"),
            Self::BadDimension(field) => write!(f, "{field} is not a decimal number"),
            Self::DimensionMismatch { expected, found } => write!(
                f,
                "encoded dimensions {}x{} do not match target {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            Self::Walls { field, source } => write!(f, "{field} wall field: {source}"),
        }
    }
}

impl std::error::Error for DeserializeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Walls { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A malformed hex byte run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HexError {
    /// The run does not contain exactly two characters per byte.
    Length { expected: usize, found: usize },
    /// A non-hexadecimal character at byte offset `pos`.
    Digit { pos: usize },
}

impl fmt::Display for HexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Length { expected, found } => {
                write!(f, "expected {expected} hex characters, found {found}")
            }
            Self::Digit { pos } => write!(f, "invalid hex digit at offset {pos}"),
        }
    }
}

impl std::error::Error for HexError {}
