//! FoamMeshError: Unified error type for foam-sieve public APIs
//!
//! Every reader, the grid assembler, and the reference grid model report
//! failures through this one enum. An import is all-or-nothing, so callers
//! normally only need to know that it failed and why.

use thiserror::Error;

/// Unified error type for OpenFOAM mesh import.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FoamMeshError {
    /// The underlying stream reported an error.
    #[error("I/O error: {0}")]
    Io(String),
    /// The stream ended while a value was still required.
    #[error("unexpected end of file on line {line}: expected {expected}")]
    UnexpectedEof { line: usize, expected: &'static str },
    /// A `/* ... */` comment was never closed.
    #[error("unterminated block comment starting on line {line}")]
    UnterminatedComment { line: usize },
    /// Well-formed bytes that violate the dictionary grammar.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    /// A required `FoamFile` header entry is absent.
    #[error("FoamFile header is missing required key `{0}`")]
    MissingHeaderKey(String),
    /// The header `class` does not match the reader that opened the file.
    #[error("FoamFile class mismatch: expected `{expected}`, found `{found}`")]
    ClassMismatch {
        expected: &'static str,
        found: String,
    },
    /// Only ASCII mesh files can be imported.
    #[error("unsupported FoamFile format `{0}` (only ascii is supported)")]
    UnsupportedFormat(String),
    /// Faces with other than 3 or 4 vertices.
    #[error("unsupported face with {0} vertices (only 3 or 4 are supported)")]
    UnsupportedFaceArity(u32),
    /// Every face must have exactly one owner label.
    #[error("owner list has {owners} labels but the face list has {faces} faces")]
    OwnerCountMismatch { owners: usize, faces: usize },
    /// Only interior faces have a neighbour, so there must be fewer neighbours than faces.
    #[error("neighbour list has {neighbours} labels; expected fewer than {faces}")]
    NeighbourCountTooLarge { neighbours: usize, faces: usize },
    /// A `points` file with zero entries.
    #[error("points file declares zero points")]
    EmptyPointList,
    /// A face refers to a point that does not exist.
    #[error("face {face} references vertex {vertex}, but only {num_points} points exist")]
    VertexIndexOutOfRange {
        face: usize,
        vertex: u32,
        num_points: usize,
    },
    /// Significant content after the closing parenthesis of a list.
    #[error("unexpected data after the closing `)` on line {line}")]
    TrailingData { line: usize },
    /// A `note` header entry contradicts the list counts.
    #[error("header note reports {key} = {noted}, but the file holds {actual}")]
    NoteMismatch {
        key: &'static str,
        noted: usize,
        actual: usize,
    },
    /// A `note` announces more cells than the faces can bound.
    #[error("header note reports nCells = {noted}, but the faces bound at most {max} cells")]
    ImplausibleCellCount { noted: usize, max: usize },
    /// The host asked to stop through the progress callback.
    #[error("import cancelled")]
    Cancelled,
    /// The grid reader was reused after it finished or failed.
    #[error("grid reader cannot start from state {0}")]
    InvalidState(&'static str),
    /// The host grid model rejected an operation.
    #[error("grid model error: {0}")]
    GridModel(String),
    /// A cell index that owns no faces.
    #[error("cell {cell} has no faces")]
    EmptyCell { cell: u32 },
    /// A cell whose faces do not enclose a volume.
    #[error("cell {cell} is not closed ({faces} faces)")]
    OpenCell { cell: u32, faces: usize },
    /// A closed cell with faces wound in contradicting directions.
    #[error("cell {cell} has inconsistently oriented faces")]
    InconsistentOrientation { cell: u32 },
}

impl FoamMeshError {
    /// Converts a stream error raised while reading `line`.
    pub fn from_io(err: std::io::Error, line: usize) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            FoamMeshError::UnexpectedEof {
                line,
                expected: "more data",
            }
        } else {
            FoamMeshError::Io(err.to_string())
        }
    }
}
