use thiserror::Error;

use crate::location::Location;
use crate::search::Score;

/// Input rejected before any enumeration or search takes place.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    /// The square is not part of the board, either past its edge or dropped from it.
    #[error("square {location} is not on the {width}x{height} board")]
    OutOfBounds {
        /// The offending square.
        location: Location,
        /// Board width in columns.
        width: usize,
        /// Board height in rows.
        height: usize,
    },
    /// Region values are positive integers.
    #[error("region values must be positive, found {0}")]
    NonPositiveValue(u32),
    /// Each region gets its own value.
    #[error("region values must be distinct, found {0} more than once")]
    DuplicateValue(u32),
    /// Exactly one value per region.
    #[error("expected {expected} region values, found {found}")]
    WrongValueCount {
        /// Number of regions.
        expected: usize,
        /// Number of values supplied.
        found: usize,
    },
    /// Text that is not a square in algebraic notation.
    #[error("\"{0}\" is not a square in algebraic notation")]
    MalformedSquare(String),
    /// Text that is not a region value.
    #[error("\"{0}\" is not a region value")]
    MalformedValue(String),
    /// Paths contain at least their starting square.
    #[error("a path must contain at least one square")]
    EmptyPath,
    /// Consecutive squares of a path must be one move apart.
    #[error("{from} to {to} is not a legal move")]
    IllegalMove {
        /// Square moved from.
        from: Location,
        /// Square moved to.
        to: Location,
    },
    /// Paths are simple.
    #[error("square {0} is visited more than once")]
    RepeatedSquare(Location),
}

/// Why a submitted [`Solution`](crate::Solution) does not answer a [`Puzzle`](crate::Puzzle).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The values or one of the paths are malformed.
    #[error(transparent)]
    Invalid(#[from] InvalidInput),
    /// A path does not connect the squares of its route.
    #[error("path {index} runs from {start} to {end}, expected {expected_start} to {expected_end}")]
    WrongEndpoints {
        /// 1 or 2.
        index: usize,
        /// First square of the path.
        start: Location,
        /// Last square of the path.
        end: Location,
        /// Where the route starts.
        expected_start: Location,
        /// Where the route ends.
        expected_end: Location,
    },
    /// The paths must be vertex-disjoint.
    #[error("both paths visit {0}")]
    SharedSquare(Location),
    /// Both paths must hit the target exactly.
    #[error("path {index} scores {score}, not {target}")]
    WrongScore {
        /// 1 or 2.
        index: usize,
        /// What the path actually scores.
        score: Score,
        /// What it had to score.
        target: Score,
    },
}
