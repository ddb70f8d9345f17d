#![warn(missing_docs)]

//! # `knightmare`
//!
//! A solver for Knight Moves 6, the October 2024 Jane Street puzzle,
//! and for variants of it on other boards.
//! Start from [`Puzzle::october_2024`], or build a board with [`RegionBoardBuilder`](builder::RegionBoardBuilder) and describe your own [`Puzzle`].
//! Then call [`solve()`](crate::Puzzle::solve).
//!
//! # The puzzle
//! Every square of the board belongs to one of three regions, A, B and C.
//! Pick three distinct positive integers for the regions, then walk a knight from one corner to the opposite one.
//! The score starts at the value of the first square's region.
//! Every move within a region adds the value of the region moved into, and every move into another region multiplies by it.
//! A solution is one choice of values and two knight paths, a1 to f6 and a6 to f1, that share no square and both score exactly 2024.
//!
//! # Internals
//! The search runs as a two stage pipeline.
//!
//! 1. A [`PathEnumerator`] lists every simple path of each route up to a length limit, breadth first over the board's move graph.
//!    Branches that cannot reach the end within the limit are never queued, which keeps the enumeration tractable.
//! 2. A [`ScoredSearch`] walks every assignment of values (see [`candidates`]) in a fixed order.
//!    For each one it scores both path sets and looks for a vertex-disjoint pair on target.
//!    A score depends only on the sequence of regions a path visits, so paths are grouped by that sequence and each group is scored once.
//!
//! The order of assignments decides which solution is reported, see [`SearchPolicy`].
//! With the `parallel` feature (on by default), assignments are evaluated on a [`rayon`](https://docs.rs/rayon) pool,
//! and the result is still the one a sequential search would report.

pub use board::Board;
pub use builder::Builder;
pub use error::{InvalidInput, Rejection};
pub use location::Location;
pub use path::{Path, PathEnumerator};
pub use puzzle::{Puzzle, Route, OCTOBER_2024_LAYOUT};
pub use region::{Region, RegionValues};
pub use search::{find_solution, Score, ScoredSearch, SearchControl, SearchOutcome, SearchPolicy, Solution};

pub(crate) mod board;
pub(crate) mod error;
pub(crate) mod location;
pub(crate) mod path;
pub(crate) mod puzzle;
pub(crate) mod region;
/// Move sets, and the knight's in particular.
pub mod shape;
/// Constructing [`Board`]s.
pub mod builder;
/// Value assignments in search order.
pub mod candidates;
/// The scoring rule and step-by-step breakdowns.
pub mod score;
pub(crate) mod search;
