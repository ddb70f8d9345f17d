use std::hash::Hash;

use itertools::Itertools;
use strum::VariantArray;

use crate::location::Location;

/// A set of moves between squares, one variant per move.
///
/// [`KnightStep`] is the built-in implementation.
pub trait Step: Sized + Copy + Send + Sync + VariantArray + PartialEq + Eq + Hash + Ord + PartialOrd + std::fmt::Debug {
    /// The `(column, row)` offset this move applies.
    fn offset(&self) -> (isize, isize);
    /// Attempt the move from `location` and return the resultant [`Location`], which may be off the board.
    fn attempt_from(&self, location: Location) -> Location {
        location.offset_by(self.offset())
    }
    /// The move leading back to where `self` started.
    fn invert(&self) -> Self;
}

/// The eight moves of a chess knight, in the order every search tries them.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
#[allow(missing_docs)]
pub enum KnightStep {
    RightTwoUp,
    RightTwoDown,
    LeftTwoUp,
    LeftTwoDown,
    UpTwoRight,
    DownTwoRight,
    UpTwoLeft,
    DownTwoLeft,
}

impl Step for KnightStep {
    fn offset(&self) -> (isize, isize) {
        match self {
            Self::RightTwoUp => (2, 1),
            Self::RightTwoDown => (2, -1),
            Self::LeftTwoUp => (-2, 1),
            Self::LeftTwoDown => (-2, -1),
            Self::UpTwoRight => (1, 2),
            Self::DownTwoRight => (1, -2),
            Self::UpTwoLeft => (-1, 2),
            Self::DownTwoLeft => (-1, -2),
        }
    }

    fn invert(&self) -> Self {
        match self {
            Self::RightTwoUp => Self::LeftTwoDown,
            Self::RightTwoDown => Self::LeftTwoUp,
            Self::LeftTwoUp => Self::RightTwoDown,
            Self::LeftTwoDown => Self::RightTwoUp,
            Self::UpTwoRight => Self::DownTwoLeft,
            Self::DownTwoRight => Self::UpTwoLeft,
            Self::UpTwoLeft => Self::DownTwoRight,
            Self::DownTwoLeft => Self::UpTwoRight,
        }
    }
}

/// Functionality on top of [`Step`] with identical implementation across all move sets.
pub trait BoardShape: Step {
    /// Get all neighbors of a [`Location`] in "theory", by attempting every move in `Self::VARIANTS`.
    ///
    /// Nothing here knows about board edges, so some of these may be off the board.
    fn neighbors_of(location: Location) -> Vec<(Self, Location)>;
    /// Determine the move from `a` to `b`, if a single move gets there.
    fn direction_to(a: Location, b: Location) -> Option<Self>;
}

impl<Sh> BoardShape for Sh
where
    Sh: Step,
{
    fn neighbors_of(location: Location) -> Vec<(Self, Location)> {
        Self::VARIANTS.iter()
            .map(|dir| (*dir, dir.attempt_from(location)))
            .collect_vec()
    }

    fn direction_to(a: Location, b: Location) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == b).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_knight_moves() {
        for step in KnightStep::VARIANTS {
            let (dx, dy) = step.offset();
            assert_eq!(dx.abs() * dy.abs(), 2, "{step:?}");
            assert_eq!(step.invert().offset(), (-dx, -dy));
            assert_eq!(step.invert().invert(), *step);
        }
        assert_eq!(KnightStep::VARIANTS.iter().map(Step::offset).unique().count(), 8);
    }

    #[test]
    fn direction_between_squares() {
        assert_eq!(KnightStep::direction_to(Location(0, 0), Location(2, 1)), Some(KnightStep::RightTwoUp));
        assert_eq!(KnightStep::direction_to(Location(2, 1), Location(0, 0)), Some(KnightStep::LeftTwoDown));
        assert_eq!(KnightStep::direction_to(Location(0, 0), Location(1, 1)), None);
        assert_eq!(KnightStep::neighbors_of(Location(3, 3)).len(), 8);
    }
}
