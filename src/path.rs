use std::collections::{HashSet, VecDeque};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use itertools::Itertools;
use log::{debug, trace};

use crate::board::Board;
use crate::error::InvalidInput;
use crate::location::Location;
use crate::shape::Step;

/// An ordered, non-empty sequence of squares.
///
/// Paths produced by [`PathEnumerator`] are simple and made of legal moves.
/// Parsed paths are only guaranteed non-empty; use [`Board::check_path`] on them.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Path(Vec<Location>);

impl Path {
    /// Wrap `squares` as a path. Fails only if `squares` is empty.
    pub fn new(squares: Vec<Location>) -> Result<Self, InvalidInput> {
        if squares.is_empty() {
            return Err(InvalidInput::EmptyPath);
        }

        Ok(Self(squares))
    }

    /// The squares in visiting order.
    pub fn squares(&self) -> &[Location] {
        &self.0
    }

    /// Number of squares, counting both ends.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The first square.
    pub fn start(&self) -> Location {
        self.0[0]
    }

    /// The last square. Equal to [`Self::start`] for a one square path.
    pub fn end(&self) -> Location {
        self.0[self.0.len() - 1]
    }

    /// The first square of `self` that `other` also visits.
    pub fn shared_square(&self, other: &Path) -> Option<Location> {
        let theirs = other.0.iter().collect::<HashSet<_>>();
        self.0.iter().find(|location| theirs.contains(location)).copied()
    }

    /// Whether the two paths have no square in common.
    pub fn is_disjoint(&self, other: &Path) -> bool {
        self.shared_square(other).is_none()
    }
}

/// Comma separated algebraic notation, e.g. `a1,c2,e3`.
impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(","))
    }
}

impl FromStr for Path {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(InvalidInput::EmptyPath);
        }

        Self::new(s.split(',').map(Location::from_str).collect::<Result<Vec<_>, _>>()?)
    }
}

// one partial path on the breadth-first frontier; nothing here is shared with sibling branches
struct Branch {
    squares: Vec<Location>,
    visited: HashSet<Location>,
}

impl Branch {
    fn root(start: Location) -> Self {
        Self {
            squares: vec![start],
            visited: HashSet::from([start]),
        }
    }

    fn head(&self) -> Location {
        self.squares[self.squares.len() - 1]
    }

    fn extend(&self, location: Location) -> Self {
        let mut squares = Vec::with_capacity(self.squares.len() + 1);
        squares.extend_from_slice(&self.squares);
        squares.push(location);

        let mut visited = self.visited.clone();
        visited.insert(location);

        Self { squares, visited }
    }
}

/// Enumerates every simple path between two squares of a [`Board`], breadth first.
///
/// Paths come out in order of length. Paths of equal length come out in the order the moves of `Sh` are tried.
/// A branch that arrives at the end square is emitted and not extended further:
/// since a simple path can never come back to a square it left, extending it could not produce another path.
pub struct PathEnumerator<'a, Sh>
where
    Sh: Step,
{
    board: &'a Board<Sh>,
}

impl<'a, Sh> From<&'a Board<Sh>> for PathEnumerator<'a, Sh>
where
    Sh: Step,
{
    fn from(board: &'a Board<Sh>) -> Self {
        Self { board }
    }
}

impl<Sh> PathEnumerator<'_, Sh>
where
    Sh: Step,
{
    /// Every simple path from `start` to `end` with at most `max_length` squares.
    ///
    /// Returns [`InvalidInput::OutOfBounds`] if either square is not on the board.
    /// An empty collection means no such path exists, which is not an error.
    pub fn enumerate(&self, start: Location, end: Location, max_length: usize) -> Result<Vec<Path>, InvalidInput> {
        self.board.check_square(start)?;
        self.board.check_square(end)?;

        let mut paths = Vec::new();
        // squares that cannot reach the end are missing here, so their branches are never queued
        let distances = self.board.distances_to(end);
        let fits = |len: usize, location: &Location| distances.get(location)
            .is_some_and(|remaining| len + remaining <= max_length);

        if !fits(1, &start) {
            debug!("no path from {} to {} within {} squares", start, end, max_length);
            return Ok(paths);
        }

        let mut explored = 0usize;
        let mut queue = VecDeque::from([Branch::root(start)]);
        while let Some(branch) = queue.pop_front() {
            explored += 1;
            let head = branch.head();
            if head == end {
                paths.push(Path(branch.squares));
                continue;
            }

            let len = branch.squares.len() + 1;
            for neighbor in self.board.neighbors(head) {
                if !branch.visited.contains(&neighbor) && fits(len, &neighbor) {
                    queue.push_back(branch.extend(neighbor));
                }
            }
        }

        trace!("explored {} branches from {}", explored, start);
        debug!("found {} paths from {} to {} within {} squares", paths.len(), start, end, max_length);

        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn parse_and_print() {
        let path: Path = "a1,c2,e3".parse().unwrap();
        assert_eq!(path.squares(), &[Location(0, 0), Location(2, 1), Location(4, 2)]);
        assert_eq!(path.start(), Location(0, 0));
        assert_eq!(path.end(), Location(4, 2));
        assert_eq!(path.len(), 3);
        assert_eq!(path.to_string(), "a1,c2,e3");
    }

    #[rstest]
    #[case("", InvalidInput::EmptyPath)]
    #[case("a1,,c2", InvalidInput::MalformedSquare(String::new()))]
    #[case("a1,z", InvalidInput::MalformedSquare("z".to_owned()))]
    fn parse_failures(#[case] text: &str, #[case] expected: InvalidInput) {
        assert_eq!(text.parse::<Path>(), Err(expected));
    }

    #[test]
    fn disjointness() {
        let first: Path = "a1,c2,e3".parse().unwrap();
        let apart: Path = "a6,b4,d5".parse().unwrap();
        let crossing: Path = "b1,c3,e3".parse().unwrap();

        assert!(first.is_disjoint(&apart));
        assert!(apart.is_disjoint(&first));
        assert!(!first.is_disjoint(&crossing));
        assert_eq!(first.shared_square(&crossing), Some(Location(4, 2)));
    }
}
