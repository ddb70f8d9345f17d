use std::collections::{HashMap, HashSet};
use std::fmt::{Display, Formatter};

use ndarray::Array2;
use petgraph::algo::dijkstra;
use petgraph::graphmap::UnGraphMap;

use crate::error::InvalidInput;
use crate::location::{Dimension, Location};
use crate::path::Path;
use crate::region::Region;
use crate::shape::{KnightStep, Step};

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub(crate) struct Edge<Sh>
where
    Sh: Step,
{
    // direction from the lower ordered location
    pub(crate) direction: Sh,
}

/// A board of squares labelled with [`Region`]s and connected by the moves of `Sh`.
///
/// The region map is fixed at build time. [`Board`]s should be built using a [`Builder`](crate::builder::Builder)
/// such as [`RegionBoardBuilder`](crate::builder::RegionBoardBuilder).
#[derive(Clone)]
pub struct Board<Sh = KnightStep>
where
    Sh: Step,
{
    pub(crate) graph: UnGraphMap<Location, Edge<Sh>>,
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) regions: Array2<Region>,
}

impl<Sh> Board<Sh>
where
    Sh: Step,
{
    /// `(width, height)` of the board.
    pub fn dims(&self) -> (usize, usize) {
        (self.dims.0.get(), self.dims.1.get())
    }

    /// Whether `location` is a square of this board.
    pub fn contains(&self, location: Location) -> bool {
        self.graph.contains_node(location)
    }

    /// [`Ok`] if `location` is a square of this board, [`InvalidInput::OutOfBounds`] otherwise.
    pub fn check_square(&self, location: Location) -> Result<(), InvalidInput> {
        if self.contains(location) {
            Ok(())
        } else {
            Err(InvalidInput::OutOfBounds {
                location,
                width: self.dims.0.get(),
                height: self.dims.1.get(),
            })
        }
    }

    /// The region `location` belongs to.
    ///
    /// # Panics
    /// If `location` lies outside the region map. Callers validate squares first.
    pub fn region_of(&self, location: Location) -> Region {
        self.regions[location.as_index()]
    }

    /// Squares one move away from `location`, in `Sh::VARIANTS` order.
    pub fn neighbors(&self, location: Location) -> impl Iterator<Item=Location> + '_ {
        Sh::VARIANTS.iter()
            .map(move |dir| dir.attempt_from(location))
            .filter(move |neighbor| self.graph.contains_edge(location, *neighbor))
    }

    /// The move taking `from` to `to`, if the board connects them.
    pub fn move_between(&self, from: Location, to: Location) -> Option<Sh> {
        self.graph.edge_weight(from, to).map(|edge| {
            if from < to {
                edge.direction
            } else {
                edge.direction.invert()
            }
        })
    }

    /// Fewest moves from every reachable square to `target`. Unreachable squares are absent.
    pub fn distances_to(&self, target: Location) -> HashMap<Location, usize> {
        if !self.contains(target) {
            return HashMap::new();
        }

        dijkstra(&self.graph, target, None, |_| 1usize)
    }

    /// Check that `path` is a simple path of legal moves on this board.
    pub fn check_path(&self, path: &Path) -> Result<(), InvalidInput> {
        let squares = path.squares();
        let mut seen = HashSet::with_capacity(squares.len());

        for location in squares {
            self.check_square(*location)?;
            if !seen.insert(*location) {
                return Err(InvalidInput::RepeatedSquare(*location));
            }
        }

        for pair in squares.windows(2) {
            if self.move_between(pair[0], pair[1]).is_none() {
                return Err(InvalidInput::IllegalMove { from: pair[0], to: pair[1] });
            }
        }

        Ok(())
    }
}

/// The region map with the top row first, as a chessboard is drawn. Dropped squares print as `.`.
impl<Sh: Step> Display for Board<Sh> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut out = String::with_capacity(self.regions.nrows() * (self.regions.ncols() + 1));

        for y in (0..self.regions.nrows()).rev() {
            for (x, region) in self.regions.row(y).iter().enumerate() {
                out.push(if self.contains(Location(x, y)) { region.display() } else { '.' });
            }
            out.push('\n');
        }

        write!(f, "{}", out)
    }
}
