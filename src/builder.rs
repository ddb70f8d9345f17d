use std::collections::HashSet;
use std::num::NonZero;

use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;
use strum::VariantArray;
use unordered_pair::UnorderedPair;

use crate::board::{Board, Edge};
use crate::location::{Dimension, Location};
use crate::region::Region;
use crate::shape::{BoardShape, KnightStep, Step};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// A feature like a region was placed outside the bounds specified by `dims` on a builder.
    FeatureOutOfBounds,
    /// A layout used a character that names no [`Region`].
    UnknownRegion(char),
    /// A layout had the wrong number of rows, or a row of the wrong length.
    RowLengthMismatch,
}

/// Functionality all builders must implement, parametrised over the move set `Sh` of the resulting board.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
pub trait Builder<Sh: Step>: Clone {
    /// Construct a new [`Self`] with the specified dimensions, specified in `(x, y)` order.
    /// Every square starts out in [`Region::A`].
    fn with_dims(dims: (Dimension, Dimension)) -> Self;
    /// Place the square at `location` in `region`.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if `location` is out of bounds.
    /// If the builder is already in an invalid state, this function does nothing.
    fn paint(&mut self, location: Location, region: Region) -> &mut Self;
    /// Paint the whole board from one string per row, top row first, one region character per square.
    ///
    /// May cause the builder to enter a [`RowLengthMismatch`](BuilderInvalidReason::RowLengthMismatch) or
    /// [`UnknownRegion`](BuilderInvalidReason::UnknownRegion) invalid state.
    /// If the builder is already in an invalid state, this function does nothing.
    fn paint_rows(&mut self, rows: &[&str]) -> &mut Self;
    /// Drop a location from the board. No move enters or leaves it.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if `location` is out of bounds.
    /// If the builder is already in an invalid state, this function does nothing.
    fn drop_location(&mut self, location: Location) -> &mut Self;
    /// Forbid the single move between the two `locations`.
    /// If the two locations are not one move apart, this function does nothing and does not invalidate the builder.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if either location is out of bounds.
    fn disconnect(&mut self, locations: UnorderedPair<Location>) -> &mut Self;
    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>>;
    /// Convert the state of this builder into a [`Board`].
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    fn build(&self) -> Result<Board<Sh>, &Vec<BuilderInvalidReason>>;
}

/// A builder for rectangular boards connected by knight moves.
#[derive(Clone)]
pub struct RegionBoardBuilder {
    // width, height
    dims: (Dimension, Dimension),
    regions: Array2<Region>,
    invalid_reasons: Vec<BuilderInvalidReason>,
    // forbidden moves
    edge_blacklist: HashSet<UnorderedPair<Location>>,
    // holes
    location_blacklist: HashSet<Location>,
}

impl Default for RegionBoardBuilder {
    fn default() -> Self {
        Self::with_dims((NonZero::new(6).unwrap(), NonZero::new(6).unwrap()))
    }
}

impl RegionBoardBuilder {
    fn in_bounds(&self, location: Location) -> bool {
        location.within(self.dims)
    }
}

impl Builder<KnightStep> for RegionBoardBuilder {
    fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            regions: Array2::from_shape_simple_fn((dims.1.get(), dims.0.get()), Region::default),

            invalid_reasons: Default::default(),
            edge_blacklist: Default::default(),
            location_blacklist: Default::default(),
        }
    }

    fn paint(&mut self, location: Location, region: Region) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !self.in_bounds(location) {
            self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
            return self;
        }

        self.regions[location.as_index()] = region;
        self
    }

    fn paint_rows(&mut self, rows: &[&str]) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        let (width, height) = (self.dims.0.get(), self.dims.1.get());
        if rows.len() != height || rows.iter().any(|row| row.chars().count() != width) {
            self.invalid_reasons.push(BuilderInvalidReason::RowLengthMismatch);
            return self;
        }

        for (from_top, row) in rows.iter().enumerate() {
            let y = height - 1 - from_top;
            for (x, display) in row.chars().enumerate() {
                match Region::from_display(display) {
                    Some(region) => self.regions[Location(x, y).as_index()] = region,
                    None => {
                        self.invalid_reasons.push(BuilderInvalidReason::UnknownRegion(display));
                        return self;
                    }
                }
            }
        }

        self
    }

    fn drop_location(&mut self, location: Location) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !self.in_bounds(location) {
            self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
            return self;
        }

        self.location_blacklist.insert(location);
        self
    }

    fn disconnect(&mut self, locations: UnorderedPair<Location>) -> &mut Self {
        for location in [locations.0, locations.1] {
            if !self.in_bounds(location) {
                self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
                return self;
            }
        }

        if KnightStep::direction_to(locations.0, locations.1).is_none() {
            return self;
        }

        self.edge_blacklist.insert(locations);
        self
    }

    fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    fn build(&self) -> Result<Board<KnightStep>, &Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        let mut graph = UnGraphMap::with_capacity(
            self.regions.len(),
            // a knight has at most 8 moves and each edge is shared by two squares
            self.regions.len() * KnightStep::VARIANTS.len() / 2,
        );

        for y in 0..self.dims.1.get() {
            for x in 0..self.dims.0.get() {
                let location = Location(x, y);
                if !self.location_blacklist.contains(&location) {
                    graph.add_node(location);
                }
            }
        }

        let locations = graph.nodes().collect::<Vec<_>>();
        for location in locations {
            for (direction, neighbor) in KnightStep::neighbors_of(location) {
                // add each move once, from its lower ordered end
                if neighbor <= location || !graph.contains_node(neighbor) {
                    continue;
                }
                if self.edge_blacklist.contains(&UnorderedPair::from((location, neighbor))) {
                    continue;
                }

                graph.add_edge(location, neighbor, Edge { direction });
            }
        }

        Ok(Board {
            graph,
            dims: self.dims,
            regions: self.regions.clone(),
        })
    }
}
