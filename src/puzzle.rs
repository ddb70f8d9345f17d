use std::num::NonZero;

use log::debug;
use strum::VariantArray;

use crate::board::Board;
use crate::builder::{Builder, RegionBoardBuilder};
use crate::candidates::Candidates;
use crate::error::{InvalidInput, Rejection};
use crate::location::Location;
use crate::path::{Path, PathEnumerator};
use crate::region::RegionValues;
use crate::search::{Score, ScoredSearch, SearchControl, SearchOutcome, SearchPolicy, Solution};
use crate::shape::{KnightStep, Step};

/// Region layout of the October 2024 board, top row first.
pub const OCTOBER_2024_LAYOUT: [&str; 6] = [
    "ABBCCC",
    "ABBCCC",
    "ABBCCC",
    "ABBCCC",
    "AABBCC",
    "AAABBC",
];

/// One of the two paths a puzzle asks for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, VariantArray)]
pub enum Route {
    /// a1 to f6 in Knight Moves 6.
    First,
    /// a6 to f1 in Knight Moves 6.
    Second,
}

impl Route {
    /// Position of this route in [`Puzzle::routes`] and [`Solution::paths`].
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

/// Everything that defines one puzzle: a board, two routes, and what counts as a solution.
#[derive(Clone)]
pub struct Puzzle<Sh = KnightStep>
where
    Sh: Step,
{
    /// Squares, moves and regions.
    pub board: Board<Sh>,
    /// `(start, end)` of each of the two paths.
    pub routes: [(Location, Location); 2],
    /// Score both paths must reach exactly.
    pub target: Score,
    /// Region values sum to less than this.
    pub value_bound: u32,
    /// Longest path considered, in squares.
    pub max_length: usize,
    /// Which solution to report when there are several.
    pub policy: SearchPolicy,
}

impl Puzzle<KnightStep> {
    /// Knight Moves 6: paths a1 to f6 and a6 to f1 on a three region 6x6 board,
    /// both scoring 2024, with region values summing below 50.
    pub fn october_2024() -> Self {
        let board = RegionBoardBuilder::with_dims((NonZero::new(6).unwrap(), NonZero::new(6).unwrap()))
            .paint_rows(&OCTOBER_2024_LAYOUT)
            .build()
            .unwrap();

        Self {
            board,
            routes: [(Location(0, 0), Location(5, 5)), (Location(0, 5), Location(5, 0))],
            target: 2024,
            value_bound: 50,
            max_length: 15,
            policy: SearchPolicy::FirstMatch,
        }
    }
}

impl<Sh> Puzzle<Sh>
where
    Sh: Step,
{
    /// `(start, end)` of `route`.
    pub fn route(&self, route: Route) -> (Location, Location) {
        self.routes[route.index()]
    }

    /// All paths of one route, in enumeration order.
    pub fn paths(&self, route: Route) -> Result<Vec<Path>, InvalidInput> {
        let (start, end) = self.route(route);
        PathEnumerator::from(&self.board).enumerate(start, end, self.max_length)
    }

    /// Enumerate both routes, then search for values and a disjoint pair of paths.
    ///
    /// Errors only on bad routes; finding nothing is [`SearchOutcome::NoSolution`].
    pub fn solve(&self, control: &SearchControl) -> Result<SearchOutcome, InvalidInput> {
        let first = self.paths(Route::First)?;
        let second = self.paths(Route::Second)?;
        debug!("{} and {} candidate paths", first.len(), second.len());

        let candidates = Candidates::new(self.value_bound, self.policy.candidate_order());
        Ok(ScoredSearch::new(&self.board, &first, &second, self.target).run(candidates, control))
    }

    /// Read a solution written as `A,B,C,` followed by both paths.
    ///
    /// The first path ends at the first occurrence of the first route's end square; the remaining squares form the second path.
    pub fn parse_solution(&self, text: &str) -> Result<Solution, InvalidInput> {
        let fields = text.split(',').map(str::trim).collect::<Vec<_>>();
        if fields.len() < 3 {
            return Err(InvalidInput::WrongValueCount { expected: 3, found: fields.len() });
        }

        let values = fields[..3].iter()
            .map(|field| field.parse::<u32>().map_err(|_| InvalidInput::MalformedValue((*field).to_owned())))
            .collect::<Result<Vec<_>, _>>()?;
        let values = RegionValues::from_slice(&values)?;

        let squares = fields[3..].iter()
            .map(|field| field.parse::<Location>())
            .collect::<Result<Vec<_>, _>>()?;
        let first_end = self.route(Route::First).1;
        let split = squares.iter()
            .position(|location| *location == first_end)
            .map_or(squares.len(), |index| index + 1);
        let (first, second) = squares.split_at(split);

        Ok(Solution {
            values,
            paths: [Path::new(first.to_vec())?, Path::new(second.to_vec())?],
        })
    }

    /// Check `solution` against every rule of this puzzle, reporting the first rule it breaks.
    ///
    /// The value bound and path length limit only shape the search, so they are not checked here.
    pub fn verify(&self, solution: &Solution) -> Result<(), Rejection> {
        RegionValues::new(solution.values.as_array())?;

        for (index, (path, (expected_start, expected_end))) in solution.paths.iter().zip(self.routes).enumerate() {
            self.board.check_path(path)?;
            if path.start() != expected_start || path.end() != expected_end {
                return Err(Rejection::WrongEndpoints {
                    index: index + 1,
                    start: path.start(),
                    end: path.end(),
                    expected_start,
                    expected_end,
                });
            }
        }

        let [first, second] = &solution.paths;
        if let Some(shared) = first.shared_square(second) {
            return Err(Rejection::SharedSquare(shared));
        }

        for (index, path) in solution.paths.iter().enumerate() {
            let score = self.board.score(path, &solution.values);
            if score != self.target {
                return Err(Rejection::WrongScore { index: index + 1, score, target: self.target });
            }
        }

        Ok(())
    }
}
