use std::fmt::{Display, Formatter};

use crate::board::Board;
use crate::location::Location;
use crate::path::Path;
use crate::region::{Region, RegionValues};
use crate::search::Score;
use crate::shape::{KnightStep, Step};

/// What a move does to the running score.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Operation {
    /// The move stays within one region.
    Add,
    /// The move crosses into another region.
    Multiply,
}

impl Operation {
    fn between(from: Region, to: Region) -> Self {
        if from == to { Self::Add } else { Self::Multiply }
    }

    // saturating, so an oversized score never wraps around onto a target
    fn apply(&self, score: Score, operand: u32) -> Score {
        match self {
            Self::Add => score.saturating_add(operand as Score),
            Self::Multiply => score.saturating_mul(operand as Score),
        }
    }
}

/// Score a sequence of region labels: start at the first region's value,
/// then add the next region's value on every move within a region and multiply by it on every move across regions.
///
/// An empty sequence scores 0.
pub fn score_regions(regions: &[Region], values: &RegionValues) -> Score {
    let Some(first) = regions.first() else {
        return 0;
    };

    regions.windows(2).fold(values[*first] as Score, |score, pair| {
        let operand = values[pair[1]];
        Operation::between(pair[0], pair[1]).apply(score, operand)
    })
}

/// One move of a scored path.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ScoreStep<Sh = KnightStep>
where
    Sh: Step,
{
    /// Square the move leaves.
    pub from: Location,
    /// Square the move lands on.
    pub to: Location,
    /// The move itself.
    pub step: Sh,
    /// Add within a region, multiply across regions.
    pub operation: Operation,
    /// Value of the region moved into.
    pub operand: u32,
    /// Running score before the move.
    pub before: Score,
    /// Running score after the move.
    pub after: Score,
}

impl<Sh: Step> Display for ScoreStep<Sh> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let symbol = match self.operation {
            Operation::Add => '+',
            Operation::Multiply => '*',
        };
        write!(f, "{} to {}: {} {} {} = {}", self.from, self.to, self.before, symbol, self.operand, self.after)
    }
}

/// Iterator over the [`ScoreStep`]s of a path, see [`Board::score_steps`].
pub struct ScoreSteps<'a, Sh>
where
    Sh: Step,
{
    board: &'a Board<Sh>,
    values: &'a RegionValues,
    squares: &'a [Location],
    index: usize,
    score: Score,
}

impl<Sh> Iterator for ScoreSteps<'_, Sh>
where
    Sh: Step,
{
    type Item = ScoreStep<Sh>;

    fn next(&mut self) -> Option<Self::Item> {
        let (from, to) = (*self.squares.get(self.index)?, *self.squares.get(self.index + 1)?);
        let step = self.board.move_between(from, to)?;
        self.index += 1;

        let to_region = self.board.region_of(to);
        let operation = Operation::between(self.board.region_of(from), to_region);
        let operand = self.values[to_region];
        let before = self.score;
        self.score = operation.apply(before, operand);

        Some(ScoreStep { from, to, step, operation, operand, before, after: self.score })
    }
}

impl<Sh> Board<Sh>
where
    Sh: Step,
{
    /// The region of every square of `path`, in order.
    pub fn regions_along(&self, path: &Path) -> Vec<Region> {
        path.squares().iter().map(|location| self.region_of(*location)).collect()
    }

    /// Score `path` under `values`, see [`score_regions`].
    ///
    /// # Panics
    /// If `path` leaves the region map.
    pub fn score(&self, path: &Path, values: &RegionValues) -> Score {
        score_regions(&self.regions_along(path), values)
    }

    /// The moves of `path` one at a time, with the running score before and after each.
    ///
    /// A one square path has no steps; its score is the value of its region.
    /// The steps end early at the first pair of squares this board has no move between.
    pub fn score_steps<'a>(&'a self, path: &'a Path, values: &'a RegionValues) -> ScoreSteps<'a, Sh> {
        ScoreSteps {
            board: self,
            values,
            squares: path.squares(),
            index: 0,
            score: values[self.region_of(path.start())] as Score,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::Puzzle;
    use crate::region::Region::{A, B, C};

    #[rstest]
    #[case(& [A, A, B], [2, 3, 5], 12)]
    #[case(& [A], [2, 3, 5], 2)]
    #[case(& [C], [2, 3, 5], 5)]
    #[case(& [A, B, A], [2, 3, 5], 12)]
    #[case(& [B, B, B], [2, 3, 5], 9)]
    #[case(& [A, B, B, C], [2, 3, 5], 45)]
    #[case(& [], [2, 3, 5], 0)]
    fn automaton(#[case] regions: &[Region], #[case] values: [u32; 3], #[case] expected: Score) {
        assert_eq!(score_regions(regions, &RegionValues::new(values).unwrap()), expected);
    }

    #[test]
    fn order_matters() {
        let values = RegionValues::new([2, 3, 5]).unwrap();
        // (2 + 2) * 3 against (2 * 3) + 3
        assert_eq!(score_regions(&[A, A, B], &values), 12);
        assert_eq!(score_regions(&[A, B, B], &values), 9);
    }

    #[test]
    fn saturates_instead_of_wrapping() {
        let values = RegionValues::new([u32::MAX, u32::MAX - 1, u32::MAX - 2]).unwrap();
        let regions = [A, B, C].repeat(4);
        assert_eq!(score_regions(&regions, &values), Score::MAX);
    }

    #[test]
    fn steps_end_on_the_score() {
        let puzzle = Puzzle::october_2024();
        let values = RegionValues::new([1, 3, 2]).unwrap();
        let path: Path = "a1,c2,a3,c4,d6,b5,d4,f3,e5,c6,a5,b3,d2,e4,f6".parse().unwrap();

        let steps = puzzle.board.score_steps(&path, &values).collect::<Vec<_>>();
        assert_eq!(steps.len(), path.len() - 1);
        assert_eq!(steps[0].to_string(), "a1 to c2: 1 * 3 = 3");
        assert_eq!(steps[0].step, KnightStep::RightTwoUp);
        assert_eq!(steps[1].step, KnightStep::LeftTwoUp);
        assert_eq!(steps[6].to_string(), "d4 to f3: 108 + 2 = 110");
        assert_eq!(steps.last().unwrap().after, 2024);
        assert_eq!(puzzle.board.score(&path, &values), 2024);
        assert!(steps.windows(2).all(|pair| pair[0].after == pair[1].before));
    }

    #[test]
    fn single_square_has_no_steps() {
        let puzzle = Puzzle::october_2024();
        let values = RegionValues::new([4, 5, 6]).unwrap();
        let path: Path = "f6".parse().unwrap();

        assert_eq!(puzzle.board.score_steps(&path, &values).count(), 0);
        assert_eq!(puzzle.board.score(&path, &values), 6);
    }

    #[test]
    fn steps_stop_at_an_illegal_move() {
        let puzzle = Puzzle::october_2024();
        let values = RegionValues::new([1, 3, 2]).unwrap();
        let path: Path = "a1,c2,d2,f3".parse().unwrap();

        let steps = puzzle.board.score_steps(&path, &values).collect::<Vec<_>>();
        assert_eq!(steps.len(), 1);
        assert_eq!((steps[0].from, steps[0].to), (Location(0, 0), Location(2, 1)));
    }
}
