use std::collections::{HashMap, HashSet};
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use itertools::Itertools;
use log::{info, trace, warn};
#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::board::Board;
use crate::candidates::{CandidateOrder, Candidates};
use crate::location::Location;
use crate::path::Path;
use crate::region::{Region, RegionValues};
use crate::score::score_regions;
use crate::shape::Step;

/// Running and final path scores.
pub type Score = u64;

/// Assignments handed to the thread pool at a time.
#[cfg(feature = "parallel")]
pub const PARALLEL_CHUNK: usize = 1024;

/// Which solution a search reports when several exist.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum SearchPolicy {
    /// The first solution in lexicographic order of the value triples.
    #[default]
    FirstMatch,
    /// A solution whose values have the smallest possible sum.
    /// Among equal sums, the first in lexicographic order wins.
    MinimizeSum,
}

impl SearchPolicy {
    /// Visiting triples in this order makes the first solution found the one this policy asks for.
    pub fn candidate_order(&self) -> CandidateOrder {
        match self {
            Self::FirstMatch => CandidateOrder::Lexicographic,
            Self::MinimizeSum => CandidateOrder::AscendingSum,
        }
    }
}

/// Caller-side limits on a search.
#[derive(Clone, Debug, Default)]
pub struct SearchControl {
    cancel: Option<Arc<AtomicBool>>,
    max_assignments: Option<usize>,
}

impl SearchControl {
    /// No limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop as soon as `flag` is raised. The search checks it before every assignment.
    pub fn cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Only try the first `max` assignments in search order.
    pub fn max_assignments(mut self, max: usize) -> Self {
        self.max_assignments = Some(max);
        self
    }

    fn budget(&self) -> usize {
        self.max_assignments.unwrap_or(usize::MAX)
    }

    /// Whether the cancellation flag, if any, has been raised.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Region values plus two vertex-disjoint paths that both hit the target.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Solution {
    /// Values of regions A, B and C.
    pub values: RegionValues,
    /// One path per route, in route order.
    pub paths: [Path; 2],
}

/// `A,B,C,` followed by both paths, e.g. `1,3,2,a1,c2,...,f6,a6,c5,...,f1`.
impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.values, self.paths[0], self.paths[1])
    }
}

/// How a search ended. Only [`SearchOutcome::Solved`] carries a solution; the others are ordinary results.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SearchOutcome {
    /// The first solution in search order.
    Solved(Solution),
    /// Every assignment was tried.
    NoSolution,
    /// Cancelled, or the assignment budget ran out with assignments left to try.
    Interrupted,
}

impl SearchOutcome {
    /// The solution, if the search found one.
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Self::Solved(solution) => Some(solution),
            _ => None,
        }
    }
}

// paths grouped by their sequence of regions, which is all a score depends on
struct PathSet<'a> {
    paths: &'a [Path],
    profiles: Vec<Vec<Region>>,
    // indices into `paths`, ascending
    members: Vec<Vec<usize>>,
}

impl<'a> PathSet<'a> {
    fn new<Sh: Step>(board: &Board<Sh>, paths: &'a [Path]) -> Self {
        let mut index_of: HashMap<Vec<Region>, usize> = HashMap::new();
        let mut profiles = Vec::new();
        let mut members: Vec<Vec<usize>> = Vec::new();

        for (index, path) in paths.iter().enumerate() {
            let profile = board.regions_along(path);
            let slot = *index_of.entry(profile.clone()).or_insert_with(|| {
                profiles.push(profile);
                members.push(Vec::new());
                members.len() - 1
            });
            members[slot].push(index);
        }

        Self { paths, profiles, members }
    }

    // indices of the paths scoring `target`, in their input order
    fn hits(&self, values: &RegionValues, target: Score) -> Vec<usize> {
        self.profiles.iter()
            .positions(|profile| score_regions(profile, values) == target)
            .map(|profile| self.members[profile].iter().copied())
            .kmerge()
            .collect()
    }
}

/// The joint search over region values and pairs of paths.
///
/// For each assignment in candidate order, walks the first path set in its own order, and for every path
/// scoring the target, walks the second path set for a path that also scores the target and shares no square with it.
/// The first such pair wins. Each distinct region sequence is scored once per assignment.
pub struct ScoredSearch<'a, Sh>
where
    Sh: Step,
{
    board: &'a Board<Sh>,
    first: PathSet<'a>,
    second: PathSet<'a>,
    target: Score,
}

impl<'a, Sh> ScoredSearch<'a, Sh>
where
    Sh: Step,
{
    /// Group both path sets by region sequence. `first` and `second` are searched in the order given.
    pub fn new(board: &'a Board<Sh>, first: &'a [Path], second: &'a [Path], target: Score) -> Self {
        Self {
            board,
            first: PathSet::new(board, first),
            second: PathSet::new(board, second),
            target,
        }
    }

    /// The board both path sets are scored on.
    pub fn board(&self) -> &Board<Sh> {
        self.board
    }

    /// The first pair of paths solving the puzzle under `values`, if any.
    pub fn try_values(&self, values: &RegionValues) -> Option<Solution> {
        let firsts = self.first.hits(values, self.target);
        if firsts.is_empty() {
            return None;
        }
        let seconds = self.second.hits(values, self.target);
        if seconds.is_empty() {
            return None;
        }
        trace!("{} and {} paths score {} under {}", firsts.len(), seconds.len(), self.target, values);

        for first in firsts {
            let first = &self.first.paths[first];
            let taken = first.squares().iter().collect::<HashSet<&Location>>();

            if let Some(second) = seconds.iter()
                .map(|second| &self.second.paths[*second])
                .find(|second| second.squares().iter().all(|location| !taken.contains(location))) {
                return Some(Solution { values: *values, paths: [first.clone(), second.clone()] });
            }
        }

        None
    }

    fn announce(&self, candidates: &Candidates) {
        info!(
            "searching {} x {} paths ({} x {} region sequences) for a score of {} with values summing below {}, {:?}",
            self.first.paths.len(),
            self.second.paths.len(),
            self.first.profiles.len(),
            self.second.profiles.len(),
            self.target,
            candidates.bound(),
            candidates.order(),
        );
    }

    /// Try `candidates` in order and report the first solution, subject to `control`.
    #[cfg(not(feature = "parallel"))]
    pub fn run(&self, mut candidates: Candidates, control: &SearchControl) -> SearchOutcome {
        self.announce(&candidates);
        if control.is_cancelled() {
            warn!("search cancelled before it started");
            return SearchOutcome::Interrupted;
        }

        let budget = control.budget();
        let mut tried = 0usize;
        for values in candidates.by_ref() {
            if control.is_cancelled() {
                warn!("search cancelled after {} assignments", tried);
                return SearchOutcome::Interrupted;
            }
            if tried == budget {
                warn!("search stopped after its budget of {} assignments", budget);
                return SearchOutcome::Interrupted;
            }
            tried += 1;

            if let Some(solution) = self.try_values(&values) {
                info!("solved after {} assignments: {}", tried, solution);
                return SearchOutcome::Solved(solution);
            }
        }

        info!("no solution among {} assignments", tried);
        SearchOutcome::NoSolution
    }

    /// Try `candidates` in order and report the first solution, subject to `control`.
    ///
    /// Assignments are drawn lazily in chunks of [`PARALLEL_CHUNK`] and each chunk is evaluated in parallel,
    /// but the solution reported is the one a sequential search would find.
    #[cfg(feature = "parallel")]
    pub fn run(&self, mut candidates: Candidates, control: &SearchControl) -> SearchOutcome {
        self.announce(&candidates);
        if control.is_cancelled() {
            warn!("search cancelled before it started");
            return SearchOutcome::Interrupted;
        }

        let budget = control.budget();
        let mut tried = 0usize;
        {
            let chunks = candidates.by_ref().take(budget).chunks(PARALLEL_CHUNK);
            for chunk in &chunks {
                let chunk = chunk.collect_vec();
                tried += chunk.len();

                let found = chunk.into_par_iter().find_map_first(|values| {
                    if control.is_cancelled() {
                        return None;
                    }
                    self.try_values(&values)
                });

                // a cancelled worker may have skipped an earlier hit
                if control.is_cancelled() {
                    warn!("search cancelled after {} assignments", tried);
                    return SearchOutcome::Interrupted;
                }
                if let Some(solution) = found {
                    info!("solved within {} assignments: {}", tried, solution);
                    return SearchOutcome::Solved(solution);
                }
            }
        }

        if tried == budget && candidates.next().is_some() {
            warn!("search stopped after its budget of {} assignments", budget);
            return SearchOutcome::Interrupted;
        }

        info!("no solution among {} assignments", tried);
        SearchOutcome::NoSolution
    }
}

/// Search values below `bound` and pairs from `first` and `second` for a solution scoring `target`, under `policy`.
pub fn find_solution<Sh: Step>(
    board: &Board<Sh>,
    first: &[Path],
    second: &[Path],
    target: Score,
    bound: u32,
    policy: SearchPolicy,
    control: &SearchControl,
) -> SearchOutcome {
    ScoredSearch::new(board, first, second, target)
        .run(Candidates::new(bound, policy.candidate_order()), control)
}
