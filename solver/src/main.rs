//! # solver
//!
//! Command line front end for `knightmare`. With no options it solves Knight Moves 6 as published;
//! every option swaps one part of that puzzle for another. `solver verify <SOLUTION>` checks a solution instead
//! and prints how each path is scored.

use std::num::NonZero;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{debug, error};

use knightmare::builder::{Builder, RegionBoardBuilder};
use knightmare::{Location, Puzzle, Score, SearchControl, SearchOutcome, SearchPolicy, OCTOBER_2024_LAYOUT};

/// Find region values and two disjoint knight paths that score a target.
#[derive(Clone, Debug, Parser)]
#[command(version, about)]
struct Opts {
    /// Score both paths must reach.
    #[arg(short, long, default_value_t = 2024)]
    target: Score,

    /// Region values must sum to less than this.
    #[arg(short, long, default_value_t = 50)]
    bound: u32,

    /// Longest path considered, in squares.
    #[arg(short, long, default_value_t = 15)]
    max_length: usize,

    /// Which solution to report when there are several.
    #[arg(short, long, default_value_t = SearchPolicy::FirstMatch)]
    policy: SearchPolicy,

    /// Give up after trying this many value assignments.
    #[arg(long)]
    max_assignments: Option<usize>,

    /// Region rows, top row first, separated by commas, e.g. `ABBCCC,...,AAABBC`.
    #[arg(short, long, value_delimiter = ',')]
    layout: Option<Vec<String>>,

    /// Start of the first path.
    #[arg(long, default_value = "a1")]
    from1: Location,

    /// End of the first path.
    #[arg(long, default_value = "f6")]
    to1: Location,

    /// Start of the second path.
    #[arg(long, default_value = "a6")]
    from2: Location,

    /// End of the second path.
    #[arg(long, default_value = "f1")]
    to2: Location,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Check a solution written as `A,B,C,` followed by both paths, and show how each path scores.
    Verify {
        solution: String,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let opts = Opts::parse();
    debug!("command line options: {:?}", opts);

    let Some(puzzle) = puzzle(&opts) else {
        return ExitCode::FAILURE;
    };
    println!("{}", puzzle.board);

    match &opts.command {
        Some(Command::Verify { solution }) => verify(&puzzle, solution),
        None => solve(&puzzle, &opts),
    }
}

fn puzzle(opts: &Opts) -> Option<Puzzle> {
    let rows = match &opts.layout {
        Some(rows) => rows.iter().map(String::as_str).collect::<Vec<_>>(),
        None => OCTOBER_2024_LAYOUT.to_vec(),
    };

    let width = rows.first().map_or(0, |row| row.chars().count());
    let (Some(width), Some(height)) = (NonZero::new(width), NonZero::new(rows.len())) else {
        error!("the layout needs at least one non-empty row");
        return None;
    };

    let board = match RegionBoardBuilder::with_dims((width, height)).paint_rows(&rows).build() {
        Ok(board) => board,
        Err(reasons) => {
            error!("unusable layout: {:?}", reasons);
            return None;
        }
    };

    Some(Puzzle {
        board,
        routes: [(opts.from1, opts.to1), (opts.from2, opts.to2)],
        target: opts.target,
        value_bound: opts.bound,
        max_length: opts.max_length,
        policy: opts.policy,
    })
}

fn solve(puzzle: &Puzzle, opts: &Opts) -> ExitCode {
    let mut control = SearchControl::new();
    if let Some(max) = opts.max_assignments {
        control = control.max_assignments(max);
    }

    match puzzle.solve(&control) {
        Ok(SearchOutcome::Solved(solution)) => {
            println!("{}", solution);
            ExitCode::SUCCESS
        }
        Ok(SearchOutcome::NoSolution) => {
            println!("No solution found.");
            ExitCode::SUCCESS
        }
        Ok(SearchOutcome::Interrupted) => {
            println!("Search interrupted before trying every assignment.");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn verify(puzzle: &Puzzle, text: &str) -> ExitCode {
    let solution = match puzzle.parse_solution(text) {
        Ok(solution) => solution,
        Err(e) => {
            error!("could not read solution: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let [a, b, c] = solution.values.as_array();
    println!("A = {}, B = {}, C = {}", a, b, c);
    for (index, path) in solution.paths.iter().enumerate() {
        println!("path {}: {}", index + 1, path);
        // squares off the board are reported by verify below
        if puzzle.board.check_path(path).is_ok() {
            for step in puzzle.board.score_steps(path, &solution.values) {
                println!("  {} ({:?})", step, step.step);
            }
            println!("  total {}", puzzle.board.score(path, &solution.values));
        }
    }

    match puzzle.verify(&solution) {
        Ok(()) => {
            println!("Valid solution.");
            ExitCode::SUCCESS
        }
        Err(rejection) => {
            println!("Rejected: {}", rejection);
            ExitCode::FAILURE
        }
    }
}
