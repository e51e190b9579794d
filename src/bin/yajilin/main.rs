#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused_qualifications)]

use std::fs;

use anyhow::{bail, Context, Result};
use yajilin::dataset::{select_puzzle, CacheState, Dataset, DatasetCache};
use yajilin::path::validate_loop;
use yajilin::puzzle::{Difficulty, GeneratorConfig, Puzzle, PuzzleRecord};
use yajilin::solve::SolveResult;

use crate::options::{Options, Source};

mod options;

fn main() -> Result<()> {
    env_logger::init();
    let options = Options::from_args()?;
    let seed = options.seed().unwrap_or_else(rand::random);
    let records = match options.source() {
        Source::Generate(generate) => {
            let difficulty = options.difficulty().unwrap_or(Difficulty::Medium);
            let mut records = Vec::new();
            for i in 0..generate.count {
                let seed = seed.wrapping_add(u64::from(i));
                println!(
                    "Generating {}x{} puzzle {}/{} (seed {})",
                    generate.rows,
                    generate.cols,
                    i + 1,
                    generate.count,
                    seed
                );
                let puzzle = Puzzle::generate(generate.rows, generate.cols, seed)?;
                records.push(puzzle.to_record(format!("generated-{}", seed), difficulty));
            }
            records
        }
        Source::Dataset(path) => {
            let puzzles = match DatasetCache::global().load_file(path) {
                CacheState::Ready(dataset) => dataset.puzzles(),
                CacheState::Failed(e) => {
                    bail!("could not load dataset {}: {}", path.display(), e)
                }
                CacheState::Uninitialized | CacheState::Loading => {
                    bail!("dataset {} was not loaded", path.display())
                }
            };
            let difficulty = options.difficulty().unwrap_or(Difficulty::Easy);
            let record = match select_puzzle(puzzles, difficulty, seed) {
                Some(record) => record,
                None => bail!("dataset {} is empty", path.display()),
            };
            println!("Selected puzzle {} (seed {})", record.id, seed);
            vec![record.clone()]
        }
    };

    for record in &records {
        let puzzle = record
            .to_puzzle()
            .with_context(|| format!("decoding puzzle {}", record.id))?;
        print_puzzle(record, &puzzle, &options);
        if options.check() {
            check_puzzle(&puzzle);
        }
    }

    if let Some(path) = options.output_path() {
        let json = Dataset::new(records)?.to_json()?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        println!("Saved puzzles to {}", path.display());
    }
    Ok(())
}

fn print_puzzle(record: &PuzzleRecord, puzzle: &Puzzle, options: &Options) {
    println!(
        "{} ({}, {} clues)\n{}",
        record.id,
        record.difficulty,
        puzzle.clue_count(),
        puzzle
    );
    if options.show_solution() {
        println!("{}", puzzle.display_solution());
    }
}

fn check_puzzle(puzzle: &Puzzle) {
    let msg = match GeneratorConfig::default().solver(puzzle.clues()).solve() {
        SolveResult::Unsolvable => "Clues have no solution",
        SolveResult::Solved(ref shading) if shading == puzzle.solution_shading() => {
            "Clues have a unique shading"
        }
        SolveResult::Solved(_) => "Clues have a unique shading that differs from the solution",
        SolveResult::MultipleSolutions => "Clues have multiple shadings",
        SolveResult::Inconclusive => "Solver reached its iteration limit",
    };
    println!("{}", msg);
    match validate_loop(
        puzzle.solution_path(),
        puzzle.solution_shading(),
        puzzle.clues(),
    ) {
        Ok(()) => println!("Solution loop is valid"),
        Err(e) => println!("Solution loop is invalid: {} ({})", e, e.reason()),
    }
}
