use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;
use yajilin::puzzle::Difficulty;

const DEFAULT_SIZE: usize = 8;

#[derive(Clone, Debug)]
pub(crate) struct Options {
    source: Source,
    seed: Option<u64>,
    difficulty: Option<Difficulty>,
    output_path: Option<PathBuf>,
    check: bool,
    show_solution: bool,
}

impl Options {
    pub fn from_args() -> Result<Self> {
        Self::from_arg_matches(&clap_app().get_matches())
    }

    fn from_arg_matches(matches: &ArgMatches<'_>) -> Result<Self> {
        let source = if let Some(path) = matches.value_of("dataset") {
            Source::Dataset(path.into())
        } else {
            Source::Generate(Generate {
                rows: parse_value(matches, "rows")?.unwrap_or(DEFAULT_SIZE),
                cols: parse_value(matches, "cols")?.unwrap_or(DEFAULT_SIZE),
                count: parse_value(matches, "count")?.unwrap_or(1),
            })
        };
        Ok(Self {
            source,
            seed: parse_value(matches, "seed")?,
            difficulty: parse_value(matches, "difficulty")?,
            output_path: matches.value_of("output").map(PathBuf::from),
            check: matches.is_present("check"),
            show_solution: matches.is_present("show_solution"),
        })
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    pub fn check(&self) -> bool {
        self.check
    }

    pub fn show_solution(&self) -> bool {
        self.show_solution
    }
}

fn parse_value<T>(matches: &ArgMatches<'_>, name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    matches
        .value_of(name)
        .map(|s| {
            s.parse::<T>()
                .with_context(|| format!("invalid {}: {:?}", name, s))
        })
        .transpose()
}

#[derive(Clone, Debug)]
pub(crate) enum Source {
    Generate(Generate),
    Dataset(PathBuf),
}

#[derive(Clone, Debug)]
pub(crate) struct Generate {
    pub rows: usize,
    pub cols: usize,
    pub count: u32,
}

fn clap_app() -> clap::App<'static, 'static> {
    use clap::{App, Arg};

    App::new("Yajilin")
        .author("Cameron Steffen <cam.steffen94@gmail.com>")
        .about("Generate and check Yajilin puzzles")
        .arg(
            Arg::with_name("rows")
                .short("r")
                .long("rows")
                .takes_value(true)
                .value_name("ROWS")
                .conflicts_with("dataset")
                .help("number of rows of the generated puzzle")
                .display_order(1),
        )
        .arg(
            Arg::with_name("cols")
                .short("c")
                .long("cols")
                .takes_value(true)
                .value_name("COLS")
                .conflicts_with("dataset")
                .help("number of columns of the generated puzzle")
                .display_order(1),
        )
        .arg(
            Arg::with_name("count")
                .short("n")
                .long("count")
                .takes_value(true)
                .conflicts_with("dataset")
                .help("the number of puzzles to generate, using consecutive seeds"),
        )
        .arg(
            Arg::with_name("seed")
                .short("s")
                .long("seed")
                .takes_value(true)
                .help("seed for generation or dataset selection (random if absent)"),
        )
        .arg(
            Arg::with_name("dataset")
                .long("dataset")
                .takes_value(true)
                .value_name("PATH")
                .help("select a puzzle from a JSON dataset instead of generating one"),
        )
        .arg(
            Arg::with_name("difficulty")
                .short("d")
                .long("difficulty")
                .takes_value(true)
                .possible_values(&["easy", "medium", "hard"])
                .help("difficulty to select from the dataset, or to label generated puzzles with"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .value_name("PATH")
                .help("save the puzzle(s) as a JSON dataset"),
        )
        .arg(
            Arg::with_name("check")
                .long("check")
                .help("verify that the clues have a unique shading and the solution loop is valid"),
        )
        .arg(
            Arg::with_name("show_solution")
                .long("show-solution")
                .help("print the solution below each puzzle"),
        )
}
