//! Puzzle datasets and the write-once dataset cache

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::{Lazy, OnceCell};

use crate::error::DatasetError;
use crate::puzzle::{Difficulty, PuzzleRecord};
use crate::random::PuzzleRng;

/// A list of puzzle records, every one of which decodes to a valid puzzle
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    puzzles: Vec<PuzzleRecord>,
}

impl Dataset {
    pub fn new(puzzles: Vec<PuzzleRecord>) -> Result<Self, DatasetError> {
        for record in &puzzles {
            record.to_puzzle().map_err(|e| {
                debug!("Puzzle {} is invalid", record.id);
                e
            })?;
        }
        Ok(Self { puzzles })
    }

    /// Parses a JSON array of puzzle records
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        Self::new(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, DatasetError> {
        Self::new(serde_json::from_reader(reader)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        debug!("Reading dataset from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn puzzles(&self) -> &[PuzzleRecord] {
        &self.puzzles
    }

    pub fn to_json(&self) -> Result<String, DatasetError> {
        Ok(serde_json::to_string_pretty(&self.puzzles)?)
    }

    pub fn select(&self, difficulty: Difficulty, seed: u64) -> Option<&PuzzleRecord> {
        select_puzzle(&self.puzzles, difficulty, seed)
    }
}

/// Picks a puzzle of the given difficulty using the seed. If no puzzle has that difficulty, any
/// puzzle may be picked. Returns `None` only if there are no puzzles.
pub fn select_puzzle(
    puzzles: &[PuzzleRecord],
    difficulty: Difficulty,
    seed: u64,
) -> Option<&PuzzleRecord> {
    let mut matching: Vec<&PuzzleRecord> =
        puzzles.iter().filter(|p| p.difficulty == difficulty).collect();
    if matching.is_empty() {
        debug!("No {} puzzles, selecting from all {}", difficulty, puzzles.len());
        matching = puzzles.iter().collect();
    }
    if matching.is_empty() {
        return None;
    }
    let index = PuzzleRng::from_seed(seed).gen_index(matching.len());
    Some(matching[index])
}

/// The state of a `DatasetCache`
#[derive(Debug)]
pub enum CacheState<'a> {
    Uninitialized,
    Loading,
    Ready(&'a Dataset),
    Failed(&'a DatasetError),
}

impl CacheState<'_> {
    pub fn is_ready(&self) -> bool {
        matches!(self, CacheState::Ready(_))
    }
}

/// Holds a dataset that is loaded at most once. A failed load stays failed.
#[derive(Default)]
pub struct DatasetCache {
    dataset: OnceCell<Result<Dataset, DatasetError>>,
    loading: AtomicBool,
}

static GLOBAL: Lazy<DatasetCache> = Lazy::new(DatasetCache::new);

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache
    pub fn global() -> &'static DatasetCache {
        &GLOBAL
    }

    pub fn state(&self) -> CacheState<'_> {
        match self.dataset.get() {
            Some(Ok(dataset)) => CacheState::Ready(dataset),
            Some(Err(e)) => CacheState::Failed(e),
            None if self.loading.load(Ordering::Acquire) => CacheState::Loading,
            None => CacheState::Uninitialized,
        }
    }

    /// Runs `loader` unless the cache has already been loaded, then returns the final state.
    /// Concurrent callers wait for the first load to finish.
    pub fn load_with<F>(&self, loader: F) -> CacheState<'_>
    where
        F: FnOnce() -> Result<Dataset, DatasetError>,
    {
        self.dataset.get_or_init(|| {
            self.loading.store(true, Ordering::Release);
            let result = loader();
            match &result {
                Ok(dataset) => info!("Loaded {} puzzles", dataset.puzzles().len()),
                Err(e) => warn!("Failed to load dataset: {}", e),
            }
            self.loading.store(false, Ordering::Release);
            result
        });
        self.state()
    }

    pub fn load_file(&self, path: impl AsRef<Path>) -> CacheState<'_> {
        self.load_with(|| Dataset::from_file(path))
    }

    /// The loaded puzzles, or nothing if the dataset is not ready
    pub fn puzzles(&self) -> &[PuzzleRecord] {
        match self.state() {
            CacheState::Ready(dataset) => dataset.puzzles(),
            _ => &[],
        }
    }
}
