use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
#[error("invalid puzzle: {}", msg)]
pub struct InvalidPuzzle {
    msg: String,
}

impl InvalidPuzzle {
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("unknown difficulty {:?}, expected easy, medium or hard", .0)]
pub struct ParseDifficultyError(pub(crate) String);

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("error reading dataset file")]
    Io(#[from] io::Error),
    #[error("error parsing dataset")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidPuzzle(#[from] InvalidPuzzle),
}
