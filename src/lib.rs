//! Generate, solve and validate Yajilin puzzles

#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused_qualifications)]

#[macro_use]
extern crate log;

pub mod collections;
pub mod dataset;
pub mod error;
pub mod path;
pub mod puzzle;
pub mod random;
pub mod session;
pub mod solve;

type HashSet<T> = ahash::AHashSet<T>;
