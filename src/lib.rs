//! Discrete-state probabilistic text and sequence models.
//!
//! Two independent paths share one weighted sampler:
//! - [`chain`]: a weighted Markov chain over named states, optionally with a
//!   hidden-state emission layer, producing random walks.
//! - [`ngram`]: an empirical n-gram model learned from a token [`corpus`],
//!   extended token by token by a context-matching generator.
//!
//! All models are immutable once built. Randomness is always passed in as a
//! `rand::Rng`, so seeded runs are reproducible.

pub mod chain;
pub mod config;
pub mod corpus;
pub mod error;
pub mod logging;
pub mod ngram;
pub mod sampling;

pub use error::{ModelError, Result};
