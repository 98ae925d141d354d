pub mod generator;
pub mod model;

pub use generator::SequenceGenerator;
pub use model::{Context, ContinuationDistribution, NGramModel};
