pub mod definition;
pub mod hmm;
pub mod markov;
pub mod matrix;
pub mod spectrum;
pub mod state;

pub use hmm::{HiddenMarkovModel, ObservationEdge, ObservedPair};
pub use markov::{Edge, MarkovChain};
pub use matrix::StochasticMatrix;
pub use state::{Named, ObservationState, State, StateRegistry};
