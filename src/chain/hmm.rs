use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chain::markov::MarkovChain;
use crate::chain::matrix::StochasticMatrix;
use crate::chain::state::{Named, ObservationState, State, StateRegistry};
use crate::error::{ModelError, Result};
use crate::sampling;

/// Probability that a chain state emits a given observation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObservationEdge {
    pub state: State,
    pub observation: ObservationState,
    pub weight: f64,
}

impl ObservationEdge {
    pub fn new(state: &State, observation: &ObservationState, weight: f64) -> Self {
        Self {
            state: state.clone(),
            observation: observation.clone(),
            weight,
        }
    }
}

/// A visited chain state paired with the observation it emitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ObservedPair {
    pub state: State,
    pub observation: ObservationState,
}

impl fmt::Display for ObservedPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.state, self.observation)
    }
}

/// A Markov chain whose states each emit an observation.
///
/// Emission rows are indexed by chain-state index; columns by an
/// independently registered observation alphabet. Each emission depends only
/// on the co-indexed chain state, never on earlier emissions.
#[derive(Clone, Debug)]
pub struct HiddenMarkovModel {
    chain: MarkovChain,
    observations: StateRegistry<ObservationState>,
    emissions: StochasticMatrix,
}

impl HiddenMarkovModel {
    pub fn new(chain: MarkovChain, edges: &[ObservationEdge]) -> Result<Self> {
        let mut observations = StateRegistry::new();
        let mut entries = Vec::with_capacity(edges.len());
        for edge in edges {
            let row = chain.index_of(&edge.state)?;
            let col = observations.register(edge.observation.clone());
            entries.push((row, col, edge.weight));
        }

        let emissions = StochasticMatrix::from_entries(chain.len(), observations.len(), entries)?;
        debug!(
            states = chain.len(),
            observations = observations.len(),
            "built hidden markov model"
        );
        Ok(Self {
            chain,
            observations,
            emissions,
        })
    }

    pub fn chain(&self) -> &MarkovChain {
        &self.chain
    }

    pub fn observation_states(&self) -> &[ObservationState] {
        self.observations.as_slice()
    }

    pub fn emission_matrix(&self) -> &StochasticMatrix {
        &self.emissions
    }

    pub fn observation_index(&self, observation: &ObservationState) -> Result<usize> {
        self.observations
            .index_of(observation.name())
            .ok_or_else(|| ModelError::UnknownState {
                name: observation.name().to_string(),
            })
    }

    /// Samples one observation from `state`'s emission row.
    pub fn emit<R: Rng + ?Sized>(&self, state: &State, rng: &mut R) -> Result<&ObservationState> {
        let idx = self.chain.index_of(state)?;
        sampling::sample(rng, self.observations.as_slice(), self.emissions.row(idx))
    }

    /// Emits one observation per state of an existing walk.
    pub fn observations<R: Rng + ?Sized>(
        &self,
        walk: &[State],
        rng: &mut R,
    ) -> Result<Vec<ObservationState>> {
        walk.iter()
            .map(|state| self.emit(state, rng).cloned())
            .collect()
    }

    /// Walks the hidden chain from a uniformly chosen state, then emits an
    /// observation for every visited state.
    ///
    /// The whole walk is drawn before any emission, so the hidden half of the
    /// result equals `chain().walk(length, None, rng)` under the same seed.
    pub fn observed_walk<R: Rng + ?Sized>(
        &self,
        length: usize,
        rng: &mut R,
    ) -> Result<Vec<ObservedPair>> {
        let walk = self.chain.walk(length, None, rng)?;
        let observations = self.observations(&walk, rng)?;
        Ok(walk
            .into_iter()
            .zip(observations)
            .map(|(state, observation)| ObservedPair { state, observation })
            .collect())
    }
}
