use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{Level, debug, warn};

use crate::chain::matrix::StochasticMatrix;
use crate::chain::state::{Named, State, StateRegistry};
use crate::error::{ModelError, Result};
use crate::sampling;

/// A directed, weighted arc between two chain states.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub src: State,
    pub dst: State,
    pub weight: f64,
}

impl Edge {
    pub fn new(src: &State, dst: &State, weight: f64) -> Self {
        Self {
            src: src.clone(),
            dst: dst.clone(),
            weight,
        }
    }
}

/// A discrete Markov chain over named states.
///
/// Row `i` of the transition matrix is the outgoing distribution of the
/// state registered at index `i`.
#[derive(Clone, Debug)]
pub struct MarkovChain {
    states: StateRegistry<State>,
    transitions: StochasticMatrix,
}

impl MarkovChain {
    /// Builds a chain from weighted edges.
    ///
    /// States are registered edge by edge, source before destination. Every
    /// registered state needs outgoing edges summing to one, otherwise
    /// construction fails with [`ModelError::Validation`].
    pub fn new(edges: &[Edge]) -> Result<Self> {
        let mut states = StateRegistry::new();
        let mut entries = Vec::with_capacity(edges.len());
        for edge in edges {
            let src = states.register(edge.src.clone());
            let dst = states.register(edge.dst.clone());
            entries.push((src, dst, edge.weight));
        }

        let transitions = StochasticMatrix::from_entries(states.len(), states.len(), entries)?;
        let chain = Self {
            states,
            transitions,
        };
        debug!(states = chain.states.len(), edges = edges.len(), "built markov chain");

        if tracing::enabled!(Level::DEBUG) {
            match chain.eigen_spectrum() {
                Ok(spectrum) => debug!(?spectrum, "transition spectrum"),
                Err(err) => warn!(%err, "transition spectrum unavailable"),
            }
        }

        Ok(chain)
    }

    pub fn states(&self) -> &[State] {
        self.states.as_slice()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn index_of(&self, state: &State) -> Result<usize> {
        self.states
            .index_of(state.name())
            .ok_or_else(|| ModelError::UnknownState {
                name: state.name().to_string(),
            })
    }

    pub fn transition_matrix(&self) -> &StochasticMatrix {
        &self.transitions
    }

    /// Samples the successor of `current` from its transition row.
    pub fn next_state<R: Rng + ?Sized>(&self, current: &State, rng: &mut R) -> Result<&State> {
        let idx = self.index_of(current)?;
        sampling::sample(rng, self.states.as_slice(), self.transitions.row(idx))
    }

    /// Produces a random walk of exactly `length` states.
    ///
    /// Starts at `start` if given, otherwise at a uniformly chosen state. The
    /// state is recorded before each transition, so the walk never includes
    /// the destination of a final step.
    pub fn walk<R: Rng + ?Sized>(
        &self,
        length: usize,
        start: Option<&State>,
        rng: &mut R,
    ) -> Result<Vec<State>> {
        if length == 0 {
            return Ok(Vec::new());
        }

        let mut current = match start {
            Some(state) => {
                self.index_of(state)?;
                state
            }
            None => sampling::choose_uniform(rng, self.states.as_slice())?,
        };

        let mut walk = Vec::with_capacity(length);
        walk.push(current.clone());
        while walk.len() < length {
            current = self.next_state(current, rng)?;
            walk.push(current.clone());
        }
        Ok(walk)
    }
}
