use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Anything identified by its name. Registries look items up by this key.
pub trait Named {
    fn name(&self) -> &str;
}

/// A hidden state of a Markov chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State(String);

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl Named for State {
    fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A symbol of an HMM's emission alphabet.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObservationState(String);

impl ObservationState {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl Named for ObservationState {
    fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObservationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Assigns stable, insertion-ordered indices to named items.
///
/// The index of an item is the position at which its name was first
/// registered. Registries only grow; nothing is ever removed, so an index
/// handed out once stays valid for the life of the registry.
#[derive(Clone, Debug)]
pub struct StateRegistry<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: Named> StateRegistry<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Returns the index of `item`, registering it if its name is new.
    pub fn register(&mut self, item: T) -> usize {
        if let Some(&idx) = self.index.get(item.name()) {
            return idx;
        }
        let idx = self.items.len();
        self.index.insert(item.name().to_string(), idx);
        self.items.push(item);
        idx
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, idx: usize) -> Option<&T> {
        self.items.get(idx)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: Named> Default for StateRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
