use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::chain::hmm::{HiddenMarkovModel, ObservationEdge};
use crate::chain::markov::{Edge, MarkovChain};
use crate::chain::state::{ObservationState, State};

/// A hand-written chain, optionally with emissions, read from TOML.
///
/// ```toml
/// [[edges]]
/// src = "cold"
/// dst = "hot"
/// weight = 0.5
///
/// [[emissions]]
/// state = "cold"
/// observation = "one"
/// weight = 0.5
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ModelDefinition {
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub emissions: Vec<ObservationEdge>,
}

impl ModelDefinition {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading model definition {}", path.display()))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let definition: ModelDefinition = toml::from_str(content)?;
        Ok(definition)
    }

    pub fn has_emissions(&self) -> bool {
        !self.emissions.is_empty()
    }

    pub fn build_chain(&self) -> Result<MarkovChain> {
        Ok(MarkovChain::new(&self.edges)?)
    }

    pub fn build_hmm(&self) -> Result<HiddenMarkovModel> {
        if !self.has_emissions() {
            bail!("model definition has no emissions");
        }
        Ok(HiddenMarkovModel::new(self.build_chain()?, &self.emissions)?)
    }

    /// The two-state weather model: hot and cold days emitting one, two or
    /// three ice creams.
    pub fn weather() -> Self {
        let cold = State::new("cold");
        let hot = State::new("hot");
        let one = ObservationState::new("one");
        let two = ObservationState::new("two");
        let three = ObservationState::new("three");

        Self {
            edges: vec![
                Edge::new(&cold, &cold, 0.5),
                Edge::new(&cold, &hot, 0.5),
                Edge::new(&hot, &cold, 0.4),
                Edge::new(&hot, &hot, 0.6),
            ],
            emissions: vec![
                ObservationEdge::new(&cold, &one, 0.5),
                ObservationEdge::new(&cold, &two, 0.4),
                ObservationEdge::new(&cold, &three, 0.1),
                ObservationEdge::new(&hot, &one, 0.2),
                ObservationEdge::new(&hot, &two, 0.4),
                ObservationEdge::new(&hot, &three, 0.4),
            ],
        }
    }
}

pub fn weather_chain() -> crate::error::Result<MarkovChain> {
    MarkovChain::new(&ModelDefinition::weather().edges)
}

pub fn weather_hmm() -> crate::error::Result<HiddenMarkovModel> {
    let definition = ModelDefinition::weather();
    HiddenMarkovModel::new(MarkovChain::new(&definition.edges)?, &definition.emissions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_factories_build() {
        let chain = weather_chain().unwrap();
        assert_eq!(chain.len(), 2);
        let hmm = weather_hmm().unwrap();
        let names: Vec<String> = hmm
            .observation_states()
            .iter()
            .map(|o| o.to_string())
            .collect();
        assert_eq!(names, vec!["one", "two", "three"]);
        assert_eq!(hmm.emission_matrix().row(0), &[0.5, 0.4, 0.1]);
    }

    #[test]
    fn parses_toml_definition() {
        let toml_str = r#"
[[edges]]
src = "sunny"
dst = "rainy"
weight = 0.25

[[edges]]
src = "sunny"
dst = "sunny"
weight = 0.75

[[edges]]
src = "rainy"
dst = "sunny"
weight = 1.0

[[emissions]]
state = "sunny"
observation = "walk"
weight = 1.0

[[emissions]]
state = "rainy"
observation = "shop"
weight = 1.0
"#;
        let definition = ModelDefinition::from_toml(toml_str).unwrap();
        assert_eq!(definition.edges.len(), 3);
        assert_eq!(definition.edges[0].src, State::new("sunny"));

        let hmm = definition.build_hmm().unwrap();
        assert_eq!(hmm.chain().len(), 2);
        assert_eq!(hmm.observation_states().len(), 2);
    }

    #[test]
    fn chain_only_definition_has_no_hmm() {
        let definition = ModelDefinition::from_toml(
            r#"
[[edges]]
src = "a"
dst = "a"
weight = 1.0
"#,
        )
        .unwrap();
        assert!(definition.build_chain().is_ok());
        assert!(definition.build_hmm().is_err());
    }

    #[test]
    fn invalid_weights_surface_validation_error() {
        let definition = ModelDefinition::from_toml(
            r#"
[[edges]]
src = "a"
dst = "a"
weight = 0.9
"#,
        )
        .unwrap();
        let err = definition.build_chain().unwrap_err();
        assert!(err.to_string().contains("sums to"));
    }
}
