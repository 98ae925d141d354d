use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::error::{ModelError, Result};

/// Exactly `n` consecutive corpus tokens used as a lookup key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Context(Vec<String>);

impl Context {
    pub fn new(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the context's last tokens equal `suffix`.
    pub fn ends_with(&self, suffix: &[String]) -> bool {
        self.0.ends_with(suffix)
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

/// Normalized next-token probabilities for one context, in first-seen order.
#[derive(Clone, Debug, PartialEq)]
pub struct ContinuationDistribution {
    tokens: Vec<String>,
    probabilities: Vec<f64>,
}

impl ContinuationDistribution {
    fn from_counts(counts: Vec<(String, usize)>) -> Self {
        let total: usize = counts.iter().map(|(_, c)| c).sum();
        let (tokens, probabilities): (Vec<String>, Vec<f64>) = counts
            .into_iter()
            .map(|(token, count)| (token, count as f64 / total as f64))
            .unzip();
        Self {
            tokens,
            probabilities,
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn probability(&self, token: &str) -> f64 {
        self.tokens
            .iter()
            .position(|t| t == token)
            .map_or(0.0, |i| self.probabilities[i])
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Token-level n-gram model: each context of `n` tokens maps to the
/// distribution of the token that followed it in the corpus.
///
/// Contexts keep first-seen corpus order, which makes seeded generation
/// reproducible. A corpus shorter than `n + 1` tokens yields an empty model.
#[derive(Clone, Debug)]
pub struct NGramModel {
    n: usize,
    contexts: Vec<(Context, ContinuationDistribution)>,
}

impl NGramModel {
    pub fn build<S: AsRef<str>>(tokens: &[S], n: usize) -> Result<Self> {
        if n == 0 {
            return Err(ModelError::InvalidContextSize(n));
        }

        // Counting pass. Order vectors remember first sightings.
        let mut order: Vec<Context> = Vec::new();
        let mut counts: HashMap<Context, Vec<(String, usize)>> = HashMap::new();
        let tokens: Vec<&str> = tokens.iter().map(|t| t.as_ref()).collect();

        for window in tokens.windows(n + 1) {
            let context = Context::new(window[..n].iter().map(|t| t.to_string()).collect());
            let next = window[n];

            if !counts.contains_key(&context) {
                order.push(context.clone());
            }
            let followers = counts.entry(context).or_default();
            match followers.iter_mut().find(|(t, _)| *t == next) {
                Some((_, count)) => *count += 1,
                None => followers.push((next.to_string(), 1)),
            }
        }

        // Normalizing pass.
        let contexts: Vec<(Context, ContinuationDistribution)> = order
            .into_iter()
            .map(|context| {
                let followers = counts.remove(&context).unwrap_or_default();
                (context, ContinuationDistribution::from_counts(followers))
            })
            .collect();

        debug!(n, tokens = tokens.len(), contexts = contexts.len(), "built n-gram model");
        Ok(Self { n, contexts })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    pub fn contexts(&self) -> impl Iterator<Item = (&Context, &ContinuationDistribution)> {
        self.contexts.iter().map(|(c, d)| (c, d))
    }

    /// Exact lookup of a full `n`-token context.
    pub fn distribution<S: AsRef<str>>(&self, context: &[S]) -> Option<&ContinuationDistribution> {
        self.contexts
            .iter()
            .find(|(c, _)| {
                c.len() == context.len()
                    && c.tokens().iter().zip(context).all(|(a, b)| a == b.as_ref())
            })
            .map(|(_, d)| d)
    }

    /// Every distribution whose context ends with `suffix`.
    pub fn matching(&self, suffix: &[String]) -> Vec<&ContinuationDistribution> {
        self.contexts
            .iter()
            .filter(|(c, _)| c.ends_with(suffix))
            .map(|(_, d)| d)
            .collect()
    }
}
