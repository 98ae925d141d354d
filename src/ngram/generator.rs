use rand::Rng;
use tracing::trace;

use crate::error::{ModelError, Result};
use crate::ngram::model::NGramModel;
use crate::sampling;

/// Extends a token sequence one token at a time from an [`NGramModel`].
///
/// Each step looks at the last `min(n, output length)` tokens of the output,
/// gathers every context ending with exactly those tokens, picks one of
/// them uniformly (not weighted by corpus frequency), then draws the next
/// token from that context's distribution. While the output is shorter than
/// `n` this is a suffix match rather than a full-context match.
///
/// A step with no matching context fails the whole call with
/// [`ModelError::NoMatchingContext`]; there is no lower-order fallback.
/// The scan is linear in the number of contexts, so generating `length`
/// tokens costs `O(length * contexts)`.
pub struct SequenceGenerator<'a> {
    model: &'a NGramModel,
}

impl<'a> SequenceGenerator<'a> {
    pub fn new(model: &'a NGramModel) -> Self {
        Self { model }
    }

    /// Returns `start` followed by `length` generated tokens.
    ///
    /// `start` is assumed to be in the corpus vocabulary; callers validate it.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        start: &str,
        length: usize,
        rng: &mut R,
    ) -> Result<Vec<String>> {
        if self.model.is_empty() {
            return Err(ModelError::NoMatchingContext {
                suffix: start.to_string(),
            });
        }

        let mut out = Vec::with_capacity(length + 1);
        out.push(start.to_string());
        for _ in 0..length {
            let next = self.step(&out, rng)?;
            trace!(token = %next, "generated");
            out.push(next);
        }
        Ok(out)
    }

    /// Draws the token that follows `out`.
    pub fn step<R: Rng + ?Sized>(&self, out: &[String], rng: &mut R) -> Result<String> {
        let consider = self.model.n().min(out.len());
        let suffix = &out[out.len() - consider..];

        let matches = self.model.matching(suffix);
        if matches.is_empty() {
            return Err(ModelError::NoMatchingContext {
                suffix: suffix.join(" "),
            });
        }

        let chosen = sampling::choose_uniform(rng, &matches)?;
        let token = sampling::sample(rng, chosen.tokens(), chosen.probabilities())?;
        Ok(token.clone())
    }
}
