//! Best-effort eigen-diagnostics for transition matrices.
//!
//! Nothing here is needed to walk a chain. A transition matrix with complex
//! eigenvalues (a chain rotating through three states, for instance) reports
//! [`ModelError::Diagnostic`] instead of a spectrum.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::chain::markov::MarkovChain;
use crate::error::{ModelError, Result};

const INVERSE_ITERATIONS: usize = 50;
const POWER_MAX_ITERATIONS: usize = 100_000;
const POWER_TOLERANCE: f64 = 1e-13;

/// Real eigenvalues of a transition matrix with their left eigenvectors.
///
/// Eigenvalues are sorted by descending value. For a row-stochastic matrix
/// the first eigenvalue is 1 and its eigenvector, scaled to sum to one, is
/// the stationary distribution.
#[derive(Clone, Debug, Serialize)]
pub struct EigenSpectrum {
    pub eigenvalues: Vec<f64>,
    pub left_eigenvectors: Vec<Vec<f64>>,
}

impl MarkovChain {
    fn transposed_transitions(&self) -> DMatrix<f64> {
        let m = self.transition_matrix();
        let cells: Vec<f64> = (0..m.rows()).flat_map(|r| m.row(r).to_vec()).collect();
        DMatrix::from_row_slice(m.rows(), m.cols(), &cells).transpose()
    }

    /// Left eigen-decomposition of the transition matrix.
    pub fn eigen_spectrum(&self) -> Result<EigenSpectrum> {
        if self.is_empty() {
            return Err(ModelError::Diagnostic("chain has no states".into()));
        }
        // Left eigenvectors of P are right eigenvectors of P^T.
        let transposed = self.transposed_transitions();
        let mut eigenvalues: Vec<f64> = transposed
            .eigenvalues()
            .ok_or_else(|| {
                ModelError::Diagnostic("transition matrix has complex eigenvalues".into())
            })?
            .iter()
            .copied()
            .collect();
        eigenvalues.sort_by(|a, b| b.total_cmp(a));

        let left_eigenvectors = eigenvalues
            .iter()
            .map(|&lambda| inverse_iteration(&transposed, lambda))
            .collect::<Result<Vec<_>>>()?;

        Ok(EigenSpectrum {
            eigenvalues,
            left_eigenvectors,
        })
    }

    /// Long-run state occupancy, indexed like [`MarkovChain::states`].
    ///
    /// Iterates the lazy chain `(P + I) / 2`, which shares `P`'s stationary
    /// distribution but is aperiodic, so periodic chains still converge.
    pub fn stationary_distribution(&self) -> Result<Vec<f64>> {
        let n = self.len();
        if n == 0 {
            return Err(ModelError::Diagnostic("chain has no states".into()));
        }
        let transposed = self.transposed_transitions();
        let mut pi = DVector::from_element(n, 1.0 / n as f64);

        for _ in 0..POWER_MAX_ITERATIONS {
            let next = (&transposed * &pi + &pi) * 0.5;
            let delta = (&next - &pi).abs().sum();
            pi = next;
            if delta < POWER_TOLERANCE {
                return Ok(pi.iter().copied().collect());
            }
        }
        Err(ModelError::Diagnostic(
            "stationary distribution did not converge".into(),
        ))
    }
}

/// Eigenvector of `m` for the eigenvalue closest to `lambda`.
fn inverse_iteration(m: &DMatrix<f64>, lambda: f64) -> Result<Vec<f64>> {
    let n = m.nrows();
    // Offset the shift slightly so the system is nearly, not exactly, singular.
    let shift = lambda + 1e-10 * lambda.abs().max(1.0);
    let lu = (m - DMatrix::identity(n, n) * shift).lu();

    let mut v = DVector::from_element(n, 1.0);
    for _ in 0..INVERSE_ITERATIONS {
        let next = lu.solve(&v).ok_or_else(|| {
            ModelError::Diagnostic(format!("inverse iteration failed for eigenvalue {lambda}"))
        })?;
        let norm = next.norm();
        if !norm.is_finite() || norm == 0.0 {
            return Err(ModelError::Diagnostic(format!(
                "inverse iteration diverged for eigenvalue {lambda}"
            )));
        }
        v = next / norm;
    }

    // Prefer the probability-vector scaling when it exists.
    let sum = v.sum();
    if sum.abs() > 1e-9 {
        v /= sum;
    } else if let Some(first) = v.iter().copied().find(|x| x.abs() > 1e-12) {
        v *= first.signum();
    }
    Ok(v.iter().copied().collect())
}
