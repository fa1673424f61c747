// SPDX-License-Identifier: AGPL-3.0-only

//! Typed errors for the eigensolver and its embedded collaborators.
//!
//! All variants are fatal to the solve call that raised them: the Ritz
//! reconstruction needs the complete Krylov basis and projected matrix, so
//! no partial result survives a mid-iteration failure. The convergence
//! residual reported on success is diagnostic only and never raises an
//! error — callers that need tighter accuracy re-invoke with more extra
//! steps or a smaller precision.

use thiserror::Error;

/// Errors arising from an eigensolve or its embedded linear solve.
#[derive(Debug, Error)]
pub enum GlueballError {
    /// The caller asked for zero eigenpairs.
    #[error("eigenvalue request must ask for at least one pair")]
    EmptySpectrumRequest,

    /// The operator acts on an empty lattice volume.
    #[error("operator is bound to an empty lattice (volume 0)")]
    EmptyOperator,

    /// Basis extension hit an invariant subspace smaller than the request.
    ///
    /// The residual norm underflowed the breakdown guard after `dimension`
    /// orthonormal directions, so no further Krylov vector exists. The solve
    /// stops rather than dividing by a degenerate norm.
    #[error("Krylov basis exhausted: invariant subspace of dimension {dimension} cannot yield {requested} eigenpairs")]
    InvariantSubspace { dimension: usize, requested: usize },

    /// The embedded BiCGStab solve missed its tolerance within the budget.
    #[error("BiCGStab stalled after {iterations} iterations: relative residual {residual:.3e}")]
    SolverStagnation { iterations: usize, residual: f64 },

    /// A scalar breakdown (zero denominator) inside BiCGStab.
    #[error("BiCGStab breakdown at iteration {iteration}: |{quantity}| underflowed")]
    SolverBreakdown {
        iteration: usize,
        quantity: &'static str,
    },

    /// The dense eigendecomposition of the projected matrix failed.
    #[error("dense eigendecomposition failed: {0}")]
    Eigendecomposition(#[from] ndarray_linalg::error::LinalgError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_empty_request() {
        let err = GlueballError::EmptySpectrumRequest;
        assert!(err.to_string().contains("at least one pair"));
    }

    #[test]
    fn display_invariant_subspace() {
        let err = GlueballError::InvariantSubspace {
            dimension: 3,
            requested: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("dimension 3"));
        assert!(msg.contains("5 eigenpairs"));
    }

    #[test]
    fn display_stagnation_formats_residual() {
        let err = GlueballError::SolverStagnation {
            iterations: 200,
            residual: 3.2e-4,
        };
        let msg = err.to_string();
        assert!(msg.contains("200 iterations"));
        assert!(msg.contains("3.200e-4"));
    }

    #[test]
    fn error_trait_object() {
        let err = GlueballError::EmptyOperator;
        let dyn_err: &dyn std::error::Error = &err;
        assert!(dyn_err.to_string().contains("volume 0"));
    }
}
