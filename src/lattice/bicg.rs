// SPDX-License-Identifier: AGPL-3.0-only

//! BiCGStab solver for the non-Hermitian staggered Dirac system D x = b.
//!
//! The shift-invert arm of the eigensolver needs D⁻¹ applied to each new
//! Krylov direction; the staggered operator is normal but not Hermitian, so
//! plain CG is out and BiCGStab (van der Vorst's stabilized bi-Lanczos) is
//! the workhorse. Convergence criterion is the relative residual
//! ||r|| / ||b|| < tol.
//!
//! # References
//!
//! - van der Vorst, SIAM J. Sci. Stat. Comput. 13, 631 (1992)
//! - Gattringer & Lang, "QCD on the Lattice" (2010), Ch. 8.4

use num_complex::Complex64;

use crate::error::GlueballError;

use super::constants::DIVISION_GUARD;
use super::dirac::DiracOperator;
use super::field::FermionField;

const C_ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Iteration statistics of a converged solve.
#[derive(Clone, Debug)]
pub struct SolveStats {
    /// Iterations consumed.
    pub iterations: usize,
    /// Relative residual ||b - Dx|| / ||b|| on exit.
    pub final_residual: f64,
    /// Relative residual of the initial guess.
    pub initial_residual: f64,
}

/// BiCGStab solver with a persistent tolerance and iteration budget.
///
/// One instance is owned by the eigensolver and reused sequentially across
/// Krylov steps; it carries no per-solve state.
pub struct BiConjugateGradient {
    precision: f64,
    max_iterations: usize,
}

impl Default for BiConjugateGradient {
    fn default() -> Self {
        Self::new()
    }
}

impl BiConjugateGradient {
    /// Solver with default tolerance 1e-10 and budget of 5000 iterations.
    #[must_use]
    pub fn new() -> Self {
        Self {
            precision: 1e-10,
            max_iterations: 5000,
        }
    }

    /// Set the relative-residual tolerance for subsequent solves.
    pub fn set_precision(&mut self, precision: f64) {
        self.precision = precision;
    }

    /// Current relative-residual tolerance.
    #[must_use]
    pub fn precision(&self) -> f64 {
        self.precision
    }

    /// Set the iteration budget.
    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.max_iterations = max_iterations;
    }

    /// Solve D x = b to the configured tolerance, starting from `x`.
    ///
    /// `x` holds the solution on success. Scalar breakdowns and an exhausted
    /// iteration budget are errors; both leave `x` in an unspecified state.
    pub fn solve(
        &self,
        operator: &dyn DiracOperator,
        b: &FermionField,
        x: &mut FermionField,
    ) -> Result<SolveStats, GlueballError> {
        let vol = operator.volume();

        let b_norm = b.norm();
        if b_norm * b_norm < DIVISION_GUARD {
            x.zero();
            return Ok(SolveStats {
                iterations: 0,
                final_residual: 0.0,
                initial_residual: 0.0,
            });
        }
        let tol = self.precision * b_norm;

        // r = b - D x
        let mut t = FermionField::zeros(vol);
        operator.multiply(&mut t, x);
        let mut r = b.clone();
        r.axpy(-C_ONE, &t);
        r.sync_halo();

        let initial_residual = r.norm() / b_norm;
        if r.norm() <= tol {
            return Ok(SolveStats {
                iterations: 0,
                final_residual: initial_residual,
                initial_residual,
            });
        }

        // Shadow residual is the frozen initial residual
        let r_hat = r.clone();

        let mut rho_prev = C_ONE;
        let mut alpha = C_ONE;
        let mut omega = C_ONE;

        let mut p = FermionField::zeros(vol);
        let mut v = FermionField::zeros(vol);

        let mut residual = initial_residual;

        for iteration in 1..=self.max_iterations {
            let rho = r_hat.dot(&r);
            if rho.norm() < DIVISION_GUARD {
                return Err(GlueballError::SolverBreakdown {
                    iteration,
                    quantity: "rho",
                });
            }

            // p = r + beta (p - omega v)
            let beta = (rho / rho_prev) * (alpha / omega);
            p.axpy(-omega, &v);
            p.rotate_inplace(beta);
            p.axpy(C_ONE, &r);
            p.sync_halo();

            operator.multiply(&mut v, &p);

            let denom = r_hat.dot(&v);
            if denom.norm() < DIVISION_GUARD {
                return Err(GlueballError::SolverBreakdown {
                    iteration,
                    quantity: "r_hat.v",
                });
            }
            alpha = rho / denom;

            // s = r - alpha v (stored in r)
            r.axpy(-alpha, &v);
            r.sync_halo();
            if r.norm() <= tol {
                x.axpy(alpha, &p);
                x.sync_halo();
                return Ok(SolveStats {
                    iterations: iteration,
                    final_residual: r.norm() / b_norm,
                    initial_residual,
                });
            }

            operator.multiply(&mut t, &r);
            let t_norm_sq = t.norm_sq();
            if t_norm_sq < DIVISION_GUARD {
                return Err(GlueballError::SolverBreakdown {
                    iteration,
                    quantity: "t.t",
                });
            }
            omega = t.dot(&r) / t_norm_sq;

            // x += alpha p + omega s
            x.axpy(alpha, &p);
            x.axpy(omega, &r);

            // r = s - omega t
            r.axpy(-omega, &t);
            r.sync_halo();

            residual = r.norm() / b_norm;
            if residual <= self.precision {
                x.sync_halo();
                return Ok(SolveStats {
                    iterations: iteration,
                    final_residual: residual,
                    initial_residual,
                });
            }

            rho_prev = rho;
        }

        Err(GlueballError::SolverStagnation {
            iterations: self.max_iterations,
            residual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::dirac::StaggeredDirac;
    use crate::lattice::gauge::GaugeField;

    #[test]
    fn solve_on_cold_lattice() {
        let gauge = GaugeField::cold_start([4, 4, 4, 4]);
        let vol = gauge.volume();
        let d = StaggeredDirac::new(&gauge, 1.0);
        let b = FermionField::random(vol, 42);
        let mut x = FermionField::zeros(vol);

        let solver = BiConjugateGradient::new();
        let stats = solver.solve(&d, &b, &mut x).expect("should converge");
        assert!(stats.final_residual < 1e-10);

        // Verify D x ≈ b
        let mut dx = FermionField::zeros(vol);
        d.multiply(&mut dx, &x);
        let rel = dx.difference_norm(&b) / b.norm();
        assert!(rel < 1e-8, "Dx should match b: relative residual {rel:.3e}");
    }

    #[test]
    fn zero_rhs_returns_zero_solution() {
        let gauge = GaugeField::cold_start([4, 4, 4, 4]);
        let vol = gauge.volume();
        let d = StaggeredDirac::new(&gauge, 0.1);
        let b = FermionField::zeros(vol);
        let mut x = FermionField::random(vol, 3);

        let solver = BiConjugateGradient::new();
        let stats = solver.solve(&d, &b, &mut x).expect("trivial solve");
        assert_eq!(stats.iterations, 0);
        assert!(x.norm_sq() < 1e-20, "solution of Dx = 0 should be zero");
    }

    #[test]
    fn solve_on_hot_lattice() {
        let gauge = GaugeField::hot_start([4, 4, 4, 4], 42);
        let vol = gauge.volume();
        let d = StaggeredDirac::new(&gauge, 0.5);
        let b = FermionField::random(vol, 123);
        let mut x = FermionField::zeros(vol);

        let mut solver = BiConjugateGradient::new();
        solver.set_precision(1e-8);
        let stats = solver.solve(&d, &b, &mut x).expect("should converge");

        let mut dx = FermionField::zeros(vol);
        d.multiply(&mut dx, &x);
        let rel = dx.difference_norm(&b) / b.norm();
        assert!(
            rel < 1e-7,
            "hot-lattice solve residual {rel:.3e} after {} iterations",
            stats.iterations
        );
    }

    #[test]
    fn precision_accessor_roundtrip() {
        let mut solver = BiConjugateGradient::new();
        solver.set_precision(3e-7);
        assert_eq!(solver.precision(), 3e-7);
    }

    #[test]
    fn tight_budget_reports_stagnation() {
        let gauge = GaugeField::hot_start([4, 4, 4, 4], 7);
        let vol = gauge.volume();
        let d = StaggeredDirac::new(&gauge, 0.05);
        let b = FermionField::random(vol, 55);
        let mut x = FermionField::zeros(vol);

        let mut solver = BiConjugateGradient::new();
        solver.set_precision(1e-12);
        solver.set_max_iterations(2);
        let err = solver.solve(&d, &b, &mut x).unwrap_err();
        assert!(matches!(err, GlueballError::SolverStagnation { .. }));
    }
}
