// SPDX-License-Identifier: AGPL-3.0-only

//! Lattice field theory — SU(3) gauge configurations and the Dirac
//! spectrum machinery that measures them.
//!
//! The measurement chain, leaves first:
//!
//! | Component | Role in the eigensolve |
//! |-----------|------------------------|
//! | `gauge` | SU(3) link variables the operator is bound to |
//! | `field` | Distributed-field primitive: site arithmetic, reductions |
//! | `dirac` | Matrix-free operator capability (bare, squared) |
//! | `bicg` | Inner solve for the shift-invert variant |
//! | `dense` | Eigendecomposition of the projected Hessenberg matrix |
//! | `arnoldi` | Krylov construction, Ritz extraction, the solver itself |
//!
//! # References
//!
//! - Gattringer & Lang, "Quantum Chromodynamics on the Lattice" (2010)
//! - Kogut & Susskind, PRD 11, 395 (1975)
//! - Saad, "Numerical Methods for Large Eigenvalue Problems" (2011)

/// Arnoldi eigensolver: extremal and shift-invert eigenpair extraction.
pub mod arnoldi;
/// BiCGStab solver for the non-Hermitian staggered Dirac system.
pub mod bicg;
/// LCG PRNG, lattice constants, and shared numerical guards.
pub mod constants;
/// Dense complex eigendecomposition of the projected matrix.
pub mod dense;
/// Staggered Dirac operator capability and its variants.
pub mod dirac;
/// Staggered fermion field: per-site color vectors, parallel arithmetic.
pub mod field;
/// 4-D periodic lattice of SU(3) link variables.
pub mod gauge;
/// SU(3) 3×3 complex matrix operations.
pub mod su3;
