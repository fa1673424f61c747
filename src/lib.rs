// SPDX-License-Identifier: AGPL-3.0-only

//! glueball — Dirac spectrum measurements on SU(3) lattice gauge
//! configurations.
//!
//! The centerpiece is a restarted-free Arnoldi eigensolver that extracts the
//! extremal eigenpairs of the (non-Hermitian) lattice Dirac operator, and its
//! shift-invert companion that reaches the smallest-magnitude part of the
//! spectrum through an embedded BiCGStab solve. The low Dirac modes control
//! the chiral condensate via the Banks–Casher relation and feed the
//! measurement side of a Hybrid Monte Carlo pipeline; the HMC updater itself
//! lives outside this crate.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `lattice::constants` | LCG PRNG, lattice constants, numerical guards |
//! | `lattice::su3` | SU(3) 3×3 complex matrix operations |
//! | `lattice::gauge` | 4-D periodic lattice of SU(3) link variables |
//! | `lattice::field` | Per-site color-vector field, parallel arithmetic |
//! | `lattice::dirac` | Staggered Dirac operator capability and variants |
//! | `lattice::bicg` | BiCGStab solver for the non-Hermitian Dirac system |
//! | `lattice::dense` | Dense complex eigendecomposition (LAPACK `zgeev`) |
//! | `lattice::arnoldi` | Arnoldi eigensolver: extremal and shift-invert |
//! | `validation` | Pass/fail harness for the validation binaries |
//!
//! # References
//!
//! - Arnoldi, Quart. Appl. Math. 9, 17 (1951)
//! - Saad, "Numerical Methods for Large Eigenvalue Problems" (2011), Ch. 6
//! - Gattringer & Lang, "Quantum Chromodynamics on the Lattice" (2010)
//! - Banks & Casher, Nucl. Phys. B 169, 103 (1980)

pub mod error;
pub mod lattice;
pub mod validation;

pub use error::GlueballError;
