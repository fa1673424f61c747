// SPDX-License-Identifier: AGPL-3.0-only

//! SU(3) matrix operations for lattice gauge theory.
//!
//! An SU(3) matrix is a 3×3 unitary matrix with determinant 1. Each link
//! variable `U_μ`(x) is one of these, the parallel transporter along
//! direction μ from site x. The Dirac operator consumes links through
//! matrix × color-vector products only, so this module keeps just the group
//! operations a spectrum measurement needs: multiply, adjoint, determinant,
//! reunitarization, and random generation for hot starts.
//!
//! # References
//!
//! - Gattringer & Lang, "QCD on the Lattice" (2010), Ch. 2
//! - Creutz, "Quarks, Gluons and Lattices" (1983), Ch. 8

use std::ops::Mul;

use num_complex::Complex64;

use super::constants::{lcg_gaussian, DIVISION_GUARD};

const C_ZERO: Complex64 = Complex64::new(0.0, 0.0);
const C_ONE: Complex64 = Complex64::new(1.0, 0.0);
const C_I: Complex64 = Complex64::new(0.0, 1.0);

/// 3×3 complex matrix — SU(3) link variable.
///
/// Row-major storage: `m[row][col]`.
#[derive(Clone, Copy, Debug)]
#[must_use]
pub struct Su3Matrix {
    /// Matrix elements m[row][col].
    pub m: [[Complex64; 3]; 3],
}

impl Mul for Su3Matrix {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let mut r = Self::ZERO;
        for i in 0..3 {
            for j in 0..3 {
                let mut s = C_ZERO;
                for k in 0..3 {
                    s += self.m[i][k] * rhs.m[k][j];
                }
                r.m[i][j] = s;
            }
        }
        r
    }
}

impl Su3Matrix {
    /// 3×3 identity matrix.
    pub const IDENTITY: Self = Self {
        m: [
            [C_ONE, C_ZERO, C_ZERO],
            [C_ZERO, C_ONE, C_ZERO],
            [C_ZERO, C_ZERO, C_ONE],
        ],
    };

    /// Zero matrix (all elements 0).
    pub const ZERO: Self = Self {
        m: [[C_ZERO; 3]; 3],
    };

    /// Conjugate transpose (adjoint / dagger).
    pub fn adjoint(self) -> Self {
        let mut r = Self::ZERO;
        for i in 0..3 {
            for j in 0..3 {
                r.m[i][j] = self.m[j][i].conj();
            }
        }
        r
    }

    /// Determinant of a 3×3 complex matrix.
    pub fn det(self) -> Complex64 {
        let m = &self.m;
        let a = m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1]);
        let b = m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0]);
        let c = m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0]);
        a - b + c
    }

    /// Project back onto SU(3) via modified Gram-Schmidt reunitarization.
    ///
    /// Orthonormalizes the first two rows and rebuilds the third as the
    /// conjugate cross product, which fixes det = 1.
    pub fn reunitarize(self) -> Self {
        let mut u = self;

        // Normalize row 0
        let n0 = row_norm(&u, 0);
        if n0 > DIVISION_GUARD {
            let inv = 1.0 / n0;
            for j in 0..3 {
                u.m[0][j] *= inv;
            }
        }

        // Orthogonalize row 1 against row 0, then normalize
        let dot01 = row_dot(&u, 0, 1);
        for j in 0..3 {
            let correction = u.m[0][j] * dot01;
            u.m[1][j] -= correction;
        }
        let n1 = row_norm(&u, 1);
        if n1 > DIVISION_GUARD {
            let inv = 1.0 / n1;
            for j in 0..3 {
                u.m[1][j] *= inv;
            }
        }

        // Row 2 = conj(row 0 × row 1) to ensure det = 1
        u.m[2][0] = (u.m[0][1] * u.m[1][2] - u.m[0][2] * u.m[1][1]).conj();
        u.m[2][1] = (u.m[0][2] * u.m[1][0] - u.m[0][0] * u.m[1][2]).conj();
        u.m[2][2] = (u.m[0][0] * u.m[1][1] - u.m[0][1] * u.m[1][0]).conj();

        u
    }

    /// Generate a random SU(3) matrix near identity (hot-start links).
    ///
    /// Returns exp(i ε H) for a random traceless Hermitian H with LCG-drawn
    /// components, expanded to second order and reunitarized.
    pub fn random_near_identity(seed: &mut u64, epsilon: f64) -> Self {
        let mut h = [[C_ZERO; 3]; 3];
        let mut rand_gauss = || -> f64 { lcg_gaussian(seed) };

        // Diagonal (traceless): a3 * λ3 + a8 * λ8
        let a3 = rand_gauss() * epsilon;
        let a8 = rand_gauss() * epsilon;
        h[0][0] = Complex64::new(a3 + a8 / 3.0_f64.sqrt(), 0.0);
        h[1][1] = Complex64::new(-a3 + a8 / 3.0_f64.sqrt(), 0.0);
        h[2][2] = Complex64::new(-2.0 * a8 / 3.0_f64.sqrt(), 0.0);

        // Off-diagonal
        for (i, j) in [(0, 1), (0, 2), (1, 2)] {
            let re = rand_gauss() * epsilon;
            let im = rand_gauss() * epsilon;
            h[i][j] = Complex64::new(re, im);
            h[j][i] = Complex64::new(re, -im); // Hermitian
        }

        // exp(iH) ≈ I + iH - H²/2 for small ε
        let mut result = Self::IDENTITY;
        for (i, row) in result.m.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell += C_I * h[i][j];
            }
        }

        for (i, row) in result.m.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                let h2_ij = (0..3).fold(C_ZERO, |acc, k| acc + h[i][k] * h[k][j]);
                *cell -= h2_ij * 0.5;
            }
        }

        result.reunitarize()
    }
}

fn row_norm(u: &Su3Matrix, row: usize) -> f64 {
    let mut s = 0.0;
    for j in 0..3 {
        s += u.m[row][j].norm_sqr();
    }
    s.sqrt()
}

fn row_dot(u: &Su3Matrix, r1: usize, r2: usize) -> Complex64 {
    let mut s = C_ZERO;
    for j in 0..3 {
        s += u.m[r1][j].conj() * u.m[r2][j];
    }
    s
}
