// SPDX-License-Identifier: AGPL-3.0-only

//! Dense complex eigendecomposition of the projected matrix.
//!
//! The Arnoldi iteration compresses the Dirac operator into a small dense
//! Hessenberg matrix; diagonalizing that matrix is delegated here. The
//! concrete backend is LAPACK `zgeev` through `ndarray-linalg` — selected at
//! build time, and the only property the caller may rely on is the pairing
//! of each eigenvalue with its eigenvector column. **No eigenvalue ordering
//! is guaranteed**; the eigensolver applies its own magnitude sort.

use ndarray::Array2;
use ndarray_linalg::Eig;
use num_complex::Complex64;

use crate::error::GlueballError;

/// Eigenvalues and eigenvectors of a dense complex square matrix.
///
/// `vectors` holds one eigenvector per column, matching `values` by index.
/// Vectors are normalized by the backend but arrive in no particular order.
pub fn eigendecompose(
    h: &Array2<Complex64>,
) -> Result<(Vec<Complex64>, Array2<Complex64>), GlueballError> {
    let (values, vectors) = h.eig()?;
    Ok((values.to_vec(), vectors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn diagonal_matrix_recovers_entries() {
        let h = array![
            [Complex64::new(2.0, 0.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(-1.0, 3.0)],
        ];
        let (values, _) = eigendecompose(&h).expect("eig of diagonal");
        let mut mags: Vec<f64> = values.iter().map(|v| v.norm()).collect();
        mags.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((mags[0] - 2.0).abs() < 1e-12);
        assert!((mags[1] - 10.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn eigenvector_columns_pair_with_values() {
        // Upper-triangular: eigenvalues on the diagonal
        let h = array![
            [Complex64::new(1.0, 0.0), Complex64::new(0.5, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(4.0, 0.0)],
        ];
        let (values, vectors) = eigendecompose(&h).expect("eig");
        for (i, lambda) in values.iter().enumerate() {
            // Check H v = λ v column by column
            for row in 0..2 {
                let hv = h[[row, 0]] * vectors[[0, i]] + h[[row, 1]] * vectors[[1, i]];
                let lv = *lambda * vectors[[row, i]];
                assert!(
                    (hv - lv).norm() < 1e-12,
                    "column {i} is not an eigenvector: row {row}"
                );
            }
        }
    }

    #[test]
    fn complex_rotation_matrix_has_unit_imaginary_pair() {
        // [[0, -1], [1, 0]] rotates by 90°: eigenvalues ±i
        let h = array![
            [Complex64::new(0.0, 0.0), Complex64::new(-1.0, 0.0)],
            [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
        ];
        let (values, _) = eigendecompose(&h).expect("eig");
        let mut ims: Vec<f64> = values.iter().map(|v| v.im).collect();
        ims.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((ims[0] + 1.0).abs() < 1e-12);
        assert!((ims[1] - 1.0).abs() < 1e-12);
        for v in &values {
            assert!(v.re.abs() < 1e-12);
        }
    }
}
