// SPDX-License-Identifier: AGPL-3.0-only

//! 4-D periodic lattice of SU(3) link variables.
//!
//! Pure link storage plus site geometry: the gauge action, forces, and the
//! HMC trajectory that would evolve these links live outside this crate.
//! The Dirac operator only needs `link` lookups and periodic neighbors.

use super::constants::HOT_START_EPSILON;
use super::su3::Su3Matrix;

/// 4-D lattice of SU(3) link variables.
///
/// Links are stored as `links[site_index * 4 + mu]` where mu ∈ {0,1,2,3}
/// runs over the four spacetime directions.
pub struct GaugeField {
    /// Lattice extents `[Nx, Ny, Nz, Nt]`.
    pub dims: [usize; 4],
    /// Link variables: links[site * 4 + mu].
    pub links: Vec<Su3Matrix>,
}

impl GaugeField {
    /// Total number of lattice sites.
    #[must_use]
    pub const fn volume(&self) -> usize {
        self.dims[0] * self.dims[1] * self.dims[2] * self.dims[3]
    }

    /// Convert 4-D coordinates to linear site index.
    ///
    /// Convention: `dims = [Nx, Ny, Nz, Nt]`, `x = [x, y, z, t]`, with z
    /// fastest and t slowest: `idx = t·NxNyNz + x·NyNz + y·Nz + z`.
    #[must_use]
    pub const fn site_index(&self, x: [usize; 4]) -> usize {
        x[3] * (self.dims[0] * self.dims[1] * self.dims[2])
            + x[0] * (self.dims[1] * self.dims[2])
            + x[1] * self.dims[2]
            + x[2]
    }

    /// Convert linear site index back to 4-D coordinates `[x, y, z, t]`.
    #[must_use]
    pub const fn site_coords(&self, idx: usize) -> [usize; 4] {
        let nxyz = self.dims[0] * self.dims[1] * self.dims[2];
        let t = idx / nxyz;
        let rem = idx % nxyz;
        let x0 = rem / (self.dims[1] * self.dims[2]);
        let rem2 = rem % (self.dims[1] * self.dims[2]);
        let x1 = rem2 / self.dims[2];
        let x2 = rem2 % self.dims[2];
        [x0, x1, x2, t]
    }

    /// Neighbor in direction mu with periodic boundary conditions.
    #[must_use]
    pub const fn neighbor(&self, x: [usize; 4], mu: usize, forward: bool) -> [usize; 4] {
        let mut y = x;
        if forward {
            y[mu] = (x[mu] + 1) % self.dims[mu];
        } else {
            y[mu] = (x[mu] + self.dims[mu] - 1) % self.dims[mu];
        }
        y
    }

    /// Get link `U_mu`(x).
    pub fn link(&self, x: [usize; 4], mu: usize) -> Su3Matrix {
        let idx = self.site_index(x);
        self.links[idx * 4 + mu]
    }

    /// Set link `U_mu`(x).
    pub fn set_link(&mut self, x: [usize; 4], mu: usize, u: Su3Matrix) {
        let idx = self.site_index(x);
        self.links[idx * 4 + mu] = u;
    }

    /// Cold start: all links = identity (ordered configuration).
    #[must_use]
    pub fn cold_start(dims: [usize; 4]) -> Self {
        let vol = dims[0] * dims[1] * dims[2] * dims[3];
        Self {
            dims,
            links: vec![Su3Matrix::IDENTITY; vol * 4],
        }
    }

    /// Hot start: random SU(3) links (disordered configuration).
    #[must_use]
    pub fn hot_start(dims: [usize; 4], seed: u64) -> Self {
        let vol = dims[0] * dims[1] * dims[2] * dims[3];
        let mut rng_seed = seed;
        let links: Vec<Su3Matrix> = (0..vol * 4)
            .map(|_| Su3Matrix::random_near_identity(&mut rng_seed, HOT_START_EPSILON))
            .collect();
        Self { dims, links }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_index_roundtrip() {
        let lat = GaugeField::cold_start([4, 6, 8, 10]);
        for idx in 0..lat.volume() {
            let coords = lat.site_coords(idx);
            let back = lat.site_index(coords);
            assert_eq!(idx, back, "site index roundtrip failed at {idx}");
        }
    }

    #[test]
    fn neighbor_periodic() {
        let lat = GaugeField::cold_start([4, 4, 4, 4]);
        let fwd = lat.neighbor([3, 0, 0, 0], 0, true);
        assert_eq!(fwd, [0, 0, 0, 0], "periodic forward wrap");
        let bwd = lat.neighbor([0, 0, 0, 0], 0, false);
        assert_eq!(bwd, [3, 0, 0, 0], "periodic backward wrap");
    }

    #[test]
    fn cold_start_links_are_identity() {
        let lat = GaugeField::cold_start([2, 2, 2, 2]);
        let u = lat.link([1, 0, 1, 0], 2);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((u.m[i][j].re - expected).abs() < 1e-15);
                assert!(u.m[i][j].im.abs() < 1e-15);
            }
        }
    }

    #[test]
    fn hot_start_links_are_unitary() {
        let lat = GaugeField::hot_start([2, 2, 2, 2], 42);
        let u = lat.link([0, 1, 0, 1], 1);
        let prod = u * u.adjoint();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (prod.m[i][j].re - expected).abs() < 1e-8,
                    "hot link should be unitary"
                );
            }
        }
    }

    #[test]
    fn set_link_replaces_only_the_addressed_link() {
        let mut lat = GaugeField::cold_start([2, 2, 2, 2]);
        let mut seed = 5u64;
        let u = Su3Matrix::random_near_identity(&mut seed, 0.4);
        lat.set_link([1, 0, 1, 0], 3, u);

        let back = lat.link([1, 0, 1, 0], 3);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(back.m[i][j], u.m[i][j], "written link reads back");
            }
        }

        // A different direction at the same site stays identity
        let other = lat.link([1, 0, 1, 0], 2);
        assert!((other.m[0][0].re - 1.0).abs() < 1e-15);
        assert!(other.m[0][1].norm() < 1e-15);
    }

    #[test]
    fn hot_start_deterministic_in_seed() {
        let a = GaugeField::hot_start([2, 2, 2, 2], 7);
        let b = GaugeField::hot_start([2, 2, 2, 2], 7);
        for (ua, ub) in a.links.iter().zip(b.links.iter()) {
            for i in 0..3 {
                for j in 0..3 {
                    assert_eq!(ua.m[i][j], ub.m[i][j]);
                }
            }
        }
    }
}
