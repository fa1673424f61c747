// SPDX-License-Identifier: AGPL-3.0-only

//! Staggered Dirac spectrum validation.
//!
//! Checks the Arnoldi eigensolver against the closed-form free-field
//! spectrum and against structural properties that hold on any gauge
//! background.
//!
//! # Validation targets
//!
//! | Observable | Expected | Basis |
//! |-----------|----------|-------|
//! | Cold extremal Im | ±2 | Free spectrum m + i√k, k ≤ 4 on 4⁴ |
//! | Cold extremal Re | m | Hopping term is antihermitian |
//! | Cold lowest mode | m | Zero-momentum mode of the free operator |
//! | Shift-invert ordering | ascending |λ|| Magnitude sort after inversion |
//! | Hot extremal Re | m | Antihermiticity survives any background |
//! | Ritz vector norm | 1 | Orthonormal basis, normalized coefficients |
//! | Massless ±Im mirror | Im(λ₊) = -Im(λ₋) | Conjugation symmetry |

use std::time::Instant;

use glueball::lattice::arnoldi::{DiracEigenSolver, EigenvalueMode};
use glueball::lattice::dirac::StaggeredDirac;
use glueball::lattice::gauge::GaugeField;
use glueball::validation::ValidationHarness;

const MASS: f64 = 0.5;

fn main() {
    env_logger::init();

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║  Staggered Dirac Spectrum Validation                        ║");
    println!("║  Arnoldi extremal probe + BiCGStab shift-invert             ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let mut harness = ValidationHarness::new("dirac_spectrum");
    let t_start = Instant::now();

    // ═══ Test 1: free-field extremal spectrum ═══
    println!("═══ Cold 4⁴ Lattice, Extremal Probe ═══");
    {
        let gauge = GaugeField::cold_start([4, 4, 4, 4]);
        let d = StaggeredDirac::new(&gauge, MASS);
        println!("  bare mass m = {}", d.mass());
        let mut solver = DiracEigenSolver::new();
        solver.set_extra_steps(40);

        match solver.maximum_eigenvalues(&d, 3, EigenvalueMode::LargestReal) {
            Ok(spectrum) => {
                for (i, ev) in spectrum.eigenvalues.iter().enumerate() {
                    println!("  λ[{i}] = {:.9} + {:.9}i", ev.re, ev.im);
                }
                println!("  residual = {:.3e}", spectrum.residual);

                harness.check_abs("cold extremal Re", spectrum.eigenvalues[0].re, MASS, 1e-8);
                harness.check_abs(
                    "cold extremal |Im|",
                    spectrum.eigenvalues[0].im.abs(),
                    2.0,
                    1e-6,
                );
                harness.check_abs(
                    "cold third shell |Im|",
                    spectrum.eigenvalues[2].im.abs(),
                    3.0_f64.sqrt(),
                    1e-6,
                );
                harness.check_upper("cold extremal residual", spectrum.residual, 1e-6);
            }
            Err(e) => {
                println!("  SOLVE FAILED: {e}");
                harness.check_bool("cold extremal solve", false);
            }
        }
    }
    println!();

    // ═══ Test 2: free-field shift-invert ═══
    println!("═══ Cold 4⁴ Lattice, Shift-Invert ═══");
    {
        let gauge = GaugeField::cold_start([4, 4, 4, 4]);
        let d = StaggeredDirac::new(&gauge, MASS);
        let mut solver = DiracEigenSolver::new();
        solver.set_precision(1e-9);
        solver.set_extra_steps(6);

        match solver.minimum_eigenvalues(&d, 3) {
            Ok(spectrum) => {
                for (i, ev) in spectrum.eigenvalues.iter().enumerate() {
                    println!("  λ[{i}] = {:.9} + {:.9}i  (|λ| = {:.9})", ev.re, ev.im, ev.norm());
                }

                harness.check_abs(
                    "lowest mode at the mass",
                    spectrum.eigenvalues[0].norm(),
                    MASS,
                    1e-6,
                );
                harness.check_abs(
                    "second shell magnitude",
                    spectrum.eigenvalues[1].norm(),
                    (MASS * MASS + 1.0).sqrt(),
                    1e-6,
                );
                let ascending = spectrum
                    .eigenvalues
                    .windows(2)
                    .all(|w| w[0].norm() <= w[1].norm() + 1e-12);
                harness.check_bool("shift-invert ascending magnitude", ascending);
            }
            Err(e) => {
                println!("  SOLVE FAILED: {e}");
                harness.check_bool("cold shift-invert solve", false);
            }
        }
    }
    println!();

    // ═══ Test 3: hot background, structural properties ═══
    println!("═══ Hot 4⁴ Lattice (seed 42), Extremal Probe ═══");
    {
        let gauge = GaugeField::hot_start([4, 4, 4, 4], 42);
        let d = StaggeredDirac::new(&gauge, MASS);
        let mut solver = DiracEigenSolver::new();
        solver.set_extra_steps(30);

        match solver.maximum_eigenvalues(&d, 4, EigenvalueMode::LargestReal) {
            Ok(spectrum) => {
                for (i, ev) in spectrum.eigenvalues.iter().enumerate() {
                    println!("  λ[{i}] = {:.9} + {:.9}i", ev.re, ev.im);
                }
                println!("  residual = {:.3e}", spectrum.residual);

                for (i, ev) in spectrum.eigenvalues.iter().enumerate() {
                    harness.check_abs(&format!("hot Re pinned to mass [{i}]"), ev.re, MASS, 1e-7);
                }
                harness.check_abs(
                    "hot Ritz vector norm",
                    spectrum.eigenvectors[0].norm(),
                    1.0,
                    1e-8,
                );
            }
            Err(e) => {
                println!("  SOLVE FAILED: {e}");
                harness.check_bool("hot extremal solve", false);
            }
        }
    }
    println!();

    // ═══ Test 4: conjugation symmetry of the massless spectrum ═══
    println!("═══ Hot 4⁴ Lattice, Massless ±Im Probes ═══");
    {
        let gauge = GaugeField::hot_start([4, 4, 4, 4], 13);
        let d = StaggeredDirac::new(&gauge, 0.0);
        let mut solver = DiracEigenSolver::new();
        solver.set_extra_steps(60);

        let upper = solver.maximum_eigenvalues(&d, 1, EigenvalueMode::LargestImaginary);
        let lower = solver.maximum_eigenvalues(&d, 1, EigenvalueMode::SmallestImaginary);
        match (upper, lower) {
            (Ok(up), Ok(down)) => {
                let top = up.eigenvalues[0];
                let bottom = down.eigenvalues[0];
                println!("  +Im probe: {:.9} + {:.9}i", top.re, top.im);
                println!("  -Im probe: {:.9} + {:.9}i", bottom.re, bottom.im);

                harness.check_abs("massless +Im probe is imaginary", top.re, 0.0, 1e-7);
                harness.check_abs("±Im probes mirror", top.im + bottom.im, 0.0, 1e-5);
            }
            (up, down) => {
                if let Err(e) = up {
                    println!("  +Im SOLVE FAILED: {e}");
                }
                if let Err(e) = down {
                    println!("  -Im SOLVE FAILED: {e}");
                }
                harness.check_bool("massless imaginary probes", false);
            }
        }
    }

    println!();
    println!("Total time: {:.2} s", t_start.elapsed().as_secs_f64());
    harness.finish();
}
