// SPDX-License-Identifier: AGPL-3.0-only

//! Shared harness for the validation binaries.
//!
//! Every validation binary follows the same pattern: hardcoded expected
//! values with a documented basis, explicit pass/fail checks against stated
//! tolerances, a machine-readable summary on stdout, and exit code 0 only
//! if every check passes.

use std::process;

/// One recorded check: label, verdict, and a preformatted detail line.
#[derive(Debug, Clone)]
pub struct Check {
    /// Human-readable label.
    pub label: String,
    /// Whether the check passed.
    pub passed: bool,
    /// Observed-vs-expected detail for the summary.
    pub detail: String,
}

/// Accumulates checks and produces a summary with exit code.
#[derive(Debug, Default)]
#[must_use]
pub struct ValidationHarness {
    name: String,
    checks: Vec<Check>,
}

impl ValidationHarness {
    /// Harness for a named validation binary.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            checks: Vec::new(),
        }
    }

    /// |observed - expected| < tolerance
    pub fn check_abs(&mut self, label: &str, observed: f64, expected: f64, tolerance: f64) {
        self.checks.push(Check {
            label: label.to_string(),
            passed: (observed - expected).abs() < tolerance,
            detail: format!("{observed:.9e} vs {expected:.9e} (abs {tolerance:.1e})"),
        });
    }

    /// observed < threshold
    pub fn check_upper(&mut self, label: &str, observed: f64, threshold: f64) {
        self.checks.push(Check {
            label: label.to_string(),
            passed: observed < threshold,
            detail: format!("{observed:.9e} < {threshold:.1e}"),
        });
    }

    /// Boolean pass/fail.
    pub fn check_bool(&mut self, label: &str, passed: bool) {
        self.checks.push(Check {
            label: label.to_string(),
            passed,
            detail: String::from(if passed { "true" } else { "false" }),
        });
    }

    /// Number of checks that passed.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Whether all checks passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Print the summary and exit: 0 if every check passed, 1 otherwise.
    pub fn finish(&self) -> ! {
        println!();
        println!(
            "═══ {} validation: {}/{} checks passed ═══",
            self.name,
            self.passed_count(),
            self.checks.len()
        );
        for check in &self.checks {
            let icon = if check.passed { "✓" } else { "✗" };
            println!("  {icon} {}: {}", check.label, check.detail);
        }
        process::exit(i32::from(!self.all_passed()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abs_check_respects_tolerance() {
        let mut h = ValidationHarness::new("test");
        h.check_abs("inside", 1.0005, 1.0, 1e-3);
        h.check_abs("outside", 1.01, 1.0, 1e-3);
        assert_eq!(h.passed_count(), 1);
        assert!(!h.all_passed());
    }

    #[test]
    fn upper_bound_is_strict() {
        let mut h = ValidationHarness::new("test");
        h.check_upper("below", 0.5, 1.0);
        h.check_upper("at", 1.0, 1.0);
        assert_eq!(h.passed_count(), 1);
    }

    #[test]
    fn bool_check_records_verdict() {
        let mut h = ValidationHarness::new("test");
        h.check_bool("yes", true);
        assert!(h.all_passed());
    }
}
