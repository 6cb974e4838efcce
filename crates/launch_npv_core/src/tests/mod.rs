//! Integration tests for the launch NPV engine
//!
//! Tests are organized by topic:
//! - `financial_model` - Deterministic model, base case and scalar/batch equivalence
//! - `simulation` - Monte Carlo driver properties (determinism, limits, monotonicity)


/// Assert `actual` is within `rel_tol` of `expected`, relative to `expected`.
#[track_caller]
pub(crate) fn assert_close(actual: f64, expected: f64, rel_tol: f64) {
    let scale = expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= rel_tol * scale,
        "expected {expected}, got {actual} (rel tol {rel_tol})"
    );
}
