//! Reference fields and a naive stencil for cross-checking drivers.
//!
//! - [`impulse`]: zeros with a single value at the midpoint.
//! - [`reference_run`]: allocating, obviously-correct stencil loop.
//! - [`TEAM_SIZES`]: thread counts exercised by equivalence tests.

/// Thread counts exercised by driver equivalence tests.
pub const TEAM_SIZES: [usize; 4] = [1, 2, 4, 8];

/// A field of `len` zeros with `value` at index `len / 2`.
pub fn impulse(len: usize, value: f64) -> Vec<f64> {
    let mut v = vec![0.0; len];
    if len > 0 {
        v[len / 2] = value;
    }
    v
}

/// Advance `field` by `steps` explicit steps, allocating a fresh vector
/// each step. Boundaries are held fixed.
pub fn reference_run(field: &[f64], steps: u64) -> Vec<f64> {
    let mut cur = field.to_vec();
    for _ in 0..steps {
        let mut nxt = cur.clone();
        for i in 1..cur.len().saturating_sub(1) {
            nxt[i] = 0.5 * (cur[i - 1] + cur[i + 1]);
        }
        cur = nxt;
    }
    cur
}
