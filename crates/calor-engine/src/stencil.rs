//! Explicit three-point diffusion stencil.
//!
//! `next[i] = 0.5 * (current[i - 1] + current[i + 1])` for every interior
//! index `i`. Boundary samples of `next` are never written here; making
//! them consistent is the commit's job.

/// Diffusion update for a single interior sample.
#[inline(always)]
pub fn average(left: f64, right: f64) -> f64 {
    0.5 * (left + right)
}

/// Update every interior sample of `next` from `current`.
///
/// Both slices must have the same length. Slices shorter than three
/// samples have no interior and are left untouched.
pub fn stencil_step(current: &[f64], next: &mut [f64]) {
    debug_assert_eq!(current.len(), next.len());
    let len = next.len();
    if len < 3 {
        return;
    }
    for (out, w) in next[1..len - 1].iter_mut().zip(current.windows(3)) {
        *out = average(w[0], w[2]);
    }
}

/// Update one block of interior samples.
///
/// `current` and `next` hold the same contiguous run of interior indices.
/// `left` and `right` are the samples just outside the run, either a
/// neighbouring block's edges or the domain boundary.
pub fn stencil_block(left: f64, current: &[f64], right: f64, next: &mut [f64]) {
    debug_assert_eq!(current.len(), next.len());
    let len = current.len();
    match len {
        0 => {}
        1 => next[0] = average(left, right),
        _ => {
            next[0] = average(left, current[1]);
            next[len - 1] = average(current[len - 2], right);
            for (out, w) in next[1..len - 1].iter_mut().zip(current.windows(3)) {
                *out = average(w[0], w[2]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_point_impulse() {
        let current = [0.0, 0.0, 100.0, 0.0, 0.0];
        let mut next = [0.0; 5];
        stencil_step(&current, &mut next);
        assert_eq!(next, [0.0, 50.0, 0.0, 50.0, 0.0]);
    }

    #[test]
    fn boundary_of_next_untouched() {
        let current = [10.0, 1.0, 2.0, 3.0, 20.0];
        let mut next = [-7.0, 0.0, 0.0, 0.0, -9.0];
        stencil_step(&current, &mut next);
        assert_eq!(next[0], -7.0);
        assert_eq!(next[4], -9.0);
        assert_eq!(&next[1..4], &[6.0, 2.0, 11.0]);
    }

    #[test]
    fn too_short_is_noop() {
        let current = [1.0, 2.0];
        let mut next = [5.0, 6.0];
        stencil_step(&current, &mut next);
        assert_eq!(next, [5.0, 6.0]);
    }

    #[test]
    fn blocks_match_full_step() {
        let current: Vec<f64> = (0..11).map(|i| (i * i) as f64).collect();
        let mut full = vec![0.0; 11];
        stencil_step(&current, &mut full);

        let mut pieces = vec![0.0; 11];
        for range in [1..2, 2..6, 6..8, 8..10] {
            let (left, right) = (current[range.start - 1], current[range.end]);
            stencil_block(left, &current[range.clone()], right, &mut pieces[range]);
        }
        assert_eq!(full, pieces);
    }

    #[test]
    fn empty_block_is_noop() {
        let mut next: [f64; 0] = [];
        stencil_block(1.0, &[], 2.0, &mut next);
    }

    #[test]
    fn single_sample_block_uses_both_halos() {
        let mut next = [0.0];
        stencil_block(4.0, &[100.0], 8.0, &mut next);
        assert_eq!(next, [6.0]);
    }
}
