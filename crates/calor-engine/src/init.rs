//! Baseline initializer: zero field with a point heat source.

use calor_core::DoubleBuffer;

/// Reset both buffers to zero, make slot 0 current, and place `impulse`
/// at the midpoint (`len / 2`) of the current field.
///
/// Run before every independent run so each starts from the identical
/// baseline. Idempotent.
pub fn initialize(buffers: &mut DoubleBuffer, impulse: f64) {
    for field in buffers.fields_mut().iter_mut() {
        field.fill(0.0);
    }
    buffers.reset_roles();

    let current = buffers.current_mut();
    if !current.is_empty() {
        let mid = current.midpoint();
        current.as_mut_slice()[mid] = impulse;
    }
}
