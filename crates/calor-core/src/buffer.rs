//! Double-buffered field storage with explicit commit.
//!
//! [`DoubleBuffer`] holds two [`Field`]s that alternate between the
//! "current" (read during a step) and "next" (written during a step)
//! roles. Roles are an index into the pair, never a pointer exchange;
//! every read goes through [`DoubleBuffer::current`] or
//! [`DoubleBuffer::next`].
//!
//! # Commit
//!
//! ```text
//! Copy:  current[interior] <- next[interior]      roles unchanged
//! Swap:  next[boundary]    <- current[boundary]   then roles exchanged
//! ```
//!
//! Both strategies leave the new current field with the just-computed
//! interior and the previous boundary values, so they are observably
//! identical.

use std::fmt;

use crate::field::Field;

/// How the next field becomes the current one after a step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CommitStrategy {
    /// Copy the written interior of `next` back into `current`. O(N).
    #[default]
    Copy,
    /// Propagate boundaries into `next`, then exchange roles. O(1) plus
    /// two boundary writes.
    Swap,
}

impl CommitStrategy {
    /// Both strategies, in declaration order.
    pub const ALL: [CommitStrategy; 2] = [CommitStrategy::Copy, CommitStrategy::Swap];
}

impl fmt::Display for CommitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copy => write!(f, "copy"),
            Self::Swap => write!(f, "swap"),
        }
    }
}

/// Two same-length fields with an explicit current/next role assignment.
#[derive(Clone, Debug)]
pub struct DoubleBuffer {
    fields: [Field; 2],
    /// Physical slot (0 or 1) holding the current field.
    current: usize,
}

impl DoubleBuffer {
    /// Allocate two zero-filled fields of `len` samples. Slot 0 starts
    /// as current.
    pub fn new(len: usize) -> Self {
        Self {
            fields: [Field::zeros(len), Field::zeros(len)],
            current: 0,
        }
    }

    /// Number of samples per field.
    pub fn len(&self) -> usize {
        self.fields[0].len()
    }

    /// Whether the fields have no samples.
    pub fn is_empty(&self) -> bool {
        self.fields[0].is_empty()
    }

    /// Physical slot currently holding the current field.
    pub fn current_slot(&self) -> usize {
        self.current
    }

    /// The field read by the next stencil step.
    pub fn current(&self) -> &Field {
        &self.fields[self.current]
    }

    /// The field written by the next stencil step.
    pub fn next(&self) -> &Field {
        &self.fields[1 - self.current]
    }

    /// Mutable access to the current field (initialization, tests).
    pub fn current_mut(&mut self) -> &mut Field {
        &mut self.fields[self.current]
    }

    /// Split into `(current, next)` for one stencil step.
    ///
    /// The shared/exclusive borrow pair makes aliasing between the read
    /// and write buffers impossible.
    pub fn split(&mut self) -> (&Field, &mut Field) {
        let [a, b] = &mut self.fields;
        if self.current == 0 {
            (&*a, b)
        } else {
            (&*b, a)
        }
    }

    /// Split into `(current, next)` with both writable, for drivers that
    /// manage the roles themselves and report back with
    /// [`set_current_slot`](Self::set_current_slot).
    pub fn split_mut(&mut self) -> (&mut Field, &mut Field) {
        let [a, b] = &mut self.fields;
        if self.current == 0 {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Mutable access to both physical slots, in slot order.
    pub fn fields_mut(&mut self) -> &mut [Field; 2] {
        &mut self.fields
    }

    /// Make slot 0 current again without touching sample data.
    pub fn reset_roles(&mut self) {
        self.current = 0;
    }

    /// Restore a role assignment recorded elsewhere (e.g. by a parallel
    /// run working on its own copy of the buffers).
    pub fn set_current_slot(&mut self, slot: usize) {
        debug_assert!(slot < 2, "slot must be 0 or 1, got {slot}");
        self.current = slot & 1;
    }

    /// Make the just-written next field the current one.
    pub fn commit(&mut self, strategy: CommitStrategy) {
        match strategy {
            CommitStrategy::Copy => {
                let [a, b] = &mut self.fields;
                if self.current == 0 {
                    a.copy_interior_from(b);
                } else {
                    b.copy_interior_from(a);
                }
            }
            CommitStrategy::Swap => {
                let (current, next) = self.split();
                next.copy_boundary_from(current);
                self.current = 1 - self.current;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_next(buf: &mut DoubleBuffer, values: &[f64]) {
        let (_, next) = buf.split();
        next.as_mut_slice().copy_from_slice(values);
    }

    #[test]
    fn new_starts_in_slot_zero() {
        let buf = DoubleBuffer::new(4);
        assert_eq!(buf.current_slot(), 0);
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn copy_commit_keeps_roles_and_boundary() {
        let mut buf = DoubleBuffer::new(4);
        buf.current_mut()
            .as_mut_slice()
            .copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);
        write_next(&mut buf, &[-1.0, 20.0, 30.0, -4.0]);

        buf.commit(CommitStrategy::Copy);

        assert_eq!(buf.current_slot(), 0);
        assert_eq!(buf.current().as_slice(), &[1.0, 20.0, 30.0, 4.0]);
    }

    #[test]
    fn swap_commit_propagates_boundary() {
        let mut buf = DoubleBuffer::new(4);
        buf.current_mut()
            .as_mut_slice()
            .copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);
        // Stale boundary values in next must not leak through the swap.
        write_next(&mut buf, &[-1.0, 20.0, 30.0, -4.0]);

        buf.commit(CommitStrategy::Swap);

        assert_eq!(buf.current_slot(), 1);
        assert_eq!(buf.current().as_slice(), &[1.0, 20.0, 30.0, 4.0]);
    }

    #[test]
    fn strategies_are_observably_equivalent() {
        let mut copy = DoubleBuffer::new(6);
        let mut swap = DoubleBuffer::new(6);
        for buf in [&mut copy, &mut swap] {
            buf.current_mut()
                .as_mut_slice()
                .copy_from_slice(&[5.0, 0.0, 0.0, 0.0, 0.0, 6.0]);
        }
        for round in 0..3 {
            let values: Vec<f64> = (0..6).map(|i| (i * 10 + round) as f64).collect();
            write_next(&mut copy, &values);
            write_next(&mut swap, &values);
            copy.commit(CommitStrategy::Copy);
            swap.commit(CommitStrategy::Swap);
            assert_eq!(copy.current(), swap.current(), "diverged at round {round}");
        }
    }

    #[test]
    fn split_follows_roles() {
        let mut buf = DoubleBuffer::new(3);
        buf.set_current_slot(1);
        let (current, next) = buf.split();
        next.fill(2.0);
        assert_eq!(current.as_slice(), &[0.0; 3]);
        assert_eq!(buf.fields_mut()[0].as_slice(), &[2.0; 3]);
        buf.reset_roles();
        assert_eq!(buf.current_slot(), 0);
    }

    #[test]
    fn split_mut_follows_roles() {
        let mut buf = DoubleBuffer::new(2);
        buf.set_current_slot(1);
        let (current, next) = buf.split_mut();
        current.fill(1.0);
        next.fill(3.0);
        assert_eq!(buf.fields_mut()[1].as_slice(), &[1.0; 2]);
        assert_eq!(buf.next().as_slice(), &[3.0; 2]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn copy_and_swap_agree(
                current in prop::collection::vec(-1e6f64..1e6, 3..40),
                seed in prop::collection::vec(-1e6f64..1e6, 40),
                rounds in 1usize..5,
            ) {
                let len = current.len();
                let mut copy = DoubleBuffer::new(len);
                let mut swap = DoubleBuffer::new(len);
                copy.current_mut().as_mut_slice().copy_from_slice(&current);
                swap.current_mut().as_mut_slice().copy_from_slice(&current);

                for r in 0..rounds {
                    let values: Vec<f64> = (0..len).map(|i| seed[(i + r) % seed.len()]).collect();
                    write_next(&mut copy, &values);
                    write_next(&mut swap, &values);
                    copy.commit(CommitStrategy::Copy);
                    swap.commit(CommitStrategy::Swap);
                    prop_assert_eq!(copy.current(), swap.current());
                    prop_assert_eq!(copy.current().boundary(), Some((current[0], current[len - 1])));
                }
            }
        }
    }

    #[test]
    fn commit_strategy_display() {
        assert_eq!(CommitStrategy::Copy.to_string(), "copy");
        assert_eq!(CommitStrategy::Swap.to_string(), "swap");
        assert_eq!(CommitStrategy::default(), CommitStrategy::Copy);
    }
}
