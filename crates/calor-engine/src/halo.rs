//! Cells shared across a thread team.
//!
//! Team members own their block of both fields outright. The only
//! samples that cross block boundaries are the edge samples each
//! neighbour needs for its next stencil step (the halo), and, on snapshot
//! steps, whole blocks staged for the leader. Both travel through
//! [`SharedField`] cells holding `f64` bits.
//!
//! All accesses use `Relaxed` ordering. The team barrier between writing
//! and reading a cell orders them.

use std::sync::atomic::{AtomicU64, Ordering};

/// A run of `f64` samples stored as atomic bit patterns.
pub struct SharedField {
    cells: Box<[AtomicU64]>,
}

impl SharedField {
    /// Allocate a zero-filled field of `len` samples.
    pub fn zeros(len: usize) -> Self {
        let zero = 0.0f64.to_bits();
        Self {
            cells: (0..len).map(|_| AtomicU64::new(zero)).collect(),
        }
    }

    /// Allocate a field holding a copy of `samples`.
    pub fn from_slice(samples: &[f64]) -> Self {
        let cells = samples.iter().map(|v| AtomicU64::new(v.to_bits()));
        Self {
            cells: cells.collect(),
        }
    }

    /// Read sample `i`.
    #[inline]
    pub fn get(&self, i: usize) -> f64 {
        load(&self.cells[i])
    }

    /// Write sample `i`.
    #[inline]
    pub fn set(&self, i: usize, value: f64) {
        self.cells[i].store(value.to_bits(), Ordering::Relaxed);
    }

    /// Overwrite the samples starting at `offset` with `block`. Samples
    /// past the end of the field are dropped.
    pub fn write_block(&self, offset: usize, block: &[f64]) {
        for (cell, v) in self.cells.iter().skip(offset).zip(block) {
            cell.store(v.to_bits(), Ordering::Relaxed);
        }
    }

    /// Replace the contents of `out` with every sample.
    pub fn read_into(&self, out: &mut Vec<f64>) {
        out.clear();
        out.extend(self.cells.iter().map(load));
    }
}

fn load(cell: &AtomicU64) -> f64 {
    f64::from_bits(cell.load(Ordering::Relaxed))
}

// ── Halo exchange ──────────────────────────────────────────────────

/// Where a block reads the sample just outside one of its ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Halo {
    /// A domain boundary sample, constant for the whole run.
    Fixed(f64),
    /// The adjacent edge of another member's block.
    Member(usize),
}

/// Edge samples published by each member, double-buffered by step parity.
///
/// Edges written during step `t` go to parity `t % 2` and are read during
/// step `t + 1`. With one barrier per step between the two, a member that
/// runs ahead can never overwrite an edge its neighbour has yet to read.
pub struct HaloExchange {
    members: usize,
    edges: SharedField,
}

// Compile-time assertion: HaloExchange must be shareable across the team.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<HaloExchange>();
    assert::<SharedField>();
};

impl HaloExchange {
    /// Edge cells for a team of `members`.
    pub fn new(members: usize) -> Self {
        Self {
            members,
            edges: SharedField::zeros(4 * members),
        }
    }

    fn slot(&self, parity: u64, rank: usize) -> usize {
        2 * (rank + self.members * (parity & 1) as usize)
    }

    /// Publish the first and last sample of `rank`'s block for `parity`.
    /// Empty blocks publish nothing.
    pub fn publish(&self, parity: u64, rank: usize, block: &[f64]) {
        if let (Some(&first), Some(&last)) = (block.first(), block.last()) {
            let at = self.slot(parity, rank);
            self.edges.set(at, first);
            self.edges.set(at + 1, last);
        }
    }

    /// Sample left of a block whose left neighbour is `source`.
    pub fn left(&self, parity: u64, source: Halo) -> f64 {
        match source {
            Halo::Fixed(v) => v,
            Halo::Member(rank) => self.edges.get(self.slot(parity, rank) + 1),
        }
    }

    /// Sample right of a block whose right neighbour is `source`.
    pub fn right(&self, parity: u64, source: Halo) -> f64 {
        match source {
            Halo::Fixed(v) => v,
            Halo::Member(rank) => self.edges.get(self.slot(parity, rank)),
        }
    }
}
