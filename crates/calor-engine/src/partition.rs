//! Static work-sharing partition of an index range.
//!
//! Splits a range into `parts` contiguous, disjoint, in-order slices
//! whose lengths differ by at most one. Slice `k` belongs to team member
//! `k` for the whole run; no index is ever assigned to two members.

use std::ops::Range;

use smallvec::SmallVec;

/// Contiguous block partition of an index range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    ranges: SmallVec<[Range<usize>; 8]>,
}

impl Partition {
    /// Split `range` into `parts` contiguous blocks.
    ///
    /// The first `len % parts` blocks get one extra index. When `parts`
    /// exceeds the range length, trailing blocks are empty. `parts == 0`
    /// yields no blocks.
    pub fn contiguous(range: Range<usize>, parts: usize) -> Self {
        let mut ranges = SmallVec::with_capacity(parts);
        if parts == 0 {
            return Self { ranges };
        }
        let len = range.len();
        let base = len / parts;
        let extra = len % parts;
        let mut start = range.start;
        for k in 0..parts {
            let size = base + usize::from(k < extra);
            ranges.push(start..start + size);
            start += size;
        }
        Self { ranges }
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Whether there are no blocks.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Block assigned to `member`, empty if out of range.
    pub fn get(&self, member: usize) -> Range<usize> {
        self.ranges.get(member).cloned().unwrap_or(0..0)
    }

    /// All blocks in member order.
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// Member whose block holds `index`, if any.
    pub fn owner_of(&self, index: usize) -> Option<usize> {
        self.ranges.iter().position(|r| r.contains(&index))
    }

    /// Carve `slice` into one disjoint mutable sub-slice per block, in
    /// member order. Blocks index into `slice` directly; parts of a block
    /// that fall past its end come back empty.
    pub fn split_mut<'a, T>(&self, slice: &'a mut [T]) -> Vec<&'a mut [T]> {
        let start = self.ranges.first().map_or(0, |r| r.start).min(slice.len());
        let (_, mut rest) = slice.split_at_mut(start);
        let mut blocks = Vec::with_capacity(self.ranges.len());
        for r in &self.ranges {
            let mid = r.len().min(rest.len());
            let (block, tail) = std::mem::take(&mut rest).split_at_mut(mid);
            blocks.push(block);
            rest = tail;
        }
        blocks
    }

    /// Whether the blocks are disjoint, in order, and exactly cover
    /// `range`.
    pub fn covers(&self, range: &Range<usize>) -> bool {
        let mut cursor = range.start;
        for r in &self.ranges {
            if r.start != cursor || r.end < r.start {
                return false;
            }
            cursor = r.end;
        }
        cursor == range.end
    }
}
