//! Lock-free disjoint-set union over dense `u32` node ids.
//!
//! Each node packs `(rank, parent)` into one `AtomicU64` — rank in the high
//! 32 bits, parent in the low 32 — so both fields move together under a
//! single compare-and-swap. Rank biases merges towards the shallower tree
//! and is an upper bound on height; a stale rank costs balance, never
//! correctness. Finds shorten paths by halving: each step tries to replace
//! a node's parent with its grandparent and carries on regardless of
//! whether the CAS won.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::codec::{hi, lo, pack};
use crate::parallel_array::ParallelArray;

/// Concurrent union-find with rank and path-halving heuristics.
pub struct ParallelDsu {
    data: ParallelArray<AtomicU64>,
}

impl ParallelDsu {
    /// Creates `size` singleton sets, one per id in `[0, size)`.
    ///
    /// # Panics
    ///
    /// Panics when `size` is zero.
    #[must_use]
    pub fn new(size: u32) -> Self {
        assert!(size > 0, "disjoint-set size must be non-zero");
        let data =
            ParallelArray::from_par_fn(size as usize, |id| AtomicU64::new(pack(0, id as u32)));
        Self { data }
    }

    /// Returns the number of ids tracked by this structure.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.data.len() as u32
    }

    fn check_in_range(&self, id: u32) {
        assert!(
            id < self.size(),
            "node id {id} out of range for disjoint set of size {}",
            self.size()
        );
    }

    fn parent(&self, id: u32) -> u32 {
        lo(self.data[id as usize].load(Ordering::Relaxed))
    }

    fn rank(&self, id: u32) -> u32 {
        hi(self.data[id as usize].load(Ordering::Relaxed))
    }

    /// Returns the representative of `id`'s set.
    ///
    /// The walk ends at the node whose parent is itself. A lost halving CAS
    /// just means another walker shortened the chain first; the walk
    /// continues from whichever parent it observes next.
    ///
    /// # Panics
    ///
    /// Panics when `id` is out of range.
    #[must_use]
    pub fn find_root(&self, mut id: u32) -> u32 {
        self.check_in_range(id);

        loop {
            let word = self.data[id as usize].load(Ordering::SeqCst);
            let parent = lo(word);
            if parent == id {
                return id;
            }

            let grandparent = self.parent(parent);
            if grandparent != parent {
                let halved = pack(hi(word), grandparent);
                let _ = self.data[id as usize].compare_exchange(
                    word,
                    halved,
                    Ordering::SeqCst,
                    Ordering::SeqCst,
                );
            }

            id = grandparent;
        }
    }

    /// Returns `true` when `id1` and `id2` share a representative.
    ///
    /// Reports `false` only after observing that the first representative
    /// is still a root, so a concurrent `unite` cannot produce a stale
    /// negative; otherwise the roots are recomputed.
    ///
    /// # Panics
    ///
    /// Panics when either id is out of range.
    #[must_use]
    pub fn same_set(&self, id1: u32, id2: u32) -> bool {
        self.check_in_range(id1);
        self.check_in_range(id2);

        loop {
            let root1 = self.find_root(id1);
            let root2 = self.find_root(id2);

            if root1 == root2 {
                return true;
            }
            if lo(self.data[root1 as usize].load(Ordering::SeqCst)) == root1 {
                return false;
            }
        }
    }

    /// Merges the sets containing `id1` and `id2`.
    ///
    /// The lower-ranked root is re-parented under the higher-ranked one;
    /// rank ties lose to the larger id. When the re-parenting CAS fails the
    /// whole step is retried from fresh roots.
    ///
    /// # Panics
    ///
    /// Panics when either id is out of range.
    pub fn unite(&self, id1: u32, id2: u32) {
        self.check_in_range(id1);
        self.check_in_range(id2);

        loop {
            let mut winner = self.find_root(id1);
            let mut loser = self.find_root(id2);

            if winner == loser {
                return;
            }

            let mut winner_rank = self.rank(winner);
            let mut loser_rank = self.rank(loser);

            if winner_rank < loser_rank || (winner_rank == loser_rank && winner > loser) {
                std::mem::swap(&mut winner, &mut loser);
                std::mem::swap(&mut winner_rank, &mut loser_rank);
            }

            let observed = pack(loser_rank, loser);
            let reparented = pack(loser_rank, winner);
            if self.data[loser as usize]
                .compare_exchange(observed, reparented, Ordering::SeqCst, Ordering::SeqCst)
                .is_err()
            {
                continue;
            }

            if winner_rank == loser_rank {
                // Single attempt only: losing this CAS means a concurrent
                // unite already raised the rank or re-parented the winner,
                // and retrying would overshoot the height bound.
                let current = pack(winner_rank, winner);
                let bumped = pack(winner_rank + 1, winner);
                let _ = self.data[winner as usize].compare_exchange(
                    current,
                    bumped,
                    Ordering::SeqCst,
                    Ordering::SeqCst,
                );
            }

            return;
        }
    }
}
