//! Data-parallel building blocks shared by the driver.
//!
//! The driver sorts the edge array once per round and compacts its
//! selection/survivor bitmaps through an inclusive prefix sum. Both run on
//! the installed rayon pool.

use rayon::prelude::*;

use crate::parallel_array::ParallelArray;

/// Sorts items in parallel by their `Ord` key; the edge arrays use their
/// derived `(from, to, weight)` lexicographic order.
pub(crate) fn par_sort<T: Ord + Send>(items: &mut [T]) {
    items.par_sort_unstable();
}

/// Splits `len` items into contiguous chunks sized for the current pool.
pub(crate) fn chunk_len(len: usize) -> usize {
    let stripes = rayon::current_num_threads().saturating_mul(4).max(1);
    len.div_ceil(stripes).max(1)
}

/// Deterministic parallel inclusive prefix sum.
///
/// Per-chunk totals are scanned sequentially to produce chunk offsets, then
/// every chunk is rescanned in parallel starting from its offset. `u32`
/// addition is associative, so the result does not depend on the chunking.
pub(crate) fn inclusive_prefix_sum(values: &[u32]) -> ParallelArray<u32> {
    if values.is_empty() {
        return ParallelArray::from_vec(Vec::new());
    }

    let chunk = chunk_len(values.len());

    let mut offsets: Vec<u32> = values
        .par_chunks(chunk)
        .map(|slice| slice.iter().sum())
        .collect();
    let mut running = 0u32;
    for slot in &mut offsets {
        let total = *slot;
        *slot = running;
        running += total;
    }

    let mut sums = vec![0u32; values.len()];
    sums.par_chunks_mut(chunk)
        .zip(values.par_chunks(chunk))
        .zip(offsets.par_iter())
        .for_each(|((out_chunk, in_chunk), &offset)| {
            let mut acc = offset;
            for (slot, &value) in out_chunk.iter_mut().zip(in_chunk) {
                acc += value;
                *slot = acc;
            }
        });

    ParallelArray::from_vec(sums)
}
