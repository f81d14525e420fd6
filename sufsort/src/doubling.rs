// Copyright 2023 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::mem;

/// Computes the suffix array of `data` by prefix doubling.
///
/// Every round sorts the suffixes by the rank pair of their first `k` and next `k` bytes, then
/// doubles `k` until all ranks are distinct. Each round is a comparison sort, so the whole
/// construction is *O*(*n* log² *n*).
///
/// A suffix that is a proper prefix of another suffix sorts before it, so `data` needs no
/// sentinel and may contain any byte, `0` included.
pub(crate) fn doubling(data: &[u8]) -> Vec<usize> {
    let n = data.len();
    let mut suffix_array: Vec<usize> = (0..n).collect();
    if n < 2 {
        return suffix_array;
    }

    let mut rank: Vec<usize> = data.iter().map(|&b| usize::from(b)).collect();
    let mut next_rank = vec![0; n];
    let mut k = 1;
    loop {
        // Ranks are shifted by one so that running off the end sorts first
        let key = |i: usize| (rank[i], if i + k < n { rank[i + k] + 1 } else { 0 });

        suffix_array.sort_unstable_by_key(|&i| key(i));

        next_rank[suffix_array[0]] = 0;
        for w in 1..n {
            let (prev, cur) = (suffix_array[w - 1], suffix_array[w]);
            next_rank[cur] = next_rank[prev] + usize::from(key(prev) != key(cur));
        }
        mem::swap(&mut rank, &mut next_rank);

        if rank[suffix_array[n - 1]] == n - 1 {
            break;
        }
        k *= 2;
    }

    suffix_array
}
