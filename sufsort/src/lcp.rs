// Copyright 2023 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

/// Computes the inverse of `suffix_array`, i.e., the rank of every suffix.
pub(crate) fn inverse(suffix_array: &[usize]) -> Vec<usize> {
    let mut rank = vec![0; suffix_array.len()];
    for (i, &suffix) in suffix_array.iter().enumerate() {
        rank[suffix] = i;
    }

    rank
}

/// Computes the LCP array of `data` from its suffix array using Kasai's algorithm.
///
/// Element `i` holds the length of the longest common prefix of the suffixes at ranks `i - 1`
/// and `i`. Element 0 has no left neighbor and is always 0.
///
/// This operation is *O*(*n*): the matched length drops by at most one between text positions,
/// so the inner loop advances at most 2*n* times in total.
pub(crate) fn kasai(data: &[u8], suffix_array: &[usize]) -> Vec<usize> {
    let n = data.len();
    let rank = inverse(suffix_array);
    let mut lcp = vec![0; n];

    let mut h = 0;
    for i in 0..n {
        if rank[i] == 0 {
            h = 0;
            continue;
        }

        let j = suffix_array[rank[i] - 1];
        while i + h < n && j + h < n && data[i + h] == data[j + h] {
            h += 1;
        }
        lcp[rank[i]] = h;
        h = h.saturating_sub(1);
    }

    lcp
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doubling::doubling;

    fn naive(data: &[u8], suffix_array: &[usize]) -> Vec<usize> {
        let mut lcp = vec![0; suffix_array.len()];
        for i in 1..suffix_array.len() {
            lcp[i] = data[suffix_array[i - 1]..]
                .iter()
                .zip(&data[suffix_array[i]..])
                .take_while(|(a, b)| a == b)
                .count();
        }
        lcp
    }

    #[test]
    fn inverse_is_rank() {
        let sa = [5, 3, 1, 0, 4, 2];
        assert_eq!(inverse(&sa), vec![3, 2, 5, 1, 4, 0]);
    }

    #[test]
    fn mississippi() {
        let data = b"mississippi";
        let sa = doubling(data);
        assert_eq!(kasai(data, &sa), vec![0, 1, 1, 4, 0, 0, 1, 0, 2, 1, 3]);
    }

    #[test]
    fn matches_naive_with_separators() {
        let data = b"ACCA\0ACCAT\0CAC\0TACCA";
        let sa = doubling(data);
        assert_eq!(kasai(data, &sa), naive(data, &sa));
    }
}
