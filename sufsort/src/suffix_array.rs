// Copyright 2023 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::{cmp::Ordering, ops::Range};

use crate::{doubling, lcp};

/// A suffix array for a byte string.
pub struct SuffixArray<'a> {
    data: &'a [u8],
    inner: Vec<usize>,
}

impl<'a> SuffixArray<'a> {
    /// Creates a new `SuffixArray` for `data`.
    ///
    /// Unlike many suffix sorting algorithms, no sentinel is required: a suffix that is a prefix
    /// of another suffix simply sorts first. Callers that want every suffix to end in a unique
    /// character should append one themselves.
    ///
    /// This operation is *O*(*n* log² *n*).
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::SuffixArray;
    ///
    /// let data = b"Hello, world!";
    /// let sa = SuffixArray::new(data);
    /// assert_eq!(sa.len(), data.len());
    /// ```
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        let inner = doubling::doubling(data);

        Self { data, inner }
    }

    /// Returns the data this suffix array indexes.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the sorted suffix start positions.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.inner
    }

    /// Returns the number of suffixes, which equals the length of the data.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the indexed data is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Computes the inverse suffix array, mapping each text position to its rank.
    ///
    /// This operation is *O*(*n*).
    #[must_use]
    pub fn inverse(&self) -> Vec<usize> {
        lcp::inverse(&self.inner)
    }

    /// Computes the longest-common-prefix array.
    ///
    /// Element `i` is the length of the longest common prefix of the suffixes at ranks `i - 1`
    /// and `i`. Element 0 is always 0.
    ///
    /// This operation is *O*(*n*).
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::SuffixArray;
    ///
    /// let sa = SuffixArray::new(b"abab");
    /// // Suffixes in order: "ab", "abab", "b", "bab"
    /// assert_eq!(sa.lcp(), vec![0, 2, 0, 1]);
    /// ```
    #[must_use]
    pub fn lcp(&self) -> Vec<usize> {
        lcp::kasai(self.data, &self.inner)
    }

    /// Returns the range of ranks whose suffixes start with `pattern`.
    ///
    /// The range is empty if `pattern` does not occur. An empty pattern matches every suffix.
    ///
    /// This operation is *O*(*m* \* log(*n*)), where `m` is `pattern.len()`.
    #[must_use]
    pub fn occurrences(&self, pattern: &[u8]) -> Range<usize> {
        let compare = |suffix: usize| {
            let prefix = &self.data[suffix..];
            prefix[..prefix.len().min(pattern.len())].cmp(pattern)
        };
        let start = self
            .inner
            .partition_point(|&suffix| compare(suffix) == Ordering::Less);
        let end = self
            .inner
            .partition_point(|&suffix| compare(suffix) != Ordering::Greater);

        start..end
    }

    /// Returns the number of (possibly overlapping) occurrences of `pattern`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::SuffixArray;
    ///
    /// let sa = SuffixArray::new(b"GATTACAGATTACA");
    /// assert_eq!(sa.count(b"GATTACA"), 2);
    /// assert_eq!(sa.count(b"ACAG"), 1);
    /// ```
    #[must_use]
    pub fn count(&self, pattern: &[u8]) -> usize {
        self.occurrences(pattern).len()
    }

    /// Returns `true` if and only if `pattern` is contained in the associated data.
    ///
    /// This operation is *O*(*m* \* log(*n*)), where `m` is `pattern.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::SuffixArray;
    ///
    /// let data = b"Hello, world!";
    /// let sa = SuffixArray::new(data);
    /// assert!(sa.contains(b"world"));
    /// ```
    #[must_use]
    pub fn contains(&self, pattern: &[u8]) -> bool {
        !self.occurrences(pattern).is_empty()
    }
}
