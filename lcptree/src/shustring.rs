// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use crate::corpus::Corpus;

/// A shortest unique substring
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Shustring {
    /// 0-based start within the source sequence
    pub position: usize,
    /// Start within the corpus text
    pub text_position: usize,
    /// Length of the substring
    pub len: usize,
}

impl Shustring {
    /// Returns the substring itself.
    ///
    /// # Panics
    ///
    /// Panics if `text` is shorter than the corpus the shustring was found in.
    pub fn sequence<'t>(&self, text: &'t [u8]) -> &'t [u8] {
        &text[self.text_position..self.text_position + self.len]
    }
}

/// Shortest unique substrings of every position of every forward sequence in a [`Corpus`]
///
/// The shustring at position `p` is the shortest prefix of the suffix at `p` that occurs nowhere
/// else in the corpus text. If even the rest of the sequence from `p` on occurs elsewhere, no
/// shustring starts at `p`.
///
/// Uniqueness is judged against the whole corpus: other members and, if present, reverse-strand
/// copies count as competing occurrences.
///
/// # Examples
///
/// ```
/// use lcptree::{Corpus, ShustringTable};
///
/// let corpus = Corpus::new(["GATTACAGATTACA"]);
/// let index = corpus.index();
/// let table = ShustringTable::new(&corpus, &index.sa, &index.lcp);
///
/// // The second "GATTACA" repeats the first, so unique substrings span the junction
/// assert_eq!(table.minimum(0), Some(2));
/// let global: Vec<_> = table.global(0).map(|s| s.sequence(corpus.text())).collect();
/// assert_eq!(global, vec![b"AG"]);
/// assert_eq!(table.get(7), None);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShustringTable {
    /// Indexed by text position; `None` where no shustring exists or was computed
    lengths: Vec<Option<usize>>,
    minima: Vec<Option<usize>>,
    segments: Vec<(usize, usize)>,
}

impl ShustringTable {
    /// Computes the shustring lengths of all forward sequences of `corpus`.
    ///
    /// The shustring at a position is one byte longer than the longest prefix its suffix shares
    /// with either neighbor in the suffix array, so no tree is needed. `lcp[0]` is ignored.
    ///
    /// This operation is *O*(*n*).
    ///
    /// # Panics
    ///
    /// Panics if `sa` and `lcp` differ in length or do not cover the corpus text.
    pub fn new(corpus: &Corpus, sa: &[usize], lcp: &[usize]) -> Self {
        assert_eq!(
            sa.len(),
            lcp.len(),
            "suffix array and LCP array must have the same length",
        );
        assert_eq!(
            sa.len(),
            corpus.len(),
            "suffix array must index the corpus text",
        );

        let n = sa.len();
        let mut rank = vec![0; n];
        for (i, &suffix) in sa.iter().enumerate() {
            rank[suffix] = i;
        }

        let mut lengths = vec![None; n];
        let mut minima = Vec::with_capacity(corpus.sequence_count());
        let mut segments = Vec::with_capacity(corpus.sequence_count());
        for index in 0..corpus.sequence_count() {
            let segment = corpus.segment(index);
            let mut minimum: Option<usize> = None;
            for pos in segment.clone() {
                let r = rank[pos];
                let left = if r > 0 { lcp[r] } else { 0 };
                let right = if r + 1 < n { lcp[r + 1] } else { 0 };
                let len = left.max(right) + 1;

                // The unique stretch must fit inside the sequence
                if pos + len <= segment.end {
                    lengths[pos] = Some(len);
                    minimum = Some(minimum.map_or(len, |m| m.min(len)));
                }
            }
            minima.push(minimum);
            segments.push((segment.start, segment.end));
        }

        Self {
            lengths,
            minima,
            segments,
        }
    }

    /// Returns the shustring length at corpus text position `pos`, or `None` if no shustring
    /// starts there
    pub fn get(&self, pos: usize) -> Option<usize> {
        self.lengths.get(pos).copied().flatten()
    }

    /// Returns the number of sequences covered
    pub fn sequence_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns the length of the shortest shustring in sequence `index`, or `None` if the
    /// sequence has none.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn minimum(&self, index: usize) -> Option<usize> {
        self.minima[index]
    }

    /// Iterates over every shustring of sequence `index`, by position.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn local(&self, index: usize) -> impl Iterator<Item = Shustring> + '_ {
        let (start, end) = self.segments[index];
        (start..end).filter_map(move |pos| {
            self.lengths[pos].map(|len| Shustring {
                position: pos - start,
                text_position: pos,
                len,
            })
        })
    }

    /// Iterates over the shustrings of sequence `index` whose length equals the sequence
    /// minimum, by position.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn global(&self, index: usize) -> impl Iterator<Item = Shustring> + '_ {
        let minimum = self.minima[index];
        self.local(index)
            .filter(move |shustring| Some(shustring.len) == minimum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(sequences: &[&str], sa: &[usize], lcp: &[usize]) -> ShustringTable {
        ShustringTable::new(&Corpus::new(sequences), sa, lcp)
    }

    #[test]
    fn banana() {
        // Suffixes: a, ana, anana, banana, na, nana
        let table = table(&["banana"], &[5, 3, 1, 0, 4, 2], &[0, 1, 3, 0, 0, 2]);

        let local: Vec<_> = table.local(0).map(|s| (s.position, s.len)).collect();
        // The last three suffixes recur in full
        assert_eq!(local, vec![(0, 1), (1, 4), (2, 3)]);
        assert_eq!(table.minimum(0), Some(1));

        let global: Vec<_> = table.global(0).map(|s| s.position).collect();
        assert_eq!(global, vec![0]);
    }

    #[test]
    fn repeats_have_no_shustring() {
        // "aaaa": every suffix recurs as a prefix of a longer one
        let table = table(&["aaaa"], &[3, 2, 1, 0], &[0, 1, 2, 3]);

        assert_eq!(table.local(0).count(), 1);
        assert_eq!(table.get(0), Some(4));
        assert_eq!(table.get(1), None);
        assert_eq!(table.global(0).count(), 1);
    }

    #[test]
    fn per_sequence_minima() {
        // "ab\0b": the lone "a" is unique, the "b"s compete with each other and a unique
        // stretch would have to cross the separator
        let table = table(&["ab", "b"], &[2, 0, 3, 1], &[0, 0, 0, 1]);

        assert_eq!(table.sequence_count(), 2);
        assert_eq!(table.minimum(0), Some(1));
        assert_eq!(table.minimum(1), None);

        let local: Vec<_> = table.local(0).map(|s| (s.text_position, s.len)).collect();
        assert_eq!(local, vec![(0, 1)]);
        assert_eq!(table.get(1), None);
    }

    #[test]
    fn empty_sequence() {
        let table = table(&[""], &[], &[]);

        assert_eq!(table.minimum(0), None);
        assert_eq!(table.local(0).count(), 0);
    }
}
