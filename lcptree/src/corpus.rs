// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::{
    fmt::{self, Display, Formatter},
    ops::Range,
};

/// The byte that separates members of a [`Corpus`]
///
/// Member sequences must not contain it. This is not checked.
pub const SEPARATOR: u8 = 0;

/// The strand an occurrence was found on
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Strand {
    /// The sequence as given
    Forward,
    /// The reverse-strand copy of the sequence
    Reverse,
}

impl Display for Strand {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Strand::Forward => f.write_str("f"),
            Strand::Reverse => f.write_str("r"),
        }
    }
}

/// Where in the input an occurrence starts
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Location {
    /// Strand of the occurrence
    pub strand: Strand,
    /// 0-based index of the source sequence
    pub sequence: usize,
    /// 0-based offset within the source sequence, in forward-strand coordinates
    pub offset: usize,
}

/// Several sequences concatenated into one text, joined by [`SEPARATOR`]
///
/// The forward members come first, in the order given. If reverse-strand copies are added, they
/// follow in the same order, so sequence `i` on the reverse strand is segment
/// `i + sequence_count()`.
///
/// # Examples
///
/// ```
/// use lcptree::Corpus;
///
/// let corpus = Corpus::new(["ACGT", "GG"]);
/// assert_eq!(corpus.text(), b"ACGT\0GG");
/// assert_eq!(corpus.segment(1), 5..7);
/// assert_eq!(corpus.segment_of(6), 1);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Corpus {
    text: Vec<u8>,
    segments: Vec<Range<usize>>,
    forward: usize,
}

impl Corpus {
    /// Concatenates `sequences` into a new corpus.
    pub fn new<I, S>(sequences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut corpus = Self::default();
        for sequence in sequences {
            corpus.push(sequence.as_ref());
        }
        corpus.forward = corpus.segments.len();

        corpus
    }

    /// Concatenates `forward` and then their reverse-strand copies `reverse`.
    ///
    /// `reverse[i]` must be the reverse strand (typically the reverse complement) of
    /// `forward[i]`; producing it is up to the caller.
    ///
    /// # Panics
    ///
    /// Panics if `forward` and `reverse` differ in length.
    pub fn with_reverse_strand<S>(forward: &[S], reverse: &[S]) -> Self
    where
        S: AsRef<[u8]>,
    {
        assert_eq!(
            forward.len(),
            reverse.len(),
            "every forward sequence needs exactly one reverse strand",
        );

        let mut corpus = Self::new(forward);
        for sequence in reverse {
            corpus.push(sequence.as_ref());
        }

        corpus
    }

    fn push(&mut self, sequence: &[u8]) {
        if !self.segments.is_empty() {
            self.text.push(SEPARATOR);
        }
        let start = self.text.len();
        self.text.extend_from_slice(sequence);
        self.segments.push(start..self.text.len());
    }

    /// Returns the concatenated text
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// Returns the length of the concatenated text, separators included
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the concatenated text is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the number of forward sequences
    pub fn sequence_count(&self) -> usize {
        self.forward
    }

    /// Returns `true` if reverse-strand copies were appended
    pub fn has_reverse_strand(&self) -> bool {
        self.segments.len() > self.forward
    }

    /// Returns the number of segments, reverse-strand copies included
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns the text positions of segment `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn segment(&self, index: usize) -> Range<usize> {
        self.segments[index].clone()
    }

    /// Returns the index of the segment holding text position `pos`.
    ///
    /// A separator belongs to the segment it terminates. This operation is *O*(log *k*) for `k`
    /// segments.
    pub fn segment_of(&self, pos: usize) -> usize {
        self.segments
            .partition_point(|segment| segment.end < pos)
            .min(self.segments.len().saturating_sub(1))
    }

    /// Returns `true` if nothing precedes `pos` within its segment, i.e., a suffix starting at
    /// `pos` cannot be extended to the left.
    pub fn is_segment_start(&self, pos: usize) -> bool {
        pos == 0 || self.text[pos - 1] == SEPARATOR
    }

    /// Maps an occurrence of length `len` at text position `pos` back to its source sequence.
    ///
    /// Occurrences on the reverse strand are reported at the forward-strand offset where the
    /// matching stretch starts, i.e., mirrored around the sequence.
    pub fn locate(&self, pos: usize, len: usize) -> Location {
        let index = self.segment_of(pos);
        let segment = &self.segments[index];

        if index >= self.forward {
            Location {
                strand: Strand::Reverse,
                sequence: index - self.forward,
                offset: segment.end.saturating_sub(pos + len),
            }
        } else {
            Location {
                strand: Strand::Forward,
                sequence: index,
                offset: pos - segment.start,
            }
        }
    }

    /// Returns a copy of `lcp` in which no common prefix runs past the end of the segment holding
    /// the suffix at that rank.
    ///
    /// Since all members are joined by the same separator, two suffixes may otherwise match
    /// across a separator and report repeats spanning several sequences.
    ///
    /// # Panics
    ///
    /// Panics if `sa` and `lcp` differ in length.
    pub fn bounded_lcp(&self, sa: &[usize], lcp: &[usize]) -> Vec<usize> {
        assert_eq!(
            sa.len(),
            lcp.len(),
            "suffix array and LCP array must have the same length",
        );

        sa.iter()
            .zip(lcp)
            .map(|(&suffix, &depth)| {
                let end = self.segments[self.segment_of(suffix)].end;
                depth.min(end.saturating_sub(suffix))
            })
            .collect()
    }

    /// Computes the suffix array and LCP array of the concatenated text.
    #[cfg(feature = "index")]
    pub fn index(&self) -> Index {
        let sa = sufsort::SuffixArray::new(&self.text);
        let lcp = sa.lcp();

        Index {
            sa: sa.as_slice().to_vec(),
            lcp,
        }
    }
}

/// A suffix array together with its LCP array
#[cfg(feature = "index")]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Index {
    /// Suffix start positions in lexicographic order
    pub sa: Vec<usize>,
    /// `lcp[i]` is the longest common prefix of the suffixes at ranks `i - 1` and `i`
    pub lcp: Vec<usize>,
}
