// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::{
    borrow::Cow,
    fmt::{self, Display, Formatter},
    ops::Range,
};

use crate::{
    corpus::{Corpus, Location},
    interval::{BuildHook, Interval, IntervalId, IntervalTree},
};

/// Repeats longer than this are abbreviated by [`abbreviate()`]
const ABBREVIATE_ABOVE: usize = 13;
/// Bytes kept on either side of the ellipsis of an abbreviated repeat
const ABBREVIATED_FLANK: usize = 5;

/// A maximal repeat: an LCP-interval whose suffixes can be extended neither to the left nor to
/// the right without losing an occurrence
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Repeat {
    depth: usize,
    start: usize,
    end: usize,
    interval: IntervalId,
}

impl Repeat {
    /// Returns the length of the repeat
    pub fn len(&self) -> usize {
        self.depth
    }

    /// Returns `true` if the repeat is empty, which never happens for a reported repeat
    pub fn is_empty(&self) -> bool {
        self.depth == 0
    }

    /// Returns the number of occurrences
    pub fn count(&self) -> usize {
        self.end - self.start
    }

    /// Returns the suffix-array ranks of the occurrences
    pub fn ranks(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns the id of the underlying interval in [`MaximalRepeats::intervals()`]
    pub fn interval(&self) -> IntervalId {
        self.interval
    }

    /// Returns the repeated bytes, taken from the occurrence with the smallest rank.
    ///
    /// # Panics
    ///
    /// Panics if `text` and `sa` are not the ones the repeat was found in.
    pub fn sequence<'t>(&self, text: &'t [u8], sa: &[usize]) -> &'t [u8] {
        let start = sa[self.start];
        &text[start..start + self.depth]
    }

    /// Iterates over the occurrences in suffix-array order, mapped back to their source
    /// sequences.
    pub fn locations<'a>(
        &self,
        corpus: &'a Corpus,
        sa: &'a [usize],
    ) -> impl Iterator<Item = Location> + 'a {
        let depth = self.depth;
        sa[self.start..self.end]
            .iter()
            .map(move |&pos| corpus.locate(pos, depth))
    }
}

/// A diagnostic raised when the requested minimum repeat length exceeds the longest repeat
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ThresholdClamped {
    /// The minimum length asked for
    pub requested: usize,
    /// The length actually used, i.e., the longest repeat length
    pub used: usize,
}

impl Display for ThresholdClamped {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "there aren't any repeats longer than {}", self.used)
    }
}

/// The maximal repeats of a corpus at or above a length threshold
///
/// # Examples
///
/// ```
/// use lcptree::{Corpus, MaximalRepeats};
///
/// let corpus = Corpus::new(["ATTAGCTTAGCG$"]);
/// let index = corpus.index();
/// let repeats = MaximalRepeats::find(&corpus, &index.sa, &index.lcp, None);
///
/// let longest: Vec<_> = repeats
///     .iter()
///     .map(|r| r.sequence(corpus.text(), &index.sa))
///     .collect();
/// assert_eq!(longest, vec![b"TTAGC"]);
/// ```
#[derive(Clone, Debug)]
pub struct MaximalRepeats {
    repeats: Vec<Repeat>,
    intervals: IntervalTree,
    max_len: usize,
    threshold: usize,
    clamped: Option<ThresholdClamped>,
}

impl MaximalRepeats {
    /// Finds all maximal repeats of length at least `min_len`.
    ///
    /// A `min_len` of `None` or `Some(0)` selects only the longest repeats. A `min_len` above the
    /// longest repeat length is lowered to it, and the adjustment is reported by
    /// [`clamped()`](MaximalRepeats::clamped).
    ///
    /// Matches never extend across the separators between corpus members. Repeats are ordered by
    /// decreasing length; repeats of equal length keep the order in which their intervals close,
    /// i.e., the suffix-array order of their last occurrence.
    ///
    /// This operation is *O*(*n*) plus sorting the reported repeats.
    ///
    /// # Panics
    ///
    /// Panics if `sa` and `lcp` differ in length.
    pub fn find(corpus: &Corpus, sa: &[usize], lcp: &[usize], min_len: Option<usize>) -> Self {
        let lcp = corpus.bounded_lcp(sa, lcp);
        let mut diversity = LeftDiversity {
            corpus,
            sa,
            delta: 0,
            maximal: Vec::new(),
        };
        let intervals = IntervalTree::with_hook(sa, &lcp, &mut diversity);

        let max_len = diversity.maximal.iter().map(|r| r.depth).max().unwrap_or(0);
        let (threshold, clamped) = match min_len {
            None | Some(0) => (max_len, None),
            Some(requested) if requested <= max_len => (requested, None),
            Some(requested) => (
                max_len,
                Some(ThresholdClamped {
                    requested,
                    used: max_len,
                }),
            ),
        };

        let mut repeats = diversity.maximal;
        repeats.retain(|r| r.depth >= threshold);
        // Stable, so equal lengths keep their closing order
        repeats.sort_by(|a, b| b.depth.cmp(&a.depth));

        Self {
            repeats,
            intervals,
            max_len,
            threshold,
            clamped,
        }
    }

    /// Iterates over the repeats, longest first
    pub fn iter(&self) -> std::slice::Iter<'_, Repeat> {
        self.repeats.iter()
    }

    /// Returns the number of repeats reported
    pub fn len(&self) -> usize {
        self.repeats.len()
    }

    /// Returns `true` if no repeat was found
    pub fn is_empty(&self) -> bool {
        self.repeats.is_empty()
    }

    /// Returns the length of the longest maximal repeat, or 0 if there is none
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Returns the minimum length actually applied
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Returns the diagnostic raised if the requested minimum length had to be lowered
    pub fn clamped(&self) -> Option<ThresholdClamped> {
        self.clamped
    }

    /// Returns the interval tree the repeats were read from
    pub fn intervals(&self) -> &IntervalTree {
        &self.intervals
    }
}

impl<'a> IntoIterator for &'a MaximalRepeats {
    type Item = &'a Repeat;
    type IntoIter = std::slice::Iter<'a, Repeat>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Collects left-diverse intervals during the interval stack pass.
///
/// `delta` is the largest rank `i` seen so far at which the bytes preceding the suffixes at ranks
/// `i - 1` and `i` differ, where running into the start of a sequence differs from everything.
/// An interval closed with left bound `lb` is left-diverse exactly when `delta > lb`.
struct LeftDiversity<'a> {
    corpus: &'a Corpus,
    sa: &'a [usize],
    delta: usize,
    maximal: Vec<Repeat>,
}

impl LeftDiversity<'_> {
    fn preceding(&self, rank: usize) -> Option<u8> {
        let pos = self.sa[rank];
        if self.corpus.is_segment_start(pos) {
            None
        } else {
            Some(self.corpus.text()[pos - 1])
        }
    }
}

impl BuildHook for LeftDiversity<'_> {
    fn closed(&mut self, id: IntervalId, interval: &Interval) {
        if interval.depth() > 0 && self.delta > interval.lb() {
            self.maximal.push(Repeat {
                depth: interval.depth(),
                start: interval.lb(),
                end: interval.range().end,
                interval: id,
            });
        }
    }

    fn advanced(&mut self, rank: usize) {
        match (self.preceding(rank - 1), self.preceding(rank)) {
            (Some(a), Some(b)) if a == b => {}
            _ => self.delta = rank,
        }
    }
}

/// Formats a repeat for display.
///
/// Sequences longer than 13 bytes are shortened to their first and last five bytes joined by
/// `...`, unless `full` is set. Bytes that are not valid UTF-8 are replaced.
///
/// # Examples
///
/// ```
/// use lcptree::abbreviate;
///
/// assert_eq!(abbreviate(b"ACGTACGTACGTAC", false), "ACGTA...CGTAC");
/// assert_eq!(abbreviate(b"ACGT", false), "ACGT");
/// ```
pub fn abbreviate(sequence: &[u8], full: bool) -> Cow<'_, str> {
    if full || sequence.len() <= ABBREVIATE_ABOVE {
        return String::from_utf8_lossy(sequence);
    }

    let head = String::from_utf8_lossy(&sequence[..ABBREVIATED_FLANK]);
    let tail = String::from_utf8_lossy(&sequence[sequence.len() - ABBREVIATED_FLANK..]);
    Cow::Owned(format!("{head}...{tail}"))
}
