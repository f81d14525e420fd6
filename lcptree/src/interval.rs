// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    ops::Range,
};

/// Index of an [`Interval`] inside an [`IntervalTree`]
pub type IntervalId = usize;

/// An LCP-interval: a maximal run of suffix-array ranks sharing a common prefix of length
/// [`depth()`](Interval::depth).
///
/// Ranks are stored half-open (`start..end`), but the usual closed bounds are available through
/// [`lb()`](Interval::lb) and [`rb()`](Interval::rb).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Interval {
    depth: usize,
    start: usize,
    end: usize,
    children: Vec<IntervalId>,
}

impl Interval {
    fn open(depth: usize, start: usize) -> Self {
        Self {
            depth,
            start,
            end: start,
            children: Vec::new(),
        }
    }

    /// Returns the length of the prefix shared by every suffix in this interval
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the left bound, i.e., the first rank of this interval
    pub fn lb(&self) -> usize {
        self.start
    }

    /// Returns the right bound, i.e., the last rank of this interval
    ///
    /// The result is meaningless for the empty root of an empty tree.
    pub fn rb(&self) -> usize {
        self.end.saturating_sub(1)
    }

    /// Returns the ranks covered by this interval
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns the number of suffixes in this interval
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if this interval covers no rank
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the child intervals, ordered by increasing left bound
    pub fn children(&self) -> &[IntervalId] {
        &self.children
    }
}

/// An observer of the stack pass that builds an [`IntervalTree`]
///
/// Both methods default to doing nothing, so implementors only override what they need.
pub trait BuildHook {
    /// Called once per interval, right after it is popped off the stack and its right bound is
    /// known. The root is reported last.
    ///
    /// `id` is the interval's final identity in the tree under construction. The interval's
    /// children are complete at this point, but the interval itself has not yet been attached to
    /// its parent.
    fn closed(&mut self, id: IntervalId, interval: &Interval) {
        let _ = (id, interval);
    }

    /// Called after rank `rank` has been processed, for every rank in `1..n`.
    ///
    /// Every interval reported to [`closed()`](BuildHook::closed) after this call has a right
    /// bound of at least `rank`.
    fn advanced(&mut self, rank: usize) {
        let _ = rank;
    }
}

impl BuildHook for () {}

/// The tree of LCP-intervals implicit in an LCP array
///
/// The root always has depth 0 and covers every rank. Children of an interval are strictly
/// deeper than it, ordered by left bound and pairwise disjoint; ranks of an interval not covered
/// by any child are the leaves of the corresponding suffix tree node (see
/// [`uncovered()`](IntervalTree::uncovered)).
///
/// # Examples
///
/// ```
/// use lcptree::IntervalTree;
///
/// // Suffixes of "abab" in order: "ab", "abab", "b", "bab"
/// let sa = [2, 0, 3, 1];
/// let lcp = [0, 2, 0, 1];
/// let tree = IntervalTree::new(&sa, &lcp);
///
/// let root = tree.get(tree.root());
/// assert_eq!(root.range(), 0..4);
///
/// let depths: Vec<_> = root.children().iter().map(|&c| tree.get(c).depth()).collect();
/// assert_eq!(depths, vec![2, 1]);
/// ```
#[derive(Clone, Debug)]
pub struct IntervalTree {
    intervals: Vec<Interval>,
    root: IntervalId,
    len: usize,
}

impl IntervalTree {
    /// Builds the interval tree for a suffix array and its LCP array.
    ///
    /// `lcp[i]` must be the length of the longest common prefix of the suffixes at ranks `i - 1`
    /// and `i`. `lcp[0]` is ignored. No trailing sentinel is needed: the builder flushes every
    /// open interval after the last rank.
    ///
    /// This operation is *O*(*n*). Inputs that are not a genuine suffix array and LCP array
    /// produce a well-formed but meaningless tree; see [`validate()`](crate::validate).
    ///
    /// # Panics
    ///
    /// Panics if `sa` and `lcp` differ in length.
    #[must_use]
    pub fn new(sa: &[usize], lcp: &[usize]) -> Self {
        Self::with_hook(sa, lcp, &mut ())
    }

    /// Builds the interval tree while reporting the stack pass to `hook`.
    ///
    /// # Panics
    ///
    /// Panics if `sa` and `lcp` differ in length.
    pub fn with_hook<H>(sa: &[usize], lcp: &[usize], hook: &mut H) -> Self
    where
        H: BuildHook + ?Sized,
    {
        assert_eq!(
            sa.len(),
            lcp.len(),
            "suffix array and LCP array must have the same length",
        );

        let n = sa.len();
        let mut intervals = vec![Interval::open(0, 0)];
        let mut stack: Vec<IntervalId> = vec![0];
        // A popped interval that still waits for its parent to be pushed
        let mut orphan: Option<IntervalId> = None;

        // Rank n stands in for a trailing LCP value below every real depth
        for i in 1..=n {
            let current = if i < n { Some(lcp[i]) } else { None };
            let mut left = i - 1;

            while let Some(&top) = stack.last() {
                if current.is_some_and(|d| d >= intervals[top].depth) {
                    break;
                }
                stack.pop();
                intervals[top].end = i;
                left = intervals[top].start;
                hook.closed(top, &intervals[top]);

                orphan = Some(top);
                if let Some(&parent) = stack.last() {
                    if current.is_none_or(|d| d <= intervals[parent].depth) {
                        intervals[parent].children.push(top);
                        orphan = None;
                    }
                }
            }

            if let (Some(&top), Some(d)) = (stack.last(), current) {
                if d > intervals[top].depth {
                    let id = intervals.len();
                    let mut interval = Interval::open(d, left);
                    interval.children.extend(orphan.take());
                    intervals.push(interval);
                    stack.push(id);
                }
            }

            if i < n {
                hook.advanced(i);
            }
        }

        // Only reachable for empty input, where the loop above never runs
        if n == 0 {
            hook.closed(0, &intervals[0]);
        }

        Self {
            intervals,
            root: 0,
            len: n,
        }
    }

    /// Returns the id of the root interval
    pub fn root(&self) -> IntervalId {
        self.root
    }

    /// Returns the interval with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn get(&self, id: IntervalId) -> &Interval {
        &self.intervals[id]
    }

    /// Returns the number of suffixes (leaves) the tree indexes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree indexes no suffix
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of intervals, the root included
    pub fn interval_count(&self) -> usize {
        self.intervals.len()
    }

    /// Returns the depth of the deepest interval
    pub fn max_depth(&self) -> usize {
        self.intervals.iter().map(Interval::depth).max().unwrap_or(0)
    }

    /// Iterates over `(id, interval)` pairs in creation order
    pub fn iter(&self) -> impl Iterator<Item = (IntervalId, &Interval)> {
        self.intervals.iter().enumerate()
    }

    /// Iterates over interval ids in preorder, children left to right
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![self.root],
        }
    }

    /// Iterates over the ranks of interval `id` that no child interval covers.
    ///
    /// These are exactly the ranks that hang directly off the interval as leaves.
    pub fn uncovered(&self, id: IntervalId) -> impl Iterator<Item = usize> + '_ {
        let interval = &self.intervals[id];
        let mut gaps = Vec::with_capacity(interval.children.len() + 1);
        let mut next = interval.start;
        for &child in &interval.children {
            gaps.push(next..self.intervals[child].start);
            next = self.intervals[child].end;
        }
        gaps.push(next..interval.end);

        gaps.into_iter().flatten()
    }
}

/// Preorder iterator over an [`IntervalTree`], created by [`IntervalTree::preorder()`]
pub struct Preorder<'a> {
    tree: &'a IntervalTree,
    stack: Vec<IntervalId>,
}

impl Iterator for Preorder<'_> {
    type Item = IntervalId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.intervals[id].children.iter().rev());

        Some(id)
    }
}

/// An error indicating that a suffix array and LCP array pair is malformed.
///
/// This error is returned by [`validate()`].
///
/// # Examples
///
/// ```
/// use lcptree::InputError;
///
/// let result = lcptree::validate(&[0, 0], &[0, 0]);
/// assert!(matches!(result, Err(InputError::Duplicate { rank: 1, suffix: 0 })));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InputError {
    /// The two arrays differ in length
    LengthMismatch {
        /// Length of the suffix array
        suffixes: usize,
        /// Length of the LCP array
        lcp: usize,
    },
    /// A suffix array entry lies outside `0..n`
    OutOfRange {
        /// Rank of the offending entry
        rank: usize,
        /// The offending entry
        suffix: usize,
    },
    /// A suffix array entry occurs twice
    Duplicate {
        /// Rank of the second occurrence
        rank: usize,
        /// The repeated entry
        suffix: usize,
    },
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            InputError::LengthMismatch { suffixes, lcp } => write!(
                f,
                "length mismatch: suffix array has {suffixes} entries, LCP array has {lcp}",
            ),
            InputError::OutOfRange { rank, suffix } => {
                write!(f, "suffix {suffix} at rank {rank} is out of range")
            }
            InputError::Duplicate { rank, suffix } => {
                write!(f, "suffix {suffix} at rank {rank} occurs more than once")
            }
        }
    }
}

impl Error for InputError {}

/// Checks that `sa` is a permutation of `0..n` and that `lcp` has matching length.
///
/// The builders trust their input for speed; call this once where the arrays are produced if
/// they come from an untrusted collaborator.
///
/// # Errors
///
/// Returns the first violation found.
pub fn validate(sa: &[usize], lcp: &[usize]) -> Result<(), InputError> {
    if sa.len() != lcp.len() {
        return Err(InputError::LengthMismatch {
            suffixes: sa.len(),
            lcp: lcp.len(),
        });
    }

    let mut seen = vec![false; sa.len()];
    for (rank, &suffix) in sa.iter().enumerate() {
        match seen.get_mut(suffix) {
            None => return Err(InputError::OutOfRange { rank, suffix }),
            Some(true) => return Err(InputError::Duplicate { rank, suffix }),
            Some(flag) => *flag = true,
        }
    }

    Ok(())
}
