// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

//! Suffix trees, maximal repeats and shortest unique substrings from LCP intervals.
//!
//! Every analysis in this crate starts from the same two arrays: a suffix array and its
//! longest-common-prefix (LCP) array. A single stack pass over them yields the tree of
//! LCP-intervals ([`IntervalTree`]), which is the suffix tree in all but name. From there this
//! crate can
//!
//! - materialize an explicit [`SuffixTree`] and serialize it with [`render`],
//! - report the [`MaximalRepeats`] of a text or a [`Corpus`] of sequences, and
//! - compute the shortest unique substrings of every position ([`ShustringTable`]).
//!
//! Computing the arrays themselves is not the job of this crate. With the default `index`
//! feature, [`Corpus::index()`] builds them through the `sufsort` crate; any other source works
//! as long as the arrays are consistent.
//!
//! # Examples
//!
//! Finding the longest repeat of a sequence:
//!
//! ```
//! use lcptree::{Corpus, MaximalRepeats};
//!
//! let corpus = Corpus::new(["ATTAGCTTAGCG"]);
//! let index = corpus.index();
//! let repeats = MaximalRepeats::find(&corpus, &index.sa, &index.lcp, None);
//!
//! let longest: Vec<_> = repeats
//!     .iter()
//!     .map(|repeat| (repeat.sequence(corpus.text(), &index.sa), repeat.count()))
//!     .collect();
//! assert_eq!(longest, vec![(b"TTAGC".as_slice(), 2)]);
//! ```
//!
//! Drawing the suffix tree of a text in Newick format:
//!
//! ```
//! use lcptree::{IntervalTree, SuffixTree, render};
//!
//! let sa = sufsort::SuffixArray::new(b"abab");
//! let lcp = sa.lcp();
//! let intervals = IntervalTree::new(sa.as_slice(), &lcp);
//! let tree = SuffixTree::new(&intervals, sa.as_slice());
//!
//! assert_eq!(render::newick(&tree), "((3:0,1:2):2,(4:0,2:2):1);");
//! ```

mod corpus;
mod interval;
pub mod newick;
pub mod render;
mod repeats;
mod shustring;
mod tree;

#[cfg(feature = "index")]
pub use corpus::Index;
pub use corpus::{Corpus, Location, SEPARATOR, Strand};
pub use interval::{
    BuildHook, InputError, Interval, IntervalId, IntervalTree, Preorder, validate,
};
pub use repeats::{MaximalRepeats, Repeat, ThresholdClamped, abbreviate};
pub use shustring::{Shustring, ShustringTable};
pub use tree::{Children, Node, NodeId, Point, SuffixTree, Visitor};
