// Copyright 2023 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

//! Suffix arrays for byte strings.
//!
//! [`SuffixArray`] sorts the suffixes of a byte string and derives the two companion arrays most
//! suffix-array algorithms need: the inverse suffix array and the longest-common-prefix (LCP)
//! array.
//!
//! # Examples
//!
//! ```
//! use sufsort::SuffixArray;
//!
//! let sa = SuffixArray::new(b"banana");
//! assert_eq!(sa.as_slice(), &[5, 3, 1, 0, 4, 2]);
//! assert_eq!(sa.lcp(), vec![0, 1, 3, 0, 0, 2]);
//! ```

mod doubling;
mod lcp;
mod suffix_array;

pub use suffix_array::SuffixArray;
