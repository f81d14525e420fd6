// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

#![allow(missing_docs)]

use std::collections::{BTreeMap, BTreeSet};

use lcptree::{Corpus, IntervalTree, MaximalRepeats, ShustringTable, SuffixTree, render};
use quickcheck::quickcheck;
use sufsort::SuffixArray;

/// Brute-force checks are cubic, so inputs are capped at this length
const BRUTE_FORCE_LEN: usize = 48;

/// Maps arbitrary bytes onto a four-letter alphabet so that repeats are common
fn dna(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().map(|&b| b"ACGT"[usize::from(b % 4)]).collect()
}

fn build(text: &[u8]) -> (Vec<usize>, Vec<usize>, SuffixTree) {
    let sa = SuffixArray::new(text);
    let lcp = sa.lcp();
    let sa = sa.as_slice().to_vec();
    let tree = SuffixTree::new(&IntervalTree::new(&sa, &lcp), &sa);

    (sa, lcp, tree)
}

#[test]
fn every_suffix_is_one_leaf() {
    fn prop(bytes: Vec<u8>) -> bool {
        let text = dna(&bytes);
        let (sa, _, tree) = build(&text);

        let suffixes: Vec<_> = tree
            .leaves()
            .filter_map(|id| tree.node(id).suffix())
            .collect();
        suffixes == sa
    }
    quickcheck(prop as fn(Vec<u8>) -> bool);
}

#[test]
fn internal_nodes_branch() {
    fn prop(bytes: Vec<u8>) -> bool {
        let text = dna(&bytes);
        let (_, _, tree) = build(&text);

        tree.preorder()
            .filter(|&id| id != tree.root() && !tree.node(id).is_leaf())
            .all(|id| tree.children(id).count() >= 2)
    }
    quickcheck(prop as fn(Vec<u8>) -> bool);
}

#[test]
fn depth_grows_away_from_root() {
    fn prop(bytes: Vec<u8>) -> bool {
        let text = dna(&bytes);
        let (_, _, tree) = build(&text);

        tree.preorder().all(|id| {
            let node = tree.node(id);
            match node.parent() {
                None => node.depth() == 0 && node.level() == 0,
                Some(parent) => {
                    let parent = tree.node(parent);
                    let deeper = if node.is_leaf() {
                        node.depth() >= parent.depth()
                    } else {
                        node.depth() > parent.depth()
                    };
                    deeper && node.level() == parent.level() + 1
                }
            }
        })
    }
    quickcheck(prop as fn(Vec<u8>) -> bool);
}

#[test]
fn generated_arrays_validate() {
    fn prop(bytes: Vec<u8>) -> bool {
        let text = dna(&bytes);
        let (sa, lcp, _) = build(&text);

        lcptree::validate(&sa, &lcp).is_ok()
    }
    quickcheck(prop as fn(Vec<u8>) -> bool);
}

/// Enumerates every substring that occurs at least twice and cannot be extended to either side
/// without losing an occurrence
fn brute_force_repeats(text: &[u8]) -> BTreeSet<(Vec<u8>, usize)> {
    let mut repeats = BTreeSet::new();
    for len in 1..=text.len() {
        let mut occurrences: BTreeMap<&[u8], Vec<usize>> = BTreeMap::new();
        for start in 0..=text.len() - len {
            occurrences
                .entry(&text[start..start + len])
                .or_default()
                .push(start);
        }

        for (pattern, starts) in occurrences {
            if starts.len() < 2 {
                continue;
            }
            let preceding: BTreeSet<_> = starts
                .iter()
                .map(|&p| p.checked_sub(1).map(|q| text[q]))
                .collect();
            let following: BTreeSet<_> = starts
                .iter()
                .map(|&p| text.get(p + len).copied())
                .collect();
            if preceding.len() > 1 && following.len() > 1 {
                repeats.insert((pattern.to_vec(), starts.len()));
            }
        }
    }

    repeats
}

#[test]
fn repeats_are_exactly_the_maximal_ones() {
    fn prop(bytes: Vec<u8>) -> bool {
        let mut text = dna(&bytes);
        text.truncate(BRUTE_FORCE_LEN);

        let corpus = Corpus::new([&text]);
        let index = corpus.index();
        let repeats = MaximalRepeats::find(&corpus, &index.sa, &index.lcp, Some(1));

        let found: BTreeSet<_> = repeats
            .iter()
            .map(|r| (r.sequence(corpus.text(), &index.sa).to_vec(), r.count()))
            .collect();
        found.len() == repeats.len() && found == brute_force_repeats(&text)
    }
    quickcheck(prop as fn(Vec<u8>) -> bool);
}

#[test]
fn repeats_stay_inside_members() {
    fn prop(a: Vec<u8>, b: Vec<u8>) -> bool {
        let corpus = Corpus::new([dna(&a), dna(&b)]);
        let index = corpus.index();
        let repeats = MaximalRepeats::find(&corpus, &index.sa, &index.lcp, Some(1));

        repeats.iter().all(|repeat| {
            index.sa[repeat.ranks()].iter().all(|&pos| {
                let segment = corpus.segment(corpus.segment_of(pos));
                segment.contains(&pos) && pos + repeat.len() <= segment.end
            })
        })
    }
    quickcheck(prop as fn(Vec<u8>, Vec<u8>) -> bool);
}

#[test]
fn repeats_are_sorted_longest_first() {
    fn prop(bytes: Vec<u8>, min_len: u8) -> bool {
        let corpus = Corpus::new([dna(&bytes)]);
        let index = corpus.index();
        let repeats = MaximalRepeats::find(
            &corpus,
            &index.sa,
            &index.lcp,
            Some(usize::from(min_len % 8)),
        );

        repeats.iter().all(|r| r.len() >= repeats.threshold())
            && repeats
                .iter()
                .zip(repeats.iter().skip(1))
                .all(|(a, b)| a.len() >= b.len())
    }
    quickcheck(prop as fn(Vec<u8>, u8) -> bool);
}

#[test]
fn shustrings_are_unique_and_shortest() {
    fn prop(bytes: Vec<u8>) -> bool {
        let text = dna(&bytes);
        let corpus = Corpus::new([&text]);
        let index = corpus.index();
        let table = ShustringTable::new(&corpus, &index.sa, &index.lcp);
        let sa = SuffixArray::new(&text);

        let finite = (0..text.len()).all(|pos| match table.get(pos) {
            Some(len) => {
                sa.count(&text[pos..pos + len]) == 1
                    && (len == 1 || sa.count(&text[pos..pos + len - 1]) > 1)
            }
            // The whole rest of the sequence occurs elsewhere too
            None => sa.count(&text[pos..]) > 1,
        });
        let minimum = table.local(0).map(|s| s.len).min();
        let global = table.global(0).all(|s| Some(s.len) == minimum);

        finite && table.minimum(0) == minimum && global
    }
    quickcheck(prop as fn(Vec<u8>) -> bool);
}

#[test]
fn newick_round_trips() {
    fn prop(bytes: Vec<u8>) -> bool {
        let text = dna(&bytes);
        if text.is_empty() {
            return true;
        }
        let (sa, _, tree) = build(&text);
        let Ok(parsed) = lcptree::newick::parse(&render::newick(&tree)) else {
            return false;
        };

        let leaves: Vec<_> = parsed
            .leaves()
            .map(|i| {
                (
                    parsed.node(i).label().map(str::to_owned),
                    parsed.distance_from_root(i),
                )
            })
            .collect();
        let expected: Vec<_> = sa
            .iter()
            .map(|&suffix| {
                (
                    Some((suffix + 1).to_string()),
                    (text.len() - suffix) as f64,
                )
            })
            .collect();

        parsed.len() == tree.len() && leaves == expected
    }
    quickcheck(prop as fn(Vec<u8>) -> bool);
}

#[test]
fn analyses_are_deterministic() {
    fn prop(bytes: Vec<u8>) -> bool {
        let text = dna(&bytes);
        let (sa, lcp, tree) = build(&text);
        let again = SuffixTree::new(&IntervalTree::new(&sa, &lcp), &sa);

        let corpus = Corpus::new([&text]);
        let first = MaximalRepeats::find(&corpus, &sa, &lcp, Some(1));
        let second = MaximalRepeats::find(&corpus, &sa, &lcp, Some(1));

        render::newick(&tree) == render::newick(&again)
            && first.iter().eq(second.iter())
            && ShustringTable::new(&corpus, &sa, &lcp) == ShustringTable::new(&corpus, &sa, &lcp)
    }
    quickcheck(prop as fn(Vec<u8>) -> bool);
}
