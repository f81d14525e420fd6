// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

#![allow(missing_docs)]

use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use lcptree::{Corpus, IntervalTree, MaximalRepeats, ShustringTable, SuffixTree, render};

const LEN: usize = 1 << 16;
const MEMBERS: usize = 4;

/// Deterministic pseudo-random DNA with a planted duplicate so repeats are non-trivial
fn members() -> Vec<Vec<u8>> {
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    let mut next = move || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        b"ACGT"[(state >> 62) as usize]
    };

    let mut members: Vec<Vec<u8>> = (0..MEMBERS)
        .map(|_| (0..LEN / MEMBERS).map(|_| next()).collect())
        .collect();
    let planted = members[0][..512].to_vec();
    members[MEMBERS - 1][1024..1536].copy_from_slice(&planted);

    members
}

fn consumers(c: &mut Criterion) {
    let corpus = Corpus::new(members());
    let index = corpus.index();

    let mut group = c.benchmark_group("consumers");
    group.throughput(Throughput::Bytes(corpus.len() as u64));

    group.bench_function("intervals", |b| {
        b.iter(|| IntervalTree::new(&index.sa, &index.lcp));
    });
    group.bench_function("suffix_tree", |b| {
        let intervals = IntervalTree::new(&index.sa, &index.lcp);
        b.iter(|| SuffixTree::new(&intervals, &index.sa));
    });
    group.bench_function("newick", |b| {
        b.iter_batched_ref(
            || SuffixTree::new(&IntervalTree::new(&index.sa, &index.lcp), &index.sa),
            |tree| render::newick(tree),
            BatchSize::LargeInput,
        );
    });
    group.bench_function("repeats", |b| {
        b.iter(|| MaximalRepeats::find(&corpus, &index.sa, &index.lcp, Some(12)));
    });
    group.bench_function("shustrings", |b| {
        b.iter(|| ShustringTable::new(&corpus, &index.sa, &index.lcp));
    });

    group.finish();
}

criterion_group!(benches, consumers);
criterion_main!(benches);
