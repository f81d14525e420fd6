// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

//! Plain-text renderings of interval and suffix trees.
//!
//! Positions are printed 1-based throughout, as is customary for sequence coordinates.

use crate::{
    interval::IntervalTree,
    tree::{NodeId, SuffixTree, Visitor},
};

/// Serializes `tree` in Newick format.
///
/// Leaves are labelled with the 1-based start of their suffix; internal nodes are unlabelled.
/// Every node but the root carries the length of its incoming edge, i.e., its depth minus its
/// parent's depth. The result ends with `;` and has no trailing newline.
///
/// # Examples
///
/// ```
/// use lcptree::{IntervalTree, SuffixTree, render};
///
/// // "abab"
/// let sa = [2, 0, 3, 1];
/// let lcp = [0, 2, 0, 1];
/// let tree = SuffixTree::new(&IntervalTree::new(&sa, &lcp), &sa);
///
/// assert_eq!(render::newick(&tree), "((3:0,1:2):2,(4:0,2:2):1);");
/// ```
pub fn newick(tree: &SuffixTree) -> String {
    let mut writer = NewickWriter::default();
    tree.visit(&mut writer);

    writer.out
}

#[derive(Default)]
struct NewickWriter {
    out: String,
    /// Number of children already written, one entry per open internal node
    written: Vec<usize>,
}

impl Visitor for NewickWriter {
    fn enter(&mut self, tree: &SuffixTree, id: NodeId) {
        if let Some(count) = self.written.last_mut() {
            if *count > 0 {
                self.out.push(',');
            }
            *count += 1;
        }
        if !tree.node(id).is_leaf() {
            self.out.push('(');
            self.written.push(0);
        }
    }

    fn leave(&mut self, tree: &SuffixTree, id: NodeId) {
        let node = tree.node(id);
        match node.suffix() {
            Some(suffix) => self.out.push_str(&(suffix + 1).to_string()),
            None => {
                self.written.pop();
                self.out.push(')');
            }
        }

        if node.parent().is_some() {
            self.out.push(':');
            self.out.push_str(&tree.edge_len(id).to_string());
        } else {
            self.out.push(';');
        }
    }
}

/// Renders `tree` in interval notation.
///
/// Each interval is printed as `depth-[lb..rb]` on its own line, indented by two spaces per
/// nesting level, parents before children.
///
/// # Examples
///
/// ```
/// use lcptree::{IntervalTree, render};
///
/// let tree = IntervalTree::new(&[2, 0, 3, 1], &[0, 2, 0, 1]);
///
/// assert_eq!(render::intervals(&tree), "0-[1..4]\n  2-[1..2]\n  1-[3..4]\n");
/// ```
pub fn intervals(tree: &IntervalTree) -> String {
    let mut out = String::new();
    let mut stack = vec![(tree.root(), 0)];
    while let Some((id, level)) = stack.pop() {
        let interval = tree.get(id);
        out.push_str(&"  ".repeat(level));
        out.push_str(&format!(
            "{}-[{}..{}]\n",
            interval.depth(),
            interval.lb() + 1,
            interval.rb() + 1,
        ));
        stack.extend(interval.children().iter().rev().map(|&c| (c, level + 1)));
    }

    out
}

/// Renders the structure of `tree`, one node per line in preorder.
///
/// Each line shows the node id, its depth and rank range, indented by level. Non-root nodes are
/// followed by `^parent` and leaves additionally by `@` and the 1-based start of their suffix.
pub fn outline(tree: &SuffixTree) -> String {
    let mut out = String::new();
    for id in tree.preorder() {
        let node = tree.node(id);
        out.push_str(&"  ".repeat(node.level()));
        out.push_str(&format!(
            "{id}: {}-[{}..{}]",
            node.depth(),
            node.lb() + 1,
            node.rb() + 1,
        ));
        if let Some(parent) = node.parent() {
            out.push_str(&format!(" ^{parent}"));
        }
        if let Some(suffix) = node.suffix() {
            out.push_str(&format!(" @{}", suffix + 1));
        }
        out.push('\n');
    }

    out
}
