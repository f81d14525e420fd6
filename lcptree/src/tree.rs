// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::{collections::VecDeque, ops::Range};

use crate::interval::{IntervalId, IntervalTree};

/// Index of a [`Node`] inside a [`SuffixTree`]; also serves as the node's identity
pub type NodeId = usize;

/// A node of a [`SuffixTree`]
///
/// Internal nodes correspond one-to-one to LCP-intervals. Leaves correspond to single suffixes
/// and have a depth equal to the length of their suffix.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Node {
    depth: usize,
    start: usize,
    end: usize,
    level: usize,
    suffix: Option<usize>,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

impl Node {
    /// Returns the string depth of this node
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the first suffix-array rank below this node
    pub fn lb(&self) -> usize {
        self.start
    }

    /// Returns the last suffix-array rank below this node
    pub fn rb(&self) -> usize {
        self.end.saturating_sub(1)
    }

    /// Returns the suffix-array ranks below this node
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns the number of edges between this node and the root
    pub fn level(&self) -> usize {
        self.level
    }

    /// Returns `true` if this node is a leaf
    pub fn is_leaf(&self) -> bool {
        self.suffix.is_some()
    }

    /// Returns the text position of the suffix this leaf stands for, or `None` for internal
    /// nodes
    pub fn suffix(&self) -> Option<usize> {
        self.suffix
    }

    /// Returns the parent of this node, or `None` for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Callbacks for a depth-first walk over a [`SuffixTree`], see [`SuffixTree::visit()`]
pub trait Visitor {
    /// Called when the walk reaches `id`, before any of its children
    fn enter(&mut self, tree: &SuffixTree, id: NodeId) {
        let _ = (tree, id);
    }

    /// Called when the walk leaves `id`, after all of its children
    fn leave(&mut self, tree: &SuffixTree, id: NodeId) {
        let _ = (tree, id);
    }
}

/// A horizontal and vertical drawing position
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// Horizontal position; leaves sit at their suffix-array rank
    pub x: f64,
    /// Vertical position; equal to the node level, growing downwards
    pub y: f64,
}

/// An explicit suffix tree materialized from an [`IntervalTree`]
///
/// Nodes live in an arena and refer to each other by [`NodeId`]. Children of every node are
/// ordered by suffix-array rank.
///
/// # Examples
///
/// ```
/// use lcptree::{IntervalTree, SuffixTree};
///
/// // "abab"
/// let sa = [2, 0, 3, 1];
/// let lcp = [0, 2, 0, 1];
/// let tree = SuffixTree::new(&IntervalTree::new(&sa, &lcp), &sa);
///
/// let suffixes: Vec<_> = tree.leaves().filter_map(|id| tree.node(id).suffix()).collect();
/// assert_eq!(suffixes, vec![2, 0, 3, 1]);
/// ```
#[derive(Clone, Debug)]
pub struct SuffixTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl SuffixTree {
    /// Materializes the suffix tree described by `intervals`.
    ///
    /// One internal node is created per interval and one leaf per suffix-array rank. `sa` must be
    /// the suffix array the interval tree was built from.
    ///
    /// This operation is *O*(*n*).
    ///
    /// # Panics
    ///
    /// Panics if `sa` is shorter than the number of suffixes in `intervals`.
    #[must_use]
    pub fn new(intervals: &IntervalTree, sa: &[usize]) -> Self {
        assert!(
            sa.len() >= intervals.len(),
            "suffix array does not match the interval tree",
        );

        let n = intervals.len();
        let mut tree = Self {
            nodes: Vec::with_capacity(n + intervals.interval_count()),
            root: 0,
        };

        let root = intervals.get(intervals.root());
        tree.root = tree.add_node(None, root.depth(), root.range(), None);

        let mut stack: Vec<(IntervalId, NodeId)> = vec![(intervals.root(), tree.root)];
        while let Some((interval_id, node)) = stack.pop() {
            let interval = intervals.get(interval_id);
            let mut next = interval.lb();
            for &child_id in interval.children() {
                let child = intervals.get(child_id);
                for rank in next..child.lb() {
                    tree.add_leaf(node, rank, sa, n);
                }
                let id = tree.add_node(Some(node), child.depth(), child.range(), None);
                stack.push((child_id, id));
                next = child.range().end;
            }
            for rank in next..interval.range().end {
                tree.add_leaf(node, rank, sa, n);
            }
        }

        tree
    }

    fn add_leaf(&mut self, parent: NodeId, rank: usize, sa: &[usize], n: usize) {
        let suffix = sa[rank];
        self.add_node(Some(parent), n - suffix, rank..rank + 1, Some(suffix));
    }

    fn add_node(
        &mut self,
        parent: Option<NodeId>,
        depth: usize,
        range: Range<usize>,
        suffix: Option<usize>,
    ) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            depth,
            start: range.start,
            end: range.end,
            level: parent.map_or(0, |p| self.nodes[p].level + 1),
            suffix,
            parent,
            first_child: None,
            last_child: None,
            next_sibling: None,
        });

        if let Some(p) = parent {
            match self.nodes[p].last_child {
                Some(last) => self.nodes[last].next_sibling = Some(id),
                None => self.nodes[p].first_child = Some(id),
            }
            self.nodes[p].last_child = Some(id);
        }

        id
    }

    /// Returns the id of the root
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Returns the number of nodes, leaves included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds nothing but the root
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Returns the length of the edge leading into `id`, i.e., its depth minus its parent's
    /// depth. The root has no incoming edge and yields 0.
    pub fn edge_len(&self, id: NodeId) -> usize {
        let node = &self.nodes[id];
        node.parent
            .map_or(0, |p| node.depth.saturating_sub(self.nodes[p].depth))
    }

    /// Returns the largest level of any node
    pub fn max_level(&self) -> usize {
        self.nodes.iter().map(Node::level).max().unwrap_or(0)
    }

    /// Iterates over the children of `id`, ordered by suffix-array rank
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.nodes[id].first_child,
        }
    }

    /// Iterates over all nodes in preorder
    pub fn preorder(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![self.root];
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            let start = stack.len();
            stack.extend(self.children(id));
            stack[start..].reverse();
            Some(id)
        })
    }

    /// Iterates over all nodes in postorder
    pub fn postorder(&self) -> impl Iterator<Item = NodeId> + '_ {
        // (node, whether its children have been pushed)
        let mut stack = vec![(self.root, false)];
        std::iter::from_fn(move || {
            while let Some((id, expanded)) = stack.pop() {
                if expanded || self.nodes[id].first_child.is_none() {
                    return Some(id);
                }
                stack.push((id, true));
                let start = stack.len();
                stack.extend(self.children(id).map(|c| (c, false)));
                stack[start..].reverse();
            }
            None
        })
    }

    /// Iterates over all nodes level by level, left to right
    pub fn breadth_first(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut queue = VecDeque::from([self.root]);
        std::iter::from_fn(move || {
            let id = queue.pop_front()?;
            queue.extend(self.children(id));
            Some(id)
        })
    }

    /// Iterates over the leaves in suffix-array order
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.preorder().filter(|&id| self.nodes[id].is_leaf())
    }

    /// Walks the tree depth first, calling [`Visitor::enter()`] in preorder and
    /// [`Visitor::leave()`] in postorder.
    pub fn visit<V>(&self, visitor: &mut V)
    where
        V: Visitor + ?Sized,
    {
        let mut stack = vec![(self.root, false)];
        while let Some((id, entered)) = stack.pop() {
            if entered {
                visitor.leave(self, id);
                continue;
            }

            visitor.enter(self, id);
            stack.push((id, true));
            let start = stack.len();
            stack.extend(self.children(id).map(|c| (c, false)));
            stack[start..].reverse();
        }
    }

    /// Computes a drawing position for every node, indexed by [`NodeId`].
    ///
    /// Leaves are spaced evenly by suffix-array rank, internal nodes sit at the mean of their
    /// children's horizontal positions, and each level is one unit below its parent.
    pub fn layout(&self) -> Vec<Point> {
        let mut points = vec![Point { x: 0.0, y: 0.0 }; self.nodes.len()];
        for id in self.postorder() {
            let node = &self.nodes[id];
            let x = if node.first_child.is_none() {
                node.start as f64
            } else {
                let (sum, count) = self
                    .children(id)
                    .fold((0.0, 0.0), |(sum, count), c| (sum + points[c].x, count + 1.0));
                sum / count
            };
            points[id] = Point {
                x,
                y: node.level as f64,
            };
        }

        points
    }
}

/// Iterator over the children of a node, created by [`SuffixTree::children()`]
pub struct Children<'a> {
    tree: &'a SuffixTree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.tree.nodes[id].next_sibling;

        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Suffix tree of "abab"
    fn abab() -> SuffixTree {
        let sa = [2, 0, 3, 1];
        let lcp = [0, 2, 0, 1];
        SuffixTree::new(&IntervalTree::new(&sa, &lcp), &sa)
    }

    fn describe(tree: &SuffixTree, id: NodeId) -> (usize, usize, usize) {
        let node = tree.node(id);
        (node.depth(), node.lb(), node.rb())
    }

    #[test]
    fn one_node_per_interval_and_suffix() {
        let tree = abab();

        // Root, "ab", "b" and four leaves
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.leaves().count(), 4);
    }

    #[test]
    fn children_are_ordered_by_rank() {
        let tree = abab();
        let root: Vec<_> = tree
            .children(tree.root())
            .map(|id| describe(&tree, id))
            .collect();
        assert_eq!(root, vec![(2, 0, 1), (1, 2, 3)]);

        let ab = tree.children(tree.root()).next().unwrap();
        let leaves: Vec<_> = tree.children(ab).map(|id| describe(&tree, id)).collect();
        // "ab" and "abab" hang off "ab"; the first shares its whole length with the parent
        assert_eq!(leaves, vec![(2, 0, 0), (4, 1, 1)]);
    }

    #[test]
    fn levels_and_edges() {
        let tree = abab();

        assert_eq!(tree.node(tree.root()).level(), 0);
        assert_eq!(tree.max_level(), 2);
        for id in tree.leaves() {
            assert_eq!(tree.node(id).level(), 2);
            let parent = tree.node(id).parent().unwrap();
            assert_eq!(
                tree.edge_len(id),
                tree.node(id).depth() - tree.node(parent).depth(),
            );
        }
        assert_eq!(tree.edge_len(tree.root()), 0);
    }

    #[test]
    fn traversal_orders() {
        let tree = abab();
        let depths = |ids: Vec<NodeId>| -> Vec<usize> {
            ids.into_iter().map(|id| tree.node(id).depth()).collect()
        };

        assert_eq!(depths(tree.preorder().collect()), vec![0, 2, 2, 4, 1, 1, 3]);
        assert_eq!(depths(tree.postorder().collect()), vec![2, 4, 2, 1, 3, 1, 0]);
        assert_eq!(depths(tree.breadth_first().collect()), vec![0, 2, 1, 2, 4, 1, 3]);
    }

    #[test]
    fn visitor_brackets_subtrees() {
        struct Brackets(String);

        impl Visitor for Brackets {
            fn enter(&mut self, tree: &SuffixTree, id: NodeId) {
                if !tree.node(id).is_leaf() {
                    self.0.push('(');
                }
            }

            fn leave(&mut self, tree: &SuffixTree, id: NodeId) {
                match tree.node(id).suffix() {
                    Some(suffix) => self.0.push_str(&suffix.to_string()),
                    None => self.0.push(')'),
                }
            }
        }

        let mut brackets = Brackets(String::new());
        abab().visit(&mut brackets);
        assert_eq!(brackets.0, "((20)(31))");
    }

    #[test]
    fn layout_centers_parents() {
        let tree = abab();
        let points = tree.layout();

        let root = points[tree.root()];
        assert_eq!(root.y, 0.0);
        assert_eq!(root.x, 1.5);
        for id in tree.leaves() {
            assert_eq!(points[id].x, tree.node(id).lb() as f64);
        }
    }

    #[test]
    fn empty_tree() {
        let tree = SuffixTree::new(&IntervalTree::new(&[], &[]), &[]);

        assert!(tree.is_empty());
        assert_eq!(tree.preorder().count(), 1);
        assert_eq!(tree.leaves().count(), 0);
    }
}
