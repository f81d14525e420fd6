// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

//! A reader for trees in Newick format.
//!
//! The grammar understood is the common subset: nested parenthesized lists of comma-separated
//! subtrees, optional node labels (bare or single-quoted), optional `:length` suffixes, and a
//! terminating `;`. Whitespace between tokens is ignored.

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// A node of a parsed [`NewickTree`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewickNode {
    label: Option<String>,
    length: Option<f64>,
    parent: Option<usize>,
    children: Vec<usize>,
}

impl NewickNode {
    /// Returns the node label, if any
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the length of the edge leading into this node, if given
    pub fn length(&self) -> Option<f64> {
        self.length
    }

    /// Returns the parent index, or `None` for the root
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Returns the child indices in input order
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    /// Returns `true` if this node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A tree read by [`parse()`]
///
/// Nodes are stored in the order their opening token appears in the input, so the root has
/// index 0 and indices follow preorder.
#[derive(Clone, Debug, PartialEq)]
pub struct NewickTree {
    nodes: Vec<NewickNode>,
}

impl NewickTree {
    /// Returns the index of the root
    pub fn root(&self) -> usize {
        0
    }

    /// Returns the node at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn node(&self, index: usize) -> &NewickNode {
        &self.nodes[index]
    }

    /// Returns the number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has no nodes, which never happens for a parsed tree
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over the leaves from left to right
    pub fn leaves(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.nodes.len()).filter(|&i| self.nodes[i].is_leaf())
    }

    /// Returns the sum of edge lengths from the root down to `index`.
    ///
    /// Missing lengths count as 0 and the root's own length is ignored.
    pub fn distance_from_root(&self, index: usize) -> f64 {
        let mut distance = 0.0;
        let mut current = index;
        while let Some(parent) = self.nodes[current].parent {
            distance += self.nodes[current].length.unwrap_or(0.0);
            current = parent;
        }

        distance
    }
}

/// An error indicating that the input is not a valid Newick tree.
#[derive(Clone, Debug, PartialEq)]
pub enum NewickError {
    /// The input ended before the closing `;`
    UnexpectedEnd,
    /// A character appeared where it is not allowed
    Unexpected {
        /// Byte offset of the character
        position: usize,
        /// The offending character
        found: char,
    },
    /// A quoted label is missing its closing quote
    UnterminatedLabel {
        /// Byte offset of the opening quote
        position: usize,
    },
    /// A branch length is not a number
    InvalidLength {
        /// Byte offset of the length
        position: usize,
        /// The text that failed to parse
        text: String,
    },
    /// Something other than whitespace follows the closing `;`
    TrailingInput {
        /// Byte offset of the first trailing character
        position: usize,
    },
}

impl Display for NewickError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            NewickError::UnexpectedEnd => write!(f, "unexpected end of input"),
            NewickError::Unexpected { position, found } => {
                write!(f, "unexpected {found:?} at offset {position}")
            }
            NewickError::UnterminatedLabel { position } => {
                write!(f, "unterminated quoted label starting at offset {position}")
            }
            NewickError::InvalidLength { position, text } => {
                write!(f, "invalid branch length {text:?} at offset {position}")
            }
            NewickError::TrailingInput { position } => {
                write!(f, "trailing input at offset {position}")
            }
        }
    }
}

impl Error for NewickError {}

/// Parses a single Newick tree.
///
/// # Errors
///
/// Returns an error if `input` does not hold exactly one well-formed tree.
///
/// # Examples
///
/// ```
/// let tree = lcptree::newick::parse("((A:1,B:2)x:3,C:4);")?;
///
/// let labels: Vec<_> = tree.leaves().filter_map(|i| tree.node(i).label()).collect();
/// assert_eq!(labels, vec!["A", "B", "C"]);
/// assert_eq!(tree.distance_from_root(2), 4.0);
/// # Ok::<(), lcptree::newick::NewickError>(())
/// ```
pub fn parse(input: &str) -> Result<NewickTree, NewickError> {
    Parser {
        input: input.as_bytes(),
        pos: 0,
        nodes: Vec::new(),
    }
    .tree()
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    nodes: Vec<NewickNode>,
}

impl Parser<'_> {
    fn tree(mut self) -> Result<NewickTree, NewickError> {
        // Internal nodes whose closing parenthesis has not been seen yet
        let mut open: Vec<usize> = Vec::new();

        loop {
            // Start of a subtree
            self.skip_whitespace();
            let parent = open.last().copied();
            let id = self.add_node(parent);
            if self.peek() == Some(b'(') {
                self.pos += 1;
                open.push(id);
                continue;
            }
            self.annotate(id)?;

            // End of a subtree: climb out of closed lists until a sibling or the end follows
            loop {
                self.skip_whitespace();
                match self.peek() {
                    Some(b',') if !open.is_empty() => {
                        self.pos += 1;
                        break;
                    }
                    Some(b')') => {
                        let Some(closed) = open.pop() else {
                            return Err(self.unexpected(b')'));
                        };
                        self.pos += 1;
                        self.annotate(closed)?;
                    }
                    Some(b';') if open.is_empty() => {
                        self.pos += 1;
                        self.skip_whitespace();
                        if self.pos < self.input.len() {
                            return Err(NewickError::TrailingInput { position: self.pos });
                        }
                        return Ok(NewickTree { nodes: self.nodes });
                    }
                    Some(c) => return Err(self.unexpected(c)),
                    None => return Err(NewickError::UnexpectedEnd),
                }
            }
        }
    }

    fn add_node(&mut self, parent: Option<usize>) -> usize {
        let id = self.nodes.len();
        self.nodes.push(NewickNode {
            parent,
            ..NewickNode::default()
        });
        if let Some(p) = parent {
            self.nodes[p].children.push(id);
        }

        id
    }

    /// Reads the optional label and branch length of node `id`
    fn annotate(&mut self, id: usize) -> Result<(), NewickError> {
        self.skip_whitespace();
        self.nodes[id].label = self.label()?;

        self.skip_whitespace();
        if self.peek() == Some(b':') {
            self.pos += 1;
            self.skip_whitespace();
            let start = self.pos;
            while self
                .peek()
                .is_some_and(|c| c.is_ascii_digit() || b".eE+-".contains(&c))
            {
                self.pos += 1;
            }
            let text = String::from_utf8_lossy(&self.input[start..self.pos]).into_owned();
            let length = text.parse().map_err(|_| NewickError::InvalidLength {
                position: start,
                text,
            })?;
            self.nodes[id].length = Some(length);
        }

        Ok(())
    }

    fn label(&mut self) -> Result<Option<String>, NewickError> {
        if self.peek() == Some(b'\'') {
            let start = self.pos;
            self.pos += 1;
            let mut label = Vec::new();
            loop {
                match self.peek() {
                    None => return Err(NewickError::UnterminatedLabel { position: start }),
                    // A doubled quote stands for a literal one
                    Some(b'\'') if self.input.get(self.pos + 1) == Some(&b'\'') => {
                        label.push(b'\'');
                        self.pos += 2;
                    }
                    Some(b'\'') => {
                        self.pos += 1;
                        break;
                    }
                    Some(c) => {
                        label.push(c);
                        self.pos += 1;
                    }
                }
            }
            return Ok(Some(String::from_utf8_lossy(&label).into_owned()));
        }

        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| !c.is_ascii_whitespace() && !b"(),:;".contains(&c))
        {
            self.pos += 1;
        }
        if start == self.pos {
            Ok(None)
        } else {
            Ok(Some(
                String::from_utf8_lossy(&self.input[start..self.pos]).into_owned(),
            ))
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn unexpected(&self, c: u8) -> NewickError {
        NewickError::Unexpected {
            position: self.pos,
            found: char::from(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_with_lengths() {
        let tree = parse("((3:0,1:2):2,(4:0,2:2):1);").unwrap();

        assert_eq!(tree.len(), 7);
        assert_eq!(tree.node(tree.root()).children(), &[1, 4]);

        let leaves: Vec<_> = tree
            .leaves()
            .map(|i| (tree.node(i).label().unwrap(), tree.distance_from_root(i)))
            .collect();
        assert_eq!(leaves, vec![("3", 2.0), ("1", 4.0), ("4", 1.0), ("2", 3.0)]);
    }

    #[test]
    fn labels_whitespace_and_quotes() {
        let tree = parse(" ( 'it''s' : 1.5 , B ) root ;\n").unwrap();

        assert_eq!(tree.node(0).label(), Some("root"));
        assert_eq!(tree.node(1).label(), Some("it's"));
        assert_eq!(tree.node(1).length(), Some(1.5));
        assert_eq!(tree.node(2).label(), Some("B"));
        assert_eq!(tree.node(2).length(), None);
    }

    #[test]
    fn single_leaf_and_empty_labels() {
        let tree = parse("A;").unwrap();
        assert_eq!(tree.len(), 1);
        assert!(tree.node(0).is_leaf());

        let tree = parse("(,);").unwrap();
        assert_eq!(tree.leaves().count(), 2);
        assert_eq!(tree.node(1).label(), None);
    }

    #[test]
    fn malformed_input() {
        assert_eq!(parse("(A,B)"), Err(NewickError::UnexpectedEnd));
        assert_eq!(
            parse("(A,B));"),
            Err(NewickError::Unexpected {
                position: 5,
                found: ')'
            }),
        );
        assert_eq!(
            parse("(A,B);x"),
            Err(NewickError::TrailingInput { position: 6 }),
        );
        assert!(matches!(
            parse("(A:x,B);"),
            Err(NewickError::InvalidLength { position: 3, .. }),
        ));
        assert_eq!(
            parse("('A,B);"),
            Err(NewickError::UnterminatedLabel { position: 1 }),
        );
    }
}
