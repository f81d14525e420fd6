// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

//! LaTeX drawings of suffix trees for the PSTricks packages `pst-node` and `pst-tree`.

use std::fmt::Write;

use lcptree::{IntervalTree, SuffixTree};

/// Edge labels longer than this are shortened to their first and last byte
const EDGE_LABEL_LEN: usize = 5;

pub struct Picture {
    pub x_unit: f64,
    pub y_unit: f64,
    /// Draw node ids in boxes instead of plain dots
    pub label_nodes: bool,
    /// Annotate internal nodes with their depth
    pub show_depth: bool,
}

/// Draws `tree` as a `pspicture` with labelled edges.
///
/// `text` and `sa` must be the ones the tree was built from.
pub fn picture(tree: &SuffixTree, text: &[u8], sa: &[usize], options: &Picture) -> String {
    let points = tree.layout();
    let width = text.len() as f64 * options.x_unit;
    let height = tree.max_level() as f64 * options.y_unit;

    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(
        out,
        "\\begin{{pspicture}}(0,{})({},0)",
        number(-height),
        number(width),
    );
    let _ = writeln!(
        out,
        "\\psset{{xunit={}, yunit={}}}",
        number(options.x_unit),
        number(options.y_unit),
    );

    // Edges first so nodes are drawn on top of them
    for id in tree.postorder() {
        let Some(parent) = tree.node(id).parent() else {
            continue;
        };
        let start = sa[tree.node(id).lb()] + tree.node(parent).depth();
        let label = edge_label(&text[start..start + tree.edge_len(id)]);
        let _ = writeln!(
            out,
            "\\pstextpath[c]{{\\psline[linecolor=lightgray]({},{})({},{})}}{{\\texttt{{{label}}}}}",
            number(points[parent].x),
            number(-points[parent].y),
            number(points[id].x),
            number(-points[id].y),
        );
    }

    for id in tree.postorder() {
        let node = tree.node(id);
        let (x, y) = (number(points[id].x), number(-points[id].y));
        if options.label_nodes {
            let _ = write!(
                out,
                "\\rput({x},{y}){{\\rnode{{{id}}}{{\\psframebox[linecolor=lightgray]{{{id}}}}}}}",
            );
        } else {
            let _ = writeln!(out, "\\dotnode({x},{y}){{{id}}}");
        }

        if let Some(suffix) = node.suffix() {
            let _ = writeln!(out, "\\nput{{-90}}{{{id}}}{{{}}}", suffix + 1);
        } else if options.show_depth {
            let _ = writeln!(
                out,
                "\\nput{{0}}{{{id}}}{{\\ovalnode[linecolor=lightgray]{{d{id}}}{{{}}}}}",
                node.depth(),
            );
        } else if options.label_nodes {
            out.push('\n');
        }
    }
    out.push_str("\\end{pspicture}\n");

    out
}

/// Draws the interval tree of `intervals` with `\pstree`, one `\Tr` per interval.
pub fn pstree(intervals: &IntervalTree) -> String {
    enum Step {
        Open(usize),
        Close,
    }

    let mut out = String::from("\\psset{nodesep=2pt, levelsep=1cm}\n");
    let mut steps = vec![Step::Open(intervals.root())];
    while let Some(step) = steps.pop() {
        let id = match step {
            Step::Open(id) => id,
            Step::Close => {
                out.push_str("}\n");
                continue;
            }
        };

        let interval = intervals.get(id);
        let node = format!(
            "\\Tr{{${}-[{}...{}]$}}",
            interval.depth(),
            interval.lb() + 1,
            interval.rb() + 1,
        );
        if interval.children().is_empty() {
            out.push_str(&node);
            out.push('\n');
        } else {
            let _ = writeln!(out, "\\pstree{{{node}}}{{");
            steps.push(Step::Close);
            steps.extend(interval.children().iter().rev().map(|&c| Step::Open(c)));
        }
    }

    out
}

fn edge_label(bytes: &[u8]) -> String {
    let label = if bytes.len() > EDGE_LABEL_LEN {
        let first = String::from_utf8_lossy(&bytes[..1]);
        let last = String::from_utf8_lossy(&bytes[bytes.len() - 1..]);
        format!("{first}...{last}")
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    };

    label.replace('$', "\\$")
}

/// Formats a coordinate with at most three decimals and no trailing zeros
fn number(value: f64) -> String {
    let formatted = format!("{value:.3}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_owned(),
        _ => trimmed.to_owned(),
    }
}
