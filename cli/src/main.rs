// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

mod fasta;
mod latex;
mod report;
mod table;

use std::{
    fs::File,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use lcptree::{Corpus, IntervalTree, MaximalRepeats, ShustringTable, SuffixTree, render};
use regex::Regex;

use crate::{
    fasta::Sequence,
    latex::Picture,
    report::{RepeatColumns, ShustringColumns},
};

#[derive(Parser)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Draw the suffix tree of every sequence, as LaTeX by default
    Tree {
        /// Print the interval tree in LaTeX pstree notation
        #[arg(short = 'i')]
        intervals: bool,
        /// Print the tree in Newick notation
        #[arg(short = 'n')]
        newick: bool,
        /// Print the tree structure as plain text
        #[arg(short = 't')]
        text: bool,
        /// Show the depth of internal nodes
        #[arg(short = 'd')]
        depth: bool,
        /// Label nodes with their ids
        #[arg(short = 'l')]
        label: bool,
        /// LaTeX x-unit
        #[arg(short = 'x', default_value_t = 1.0)]
        x_unit: f64,
        /// LaTeX y-unit
        #[arg(short = 'y', default_value_t = 1.5)]
        y_unit: f64,
        /// Append the sentinel character '$'
        #[arg(short = 's')]
        sentinel: bool,
        files: Vec<PathBuf>,
    },
    /// Find maximal repeats
    Repeats {
        /// Minimum repeat length; default: longest
        #[arg(short = 'm')]
        min_len: Option<usize>,
        /// Include the reverse strand
        #[arg(short = 'r')]
        reverse: bool,
        /// Print all positions
        #[arg(short = 'p')]
        all_positions: bool,
        /// Print full sequences
        #[arg(short = 's')]
        full_sequences: bool,
        files: Vec<PathBuf>,
    },
    /// Compute shortest unique substrings
    Shustring {
        /// Print every shustring instead of only the shortest ones
        #[arg(short = 'l')]
        local: bool,
        /// Include the reverse strand
        #[arg(short = 'r')]
        reverse: bool,
        /// Don't print the shustrings themselves
        #[arg(short = 'q')]
        quiet: bool,
        /// Restrict output to sequences whose header matches this regex
        #[arg(short = 's', default_value = ".")]
        select: Regex,
        files: Vec<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut out = io::stdout().lock();

    match args.command {
        Command::Tree {
            intervals,
            newick,
            text,
            depth,
            label,
            x_unit,
            y_unit,
            sentinel,
            files,
        } => {
            let picture = Picture {
                x_unit,
                y_unit,
                label_nodes: label,
                show_depth: depth,
            };
            for_each_input(&files, |sequences| {
                for sequence in sequences {
                    let mut data = sequence.data;
                    if sentinel {
                        data.push(b'$');
                    }
                    let index = Corpus::new([&data]).index();
                    let interval_tree = IntervalTree::new(&index.sa, &index.lcp);

                    let drawing = if intervals {
                        latex::pstree(&interval_tree)
                    } else {
                        let tree = SuffixTree::new(&interval_tree, &index.sa);
                        if newick {
                            render::newick(&tree) + "\n"
                        } else if text {
                            render::outline(&tree)
                        } else {
                            latex::picture(&tree, &data, &index.sa, &picture)
                        }
                    };
                    write!(out, "{drawing}").context("Failed to write suffix tree")?;
                }

                Ok(())
            })?;
        }
        Command::Repeats {
            min_len,
            reverse,
            all_positions,
            full_sequences,
            files,
        } => {
            let columns = RepeatColumns {
                all_positions,
                full_sequences,
            };
            for_each_input(&files, |sequences| {
                let corpus = corpus(&sequences, reverse);
                let index = corpus.index();
                let repeats = MaximalRepeats::find(&corpus, &index.sa, &index.lcp, min_len);
                if let Some(clamped) = repeats.clamped() {
                    eprintln!("lcptree: {clamped}");
                }

                let table = report::repeats(&corpus, &index.sa, &repeats, &columns);
                write!(out, "{table}").context("Failed to write repeats")
            })?;
        }
        Command::Shustring {
            local,
            reverse,
            quiet,
            select,
            files,
        } => {
            let columns = ShustringColumns { local, quiet };
            for_each_input(&files, |sequences| {
                let corpus = corpus(&sequences, reverse);
                let index = corpus.index();
                let shustrings = ShustringTable::new(&corpus, &index.sa, &index.lcp);

                for (i, sequence) in sequences.iter().enumerate() {
                    if !select.is_match(&sequence.header) {
                        continue;
                    }
                    let table = report::shustrings(&corpus, &shustrings, i, &columns);
                    write!(out, ">{}\n{table}", sequence.header)
                        .context("Failed to write shustrings")?;
                }

                Ok(())
            })?;
        }
    }

    Ok(())
}

/// Reads FASTA from every file in `files`, or from standard input if there are none, and hands
/// the sequences of each input to `f` separately
fn for_each_input<F>(files: &[PathBuf], mut f: F) -> anyhow::Result<()>
where
    F: FnMut(Vec<Sequence>) -> anyhow::Result<()>,
{
    if files.is_empty() {
        let sequences =
            fasta::read(io::stdin().lock()).context("Failed to read FASTA from standard input")?;
        return f(sequences);
    }

    for path in files {
        let file = File::open(path)
            .with_context(|| format!("Failed to open input file '{}'", path.display()))?;
        let sequences = fasta::read(file)
            .with_context(|| format!("Failed to read FASTA file '{}'", path.display()))?;
        f(sequences)?;
    }

    Ok(())
}

fn corpus(sequences: &[Sequence], reverse: bool) -> Corpus {
    let forward: Vec<&[u8]> = sequences.iter().map(|s| s.data.as_slice()).collect();
    if !reverse {
        return Corpus::new(forward);
    }

    let complements: Vec<Vec<u8>> = sequences.iter().map(Sequence::reverse_complement).collect();
    let complements: Vec<&[u8]> = complements.iter().map(Vec::as_slice).collect();
    Corpus::with_reverse_strand(&forward, &complements)
}
