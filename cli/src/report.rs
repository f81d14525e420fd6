// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use lcptree::{Corpus, Location, MaximalRepeats, Shustring, ShustringTable};

use crate::table::Table;

/// Formats a location as `[strand][sequence:]position`, all 1-based.
///
/// The strand is only shown if the reverse strand was searched and the sequence number only if
/// there is more than one sequence.
pub fn position(location: Location, sequences: usize, reverse: bool) -> String {
    let mut out = String::new();
    if reverse {
        out.push_str(&location.strand.to_string());
    }
    if sequences > 1 {
        out.push_str(&(location.sequence + 1).to_string());
    }
    if reverse || sequences > 1 {
        out.push(':');
    }
    out.push_str(&(location.offset + 1).to_string());

    out
}

pub struct RepeatColumns {
    pub all_positions: bool,
    pub full_sequences: bool,
}

pub fn repeats(
    corpus: &Corpus,
    sa: &[usize],
    repeats: &MaximalRepeats,
    columns: &RepeatColumns,
) -> Table {
    let sequences = corpus.sequence_count();
    let reverse = corpus.has_reverse_strand();

    let mut table = Table::new();
    let positions = if columns.all_positions {
        "Positions"
    } else {
        "Position"
    };
    table.row(["#", "Length", "Count", "Sequence", positions]);

    for repeat in repeats {
        let sequence = repeat.sequence(corpus.text(), sa);
        let sequence = lcptree::abbreviate(sequence, columns.full_sequences);
        let mut locations = repeat
            .locations(corpus, sa)
            .map(|location| position(location, sequences, reverse));
        let located = if columns.all_positions {
            locations.collect::<Vec<_>>().join(" ")
        } else {
            locations.next().unwrap_or_default()
        };

        table.row([
            String::new(),
            repeat.len().to_string(),
            repeat.count().to_string(),
            sequence.into_owned(),
            located,
        ]);
    }

    table
}

pub struct ShustringColumns {
    pub local: bool,
    pub quiet: bool,
}

/// Tabulates the shustrings of sequence `index`: all of them if `local` is set, otherwise only
/// the shortest, numbered.
pub fn shustrings(
    corpus: &Corpus,
    shustrings: &ShustringTable,
    index: usize,
    columns: &ShustringColumns,
) -> Table {
    let mut table = Table::new();
    let mut header = vec!["#"];
    if !columns.local {
        header.push("Count");
    }
    header.extend(["Position", "Length"]);
    if !columns.quiet {
        header.push("Shustring");
    }
    table.row(header);

    let found: Vec<Shustring> = if columns.local {
        shustrings.local(index).collect()
    } else {
        shustrings.global(index).collect()
    };
    for (count, shustring) in found.into_iter().enumerate() {
        let mut row = vec![String::new()];
        if !columns.local {
            row.push((count + 1).to_string());
        }
        row.push((shustring.position + 1).to_string());
        row.push(shustring.len.to_string());
        if !columns.quiet {
            row.push(String::from_utf8_lossy(shustring.sequence(corpus.text())).into_owned());
        }
        table.row(row);
    }

    table
}

#[cfg(test)]
mod tests {
    use lcptree::Strand;

    use super::*;

    #[test]
    fn position_strings() {
        let location = Location {
            strand: Strand::Reverse,
            sequence: 1,
            offset: 9,
        };

        assert_eq!(position(location, 1, false), "10");
        assert_eq!(position(location, 3, false), "2:10");
        assert_eq!(position(location, 1, true), "r:10");
        assert_eq!(position(location, 3, true), "r2:10");
    }

    #[test]
    fn repeat_table() {
        let corpus = Corpus::new(["ATTAGCTTAGCG$"]);
        let index = corpus.index();
        let found = MaximalRepeats::find(&corpus, &index.sa, &index.lcp, None);
        let columns = RepeatColumns {
            all_positions: true,
            full_sequences: false,
        };

        assert_eq!(
            repeats(&corpus, &index.sa, &found, &columns).to_string(),
            "#  Length  Count  Sequence  Positions\n   5       2      TTAGC     7 2\n",
        );
    }

    #[test]
    fn shustring_tables() {
        let corpus = Corpus::new(["AAC", "AAG"]);
        let index = corpus.index();
        let table = ShustringTable::new(&corpus, &index.sa, &index.lcp);

        let global = ShustringColumns {
            local: false,
            quiet: false,
        };
        assert_eq!(
            shustrings(&corpus, &table, 1, &global).to_string(),
            "#  Count  Position  Length  Shustring\n   1      3         1       G\n",
        );

        let local = ShustringColumns {
            local: true,
            quiet: true,
        };
        assert_eq!(
            shustrings(&corpus, &table, 0, &local).to_string(),
            "#  Position  Length\n   1         3\n   2         2\n   3         1\n",
        );
    }
}
