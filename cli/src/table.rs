// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::fmt::{self, Display, Formatter};

const PADDING: usize = 2;

/// Rows of cells printed with aligned columns.
///
/// Every cell but the last of a row is padded to the width of its column plus two spaces. The
/// last cell of a row is printed as is and does not widen its column.
#[derive(Default)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row<I>(&mut self, cells: I)
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.rows
            .push(cells.into_iter().map(|cell| cell.to_string()).collect());
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths = Vec::new();
        for row in &self.rows {
            let aligned = row.len().saturating_sub(1);
            if widths.len() < aligned {
                widths.resize(aligned, 0);
            }
            for (width, cell) in widths.iter_mut().zip(&row[..aligned]) {
                *width = (*width).max(cell.chars().count());
            }
        }

        widths
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let widths = self.widths();
        for row in &self.rows {
            let Some((last, aligned)) = row.split_last() else {
                writeln!(f)?;
                continue;
            };
            for (cell, width) in aligned.iter().zip(&widths) {
                write!(f, "{cell:<width$}", width = width + PADDING)?;
            }
            writeln!(f, "{last}")?;
        }

        Ok(())
    }
}
