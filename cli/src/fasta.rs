// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::io::{self, Read};

use bio::{alphabets::dna, io::fasta};

/// A FASTA record
pub struct Sequence {
    pub header: String,
    pub data: Vec<u8>,
}

impl Sequence {
    pub fn reverse_complement(&self) -> Vec<u8> {
        dna::revcomp(&self.data)
    }
}

/// Reads every record from `reader`
pub fn read<R: Read>(reader: R) -> io::Result<Vec<Sequence>> {
    fasta::Reader::new(reader)
        .records()
        .map(|record| {
            let record = record?;
            let header = match record.desc() {
                Some(desc) => format!("{} {desc}", record.id()),
                None => record.id().to_owned(),
            };

            Ok(Sequence {
                header,
                data: record.seq().to_vec(),
            })
        })
        .collect()
}
