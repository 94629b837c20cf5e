//! CSV decoding, the pipeline's upstream collaborator. Quoted fields with
//! embedded delimiters or newlines are handled here, before any row reaches
//! the mapper.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use jobflow_mapper::RawRow;

pub fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    decode_rows(file).with_context(|| format!("failed to decode {}", path.display()))
}

pub fn decode_rows(reader: impl Read) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = RawRow::new();
        for (index, header) in headers.iter().enumerate() {
            if let Some(value) = record.get(index) {
                row.insert(header, value);
            }
        }
        rows.push(row);
    }
    Ok(rows)
}
