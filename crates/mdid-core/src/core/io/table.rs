use crate::core::models::records::{SegmentRecord, WindowRecord};
use crate::core::secondary::LabelTable;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableWriteError {
    #[error("Failed to create '{path}': {source}", path = path.display())]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn write_rows<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<(), TableWriteError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn create(path: &Path) -> Result<File, TableWriteError> {
    File::create(path).map_err(|source| TableWriteError::Create {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes window records with the columns
/// `start,end,entire simulation,last simulation,instantaneous`.
pub fn write_windows<W: Write>(writer: W, records: &[WindowRecord]) -> Result<(), TableWriteError> {
    write_rows(writer, records)
}

/// Writes segment records with the columns
/// `start,end,sec str type,window,entire simulation,last simulation,instantaneous`.
pub fn write_segments<W: Write>(
    writer: W,
    records: &[SegmentRecord],
) -> Result<(), TableWriteError> {
    write_rows(writer, records)
}

/// Writes the per-residue label table with the columns `resid index,resname,sec str type`.
pub fn write_labels<W: Write>(writer: W, table: &LabelTable) -> Result<(), TableWriteError> {
    write_rows(writer, table.rows())
}

pub fn save_windows(path: &Path, records: &[WindowRecord]) -> Result<(), TableWriteError> {
    write_windows(create(path)?, records)
}

pub fn save_segments(path: &Path, records: &[SegmentRecord]) -> Result<(), TableWriteError> {
    write_segments(create(path)?, records)
}

pub fn save_labels(path: &Path, table: &LabelTable) -> Result<(), TableWriteError> {
    write_labels(create(path)?, table)
}
