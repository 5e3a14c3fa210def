//! Reading and writing the roster file.
//!
//! The roster is a single-sheet workbook (`.xlsx`) by default; a path ending
//! in `.csv` is stored as comma-separated text instead. Every cell is text,
//! dates included, and cells are trimmed on load.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;

use calamine::{Data, Reader, Xlsx};
use chrono::NaiveTime;
use rust_xlsxwriter::Workbook;

use crate::error::{AppError, Result, RosterFileError};
use crate::models::{BusRecord, BusStatus, COLUMNS};

/// How the roster file was obtained on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// An existing file was read.
    Existing,
    /// No file was present; an empty one with the header was created.
    Created,
}

/// On-disk layout, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterFormat {
    Xlsx,
    Csv,
}

impl RosterFormat {
    /// `.csv` (any case) selects CSV; anything else is a workbook.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Xlsx,
        }
    }
}

/// Load every record from `path`, in file order.
///
/// A missing file is replaced by an empty roster holding only the header.
pub fn load_roster(path: &Path) -> Result<(Vec<BusRecord>, LoadSource)> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!("Roster file {:?} not found, creating empty roster", path);
            save_roster(path, &[])?;
            return Ok((Vec::new(), LoadSource::Created));
        }
        Err(e) => return Err(load_error(path, e)),
    };

    let records = match RosterFormat::from_path(path) {
        RosterFormat::Csv => read_csv(path, file)?,
        RosterFormat::Xlsx => read_xlsx(path, file)?,
    };

    tracing::debug!("Read {} rows from {:?}", records.len(), path);
    Ok((records, LoadSource::Existing))
}

/// Overwrite `path` with the header followed by `records`.
pub fn save_roster(path: &Path, records: &[BusRecord]) -> Result<()> {
    write_roster(path, records).map_err(|source| AppError::Save {
        path: path.to_path_buf(),
        source,
    })
}

fn load_error(path: &Path, source: impl Into<RosterFileError>) -> AppError {
    AppError::Load {
        path: path.to_path_buf(),
        source: source.into(),
    }
}

fn read_csv(path: &Path, file: File) -> Result<Vec<BusRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(false)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut records = Vec::new();
    for result in reader.deserialize::<BusRecord>() {
        match result {
            Ok(record) => records.push(record),
            Err(e) if e.is_io_error() => return Err(load_error(path, e)),
            Err(e) => return Err(AppError::parse(format!("{}: {e}", path.display()))),
        }
    }
    Ok(records)
}

fn read_xlsx(path: &Path, file: File) -> Result<Vec<BusRecord>> {
    let mut workbook: Xlsx<_> = Xlsx::new(BufReader::new(file)).map_err(|e| load_error(path, e))?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| load_error(path, e))?,
        None => {
            return Err(AppError::parse(format!("{}: workbook has no worksheets", path.display())));
        }
    };

    let first_row = range.start().map_or(0, |(row, _)| row as usize);
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    let header: Vec<String> = header.iter().map(cell_text).collect();

    let mut positions = [0usize; COLUMNS.len()];
    for (position, name) in positions.iter_mut().zip(COLUMNS) {
        *position = header.iter().position(|h| h == name).ok_or_else(|| {
            AppError::parse(format!("{}: missing column {name:?}", path.display()))
        })?;
    }

    let mut records = Vec::new();
    for (offset, row) in rows.enumerate() {
        // 1-based sheet row, counting the header
        let line = first_row + offset + 2;
        let cells: Vec<String> = row.iter().map(cell_text).collect();
        if cells.iter().all(String::is_empty) {
            continue;
        }
        if cells
            .iter()
            .enumerate()
            .any(|(col, cell)| !cell.is_empty() && header.get(col).is_none_or(String::is_empty))
        {
            return Err(AppError::parse(format!(
                "{}: row {line} has a value outside the header columns",
                path.display()
            )));
        }

        let field = |col: usize| cells.get(positions[col]).cloned().unwrap_or_default();
        let status_text = field(5);
        let Some(status) = BusStatus::from_label(&status_text) else {
            return Err(AppError::parse(format!(
                "{}: row {line}: unknown status {status_text:?}",
                path.display()
            )));
        };

        records.push(BusRecord::new(field(0), field(1), field(2), field(3), field(4), status));
    }
    Ok(records)
}

/// Text of one workbook cell. Native numbers and dates written by other
/// tools are rendered the way they display, so they still read as Bus IDs
/// and dates.
fn cell_text(cell: &Data) -> String {
    let text = match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => (*f as i64).to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(dt) if dt.time() == NaiveTime::MIN => dt.format("%Y-%m-%d").to_string(),
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        },
        other => other.to_string(),
    };
    text.trim().to_string()
}

fn write_roster(path: &Path, records: &[BusRecord]) -> std::result::Result<(), RosterFileError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    match RosterFormat::from_path(path) {
        RosterFormat::Csv => write_csv(path, records),
        RosterFormat::Xlsx => write_xlsx(path, records),
    }
}

fn write_csv(path: &Path, records: &[BusRecord]) -> std::result::Result<(), RosterFileError> {
    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

    writer.write_record(COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }

    let mut file = writer.into_inner().map_err(|e| e.into_error())?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}

fn write_xlsx(path: &Path, records: &[BusRecord]) -> std::result::Result<(), RosterFileError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    // Dates stay text so free-form values survive unchanged
    for (idx, record) in records.iter().enumerate() {
        let row = (idx + 1) as u32;
        for (col, cell) in record.cells().into_iter().enumerate() {
            worksheet.write_string(row, col as u16, cell)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}
