//! Excel export functionality.

use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{BusRecord, COLUMNS};

/// Column widths matching [`COLUMNS`].
const COLUMN_WIDTHS: [f64; 6] = [12.0, 20.0, 22.0, 18.0, 18.0, 20.0];

/// Export bus records to an Excel file with one sheet named `sheet_name`.
pub fn export_roster_to_excel(records: &[BusRecord], sheet_name: &str, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name(sheet_name)?;

    // Header format
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin);

    for (col, header) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        worksheet.set_column_width(col as u16, COLUMN_WIDTHS[col])?;
    }

    // Data rows; dates stay text so free-form values survive unchanged
    for (idx, record) in records.iter().enumerate() {
        let row = (idx + 1) as u32;
        for (col, cell) in record.cells().into_iter().enumerate() {
            worksheet.write_string(row, col as u16, cell)?;
        }
    }

    // Autofilter
    if !records.is_empty() {
        let last_row = records.len() as u32;
        worksheet.autofilter(0, 0, last_row, (COLUMNS.len() - 1) as u16)?;
    }

    // Freeze top row
    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;
    tracing::info!("Exported {} buses to {:?}", records.len(), path);
    Ok(())
}

/// Open save file dialog and return selected path.
pub fn show_save_dialog(default_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_file_name(default_name)
        .add_filter("Excel Files", &["xlsx"])
        .save_file()
}

/// Generate default filename for export.
pub fn generate_export_filename(prefix: &str) -> String {
    let now = Local::now();
    format!("{prefix}_{ts}.xlsx", ts = now.format("%Y%m%d_%H%M%S"))
}
