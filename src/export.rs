//! Tabular export and import of month records.
//!
//! An export is one row per employee. Identity, total and overtime columns
//! (names beginning `Employee`, `Total` or `OT`) come first, then every other
//! column in lexicographic order. Rows that lack a column hold `null` in it.
//!
//! A table is served as JSON or written to an Excel workbook.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet, XlsxError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeMonthRecord, RecordRow};

const SUMMARY_PREFIXES: [&str; 3] = ["Employee", "Total", "OT"];

/// Name of the worksheet in exported workbooks.
pub const XLSX_SHEET_NAME: &str = "Attendance";

/// File name offered for the workbook download.
pub const XLSX_FILE_NAME: &str = "attendance_upto_now.xlsx";

/// MIME type of an `.xlsx` workbook.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Returns true for identity, total and overtime columns.
pub fn is_summary_column(column: &str) -> bool {
    SUMMARY_PREFIXES
        .iter()
        .any(|prefix| column.starts_with(prefix))
}

/// Orders two column names for display and export.
pub fn column_order(a: &str, b: &str) -> Ordering {
    is_summary_column(b)
        .cmp(&is_summary_column(a))
        .then_with(|| a.cmp(b))
}

/// Returns the columns of a row in export order.
///
/// # Example
///
/// ```
/// use attendance_engine::export::sorted_columns;
/// use attendance_engine::models::{Employee, EmployeeMonthRecord};
///
/// let row = EmployeeMonthRecord::new(Employee::new("E001", "Asha")).to_row();
/// let columns = sorted_columns(&row);
/// assert_eq!(columns[0], "Employee Code");
/// assert_eq!(columns.last().unwrap(), "Total WO");
/// ```
pub fn sorted_columns(row: &RecordRow) -> Vec<String> {
    let mut columns: Vec<String> = row.keys().cloned().collect();
    columns.sort_by(|a, b| column_order(a, b));
    columns
}

/// A table of exported records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportTable {
    /// Column names in export order.
    pub columns: Vec<String>,
    /// One row per record, with cells aligned to `columns`.
    pub rows: Vec<Vec<Value>>,
}

impl ExportTable {
    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Builds an export table from records in the given order.
pub fn export_records(records: &[EmployeeMonthRecord]) -> ExportTable {
    let rows: Vec<RecordRow> = records.iter().map(EmployeeMonthRecord::to_row).collect();

    let mut columns: Vec<String> = rows
        .iter()
        .flat_map(|row| row.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    columns.sort_by(|a, b| column_order(a, b));

    let rows = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| row.get(column).cloned().unwrap_or(Value::Null))
                .collect()
        })
        .collect();

    ExportTable { columns, rows }
}

/// Writes an export table to an in-memory `.xlsx` workbook.
///
/// The header row holds `table.columns` in order. Text cells are written as
/// strings, numbers as numbers and flags as booleans; null cells stay
/// empty.
///
/// # Errors
///
/// Returns [`EngineError::ExportError`] if the workbook cannot be built,
/// for instance when the table is wider than a worksheet.
pub fn export_table_to_xlsx(table: &ExportTable) -> EngineResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    write_sheet(worksheet, table).map_err(export_error)?;
    workbook.save_to_buffer().map_err(export_error)
}

/// Builds the export table for `records` and writes it as a workbook.
///
/// # Errors
///
/// Fails as [`export_table_to_xlsx`] does.
pub fn export_records_to_xlsx(records: &[EmployeeMonthRecord]) -> EngineResult<Vec<u8>> {
    export_table_to_xlsx(&export_records(records))
}

fn write_sheet(worksheet: &mut Worksheet, table: &ExportTable) -> Result<(), XlsxError> {
    worksheet.set_name(XLSX_SHEET_NAME)?;

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin);

    for (col, column) in table.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, sheet_col(col)?, column, &header_format)?;
    }

    for (idx, cells) in table.rows.iter().enumerate() {
        let row = sheet_row(idx + 1)?;
        for (col, cell) in cells.iter().enumerate() {
            let col = sheet_col(col)?;
            match cell {
                Value::Null => {}
                Value::Bool(flag) => {
                    worksheet.write_boolean(row, col, *flag)?;
                }
                Value::Number(number) => match number.as_f64() {
                    Some(value) => {
                        worksheet.write_number(row, col, value)?;
                    }
                    None => {
                        worksheet.write_string(row, col, number.to_string())?;
                    }
                },
                Value::String(text) => {
                    worksheet.write_string(row, col, text)?;
                }
                other => {
                    worksheet.write_string(row, col, other.to_string())?;
                }
            }
        }
    }

    if !table.columns.is_empty() {
        worksheet.set_freeze_panes(1, 0)?;
        if !table.rows.is_empty() {
            let last_col = sheet_col(table.columns.len() - 1)?;
            worksheet.autofilter(0, 0, sheet_row(table.rows.len())?, last_col)?;
        }
    }

    Ok(())
}

fn sheet_row(index: usize) -> Result<u32, XlsxError> {
    u32::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

fn sheet_col(index: usize) -> Result<u16, XlsxError> {
    u16::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

fn export_error(err: XlsxError) -> EngineError {
    EngineError::ExportError {
        message: err.to_string(),
    }
}

/// Parses an export table back into records.
///
/// Null cells are treated as absent columns.
///
/// # Errors
///
/// Returns [`EngineError::InvalidRecord`] if a row's length does not match
/// the header or a row is not a valid record.
pub fn import_records(table: &ExportTable) -> EngineResult<Vec<EmployeeMonthRecord>> {
    table
        .rows
        .iter()
        .enumerate()
        .map(|(index, cells)| {
            if cells.len() != table.columns.len() {
                return Err(EngineError::InvalidRecord {
                    field: format!("row {}", index),
                    message: format!(
                        "expected {} cells, found {}",
                        table.columns.len(),
                        cells.len()
                    ),
                });
            }

            let row: RecordRow = table
                .columns
                .iter()
                .zip(cells)
                .filter(|(_, cell)| !cell.is_null())
                .map(|(column, cell)| (column.clone(), cell.clone()))
                .collect();

            EmployeeMonthRecord::from_row(&row)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{compose_day, recompute_month};
    use crate::config::AttendancePolicy;
    use crate::models::{AttendanceStatus, DayEntry, Employee, Period};

    fn entered_record(code: &str, days: u32) -> EmployeeMonthRecord {
        let policy = AttendancePolicy::default();
        let mut record = EmployeeMonthRecord::new(Employee::new(code, "Worker"));
        for day in 1..=days {
            let entry = match day % 4 {
                0 => DayEntry::status_only(AttendanceStatus::WeekOff),
                1 => DayEntry::present("09:00", "17:45"),
                2 => DayEntry::present("22:00", "06:40"),
                _ => DayEntry::status_only(AttendanceStatus::HalfLeave),
            };
            record
                .days
                .insert(day, compose_day(day, &entry, &policy).record);
        }
        recompute_month(&mut record, Period::new(2024, 1).unwrap());
        record
    }

    #[test]
    fn test_summary_columns() {
        assert!(is_summary_column("Employee Code"));
        assert!(is_summary_column("Total HL"));
        assert!(is_summary_column("OT Hours"));
        assert!(!is_summary_column("01_OT"));
        assert!(!is_summary_column("01_Status"));
    }

    #[test]
    fn test_column_order() {
        let table = export_records(&[entered_record("E001", 2)]);

        assert_eq!(
            &table.columns[..9],
            &[
                "Employee Code",
                "Employee Name",
                "OT Hours",
                "Total A",
                "Total HL",
                "Total L",
                "Total P",
                "Total PH",
                "Total WO",
            ]
        );
        assert_eq!(table.columns[9], "01_Check-in");
        assert_eq!(table.columns.last().unwrap(), "02_Status");
    }

    #[test]
    fn test_rows_align_with_columns() {
        let table = export_records(&[entered_record("E001", 31), entered_record("E002", 3)]);

        assert_eq!(table.len(), 2);
        assert!(table.rows.iter().all(|row| row.len() == table.columns.len()));

        let status_31 = table
            .columns
            .iter()
            .position(|c| c == "31_Status")
            .unwrap();
        assert_eq!(table.rows[0][status_31], Value::from("HL"));
        assert_eq!(table.rows[1][status_31], Value::Null);
    }

    #[test]
    fn test_round_trip_preserves_records() {
        let records = vec![entered_record("E001", 31), entered_record("E002", 7)];
        let table = export_records(&records);

        let json = serde_json::to_string(&table).unwrap();
        let parsed: ExportTable = serde_json::from_str(&json).unwrap();

        assert_eq!(import_records(&parsed).unwrap(), records);
    }

    #[test]
    fn test_import_rejects_ragged_rows() {
        let mut table = export_records(&[entered_record("E001", 1)]);
        table.rows[0].pop();
        assert!(matches!(
            import_records(&table),
            Err(EngineError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_xlsx_header_follows_sorted_columns() {
        let record = entered_record("E001", 3);
        let table = export_records(std::slice::from_ref(&record));
        assert_eq!(table.columns, sorted_columns(&record.to_row()));

        let bytes = export_table_to_xlsx(&table).unwrap();
        // xlsx files are zip archives.
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_xlsx_of_records_and_empty_table() {
        let records = vec![entered_record("E001", 31), entered_record("E002", 2)];
        assert!(export_records_to_xlsx(&records).unwrap().starts_with(b"PK"));
        assert!(export_table_to_xlsx(&ExportTable::default()).unwrap().starts_with(b"PK"));
    }

    #[test]
    fn test_xlsx_rejects_table_wider_than_sheet() {
        let table = ExportTable {
            columns: (0..20_000).map(|i| format!("{:05}_Status", i)).collect(),
            rows: Vec::new(),
        };
        assert!(matches!(
            export_table_to_xlsx(&table),
            Err(EngineError::ExportError { .. })
        ));
    }

    #[test]
    fn test_empty_export() {
        let table = export_records(&[]);
        assert!(table.is_empty());
        assert!(table.columns.is_empty());
    }
}
