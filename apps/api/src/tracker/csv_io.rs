//! CSV import and export of the job table.
//!
//! Import is all-or-nothing: the whole file is parsed into a fresh `TableStore` and the
//! caller swaps it in only on success. Export is deterministic for a given table.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tracing::{debug, info, warn};

use crate::models::job::{ApplicationStatus, ChecklistFlags, JobRecord};
use crate::tracker::error::TrackerError;
use crate::tracker::schema::{self, CHECKLIST_COLUMNS, REQUIRED_HEADERS};
use crate::tracker::table::TableStore;

const TRUE_TOKEN: &str = "True";
const FALSE_TOKEN: &str = "False";

/// Column positions of one uploaded file, resolved once from its header line.
struct ColumnMap {
    /// Index of each `REQUIRED_HEADERS` entry in the file.
    required: [usize; 14],
    /// Indices of every other column, in file order.
    extra: Vec<usize>,
}

impl ColumnMap {
    fn resolve(headers: &StringRecord) -> Result<Self, TrackerError> {
        let names: Vec<&str> = headers.iter().collect();
        let missing = schema::missing_headers(names.iter().copied());
        if !missing.is_empty() {
            return Err(TrackerError::MissingHeaders { missing });
        }

        let mut required = [0usize; 14];
        for (slot, name) in required.iter_mut().zip(REQUIRED_HEADERS) {
            // First occurrence wins; a repeated Schema name is kept as an extra column.
            *slot = headers.iter().position(|h| h == name).unwrap_or_default();
        }
        let taken: HashSet<usize> = required.iter().copied().collect();
        let extra = (0..headers.len()).filter(|i| !taken.contains(i)).collect();

        Ok(Self { required, extra })
    }

    fn cell<'r>(&self, row: &'r StringRecord, column: usize) -> &'r str {
        row.get(self.required[column]).unwrap_or("")
    }
}

/// Parses an uploaded CSV file into a new job table.
///
/// Fails with `MissingHeaders` listing every absent Schema column before any row is read.
pub fn import_csv(bytes: &[u8]) -> Result<TableStore, TrackerError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(bytes);
    let headers = reader.headers()?.clone();

    let columns = match ColumnMap::resolve(&headers) {
        Ok(columns) => columns,
        Err(e) => {
            warn!("Import rejected: {e}");
            return Err(e);
        }
    };
    let extra_columns: Vec<String> = columns
        .extra
        .iter()
        .map(|&i| headers[i].to_string())
        .collect();
    if !extra_columns.is_empty() {
        debug!("Keeping {} extra column(s): {:?}", extra_columns.len(), extra_columns);
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        records.push(parse_row(&row, line, &columns)?);
    }

    let table = TableStore::from_parts(records, extra_columns)?;
    info!("Imported {} job application(s)", table.len());
    Ok(table)
}

fn parse_row(
    row: &StringRecord,
    line: u64,
    columns: &ColumnMap,
) -> Result<JobRecord, TrackerError> {
    let status_cell = columns.cell(row, 3);
    let application_status =
        status_cell
            .parse::<ApplicationStatus>()
            .map_err(|_| TrackerError::InvalidField {
                line,
                column: schema::APPLICATION_STATUS,
                value: status_cell.to_string(),
            })?;

    let date_cell = columns.cell(row, 4);
    let date_of_application = parse_date(date_cell).ok_or_else(|| TrackerError::InvalidField {
        line,
        column: schema::DATE_OF_APPLICATION,
        value: date_cell.to_string(),
    })?;

    let mut flags = [false; 9];
    for (i, (flag, column)) in flags.iter_mut().zip(CHECKLIST_COLUMNS).enumerate() {
        let cell = columns.cell(row, 5 + i);
        *flag = parse_bool(cell).ok_or_else(|| TrackerError::InvalidField {
            line,
            column,
            value: cell.to_string(),
        })?;
    }

    Ok(JobRecord {
        id: columns.cell(row, 0).to_string(),
        job_title: columns.cell(row, 1).to_string(),
        company_name: columns.cell(row, 2).to_string(),
        application_status,
        date_of_application,
        checklist: ChecklistFlags::from_array(flags),
        extra: columns
            .extra
            .iter()
            .map(|&i| row.get(i).unwrap_or("").to_string())
            .collect(),
    })
}

fn parse_date(cell: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(cell, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(cell, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .ok()
}

fn parse_bool(cell: &str) -> Option<bool> {
    match cell.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" | "" => Some(false),
        _ => None,
    }
}

fn format_bool(value: bool) -> &'static str {
    if value {
        TRUE_TOKEN
    } else {
        FALSE_TOKEN
    }
}

/// Serializes the table: Schema columns first, then any extra columns, one line per record.
pub fn export_csv(table: &TableStore) -> Result<Vec<u8>, TrackerError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    let mut header: Vec<&str> = REQUIRED_HEADERS.to_vec();
    header.extend(table.extra_columns().iter().map(String::as_str));
    writer.write_record(&header)?;

    for record in table.records() {
        let date = record.date_of_application.format("%Y-%m-%d").to_string();
        let mut row: Vec<&str> = vec![
            record.id.as_str(),
            record.job_title.as_str(),
            record.company_name.as_str(),
            record.application_status.as_str(),
            date.as_str(),
        ];
        row.extend(record.checklist.to_array().into_iter().map(|flag| format_bool(flag)));
        row.extend(record.extra.iter().map(String::as_str));
        writer.write_record(&row)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    debug!("Exported {} row(s), {} bytes", table.len(), bytes.len());
    Ok(bytes)
}
