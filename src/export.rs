//! Tabular export of decoded containers.
//!
//! One row is produced per decoded record, in page order. The column layout
//! matches what the Replay timeline tool ingests:
//!
//! | Column | Source |
//! |--------|--------|
//! | `Start`, `End` | last-access seconds, truncated |
//! | `Start_HR`, `End_HR` | human-readable last access |
//! | `timelapse` | always `0` |
//! | `str_value`, `value` | cookie name and value |
//! | `Path`, `URL` | cookie path and domain |
//! | `Expires` | human-readable expiry |
//! | `Flag` | resolved flag text |

use serde::Serialize;
use std::borrow::Cow;
use std::io::Write;

use crate::container::Container;
use crate::record::CookieRecord;
use crate::Result;

/// Column names, in output order.
pub const COLUMNS: [&str; 11] = [
    "Start",
    "End",
    "Start_HR",
    "End_HR",
    "timelapse",
    "str_value",
    "value",
    "Path",
    "URL",
    "Expires",
    "Flag",
];

/// Output format for the exported table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// Parse an export format from a string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }

    /// Write `container` in this format, returning the number of rows.
    pub fn write<W: Write>(&self, writer: W, container: &Container) -> Result<usize> {
        match self {
            ExportFormat::Csv => write_csv(writer, container),
            ExportFormat::Json => write_json(writer, container),
        }
    }
}

/// One exported row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Start")]
    pub start: i64,
    #[serde(rename = "End")]
    pub end: i64,
    #[serde(rename = "Start_HR")]
    pub start_hr: String,
    #[serde(rename = "End_HR")]
    pub end_hr: String,
    pub timelapse: u32,
    pub str_value: String,
    pub value: String,
    #[serde(rename = "Path")]
    pub path: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Expires")]
    pub expires: String,
    #[serde(rename = "Flag")]
    pub flag: String,
}

impl ExportRow {
    pub fn from_record(record: &CookieRecord) -> Self {
        // Saturating float-to-int cast; NaN becomes 0.
        let last_access = record.last_access.seconds() as i64;
        Self {
            start: last_access,
            end: last_access,
            start_hr: record.last_access_hr.clone(),
            end_hr: record.last_access_hr.clone(),
            timelapse: 0,
            str_value: record.name.clone(),
            value: record.value.clone(),
            path: record.path.clone(),
            url: record.url.clone(),
            expires: record.expires_hr.clone(),
            flag: record.flag.to_string(),
        }
    }

    fn cells(&self) -> [Cow<'_, str>; 11] {
        [
            Cow::Owned(self.start.to_string()),
            Cow::Owned(self.end.to_string()),
            Cow::Borrowed(&self.start_hr),
            Cow::Borrowed(&self.end_hr),
            Cow::Owned(self.timelapse.to_string()),
            Cow::Borrowed(&self.str_value),
            Cow::Borrowed(&self.value),
            Cow::Borrowed(&self.path),
            Cow::Borrowed(&self.url),
            Cow::Borrowed(&self.expires),
            Cow::Borrowed(&self.flag),
        ]
    }
}

/// Build all rows for a container.
pub fn rows(container: &Container) -> Vec<ExportRow> {
    container.records().map(ExportRow::from_record).collect()
}

/// Write the table as CSV.
///
/// The first column is an unnamed zero-based row index.
pub fn write_csv<W: Write>(mut writer: W, container: &Container) -> Result<usize> {
    for column in COLUMNS {
        write!(writer, ",{}", column)?;
    }
    writeln!(writer)?;

    let mut count = 0;
    for (index, record) in container.records().enumerate() {
        let row = ExportRow::from_record(record);
        write!(writer, "{}", index)?;
        for cell in row.cells() {
            write!(writer, ",{}", csv_escape(&cell))?;
        }
        writeln!(writer)?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

/// Write the table as a pretty-printed JSON array of objects.
pub fn write_json<W: Write>(mut writer: W, container: &Container) -> Result<usize> {
    let rows = rows(container);
    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(rows.len())
}

/// Quote a CSV cell when it contains a delimiter, quote or line break.
fn csv_escape(cell: &str) -> Cow<'_, str> {
    if cell.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", cell.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(cell)
    }
}
