//! CSV benchmark reports.
//!
//! One header line followed by one line per [`BenchRecord`]. Seconds carry
//! nine decimals; fields that do not apply to a strategy are left empty.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use strassen_core::Element;

use crate::error::BenchError;
use crate::record::BenchRecord;

/// Column names, in order.
pub const CSV_HEADER: [&str; 10] = [
    "n",
    "algorithm",
    "repetition",
    "total_seconds",
    "strassen_calls",
    "strassen_structural_seconds",
    "seed_base",
    "val_min",
    "val_max",
    "cutoff",
];

/// Destination for benchmark records.
pub trait RecordSink {
    /// Consume one record.
    fn record(&mut self, record: &BenchRecord) -> Result<(), BenchError>;

    /// Called once after the last record.
    fn finish(&mut self) -> Result<(), BenchError> {
        Ok(())
    }
}

impl RecordSink for Vec<BenchRecord> {
    fn record(&mut self, record: &BenchRecord) -> Result<(), BenchError> {
        self.push(record.clone());
        Ok(())
    }
}

/// Writes records as CSV lines.
pub struct CsvReportWriter<W: Write> {
    out: W,
}

impl<W: Write> CsvReportWriter<W> {
    /// Wrap `out` and write the header line.
    pub fn new(mut out: W) -> Result<Self, BenchError> {
        writeln!(out, "{}", CSV_HEADER.join(","))?;
        Ok(Self { out })
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordSink for CsvReportWriter<W> {
    fn record(&mut self, r: &BenchRecord) -> Result<(), BenchError> {
        let calls = r.calls.map(|c| c.to_string()).unwrap_or_default();
        let structural = r
            .structural_time
            .map(|d| format!("{:.9}", d.as_secs_f64()))
            .unwrap_or_default();
        writeln!(
            self.out,
            "{},{},{},{:.9},{},{},{},{},{},{}",
            r.n,
            r.algorithm,
            r.repetition,
            r.elapsed.as_secs_f64(),
            calls,
            structural,
            r.seed_base,
            r.val_min,
            r.val_max,
            r.cutoff,
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), BenchError> {
        self.out.flush()?;
        Ok(())
    }
}

/// Create (or truncate) a report file at `path`.
pub fn create_report(path: &Path) -> Result<CsvReportWriter<BufWriter<File>>, BenchError> {
    let file = File::create(path)?;
    CsvReportWriter::new(BufWriter::new(file))
}

/// A parsed report line.
///
/// Optional fields are `None` when the cell is empty or the column is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Matrix size.
    pub n: usize,
    /// Strategy name.
    pub algorithm: String,
    /// 1-based repetition index.
    pub repetition: u32,
    /// Wall-clock seconds of the multiplication.
    pub total_seconds: Option<f64>,
    /// Recursive Strassen calls.
    pub calls: Option<u64>,
    /// Seconds of structural overhead.
    pub structural_seconds: Option<f64>,
    /// Base seed of the run.
    pub seed_base: Option<u64>,
    /// Lower bound of the operand values.
    pub val_min: Option<Element>,
    /// Upper bound of the operand values.
    pub val_max: Option<Element>,
    /// Strassen cutoff of the run.
    pub cutoff: Option<usize>,
}

impl From<&BenchRecord> for ReportRow {
    fn from(r: &BenchRecord) -> Self {
        Self {
            n: r.n,
            algorithm: r.algorithm.clone(),
            repetition: r.repetition,
            total_seconds: Some(r.elapsed.as_secs_f64()),
            calls: r.calls,
            structural_seconds: r.structural_time.map(|d| d.as_secs_f64()),
            seed_base: Some(r.seed_base),
            val_min: Some(r.val_min),
            val_max: Some(r.val_max),
            cutoff: Some(r.cutoff),
        }
    }
}

/// Column positions resolved from a header line.
struct Columns {
    width: usize,
    index: [Option<usize>; CSV_HEADER.len()],
}

impl Columns {
    const REQUIRED: [usize; 6] = [0, 1, 2, 3, 4, 5];

    fn from_header(header: &str) -> Result<Self, BenchError> {
        let names: Vec<&str> = header.split(',').map(str::trim).collect();
        let mut index = [None; CSV_HEADER.len()];
        for (slot, column) in index.iter_mut().zip(CSV_HEADER) {
            *slot = names.iter().position(|&name| name == column);
        }
        if let Some(&missing) = Self::REQUIRED.iter().find(|&&c| index[c].is_none()) {
            return Err(BenchError::Report {
                line: 1,
                reason: format!("missing column `{}`", CSV_HEADER[missing]),
            });
        }
        Ok(Self {
            width: names.len(),
            index,
        })
    }

    fn field<'a>(&self, fields: &[&'a str], column: usize) -> &'a str {
        self.index[column].map_or("", |i| fields[i].trim())
    }
}

fn parse_required<T: std::str::FromStr>(value: &str, column: &str, line: usize) -> Result<T, BenchError> {
    value.parse().map_err(|_| BenchError::Report {
        line,
        reason: format!("invalid {column} `{value}`"),
    })
}

fn parse_optional<T: std::str::FromStr>(
    value: &str,
    column: &str,
    line: usize,
) -> Result<Option<T>, BenchError> {
    if value.is_empty() {
        Ok(None)
    } else {
        parse_required(value, column, line).map(Some)
    }
}

/// Parse a report. Blank lines are skipped; columns are matched by name.
pub fn read_report<R: BufRead>(reader: R) -> Result<Vec<ReportRow>, BenchError> {
    let mut lines = reader.lines();
    let header = match lines.next() {
        Some(line) => line?,
        None => {
            return Err(BenchError::Report {
                line: 1,
                reason: "report is empty".into(),
            })
        }
    };
    let columns = Columns::from_header(&header)?;

    let mut rows = Vec::new();
    for (i, line) in lines.enumerate() {
        let line_no = i + 2;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != columns.width {
            return Err(BenchError::Report {
                line: line_no,
                reason: format!("expected {} fields, found {}", columns.width, fields.len()),
            });
        }
        let f = |c: usize| columns.field(&fields, c);
        rows.push(ReportRow {
            n: parse_required(f(0), CSV_HEADER[0], line_no)?,
            algorithm: f(1).to_string(),
            repetition: parse_required(f(2), CSV_HEADER[2], line_no)?,
            total_seconds: parse_optional(f(3), CSV_HEADER[3], line_no)?,
            calls: parse_optional(f(4), CSV_HEADER[4], line_no)?,
            structural_seconds: parse_optional(f(5), CSV_HEADER[5], line_no)?,
            seed_base: parse_optional(f(6), CSV_HEADER[6], line_no)?,
            val_min: parse_optional(f(7), CSV_HEADER[7], line_no)?,
            val_max: parse_optional(f(8), CSV_HEADER[8], line_no)?,
            cutoff: parse_optional(f(9), CSV_HEADER[9], line_no)?,
        });
    }
    Ok(rows)
}

/// Read a report file from disk.
pub fn load_report(path: &Path) -> Result<Vec<ReportRow>, BenchError> {
    let file = File::open(path)?;
    read_report(BufReader::new(file))
}
