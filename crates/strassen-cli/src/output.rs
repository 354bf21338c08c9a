//! Output formatting helpers.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use strassen_core::Matrix;

/// Rows and columns shown by [`format_matrix`] outside verbose mode.
pub const PREVIEW_LIMIT: usize = 8;

/// Human-readable duration.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Seconds with six decimals, as printed on benchmark lines.
#[must_use]
pub fn format_seconds(d: Duration) -> String {
    format!("{:.6} s", d.as_secs_f64())
}

/// Integer with thousand separators.
#[must_use]
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Render a matrix. Large matrices are cut to a
/// `PREVIEW_LIMIT x PREVIEW_LIMIT` corner unless `verbose` is set.
#[must_use]
pub fn format_matrix(m: &Matrix, verbose: bool) -> String {
    let n = m.size();
    if verbose || n <= PREVIEW_LIMIT {
        return m.to_string();
    }

    let shown = PREVIEW_LIMIT;
    let width = (0..shown)
        .flat_map(|i| m.row(i)[..shown].iter())
        .map(|v| v.to_string().len())
        .max()
        .unwrap_or(1);
    let mut out = String::new();
    for i in 0..shown {
        let cells: Vec<String> = m.row(i)[..shown]
            .iter()
            .map(|v| format!("{v:>width$}"))
            .collect();
        out.push_str(&cells.join(" "));
        out.push_str(" ...\n");
    }
    out.push_str(&format!("... ({n}x{n}, showing {shown}x{shown})"));
    out
}

/// Write `m` as a JSON list of rows.
pub fn write_matrix_json(path: &Path, m: &Matrix) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut out, m)?;
    writeln!(out)?;
    out.flush()
}
