use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::error::{Error, Result};
use crate::similarity::SimilarityMatrix;

/// Header of the label column in the output file.
pub const LABEL_HEADER: &str = "Team";
/// Decimals used for everything printed to the console.
pub const CONSOLE_PRECISION: usize = 4;

const COL_LABEL_WIDTH: usize = 15;
const ROW_LABEL_WIDTH: usize = 20;
const RULE_WIDTH: usize = 80;

// ---------------------------------------------------------------------------
// Output file
// ---------------------------------------------------------------------------

/// Write the labelled matrix as CSV, replacing any existing file.
pub fn write_matrix(
    path: &Path,
    labels: &[String],
    matrix: &SimilarityMatrix,
    precision: usize,
) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    write_matrix_to(BufWriter::new(file), labels, matrix, precision)
        .map_err(|e| Error::io(path, e))?;
    info!("wrote {}x{} matrix to {}", labels.len(), labels.len(), path.display());
    Ok(())
}

/// Serialize the matrix as CSV into any writer.
pub fn write_matrix_to<W: Write>(
    out: W,
    labels: &[String],
    matrix: &SimilarityMatrix,
    precision: usize,
) -> io::Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    let header = std::iter::once(LABEL_HEADER).chain(labels.iter().map(String::as_str));
    writer.write_record(header)?;

    for (i, label) in labels.iter().enumerate() {
        let cells = matrix.row(i).iter().map(|v| format!("{v:.precision$}"));
        writer.write_record(std::iter::once(label.clone()).chain(cells))?;
    }
    writer.flush()
}

// ---------------------------------------------------------------------------
// Console summary
// ---------------------------------------------------------------------------

/// What the console report should contain.
#[derive(Debug, Clone)]
pub struct SummaryOptions<'a> {
    pub output_path: &'a Path,
    pub preview_size: usize,
    pub print_full: bool,
}

/// Print the run summary: header, preview (or full matrix) and statistics.
pub fn print_summary<W: Write>(
    out: &mut W,
    labels: &[String],
    matrix: &SimilarityMatrix,
    opts: &SummaryOptions<'_>,
) -> io::Result<()> {
    let n = matrix.size();
    writeln!(out, "Computed {n}x{n} similarity matrix")?;
    writeln!(out, "Output saved to: {}", opts.output_path.display())?;

    if opts.print_full {
        writeln!(out)?;
        writeln!(out, "Cosine Similarity Matrix ({n}x{n}):")?;
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
        print_table(out, labels, matrix, n)?;
    } else {
        let shown = opts.preview_size.min(n);
        writeln!(out)?;
        writeln!(out, "Matrix preview (first {shown}x{shown}):")?;
        print_table(out, labels, matrix, shown)?;
    }

    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "Statistics:")?;
    writeln!(out, "Number of teams: {n}")?;
    writeln!(out, "Matrix shape: ({n}, {n})")?;
    match matrix.stats() {
        Some(s) => {
            let p = CONSOLE_PRECISION;
            writeln!(out, "Min similarity: {:.p$}", s.min)?;
            writeln!(out, "Max similarity: {:.p$}", s.max)?;
            writeln!(out, "Mean similarity: {:.p$}", s.mean)?;
        }
        None => {
            writeln!(out, "Min similarity: n/a")?;
            writeln!(out, "Max similarity: n/a")?;
            writeln!(out, "Mean similarity: n/a")?;
        }
    }
    Ok(())
}

/// Tab separated table of the top-left `size x size` block.
fn print_table<W: Write>(
    out: &mut W,
    labels: &[String],
    matrix: &SimilarityMatrix,
    size: usize,
) -> io::Result<()> {
    write!(out, "{LABEL_HEADER}")?;
    for label in &labels[..size] {
        write!(out, "\t{}", truncate(label, COL_LABEL_WIDTH))?;
    }
    writeln!(out)?;

    let p = CONSOLE_PRECISION;
    for (i, label) in labels[..size].iter().enumerate() {
        write!(out, "{}", truncate(label, ROW_LABEL_WIDTH))?;
        for j in 0..size {
            write!(out, "\t{:.p$}", matrix.get(i, j))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// First `max` characters (not bytes) of `s`.
fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
