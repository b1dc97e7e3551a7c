//! Table output and CSV export for simulation results

use crate::error::{Result, SimulationError};
use crate::runner::{Outcome, StepRecord};
use crate::Page;
use lfu_cache::metrics::LfuCacheMetrics;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Render frequency buckets as `3: [1] 1: [4, 2]`.
pub fn format_cache_state(buckets: &[(u64, Vec<Page>)]) -> String {
    buckets
        .iter()
        .map(|(frequency, pages)| format!("{frequency}: {}", format_pages(pages)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render per-page frequencies as `{1=3, 2=1}`.
pub fn format_frequencies(frequencies: &[(Page, u64)]) -> String {
    let body = frequencies
        .iter()
        .map(|(page, frequency)| format!("{page}={frequency}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{body}}}")
}

fn format_pages(pages: &[Page]) -> String {
    let body = pages
        .iter()
        .map(Page::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{body}]")
}

/// Write the table header.
pub fn write_header<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "\nSimulation Results:")?;
    writeln!(out, "Number\t| Operation\t| Cache State\t| Frequencies")?;
    Ok(())
}

/// Write one simulation step.
pub fn write_step<W: Write>(out: &mut W, record: &StepRecord) -> Result<()> {
    writeln!(
        out,
        "{}\t| {}\t| {}\t| {}",
        record.page,
        record.outcome,
        format_cache_state(&record.cache_state),
        format_frequencies(&record.frequencies)
    )?;
    Ok(())
}

/// Write the final frequency table, highest frequency first.
pub fn write_final_table<W: Write>(out: &mut W, buckets: &[(u64, Vec<Page>)]) -> Result<()> {
    writeln!(out, "\nFinal Frequency Table:")?;
    writeln!(out, "Frequency\t| Numbers")?;
    for (frequency, pages) in buckets {
        writeln!(out, "{frequency}\t\t| {}", format_pages(pages))?;
    }
    Ok(())
}

/// Write hit and fault totals.
pub fn write_summary<W: Write>(out: &mut W, metrics: &LfuCacheMetrics) -> Result<()> {
    let core = &metrics.core;

    writeln!(out, "\nSummary")?;
    writeln!(out, "=======")?;
    writeln!(out, "References:  {}", core.requests)?;
    writeln!(out, "Page hits:   {}", core.cache_hits)?;
    writeln!(out, "Page faults: {}", core.cache_misses())?;
    writeln!(out, "Evictions:   {}", core.evictions)?;
    writeln!(out, "Hit rate:    {:.2}%", core.hit_rate() * 100.0)?;
    writeln!(out, "Max frequency: {}", metrics.max_frequency)?;
    Ok(())
}

/// CSV export row for one simulation step
#[derive(Debug, Serialize)]
pub struct CsvStepRow {
    pub step: usize,
    pub page: Page,
    pub operation: String,
    pub hit: bool,
    pub removed: Option<Page>,
    pub row: Option<usize>,
    pub cache_state: String,
    pub frequencies: String,
}

impl CsvStepRow {
    pub fn from_record(step: usize, record: &StepRecord) -> Self {
        let (removed, row) = match record.outcome {
            Outcome::Hit => (None, None),
            Outcome::Fault { removed, row } => (removed, row),
        };

        Self {
            step,
            page: record.page,
            operation: record.outcome.to_string(),
            hit: record.outcome.is_hit(),
            removed,
            row,
            cache_state: format_cache_state(&record.cache_state),
            frequencies: format_frequencies(&record.frequencies),
        }
    }
}

/// Export every step to a CSV file at `path`.
pub fn export_csv(path: &Path, records: &[StepRecord]) -> Result<()> {
    let csv_error = |source| SimulationError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    for (index, record) in records.iter().enumerate() {
        writer
            .serialize(CsvStepRow::from_record(index + 1, record))
            .map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}
