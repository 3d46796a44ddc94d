use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::config::Config;
use crate::document::{NO_DATA_NOTICE, RtfDocument};
use crate::models::{RenderedReport, ReportSection};
use crate::store::Store;

/// Timestamp format used in the report file name.
const FILE_TIMESTAMP_FORMAT: &str = "%d%m%Y%H%M%S";

/// Timestamp format shown in the document header.
const HEADER_TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Build the full report document and write it to the output directory.
///
/// Sections are rendered in definition order; any query failure discards
/// the whole report. The output file name carries the run timestamp.
pub fn generate(
    store: &Store,
    sections: &[ReportSection],
    config: &Config,
    now: DateTime<Local>,
) -> Result<RenderedReport> {
    let mut doc = RtfDocument::new();

    let title = format!("{} Usage Report", config.report_prefix);
    doc.append_header(&title, &now.format(HEADER_TIMESTAMP_FORMAT).to_string());

    for section in sections {
        let name = section.display_name();
        debug!(section = %name, "Building report section");

        doc.append_section_title(&config.report_prefix, &name);
        let outcome = store
            .run_section_query(section.query, section.date_range)
            .with_context(|| format!("Failed to run query for section '{name}'"))?;
        doc.append_table(&name, section.headers, &outcome)?;
    }

    doc.append_blank_line();
    let total_storage = store
        .total_storage_gb()
        .context("Failed to fetch total storage")?;
    let total_line = match total_storage {
        Some(gb) => format!("{} Total Storage: {} GB", config.report_prefix, gb),
        None => format!("{} Total Storage: {}", config.report_prefix, NO_DATA_NOTICE),
    };
    doc.append_line(&total_line);
    doc.append_blank_line();

    let file_name = format!(
        "{}_{}.rtf",
        config.report_file_prefix,
        now.format(FILE_TIMESTAMP_FORMAT)
    );
    let path = Path::new(&config.output_dir).join(&file_name);
    doc.write(&path)
        .with_context(|| format!("Failed to write report file {}", path.display()))?;

    info!(file = %path.display(), sections = sections.len(), "Report written");

    Ok(RenderedReport {
        file_name,
        path,
        generated_at: now,
        section_count: sections.len(),
    })
}
