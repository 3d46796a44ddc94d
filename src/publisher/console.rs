use anyhow::Result;

use crate::models::RenderedReport;
use crate::publisher::Publisher;

/// Prints a delivery summary instead of sending mail. Useful for dry runs
/// against a production database.
#[derive(Debug)]
pub struct ConsolePublisher;

impl ConsolePublisher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsolePublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl Publisher for ConsolePublisher {
    fn publish(&self, report: &RenderedReport) -> Result<()> {
        println!(
            "Report written to {} ({} sections, generated {})",
            report.path.display(),
            report.section_count,
            report.generated_at.format("%d/%m/%Y %H:%M")
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
