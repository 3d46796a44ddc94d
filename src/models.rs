use std::path::PathBuf;

use chrono::{DateTime, Local};

/// Display token in section names, expanded to the effective day count.
pub const DAYS_TOKEN: &str = "{days}";

/// Recency filter applied to a report section's query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    /// No filtering: the query runs as written, with no bound parameter.
    All,
    /// Only records younger than the given number of days.
    LastDays(u32),
}

impl DateRange {
    pub const DAILY: DateRange = DateRange::LastDays(1);
    pub const WEEKLY: DateRange = DateRange::LastDays(7);
    pub const MONTHLY: DateRange = DateRange::LastDays(30);

    /// The day count, or `None` when the section is unfiltered.
    pub fn days(self) -> Option<u32> {
        match self {
            DateRange::All => None,
            DateRange::LastDays(days) => Some(days),
        }
    }
}

/// One section of the usage report: a titled query with its column headers.
///
/// Queries that filter by recency carry a `:days` bound parameter and a
/// `{days}` token in the display name; unfiltered queries carry neither.
#[derive(Debug, Clone)]
pub struct ReportSection {
    pub name: &'static str,
    pub query: &'static str,
    pub headers: &'static [&'static str],
    pub date_range: DateRange,
}

impl ReportSection {
    /// Section name with the `{days}` token expanded for display.
    pub fn display_name(&self) -> String {
        match self.date_range.days() {
            Some(days) => self.name.replace(DAYS_TOKEN, &days.to_string()),
            None => self.name.to_string(),
        }
    }
}

/// Result of a section query.
///
/// `Empty` is a distinct case, not zero rows: rendering shows a notice
/// instead of an empty table, and callers cannot mistake it for data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Empty,
    Rows(Vec<Vec<String>>),
}

/// Metadata for a report document that has been written to disk.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub file_name: String,
    pub path: PathBuf,
    pub generated_at: DateTime<Local>,
    pub section_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_days() {
        assert_eq!(DateRange::All.days(), None);
        assert_eq!(DateRange::LastDays(7).days(), Some(7));
        assert_eq!(DateRange::DAILY.days(), Some(1));
        assert_eq!(DateRange::WEEKLY.days(), Some(7));
        assert_eq!(DateRange::MONTHLY.days(), Some(30));
    }

    #[test]
    fn test_display_name_expands_token() {
        let section = ReportSection {
            name: "New Users in past {days} days",
            query: "SELECT 1",
            headers: &["ID"],
            date_range: DateRange::WEEKLY,
        };
        assert_eq!(section.display_name(), "New Users in past 7 days");
    }

    #[test]
    fn test_display_name_unfiltered() {
        let section = ReportSection {
            name: "User Listing",
            query: "SELECT 1",
            headers: &["ID"],
            date_range: DateRange::All,
        };
        assert_eq!(section.display_name(), "User Listing");
    }

    #[test]
    fn test_query_outcome_empty_is_not_rows() {
        assert_ne!(QueryOutcome::Empty, QueryOutcome::Rows(Vec::new()));
    }
}
