//! Minimal RTF document builder.
//!
//! The report needs nothing more than paragraphs and plain tables, so the
//! document is assembled as RTF control words over a single string buffer
//! and written to disk once at the end.

use std::fs;
use std::path::Path;

use crate::error::ReportError;
use crate::models::QueryOutcome;

/// Notice rendered in place of table rows when a query produced no data.
pub const NO_DATA_NOTICE: &str = "** NO DATA **";

/// Width of one table column in twips.
const CELL_WIDTH_TWIPS: usize = 1700;

const SEPARATOR: &str = "==========================================";

pub struct RtfDocument {
    body: String,
}

impl RtfDocument {
    pub fn new() -> Self {
        Self {
            body: String::new(),
        }
    }

    /// Fixed-format banner: the report title and timestamp between
    /// separator lines, followed by two blank lines.
    pub fn append_header(&mut self, title: &str, timestamp: &str) {
        self.append_line(SEPARATOR);
        self.append_line(&format!("{title}: {timestamp}"));
        self.append_line(SEPARATOR);
        self.append_blank_line();
        self.append_blank_line();
    }

    pub fn append_section_title(&mut self, prefix: &str, name: &str) {
        self.append_line(&format!("{prefix} {name}:"));
    }

    pub fn append_line(&mut self, text: &str) {
        self.body.push_str(&escape(text));
        self.body.push_str("\\par\n");
    }

    pub fn append_blank_line(&mut self) {
        self.body.push_str("\\par\n");
    }

    /// Append a table: one header row, then one row per data row.
    ///
    /// An empty outcome renders a single notice cell under the header
    /// instead of data rows.
    pub fn append_table(
        &mut self,
        section: &str,
        headers: &[&str],
        outcome: &QueryOutcome,
    ) -> Result<(), ReportError> {
        let header_row: Vec<String> = headers.iter().map(|h| (*h).to_string()).collect();

        match outcome {
            QueryOutcome::Empty => {
                self.append_row(&header_row, true);
                self.append_row(&[NO_DATA_NOTICE.to_string()], false);
            }
            QueryOutcome::Rows(rows) => {
                for row in rows {
                    if row.len() != headers.len() {
                        return Err(ReportError::ColumnMismatch {
                            section: section.to_string(),
                            headers: headers.len(),
                            columns: row.len(),
                        });
                    }
                }

                self.append_row(&header_row, true);
                for row in rows {
                    self.append_row(row, false);
                }
            }
        }

        self.body.push_str("\\pard\n");
        self.append_blank_line();
        Ok(())
    }

    fn append_row(&mut self, cells: &[String], bold: bool) {
        self.body.push_str("\\trowd\\trgaph108");
        for idx in 1..=cells.len() {
            self.body
                .push_str(&format!("\\cellx{}", CELL_WIDTH_TWIPS * idx));
        }
        self.body.push('\n');

        self.body.push_str("\\intbl ");
        for cell in cells {
            if bold {
                self.body.push_str(&format!("{{\\b {}}}\\cell ", escape(cell)));
            } else {
                self.body.push_str(&format!("{}\\cell ", escape(cell)));
            }
        }
        self.body.push_str("\\row\n");
    }

    /// The complete document text.
    pub fn render(&self) -> String {
        format!(
            "{{\\rtf1\\ansi\\deff0{{\\fonttbl{{\\f0 Helvetica;}}}}\\f0\\fs20\n{}}}",
            self.body
        )
    }

    /// Write the rendered document to the given path.
    pub fn write(&self, path: &Path) -> Result<(), ReportError> {
        fs::write(path, self.render())?;
        Ok(())
    }
}

impl Default for RtfDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape text for inclusion in an RTF body.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            c if (c as u32) > 0x7f => {
                // \u takes a signed 16-bit decimal value
                let mut value = c as u32 as i64;
                if value > 32767 {
                    value -= 65536;
                }
                out.push_str(&format!("\\u{value}?"));
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_wraps_rtf_envelope() {
        let doc = RtfDocument::new();
        let rendered = doc.render();
        assert!(rendered.starts_with("{\\rtf1\\ansi"));
        assert!(rendered.ends_with('}'));
    }

    #[test]
    fn test_header_block() {
        let mut doc = RtfDocument::new();
        doc.append_header("ClientBoxx Usage Report", "05/03/2024 14:30");

        let rendered = doc.render();
        assert!(rendered.contains("ClientBoxx Usage Report: 05/03/2024 14:30"));
        assert_eq!(rendered.matches(SEPARATOR).count(), 2);
    }

    #[test]
    fn test_section_title() {
        let mut doc = RtfDocument::new();
        doc.append_section_title("ClientBoxx", "User Listing");
        assert!(doc.render().contains("ClientBoxx User Listing:"));
    }

    #[test]
    fn test_table_rows() {
        let mut doc = RtfDocument::new();
        let outcome = QueryOutcome::Rows(vec![
            vec!["1".to_string(), "Alice".to_string()],
            vec!["2".to_string(), "Bob".to_string()],
        ]);
        doc.append_table("Users", &["ID", "Name"], &outcome).unwrap();

        let rendered = doc.render();
        // Header row plus two data rows
        assert_eq!(rendered.matches("\\row").count(), 3);
        assert!(rendered.contains("{\\b ID}"));
        assert!(rendered.contains("Alice\\cell"));
        assert!(rendered.contains("Bob\\cell"));
    }

    #[test]
    fn test_empty_outcome_renders_notice() {
        let mut doc = RtfDocument::new();
        doc.append_table("Users", &["ID", "Name"], &QueryOutcome::Empty)
            .unwrap();

        let rendered = doc.render();
        assert!(rendered.contains(NO_DATA_NOTICE));
        // Header row plus the single notice row
        assert_eq!(rendered.matches("\\row").count(), 2);
    }

    #[test]
    fn test_column_mismatch_is_an_error() {
        let mut doc = RtfDocument::new();
        let outcome = QueryOutcome::Rows(vec![vec!["1".to_string()]]);

        let result = doc.append_table("Users", &["ID", "Name"], &outcome);
        assert!(matches!(
            result,
            Err(ReportError::ColumnMismatch {
                headers: 2,
                columns: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_escape_control_characters() {
        assert_eq!(escape(r"a\b"), r"a\\b");
        assert_eq!(escape("{x}"), r"\{x\}");
        assert_eq!(escape("café"), r"caf\u233?");
    }
}
