//! The static report-definition list.
//!
//! Section order here is the order the sections appear in the document.
//! Filtered queries bind the day count to `:days`; unfiltered queries
//! carry no parameter at all.

use crate::models::{DateRange, ReportSection};

const SECTIONS: &[ReportSection] = &[
    ReportSection {
        name: "New Users in past {days} days",
        query: r#"SELECT DISTINCT u.id, u.name, u.email, u.phone, u.created_at,
                  COUNT(cu.client_id) AS "client count",
                  julianday('now') - julianday(u.created_at) AS "account age"
                  FROM "user" AS u
                  JOIN client_user AS cu ON u.id = cu.user_id
                  WHERE julianday('now') - julianday(u.created_at) < :days
                  GROUP BY u.id
                  ORDER BY u.name"#,
        headers: &[
            "ID",
            "Name",
            "Email",
            "Phone",
            "Created On",
            "Client Count",
            "Account Age",
        ],
        date_range: DateRange::MONTHLY,
    },
    ReportSection {
        name: "User Listing",
        query: r#"SELECT DISTINCT u.id, u.name, u.email, u.phone, u.created_at,
                  COUNT(cu.client_id) AS "client count"
                  FROM "user" AS u
                  JOIN client_user AS cu ON u.id = cu.user_id
                  GROUP BY u.id
                  ORDER BY u.name"#,
        headers: &["ID", "Name", "Email", "Phone", "Created On", "Client Count"],
        date_range: DateRange::All,
    },
    ReportSection {
        name: "Storage Details",
        query: r#"SELECT DISTINCT u.id, u.name, u.email, u.phone, u.created_at,
                  COUNT(a.id) AS "attachment count",
                  ROUND(SUM(a.file_size) / 1000000000.0, 2) AS "storage in GB"
                  FROM "user" AS u
                  JOIN attachment AS a ON u.id = a.user_id
                  GROUP BY u.id
                  ORDER BY u.name"#,
        headers: &[
            "ID",
            "Name",
            "Email",
            "Phone",
            "Created On",
            "Attachment Count",
            "Storage GB",
        ],
        date_range: DateRange::All,
    },
    ReportSection {
        name: "Attachment Details",
        query: r#"SELECT DISTINCT u.id, u.name, u.email, u.phone, u.created_at,
                  COUNT(a.id) AS "attachment count",
                  CASE a.type
                      WHEN 1 THEN 'doc'
                      WHEN 2 THEN 'img'
                      WHEN 3 THEN 'vid'
                      WHEN 4 THEN 'note'
                      ELSE CAST(a.type AS TEXT)
                  END AS "type",
                  ROUND(SUM(a.file_size) / 1000000000.0, 2) AS "storage in GB"
                  FROM "user" AS u
                  JOIN attachment AS a ON u.id = a.user_id
                  GROUP BY u.id, a.type
                  ORDER BY u.name, "attachment count" DESC, "storage in GB" DESC"#,
        headers: &[
            "ID",
            "Name",
            "Email",
            "Phone",
            "Created On",
            "Attachment Count",
            "Type",
            "Storage GB",
        ],
        date_range: DateRange::All,
    },
];

/// The ordered list of report sections.
pub fn report_sections() -> &'static [ReportSection] {
    SECTIONS
}
