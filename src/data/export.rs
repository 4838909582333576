use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::aggregate::DashboardView;
use super::model::{CanonicalRecord, CanonicalTable};

// ---------------------------------------------------------------------------
// Export seam – filtered rows as CSV, aggregates as JSON
// ---------------------------------------------------------------------------

/// Column order of the CSV export, matching the detail table.
const CSV_HEADER: [&str; 9] = [
    "Level 1",
    "Level 2",
    "Level 3",
    "Province",
    "Project Year",
    "Quantity",
    "Volunteer Hours",
    "Value R",
    "Souls",
];

/// Write the filtered rows as CSV. Missing text fields and years come out
/// as empty cells, the way the source sheet had them.
pub fn write_filtered_csv<W: Write>(
    writer: W,
    table: &CanonicalTable,
    view: &DashboardView,
) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(CSV_HEADER)?;
    for record in view.records(table) {
        out.write_record(csv_fields(record))?;
    }
    out.flush().context("flushing CSV export")?;
    Ok(())
}

fn csv_fields(record: &CanonicalRecord) -> [String; 9] {
    let opt = |field: &Option<String>| field.clone().unwrap_or_default();
    [
        record.level1.clone(),
        opt(&record.level2),
        opt(&record.level3),
        opt(&record.province),
        record
            .project_year
            .map(|year| year.to_string())
            .unwrap_or_default(),
        record.quantity.to_string(),
        record.volunteer_hours.to_string(),
        record.value_rand.to_string(),
        record.souls.to_string(),
    ]
}

/// Write the aggregate view (KPIs, hierarchy rollup, chart totals) as
/// pretty-printed JSON, the shape an external chart renderer consumes.
pub fn write_summary_json<W: Write>(writer: W, view: &DashboardView) -> Result<()> {
    serde_json::to_writer_pretty(writer, view).context("serializing dashboard summary")?;
    Ok(())
}

/// File variant of [`write_filtered_csv`] for the top-bar export action.
pub fn export_filtered_csv(path: &Path, table: &CanonicalTable, view: &DashboardView) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_filtered_csv(file, table, view)
}

/// File variant of [`write_summary_json`].
pub fn export_summary_json(path: &Path, view: &DashboardView) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_summary_json(file, view)
}
