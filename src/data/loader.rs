use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Range, Reader, Xlsx, XlsxError};
use log::{debug, info, warn};
use thiserror::Error;

use super::model::{CanonicalRecord, CanonicalTable, RawCell};

// ---------------------------------------------------------------------------
// Worksheet layout
// ---------------------------------------------------------------------------

/// Worksheet holding the master data.
pub const SHEET_NAME: &str = "Master";

/// 0-based worksheet row of the column headers. The form export places two
/// title rows above it, so this is worksheet row 3 in Excel terms.
pub const HEADER_ROW: u32 = 2;

/// 0-based worksheet row where data begins.
pub const DATA_START_ROW: u32 = 3;

/// Required column headers, in schema order.
pub const REQUIRED_COLUMNS: [&str; 9] = [
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

/// Accepted range for `Project Year` values; anything outside is treated
/// as a data-entry mistake and recorded as missing.
const YEAR_MIN: f64 = 1900.0;
const YEAR_MAX: f64 = 2100.0;

// ---------------------------------------------------------------------------
// DataLoadError – fatal load failures
// ---------------------------------------------------------------------------

/// Errors that abort a load. Per-cell problems are never fatal; they are
/// logged and recovered inline (zero for numeric cells, missing for text).
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("data workbook not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("could not read workbook {}: {}", .path.display(), .source)]
    Workbook {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },

    #[error("worksheet '{}' not found in {}", .sheet, .path.display())]
    MissingSheet { path: PathBuf, sheet: &'static str },

    #[error("schema mismatch in {}: missing column(s) {:?}", .path.display(), .missing)]
    SchemaMismatch { path: PathBuf, missing: Vec<String> },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and clean the Master sheet of the given workbook.
///
/// The sheet layout is fixed: title rows above, headers on [`HEADER_ROW`],
/// data from [`DATA_START_ROW`] down. Columns are matched by header text
/// after whitespace normalization; stray unnamed or numeric headers are
/// ignored, duplicated headers keep their first occurrence.
pub fn load_workbook(path: &Path) -> Result<CanonicalTable, DataLoadError> {
    if !path.is_file() {
        return Err(DataLoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|source| DataLoadError::Workbook {
        path: path.to_path_buf(),
        source,
    })?;

    let range = workbook
        .worksheet_range(SHEET_NAME)
        .map_err(|source| match source {
            XlsxError::WorksheetNotFound(_) => DataLoadError::MissingSheet {
                path: path.to_path_buf(),
                sheet: SHEET_NAME,
            },
            source => DataLoadError::Workbook {
                path: path.to_path_buf(),
                source,
            },
        })?;

    let (header, rows) = worksheet_grid(&range);

    let columns =
        resolve_columns(&header).map_err(|missing| DataLoadError::SchemaMismatch {
            path: path.to_path_buf(),
            missing,
        })?;

    let records = clean_rows(&columns, &rows);
    info!(
        "loaded {} records from {} ({} raw rows)",
        records.len(),
        path.display(),
        rows.len()
    );

    Ok(CanonicalTable::from_records(records))
}

/// Materialize the header row and the data rows at their fixed offsets.
/// `get_value` takes absolute coordinates, so leading title rows are
/// skipped regardless of where the used range happens to start.
fn worksheet_grid(range: &Range<Data>) -> (Vec<RawCell>, Vec<Vec<RawCell>>) {
    let Some((end_row, end_col)) = range.end() else {
        return (Vec::new(), Vec::new());
    };

    let read_row = |row: u32| -> Vec<RawCell> {
        (0..=end_col)
            .map(|col| raw_cell(range.get_value((row, col))))
            .collect()
    };

    let header = read_row(HEADER_ROW);
    let rows = (DATA_START_ROW..=end_row).map(read_row).collect();
    (header, rows)
}

/// Map a calamine cell onto the cleaning sum type. Whitespace-only strings
/// count as blank; dates, durations and error cells all land on
/// [`RawCell::Malformed`] and take the per-column fallback.
fn raw_cell(cell: Option<&Data>) -> RawCell {
    match cell {
        None | Some(Data::Empty) => RawCell::Blank,
        Some(Data::String(s)) => {
            if s.trim().is_empty() {
                RawCell::Blank
            } else {
                RawCell::Text(s.clone())
            }
        }
        Some(Data::Float(v)) => RawCell::Number(*v),
        Some(Data::Int(v)) => RawCell::Number(*v as f64),
        Some(Data::Bool(b)) => RawCell::Number(if *b { 1.0 } else { 0.0 }),
        Some(_) => RawCell::Malformed,
    }
}

// ---------------------------------------------------------------------------
// Header resolution
// ---------------------------------------------------------------------------

/// Worksheet position of every required column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub level1: usize,
    pub level2: usize,
    pub level3: usize,
    pub province: usize,
    pub project_year: usize,
    pub quantity: usize,
    pub volunteer_hours: usize,
    pub value_rand: usize,
    pub souls: usize,
}

/// Match the header row against [`REQUIRED_COLUMNS`].
///
/// Unnamed cells, numeric headers (spreadsheet artifacts from pasted index
/// columns) and unknown names are dropped. A duplicated header keeps the
/// first occurrence. Err carries the missing names in schema order.
pub fn resolve_columns(header: &[RawCell]) -> Result<ColumnMap, Vec<String>> {
    let mut found: BTreeMap<&'static str, usize> = BTreeMap::new();

    for (idx, cell) in header.iter().enumerate() {
        let name = match cell {
            RawCell::Blank | RawCell::Malformed => continue,
            RawCell::Number(v) => {
                debug!("ignoring numeric header {v} at column {idx}");
                continue;
            }
            RawCell::Text(s) => match normalize_text(s) {
                Some(name) => name,
                None => continue,
            },
        };
        if name.parse::<f64>().is_ok() {
            debug!("ignoring numeric header {name:?} at column {idx}");
            continue;
        }

        match REQUIRED_COLUMNS.iter().find(|c| **c == name) {
            None => debug!("ignoring unexpected column {name:?} at column {idx}"),
            Some(&canonical) => {
                if found.contains_key(canonical) {
                    warn!("duplicate column {name:?} at column {idx}, keeping the first");
                } else {
                    found.insert(canonical, idx);
                }
            }
        }
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !found.contains_key(*c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(missing);
    }

    Ok(ColumnMap {
        level1: found["Level 1"],
        level2: found["Level 2"],
        level3: found["Level 3"],
        province: found["Province"],
        project_year: found["Project Year"],
        quantity: found["Quantity"],
        volunteer_hours: found["Volunteer Hours"],
        value_rand: found["Value R"],
        souls: found["Souls"],
    })
}

// ---------------------------------------------------------------------------
// Row cleaning
// ---------------------------------------------------------------------------

/// Clean data rows into canonical records.
///
/// Fully blank rows vanish silently (trailing padding is normal in form
/// exports). Rows without a Level 1 value cannot be categorized and are
/// dropped with a warning. Everything else becomes a record, however messy
/// its cells.
pub fn clean_rows(columns: &ColumnMap, rows: &[Vec<RawCell>]) -> Vec<CanonicalRecord> {
    let mut records = Vec::with_capacity(rows.len());

    for (offset, row) in rows.iter().enumerate() {
        // 1-based Excel row number, for log messages.
        let sheet_row = DATA_START_ROW + offset as u32 + 1;

        if row.iter().all(RawCell::is_blank) {
            continue;
        }

        let Some(level1) = text_value(cell_at(row, columns.level1)) else {
            warn!("row {sheet_row}: no Level 1 value, dropping row");
            continue;
        };

        let numeric = |col: usize, name: &str| match coerce_numeric(cell_at(row, col)) {
            Coerced::Value(v) => v,
            Coerced::Zero => 0.0,
            Coerced::Fallback => {
                warn!("row {sheet_row}: {name} cell is not numeric, using 0");
                0.0
            }
        };

        let quantity = numeric(columns.quantity, "Quantity");
        let volunteer_hours = numeric(columns.volunteer_hours, "Volunteer Hours");
        let value_rand = numeric(columns.value_rand, "Value R");
        let souls = numeric(columns.souls, "Souls");

        let project_year = match coerce_numeric(cell_at(row, columns.project_year)) {
            Coerced::Value(v) if v.fract() == 0.0 && (YEAR_MIN..=YEAR_MAX).contains(&v) => {
                Some(v as u16)
            }
            Coerced::Value(v) => {
                warn!("row {sheet_row}: Project Year {v} is not a plausible year");
                None
            }
            Coerced::Zero => None,
            Coerced::Fallback => {
                warn!("row {sheet_row}: Project Year cell is not numeric");
                None
            }
        };

        records.push(CanonicalRecord {
            level1,
            level2: text_value(cell_at(row, columns.level2)),
            level3: text_value(cell_at(row, columns.level3)),
            province: text_value(cell_at(row, columns.province)),
            project_year,
            quantity,
            volunteer_hours,
            value_rand,
            souls,
        });
    }

    records
}

const BLANK: RawCell = RawCell::Blank;

/// Rows can be ragged when the used range is narrower than the header.
fn cell_at(row: &[RawCell], idx: usize) -> &RawCell {
    row.get(idx).unwrap_or(&BLANK)
}

/// Outcome of the numeric-cell policy.
enum Coerced {
    Value(f64),
    /// Blank cell: a plain zero, not worth a log line.
    Zero,
    /// Unusable cell: caller logs and substitutes.
    Fallback,
}

/// Numbers pass through, numeric text parses, blanks are zero, anything
/// else falls back. Non-finite values (a pasted "inf", an overflow) are
/// junk, not numbers.
fn coerce_numeric(cell: &RawCell) -> Coerced {
    if cell.is_blank() {
        return Coerced::Zero;
    }
    match cell.number() {
        Some(v) if v.is_finite() => Coerced::Value(v),
        _ => Coerced::Fallback,
    }
}

/// Read a text cell. Numbers render as text so a year typed into a text
/// column stays readable; blanks and junk are missing.
fn text_value(cell: &RawCell) -> Option<String> {
    match cell {
        RawCell::Text(s) => normalize_text(s),
        RawCell::Number(v) => Some(number_to_text(*v)),
        RawCell::Blank | RawCell::Malformed => None,
    }
}

/// Trim and collapse runs of internal whitespace, preserving case.
/// Whitespace-only input counts as missing.
fn normalize_text(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Integral floats display without the trailing `.0` Excel never shows.
fn number_to_text(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::{Workbook, Worksheet};
    use tempfile::TempDir;

    fn text(s: &str) -> RawCell {
        RawCell::Text(s.to_string())
    }

    /// Header row with every required column in schema order.
    fn full_header() -> Vec<RawCell> {
        REQUIRED_COLUMNS.iter().map(|c| text(c)).collect()
    }

    // -- resolve_columns --

    #[test]
    fn resolves_all_required_columns() {
        let map = resolve_columns(&full_header()).unwrap();
        assert_eq!(map.level1, 0);
        assert_eq!(map.project_year, 4);
        assert_eq!(map.souls, 8);
    }

    #[test]
    fn ignores_blank_numeric_and_unknown_headers() {
        let mut header = vec![
            RawCell::Blank,
            RawCell::Number(12.0),
            text("Notes"),
            text("7"),
        ];
        header.extend(full_header());

        let map = resolve_columns(&header).unwrap();
        assert_eq!(map.level1, 4);
        assert_eq!(map.souls, 12);
    }

    #[test]
    fn duplicate_header_keeps_first_occurrence() {
        let mut header = full_header();
        header.push(text("Quantity"));

        let map = resolve_columns(&header).unwrap();
        assert_eq!(map.quantity, 5);
    }

    #[test]
    fn normalizes_header_whitespace() {
        let mut header = full_header();
        header[6] = text("  Volunteer   Hours ");

        let map = resolve_columns(&header).unwrap();
        assert_eq!(map.volunteer_hours, 6);
    }

    #[test]
    fn reports_missing_columns_in_schema_order() {
        let header: Vec<RawCell> = full_header()
            .into_iter()
            .filter(|c| !matches!(c, RawCell::Text(s) if s == "Value R" || s == "Level 2"))
            .collect();

        let missing = resolve_columns(&header).unwrap_err();
        assert_eq!(missing, vec!["Level 2".to_string(), "Value R".to_string()]);
    }

    // -- clean_rows --

    fn schema_columns() -> ColumnMap {
        resolve_columns(&full_header()).unwrap()
    }

    fn data_row(
        levels: (&str, &str, &str),
        province: &str,
        year: RawCell,
        metrics: [RawCell; 4],
    ) -> Vec<RawCell> {
        let [q, vh, vr, s] = metrics;
        vec![
            text(levels.0),
            text(levels.1),
            text(levels.2),
            text(province),
            year,
            q,
            vh,
            vr,
            s,
        ]
    }

    fn n(v: f64) -> RawCell {
        RawCell::Number(v)
    }

    #[test]
    fn cleans_one_row_per_input_row() {
        let rows = vec![
            data_row(
                ("Health", "Clinics", "Checkups"),
                "Gauteng",
                n(2023.0),
                [n(10.0), n(40.0), n(1500.0), n(120.0)],
            ),
            data_row(
                ("Education", "Schools", "Tutoring"),
                "Limpopo",
                n(2024.0),
                [n(2.0), n(16.0), n(300.0), n(35.0)],
            ),
        ];

        let records = clean_rows(&schema_columns(), &rows);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].level1, "Health");
        assert_eq!(records[0].level3.as_deref(), Some("Checkups"));
        assert_eq!(records[0].project_year, Some(2023));
        assert_eq!(records[0].quantity, 10.0);
        assert_eq!(records[1].province.as_deref(), Some("Limpopo"));
    }

    #[test]
    fn non_numeric_metric_cells_become_zero() {
        let rows = vec![data_row(
            ("Health", "Clinics", "Checkups"),
            "Gauteng",
            n(2023.0),
            [text("pending"), RawCell::Blank, RawCell::Malformed, text("12")],
        )];

        let records = clean_rows(&schema_columns(), &rows);
        assert_eq!(records[0].quantity, 0.0);
        assert_eq!(records[0].volunteer_hours, 0.0);
        assert_eq!(records[0].value_rand, 0.0);
        assert_eq!(records[0].souls, 12.0);
    }

    #[test]
    fn implausible_or_missing_years_become_none() {
        let columns = schema_columns();
        let base = |year: RawCell| {
            data_row(
                ("Health", "Clinics", "Checkups"),
                "Gauteng",
                year,
                [n(1.0), n(1.0), n(1.0), n(1.0)],
            )
        };

        let rows = vec![
            base(n(23.0)),
            base(n(2023.5)),
            base(RawCell::Blank),
            base(text("soon")),
            base(text("2023")),
        ];
        let records = clean_rows(&columns, &rows);

        assert_eq!(records[0].project_year, None);
        assert_eq!(records[1].project_year, None);
        assert_eq!(records[2].project_year, None);
        assert_eq!(records[3].project_year, None);
        assert_eq!(records[4].project_year, Some(2023));
    }

    #[test]
    fn blank_rows_and_rows_without_level1_are_dropped() {
        let rows = vec![
            data_row(
                ("Health", "Clinics", "Checkups"),
                "Gauteng",
                n(2023.0),
                [n(1.0), n(1.0), n(1.0), n(1.0)],
            ),
            vec![RawCell::Blank; 9],
            // metrics present but no Level 1
            vec![
                RawCell::Blank,
                text("Clinics"),
                RawCell::Blank,
                text("Gauteng"),
                n(2023.0),
                n(5.0),
                n(5.0),
                n(5.0),
                n(5.0),
            ],
        ];

        let records = clean_rows(&schema_columns(), &rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level1, "Health");
    }

    #[test]
    fn text_fields_are_normalized_and_optional() {
        let rows = vec![data_row(
            ("  Socio  economic ", " Skills   Training ", "  "),
            "   ",
            n(2022.0),
            [n(1.0), n(1.0), n(1.0), n(1.0)],
        )];

        let records = clean_rows(&schema_columns(), &rows);
        assert_eq!(records[0].level1, "Socio economic");
        assert_eq!(records[0].level2.as_deref(), Some("Skills Training"));
        assert_eq!(records[0].level3, None);
        assert_eq!(records[0].province, None);
    }

    #[test]
    fn numbers_in_text_columns_render_as_text() {
        let mut row = data_row(
            ("Health", "Clinics", "Checkups"),
            "Gauteng",
            n(2023.0),
            [n(1.0), n(1.0), n(1.0), n(1.0)],
        );
        row[1] = n(2024.0);
        row[2] = n(3.25);

        let records = clean_rows(&schema_columns(), &[row]);
        assert_eq!(records[0].level2.as_deref(), Some("2024"));
        assert_eq!(records[0].level3.as_deref(), Some("3.25"));
    }

    #[test]
    fn ragged_rows_read_as_blank_cells() {
        let rows = vec![vec![text("Health"), text("Clinics")]];

        let records = clean_rows(&schema_columns(), &rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level3, None);
        assert_eq!(records[0].quantity, 0.0);
        assert_eq!(records[0].project_year, None);
    }

    // -- end-to-end against real workbooks --

    /// Workbook with two title rows and the full header on worksheet row 3.
    fn master_workbook(headers: &[&str]) -> Workbook {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME).unwrap();
        sheet.write_string(0, 0, "Master Data set v13").unwrap();
        sheet.write_string(1, 0, "Form export").unwrap();
        for (col, name) in headers.iter().enumerate() {
            sheet.write_string(HEADER_ROW, col as u16, *name).unwrap();
        }
        workbook
    }

    fn write_row(
        sheet: &mut Worksheet,
        row: u32,
        levels: (&str, &str, &str),
        province: &str,
        year: f64,
        metrics: [f64; 4],
    ) {
        sheet.write_string(row, 0, levels.0).unwrap();
        sheet.write_string(row, 1, levels.1).unwrap();
        sheet.write_string(row, 2, levels.2).unwrap();
        sheet.write_string(row, 3, province).unwrap();
        sheet.write_number(row, 4, year).unwrap();
        for (i, v) in metrics.iter().enumerate() {
            sheet.write_number(row, 5 + i as u16, *v).unwrap();
        }
    }

    #[test]
    fn loads_records_in_worksheet_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("master.xlsx");

        let mut workbook = master_workbook(&REQUIRED_COLUMNS);
        let sheet = workbook.worksheet_from_index(0).unwrap();
        write_row(
            sheet,
            DATA_START_ROW,
            ("Health", "Clinics", "Checkups"),
            "Gauteng",
            2023.0,
            [10.0, 40.0, 1500.0, 120.0],
        );
        write_row(
            sheet,
            DATA_START_ROW + 1,
            ("Nutrition", "Food Parcels", "Family Parcels"),
            "KwaZulu-Natal",
            2024.0,
            [50.0, 80.0, 9000.0, 200.0],
        );
        workbook.save(&path).unwrap();

        let table = load_workbook(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].level1, "Health");
        assert_eq!(table.records[1].level1, "Nutrition");
        assert_eq!(table.years.iter().copied().collect::<Vec<_>>(), vec![2023, 2024]);
        assert!(table.categories.contains("Nutrition"));
    }

    #[test]
    fn skips_blank_padding_and_messy_cells() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("messy.xlsx");

        let mut workbook = master_workbook(&REQUIRED_COLUMNS);
        let sheet = workbook.worksheet_from_index(0).unwrap();
        write_row(
            sheet,
            DATA_START_ROW,
            ("Health", "Clinics", "Checkups"),
            "Gauteng",
            2023.0,
            [10.0, 40.0, 1500.0, 120.0],
        );
        // worksheet row DATA_START_ROW + 1 left entirely blank
        let row = DATA_START_ROW + 2;
        sheet.write_string(row, 0, "Education").unwrap();
        sheet.write_string(row, 1, "Schools").unwrap();
        sheet.write_string(row, 4, "TBC").unwrap();
        sheet.write_string(row, 5, "pending").unwrap();
        sheet.write_boolean(row, 6, true).unwrap();
        sheet.write_number(row, 7, 250.0).unwrap();
        workbook.save(&path).unwrap();

        let table = load_workbook(&path).unwrap();
        assert_eq!(table.len(), 2);

        let messy = &table.records[1];
        assert_eq!(messy.level1, "Education");
        assert_eq!(messy.project_year, None);
        assert_eq!(messy.quantity, 0.0);
        assert_eq!(messy.volunteer_hours, 1.0);
        assert_eq!(messy.value_rand, 250.0);
        assert_eq!(messy.souls, 0.0);
    }

    #[test]
    fn ignores_stray_columns_beyond_the_schema() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stray.xlsx");

        let mut headers: Vec<&str> = REQUIRED_COLUMNS.to_vec();
        headers.push("14");
        headers.push("Internal Notes");
        let mut workbook = master_workbook(&headers);
        let sheet = workbook.worksheet_from_index(0).unwrap();
        write_row(
            sheet,
            DATA_START_ROW,
            ("Health", "Clinics", "Checkups"),
            "Gauteng",
            2023.0,
            [10.0, 40.0, 1500.0, 120.0],
        );
        sheet.write_string(DATA_START_ROW, 9, "ignore me").unwrap();
        sheet.write_string(DATA_START_ROW, 10, "and me").unwrap();
        workbook.save(&path).unwrap();

        let table = load_workbook(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records[0].souls, 120.0);
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.xlsx");

        let err = load_workbook(&path).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }

    #[test]
    fn missing_sheet_is_reported_by_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wrong_sheet.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "not the master sheet").unwrap();
        workbook.save(&path).unwrap();

        let err = load_workbook(&path).unwrap_err();
        match err {
            DataLoadError::MissingSheet { sheet, .. } => assert_eq!(sheet, SHEET_NAME),
            other => panic!("expected MissingSheet, got {other:?}"),
        }
    }

    #[test]
    fn missing_columns_fail_without_a_partial_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schema.xlsx");

        let headers: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| *c != "Value R" && *c != "Souls")
            .collect();
        let mut workbook = master_workbook(&headers);
        let sheet = workbook.worksheet_from_index(0).unwrap();
        write_row(
            sheet,
            DATA_START_ROW,
            ("Health", "Clinics", "Checkups"),
            "Gauteng",
            2023.0,
            [10.0, 40.0, 0.0, 0.0],
        );
        workbook.save(&path).unwrap();

        let err = load_workbook(&path).unwrap_err();
        match err {
            DataLoadError::SchemaMismatch { missing, .. } => {
                assert_eq!(missing, vec!["Value R".to_string(), "Souls".to_string()]);
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }
}
