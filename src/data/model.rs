use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// RawCell – one spreadsheet cell before cleaning
// ---------------------------------------------------------------------------

/// A dynamically-typed worksheet cell. Hand-edited sheets mix text, numbers,
/// blanks and outright junk in the same column; the loader resolves every
/// cell through this type exactly once, and canonical records never carry it.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Text(String),
    Number(f64),
    Blank,
    /// Error cells, date/duration cells: nothing either the text or the
    /// numeric policy should trust.
    Malformed,
}

impl RawCell {
    /// Numeric content: numbers directly, numeric-looking text parsed.
    pub fn number(&self) -> Option<f64> {
        match self {
            RawCell::Number(v) => Some(*v),
            RawCell::Text(s) => s.trim().parse::<f64>().ok(),
            RawCell::Blank | RawCell::Malformed => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, RawCell::Blank)
    }
}

// ---------------------------------------------------------------------------
// Metric – which measure weighs the rollups and charts
// ---------------------------------------------------------------------------

/// The measure the aggregate views are weighted by. Chosen in the UI and
/// passed down as a plain value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Metric {
    Quantity,
    VolunteerHours,
    ValueRand,
    Souls,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Quantity,
        Metric::VolunteerHours,
        Metric::ValueRand,
        Metric::Souls,
    ];

    /// Display label, identical to the workbook column header.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Quantity => "Quantity",
            Metric::VolunteerHours => "Volunteer Hours",
            Metric::ValueRand => "Value R",
            Metric::Souls => "Souls",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// CanonicalRecord – one cleaned row of the Master sheet
// ---------------------------------------------------------------------------

/// A cleaned, typed row. `level1` is always present; the remaining text
/// fields are explicitly optional because the sheet routinely leaves them
/// out. Numeric fields are finite, with unusable cells already defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    pub level1: String,
    pub level2: Option<String>,
    pub level3: Option<String>,
    pub province: Option<String>,
    /// Plausible 4-digit year; `None` for blank or unusable cells.
    pub project_year: Option<u16>,
    pub quantity: f64,
    pub volunteer_hours: f64,
    pub value_rand: f64,
    pub souls: f64,
}

impl CanonicalRecord {
    /// Value of the chosen metric for this record.
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Quantity => self.quantity,
            Metric::VolunteerHours => self.volunteer_hours,
            Metric::ValueRand => self.value_rand,
            Metric::Souls => self.souls,
        }
    }
}

// ---------------------------------------------------------------------------
// CanonicalTable – the full cleaned dataset
// ---------------------------------------------------------------------------

/// The cleaned table plus the distinct value sets that populate the filter
/// controls. Immutable once built; replaced wholesale on reload.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalTable {
    /// All records, in worksheet order.
    pub records: Vec<CanonicalRecord>,
    /// Distinct project years observed (records without a year contribute
    /// nothing here).
    pub years: BTreeSet<u16>,
    /// Distinct provinces observed.
    pub provinces: BTreeSet<String>,
    /// Distinct Level 1 categories observed.
    pub categories: BTreeSet<String>,
}

impl CanonicalTable {
    /// Build the table and its distinct-value indexes from cleaned records.
    pub fn from_records(records: Vec<CanonicalRecord>) -> Self {
        let mut years = BTreeSet::new();
        let mut provinces = BTreeSet::new();
        let mut categories = BTreeSet::new();

        for rec in &records {
            if let Some(year) = rec.project_year {
                years.insert(year);
            }
            if let Some(province) = &rec.province {
                provinces.insert(province.clone());
            }
            categories.insert(rec.level1.clone());
        }

        CanonicalTable {
            records,
            years,
            provinces,
            categories,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(level1: &str, year: Option<u16>, province: Option<&str>) -> CanonicalRecord {
        CanonicalRecord {
            level1: level1.to_string(),
            level2: None,
            level3: None,
            province: province.map(str::to_string),
            project_year: year,
            quantity: 1.0,
            volunteer_hours: 2.0,
            value_rand: 3.0,
            souls: 4.0,
        }
    }

    #[test]
    fn raw_cell_number_parses_numeric_text() {
        assert_eq!(RawCell::Number(5.5).number(), Some(5.5));
        assert_eq!(RawCell::Text(" 42 ".into()).number(), Some(42.0));
        assert_eq!(RawCell::Text("n/a".into()).number(), None);
        assert_eq!(RawCell::Blank.number(), None);
        assert_eq!(RawCell::Malformed.number(), None);
    }

    #[test]
    fn metric_accessor_matches_fields() {
        let record = rec("Health", Some(2023), Some("Gauteng"));
        assert_eq!(record.metric(Metric::Quantity), 1.0);
        assert_eq!(record.metric(Metric::VolunteerHours), 2.0);
        assert_eq!(record.metric(Metric::ValueRand), 3.0);
        assert_eq!(record.metric(Metric::Souls), 4.0);
    }

    #[test]
    fn metric_labels_match_workbook_headers() {
        let labels: Vec<&str> = Metric::ALL.iter().map(|m| m.label()).collect();
        assert_eq!(
            labels,
            vec!["Quantity", "Volunteer Hours", "Value R", "Souls"]
        );
    }

    #[test]
    fn from_records_collects_distinct_values() {
        let table = CanonicalTable::from_records(vec![
            rec("Health", Some(2023), Some("Gauteng")),
            rec("Education", Some(2024), Some("Limpopo")),
            rec("Health", None, None),
            rec("Health", Some(2023), Some("Gauteng")),
        ]);

        assert_eq!(table.len(), 4);
        assert_eq!(
            table.years.iter().copied().collect::<Vec<_>>(),
            vec![2023, 2024]
        );
        assert_eq!(
            table.provinces.iter().cloned().collect::<Vec<_>>(),
            vec!["Gauteng", "Limpopo"]
        );
        assert_eq!(
            table.categories.iter().cloned().collect::<Vec<_>>(),
            vec!["Education", "Health"]
        );
    }
}
