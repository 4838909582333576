use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use super::filter::{matching_rows, FilterSelection};
use super::model::{CanonicalRecord, CanonicalTable, Metric};

// ---------------------------------------------------------------------------
// Aggregate result types
// ---------------------------------------------------------------------------

/// Totals over the filtered rows, one per dashboard card.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Kpis {
    pub quantity: f64,
    pub volunteer_hours: f64,
    pub value_rand: f64,
    pub souls: f64,
    /// Number of filtered records (projects).
    pub records: usize,
    /// Distinct Level 1 categories present in the filtered rows.
    pub categories: usize,
}

impl Kpis {
    /// Total for the chosen metric.
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Quantity => self.quantity,
            Metric::VolunteerHours => self.volunteer_hours,
            Metric::ValueRand => self.value_rand,
            Metric::Souls => self.souls,
        }
    }
}

/// One (Level 1, Level 2, Level 3) group of the hierarchy rollup. Missing
/// levels stay missing rather than being folded into a sibling group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HierarchyGroup {
    pub level1: String,
    pub level2: Option<String>,
    pub level3: Option<String>,
    /// Sum of the selected metric over the group's records.
    pub total: f64,
}

/// Per-category total for the bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Per-year total for the trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearTotal {
    pub year: u16,
    pub total: f64,
}

// ---------------------------------------------------------------------------
// DashboardView – the result of one filter + aggregate pass
// ---------------------------------------------------------------------------

/// Everything the rendering layer consumes for one selection: the filtered
/// row set, the KPI totals and the rollups weighted by `metric`. Computed
/// in a single pass and cached until the selection or metric changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Indices into the canonical table, in table order.
    #[serde(skip)]
    pub rows: Vec<usize>,
    pub metric: Metric,
    pub kpis: Kpis,
    pub hierarchy: Vec<HierarchyGroup>,
    /// Largest first, ties alphabetical.
    pub category_totals: Vec<CategoryTotal>,
    /// Ascending by year; records without a year are left out.
    pub yearly_totals: Vec<YearTotal>,
}

impl DashboardView {
    /// Iterate the filtered records in table order.
    pub fn records<'t>(
        &'t self,
        table: &'t CanonicalTable,
    ) -> impl Iterator<Item = &'t CanonicalRecord> + 't {
        self.rows.iter().map(move |&idx| &table.records[idx])
    }
}

/// Run one full filter + aggregate pass over the table.
pub fn apply(table: &CanonicalTable, selection: &FilterSelection, metric: Metric) -> DashboardView {
    let rows = matching_rows(table, selection);
    let filtered: Vec<&CanonicalRecord> = rows.iter().map(|&idx| &table.records[idx]).collect();

    DashboardView {
        kpis: compute_kpis(&filtered),
        hierarchy: rollup_hierarchy(&filtered, metric),
        category_totals: category_totals(&filtered, metric),
        yearly_totals: yearly_totals(&filtered, metric),
        metric,
        rows,
    }
}

// ---------------------------------------------------------------------------
// Aggregation passes
// ---------------------------------------------------------------------------

/// KPI totals over the given records.
pub fn compute_kpis(records: &[&CanonicalRecord]) -> Kpis {
    let mut kpis = Kpis {
        records: records.len(),
        ..Kpis::default()
    };
    let mut seen = BTreeSet::new();

    for rec in records {
        kpis.quantity += rec.quantity;
        kpis.volunteer_hours += rec.volunteer_hours;
        kpis.value_rand += rec.value_rand;
        kpis.souls += rec.souls;
        seen.insert(rec.level1.as_str());
    }

    kpis.categories = seen.len();
    kpis
}

/// Group records by their (Level 1, Level 2, Level 3) tuple, summing the
/// metric. Groups appear in first-occurrence order and every record
/// contributes to exactly one group, so the rollup total always equals the
/// KPI total for the same metric.
pub fn rollup_hierarchy(records: &[&CanonicalRecord], metric: Metric) -> Vec<HierarchyGroup> {
    let mut groups: Vec<HierarchyGroup> = Vec::new();
    let mut index: HashMap<(String, Option<String>, Option<String>), usize> = HashMap::new();

    for rec in records {
        let key = (rec.level1.clone(), rec.level2.clone(), rec.level3.clone());
        match index.get(&key) {
            Some(&pos) => groups[pos].total += rec.metric(metric),
            None => {
                index.insert(key, groups.len());
                groups.push(HierarchyGroup {
                    level1: rec.level1.clone(),
                    level2: rec.level2.clone(),
                    level3: rec.level3.clone(),
                    total: rec.metric(metric),
                });
            }
        }
    }

    groups
}

/// Per-Level-1 totals, largest first (bar chart order).
pub fn category_totals(records: &[&CanonicalRecord], metric: Metric) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for rec in records {
        *totals.entry(rec.level1.as_str()).or_default() += rec.metric(metric);
    }

    let mut out: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect();
    // stable sort on a map built alphabetically keeps ties alphabetical
    out.sort_by(|a, b| b.total.total_cmp(&a.total));
    out
}

/// Per-year totals in ascending year order. Records without a plausible
/// year are excluded here but still count toward KPIs and the rollup.
pub fn yearly_totals(records: &[&CanonicalRecord], metric: Metric) -> Vec<YearTotal> {
    let mut totals: BTreeMap<u16, f64> = BTreeMap::new();
    for rec in records {
        if let Some(year) = rec.project_year {
            *totals.entry(year).or_default() += rec.metric(metric);
        }
    }

    totals
        .into_iter()
        .map(|(year, total)| YearTotal { year, total })
        .collect()
}
