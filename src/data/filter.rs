use std::collections::BTreeSet;

use super::model::{CanonicalRecord, CanonicalTable};

// ---------------------------------------------------------------------------
// FilterSelection – which facet values are selected
// ---------------------------------------------------------------------------

/// The user's facet selection. An empty set means "no constraint" for that
/// facet, so the default selection shows the entire table. Selections are
/// plain values handed to [`matching_rows`] per interaction; nothing here
/// is shared or mutated during a pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    pub years: BTreeSet<u16>,
    pub provinces: BTreeSet<String>,
    pub categories: BTreeSet<String>,
}

impl FilterSelection {
    /// True when no facet constrains anything.
    pub fn is_unfiltered(&self) -> bool {
        self.years.is_empty() && self.provinces.is_empty() && self.categories.is_empty()
    }

    /// Conjunction over the three facets. A record missing its year or
    /// province fails that facet whenever the facet is constrained; there
    /// is no way to select "blank".
    pub fn matches(&self, record: &CanonicalRecord) -> bool {
        let year_ok = self.years.is_empty()
            || record
                .project_year
                .is_some_and(|year| self.years.contains(&year));
        let province_ok = self.provinces.is_empty()
            || record
                .province
                .as_deref()
                .is_some_and(|province| self.provinces.contains(province));
        let category_ok =
            self.categories.is_empty() || self.categories.contains(record.level1.as_str());

        year_ok && province_ok && category_ok
    }
}

/// Indices of the records passing the selection, in table order.
pub fn matching_rows(table: &CanonicalTable, selection: &FilterSelection) -> Vec<usize> {
    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| selection.matches(record))
        .map(|(idx, _)| idx)
        .collect()
}
