use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::color::CategoryColors;
use crate::data::aggregate::{CategoryTotal, DashboardView, HierarchyGroup, YearTotal};
use crate::data::model::{CanonicalTable, Metric};
use crate::state::AppState;

use super::panels::{format_thousands, kpi_cards};

/// Label for a missing Level 2 / Level 3 value in the rollup tree.
const MISSING_LABEL: &str = "(blank)";

/// Rows shown in the data preview, mirroring the dashboard's cap.
const PREVIEW_ROWS: usize = 200;

// ---------------------------------------------------------------------------
// Central panel – KPI cards, charts, rollup tree, preview table
// ---------------------------------------------------------------------------

/// Render the central dashboard for the current view.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let (Some(table), Some(view), Some(colors)) = (&state.table, &state.view, &state.colors)
    else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No data loaded  (File → Reload workbook)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            kpi_cards(ui, &view.kpis);
            ui.add_space(8.0);

            if view.rows.is_empty() {
                ui.label("No records match the current filters.");
                return;
            }

            ui.columns(2, |cols: &mut [Ui]| {
                category_bar_chart(&mut cols[0], &view.category_totals, view.metric, colors);
                yearly_line_chart(&mut cols[1], &view.yearly_totals, view.metric);
            });

            ui.add_space(8.0);
            hierarchy_tree(ui, view, colors);

            ui.add_space(8.0);
            preview_table(ui, table, view);
        });
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Bar chart of the metric per Level 1 category, largest first.
fn category_bar_chart(
    ui: &mut Ui,
    totals: &[CategoryTotal],
    metric: Metric,
    colors: &CategoryColors,
) {
    ui.strong(format!("{} by Level 1", metric.label()));
    Plot::new("category_bar")
        .legend(Legend::default())
        .height(240.0)
        .y_axis_label(metric.label())
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, entry) in totals.iter().enumerate() {
                let bar = Bar::new(i as f64, entry.total).width(0.6);
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .name(&entry.category)
                        .color(colors.color_for(&entry.category)),
                );
            }
        });
}

/// Line chart of the metric per project year.
fn yearly_line_chart(ui: &mut Ui, totals: &[YearTotal], metric: Metric) {
    ui.strong(format!("{} by Project Year", metric.label()));
    if totals.is_empty() {
        ui.label("No matching records carry a project year.");
        return;
    }

    let points: PlotPoints = totals
        .iter()
        .map(|t| [f64::from(t.year), t.total])
        .collect();
    let markers: PlotPoints = totals
        .iter()
        .map(|t| [f64::from(t.year), t.total])
        .collect();

    Plot::new("yearly_trend")
        .legend(Legend::default())
        .height(240.0)
        .x_axis_label("Project Year")
        .y_axis_label(metric.label())
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).name(metric.label()).width(2.0));
            plot_ui.points(Points::new(markers).radius(3.0).name(metric.label()));
        });
}

// ---------------------------------------------------------------------------
// Hierarchy rollup tree
// ---------------------------------------------------------------------------

struct CategoryNode<'a> {
    name: &'a str,
    total: f64,
    children: Vec<GroupNode<'a>>,
}

struct GroupNode<'a> {
    name: Option<&'a str>,
    total: f64,
    leaves: Vec<(Option<&'a str>, f64)>,
}

/// Nest the flat rollup into Level 1 → Level 2 → Level 3, keeping the
/// rollup's first-occurrence order at every depth.
fn assemble(groups: &[HierarchyGroup]) -> Vec<CategoryNode<'_>> {
    let mut nodes: Vec<CategoryNode> = Vec::new();

    for group in groups {
        let pos = match nodes.iter().position(|n| n.name == group.level1.as_str()) {
            Some(pos) => pos,
            None => {
                nodes.push(CategoryNode {
                    name: &group.level1,
                    total: 0.0,
                    children: Vec::new(),
                });
                nodes.len() - 1
            }
        };
        let node = &mut nodes[pos];
        node.total += group.total;

        let level2 = group.level2.as_deref();
        let child_pos = match node.children.iter().position(|c| c.name == level2) {
            Some(pos) => pos,
            None => {
                node.children.push(GroupNode {
                    name: level2,
                    total: 0.0,
                    leaves: Vec::new(),
                });
                node.children.len() - 1
            }
        };
        let child = &mut node.children[child_pos];
        child.total += group.total;
        child.leaves.push((group.level3.as_deref(), group.total));
    }

    nodes
}

/// Drill-down tree over the hierarchy rollup, with per-level subtotals.
fn hierarchy_tree(ui: &mut Ui, view: &DashboardView, colors: &CategoryColors) {
    let grand_total = view.kpis.metric(view.metric);
    ui.strong(format!(
        "Hierarchy rollup ({}: {})",
        view.metric.label(),
        format_thousands(grand_total, 0)
    ));

    for node in assemble(&view.hierarchy) {
        let header = RichText::new(format!(
            "{}  ({})",
            node.name,
            format_thousands(node.total, 0)
        ))
        .color(colors.color_for(node.name))
        .strong();

        egui::CollapsingHeader::new(header)
            .id_salt(("rollup", node.name))
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                for child in &node.children {
                    let child_name = child.name.unwrap_or(MISSING_LABEL);
                    let text = format!(
                        "{child_name}  ({})",
                        format_thousands(child.total, 0)
                    );

                    egui::CollapsingHeader::new(text)
                        .id_salt(("rollup", node.name, child_name))
                        .default_open(false)
                        .show(ui, |ui: &mut Ui| {
                            for (leaf, total) in &child.leaves {
                                ui.horizontal(|ui: &mut Ui| {
                                    ui.label(leaf.unwrap_or(MISSING_LABEL));
                                    ui.label(
                                        RichText::new(format_thousands(*total, 0)).weak(),
                                    );
                                });
                            }
                        });
                }
            });
    }
}

// ---------------------------------------------------------------------------
// Data preview table
// ---------------------------------------------------------------------------

/// First rows of the filtered table.
fn preview_table(ui: &mut Ui, table: &CanonicalTable, view: &DashboardView) {
    let shown = view.rows.len().min(PREVIEW_ROWS);
    ui.strong(format!("Data preview ({} of {} rows)", shown, view.rows.len()));

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .columns(Column::auto().at_least(60.0), 9)
        .header(20.0, |mut header| {
            let titles = [
                "Level 1",
                "Level 2",
                "Level 3",
                "Province",
                "Year",
                "Quantity",
                "Hours",
                "Value R",
                "Souls",
            ];
            for title in titles {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, shown, |mut row| {
                let record = &table.records[view.rows[row.index()]];
                row.col(|ui: &mut Ui| {
                    ui.label(record.level1.as_str());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(record.level2.as_deref().unwrap_or(""));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(record.level3.as_deref().unwrap_or(""));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(record.province.as_deref().unwrap_or(""));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(
                        record
                            .project_year
                            .map(|year| year.to_string())
                            .unwrap_or_default(),
                    );
                });
                row.col(|ui: &mut Ui| {
                    ui.label(record.quantity.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(record.volunteer_hours.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(record.value_rand.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(record.souls.to_string());
                });
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(
        level1: &str,
        level2: Option<&str>,
        level3: Option<&str>,
        total: f64,
    ) -> HierarchyGroup {
        HierarchyGroup {
            level1: level1.to_string(),
            level2: level2.map(str::to_string),
            level3: level3.map(str::to_string),
            total,
        }
    }

    #[test]
    fn assemble_nests_and_subtotals_in_rollup_order() {
        let groups = vec![
            group("Health", Some("Clinics"), Some("Checkups"), 10.0),
            group("Education", Some("Schools"), Some("Tutoring"), 3.0),
            group("Health", Some("Clinics"), Some("Screenings"), 5.0),
            group("Health", Some("Camps"), None, 2.0),
        ];

        let nodes = assemble(&groups);
        assert_eq!(nodes.len(), 2);

        let health = &nodes[0];
        assert_eq!(health.name, "Health");
        assert_eq!(health.total, 17.0);
        assert_eq!(health.children.len(), 2);
        assert_eq!(health.children[0].name, Some("Clinics"));
        assert_eq!(health.children[0].total, 15.0);
        assert_eq!(health.children[0].leaves.len(), 2);
        assert_eq!(health.children[1].leaves, vec![(None, 2.0)]);

        assert_eq!(nodes[1].name, "Education");
    }

    #[test]
    fn assemble_keeps_missing_levels_distinct() {
        let groups = vec![
            group("Health", None, None, 4.0),
            group("Health", Some("Clinics"), None, 6.0),
        ];

        let nodes = assemble(&groups);
        assert_eq!(nodes[0].children.len(), 2);
        assert_eq!(nodes[0].children[0].name, None);
        assert_eq!(nodes[0].children[1].name, Some("Clinics"));
        assert_eq!(nodes[0].total, 10.0);
    }
}
