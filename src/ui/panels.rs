use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::aggregate::Kpis;
use crate::data::model::Metric;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Reload workbook").clicked() {
                state.load();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Export filtered CSV").clicked() {
                state.export_csv();
                ui.close_menu();
            }
            if ui.button("Export summary JSON").clicked() {
                state.export_summary();
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(table), Some(view)) = (&state.table, &state.view) {
            ui.label(format!(
                "{} records loaded, {} matching",
                table.len(),
                view.rows.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – metric selector and facet filters
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(table) = &state.table else {
        ui.label("No workbook loaded.");
        return;
    };

    // Clone the facet values so we can mutate state inside the loops.
    let years: Vec<u16> = table.years.iter().copied().collect();
    let provinces: Vec<String> = table.provinces.iter().cloned().collect();
    let categories: Vec<String> = table.categories.iter().cloned().collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Metric selector ----
            ui.strong("Metric");
            egui::ComboBox::from_id_salt("metric_select")
                .selected_text(state.metric.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for metric in Metric::ALL {
                        if ui
                            .selectable_label(state.metric == metric, metric.label())
                            .clicked()
                        {
                            state.set_metric(metric);
                        }
                    }
                });
            ui.separator();

            // ---- Project Year ----
            let header = facet_header("Project Year", &state.selection.years, years.len());
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("facet_years")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    if ui.small_button("All").clicked() {
                        state.clear_years();
                    }
                    for year in &years {
                        let mut checked = state.selection.years.is_empty()
                            || state.selection.years.contains(year);
                        if ui.checkbox(&mut checked, year.to_string()).changed() {
                            state.toggle_year(*year);
                        }
                    }
                });

            // ---- Province ----
            let header = facet_header("Province", &state.selection.provinces, provinces.len());
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("facet_provinces")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    if ui.small_button("All").clicked() {
                        state.clear_provinces();
                    }
                    for province in &provinces {
                        let mut checked = state.selection.provinces.is_empty()
                            || state.selection.provinces.contains(province);
                        if ui.checkbox(&mut checked, province.as_str()).changed() {
                            state.toggle_province(province);
                        }
                    }
                });

            // ---- Level 1 category ----
            let header = facet_header("Level 1", &state.selection.categories, categories.len());
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("facet_categories")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    if ui.small_button("All").clicked() {
                        state.clear_categories();
                    }
                    for category in &categories {
                        let mut checked = state.selection.categories.is_empty()
                            || state.selection.categories.contains(category);
                        let mut text = RichText::new(category.as_str());
                        if let Some(colors) = &state.colors {
                            text = text.color(colors.color_for(category));
                        }
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_category(category);
                        }
                    }
                });

            ui.separator();
            let reset = egui::Button::new("Reset filters");
            if ui
                .add_enabled(!state.selection.is_unfiltered(), reset)
                .clicked()
            {
                state.reset_filters();
            }
        });
}

/// Facet header with its shown/total count; an empty selection shows all.
fn facet_header<T>(name: &str, selected: &BTreeSet<T>, total: usize) -> String {
    let shown = if selected.is_empty() {
        total
    } else {
        selected.len()
    };
    format!("{name}  ({shown}/{total})")
}

// ---------------------------------------------------------------------------
// KPI cards
// ---------------------------------------------------------------------------

/// Render the row of KPI cards above the charts.
pub fn kpi_cards(ui: &mut Ui, kpis: &Kpis) {
    ui.columns(5, |cols: &mut [Ui]| {
        kpi_card(&mut cols[0], "Total Quantity", format_thousands(kpis.quantity, 2));
        kpi_card(
            &mut cols[1],
            "Volunteer Hours",
            format_thousands(kpis.volunteer_hours, 0),
        );
        kpi_card(
            &mut cols[2],
            "Total Value (R)",
            format_thousands(kpis.value_rand, 2),
        );
        kpi_card(&mut cols[3], "Souls", format_thousands(kpis.souls, 0));
        kpi_card(&mut cols[4], "Projects", kpis.records.to_string());
    });
}

fn kpi_card(ui: &mut Ui, title: &str, value: String) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(RichText::new(title).small().strong());
            ui.label(RichText::new(value).size(20.0).strong());
        });
    });
}

/// Format with thousands separators and a fixed number of decimals.
pub(crate) fn format_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{value:.decimals$}");
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = format!("{sign}{grouped}");
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}
