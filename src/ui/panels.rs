use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::outcome_color;
use crate::config::DASHBOARD_TITLE;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter controls
// ---------------------------------------------------------------------------

/// Render the site selector and payload range controls.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // ---- Launch site ----
    ui.strong("Launch Site");
    let mut picked = None;
    egui::ComboBox::from_id_salt("site_selector")
        .selected_text(state.site.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in state.site_options() {
                if ui
                    .selectable_label(option == state.site, option.label())
                    .clicked()
                {
                    picked = Some(option);
                }
            }
        });
    if let Some(site) = picked {
        state.set_site(site);
    }
    ui.add_space(8.0);

    // ---- Payload range ----
    ui.strong("Payload Range (kg)");
    let min = state.dataset().payload_min();
    let max = state.dataset().payload_max();

    let mut lo = state.range_lo;
    if ui
        .add(egui::Slider::new(&mut lo, min..=max).text("min").fixed_decimals(0))
        .changed()
    {
        state.set_range_lo(lo);
    }

    let mut hi = state.range_hi;
    if ui
        .add(egui::Slider::new(&mut hi, min..=max).text("max").fixed_decimals(0))
        .changed()
    {
        state.set_range_hi(hi);
    }

    if ui.small_button("Full range").clicked() {
        state.reset_range();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the dashboard header and record counts.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new(DASHBOARD_TITLE).size(28.0).strong());
    });

    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!(
            "{} launches loaded, {} shown",
            state.dataset().len(),
            state.views.subset_len
        ));

        if let Ok(criteria) = state.criteria() {
            ui.separator();
            ui.label(format!(
                "{}, {:.0} to {:.0} kg",
                criteria.site.label(),
                criteria.range.lo(),
                criteria.range.hi()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Right side panel – filtered launches
// ---------------------------------------------------------------------------

/// Table of the launches behind the current views.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    ui.heading("Launches");
    ui.separator();

    let points = &state.views.correlation.points;
    if points.is_empty() {
        ui.label("No launches match the current filters.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Site", "Payload (kg)", "Outcome", "Booster"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, points.len(), |mut row| {
                let p = &points[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(p.launch_site.as_str());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.0}", p.payload_mass_kg));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(RichText::new(p.outcome.to_string()).color(outcome_color(p.outcome)));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(p.booster_version_category.as_str());
                });
            });
        });
}
