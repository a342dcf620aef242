use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui, vec2};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::color::outcome_color;
use crate::data::model::Outcome;
use crate::data::views::{DerivedViews, SuccessSummary};
use crate::state::AppState;

const EMPTY_PLACEHOLDER: &str = "No launches match the current filters.";
const NO_SUCCESS_PLACEHOLDER: &str = "No successful launches in the current selection.";

// ---------------------------------------------------------------------------
// Success summary pie (top of the central panel)
// ---------------------------------------------------------------------------

/// Text drawn instead of the pie, or `None` when there is something to draw.
/// A subset of failures alone still matches the filters.
pub fn pie_placeholder(views: &DerivedViews) -> Option<&'static str> {
    if views.subset_len == 0 {
        Some(EMPTY_PLACEHOLDER)
    } else if views.summary.is_empty() {
        Some(NO_SUCCESS_PLACEHOLDER)
    } else {
        None
    }
}

/// Render the success summary as a pie chart with a legend beside it.
pub fn success_pie(ui: &mut Ui, state: &AppState, height: f32) {
    let views = &state.views;
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(views.summary_title.as_str());
    });

    if let Some(text) = pie_placeholder(views) {
        ui.allocate_ui(vec2(ui.available_width(), height), |ui: &mut Ui| {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label(text);
            });
        });
        return;
    }

    let slices = colored_slices(&views.summary, state);
    let total = views.summary.total() as f32;

    ui.horizontal(|ui: &mut Ui| {
        let size = height.min(ui.available_width() * 0.6);
        let (response, painter) = ui.allocate_painter(vec2(size, size), Sense::hover());
        let center = response.rect.center();
        let radius = size * 0.45;

        // Start at twelve o'clock, go clockwise.
        let mut start = -FRAC_PI_2;
        for (_, count, color) in &slices {
            if *count == 0 {
                continue;
            }
            let sweep = TAU * *count as f32 / total;
            draw_wedge(&painter, center, radius, start, sweep, *color);

            let mid = start + sweep / 2.0;
            painter.text(
                center + radius * 0.65 * vec2(mid.cos(), mid.sin()),
                Align2::CENTER_CENTER,
                format!("{:.1}%", 100.0 * *count as f32 / total),
                FontId::proportional(13.0),
                Color32::WHITE,
            );
            start += sweep;
        }

        ui.vertical(|ui: &mut Ui| {
            for (label, count, color) in &slices {
                ui.horizontal(|ui: &mut Ui| {
                    swatch(ui, *color);
                    ui.label(format!("{label}: {count}"));
                });
            }
        });
    });
}

fn colored_slices(summary: &SuccessSummary, state: &AppState) -> Vec<(String, usize, Color32)> {
    match summary {
        SuccessSummary::BySite(_) => summary
            .slices()
            .into_iter()
            .map(|(site, n)| {
                let c = state.site_colors.color_for(&site);
                (site, n, c)
            })
            .collect(),
        // slices() lists success before failure.
        SuccessSummary::SiteOutcomes { .. } => summary
            .slices()
            .into_iter()
            .zip([Outcome::Success, Outcome::Failure])
            .map(|((label, n), outcome)| (label, n, outcome_color(outcome)))
            .collect(),
    }
}

/// Fill a pie wedge.  Split into pieces of at most a quarter turn so every
/// polygon handed to the painter stays convex.
fn draw_wedge(
    painter: &egui::Painter,
    center: Pos2,
    radius: f32,
    start: f32,
    sweep: f32,
    color: Color32,
) {
    const ARC_SEGMENTS: usize = 16;
    let pieces = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / pieces as f32;

    for k in 0..pieces {
        let a0 = start + step * k as f32;
        let mut points = Vec::with_capacity(ARC_SEGMENTS + 2);
        points.push(center);
        for j in 0..=ARC_SEGMENTS {
            let a = a0 + step * j as f32 / ARC_SEGMENTS as f32;
            points.push(center + radius * vec2(a.cos(), a.sin()));
        }
        painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
    }
}

fn swatch(ui: &mut Ui, color: Color32) {
    let (response, painter) = ui.allocate_painter(vec2(12.0, 12.0), Sense::hover());
    painter.rect_filled(response.rect, 2.0, color);
}

// ---------------------------------------------------------------------------
// Payload vs. outcome strip chart (bottom of the central panel)
// ---------------------------------------------------------------------------

/// Render the correlation view: payload mass on x, class (0/1) on y, one
/// series per booster version category.
pub fn correlation_strip(ui: &mut Ui, state: &AppState) {
    let views = &state.views;
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(views.correlation_title.as_str());
    });

    if views.correlation.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(EMPTY_PLACEHOLDER);
        });
        return;
    }

    let dataset = state.dataset();

    Plot::new("correlation_plot")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_x(dataset.payload_min())
        .include_x(dataset.payload_max())
        .include_y(-0.5)
        .include_y(1.5)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (category, points) in views.correlation.by_category() {
                let series: PlotPoints = points
                    .iter()
                    .map(|p| {
                        [
                            p.payload_mass_kg,
                            f64::from(p.outcome.class()) + strip_jitter(p.payload_mass_kg),
                        ]
                    })
                    .collect();

                plot_ui.points(
                    Points::new(series)
                        .name(category)
                        .color(state.category_colors.color_for(category))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });
}

/// Vertical offset within ±0.15 so launches with equal class do not sit on
/// one line.  Derived from the payload so points stay put between frames.
pub fn strip_jitter(payload_mass_kg: f64) -> f64 {
    let bucket = (payload_mass_kg.to_bits().wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 54) as f64;
    (bucket / 1023.0 - 0.5) * 0.3
}
