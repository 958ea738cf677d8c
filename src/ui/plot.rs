use eframe::egui::{self, Ui};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints};

use crate::color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Distribution tab (histogram + density overlay)
// ---------------------------------------------------------------------------

/// Render the distribution of one selectable numeric column.
pub fn distribution_tab(ui: &mut Ui, state: &mut AppState) {
    let Some(session) = &mut state.session else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a dataset to plot distributions  (File → Open dataset…)");
        });
        return;
    };

    if session.schema.numeric_columns().is_empty() {
        ui.label("No numeric columns to plot.");
        return;
    }

    // ---- Column selector ----
    let current = session.selected_column.clone().unwrap_or_default();
    let mut chosen: Option<String> = None;
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Column");
        egui::ComboBox::from_id_salt("distribution_column")
            .selected_text(&current)
            .show_ui(ui, |ui: &mut Ui| {
                for col in session.schema.numeric_columns() {
                    if ui.selectable_label(current == *col, col).clicked() {
                        chosen = Some(col.clone());
                    }
                }
            });
    });
    if let Some(col) = chosen {
        if let Err(e) = session.select_column(col) {
            log::error!("distribution unavailable: {e}");
            state.status_message = Some(format!("Error: {e}"));
            return;
        }
    }

    let Some(dist) = &session.distribution else {
        ui.label("Select a column to plot.");
        return;
    };

    if dist.sample_count == 0 {
        ui.label(format!("'{}' has no non-missing values to plot.", dist.column));
        return;
    }

    ui.label(format!(
        "Distribution of {}  ({} values, {} bins)",
        dist.column,
        dist.sample_count,
        dist.bins.len()
    ));

    let bars: Vec<Bar> = dist
        .bins
        .iter()
        .map(|bin| Bar::new(bin.center(), bin.count as f64).width(bin.width()))
        .collect();
    let chart = BarChart::new(bars)
        .name(&dist.column)
        .color(color::histogram_fill());

    // The stored curve integrates to one; stretch it onto the count axis.
    let scale = dist.sample_count as f64 * dist.bin_width();
    let points: PlotPoints = dist
        .density
        .iter()
        .map(|&[x, d]| [x, d * scale])
        .collect();
    let curve = Line::new(points)
        .name("density")
        .color(color::density_stroke())
        .width(2.0);

    Plot::new("distribution_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label(dist.column.as_str())
        .y_axis_label("Count")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
            plot_ui.line(curve);
        });
}
