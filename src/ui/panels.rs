use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color;
use crate::state::{AppState, ModelSlot, Tab};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open dataset…").clicked() {
                open_dataset_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(!state.model.is_loaded(), egui::Button::new("Load model…"))
                .clicked()
            {
                open_model_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(session) = &state.session {
            ui.label(format!(
                "{} rows × {} columns, target '{}'",
                session.table.n_rows(),
                session.table.n_cols(),
                session.schema.target_column()
            ));
        }

        if let Some(artifact) = state.model.artifact() {
            ui.separator();
            ui.label(format!("model: {}", artifact.name));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

/// Render the tab selector row.
pub fn tab_strip(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            if ui.selectable_label(state.tab == tab, tab.label()).clicked() {
                state.tab = tab;
            }
        }
    });
}

fn empty_hint(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Open a dataset to get started  (File → Open dataset…)");
    });
}

// ---------------------------------------------------------------------------
// Statistics tab
// ---------------------------------------------------------------------------

/// Summary grid: min / max / mean plus value counts per numeric column.
pub fn statistics_tab(ui: &mut Ui, state: &mut AppState) {
    let Some(session) = &state.session else {
        empty_hint(ui);
        return;
    };

    ui.label(format!(
        "{} feature columns predict '{}'. Aggregates cover non-missing values only.",
        session.schema.feature_columns().len(),
        session.schema.target_column()
    ));
    ui.add_space(6.0);

    if session.summary.is_empty() {
        ui.label("No numeric columns to summarize.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(120.0).resizable(true))
        .columns(Column::remainder(), 5)
        .header(22.0, |mut header| {
            for title in ["column", "min", "max", "mean", "present", "missing"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for (name, summary) in session.summary.iter() {
                body.row(20.0, |mut row| {
                    row.col(|ui| {
                        ui.label(name);
                    });
                    match &summary.stats {
                        Some(stats) => {
                            for value in [stats.min, stats.max, stats.mean] {
                                row.col(|ui| {
                                    ui.monospace(format!("{value:.2}"));
                                });
                            }
                        }
                        None => {
                            for _ in 0..3 {
                                row.col(|ui| {
                                    ui.monospace("--");
                                });
                            }
                        }
                    }
                    row.col(|ui| {
                        ui.monospace(summary.present.to_string());
                    });
                    row.col(|ui| {
                        ui.monospace(summary.missing.to_string());
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Correlation tab
// ---------------------------------------------------------------------------

/// Annotated heatmap over the numeric columns.
pub fn correlation_tab(ui: &mut Ui, state: &mut AppState) {
    let Some(session) = &state.session else {
        empty_hint(ui);
        return;
    };

    let matrix = &session.correlation;
    if matrix.len() < 2 {
        ui.label("Correlations need at least two numeric columns.");
        return;
    }

    ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("correlation_grid")
                .spacing([4.0, 4.0])
                .show(ui, |ui: &mut Ui| {
                    ui.label("");
                    for name in matrix.columns() {
                        ui.strong(name);
                    }
                    ui.end_row();

                    for (i, name) in matrix.columns().iter().enumerate() {
                        ui.strong(name);
                        for j in 0..matrix.len() {
                            correlation_cell(ui, matrix.at(i, j));
                        }
                        ui.end_row();
                    }
                });
        });
}

fn correlation_cell(ui: &mut Ui, r: f64) {
    if r.is_nan() {
        ui.monospace("  --  ");
        return;
    }
    let background = color::correlation_color(r);
    ui.label(
        RichText::new(format!(" {r:+.2} "))
            .monospace()
            .background_color(background)
            .color(color::contrast_text(background)),
    );
}

// ---------------------------------------------------------------------------
// Predict tab
// ---------------------------------------------------------------------------

/// One numeric input per feature column, seeded with the column means.
pub fn predict_tab(ui: &mut Ui, state: &mut AppState) {
    match &state.model {
        ModelSlot::Empty => {
            ui.label("No model loaded  (File → Load model…).");
        }
        ModelSlot::Failed(msg) => {
            ui.colored_label(Color32::RED, format!("Model load failed: {msg}"));
            ui.label("Pick the artifact again from File → Load model…");
        }
        ModelSlot::Loaded(artifact) => {
            ui.label(format!(
                "Model '{}' predicts '{}' from {} features.",
                artifact.name,
                artifact.target,
                artifact.n_features()
            ));
        }
    }
    ui.separator();

    {
        let Some(session) = &mut state.session else {
            empty_hint(ui);
            return;
        };

        if session.schema.feature_columns().is_empty() {
            ui.label("The dataset has no feature columns to predict from.");
            return;
        }
        if !session.schema.features_all_numeric() {
            ui.label("Prediction needs numeric features; this dataset has categorical feature columns.");
            return;
        }

        egui::Grid::new("predict_inputs")
            .num_columns(2)
            .spacing([16.0, 6.0])
            .show(ui, |ui: &mut Ui| {
                for (name, value) in session
                    .schema
                    .feature_columns()
                    .iter()
                    .zip(session.inputs.iter_mut())
                {
                    ui.label(name);
                    ui.add(egui::DragValue::new(value).speed(0.1));
                    ui.end_row();
                }
            });
    }

    ui.add_space(8.0);

    if ui
        .add_enabled(state.model.is_loaded(), egui::Button::new("Predict"))
        .clicked()
    {
        state.run_prediction();
    }

    if let Some(session) = &state.session {
        if let Some(value) = session.last_prediction {
            ui.add_space(8.0);
            ui.heading(
                RichText::new(format!(
                    "{} ≈ {value:.2}",
                    session.schema.target_column()
                ))
                .color(color::success()),
            );
        }
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_dataset_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open dataset")
        .add_filter("Tabular data", &["csv", "tsv", "tab", "json", "parquet", "pq"])
        .add_filter("Delimited text", &["csv", "tsv", "tab"])
        .add_filter("JSON records", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(table) => {
                log::info!(
                    "loaded {} rows × {} columns from {}",
                    table.n_rows(),
                    table.n_cols(),
                    path.display()
                );
                state.set_dataset(table);
            }
            Err(e) => {
                log::error!("failed to load dataset: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn open_model_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Load model artifact")
        .add_filter("Model artifact", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.load_model(&path);
    }
}
