use eframe::egui;

use crate::state::{AppState, Tab};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct InferboardApp {
    pub state: AppState,
}

impl Default for InferboardApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl eframe::App for InferboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: tab strip + active tab ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::tab_strip(ui, &mut self.state);
            ui.separator();
            match self.state.tab {
                Tab::Statistics => panels::statistics_tab(ui, &mut self.state),
                Tab::Correlation => panels::correlation_tab(ui, &mut self.state),
                Tab::Distribution => plot::distribution_tab(ui, &mut self.state),
                Tab::Predict => panels::predict_tab(ui, &mut self.state),
            }
        });
    }
}
