use eframe::egui;

use crate::state::AppState;
use crate::ui::{chart, density, map, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CollisionApp {
    pub state: AppState,
}

impl CollisionApp {
    /// Create the app and load the default dataset.
    pub fn new() -> Self {
        let mut state = AppState::default();
        state.load_default();
        Self { state }
    }
}

impl eframe::App for CollisionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("control_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: dashboard sections ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    let message = self
                        .state
                        .status_message
                        .clone()
                        .unwrap_or_else(|| {
                            "Open a data file to explore collisions  (File → Open…)".to_string()
                        });
                    ui.heading(message);
                });
                return;
            }

            let hour = self.state.controls.hour;
            let next_hour = (hour + 1) % 24;

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut egui::Ui| {
                    ui.heading("Motor Vehicle Collisions in NYC");
                    ui.label("Explore motor vehicle collisions in New York City.");
                    ui.separator();

                    ui.heading("Where are the most people injured?");
                    map::injury_map(ui, &self.state);
                    ui.add_space(12.0);

                    ui.heading("How many collisions occur during a given time of day?");
                    ui.label(format!(
                        "Vehicle collisions between {hour}:00 and {next_hour}:00"
                    ));
                    density::density_map(ui, &self.state);
                    ui.add_space(12.0);

                    ui.strong(format!(
                        "Breakdown by minute between {hour}:00 and {next_hour}:00"
                    ));
                    chart::minute_chart(ui, &self.state);
                    ui.add_space(12.0);

                    ui.heading("Top 5 dangerous streets by affected type");
                    table::street_table(ui, &self.state);

                    if self.state.controls.show_raw {
                        ui.add_space(12.0);
                        ui.strong("Raw Data");
                        table::raw_table(ui, &self.state);
                    }
                });
        });
    }
}
