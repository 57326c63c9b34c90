use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::InjuryCategory;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    let mut changed = false;

    ui.strong("Number of persons injured");
    changed |= ui
        .add(egui::Slider::new(
            &mut state.controls.injured_min,
            0..=dataset.max_persons_injured,
        ))
        .changed();
    ui.add_space(8.0);

    ui.strong("Hour to look at");
    changed |= ui
        .add(egui::Slider::new(&mut state.controls.hour, 0..=23))
        .changed();
    ui.add_space(8.0);

    ui.strong("Affected type of people");
    let current = state.controls.category;
    egui::ComboBox::from_id_salt("affected_category")
        .selected_text(current.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for category in InjuryCategory::ALL {
                if ui
                    .selectable_label(current == category, category.to_string())
                    .clicked()
                {
                    state.controls.category = category;
                    changed = true;
                }
            }
        });

    // Derived views are recomputed only when a control actually moved.
    if changed {
        state.recompute();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} collisions loaded, {} at {}:00",
                ds.len(),
                state.views.hour_view.len(),
                state.controls.hour
            ));
        }

        ui.separator();

        if ui
            .selectable_label(state.controls.show_raw, "Show Raw Data")
            .clicked()
        {
            state.controls.show_raw = !state.controls.show_raw;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open collision data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.open(path);
    }
}
