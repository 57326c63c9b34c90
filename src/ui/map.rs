use eframe::egui::{Color32, Ui};
use egui_plot::{Plot, PlotPoints, Points};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Injury map – scatter of collisions above the threshold
// ---------------------------------------------------------------------------

/// Scatter map of collisions with at least the selected number of persons
/// injured.
pub fn injury_map(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    let view = &state.views.injured_view;

    let positions: PlotPoints = view
        .iter()
        .map(|&i| {
            let r = &dataset.records[i];
            [r.longitude, r.latitude]
        })
        .collect();

    // Shrink longitude degrees so distances read roughly true at this
    // latitude.
    let aspect = view
        .first()
        .map(|&i| dataset.records[i].latitude.to_radians().cos() as f32)
        .unwrap_or(1.0);

    Plot::new("injury_map")
        .data_aspect(aspect)
        .x_axis_label("longitude")
        .y_axis_label("latitude")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .height(360.0)
        .show(ui, |plot_ui| {
            let points = Points::new(positions)
                .radius(1.5)
                .color(Color32::LIGHT_BLUE);
            plot_ui.points(points);
        });
}
