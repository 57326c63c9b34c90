use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Plot, PlotPoints, Polygon};

use crate::color::density_ramp;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Hex density map – spatial distribution within the selected hour
// ---------------------------------------------------------------------------

/// Hexagonal density overlay of the hour-filtered collisions. Cell count
/// drives the fill colour, standing in for the extruded elevation of the
/// original deck.gl layer.
pub fn density_map(ui: &mut Ui, state: &AppState) {
    let hour = state.controls.hour;
    let Some(density) = &state.views.density else {
        ui.label(format!(
            "No collisions recorded between {hour}:00 and {}:00.",
            (hour + 1) % 24
        ));
        return;
    };

    let aspect = state
        .views
        .midpoint
        .map(|(lat, _)| lat.to_radians().cos() as f32)
        .unwrap_or(1.0);

    Plot::new("density_map")
        .data_aspect(aspect)
        .x_axis_label("longitude")
        .y_axis_label("latitude")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .height(360.0)
        .show(ui, |plot_ui| {
            for cell in &density.cells {
                let t = cell.count as f64 / density.max_count as f64;
                let corners: PlotPoints =
                    density.grid.cell_corners(cell.q, cell.r).into_iter().collect();
                let polygon = Polygon::new(corners)
                    .fill_color(density_ramp(t))
                    .stroke(Stroke::new(0.5, Color32::from_black_alpha(64)));
                plot_ui.polygon(polygon);
            }
        });
}
