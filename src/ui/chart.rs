use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Minute chart – crashes per minute within the selected hour
// ---------------------------------------------------------------------------

/// Bar chart of crash counts per minute, 60 fixed buckets.
pub fn minute_chart(ui: &mut Ui, state: &AppState) {
    let bars: Vec<Bar> = state
        .views
        .minute_counts
        .iter()
        .enumerate()
        .map(|(minute, &crashes)| Bar::new(minute as f64, crashes as f64).width(0.9))
        .collect();

    Plot::new("minute_chart")
        .x_axis_label("minute")
        .y_axis_label("crashes")
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .height(300.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::LIGHT_BLUE));
        });
}
