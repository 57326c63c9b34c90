use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::category_color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Street table – worst collisions for the selected category
// ---------------------------------------------------------------------------

/// Ranked table of the worst collisions for the selected affected-party
/// category.
pub fn street_table(ui: &mut Ui, state: &AppState) {
    let category = state.controls.category;
    let rows = &state.views.top_streets;
    if rows.is_empty() {
        ui.label(format!(
            "No {} injuries in the dataset.",
            category.to_string().to_lowercase()
        ));
        return;
    }

    TableBuilder::new(ui)
        .id_salt("street_table")
        .striped(true)
        .vscroll(false)
        .column(Column::remainder())
        .column(Column::auto())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("on street name");
            });
            header.col(|ui| {
                ui.strong(RichText::new(category.column_label()).color(category_color(category)));
            });
        })
        .body(|mut body| {
            body.rows(18.0, rows.len(), |mut row| {
                let entry = &rows[row.index()];
                row.col(|ui| {
                    ui.label(&entry.street);
                });
                row.col(|ui| {
                    ui.label(entry.injured.to_string());
                });
            });
        });
}

// ---------------------------------------------------------------------------
// Raw data table – the hour-filtered rows
// ---------------------------------------------------------------------------

/// All columns of the hour-filtered collisions, virtualised so a full
/// dataset stays responsive.
pub fn raw_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let view = &state.views.hour_view;

    let headers = [
        "date/time",
        "latitude",
        "longitude",
        "number of persons injured",
        "number of pedestrians injured",
        "number of cyclist injured",
        "number of motorist injured",
        "on street name",
    ];

    TableBuilder::new(ui)
        .id_salt("raw_table")
        .striped(true)
        .max_scroll_height(320.0)
        .columns(Column::auto(), headers.len() - 1)
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in headers {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            body.rows(18.0, view.len(), |mut row| {
                let r = &dataset.records[view[row.index()]];
                row.col(|ui| {
                    ui.label(r.datetime.format("%Y-%m-%d %H:%M").to_string());
                });
                row.col(|ui| {
                    ui.label(format!("{:.5}", r.latitude));
                });
                row.col(|ui| {
                    ui.label(format!("{:.5}", r.longitude));
                });
                row.col(|ui| {
                    ui.label(r.persons_injured.to_string());
                });
                row.col(|ui| {
                    ui.label(r.pedestrians_injured.to_string());
                });
                row.col(|ui| {
                    ui.label(r.cyclists_injured.to_string());
                });
                row.col(|ui| {
                    ui.label(r.motorists_injured.to_string());
                });
                row.col(|ui| {
                    ui.label(r.street.as_deref().unwrap_or("—"));
                });
            });
        });
}
