use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::{TypeColors, score_color};
use crate::data::model::PlanetRecord;

// ---------------------------------------------------------------------------
// Planet table
// ---------------------------------------------------------------------------

const ROW_HEIGHT: f32 = 18.0;

fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(String::new, |v| format!("{v:.decimals$}"))
}

/// Render planets as a striped, scrollable table. At most `limit` rows are
/// shown.
pub fn planet_table(
    ui: &mut Ui,
    id: &str,
    records: &[&PlanetRecord],
    colors: &TypeColors,
    limit: usize,
) {
    let shown = records.len().min(limit);
    if shown < records.len() {
        ui.label(format!("Showing the first {shown} of {} planets.", records.len()));
    }

    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(140.0))
            .columns(Column::auto().at_least(60.0), 7)
            .column(Column::remainder())
            .header(20.0, |mut header| {
                for title in [
                    "Planet",
                    "Method",
                    "Year",
                    "Type",
                    "Radius (R⊕)",
                    "Mass (M⊕)",
                    "Temp (K)",
                    "Period (days)",
                    "Habitability",
                ] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, shown, |mut row| {
                    let r = records[row.index()];
                    row.col(|ui: &mut Ui| {
                        ui.label(r.name());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(r.method().unwrap_or("—"));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(r.year().map(|y| y.to_string()).unwrap_or_default());
                    });
                    row.col(|ui: &mut Ui| {
                        let t = r.planet_type();
                        ui.label(RichText::new(t.label()).color(colors.color_for(t)));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.2}", r.radius()));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(fmt_opt(r.mass(), 2));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(fmt_opt(r.temperature(), 0));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(fmt_opt(r.period(), 2));
                    });
                    row.col(|ui: &mut Ui| {
                        let score = r.habitability();
                        ui.label(RichText::new(score.to_string()).color(score_color(score)));
                    });
                });
            });
    });
}
