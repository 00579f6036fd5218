use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, Ui};

use crate::data::filter::Range;
use crate::data::model::PlanetType;
use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Left side panel – navigation and quick stats
// ---------------------------------------------------------------------------

/// Render the left navigation panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("Exoplanet Explorer");
    });
    ui.add_space(4.0);

    ui.strong("Navigation");
    for page in Page::ALL {
        ui.selectable_value(&mut state.page, page, page.title());
    }
    ui.separator();

    ui.strong("Quick stats");
    let Some(catalog) = &state.catalog else {
        ui.label("No catalog loaded.");
        return;
    };
    let s = state.summary;
    let year_span = catalog.year_span();
    egui::Grid::new("quick_stats")
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            ui.label("Total planets");
            ui.label(s.total_planets.to_string());
            ui.end_row();
            ui.label("Host stars");
            ui.label(s.host_stars.to_string());
            ui.end_row();
            ui.label("Potentially habitable");
            ui.label(s.potentially_habitable.to_string());
            ui.end_row();
            if let Some((first, last)) = year_span {
                ui.label("Discovery years");
                ui.label(format!("{first}-{last}"));
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// Explorer filter widgets
// ---------------------------------------------------------------------------

/// Render the explorer filter panel and refilter on any change.
pub fn filter_panel(ui: &mut Ui, state: &mut AppState) {
    let Some(catalog) = state.catalog.clone() else {
        return;
    };
    let defaults = state.config.filters.clone();
    let type_colors = state.type_colors.clone();
    let mut changed = false;
    let mut toggled_methods: Vec<String> = Vec::new();
    let mut toggled_types: Vec<PlanetType> = Vec::new();

    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Filters");
        if ui.small_button("Clear").clicked() {
            state.clear_filters();
        }
    });
    ui.separator();

    ScrollArea::vertical()
        .id_salt("filters")
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let criteria = &mut state.criteria;

            changed |= range_widget(ui, "Discovery year", &mut criteria.year, defaults.year, 1.0, "");
            changed |= range_widget(ui, "Radius", &mut criteria.radius, defaults.radius, 0.05, " R⊕");
            changed |= range_widget(
                ui,
                "Temperature",
                &mut criteria.temperature,
                defaults.temperature,
                5.0,
                " K",
            );

            ui.separator();
            let mut min_score = criteria.score.min.unwrap_or(0);
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Minimum habitability");
                if ui.add(DragValue::new(&mut min_score).range(0..=100)).changed() {
                    criteria.score = if min_score == 0 {
                        Range::default()
                    } else {
                        Range::at_least(min_score)
                    };
                    changed = true;
                }
            });

            ui.separator();
            let n_methods = criteria.methods.len();
            egui::CollapsingHeader::new(
                RichText::new(format!("Discovery method  ({n_methods} selected)")).strong(),
            )
            .id_salt("methods")
            .show(ui, |ui: &mut Ui| {
                for method in &catalog.methods {
                    let mut checked = criteria.methods.contains(method);
                    if ui.checkbox(&mut checked, method.as_str()).changed() {
                        toggled_methods.push(method.clone());
                    }
                }
            });

            let n_types = criteria.planet_types.len();
            egui::CollapsingHeader::new(
                RichText::new(format!("Planet type  ({n_types} selected)")).strong(),
            )
            .id_salt("planet_types")
            .show(ui, |ui: &mut Ui| {
                for planet_type in PlanetType::ALL {
                    if !catalog.planet_types.contains(&planet_type) {
                        continue;
                    }
                    let mut checked = criteria.planet_types.contains(&planet_type);
                    let text = RichText::new(planet_type.label()).color(type_colors.color_for(planet_type));
                    if ui.checkbox(&mut checked, text).changed() {
                        toggled_types.push(planet_type);
                    }
                }
            });
        });

    for method in toggled_methods {
        state.toggle_method(&method);
    }
    for planet_type in toggled_types {
        state.toggle_planet_type(planet_type);
    }
    if changed {
        state.refilter();
    }
}

/// An optional inclusive range: a checkbox enables it, two drag values edit
/// the bounds. Returns whether anything changed.
fn range_widget<T>(
    ui: &mut Ui,
    label: &str,
    range: &mut Range<T>,
    default: (T, T),
    speed: f64,
    suffix: &str,
) -> bool
where
    T: egui::emath::Numeric,
{
    let mut changed = false;
    let mut enabled = !range.is_open();
    if ui.checkbox(&mut enabled, label).changed() {
        *range = if enabled {
            Range {
                min: Some(default.0),
                max: Some(default.1),
            }
        } else {
            Range {
                min: None,
                max: None,
            }
        };
        changed = true;
    }

    if let (Some(min), Some(max)) = (range.min.as_mut(), range.max.as_mut()) {
        ui.horizontal(|ui: &mut Ui| {
            changed |= ui
                .add(DragValue::new(min).speed(speed).suffix(suffix))
                .changed();
            ui.label("to");
            changed |= ui
                .add(DragValue::new(max).speed(speed).suffix(suffix))
                .changed();
        });
    }
    changed
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
            if ui
                .add_enabled(state.catalog.is_some(), egui::Button::new("Save catalog as…"))
                .clicked()
            {
                save_catalog_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.catalog.is_some(), egui::Button::new("Export results…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(catalog) = &state.catalog {
            ui.label(format!(
                "{} planets loaded, {} matching",
                catalog.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open exoplanet catalog")
        .add_filter("Supported files", &["parquet", "pq", "json", "csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match state.open_any(&path) {
            Ok(()) => log::info!("Opened {}", path.display()),
            Err(e) => state.report_error("Failed to open file", &e),
        }
    }
}

pub fn save_catalog_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save scored catalog")
        .set_file_name(format!("{}_catalog.parquet", state.config.export_file_stem))
        .add_filter("Parquet", &["parquet"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.save_catalog(&path) {
            state.report_error("Failed to save catalog", &e);
        }
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export matching planets")
        .set_file_name(format!("{}.csv", state.config.export_file_stem))
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match state.export_visible(&path) {
            Ok(rows) => state.status_message = Some(format!("Exported {rows} planets")),
            Err(e) => state.report_error("Failed to export", &e),
        }
    }
}
