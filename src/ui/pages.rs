use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::HABITABLE_COLOR;
use crate::data::model::{Catalog, PlanetRecord};
use crate::data::scoring::{
    self, Band, HABITABLE_THRESHOLD, PERIOD_BAND, PERIOD_WEIGHT, RADIUS_BAND, RADIUS_WEIGHT,
    TEMPERATURE_BAND, TEMPERATURE_WEIGHT,
};
use crate::data::stats;
use crate::state::{AppState, Page};
use crate::ui::{panels, plot, table};

/// Number of discovery methods charted on the dashboard.
const TOP_METHODS: usize = 8;
const MOST_HABITABLE: usize = 15;
const LARGEST_SYSTEMS: usize = 20;

/// Route the central panel to the selected page.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    if state.page == Page::About {
        about(ui);
        return;
    }

    let Some(catalog) = state.catalog.clone() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a catalog to explore planets  (File → Open…)");
        });
        return;
    };

    match state.page {
        Page::Dashboard => dashboard(ui, state, &catalog),
        Page::Explorer => explorer(ui, state),
        Page::Analytics => analytics(ui, state, &catalog),
        Page::TopDiscoveries => top_discoveries(ui, state, &catalog),
        Page::About => {}
    }
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).small());
        ui.label(RichText::new(value).size(24.0).strong());
    });
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

fn dashboard(ui: &mut Ui, state: &AppState, catalog: &Catalog) {
    let s = state.summary;
    ui.heading("Dashboard");
    ui.horizontal(|ui: &mut Ui| {
        metric(ui, "Total planets", s.total_planets.to_string());
        ui.add_space(24.0);
        metric(ui, "Host stars", s.host_stars.to_string());
        ui.add_space(24.0);
        metric(ui, "Potentially habitable", s.potentially_habitable.to_string());
        ui.add_space(24.0);
        metric(
            ui,
            "Latest discovery",
            s.latest_year.map(|y| y.to_string()).unwrap_or_else(|| "n/a".into()),
        );
    });
    ui.separator();

    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        ui.strong(format!("Discoveries per year (since {})", stats::TIMELINE_START));
        plot::timeline_chart(ui, &stats::discoveries_per_year(catalog));

        ui.columns(2, |cols| {
            cols[0].strong("Discovery methods");
            plot::category_chart(
                &mut cols[0],
                "top_methods",
                &stats::top_methods(catalog, TOP_METHODS),
                "Planets",
            );

            cols[1].strong("Planet types");
            plot::type_chart(&mut cols[1], &stats::type_distribution(catalog), &state.type_colors);
            cols[1].horizontal_wrapped(|ui: &mut Ui| {
                for (label, color) in state.type_colors.legend_entries() {
                    ui.label(RichText::new("■").color(color));
                    ui.label(label);
                }
            });
        });
    });
}

// ---------------------------------------------------------------------------
// Explorer
// ---------------------------------------------------------------------------

fn explorer(ui: &mut Ui, state: &mut AppState) {
    egui::SidePanel::left("explorer_filters")
        .default_width(240.0)
        .resizable(true)
        .show_inside(ui, |ui: &mut Ui| {
            panels::filter_panel(ui, state);
        });

    let has_results = !state.visible_indices.is_empty();
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Explorer");
        ui.add_space(12.0);
        if ui
            .add_enabled(has_results, egui::Button::new("Export CSV…"))
            .clicked()
        {
            panels::export_dialog(state);
        }
    });

    let records = state.visible_records();
    if let Some(err) = &state.query_error {
        ui.label(RichText::new(format!("Invalid filter: {err}")).color(Color32::RED));
        return;
    }
    if records.is_empty() {
        ui.label("No planets match the current filters.");
        return;
    }

    let r = stats::result_summary(&records);
    let mean = |v: Option<f64>, unit: &str| {
        v.map(|v| format!("{v:.2}{unit}")).unwrap_or_else(|| "n/a".into())
    };
    ui.horizontal(|ui: &mut Ui| {
        metric(ui, "Matching planets", r.count.to_string());
        ui.add_space(24.0);
        metric(ui, "Mean radius", mean(r.mean_radius, " R⊕"));
        ui.add_space(24.0);
        metric(ui, "Mean temperature", mean(r.mean_temperature, " K"));
        ui.add_space(24.0);
        metric(ui, "Mean habitability", mean(r.mean_score, ""));
    });
    ui.separator();

    plot::radius_temperature_scatter(ui, &records, &state.type_colors);
    ui.separator();
    table::planet_table(
        ui,
        "explorer_table",
        &records,
        &state.type_colors,
        state.config.display_limit,
    );
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

fn analytics(ui: &mut Ui, state: &AppState, catalog: &Catalog) {
    ui.heading("Analytics");
    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        ui.columns(2, |cols| {
            cols[0].strong("Discoveries by era");
            let eras: Vec<(String, usize)> = stats::era_distribution(catalog)
                .into_iter()
                .map(|(era, n)| (era.to_string(), n))
                .collect();
            plot::category_chart(&mut cols[0], "eras", &eras, "Planets");

            cols[1].strong("Habitability scores");
            plot::score_histogram_chart(&mut cols[1], &stats::score_histogram(catalog));
        });
        ui.separator();

        ui.strong(format!("Most habitable (score > {HABITABLE_THRESHOLD})"));
        let habitable = stats::most_habitable(catalog, MOST_HABITABLE);
        if habitable.is_empty() {
            ui.label("No potentially habitable planets in this catalog.");
        } else {
            table::planet_table(
                ui,
                "most_habitable",
                &habitable,
                &state.type_colors,
                MOST_HABITABLE,
            );
        }
        ui.separator();

        ui.strong("Multi-planet systems");
        let systems = stats::multi_planet_systems(catalog, LARGEST_SYSTEMS);
        if systems.is_empty() {
            ui.label("No host star has more than one planet.");
        } else {
            plot::category_chart(ui, "multi_planet_systems", &systems, "Planets");
        }
    });
}

// ---------------------------------------------------------------------------
// Top discoveries
// ---------------------------------------------------------------------------

fn top_discoveries(ui: &mut Ui, state: &AppState, catalog: &Catalog) {
    let n = state.config.top_list_len;
    ui.heading("Top Discoveries");
    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        let lists: [(&str, Vec<&PlanetRecord>); 4] = [
            ("Hottest", stats::hottest(catalog, n)),
            ("Coldest", stats::coldest(catalog, n)),
            ("Largest", stats::largest(catalog, n)),
            ("Fastest orbits", stats::fastest_orbits(catalog, n)),
        ];
        for (title, records) in lists {
            ui.strong(title);
            if records.is_empty() {
                ui.label("No planets with this measurement.");
            } else {
                table::planet_table(ui, title, &records, &state.type_colors, n);
            }
            ui.separator();
        }
    });
}

// ---------------------------------------------------------------------------
// About
// ---------------------------------------------------------------------------

fn band_row(ui: &mut Ui, name: &str, band: &Band, unit: &str, weight: f64) {
    ui.label(name);
    ui.label(format!("{} to {}{unit}", band.lower, band.upper));
    ui.label(format!(
        "0 at {} and {}{unit}",
        band.lower - band.lower_falloff,
        band.upper + band.upper_falloff
    ));
    ui.label(format!("{:.0}%", weight * 100.0));
    ui.end_row();
}

fn about(ui: &mut Ui) {
    ui.heading("About");
    ui.label(
        "Exoplanet Explorer browses planet catalogs exported from public archives. \
         Each planet gets a habitability score from 0 to 100 based on how close its \
         radius, equilibrium temperature and orbital period are to Earth-like values.",
    );
    ui.add_space(8.0);

    ui.strong("Scoring");
    ui.label(
        "Each attribute scores 100 inside its band and falls off linearly to 0. \
         Missing temperature or period contributes nothing.",
    );
    egui::Grid::new("scoring_bands")
        .num_columns(4)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.strong("Attribute");
            ui.strong("Full score");
            ui.strong("Falloff");
            ui.strong("Weight");
            ui.end_row();
            band_row(ui, "Radius", &RADIUS_BAND, " R⊕", RADIUS_WEIGHT);
            band_row(ui, "Temperature", &TEMPERATURE_BAND, " K", TEMPERATURE_WEIGHT);
            band_row(ui, "Orbital period", &PERIOD_BAND, " days", PERIOD_WEIGHT);
        });
    ui.add_space(8.0);

    let earth = scoring::score(Some(1.0), Some(255.0), Some(365.25)).unwrap_or_default();
    ui.label(
        RichText::new(format!(
            "Planets scoring above {HABITABLE_THRESHOLD} are flagged as potentially \
             habitable. Earth scores {earth}."
        ))
        .color(HABITABLE_COLOR),
    );
}
