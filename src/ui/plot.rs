use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};

use crate::color::{self, TypeColors, generate_palette};
use crate::data::model::{PlanetRecord, PlanetType};

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

const CHART_HEIGHT: f32 = 300.0;

/// Label for an integer-valued axis mark, empty between categories.
fn category_label(labels: &[String], value: f64) -> String {
    if value.fract() != 0.0 || value < 0.0 {
        return String::new();
    }
    labels.get(value as usize).cloned().unwrap_or_default()
}

/// Discoveries per year.
pub fn timeline_chart(ui: &mut Ui, per_year: &[(i32, usize)]) {
    let bars: Vec<Bar> = per_year
        .iter()
        .map(|&(year, n)| Bar::new(year as f64, n as f64).width(0.9))
        .collect();

    Plot::new("timeline")
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Discoveries")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::LIGHT_BLUE).name("Discoveries"));
        });
}

/// Horizontal bar chart of labelled counts, largest on top.
pub fn category_chart(ui: &mut Ui, id: &str, counts: &[(String, usize)], x_label: &str) {
    let labels: Vec<String> = counts.iter().rev().map(|(l, _)| l.clone()).collect();
    let palette = generate_palette(counts.len());
    let bars: Vec<Bar> = counts
        .iter()
        .rev()
        .enumerate()
        .map(|(i, (label, n))| {
            Bar::new(i as f64, *n as f64)
                .name(label)
                .width(0.7)
                .fill(palette[counts.len() - 1 - i])
        })
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(x_label)
        .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

/// Planets per size class, coloured like the rest of the UI.
pub fn type_chart(ui: &mut Ui, counts: &[(PlanetType, usize)], colors: &TypeColors) {
    let labels: Vec<String> = counts.iter().map(|(t, _)| t.to_string()).collect();
    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, (t, n))| {
            Bar::new(i as f64, *n as f64)
                .name(t.label())
                .width(0.7)
                .fill(colors.color_for(*t))
        })
        .collect();

    Plot::new("planet_types")
        .height(CHART_HEIGHT)
        .y_axis_label("Planets")
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// Habitability histogram; bins above the threshold are highlighted.
pub fn score_histogram_chart(ui: &mut Ui, bins: &[usize; 10]) {
    let bars: Vec<Bar> = bins
        .iter()
        .enumerate()
        .map(|(i, &n)| {
            let lower = (i * 10) as u8;
            let upper = if i == 9 { 100 } else { lower + 9 };
            // Coloured by the bin's top score.
            Bar::new(lower as f64 + 5.0, n as f64)
                .width(9.0)
                .name(format!("{lower}-{upper}"))
                .fill(color::score_color(upper))
        })
        .collect();

    Plot::new("score_histogram")
        .height(CHART_HEIGHT)
        .x_axis_label("Habitability score")
        .y_axis_label("Planets")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// Radius vs. equilibrium temperature, one series per planet type.
pub fn radius_temperature_scatter(ui: &mut Ui, records: &[&PlanetRecord], colors: &TypeColors) {
    Plot::new("radius_temperature")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Radius (R⊕)")
        .y_axis_label("Equilibrium temperature (K)")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for planet_type in PlanetType::ALL {
                let points: PlotPoints = records
                    .iter()
                    .filter(|r| r.planet_type() == planet_type)
                    .filter_map(|r| r.temperature().map(|t| [r.radius(), t]))
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .radius(2.5)
                        .color(colors.color_for(planet_type))
                        .name(planet_type.label()),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_only_on_integers() {
        let labels = vec!["Transit".to_string(), "Imaging".to_string()];
        assert_eq!(category_label(&labels, 0.0), "Transit");
        assert_eq!(category_label(&labels, 1.0), "Imaging");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }
}
