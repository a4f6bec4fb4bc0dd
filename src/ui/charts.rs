use std::f64::consts::TAU;
use std::ops::RangeInclusive;

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot, PlotPoints, Points, Polygon};

use crate::color::CategoryColors;
use crate::data::aggregate::Histogram;

const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Pie of `(category, count)` slices, drawn as filled polygons.
pub fn pie_chart(ui: &mut Ui, id: &str, slices: &[(String, usize)], colors: &CategoryColors) {
    let total: usize = slices.iter().map(|(_, n)| n).sum();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            if total == 0 {
                return;
            }
            let mut start = TAU / 4.0;
            for (label, count) in slices {
                let fraction = *count as f64 / total as f64;
                let sweep = fraction * TAU;
                // At least a couple of arc points per slice, more for wide ones.
                let steps = ((fraction * 120.0).ceil() as usize).max(2);

                let outline: PlotPoints = std::iter::once([0.0, 0.0])
                    .chain((0..=steps).map(|i| {
                        let angle = start - sweep * i as f64 / steps as f64;
                        [angle.cos(), angle.sin()]
                    }))
                    .collect();

                plot_ui.polygon(
                    Polygon::new(outline)
                        .name(format!("{label} ({:.1}%)", fraction * 100.0))
                        .fill_color(colors.color_for(label))
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                );
                start -= sweep;
            }
        });
}

// ---------------------------------------------------------------------------
// Bar chart with categorical x axis
// ---------------------------------------------------------------------------

/// One bar per `(category, value)`, categories labelled along the x axis.
pub fn category_bar_chart(
    ui: &mut Ui,
    id: &str,
    series: &[(String, f64)],
    x_label: &str,
    y_label: &str,
) {
    let labels: Vec<String> = series.iter().map(|(c, _)| c.clone()).collect();
    let bars: Vec<Bar> = series
        .iter()
        .enumerate()
        .map(|(i, (category, value))| Bar::new(i as f64, *value).width(0.7).name(category))
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::from_rgb(99, 110, 250)));
        });
}

// ---------------------------------------------------------------------------
// Stacked histogram
// ---------------------------------------------------------------------------

/// Stacked per-category histogram sharing the bins of `hist`.
pub fn histogram_chart(
    ui: &mut Ui,
    id: &str,
    hist: &Histogram,
    colors: &CategoryColors,
    x_label: &str,
    y_label: &str,
) {
    let width = hist.bin_width();
    let mut charts: Vec<BarChart> = Vec::with_capacity(hist.series.len());

    for series in &hist.series {
        let bars: Vec<Bar> = series
            .heights
            .iter()
            .enumerate()
            .map(|(bin, height)| Bar::new(hist.bin_center(bin), *height).width(width))
            .collect();
        let below: Vec<&BarChart> = charts.iter().collect();
        let chart = BarChart::new(bars)
            .name(&series.condition)
            .color(colors.color_for(&series.condition))
            .stack_on(&below);
        charts.push(chart);
    }

    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .include_y(0.0)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter plot
// ---------------------------------------------------------------------------

/// One point cloud per category.
pub fn scatter_chart(
    ui: &mut Ui,
    id: &str,
    groups: &[(String, Vec<[f64; 2]>)],
    colors: &CategoryColors,
    x_label: &str,
    y_label: &str,
) {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            for (category, points) in groups {
                plot_ui.points(
                    Points::new(points.clone())
                        .name(category)
                        .color(colors.color_for(category))
                        .radius(2.0),
                );
            }
        });
}
