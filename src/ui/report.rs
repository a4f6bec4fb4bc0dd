use eframe::egui::{Color32, RichText, ScrollArea, Ui};

use crate::data::aggregate;
use crate::state::AppState;
use crate::ui::{charts, table};

/// Render the central page: stats, data viewer and the five charts.
///
/// A fatal pipeline error replaces the whole page.
pub fn central_page(ui: &mut Ui, state: &mut AppState) {
    if let Some(msg) = &state.error {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new(msg).color(Color32::RED).heading());
        });
        return;
    }

    ScrollArea::vertical()
        .id_salt("report")
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Used Vehicle Sales Explorer");
            ui.label("This app performs simple explorations of used vehicle sales data.");
            ui.add_space(8.0);

            // ---- Stats + table ----
            ui.heading("Display Stats of Selected Vehicle Data");
            ui.label(
                "Select a year using the Data Filter. The resulting data for that year will \
                 appear below. Selecting \"All\" will display the data for all years available.",
            );
            ui.label(format!("Number of results: {}", state.result_count()));
            ui.add_space(4.0);
            ui.strong("Data Viewer");
            table::data_viewer(ui, &state.filtered);

            ui.add_space(12.0);
            ui.heading("Data Visualizations Exploring the Selected Year");
            ui.label("If the selected year yields no data, the charts will be blank.");

            ui.label(
                "Understanding the condition of the cars and the average price by vehicle \
                 type can be helpful to both buyers and sellers in the used vehicle market.",
            );

            // ---- Pie: conditions ----
            ui.strong("Distribution of Vehicle Conditions");
            charts::pie_chart(
                ui,
                "condition_pie",
                &aggregate::condition_counts(&state.filtered),
                &state.colors,
            );

            // ---- Bar: average price per type ----
            ui.strong("Average Price by Vehicle Type");
            charts::category_bar_chart(
                ui,
                "price_by_type",
                &aggregate::average_price_by_type(&state.filtered),
                "type",
                "price",
            );

            // ---- Histogram: price ----
            ui.add_space(12.0);
            ui.heading("Distribution of Vehicle Price by Condition");
            ui.label(
                "The histogram of vehicle prices reveals the most common price ranges \
                 and any significant outliers.",
            );
            ui.strong("Vehicle Prices Distribution");
            charts::histogram_chart(
                ui,
                "price_histogram",
                &aggregate::price_histogram(&state.filtered),
                &state.colors,
                "price",
                "percent",
            );

            // ---- Histogram: days listed ----
            ui.add_space(12.0);
            ui.heading("Comparison of Days Listed by Condition");
            ui.label(
                "Compare how long the selected manufacturers stay listed, by condition.",
            );
            ui.checkbox(&mut state.normalize_histogram, "Normalize Histogram Data");
            let (title, y_label) = if state.normalize_histogram {
                ("Normalized Distribution of Days Listed by Condition", "probability")
            } else {
                ("Distribution of Days Listed by Condition", "count")
            };
            ui.strong(title);
            charts::histogram_chart(
                ui,
                "days_listed_histogram",
                &aggregate::days_listed_histogram(&state.filtered, state.normalize_histogram),
                &state.colors,
                "days listed",
                y_label,
            );

            // ---- Scatter: price vs odometer ----
            ui.add_space(12.0);
            ui.heading("Price vs. Odometer Reading");
            ui.label(
                "Higher mileage vehicles are generally expected to be priced lower; this \
                 scatterplot helps validate or challenge that assumption.",
            );
            charts::scatter_chart(
                ui,
                "price_vs_odometer",
                &aggregate::scatter_by_condition(&state.filtered),
                &state.colors,
                "Odometer Reading",
                "Price",
            );

            // ---- Conclusion ----
            ui.add_space(12.0);
            ui.heading("Insights");
            ui.label(
                "Vehicle prices, days listed and the relationship between price and odometer \
                 readings give a data-driven view of the used vehicle market.",
            );
        });
}
