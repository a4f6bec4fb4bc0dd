use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::year_options;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – data filters
// ---------------------------------------------------------------------------

/// Render the "Data filters" sidebar.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Data filters");
    ui.separator();

    // ---- Model year (single select) ----
    ui.strong("Model Year");
    let mut year = state.year;
    egui::ComboBox::from_id_salt("model_year")
        .selected_text(year.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in year_options() {
                ui.selectable_value(&mut year, option, option.to_string());
            }
        });
    if year != state.year {
        state.set_year(year);
    }

    ui.add_space(8.0);

    // ---- Manufacturer (multi select) ----
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Manufacturer");
        if !state.makes.is_empty() && ui.small_button("Clear").clicked() {
            state.clear_makes();
        }
    });
    let summary = if state.makes.is_empty() {
        "All manufacturers".to_string()
    } else {
        state
            .makes
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };
    ui.label(RichText::new(summary).weak());

    let mut toggled: Option<String> = None;
    ScrollArea::vertical()
        .id_salt("manufacturers")
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for make in &state.make_options {
                let mut checked = state.makes.contains(make);
                let label = if make.is_empty() { "(blank)" } else { make.as_str() };
                if ui.checkbox(&mut checked, label).changed() {
                    toggled = Some(make.clone());
                }
            }
        });
    if let Some(make) = toggled {
        state.toggle_make(&make);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Data", |ui: &mut Ui| {
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(state.data_path.display().to_string());

        if let Some(table) = &state.table {
            ui.separator();
            ui.label(format!(
                "{} listings loaded, {} selected",
                table.len(),
                state.result_count()
            ));
        }

        if let Some(msg) = &state.error {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
