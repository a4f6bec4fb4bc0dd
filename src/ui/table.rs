use eframe::egui::{self, ScrollArea, TextStyle, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{VehicleTable, COLUMN_NAMES};

/// Height of the scrolling body of the data viewer.
const VIEWER_HEIGHT: f32 = 360.0;

/// Render every row and column of `table` as text.
pub fn data_viewer(ui: &mut Ui, table: &VehicleTable) {
    if table.is_empty() {
        ui.label(egui::RichText::new("No listings match the current filters.").italics());
    }

    let row_height = TextStyle::Body.resolve(ui.style()).size + 6.0;

    ScrollArea::horizontal()
        .id_salt("data_viewer_h")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .vscroll(true)
                .min_scrolled_height(0.0)
                .max_scroll_height(VIEWER_HEIGHT)
                .columns(Column::auto().at_least(60.0), COLUMN_NAMES.len())
                .header(row_height, |mut header| {
                    for name in COLUMN_NAMES {
                        header.col(|ui: &mut Ui| {
                            ui.strong(name.replace('_', " "));
                        });
                    }
                })
                .body(|body| {
                    body.rows(row_height, table.len(), |mut row| {
                        let Some(listing) = table.get(row.index()) else {
                            return;
                        };
                        for cell in listing.cells() {
                            row.col(|ui: &mut Ui| {
                                ui.label(cell);
                            });
                        }
                    });
                });
        });
}
