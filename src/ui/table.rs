use eframe::egui::{Align, Layout, ScrollArea, Ui};
use egui_extras::{Column as GridColumn, TableBuilder};

use crate::data::model::CellValue;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Data preview (bottom panel)
// ---------------------------------------------------------------------------

/// Show every row of the loaded table in a scrollable grid.
pub fn data_preview(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        return;
    };

    ui.strong("Data from the uploaded CSV:");
    if table.is_empty() {
        ui.label("The file has a header row but no data rows.");
        return;
    }

    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .column(GridColumn::auto().at_least(40.0))
            .columns(GridColumn::auto().at_least(60.0), table.columns().len())
            .header(ROW_HEIGHT + 2.0, |mut header| {
                header.col(|ui| {
                    ui.strong("#");
                });
                for col in table.columns() {
                    header.col(|ui| {
                        let kind = state
                            .schema
                            .kind_of(&col.name)
                            .map_or_else(String::new, |k| k.to_string());
                        ui.strong(&col.name).on_hover_text(kind);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, table.len(), |mut row| {
                    let idx = row.index();
                    row.col(|ui| {
                        ui.label(idx.to_string());
                    });
                    for col in table.columns() {
                        row.col(|ui| {
                            cell_label(ui, &col.values[idx]);
                        });
                    }
                });
            });
    });
}

fn cell_label(ui: &mut Ui, value: &CellValue) {
    match value {
        CellValue::Missing => {
            ui.weak(value.to_string());
        }
        CellValue::Integer(_) | CellValue::Float(_) => {
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(value.to_string());
            });
        }
        CellValue::Text(s) => {
            ui.label(s);
        }
    }
}
