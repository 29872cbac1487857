use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::chart::ChartKind;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – plot settings
// ---------------------------------------------------------------------------

/// Render the left plot-settings panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Plot Settings");
    ui.separator();

    if state.table.is_none() {
        ui.label("Please upload a CSV file to begin.");
        return;
    }
    if !state.schema.is_plottable() {
        ui.label(
            RichText::new("Not enough suitable columns in the data to create plots.")
                .color(Color32::YELLOW),
        );
        return;
    }

    // Clone the choice lists so we can mutate state inside the closures.
    let numeric = state.schema.numeric.clone();
    let categorical = state.schema.categorical.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            chart_section(
                ui,
                state,
                ChartKind::Bar,
                [("X-Axis", categorical.as_slice()), ("Y-Axis", numeric.as_slice())],
            );
            ui.separator();
            chart_section(
                ui,
                state,
                ChartKind::Line,
                [("X-Axis", numeric.as_slice()), ("Y-Axis", numeric.as_slice())],
            );
            ui.separator();
            chart_section(
                ui,
                state,
                ChartKind::Pie,
                [
                    ("Category Column", categorical.as_slice()),
                    ("Value Column", numeric.as_slice()),
                ],
            );
        });
}

/// One chart section: two column pickers and a generate button.
fn chart_section(
    ui: &mut Ui,
    state: &mut AppState,
    kind: ChartKind,
    roles: [(&str, &[String]); 2],
) {
    ui.strong(format!("{kind} Chart"));

    let selection = state.selections.get_mut(kind);
    for (slot, (role, choices)) in [&mut selection.first, &mut selection.second]
        .into_iter()
        .zip(roles)
    {
        let current = slot.clone().unwrap_or_default();
        ui.label(role);
        egui::ComboBox::from_id_salt(format!("{kind}_{role}"))
            .selected_text(&current)
            .show_ui(ui, |ui: &mut Ui| {
                for col in choices {
                    if ui.selectable_label(current == *col, col).clicked() {
                        *slot = Some(col.clone());
                    }
                }
            });
    }

    if ui.button(format!("Generate {kind} Chart")).clicked() {
        state.generate(kind);
    }
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
        });

        ui.separator();

        if let Some(table) = &state.table {
            let name = state.source_name.as_deref().unwrap_or("data");
            ui.label(format!(
                "{name}: {} rows, {} numeric / {} categorical columns",
                table.len(),
                state.schema.numeric.len(),
                state.schema.categorical.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Upload your CSV file")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}
