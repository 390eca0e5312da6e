use std::path::Path;

use anyhow::Context;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::Dimension;
use crate::state::AppState;

/// A change requested by a sidebar widget, applied after rendering.
enum FilterAction {
    Toggle(Dimension, String),
    Clear(Dimension),
    ResetAll,
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Controls");
    ui.separator();

    let Some(dataset) = state.dataset.as_ref().ok().cloned() else {
        ui.label("No dataset loaded.");
        return;
    };

    let mut actions = Vec::new();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .max_height((ui.available_height() - 48.0).max(100.0))
        .show(ui, |ui: &mut Ui| {
            for dim in Dimension::ALL {
                let all_values = dataset.distinct(dim);
                let chosen = state.selection.get(dim).chosen();

                let header_text = match chosen {
                    Some(set) => format!("{}  ({}/{})", dim.label(), set.len(), all_values.len()),
                    None => format!("{}  (all {})", dim.label(), all_values.len()),
                };

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(dim.label())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        if ui
                            .add_enabled(chosen.is_some(), egui::Button::new("Clear").small())
                            .clicked()
                        {
                            actions.push(FilterAction::Clear(dim));
                        }

                        for value in all_values {
                            let mut checked = chosen.is_some_and(|set| set.contains(value));
                            if ui.checkbox(&mut checked, value.as_str()).changed() {
                                actions.push(FilterAction::Toggle(dim, value.clone()));
                            }
                        }
                    });
            }

            ui.add_space(8.0);
            if ui
                .add_enabled(state.selection.is_active(), egui::Button::new("Reset all filters"))
                .clicked()
            {
                actions.push(FilterAction::ResetAll);
            }
        });

    ui.separator();
    if ui.button("📥 Export CSV").clicked() {
        export_dialog(state);
    }

    for action in actions {
        match action {
            FilterAction::Toggle(dim, value) => state.toggle_filter_value(dim, &value),
            FilterAction::Clear(dim) => state.clear_filter(dim),
            FilterAction::ResetAll => state.reset_filters(),
        }
    }
}

// ---------------------------------------------------------------------------
// Status bar
// ---------------------------------------------------------------------------

/// Render the bottom status line.
pub fn status_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        if let Some(ds) = state.dataset() {
            ui.label(format!(
                "{} records loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// Export dialog
// ---------------------------------------------------------------------------

pub fn export_dialog(state: &mut AppState) {
    let bytes = match state.export_csv() {
        Some(Ok(bytes)) => bytes,
        Some(Err(e)) => {
            log::error!("Failed to encode export: {e}");
            state.status_message = Some(format!("Error: {e}"));
            return;
        }
        None => return,
    };

    let file = rfd::FileDialog::new()
        .set_title("Export filtered curriculum")
        .set_file_name(&state.config.export_file_name)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match write_export(&path, &bytes) {
            Ok(()) => {
                log::info!(
                    "Exported {} records to {}",
                    state.visible_indices.len(),
                    path.display()
                );
                state.status_message = Some(format!(
                    "Exported {} records to {}",
                    state.visible_indices.len(),
                    path.display()
                ));
            }
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn write_export(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}
