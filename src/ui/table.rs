use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Field;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel – metrics, search and results table
// ---------------------------------------------------------------------------

/// Render the dashboard body.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🎓 Academic Curriculum Dashboard");
    ui.label(
        RichText::new("💡 Tip: if you leave a filter empty, it shows all results for that category.")
            .italics(),
    );
    ui.add_space(8.0);

    metrics_row(ui, state);

    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        ui.label("🔍 Search by Module Name or Code");
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.search_text)
                .hint_text("e.g. CS101")
                .desired_width(f32::INFINITY),
        );
        if response.changed() {
            state.refilter();
        }
    });
    ui.add_space(4.0);

    results_table(ui, state);
}

fn metrics_row(ui: &mut Ui, state: &AppState) {
    let summary = state.summary;
    let cards = [
        ("Total Modules", summary.total_modules),
        ("Years Active", summary.years_active),
        ("Semesters Active", summary.semesters_active),
    ];

    ui.columns(cards.len(), |columns: &mut [Ui]| {
        for (ui, (label, value)) in columns.iter_mut().zip(cards) {
            egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                ui.set_min_width(ui.available_width());
                ui.label(RichText::new(label).weak());
                ui.label(RichText::new(value.to_string()).size(28.0).strong());
            });
        }
    });
}

fn results_table(ui: &mut Ui, state: &AppState) {
    let Some(view) = state.view() else {
        return;
    };
    let dataset = view.dataset();

    if view.is_empty() {
        let message = if dataset.is_empty() {
            "The data file contains no modules."
        } else {
            "No modules match the current filters."
        };
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(message);
        });
        return;
    }

    let type_col = dataset.index_of(Field::ModuleType);
    let text_height = egui::TextStyle::Body.resolve(ui.style()).size * 1.5;

    let mut builder = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .min_scrolled_height(0.0)
        .vscroll(true);

    let n_cols = dataset.headers.len();
    for i in 0..n_cols {
        let column = if i + 1 == n_cols {
            Column::remainder().at_least(80.0)
        } else {
            Column::initial(150.0).at_least(60.0).clip(true)
        };
        builder = builder.column(column);
    }

    builder
        .header(20.0, |mut header| {
            for name in &dataset.headers {
                header.col(|ui: &mut Ui| {
                    ui.strong(name.as_str());
                });
            }
        })
        .body(|body| {
            body.rows(text_height, view.len(), |mut row| {
                let record = &dataset.records[view.indices()[row.index()]];
                for (col_idx, cell) in record.cells.iter().enumerate() {
                    row.col(|ui: &mut Ui| {
                        let text = cell.as_deref().unwrap_or("");
                        let color = (col_idx == type_col)
                            .then_some(state.type_colors.as_ref())
                            .flatten()
                            .map(|cm| cm.color_for(text));
                        match color {
                            Some(c) if cell.is_some() => {
                                ui.label(RichText::new(text).color(c));
                            }
                            _ => {
                                ui.label(text);
                            }
                        }
                    });
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Error screen
// ---------------------------------------------------------------------------

/// Shown instead of the dashboard when the dataset could not be loaded.
pub fn load_error(ui: &mut Ui, state: &AppState) {
    let Err(err) = &state.dataset else {
        return;
    };
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(40.0);
        ui.label(
            RichText::new(format!(
                "🚨 '{}' could not be loaded!",
                state.config.data_file.display()
            ))
            .color(Color32::RED)
            .size(20.0)
            .strong(),
        );
        ui.add_space(8.0);
        ui.label(RichText::new(err.to_string()).color(Color32::RED));
    });
}
