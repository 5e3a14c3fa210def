//! Popup windows listing the buses matched by a threshold query.

use eframe::egui::{self, RichText};
use egui_phosphor::regular::FILE_XLS;

use super::app::{App, CheckKind};
use super::components::{button_with_icon, records_table};

/// Show every open result window.
pub fn show(app: &mut App, ctx: &egui::Context) {
    let mut export = None;

    for result in app.check_results.iter_mut() {
        let mut open = result.is_open;
        egui::Window::new(result.kind.title())
            .id(egui::Id::new(("check_result", result.kind.title())))
            .collapsible(false)
            .resizable(true)
            .default_size([640.0, 360.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!(
                            "{} buses, checked {}",
                            result.records.len(),
                            result.checked_at.format("%Y-%m-%d %H:%M")
                        ))
                        .weak(),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if button_with_icon(ui, FILE_XLS, "Export to Excel").clicked() {
                            export = Some(result.kind);
                        }
                    });
                });
                ui.separator();

                records_table(ui, table_id(result.kind), &result.records, false);
            });
        result.is_open = open;
    }

    app.check_results.retain(|r| r.is_open);

    if let Some(kind) = export {
        app.export_check(kind);
    }
}

fn table_id(kind: CheckKind) -> &'static str {
    match kind {
        CheckKind::ExpiredInsurance => "expired_insurance_table",
        CheckKind::MaintenanceDue => "maintenance_due_table",
    }
}
