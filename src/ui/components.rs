//! Shared UI components.

use eframe::egui::{self, Color32, CornerRadius, Margin, Response, RichText, ScrollArea, Ui};
use egui_phosphor::regular::PENCIL;

use crate::models::{BusRecord, BusStatus, COLUMNS};

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const WARNING: Color32 = Color32::from_rgb(255, 200, 100);
    pub const INFO: Color32 = Color32::from_rgb(100, 150, 230);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
}

/// Render a panel header with title.
pub fn panel_header(ui: &mut Ui, title: &str) {
    ui.heading(RichText::new(title).size(24.0));
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(10.0);
}

/// Button with a leading phosphor icon.
pub fn button_with_icon(ui: &mut Ui, icon: &str, label: &str) -> Response {
    ui.button(format!("{icon} {label}"))
}

/// Render a stat card with title, value, and subtitle.
pub fn stat_card(ui: &mut Ui, title: &str, value: &str, subtitle: &str, color: Option<Color32>) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(12))
        .outer_margin(Margin::same(5))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_width(140.0);

            ui.vertical(|ui| {
                ui.label(RichText::new(title).small());
                let mut value = RichText::new(value).heading().strong();
                if let Some(color) = color {
                    value = value.color(color);
                }
                ui.label(value);
                ui.label(RichText::new(subtitle).small().weak());
            });
        });
}

/// Color used for a status cell.
pub fn status_color(status: BusStatus) -> Color32 {
    match status {
        BusStatus::Active => colors::SUCCESS,
        BusStatus::UnderMaintenance => colors::WARNING,
    }
}

/// Render bus records as a striped grid.
///
/// With `editable`, each row gets an Edit button; the clicked row is returned.
pub fn records_table<'a>(
    ui: &mut Ui,
    id: &str,
    records: impl IntoIterator<Item = &'a BusRecord>,
    editable: bool,
) -> Option<&'a BusRecord> {
    let mut clicked = None;
    let num_columns = if editable { COLUMNS.len() + 1 } else { COLUMNS.len() };

    ScrollArea::both().id_salt(id).auto_shrink([false, true]).show(ui, |ui| {
        ui.add_space(4.0);
        egui::Grid::new(format!("{id}_grid"))
            .num_columns(num_columns)
            .striped(true)
            .min_col_width(60.0)
            .spacing([16.0, 8.0])
            .show(ui, |ui| {
                // Header
                for header in COLUMNS {
                    ui.strong(header);
                }
                if editable {
                    ui.strong("Actions");
                }
                ui.end_row();

                // Data rows
                for record in records {
                    ui.label(&record.bus_id);
                    ui.label(&record.route);
                    ui.label(&record.driver);
                    ui.label(&record.insurance_expiry);
                    ui.label(&record.maintenance_due);
                    ui.colored_label(status_color(record.status), record.status.label());

                    if editable && button_with_icon(ui, PENCIL, "Edit").clicked() {
                        clicked = Some(record);
                    }

                    ui.end_row();
                }
            });
    });

    clicked
}
