//! Roster panel: add/update form, action toolbar, bus table, and activity log.

use chrono::Local;
use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{
    ARROWS_CLOCKWISE, BROOM, FILE_XLS, FLOPPY_DISK, PLUS, SHIELD_WARNING, SIGN_OUT, WRENCH,
};

use super::app::{App, BusForm, CheckKind};
use super::components::{button_with_icon, colors, panel_header, records_table, stat_card};
use crate::models::BusStatus;
use crate::roster::parse_roster_date;

/// Show the roster panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Bus Management System");

    show_stats(app, ui);
    ui.add_space(10.0);

    show_form(app, ui);
    ui.add_space(10.0);

    show_toolbar(app, ui);
    ui.add_space(10.0);

    // Search
    ui.horizontal(|ui| {
        ui.label("Search:");
        ui.add(
            egui::TextEdit::singleline(&mut app.search)
                .desired_width(220.0)
                .hint_text("Bus ID, route or driver..."),
        );
    });

    ui.add_space(10.0);

    show_table(app, ui);

    ui.add_space(10.0);

    show_activity(app, ui);
}

fn show_stats(app: &mut App, ui: &mut Ui) {
    let stats = app.roster_stats(Local::now().naive_local());
    let total = stats.total;
    let in_workshop = stats.under_maintenance;
    let expired = stats.expired_insurance;
    let due = stats.maintenance_due;

    ui.horizontal(|ui| {
        stat_card(ui, "Total Buses", &total.to_string(), "In the roster", None);
        stat_card(
            ui,
            "Under Maintenance",
            &in_workshop.to_string(),
            "Out of service",
            None,
        );
        stat_card(
            ui,
            "Expired Insurance",
            &expired.to_string(),
            "Expiry before today",
            (expired > 0).then_some(colors::ERROR),
        );
        stat_card(
            ui,
            "Maintenance Due",
            &due.to_string(),
            "Due today or earlier",
            (due > 0).then_some(colors::WARNING),
        );
    });
}

fn show_form(app: &mut App, ui: &mut Ui) {
    egui::Grid::new("bus_form_grid")
        .num_columns(2)
        .spacing([20.0, 8.0])
        .show(ui, |ui| {
            ui.label("Bus ID:");
            ui.add(egui::TextEdit::singleline(&mut app.form.bus_id).desired_width(200.0));
            ui.end_row();

            ui.label("Route:");
            ui.add(egui::TextEdit::singleline(&mut app.form.route).desired_width(250.0));
            ui.end_row();

            ui.label("Driver:");
            ui.add(egui::TextEdit::singleline(&mut app.form.driver).desired_width(250.0));
            ui.end_row();

            ui.label("Insurance Expiry:");
            date_input(ui, &mut app.form.insurance_expiry);
            ui.end_row();

            ui.label("Maintenance Due:");
            date_input(ui, &mut app.form.maintenance_due);
            ui.end_row();

            ui.label("Status:");
            egui::ComboBox::from_id_salt("bus_form_status")
                .width(200.0)
                .selected_text(app.form.status.label())
                .show_ui(ui, |ui| {
                    for status in BusStatus::ALL {
                        ui.selectable_value(&mut app.form.status, status, status.label());
                    }
                });
            ui.end_row();
        });

    if let Some(bus_id) = &app.form.editing {
        ui.label(RichText::new(format!("Editing bus {bus_id}")).weak());
    }
}

/// Free-form date field; unrecognised dates are shown in red but still accepted.
fn date_input(ui: &mut Ui, value: &mut String) {
    ui.horizontal(|ui| {
        let is_valid = value.trim().is_empty() || parse_roster_date(value).is_some();

        let text_color = if is_valid {
            ui.visuals().text_color()
        } else {
            colors::ERROR
        };

        ui.add(
            egui::TextEdit::singleline(value)
                .desired_width(120.0)
                .hint_text("YYYY-MM-DD")
                .text_color(text_color),
        );

        if is_valid {
            ui.weak("Format: YYYY-MM-DD");
        } else {
            ui.colored_label(colors::ERROR, "Not a date, will never be flagged");
        }
    });
}

fn show_toolbar(app: &mut App, ui: &mut Ui) {
    ui.horizontal(|ui| {
        if button_with_icon(ui, PLUS, "Add/Update Bus").clicked() {
            app.submit_form();
        }

        if button_with_icon(ui, BROOM, "Clear Form").clicked() {
            app.form = BusForm::default();
        }

        ui.add_space(10.0);

        if button_with_icon(ui, ARROWS_CLOCKWISE, "View All Buses").clicked() {
            app.view_all();
        }

        if button_with_icon(ui, SHIELD_WARNING, "Check Expired Insurance").clicked() {
            app.run_check(CheckKind::ExpiredInsurance);
        }

        if button_with_icon(ui, WRENCH, "Check Maintenance Due").clicked() {
            app.run_check(CheckKind::MaintenanceDue);
        }

        if button_with_icon(ui, FILE_XLS, "Export to Excel").clicked() {
            app.export_roster();
        }

        if app.store.has_unsaved_changes() && button_with_icon(ui, FLOPPY_DISK, "Save Now").clicked() {
            app.save_now();
        }

        ui.add_space(10.0);

        if button_with_icon(ui, SIGN_OUT, "Exit").clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn show_table(app: &mut App, ui: &mut Ui) {
    let filtered: Vec<_> = app
        .store
        .records()
        .iter()
        .filter(|r| r.matches_search(&app.search))
        .collect();

    ui.label(format!("Showing {} of {} buses", filtered.len(), app.store.len()));
    ui.add_space(4.0);

    let max_height = (ui.available_height() - 160.0).max(150.0);
    let edit = ui
        .allocate_ui(egui::vec2(ui.available_width(), max_height), |ui| {
            records_table(ui, "roster_table", filtered, true).cloned()
        })
        .inner;

    if let Some(record) = edit {
        app.form = BusForm::edit(&record);
    }
}

fn show_activity(app: &App, ui: &mut Ui) {
    ui.label(RichText::new("Recent Activity").strong());
    ui.add_space(4.0);

    ScrollArea::vertical()
        .id_salt("activity_scroll")
        .max_height(100.0)
        .show(ui, |ui| {
            if app.log_messages.is_empty() {
                ui.label(RichText::new("No recent activity").weak());
            } else {
                for entry in app.log_messages.iter().rev().take(10) {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(entry.timestamp.format("%H:%M:%S").to_string())
                                .small()
                                .color(colors::NEUTRAL),
                        );
                        ui.label(RichText::new(&entry.message).color(entry.level.color()));
                    });
                }
            }
        });
}
