//! Main application state and window layout.

use chrono::{DateTime, Local, NaiveDateTime, TimeDelta};
use eframe::egui::{self, Align, Layout};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::export::{export_roster_to_excel, generate_export_filename, show_save_dialog};
use crate::models::{BusRecord, BusStatus};
use crate::roster::{RosterStore, UpsertOutcome};

use super::components::colors;
use super::{results_window, roster_panel};

/// Which threshold query produced a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    ExpiredInsurance,
    MaintenanceDue,
}

impl CheckKind {
    /// Window title for a non-empty result.
    pub fn title(&self) -> &'static str {
        match self {
            CheckKind::ExpiredInsurance => "Buses with Expired Insurance",
            CheckKind::MaintenanceDue => "Buses Needing Maintenance",
        }
    }

    /// Notice title when nothing matched.
    fn check_name(&self) -> &'static str {
        match self {
            CheckKind::ExpiredInsurance => "Insurance Check",
            CheckKind::MaintenanceDue => "Maintenance Check",
        }
    }

    fn empty_message(&self) -> &'static str {
        match self {
            CheckKind::ExpiredInsurance => "No buses with expired insurance.",
            CheckKind::MaintenanceDue => "No buses needing maintenance.",
        }
    }

    /// Worksheet name and export file prefix.
    fn export_names(&self) -> (&'static str, &'static str) {
        match self {
            CheckKind::ExpiredInsurance => ("Expired Insurance", "expired_insurance"),
            CheckKind::MaintenanceDue => ("Maintenance Due", "maintenance_due"),
        }
    }
}

/// Snapshot of a threshold query shown in its own window.
#[derive(Clone)]
pub struct CheckResult {
    pub kind: CheckKind,
    pub records: Vec<BusRecord>,
    pub checked_at: DateTime<Local>,
    pub is_open: bool,
}

/// Form state for add/update.
#[derive(Default, Clone)]
pub struct BusForm {
    pub bus_id: String,
    pub route: String,
    pub driver: String,
    pub insurance_expiry: String,
    pub maintenance_due: String,
    pub status: BusStatus,
    /// Bus ID the form was filled from via Edit.
    pub editing: Option<String>,
}

impl BusForm {
    /// Reset the form to default values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Create a form pre-filled for editing an existing bus.
    pub fn edit(record: &BusRecord) -> Self {
        Self {
            bus_id: record.bus_id.clone(),
            route: record.route.clone(),
            driver: record.driver.clone(),
            insurance_expiry: record.insurance_expiry.clone(),
            maintenance_due: record.maintenance_due.clone(),
            status: record.status,
            editing: Some(record.bus_id.clone()),
        }
    }

    /// Record built from the current inputs.
    pub fn to_record(&self) -> BusRecord {
        BusRecord::new(
            self.bus_id.clone(),
            self.route.clone(),
            self.driver.clone(),
            self.insurance_expiry.clone(),
            self.maintenance_due.clone(),
            self.status,
        )
    }
}

/// Log level for UI messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    pub fn color(&self) -> egui::Color32 {
        match self {
            LogLevel::Info => colors::INFO,
            LogLevel::Success => colors::SUCCESS,
            LogLevel::Warning => colors::WARNING,
            LogLevel::Error => colors::ERROR,
        }
    }
}

/// Log entry for display in the UI.
#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

/// Blocking message dialog.
#[derive(Clone, Debug)]
pub struct Notice {
    pub level: LogLevel,
    pub title: String,
    pub message: String,
}

const MAX_LOG_ENTRIES: usize = 100;

/// Summary counts shown above the roster table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterStats {
    pub total: usize,
    pub under_maintenance: usize,
    pub expired_insurance: usize,
    pub maintenance_due: usize,
}

impl RosterStats {
    fn compute(store: &RosterStore, now: NaiveDateTime) -> Self {
        Self {
            total: store.len(),
            under_maintenance: store
                .records()
                .iter()
                .filter(|r| r.status == BusStatus::UnderMaintenance)
                .count(),
            expired_insurance: store.filter_expired_insurance(now).len(),
            maintenance_due: store.filter_maintenance_due(now).len(),
        }
    }
}

/// Main application state.
pub struct App {
    pub store: RosterStore,
    pub config: AppConfig,

    // Form and table filter
    pub form: BusForm,
    pub search: String,

    // Threshold query windows
    pub check_results: Vec<CheckResult>,

    // Log messages
    pub log_messages: Vec<LogEntry>,

    // Dialogs
    pub notice: Option<Notice>,

    // Stats and the time they were computed for
    stats: Option<(NaiveDateTime, RosterStats)>,
}

impl App {
    pub fn new(store: RosterStore, config: AppConfig) -> Self {
        Self {
            store,
            config,
            form: BusForm::default(),
            search: String::new(),
            check_results: Vec::new(),
            log_messages: Vec::new(),
            notice: None,
            stats: None,
        }
    }

    /// Summary counts, recomputed after roster changes and once a minute.
    pub fn roster_stats(&mut self, now: NaiveDateTime) -> RosterStats {
        if let Some((computed_at, stats)) = self.stats
            && now >= computed_at
            && now - computed_at < TimeDelta::minutes(1)
        {
            return stats;
        }

        let stats = RosterStats::compute(&self.store, now);
        self.stats = Some((now, stats));
        stats
    }

    /// Log a message to the UI log.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.log_messages.push(LogEntry {
            timestamp: Local::now(),
            message: message.into(),
            level,
        });

        if self.log_messages.len() > MAX_LOG_ENTRIES {
            self.log_messages.remove(0);
        }
    }

    /// Show a blocking dialog.
    pub fn notify(&mut self, level: LogLevel, title: impl Into<String>, message: impl Into<String>) {
        self.notice = Some(Notice {
            level,
            title: title.into(),
            message: message.into(),
        });
    }

    /// Add or update the bus described by the form.
    pub fn submit_form(&mut self) {
        let record = self.form.to_record();
        let bus_id = record.bus_id.trim().to_string();

        let result = self.store.upsert(record);
        self.stats = None;
        match result {
            Ok(outcome) => {
                let verb = match outcome {
                    UpsertOutcome::Inserted => "Added",
                    UpsertOutcome::Updated => "Updated",
                };
                self.log(LogLevel::Success, format!("{verb} bus {bus_id}"));
                self.form.editing = Some(bus_id);
                self.notify(LogLevel::Success, "Success", "Bus details have been updated!");
            }
            Err(e) if e.is_validation() => {
                self.log(LogLevel::Warning, e.to_string());
                self.notify(LogLevel::Warning, "Input Error", "All fields must be filled!");
            }
            Err(e) => self.report_save_error(e),
        }
    }

    /// Retry writing unsaved changes.
    pub fn save_now(&mut self) {
        match self.store.save() {
            Ok(()) => {
                self.log(LogLevel::Success, "Roster saved");
                self.notify(LogLevel::Success, "Success", "Roster saved.");
            }
            Err(e) => self.report_save_error(e),
        }
    }

    fn report_save_error(&mut self, e: AppError) {
        self.log(LogLevel::Error, e.to_string());
        self.notify(
            LogLevel::Error,
            "Error",
            format!("An error occurred while saving data: {e}"),
        );
    }

    /// Show the full roster: clear the search and re-read the file.
    ///
    /// Unsaved changes are kept in memory instead of being overwritten by
    /// the file contents.
    pub fn view_all(&mut self) {
        self.search.clear();

        if self.store.has_unsaved_changes() {
            self.log(LogLevel::Warning, "Unsaved changes pending, showing in-memory roster");
            return;
        }

        let result = self.store.reload();
        self.stats = None;
        match result {
            Ok(_) => self.log(LogLevel::Info, format!("Showing {} buses", self.store.len())),
            Err(e) => {
                self.log(LogLevel::Error, e.to_string());
                self.notify(LogLevel::Error, "Error", format!("Could not reload roster: {e}"));
            }
        }
    }

    /// Run a threshold query against the current local time.
    pub fn run_check(&mut self, kind: CheckKind) {
        let now = Local::now();
        self.run_check_at(kind, now.naive_local(), now);
    }

    fn run_check_at(&mut self, kind: CheckKind, now: NaiveDateTime, checked_at: DateTime<Local>) {
        let records = match kind {
            CheckKind::ExpiredInsurance => self.store.filter_expired_insurance(now),
            CheckKind::MaintenanceDue => self.store.filter_maintenance_due(now),
        };
        tracing::info!("{}: {} matching buses", kind.check_name(), records.len());

        if records.is_empty() {
            self.log(LogLevel::Info, kind.empty_message());
            self.notify(LogLevel::Info, kind.check_name(), kind.empty_message());
            return;
        }

        self.log(
            LogLevel::Warning,
            format!("{}: {} buses", kind.title(), records.len()),
        );

        // One window per query; a rerun replaces the previous snapshot.
        self.check_results.retain(|r| r.kind != kind);
        self.check_results.push(CheckResult {
            kind,
            records,
            checked_at,
            is_open: true,
        });
    }

    /// Export the full roster to Excel.
    pub fn export_roster(&mut self) {
        let records = self.store.records().to_vec();
        self.export_records(&records, "Buses", "buses");
    }

    /// Export one query result to Excel.
    pub fn export_check(&mut self, kind: CheckKind) {
        let Some(result) = self.check_results.iter().find(|r| r.kind == kind) else {
            return;
        };
        let records = result.records.clone();
        let (sheet, prefix) = kind.export_names();
        self.export_records(&records, sheet, prefix);
    }

    fn export_records(&mut self, records: &[BusRecord], sheet_name: &str, prefix: &str) {
        let filename = generate_export_filename(prefix);
        let Some(path) = show_save_dialog(&filename) else {
            return;
        };

        match export_roster_to_excel(records, sheet_name, &path) {
            Ok(()) => {
                self.log(LogLevel::Success, format!("Exported to {}", path.display()));
                self.notify(LogLevel::Success, "Export", format!("Exported to: {}", path.display()));
            }
            Err(e) => {
                self.log(LogLevel::Error, e.to_string());
                self.notify(LogLevel::Error, "Error", format!("Export failed: {e}"));
            }
        }
    }

    /// Render menu bar.
    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui
                        .add_enabled(self.store.has_unsaved_changes(), egui::Button::new("Save Now"))
                        .clicked()
                    {
                        self.save_now();
                        ui.close();
                    }
                    if ui.button("Export to Excel").clicked() {
                        self.export_roster();
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        ui.close();
                    }
                });
                ui.menu_button("Checks", |ui| {
                    if ui.button("Check Expired Insurance").clicked() {
                        self.run_check(CheckKind::ExpiredInsurance);
                        ui.close();
                    }
                    if ui.button("Check Maintenance Due").clicked() {
                        self.run_check(CheckKind::MaintenanceDue);
                        ui.close();
                    }
                });
            });
        });
    }

    /// Render status bar (display only, no interaction).
    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(28.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(format!("{} buses", self.store.len()));
                    ui.separator();
                    ui.label(egui::RichText::new(self.store.path().display().to_string()).weak());

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if self.store.has_unsaved_changes() {
                            ui.colored_label(colors::ERROR, "Unsaved changes");
                        } else {
                            ui.colored_label(colors::NEUTRAL, "All changes saved");
                        }
                    });
                });
            });
    }

    /// Render the blocking notice dialog.
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(notice) = self.notice.clone() {
            egui::Window::new(&notice.title)
                .id(egui::Id::new("notice_dialog"))
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(notice.level.color(), &notice.message);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.notice = None;
                    }
                });
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Menu bar
        self.show_menu_bar(ctx);

        // Status bar
        self.show_status_bar(ctx);

        // Query result windows
        results_window::show(self, ctx);

        // Modal dialogs
        self.show_dialogs(ctx);

        // Main content
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(self.notice.is_none(), |ui| {
                roster_panel::show(self, ui);
            });
        });
    }
}
