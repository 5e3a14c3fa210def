//! Bus Roster - desktop fleet roster for insurance and maintenance tracking.

use std::path::PathBuf;

use bus_roster as app;
use clap::Parser;
use eframe::egui;

use app::config::{AppConfig, ConfigLoadResult};
use app::logging;
use app::roster::{LoadSource, RosterStore};
use app::ui::App;
use app::ui::app::LogLevel;
use app::ui::components::colors;

/// Desktop fleet roster for bus insurance and maintenance tracking.
#[derive(Parser)]
#[command(name = "bus-roster")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Roster file to open instead of the configured one
    #[arg(long, value_name = "PATH")]
    roster: Option<PathBuf>,
}

/// Application launch mode.
enum LaunchMode {
    /// Roster opened; run the main window.
    Normal(Box<App>),
    /// Roster could not be read; show the error and exit.
    Failed(String),
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();

    // Determine config path based on mode
    let config_path = if cli.dev {
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };
    let load_result = AppConfig::try_load(&config_path);
    let mut config = match &load_result {
        ConfigLoadResult::Loaded(config) => config.clone(),
        ConfigLoadResult::Missing | ConfigLoadResult::Invalid(_) => AppConfig::default(),
    };

    // Initialize logging
    let _log_guard = logging::init(&config.logging);

    tracing::info!("Bus Roster starting...");
    tracing::info!("Config path: {:?}", config_path);

    let mut config_error = None;
    match load_result {
        ConfigLoadResult::Loaded(_) => tracing::info!("Config loaded successfully"),
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, writing defaults");
            if let Err(e) = config.save(&config_path) {
                tracing::warn!("Failed to write default config: {}", e);
            }
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid, using defaults: {}", e);
            config_error = Some(e.to_string());
        }
    }

    if let Some(path) = cli.roster {
        config.roster.path = path;
    }
    tracing::info!("Roster path: {:?}", config.roster.path);

    let launch_mode = match RosterStore::open(&config.roster.path) {
        Ok((store, source)) => {
            let mut app = App::new(store, config.clone());
            if source == LoadSource::Created {
                app.log(
                    LogLevel::Info,
                    format!("Created new roster at {}", config.roster.path.display()),
                );
            }
            if let Some(e) = config_error {
                app.notify(LogLevel::Error, "Configuration Error", format!("{e}\nUsing default settings."));
            }
            LaunchMode::Normal(Box::new(app))
        }
        Err(e) => {
            tracing::error!("Failed to open roster: {}", e);
            LaunchMode::Failed(e.to_string())
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Bus Management System")
            .with_inner_size([config.ui.window_width, config.ui.window_height])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    let dark_mode = config.ui.dark_mode;

    eframe::run_native(
        "Bus Management System",
        options,
        Box::new(move |cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            cc.egui_ctx.set_visuals(if dark_mode {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });

            let app: Box<dyn eframe::App> = match launch_mode {
                LaunchMode::Normal(app) => app,
                LaunchMode::Failed(error) => Box::new(StartupErrorApp { error }),
            };
            Ok(app)
        }),
    )
}

/// Shown instead of the main window when the roster cannot be opened.
struct StartupErrorApp {
    error: String,
}

impl eframe::App for StartupErrorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.heading("Could not open the bus roster");
                ui.add_space(20.0);
                ui.colored_label(colors::ERROR, &self.error);
                ui.add_space(20.0);
                ui.label("Close the file in other programs or fix the file, then start again.");
                ui.add_space(20.0);
                if ui.button("Exit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
        });
    }
}
