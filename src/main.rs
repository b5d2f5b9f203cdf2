#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! Shopfloor Gantt viewer.
//!
//! Usage: `shopfloor-gantt [schedule.csv]`
//!
//! Environment:
//! - `RUST_LOG`: log filter directives, e.g. `shopfloor_gantt=debug` (default: info)

mod app;
mod ui;

use std::env;
use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> eframe::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let initial = env::args_os().nth(1).map(PathBuf::from);
    info!(schedule = ?initial, "starting shopfloor gantt viewer");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Shopfloor Gantt"),
        ..Default::default()
    };

    eframe::run_native(
        "Shopfloor Gantt",
        options,
        Box::new(move |_cc| Ok(Box::new(app::SchedulerApp::new(initial)))),
    )
}
