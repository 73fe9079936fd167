//! Thermo Chart - Temperature Line Chart & Thermometer Gauge
//!
//! Plots submitted temperatures as a line chart and mirrors the latest one on a gauge.

mod charts;
mod config;
mod data;
mod gui;

use anyhow::{Context, Result};
use clap::Parser;
use config::ChartConfig;
use eframe::egui;
use gui::ThermoChartApp;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "thermo_chart")]
#[command(about = "Temperature line chart with a thermometer gauge", long_about = None)]
struct Args {
    /// JSON file overriding the chart layout and thresholds
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match &args.config {
        Some(path) => ChartConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ChartConfig::default(),
    };
    tracing::info!(
        canvas_width = config.canvas.width,
        canvas_height = config.canvas.height,
        "starting thermo chart"
    );

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.canvas.width.max(800.0), config.canvas.height + 300.0])
            .with_min_inner_size([config.canvas.width, config.canvas.height + 150.0])
            .with_title("Line Chart App"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Thermo Chart",
        options,
        Box::new(move |cc| Ok(Box::new(ThermoChartApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}
