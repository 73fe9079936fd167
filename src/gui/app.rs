//! Thermo Chart Main Application
//! Main window with control bar, chart canvas and threshold labels.

use crate::charts::{export, ChartRenderer};
use crate::config::ChartConfig;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::{CentralPanel, TopBottomPanel};

/// Main application window.
pub struct ThermoChartApp {
    renderer: ChartRenderer,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    threshold_labels: [String; 4],
}

impl ThermoChartApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ChartConfig) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let control_panel = ControlPanel::new(&config.thresholds.units);
        let chart_viewer = ChartViewer::new(config.canvas);
        let threshold_labels = config.thresholds.labels();

        Self {
            renderer: ChartRenderer::new(config),
            control_panel,
            chart_viewer,
            threshold_labels,
        }
    }

    /// Plot the entry contents; invalid input is reported and otherwise ignored.
    fn handle_submit(&mut self) {
        let raw = self.control_panel.entry.clone();
        match self.renderer.append_value(&raw) {
            Ok(()) => {
                let count = self.renderer.series().len();
                let value = self.renderer.latest().unwrap_or_default();
                tracing::debug!(value, count, "plotted value");
                self.control_panel
                    .set_status(format!("Plotted {value} ({count} points)"), false);
            }
            Err(e) => {
                tracing::warn!(error = %e, "rejected submission");
                self.control_panel.set_status(e.to_string(), true);
            }
        }
    }

    /// Handle PNG export of the current canvas
    fn handle_export_png(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("temperature_chart.png")
            .save_file()
        else {
            return; // User cancelled
        };

        let size = self.renderer.config().canvas;
        if let Err(e) = export::export_png(self.renderer.surface(), size, &path) {
            tracing::error!(error = %e, path = %path.display(), "export failed");
            self.control_panel
                .set_status(format!("Export error: {e}"), true);
            return;
        }

        self.control_panel
            .set_status(format!("Exported {}", path.display()), false);

        if self.control_panel.open_after_export {
            if let Err(e) = open::that(&path) {
                tracing::warn!(error = %e, path = %path.display(), "could not open export");
                self.control_panel
                    .set_status(format!("Exported, but could not open it: {e}"), true);
            }
        }
    }
}

impl eframe::App for ThermoChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let action = TopBottomPanel::top("control_panel")
            .show(ctx, |ui| self.control_panel.show(ui))
            .inner;

        match action {
            ControlPanelAction::Submit => self.handle_submit(),
            ControlPanelAction::ExportPng => self.handle_export_png(),
            ControlPanelAction::None => {}
        }

        TopBottomPanel::bottom("thresholds").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                for label in &self.threshold_labels {
                    ui.label(label);
                    ui.add_space(20.0);
                }
            });
            ui.add_space(6.0);
        });

        CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                self.chart_viewer.show(ui, self.renderer.surface());
            });
        });
    }
}
