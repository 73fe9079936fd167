//! Control Panel Widget
//! Top bar with the value entry, chart actions and the status line.

use egui::{Color32, RichText};

/// Value entry and action buttons above the chart.
pub struct ControlPanel {
    pub entry: String,
    pub status: String,
    pub status_is_error: bool,
    pub open_after_export: bool,
    entry_label: String,
}

impl ControlPanel {
    pub fn new(units: &str) -> Self {
        Self {
            entry: String::new(),
            status: "Ready".to_string(),
            status_is_error: false,
            open_after_export: false,
            entry_label: format!("Enter new value ({units}):"),
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label(&self.entry_label);

            let response =
                ui.add(egui::TextEdit::singleline(&mut self.entry).desired_width(120.0));
            // Enter in the field submits like the button
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                action = ControlPanelAction::Submit;
            }

            if ui.button("Update Chart").clicked() {
                action = ControlPanelAction::Submit;
            }

            ui.separator();

            if ui.button("💾 Export PNG").clicked() {
                action = ControlPanelAction::ExportPng;
            }
            ui.checkbox(&mut self.open_after_export, "Open after export");
        });

        ui.add_space(4.0);

        let status_color = if self.status_is_error {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        ui.add_space(4.0);

        action
    }

    /// Set status line text
    pub fn set_status(&mut self, status: impl Into<String>, is_error: bool) {
        self.status = status.into();
        self.status_is_error = is_error;
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Submit,
    ExportPng,
}
