//! Chart Configuration
//! Axis layout, gauge geometry and display thresholds, optionally loaded from JSON.

use egui::{pos2, Pos2};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Inclusive range of tick values with a fixed step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickRange {
    pub start: i64,
    pub end: i64,
    pub step: i64,
}

impl TickRange {
    pub const fn new(start: i64, end: i64, step: i64) -> Self {
        Self { start, end, step }
    }

    pub fn values(&self) -> impl Iterator<Item = i64> {
        (self.start..=self.end).step_by(self.step.max(1) as usize)
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if self.step <= 0 {
            return Err(ConfigError::Invalid(format!(
                "{name}: tick step must be positive, got {}",
                self.step
            )));
        }
        if self.end < self.start {
            return Err(ConfigError::Invalid(format!(
                "{name}: tick range end {} is before start {}",
                self.end, self.start
            )));
        }
        Ok(())
    }
}

/// Time-series axis layout. All coordinates are canvas pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    pub origin_x: f32,
    pub baseline_y: f32,
    /// Pixels per time step
    pub x_step: f32,
    /// Pixels per degree
    pub y_step: f32,
    /// Shifts negative temperatures into positive pixel space
    pub y_offset: i64,
    pub x_axis_end: f32,
    pub y_axis_top: f32,
    pub x_ticks: TickRange,
    pub y_ticks: TickRange,
    pub time_label_pos: [f32; 2],
    pub temperature_label_pos: [f32; 2],
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            origin_x: 50.0,
            baseline_y: 280.0,
            x_step: 20.0,
            y_step: 5.0,
            y_offset: 10,
            x_axis_end: 550.0,
            y_axis_top: 10.0,
            x_ticks: TickRange::new(0, 25, 5),
            y_ticks: TickRange::new(-10, 40, 10),
            time_label_pos: [550.0, 290.0],
            temperature_label_pos: [15.0, 50.0],
        }
    }
}

impl AxisConfig {
    /// Screen x for a 1-based sample index.
    pub fn x_for(&self, index: usize) -> f32 {
        (self.origin_x as f64 + index as f64 * self.x_step as f64) as f32
    }

    /// Screen y for a temperature value.
    pub fn y_for(&self, value: i64) -> f32 {
        (self.baseline_y as f64 - (value as f64 + self.y_offset as f64) * self.y_step as f64) as f32
    }

    pub fn point_for(&self, index: usize, value: i64) -> Pos2 {
        pos2(self.x_for(index), self.y_for(value))
    }
}

/// Thermometer gauge geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeConfig {
    pub left: f32,
    /// Distance of the stem top from the canvas top, and of the bulb from the bottom
    pub margin: f32,
    pub bulb_width: f32,
    pub stem_inset: f32,
    /// Gap between the stem rectangle bottom and the bulb bottom
    pub stem_bottom_gap: f32,
    pub px_per_unit: f32,
    pub pointer_units: f32,
    pub scale: TickRange,
    pub initial_value: i64,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            left: 700.0,
            margin: 10.0,
            bulb_width: 30.0,
            stem_inset: 5.0,
            stem_bottom_gap: 20.0,
            px_per_unit: 3.0,
            pointer_units: 5.0,
            scale: TickRange::new(0, 90, 10),
            initial_value: 10,
        }
    }
}

/// Static display thresholds shown under the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub units: String,
    pub low: i64,
    pub high: i64,
    pub normal: [i64; 2],
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            units: "°C".to_string(),
            low: 18,
            high: 27,
            normal: [20, 25],
        }
    }
}

impl Thresholds {
    pub fn labels(&self) -> [String; 4] {
        let u = &self.units;
        [
            format!("Units: {u}"),
            format!("Low Value: {}{u}", self.low),
            format!("Normal Range: {}{u} to {}{u}", self.normal[0], self.normal[1]),
            format!("High Value: {}{u}", self.high),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 300.0,
        }
    }
}

/// Complete chart configuration. Read once at startup, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub canvas: CanvasSize,
    pub axis: AxisConfig,
    pub gauge: GaugeConfig,
    pub thresholds: Thresholds,
}

impl ChartConfig {
    /// Load a JSON config file. Missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.axis.x_ticks.validate("axis.x_ticks")?;
        self.axis.y_ticks.validate("axis.y_ticks")?;
        self.gauge.scale.validate("gauge.scale")?;

        if self.axis.x_step <= 0.0 || self.axis.y_step <= 0.0 {
            return Err(ConfigError::Invalid(
                "axis steps must be positive".to_string(),
            ));
        }
        let gauge = &self.gauge;
        for (name, value) in [
            ("gauge.px_per_unit", gauge.px_per_unit),
            ("gauge.pointer_units", gauge.pointer_units),
            ("gauge.bulb_width", gauge.bulb_width),
            ("gauge.stem_inset", gauge.stem_inset),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.canvas.width < 1.0 || self.canvas.height < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "canvas must be at least 1x1, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_axis_maps_reference_points() {
        let axis = AxisConfig::default();
        assert_eq!(axis.point_for(1, 22), pos2(70.0, 120.0));
        assert_eq!(axis.point_for(2, -10), pos2(90.0, 280.0));
        assert_eq!(axis.y_for(40), 30.0);
    }

    #[test]
    fn tick_ranges_are_inclusive() {
        let x_ticks: Vec<i64> = AxisConfig::default().x_ticks.values().collect();
        assert_eq!(x_ticks, vec![0, 5, 10, 15, 20, 25]);
        let ticks: Vec<i64> = AxisConfig::default().y_ticks.values().collect();
        assert_eq!(ticks, vec![-10, 0, 10, 20, 30, 40]);
        let gauge: Vec<i64> = GaugeConfig::default().scale.values().collect();
        assert_eq!(gauge.len(), 10);
        assert_eq!(gauge.last(), Some(&90));
    }

    #[test]
    fn threshold_labels() {
        let labels = Thresholds::default().labels();
        assert_eq!(labels[0], "Units: °C");
        assert_eq!(labels[1], "Low Value: 18°C");
        assert_eq!(labels[2], "Normal Range: 20°C to 25°C");
        assert_eq!(labels[3], "High Value: 27°C");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "axis": {{ "x_step": 10.0 }}, "thresholds": {{ "units": "F" }} }}"#)
            .unwrap();

        let config = ChartConfig::load(file.path()).unwrap();
        assert_eq!(config.axis.x_step, 10.0);
        assert_eq!(config.axis.y_step, 5.0);
        assert_eq!(config.thresholds.units, "F");
        assert_eq!(config.thresholds.low, 18);
        assert_eq!(config.gauge, GaugeConfig::default());
    }

    #[test]
    fn zero_tick_step_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "gauge": {{ "scale": {{ "start": 0, "end": 90, "step": 0 }} }} }}"#
        )
        .unwrap();

        let err = ChartConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn non_positive_gauge_sizes_are_rejected() {
        let cases = [
            r#"{ "gauge": { "pointer_units": -5.0 } }"#,
            r#"{ "gauge": { "bulb_width": 0.0 } }"#,
            r#"{ "gauge": { "stem_inset": -1.0 } }"#,
            r#"{ "gauge": { "px_per_unit": 0.0 } }"#,
        ];
        for json in cases {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            file.write_all(json.as_bytes()).unwrap();
            let err = ChartConfig::load(file.path()).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{json}: {err}");
        }
        assert!(ChartConfig::default().validate().is_ok());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            ChartConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ChartConfig::load(dir.path().join("absent.json")),
            Err(ConfigError::Io { .. })
        ));
    }
}
