//! Chart Renderer
//! Owns the value series and draws it incrementally onto the surface.
//!
//! Layout:
//! 1. Time-series axes with tick labels on the left
//! 2. One marker + value label per submission, joined by line segments
//! 3. Thermometer gauge on the right with a single pointer for the latest value

use crate::charts::surface::{Anchor, Shape, ShapeId, Surface};
use crate::config::{ChartConfig, GaugeConfig};
use crate::data::{parse_value, InputError, ValueSeries};
use egui::{pos2, vec2, Color32, Rect};

const MARKER_RADIUS: f32 = 3.0;
const MARKER_LABEL_OFFSET: f32 = 10.0;
const X_TICK_LABEL_GAP: f32 = 8.0;
const Y_TICK_LABEL_GAP: f32 = 10.0;
const CONNECTOR_WIDTH: f32 = 2.0;

const MARKER_FILL: Color32 = Color32::RED;
const CONNECTOR_COLOR: Color32 = Color32::BLUE;
const BULB_OUTLINE: Color32 = Color32::from_rgb(0xff, 0x11, 0x11);
const STEM_FILL: Color32 = Color32::from_rgb(0x11, 0xff, 0x11);
const POINTER_FILL: Color32 = Color32::from_rgb(0x87, 0xce, 0xfa);

/// Gauge coordinates derived from the config and canvas height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeLayout {
    pub bulb: Rect,
    /// Screen y of value 0 on the gauge
    pub stem_top_y: f32,
    pub stem_line_x: f32,
    /// Filled stem; the pointer spans its width
    pub stem: Rect,
    pub label_x: f32,
    pub px_per_unit: f32,
    pub pointer_height: f32,
}

impl GaugeLayout {
    pub fn new(gauge: &GaugeConfig, canvas_height: f32) -> Self {
        let bulb = Rect::from_min_max(
            pos2(gauge.left, canvas_height - gauge.margin - gauge.bulb_width),
            pos2(gauge.left + gauge.bulb_width, canvas_height - gauge.margin),
        );
        let stem = Rect::from_min_max(
            pos2(bulb.left() + gauge.stem_inset, gauge.margin),
            pos2(bulb.right() - gauge.stem_inset, bulb.bottom() - gauge.stem_bottom_gap),
        );
        Self {
            bulb,
            stem_top_y: bulb.bottom() - gauge.bulb_width / 2.0,
            stem_line_x: bulb.left() - 2.0,
            stem,
            label_x: gauge.left - 5.0,
            px_per_unit: gauge.px_per_unit,
            pointer_height: gauge.pointer_units * gauge.px_per_unit,
        }
    }

    /// Screen y for a value on the gauge scale.
    pub fn y_for(&self, value: i64) -> f32 {
        (self.stem_top_y as f64 - value as f64 * self.px_per_unit as f64) as f32
    }

    pub fn pointer_rect(&self, value: i64) -> Rect {
        let top = self.y_for(value);
        Rect::from_min_max(
            pos2(self.stem.left(), top),
            pos2(self.stem.right(), top + self.pointer_height),
        )
    }
}

/// Draws the chart and the gauge, one submission at a time.
pub struct ChartRenderer {
    config: ChartConfig,
    gauge: GaugeLayout,
    series: ValueSeries,
    surface: Surface,
    pointer: Option<ShapeId>,
}

impl ChartRenderer {
    /// Build the renderer and draw the static layout plus the initial pointer.
    pub fn new(config: ChartConfig) -> Self {
        let gauge = GaugeLayout::new(&config.gauge, config.canvas.height);
        let initial = config.gauge.initial_value;
        let mut renderer = Self {
            config,
            gauge,
            series: ValueSeries::new(),
            surface: Surface::new(),
            pointer: None,
        };
        renderer.draw_axes();
        renderer.draw_gauge_scale();
        renderer.update_gauge_pointer(initial);
        renderer
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn series(&self) -> &ValueSeries {
        &self.series
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Handle of the current gauge pointer shape.
    #[cfg(test)]
    pub fn pointer(&self) -> Option<ShapeId> {
        self.pointer
    }

    pub fn latest(&self) -> Option<i64> {
        self.series.last()
    }

    /// Clear the surface and draw both axes with their labels and ticks.
    pub fn draw_axes(&mut self) {
        self.surface.clear();
        // Cleared along with everything else
        self.pointer = None;

        let axis = &self.config.axis;
        let origin = pos2(axis.origin_x, axis.baseline_y);

        self.surface
            .add(Shape::arrow(origin, pos2(axis.x_axis_end, axis.baseline_y)));
        self.surface
            .add(Shape::arrow(origin, pos2(axis.origin_x, axis.y_axis_top)));

        let [tx, ty] = axis.time_label_pos;
        self.surface
            .add(Shape::text(pos2(tx, ty), "Time (s)", Anchor::W));
        let [px, py] = axis.temperature_label_pos;
        self.surface.add(Shape::Text {
            pos: pos2(px, py),
            text: format!("Temperature ({})", self.config.thresholds.units),
            anchor: Anchor::E,
            angle: 90.0,
            color: Color32::BLACK,
        });

        for i in axis.x_ticks.values() {
            let x = (axis.origin_x as f64 + i as f64 * axis.x_step as f64) as f32;
            self.surface.add(Shape::text(
                pos2(x, axis.baseline_y + X_TICK_LABEL_GAP),
                i.to_string(),
                Anchor::N,
            ));
        }

        for i in axis.y_ticks.values() {
            self.surface.add(Shape::text(
                pos2(axis.origin_x - Y_TICK_LABEL_GAP, axis.y_for(i)),
                i.to_string(),
                Anchor::E,
            ));
        }
    }

    /// Parse a submission and plot it. Invalid input leaves everything untouched.
    pub fn append_value(&mut self, raw: &str) -> Result<(), InputError> {
        let value = parse_value(raw)?;
        let index = self.series.push(value);
        let point = self.config.axis.point_for(index, value);

        self.surface.add(Shape::Oval {
            rect: Rect::from_center_size(point, vec2(MARKER_RADIUS, MARKER_RADIUS) * 2.0),
            fill: Some(MARKER_FILL),
            outline: Some(Color32::BLACK),
        });
        self.surface.add(Shape::text(
            pos2(point.x, point.y - MARKER_LABEL_OFFSET),
            value.to_string(),
            Anchor::Center,
        ));

        if let Some(previous) = self.series.get(index - 1) {
            let previous_point = self.config.axis.point_for(index - 1, previous);
            self.surface.add(Shape::Line {
                from: point,
                to: previous_point,
                color: CONNECTOR_COLOR,
                width: CONNECTOR_WIDTH,
                arrow: false,
            });
        }

        self.update_gauge_pointer(value);
        Ok(())
    }

    /// Draw the thermometer outline and its scale labels.
    pub fn draw_gauge_scale(&mut self) {
        let gauge = self.gauge;

        self.surface.add(Shape::Oval {
            rect: gauge.bulb,
            fill: Some(STEM_FILL),
            outline: Some(BULB_OUTLINE),
        });
        self.surface.add(Shape::line(
            pos2(gauge.stem_line_x, gauge.stem.top()),
            pos2(gauge.stem_line_x, gauge.stem_top_y),
        ));
        self.surface.add(Shape::Rect {
            rect: gauge.stem,
            fill: Some(STEM_FILL),
            outline: None,
        });

        for i in self.config.gauge.scale.values() {
            self.surface.add(Shape::text(
                pos2(gauge.label_x, gauge.y_for(i)),
                i.to_string(),
                Anchor::E,
            ));
        }
    }

    /// Replace the gauge pointer with one at `value`.
    pub fn update_gauge_pointer(&mut self, value: i64) {
        if let Some(old) = self.pointer.take() {
            self.surface.delete(old);
        }
        let id = self.surface.add(Shape::Rect {
            rect: self.gauge.pointer_rect(value),
            fill: Some(POINTER_FILL),
            outline: None,
        });
        self.pointer = Some(id);
    }
}
