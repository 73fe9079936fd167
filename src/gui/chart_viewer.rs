//! Chart Viewer Widget
//! Paints the chart surface onto a fixed-size egui canvas.

use crate::charts::{arrowhead, text_origin, Anchor, Shape, Surface};
use crate::config::CanvasSize;
use egui::epaint::TextShape;
use egui::{Color32, FontId, Painter, Pos2, Sense, Stroke, Vec2};

const FONT_SIZE: f32 = 13.0;

/// Fixed-size canvas. No resize handling; shapes are in canvas pixels.
pub struct ChartViewer {
    size: CanvasSize,
}

impl ChartViewer {
    pub fn new(size: CanvasSize) -> Self {
        Self { size }
    }

    /// Draw the canvas background and every shape in paint order
    pub fn show(&self, ui: &mut egui::Ui, surface: &Surface) {
        let (response, painter) = ui.allocate_painter(
            egui::vec2(self.size.width, self.size.height),
            Sense::hover(),
        );
        let rect = response.rect;
        painter.rect_filled(rect, 0.0, Color32::WHITE);

        let painter = painter.with_clip_rect(rect);
        let offset = rect.min.to_vec2();
        for shape in surface.shapes() {
            Self::paint_shape(&painter, shape, offset);
        }
    }

    fn paint_shape(painter: &Painter, shape: &Shape, offset: Vec2) {
        match shape {
            Shape::Line {
                from,
                to,
                color,
                width,
                arrow,
            } => {
                let (from, to) = (*from + offset, *to + offset);
                painter.line_segment([from, to], Stroke::new(*width, *color));
                if *arrow {
                    let head = arrowhead(from, to, *width);
                    painter.add(egui::Shape::convex_polygon(
                        head.to_vec(),
                        *color,
                        Stroke::NONE,
                    ));
                }
            }
            Shape::Text {
                pos,
                text,
                anchor,
                angle,
                color,
            } => Self::paint_text(painter, *pos + offset, text, *anchor, *angle, *color),
            Shape::Oval {
                rect,
                fill,
                outline,
            } => {
                let radius = rect.width().min(rect.height()) / 2.0;
                painter.circle(
                    rect.center() + offset,
                    radius,
                    fill.unwrap_or(Color32::TRANSPARENT),
                    outline.map_or(Stroke::NONE, |c| Stroke::new(1.0, c)),
                );
            }
            Shape::Rect {
                rect,
                fill,
                outline,
            } => {
                let rect = rect.translate(offset);
                if let Some(fill) = fill {
                    painter.rect_filled(rect, 0.0, *fill);
                }
                if let Some(outline) = outline {
                    painter.rect_stroke(rect, 0.0, Stroke::new(1.0, *outline));
                }
            }
        }
    }

    fn paint_text(
        painter: &Painter,
        pos: Pos2,
        text: &str,
        anchor: Anchor,
        angle: f32,
        color: Color32,
    ) {
        let font = FontId::proportional(FONT_SIZE);
        if angle == 0.0 {
            painter.text(pos, anchor.to_align2(), text, font, color);
            return;
        }

        let galley = painter.layout_no_wrap(text.to_string(), font, color);
        let origin = text_origin(pos, galley.size(), anchor, angle);
        painter.add(TextShape::new(origin, galley, color).with_angle(-angle.to_radians()));
    }
}
