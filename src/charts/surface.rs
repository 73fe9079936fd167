//! Drawing Surface
//! Retained list of canvas shapes, addressable by handle so single shapes can be replaced.

use egui::{pos2, vec2, Color32, Pos2, Rect, Vec2};

/// Arrowhead length along the line.
const ARROW_LENGTH: f32 = 10.0;
/// Arrowhead half-width beyond the line.
const ARROW_HALF_WIDTH: f32 = 4.0;

/// Handle of a shape on a [`Surface`]. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(u64);

/// Which point of a text box sits on the text position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Center,
    N,
    E,
    W,
}

impl Anchor {
    /// Anchor as fractions of the text box (along, across).
    pub fn fractions(self) -> Vec2 {
        match self {
            Anchor::Center => vec2(0.5, 0.5),
            Anchor::N => vec2(0.5, 0.0),
            Anchor::E => vec2(1.0, 0.5),
            Anchor::W => vec2(0.0, 0.5),
        }
    }

    pub fn to_align2(self) -> egui::Align2 {
        match self {
            Anchor::Center => egui::Align2::CENTER_CENTER,
            Anchor::N => egui::Align2::CENTER_TOP,
            Anchor::E => egui::Align2::RIGHT_CENTER,
            Anchor::W => egui::Align2::LEFT_CENTER,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line {
        from: Pos2,
        to: Pos2,
        color: Color32,
        width: f32,
        /// Arrowhead at `to`
        arrow: bool,
    },
    Text {
        pos: Pos2,
        text: String,
        anchor: Anchor,
        /// Counter-clockwise rotation in degrees
        angle: f32,
        color: Color32,
    },
    Oval {
        rect: Rect,
        fill: Option<Color32>,
        outline: Option<Color32>,
    },
    Rect {
        rect: Rect,
        fill: Option<Color32>,
        outline: Option<Color32>,
    },
}

impl Shape {
    pub fn line(from: Pos2, to: Pos2) -> Self {
        Shape::Line {
            from,
            to,
            color: Color32::BLACK,
            width: 1.0,
            arrow: false,
        }
    }

    pub fn arrow(from: Pos2, to: Pos2) -> Self {
        Shape::Line {
            from,
            to,
            color: Color32::BLACK,
            width: 1.0,
            arrow: true,
        }
    }

    pub fn text(pos: Pos2, text: impl Into<String>, anchor: Anchor) -> Self {
        Shape::Text {
            pos,
            text: text.into(),
            anchor,
            angle: 0.0,
            color: Color32::BLACK,
        }
    }
}

/// Tip and the two trailing corners of the arrowhead for a line ending at `to`.
pub fn arrowhead(from: Pos2, to: Pos2, width: f32) -> [Pos2; 3] {
    let dir = (to - from).normalized();
    let normal = dir.rot90();
    let base = to - dir * ARROW_LENGTH;
    let half = ARROW_HALF_WIDTH + width / 2.0;
    [to, base + normal * half, base - normal * half]
}

/// Top-left origin of an unrotated `size` text box that places `anchor` on `pos`
/// after rotating the box `angle` degrees counter-clockwise about that origin.
pub fn text_origin(pos: Pos2, size: Vec2, anchor: Anchor, angle: f32) -> Pos2 {
    let f = anchor.fractions();
    let local = vec2(f.x * size.x, f.y * size.y);
    // Screen y grows downward, so a counter-clockwise turn is a negative screen angle
    let theta = -angle.to_radians();
    let (sin, cos) = theta.sin_cos();
    let rotated = vec2(local.x * cos - local.y * sin, local.x * sin + local.y * cos);
    pos2(pos.x - rotated.x, pos.y - rotated.y)
}

/// Shapes in paint order.
#[derive(Debug, Default)]
pub struct Surface {
    shapes: Vec<(ShapeId, Shape)>,
    next_id: u64,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, shape: Shape) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.shapes.push((id, shape));
        id
    }

    /// Remove a shape. Returns false if the handle is unknown.
    pub fn delete(&mut self, id: ShapeId) -> bool {
        match self.shapes.iter().position(|(sid, _)| *sid == id) {
            Some(idx) => {
                self.shapes.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    #[cfg(test)]
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes
            .iter()
            .find(|(sid, _)| *sid == id)
            .map(|(_, shape)| shape)
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().map(|(_, shape)| shape)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Pos2, b: Pos2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut surface = Surface::new();
        let a = surface.add(Shape::line(pos2(0.0, 0.0), pos2(1.0, 1.0)));
        assert!(surface.delete(a));
        let b = surface.add(Shape::line(pos2(0.0, 0.0), pos2(1.0, 1.0)));
        assert_ne!(a, b);
        assert!(!surface.delete(a));
        assert_eq!(surface.len(), 1);
    }

    #[test]
    fn clear_removes_everything() {
        let mut surface = Surface::new();
        let id = surface.add(Shape::text(pos2(1.0, 1.0), "x", Anchor::N));
        surface.add(Shape::arrow(pos2(0.0, 0.0), pos2(5.0, 0.0)));
        surface.clear();
        assert!(surface.is_empty());
        assert!(surface.get(id).is_none());
    }

    #[test]
    fn arrowhead_points_along_the_line() {
        let [tip, a, b] = arrowhead(pos2(50.0, 280.0), pos2(550.0, 280.0), 1.0);
        assert_eq!(tip, pos2(550.0, 280.0));
        assert!((a.x - 540.0).abs() < 1e-3 && (b.x - 540.0).abs() < 1e-3);
        assert!((a.y - b.y).abs() > 8.0);
    }

    #[test]
    fn unrotated_text_origin_follows_anchor() {
        let size = vec2(40.0, 10.0);
        assert!(close(text_origin(pos2(100.0, 50.0), size, Anchor::W, 0.0), pos2(100.0, 45.0)));
        assert!(close(text_origin(pos2(100.0, 50.0), size, Anchor::E, 0.0), pos2(60.0, 45.0)));
        assert!(close(text_origin(pos2(100.0, 50.0), size, Anchor::N, 0.0), pos2(80.0, 50.0)));
    }

    #[test]
    fn quarter_turn_text_ends_at_anchor() {
        // Read bottom to top: the east end of the text lands on the anchor point
        let size = vec2(40.0, 10.0);
        let origin = text_origin(pos2(15.0, 50.0), size, Anchor::E, 90.0);
        assert!(close(origin, pos2(10.0, 90.0)));
    }
}
