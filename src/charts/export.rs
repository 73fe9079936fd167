//! Static Chart Export
//! Rasterizes the surface with the plotters bitmap backend and saves it as PNG.

use crate::charts::surface::{arrowhead, Anchor, Shape, Surface};
use crate::config::CanvasSize;
use egui::{Color32, Pos2};
use image::RgbImage;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use std::path::Path;
use thiserror::Error;

const FONT_FAMILY: &str = "sans-serif";
const FONT_SIZE: f64 = 13.0;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),
    #[error("Pixel buffer does not match {0}x{1}")]
    Buffer(u32, u32),
}

type Area<'a> = DrawingArea<BitMapBackend<'a>, plotters::coord::Shift>;

fn draw_err(e: impl std::fmt::Display) -> ExportError {
    ExportError::Draw(e.to_string())
}

fn rgb(color: Color32) -> RGBColor {
    RGBColor(color.r(), color.g(), color.b())
}

fn coord(p: Pos2) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

fn text_pos(anchor: Anchor) -> Pos {
    match anchor {
        Anchor::Center => Pos::new(HPos::Center, VPos::Center),
        Anchor::N => Pos::new(HPos::Center, VPos::Top),
        Anchor::E => Pos::new(HPos::Right, VPos::Center),
        Anchor::W => Pos::new(HPos::Left, VPos::Center),
    }
}

/// Plotters rotates clockwise in quarter turns.
fn font_transform(angle: f32) -> FontTransform {
    let quarter = ((angle / 90.0).round() as i32).rem_euclid(4);
    match quarter {
        1 => FontTransform::Rotate270,
        2 => FontTransform::Rotate180,
        3 => FontTransform::Rotate90,
        _ => FontTransform::None,
    }
}

/// Plotters offsets the anchor in the text's own frame and then rotates about
/// the anchor point, matching `text_origin` in the viewer.
fn text_style(anchor: Anchor, angle: f32, color: Color32) -> TextStyle<'static> {
    (FONT_FAMILY, FONT_SIZE)
        .into_font()
        .transform(font_transform(angle))
        .color(&rgb(color))
        .pos(text_pos(anchor))
}

fn draw_shape(area: &Area<'_>, shape: &Shape) -> Result<(), ExportError> {
    match shape {
        Shape::Line {
            from,
            to,
            color,
            width,
            arrow,
        } => {
            let color = rgb(*color);
            area.draw(&PathElement::new(
                vec![coord(*from), coord(*to)],
                color.stroke_width(width.round().max(1.0) as u32),
            ))
            .map_err(draw_err)?;
            if *arrow {
                let head = arrowhead(*from, *to, *width);
                area.draw(&Polygon::new(
                    head.iter().map(|p| coord(*p)).collect::<Vec<_>>(),
                    color.filled(),
                ))
                .map_err(draw_err)?;
            }
        }
        Shape::Text {
            pos,
            text,
            anchor,
            angle,
            color,
        } => {
            let style = text_style(*anchor, *angle, *color);
            area.draw(&Text::new(text.clone(), coord(*pos), style))
                .map_err(draw_err)?;
        }
        Shape::Oval {
            rect,
            fill,
            outline,
        } => {
            let center = coord(rect.center());
            let radius = (rect.width().min(rect.height()) / 2.0).round() as i32;
            if let Some(fill) = fill {
                area.draw(&Circle::new(center, radius, rgb(*fill).filled()))
                    .map_err(draw_err)?;
            }
            if let Some(outline) = outline {
                area.draw(&Circle::new(center, radius, rgb(*outline).stroke_width(1)))
                    .map_err(draw_err)?;
            }
        }
        Shape::Rect {
            rect,
            fill,
            outline,
        } => {
            let corners = [coord(rect.min), coord(rect.max)];
            if let Some(fill) = fill {
                area.draw(&Rectangle::new(corners, rgb(*fill).filled()))
                    .map_err(draw_err)?;
            }
            if let Some(outline) = outline {
                area.draw(&Rectangle::new(corners, rgb(*outline).stroke_width(1)))
                    .map_err(draw_err)?;
            }
        }
    }
    Ok(())
}

/// Render every shape on a white canvas of the given size.
pub fn render_rgb(surface: &Surface, size: CanvasSize) -> Result<RgbImage, ExportError> {
    let width = size.width.round().max(1.0) as u32;
    let height = size.height.round().max(1.0) as u32;
    let mut buffer = vec![0u8; width as usize * height as usize * 3];

    {
        let area = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        area.fill(&WHITE).map_err(draw_err)?;
        for shape in surface.shapes() {
            draw_shape(&area, shape)?;
        }
        area.present().map_err(draw_err)?;
    }

    RgbImage::from_raw(width, height, buffer).ok_or(ExportError::Buffer(width, height))
}

/// Render the surface and write it to `path` as PNG.
pub fn export_png(surface: &Surface, size: CanvasSize, path: &Path) -> Result<(), ExportError> {
    let img = render_rgb(surface, size)?;
    img.save_with_format(path, image::ImageFormat::Png)?;
    tracing::info!(
        path = %path.display(),
        shapes = surface.len(),
        "exported chart"
    );
    Ok(())
}
