//! SVG visualizer.
//!
//! Draws each geometry's buffer as a filled patch and the geometry itself as
//! an outline on one canvas. Both axes share one scale so distances look the
//! same in every direction, and the y axis points up as on a map.

use geo::{BoundingRect, Coord as GeoCoord, LineString, MultiPolygon, Rect, Validation};

use crate::compare::buffer_geometry;
use crate::model::{Geometry, Record};

use super::SvgOptions;

/// Render records and their buffers to an SVG document.
///
/// Geometries failing the validity check are skipped with a warning, as are
/// buffers that come back empty.
pub fn to_svg<'a, I>(records: I, options: &SvgOptions) -> String
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut layers: Vec<(&Geometry, MultiPolygon<f64>)> = Vec::new();
    for record in records {
        let shape = record.geometry.to_geo();
        if !shape.is_valid() {
            log::warn!(
                "Invalid geometry, skipping {}",
                record.group_line().unwrap_or("record")
            );
            continue;
        }

        let buffer = buffer_geometry(&record.geometry, options.buffer_distance);
        match buffer.0.len() {
            0 => log::warn!(
                "Unexpected buffer result for {}: empty",
                record.group_line().unwrap_or("record")
            ),
            1 => log::debug!("Visualizing a Polygon buffer"),
            n => log::debug!("Visualizing a MultiPolygon buffer with {} parts", n),
        }
        layers.push((&record.geometry, buffer));
    }

    let Some(bounds) = drawing_bounds(&layers) else {
        log::warn!("Nothing to draw");
        return svg_document(options, String::new());
    };
    let view = Viewport::fit(bounds, options);

    let mut body = String::new();
    for (_, buffer) in &layers {
        if buffer.0.is_empty() {
            continue;
        }
        body.push_str(&format!(
            "  <path d=\"{}\" fill=\"{}\" fill-opacity=\"{}\" stroke=\"{}\" fill-rule=\"evenodd\"/>\n",
            view.path_data(buffer),
            options.buffer_fill,
            options.buffer_opacity,
            options.buffer_stroke
        ));
    }
    for (geometry, _) in &layers {
        body.push_str(&geometry_element(geometry, &view, options));
    }

    svg_document(options, body)
}

fn svg_document(options: &SvgOptions, body: String) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
        w = options.width,
        h = options.height,
        body = body
    )
}

fn geometry_element(geometry: &Geometry, view: &Viewport, options: &SvgOptions) -> String {
    let stroke = &options.geometry_stroke;
    let width = options.line_width;
    match geometry {
        Geometry::Point(c) => {
            let (x, y) = view.project((*c).into());
            format!(
                "  <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\" fill=\"{}\"/>\n",
                x, y, width, stroke
            )
        }
        Geometry::LineString(cs) => format!(
            "  <polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
            view.points(cs.iter().map(|c| (*c).into())),
            stroke,
            width
        ),
        Geometry::Polygon(cs) => format!(
            "  <polygon points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
            view.points(cs.iter().map(|c| (*c).into())),
            stroke,
            width
        ),
    }
}

/// Bounding rectangle over buffers and raw geometries.
fn drawing_bounds(layers: &[(&Geometry, MultiPolygon<f64>)]) -> Option<Rect<f64>> {
    let mut bounds: Option<Rect<f64>> = None;
    for (geometry, buffer) in layers {
        for rect in [buffer.bounding_rect(), geometry.to_geo().bounding_rect()]
            .into_iter()
            .flatten()
        {
            bounds = Some(match bounds {
                Some(b) => Rect::new(
                    GeoCoord {
                        x: b.min().x.min(rect.min().x),
                        y: b.min().y.min(rect.min().y),
                    },
                    GeoCoord {
                        x: b.max().x.max(rect.max().x),
                        y: b.max().y.max(rect.max().y),
                    },
                ),
                None => rect,
            });
        }
    }
    bounds
}

/// Maps data coordinates to canvas pixels with one uniform scale.
struct Viewport {
    min_x: f64,
    min_y: f64,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    height: f64,
}

impl Viewport {
    fn fit(bounds: Rect<f64>, options: &SvgOptions) -> Self {
        let pad = options.padding as f64;
        let avail_w = (options.width as f64 - 2.0 * pad).max(1.0);
        let avail_h = (options.height as f64 - 2.0 * pad).max(1.0);
        let span_x = bounds.width().max(f64::EPSILON);
        let span_y = bounds.height().max(f64::EPSILON);
        let scale = (avail_w / span_x).min(avail_h / span_y);
        // Center the drawing along the axis with slack.
        let offset_x = pad + (avail_w - span_x * scale) / 2.0;
        let offset_y = pad + (avail_h - span_y * scale) / 2.0;
        Self {
            min_x: bounds.min().x,
            min_y: bounds.min().y,
            scale,
            offset_x,
            offset_y,
            height: options.height as f64,
        }
    }

    fn project(&self, c: GeoCoord<f64>) -> (f64, f64) {
        let x = self.offset_x + (c.x - self.min_x) * self.scale;
        let y = self.height - (self.offset_y + (c.y - self.min_y) * self.scale);
        (x, y)
    }

    fn points<I: Iterator<Item = GeoCoord<f64>>>(&self, coords: I) -> String {
        coords
            .map(|c| {
                let (x, y) = self.project(c);
                format!("{:.2},{:.2}", x, y)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn ring_data(&self, ring: &LineString<f64>, out: &mut String) {
        for (i, c) in ring.coords().enumerate() {
            let (x, y) = self.project(*c);
            let cmd = if i == 0 { 'M' } else { 'L' };
            out.push_str(&format!("{}{:.2} {:.2} ", cmd, x, y));
        }
        out.push_str("Z ");
    }

    fn path_data(&self, shape: &MultiPolygon<f64>) -> String {
        let mut d = String::new();
        for polygon in &shape.0 {
            self.ring_data(polygon.exterior(), &mut d);
            for interior in polygon.interiors() {
                self.ring_data(interior, &mut d);
            }
        }
        d.trim_end().to_string()
    }
}
