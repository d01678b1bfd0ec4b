//! Annotation shape types for drawing on screenshots
//!
//! All shapes store coordinates in global logical coordinates. Colors are
//! opaque strings interpreted by the rendering layer (typically `#RRGGBB`).

use super::geometry::{Point, RectF};

/// Freehand pen stroke
#[derive(Clone, Debug, PartialEq)]
pub struct PolylineShape {
    /// Ordered points of the stroke
    pub points: Vec<Point>,
    /// Stroke color of this polyline
    pub stroke_color: String,
    /// Stroke width in logical pixels
    pub stroke_width: f32,
}

/// Straight line segment
#[derive(Clone, Debug, PartialEq)]
pub struct LineShape {
    pub start: Point,
    pub end: Point,
    /// Stroke color of this line
    pub stroke_color: String,
    /// Stroke width in logical pixels
    pub stroke_width: f32,
}

/// Filled rectangle
#[derive(Clone, Debug, PartialEq)]
pub struct RectangleShape {
    /// Top-left corner in global logical coordinates
    pub origin: Point,
    pub width: f32,
    pub height: f32,
    /// Fill color of this rectangle
    pub fill_color: String,
}

/// Filled ellipse, axis-aligned within its bounding box
#[derive(Clone, Debug, PartialEq)]
pub struct EllipseShape {
    /// Top-left corner of the bounding box
    pub origin: Point,
    pub width: f32,
    pub height: f32,
    /// Fill color of this ellipse
    pub fill_color: String,
}

/// Text label, typically produced by text detection over a screen region
#[derive(Clone, Debug, PartialEq)]
pub struct TextShape {
    /// Top-left corner of the text block
    pub origin: Point,
    pub content: String,
    pub font_size: f32,
    pub foreground: String,
    pub background: String,
}

/// Unified shape type for ordered drawing and undo
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Polyline(PolylineShape),
    Line(LineShape),
    Rectangle(RectangleShape),
    Ellipse(EllipseShape),
    Text(TextShape),
}

/// Discriminant of a [`Shape`], used for gesture dispatch and reporting
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Polyline,
    Line,
    Rectangle,
    Ellipse,
    Text,
}

impl ShapeKind {
    /// Human-readable kind name
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Polyline => "polyline",
            ShapeKind::Line => "line",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Text => "text",
        }
    }
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Polyline(_) => ShapeKind::Polyline,
            Shape::Line(_) => ShapeKind::Line,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Text(_) => ShapeKind::Text,
        }
    }

    /// Check if any of this shape's defining points falls inside `area`.
    ///
    /// This is a point-sampling approximation, not exact geometric
    /// intersection: only the points that define the shape are tested (all
    /// points for a polyline, both endpoints for a line, the origin for the
    /// rest). A shape whose body crosses `area` without any defining point
    /// inside it does not count as a hit. The erase tool depends on exactly
    /// this behavior.
    pub fn hit_by_area(&self, area: &RectF) -> bool {
        match self {
            Shape::Polyline(p) => p.points.iter().any(|pt| area.contains_point(*pt)),
            Shape::Line(l) => area.contains_point(l.start) || area.contains_point(l.end),
            Shape::Rectangle(r) => area.contains_point(r.origin),
            Shape::Ellipse(e) => area.contains_point(e.origin),
            Shape::Text(t) => area.contains_point(t.origin),
        }
    }
}
