//! On-disk annotation record format
//!
//! A record is a single line of UTF-8 text holding a JSON array of
//! [`PersistedShape`] entries, one per canvas shape in paint order. Fields
//! not meaningful to a shape kind are never written and are defaulted
//! identically on load, so `load_from_text(save_to_text(shapes))` reproduces
//! an equivalent canvas.
//!
//! The format defines no text kind; text shapes are skipped on save along
//! with anything transient.

use serde::{Deserialize, Serialize};

use crate::domain::{
    EllipseShape, LineShape, Point, PolylineShape, RectangleShape, Shape,
};
use crate::error::{Error, Result};

/// Stroke width used when a record omits one
pub const DEFAULT_STROKE_WIDTH: f32 = 5.0;
/// Width/height used when a record omits them
pub const DEFAULT_SHAPE_SIZE: f32 = 100.0;
/// Stroke/fill color used when a record omits one
pub const DEFAULT_COLOR: &str = "#E61A1A";

/// Shape kinds the record format can carry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RecordKind {
    Polyline,
    Line,
    Rectangle,
    Ellipse,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RecordPoint {
    x: f32,
    y: f32,
}

impl From<Point> for RecordPoint {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<RecordPoint> for Point {
    fn from(p: RecordPoint) -> Self {
        Point::new(p.x, p.y)
    }
}

/// One persisted shape: a kind tag plus the fields meaningful to that kind
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PersistedShape {
    shape_name: RecordKind,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    stroke_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    stroke_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    points: Option<Vec<RecordPoint>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    start_point: Option<RecordPoint>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    end_point: Option<RecordPoint>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    height: Option<f32>,
}

impl PersistedShape {
    fn empty(kind: RecordKind) -> Self {
        Self {
            shape_name: kind,
            stroke_color: None,
            fill_color: None,
            stroke_width: None,
            points: None,
            start_point: None,
            end_point: None,
            width: None,
            height: None,
        }
    }
}

/// Project a shape into its record form, or None for kinds the format does
/// not carry
fn to_persisted(shape: &Shape) -> Option<PersistedShape> {
    match shape {
        Shape::Polyline(poly) => {
            let mut record = PersistedShape::empty(RecordKind::Polyline);
            record.points = Some(poly.points.iter().copied().map(RecordPoint::from).collect());
            record.stroke_color = Some(poly.stroke_color.clone());
            record.stroke_width = Some(poly.stroke_width);
            Some(record)
        }
        Shape::Line(line) => {
            let mut record = PersistedShape::empty(RecordKind::Line);
            record.start_point = Some(line.start.into());
            record.end_point = Some(line.end.into());
            record.stroke_color = Some(line.stroke_color.clone());
            record.stroke_width = Some(line.stroke_width);
            Some(record)
        }
        Shape::Rectangle(rect) => {
            let mut record = PersistedShape::empty(RecordKind::Rectangle);
            record.start_point = Some(rect.origin.into());
            record.width = Some(rect.width);
            record.height = Some(rect.height);
            record.fill_color = Some(rect.fill_color.clone());
            Some(record)
        }
        Shape::Ellipse(ellipse) => {
            let mut record = PersistedShape::empty(RecordKind::Ellipse);
            record.start_point = Some(ellipse.origin.into());
            record.width = Some(ellipse.width);
            record.height = Some(ellipse.height);
            record.fill_color = Some(ellipse.fill_color.clone());
            Some(record)
        }
        // the record format has no text kind
        Shape::Text(_) => None,
    }
}

/// Rebuild a shape from its record form, defaulting absent fields
fn from_persisted(record: PersistedShape) -> Shape {
    let stroke_color = record
        .stroke_color
        .unwrap_or_else(|| DEFAULT_COLOR.to_string());
    let fill_color = record
        .fill_color
        .unwrap_or_else(|| DEFAULT_COLOR.to_string());
    let stroke_width = record.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH);
    let origin: Point = record.start_point.unwrap_or(RecordPoint { x: 0.0, y: 0.0 }).into();
    let width = record.width.unwrap_or(DEFAULT_SHAPE_SIZE);
    let height = record.height.unwrap_or(DEFAULT_SHAPE_SIZE);

    match record.shape_name {
        RecordKind::Polyline => Shape::Polyline(PolylineShape {
            points: record
                .points
                .unwrap_or_default()
                .into_iter()
                .map(Point::from)
                .collect(),
            stroke_color,
            stroke_width,
        }),
        RecordKind::Line => Shape::Line(LineShape {
            start: origin,
            end: record.end_point.unwrap_or(RecordPoint { x: 0.0, y: 0.0 }).into(),
            stroke_color,
            stroke_width,
        }),
        RecordKind::Rectangle => Shape::Rectangle(RectangleShape {
            origin,
            width,
            height,
            fill_color,
        }),
        RecordKind::Ellipse => Shape::Ellipse(EllipseShape {
            origin,
            width,
            height,
            fill_color,
        }),
    }
}

/// Serialize shapes to a single-line JSON record.
///
/// Text shapes and anything else the format does not carry are skipped.
pub fn save_to_text(shapes: &[Shape]) -> String {
    let records: Vec<PersistedShape> = shapes.iter().filter_map(to_persisted).collect();
    serde_json::to_string(&records).expect("record serialization is infallible")
}

/// Parse a persisted record back into shapes, in array order.
///
/// Empty or whitespace-only text is "no data yet" and yields no shapes. A
/// non-empty record that fails to parse is fatal and must surface to the
/// user rather than load as an empty canvas.
pub fn load_from_text(text: &str) -> Result<Vec<Shape>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let records: Vec<PersistedShape> =
        serde_json::from_str(text).map_err(|e| Error::MalformedRecord(e.to_string()))?;
    Ok(records.into_iter().map(from_persisted).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ShapeKind, TextShape};

    fn sample_shapes() -> Vec<Shape> {
        vec![
            Shape::Polyline(PolylineShape {
                points: vec![
                    Point::new(1.0, 2.0),
                    Point::new(3.5, 4.5),
                    Point::new(6.0, 2.0),
                ],
                stroke_color: "#1A66E6".into(),
                stroke_width: 3.0,
            }),
            Shape::Line(LineShape {
                start: Point::new(10.0, 10.0),
                end: Point::new(90.0, 40.0),
                stroke_color: "#E61A1A".into(),
                stroke_width: 5.0,
            }),
            Shape::Rectangle(RectangleShape {
                origin: Point::new(20.0, 30.0),
                width: 64.0,
                height: 48.0,
                fill_color: "#000000".into(),
            }),
            Shape::Ellipse(EllipseShape {
                origin: Point::new(5.0, 6.0),
                width: 12.0,
                height: 24.0,
                fill_color: "#22AA22".into(),
            }),
        ]
    }

    #[test]
    fn test_round_trip_preserves_kinds_order_and_fields() {
        let shapes = sample_shapes();
        let text = save_to_text(&shapes);
        let loaded = load_from_text(&text).unwrap();

        assert_eq!(loaded.len(), shapes.len());
        for (original, restored) in shapes.iter().zip(&loaded) {
            assert_eq!(original.kind(), restored.kind());
        }
        assert_eq!(loaded, shapes);
    }

    #[test]
    fn test_record_is_a_single_line() {
        let text = save_to_text(&sample_shapes());
        assert!(!text.contains('\n'));
        assert!(text.starts_with('['));
    }

    #[test]
    fn test_irrelevant_fields_are_never_written() {
        let rect = Shape::Rectangle(RectangleShape {
            origin: Point::new(0.0, 0.0),
            width: 10.0,
            height: 10.0,
            fill_color: "#000000".into(),
        });
        let text = save_to_text(&[rect]);
        assert!(text.contains("\"ShapeName\":\"rectangle\""));
        assert!(!text.contains("StrokeColor"));
        assert!(!text.contains("StrokeWidth"));
        assert!(!text.contains("Points"));
        assert!(!text.contains("EndPoint"));
    }

    #[test]
    fn test_text_shapes_are_skipped_on_save() {
        let shapes = vec![Shape::Text(TextShape {
            origin: Point::new(0.0, 0.0),
            content: "not persisted".into(),
            font_size: 16.0,
            foreground: "#000000".into(),
            background: "#FFF3A0".into(),
        })];
        assert_eq!(save_to_text(&shapes), "[]");
    }

    #[test]
    fn test_empty_text_is_an_empty_canvas() {
        assert!(load_from_text("").unwrap().is_empty());
        assert!(load_from_text("   \n").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_text_is_fatal() {
        let err = load_from_text("{not json").unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(_)));

        // an unknown shape kind is malformed too
        let err = load_from_text(r#"[{"ShapeName":"hexagon"}]"#).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(_)));
    }

    #[test]
    fn test_absent_numeric_fields_get_defaults() {
        let loaded =
            load_from_text(r#"[{"ShapeName":"rectangle","StartPoint":{"X":4,"Y":8}}]"#).unwrap();
        match &loaded[0] {
            Shape::Rectangle(rect) => {
                assert_eq!(rect.origin, Point::new(4.0, 8.0));
                assert_eq!(rect.width, DEFAULT_SHAPE_SIZE);
                assert_eq!(rect.height, DEFAULT_SHAPE_SIZE);
            }
            other => panic!("expected rectangle, got {other:?}"),
        }

        let loaded = load_from_text(
            r#"[{"ShapeName":"line","StartPoint":{"X":0,"Y":0},"EndPoint":{"X":9,"Y":9}}]"#,
        )
        .unwrap();
        match &loaded[0] {
            Shape::Line(line) => assert_eq!(line.stroke_width, DEFAULT_STROKE_WIDTH),
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn test_explicit_nulls_load_like_absent_fields() {
        let loaded = load_from_text(
            r#"[{"ShapeName":"polyline","StrokeColor":null,"StrokeWidth":null,"Points":[{"X":1,"Y":1}]}]"#,
        )
        .unwrap();
        match &loaded[0] {
            Shape::Polyline(poly) => {
                assert_eq!(poly.stroke_width, DEFAULT_STROKE_WIDTH);
                assert_eq!(poly.stroke_color, DEFAULT_COLOR);
                assert_eq!(poly.points, vec![Point::new(1.0, 1.0)]);
            }
            other => panic!("expected polyline, got {other:?}"),
        }
    }

    #[test]
    fn test_load_preserves_array_order() {
        let kinds: Vec<ShapeKind> = load_from_text(
            r#"[{"ShapeName":"ellipse"},{"ShapeName":"line"},{"ShapeName":"polyline"}]"#,
        )
        .unwrap()
        .iter()
        .map(Shape::kind)
        .collect();
        assert_eq!(
            kinds,
            vec![ShapeKind::Ellipse, ShapeKind::Line, ShapeKind::Polyline]
        );
    }
}
