//! Drawing session state machine
//!
//! Tracks the gesture in progress as explicit state rather than a nullable
//! "current shape" pointer. Draw gestures append their shape to the canvas
//! immediately so it renders incrementally, and commit a history entry only
//! on pointer-up. Area tools (erase, text detection) keep their transient
//! selector rectangle here, in the session; it never enters the canvas,
//! history, or persisted output.

use crate::annotations::canvas::Canvas;
use crate::capture::ocr::TextDetector;
use crate::config::ShapeStyle;
use crate::domain::{
    EllipseShape, LineShape, Point, PolylineShape, RectF, RectangleShape, Shape, TextShape,
};
use crate::error::{Error, Result};
use crate::session::messages::{CanvasMsg, DrawKind, SessionEffect, Tool};

/// What an area selection is for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectTarget {
    Erase,
    DetectText,
}

/// Gesture state of the drawing session
#[derive(Clone, Copy, Debug, PartialEq)]
enum GestureState {
    /// No gesture in progress
    Idle,
    /// A draw gesture is growing the most recently added canvas shape
    Drawing { kind: DrawKind, anchor: Point },
    /// An area selection is in progress with a transient selector rectangle
    Selecting {
        target: SelectTarget,
        anchor: Point,
        region: RectF,
    },
}

/// Per-session drawing state: active tool, shape style, gesture in progress
#[derive(Clone, Debug)]
pub struct DrawSession {
    tool: Tool,
    style: ShapeStyle,
    state: GestureState,
}

impl Default for DrawSession {
    fn default() -> Self {
        Self::new(ShapeStyle::default())
    }
}

impl DrawSession {
    pub fn new(style: ShapeStyle) -> Self {
        Self {
            tool: Tool::default(),
            style,
            state: GestureState::Idle,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: ShapeStyle) {
        self.style = style;
    }

    /// Whether no gesture is in progress
    pub fn is_idle(&self) -> bool {
        matches!(self.state, GestureState::Idle)
    }

    /// The transient selector rectangle, while an area tool is dragging.
    ///
    /// The rendering layer draws this on top of the canvas shapes.
    pub fn selector(&self) -> Option<(SelectTarget, RectF)> {
        match self.state {
            GestureState::Selecting { target, region, .. } => Some((target, region)),
            _ => None,
        }
    }

    /// Switch tools, cancelling any gesture in progress.
    ///
    /// A cancelled draw gesture retracts its uncommitted shape from the
    /// canvas; a cancelled selection just drops the selector.
    pub fn set_tool(&mut self, canvas: &mut Canvas, tool: Tool) {
        self.cancel_gesture(canvas);
        self.tool = tool;
    }

    fn cancel_gesture(&mut self, canvas: &mut Canvas) {
        match self.state {
            GestureState::Idle => {}
            GestureState::Drawing { .. } => {
                canvas.retract_last();
            }
            GestureState::Selecting { .. } => {}
        }
        self.state = GestureState::Idle;
    }

    /// Handle pointer-down: start a draw gesture or an area selection
    pub fn pointer_pressed(&mut self, canvas: &mut Canvas, p: Point) {
        if !self.is_idle() {
            // stray press mid-gesture; restart cleanly
            self.cancel_gesture(canvas);
        }

        match self.tool.draw_kind() {
            Some(kind) => {
                canvas.add_shape(self.new_gesture_shape(kind, p));
                self.state = GestureState::Drawing { kind, anchor: p };
            }
            None => {
                let target = match self.tool {
                    Tool::Erase => SelectTarget::Erase,
                    Tool::DetectText => SelectTarget::DetectText,
                    _ => unreachable!("draw tools are handled above"),
                };
                self.state = GestureState::Selecting {
                    target,
                    anchor: p,
                    // 1x1 selector until the pointer moves
                    region: RectF::new(p.x, p.y, p.x + 1.0, p.y + 1.0),
                };
            }
        }
    }

    /// Handle pointer-move: grow the in-progress shape or resize the selector
    pub fn pointer_moved(&mut self, canvas: &mut Canvas, p: Point) {
        match &mut self.state {
            GestureState::Idle => {}
            GestureState::Drawing { kind, anchor } => {
                let (kind, anchor) = (*kind, *anchor);
                if let Some(shape) = canvas.last_shape_mut() {
                    update_gesture_shape(shape, kind, anchor, p);
                }
            }
            GestureState::Selecting { anchor, region, .. } => {
                *region = RectF::from_corners(*anchor, p);
            }
        }
    }

    /// Handle pointer-up: finalize the gesture.
    ///
    /// A completed draw gesture commits one history entry. An erase
    /// selection applies immediately. A text-detection selection returns a
    /// [`SessionEffect`] for the shell to run; the result comes back as
    /// [`CanvasMsg::TextDetected`].
    pub fn pointer_released(
        &mut self,
        canvas: &mut Canvas,
        p: Point,
    ) -> Result<Option<SessionEffect>> {
        match self.state {
            GestureState::Idle => Ok(None),
            GestureState::Drawing { kind, anchor } => {
                if let Some(shape) = canvas.last_shape_mut() {
                    update_gesture_shape(shape, kind, anchor, p);
                }
                canvas.commit_draw(1);
                self.state = GestureState::Idle;
                Ok(None)
            }
            GestureState::Selecting {
                target,
                anchor,
                region,
            } => {
                let region = if p == anchor {
                    // never moved: keep the initial 1x1 selector
                    region
                } else {
                    RectF::from_corners(anchor, p)
                };
                // the selector lives in session state; returning to Idle
                // discards it
                self.state = GestureState::Idle;

                match target {
                    SelectTarget::Erase => {
                        canvas.erase_by_area(region)?;
                        Ok(None)
                    }
                    SelectTarget::DetectText => {
                        if region.is_empty() {
                            return Err(Error::EmptyRegion);
                        }
                        Ok(Some(SessionEffect::DetectText { region }))
                    }
                }
            }
        }
    }

    /// Apply a text-detection result: append a text shape at the detected
    /// region's origin as its own undoable draw step. Empty results add
    /// nothing.
    pub fn place_detected_text(&self, canvas: &mut Canvas, origin: Point, text: String) {
        let content = text.trim();
        if content.is_empty() {
            log::info!("text detection returned no text, nothing to add");
            return;
        }
        canvas.add_shape(Shape::Text(TextShape {
            origin,
            content: content.to_string(),
            font_size: self.style.font_size,
            foreground: self.style.text_foreground.clone(),
            background: self.style.text_background.clone(),
        }));
        canvas.commit_draw(1);
    }

    fn new_gesture_shape(&self, kind: DrawKind, p: Point) -> Shape {
        match kind {
            DrawKind::Polyline => Shape::Polyline(PolylineShape {
                points: vec![p],
                stroke_color: self.style.stroke_color.clone(),
                stroke_width: self.style.stroke_width,
            }),
            DrawKind::Line => Shape::Line(LineShape {
                start: p,
                end: p,
                stroke_color: self.style.stroke_color.clone(),
                stroke_width: self.style.stroke_width,
            }),
            DrawKind::Rectangle => Shape::Rectangle(RectangleShape {
                origin: p,
                width: 0.0,
                height: 0.0,
                fill_color: self.style.fill_color.clone(),
            }),
            DrawKind::Ellipse => Shape::Ellipse(EllipseShape {
                origin: p,
                width: 0.0,
                height: 0.0,
                fill_color: self.style.fill_color.clone(),
            }),
        }
    }
}

/// Apply a pointer position to the in-progress gesture shape
fn update_gesture_shape(shape: &mut Shape, kind: DrawKind, anchor: Point, p: Point) {
    match (kind, shape) {
        (DrawKind::Polyline, Shape::Polyline(poly)) => poly.points.push(p),
        (DrawKind::Line, Shape::Line(line)) => line.end = p,
        (DrawKind::Rectangle, Shape::Rectangle(rect)) => {
            let bounds = RectF::from_corners(anchor, p);
            rect.origin = bounds.origin();
            rect.width = bounds.width();
            rect.height = bounds.height();
        }
        (DrawKind::Ellipse, Shape::Ellipse(ellipse)) => {
            let bounds = RectF::from_corners(anchor, p);
            ellipse.origin = bounds.origin();
            ellipse.width = bounds.width();
            ellipse.height = bounds.height();
        }
        _ => debug_assert!(false, "gesture kind out of sync with canvas shape"),
    }
}

/// Run text detection for a pending region and package the outcome as a
/// message.
///
/// The detector call may be slow, so it runs on the blocking pool. Any
/// detection failure is treated as "no text detected" rather than an error.
pub async fn run_detection<D>(detector: D, region: RectF) -> CanvasMsg
where
    D: TextDetector + Send + 'static,
{
    let origin = region.origin();
    let text = match tokio::task::spawn_blocking(move || detector.detect_text(region)).await {
        Ok(Ok(text)) => text,
        Ok(Err(err)) => {
            log::warn!("text detection failed: {err:#}");
            String::new()
        }
        Err(err) => {
            log::error!("text detection task panicked: {err}");
            String::new()
        }
    };
    CanvasMsg::TextDetected { origin, text }
}
