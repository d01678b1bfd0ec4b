//! Message types for the annotation session
//!
//! This module contains:
//! - Tool selection and pointer action types
//! - CanvasMsg, the single message enum the shell feeds into the core
//! - SessionEffect, work the core hands back to the shell

use crate::domain::{Point, RectF};

// ============================================================================
// Tool Types
// ============================================================================

/// Active annotation tool
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tool {
    /// Freehand pen strokes
    #[default]
    Pen,
    /// Straight line segments
    Line,
    /// Filled rectangles
    Rectangle,
    /// Filled ellipses
    Ellipse,
    /// Area eraser
    Erase,
    /// OCR text detection over a selected region
    DetectText,
}

/// Shape kinds that can be produced by a draw gesture.
///
/// Text is absent: text shapes are only created from detection results,
/// never drawn with the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawKind {
    Polyline,
    Line,
    Rectangle,
    Ellipse,
}

impl Tool {
    /// The shape kind a draw gesture with this tool produces, if any
    pub fn draw_kind(self) -> Option<DrawKind> {
        match self {
            Tool::Pen => Some(DrawKind::Polyline),
            Tool::Line => Some(DrawKind::Line),
            Tool::Rectangle => Some(DrawKind::Rectangle),
            Tool::Ellipse => Some(DrawKind::Ellipse),
            Tool::Erase | Tool::DetectText => None,
        }
    }
}

// ============================================================================
// Pointer and Canvas Messages
// ============================================================================

/// A pointer event in global logical coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerAction {
    /// Pointer pressed at position
    Press(f32, f32),
    /// Pointer moved to position while pressed
    Move(f32, f32),
    /// Pointer released at position
    Release(f32, f32),
}

/// All messages the annotation core handles
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasMsg {
    /// Pointer press/move/release driving the gesture state machine
    Pointer(PointerAction),
    /// Switch the active tool, cancelling any gesture in progress
    SetTool(Tool),
    /// Undo the most recent structural edit
    Undo,
    /// Clear the whole canvas as a single undoable step
    ClearAll,
    /// A text-detection result arriving for a previously selected region
    TextDetected { origin: Point, text: String },
}

// ============================================================================
// Session Effects
// ============================================================================

/// Deferred work the core asks the shell to perform.
///
/// The shell runs the external call and feeds the outcome back as a
/// [`CanvasMsg`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionEffect {
    /// Run text detection over the given region
    DetectText { region: RectF },
}
