//! The annotation canvas model
//!
//! Owns the ordered collection of drawn shapes and applies structural edits:
//! append, erase by area, clear, undo. Every mutating operation is
//! all-or-nothing and notifies registered observers so the rendering layer
//! can repaint. Insertion order is paint order; later shapes draw on top.

use crate::annotations::history::{History, HistoryAction};
use crate::domain::{RectF, Shape};
use crate::error::{Error, Result};

/// Structural change notification delivered to canvas observers.
///
/// Geometry updates to an in-progress gesture are not reported; the renderer
/// repaints on pointer events while a gesture is active.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasEvent<'a> {
    /// Shapes were appended to the end of the canvas
    ShapesAdded(&'a [Shape]),
    /// Shapes were removed (erase, or undo of a draw)
    ShapesRemoved(&'a [Shape]),
    /// The canvas was emptied
    Cleared,
}

type Observer = Box<dyn FnMut(&CanvasEvent)>;

/// Ordered collection of annotation shapes with an undo history
#[derive(Default)]
pub struct Canvas {
    shapes: Vec<Shape>,
    history: History,
    observers: Vec<Observer>,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("shapes", &self.shapes)
            .field("history", &self.history)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a canvas from shapes loaded out of a persisted record.
    ///
    /// The history starts empty: loaded shapes are the session's baseline,
    /// not an undoable edit.
    pub fn from_shapes(shapes: Vec<Shape>) -> Self {
        Self {
            shapes,
            history: History::new(),
            observers: Vec::new(),
        }
    }

    /// Shapes in paint order
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// The undo history of this session
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Register a callback invoked after every structural mutation
    pub fn subscribe(&mut self, observer: impl FnMut(&CanvasEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, event: CanvasEvent) {
        for observer in &mut self.observers {
            observer(&event);
        }
    }

    /// Append a shape to the canvas without recording history.
    ///
    /// History is recorded only when a draw gesture completes, via
    /// [`Canvas::commit_draw`], so that all shapes from one gesture undo as
    /// a single step.
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape.clone());
        self.notify(CanvasEvent::ShapesAdded(std::slice::from_ref(&shape)));
    }

    /// Mutable access to the most recently added shape.
    ///
    /// Used by the gesture state machine to grow an in-progress shape while
    /// the pointer moves.
    pub fn last_shape_mut(&mut self) -> Option<&mut Shape> {
        self.shapes.last_mut()
    }

    /// Remove the most recently added shape without recording history.
    ///
    /// Used when a gesture is cancelled before completion.
    pub fn retract_last(&mut self) -> Option<Shape> {
        let shape = self.shapes.pop()?;
        let removed = [shape.clone()];
        self.notify(CanvasEvent::ShapesRemoved(&removed));
        Some(shape)
    }

    /// Record a completed draw gesture covering the last `count` shapes.
    ///
    /// `count` must not exceed the canvas length.
    pub fn commit_draw(&mut self, count: usize) {
        debug_assert!(count <= self.shapes.len());
        if count == 0 {
            return;
        }
        let committed = self.shapes[self.shapes.len() - count..].to_vec();
        self.history.push(HistoryAction::Draw, committed);
    }

    /// Remove every shape with a defining point inside `area`.
    ///
    /// Returns the number of shapes removed. When nothing intersects, the
    /// canvas is unchanged and no history entry is recorded. A zero-size
    /// area is a user-input error and mutates nothing.
    pub fn erase_by_area(&mut self, area: RectF) -> Result<usize> {
        if area.is_empty() {
            return Err(Error::EmptyRegion);
        }

        let removed: Vec<Shape> = self
            .shapes
            .iter()
            .filter(|s| s.hit_by_area(&area))
            .cloned()
            .collect();
        if removed.is_empty() {
            return Ok(0);
        }

        self.shapes.retain(|s| !s.hit_by_area(&area));
        self.history.push(HistoryAction::Delete, removed.clone());
        log::debug!("erased {} shape(s) by area", removed.len());
        self.notify(CanvasEvent::ShapesRemoved(&removed));
        Ok(removed.len())
    }

    /// Remove all shapes, recording a single undoable entry.
    ///
    /// A clear of an already-empty canvas records nothing.
    pub fn clear_all(&mut self) {
        if self.shapes.is_empty() {
            return;
        }
        let cleared: Vec<Shape> = std::mem::take(&mut self.shapes);
        self.history.push(HistoryAction::Clear, cleared);
        self.notify(CanvasEvent::Cleared);
    }

    /// Revert the most recent structural edit. No-op on empty history.
    ///
    /// Undoing a draw removes the gesture's shapes; undoing an erase or
    /// clear re-appends the removed shapes. Restored shapes go to the end of
    /// the paint order.
    pub fn undo(&mut self) {
        let Some(entry) = self.history.pop() else {
            return;
        };

        match entry.action {
            HistoryAction::Draw => {
                // Draw entries reference the most recently appended shapes,
                // so remove by value scanning from the end.
                let mut removed = Vec::with_capacity(entry.shapes.len());
                for shape in &entry.shapes {
                    if let Some(pos) = self.shapes.iter().rposition(|s| s == shape) {
                        removed.push(self.shapes.remove(pos));
                    }
                }
                self.notify(CanvasEvent::ShapesRemoved(&removed));
            }
            HistoryAction::Delete | HistoryAction::Clear => {
                let restored = entry.shapes;
                self.shapes.extend(restored.iter().cloned());
                self.notify(CanvasEvent::ShapesAdded(&restored));
            }
        }
    }
}
