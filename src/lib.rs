//! Screenshot annotation engine
//!
//! The headless core of a screenshot annotation overlay: an ordered canvas
//! of drawn shapes with undo history, a pointer-gesture state machine for
//! pen/shape/eraser/text-detection tools, OCR glue, and the persistence
//! layer for annotation records and settings. Rendering and OS input
//! delivery belong to the embedding shell, which feeds
//! [`session::CanvasMsg`] values into [`annotations::handlers`] and
//! repaints from [`annotations::Canvas`] state plus observer callbacks.

pub mod annotations;
pub mod capture;
pub mod config;
pub mod domain;
pub mod error;
pub mod session;
pub mod store;

pub use error::{Error, Result};
