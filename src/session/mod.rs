//! Drawing session management
//!
//! This module contains:
//! - Session state: the active tool and gesture state machine
//! - Message types for annotation interactions

pub mod messages;
pub mod state;

pub use messages::{CanvasMsg, DrawKind, PointerAction, SessionEffect, Tool};
pub use state::{DrawSession, SelectTarget, run_detection};
