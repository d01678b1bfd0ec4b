//! Canvas message handlers
//!
//! Handles CanvasMsg for all annotation operations. The shell translates
//! raw windowing events into [`CanvasMsg`] values and feeds them here; the
//! returned [`SessionEffect`] (if any) names external work for the shell to
//! run.

use crate::annotations::canvas::Canvas;
use crate::domain::Point;
use crate::error::Result;
use crate::session::messages::{CanvasMsg, PointerAction, SessionEffect};
use crate::session::state::DrawSession;

/// Handle a CanvasMsg, mutating the session and canvas.
///
/// Every message is all-or-nothing: on error (empty selection region,
/// failed erase) neither the canvas nor the history has been mutated.
pub fn handle_canvas_msg(
    session: &mut DrawSession,
    canvas: &mut Canvas,
    msg: CanvasMsg,
) -> Result<Option<SessionEffect>> {
    match msg {
        CanvasMsg::Pointer(action) => handle_pointer(session, canvas, action),
        CanvasMsg::SetTool(tool) => {
            session.set_tool(canvas, tool);
            Ok(None)
        }
        CanvasMsg::Undo => {
            canvas.undo();
            Ok(None)
        }
        CanvasMsg::ClearAll => {
            canvas.clear_all();
            Ok(None)
        }
        CanvasMsg::TextDetected { origin, text } => {
            session.place_detected_text(canvas, origin, text);
            Ok(None)
        }
    }
}

fn handle_pointer(
    session: &mut DrawSession,
    canvas: &mut Canvas,
    action: PointerAction,
) -> Result<Option<SessionEffect>> {
    match action {
        PointerAction::Press(x, y) => {
            session.pointer_pressed(canvas, Point::new(x, y));
            Ok(None)
        }
        PointerAction::Move(x, y) => {
            session.pointer_moved(canvas, Point::new(x, y));
            Ok(None)
        }
        PointerAction::Release(x, y) => session.pointer_released(canvas, Point::new(x, y)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RectF, Shape};
    use crate::session::messages::Tool;

    fn send(
        session: &mut DrawSession,
        canvas: &mut Canvas,
        msg: CanvasMsg,
    ) -> Option<SessionEffect> {
        handle_canvas_msg(session, canvas, msg).expect("message handling failed")
    }

    #[test]
    fn test_full_message_flow_draw_detect_undo() {
        let mut session = DrawSession::default();
        let mut canvas = Canvas::new();

        // draw a line
        send(&mut session, &mut canvas, CanvasMsg::SetTool(Tool::Line));
        send(
            &mut session,
            &mut canvas,
            CanvasMsg::Pointer(PointerAction::Press(0.0, 0.0)),
        );
        send(
            &mut session,
            &mut canvas,
            CanvasMsg::Pointer(PointerAction::Move(20.0, 20.0)),
        );
        send(
            &mut session,
            &mut canvas,
            CanvasMsg::Pointer(PointerAction::Release(20.0, 20.0)),
        );
        assert_eq!(canvas.len(), 1);

        // select a detection region
        send(
            &mut session,
            &mut canvas,
            CanvasMsg::SetTool(Tool::DetectText),
        );
        send(
            &mut session,
            &mut canvas,
            CanvasMsg::Pointer(PointerAction::Press(30.0, 30.0)),
        );
        send(
            &mut session,
            &mut canvas,
            CanvasMsg::Pointer(PointerAction::Move(90.0, 60.0)),
        );
        let effect = send(
            &mut session,
            &mut canvas,
            CanvasMsg::Pointer(PointerAction::Release(90.0, 60.0)),
        );
        let Some(SessionEffect::DetectText { region }) = effect else {
            panic!("expected a detection effect, got {effect:?}");
        };
        assert_eq!(region, RectF::new(30.0, 30.0, 90.0, 60.0));

        // detection result comes back as a message
        send(
            &mut session,
            &mut canvas,
            CanvasMsg::TextDetected {
                origin: region.origin(),
                text: "found text".into(),
            },
        );
        assert_eq!(canvas.len(), 2);
        assert!(matches!(canvas.shapes()[1], Shape::Text(_)));

        // undo removes the text, then the line
        send(&mut session, &mut canvas, CanvasMsg::Undo);
        assert_eq!(canvas.len(), 1);
        send(&mut session, &mut canvas, CanvasMsg::Undo);
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_clear_all_message_is_undoable() {
        let mut session = DrawSession::default();
        let mut canvas = Canvas::new();

        send(&mut session, &mut canvas, CanvasMsg::SetTool(Tool::Pen));
        send(
            &mut session,
            &mut canvas,
            CanvasMsg::Pointer(PointerAction::Press(0.0, 0.0)),
        );
        send(
            &mut session,
            &mut canvas,
            CanvasMsg::Pointer(PointerAction::Release(5.0, 5.0)),
        );

        send(&mut session, &mut canvas, CanvasMsg::ClearAll);
        assert!(canvas.is_empty());
        send(&mut session, &mut canvas, CanvasMsg::Undo);
        assert_eq!(canvas.len(), 1);
    }
}
