use super::{CanvasEvent, Shortcut};
use crate::editor::MapEditor;
use crate::error::CommandError;

/// Applies one canvas event to the editor.
pub fn route_event(event: &CanvasEvent, editor: &mut MapEditor) -> Result<(), CommandError> {
    match event {
        CanvasEvent::PointerDown(pos) => editor.pointer_down(*pos),
        CanvasEvent::PointerMove(pos) => editor.pointer_move(*pos),
        CanvasEvent::PointerUp(pos) => editor.pointer_up(*pos),
        CanvasEvent::Scroll { anchor, delta_y } => {
            editor.scroll(*anchor, *delta_y);
            Ok(())
        }
        CanvasEvent::Shortcut(Shortcut::DeleteSelection) => editor.delete_selection(),
        CanvasEvent::Shortcut(Shortcut::CancelGesture) => {
            editor.cancel_gesture();
            Ok(())
        }
        CanvasEvent::Shortcut(Shortcut::Undo) => editor.undo(),
        CanvasEvent::Shortcut(Shortcut::Redo) => editor.redo(),
        CanvasEvent::Shortcut(Shortcut::SelectTool(mode)) => {
            editor.set_tool(*mode);
            Ok(())
        }
    }
}
