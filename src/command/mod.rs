mod commands;
mod history;

pub use commands::Command;
pub use history::CommandHistory;

use crate::error::CommandError;

/// A document change that took effect, with the command that reverses it.
#[derive(Debug, Clone, PartialEq)]
pub struct Undoable {
    /// Reapplies the change after it was undone
    pub redo: Command,
    pub undo: Command,
}

impl Undoable {
    pub fn label(&self) -> &'static str {
        self.redo.name()
    }

    /// Folds a later attribute edit of the same element or path into this one.
    ///
    /// The merged entry redoes both edits and undoes back to the state before the first.
    /// Returns false, leaving both untouched, for any other pair.
    pub(crate) fn merge(&mut self, later: &Undoable) -> bool {
        match (&mut self.redo, &mut self.undo, &later.redo, &later.undo) {
            (
                Command::UpdateElement { id, patch: redo },
                Command::UpdateElement { patch: undo, .. },
                Command::UpdateElement {
                    id: later_id,
                    patch: later_redo,
                },
                Command::UpdateElement {
                    patch: later_undo, ..
                },
            ) if *id == *later_id => {
                redo.overlay(later_redo);
                let mut merged = later_undo.clone();
                merged.overlay(undo);
                *undo = merged;
                true
            }
            (
                Command::UpdatePath { id, patch: redo },
                Command::UpdatePath { patch: undo, .. },
                Command::UpdatePath {
                    id: later_id,
                    patch: later_redo,
                },
                Command::UpdatePath {
                    patch: later_undo, ..
                },
            ) if *id == *later_id => {
                redo.overlay(later_redo);
                let mut merged = later_undo.clone();
                merged.overlay(undo);
                *undo = merged;
                true
            }
            _ => false,
        }
    }
}

/// `Ok(None)` means the command ran but left nothing to undo.
pub type CommandResult = Result<Option<Undoable>, CommandError>;
