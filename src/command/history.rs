use super::{Command, Undoable};
use crate::error::CommandError;
use crate::state::EditorContext;

/// Undo and redo stacks of applied document changes
#[derive(Debug, Clone)]
pub struct CommandHistory {
    undo_stack: Vec<Undoable>,
    redo_stack: Vec<Undoable>,
    limit: usize,
    /// The newest entry is an attribute edit still absorbing follow-up edits
    edit_open: bool,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new(100)
    }
}

impl CommandHistory {
    /// `limit` caps the number of undo steps; the oldest are dropped first.
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit,
            edit_open: false,
        }
    }

    /// Executes `command` and records it if it changed the document.
    pub fn execute(
        &mut self,
        command: &Command,
        ctx: &mut EditorContext,
    ) -> Result<(), CommandError> {
        if let Some(entry) = command.execute(ctx)? {
            self.push(entry);
        }
        Ok(())
    }

    /// Like [`execute`](Self::execute), but consecutive edits of the same element or
    /// path share one undo step until [`finish_edit`](Self::finish_edit) is called.
    pub fn execute_edit(
        &mut self,
        command: &Command,
        ctx: &mut EditorContext,
    ) -> Result<(), CommandError> {
        let Some(entry) = command.execute(ctx)? else {
            return Ok(());
        };
        if self.edit_open {
            if let Some(last) = self.undo_stack.last_mut() {
                if last.merge(&entry) {
                    self.redo_stack.clear();
                    return Ok(());
                }
            }
        }
        self.push(entry);
        self.edit_open = true;
        Ok(())
    }

    /// Closes the current attribute edit; the next one starts a new undo step.
    pub fn finish_edit(&mut self) {
        self.edit_open = false;
    }

    pub fn push(&mut self, entry: Undoable) {
        self.edit_open = false;
        self.redo_stack.clear();
        if self.limit == 0 {
            return;
        }
        if self.undo_stack.len() >= self.limit {
            let excess = self.undo_stack.len() + 1 - self.limit;
            self.undo_stack.drain(..excess);
        }
        self.undo_stack.push(entry);
    }

    pub fn undo(&mut self, ctx: &mut EditorContext) -> Result<(), CommandError> {
        if ctx.is_read_only() {
            return Err(CommandError::ReadOnly);
        }
        self.edit_open = false;
        let entry = self.undo_stack.pop().ok_or(CommandError::NothingToUndo)?;
        if let Err(err) = entry.undo.execute(ctx) {
            log::warn!("Undo of {} failed: {}", entry.label(), err);
            return Err(err);
        }
        log::debug!("Undid {}", entry.label());
        self.redo_stack.push(entry);
        Ok(())
    }

    pub fn redo(&mut self, ctx: &mut EditorContext) -> Result<(), CommandError> {
        if ctx.is_read_only() {
            return Err(CommandError::ReadOnly);
        }
        self.edit_open = false;
        let entry = self.redo_stack.pop().ok_or(CommandError::NothingToRedo)?;
        if let Err(err) = entry.redo.execute(ctx) {
            log::warn!("Redo of {} failed: {}", entry.label(), err);
            return Err(err);
        }
        log::debug!("Redid {}", entry.label());
        self.undo_stack.push(entry);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Oldest first
    pub fn undo_stack(&self) -> &[Undoable] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[Undoable] {
        &self.redo_stack
    }

    pub fn clear(&mut self) {
        self.edit_open = false;
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
