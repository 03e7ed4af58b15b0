//! The editor facade: owns the document, view, tool, and history, and is the only
//! entry point hosts need.
use egui::{Pos2, Vec2};

use crate::command::{Command, CommandHistory};
use crate::config::EditorConfig;
use crate::document::Document;
use crate::element::{ElementKind, ElementPatch, PathKind};
use crate::error::CommandError;
use crate::event::{EditorEvent, EventBus};
use crate::geometry::{HitTolerance, hit_test};
use crate::id_generator::{ElementId, PathId};
use crate::path::PathPatch;
use crate::selection::SelectionTarget;
use crate::state::{EditorContext, MapSnapshot, SaveHandler};
use crate::tools::{PointerInput, Tool, ToolContext, ToolMode, ToolType};
use crate::viewport::{Viewport, ZoomDirection};

#[derive(Debug)]
pub struct MapEditor {
    context: EditorContext,
    tool: ToolType,
    history: CommandHistory,
    config: EditorConfig,
}

impl Default for MapEditor {
    fn default() -> Self {
        Self::new(Document::new(), false, EditorConfig::default())
    }
}

impl MapEditor {
    pub fn new(document: Document, read_only: bool, config: EditorConfig) -> Self {
        let viewport = Viewport::new(config.zoom);
        Self {
            context: EditorContext::new(document, viewport, read_only),
            tool: ToolType::default(),
            history: CommandHistory::new(config.history_limit),
            config,
        }
    }

    pub fn from_snapshot(snapshot: MapSnapshot, read_only: bool, config: EditorConfig) -> Self {
        Self::new(snapshot.into_document(), read_only, config)
    }

    pub fn document(&self) -> &Document {
        self.context.document()
    }

    pub fn viewport(&self) -> &Viewport {
        self.context.viewport()
    }

    pub fn selection(&self) -> Option<SelectionTarget> {
        self.context.selection()
    }

    pub fn is_read_only(&self) -> bool {
        self.context.is_read_only()
    }

    pub fn element_kind(&self) -> &ElementKind {
        self.context.element_kind()
    }

    pub fn path_kind(&self) -> &PathKind {
        self.context.path_kind()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn event_bus(&self) -> &EventBus {
        self.context.event_bus()
    }

    pub fn tool(&self) -> &ToolType {
        &self.tool
    }

    pub fn tool_mode(&self) -> ToolMode {
        self.tool.mode()
    }

    pub fn pending_start(&self) -> Option<ElementId> {
        self.tool.pending_start()
    }

    /// Runs a command through the history so document changes can be undone.
    pub fn execute(&mut self, command: Command) -> Result<(), CommandError> {
        if matches!(command, Command::Pan { .. }) && self.tool.mode() != ToolMode::Pan {
            log::debug!("Ignoring pan outside the pan tool");
            return Ok(());
        }
        self.history.execute(&command, &mut self.context)
    }

    /// Switches tools. Any gesture in progress ends; a pending path start is dropped.
    pub fn set_tool(&mut self, mode: ToolMode) {
        let old = self.tool.mode();
        self.end_gesture();
        self.tool = ToolType::for_mode(mode);
        self.tool.activate();
        if old != mode {
            log::debug!("Tool changed: {:?} -> {:?}", old, mode);
            self.context
                .event_bus
                .emit(EditorEvent::ToolChanged { old, new: mode });
        }
    }

    /// Ends the current gesture while keeping the active tool.
    pub fn cancel_gesture(&mut self) {
        self.end_gesture();
        self.tool.activate();
    }

    fn end_gesture(&mut self) {
        if let Some(command) = self.tool.deactivate() {
            if let Err(err) = self.execute(command) {
                log::warn!("Could not settle gesture: {}", err);
            }
        }
    }

    fn pointer_input(&self, screen: Pos2) -> PointerInput {
        let viewport = self.context.viewport();
        let world = viewport.screen_to_world(screen);
        let tolerance = HitTolerance {
            element_radius: self.config.element_hit_radius,
            path_distance: viewport.screen_len_to_world(self.config.path_hit_tolerance),
        };
        PointerInput {
            screen,
            world,
            hit: hit_test(self.context.document(), world, tolerance),
        }
    }

    /// Feeds a pointer press at canvas-relative `screen` to the active tool.
    pub fn pointer_down(&mut self, screen: Pos2) -> Result<(), CommandError> {
        let input = self.pointer_input(screen);
        let command = {
            let ctx = tool_context(&self.context);
            self.tool.on_pointer_down(input, &ctx)
        };
        self.run_tool_command(command)
    }

    pub fn pointer_move(&mut self, screen: Pos2) -> Result<(), CommandError> {
        let input = self.pointer_input(screen);
        let command = {
            let ctx = tool_context(&self.context);
            self.tool.on_pointer_move(input, &ctx)
        };
        self.run_tool_command(command)
    }

    pub fn pointer_up(&mut self, screen: Pos2) -> Result<(), CommandError> {
        let input = self.pointer_input(screen);
        let command = {
            let ctx = tool_context(&self.context);
            self.tool.on_pointer_up(input, &ctx)
        };
        self.run_tool_command(command)
    }

    fn run_tool_command(&mut self, command: Option<Command>) -> Result<(), CommandError> {
        match command {
            Some(command) => self.execute(command),
            None => Ok(()),
        }
    }

    /// One zoom step per scroll event, keeping the world point under `anchor` fixed.
    pub fn scroll(&mut self, anchor: Pos2, delta_y: f32) {
        if let Some(direction) = ZoomDirection::from_scroll(delta_y) {
            self.zoom_at(anchor, direction);
        }
    }

    pub fn zoom_at(&mut self, anchor: Pos2, direction: ZoomDirection) {
        // View commands cannot fail
        let _ = self.execute(Command::ZoomAt { anchor, direction });
    }

    /// Only honored while the pan tool is active.
    pub fn pan(&mut self, delta: Vec2) {
        let _ = self.execute(Command::Pan { delta });
    }

    pub fn reset_view(&mut self) {
        let _ = self.execute(Command::ResetView);
    }

    /// Returns the new element's id. New elements are appended, so it is the last one.
    pub fn add_element(
        &mut self,
        kind: ElementKind,
        position: Pos2,
    ) -> Result<Option<ElementId>, CommandError> {
        self.execute(Command::AddElement { kind, position })?;
        Ok(self.document().elements().iter().next_back().map(|element| element.id()))
    }

    /// Adds an element of the current kind at the configured drop position.
    pub fn add_element_at_default(&mut self) -> Result<Option<ElementId>, CommandError> {
        let kind = self.context.element_kind().clone();
        self.add_element(kind, self.config.default_drop_position)
    }

    pub fn move_element(&mut self, id: ElementId, position: Pos2) -> Result<(), CommandError> {
        let Some(from) = self.document().element(id).map(|element| element.position()) else {
            return Ok(());
        };
        self.execute(Command::CommitMove {
            id,
            from,
            to: position,
        })
    }

    /// Consecutive updates of the same element form one undo step until
    /// [`finish_edit`](Self::finish_edit).
    pub fn update_element(
        &mut self,
        id: ElementId,
        patch: ElementPatch,
    ) -> Result<(), CommandError> {
        self.history
            .execute_edit(&Command::UpdateElement { id, patch }, &mut self.context)
    }

    pub fn remove_element(&mut self, id: ElementId) -> Result<(), CommandError> {
        self.execute(Command::RemoveElement { id })
    }

    pub fn add_path(
        &mut self,
        from: ElementId,
        to: ElementId,
        kind: PathKind,
    ) -> Result<Option<PathId>, CommandError> {
        self.execute(Command::AddPath { from, to, kind })?;
        Ok(self.document().paths().iter().next_back().map(|path| path.id()))
    }

    /// Grouped into undo steps like [`update_element`](Self::update_element).
    pub fn update_path(&mut self, id: PathId, patch: PathPatch) -> Result<(), CommandError> {
        self.history
            .execute_edit(&Command::UpdatePath { id, patch }, &mut self.context)
    }

    /// Ends the attribute edit in progress, e.g. when a text field loses focus.
    pub fn finish_edit(&mut self) {
        self.history.finish_edit();
    }

    pub fn add_waypoint(&mut self, id: PathId, position: Pos2) -> Result<(), CommandError> {
        self.execute(Command::AddWaypoint { id, position })
    }

    pub fn remove_path(&mut self, id: PathId) -> Result<(), CommandError> {
        self.execute(Command::RemovePath { id })
    }

    pub fn delete_selection(&mut self) -> Result<(), CommandError> {
        self.execute(Command::DeleteSelection)
    }

    pub fn select(&mut self, target: Option<SelectionTarget>) {
        let _ = self.execute(Command::Select(target));
    }

    pub fn set_element_kind(&mut self, kind: ElementKind) {
        let _ = self.execute(Command::SetElementKind(kind));
    }

    pub fn set_path_kind(&mut self, kind: PathKind) {
        let _ = self.execute(Command::SetPathKind(kind));
    }

    pub fn undo(&mut self) -> Result<(), CommandError> {
        self.end_gesture();
        self.history.undo(&mut self.context)
    }

    pub fn redo(&mut self) -> Result<(), CommandError> {
        self.end_gesture();
        self.history.redo(&mut self.context)
    }

    pub fn can_undo(&self) -> bool {
        !self.is_read_only() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        !self.is_read_only() && self.history.can_redo()
    }

    pub fn snapshot(&self) -> MapSnapshot {
        MapSnapshot::new(self.context.document())
    }

    /// Hands the current map to `handler`.
    pub fn save(&self, handler: &mut dyn SaveHandler) {
        let snapshot = self.snapshot();
        self.context.event_bus.emit(EditorEvent::Saved {
            elements: snapshot.elements.len(),
            paths: snapshot.paths.len(),
        });
        handler.save(snapshot);
    }
}

fn tool_context(context: &EditorContext) -> ToolContext<'_> {
    ToolContext {
        document: context.document(),
        path_kind: context.path_kind(),
        read_only: context.is_read_only(),
    }
}
