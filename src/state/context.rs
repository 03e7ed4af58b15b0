use crate::document::Document;
use crate::element::{ElementKind, PathKind};
use crate::event::{EditorEvent, EventBus};
use crate::selection::SelectionTarget;
use crate::viewport::Viewport;

/// Everything a [`Command`](crate::command::Command) may read or change.
///
/// Commands receive the context explicitly; there is no global editor state.
#[derive(Debug, Default)]
pub struct EditorContext {
    pub(crate) document: Document,
    pub(crate) viewport: Viewport,
    pub(crate) selection: Option<SelectionTarget>,
    pub(crate) element_kind: ElementKind,
    pub(crate) path_kind: PathKind,
    pub(crate) read_only: bool,
    pub(crate) event_bus: EventBus,
}

impl EditorContext {
    pub fn new(document: Document, viewport: Viewport, read_only: bool) -> Self {
        Self {
            document,
            viewport,
            read_only,
            ..Default::default()
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selection(&self) -> Option<SelectionTarget> {
        self.selection
    }

    pub fn element_kind(&self) -> &ElementKind {
        &self.element_kind
    }

    pub fn path_kind(&self) -> &PathKind {
        &self.path_kind
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns true if `target` names something in the document.
    pub fn target_exists(&self, target: SelectionTarget) -> bool {
        match target {
            SelectionTarget::Element(id) => self.document.element(id).is_some(),
            SelectionTarget::Path(id) => self.document.path(id).is_some(),
        }
    }

    /// Changes the selection, ignoring targets that do not exist.
    pub(crate) fn select(&mut self, target: Option<SelectionTarget>) {
        if let Some(target) = target {
            if !self.target_exists(target) {
                log::debug!("Ignoring selection of missing target {:?}", target);
                return;
            }
        }
        if self.selection == target {
            return;
        }
        let old = std::mem::replace(&mut self.selection, target);
        self.event_bus.emit(EditorEvent::SelectionChanged { old, new: target });
    }

    pub(crate) fn emit_view_changed(&self) {
        self.event_bus.emit(EditorEvent::ViewChanged {
            offset: self.viewport.offset(),
            scale: self.viewport.scale(),
        });
    }
}
