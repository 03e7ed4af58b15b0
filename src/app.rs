use crate::config::EditorConfig;
use crate::editor::MapEditor;
use crate::error::CommandError;
use crate::event::{EventLog, LoggingHandler};
use crate::input::InputHandler;
use crate::panels::{central_panel, properties_panel, tools_panel};
use crate::state::{MapSnapshot, SaveHandler};

const ACTIVITY_LENGTH: usize = 50;

/// The desktop and web host around a [`MapEditor`].
pub struct MapLabApp {
    pub(crate) editor: MapEditor,
    pub(crate) input: InputHandler,
    pub(crate) activity: EventLog,
    /// Last refused action, cleared by the next one that succeeds
    pub(crate) status: Option<String>,
    save_handler: Box<dyn SaveHandler>,
}

impl MapLabApp {
    pub fn new(editor: MapEditor, save_handler: Box<dyn SaveHandler>) -> Self {
        let activity = EventLog::new(ACTIVITY_LENGTH);
        editor.event_bus().subscribe(Box::new(LoggingHandler));
        editor.event_bus().subscribe(Box::new(activity.clone()));
        Self {
            editor,
            input: InputHandler::new(),
            activity,
            status: None,
            save_handler,
        }
    }

    /// Called once before the first frame. Without an explicit `snapshot` the map from
    /// the previous session is restored.
    pub fn from_creation_context(
        cc: &eframe::CreationContext<'_>,
        snapshot: Option<MapSnapshot>,
        read_only: bool,
        config: EditorConfig,
        save_handler: Box<dyn SaveHandler>,
    ) -> Self {
        let snapshot = snapshot.or_else(|| {
            cc.storage
                .and_then(|storage| eframe::get_value::<MapSnapshot>(storage, eframe::APP_KEY))
        });
        let editor = match snapshot {
            Some(snapshot) => {
                log::info!(
                    "Opening map with {} element(s) and {} path(s)",
                    snapshot.elements.len(),
                    snapshot.paths.len()
                );
                MapEditor::from_snapshot(snapshot, read_only, config)
            }
            None => MapEditor::new(Default::default(), read_only, config),
        };
        Self::new(editor, save_handler)
    }

    pub fn editor(&self) -> &MapEditor {
        &self.editor
    }

    pub fn save_map(&mut self) {
        self.editor.save(self.save_handler.as_mut());
    }

    pub(crate) fn report(&mut self, result: Result<(), CommandError>) {
        match result {
            Ok(()) => self.status = None,
            Err(CommandError::NothingToUndo | CommandError::NothingToRedo) => {}
            Err(err) => self.status = Some(err.to_string()),
        }
    }
}

impl eframe::App for MapLabApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.editor.snapshot());
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        properties_panel(self, ctx);
        central_panel(self, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, PathKind};

    #[test]
    fn status_clears_after_a_successful_action() {
        let mut app = MapLabApp::new(MapEditor::default(), Box::new(|_: MapSnapshot| {}));
        let id = app
            .editor
            .add_element(ElementKind::Ruin, egui::Pos2::ZERO)
            .unwrap()
            .unwrap();

        let refused = app.editor.add_path(id, id, PathKind::Journey).map(|_| ());
        app.report(refused);
        assert!(app.status.is_some());

        let added = app
            .editor
            .add_element(ElementKind::Hollow, egui::pos2(80.0, 0.0))
            .map(|_| ());
        app.report(added);
        assert_eq!(app.status, None);
    }
}
