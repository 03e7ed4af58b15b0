#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod components;
pub mod config;
pub mod document;
pub mod editor;
pub mod element;
pub mod error;
pub mod event;
pub mod geometry;
pub mod id_generator;
pub mod input;
pub mod panels;
pub mod path;
pub mod renderer;
pub mod selection;
pub mod state;
pub mod tools;
pub mod util;
pub mod viewport;

pub use app::MapLabApp;
pub use command::{Command, CommandHistory};
pub use config::EditorConfig;
pub use document::Document;
pub use editor::MapEditor;
pub use element::{ElementKind, MapElement, PathKind};
pub use error::{CommandError, PathError};
pub use id_generator::{ElementId, PathId};
pub use path::StoryPath;
pub use selection::SelectionTarget;
pub use state::{MapSnapshot, SaveHandler};
pub use tools::ToolMode;
pub use viewport::Viewport;
