mod context;
mod persistence;

pub use context::EditorContext;
#[cfg(not(target_arch = "wasm32"))]
pub use persistence::JsonFileStore;
pub use persistence::{MapSnapshot, PersistenceError, PersistenceResult, SaveHandler};
