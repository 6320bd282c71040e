//! Foundation Editor interaction layer
//!
//! Turns pointer events into committed foundations and guide lines, and
//! pushes preview and committed geometry to an external scene.

pub mod actions;
pub mod config;
pub mod editor;
pub mod logging;
pub mod scene;
pub mod settings;
pub mod state;

// Re-exports for convenience
pub use actions::{ActionContext, dispatch_action, process_pending_actions};
pub use config::{ConfigError, EditorConfig};
pub use editor::{EditOutcome, Editor, EditorError, SharedEditor, create_shared_editor};
pub use scene::{
    MemorySink, ObjectRole, ObjectStyle, PickingSource, SceneGeometry, SceneHandle, ScenePalette,
    SceneSink, ToolPanel,
};
pub use settings::ToolSettings;
pub use state::{EditorAction, InteractionState};
