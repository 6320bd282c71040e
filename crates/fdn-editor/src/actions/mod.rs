//! Action handling module
//!
//! Actions are queued on the editor by the shell and dispatched against the
//! picking source, the scene and the tool panel it owns.

mod guides;
mod interaction;

use crate::editor::{EditOutcome, Editor, EditorError, SharedEditor};
use crate::scene::{PickingSource, SceneSink, ToolPanel};
use crate::state::EditorAction;

pub use guides::handle_guide_action;
pub use interaction::handle_interaction_action;

/// Context for action handlers
pub struct ActionContext<'a> {
    pub picker: &'a dyn PickingSource,
    pub sink: &'a mut dyn SceneSink,
    pub panel: &'a dyn ToolPanel,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        picker: &'a dyn PickingSource,
        sink: &'a mut dyn SceneSink,
        panel: &'a dyn ToolPanel,
    ) -> Self {
        Self {
            picker,
            sink,
            panel,
        }
    }
}

/// Dispatch an action to the appropriate handler
pub fn dispatch_action(
    editor: &mut Editor,
    action: EditorAction,
    ctx: &mut ActionContext,
) -> Result<EditOutcome, EditorError> {
    match action {
        // Modes, pointer events and committed foundations
        EditorAction::EnterFoundationMode
        | EditorAction::EnterPolygonMode
        | EditorAction::EnterGuideLineMode
        | EditorAction::Cancel
        | EditorAction::PointerDown { .. }
        | EditorAction::PointerMove { .. }
        | EditorAction::FinishPolygon
        | EditorAction::RemoveFoundation(_)
        | EditorAction::ApplyLoad { .. }
        | EditorAction::ApplyPanelLoad
        | EditorAction::RecomputeAll => handle_interaction_action(editor, action, ctx),

        // Guide lines and snap points
        EditorAction::AddSnapPoint { .. }
        | EditorAction::ToggleGuideLines
        | EditorAction::ClearGuideLines => Ok(handle_guide_action(editor, action, ctx)),
    }
}

/// Drain the editor's queue and dispatch every action in order
///
/// A failed action is logged and does not stop the ones after it.
pub fn process_pending_actions(
    shared: &SharedEditor,
    ctx: &mut ActionContext,
) -> Vec<Result<EditOutcome, EditorError>> {
    let mut editor = shared.lock();
    let actions = editor.take_pending_actions();
    actions
        .into_iter()
        .map(|action| {
            let result = dispatch_action(&mut editor, action, ctx);
            if let Err(e) = &result {
                tracing::warn!("Action failed: {}", e);
            }
            result
        })
        .collect()
}
