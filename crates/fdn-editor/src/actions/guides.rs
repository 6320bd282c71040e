//! Guide-line action handling

use tracing::info;

use crate::editor::{EditOutcome, Editor};
use crate::state::EditorAction;

use super::ActionContext;

/// Handle guide-line and snap-point actions
pub fn handle_guide_action(
    editor: &mut Editor,
    action: EditorAction,
    ctx: &mut ActionContext,
) -> EditOutcome {
    match action {
        EditorAction::AddSnapPoint { position, radius } => {
            editor.add_snap_point(position, radius, ctx.sink);
            info!("Added snap point at {:?}", position);
        }

        EditorAction::ToggleGuideLines => {
            let visible = editor.toggle_guide_lines(ctx.sink);
            info!("Guide lines {}", if visible { "shown" } else { "hidden" });
        }

        EditorAction::ClearGuideLines => {
            editor.clear_guide_lines(ctx.sink);
            info!("Cleared guide lines");
        }

        _ => return EditOutcome::Ignored,
    }
    EditOutcome::GuidesUpdated
}
