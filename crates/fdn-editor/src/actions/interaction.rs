//! Mode, pointer and foundation action handling

use tracing::debug;

use crate::editor::{EditOutcome, Editor, EditorError};
use crate::state::EditorAction;

use super::ActionContext;

/// Handle mode switches, pointer events and committed-foundation actions
pub fn handle_interaction_action(
    editor: &mut Editor,
    action: EditorAction,
    ctx: &mut ActionContext,
) -> Result<EditOutcome, EditorError> {
    match action {
        EditorAction::EnterFoundationMode => {
            editor.enter_foundation_mode(ctx.sink);
            Ok(EditOutcome::ModeChanged)
        }

        EditorAction::EnterPolygonMode => {
            editor.enter_polygon_mode(ctx.sink);
            Ok(EditOutcome::ModeChanged)
        }

        EditorAction::EnterGuideLineMode => {
            editor.enter_guideline_mode(ctx.sink);
            Ok(EditOutcome::ModeChanged)
        }

        EditorAction::Cancel => {
            editor.cancel(ctx.sink);
            Ok(EditOutcome::ModeChanged)
        }

        EditorAction::PointerDown { screen_x, screen_y } => {
            let Some(world) = ctx.picker.pick(screen_x, screen_y) else {
                debug!("Click at ({}, {}) missed the ground", screen_x, screen_y);
                return Ok(EditOutcome::Ignored);
            };
            // Panel is read once per event
            let settings = ctx.panel.settings();
            editor.pointer_down(world, &settings, ctx.sink)
        }

        EditorAction::PointerMove { screen_x, screen_y } => {
            if let Some(world) = ctx.picker.pick(screen_x, screen_y) {
                let settings = ctx.panel.settings();
                editor.pointer_move(world, &settings, ctx.sink);
            }
            Ok(EditOutcome::Ignored)
        }

        EditorAction::FinishPolygon => {
            let settings = ctx.panel.settings();
            editor.finish_polygon(&settings, ctx.sink)
        }

        EditorAction::RemoveFoundation(index) => {
            editor.remove_foundation(index, ctx.sink)?;
            Ok(EditOutcome::FoundationRemoved(index))
        }

        EditorAction::ApplyLoad {
            load_type,
            load_value,
        } => {
            editor.apply_load(load_type, load_value, ctx.sink)?;
            Ok(EditOutcome::Recomputed)
        }

        EditorAction::ApplyPanelLoad => {
            let settings = ctx.panel.settings();
            editor.apply_load(settings.load_type, settings.load_value, ctx.sink)?;
            Ok(EditOutcome::Recomputed)
        }

        EditorAction::RecomputeAll => {
            editor.recompute_all(ctx.sink)?;
            Ok(EditOutcome::Recomputed)
        }

        _ => Ok(EditOutcome::Ignored),
    }
}
