use super::tool_prelude::*;

use glam::DAffine2;

/// The neutral tool. Pointer downs select through the editor's default selection, and dragging a selected element moves the whole selection.
pub struct SelectTool;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectToolData {
	/// Document-space position of the pointer at the last applied drag step.
	pub drag_last: Option<DVec2>,
}

impl Plugin for SelectTool {
	type State = SelectToolData;

	fn id(&self) -> &'static str {
		SELECT_PLUGIN_ID
	}

	fn metadata(&self) -> PluginMetadata {
		PluginMetadata {
			name: "Select Tool",
			tooltip: "Select and move elements",
			icon: "GeneralSelectTool",
		}
	}

	fn subscribed_events(&self) -> PointerEvents {
		PointerEvents::GESTURE
	}

	fn handle_event(&self, event: &ToolEvent, state: &mut StateSlice<'_, SelectToolData>, context: &mut ToolContext) {
		state.update(|data| match event.kind {
			PointerEventKind::Down => {
				let on_selection = event.target.is_some_and(|target| context.document.is_selected(target));
				data.drag_last = on_selection.then_some(event.point);
			}
			PointerEventKind::Move => {
				let Some(last) = data.drag_last else { return };
				let delta = event.point - last;
				if delta == DVec2::ZERO {
					return;
				}

				let transform = DAffine2::from_translation(delta);
				let selected = context.document.selection().to_vec();
				for id in selected {
					context.document.transform_element(id, transform);
				}
				data.drag_last = Some(event.point);
			}
			PointerEventKind::Up | PointerEventKind::Cancel => data.drag_last = None,
		});
	}

	fn session_phase(&self, state: &SelectToolData) -> SessionPhase {
		if state.drag_last.is_some() { SessionPhase::Drawing } else { SessionPhase::Idle }
	}
}
