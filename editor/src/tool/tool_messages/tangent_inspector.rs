use super::tool_prelude::*;

use path_kernel::{ElementId, subpath_tangents};

/// Shows the tangent direction at every anchor of the element under the pointer.
pub struct TangentInspector;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TangentInspectorData {
	pub hovered: Option<ElementId>,
	/// Indicator length in viewport pixels.
	pub length: f64,
}

impl Default for TangentInspectorData {
	fn default() -> Self {
		Self {
			hovered: None,
			length: TANGENT_INDICATOR_LENGTH,
		}
	}
}

fn draw_tangents(context: &LayerContext<'_>, data: &TangentInspectorData, overlay: &mut OverlayContext) {
	if !context.is_active("tangent_inspector") {
		return;
	}
	let Some(element) = data.hovered.and_then(|id| context.document.element(id)) else { return };

	overlay.outline(&element.path, Some(COLOR_OVERLAY_GRAY));
	for subpath in &element.path.subpaths {
		for tangent in subpath_tangents(subpath) {
			overlay.screen_ray(tangent.anchor, tangent.direction, data.length, Some(COLOR_OVERLAY_GREEN));
			overlay.screen_ray(tangent.anchor, -tangent.direction, data.length / 2., Some(COLOR_OVERLAY_GRAY));
			overlay.manipulator_anchor(tangent.anchor, false, None);
		}
	}
}

impl Plugin for TangentInspector {
	type State = TangentInspectorData;

	fn id(&self) -> &'static str {
		"tangent_inspector"
	}

	fn metadata(&self) -> PluginMetadata {
		PluginMetadata {
			name: "Tangent Inspector",
			tooltip: "Hover a path to inspect its anchor tangents",
			icon: "ViewportTangents",
		}
	}

	fn subscribed_events(&self) -> PointerEvents {
		PointerEvents::MOVE
	}

	fn handle_event(&self, event: &ToolEvent, state: &mut StateSlice<'_, TangentInspectorData>, _context: &mut ToolContext) {
		state.update(|data| data.hovered = event.target);
	}

	fn behavior_flags(&self, _data: &TangentInspectorData) -> BehaviorFlags {
		BehaviorFlags::HIDE_SELECTION_OVERLAY
	}

	fn canvas_layers(&self) -> Vec<CanvasLayer<TangentInspectorData>> {
		vec![CanvasLayer::new("tangents", LayerPlacement::Foreground, draw_tangents)]
	}

	fn persisted_keys(&self) -> Vec<StateKey> {
		vec![StateKey::persistent("length")]
	}
}
