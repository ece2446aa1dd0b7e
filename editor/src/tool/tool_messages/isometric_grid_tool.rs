use super::tool_prelude::*;

use path_kernel::generators::{IsometricGridOptions, generate_isometric_grid};
use path_kernel::{Color, Path, Style};

/// Previews a grid under the pointer and stamps it into the document on click.
pub struct IsometricGridTool;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsometricGridToolData {
	pub options: IsometricGridOptions,
	pub hover: Option<DVec2>,
}

impl IsometricGridToolData {
	fn grid_at(&self, offset: DVec2) -> Option<Path> {
		let options = IsometricGridOptions { offset, ..self.options.clone() };
		let subpaths = generate_isometric_grid(&options);
		(!subpaths.is_empty()).then(|| Path::new(subpaths))
	}
}

fn draw_hover_preview(context: &LayerContext<'_>, data: &IsometricGridToolData, overlay: &mut OverlayContext) {
	if !context.is_active("isometric_grid") {
		return;
	}
	let Some(grid) = data.hover.and_then(|hover| data.grid_at(hover)) else { return };

	overlay.outline(&grid, Some(COLOR_OVERLAY_GRAY));
}

impl Plugin for IsometricGridTool {
	type State = IsometricGridToolData;

	fn id(&self) -> &'static str {
		"isometric_grid"
	}

	fn metadata(&self) -> PluginMetadata {
		PluginMetadata {
			name: "Isometric Grid Tool",
			tooltip: "Click to place an isometric grid",
			icon: "VectorGridTool",
		}
	}

	fn subscribed_events(&self) -> PointerEvents {
		PointerEvents::DOWN | PointerEvents::MOVE
	}

	fn handle_event(&self, event: &ToolEvent, state: &mut StateSlice<'_, IsometricGridToolData>, context: &mut ToolContext) {
		state.update(|data| match event.kind {
			PointerEventKind::Move => data.hover = Some(event.point),
			PointerEventKind::Down => {
				data.hover = None;
				let Some(grid) = data.grid_at(event.point) else {
					log::warn!("The isometric grid options produce no geometry");
					return;
				};

				let id = context.document.add_element(grid, Style::stroked(Color::BLACK, 1.));
				context.responses.push_back(ToolResponse::SelectionChanged(vec![id]));
				context.responses.push_back(ToolResponse::ActivatePlugin(SELECT_PLUGIN_ID.into()));
			}
			PointerEventKind::Up | PointerEventKind::Cancel => {}
		});
	}

	fn behavior_flags(&self, _data: &IsometricGridToolData) -> BehaviorFlags {
		BehaviorFlags::PREVENTS_SELECTION
	}

	fn canvas_layers(&self) -> Vec<CanvasLayer<IsometricGridToolData>> {
		vec![CanvasLayer::new("grid-preview", LayerPlacement::Background, draw_hover_preview)]
	}

	fn persisted_keys(&self) -> Vec<StateKey> {
		vec![StateKey::both("options")]
	}
}
