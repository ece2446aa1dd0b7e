use super::tool_prelude::*;

use path_kernel::generators::{SpiralOptions, generate_spiral};
use path_kernel::{Color, Path, Style};

/// Drag from the center outward to place a spiral. Control returns to the select tool once the spiral is placed.
pub struct SpiralTool;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralToolData {
	pub options: SpiralOptions,
	pub drag_start: Option<DVec2>,
	pub drag_radius: f64,
}

impl SpiralToolData {
	/// The options of the spiral the current drag would place, if it is large enough to draw.
	fn dragged_spiral(&self) -> Option<SpiralOptions> {
		let center = self.drag_start?;
		let options = SpiralOptions {
			center,
			outer_radius: self.drag_radius,
			..self.options.clone()
		};
		(!options.is_degenerate()).then_some(options)
	}
}

fn draw_preview(_context: &LayerContext<'_>, data: &SpiralToolData, overlay: &mut OverlayContext) {
	let Some(options) = data.dragged_spiral() else { return };

	overlay.outline(&Path::new(generate_spiral(&options)), Some(COLOR_OVERLAY_BLUE));
	overlay.manipulator_anchor(options.center, true, None);
}

impl Plugin for SpiralTool {
	type State = SpiralToolData;

	fn id(&self) -> &'static str {
		"spiral"
	}

	fn metadata(&self) -> PluginMetadata {
		PluginMetadata {
			name: "Spiral Tool",
			tooltip: "Drag to draw a spiral",
			icon: "VectorSpiralTool",
		}
	}

	fn subscribed_events(&self) -> PointerEvents {
		PointerEvents::GESTURE
	}

	fn handle_event(&self, event: &ToolEvent, state: &mut StateSlice<'_, SpiralToolData>, context: &mut ToolContext) {
		state.update(|data| match (data.drag_start, event.kind) {
			(_, PointerEventKind::Down) => {
				data.drag_start = Some(event.point);
				data.drag_radius = 0.;
			}
			(Some(center), PointerEventKind::Move) => data.drag_radius = center.distance(event.point),
			(Some(center), PointerEventKind::Up | PointerEventKind::Cancel) => {
				data.drag_radius = center.distance(event.point);
				let spiral = data.dragged_spiral();
				data.drag_start = None;
				data.drag_radius = 0.;

				let Some(options) = spiral else {
					log::debug!("Spiral drag too small to place a spiral");
					return;
				};
				let id = context.document.add_element(Path::new(generate_spiral(&options)), Style::stroked(Color::BLACK, 1.));
				context.responses.push_back(ToolResponse::SelectionChanged(vec![id]));
				context.responses.push_back(ToolResponse::ActivatePlugin(SELECT_PLUGIN_ID.into()));
			}
			(None, _) => {}
		});
	}

	fn behavior_flags(&self, _data: &SpiralToolData) -> BehaviorFlags {
		BehaviorFlags::PREVENTS_SELECTION
	}

	fn session_phase(&self, data: &SpiralToolData) -> SessionPhase {
		if data.drag_start.is_some() { SessionPhase::Drawing } else { SessionPhase::Idle }
	}

	fn canvas_layers(&self) -> Vec<CanvasLayer<SpiralToolData>> {
		vec![CanvasLayer::new("spiral-preview", LayerPlacement::Foreground, draw_preview)]
	}

	fn persisted_keys(&self) -> Vec<StateKey> {
		vec![StateKey::persistent("options")]
	}
}
