use super::tool_prelude::*;
use crate::misc::EditorError;
use crate::tool::freehand_session::FreehandSession;

use path_kernel::generators::catmull_rom_to_bezier;
use path_kernel::{Color, Path, Style, Subpath};

pub struct FreehandTool;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreehandToolData {
	pub session: FreehandSession,
	/// Fit a smooth spline through the recorded points instead of joining them with straight lines.
	pub smoothing: bool,
	pub stroke_weight: f64,
}

impl Default for FreehandToolData {
	fn default() -> Self {
		Self {
			session: FreehandSession::default(),
			smoothing: true,
			stroke_weight: FREEHAND_DEFAULT_STROKE_WEIGHT,
		}
	}
}

fn synthesize_stroke(points: &[DVec2], smoothing: bool, stroke_weight: f64) -> Result<(Path, Style), EditorError> {
	let subpath = if smoothing { catmull_rom_to_bezier(points, false) } else { Subpath::from_anchors(points.iter().copied(), false) };
	if subpath.len() < 2 {
		return Err(EditorError::Synthesis(format!("A stroke needs at least two distinct points, got {}", points.len())));
	}
	if !(stroke_weight > 0. && stroke_weight.is_finite()) {
		return Err(EditorError::Synthesis(format!("Invalid stroke weight {stroke_weight}")));
	}

	Ok((Path::from_subpath(subpath), Style::stroked(Color::BLACK, stroke_weight)))
}

fn draw_preview(_context: &LayerContext<'_>, data: &FreehandToolData, overlay: &mut OverlayContext) {
	if data.session.is_drawing {
		overlay.polyline(data.session.points.iter().copied(), false, Some(COLOR_OVERLAY_BLUE));
	}
}

impl Plugin for FreehandTool {
	type State = FreehandToolData;

	fn id(&self) -> &'static str {
		"freehand"
	}

	fn metadata(&self) -> PluginMetadata {
		PluginMetadata {
			name: "Freehand Tool",
			tooltip: "Draw a free-form stroke",
			icon: "VectorFreehandTool",
		}
	}

	fn subscribed_events(&self) -> PointerEvents {
		PointerEvents::GESTURE
	}

	fn handle_event(&self, event: &ToolEvent, state: &mut StateSlice<'_, FreehandToolData>, context: &mut ToolContext) {
		let min_distance = context.preferences.freehand_min_distance;
		state.update(|data| {
			let (smoothing, stroke_weight) = (data.smoothing, data.stroke_weight);
			data.session.transition(event, min_distance, context, |points| synthesize_stroke(points, smoothing, stroke_weight));
		});
	}

	fn behavior_flags(&self, data: &FreehandToolData) -> BehaviorFlags {
		let mut flags = BehaviorFlags::PREVENTS_SELECTION;
		flags.set(BehaviorFlags::HIDE_SELECTION_OVERLAY, data.session.is_drawing);
		flags
	}

	fn session_phase(&self, data: &FreehandToolData) -> SessionPhase {
		data.session.phase()
	}

	fn canvas_layers(&self) -> Vec<CanvasLayer<FreehandToolData>> {
		vec![CanvasLayer::new("freehand-preview", LayerPlacement::Foreground, draw_preview)]
	}

	fn persisted_keys(&self) -> Vec<StateKey> {
		vec![StateKey::persistent("smoothing"), StateKey::both("stroke_weight")]
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn strokes_need_two_distinct_points() {
		assert!(synthesize_stroke(&[DVec2::ZERO], false, 2.).is_err());
		assert!(synthesize_stroke(&[DVec2::ZERO, DVec2::X], false, 0.).is_err());

		let (path, style) = synthesize_stroke(&[DVec2::ZERO, DVec2::X, DVec2::ONE], true, 3.).unwrap();
		assert_eq!(path.subpaths[0].len(), 3);
		assert_eq!(style.stroke_weight, 3.);
	}
}
