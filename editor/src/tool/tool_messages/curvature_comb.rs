use super::tool_prelude::*;

use path_kernel::curvature::{ExtremumKind, analyze_subpath};
use path_kernel::comb_tooth;

/// Draws a curvature comb along the curved segments of the selected elements.
pub struct CurvatureComb;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurvatureCombData {
	/// Samples per curve segment.
	pub density: usize,
	pub scale: f64,
}

impl Default for CurvatureCombData {
	fn default() -> Self {
		Self {
			density: COMB_DEFAULT_DENSITY,
			scale: COMB_DEFAULT_SCALE,
		}
	}
}

fn draw_comb(context: &LayerContext<'_>, data: &CurvatureCombData, overlay: &mut OverlayContext) {
	if !context.is_active("curvature_comb") {
		return;
	}
	let max_tooth_length = context.preferences.comb_max_tooth_length;

	for element in context.document.selected_elements() {
		for subpath in &element.path.subpaths {
			let analysis = analyze_subpath(subpath, data.density);

			for segment in analysis.samples.chunk_by(|a, b| a.segment_index == b.segment_index) {
				let teeth: Vec<_> = segment.iter().map(|sample| comb_tooth(sample, data.scale, max_tooth_length)).collect();
				for &(base, tip) in &teeth {
					overlay.line(base, tip, Some(COLOR_OVERLAY_GRAY));
				}
				overlay.polyline(teeth.iter().map(|&(_, tip)| tip), false, Some(COLOR_OVERLAY_BLUE));
			}

			for &index in &analysis.inflections {
				if let Some(sample) = analysis.samples.get(index) {
					overlay.manipulator_anchor(sample.position, true, Some(COLOR_OVERLAY_YELLOW));
				}
			}
			for extremum in &analysis.extrema {
				let Some(sample) = analysis.samples.get(extremum.sample_index) else { continue };
				let color = match extremum.kind {
					ExtremumKind::Maximum => COLOR_OVERLAY_RED,
					ExtremumKind::Minimum => COLOR_OVERLAY_GREEN,
				};
				overlay.manipulator_anchor(sample.position, false, Some(color));
			}
		}
	}
}

impl Plugin for CurvatureComb {
	type State = CurvatureCombData;

	fn id(&self) -> &'static str {
		"curvature_comb"
	}

	fn metadata(&self) -> PluginMetadata {
		PluginMetadata {
			name: "Curvature Comb",
			tooltip: "Visualize the curvature of the selected paths",
			icon: "ViewportCurvature",
		}
	}

	fn canvas_layers(&self) -> Vec<CanvasLayer<CurvatureCombData>> {
		vec![CanvasLayer::new("curvature-comb", LayerPlacement::Foreground, draw_comb)]
	}

	fn persisted_keys(&self) -> Vec<StateKey> {
		vec![StateKey::persistent("density"), StateKey::persistent("scale")]
	}
}
