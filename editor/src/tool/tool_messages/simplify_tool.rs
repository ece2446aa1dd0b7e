use super::tool_prelude::*;

use path_kernel::{Path, simplify_path, simplify_range};
use std::ops::Range;

/// Click an element to reduce its commands within a tolerance, either whole or over a command range of its first subpath.
pub struct SimplifyTool;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifyToolData {
	pub tolerance: f64,
	/// Commands of the target's first subpath to simplify. The whole element is simplified when unset.
	pub range: Option<Range<usize>>,
}

impl Default for SimplifyToolData {
	fn default() -> Self {
		Self {
			tolerance: SIMPLIFY_DEFAULT_TOLERANCE,
			range: None,
		}
	}
}

fn simplified(path: &Path, data: &SimplifyToolData) -> Option<Path> {
	let Some(range) = data.range.clone() else {
		return Some(simplify_path(path, data.tolerance));
	};

	let first = path.subpaths.first()?;
	let replaced = simplify_range(first, range, data.tolerance)?;
	let mut path = path.clone();
	path.subpaths[0] = replaced;
	Some(path)
}

fn draw_anchors(context: &LayerContext<'_>, data: &SimplifyToolData, overlay: &mut OverlayContext) {
	if !context.is_active("simplify") {
		return;
	}

	for element in context.document.selected_elements() {
		for (subpath_index, subpath) in element.path.subpaths.iter().enumerate() {
			for (index, command) in subpath.commands().iter().enumerate() {
				let Some(anchor) = command.end_point() else { continue };
				let in_range = subpath_index == 0 && data.range.as_ref().is_some_and(|range| range.contains(&index));
				overlay.manipulator_anchor(anchor, in_range, Some(if in_range { COLOR_OVERLAY_YELLOW } else { COLOR_OVERLAY_BLUE }));
			}
		}
	}
}

impl Plugin for SimplifyTool {
	type State = SimplifyToolData;

	fn id(&self) -> &'static str {
		"simplify"
	}

	fn metadata(&self) -> PluginMetadata {
		PluginMetadata {
			name: "Simplify Tool",
			tooltip: "Click a path to reduce its points",
			icon: "VectorSimplifyTool",
		}
	}

	fn subscribed_events(&self) -> PointerEvents {
		PointerEvents::DOWN
	}

	fn handle_event(&self, event: &ToolEvent, state: &mut StateSlice<'_, SimplifyToolData>, context: &mut ToolContext) {
		let (Some(target), Some(data)) = (event.target, state.get()) else { return };
		let Some(element) = context.document.element(target) else { return };

		let before = element.path.command_count();
		let Some(path) = simplified(&element.path, data) else {
			log::warn!("Could not simplify the commands {:?} of element {target}", data.range);
			return;
		};
		log::debug!("Simplified element {target} from {before} to {} commands", path.command_count());

		context.document.replace_path(target, path);
		context.responses.push_back(ToolResponse::SelectionChanged(vec![target]));
	}

	fn canvas_layers(&self) -> Vec<CanvasLayer<SimplifyToolData>> {
		vec![CanvasLayer::new("simplify-anchors", LayerPlacement::Foreground, draw_anchors)]
	}

	fn persisted_keys(&self) -> Vec<StateKey> {
		vec![StateKey::persistent("tolerance"), StateKey::temporal("range")]
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use path_kernel::Subpath;

	fn zigzag() -> Path {
		let points = (0..=20).map(|i| DVec2::new(i as f64 * 10., if i % 2 == 0 { 0. } else { 0.5 }));
		Path::from_subpath(Subpath::from_anchors(points, false))
	}

	#[test]
	fn whole_path_and_range() {
		let path = zigzag();

		let whole = simplified(&path, &SimplifyToolData::default()).unwrap();
		assert_eq!(whole.command_count(), 2);

		let data = SimplifyToolData { range: Some(5..15), ..Default::default() };
		let partial = simplified(&path, &data).unwrap();
		assert!(partial.command_count() < path.command_count());
		assert!(partial.command_count() > 2);

		let invalid = SimplifyToolData { range: Some(15..40), ..Default::default() };
		assert_eq!(simplified(&path, &invalid), None);
	}
}
