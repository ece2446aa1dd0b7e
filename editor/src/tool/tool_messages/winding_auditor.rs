use super::tool_prelude::*;

use path_kernel::tangent::tangent_at;
use path_kernel::{WindingDirection, WindingReport, analyze_winding};

/// Marks the direction of every subpath and flags elements whose nonzero fill is likely to punch unintended holes.
pub struct WindingAuditor;

fn direction_color(report: &WindingReport, direction: WindingDirection) -> &'static str {
	match (report.conflict, direction) {
		(true, _) => COLOR_OVERLAY_RED,
		(false, WindingDirection::Clockwise) => COLOR_OVERLAY_GREEN,
		(false, WindingDirection::CounterClockwise) => COLOR_OVERLAY_BLUE,
	}
}

fn draw_direction_markers(context: &LayerContext<'_>, _: &(), overlay: &mut OverlayContext) {
	if !context.is_active("winding_auditor") {
		return;
	}

	let elements = context.document.elements();
	for report in analyze_winding(elements) {
		let Some(element) = context.document.element(report.element) else { continue };

		for subpath_winding in &report.subpaths {
			let Some(subpath) = element.path.subpaths.get(subpath_winding.subpath_index) else { continue };
			let color = direction_color(&report, subpath_winding.direction);

			if let Some(start) = subpath.start_point() {
				overlay.manipulator_anchor(start, report.conflict, Some(color));
				if let Some(direction) = tangent_at(subpath, 0) {
					overlay.screen_ray(start, direction, WINDING_ARROW_LENGTH, Some(color));
				}
			}
		}
	}
}

fn draw_summary(context: &LayerContext<'_>, _: &(), overlay: &mut OverlayContext) {
	if !context.is_active("winding_auditor") {
		return;
	}

	let reports = analyze_winding(context.document.elements());
	let conflicts = reports.iter().filter(|report| report.conflict).count();
	let color = if conflicts > 0 { COLOR_OVERLAY_RED } else { COLOR_OVERLAY_GREEN };

	let mut position = DVec2::splat(GLOBAL_LABEL_INSET);
	overlay.text(&format!("Winding: {} elements, {conflicts} conflicts", reports.len()), position, color);
	for report in reports.iter().filter(|report| report.conflict) {
		position.y += GLOBAL_LABEL_LINE_HEIGHT;
		overlay.text(&format!("Element {} mixes directions under the nonzero rule", report.element), position, COLOR_OVERLAY_RED);
	}
}

impl Plugin for WindingAuditor {
	type State = ();

	fn id(&self) -> &'static str {
		"winding_auditor"
	}

	fn metadata(&self) -> PluginMetadata {
		PluginMetadata {
			name: "Winding Auditor",
			tooltip: "Show subpath directions and fill rule conflicts",
			icon: "ViewportWinding",
		}
	}

	fn initial_state(&self) -> Option<()> {
		None
	}

	fn canvas_layers(&self) -> Vec<CanvasLayer<()>> {
		vec![
			CanvasLayer::new("winding-markers", LayerPlacement::Foreground, draw_direction_markers),
			CanvasLayer::new("winding-summary", LayerPlacement::Global, draw_summary),
		]
	}
}
