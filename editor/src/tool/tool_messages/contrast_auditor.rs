use super::tool_prelude::*;

use path_kernel::{Element, ElementId, contrast_ratio, evaluate_wcag, suggest_better_contrast};

/// Click an element to check its stroke (or fill) color against the audit background, with a suggestion when it falls short.
pub struct ContrastAuditor;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContrastReport {
	pub element: ElementId,
	pub foreground: String,
	pub ratio: f64,
	pub passes: bool,
	/// A foreground meeting the target, present only when the current one does not.
	pub suggestion: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrastAuditorData {
	pub background: String,
	pub target: f64,
	pub reports: Vec<ContrastReport>,
}

impl Default for ContrastAuditorData {
	fn default() -> Self {
		Self {
			background: CONTRAST_DEFAULT_BACKGROUND.into(),
			target: CONTRAST_DEFAULT_TARGET,
			reports: Vec::new(),
		}
	}
}

fn audit(element: &Element, background: &str, target: f64) -> Option<ContrastReport> {
	let foreground = element.style.stroke.or(element.style.fill)?.to_hex();
	let ratio = contrast_ratio(&foreground, background)?;
	let passes = ratio >= target;
	let suggestion = if passes { None } else { suggest_better_contrast(&foreground, background, target) };

	Some(ContrastReport {
		element: element.id,
		foreground,
		ratio,
		passes,
		suggestion,
	})
}

fn describe(report: &ContrastReport) -> String {
	let wcag = evaluate_wcag(report.ratio);
	let levels = [("AA", wcag.pass_aa), ("AAA", wcag.pass_aaa), ("AA large", wcag.pass_aa_large)]
		.iter()
		.map(|(level, pass)| format!("{level} {}", if *pass { "pass" } else { "fail" }))
		.collect::<Vec<_>>()
		.join(", ");

	match &report.suggestion {
		Some(suggestion) => format!("{} {} {:.2}:1 ({levels}), try {suggestion}", report.element, report.foreground, report.ratio),
		None => format!("{} {} {:.2}:1 ({levels})", report.element, report.foreground, report.ratio),
	}
}

fn draw_markers(context: &LayerContext<'_>, data: &ContrastAuditorData, overlay: &mut OverlayContext) {
	if !context.is_active("contrast_auditor") {
		return;
	}

	for report in &data.reports {
		let Some([min, max]) = context.document.element(report.element).and_then(|element| element.path.loose_bounding_box()) else { continue };
		overlay.quad(min, max, Some(if report.passes { COLOR_OVERLAY_GREEN } else { COLOR_OVERLAY_RED }));
	}
}

fn draw_summary(context: &LayerContext<'_>, data: &ContrastAuditorData, overlay: &mut OverlayContext) {
	if !context.is_active("contrast_auditor") {
		return;
	}

	let mut position = DVec2::splat(GLOBAL_LABEL_INSET);
	overlay.text(&format!("Contrast against {} (target {:.1}:1)", data.background, data.target), position, COLOR_OVERLAY_BLACK);
	for report in &data.reports {
		position.y += GLOBAL_LABEL_LINE_HEIGHT;
		overlay.text(&describe(report), position, if report.passes { COLOR_OVERLAY_GREEN } else { COLOR_OVERLAY_RED });
	}
}

impl Plugin for ContrastAuditor {
	type State = ContrastAuditorData;

	fn id(&self) -> &'static str {
		"contrast_auditor"
	}

	fn metadata(&self) -> PluginMetadata {
		PluginMetadata {
			name: "Contrast Auditor",
			tooltip: "Click elements to check their color contrast",
			icon: "ViewportContrast",
		}
	}

	fn subscribed_events(&self) -> PointerEvents {
		PointerEvents::DOWN
	}

	fn handle_event(&self, event: &ToolEvent, state: &mut StateSlice<'_, ContrastAuditorData>, context: &mut ToolContext) {
		let Some(element) = event.target.and_then(|target| context.document.element(target)) else { return };

		state.update(|data| {
			let Some(report) = audit(element, &data.background, data.target) else {
				log::debug!("Element {} has no color that can be audited against {}", element.id, data.background);
				return;
			};
			data.reports.retain(|existing| existing.element != report.element);
			data.reports.push(report);
		});
	}

	fn canvas_layers(&self) -> Vec<CanvasLayer<ContrastAuditorData>> {
		vec![
			CanvasLayer::new("contrast-markers", LayerPlacement::Foreground, draw_markers),
			CanvasLayer::new("contrast-summary", LayerPlacement::Global, draw_summary),
		]
	}

	fn persisted_keys(&self) -> Vec<StateKey> {
		vec![StateKey::persistent("background"), StateKey::persistent("target"), StateKey::temporal("reports")]
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use path_kernel::{Color, Path, Style};

	fn element(stroke: Color) -> Element {
		Element::new(ElementId(3), Path::default(), Style::stroked(stroke, 1.))
	}

	#[test]
	fn failing_colors_get_a_suggestion() {
		let report = audit(&element(Color::from_rgb8(0xcc, 0xcc, 0xcc)), "#ffffff", 4.5).unwrap();
		assert!(!report.passes);
		let suggestion = report.suggestion.as_deref().unwrap();
		assert!(contrast_ratio(suggestion, "#ffffff").unwrap() >= 4.5);
		assert!(describe(&report).contains("AA fail"));

		let report = audit(&element(Color::BLACK), "#ffffff", 4.5).unwrap();
		assert!(report.passes);
		assert_eq!(report.suggestion, None);
	}

	#[test]
	fn unparsable_background_yields_no_report() {
		assert_eq!(audit(&element(Color::BLACK), "not a color", 4.5), None);
	}
}
