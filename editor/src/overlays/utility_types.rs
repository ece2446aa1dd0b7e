use crate::consts::{COLOR_OVERLAY_BLUE, COLOR_OVERLAY_WHITE, MANIPULATOR_GROUP_MARKER_SIZE};

use path_kernel::Path;

use glam::{DAffine2, DVec2};
use serde::{Deserialize, Serialize};

/// A single recorded draw call. All coordinates are in viewport space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum OverlayPrimitive {
	Line {
		start: DVec2,
		end: DVec2,
		color: String,
	},
	Polyline {
		points: Vec<DVec2>,
		closed: bool,
		color: String,
	},
	Path {
		path: Path,
		stroke: Option<String>,
		fill: Option<String>,
		weight: f64,
	},
	Circle {
		center: DVec2,
		radius: f64,
		fill: Option<String>,
		stroke: Option<String>,
	},
	Text {
		text: String,
		position: DVec2,
		color: String,
	},
}

/// Records the draw calls of a layer. Positions are given in the layer's own space and mapped to the viewport by `transform`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayContext {
	pub transform: DAffine2,
	primitives: Vec<OverlayPrimitive>,
}

impl OverlayContext {
	pub fn new(transform: DAffine2) -> Self {
		Self { transform, primitives: Vec::new() }
	}

	/// A context whose positions are already in viewport pixels.
	pub fn screen_space() -> Self {
		Self::new(DAffine2::IDENTITY)
	}

	pub fn to_screen(&self, position: DVec2) -> DVec2 {
		self.transform.transform_point2(position)
	}

	/// Scale factor from layer units to viewport pixels, used to keep fixed-size markers readable at every zoom.
	pub fn pixel_scale(&self) -> f64 {
		self.transform.matrix2.x_axis.length().max(f64::EPSILON)
	}

	pub fn line(&mut self, start: DVec2, end: DVec2, color: Option<&str>) {
		let (start, end) = (self.to_screen(start), self.to_screen(end));
		self.primitives.push(OverlayPrimitive::Line {
			start,
			end,
			color: color.unwrap_or(COLOR_OVERLAY_BLUE).to_string(),
		});
	}

	/// Draw a line that starts at `start` and extends `length` viewport pixels in `direction`, regardless of zoom.
	pub fn screen_ray(&mut self, start: DVec2, direction: DVec2, length: f64, color: Option<&str>) {
		let start = self.to_screen(start);
		let direction = self.transform.transform_vector2(direction).normalize_or_zero();
		self.primitives.push(OverlayPrimitive::Line {
			start,
			end: start + direction * length,
			color: color.unwrap_or(COLOR_OVERLAY_BLUE).to_string(),
		});
	}

	pub fn polyline(&mut self, points: impl IntoIterator<Item = DVec2>, closed: bool, color: Option<&str>) {
		let points: Vec<_> = points.into_iter().map(|point| self.to_screen(point)).collect();
		if points.len() < 2 {
			return;
		}
		self.primitives.push(OverlayPrimitive::Polyline {
			points,
			closed,
			color: color.unwrap_or(COLOR_OVERLAY_BLUE).to_string(),
		});
	}

	pub fn quad(&mut self, min: DVec2, max: DVec2, color: Option<&str>) {
		let corners = [min, DVec2::new(max.x, min.y), max, DVec2::new(min.x, max.y)];
		self.polyline(corners, true, color);
	}

	/// Stroke a path with a thin overlay outline.
	pub fn outline(&mut self, path: &Path, color: Option<&str>) {
		self.styled_path(path, Some(color.unwrap_or(COLOR_OVERLAY_BLUE)), None, 1.);
	}

	pub fn styled_path(&mut self, path: &Path, stroke: Option<&str>, fill: Option<&str>, weight: f64) {
		if path.is_empty() {
			return;
		}
		self.primitives.push(OverlayPrimitive::Path {
			path: path.transformed(self.transform),
			stroke: stroke.map(str::to_string),
			fill: fill.map(str::to_string),
			weight,
		});
	}

	pub fn circle(&mut self, center: DVec2, radius: f64, color_fill: Option<&str>, color_stroke: Option<&str>) {
		let center = self.to_screen(center);
		self.primitives.push(OverlayPrimitive::Circle {
			center,
			radius,
			fill: color_fill.map(str::to_string),
			stroke: Some(color_stroke.unwrap_or(COLOR_OVERLAY_BLUE).to_string()),
		});
	}

	pub fn manipulator_anchor(&mut self, position: DVec2, selected: bool, color: Option<&str>) {
		let color_stroke = color.unwrap_or(COLOR_OVERLAY_BLUE);
		let color_fill = if selected { color_stroke } else { COLOR_OVERLAY_WHITE };
		self.circle(position, MANIPULATOR_GROUP_MARKER_SIZE / 2., Some(color_fill), Some(color_stroke));
	}

	pub fn text(&mut self, text: &str, position: DVec2, color: &str) {
		let position = self.to_screen(position);
		self.primitives.push(OverlayPrimitive::Text {
			text: text.to_string(),
			position,
			color: color.to_string(),
		});
	}

	pub fn primitives(&self) -> &[OverlayPrimitive] {
		&self.primitives
	}

	pub fn into_primitives(self) -> Vec<OverlayPrimitive> {
		self.primitives
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use path_kernel::Subpath;

	#[test]
	fn records_in_viewport_space() {
		let mut overlay = OverlayContext::new(DAffine2::from_translation(DVec2::new(10., 20.)) * DAffine2::from_scale(DVec2::splat(2.)));
		overlay.line(DVec2::ZERO, DVec2::new(5., 0.), None);
		overlay.outline(&Path::from_subpath(Subpath::from_anchors([DVec2::ZERO, DVec2::ONE], false)), None);

		let [OverlayPrimitive::Line { start, end, .. }, OverlayPrimitive::Path { path, .. }] = overlay.primitives() else {
			panic!("Unexpected primitives {:?}", overlay.primitives());
		};
		assert_eq!((*start, *end), (DVec2::new(10., 20.), DVec2::new(20., 20.)));
		assert_eq!(path.subpaths[0].anchors(), vec![DVec2::new(10., 20.), DVec2::new(12., 22.)]);
	}

	#[test]
	fn screen_rays_ignore_zoom() {
		let mut overlay = OverlayContext::new(DAffine2::from_scale(DVec2::splat(4.)));
		overlay.screen_ray(DVec2::ONE, DVec2::X, 40., None);

		assert_eq!(
			overlay.into_primitives(),
			vec![OverlayPrimitive::Line {
				start: DVec2::splat(4.),
				end: DVec2::new(44., 4.),
				color: COLOR_OVERLAY_BLUE.to_string(),
			}]
		);
	}
}
