use crate::consts::{VIEWPORT_ZOOM_SCALE_MAX, VIEWPORT_ZOOM_SCALE_MIN};

use glam::{DAffine2, DVec2};
use serde::{Deserialize, Serialize};

/// The camera over the document. Only camera controls change it; tools and the geometry kernel read it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
	/// Viewport-space offset of the document origin.
	pub pan: DVec2,
	pub zoom: f64,
}

impl Default for Viewport {
	fn default() -> Self {
		Self { pan: DVec2::ZERO, zoom: 1. }
	}
}

impl Viewport {
	/// Zoom is clamped into the supported range, with unusable values falling back to 1.
	pub fn new(pan: DVec2, zoom: f64) -> Self {
		let zoom = if zoom.is_finite() && zoom > 0. {
			zoom.clamp(VIEWPORT_ZOOM_SCALE_MIN, VIEWPORT_ZOOM_SCALE_MAX)
		} else {
			log::warn!("Ignoring unusable viewport zoom {zoom}");
			1.
		};
		let pan = if pan.is_finite() { pan } else { DVec2::ZERO };
		Self { pan, zoom }
	}

	pub fn document_to_viewport(&self) -> DAffine2 {
		DAffine2::from_translation(self.pan) * DAffine2::from_scale(DVec2::splat(self.zoom))
	}

	pub fn to_viewport(&self, document_point: DVec2) -> DVec2 {
		document_point * self.zoom + self.pan
	}

	pub fn to_document(&self, viewport_point: DVec2) -> DVec2 {
		(viewport_point - self.pan) / self.zoom
	}

	/// The document-space rectangle visible on a canvas of the given size.
	pub fn bounds(&self, canvas_size: DVec2) -> ViewportBounds {
		ViewportBounds {
			origin: -self.pan / self.zoom,
			extent: canvas_size / self.zoom,
		}
	}
}

/// The visible document region, expressed the way a canvas view box is: `origin = -pan / zoom`, `extent = size / zoom`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportBounds {
	pub origin: DVec2,
	pub extent: DVec2,
}

impl ViewportBounds {
	/// Maps the view box onto a canvas of `canvas_size`. This matches `Viewport::document_to_viewport` for the same canvas.
	pub fn to_canvas(&self, canvas_size: DVec2) -> DAffine2 {
		let scale = if self.extent.cmpgt(DVec2::ZERO).all() { canvas_size / self.extent } else { DVec2::ONE };
		DAffine2::from_scale(scale) * DAffine2::from_translation(-self.origin)
	}

	pub fn contains(&self, point: DVec2) -> bool {
		let max = self.origin + self.extent;
		point.cmpge(self.origin).all() && point.cmple(max).all()
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn view_box_contract() {
		let viewport = Viewport::new(DVec2::new(100., -50.), 2.);
		let bounds = viewport.bounds(DVec2::new(800., 600.));
		assert_eq!(bounds.origin, DVec2::new(-50., 25.));
		assert_eq!(bounds.extent, DVec2::new(400., 300.));
		assert_eq!(viewport.to_viewport(bounds.origin), DVec2::ZERO);
	}

	#[test]
	fn view_box_transform_matches_camera() {
		let viewport = Viewport::new(DVec2::new(30., 40.), 1.5);
		let canvas_size = DVec2::new(640., 480.);
		let from_bounds = viewport.bounds(canvas_size).to_canvas(canvas_size);
		let point = DVec2::new(12., -7.);
		assert!(from_bounds.transform_point2(point).abs_diff_eq(viewport.document_to_viewport().transform_point2(point), 1e-9));
	}

	#[test]
	fn round_trip_between_spaces() {
		let viewport = Viewport::new(DVec2::new(-20., 10.), 4.);
		let point = DVec2::new(3., 9.);
		assert_eq!(viewport.to_document(viewport.to_viewport(point)), point);
	}

	#[test]
	fn unusable_zoom_falls_back() {
		assert_eq!(Viewport::new(DVec2::ZERO, 0.).zoom, 1.);
		assert_eq!(Viewport::new(DVec2::ZERO, f64::NAN).zoom, 1.);
	}
}
