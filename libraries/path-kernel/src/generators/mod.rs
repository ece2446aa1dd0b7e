//! Parametric shape generators. Every generator takes a plain options record and returns independent subpaths, with degenerate
//! options producing no subpaths rather than an error.

pub mod isometric;
pub mod spiral;

pub use isometric::{GridStyle, IsometricGridOptions, generate_isometric_grid};
pub use spiral::{SpiralOptions, SpiralType, generate_spiral, spiral_points};

use crate::consts::CATMULL_ROM_TENSION;
use crate::path::Subpath;

use glam::DVec2;

/// Convert a Catmull-Rom spline through `points` into cubic segments. Fewer than two points produce an empty subpath.
///
/// Open splines duplicate their end points as the missing neighbours; closed ones wrap around and end with `ClosePath`.
pub fn catmull_rom_to_bezier(points: &[DVec2], closed: bool) -> Subpath {
	let count = points.len();
	if count < 2 {
		return Subpath::default();
	}

	let point = |index: isize| -> DVec2 {
		if closed {
			points[index.rem_euclid(count as isize) as usize]
		} else {
			points[index.clamp(0, count as isize - 1) as usize]
		}
	};

	let mut subpath = Subpath::start(points[0]);
	let segment_count = if closed { count } else { count - 1 };
	for index in 0..segment_count as isize {
		let [previous, start, end, next] = [point(index - 1), point(index), point(index + 1), point(index + 2)];
		let ctrl1 = start + (end - previous) / CATMULL_ROM_TENSION;
		let ctrl2 = end - (next - start) / CATMULL_ROM_TENSION;
		subpath.cubic_to(ctrl1, ctrl2, end);
	}
	if closed {
		subpath.close();
	}
	subpath
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::path::Command;

	#[test]
	fn too_few_points() {
		assert!(catmull_rom_to_bezier(&[], false).is_empty());
		assert!(catmull_rom_to_bezier(&[DVec2::ONE], true).is_empty());
	}

	#[test]
	fn open_spline_passes_through_points() {
		let points = [DVec2::ZERO, DVec2::new(10., 10.), DVec2::new(20., 0.)];
		let subpath = catmull_rom_to_bezier(&points, false);
		assert_eq!(subpath.len(), 3);
		assert_eq!(subpath.anchors(), points.to_vec());
		assert_eq!(
			subpath.commands()[1],
			Command::CubicBezierTo {
				ctrl1: DVec2::new(10., 10.) / 6.,
				ctrl2: DVec2::new(10., 10.) - DVec2::new(20., 0.) / 6.,
				to: DVec2::new(10., 10.),
			}
		);
	}

	#[test]
	fn closed_spline_wraps() {
		let points = [DVec2::ZERO, DVec2::new(10., 0.), DVec2::new(10., 10.), DVec2::new(0., 10.)];
		let subpath = catmull_rom_to_bezier(&points, true);
		assert_eq!(subpath.len(), 6);
		assert!(subpath.is_closed());
		assert_eq!(subpath.commands()[4].end_point(), Some(DVec2::ZERO));
	}
}
