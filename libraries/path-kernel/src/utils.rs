use glam::DVec2;
use kurbo::{CubicBez, Point, Vec2};

pub fn dvec2_to_point(value: DVec2) -> Point {
	Point::new(value.x, value.y)
}

pub fn point_to_dvec2(point: Point) -> DVec2 {
	DVec2::new(point.x, point.y)
}

pub fn vec2_to_dvec2(vector: Vec2) -> DVec2 {
	DVec2::new(vector.x, vector.y)
}

pub fn cubic_bez(start: DVec2, ctrl1: DVec2, ctrl2: DVec2, end: DVec2) -> CubicBez {
	CubicBez::new(dvec2_to_point(start), dvec2_to_point(ctrl1), dvec2_to_point(ctrl2), dvec2_to_point(end))
}

/// Returns the normalized vector, or `None` if it is too short (or not finite) to carry a direction.
pub fn try_normalize(vector: DVec2) -> Option<DVec2> {
	if vector.length_squared() <= crate::consts::MIN_DIRECTION_LENGTH_SQUARED {
		return None;
	}
	vector.try_normalize()
}

/// Compare two points within the given absolute tolerance on each axis.
pub fn dvec2_compare(a: DVec2, b: DVec2, max_abs_diff: f64) -> bool {
	(a - b).abs().max_element() < max_abs_diff
}

/// Perpendicular distance of `point` from the segment `start`–`end`, falling back to the distance from `start` when the segment is degenerate.
pub fn distance_to_segment(point: DVec2, start: DVec2, end: DVec2) -> f64 {
	let segment = end - start;
	let length_squared = segment.length_squared();
	if length_squared == 0. {
		return point.distance(start);
	}
	let t = ((point - start).dot(segment) / length_squared).clamp(0., 1.);
	point.distance(start + segment * t)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn segment_distance() {
		assert_eq!(distance_to_segment(DVec2::new(5., 3.), DVec2::ZERO, DVec2::new(10., 0.)), 3.);
		assert_eq!(distance_to_segment(DVec2::new(-4., 3.), DVec2::ZERO, DVec2::new(10., 0.)), 5.);
		assert_eq!(distance_to_segment(DVec2::new(3., 4.), DVec2::ZERO, DVec2::ZERO), 5.);
	}

	#[test]
	fn degenerate_direction() {
		assert_eq!(try_normalize(DVec2::ZERO), None);
		assert_eq!(try_normalize(DVec2::new(0., 2.)), Some(DVec2::Y));
	}
}
