//! Tolerance-based simplification: curves are flattened to polylines which are then decimated with Ramer–Douglas–Peucker.
//! A run whose decimated polyline would need more commands than it already has is kept as it is.

use crate::consts::FLATTEN_TOLERANCE_FRACTION;
use crate::path::{Command, Path, Subpath};
use crate::utils::{distance_to_segment, point_to_dvec2};

use glam::DVec2;
use kurbo::PathEl;
use std::ops::Range;

/// Flatten a `MoveTo`-led run of commands into points, returning whether the run was closed.
fn flatten_run(commands: &[Command], tolerance: f64) -> Option<(Vec<DVec2>, bool)> {
	let subpath = Subpath::new(commands.to_vec()).ok()?;
	let mut points: Vec<DVec2> = Vec::with_capacity(commands.len());
	let mut closed = false;

	kurbo::flatten(subpath.to_bezpath().elements().iter().copied(), tolerance * FLATTEN_TOLERANCE_FRACTION, |element| match element {
		PathEl::MoveTo(point) | PathEl::LineTo(point) => {
			let point = point_to_dvec2(point);
			if points.last() != Some(&point) {
				points.push(point);
			}
		}
		PathEl::ClosePath => closed = true,
		_ => {}
	});

	// The closing line is implied, so an explicit return to the start would only add a zero-length segment
	if closed && points.len() > 1 && points.first() == points.last() {
		points.pop();
	}

	Some((points, closed))
}

fn decimate(points: &[DVec2], first: usize, last: usize, tolerance: f64, keep: &mut [bool]) {
	if last <= first + 1 {
		return;
	}

	let mut farthest = (first, 0.);
	for (index, &point) in points.iter().enumerate().take(last).skip(first + 1) {
		let distance = distance_to_segment(point, points[first], points[last]);
		if distance > farthest.1 {
			farthest = (index, distance);
		}
	}

	let (index, distance) = farthest;
	if distance > tolerance {
		keep[index] = true;
		decimate(points, first, index, tolerance, keep);
		decimate(points, index, last, tolerance, keep);
	}
}

/// Ramer–Douglas–Peucker over an open polyline. Both endpoints are always kept.
pub fn decimate_polyline(points: &[DVec2], tolerance: f64) -> Vec<DVec2> {
	if points.len() <= 2 {
		return points.to_vec();
	}

	let mut keep = vec![false; points.len()];
	keep[0] = true;
	keep[points.len() - 1] = true;
	decimate(points, 0, points.len() - 1, tolerance, &mut keep);

	points.iter().zip(keep).filter_map(|(&point, kept)| kept.then_some(point)).collect()
}

/// Simplify a `MoveTo`-led run of commands into `MoveTo` followed by `LineTo`s, ending in `ClosePath` when the run was closed.
///
/// The result never has more commands than the input: when decimation cannot beat the original count, as with smooth cubics at a
/// tight tolerance, the run is returned unchanged. Runs that are not a valid subpath, or a non-positive tolerance, are also left
/// unchanged.
pub fn simplify_commands(commands: &[Command], tolerance: f64) -> Vec<Command> {
	if !(tolerance > 0. && tolerance.is_finite()) {
		return commands.to_vec();
	}
	let Some(decimated) = decimate_run(commands, tolerance) else {
		log::warn!("Cannot simplify a command run that does not form a subpath");
		return commands.to_vec();
	};

	if decimated.len() < commands.len() { decimated } else { commands.to_vec() }
}

fn decimate_run(commands: &[Command], tolerance: f64) -> Option<Vec<Command>> {
	let (points, closed) = flatten_run(commands, tolerance)?;
	let Some(&start) = points.first() else { return Some(Vec::new()) };

	let simplified = if closed {
		// Decimate the loop as an open polyline returning to its start so the closing edge is taken into account
		let mut loop_points = points;
		loop_points.push(start);
		let mut simplified = decimate_polyline(&loop_points, tolerance);
		if simplified.len() > 1 {
			simplified.pop();
		}
		simplified
	} else {
		decimate_polyline(&points, tolerance)
	};

	let mut result = Vec::with_capacity(simplified.len() + 1);
	result.push(Command::MoveTo(start));
	result.extend(simplified.into_iter().skip(1).map(Command::LineTo));
	if closed {
		result.push(Command::ClosePath);
	}
	Some(result)
}

pub fn simplify_subpath(subpath: &Subpath, tolerance: f64) -> Subpath {
	let commands = simplify_commands(subpath.commands(), tolerance);
	Subpath::new(commands).unwrap_or_else(|_| subpath.clone())
}

pub fn simplify_path(path: &Path, tolerance: f64) -> Path {
	path.subpaths.iter().map(|subpath| simplify_subpath(subpath, tolerance)).collect()
}

/// Simplify only the commands in `range`, splicing the result back so the rest of the subpath is untouched and still connected.
///
/// Returns `None` for a range outside the subpath.
pub fn simplify_range(subpath: &Subpath, range: Range<usize>, tolerance: f64) -> Option<Subpath> {
	let commands = subpath.commands();
	if range.start > range.end || range.end > commands.len() {
		return None;
	}
	if range.is_empty() {
		return Some(subpath.clone());
	}

	let slice = &commands[range.clone()];
	let ends_closed = slice.last().is_some_and(Command::is_close_path);

	// Simplification needs a pen position to start from, so borrow the one preceding the range
	let synthesized_start = !slice[0].is_move_to();
	let mut run = Vec::with_capacity(slice.len() + 2);
	if synthesized_start {
		run.push(Command::MoveTo(subpath.pen_position_before(range.start)?));
	}
	run.extend(slice.iter().copied().filter(|command| !command.is_close_path()));

	// The closing edge returns to the subpath start, which only the full subpath knows, so it is simplified as an explicit line
	let subpath_start = subpath.start_point()?;
	if ends_closed {
		run.push(Command::LineTo(subpath_start));
	}

	let mut replacement = simplify_commands(&run, tolerance);
	if synthesized_start && !replacement.is_empty() {
		replacement.remove(0);
	}
	if range.start > 0 && let Some(Command::MoveTo(position)) = replacement.first().copied() {
		replacement[0] = Command::LineTo(position);
	}
	if ends_closed {
		if replacement.last() == Some(&Command::LineTo(subpath_start)) {
			replacement.pop();
		}
		replacement.push(Command::ClosePath);
	}

	match subpath.splice(range, replacement) {
		Ok(spliced) => Some(spliced),
		Err(error) => {
			log::warn!("Range simplification produced an invalid subpath: {error}");
			None
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn wavy_line() -> Subpath {
		let points = (0..=40).map(|i| DVec2::new(i as f64 * 5., if i % 2 == 0 { 0. } else { 0.4 }));
		Subpath::from_anchors(points, false)
	}

	fn mixed_subpath(closed: bool) -> Subpath {
		let mut subpath = Subpath::start(DVec2::ZERO);
		subpath
			.line_to(DVec2::new(10., 0.3))
			.line_to(DVec2::new(20., 0.))
			.cubic_to(DVec2::new(40., 0.), DVec2::new(40., 40.), DVec2::new(20., 40.))
			.line_to(DVec2::new(10., 40.2))
			.line_to(DVec2::new(0., 40.));
		if closed {
			subpath.close();
		}
		subpath
	}

	#[test]
	fn noise_below_tolerance_collapses() {
		let simplified = simplify_subpath(&wavy_line(), 1.);
		assert_eq!(simplified.commands(), &[Command::MoveTo(DVec2::ZERO), Command::LineTo(DVec2::new(200., 0.))]);
	}

	#[test]
	fn closed_subpaths_stay_closed() {
		let simplified = simplify_subpath(&mixed_subpath(true), 1.);
		assert!(simplified.is_closed());
		assert!(Subpath::validate(simplified.commands()).is_ok());
	}

	#[test]
	fn simplification_is_idempotent() {
		for subpath in [wavy_line(), mixed_subpath(false), mixed_subpath(true)] {
			for tolerance in [0.1, 1., 5.] {
				let once = simplify_subpath(&subpath, tolerance);
				let twice = simplify_subpath(&once, tolerance);
				assert_eq!(once.len(), twice.len(), "tolerance {tolerance}");
			}
		}
	}

	fn circle(radius: f64) -> Subpath {
		let handle = radius * 0.552_284_749_831;
		let mut subpath = Subpath::start(DVec2::new(radius, 0.));
		subpath
			.cubic_to(DVec2::new(radius, handle), DVec2::new(handle, radius), DVec2::new(0., radius))
			.cubic_to(DVec2::new(-handle, radius), DVec2::new(-radius, handle), DVec2::new(-radius, 0.))
			.cubic_to(DVec2::new(-radius, -handle), DVec2::new(-handle, -radius), DVec2::new(0., -radius))
			.cubic_to(DVec2::new(handle, -radius), DVec2::new(radius, -handle), DVec2::new(radius, 0.))
			.close();
		subpath
	}

	#[test]
	fn smooth_curves_never_grow() {
		let subpath = circle(100.);
		for tolerance in [0.1, 0.5, 1., 2., 10.] {
			let simplified = simplify_subpath(&subpath, tolerance);
			assert!(simplified.len() <= subpath.len(), "tolerance {tolerance} grew {} -> {}", subpath.len(), simplified.len());
		}
		assert_eq!(simplify_subpath(&subpath, 0.5), subpath);

		// A tolerance wider than the radius still collapses the loop
		assert!(simplify_subpath(&subpath, 150.).len() < subpath.len());
	}

	#[test]
	fn curved_ranges_never_grow() {
		let subpath = circle(100.);
		let simplified = simplify_range(&subpath, 1..4, 0.5).unwrap();
		assert_eq!(simplified.len(), subpath.len());
		assert!(Subpath::validate(simplified.commands()).is_ok());
	}

	#[test]
	fn non_positive_tolerance_is_identity() {
		let subpath = mixed_subpath(false);
		assert_eq!(simplify_subpath(&subpath, 0.), subpath);
	}

	#[test]
	fn range_splice_keeps_continuity_at_every_boundary() {
		for subpath in [mixed_subpath(false), mixed_subpath(true)] {
			let len = subpath.len();
			for start in 0..len {
				for end in start + 1..=len {
					let result = simplify_range(&subpath, start..end, 0.5).unwrap_or_else(|| panic!("range {start}..{end} failed"));
					assert!(Subpath::validate(result.commands()).is_ok());
					assert_eq!(result.start_point(), subpath.start_point());
					assert_eq!(result.is_closed(), subpath.is_closed());

					// Commands after the range are untouched and the range still ends on its original anchor
					let suffix = &subpath.commands()[end..];
					assert_eq!(&result.commands()[result.len() - suffix.len()..], suffix);
					let boundary = result.len() - suffix.len();
					if boundary > 0 && !subpath.commands()[end - 1].is_close_path() {
						assert_eq!(result.anchor_at(boundary - 1), subpath.anchor_at(end - 1), "range {start}..{end}");
					}
				}
			}
		}
	}

	#[test]
	fn invalid_range_is_rejected() {
		let subpath = mixed_subpath(false);
		assert_eq!(simplify_range(&subpath, 2..99, 1.), None);
		assert_eq!(simplify_range(&subpath, 3..3, 1.), Some(subpath));
	}
}
