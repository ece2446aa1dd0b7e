//! Winding direction and fill-rule conflict detection.
//!
//! Curves are approximated by their control polygon rather than integrated exactly. Sharply curved subpaths can therefore
//! be misclassified, which in turn can mis-signal a conflict. This is a known precision limitation of the analysis.

use crate::element::{Element, ElementId, FillRule};
use crate::path::{Command, Subpath};

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Direction of travel around a subpath, in a coordinate system where Y increases downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindingDirection {
	Clockwise,
	CounterClockwise,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubpathWinding {
	pub subpath_index: usize,
	pub signed_area: f64,
	pub direction: WindingDirection,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindingReport {
	pub element: ElementId,
	pub fill_rule: FillRule,
	pub subpaths: Vec<SubpathWinding>,
	/// Set when the fill rule is nonzero and at least two subpaths wind in opposite directions, which tends to produce unintended holes.
	pub conflict: bool,
}

/// The points used for the area estimate: every anchor, plus both control points of each cubic.
pub fn control_polygon(subpath: &Subpath) -> Vec<DVec2> {
	let mut points = Vec::with_capacity(subpath.len() * 3);
	for command in subpath.commands() {
		match *command {
			Command::MoveTo(position) | Command::LineTo(position) => points.push(position),
			Command::CubicBezierTo { ctrl1, ctrl2, to } => points.extend([ctrl1, ctrl2, to]),
			Command::ClosePath => {}
		}
	}
	points
}

/// Shoelace area over the control polygon. Positive means clockwise on a Y-down canvas.
pub fn signed_area(subpath: &Subpath) -> f64 {
	let points = control_polygon(subpath);
	if points.len() < 3 {
		return 0.;
	}

	let doubled_area: f64 = points.iter().zip(points.iter().cycle().skip(1)).map(|(a, b)| a.perp_dot(*b)).sum();
	doubled_area / 2.
}

pub fn winding_direction(subpath: &Subpath) -> WindingDirection {
	if signed_area(subpath) >= 0. { WindingDirection::Clockwise } else { WindingDirection::CounterClockwise }
}

pub fn element_winding(element: &Element) -> Option<WindingReport> {
	let subpaths: Vec<_> = element
		.path
		.subpaths
		.iter()
		.enumerate()
		.filter(|(_, subpath)| !subpath.is_empty())
		.map(|(subpath_index, subpath)| {
			let signed_area = signed_area(subpath);
			SubpathWinding {
				subpath_index,
				signed_area,
				direction: if signed_area >= 0. { WindingDirection::Clockwise } else { WindingDirection::CounterClockwise },
			}
		})
		.collect();

	if subpaths.is_empty() {
		return None;
	}

	let mixed_directions = subpaths.iter().any(|winding| winding.direction != subpaths[0].direction);
	Some(WindingReport {
		element: element.id,
		fill_rule: element.style.fill_rule,
		conflict: element.style.fill_rule == FillRule::NonZero && mixed_directions,
		subpaths,
	})
}

/// One report per element that has at least one non-empty subpath.
pub fn analyze_winding(elements: &[Element]) -> Vec<WindingReport> {
	elements.iter().filter_map(element_winding).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::element::Style;
	use crate::path::Path;

	fn square(reversed: bool) -> Subpath {
		let mut corners = vec![DVec2::new(0., 0.), DVec2::new(10., 0.), DVec2::new(10., 10.), DVec2::new(0., 10.)];
		if reversed {
			corners.reverse();
		}
		Subpath::from_anchors(corners, true)
	}

	fn element(subpaths: Vec<Subpath>, fill_rule: FillRule) -> Element {
		let style = Style { fill_rule, ..Default::default() };
		Element::new(ElementId(1), Path::new(subpaths), style)
	}

	#[test]
	fn square_directions() {
		assert_eq!(signed_area(&square(false)), 100.);
		assert_eq!(winding_direction(&square(false)), WindingDirection::Clockwise);
		assert_eq!(signed_area(&square(true)), -100.);
		assert_eq!(winding_direction(&square(true)), WindingDirection::CounterClockwise);
	}

	#[test]
	fn cubic_uses_control_polygon() {
		let mut subpath = Subpath::start(DVec2::ZERO);
		subpath.cubic_to(DVec2::new(10., 0.), DVec2::new(10., 10.), DVec2::new(0., 10.)).close();
		assert_eq!(signed_area(&subpath), 100.);
	}

	#[test]
	fn nonzero_with_opposing_subpaths_conflicts() {
		let reports = analyze_winding(&[element(vec![square(false), square(true)], FillRule::NonZero)]);
		assert_eq!(reports.len(), 1);
		assert!(reports[0].conflict);
	}

	#[test]
	fn evenodd_never_conflicts() {
		let reports = analyze_winding(&[element(vec![square(false), square(true)], FillRule::EvenOdd)]);
		assert!(!reports[0].conflict);
	}

	#[test]
	fn consistent_directions_do_not_conflict() {
		let reports = analyze_winding(&[element(vec![square(false), square(false)], FillRule::NonZero)]);
		assert!(!reports[0].conflict);
	}

	#[test]
	fn empty_elements_are_skipped() {
		assert!(analyze_winding(&[element(Vec::new(), FillRule::NonZero)]).is_empty());
	}
}
