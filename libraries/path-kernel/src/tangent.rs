use crate::element::{Element, ElementId};
use crate::path::{Command, Subpath};
use crate::utils::try_normalize;

use glam::DVec2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VertexTangent {
	pub command_index: usize,
	pub anchor: DVec2,
	/// Unit direction of travel through the anchor.
	pub direction: DVec2,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementTangents {
	pub element: ElementId,
	/// Tangents for each subpath, in subpath order.
	pub subpaths: Vec<Vec<VertexTangent>>,
}

/// The first of `candidates` that does not coincide with `anchor`, as a direction away from it.
fn away_from(anchor: DVec2, candidates: &[DVec2]) -> Option<DVec2> {
	candidates.iter().find_map(|&candidate| try_normalize(candidate - anchor))
}

/// Direction leaving the anchor of the command at `index`, taken from the command that follows it.
pub fn outgoing_tangent(subpath: &Subpath, index: usize) -> Option<DVec2> {
	let anchor = subpath.anchor_at(index)?;
	match *subpath.commands().get(index + 1)? {
		Command::LineTo(position) => away_from(anchor, &[position]),
		Command::CubicBezierTo { ctrl1, ctrl2, to } => away_from(anchor, &[ctrl1, ctrl2, to]),
		Command::ClosePath => away_from(anchor, &[subpath.start_point()?]),
		Command::MoveTo(_) => None,
	}
}

/// Direction arriving at the anchor of the command at `index`, taken from the command itself.
pub fn incoming_tangent(subpath: &Subpath, index: usize) -> Option<DVec2> {
	let commands = subpath.commands();
	match *commands.get(index)? {
		Command::LineTo(position) => away_from(subpath.pen_position_before(index)?, &[position]),
		Command::CubicBezierTo { ctrl1, ctrl2, to } => away_from(to, &[ctrl2, ctrl1, subpath.pen_position_before(index)?]).map(|direction| -direction),
		Command::ClosePath => away_from(subpath.pen_position_before(index)?, &[subpath.start_point()?]),
		// The start of a closed subpath is reached again by the closing edge, or by the last drawn command when that edge has no length
		Command::MoveTo(start) if subpath.is_closed() => {
			let close_index = commands.len() - 1;
			let last_anchor = subpath.pen_position_before(close_index)?;
			away_from(last_anchor, &[start]).or_else(|| incoming_tangent(subpath, close_index.checked_sub(1).filter(|&index| index > 0)?))
		}
		Command::MoveTo(_) => None,
	}
}

/// The tangent at a command's anchor, preferring the outgoing direction and falling back to the incoming one.
pub fn tangent_at(subpath: &Subpath, index: usize) -> Option<DVec2> {
	outgoing_tangent(subpath, index).or_else(|| incoming_tangent(subpath, index))
}

/// Tangents at every anchor of the subpath. The closing command shares the start anchor and is not reported separately.
pub fn subpath_tangents(subpath: &Subpath) -> Vec<VertexTangent> {
	subpath
		.commands()
		.iter()
		.enumerate()
		.filter(|(_, command)| !command.is_close_path())
		.filter_map(|(command_index, _)| {
			Some(VertexTangent {
				command_index,
				anchor: subpath.anchor_at(command_index)?,
				direction: tangent_at(subpath, command_index)?,
			})
		})
		.collect()
}

pub fn analyze_tangents(elements: &[Element]) -> Vec<ElementTangents> {
	elements
		.iter()
		.filter(|element| !element.path.is_empty())
		.map(|element| ElementTangents {
			element: element.id,
			subpaths: element.path.subpaths.iter().map(subpath_tangents).collect(),
		})
		.collect()
}
