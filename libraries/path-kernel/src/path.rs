use crate::utils::dvec2_to_point;

use glam::{DAffine2, DVec2};
use kurbo::BezPath;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::ops::Range;
use thiserror::Error;

/// A single drawing instruction within a [`Subpath`]. Positions are in document space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
	MoveTo(DVec2),
	LineTo(DVec2),
	CubicBezierTo { ctrl1: DVec2, ctrl2: DVec2, to: DVec2 },
	ClosePath,
}

impl Command {
	/// The anchor the pen rests on after this command. `ClosePath` returns `None` since it goes back to the subpath start.
	pub fn end_point(&self) -> Option<DVec2> {
		match *self {
			Command::MoveTo(position) | Command::LineTo(position) => Some(position),
			Command::CubicBezierTo { to, .. } => Some(to),
			Command::ClosePath => None,
		}
	}

	pub fn is_move_to(&self) -> bool {
		matches!(self, Command::MoveTo(_))
	}

	pub fn is_close_path(&self) -> bool {
		matches!(self, Command::ClosePath)
	}

	pub fn apply_transform(&mut self, transform: DAffine2) {
		match self {
			Command::MoveTo(position) | Command::LineTo(position) => *position = transform.transform_point2(*position),
			Command::CubicBezierTo { ctrl1, ctrl2, to } => {
				*ctrl1 = transform.transform_point2(*ctrl1);
				*ctrl2 = transform.transform_point2(*ctrl2);
				*to = transform.transform_point2(*to);
			}
			Command::ClosePath => {}
		}
	}
}

/// Structural violations of the subpath invariants.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PathError {
	#[error("A non-empty subpath must begin with MoveTo")]
	MissingMoveTo,
	#[error("MoveTo at command {0} would start a second stroke inside one subpath")]
	MisplacedMoveTo(usize),
	#[error("Command {0} follows a ClosePath, which may only terminate a subpath")]
	CommandAfterClose(usize),
	#[error("Command range {start}..{end} is outside a subpath of {len} commands")]
	InvalidRange { start: usize, end: usize, len: usize },
}

/// A straight or cubic piece of a subpath between two anchors, with the implicit closing line made explicit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
	Line { start: DVec2, end: DVec2 },
	Cubic { start: DVec2, ctrl1: DVec2, ctrl2: DVec2, end: DVec2 },
}

impl Segment {
	pub fn start(&self) -> DVec2 {
		match *self {
			Segment::Line { start, .. } | Segment::Cubic { start, .. } => start,
		}
	}

	pub fn end(&self) -> DVec2 {
		match *self {
			Segment::Line { end, .. } | Segment::Cubic { end, .. } => end,
		}
	}
}

/// A single unbroken pen stroke: an optional `MoveTo`-led sequence of commands that may end with `ClosePath`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Command>", into = "Vec<Command>")]
pub struct Subpath {
	commands: Vec<Command>,
}

impl Subpath {
	/// Build a subpath from raw commands, checking the `MoveTo`/`ClosePath` placement invariants.
	pub fn new(commands: Vec<Command>) -> Result<Self, PathError> {
		Self::validate(&commands)?;
		Ok(Self { commands })
	}

	pub fn validate(commands: &[Command]) -> Result<(), PathError> {
		let Some(first) = commands.first() else { return Ok(()) };
		if !first.is_move_to() {
			return Err(PathError::MissingMoveTo);
		}

		for (index, command) in commands.iter().enumerate().skip(1) {
			if commands[index - 1].is_close_path() {
				return Err(PathError::CommandAfterClose(index));
			}
			if command.is_move_to() {
				return Err(PathError::MisplacedMoveTo(index));
			}
		}

		Ok(())
	}

	/// Start a new subpath with the pen at `position`.
	pub fn start(position: DVec2) -> Self {
		Self { commands: vec![Command::MoveTo(position)] }
	}

	/// Construct a polyline through the given anchors, closing it if requested.
	pub fn from_anchors(anchors: impl IntoIterator<Item = DVec2>, closed: bool) -> Self {
		let mut anchors = anchors.into_iter();
		let Some(first) = anchors.next() else { return Self::default() };

		let mut subpath = Self::start(first);
		for anchor in anchors {
			subpath.line_to(anchor);
		}
		if closed {
			subpath.close();
		}
		subpath
	}

	/// Place the pen. On a non-empty subpath this draws a line instead, since a subpath is one unbroken stroke.
	pub fn move_to(&mut self, position: DVec2) -> &mut Self {
		self.push(Command::MoveTo(position))
	}

	pub fn line_to(&mut self, position: DVec2) -> &mut Self {
		self.push(Command::LineTo(position))
	}

	pub fn cubic_to(&mut self, ctrl1: DVec2, ctrl2: DVec2, to: DVec2) -> &mut Self {
		self.push(Command::CubicBezierTo { ctrl1, ctrl2, to })
	}

	pub fn close(&mut self) -> &mut Self {
		if !self.commands.is_empty() {
			self.push(Command::ClosePath);
		}
		self
	}

	fn push(&mut self, command: Command) -> &mut Self {
		if self.is_closed() {
			log::warn!("Ignoring {command:?} appended after ClosePath");
			return self;
		}
		match (self.commands.is_empty(), command) {
			// The pen has to be somewhere before it can draw, so the first drawing command also places it
			(true, Command::LineTo(position) | Command::CubicBezierTo { to: position, .. }) => self.commands.push(Command::MoveTo(position)),
			(false, Command::MoveTo(position)) => self.commands.push(Command::LineTo(position)),
			_ => self.commands.push(command),
		}
		self
	}

	pub fn commands(&self) -> &[Command] {
		&self.commands
	}

	pub fn into_commands(self) -> Vec<Command> {
		self.commands
	}

	pub fn len(&self) -> usize {
		self.commands.len()
	}

	pub fn is_empty(&self) -> bool {
		self.commands.is_empty()
	}

	pub fn is_closed(&self) -> bool {
		self.commands.last().is_some_and(Command::is_close_path)
	}

	pub fn start_point(&self) -> Option<DVec2> {
		match self.commands.first() {
			Some(Command::MoveTo(position)) => Some(*position),
			_ => None,
		}
	}

	/// The anchor of the command at `index`, where `ClosePath` resolves to the subpath start.
	pub fn anchor_at(&self, index: usize) -> Option<DVec2> {
		match self.commands.get(index)? {
			Command::ClosePath => self.start_point(),
			command => command.end_point(),
		}
	}

	/// The pen position right before the command at `index` executes.
	pub fn pen_position_before(&self, index: usize) -> Option<DVec2> {
		if index == 0 || index > self.commands.len() {
			return None;
		}
		self.anchor_at(index - 1)
	}

	/// Anchors of every command, excluding the closing command.
	pub fn anchors(&self) -> Vec<DVec2> {
		self.commands.iter().filter_map(Command::end_point).collect()
	}

	/// True if the subpath never leaves its starting anchor.
	pub fn is_point(&self) -> bool {
		let Some(start) = self.start_point() else { return false };
		self.commands.iter().filter_map(Command::end_point).all(|anchor| anchor == start)
	}

	pub fn segments(&self) -> Vec<Segment> {
		let mut segments = Vec::with_capacity(self.commands.len());
		let Some(start_point) = self.start_point() else { return segments };
		let mut pen = start_point;

		for command in &self.commands[1..] {
			match *command {
				Command::LineTo(end) => segments.push(Segment::Line { start: pen, end }),
				Command::CubicBezierTo { ctrl1, ctrl2, to } => segments.push(Segment::Cubic { start: pen, ctrl1, ctrl2, end: to }),
				Command::ClosePath => {
					if pen != start_point {
						segments.push(Segment::Line { start: pen, end: start_point });
					}
				}
				Command::MoveTo(_) => {}
			}
			pen = command.end_point().unwrap_or(start_point);
		}

		segments
	}

	/// Bounding box of every anchor and control point. This contains the curve but may be larger than its tight bounds.
	pub fn loose_bounding_box(&self) -> Option<[DVec2; 2]> {
		let mut points = self.commands.iter().flat_map(|command| match *command {
			Command::MoveTo(position) | Command::LineTo(position) => vec![position],
			Command::CubicBezierTo { ctrl1, ctrl2, to } => vec![ctrl1, ctrl2, to],
			Command::ClosePath => Vec::new(),
		});
		let first = points.next()?;
		Some(points.fold([first, first], |[min, max], point| [min.min(point), max.max(point)]))
	}

	pub fn apply_transform(&mut self, transform: DAffine2) {
		for command in &mut self.commands {
			command.apply_transform(transform);
		}
	}

	/// Replace `range` with `replacement`, producing a subpath that must still satisfy the invariants.
	pub fn splice(&self, range: Range<usize>, replacement: impl IntoIterator<Item = Command>) -> Result<Self, PathError> {
		if range.start > range.end || range.end > self.commands.len() {
			return Err(PathError::InvalidRange {
				start: range.start,
				end: range.end,
				len: self.commands.len(),
			});
		}

		let mut commands = Vec::with_capacity(self.commands.len());
		commands.extend_from_slice(&self.commands[..range.start]);
		commands.extend(replacement);
		commands.extend_from_slice(&self.commands[range.end..]);
		Self::new(commands)
	}

	/// Append this subpath as SVG path data.
	pub fn to_svg(&self, svg: &mut String) -> std::fmt::Result {
		for command in &self.commands {
			if !svg.is_empty() {
				svg.push(' ');
			}
			match command {
				Command::MoveTo(position) => write!(svg, "M{} {}", position.x, position.y)?,
				Command::LineTo(position) => write!(svg, "L{} {}", position.x, position.y)?,
				Command::CubicBezierTo { ctrl1, ctrl2, to } => write!(svg, "C{} {} {} {} {} {}", ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y)?,
				Command::ClosePath => svg.push('Z'),
			}
		}
		Ok(())
	}

	pub fn append_to_bezpath(&self, bezpath: &mut BezPath) {
		for command in &self.commands {
			match *command {
				Command::MoveTo(position) => bezpath.move_to(dvec2_to_point(position)),
				Command::LineTo(position) => bezpath.line_to(dvec2_to_point(position)),
				Command::CubicBezierTo { ctrl1, ctrl2, to } => bezpath.curve_to(dvec2_to_point(ctrl1), dvec2_to_point(ctrl2), dvec2_to_point(to)),
				Command::ClosePath => bezpath.close_path(),
			}
		}
	}

	pub fn to_bezpath(&self) -> BezPath {
		let mut bezpath = BezPath::new();
		self.append_to_bezpath(&mut bezpath);
		bezpath
	}
}

impl TryFrom<Vec<Command>> for Subpath {
	type Error = PathError;

	fn try_from(commands: Vec<Command>) -> Result<Self, Self::Error> {
		Self::new(commands)
	}
}

impl From<Subpath> for Vec<Command> {
	fn from(subpath: Subpath) -> Self {
		subpath.commands
	}
}

/// An ordered collection of subpaths forming one shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
	pub subpaths: Vec<Subpath>,
}

impl Path {
	pub fn new(subpaths: Vec<Subpath>) -> Self {
		Self { subpaths }
	}

	pub fn from_subpath(subpath: Subpath) -> Self {
		Self { subpaths: vec![subpath] }
	}

	pub fn is_empty(&self) -> bool {
		self.subpaths.iter().all(Subpath::is_empty)
	}

	pub fn command_count(&self) -> usize {
		self.subpaths.iter().map(Subpath::len).sum()
	}

	pub fn loose_bounding_box(&self) -> Option<[DVec2; 2]> {
		self.subpaths
			.iter()
			.filter_map(Subpath::loose_bounding_box)
			.reduce(|[min_a, max_a], [min_b, max_b]| [min_a.min(min_b), max_a.max(max_b)])
	}

	pub fn apply_transform(&mut self, transform: DAffine2) {
		for subpath in &mut self.subpaths {
			subpath.apply_transform(transform);
		}
	}

	pub fn transformed(&self, transform: DAffine2) -> Self {
		let mut path = self.clone();
		path.apply_transform(transform);
		path
	}

	pub fn to_svg(&self) -> String {
		let mut svg = String::new();
		for subpath in &self.subpaths {
			// Writing into a `String` cannot fail
			let _ = subpath.to_svg(&mut svg);
		}
		svg
	}

	pub fn to_bezpath(&self) -> BezPath {
		let mut bezpath = BezPath::new();
		for subpath in &self.subpaths {
			subpath.append_to_bezpath(&mut bezpath);
		}
		bezpath
	}
}

impl FromIterator<Subpath> for Path {
	fn from_iter<T: IntoIterator<Item = Subpath>>(iter: T) -> Self {
		Self { subpaths: iter.into_iter().collect() }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn square() -> Subpath {
		Subpath::from_anchors([DVec2::new(0., 0.), DVec2::new(10., 0.), DVec2::new(10., 10.), DVec2::new(0., 10.)], true)
	}

	#[test]
	fn validation_rejects_misplaced_commands() {
		assert_eq!(Subpath::new(vec![Command::LineTo(DVec2::ONE)]), Err(PathError::MissingMoveTo));
		assert_eq!(
			Subpath::new(vec![Command::MoveTo(DVec2::ZERO), Command::MoveTo(DVec2::ONE)]),
			Err(PathError::MisplacedMoveTo(1))
		);
		assert_eq!(
			Subpath::new(vec![Command::MoveTo(DVec2::ZERO), Command::ClosePath, Command::LineTo(DVec2::ONE)]),
			Err(PathError::CommandAfterClose(2))
		);
		assert!(Subpath::new(Vec::new()).is_ok());
	}

	#[test]
	fn builder_keeps_invariants() {
		let mut subpath = Subpath::default();
		subpath.line_to(DVec2::ONE).line_to(DVec2::new(2., 1.)).close().line_to(DVec2::ZERO);

		assert_eq!(subpath.commands(), &[Command::MoveTo(DVec2::ONE), Command::LineTo(DVec2::new(2., 1.)), Command::ClosePath]);
		assert!(Subpath::validate(subpath.commands()).is_ok());
	}

	#[test]
	fn closed_subpath_segments_include_closing_line() {
		let segments = square().segments();
		assert_eq!(segments.len(), 4);
		assert_eq!(
			segments[3],
			Segment::Line {
				start: DVec2::new(0., 10.),
				end: DVec2::ZERO
			}
		);
	}

	#[test]
	fn pen_position_resolves_close_path() {
		let subpath = square();
		assert_eq!(subpath.pen_position_before(0), None);
		assert_eq!(subpath.pen_position_before(2), Some(DVec2::new(10., 0.)));
		assert_eq!(subpath.anchor_at(4), Some(DVec2::ZERO));
	}

	#[test]
	fn splice_rejects_broken_results() {
		let subpath = square();
		assert!(subpath.splice(0..1, [Command::LineTo(DVec2::ONE)]).is_err());
		assert!(subpath.splice(3..9, []).is_err());
		let spliced = subpath.splice(1..3, [Command::LineTo(DVec2::new(10., 10.))]).unwrap();
		assert_eq!(spliced.len(), 4);
	}

	#[test]
	fn svg_output() {
		let mut subpath = Subpath::start(DVec2::ZERO);
		subpath.cubic_to(DVec2::new(1., 2.), DVec2::new(3., 4.), DVec2::new(5., 6.)).close();
		assert_eq!(Path::from_subpath(subpath).to_svg(), "M0 0 C1 2 3 4 5 6 Z");
	}

	#[test]
	fn bounding_box_and_transform() {
		let mut path = Path::from_subpath(square());
		path.apply_transform(DAffine2::from_translation(DVec2::new(5., -5.)));
		assert_eq!(path.loose_bounding_box(), Some([DVec2::new(5., -5.), DVec2::new(15., 5.)]));
	}

	#[test]
	fn conversion_from_commands_validates() {
		assert_eq!(Subpath::try_from(vec![Command::LineTo(DVec2::new(1., 2.))]), Err(PathError::MissingMoveTo));
		let commands: Vec<Command> = square().into();
		assert_eq!(commands.len(), 5);
	}
}
