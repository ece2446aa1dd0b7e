use crate::color::Color;
use crate::path::Path;

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// How overlapping subpaths decide what counts as the inside of a shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FillRule {
	#[default]
	NonZero,
	EvenOdd,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
	#[default]
	Path,
	Group,
	/// A path produced by vectorizing text.
	TextPath,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Style {
	pub fill: Option<Color>,
	pub stroke: Option<Color>,
	pub stroke_weight: f64,
	pub fill_rule: FillRule,
}

impl Default for Style {
	fn default() -> Self {
		Self {
			fill: None,
			stroke: Some(Color::BLACK),
			stroke_weight: 1.,
			fill_rule: FillRule::NonZero,
		}
	}
}

impl Style {
	pub fn stroked(color: Color, weight: f64) -> Self {
		Self {
			stroke: Some(color),
			stroke_weight: weight,
			..Default::default()
		}
	}
}

/// A document element. `parent` is a non-owning reference by id; the document's element collection owns every element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Element {
	pub id: ElementId,
	pub kind: ElementKind,
	pub path: Path,
	pub style: Style,
	pub parent: Option<ElementId>,
}

impl Element {
	pub fn new(id: ElementId, path: Path, style: Style) -> Self {
		Self {
			id,
			kind: ElementKind::Path,
			path,
			style,
			parent: None,
		}
	}
}
