use crate::document::Document;
use crate::document::viewport::Viewport;
use crate::preferences::EditorPreferences;

use path_kernel::ElementId;

use bitflags::bitflags;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerEventKind {
	Down,
	Move,
	Up,
	/// The pointer was lost mid-gesture. Tools treat it like `Up` so no session is left open.
	Cancel,
}

impl PointerEventKind {
	pub fn subscription(self) -> PointerEvents {
		match self {
			PointerEventKind::Down => PointerEvents::DOWN,
			PointerEventKind::Move => PointerEvents::MOVE,
			PointerEventKind::Up => PointerEvents::UP,
			PointerEventKind::Cancel => PointerEvents::CANCEL,
		}
	}

	pub fn ends_gesture(self) -> bool {
		matches!(self, PointerEventKind::Up | PointerEventKind::Cancel)
	}
}

bitflags! {
	/// The pointer event kinds a plugin wants delivered to its handler.
	#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
	pub struct PointerEvents: u8 {
		const DOWN = 1 << 0;
		const MOVE = 1 << 1;
		const UP = 1 << 2;
		const CANCEL = 1 << 3;
		const GESTURE = Self::DOWN.bits() | Self::MOVE.bits() | Self::UP.bits() | Self::CANCEL.bits();
	}
}

/// Raw pointer input as it arrives from the canvas, in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
	pub kind: PointerEventKind,
	pub position: DVec2,
	pub pointer_id: u32,
}

impl PointerEvent {
	pub fn new(kind: PointerEventKind, position: DVec2) -> Self {
		Self { kind, position, pointer_id: 0 }
	}

	pub fn down(x: f64, y: f64) -> Self {
		Self::new(PointerEventKind::Down, DVec2::new(x, y))
	}

	pub fn moved(x: f64, y: f64) -> Self {
		Self::new(PointerEventKind::Move, DVec2::new(x, y))
	}

	pub fn up(x: f64, y: f64) -> Self {
		Self::new(PointerEventKind::Up, DVec2::new(x, y))
	}

	pub fn cancel(x: f64, y: f64) -> Self {
		Self::new(PointerEventKind::Cancel, DVec2::new(x, y))
	}
}

/// A pointer event after the dispatcher has resolved it against the document.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToolEvent {
	pub kind: PointerEventKind,
	/// Document-space position.
	pub point: DVec2,
	pub viewport_position: DVec2,
	/// The topmost element under the pointer.
	pub target: Option<ElementId>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
	#[default]
	Idle,
	Drawing,
}

/// Follow-up work a handler asks the dispatcher to perform once the handler returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToolResponse {
	ActivatePlugin(String),
	SelectionChanged(Vec<ElementId>),
}

/// Everything outside its own state that a plugin's handler may touch.
pub struct ToolContext<'a> {
	pub document: &'a mut Document,
	pub viewport: &'a Viewport,
	pub preferences: &'a EditorPreferences,
	pub responses: &'a mut VecDeque<ToolResponse>,
}
