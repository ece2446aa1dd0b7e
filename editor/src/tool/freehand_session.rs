use super::pointer::{PointerEventKind, SessionPhase, ToolContext, ToolEvent, ToolResponse};
use crate::misc::EditorError;

use path_kernel::{ElementId, Path, Style};

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// The recorded points of an in-progress freehand gesture, kept in a plugin's own state fragment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FreehandSession {
	pub points: Vec<DVec2>,
	pub is_drawing: bool,
}

impl FreehandSession {
	pub fn phase(&self) -> SessionPhase {
		if self.is_drawing { SessionPhase::Drawing } else { SessionPhase::Idle }
	}

	pub fn last_point(&self) -> Option<DVec2> {
		self.points.last().copied()
	}

	fn reset(&mut self) {
		self.points.clear();
		self.is_drawing = false;
	}

	/// Advance the session by one pointer event.
	///
	/// Ending a gesture with at least two recorded points hands them to `synthesize` and appends the resulting element to the
	/// document, selecting it. Whether or not that succeeds, the session returns to idle. Returns the committed element.
	pub fn transition(
		&mut self,
		event: &ToolEvent,
		min_distance: f64,
		context: &mut ToolContext,
		synthesize: impl FnOnce(&[DVec2]) -> Result<(Path, Style), EditorError>,
	) -> Option<ElementId> {
		match (self.is_drawing, event.kind) {
			(_, PointerEventKind::Down) => {
				self.points.clear();
				self.points.push(event.point);
				self.is_drawing = true;
				None
			}
			(true, PointerEventKind::Move) => {
				let far_enough = self.last_point().is_none_or(|last| last.distance_squared(event.point) > min_distance * min_distance);
				if far_enough {
					self.points.push(event.point);
				}
				None
			}
			(true, PointerEventKind::Up | PointerEventKind::Cancel) => {
				let committed = if self.points.len() >= 2 {
					match synthesize(&self.points) {
						Ok((path, style)) => {
							let id = context.document.add_element(path, style);
							context.responses.push_back(ToolResponse::SelectionChanged(vec![id]));
							Some(id)
						}
						Err(error) => {
							log::warn!("Discarding the freehand gesture: {error}");
							None
						}
					}
				} else {
					None
				};
				self.reset();
				committed
			}
			(false, _) => None,
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::document::Document;
	use crate::document::viewport::Viewport;
	use crate::preferences::EditorPreferences;

	use path_kernel::Subpath;
	use std::collections::VecDeque;

	fn event(kind: PointerEventKind, x: f64, y: f64) -> ToolEvent {
		let point = DVec2::new(x, y);
		ToolEvent {
			kind,
			point,
			viewport_position: point,
			target: None,
		}
	}

	fn polyline(points: &[DVec2]) -> Result<(Path, Style), EditorError> {
		Ok((Path::from_subpath(Subpath::from_anchors(points.iter().copied(), false)), Style::default()))
	}

	fn run(session: &mut FreehandSession, document: &mut Document, events: &[ToolEvent]) -> (Option<ElementId>, VecDeque<ToolResponse>) {
		let (viewport, preferences) = (Viewport::default(), EditorPreferences::default());
		let mut responses = VecDeque::new();
		let mut context = ToolContext {
			document,
			viewport: &viewport,
			preferences: &preferences,
			responses: &mut responses,
		};

		let mut committed = None;
		for event in events {
			committed = committed.or(session.transition(event, 2., &mut context, polyline));
		}
		(committed, responses)
	}

	#[test]
	fn short_moves_are_filtered() {
		let mut session = FreehandSession::default();
		let mut document = Document::new();
		run(
			&mut session,
			&mut document,
			&[event(PointerEventKind::Down, 0., 0.), event(PointerEventKind::Move, 1., 1.), event(PointerEventKind::Move, 3., 0.)],
		);

		assert!(session.is_drawing);
		assert_eq!(session.points, vec![DVec2::ZERO, DVec2::new(3., 0.)]);
	}

	#[test]
	fn gesture_commits_and_selects() {
		let mut session = FreehandSession::default();
		let mut document = Document::new();
		let (committed, responses) = run(
			&mut session,
			&mut document,
			&[event(PointerEventKind::Down, 0., 0.), event(PointerEventKind::Move, 10., 0.), event(PointerEventKind::Up, 10., 0.)],
		);

		let id = committed.unwrap();
		assert_eq!(document.elements().len(), 1);
		assert_eq!(responses, VecDeque::from([ToolResponse::SelectionChanged(vec![id])]));
		assert_eq!(session, FreehandSession::default());
	}

	#[test]
	fn cancellation_resets_the_session() {
		let mut session = FreehandSession::default();
		let mut document = Document::new();
		run(&mut session, &mut document, &[event(PointerEventKind::Down, 0., 0.), event(PointerEventKind::Cancel, 0., 0.)]);

		assert!(!session.is_drawing);
		assert!(session.points.is_empty());
		assert_eq!(session.phase(), SessionPhase::Idle);
		assert!(document.elements().is_empty());
	}

	#[test]
	fn synthesis_failure_still_resets() {
		let mut session = FreehandSession::default();
		let mut document = Document::new();
		let viewport = Viewport::default();
		let preferences = EditorPreferences::default();
		let mut responses = VecDeque::new();
		let mut context = ToolContext {
			document: &mut document,
			viewport: &viewport,
			preferences: &preferences,
			responses: &mut responses,
		};

		session.transition(&event(PointerEventKind::Down, 0., 0.), 2., &mut context, polyline);
		session.transition(&event(PointerEventKind::Move, 20., 0.), 2., &mut context, polyline);
		let committed = session.transition(&event(PointerEventKind::Up, 20., 0.), 2., &mut context, |_| Err(EditorError::Synthesis("bad stroke".into())));

		assert_eq!(committed, None);
		assert!(!session.is_drawing);
		assert!(responses.is_empty());
	}
}
