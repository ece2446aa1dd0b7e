use crate::application::Editor;
use crate::tool::pointer::PointerEvent;

use glam::DVec2;

/// A set of utility functions to make the writing of editor tests more declarative
pub struct EditorTestUtils {
	pub editor: Editor,
}

impl EditorTestUtils {
	pub fn create() -> Self {
		let _ = env_logger::builder().is_test(true).try_init();

		let editor = Editor::new().expect("The built-in plugins should register");

		Self { editor }
	}

	pub fn select_tool(&mut self, plugin_id: &str) {
		self.editor.activate_plugin(plugin_id).expect("The tool should be registered");
	}

	/// Press at the first position, move through the rest and release at the last one. Positions are in viewport space.
	pub fn drag(&mut self, positions: &[DVec2]) {
		let (Some(&first), Some(&last)) = (positions.first(), positions.last()) else { return };

		self.editor.handle_pointer(PointerEvent::down(first.x, first.y));
		for &position in &positions[1..] {
			self.editor.handle_pointer(PointerEvent::moved(position.x, position.y));
		}
		self.editor.handle_pointer(PointerEvent::up(last.x, last.y));
	}

	pub fn click(&mut self, position: DVec2) {
		self.drag(&[position]);
	}
}
