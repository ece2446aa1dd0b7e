use crate::dispatcher::Dispatcher;
use crate::document::Document;
use crate::document::viewport::Viewport;
use crate::misc::EditorError;
use crate::overlays::composition::{Frame, FrameInputs, compose_frame};
use crate::plugin::persistence::{self, Snapshot};
use crate::plugin::utility_types::{AnyPlugin, BehaviorFlags, PluginState};
use crate::preferences::EditorPreferences;
use crate::tool::pointer::{PointerEvent, SessionPhase};
use crate::tool::tool_messages::builtin_plugins;

use glam::DVec2;
use serde_json::{Map, Value};

/// The editor: one document, one viewport and the registered tool plugins sharing them.
pub struct Editor {
	pub dispatcher: Dispatcher,
	document: Document,
	viewport: Viewport,
	preferences: EditorPreferences,
}

impl Editor {
	/// Construct the editor with the built-in plugins and default preferences.
	pub fn new() -> Result<Self, EditorError> {
		Self::with_preferences(EditorPreferences::default())
	}

	pub fn with_preferences(preferences: EditorPreferences) -> Result<Self, EditorError> {
		Self::with_plugins(builtin_plugins(), preferences)
	}

	/// Bootstrap the editor from an explicit plugin list. Registration errors abort construction.
	pub fn with_plugins(plugins: impl IntoIterator<Item = Box<dyn AnyPlugin>>, preferences: EditorPreferences) -> Result<Self, EditorError> {
		let mut dispatcher = Dispatcher::with_plugins(plugins)?;

		if dispatcher.registry.contains(&preferences.initial_plugin) {
			dispatcher.activate(&preferences.initial_plugin)?;
		} else {
			log::warn!("The initial plugin `{}` is not registered, starting with no active plugin", preferences.initial_plugin);
		}

		Ok(Self {
			dispatcher,
			document: Document::new(),
			viewport: Viewport::default(),
			preferences,
		})
	}

	pub fn handle_pointer(&mut self, event: PointerEvent) {
		self.dispatcher.dispatch(event, &mut self.document, &self.viewport, &self.preferences);
	}

	pub fn activate_plugin(&mut self, id: &str) -> Result<(), EditorError> {
		self.dispatcher.activate(id)
	}

	pub fn active_plugin(&self) -> Option<&'static str> {
		self.dispatcher.active_plugin()
	}

	pub fn behavior_flags(&self) -> BehaviorFlags {
		self.dispatcher.behavior_flags()
	}

	pub fn session_phase(&self) -> SessionPhase {
		self.dispatcher.session_phase()
	}

	pub fn set_viewport(&mut self, viewport: Viewport) {
		self.viewport = Viewport::new(viewport.pan, viewport.zoom);
	}

	pub fn viewport(&self) -> &Viewport {
		&self.viewport
	}

	pub fn document(&self) -> &Document {
		&self.document
	}

	pub fn document_mut(&mut self) -> &mut Document {
		&mut self.document
	}

	pub fn preferences(&self) -> &EditorPreferences {
		&self.preferences
	}

	pub fn render(&self, canvas_size: DVec2) -> Frame {
		compose_frame(FrameInputs {
			registry: &self.dispatcher.registry,
			fragments: &self.dispatcher.fragments,
			document: &self.document,
			viewport: &self.viewport,
			preferences: &self.preferences,
			active_plugin: self.dispatcher.active_plugin(),
			canvas_size,
		})
	}

	pub fn persisted_snapshot(&self) -> Snapshot {
		persistence::persisted_snapshot(&self.dispatcher.registry, &self.dispatcher.fragments)
	}

	pub fn temporal_snapshot(&self) -> Snapshot {
		persistence::temporal_snapshot(&self.dispatcher.registry, &self.dispatcher.fragments)
	}

	pub fn restore_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), EditorError> {
		persistence::restore_snapshot(&self.dispatcher.registry, &mut self.dispatcher.fragments, snapshot)
	}

	/// Read a plugin's fragment, as a panel would.
	pub fn plugin_state<S: PluginState>(&self, plugin_id: &str) -> Option<&S> {
		self.dispatcher.fragments.get::<S>(plugin_id)
	}

	/// Apply a panel edit to a plugin's fragment. Returns `None` if the plugin has no fragment of type `S`.
	pub fn update_plugin_state<S: PluginState, R>(&mut self, plugin_id: &str, update: impl FnOnce(&mut S) -> R) -> Option<R> {
		self.dispatcher.fragments.slice::<S>(plugin_id).update(update)
	}

	/// Shallow-merge a partial JSON object into a plugin's fragment.
	pub fn merge_plugin_state(&mut self, plugin_id: &str, partial: &Map<String, Value>) -> Result<(), EditorError> {
		let Some(plugin) = self.dispatcher.registry.get(plugin_id) else {
			return Err(EditorError::UnknownPlugin(plugin_id.to_string()));
		};
		plugin.restore(partial, &mut self.dispatcher.fragments)
	}
}
