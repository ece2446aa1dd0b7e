use crate::document::Document;
use crate::document::viewport::Viewport;
use crate::misc::EditorError;
use crate::plugin::registry::PluginRegistry;
use crate::plugin::store::FragmentArena;
use crate::plugin::utility_types::{AnyPlugin, BehaviorFlags};
use crate::preferences::EditorPreferences;
use crate::tool::pointer::{PointerEvent, PointerEventKind, SessionPhase, ToolContext, ToolEvent, ToolResponse};

use std::collections::VecDeque;

/// Routes pointer input to the single active plugin and carries out the follow-up work its handler queues.
#[derive(Default)]
pub struct Dispatcher {
	pub registry: PluginRegistry,
	pub fragments: FragmentArena,
	active_plugin: Option<&'static str>,
}

impl Dispatcher {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_plugins(plugins: impl IntoIterator<Item = Box<dyn AnyPlugin>>) -> Result<Self, EditorError> {
		let mut dispatcher = Self::new();
		dispatcher.registry.register_all(plugins, &mut dispatcher.fragments)?;
		Ok(dispatcher)
	}

	pub fn active_plugin(&self) -> Option<&'static str> {
		self.active_plugin
	}

	fn active(&self) -> Option<&dyn AnyPlugin> {
		self.active_plugin.and_then(|id| self.registry.get(id))
	}

	/// Make `id` the exclusive receiver of pointer input. The previously active plugin's fragment is left as it is.
	pub fn activate(&mut self, id: &str) -> Result<(), EditorError> {
		let Some(plugin) = self.registry.get(id) else {
			let error = EditorError::UnknownPlugin(id.to_string());
			log::error!("{error}");
			return Err(error);
		};

		let id = plugin.id();
		if self.active_plugin != Some(id) {
			log::debug!("Activating plugin `{id}`");
			self.active_plugin = Some(id);
		}
		Ok(())
	}

	/// Read from the live fragment of the active plugin on every call.
	pub fn behavior_flags(&self) -> BehaviorFlags {
		self.active().map(|plugin| plugin.behavior_flags(&self.fragments)).unwrap_or_default()
	}

	pub fn session_phase(&self) -> SessionPhase {
		self.active().map(|plugin| plugin.session_phase(&self.fragments)).unwrap_or_default()
	}

	pub fn dispatch(&mut self, event: PointerEvent, document: &mut Document, viewport: &Viewport, preferences: &EditorPreferences) {
		let point = viewport.to_document(event.position);
		let target = document.hit_test(point, preferences.hit_tolerance / viewport.zoom);

		if event.kind == PointerEventKind::Down && !self.behavior_flags().contains(BehaviorFlags::PREVENTS_SELECTION) {
			match target {
				Some(id) if document.is_selected(id) => {}
				Some(id) => document.set_selection([id]),
				None => document.clear_selection(),
			}
		}

		let Some(plugin) = self.active_plugin.and_then(|id| self.registry.get(id)) else {
			log::trace!("No active plugin to receive {:?}", event.kind);
			return;
		};
		if !plugin.subscribed_events().contains(event.kind.subscription()) {
			return;
		}

		let tool_event = ToolEvent {
			kind: event.kind,
			point,
			viewport_position: event.position,
			target,
		};
		let mut responses = VecDeque::new();
		let mut context = ToolContext {
			document,
			viewport,
			preferences,
			responses: &mut responses,
		};
		plugin.handle_event(&tool_event, &mut self.fragments, &mut context);

		self.process_responses(responses, document);
	}

	fn process_responses(&mut self, mut responses: VecDeque<ToolResponse>, document: &mut Document) {
		while let Some(response) = responses.pop_front() {
			match response {
				ToolResponse::ActivatePlugin(id) => {
					// Already logged, and a bad hand-off keeps the current tool active
					let _ = self.activate(&id);
				}
				ToolResponse::SelectionChanged(selection) => document.set_selection(selection),
			}
		}
	}
}
