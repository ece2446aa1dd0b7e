use super::persistence::StateKey;
use super::store::{FragmentArena, StateSlice};
use crate::misc::EditorError;
use crate::overlays::composition::{CanvasLayer, LayerContext, LayerDescriptor};
use crate::overlays::utility_types::OverlayContext;
use crate::tool::pointer::{PointerEvents, SessionPhase, ToolContext, ToolEvent};

use bitflags::bitflags;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

bitflags! {
	/// Capabilities the active plugin claims over editor-wide behavior. Queried from the live plugin state every time they are needed.
	#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
	pub struct BehaviorFlags: u8 {
		/// Pointer downs no longer select the element under the pointer.
		const PREVENTS_SELECTION = 1 << 0;
		const HIDE_SELECTION_OVERLAY = 1 << 1;
		const HIDE_SELECTION_BBOX = 1 << 2;
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PluginMetadata {
	pub name: &'static str,
	pub tooltip: &'static str,
	pub icon: &'static str,
}

/// Requirements on the type of a plugin's private state fragment.
pub trait PluginState: Clone + Default + Serialize + DeserializeOwned + 'static {}
impl<T> PluginState for T where T: Clone + Default + Serialize + DeserializeOwned + 'static {}

/// A tool plugin: an independently authored unit of editor behavior with its own private state.
///
/// Plugins never see each other. A plugin reads and writes only its own fragment through the [`StateSlice`] it is handed, and
/// coordinates with the rest of the editor through the shared document and [`ToolResponse`](crate::tool::pointer::ToolResponse)s.
pub trait Plugin: 'static {
	/// The plugin's state fragment. Pure-behavioral plugins use `()` and return `None` from [`Plugin::initial_state`].
	type State: PluginState;

	/// The unique namespace this plugin registers under.
	fn id(&self) -> &'static str;

	fn metadata(&self) -> PluginMetadata;

	fn initial_state(&self) -> Option<Self::State> {
		Some(Self::State::default())
	}

	fn subscribed_events(&self) -> PointerEvents {
		PointerEvents::empty()
	}

	fn handle_event(&self, _event: &ToolEvent, _state: &mut StateSlice<'_, Self::State>, _context: &mut ToolContext) {}

	fn behavior_flags(&self, _state: &Self::State) -> BehaviorFlags {
		BehaviorFlags::empty()
	}

	fn session_phase(&self, _state: &Self::State) -> SessionPhase {
		SessionPhase::Idle
	}

	fn canvas_layers(&self) -> Vec<CanvasLayer<Self::State>> {
		Vec::new()
	}

	fn persisted_keys(&self) -> Vec<StateKey> {
		Vec::new()
	}

	/// The part of the state contributed to snapshots. By default these are the top-level fields named by [`Plugin::persisted_keys`].
	fn persist_partialize(&self, state: &Self::State) -> Result<Map<String, Value>, EditorError> {
		let Value::Object(mut fields) = serde_json::to_value(state)? else {
			return Err(EditorError::Serialization(format!("The state of `{}` does not serialize to an object", Plugin::id(self))));
		};
		let keys = Plugin::persisted_keys(self);
		fields.retain(|field, _| keys.iter().any(|key| key.name == field.as_str()));
		Ok(fields)
	}
}

/// The object-safe face of a [`Plugin`], implemented for every plugin so the registry can hold heterogeneous plugins side by side.
pub trait AnyPlugin {
	fn id(&self) -> &'static str;
	fn metadata(&self) -> PluginMetadata;
	fn subscribed_events(&self) -> PointerEvents;
	fn persisted_keys(&self) -> Vec<StateKey>;
	fn is_stateful(&self) -> bool;

	/// Check the definition for problems that would make it unusable once registered.
	fn validate(&self) -> Result<(), EditorError>;
	/// Place the plugin's initial fragment in the arena.
	fn install(&self, fragments: &mut FragmentArena);

	fn handle_event(&self, event: &ToolEvent, fragments: &mut FragmentArena, context: &mut ToolContext);
	fn behavior_flags(&self, fragments: &FragmentArena) -> BehaviorFlags;
	fn session_phase(&self, fragments: &FragmentArena) -> SessionPhase;

	fn layer_descriptors(&self) -> Vec<LayerDescriptor>;
	fn render_layer(&self, layer_index: usize, context: &LayerContext, fragments: &FragmentArena, overlay: &mut OverlayContext);

	/// The plugin's partial state, or `None` for stateless plugins.
	fn partialize(&self, fragments: &FragmentArena) -> Option<Result<Map<String, Value>, EditorError>>;
	fn restore(&self, partial: &Map<String, Value>, fragments: &mut FragmentArena) -> Result<(), EditorError>;
	fn reset(&self, fragments: &mut FragmentArena);
}

fn with_state<S: PluginState, R>(fragments: &FragmentArena, namespace: &str, f: impl FnOnce(&S) -> R) -> R {
	match fragments.get::<S>(namespace) {
		Some(state) => f(state),
		None => f(&S::default()),
	}
}

impl<P: Plugin> AnyPlugin for P {
	fn id(&self) -> &'static str {
		Plugin::id(self)
	}

	fn metadata(&self) -> PluginMetadata {
		Plugin::metadata(self)
	}

	fn subscribed_events(&self) -> PointerEvents {
		Plugin::subscribed_events(self)
	}

	fn persisted_keys(&self) -> Vec<StateKey> {
		Plugin::persisted_keys(self)
	}

	fn is_stateful(&self) -> bool {
		self.initial_state().is_some()
	}

	fn validate(&self) -> Result<(), EditorError> {
		let id = Plugin::id(self);
		let malformed = |reason: String| EditorError::MalformedPlugin { id: id.to_string(), reason };

		if id.trim().is_empty() {
			return Err(malformed("The namespace is empty".into()));
		}

		let keys = Plugin::persisted_keys(self);
		let Some(initial) = self.initial_state() else {
			if keys.is_empty() {
				return Ok(());
			}
			return Err(malformed("Persisted keys are declared but the plugin has no state".into()));
		};
		if keys.is_empty() {
			return Ok(());
		}

		let Value::Object(fields) = serde_json::to_value(&initial).map_err(|error| malformed(error.to_string()))? else {
			return Err(malformed("Persisted keys are declared but the state does not serialize to an object".into()));
		};
		if let Some(missing) = keys.iter().find(|key| !fields.contains_key(key.name)) {
			return Err(malformed(format!("The persisted key `{}` is not a field of the state", missing.name)));
		}

		Ok(())
	}

	fn install(&self, fragments: &mut FragmentArena) {
		if let Some(initial) = self.initial_state() {
			fragments.insert(Plugin::id(self), initial);
		}
	}

	fn handle_event(&self, event: &ToolEvent, fragments: &mut FragmentArena, context: &mut ToolContext) {
		let mut slice = fragments.slice::<P::State>(Plugin::id(self));
		Plugin::handle_event(self, event, &mut slice, context);
	}

	fn behavior_flags(&self, fragments: &FragmentArena) -> BehaviorFlags {
		with_state(fragments, Plugin::id(self), |state| Plugin::behavior_flags(self, state))
	}

	fn session_phase(&self, fragments: &FragmentArena) -> SessionPhase {
		with_state(fragments, Plugin::id(self), |state| Plugin::session_phase(self, state))
	}

	fn layer_descriptors(&self) -> Vec<LayerDescriptor> {
		self.canvas_layers().iter().map(CanvasLayer::descriptor).collect()
	}

	fn render_layer(&self, layer_index: usize, context: &LayerContext, fragments: &FragmentArena, overlay: &mut OverlayContext) {
		let Some(layer) = self.canvas_layers().into_iter().nth(layer_index) else {
			log::warn!("The plugin `{}` has no canvas layer {layer_index}", Plugin::id(self));
			return;
		};
		with_state(fragments, Plugin::id(self), |state| (layer.render)(context, state, overlay));
	}

	fn partialize(&self, fragments: &FragmentArena) -> Option<Result<Map<String, Value>, EditorError>> {
		let state = fragments.get::<P::State>(Plugin::id(self))?;
		Some(self.persist_partialize(state))
	}

	fn restore(&self, partial: &Map<String, Value>, fragments: &mut FragmentArena) -> Result<(), EditorError> {
		fragments.slice::<P::State>(Plugin::id(self)).merge(partial)
	}

	fn reset(&self, fragments: &mut FragmentArena) {
		fragments.slice::<P::State>(Plugin::id(self)).reset();
	}
}
