use super::store::FragmentArena;
use super::utility_types::AnyPlugin;
use crate::misc::EditorError;

use rustc_hash::FxHashMap;

/// Every plugin known to the editor, in registration order. Plugins are registered once at bootstrap and never removed.
#[derive(Default)]
pub struct PluginRegistry {
	plugins: Vec<Box<dyn AnyPlugin>>,
	index: FxHashMap<&'static str, usize>,
}

impl PluginRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Validate a plugin, reserve its namespace and install its initial state fragment.
	pub fn register(&mut self, plugin: Box<dyn AnyPlugin>, fragments: &mut FragmentArena) -> Result<(), EditorError> {
		let id = plugin.id();
		if self.index.contains_key(id) {
			let error = EditorError::DuplicateNamespace(id.to_string());
			log::error!("{error}");
			return Err(error);
		}
		if let Err(error) = plugin.validate() {
			log::error!("{error}");
			return Err(error);
		}

		plugin.install(fragments);
		self.index.insert(id, self.plugins.len());
		self.plugins.push(plugin);
		log::debug!("Registered plugin `{id}`");

		Ok(())
	}

	/// Register plugins in order, stopping at the first one that is rejected.
	pub fn register_all(&mut self, plugins: impl IntoIterator<Item = Box<dyn AnyPlugin>>, fragments: &mut FragmentArena) -> Result<(), EditorError> {
		plugins.into_iter().try_for_each(|plugin| self.register(plugin, fragments))
	}

	pub fn get(&self, id: &str) -> Option<&dyn AnyPlugin> {
		self.index.get(id).map(|&index| self.plugins[index].as_ref())
	}

	/// Position of the plugin in registration order.
	pub fn position(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	pub fn contains(&self, id: &str) -> bool {
		self.index.contains_key(id)
	}

	pub fn iter(&self) -> impl Iterator<Item = &dyn AnyPlugin> {
		self.plugins.iter().map(|plugin| plugin.as_ref())
	}

	pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.plugins.iter().map(|plugin| plugin.id())
	}

	pub fn len(&self) -> usize {
		self.plugins.len()
	}

	pub fn is_empty(&self) -> bool {
		self.plugins.is_empty()
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::plugin::persistence::StateKey;
	use crate::plugin::utility_types::{Plugin, PluginMetadata};

	use serde::{Deserialize, Serialize};

	#[derive(Clone, Debug, Default, Serialize, Deserialize)]
	struct NoteState {
		text: String,
	}

	struct Note {
		id: &'static str,
		keys: Vec<StateKey>,
	}

	impl Plugin for Note {
		type State = NoteState;

		fn id(&self) -> &'static str {
			self.id
		}

		fn metadata(&self) -> PluginMetadata {
			PluginMetadata { name: "Note", tooltip: "", icon: "" }
		}

		fn persisted_keys(&self) -> Vec<StateKey> {
			self.keys.clone()
		}
	}

	struct Marker;

	impl Plugin for Marker {
		type State = ();

		fn id(&self) -> &'static str {
			"marker"
		}

		fn metadata(&self) -> PluginMetadata {
			PluginMetadata { name: "Marker", tooltip: "", icon: "" }
		}

		fn initial_state(&self) -> Option<()> {
			None
		}

		fn persisted_keys(&self) -> Vec<StateKey> {
			vec![StateKey::persistent("anything")]
		}
	}

	fn note(id: &'static str, keys: Vec<StateKey>) -> Box<dyn AnyPlugin> {
		Box::new(Note { id, keys })
	}

	#[test]
	fn duplicate_namespace_is_rejected() {
		let mut registry = PluginRegistry::new();
		let mut fragments = FragmentArena::default();

		registry.register(note("note", Vec::new()), &mut fragments).unwrap();
		let result = registry.register(note("note", Vec::new()), &mut fragments);

		assert_eq!(result, Err(EditorError::DuplicateNamespace("note".into())));
		assert_eq!(registry.len(), 1);
	}

	#[test]
	fn malformed_definitions_are_rejected() {
		let mut registry = PluginRegistry::new();
		let mut fragments = FragmentArena::default();

		assert!(matches!(registry.register(note(" ", Vec::new()), &mut fragments), Err(EditorError::MalformedPlugin { .. })));
		assert!(matches!(
			registry.register(note("note", vec![StateKey::persistent("missing")]), &mut fragments),
			Err(EditorError::MalformedPlugin { .. })
		));
		assert!(matches!(registry.register(Box::new(Marker), &mut fragments), Err(EditorError::MalformedPlugin { .. })));
		assert!(registry.is_empty());
		assert!(fragments.is_empty());
	}

	#[test]
	fn registration_installs_state() {
		let mut registry = PluginRegistry::new();
		let mut fragments = FragmentArena::default();

		registry
			.register_all([note("first", vec![StateKey::both("text")]), note("second", Vec::new())], &mut fragments)
			.unwrap();

		assert_eq!(registry.ids().collect::<Vec<_>>(), ["first", "second"]);
		assert_eq!(registry.position("second"), Some(1));
		assert!(fragments.contains("first") && fragments.contains("second"));
	}

	#[test]
	fn bootstrap_stops_at_first_error() {
		let mut registry = PluginRegistry::new();
		let mut fragments = FragmentArena::default();

		let result = registry.register_all([note("a", Vec::new()), note("a", Vec::new()), note("b", Vec::new())], &mut fragments);
		assert!(result.is_err());
		assert!(!registry.contains("b"));
	}
}
