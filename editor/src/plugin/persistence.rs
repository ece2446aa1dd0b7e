use super::registry::PluginRegistry;
use super::store::FragmentArena;
use crate::misc::EditorError;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Which snapshot a state key belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyPersistence {
	/// Part of the undoable history.
	Temporal,
	/// Saved across sessions.
	Persistent,
	Both,
}

impl KeyPersistence {
	pub fn is_temporal(self) -> bool {
		matches!(self, KeyPersistence::Temporal | KeyPersistence::Both)
	}

	pub fn is_persistent(self) -> bool {
		matches!(self, KeyPersistence::Persistent | KeyPersistence::Both)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StateKey {
	pub name: &'static str,
	pub persistence: KeyPersistence,
}

impl StateKey {
	pub const fn temporal(name: &'static str) -> Self {
		Self { name, persistence: KeyPersistence::Temporal }
	}

	pub const fn persistent(name: &'static str) -> Self {
		Self { name, persistence: KeyPersistence::Persistent }
	}

	pub const fn both(name: &'static str) -> Self {
		Self { name, persistence: KeyPersistence::Both }
	}
}

/// Partial plugin states keyed by plugin namespace.
pub type Snapshot = BTreeMap<String, Map<String, Value>>;

fn snapshot(registry: &PluginRegistry, fragments: &FragmentArena, include: impl Fn(KeyPersistence) -> bool) -> Snapshot {
	let mut snapshot = Snapshot::new();

	for plugin in registry.iter() {
		let keys = plugin.persisted_keys();
		if !keys.iter().any(|key| include(key.persistence)) {
			continue;
		}

		let partial = match plugin.partialize(fragments) {
			Some(Ok(partial)) => partial,
			Some(Err(error)) => {
				log::error!("Skipping the state of `{}` in the snapshot: {error}", plugin.id());
				continue;
			}
			None => continue,
		};

		let fields: Map<String, Value> = partial
			.into_iter()
			.filter(|(field, _)| keys.iter().any(|key| key.name == field.as_str() && include(key.persistence)))
			.collect();
		if !fields.is_empty() {
			snapshot.insert(plugin.id().to_string(), fields);
		}
	}

	snapshot
}

/// Union of every plugin's partial state over the keys saved across sessions.
pub fn persisted_snapshot(registry: &PluginRegistry, fragments: &FragmentArena) -> Snapshot {
	snapshot(registry, fragments, KeyPersistence::is_persistent)
}

/// Union of every plugin's partial state over the keys tracked by undo history.
pub fn temporal_snapshot(registry: &PluginRegistry, fragments: &FragmentArena) -> Snapshot {
	snapshot(registry, fragments, KeyPersistence::is_temporal)
}

/// Merge each partial state back into its plugin's fragment. Entries for unknown plugins are skipped with a warning.
pub fn restore_snapshot(registry: &PluginRegistry, fragments: &mut FragmentArena, snapshot: &Snapshot) -> Result<(), EditorError> {
	for (namespace, partial) in snapshot {
		let Some(plugin) = registry.get(namespace) else {
			log::warn!("Ignoring snapshot state for the unregistered plugin `{namespace}`");
			continue;
		};
		plugin.restore(partial, fragments)?;
	}
	Ok(())
}
