use super::utility_types::PluginState;
use crate::misc::EditorError;

use rustc_hash::FxHashMap;
use serde_json::{Map, Value};
use std::any::Any;

struct FragmentSlot<S> {
	current: S,
	initial: S,
}

/// Owns every plugin's private state fragment, keyed by plugin namespace.
///
/// Fragments are only reachable through a typed [`StateSlice`] for a single namespace, so one plugin's handler can never observe or
/// mutate another's fragment.
#[derive(Default)]
pub struct FragmentArena {
	fragments: FxHashMap<String, Box<dyn Any>>,
}

impl FragmentArena {
	pub(crate) fn insert<S: PluginState>(&mut self, namespace: &str, initial: S) {
		let slot = FragmentSlot { current: initial.clone(), initial };
		self.fragments.insert(namespace.to_string(), Box::new(slot));
	}

	pub fn contains(&self, namespace: &str) -> bool {
		self.fragments.contains_key(namespace)
	}

	pub fn len(&self) -> usize {
		self.fragments.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fragments.is_empty()
	}

	/// Read a fragment. Returns `None` for unknown namespaces and when `S` is not the fragment's type.
	pub fn get<S: PluginState>(&self, namespace: &str) -> Option<&S> {
		let slot = self.fragments.get(namespace)?.downcast_ref::<FragmentSlot<S>>()?;
		Some(&slot.current)
	}

	pub fn slice<'a, S: PluginState>(&'a mut self, namespace: &'a str) -> StateSlice<'a, S> {
		let slot = self.fragments.get_mut(namespace).and_then(|fragment| fragment.downcast_mut::<FragmentSlot<S>>());
		StateSlice { namespace, slot }
	}
}

/// The scoped handle a plugin uses to read and update its own fragment. Stateless plugins receive an empty slice.
pub struct StateSlice<'a, S> {
	namespace: &'a str,
	slot: Option<&'a mut FragmentSlot<S>>,
}

impl<S: PluginState> StateSlice<'_, S> {
	pub fn namespace(&self) -> &str {
		self.namespace
	}

	pub fn is_stateless(&self) -> bool {
		self.slot.is_none()
	}

	pub fn get(&self) -> Option<&S> {
		self.slot.as_deref().map(|slot| &slot.current)
	}

	pub fn update<R>(&mut self, update: impl FnOnce(&mut S) -> R) -> Option<R> {
		self.slot.as_deref_mut().map(|slot| update(&mut slot.current))
	}

	/// Overwrite the top-level fields present in `partial`, leaving every other field as it is.
	pub fn merge(&mut self, partial: &Map<String, Value>) -> Result<(), EditorError> {
		let Some(slot) = self.slot.as_deref_mut() else {
			return Err(EditorError::Misc(format!("The plugin `{}` has no state to merge into", self.namespace)));
		};

		let mut merged = match serde_json::to_value(&slot.current)? {
			Value::Object(fields) => fields,
			_ => return Err(EditorError::Serialization(format!("The state of `{}` does not serialize to an object", self.namespace))),
		};
		for (key, value) in partial {
			merged.insert(key.clone(), value.clone());
		}

		slot.current = serde_json::from_value(Value::Object(merged))?;
		Ok(())
	}

	/// Restore the fragment to the value it had at registration.
	pub fn reset(&mut self) {
		if let Some(slot) = self.slot.as_deref_mut() {
			slot.current = slot.initial.clone();
		}
	}
}
