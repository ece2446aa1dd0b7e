use path_kernel::PathError;

use thiserror::Error;

/// The error type used by the Vellum editor.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EditorError {
	#[error("A plugin is already registered under the namespace `{0}`")]
	DuplicateNamespace(String),

	#[error("The plugin `{id}` is malformed:\n{reason}")]
	MalformedPlugin { id: String, reason: String },

	#[error("The requested plugin `{0}` does not exist")]
	UnknownPlugin(String),

	#[error("Failed to synthesize a path:\n{0}")]
	Synthesis(String),

	#[error("Plugin state could not be (de)serialized:\n{0}")]
	Serialization(String),

	#[error("{0}")]
	Misc(String),
}

macro_rules! derive_from {
	($type:ty, $kind:ident) => {
		impl From<$type> for EditorError {
			fn from(error: $type) -> Self {
				EditorError::$kind(error.to_string())
			}
		}
	};
}

derive_from!(&str, Misc);
derive_from!(String, Misc);
derive_from!(PathError, Synthesis);
derive_from!(serde_json::Error, Serialization);
