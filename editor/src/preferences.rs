use crate::consts::{COMB_DEFAULT_MAX_TOOTH_LENGTH, FREEHAND_MIN_POINT_DISTANCE, HIT_TOLERANCE_PIXELS, SELECT_PLUGIN_ID};
use crate::misc::EditorError;

use path_kernel::Color;
use serde::{Deserialize, Serialize};

/// User-level editor settings. Missing fields in a serialized form fall back to their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPreferences {
	/// Document-space distance the pointer must travel before a freehand tool records another point.
	pub freehand_min_distance: f64,
	pub comb_max_tooth_length: f64,
	/// Viewport-space slack when hit testing elements under the pointer.
	pub hit_tolerance: f64,
	/// Plugin activated once bootstrap finishes.
	pub initial_plugin: String,
	pub canvas_background: Color,
}

impl Default for EditorPreferences {
	fn default() -> Self {
		Self {
			freehand_min_distance: FREEHAND_MIN_POINT_DISTANCE,
			comb_max_tooth_length: COMB_DEFAULT_MAX_TOOTH_LENGTH,
			hit_tolerance: HIT_TOLERANCE_PIXELS,
			initial_plugin: SELECT_PLUGIN_ID.into(),
			canvas_background: Color::WHITE,
		}
	}
}

impl EditorPreferences {
	pub fn from_json(json: &str) -> Result<Self, EditorError> {
		let preferences: Self = serde_json::from_str(json)?;
		if !(preferences.freehand_min_distance >= 0. && preferences.hit_tolerance >= 0.) {
			return Err(EditorError::Misc("Distances in preferences must be non-negative".into()));
		}
		Ok(preferences)
	}

	pub fn to_json(&self) -> Result<String, EditorError> {
		Ok(serde_json::to_string_pretty(self)?)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn partial_json_keeps_defaults() {
		let preferences = EditorPreferences::from_json(r#"{ "freehand_min_distance": 5.0 }"#).unwrap();
		assert_eq!(preferences.freehand_min_distance, 5.);
		assert_eq!(preferences.initial_plugin, SELECT_PLUGIN_ID);
	}

	#[test]
	fn rejects_negative_distances() {
		assert!(EditorPreferences::from_json(r#"{ "hit_tolerance": -1.0 }"#).is_err());
		assert!(matches!(EditorPreferences::from_json("{"), Err(EditorError::Serialization(_))));
	}

	#[test]
	fn round_trips_through_json() {
		let preferences = EditorPreferences::default();
		assert_eq!(EditorPreferences::from_json(&preferences.to_json().unwrap()).unwrap(), preferences);
	}
}
