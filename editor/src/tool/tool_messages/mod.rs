pub mod contrast_auditor;
pub mod curvature_comb;
pub mod freehand_tool;
pub mod isometric_grid_tool;
pub mod select_tool;
pub mod simplify_tool;
pub mod spiral_tool;
pub mod tangent_inspector;
pub mod winding_auditor;

use crate::plugin::utility_types::AnyPlugin;

/// The plugins registered at bootstrap, in registration order.
pub fn builtin_plugins() -> Vec<Box<dyn AnyPlugin>> {
	vec![
		Box::new(select_tool::SelectTool),
		Box::new(freehand_tool::FreehandTool),
		Box::new(spiral_tool::SpiralTool),
		Box::new(isometric_grid_tool::IsometricGridTool),
		Box::new(simplify_tool::SimplifyTool),
		Box::new(winding_auditor::WindingAuditor),
		Box::new(curvature_comb::CurvatureComb),
		Box::new(tangent_inspector::TangentInspector),
		Box::new(contrast_auditor::ContrastAuditor),
	]
}

pub mod tool_prelude {
	pub use crate::consts::*;
	pub use crate::overlays::composition::{CanvasLayer, LayerContext, LayerPlacement};
	pub use crate::overlays::utility_types::OverlayContext;
	pub use crate::plugin::persistence::StateKey;
	pub use crate::plugin::store::StateSlice;
	pub use crate::plugin::utility_types::{BehaviorFlags, Plugin, PluginMetadata};
	pub use crate::tool::pointer::{PointerEventKind, PointerEvents, SessionPhase, ToolContext, ToolEvent, ToolResponse};

	pub use glam::DVec2;
	pub use serde::{Deserialize, Serialize};
}
