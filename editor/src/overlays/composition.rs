use super::utility_types::{OverlayContext, OverlayPrimitive};
use crate::consts::{COLOR_OVERLAY_BLUE, COLOR_OVERLAY_GRAY};
use crate::document::Document;
use crate::document::viewport::{Viewport, ViewportBounds};
use crate::plugin::registry::PluginRegistry;
use crate::plugin::store::FragmentArena;
use crate::plugin::utility_types::BehaviorFlags;
use crate::preferences::EditorPreferences;

use path_kernel::Color;

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Where a plugin layer sits relative to the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerPlacement {
	/// Below the document, in document space.
	Background,
	/// Above the document and selection, in document space.
	Foreground,
	/// Above everything, in screen space.
	Global,
}

pub type LayerRenderer<S> = fn(&LayerContext<'_>, &S, &mut OverlayContext);

/// A drawing surface a plugin contributes to every frame.
pub struct CanvasLayer<S> {
	pub name: &'static str,
	pub placement: LayerPlacement,
	/// Lower orders draw first within a placement.
	pub order: i32,
	pub render: LayerRenderer<S>,
}

impl<S> CanvasLayer<S> {
	pub fn new(name: &'static str, placement: LayerPlacement, render: LayerRenderer<S>) -> Self {
		Self { name, placement, order: 0, render }
	}

	pub fn with_order(mut self, order: i32) -> Self {
		self.order = order;
		self
	}

	pub fn descriptor(&self) -> LayerDescriptor {
		LayerDescriptor {
			name: self.name,
			placement: self.placement,
			order: self.order,
		}
	}
}

/// The state-independent description of a [`CanvasLayer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerDescriptor {
	pub name: &'static str,
	pub placement: LayerPlacement,
	pub order: i32,
}

/// Read-only view of the editor handed to layer renderers.
#[derive(Clone, Copy)]
pub struct LayerContext<'a> {
	pub viewport: &'a Viewport,
	pub canvas_size: DVec2,
	pub bounds: ViewportBounds,
	pub document: &'a Document,
	pub preferences: &'a EditorPreferences,
	pub active_plugin: Option<&'a str>,
}

impl LayerContext<'_> {
	pub fn is_active(&self, plugin_id: &str) -> bool {
		self.active_plugin == Some(plugin_id)
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderPass {
	Layer {
		plugin: &'static str,
		name: &'static str,
		placement: LayerPlacement,
	},
	Document,
	Selection,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PassOutput {
	pub pass: RenderPass,
	pub primitives: Vec<OverlayPrimitive>,
}

/// Everything drawn for one canvas refresh, in paint order.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
	pub canvas_size: DVec2,
	pub background: Color,
	pub view_box: ViewportBounds,
	pub passes: Vec<PassOutput>,
}

impl Frame {
	pub fn pass(&self, pass: &RenderPass) -> Option<&PassOutput> {
		self.passes.iter().find(|output| &output.pass == pass)
	}

	/// The primitives drawn by a plugin's layer with the given name.
	pub fn layer_primitives(&self, plugin_id: &str, layer_name: &str) -> Option<&[OverlayPrimitive]> {
		self.passes
			.iter()
			.find(|output| matches!(output.pass, RenderPass::Layer { plugin, name, .. } if plugin == plugin_id && name == layer_name))
			.map(|output| output.primitives.as_slice())
	}
}

pub struct FrameInputs<'a> {
	pub registry: &'a PluginRegistry,
	pub fragments: &'a FragmentArena,
	pub document: &'a Document,
	pub viewport: &'a Viewport,
	pub preferences: &'a EditorPreferences,
	pub active_plugin: Option<&'a str>,
	pub canvas_size: DVec2,
}

/// Compose one frame: background layers, the document, the selection, foreground layers and finally global layers.
pub fn compose_frame(inputs: FrameInputs<'_>) -> Frame {
	let FrameInputs {
		registry,
		fragments,
		document,
		viewport,
		preferences,
		active_plugin,
		canvas_size,
	} = inputs;

	let context = LayerContext {
		viewport,
		canvas_size,
		bounds: viewport.bounds(canvas_size),
		document,
		preferences,
		active_plugin,
	};
	let document_to_viewport = viewport.document_to_viewport();

	// Every layer of every plugin, in registration order
	let layers: Vec<_> = registry
		.iter()
		.flat_map(|plugin| plugin.layer_descriptors().into_iter().enumerate().map(move |(index, descriptor)| (plugin, index, descriptor)))
		.collect();

	let render_placement = |placement: LayerPlacement, passes: &mut Vec<PassOutput>| {
		let mut placed: Vec<_> = layers.iter().filter(|(_, _, descriptor)| descriptor.placement == placement).collect();
		// Stable, so equal orders keep registration order
		placed.sort_by_key(|(_, _, descriptor)| descriptor.order);

		for (plugin, index, descriptor) in placed {
			let mut overlay = match placement {
				LayerPlacement::Global => OverlayContext::screen_space(),
				LayerPlacement::Background | LayerPlacement::Foreground => OverlayContext::new(document_to_viewport),
			};
			plugin.render_layer(*index, &context, fragments, &mut overlay);
			passes.push(PassOutput {
				pass: RenderPass::Layer {
					plugin: plugin.id(),
					name: descriptor.name,
					placement,
				},
				primitives: overlay.into_primitives(),
			});
		}
	};

	let mut passes = Vec::new();
	render_placement(LayerPlacement::Background, &mut passes);

	let mut overlay = OverlayContext::new(document_to_viewport);
	for element in document.elements() {
		let stroke = element.style.stroke.map(|color| color.to_hex());
		let fill = element.style.fill.map(|color| color.to_hex());
		overlay.styled_path(&element.path, stroke.as_deref(), fill.as_deref(), element.style.stroke_weight * viewport.zoom);
	}
	passes.push(PassOutput {
		pass: RenderPass::Document,
		primitives: overlay.into_primitives(),
	});

	let flags = active_plugin
		.and_then(|id| registry.get(id))
		.map(|plugin| plugin.behavior_flags(fragments))
		.unwrap_or_default();
	let mut overlay = OverlayContext::new(document_to_viewport);
	if !flags.contains(BehaviorFlags::HIDE_SELECTION_OVERLAY) {
		for element in document.selected_elements() {
			overlay.outline(&element.path, Some(COLOR_OVERLAY_BLUE));
		}
	}
	if !flags.contains(BehaviorFlags::HIDE_SELECTION_BBOX)
		&& let Some([min, max]) = document.selection_bounding_box()
	{
		overlay.quad(min, max, Some(COLOR_OVERLAY_GRAY));
	}
	passes.push(PassOutput {
		pass: RenderPass::Selection,
		primitives: overlay.into_primitives(),
	});

	render_placement(LayerPlacement::Foreground, &mut passes);
	render_placement(LayerPlacement::Global, &mut passes);

	Frame {
		canvas_size,
		background: preferences.canvas_background,
		view_box: context.bounds,
		passes,
	}
}
