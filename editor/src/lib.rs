//! The Vellum editor core: a shared document and viewport, and the tool plugins composed on top of them.

pub mod application;
pub mod consts;
pub mod dispatcher;
pub mod document;
pub mod misc;
pub mod overlays;
pub mod plugin;
pub mod preferences;
pub mod tool;

#[cfg(test)]
pub mod test_utils;

#[doc(inline)]
pub use application::Editor;
#[doc(inline)]
pub use misc::EditorError;
