//! Path-kernel: the canonical vector path representation and the pure geometry algorithms editor tools build on
pub mod consts;
pub mod contrast;
pub mod curvature;
pub mod generators;
pub mod simplify;
pub mod tangent;
pub mod utils;
pub mod winding;

mod color;
mod element;
mod path;

pub use color::Color;
pub use contrast::{WcagEvaluation, contrast_ratio, contrast_ratio_colors, evaluate_wcag, suggest_better_contrast};
pub use curvature::{CurvatureSample, ElementCurvature, SubpathCurvature, analyze_curvature, comb_tooth};
pub use element::{Element, ElementId, ElementKind, FillRule, Style};
pub use path::{Command, Path, PathError, Segment, Subpath};
pub use simplify::{simplify_commands, simplify_path, simplify_range, simplify_subpath};
pub use tangent::{VertexTangent, analyze_tangents, subpath_tangents, tangent_at};
pub use winding::{WindingDirection, WindingReport, analyze_winding, signed_area, winding_direction};
