// PLUGINS
/// The neutral tool the editor starts with and one-shot generator tools hand control back to.
pub const SELECT_PLUGIN_ID: &str = "select";

// FREEHAND
/// Minimum document-space distance between consecutive recorded freehand points.
pub const FREEHAND_MIN_POINT_DISTANCE: f64 = 2.;
pub const FREEHAND_DEFAULT_STROKE_WEIGHT: f64 = 2.;

// HIT TESTING
/// Distance in viewport pixels within which a pointer still hits an element's bounds.
pub const HIT_TOLERANCE_PIXELS: f64 = 4.;

// VIEWPORT
pub const VIEWPORT_ZOOM_SCALE_MIN: f64 = 0.000_000_1;
pub const VIEWPORT_ZOOM_SCALE_MAX: f64 = 10_000.;

// SIMPLIFY
pub const SIMPLIFY_DEFAULT_TOLERANCE: f64 = 2.;

// CURVATURE COMB
pub const COMB_DEFAULT_DENSITY: usize = 24;
pub const COMB_DEFAULT_SCALE: f64 = 1.;
pub const COMB_DEFAULT_MAX_TOOTH_LENGTH: f64 = 80.;

// TANGENT INSPECTOR
/// Length in viewport pixels of the drawn tangent indicators.
pub const TANGENT_INDICATOR_LENGTH: f64 = 40.;

// CONTRAST
pub const CONTRAST_DEFAULT_BACKGROUND: &str = "#ffffff";
/// WCAG AA for body text.
pub const CONTRAST_DEFAULT_TARGET: f64 = 4.5;

// OVERLAYS
pub const MANIPULATOR_GROUP_MARKER_SIZE: f64 = 6.;
pub const WINDING_ARROW_LENGTH: f64 = 12.;
/// Screen-space inset of the global summary text from the canvas corner.
pub const GLOBAL_LABEL_INSET: f64 = 12.;
pub const GLOBAL_LABEL_LINE_HEIGHT: f64 = 16.;

pub const COLOR_OVERLAY_BLUE: &str = "#00a8ff";
pub const COLOR_OVERLAY_YELLOW: &str = "#ffc848";
pub const COLOR_OVERLAY_GREEN: &str = "#63ce63";
pub const COLOR_OVERLAY_RED: &str = "#ef5454";
pub const COLOR_OVERLAY_GRAY: &str = "#cccccc";
pub const COLOR_OVERLAY_WHITE: &str = "#ffffff";
pub const COLOR_OVERLAY_BLACK: &str = "#000000";
