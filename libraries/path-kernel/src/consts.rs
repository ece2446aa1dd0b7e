// Implementation constants:
/// Squared length below which a vector is considered to have no usable direction.
pub const MIN_DIRECTION_LENGTH_SQUARED: f64 = 1e-18;
/// Max absolute difference used for comparing points in tests and degenerate checks.
pub const MAX_ABSOLUTE_DIFFERENCE: f64 = 1e-6;

// Curvature comb:
/// Converts curvature (1 / radius) times the user comb scale into a tooth length in document units.
pub const COMB_LENGTH_FACTOR: f64 = 1000.;
/// Tooth length clamp applied when no explicit maximum is given.
pub const COMB_MAX_TOOTH_LENGTH: f64 = 80.;
pub const CURVATURE_DENSITY_DEFAULT: usize = 16;

// Simplification:
/// Curves are flattened at this fraction of the simplification tolerance before decimation.
pub const FLATTEN_TOLERANCE_FRACTION: f64 = 0.25;

// Generators:
/// Catmull-Rom tension divisor used when converting sampled points to cubic segments.
pub const CATMULL_ROM_TENSION: f64 = 6.;
pub const SPIRAL_MIN_STEPS: usize = 4;
/// Options needing more angular samples than this are treated as degenerate.
pub const SPIRAL_MAX_STEPS: usize = 100_000;
/// Grids with more cells than this are treated as degenerate.
pub const ISOMETRIC_MAX_CELLS: usize = 250_000;
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

// Contrast (WCAG 2.x thresholds):
pub const WCAG_AA: f64 = 4.5;
pub const WCAG_AAA: f64 = 7.;
pub const WCAG_AA_LARGE: f64 = 3.;
pub const WCAG_AAA_LARGE: f64 = 4.5;
/// Background luminance at which black and white text reach the same contrast ratio.
pub const LUMINANCE_CROSSOVER: f64 = 0.179;
pub const CONTRAST_SEARCH_STEPS: usize = 100;
/// Per-step decrease of the channel scale when darkening against a light background, reaching zero at the last step.
pub const CONTRAST_DARKEN_STEP: f64 = 0.01;
/// Per-step growth of the channel scale when lightening against a dark background, compounded each step.
pub const CONTRAST_LIGHTEN_STEP: f64 = 0.05;
