//! WCAG 2.x contrast ratios between sRGB colors, and a search for a foreground color meeting a target ratio.

use crate::color::Color;
use crate::consts::*;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WcagEvaluation {
	pub ratio: f64,
	pub pass_aa: bool,
	pub pass_aaa: bool,
	pub pass_aa_large: bool,
	pub pass_aaa_large: bool,
}

/// Ratio in `[1, 21]`, independent of argument order.
pub fn contrast_ratio_colors(a: Color, b: Color) -> f64 {
	let (luminance_a, luminance_b) = (a.relative_luminance(), b.relative_luminance());
	let (lighter, darker) = if luminance_a >= luminance_b { (luminance_a, luminance_b) } else { (luminance_b, luminance_a) };
	(lighter + 0.05) / (darker + 0.05)
}

/// Contrast ratio between two hex colors, or `None` if either fails to parse.
pub fn contrast_ratio(foreground: &str, background: &str) -> Option<f64> {
	Some(contrast_ratio_colors(Color::from_hex(foreground)?, Color::from_hex(background)?))
}

pub fn evaluate_wcag(ratio: f64) -> WcagEvaluation {
	WcagEvaluation {
		ratio,
		pass_aa: ratio >= WCAG_AA,
		pass_aaa: ratio >= WCAG_AAA,
		pass_aa_large: ratio >= WCAG_AA_LARGE,
		pass_aaa_large: ratio >= WCAG_AAA_LARGE,
	}
}

/// Find a foreground color reaching `target` contrast against `background`.
///
/// A passing foreground is returned as given. Otherwise its channels are scaled for a bounded number of steps: down by a linear ramp
/// against a light background, up by a compounding factor against a dark one, finally falling back to pure black or white. Only reaching the threshold is
/// guaranteed; the result is not the closest passing color.
pub fn suggest_better_contrast(foreground: &str, background: &str, target: f64) -> Option<String> {
	let foreground_color = Color::from_hex(foreground)?;
	let background_color = Color::from_hex(background)?;
	let passes = |color: Color| contrast_ratio_colors(color, background_color) >= target;

	if passes(foreground_color) {
		return Some(foreground.to_string());
	}

	let light_background = background_color.relative_luminance() > LUMINANCE_CROSSOVER;
	let step_color = |step: usize| {
		// Darkening ramps the channel scale linearly down to zero, lightening compounds a small growth factor
		let factor = if light_background {
			(1. - CONTRAST_DARKEN_STEP * step as f64).max(0.)
		} else {
			(1. + CONTRAST_LIGHTEN_STEP).powi(step as i32)
		};
		let adjusted = foreground_color.map_rgb(|channel| channel * factor);
		// Candidates are judged after rounding to the 8-bit channels they will be reported in
		let [red, green, blue] = adjusted.to_rgb8();
		Color::from_rgb8(red, green, blue)
	};

	if let Some(color) = (1..=CONTRAST_SEARCH_STEPS).map(step_color).find(|&color| passes(color)) {
		return Some(color.to_hex());
	}

	let fallback = if light_background { Color::BLACK } else { Color::WHITE };
	log::debug!("No adjusted foreground for {foreground} on {background} reaches {target}, falling back to {fallback}");
	Some(fallback.to_hex())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn black_on_white_is_maximal() {
		for (foreground, background) in [("#000000", "#ffffff"), ("#fff", "#000")] {
			let ratio = contrast_ratio(foreground, background).unwrap();
			assert!((ratio - 21.).abs() < 1e-9, "{ratio}");
		}
	}

	#[test]
	fn identical_colors_have_no_contrast() {
		assert_eq!(contrast_ratio("#777777", "#777777"), Some(1.));
	}

	#[test]
	fn unparsable_colors() {
		assert_eq!(contrast_ratio("#zzzzzz", "#ffffff"), None);
		assert_eq!(suggest_better_contrast("#000000", "white", 4.5), None);
	}

	#[test]
	fn wcag_levels() {
		let evaluation = evaluate_wcag(21.);
		assert!(evaluation.pass_aa && evaluation.pass_aaa && evaluation.pass_aa_large && evaluation.pass_aaa_large);

		let evaluation = evaluate_wcag(4.5);
		assert!(evaluation.pass_aa && !evaluation.pass_aaa && evaluation.pass_aa_large && evaluation.pass_aaa_large);

		let evaluation = evaluate_wcag(3.);
		assert!(!evaluation.pass_aa && evaluation.pass_aa_large && !evaluation.pass_aaa_large);
	}

	#[test]
	fn passing_foreground_is_kept() {
		assert_eq!(suggest_better_contrast("#123456", "#ffffff", 4.5).as_deref(), Some("#123456"));
	}

	#[test]
	fn suggestions_reach_target() {
		for (foreground, background) in [("#999999", "#ffffff"), ("#444444", "#222222"), ("#ff8800", "#ffee00"), ("#000000", "#000000")] {
			let suggestion = suggest_better_contrast(foreground, background, WCAG_AA).unwrap();
			let ratio = contrast_ratio(&suggestion, background).unwrap();
			assert!(ratio >= WCAG_AA, "{suggestion} on {background} only reaches {ratio}");
		}
	}

	#[test]
	fn darkening_steps_linearly() {
		// 0x99 scaled by 0.78 is still 119, which falls short; 0.77 gives 118
		assert_eq!(suggest_better_contrast("#999999", "#ffffff", WCAG_AA).as_deref(), Some("#767676"));
	}

	#[test]
	fn lightening_compounds() {
		// 0x44 grows by 1.05 per step: 135 after 14 steps falls short, 141 after 15 passes
		assert_eq!(suggest_better_contrast("#444444", "#222222", WCAG_AA).as_deref(), Some("#8d8d8d"));
	}

	#[test]
	fn black_cannot_be_lightened() {
		assert_eq!(suggest_better_contrast("#000000", "#111111", WCAG_AA).as_deref(), Some("#ffffff"));
	}
}
