use super::catmull_rom_to_bezier;
use crate::consts::{GOLDEN_RATIO, SPIRAL_MAX_STEPS, SPIRAL_MIN_STEPS};
use crate::path::Subpath;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpiralType {
	#[default]
	Archimedean,
	Logarithmic,
	Fibonacci,
	Fermat,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralOptions {
	pub spiral_type: SpiralType,
	pub turns: f64,
	pub outer_radius: f64,
	pub inner_radius: f64,
	pub points_per_turn: usize,
	/// Exponent rate of the logarithmic spiral, per radian.
	pub growth_rate: f64,
	/// Clockwise as seen on a canvas whose Y axis points down.
	pub clockwise: bool,
	pub center: DVec2,
}

impl Default for SpiralOptions {
	fn default() -> Self {
		Self {
			spiral_type: SpiralType::Archimedean,
			turns: 3.,
			outer_radius: 100.,
			inner_radius: 0.,
			points_per_turn: 32,
			growth_rate: 0.2,
			clockwise: true,
			center: DVec2::ZERO,
		}
	}
}

impl SpiralOptions {
	fn step_count(&self) -> f64 {
		(self.turns * self.points_per_turn as f64).round().max(SPIRAL_MIN_STEPS as f64)
	}

	/// Also true for finite options whose sample count would exceed `SPIRAL_MAX_STEPS`.
	pub fn is_degenerate(&self) -> bool {
		let finite = [self.turns, self.outer_radius, self.inner_radius, self.growth_rate].iter().all(|value| value.is_finite()) && self.center.is_finite();
		!finite || self.turns <= 0. || self.outer_radius <= 0. || self.inner_radius < 0. || self.inner_radius > self.outer_radius || self.step_count() > SPIRAL_MAX_STEPS as f64
	}
}

/// Growth curve mapping the angle travelled to `[0, 1]` so every spiral type spans exactly the inner to outer radius.
///
/// Fermat grows with the square root of the angle, its closed form `r ∝ √θ`, rather than the linear ramp of the Archimedean spiral.
fn normalized_growth(spiral_type: SpiralType, growth_rate: f64, angle: f64, total_angle: f64) -> f64 {
	let exponential = |rate: f64| {
		let denominator = (rate * total_angle).exp_m1();
		if denominator.abs() < 1e-12 { angle / total_angle } else { (rate * angle).exp_m1() / denominator }
	};

	match spiral_type {
		SpiralType::Archimedean => angle / total_angle,
		SpiralType::Fermat => (angle / total_angle).sqrt(),
		SpiralType::Logarithmic => exponential(growth_rate),
		// Grows by the golden ratio every quarter turn
		SpiralType::Fibonacci => exponential(GOLDEN_RATIO.ln() / FRAC_PI_2),
	}
}

/// Sample the spiral at `max(4, round(turns × points_per_turn))` even angular steps, both ends included.
pub fn spiral_points(options: &SpiralOptions) -> Vec<DVec2> {
	if options.is_degenerate() {
		return Vec::new();
	}

	let steps = options.step_count() as usize;
	let total_angle = options.turns * TAU;
	let direction = if options.clockwise { 1. } else { -1. };
	let radius_span = options.outer_radius - options.inner_radius;

	(0..=steps)
		.map(|step| {
			let angle = total_angle * step as f64 / steps as f64;
			let radius = options.inner_radius + radius_span * normalized_growth(options.spiral_type, options.growth_rate, angle, total_angle);
			options.center + DVec2::from_angle(angle * direction) * radius
		})
		.collect()
}

pub fn generate_spiral(options: &SpiralOptions) -> Vec<Subpath> {
	let points = spiral_points(options);
	if points.len() < 2 {
		return Vec::new();
	}
	vec![catmull_rom_to_bezier(&points, false)]
}

#[cfg(test)]
mod tests {
	use super::*;

	fn radius_at_ends(spiral_type: SpiralType) -> (f64, f64) {
		let options = SpiralOptions {
			spiral_type,
			turns: 1.,
			inner_radius: 5.,
			outer_radius: 150.,
			center: DVec2::new(20., 30.),
			..Default::default()
		};
		let points = spiral_points(&options);
		let first = points.first().unwrap().distance(options.center);
		let last = points.last().unwrap().distance(options.center);
		(first, last)
	}

	#[test]
	fn archimedean_spans_radii() {
		let (first, last) = radius_at_ends(SpiralType::Archimedean);
		assert!((first - 5.).abs() < 1e-9);
		assert!((last - 150.).abs() < 1e-9);
	}

	#[test]
	fn every_type_spans_radii() {
		for spiral_type in [SpiralType::Archimedean, SpiralType::Logarithmic, SpiralType::Fibonacci, SpiralType::Fermat] {
			let (first, last) = radius_at_ends(spiral_type);
			assert!((first - 5.).abs() < 1e-9, "{spiral_type:?} starts at {first}");
			assert!((last - 150.).abs() < 1e-9, "{spiral_type:?} ends at {last}");
		}
	}

	#[test]
	fn step_count_has_a_minimum() {
		let options = SpiralOptions { turns: 0.01, ..Default::default() };
		assert_eq!(spiral_points(&options).len(), SPIRAL_MIN_STEPS + 1);
	}

	#[test]
	fn direction_follows_y_down_convention() {
		let quarter = |clockwise| {
			let options = SpiralOptions {
				turns: 1.,
				points_per_turn: 4,
				inner_radius: 10.,
				outer_radius: 10.,
				clockwise,
				..Default::default()
			};
			spiral_points(&options)[1]
		};
		assert!(quarter(true).y > 9.);
		assert!(quarter(false).y < -9.);
	}

	#[test]
	fn degenerate_options_generate_nothing() {
		assert!(generate_spiral(&SpiralOptions { turns: 0., ..Default::default() }).is_empty());
		assert!(generate_spiral(&SpiralOptions { outer_radius: -1., ..Default::default() }).is_empty());
		assert!(generate_spiral(&SpiralOptions { inner_radius: 200., ..Default::default() }).is_empty());
		assert_eq!(generate_spiral(&SpiralOptions::default()).len(), 1);
	}

	#[test]
	fn oversized_sampling_generates_nothing() {
		assert!(generate_spiral(&SpiralOptions { turns: 1e20, ..Default::default() }).is_empty());
		assert!(generate_spiral(&SpiralOptions { points_per_turn: usize::MAX, ..Default::default() }).is_empty());

		let at_limit = SpiralOptions { turns: 1., points_per_turn: SPIRAL_MAX_STEPS, ..Default::default() };
		assert_eq!(spiral_points(&at_limit).len(), SPIRAL_MAX_STEPS + 1);
	}

	#[test]
	fn fermat_grows_with_the_square_root_of_the_angle() {
		let options = SpiralOptions {
			spiral_type: SpiralType::Fermat,
			turns: 1.,
			points_per_turn: 4,
			outer_radius: 100.,
			..Default::default()
		};
		let points = spiral_points(&options);
		assert!((points[1].distance(options.center) - 50.).abs() < 1e-9);
	}
}
