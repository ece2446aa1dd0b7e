//! Sampled curvature of cubic segments, used to drive curvature combs and detect inflections.

use crate::consts::{COMB_LENGTH_FACTOR, MAX_ABSOLUTE_DIFFERENCE};
use crate::element::{Element, ElementId};
use crate::path::{Segment, Subpath};
use crate::utils::{cubic_bez, point_to_dvec2, try_normalize};

use glam::DVec2;
use kurbo::{CubicBez, ParamCurve, ParamCurveDeriv};
use serde::{Deserialize, Serialize};

/// Parameter step used to escape a vanishing derivative at a cusp or a control point sitting on its anchor.
const DEGENERATE_DERIVATIVE_NUDGE: f64 = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurvatureSample {
	pub position: DVec2,
	pub tangent: DVec2,
	/// The tangent rotated a quarter turn. Positive curvature bends toward this side.
	pub normal: DVec2,
	pub curvature: f64,
	pub segment_index: usize,
	pub t: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtremumKind {
	Maximum,
	Minimum,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurvatureExtremum {
	pub sample_index: usize,
	pub kind: ExtremumKind,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SubpathCurvature {
	pub subpath_index: usize,
	pub samples: Vec<CurvatureSample>,
	/// Indices of samples whose curvature sign is opposite to the previous signed sample.
	pub inflections: Vec<usize>,
	pub extrema: Vec<CurvatureExtremum>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementCurvature {
	pub element: ElementId,
	pub subpaths: Vec<SubpathCurvature>,
}

fn unit_tangent(cubic: &CubicBez, t: f64) -> Option<DVec2> {
	let derivative = cubic.deriv();
	let direction = |t: f64| try_normalize(point_to_dvec2(derivative.eval(t)));

	direction(t)
		.or_else(|| {
			let nudged = if t < 0.5 { t + DEGENERATE_DERIVATIVE_NUDGE } else { t - DEGENERATE_DERIVATIVE_NUDGE };
			direction(nudged)
		})
		.or_else(|| try_normalize(point_to_dvec2(cubic.p3 - cubic.p0.to_vec2())))
}

fn sample_cubic(cubic: &CubicBez, segment_index: usize, density: usize, samples: &mut Vec<CurvatureSample>) {
	for i in 0..density {
		let t = i as f64 / (density - 1) as f64;
		let Some(tangent) = unit_tangent(cubic, t) else { continue };
		samples.push(CurvatureSample {
			position: point_to_dvec2(cubic.eval(t)),
			tangent,
			normal: tangent.perp(),
			curvature: 0.,
			segment_index,
			t,
		});
	}
}

/// Signed turning angle between two tangents per unit of distance travelled between their positions.
fn discrete_curvature(a: &CurvatureSample, b: &CurvatureSample) -> f64 {
	let distance = a.position.distance(b.position);
	if distance < MAX_ABSOLUTE_DIFFERENCE {
		return 0.;
	}
	let turning_angle = a.tangent.perp_dot(b.tangent).atan2(a.tangent.dot(b.tangent));
	turning_angle / distance
}

/// Curvature of each sample from its neighbours within the same segment.
fn assign_curvature(samples: &mut [CurvatureSample]) {
	let curvatures: Vec<f64> = (0..samples.len())
		.map(|index| {
			let same_segment = |other: usize| samples.get(other).filter(|sample| sample.segment_index == samples[index].segment_index);
			let previous = index.checked_sub(1).and_then(same_segment);
			let next = same_segment(index + 1);

			match (previous, next) {
				(Some(previous), Some(next)) => discrete_curvature(previous, next),
				(Some(previous), None) => discrete_curvature(previous, &samples[index]),
				(None, Some(next)) => discrete_curvature(&samples[index], next),
				(None, None) => 0.,
			}
		})
		.collect();

	for (sample, curvature) in samples.iter_mut().zip(curvatures) {
		sample.curvature = curvature;
	}
}

fn find_inflections(samples: &[CurvatureSample]) -> Vec<usize> {
	let mut inflections = Vec::new();
	let mut previous_sign = 0.;

	for (index, sample) in samples.iter().enumerate() {
		if sample.curvature == 0. {
			continue;
		}
		let sign = sample.curvature.signum();
		if previous_sign != 0. && sign != previous_sign {
			inflections.push(index);
		}
		previous_sign = sign;
	}

	inflections
}

fn find_extrema(samples: &[CurvatureSample]) -> Vec<CurvatureExtremum> {
	samples
		.windows(3)
		.enumerate()
		.filter_map(|(index, window)| {
			let [previous, current, next] = [window[0], window[1], window[2]].map(|sample| sample.curvature.abs());
			let kind = if current > previous && current >= next {
				ExtremumKind::Maximum
			} else if current < previous && current <= next {
				ExtremumKind::Minimum
			} else {
				return None;
			};
			Some(CurvatureExtremum { sample_index: index + 1, kind })
		})
		.collect()
}

/// Sample every cubic segment of the subpath at `density` evenly spaced parameters. Straight segments carry no curvature and are skipped.
pub fn analyze_subpath(subpath: &Subpath, density: usize) -> SubpathCurvature {
	let density = density.max(2);
	let mut samples = Vec::new();

	for (segment_index, segment) in subpath.segments().into_iter().enumerate() {
		if let Segment::Cubic { start, ctrl1, ctrl2, end } = segment {
			sample_cubic(&cubic_bez(start, ctrl1, ctrl2, end), segment_index, density, &mut samples);
		}
	}

	assign_curvature(&mut samples);
	SubpathCurvature {
		subpath_index: 0,
		inflections: find_inflections(&samples),
		extrema: find_extrema(&samples),
		samples,
	}
}

/// One entry per element containing at least one cubic segment.
pub fn analyze_curvature(elements: &[Element], density: usize) -> Vec<ElementCurvature> {
	elements
		.iter()
		.filter_map(|element| {
			let subpaths: Vec<_> = element
				.path
				.subpaths
				.iter()
				.enumerate()
				.map(|(subpath_index, subpath)| SubpathCurvature {
					subpath_index,
					..analyze_subpath(subpath, density)
				})
				.filter(|analysis| !analysis.samples.is_empty())
				.collect();

			(!subpaths.is_empty()).then_some(ElementCurvature { element: element.id, subpaths })
		})
		.collect()
}

/// The comb tooth for a sample as a `(base, tip)` line in document space.
pub fn comb_tooth(sample: &CurvatureSample, scale: f64, max_tooth_length: f64) -> (DVec2, DVec2) {
	let max_tooth_length = max_tooth_length.abs();
	let length = (sample.curvature * scale * COMB_LENGTH_FACTOR).clamp(-max_tooth_length, max_tooth_length);
	(sample.position, sample.position + sample.normal * length)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn cubic_subpath(start: DVec2, ctrl1: DVec2, ctrl2: DVec2, end: DVec2) -> Subpath {
		let mut subpath = Subpath::start(start);
		subpath.cubic_to(ctrl1, ctrl2, end);
		subpath
	}

	#[test]
	fn quarter_circle_matches_radius() {
		let radius = 100.;
		let handle = radius * 0.5523;
		let subpath = cubic_subpath(DVec2::new(radius, 0.), DVec2::new(radius, handle), DVec2::new(handle, radius), DVec2::new(0., radius));

		let analysis = analyze_subpath(&subpath, 16);
		assert_eq!(analysis.samples.len(), 16);
		for sample in &analysis.samples {
			assert!((sample.curvature.abs() - 1. / radius).abs() < 0.1 / radius, "curvature {} at t={}", sample.curvature, sample.t);
		}
		assert!(analysis.inflections.is_empty());
	}

	#[test]
	fn s_curve_has_one_inflection() {
		let subpath = cubic_subpath(DVec2::ZERO, DVec2::new(50., -50.), DVec2::new(50., 50.), DVec2::new(100., 0.));
		let analysis = analyze_subpath(&subpath, 10);
		assert_eq!(analysis.inflections.len(), 1);
	}

	#[test]
	fn density_is_clamped() {
		let subpath = cubic_subpath(DVec2::ZERO, DVec2::new(0., 50.), DVec2::new(50., 50.), DVec2::new(50., 0.));
		assert_eq!(analyze_subpath(&subpath, 0).samples.len(), 2);
	}

	#[test]
	fn lines_have_no_samples() {
		let subpath = Subpath::from_anchors([DVec2::ZERO, DVec2::new(10., 0.), DVec2::new(10., 10.)], false);
		assert!(analyze_subpath(&subpath, 8).samples.is_empty());
	}

	#[test]
	fn comb_tooth_is_clamped() {
		let sample = CurvatureSample {
			position: DVec2::ZERO,
			tangent: DVec2::X,
			normal: DVec2::Y,
			curvature: 1.,
			segment_index: 0,
			t: 0.,
		};
		assert_eq!(comb_tooth(&sample, 1., 80.), (DVec2::ZERO, DVec2::new(0., 80.)));
		assert_eq!(comb_tooth(&CurvatureSample { curvature: -0.125, ..sample }, 0.001, 200.).1.y.round(), -125.);
	}
}
