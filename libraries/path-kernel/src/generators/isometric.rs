use crate::consts::ISOMETRIC_MAX_CELLS;
use crate::path::Subpath;

use glam::DVec2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridStyle {
	/// Projected grid lines, one open subpath per line.
	#[default]
	Grid,
	/// Three closed faces per cell: top, left and right.
	Cubes,
	/// Pointy-top hexagons in offset rows.
	HexGrid,
	/// Alternating upward and downward equilateral triangles.
	TriangleGrid,
	/// One projected rhombus per cell.
	Diamond,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsometricGridOptions {
	pub style: GridStyle,
	pub cols: usize,
	pub rows: usize,
	pub cell_size: f64,
	/// Projection angle of the grid axes from the horizontal, in degrees.
	pub angle: f64,
	pub cube_height: f64,
	pub offset: DVec2,
	/// Leave every other cube out in a checkerboard pattern.
	pub alternate_shading: bool,
}

impl Default for IsometricGridOptions {
	fn default() -> Self {
		Self {
			style: GridStyle::Grid,
			cols: 8,
			rows: 8,
			cell_size: 40.,
			angle: 30.,
			cube_height: 40.,
			offset: DVec2::ZERO,
			alternate_shading: false,
		}
	}
}

impl IsometricGridOptions {
	/// Position of a grid intersection, where `col` and `row` may be fractional.
	pub fn project(&self, col: f64, row: f64) -> DVec2 {
		let (sin, cos) = self.angle.to_radians().sin_cos();
		self.offset + DVec2::new((col - row) * self.cell_size * cos, (col + row) * self.cell_size * sin)
	}

	/// Corners of the rhombus covering a cell, clockwise from the top.
	fn cell_rhombus(&self, col: usize, row: usize) -> [DVec2; 4] {
		let (col, row) = (col as f64, row as f64);
		[self.project(col, row), self.project(col + 1., row), self.project(col + 1., row + 1.), self.project(col, row + 1.)]
	}

	fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
		let cols = self.cols;
		(0..self.rows).flat_map(move |row| (0..cols).map(move |col| (col, row)))
	}

	/// Also true when the cell count would exceed `ISOMETRIC_MAX_CELLS`.
	pub fn is_degenerate(&self) -> bool {
		let too_many_cells = self.cols.checked_mul(self.rows).is_none_or(|cells| cells > ISOMETRIC_MAX_CELLS);
		self.cols == 0 || self.rows == 0 || too_many_cells || !(self.cell_size > 0. && self.cell_size.is_finite()) || !self.angle.is_finite() || !self.cube_height.is_finite() || !self.offset.is_finite()
	}
}

fn grid_lines(options: &IsometricGridOptions) -> Vec<Subpath> {
	let (cols, rows) = (options.cols as f64, options.rows as f64);
	let col_lines = (0..=options.cols).map(|col| [options.project(col as f64, 0.), options.project(col as f64, rows)]);
	let row_lines = (0..=options.rows).map(|row| [options.project(0., row as f64), options.project(cols, row as f64)]);
	col_lines.chain(row_lines).map(|line| Subpath::from_anchors(line, false)).collect()
}

fn cubes(options: &IsometricGridOptions) -> Vec<Subpath> {
	let height = DVec2::new(0., options.cube_height);
	options
		.cells()
		.filter(|(col, row)| !options.alternate_shading || (col + row) % 2 == 0)
		.flat_map(|(col, row)| {
			let [top, right, bottom, left] = options.cell_rhombus(col, row);
			[
				[top, right, bottom, left],
				[left, bottom, bottom + height, left + height],
				[bottom, right, right + height, bottom + height],
			]
		})
		.map(|face| Subpath::from_anchors(face, true))
		.collect()
}

fn hexagons(options: &IsometricGridOptions) -> Vec<Subpath> {
	let radius = options.cell_size / 2.;
	let width = 3_f64.sqrt() * radius;
	options
		.cells()
		.map(|(col, row)| {
			let row_shift = if row % 2 == 1 { width / 2. } else { 0. };
			let center = options.offset + DVec2::new(col as f64 * width + row_shift + width / 2., row as f64 * radius * 1.5 + radius);
			let corners = (0..6).map(|corner| center + DVec2::from_angle((60. * corner as f64 - 90.).to_radians()) * radius);
			Subpath::from_anchors(corners, true)
		})
		.collect()
}

fn triangles(options: &IsometricGridOptions) -> Vec<Subpath> {
	let side = options.cell_size;
	let height = side * 3_f64.sqrt() / 2.;
	options
		.cells()
		.map(|(col, row)| {
			let origin = options.offset + DVec2::new(col as f64 * side / 2., row as f64 * height);
			let corners = if (col + row) % 2 == 0 {
				[origin + DVec2::new(0., height), origin + DVec2::new(side / 2., 0.), origin + DVec2::new(side, height)]
			} else {
				[origin, origin + DVec2::new(side, 0.), origin + DVec2::new(side / 2., height)]
			};
			Subpath::from_anchors(corners, true)
		})
		.collect()
}

fn diamonds(options: &IsometricGridOptions) -> Vec<Subpath> {
	options.cells().map(|(col, row)| Subpath::from_anchors(options.cell_rhombus(col, row), true)).collect()
}

pub fn generate_isometric_grid(options: &IsometricGridOptions) -> Vec<Subpath> {
	if options.is_degenerate() {
		return Vec::new();
	}

	match options.style {
		GridStyle::Grid => grid_lines(options),
		GridStyle::Cubes => cubes(options),
		GridStyle::HexGrid => hexagons(options),
		GridStyle::TriangleGrid => triangles(options),
		GridStyle::Diamond => diamonds(options),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::consts::MAX_ABSOLUTE_DIFFERENCE;
	use crate::utils::dvec2_compare;

	fn options(style: GridStyle) -> IsometricGridOptions {
		IsometricGridOptions {
			style,
			cols: 3,
			rows: 2,
			..Default::default()
		}
	}

	#[test]
	fn projection_uses_degrees() {
		let options = IsometricGridOptions {
			cell_size: 10.,
			angle: 30.,
			offset: DVec2::new(100., 50.),
			..Default::default()
		};
		let projected = options.project(2., 1.);
		let expected = DVec2::new(100. + 10. * 30_f64.to_radians().cos(), 50. + 30. * 0.5);
		assert!(dvec2_compare(projected, expected, MAX_ABSOLUTE_DIFFERENCE), "{projected}");
	}

	#[test]
	fn grid_emits_line_pairs() {
		let lines = generate_isometric_grid(&options(GridStyle::Grid));
		assert_eq!(lines.len(), 4 + 3);
		assert!(lines.iter().all(|line| line.len() == 2 && !line.is_closed()));
	}

	#[test]
	fn cubes_have_three_faces() {
		assert_eq!(generate_isometric_grid(&options(GridStyle::Cubes)).len(), 3 * 6);

		let shaded = IsometricGridOptions {
			alternate_shading: true,
			..options(GridStyle::Cubes)
		};
		assert_eq!(generate_isometric_grid(&shaded).len(), 3 * 3);
	}

	#[test]
	fn polygon_styles_are_closed_cells() {
		for (style, corners) in [(GridStyle::HexGrid, 6), (GridStyle::TriangleGrid, 3), (GridStyle::Diamond, 4)] {
			let cells = generate_isometric_grid(&options(style));
			assert_eq!(cells.len(), 6, "{style:?}");
			assert!(cells.iter().all(|cell| cell.is_closed() && cell.anchors().len() == corners), "{style:?}");
		}
	}

	#[test]
	fn diamond_matches_projection() {
		let options = options(GridStyle::Diamond);
		let cells = generate_isometric_grid(&options);
		assert_eq!(cells[0].anchors()[2], options.project(1., 1.));
	}

	#[test]
	fn degenerate_options_generate_nothing() {
		assert!(generate_isometric_grid(&IsometricGridOptions { cols: 0, ..Default::default() }).is_empty());
		assert!(generate_isometric_grid(&IsometricGridOptions { cell_size: 0., ..Default::default() }).is_empty());
		assert!(generate_isometric_grid(&IsometricGridOptions { angle: f64::NAN, ..Default::default() }).is_empty());
	}

	#[test]
	fn oversized_grids_generate_nothing() {
		assert!(generate_isometric_grid(&IsometricGridOptions { cols: usize::MAX, rows: 2, ..Default::default() }).is_empty());
		assert!(generate_isometric_grid(&IsometricGridOptions { cols: 1_000, rows: 1_000, ..Default::default() }).is_empty());
		assert!(!IsometricGridOptions { cols: 500, rows: 500, ..Default::default() }.is_degenerate());
	}
}
