pub mod viewport;

use path_kernel::{Element, ElementId, Path, Style};

use glam::{DAffine2, DVec2};
use serde::{Deserialize, Serialize};

/// The shared drawing every plugin reads and writes. It is the sole owner of its elements.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
	elements: Vec<Element>,
	selection: Vec<ElementId>,
	next_id: u64,
}

impl Document {
	pub fn new() -> Self {
		Self::default()
	}

	/// Elements in stacking order, bottom first.
	pub fn elements(&self) -> &[Element] {
		&self.elements
	}

	pub fn element(&self, id: ElementId) -> Option<&Element> {
		self.elements.iter().find(|element| element.id == id)
	}

	pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
		self.elements.iter_mut().find(|element| element.id == id)
	}

	/// Append a new path element on top of the stack.
	pub fn add_element(&mut self, path: Path, style: Style) -> ElementId {
		let id = ElementId(self.next_id);
		self.next_id += 1;
		self.elements.push(Element::new(id, path, style));
		log::trace!("Added element {id}");
		id
	}

	/// Insert an element built elsewhere, keeping its id unless it collides with an existing one.
	pub fn insert_element(&mut self, mut element: Element) -> ElementId {
		if element.id.0 < self.next_id && self.element(element.id).is_some() {
			element.id = ElementId(self.next_id);
		}
		self.next_id = self.next_id.max(element.id.0 + 1);
		let id = element.id;
		self.elements.push(element);
		id
	}

	pub fn remove_element(&mut self, id: ElementId) -> Option<Element> {
		let index = self.elements.iter().position(|element| element.id == id)?;
		self.selection.retain(|&selected| selected != id);
		for element in &mut self.elements {
			if element.parent == Some(id) {
				element.parent = None;
			}
		}
		Some(self.elements.remove(index))
	}

	/// Replace an element's geometry. Returns false if the element does not exist.
	pub fn replace_path(&mut self, id: ElementId, path: Path) -> bool {
		let Some(element) = self.element_mut(id) else { return false };
		element.path = path;
		true
	}

	pub fn transform_element(&mut self, id: ElementId, transform: DAffine2) -> bool {
		let Some(element) = self.element_mut(id) else { return false };
		element.path.apply_transform(transform);
		true
	}

	pub fn selection(&self) -> &[ElementId] {
		&self.selection
	}

	pub fn is_selected(&self, id: ElementId) -> bool {
		self.selection.contains(&id)
	}

	/// Replace the selection, dropping ids that are not in the document and duplicates.
	pub fn set_selection(&mut self, ids: impl IntoIterator<Item = ElementId>) {
		self.selection.clear();
		for id in ids {
			if self.element(id).is_some() && !self.selection.contains(&id) {
				self.selection.push(id);
			}
		}
	}

	pub fn clear_selection(&mut self) {
		self.selection.clear();
	}

	pub fn selected_elements(&self) -> impl Iterator<Item = &Element> {
		self.selection.iter().filter_map(|&id| self.element(id))
	}

	/// Combined bounds of the selected elements.
	pub fn selection_bounding_box(&self) -> Option<[DVec2; 2]> {
		self.selected_elements()
			.filter_map(|element| element.path.loose_bounding_box())
			.reduce(|[min_a, max_a], [min_b, max_b]| [min_a.min(min_b), max_a.max(max_b)])
	}

	/// The topmost element whose bounds, grown by `tolerance`, contain the document-space point.
	pub fn hit_test(&self, point: DVec2, tolerance: f64) -> Option<ElementId> {
		self.elements
			.iter()
			.rev()
			.find(|element| {
				element
					.path
					.loose_bounding_box()
					.is_some_and(|[min, max]| point.cmpge(min - tolerance).all() && point.cmple(max + tolerance).all())
			})
			.map(|element| element.id)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use path_kernel::Subpath;

	fn square(offset: DVec2, size: f64) -> Path {
		let corners = [DVec2::ZERO, DVec2::new(size, 0.), DVec2::splat(size), DVec2::new(0., size)].map(|corner| corner + offset);
		Path::from_subpath(Subpath::from_anchors(corners, true))
	}

	#[test]
	fn hit_test_prefers_topmost() {
		let mut document = Document::new();
		let bottom = document.add_element(square(DVec2::ZERO, 100.), Style::default());
		let top = document.add_element(square(DVec2::splat(50.), 100.), Style::default());

		assert_eq!(document.hit_test(DVec2::splat(75.), 0.), Some(top));
		assert_eq!(document.hit_test(DVec2::splat(10.), 0.), Some(bottom));
		assert_eq!(document.hit_test(DVec2::splat(-3.), 0.), None);
		assert_eq!(document.hit_test(DVec2::splat(-3.), 4.), Some(bottom));
	}

	#[test]
	fn selection_ignores_missing_elements() {
		let mut document = Document::new();
		let id = document.add_element(square(DVec2::ZERO, 10.), Style::default());
		document.set_selection([id, ElementId(99), id]);
		assert_eq!(document.selection(), &[id]);

		document.remove_element(id);
		assert!(document.selection().is_empty());
	}

	#[test]
	fn ids_are_never_reused() {
		let mut document = Document::new();
		let first = document.add_element(Path::default(), Style::default());
		document.remove_element(first);
		let second = document.add_element(Path::default(), Style::default());
		assert_ne!(first, second);

		let inserted = document.insert_element(Element::new(second, Path::default(), Style::default()));
		assert_ne!(inserted, second);
	}
}
