use std::cell::RefCell;
use std::rc::Rc;

use crate::geometry::Rect;
use crate::layout_engine::Layout;

slotmap::new_key_type! { pub struct ElementKey; }

/// Positions exactly one element inside the rect it is handed.
pub type PlaceFn = Box<dyn FnMut(Rect)>;

pub struct LayoutElement {
    pub place: PlaceFn,
    pub is_separator: bool,
}

impl LayoutElement {
    pub fn new(place: impl FnMut(Rect) + 'static) -> Self {
        Self { place: Box::new(place), is_separator: false }
    }

    pub fn separator(place: impl FnMut(Rect) + 'static) -> Self {
        Self { place: Box::new(place), is_separator: true }
    }

    /// Forwards the placed rect into another layout.
    pub fn nested<L: Layout + 'static>(layout: Rc<RefCell<L>>) -> Self {
        Self::new(move |rect| layout.borrow_mut().layout(rect))
    }
}

/// Ordered element list owned by a layout.
///
/// Keys stay valid across removals of other elements; iteration follows
/// registration order.
pub struct LayoutBase<E = LayoutElement> {
    elements: slotmap::SlotMap<ElementKey, E>,
    order: Vec<ElementKey>,
}

impl<E> Default for LayoutBase<E> {
    fn default() -> Self {
        Self {
            elements: Default::default(),
            order: Vec::new(),
        }
    }
}

impl<E> LayoutBase<E> {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, element: E) -> ElementKey {
        let key = self.elements.insert(element);
        self.order.push(key);
        key
    }

    pub fn remove(&mut self, key: ElementKey) -> Option<E> {
        let element = self.elements.remove(key)?;
        self.order.retain(|k| *k != key);
        Some(element)
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize { self.order.len() }

    pub fn is_empty(&self) -> bool { self.order.is_empty() }

    pub fn get(&self, key: ElementKey) -> Option<&E> { self.elements.get(key) }

    pub fn iter(&self) -> impl Iterator<Item = &E> + '_ {
        self.order.iter().map(|k| &self.elements[*k])
    }

    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut E)) {
        for key in &self.order {
            f(&mut self.elements[*key]);
        }
    }
}

impl LayoutBase<LayoutElement> {
    pub fn append(&mut self, place: impl FnMut(Rect) + 'static) -> ElementKey {
        self.push(LayoutElement::new(place))
    }

    pub fn append_separator(&mut self, place: impl FnMut(Rect) + 'static) -> ElementKey {
        self.push(LayoutElement::separator(place))
    }

    pub fn separator_count(&self) -> usize { self.iter().filter(|e| e.is_separator).count() }

    /// Primary-axis extent per element: separators get `separator_width`, the rest `extent`.
    pub fn extents(&self, separator_width: f64, extent: f64) -> Vec<f64> {
        self.iter()
            .map(|e| if e.is_separator { separator_width } else { extent })
            .collect()
    }

    /// Hands each element its rect, pairing them up in registration order.
    pub fn place_all(&mut self, places: Vec<Rect>) {
        let mut places = places.into_iter();
        self.for_each_mut(|element| {
            if let Some(rect) = places.next() {
                (element.place)(rect);
            }
        });
    }
}
