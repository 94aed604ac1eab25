use crate::geometry::{Rect, Size};
use crate::layout_engine::element::PlaceFn;

slotmap::new_key_type! { pub struct ElementId; }

struct ElementSlot {
    place: Rect,
    on_place: Option<PlaceFn>,
}

/// Externally owned elements that attach layouts refer to by handle.
///
/// Each element remembers its last place; `set_place` updates it and forwards
/// the rect to the element's placement callback.
#[derive(Default)]
pub struct ElementArena {
    slots: slotmap::SlotMap<ElementId, ElementSlot>,
}

impl ElementArena {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, place: Rect) -> ElementId {
        self.slots.insert(ElementSlot { place, on_place: None })
    }

    pub fn insert_with(&mut self, place: Rect, on_place: impl FnMut(Rect) + 'static) -> ElementId {
        self.slots.insert(ElementSlot {
            place,
            on_place: Some(Box::new(on_place)),
        })
    }

    pub fn remove(&mut self, id: ElementId) -> bool { self.slots.remove(id).is_some() }

    pub fn contains(&self, id: ElementId) -> bool { self.slots.contains_key(id) }

    pub fn len(&self) -> usize { self.slots.len() }

    pub fn is_empty(&self) -> bool { self.slots.is_empty() }

    pub fn place(&self, id: ElementId) -> Option<Rect> { self.slots.get(id).map(|s| s.place) }

    pub fn size(&self, id: ElementId) -> Option<Size> { self.place(id).map(|r| r.size()) }

    /// Records the place without running the placement callback.
    pub fn set_place_silent(&mut self, id: ElementId, place: Rect) -> bool {
        let Some(slot) = self.slots.get_mut(id) else { return false };
        slot.place = place;
        true
    }

    pub fn set_place(&mut self, id: ElementId, place: Rect) -> bool {
        let Some(slot) = self.slots.get_mut(id) else { return false };
        slot.place = place;
        if let Some(on_place) = &mut slot.on_place {
            on_place(place);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout_engine::testing::Recorder;

    #[test]
    fn set_place_runs_callback() {
        let log = Recorder::new();
        let mut arena = ElementArena::new();
        let a = arena.insert_with(Rect::new(0.0, 0.0, 5.0, 5.0), log.sink());
        assert_eq!(arena.size(a), Some(Size::new(5.0, 5.0)));

        assert!(arena.set_place(a, Rect::new(1.0, 2.0, 3.0, 4.0)));
        assert!(arena.set_place_silent(a, Rect::new(9.0, 9.0, 9.0, 9.0)));
        assert_eq!(log.places(), vec![Rect::new(1.0, 2.0, 3.0, 4.0)]);
        assert_eq!(arena.place(a), Some(Rect::new(9.0, 9.0, 9.0, 9.0)));
    }

    #[test]
    fn stale_handles_are_rejected() {
        let mut arena = ElementArena::new();
        let a = arena.insert(Rect::default());
        assert!(arena.remove(a));
        assert!(!arena.contains(a));
        assert!(!arena.set_place(a, Rect::default()));
        assert_eq!(arena.place(a), None);
        assert!(arena.is_empty());
    }
}
