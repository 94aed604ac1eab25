use std::cell::RefCell;
use std::rc::Rc;

use crate::geometry::Rect;

/// Collects every rect a placement callback receives.
#[derive(Clone, Default)]
pub struct Recorder(Rc<RefCell<Vec<Rect>>>);

impl Recorder {
    pub fn new() -> Self { Self::default() }

    pub fn sink(&self) -> impl FnMut(Rect) + 'static {
        let places = self.0.clone();
        move |rect| places.borrow_mut().push(rect)
    }

    pub fn places(&self) -> Vec<Rect> { self.0.borrow().clone() }

    pub fn last(&self) -> Option<Rect> { self.0.borrow().last().copied() }
}
