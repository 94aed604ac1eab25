use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::common::config::SplitSettings;
use crate::geometry::{Point, Rect, Size};
use crate::layout_engine::element::PlaceFn;
use crate::layout_engine::{Layout, Orientation};

/// `Vertical` puts the divider upright (panes left/right); `Horizontal` lays it
/// flat (panes top/bottom).
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitOrientation {
    #[default]
    Vertical,
    Horizontal,
}

impl SplitOrientation {
    /// The axis the panes are arranged along.
    pub fn axis(self) -> Orientation {
        match self {
            SplitOrientation::Vertical => Orientation::Horizontal,
            SplitOrientation::Horizontal => Orientation::Vertical,
        }
    }
}

/// Geometry of a two-pane split.
///
/// Positions are fractions of the container's extent. They are never clamped:
/// a position outside `[0, 1]` yields inverted or off-rect places.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Splitter {
    pub orientation: SplitOrientation,
    pub splitter_width: f64,
}

impl Splitter {
    pub fn new(orientation: SplitOrientation, splitter_width: f64) -> Self {
        Self { orientation, splitter_width }
    }

    fn divider(&self, rect: &Rect, pos: f64) -> f64 {
        let axis = self.orientation.axis();
        axis.pos(rect) + pos * axis.len(rect)
    }

    fn span(&self, rect: &Rect, start: f64, len: f64) -> Rect {
        let axis = self.orientation.axis();
        let cross = axis.cross();
        axis.rect(start, len, cross.pos(rect), cross.len(rect))
    }

    pub fn first_place(&self, rect: &Rect, pos: f64) -> Rect {
        let axis = self.orientation.axis();
        let start = axis.pos(rect);
        let end = self.divider(rect, pos) - self.splitter_width / 2.0;
        self.span(rect, start, end - start)
    }

    pub fn second_place(&self, rect: &Rect, pos: f64) -> Rect {
        let axis = self.orientation.axis();
        let start = self.divider(rect, pos) + self.splitter_width / 2.0;
        self.span(rect, start, axis.end(rect) - start)
    }

    pub fn splitter_place(&self, rect: &Rect, pos: f64) -> Rect {
        let start = self.divider(rect, pos) - self.splitter_width / 2.0;
        self.span(rect, start, self.splitter_width)
    }

    /// Maps the splitter band's leading corner, relative to the container, back
    /// to a position. A container with no extent maps to `0.0`.
    pub fn split_pos(&self, point: Point, size: Size) -> f64 {
        let axis = self.orientation.axis();
        let extent = axis.size(size);
        if extent <= 0.0 {
            return 0.0;
        }
        (axis.point(point) + self.splitter_width / 2.0) / extent
    }
}

pub enum Pane {
    Empty,
    Element(PlaceFn),
    Split(Box<SplitView>),
}

impl Pane {
    pub fn element(place: impl FnMut(Rect) + 'static) -> Self { Pane::Element(Box::new(place)) }

    pub fn split(view: SplitView) -> Self { Pane::Split(Box::new(view)) }

    fn place(&mut self, rect: Rect) {
        match self {
            Pane::Empty => {}
            Pane::Element(place) => place(rect),
            Pane::Split(view) => view.layout(rect),
        }
    }
}

impl Default for Pane {
    fn default() -> Self { Pane::Empty }
}

/// Two panes divided by a draggable splitter. Panes may hold further splits,
/// forming a binary tree.
pub struct SplitView {
    splitter: Splitter,
    position: f64,
    first: Pane,
    second: Pane,
    on_splitter: Option<PlaceFn>,
}

impl SplitView {
    pub fn new(orientation: SplitOrientation, splitter_width: f64) -> Self {
        Self {
            splitter: Splitter::new(orientation, splitter_width),
            position: 0.5,
            first: Pane::Empty,
            second: Pane::Empty,
            on_splitter: None,
        }
    }

    pub fn from_settings(settings: &SplitSettings) -> Self {
        let mut view = Self::new(settings.orientation, settings.splitter_width);
        view.position = settings.position;
        view
    }

    pub fn with_panes(mut self, first: Pane, second: Pane) -> Self {
        self.first = first;
        self.second = second;
        self
    }

    pub fn on_splitter(mut self, place: impl FnMut(Rect) + 'static) -> Self {
        self.on_splitter = Some(Box::new(place));
        self
    }

    pub fn set_first(&mut self, pane: Pane) { self.first = pane; }

    pub fn set_second(&mut self, pane: Pane) { self.second = pane; }

    pub fn splitter(&self) -> &Splitter { &self.splitter }

    pub fn split_pos(&self) -> f64 { self.position }

    /// Returns whether the position changed.
    pub fn set_split_pos(&mut self, pos: f64) -> bool {
        if self.position == pos {
            return false;
        }
        self.position = pos;
        true
    }

    pub fn first_place(&self, rect: &Rect) -> Rect { self.splitter.first_place(rect, self.position) }

    pub fn second_place(&self, rect: &Rect) -> Rect {
        self.splitter.second_place(rect, self.position)
    }

    pub fn splitter_place(&self, rect: &Rect) -> Rect {
        self.splitter.splitter_place(rect, self.position)
    }

    pub fn hit_test(&self, rect: &Rect, point: Point) -> bool {
        self.splitter_place(rect).contains(point)
    }

    /// Moves the splitter so its band starts at `band_origin` (container coordinates).
    pub fn drag_to(&mut self, rect: &Rect, band_origin: Point) -> bool {
        let pos = self.splitter.split_pos(band_origin - rect.origin(), rect.size());
        debug!(from = self.position, to = pos, "splitter dragged");
        self.set_split_pos(pos)
    }

    /// Finds the split whose band contains `point`, descending into nested panes.
    /// Returns the split together with the rect it is laid out in.
    pub fn splitter_at(&mut self, rect: Rect, point: Point) -> Option<(&mut SplitView, Rect)> {
        if self.hit_test(&rect, point) {
            return Some((self, rect));
        }
        let first_rect = self.first_place(&rect).normalized();
        let second_rect = self.second_place(&rect).normalized();
        if let Pane::Split(view) = &mut self.first {
            if first_rect.contains(point) {
                return view.splitter_at(first_rect, point);
            }
        }
        if let Pane::Split(view) = &mut self.second {
            if second_rect.contains(point) {
                return view.splitter_at(second_rect, point);
            }
        }
        None
    }
}

impl Layout for SplitView {
    fn layout(&mut self, rect: Rect) {
        let first = self.first_place(&rect).normalized();
        let band = self.splitter_place(&rect).normalized();
        let second = self.second_place(&rect).normalized();
        trace!(?rect, position = self.position, "split layout");

        self.first.place(first);
        if let Some(place) = &mut self.on_splitter {
            place(band);
        }
        self.second.place(second);
    }
}
