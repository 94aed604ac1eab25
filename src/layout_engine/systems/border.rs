use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::common::config::BorderSettings;
use crate::geometry::Rect;
use crate::layout_engine::Layout;
use crate::layout_engine::element::PlaceFn;

/// How the four edge regions share corners and give up space when the
/// container is too small for their configured extents.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderPolicy {
    /// Corners stay empty; overflowing pairs shrink proportionally.
    #[default]
    Symmetric,
    /// Top and bottom span the full width.
    TopBottomMaximize,
    /// Left and right span the full height.
    LeftRightMaximize,
    /// Top spans the full width, left the full height below it.
    TopLeftMaximize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    Top,
    Bottom,
    Left,
    Right,
    Center,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Top,
        Region::Bottom,
        Region::Left,
        Region::Right,
        Region::Center,
    ];

    fn index(self) -> usize {
        match self {
            Region::Top => 0,
            Region::Bottom => 1,
            Region::Left => 2,
            Region::Right => 3,
            Region::Center => 4,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BorderPlaces {
    pub top: Rect,
    pub bottom: Rect,
    pub left: Rect,
    pub right: Rect,
    pub center: Rect,
}

impl BorderPlaces {
    pub fn get(&self, region: Region) -> Rect {
        match region {
            Region::Top => self.top,
            Region::Bottom => self.bottom,
            Region::Left => self.left,
            Region::Right => self.right,
            Region::Center => self.center,
        }
    }
}

fn shrink_proportionally(a: f64, b: f64, available: f64) -> (f64, f64) {
    let total = a + b;
    if total > available && total > 0.0 {
        let scale = available / total;
        (a * scale, b * scale)
    } else {
        (a, b)
    }
}

fn shrink_in_order(a: f64, b: f64, available: f64) -> (f64, f64) {
    let a = a.min(available);
    (a, b.min(available - a))
}

/// Top/bottom/left/right strips around a center that takes what is left.
///
/// An edge region only claims space once a placement callback is set for it.
pub struct BorderLayout {
    policy: BorderPolicy,
    top: f64,
    bottom: f64,
    left: f64,
    right: f64,
    regions: [Option<PlaceFn>; 5],
}

impl BorderLayout {
    pub fn new(policy: BorderPolicy) -> Self {
        Self {
            policy,
            top: 0.0,
            bottom: 0.0,
            left: 0.0,
            right: 0.0,
            regions: Default::default(),
        }
    }

    pub fn from_settings(settings: &BorderSettings) -> Self {
        Self::new(settings.policy).extents(
            settings.top,
            settings.bottom,
            settings.left,
            settings.right,
        )
    }

    pub fn extents(mut self, top: f64, bottom: f64, left: f64, right: f64) -> Self {
        self.top = top;
        self.bottom = bottom;
        self.left = left;
        self.right = right;
        self
    }

    pub fn policy(&self) -> BorderPolicy { self.policy }

    pub fn set(&mut self, region: Region, place: impl FnMut(Rect) + 'static) {
        self.regions[region.index()] = Some(Box::new(place));
    }

    pub fn with(mut self, region: Region, place: impl FnMut(Rect) + 'static) -> Self {
        self.set(region, place);
        self
    }

    pub fn remove(&mut self, region: Region) -> bool { self.regions[region.index()].take().is_some() }

    pub fn has(&self, region: Region) -> bool { self.regions[region.index()].is_some() }

    fn claimed(&self, region: Region, extent: f64) -> f64 {
        if self.has(region) { extent } else { 0.0 }
    }

    pub fn places(&self, rect: Rect) -> BorderPlaces {
        let width = rect.width.max(0.0);
        let height = rect.height.max(0.0);
        let top = self.claimed(Region::Top, self.top);
        let bottom = self.claimed(Region::Bottom, self.bottom);
        let left = self.claimed(Region::Left, self.left);
        let right = self.claimed(Region::Right, self.right);

        let ((t, b), (l, r)) = match self.policy {
            BorderPolicy::Symmetric => (
                shrink_proportionally(top, bottom, height),
                shrink_proportionally(left, right, width),
            ),
            _ => (shrink_in_order(top, bottom, height), shrink_in_order(left, right, width)),
        };

        let (x, y) = (rect.x, rect.y);
        let (x2, y2) = (x + width, y + height);
        let inner_w = width - l - r;
        let inner_h = height - t - b;
        let center = Rect::new(x + l, y + t, inner_w, inner_h);

        let places = match self.policy {
            BorderPolicy::Symmetric => BorderPlaces {
                top: Rect::new(x + l, y, inner_w, t),
                bottom: Rect::new(x + l, y2 - b, inner_w, b),
                left: Rect::new(x, y + t, l, inner_h),
                right: Rect::new(x2 - r, y + t, r, inner_h),
                center,
            },
            BorderPolicy::TopBottomMaximize => BorderPlaces {
                top: Rect::new(x, y, width, t),
                bottom: Rect::new(x, y2 - b, width, b),
                left: Rect::new(x, y + t, l, inner_h),
                right: Rect::new(x2 - r, y + t, r, inner_h),
                center,
            },
            BorderPolicy::LeftRightMaximize => BorderPlaces {
                top: Rect::new(x + l, y, inner_w, t),
                bottom: Rect::new(x + l, y2 - b, inner_w, b),
                left: Rect::new(x, y, l, height),
                right: Rect::new(x2 - r, y, r, height),
                center,
            },
            BorderPolicy::TopLeftMaximize => BorderPlaces {
                top: Rect::new(x, y, width, t),
                bottom: Rect::new(x + l, y2 - b, width - l, b),
                left: Rect::new(x, y + t, l, height - t),
                right: Rect::new(x2 - r, y + t, r, inner_h),
                center,
            },
        };

        BorderPlaces {
            top: places.top.normalized(),
            bottom: places.bottom.normalized(),
            left: places.left.normalized(),
            right: places.right.normalized(),
            center: places.center.normalized(),
        }
    }
}

impl Layout for BorderLayout {
    fn layout(&mut self, rect: Rect) {
        let places = self.places(rect);
        trace!(?rect, policy = ?self.policy, center = ?places.center, "border layout");
        for region in Region::ALL {
            if let Some(place) = &mut self.regions[region.index()] {
                place(places.get(region));
            }
        }
    }
}

/// A fixed-height header strip above a body that fills the rest.
pub struct HeaderLayout {
    height: f64,
    header: Option<PlaceFn>,
    body: Option<PlaceFn>,
}

impl HeaderLayout {
    pub fn new(height: f64) -> Self {
        Self {
            height,
            header: None,
            body: None,
        }
    }

    pub fn header(mut self, place: impl FnMut(Rect) + 'static) -> Self {
        self.header = Some(Box::new(place));
        self
    }

    pub fn body(mut self, place: impl FnMut(Rect) + 'static) -> Self {
        self.body = Some(Box::new(place));
        self
    }

    pub fn places(&self, rect: Rect) -> (Rect, Rect) {
        let height = rect.height.max(0.0);
        let h = self.height.min(height).max(0.0);
        (
            Rect::new(rect.x, rect.y, rect.width, h).normalized(),
            Rect::new(rect.x, rect.y + h, rect.width, height - h).normalized(),
        )
    }
}

impl Layout for HeaderLayout {
    fn layout(&mut self, rect: Rect) {
        let (header, body) = self.places(rect);
        if let Some(place) = &mut self.header {
            place(header);
        }
        if let Some(place) = &mut self.body {
            place(body);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::layout_engine::testing::Recorder;

    const CONTAINER: Rect = Rect::new(0.0, 0.0, 400.0, 300.0);

    fn all_regions(policy: BorderPolicy) -> BorderLayout {
        let mut layout = BorderLayout::new(policy).extents(20.0, 20.0, 30.0, 30.0);
        for region in Region::ALL {
            layout.set(region, |_| {});
        }
        layout
    }

    #[test]
    fn symmetric_center() {
        let center = Recorder::new();
        let mut layout = all_regions(BorderPolicy::Symmetric);
        layout.set(Region::Center, center.sink());
        layout.layout(CONTAINER);

        assert_eq!(center.places(), vec![Rect::new(30.0, 20.0, 340.0, 260.0)]);
        let places = layout.places(CONTAINER);
        assert_eq!(places.top, Rect::new(30.0, 0.0, 340.0, 20.0));
        assert_eq!(places.right, Rect::new(370.0, 20.0, 30.0, 260.0));
    }

    #[test]
    fn center_is_the_same_for_every_policy() {
        for policy in [
            BorderPolicy::Symmetric,
            BorderPolicy::TopBottomMaximize,
            BorderPolicy::LeftRightMaximize,
            BorderPolicy::TopLeftMaximize,
        ] {
            let places = all_regions(policy).places(CONTAINER);
            assert_eq!(places.center, Rect::new(30.0, 20.0, 340.0, 260.0), "{policy:?}");
        }
    }

    #[test]
    fn corner_ownership() {
        let tb = all_regions(BorderPolicy::TopBottomMaximize).places(CONTAINER);
        assert_eq!(tb.top, Rect::new(0.0, 0.0, 400.0, 20.0));
        assert_eq!(tb.left, Rect::new(0.0, 20.0, 30.0, 260.0));

        let lr = all_regions(BorderPolicy::LeftRightMaximize).places(CONTAINER);
        assert_eq!(lr.left, Rect::new(0.0, 0.0, 30.0, 300.0));
        assert_eq!(lr.bottom, Rect::new(30.0, 280.0, 340.0, 20.0));

        let tl = all_regions(BorderPolicy::TopLeftMaximize).places(CONTAINER);
        assert_eq!(tl.top, Rect::new(0.0, 0.0, 400.0, 20.0));
        assert_eq!(tl.left, Rect::new(0.0, 20.0, 30.0, 280.0));
        assert_eq!(tl.bottom, Rect::new(30.0, 280.0, 370.0, 20.0));
        assert_eq!(tl.right, Rect::new(370.0, 20.0, 30.0, 260.0));
    }

    #[test]
    fn shrinking_policies() {
        let small = Rect::new(0.0, 0.0, 40.0, 30.0);

        let sym = all_regions(BorderPolicy::Symmetric).places(small);
        assert_eq!((sym.top.height, sym.bottom.height), (15.0, 15.0));
        assert_eq!((sym.left.width, sym.right.width), (20.0, 20.0));
        assert_eq!(sym.center, Rect::new(20.0, 15.0, 0.0, 0.0));

        let tb = all_regions(BorderPolicy::TopBottomMaximize).places(small);
        assert_eq!((tb.top.height, tb.bottom.height), (20.0, 10.0));
        assert_eq!((tb.left.width, tb.right.width), (30.0, 10.0));
    }

    #[test]
    fn unset_regions_claim_no_space() {
        let layout = BorderLayout::new(BorderPolicy::Symmetric)
            .extents(20.0, 20.0, 30.0, 30.0)
            .with(Region::Top, |_| {})
            .with(Region::Center, |_| {});
        assert_eq!(layout.places(CONTAINER).center, Rect::new(0.0, 20.0, 400.0, 280.0));
    }

    #[test]
    fn header_and_body() {
        let header = Recorder::new();
        let body = Recorder::new();
        let mut layout = HeaderLayout::new(24.0).header(header.sink()).body(body.sink());
        layout.layout(CONTAINER);
        assert_eq!(header.last(), Some(Rect::new(0.0, 0.0, 400.0, 24.0)));
        assert_eq!(body.last(), Some(Rect::new(0.0, 24.0, 400.0, 276.0)));

        layout.layout(Rect::new(0.0, 0.0, 100.0, 10.0));
        assert_eq!(header.last(), Some(Rect::new(0.0, 0.0, 100.0, 10.0)));
        assert_eq!(body.last(), Some(Rect::new(0.0, 10.0, 100.0, 0.0)));
    }
}
