use tracing::trace;

use crate::common::config::DistributionSettings;
use crate::geometry::Rect;
use crate::layout_engine::element::{ElementKey, LayoutBase, PlaceFn};
use crate::layout_engine::utils::{Track, distribute};
use crate::layout_engine::{Layout, Orientation, Origin};

pub struct WeightElement {
    pub place: PlaceFn,
    /// Fixed primary-axis extent; zero means the element is weighted.
    pub fixed_extent: f64,
    pub weight: f64,
}

impl WeightElement {
    pub fn fixed(extent: f64, place: impl FnMut(Rect) + 'static) -> Self {
        Self {
            place: Box::new(place),
            fixed_extent: extent,
            weight: 0.0,
        }
    }

    pub fn weighted(weight: f64, place: impl FnMut(Rect) + 'static) -> Self {
        Self {
            place: Box::new(place),
            fixed_extent: 0.0,
            weight,
        }
    }

    pub fn is_fixed(&self) -> bool { self.fixed_extent > 0.0 }
}

/// Fixed elements take their extent first; the rest is split by weight.
pub struct WeightedLayout {
    track: Track,
    elements: LayoutBase<WeightElement>,
}

impl WeightedLayout {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            track: Track { orientation, ..Default::default() },
            elements: LayoutBase::new(),
        }
    }

    pub fn from_settings(settings: &DistributionSettings) -> Self {
        Self::new(settings.orientation)
            .origin(settings.origin)
            .border(settings.border)
            .gap(settings.gap)
    }

    pub fn origin(mut self, origin: Origin) -> Self {
        self.track.origin = origin;
        self
    }

    pub fn border(mut self, border: f64) -> Self {
        self.track.border = border;
        self
    }

    pub fn gap(mut self, gap: f64) -> Self {
        self.track.gap = gap;
        self
    }

    pub fn push(&mut self, element: WeightElement) -> ElementKey { self.elements.push(element) }

    pub fn append_fixed(&mut self, extent: f64, place: impl FnMut(Rect) + 'static) -> ElementKey {
        self.push(WeightElement::fixed(extent, place))
    }

    pub fn append_weighted(
        &mut self,
        weight: f64,
        place: impl FnMut(Rect) + 'static,
    ) -> ElementKey {
        self.push(WeightElement::weighted(weight, place))
    }

    pub fn remove(&mut self, key: ElementKey) -> bool { self.elements.remove(key).is_some() }

    pub fn clear(&mut self) { self.elements.clear() }

    pub fn len(&self) -> usize { self.elements.len() }

    pub fn is_empty(&self) -> bool { self.elements.is_empty() }

    pub fn places(&self, rect: Rect) -> Vec<Rect> {
        let fixed: f64 = self.elements.iter().filter(|e| e.is_fixed()).map(|e| e.fixed_extent).sum();
        let total_weight: f64 =
            self.elements.iter().filter(|e| !e.is_fixed()).map(|e| e.weight).sum();
        let remaining = (self.track.flexible_space(&rect, self.elements.len(), 0) - fixed).max(0.0);

        let extents: Vec<f64> = self
            .elements
            .iter()
            .map(|e| {
                if e.is_fixed() {
                    e.fixed_extent
                } else if total_weight > 0.0 {
                    remaining * e.weight / total_weight
                } else {
                    0.0
                }
            })
            .collect();
        distribute(rect, &self.track, &extents)
    }
}

impl Layout for WeightedLayout {
    fn layout(&mut self, rect: Rect) {
        let places = self.places(rect);
        trace!(?rect, count = places.len(), "weighted layout");
        let mut places = places.into_iter();
        self.elements.for_each_mut(|element| {
            if let Some(rect) = places.next() {
                (element.place)(rect);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::layout_engine::testing::Recorder;

    #[test]
    fn fixed_first_then_weights() {
        let log = Recorder::new();
        let mut layout = WeightedLayout::new(Orientation::Horizontal).gap(10.0);
        layout.append_fixed(100.0, log.sink());
        layout.append_weighted(1.0, log.sink());
        layout.append_weighted(3.0, log.sink());
        layout.layout(Rect::new(0.0, 0.0, 520.0, 40.0));

        assert_eq!(log.places(), vec![
            Rect::new(0.0, 0.0, 100.0, 40.0),
            Rect::new(110.0, 0.0, 100.0, 40.0),
            Rect::new(220.0, 0.0, 300.0, 40.0),
        ]);
    }

    #[test]
    fn weights_need_not_sum_to_one() {
        let mut a = WeightedLayout::new(Orientation::Vertical);
        a.append_weighted(2.0, |_| {});
        a.append_weighted(2.0, |_| {});
        let mut b = WeightedLayout::new(Orientation::Vertical);
        b.append_weighted(0.5, |_| {});
        b.append_weighted(0.5, |_| {});

        let rect = Rect::new(0.0, 0.0, 10.0, 90.0);
        assert_eq!(a.places(rect), b.places(rect));
        assert_eq!(a.places(rect)[1], Rect::new(0.0, 45.0, 10.0, 45.0));
    }

    #[test]
    fn overcommitted_fixed_space_leaves_weighted_empty() {
        let mut layout = WeightedLayout::new(Orientation::Horizontal);
        layout.append_fixed(80.0, |_| {});
        layout.append_weighted(1.0, |_| {});
        let places = layout.places(Rect::new(0.0, 0.0, 50.0, 10.0));
        assert_eq!(places[0].width, 80.0);
        assert_eq!(places[1].width, 0.0);
    }

    #[test]
    fn zero_total_weight() {
        let mut layout = WeightedLayout::new(Orientation::Horizontal);
        layout.append_weighted(0.0, |_| {});
        let places = layout.places(Rect::new(0.0, 0.0, 50.0, 10.0));
        assert_eq!(places[0].width, 0.0);
    }

    #[test]
    fn end_origin() {
        let mut layout = WeightedLayout::new(Orientation::Horizontal).origin(Origin::End).border(5.0);
        layout.append_fixed(20.0, |_| {});
        layout.append_weighted(1.0, |_| {});
        let places = layout.places(Rect::new(0.0, 0.0, 110.0, 30.0));
        assert_eq!(places, vec![Rect::new(85.0, 5.0, 20.0, 20.0), Rect::new(5.0, 5.0, 80.0, 20.0)]);
    }
}
