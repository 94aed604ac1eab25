use tracing::trace;

use crate::common::config::DistributionSettings;
use crate::geometry::Rect;
use crate::layout_engine::element::{ElementKey, LayoutBase};
use crate::layout_engine::utils::{Track, distribute};
use crate::layout_engine::{Layout, Orientation, Origin};

/// Repeats one fixed `dimension` per element along the primary axis.
pub struct LineupLayout {
    track: Track,
    dimension: f64,
    elements: LayoutBase,
}

impl LineupLayout {
    pub fn new(orientation: Orientation, dimension: f64) -> Self {
        Self {
            track: Track { orientation, ..Default::default() },
            dimension,
            elements: LayoutBase::new(),
        }
    }

    pub fn from_settings(settings: &DistributionSettings) -> Self {
        Self::new(settings.orientation, settings.dimension)
            .origin(settings.origin)
            .border(settings.border)
            .gap(settings.gap)
            .separator_width(settings.separator_width)
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

    pub fn separator_width(mut self, width: f64) -> Self {
        self.track.separator_width = width;
        self
    }

    pub fn dimension(&self) -> f64 { self.dimension }

    pub fn append(&mut self, place: impl FnMut(Rect) + 'static) -> ElementKey {
        self.elements.append(place)
    }

    pub fn append_separator(&mut self, place: impl FnMut(Rect) + 'static) -> ElementKey {
        self.elements.append_separator(place)
    }

    pub fn remove(&mut self, key: ElementKey) -> bool { self.elements.remove(key).is_some() }

    pub fn clear(&mut self) { self.elements.clear() }

    pub fn len(&self) -> usize { self.elements.len() }

    pub fn is_empty(&self) -> bool { self.elements.is_empty() }

    /// Primary-axis span the whole row needs, borders included.
    pub fn content_extent(&self) -> f64 {
        let extents = self.elements.extents(self.track.separator_width, self.dimension);
        let gaps = extents.len().saturating_sub(1) as f64 * self.track.gap;
        extents.iter().sum::<f64>() + gaps + self.track.border * 2.0
    }

    pub fn places(&self, rect: Rect) -> Vec<Rect> {
        let extents = self.elements.extents(self.track.separator_width, self.dimension);
        distribute(rect, &self.track, &extents)
    }
}

impl Layout for LineupLayout {
    fn layout(&mut self, rect: Rect) {
        let places = self.places(rect);
        trace!(?rect, count = places.len(), dimension = self.dimension, "lineup layout");
        self.elements.place_all(places);
    }
}
