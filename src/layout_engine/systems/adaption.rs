use tracing::trace;

use crate::common::config::DistributionSettings;
use crate::geometry::Rect;
use crate::layout_engine::element::{ElementKey, LayoutBase};
use crate::layout_engine::utils::{Track, clamp_extent, distribute};
use crate::layout_engine::{Layout, Orientation, Origin};

/// Gives every element an equal share of the primary axis.
///
/// The share is clamped to `[min, max]` and never goes below zero; `min > max`
/// is not checked and simply yields `max`.
pub struct AdaptionLayout {
    track: Track,
    min: f64,
    max: f64,
    elements: LayoutBase,
}

impl AdaptionLayout {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            track: Track { orientation, ..Default::default() },
            min: 0.0,
            max: f64::INFINITY,
            elements: LayoutBase::new(),
        }
    }

    pub fn from_settings(settings: &DistributionSettings) -> Self {
        Self::new(settings.orientation)
            .origin(settings.origin)
            .border(settings.border)
            .gap(settings.gap)
            .separator_width(settings.separator_width)
            .min(settings.min)
            .max(settings.max_extent())
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

    pub fn min(mut self, min: f64) -> Self {
        self.min = min;
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = max;
        self
    }

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

    /// The extent each non-separator element receives inside `rect`.
    pub fn extent(&self, rect: &Rect) -> f64 {
        let separators = self.elements.separator_count();
        let flexible = self.elements.len() - separators;
        if flexible == 0 {
            return 0.0;
        }
        let space = self.track.flexible_space(rect, self.elements.len(), separators);
        clamp_extent(space / flexible as f64, self.min, self.max).max(0.0)
    }

    pub fn places(&self, rect: Rect) -> Vec<Rect> {
        let extents = self.elements.extents(self.track.separator_width, self.extent(&rect));
        distribute(rect, &self.track, &extents)
    }
}

impl Layout for AdaptionLayout {
    fn layout(&mut self, rect: Rect) {
        let places = self.places(rect);
        trace!(?rect, count = places.len(), "adaption layout");
        self.elements.place_all(places);
    }
}
