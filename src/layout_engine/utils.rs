use crate::geometry::Rect;
use crate::layout_engine::{Orientation, Origin};

/// Parameters shared by every distribution layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Track {
    pub border: f64,
    pub gap: f64,
    pub separator_width: f64,
    pub orientation: Orientation,
    pub origin: Origin,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            border: 0.0,
            gap: 0.0,
            separator_width: 0.0,
            orientation: Orientation::Horizontal,
            origin: Origin::Start,
        }
    }
}

impl Track {
    /// Space left on the primary axis once borders, gaps and separators are taken.
    pub fn flexible_space(&self, rect: &Rect, count: usize, separators: usize) -> f64 {
        let gaps = count.saturating_sub(1) as f64 * self.gap;
        self.orientation.len(rect)
            - self.border * 2.0
            - gaps
            - separators as f64 * self.separator_width
    }
}

/// `max(min(v, hi), lo)` without `f64::clamp`'s panic on `lo > hi`.
pub fn clamp_extent(v: f64, lo: f64, hi: f64) -> f64 { v.max(lo).min(hi) }

/// Lays `extents` out consecutively along the track's axis.
///
/// Extents are consumed in order. The returned rects are normalized.
pub fn distribute(rect: Rect, track: &Track, extents: &[f64]) -> Vec<Rect> {
    let axis = track.orientation;
    let cross = axis.cross();
    let cross_pos = cross.pos(&rect) + track.border;
    let cross_len = (cross.len(&rect) - track.border * 2.0).max(0.0);

    let mut out = Vec::with_capacity(extents.len());
    match track.origin {
        Origin::Start => {
            let mut pos = axis.pos(&rect) + track.border;
            for &extent in extents {
                let extent = extent.max(0.0);
                out.push(axis.rect(pos, extent, cross_pos, cross_len));
                pos += extent + track.gap;
            }
        }
        Origin::End => {
            let mut pos = axis.end(&rect) - track.border;
            for &extent in extents {
                let extent = extent.max(0.0);
                pos -= extent;
                out.push(axis.rect(pos, extent, cross_pos, cross_len));
                pos -= track.gap;
            }
        }
    }
    out
}
