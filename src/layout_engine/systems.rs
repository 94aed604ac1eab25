use crate::geometry::Rect;

/// A layout positions its elements inside the rect its container hands it.
///
/// Containers call [`Layout::layout`] with their client rect whenever that
/// rect changes. Every registered element is placed exactly once per call.
pub trait Layout {
    fn layout(&mut self, rect: Rect);
}

mod adaption;
pub use adaption::AdaptionLayout;
mod lineup;
pub use lineup::LineupLayout;
mod weighted;
pub use weighted::{WeightElement, WeightedLayout};
pub mod split;
pub use split::{Pane, SplitOrientation, SplitView, Splitter};
pub mod attach;
pub use attach::{AttachLayout, Attachment, Relation};
mod border;
pub use border::{BorderLayout, BorderPlaces, BorderPolicy, HeaderLayout, Region};
