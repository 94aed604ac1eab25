pub mod element;
pub(crate) mod graph;
pub mod systems;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub use element::{ElementKey, LayoutBase, LayoutElement, PlaceFn};
pub use graph::{Edge, Orientation, Origin};
pub use systems::{
    AdaptionLayout, AttachLayout, Attachment, BorderLayout, BorderPlaces, BorderPolicy,
    HeaderLayout, Layout, LineupLayout, Pane, Region, Relation, SplitOrientation, SplitView,
    Splitter, WeightElement, WeightedLayout,
};
