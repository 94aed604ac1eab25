use bitflags::bitflags;
use tracing::{trace, warn};

use crate::common::collections::HashMap;
use crate::geometry::Rect;
use crate::layout_engine::Edge;
use crate::model::arena::{ElementArena, ElementId};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Relation {
    /// Offset in pixels from the source edge.
    Fixed(f64),
    /// Offset as a fraction of the source's extent along the edge's axis.
    Relative(f64),
}

/// Places `target_edge` of `target` relative to `source_edge` of `source`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attachment {
    pub target: ElementId,
    pub target_edge: Edge,
    pub source: ElementId,
    pub source_edge: Edge,
    pub relation: Relation,
}

impl Attachment {
    pub fn new(
        target: ElementId,
        target_edge: Edge,
        source: ElementId,
        source_edge: Edge,
        relation: Relation,
    ) -> Self {
        Self {
            target,
            target_edge,
            source,
            source_edge,
            relation,
        }
    }

    fn coord(&self, source: &Rect) -> f64 {
        let offset = match self.relation {
            Relation::Fixed(px) => px,
            Relation::Relative(fraction) => fraction * self.target_edge.orientation().len(source),
        };
        self.source_edge.coord(source) + offset
    }
}

bitflags! {
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    struct PinnedEdges: u8 {
        const LEFT   = 1 << 0;
        const RIGHT  = 1 << 1;
        const TOP    = 1 << 2;
        const BOTTOM = 1 << 3;
    }
}

impl From<Edge> for PinnedEdges {
    fn from(edge: Edge) -> Self {
        match edge {
            Edge::Left => PinnedEdges::LEFT,
            Edge::Right => PinnedEdges::RIGHT,
            Edge::Top => PinnedEdges::TOP,
            Edge::Bottom => PinnedEdges::BOTTOM,
        }
    }
}

struct TargetEntry {
    id: ElementId,
    rect: Rect,
    pinned: PinnedEdges,
}

impl TargetEntry {
    /// Moves one edge to `coord`. The rect keeps its size unless the opposite
    /// edge was already pinned in this pass, in which case it stretches.
    fn pin(&mut self, edge: Edge, coord: f64) {
        let axis = edge.orientation();
        let rect = &mut self.rect;
        if self.pinned.contains(edge.opposite().into()) {
            if edge.is_leading() {
                let end = axis.end(rect);
                axis.set_pos(rect, coord);
                axis.set_len(rect, end - coord);
            } else {
                let start = axis.pos(rect);
                axis.set_len(rect, coord - start);
            }
        } else if edge.is_leading() {
            axis.set_pos(rect, coord);
        } else {
            let len = axis.len(rect);
            axis.set_pos(rect, coord - len);
        }
        self.pinned.insert(edge.into());
    }
}

/// Edge-to-edge constraint layout solved in a single pass.
///
/// Attachments are evaluated in insertion order and are not sorted: an
/// attachment only sees another target's adjusted rect if that target's
/// attachments were added before it. Cycles and self-attachments are accepted
/// and give order-dependent results.
pub struct AttachLayout {
    root: ElementId,
    attachments: Vec<Attachment>,
}

impl AttachLayout {
    /// `root` is the container element; its place is the rect passed to `layout`.
    pub fn new(root: ElementId) -> Self {
        Self {
            root,
            attachments: Vec::new(),
        }
    }

    pub fn root(&self) -> ElementId { self.root }

    pub fn push(&mut self, attachment: Attachment) -> &mut Self {
        self.attachments.push(attachment);
        self
    }

    pub fn attach(
        &mut self,
        target: ElementId,
        target_edge: Edge,
        source: ElementId,
        source_edge: Edge,
        relation: Relation,
    ) -> &mut Self {
        self.push(Attachment::new(target, target_edge, source, source_edge, relation))
    }

    pub fn attachments(&self) -> &[Attachment] { &self.attachments }

    pub fn len(&self) -> usize { self.attachments.len() }

    pub fn is_empty(&self) -> bool { self.attachments.is_empty() }

    /// Computes every target's rect for a container at `rect`, in the order
    /// targets were first touched. Rects are normalized.
    pub fn solve(&self, arena: &ElementArena, rect: Rect) -> Vec<(ElementId, Rect)> {
        let mut entries: Vec<TargetEntry> = Vec::new();
        let mut index: HashMap<ElementId, usize> = HashMap::default();

        let current =
            |entries: &[TargetEntry], index: &HashMap<ElementId, usize>, id: ElementId| {
                if let Some(&i) = index.get(&id) {
                    Some(entries[i].rect)
                } else if id == self.root {
                    Some(rect)
                } else {
                    arena.place(id)
                }
            };

        for attachment in &self.attachments {
            let Some(source) = current(&entries, &index, attachment.source) else {
                warn!(?attachment.source, "attachment source is not in the arena");
                continue;
            };
            let i = match index.get(&attachment.target) {
                Some(&i) => i,
                None => {
                    let Some(seed) = current(&entries, &index, attachment.target) else {
                        warn!(?attachment.target, "attachment target is not in the arena");
                        continue;
                    };
                    index.insert(attachment.target, entries.len());
                    entries.push(TargetEntry {
                        id: attachment.target,
                        rect: seed,
                        pinned: PinnedEdges::empty(),
                    });
                    entries.len() - 1
                }
            };
            entries[i].pin(attachment.target_edge, attachment.coord(&source));
        }

        entries.into_iter().map(|e| (e.id, e.rect.normalized())).collect()
    }

    pub fn layout(&self, arena: &mut ElementArena, rect: Rect) {
        arena.set_place_silent(self.root, rect);
        let places = self.solve(arena, rect);
        trace!(?rect, targets = places.len(), "attach layout");
        for (id, place) in places {
            arena.set_place(id, place);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;
    use crate::layout_engine::testing::Recorder;

    const CONTAINER: Rect = Rect::new(5.0, 5.0, 400.0, 300.0);

    #[test]
    fn pins_left_edge_to_container() {
        let mut arena = ElementArena::new();
        let root = arena.insert(Rect::default());
        let a = arena.insert(Rect::new(0.0, 0.0, 50.0, 20.0));

        let mut layout = AttachLayout::new(root);
        layout.attach(a, Edge::Left, root, Edge::Left, Relation::Fixed(10.0));
        layout.layout(&mut arena, CONTAINER);

        let root_place = arena.place(root).unwrap();
        let a_place = arena.place(a).unwrap();
        assert_eq!(root_place, CONTAINER);
        assert_eq!(a_place.x, root_place.x + 10.0);
        assert_eq!(a_place.size(), Rect::new(0.0, 0.0, 50.0, 20.0).size());
    }

    #[test]
    fn insertion_order_changes_the_result() {
        let run = |reversed: bool| {
            let mut arena = ElementArena::new();
            let root = arena.insert(Rect::default());
            let a = arena.insert(Rect::new(0.0, 0.0, 50.0, 50.0));
            let b = arena.insert(Rect::new(0.0, 0.0, 20.0, 20.0));

            let mut attachments = vec![
                Attachment::new(a, Edge::Left, root, Edge::Left, Relation::Fixed(10.0)),
                Attachment::new(b, Edge::Left, a, Edge::Right, Relation::Fixed(5.0)),
            ];
            if reversed {
                attachments.reverse();
            }
            let mut layout = AttachLayout::new(root);
            for attachment in attachments {
                layout.push(attachment);
            }
            layout.layout(&mut arena, Rect::new(0.0, 0.0, 400.0, 300.0));
            (arena.place(a).unwrap(), arena.place(b).unwrap())
        };

        let (a, b) = run(false);
        assert_eq!(a.x, 10.0);
        assert_eq!(b.x, 65.0);

        let (a, b) = run(true);
        assert_eq!(a.x, 10.0);
        assert_eq!(b.x, 55.0);
    }

    #[test]
    fn opposite_edges_stretch_and_target_is_placed_once() {
        let log = Recorder::new();
        let mut arena = ElementArena::new();
        let root = arena.insert(Rect::default());
        let a = arena.insert_with(Rect::new(0.0, 0.0, 50.0, 20.0), log.sink());

        let mut layout = AttachLayout::new(root);
        layout
            .attach(a, Edge::Left, root, Edge::Left, Relation::Fixed(10.0))
            .attach(a, Edge::Right, root, Edge::Right, Relation::Fixed(-10.0))
            .attach(a, Edge::Bottom, root, Edge::Bottom, Relation::Fixed(-4.0));
        layout.layout(&mut arena, Rect::new(0.0, 0.0, 400.0, 300.0));

        assert_eq!(log.places(), vec![Rect::new(10.0, 276.0, 380.0, 20.0)]);
    }

    #[test]
    fn relative_offsets_scale_with_the_source() {
        let mut arena = ElementArena::new();
        let root = arena.insert(Rect::default());
        let a = arena.insert(Rect::new(0.0, 0.0, 10.0, 10.0));

        let mut layout = AttachLayout::new(root);
        layout
            .attach(a, Edge::Top, root, Edge::Top, Relation::Relative(0.5))
            .attach(a, Edge::Left, root, Edge::Left, Relation::Relative(0.25))
            .attach(a, Edge::Right, root, Edge::Right, Relation::Relative(-0.25));

        let places = layout.solve(&arena, Rect::new(0.0, 0.0, 400.0, 300.0));
        assert_eq!(places, vec![(a, Rect::new(100.0, 150.0, 200.0, 10.0))]);
    }

    #[test]
    fn inverted_constraints_collapse_to_zero_size() {
        let mut arena = ElementArena::new();
        let root = arena.insert(Rect::default());
        let a = arena.insert(Rect::new(0.0, 0.0, 10.0, 10.0));

        let mut layout = AttachLayout::new(root);
        layout
            .attach(a, Edge::Left, root, Edge::Left, Relation::Fixed(300.0))
            .attach(a, Edge::Right, root, Edge::Left, Relation::Fixed(100.0));
        layout.layout(&mut arena, Rect::new(0.0, 0.0, 400.0, 300.0));

        assert_eq!(arena.place(a), Some(Rect::new(300.0, 0.0, 0.0, 10.0)));
    }

    #[test]
    fn cycles_are_deterministic() {
        let mut arena = ElementArena::new();
        let root = arena.insert(Rect::default());
        let a = arena.insert(Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = arena.insert(Rect::new(50.0, 0.0, 10.0, 10.0));

        let mut layout = AttachLayout::new(root);
        layout
            .attach(a, Edge::Left, b, Edge::Right, Relation::Fixed(1.0))
            .attach(b, Edge::Left, a, Edge::Right, Relation::Fixed(1.0))
            .attach(a, Edge::Top, a, Edge::Bottom, Relation::Fixed(0.0));

        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let first = layout.solve(&arena, rect);
        assert_eq!(first, layout.solve(&arena, rect));
        assert_eq!(first, vec![
            (a, Rect::new(61.0, 10.0, 10.0, 10.0)),
            (b, Rect::new(72.0, 0.0, 10.0, 10.0)),
        ]);
    }

    #[test]
    fn unknown_handles_are_skipped() {
        let mut arena = ElementArena::new();
        let root = arena.insert(Rect::default());
        let gone = arena.insert(Rect::default());
        let a = arena.insert(Rect::new(0.0, 0.0, 10.0, 10.0));
        arena.remove(gone);

        let mut layout = AttachLayout::new(root);
        layout
            .attach(gone, Edge::Left, root, Edge::Left, Relation::Fixed(1.0))
            .attach(a, Edge::Left, gone, Edge::Left, Relation::Fixed(1.0))
            .attach(a, Edge::Top, root, Edge::Top, Relation::Fixed(7.0));

        let places = layout.solve(&arena, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(places, vec![(a, Rect::new(0.0, 7.0, 10.0, 10.0))]);
        assert_eq!(layout.len(), 3);
    }
}
