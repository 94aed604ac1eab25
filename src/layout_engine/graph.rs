use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};

/// Primary axis of a distribution layout.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Which edge a distribution layout packs from.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    #[default]
    Start,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Orientation {
    pub fn cross(self) -> Orientation {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    pub fn point(self, p: Point) -> f64 {
        match self {
            Orientation::Horizontal => p.x,
            Orientation::Vertical => p.y,
        }
    }

    pub fn size(self, s: Size) -> f64 {
        match self {
            Orientation::Horizontal => s.width,
            Orientation::Vertical => s.height,
        }
    }

    pub fn pos(self, r: &Rect) -> f64 { self.point(r.origin()) }

    pub fn len(self, r: &Rect) -> f64 { self.size(r.size()) }

    pub fn end(self, r: &Rect) -> f64 { self.pos(r) + self.len(r) }

    pub fn set_pos(self, r: &mut Rect, v: f64) {
        match self {
            Orientation::Horizontal => r.x = v,
            Orientation::Vertical => r.y = v,
        }
    }

    pub fn set_len(self, r: &mut Rect, v: f64) {
        match self {
            Orientation::Horizontal => r.width = v,
            Orientation::Vertical => r.height = v,
        }
    }

    /// Builds a rect from coordinates along this axis and the cross axis.
    pub fn rect(self, pos: f64, len: f64, cross_pos: f64, cross_len: f64) -> Rect {
        match self {
            Orientation::Horizontal => Rect::new(pos, cross_pos, len, cross_len),
            Orientation::Vertical => Rect::new(cross_pos, pos, cross_len, len),
        }
    }
}

impl Edge {
    pub fn orientation(self) -> Orientation {
        match self {
            Edge::Left | Edge::Right => Orientation::Horizontal,
            Edge::Top | Edge::Bottom => Orientation::Vertical,
        }
    }

    pub fn opposite(self) -> Edge {
        match self {
            Edge::Left => Edge::Right,
            Edge::Right => Edge::Left,
            Edge::Top => Edge::Bottom,
            Edge::Bottom => Edge::Top,
        }
    }

    pub fn is_leading(self) -> bool { matches!(self, Edge::Left | Edge::Top) }

    pub fn coord(self, r: &Rect) -> f64 {
        match self {
            Edge::Left => r.x,
            Edge::Right => r.x2(),
            Edge::Top => r.y,
            Edge::Bottom => r.y2(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_accessors_round_trip() {
        for o in [Orientation::Horizontal, Orientation::Vertical] {
            let mut r = o.rect(5.0, 10.0, 1.0, 2.0);
            assert_eq!(o.pos(&r), 5.0);
            assert_eq!(o.len(&r), 10.0);
            assert_eq!(o.cross().pos(&r), 1.0);
            assert_eq!(o.cross().len(&r), 2.0);
            o.set_pos(&mut r, 7.0);
            o.set_len(&mut r, 3.0);
            assert_eq!(o.end(&r), 10.0);
        }
    }

    #[test]
    fn edges() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(Edge::Right.coord(&r), 4.0);
        assert_eq!(Edge::Bottom.coord(&r), 6.0);
        assert_eq!(Edge::Top.opposite(), Edge::Bottom);
        assert_eq!(Edge::Left.orientation(), Orientation::Horizontal);
        assert!(!Edge::Bottom.is_leading());
    }
}
