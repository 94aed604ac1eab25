use std::ops::{Add, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self { Self { x, y } }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point { Point::new(self.x + rhs.x, self.y + rhs.y) }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point { Point::new(self.x - rhs.x, self.y - rhs.y) }
}

impl Add<Size> for Point {
    type Output = Point;

    fn add(self, rhs: Size) -> Point { Point::new(self.x + rhs.width, self.y + rhs.height) }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self { Self { width, height } }

    pub fn is_empty(&self) -> bool { self.width <= 0.0 || self.height <= 0.0 }
}

/// Axis-aligned rectangle in local coordinates.
///
/// `width` and `height` are allowed to go negative while a layout is being
/// computed; [`Rect::normalized`] is applied before a rect reaches a placement
/// callback.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point { Point::new(self.x, self.y) }

    pub fn size(&self) -> Size { Size::new(self.width, self.height) }

    pub fn x2(&self) -> f64 { self.x + self.width }

    pub fn y2(&self) -> f64 { self.y + self.height }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn is_empty(&self) -> bool { self.size().is_empty() }

    /// Half-open containment: the leading edges are inside, the trailing edges are not.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x2() && p.y >= self.y && p.y < self.y2()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x2() && other.x < self.x2() && self.y < other.y2() && other.y < self.y2()
    }

    pub fn horizontal(&self) -> Range { Range::new(self.x, self.x2()) }

    pub fn vertical(&self) -> Range { Range::new(self.y, self.y2()) }

    /// Shrinks every side by `border`. The result may have a negative size.
    pub fn inset(&self, border: f64) -> Rect {
        Rect::new(
            self.x + border,
            self.y + border,
            self.width - border * 2.0,
            self.height - border * 2.0,
        )
    }

    pub fn normalized(&self) -> Rect {
        Rect::new(self.x, self.y, self.width.max(0.0), self.height.max(0.0))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Range {
    pub start: f64,
    pub end: f64,
}

impl Range {
    pub const fn new(start: f64, end: f64) -> Self { Self { start, end } }

    pub fn len(&self) -> f64 { self.end - self.start }

    pub fn is_empty(&self) -> bool { self.end <= self.start }

    pub fn contains(&self, v: f64) -> bool { v >= self.start && v < self.end }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_accessors() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.x2(), 40.0);
        assert_eq!(r.y2(), 60.0);
        assert_eq!(r.center(), Point::new(25.0, 40.0));
        assert_eq!(r.horizontal().len(), 30.0);
        assert_eq!(r.vertical(), Range::new(20.0, 60.0));
    }

    #[test]
    fn containment_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(9.9, 9.9)));
        assert!(!r.contains(Point::new(10.0, 5.0)));
        assert!(!Range::new(2.0, 2.0).contains(2.0));
    }

    #[test]
    fn inset_can_go_negative_until_normalized() {
        let r = Rect::new(0.0, 0.0, 10.0, 4.0).inset(3.0);
        assert_eq!(r, Rect::new(3.0, 3.0, 4.0, -2.0));
        assert_eq!(r.normalized(), Rect::new(3.0, 3.0, 4.0, 0.0));
    }

    #[test]
    fn point_arithmetic() {
        let p = Point::new(1.0, 2.0) + Size::new(3.0, 4.0);
        assert_eq!(p, Point::new(4.0, 6.0));
        assert_eq!(p - Point::new(1.0, 1.0), Point::new(3.0, 5.0));
        assert!(Rect::new(0.0, 0.0, 5.0, 5.0).intersects(&Rect::new(4.0, 4.0, 5.0, 5.0)));
    }
}
