//! 2D geometry primitives
//!
//! Points, segments and boxes shared by every coordinate space. All values
//! are plain `f64`; which space a value lives in is up to the caller.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Determinants (and squared lengths) below this are treated as zero.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// A point or vector in 2D
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product.
    pub fn cross(&self, other: &Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Unit vector in the same direction, `None` for a zero vector.
    pub fn normalized(&self) -> Option<Point> {
        let len = self.length();
        if len < GEOMETRY_EPSILON || !len.is_finite() {
            return None;
        }
        Some(Point::new(self.x / len, self.y / len))
    }

    /// Counter-clockwise perpendicular (left normal in a Y-up frame).
    pub fn perpendicular(&self) -> Point {
        Point::new(-self.y, self.x)
    }

    /// Rotate about the origin by `radians`, counter-clockwise.
    pub fn rotated(&self, radians: f64) -> Point {
        let (s, c) = radians.sin_cos();
        Point::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// Result of a point-to-segment query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLineDistance {
    /// Euclidean distance from the query point to the segment
    pub distance: f64,
    /// Closest point on the segment
    pub closest_point: Point,
    /// Clamped segment parameter of `closest_point` (0 = start, 1 = end)
    pub t: f64,
}

/// A straight segment between two points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn delta(&self) -> Point {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn midpoint(&self) -> Point {
        self.start.midpoint(&self.end)
    }

    /// Unit direction from start to end, `None` when degenerate.
    pub fn direction(&self) -> Option<Point> {
        self.delta().normalized()
    }

    pub fn is_degenerate(&self) -> bool {
        self.delta().dot(&self.delta()) < GEOMETRY_EPSILON
    }

    /// Closest point on the segment by projection, with the parameter clamped to [0, 1].
    pub fn distance_to_point(&self, p: Point) -> PointLineDistance {
        let d = self.delta();
        let l2 = d.dot(&d);
        let t = if l2 < GEOMETRY_EPSILON {
            0.0
        } else {
            ((p - self.start).dot(&d) / l2).clamp(0.0, 1.0)
        };
        let closest_point = self.start.lerp(&self.end, t);
        PointLineDistance {
            distance: p.distance_to(&closest_point),
            closest_point,
            t,
        }
    }

    /// Intersection of the two infinite lines through the segments.
    ///
    /// Returns `None` when the lines are parallel (|det| below [`GEOMETRY_EPSILON`]).
    pub fn line_intersection(&self, other: &Segment) -> Option<Point> {
        self.intersection_params(other)
            .map(|(t, _)| self.start + self.delta() * t)
    }

    /// Intersection point that lies on both segments.
    pub fn segment_intersection(&self, other: &Segment) -> Option<Point> {
        const SLACK: f64 = 1e-9;
        let (t, u) = self.intersection_params(other)?;
        if (-SLACK..=1.0 + SLACK).contains(&t) && (-SLACK..=1.0 + SLACK).contains(&u) {
            Some(self.start + self.delta() * t)
        } else {
            None
        }
    }

    /// Determinant of the 2x2 system used by the intersection routines.
    pub fn determinant(&self, other: &Segment) -> f64 {
        self.delta().cross(&other.delta())
    }

    fn intersection_params(&self, other: &Segment) -> Option<(f64, f64)> {
        let r = self.delta();
        let s = other.delta();
        let det = r.cross(&s);
        if det.abs() < GEOMETRY_EPSILON {
            return None;
        }
        let qp = other.start - self.start;
        Some((qp.cross(&s) / det, qp.cross(&r) / det))
    }

    /// Segment shifted by `distance` along its left normal.
    pub fn offset(&self, distance: f64) -> Option<Segment> {
        let n = self.direction()?.perpendicular();
        Some(Segment::new(
            self.start + n * distance,
            self.end + n * distance,
        ))
    }

    pub fn translate(&self, by: Point) -> Segment {
        Segment::new(self.start + by, self.end + by)
    }

    /// Angle of the segment in degrees, in (-180, 180].
    pub fn angle_degrees(&self) -> f64 {
        let d = self.delta();
        d.y.atan2(d.x).to_degrees()
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Box centred on `center` with the given size.
    pub fn from_center(center: Point, width: f64, height: f64) -> Self {
        let half = Point::new(width * 0.5, height * 0.5);
        Self::new(center - half, center + half)
    }

    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bbox = BoundingBox::new(first, first);
        for p in iter {
            bbox.expand(*p);
        }
        Some(bbox)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        self.min.midpoint(&self.max)
    }

    /// Grow to include `p`.
    pub fn expand(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Copy grown by `margin` on every side.
    pub fn inflate(&self, margin: f64) -> BoundingBox {
        let m = Point::new(margin, margin);
        BoundingBox::new(self.min - m, self.max + m)
    }

    pub fn translate(&self, by: Point) -> BoundingBox {
        BoundingBox::new(self.min + by, self.max + by)
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

/// Rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_point_clamps() {
        let seg = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let inside = seg.distance_to_point(Point::new(4.0, 3.0));
        assert!((inside.distance - 3.0).abs() < 1e-12);
        assert_eq!(inside.closest_point, Point::new(4.0, 0.0));

        let beyond = seg.distance_to_point(Point::new(13.0, 4.0));
        assert!((beyond.distance - 5.0).abs() < 1e-12);
        assert_eq!(beyond.t, 1.0);
    }

    #[test]
    fn test_degenerate_segment_distance() {
        let seg = Segment::new(Point::new(1.0, 1.0), Point::new(1.0, 1.0));
        let res = seg.distance_to_point(Point::new(4.0, 5.0));
        assert!((res.distance - 5.0).abs() < 1e-12);
        assert!(seg.is_degenerate());
        assert!(seg.direction().is_none());
    }

    #[test]
    fn test_intersections() {
        let a = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let b = Segment::new(Point::new(0.0, 10.0), Point::new(10.0, 0.0));
        let p = a.segment_intersection(&b).unwrap();
        assert!((p.x - 5.0).abs() < 1e-12 && (p.y - 5.0).abs() < 1e-12);

        let c = Segment::new(Point::new(20.0, 0.0), Point::new(30.0, -10.0));
        assert!(a.segment_intersection(&c).is_none());
        assert!(a.line_intersection(&c).is_some());

        let parallel = Segment::new(Point::new(0.0, 1.0), Point::new(10.0, 11.0));
        assert!(a.line_intersection(&parallel).is_none());
    }

    #[test]
    fn test_offset_goes_left() {
        let seg = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let up = seg.offset(5.0).unwrap();
        assert_eq!(up.start, Point::new(0.0, 5.0));
        assert_eq!(up.end, Point::new(10.0, 5.0));
    }

    #[test]
    fn test_bounding_box() {
        let pts = [
            Point::new(-2.0, 1.0),
            Point::new(4.0, -3.0),
            Point::new(0.0, 5.0),
        ];
        let bbox = BoundingBox::from_points(pts.iter()).unwrap();
        assert_eq!(bbox.width(), 6.0);
        assert_eq!(bbox.height(), 8.0);
        assert_eq!(bbox.center(), Point::new(1.0, 1.0));
        assert!(bbox.inflate(1.0).contains(Point::new(5.0, 6.0)));
        assert!(BoundingBox::from_points([].iter()).is_none());
    }
}
