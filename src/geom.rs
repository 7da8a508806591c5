// Copyright 2025 Lars Brubaker
// License: MIT
//
// Pure geometric functions operating on (s, t) coordinates.
// Comparisons are exact on purpose: crossing points and section corners are
// produced from the same grid formulas, so equal coordinates compare equal.

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

pub type Real = f64;

/// A vertex in the partitioned coordinate space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Point {
    pub s: Real,
    pub t: Real,
}

impl Point {
    #[inline]
    pub const fn new(s: Real, t: Real) -> Self {
        Point { s, t }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn dist(&self, other: &Point) -> Real {
        let ds = self.s - other.s;
        let dt = self.t - other.t;
        (ds * ds + dt * dt).sqrt()
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.s.is_finite() && self.t.is_finite()
    }

    #[inline]
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new(self.s / 2.0 + other.s / 2.0, self.t / 2.0 + other.t / 2.0)
    }
}

impl From<[Real; 2]> for Point {
    fn from(p: [Real; 2]) -> Self {
        Point::new(p[0], p[1])
    }
}

impl From<(Real, Real)> for Point {
    fn from(p: (Real, Real)) -> Self {
        Point::new(p.0, p.1)
    }
}

impl From<Point> for [Real; 2] {
    fn from(p: Point) -> Self {
        [p.s, p.t]
    }
}

/// One boundary loop. The first point may or may not be repeated at the end.
pub type Ring = Vec<Point>;

/// Ring 0 is the outer boundary, the remaining rings are holes.
pub type Polygon = Vec<Ring>;

/// Returns true if u == v (exact equality).
#[inline]
pub fn vert_eq(u: &Point, v: &Point) -> bool {
    u.s == v.s && u.t == v.t
}

/// The ring without its duplicated closing point, if it has one.
pub fn open_ring(ring: &[Point]) -> &[Point] {
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if ring.len() > 1 && vert_eq(first, last) => {
            &ring[..ring.len() - 1]
        }
        _ => ring,
    }
}

/// Intersection of the infinite lines (p1, p2) and (p3, p4).
/// The lines must not be parallel; grid-line clipping never asks for that.
pub fn line_intersect(p1: &Point, p2: &Point, p3: &Point, p4: &Point) -> Point {
    let denom = (p4.t - p3.t) * (p2.s - p1.s) - (p4.s - p3.s) * (p2.t - p1.t);
    let ua = ((p4.s - p3.s) * (p1.t - p3.t) - (p4.t - p3.t) * (p1.s - p3.s)) / denom;
    Point::new(p1.s + ua * (p2.s - p1.s), p1.t + ua * (p2.t - p1.t))
}

/// Signed shoelace area; positive for counter-clockwise rings (t axis up).
pub fn ring_signed_area(ring: &[Point]) -> Real {
    let ring = open_ring(ring);
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += ring[i].s * ring[j].t - ring[j].s * ring[i].t;
    }
    area * 0.5
}

/// Signed area of triangle (a, b, c); positive when counter-clockwise.
#[inline]
pub fn triangle_signed_area(a: &Point, b: &Point, c: &Point) -> Real {
    0.5 * ((b.s - a.s) * (c.t - a.t) - (c.s - a.s) * (b.t - a.t))
}

/// Even-odd ray casting test. A duplicated closing point is ignored.
pub fn point_in_ring(p: &Point, ring: &[Point]) -> bool {
    let ring = open_ring(ring);
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (&ring[i], &ring[j]);
        if (a.t > p.t) != (b.t > p.t) && p.s < (b.s - a.s) * (p.t - a.t) / (b.t - a.t) + a.s {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Inside ring 0 and outside every other ring of `polygon`.
pub fn point_in_polygon(p: &Point, polygon: &[Ring]) -> bool {
    match polygon.split_first() {
        Some((outer, holes)) => {
            point_in_ring(p, outer) && !holes.iter().any(|hole| point_in_ring(p, hole))
        }
        None => false,
    }
}
