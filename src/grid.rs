// Copyright 2025 Lars Brubaker
// License: MIT
//
// Uniform section grid: maps coordinates to integer section indices and back.

use core::fmt;

use crate::geom::{Point, Real};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Grid cell index (i along s, j along t). Ordered by i, then j.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SectionId {
    pub i: i64,
    pub j: i64,
}

impl SectionId {
    #[inline]
    pub const fn new(i: i64, j: i64) -> Self {
        SectionId { i, j }
    }

    /// The section that is lower along both axes.
    #[inline]
    pub fn lower(self, other: SectionId) -> SectionId {
        SectionId::new(self.i.min(other.i), self.j.min(other.j))
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

/// Section bounds: left, bottom, right, top.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub left: Real,
    pub bottom: Real,
    pub right: Real,
    pub top: Real,
}

impl Bounds {
    pub fn as_array(&self) -> [Real; 4] {
        [self.left, self.bottom, self.right, self.top]
    }

    pub fn centroid(&self) -> Point {
        Point::new(
            self.left / 2.0 + self.right / 2.0,
            self.bottom / 2.0 + self.top / 2.0,
        )
    }

    /// The whole section as a closed ring:
    /// (left,bottom) → (left,top) → (right,top) → (right,bottom) → close.
    pub fn square(&self) -> Vec<Point> {
        vec![
            Point::new(self.left, self.bottom),
            Point::new(self.left, self.top),
            Point::new(self.right, self.top),
            Point::new(self.right, self.bottom),
            Point::new(self.left, self.bottom),
        ]
    }

    /// Whether the point lies on one of the section's walls.
    pub fn on_wall(&self, p: &Point) -> bool {
        p.s == self.left || p.s == self.right || p.t == self.bottom || p.t == self.top
    }

    /// The wall the point lies on. Corners resolve to the wall that leaves
    /// them counter-clockwise; a point on no wall resolves to the top wall.
    pub fn wall_of(&self, p: &Point) -> Wall {
        if p.s == self.left && p.t == self.top {
            Wall::Left
        } else if p.s == self.left && p.t == self.bottom {
            Wall::Bottom
        } else if p.s == self.right && p.t == self.bottom {
            Wall::Right
        } else if p.s == self.right && p.t == self.top {
            Wall::Top
        } else if p.s == self.left {
            Wall::Left
        } else if p.t == self.bottom {
            Wall::Bottom
        } else if p.s == self.right {
            Wall::Right
        } else {
            Wall::Top
        }
    }

    /// The corner reached by walking counter-clockwise along `wall`.
    pub fn corner_after(&self, wall: Wall) -> Point {
        match wall {
            Wall::Left => Point::new(self.left, self.bottom),
            Wall::Bottom => Point::new(self.right, self.bottom),
            Wall::Right => Point::new(self.right, self.top),
            Wall::Top => Point::new(self.left, self.top),
        }
    }
}

/// Section walls, numbered in counter-clockwise walking order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Wall {
    Left = 0,
    Bottom = 1,
    Right = 2,
    Top = 3,
}

impl Wall {
    pub const COUNT: usize = 4;

    pub fn next_ccw(self) -> Wall {
        match self {
            Wall::Left => Wall::Bottom,
            Wall::Bottom => Wall::Right,
            Wall::Right => Wall::Top,
            Wall::Top => Wall::Left,
        }
    }

    /// Unit direction of a counter-clockwise walk along this wall.
    pub fn heading(self) -> (Real, Real) {
        match self {
            Wall::Left => (0.0, -1.0),
            Wall::Bottom => (1.0, 0.0),
            Wall::Right => (0.0, 1.0),
            Wall::Top => (-1.0, 0.0),
        }
    }

    /// Whether `target` is reached from `from` by walking this wall
    /// counter-clockwise (down the left wall, right along the bottom, up the
    /// right wall, left along the top).
    pub fn reaches(self, from: &Point, target: &Point) -> bool {
        match self {
            Wall::Left => target.s == from.s && target.t <= from.t,
            Wall::Bottom => target.t == from.t && target.s >= from.s,
            Wall::Right => target.s == from.s && target.t >= from.t,
            Wall::Top => target.t == from.t && target.s <= from.s,
        }
    }
}

/// `division_count` equal sections per axis over `[0, extent]`.
///
/// The grid is an immutable value passed to every slicing call, so separate
/// partitions never share configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SectionGrid {
    divisions: u32,
    extent: Real,
}

impl SectionGrid {
    /// A `division_count` of 0 means a single section.
    pub fn new(division_count: u32, extent: Real) -> Self {
        SectionGrid {
            divisions: division_count.max(1),
            extent,
        }
    }

    #[inline]
    pub fn divisions(&self) -> u32 {
        self.divisions
    }

    #[inline]
    pub fn extent(&self) -> Real {
        self.extent
    }

    /// Coordinate of grid line `index`. The last line is exactly `extent`,
    /// so rings on the far edge stay on the last section's wall.
    #[inline]
    pub fn to_coord(&self, index: i64) -> Real {
        if index == self.divisions as i64 {
            return self.extent;
        }
        self.extent / self.divisions as Real * index as Real
    }

    /// Section index of a coordinate, clamped into the grid. The result
    /// always satisfies `to_coord(i) <= coord < to_coord(i + 1)` for
    /// coordinates inside the grid, even where the division rounds.
    pub fn to_section_index(&self, coord: Real) -> i64 {
        let last = self.divisions as i64 - 1;
        let mut index = (self.divisions as Real / self.extent * coord).floor() as i64;
        if index < last && self.to_coord(index + 1) <= coord {
            index += 1;
        }
        if index > 0 && self.to_coord(index) > coord {
            index -= 1;
        }
        index.clamp(0, last)
    }

    pub fn section_of(&self, p: &Point) -> SectionId {
        SectionId::new(self.to_section_index(p.s), self.to_section_index(p.t))
    }

    pub fn section_bounds(&self, id: SectionId) -> Bounds {
        Bounds {
            left: self.to_coord(id.i),
            bottom: self.to_coord(id.j),
            right: self.to_coord(id.i + 1),
            top: self.to_coord(id.j + 1),
        }
    }
}
