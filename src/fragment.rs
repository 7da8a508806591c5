// Copyright 2025 Lars Brubaker
// License: MIT
//
// Fragments (pieces of a ring cut by the grid) and the per-section groups
// they are collected into.

use indexmap::IndexMap;

use crate::geom::{open_ring, vert_eq, Point, Real};
use crate::grid::SectionId;

/// An ordered polyline owned by one section. Open until stitched.
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    pub section: SectionId,
    pub outer: bool,
    points: Vec<Point>,
}

impl Fragment {
    pub fn new(section: SectionId, outer: bool, points: Vec<Point>) -> Self {
        Fragment {
            section,
            outer,
            points,
        }
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn first(&self) -> Option<&Point> {
        self.points.first()
    }

    #[inline]
    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    pub fn push(&mut self, p: Point) {
        self.points.push(p);
    }

    /// True once the fragment returns to its own first point.
    pub fn is_closed(&self) -> bool {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => self.points.len() > 1 && vert_eq(first, last),
            _ => false,
        }
    }

    /// Appends `other`'s points, merging the junction if the two ends meet.
    pub fn join(&mut self, other: Fragment) {
        let mut rest = other.points.into_iter().peekable();
        if let (Some(last), Some(next)) = (self.points.last(), rest.peek()) {
            if vert_eq(last, next) {
                rest.next();
            }
        }
        self.points.extend(rest);
    }

    /// Returns the fragment to its first point.
    pub fn close(&mut self) {
        if let Some(&first) = self.first() {
            if !self.is_closed() {
                self.points.push(first);
            }
        }
    }

    /// Direction of travel into the last point, from the last distinct point
    /// before it.
    pub fn heading_in(&self) -> Option<(Real, Real)> {
        let last = self.last()?;
        let before = self.points.iter().rev().find(|p| !vert_eq(p, last))?;
        Some((last.s - before.s, last.t - before.t))
    }

    /// Direction of travel out of the first point, toward the first distinct
    /// point after it.
    pub fn heading_out(&self) -> Option<(Real, Real)> {
        let first = self.first()?;
        let after = self.points.iter().find(|p| !vert_eq(p, first))?;
        Some((after.s - first.s, after.t - first.t))
    }

    /// Collapses runs of repeated points.
    pub fn dedup(&mut self) {
        self.points.dedup_by(|a, b| vert_eq(a, b));
    }

    /// The ring's distinct vertices (closing duplicate dropped).
    pub fn ring(&self) -> &[Point] {
        open_ring(&self.points)
    }
}

/// Closed fragments assigned to one section; outer rings come first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionGroup {
    fragments: Vec<Fragment>,
}

impl SectionGroup {
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Inserts an outer fragment after the existing outer fragments.
    pub fn insert_outer(&mut self, fragment: Fragment) {
        let at = self
            .fragments
            .iter()
            .position(|f| !f.outer)
            .unwrap_or(self.fragments.len());
        self.fragments.insert(at, fragment);
    }

    pub fn push_hole(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    pub fn has_outer(&self) -> bool {
        self.fragments.iter().any(|f| f.outer)
    }

    pub fn outers(&self) -> impl Iterator<Item = &Fragment> {
        self.fragments.iter().filter(|f| f.outer)
    }

    pub fn holes(&self) -> impl Iterator<Item = &Fragment> {
        self.fragments.iter().filter(|f| !f.outer)
    }

    pub(crate) fn take(&mut self) -> Vec<Fragment> {
        std::mem::take(&mut self.fragments)
    }

    pub(crate) fn replace(&mut self, fragments: Vec<Fragment>) {
        self.fragments = fragments;
    }
}

/// Section groups in insertion order.
pub type SectionMap = IndexMap<SectionId, SectionGroup>;
