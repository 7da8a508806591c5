// Copyright 2025 Lars Brubaker
// License: MIT
//
// Outer/hole bookkeeping per section: merging each ring's fragments into the
// section map, ordering stitched groups, and pairing holes with the outer
// ring that encloses them.

use log::trace;

use crate::fragment::{Fragment, SectionGroup, SectionMap};
use crate::geom::{point_in_ring, Point};
use crate::grid::SectionId;
use crate::slice::RingFragments;

/// One closed outer ring of a section and the holes it encloses.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionPolygon {
    pub section: SectionId,
    pub outer: Vec<Point>,
    pub holes: Vec<Vec<Point>>,
}

impl SectionPolygon {
    /// The outer ring followed by the holes.
    pub fn rings(&self) -> impl Iterator<Item = &[Point]> {
        std::iter::once(self.outer.as_slice()).chain(self.holes.iter().map(Vec::as_slice))
    }
}

/// Adds one ring's fragments to the section map. Outer fragments go in front
/// of the holes already present, holes go to the back.
pub fn merge_ring(map: &mut SectionMap, ring: RingFragments) {
    for (section, fragments) in ring {
        let group = map.entry(section).or_default();
        for fragment in fragments {
            if fragment.outer {
                group.insert_outer(fragment);
            } else {
                group.push_hole(fragment);
            }
        }
    }
}

/// Cleans a stitched group and puts its outer rings first, keeping the
/// relative order within outers and within holes.
pub fn settle(fragments: Vec<Fragment>) -> Vec<Fragment> {
    let (mut outers, mut holes): (Vec<Fragment>, Vec<Fragment>) = fragments
        .into_iter()
        .map(|mut f| {
            f.dedup();
            f
        })
        .filter(|f| {
            let keep = f.ring().len() >= 3;
            if !keep {
                trace!("dropping degenerate ring in section {}", f.section);
            }
            keep
        })
        .partition(|f| f.outer);
    outers.append(&mut holes);
    outers
}

/// Splits a group into outer rings with their holes. Each hole goes to the
/// first outer ring containing the hole's first vertex, or to the first outer
/// ring when none does.
pub fn section_polygons(section: SectionId, group: &SectionGroup) -> Vec<SectionPolygon> {
    let mut polygons: Vec<SectionPolygon> = group
        .outers()
        .map(|f| SectionPolygon {
            section,
            outer: f.ring().to_vec(),
            holes: Vec::new(),
        })
        .collect();
    if polygons.is_empty() {
        if group.holes().next().is_some() {
            trace!("section {} has holes but no outer ring", section);
        }
        return polygons;
    }

    for hole in group.holes() {
        let ring = hole.ring();
        let owner = ring
            .first()
            .and_then(|probe| polygons.iter().position(|p| point_in_ring(probe, &p.outer)))
            .unwrap_or(0);
        polygons[owner].holes.push(ring.to_vec());
    }
    polygons
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(points: &[(f64, f64)], outer: bool) -> Fragment {
        Fragment::new(
            SectionId::new(0, 0),
            outer,
            points.iter().map(|&p| Point::from(p)).collect(),
        )
    }

    fn square(min: f64, max: f64, outer: bool) -> Fragment {
        frag(&[(min, min), (max, min), (max, max), (min, max), (min, min)], outer)
    }

    #[test]
    fn merge_keeps_outer_first() {
        let mut map = SectionMap::new();
        let id = SectionId::new(0, 0);
        let mut hole_ring = RingFragments::new();
        hole_ring.insert(id, vec![square(1.0, 2.0, false)]);
        merge_ring(&mut map, hole_ring);
        let mut outer_ring = RingFragments::new();
        outer_ring.insert(id, vec![square(0.0, 4.0, true)]);
        merge_ring(&mut map, outer_ring);
        let flags: Vec<bool> = map[&id].fragments().iter().map(|f| f.outer).collect();
        assert_eq!(flags, vec![true, false]);
    }

    #[test]
    fn settle_orders_and_drops_degenerate() {
        let settled = settle(vec![
            square(1.0, 2.0, false),
            frag(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)], true),
            square(0.0, 4.0, true),
        ]);
        assert_eq!(settled.len(), 2);
        assert!(settled[0].outer);
        assert!(!settled[1].outer);
    }

    #[test]
    fn holes_follow_their_enclosing_outer() {
        let mut group = SectionGroup::default();
        group.insert_outer(square(0.0, 1.0, true));
        group.insert_outer(square(2.0, 4.0, true));
        group.push_hole(square(2.5, 3.0, false));
        let polygons = section_polygons(SectionId::new(0, 0), &group);
        assert_eq!(polygons.len(), 2);
        assert!(polygons[0].holes.is_empty());
        assert_eq!(polygons[1].holes.len(), 1);
        assert_eq!(polygons[1].outer.len(), 4);
        assert_eq!(polygons[1].rings().count(), 2);
    }

    #[test]
    fn holes_without_outer_produce_nothing() {
        let mut group = SectionGroup::default();
        group.push_hole(square(1.0, 2.0, false));
        assert!(section_polygons(SectionId::new(0, 0), &group).is_empty());
    }
}
