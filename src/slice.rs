// Copyright 2025 Lars Brubaker
// License: MIT
//
// Ring slicing: walks a ring's edges, cuts every edge where it crosses a grid
// line and collects the resulting open fragments per section.

use indexmap::IndexMap;
use log::trace;

use crate::fragment::Fragment;
use crate::geom::{line_intersect, vert_eq, Point, Real};
use crate::grid::{SectionGrid, SectionId};

/// The fragments cut from one ring, per section, in the order they were cut.
pub type RingFragments = IndexMap<SectionId, Vec<Fragment>>;

#[inline]
fn clamp_between(v: Real, a: Real, b: Real) -> Real {
    v.max(a.min(b)).min(a.max(b))
}

/// Every point where the edge (p1, p2) crosses a grid line between the
/// sections of its two endpoints, ordered by distance from p1.
///
/// The grid-line coordinate of each crossing is taken verbatim from the grid,
/// so crossings compare exactly against section bounds. The other coordinate
/// is kept within the edge's bounding box.
pub fn crossings(grid: &SectionGrid, p1: &Point, p2: &Point) -> Vec<Point> {
    let a = grid.section_of(p1);
    let b = grid.section_of(p2);
    let (bottom, top) = (a.j.min(b.j), a.j.max(b.j));
    let (left, right) = (a.i.min(b.i), a.i.max(b.i));
    let extent = grid.extent();

    let mut points = Vec::with_capacity((top - bottom + right - left) as usize);
    for j in bottom + 1..=top {
        let t = grid.to_coord(j);
        let hit = line_intersect(p1, p2, &Point::new(0.0, t), &Point::new(extent, t));
        points.push(Point::new(clamp_between(hit.s, p1.s, p2.s), t));
    }
    for i in left + 1..=right {
        let s = grid.to_coord(i);
        let hit = line_intersect(p1, p2, &Point::new(s, 0.0), &Point::new(s, extent));
        points.push(Point::new(s, clamp_between(hit.t, p1.t, p2.t)));
    }

    // Distance order keeps the ring's winding across the crossed sections.
    points.sort_by(|x, y| p1.dist(x).total_cmp(&p1.dist(y)));
    points
}

/// A finished fragment whose points all coincide: the ring only touched a
/// grid line without entering the section.
fn is_touch_only(fragment: &Fragment) -> bool {
    match fragment.first() {
        Some(first) => fragment.points().iter().all(|p| vert_eq(p, first)),
        None => true,
    }
}

/// Stores a finished fragment unless it is touch-only. The ring's first
/// stored fragment is remembered in `head`.
fn store(
    out: &mut RingFragments,
    head: &mut Option<(SectionId, usize)>,
    first: bool,
    finished: Fragment,
) {
    if is_touch_only(&finished) {
        trace!("dropping touch-only fragment in section {}", finished.section);
        return;
    }
    let list = out.entry(finished.section).or_default();
    if first {
        *head = Some((finished.section, list.len()));
    }
    list.push(finished);
}

/// Cuts one ring into per-section fragments.
///
/// The closing edge is walked when the ring does not repeat its first point.
/// Fragments end where the ring crosses into another section and also where
/// a vertex lies on its own section's wall, so every fragment endpoint sits
/// on a wall. A ring that never reaches a wall, or an outer ring that never
/// leaves its section, comes back as a single closed fragment. Otherwise the
/// trailing fragment is spliced onto the front of the ring's first fragment
/// when both lie in the same section.
pub fn slice_ring(grid: &SectionGrid, ring: &[Point], outer: bool) -> RingFragments {
    let mut out = RingFragments::new();
    let Some(&start) = ring.first() else {
        return out;
    };
    let closed = ring.last().map_or(true, |last| vert_eq(&start, last));
    let walk = ring.iter().copied().skip(1).chain((!closed).then_some(start));

    // An outer ring inside one section already bounds that section's area;
    // it is kept whole and in input order even where it touches a wall.
    let home = grid.section_of(&start);
    if outer && ring.iter().all(|p| grid.section_of(p) == home) {
        let points = std::iter::once(start).chain(walk).collect();
        out.insert(home, vec![Fragment::new(home, outer, points)]);
        return out;
    }

    let mut current = Fragment::new(home, outer, vec![start]);
    // (section, position) of the ring's first fragment once it is stored
    let mut head: Option<(SectionId, usize)> = None;
    let mut crossed = false;
    let mut prev = start;

    for p in walk {
        let section = grid.section_of(&p);
        if section == current.section {
            current.push(p);
        } else {
            let hits = crossings(grid, &prev, &p);
            if let (Some(&entry), Some(&exit)) = (hits.first(), hits.last()) {
                // Stretches between consecutive crossings pass through
                // sections that hold neither endpoint.
                for pair in hits.windows(2) {
                    if vert_eq(&pair[0], &pair[1]) {
                        trace!("dropping zero-length crossing at ({}, {})", pair[0].s, pair[0].t);
                        continue;
                    }
                    let id = grid.section_of(&pair[0]).lower(grid.section_of(&pair[1]));
                    out.entry(id)
                        .or_default()
                        .push(Fragment::new(id, outer, pair.to_vec()));
                }

                current.push(entry);
                let next = Fragment::new(section, outer, vec![exit, p]);
                let finished = std::mem::replace(&mut current, next);
                store(&mut out, &mut head, !crossed, finished);
                crossed = true;
            } else {
                current.push(p);
            }
        }
        prev = p;

        if current.len() > 1 && grid.section_bounds(current.section).on_wall(&p) {
            let next = Fragment::new(current.section, outer, vec![p]);
            let finished = std::mem::replace(&mut current, next);
            store(&mut out, &mut head, !crossed, finished);
            crossed = true;
        }
    }

    match head {
        Some((id, index)) if crossed && id == current.section => {
            if let Some(slot) = out.get_mut(&id).and_then(|list| list.get_mut(index)) {
                let first = std::mem::replace(slot, current);
                slot.join(first);
            }
        }
        _ => store(&mut out, &mut head, false, current),
    }
    out
}
