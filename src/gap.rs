// Copyright 2025 Lars Brubaker
// License: MIT
//
// Gap filling: sections no ring passes through are either wholly inside the
// polygon or wholly outside it. The inside ones get a full-section square.

use log::debug;

use crate::fragment::{Fragment, SectionMap};
use crate::geom::{point_in_polygon, Ring};
use crate::grid::{SectionGrid, SectionId};

fn full_section(grid: &SectionGrid, section: SectionId) -> Fragment {
    Fragment::new(section, true, grid.section_bounds(section).square())
}

/// Gives every section that holds only closed holes the full section as its
/// outer ring. No outer boundary passes through such a section, so the
/// section lies inside the polygon.
pub fn enclose_orphan_holes(grid: &SectionGrid, map: &mut SectionMap) -> usize {
    let mut added = 0;
    for (&section, group) in map.iter_mut() {
        if !group.is_empty() && !group.has_outer() {
            group.insert_outer(full_section(grid, section));
            added += 1;
        }
    }
    added
}

/// Adds a full-section square for every untouched section inside the bounding
/// box of the touched ones whose centroid lies inside `polygon`. New sections
/// are appended to the map in column order (i, then j).
pub fn add_inner_squares(grid: &SectionGrid, map: &mut SectionMap, polygon: &[Ring]) -> usize {
    let mut keys = map.keys();
    let Some(&first) = keys.next() else {
        return 0;
    };
    let (lo, hi) = keys.fold((first, first), |(lo, hi), id| {
        (
            SectionId::new(lo.i.min(id.i), lo.j.min(id.j)),
            SectionId::new(hi.i.max(id.i), hi.j.max(id.j)),
        )
    });

    let mut added = 0;
    for i in lo.i..=hi.i {
        for j in lo.j..=hi.j {
            let section = SectionId::new(i, j);
            if map.contains_key(&section) {
                continue;
            }
            let probe = grid.section_bounds(section).centroid();
            if point_in_polygon(&probe, polygon) {
                map.entry(section)
                    .or_default()
                    .insert_outer(full_section(grid, section));
                added += 1;
            }
        }
    }
    if added > 0 {
        debug!("filled {} interior sections between {} and {}", added, lo, hi);
    }
    added
}
