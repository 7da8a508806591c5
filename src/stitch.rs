// Copyright 2025 Lars Brubaker
// License: MIT
//
// Section stitching: closes open fragments into rings by walking the section
// boundary counter-clockwise from a fragment's last point, picking up section
// corners, until the walk reaches a fragment start.
//
// Walk state is (wall, searching | closed). From `searching` the walk either
// finds a reachable start on the current wall, or appends the corner at the
// end of the wall and moves to the next wall. Reaching the fragment's own
// start closes it; reaching another fragment's start splices that fragment on
// and searches again from its end.
//
// A start lying exactly at the walk's tip competes with the wall itself. It is
// taken only when leaving through it turns at least as far left as going on
// along the wall.

use std::collections::VecDeque;
use std::f64::consts::PI;

use log::trace;

use crate::error::{EarclipError, Result};
use crate::fragment::Fragment;
use crate::geom::{Point, Real};
use crate::grid::{Bounds, SectionGrid, SectionId, Wall};

const CORNER_HOP_MARGIN: usize = 1;

/// Corners a single search may append before the input is declared
/// self-intersecting. Four corners bring the walk back to its starting wall.
pub const MAX_CORNER_HOPS: usize = Wall::COUNT + CORNER_HOP_MARGIN;

/// Turns closer than this count as equal.
const TURN_EPSILON: Real = 1e-9;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Start {
    Own,
    Pending(usize),
}

/// Signed turn from heading `from` to heading `to`, in (-π, π]. Positive
/// turns left.
fn turn(from: (Real, Real), to: (Real, Real)) -> Real {
    let cross = from.0 * to.1 - from.1 * to.0;
    let dot = from.0 * to.0 + from.1 * to.1;
    let angle = cross.atan2(dot);
    if angle <= -PI {
        PI
    } else {
        angle
    }
}

/// The start point reachable from `tip` along `wall` that lies closest to it.
/// Ties keep the earlier candidate, the fragment's own start first; starts at
/// the tip itself are ordered by how far left they turn.
fn nearest_start(
    fragment: &Fragment,
    pending: &VecDeque<Fragment>,
    wall: Wall,
    tip: &Point,
) -> Option<Start> {
    let heading = fragment.heading_in();
    let own = std::iter::once(fragment).map(|f| (Start::Own, f));
    let others = pending
        .iter()
        .enumerate()
        .map(|(i, f)| (Start::Pending(i), f));

    // (distance along the wall, negated turn, start)
    let mut best: Option<(Real, Real, Start)> = None;
    for (start, candidate) in own.chain(others) {
        let Some(p) = candidate.first() else {
            continue;
        };
        if !wall.reaches(tip, p) {
            continue;
        }
        let d = (p.s + p.t - tip.s - tip.t).abs();
        let mut rank = 0.0;
        if d == 0.0 {
            if let (Some(heading), Some(out)) = (heading, candidate.heading_out()) {
                let leaving = turn(heading, out);
                if leaving < turn(heading, wall.heading()) - TURN_EPSILON {
                    continue;
                }
                rank = -leaving;
            }
        }
        let better = best.map_or(true, |(best_d, best_rank, _)| {
            d < best_d || (d == best_d && rank < best_rank - TURN_EPSILON)
        });
        if better {
            best = Some((d, rank, start));
        }
    }
    best.map(|(_, _, start)| start)
}

/// Walks the section boundary from the fragment's end until it closes.
/// Returns whether the closed ring encloses section area: it picked up a
/// corner or took in a piece of an outer ring.
fn close_fragment(
    bounds: &Bounds,
    section: SectionId,
    fragment: &mut Fragment,
    pending: &mut VecDeque<Fragment>,
) -> Result<bool> {
    let mut encloses = false;
    loop {
        let Some(&last) = fragment.last() else {
            return Ok(encloses);
        };
        let mut tip = last;
        let mut wall = bounds.wall_of(&tip);
        let mut hops = 0;

        let start = loop {
            if let Some(start) = nearest_start(fragment, pending, wall, &tip) {
                break start;
            }
            if hops == MAX_CORNER_HOPS {
                return Err(EarclipError::SelfIntersectingInput { section, hops });
            }
            tip = bounds.corner_after(wall);
            fragment.push(tip);
            wall = wall.next_ccw();
            hops += 1;
            encloses = true;
            trace!("section {}: corner ({}, {}), now on {:?} wall", section, tip.s, tip.t, wall);
        };

        match start {
            Start::Own => {
                fragment.close();
                return Ok(encloses);
            }
            Start::Pending(index) => {
                if let Some(next) = pending.remove(index) {
                    encloses |= next.outer;
                    fragment.join(next);
                }
            }
        }
    }
}

/// Closes every open fragment of one section.
///
/// Fragments are taken from a worklist in order; a fragment spliced onto
/// another leaves the worklist. A closed fragment that starts on a wall was
/// cut where its ring touches the boundary, so it is walked like an open one
/// and may take in the section boundary around the touch. Other closed
/// fragments pass through untouched.
///
/// A fragment whose closing picked up a corner or an outer piece encloses
/// area in this section and comes back flagged outer, even when it was cut
/// from a hole. Hole pieces that close among themselves stay holes.
pub fn stitch_section(
    grid: &SectionGrid,
    section: SectionId,
    fragments: Vec<Fragment>,
) -> Result<Vec<Fragment>> {
    let bounds = grid.section_bounds(section);
    let mut pending: VecDeque<Fragment> = fragments.into();
    let mut done = Vec::with_capacity(pending.len());

    while let Some(mut fragment) = pending.pop_front() {
        let touches = fragment.first().map_or(false, |p| bounds.on_wall(p));
        if (!fragment.is_closed() || touches)
            && close_fragment(&bounds, section, &mut fragment, &mut pending)?
        {
            fragment.outer = true;
        }
        done.push(fragment);
    }
    Ok(done)
}
