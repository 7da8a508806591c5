// Copyright 2025 Lars Brubaker
// License: MIT
//
// The triangulator seam. Partitioning hands each section's outer ring and
// holes to a triangulator as one flat buffer and never looks inside it.

use crate::error::{EarclipError, Result};
use crate::geom::Real;

/// A planar triangulator for one outer ring followed by zero or more holes.
///
/// `vertices` holds `[s0, t0, s1, t1, ...]`; `hole_indices[k]` is the vertex
/// index where hole k begins. The result lists local vertex indices, three
/// per triangle, covering the outer ring minus the holes. Fewer than three
/// outer vertices yield no triangles.
pub trait Triangulator {
    fn triangulate(&self, vertices: &[Real], hole_indices: &[usize]) -> Result<Vec<usize>>;
}

impl<F> Triangulator for F
where
    F: Fn(&[Real], &[usize]) -> Result<Vec<usize>>,
{
    fn triangulate(&self, vertices: &[Real], hole_indices: &[usize]) -> Result<Vec<usize>> {
        self(vertices, hole_indices)
    }
}

/// Ear clipping through the `earcutr` crate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Earcut;

impl Triangulator for Earcut {
    fn triangulate(&self, vertices: &[Real], hole_indices: &[usize]) -> Result<Vec<usize>> {
        let outer_count = hole_indices.first().copied().unwrap_or(vertices.len() / 2);
        if outer_count < 3 {
            return Ok(Vec::new());
        }
        earcutr::earcut(vertices, hole_indices, 2)
            .map_err(|e| EarclipError::Triangulation(format!("{:?}", e)))
    }
}
