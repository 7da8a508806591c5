// Copyright 2025 Lars Brubaker
// License: MIT
//
// Mesh output: flattening section polygons into triangulator input, and
// concatenating per-section triangles into one indexed mesh.

use std::collections::HashMap;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::classify::SectionPolygon;
use crate::error::{EarclipError, Result};
use crate::geom::{open_ring, triangle_signed_area, Point, Real};
use crate::triangulate::Triangulator;

/// An indexed triangle mesh. `vertices` holds `[s0, t0, s1, t1, ...]` and
/// `indices` holds three vertex indices per triangle.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Mesh {
    pub vertices: Vec<Real>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 2
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The vertex at `index`, ignoring any offset baked into the indices.
    pub fn vertex(&self, index: usize) -> Point {
        Point::new(self.vertices[index * 2], self.vertices[index * 2 + 1])
    }

    /// Triangle corners, resolved against `offset` (the value every index was
    /// shifted by when the mesh was built).
    pub fn triangles(&self, offset: u32) -> impl Iterator<Item = [Point; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            [
                self.vertex((tri[0] - offset) as usize),
                self.vertex((tri[1] - offset) as usize),
                self.vertex((tri[2] - offset) as usize),
            ]
        })
    }

    /// Total unsigned triangle area.
    pub fn area(&self, offset: u32) -> Real {
        self.triangles(offset)
            .map(|[a, b, c]| triangle_signed_area(&a, &b, &c).abs())
            .sum()
    }

    /// Appends `other`, shifting its indices past this mesh's vertices.
    /// Fails, leaving this mesh unchanged, when a shifted index passes
    /// `u32::MAX`.
    pub fn append(&mut self, other: Mesh) -> Result<()> {
        let base = self.vertex_count();
        let indices = other
            .indices
            .into_iter()
            .map(|i| shift(i as usize + base, 0))
            .collect::<Result<Vec<_>>>()?;
        self.vertices.extend(other.vertices);
        self.indices.extend(indices);
        Ok(())
    }

    /// Shifts every index by `offset`. Fails when a shifted index passes
    /// `u32::MAX`.
    pub fn with_offset(mut self, offset: u32) -> Result<Self> {
        if offset != 0 {
            for index in &mut self.indices {
                *index = shift(*index as usize, offset)?;
            }
        }
        Ok(self)
    }
}

/// `index + offset` as an output index.
fn shift(index: usize, offset: u32) -> Result<u32> {
    u32::try_from(index)
        .ok()
        .and_then(|i| i.checked_add(offset))
        .ok_or_else(|| {
            EarclipError::InvalidOptions(format!(
                "vertex index {} with offset {} does not fit in u32",
                index, offset
            ))
        })
}

/// Concatenates rings into a flat `[s, t, ...]` buffer, dropping each ring's
/// closing duplicate. The second result holds the starting vertex index of
/// every ring after the first.
pub fn flatten<'a, I>(rings: I) -> (Vec<Real>, Vec<usize>)
where
    I: IntoIterator<Item = &'a [Point]>,
{
    let mut vertices = Vec::new();
    let mut hole_indices = Vec::new();
    for (k, ring) in rings.into_iter().enumerate() {
        if k > 0 {
            hole_indices.push(vertices.len() / 2);
        }
        for p in open_ring(ring) {
            vertices.push(p.s);
            vertices.push(p.t);
        }
    }
    (vertices, hole_indices)
}

#[inline]
fn vertex_at(vertices: &[Real], index: usize) -> Point {
    Point::new(vertices[index * 2], vertices[index * 2 + 1])
}

/// Bisects the longest edge of every triangle until no edge exceeds
/// `max_len`. Midpoints are shared through `midpoints`, so two triangles
/// splitting the same edge reference one new vertex. Winding is preserved.
fn split_long_edges(vertices: &mut Vec<Real>, indices: &[usize], max_len: Real) -> Vec<usize> {
    let mut midpoints: HashMap<(usize, usize), usize> = HashMap::new();
    let mut stack: Vec<[usize; 3]> = indices
        .chunks_exact(3)
        .rev()
        .map(|tri| [tri[0], tri[1], tri[2]])
        .collect();
    let mut out = Vec::with_capacity(indices.len());

    while let Some(tri) = stack.pop() {
        let mut longest = 0;
        let mut longest_len = 0.0;
        for k in 0..3 {
            let len = vertex_at(vertices, tri[k]).dist(&vertex_at(vertices, tri[(k + 1) % 3]));
            if len > longest_len {
                longest = k;
                longest_len = len;
            }
        }
        if longest_len <= max_len {
            out.extend_from_slice(&tri);
            continue;
        }

        let a = tri[longest];
        let b = tri[(longest + 1) % 3];
        let c = tri[(longest + 2) % 3];
        let mid = vertex_at(vertices, a).midpoint(&vertex_at(vertices, b));
        let m = *midpoints.entry((a.min(b), a.max(b))).or_insert_with(|| {
            vertices.push(mid.s);
            vertices.push(mid.t);
            vertices.len() / 2 - 1
        });
        stack.push([m, b, c]);
        stack.push([a, m, c]);
    }
    out
}

/// Triangulates section polygons one at a time and appends the results to a
/// single mesh with a running vertex offset.
pub struct MeshAssembler<'a, T: Triangulator + ?Sized> {
    triangulator: &'a T,
    max_edge_length: Option<Real>,
    mesh: Mesh,
}

impl<'a, T: Triangulator + ?Sized> MeshAssembler<'a, T> {
    pub fn new(triangulator: &'a T) -> Self {
        MeshAssembler {
            triangulator,
            max_edge_length: None,
            mesh: Mesh::new(),
        }
    }

    pub fn with_max_edge_length(mut self, max_edge_length: Option<Real>) -> Self {
        self.max_edge_length = max_edge_length;
        self
    }

    pub fn add(&mut self, polygon: &SectionPolygon) -> Result<()> {
        let (mut vertices, hole_indices) = flatten(polygon.rings());
        let local = self.triangulator.triangulate(&vertices, &hole_indices)?;

        let count = vertices.len() / 2;
        if local.len() % 3 != 0 {
            return Err(EarclipError::Triangulation(format!(
                "section {}: {} indices is not a whole number of triangles",
                polygon.section,
                local.len()
            )));
        }
        if let Some(&bad) = local.iter().find(|&&i| i >= count) {
            return Err(EarclipError::Triangulation(format!(
                "section {}: index {} out of range for {} vertices",
                polygon.section, bad, count
            )));
        }

        let local = match self.max_edge_length {
            Some(max_len) => split_long_edges(&mut vertices, &local, max_len),
            None => local,
        };

        let base = self.mesh.vertex_count();
        let indices = local
            .into_iter()
            .map(|i| shift(base + i, 0))
            .collect::<Result<Vec<_>>>()?;
        self.mesh.vertices.extend_from_slice(&vertices);
        self.mesh.indices.extend(indices);
        Ok(())
    }

    /// The assembled mesh with every index shifted by `offset`.
    pub fn finish(self, offset: u32) -> Result<Mesh> {
        self.mesh.with_offset(offset)
    }
}
