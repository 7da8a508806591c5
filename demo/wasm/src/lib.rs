// Copyright 2025 Lars Brubaker
// WASM bindings for sectioned-earclip

use sectioned_earclip::{Mesh, PartitionOptions, Partitioner, Point, Ring};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main_js() {
    console_error_panic_hook::set_once();
}

/// A stateful partitioner that accumulates rings (outer first, then holes)
/// and partitions them as one polygon.
#[wasm_bindgen]
pub struct PartitionerJs {
    rings: Vec<Ring>,
    mesh: Mesh,
    error: Option<String>,
}

#[wasm_bindgen]
impl PartitionerJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PartitionerJs {
        PartitionerJs {
            rings: Vec::new(),
            mesh: Mesh::new(),
            error: None,
        }
    }

    /// Add a ring from a flat [s0,t0, s1,t1, ...] Float64Array.
    pub fn add_ring(&mut self, vertices: &[f64]) {
        self.rings.push(to_ring(vertices));
    }

    pub fn clear(&mut self) {
        self.rings.clear();
        self.mesh = Mesh::new();
        self.error = None;
    }

    /// Partition and return true on success. A division count of 0 means a
    /// single section; `max_edge_length` <= 0 disables edge splitting.
    pub fn partition(&mut self, division_count: u32, extent: f64, max_edge_length: f64) -> bool {
        let mut options = PartitionOptions::new()
            .with_division_count(division_count)
            .with_extent(extent);
        if max_edge_length > 0.0 {
            options = options.with_max_edge_length(max_edge_length);
        }
        let result = Partitioner::new(options).and_then(|p| p.partition(&self.rings));
        match result {
            Ok(mesh) => {
                self.mesh = mesh;
                self.error = None;
                true
            }
            Err(e) => {
                self.mesh = Mesh::new();
                self.error = Some(e.to_string());
                false
            }
        }
    }

    /// Message of the last failed partition, if any.
    pub fn last_error(&self) -> Option<String> {
        self.error.clone()
    }

    pub fn triangle_count(&self) -> u32 {
        self.mesh.triangle_count() as u32
    }

    pub fn vertex_count(&self) -> u32 {
        self.mesh.vertex_count() as u32
    }

    /// Flat triangle vertex-index triples [i0,i1,i2, ...].
    pub fn get_indices(&self) -> Vec<u32> {
        self.mesh.indices.clone()
    }

    /// Flat vertex positions [s0,t0, s1,t1, ...] for the output mesh.
    pub fn get_vertices(&self) -> Vec<f64> {
        self.mesh.vertices.clone()
    }
}

impl Default for PartitionerJs {
    fn default() -> Self {
        Self::new()
    }
}

fn to_ring(vertices: &[f64]) -> Ring {
    vertices
        .chunks_exact(2)
        .map(|p| Point::new(p[0], p[1]))
        .collect()
}

/// Splits a flat vertex buffer into rings of `ring_lengths[k]` vertices.
fn to_rings(vertices: &[f64], ring_lengths: &[u32]) -> Vec<Ring> {
    let mut rings = Vec::with_capacity(ring_lengths.len());
    let mut start = 0;
    for &len in ring_lengths {
        let end = (start + len as usize * 2).min(vertices.len());
        rings.push(to_ring(&vertices[start..end]));
        start = end;
    }
    rings
}

fn partition_rings(vertices: &[f64], ring_lengths: &[u32], division_count: u32, extent: f64) -> PartitionerJs {
    let mut p = PartitionerJs::new();
    p.rings = to_rings(vertices, ring_lengths);
    p.partition(division_count, extent, 0.0);
    p
}

/// Convenience: partition one polygon given as a flat vertex buffer plus the
/// vertex count of each ring. Returns the flat output vertex array (use
/// partition_polygon_indices for the triangles). Empty on failure.
#[wasm_bindgen]
pub fn partition_polygon(vertices: &[f64], ring_lengths: &[u32], division_count: u32, extent: f64) -> Vec<f64> {
    partition_rings(vertices, ring_lengths, division_count, extent).get_vertices()
}

/// Convenience: same as partition_polygon but returns the triangle index array.
#[wasm_bindgen]
pub fn partition_polygon_indices(vertices: &[f64], ring_lengths: &[u32], division_count: u32, extent: f64) -> Vec<u32> {
    partition_rings(vertices, ring_lengths, division_count, extent).get_indices()
}
