// Copyright 2025 Lars Brubaker
// License: MIT
//
// Partition entry point: validates input, slices every ring against the
// section grid, stitches and classifies each section, fills interior gaps and
// assembles the triangulated mesh.

use log::{debug, trace};

use crate::classify::{merge_ring, section_polygons, settle, SectionPolygon};
use crate::error::{EarclipError, Result};
use crate::fragment::SectionMap;
use crate::gap::{add_inner_squares, enclose_orphan_holes};
use crate::geom::{ring_signed_area, Polygon, Real, Ring};
use crate::grid::SectionGrid;
use crate::mesh::{Mesh, MeshAssembler};
use crate::slice::slice_ring;
use crate::stitch::stitch_section;
use crate::triangulate::{Earcut, Triangulator};

pub const DEFAULT_EXTENT: Real = 4096.0;

// ─────────────────────────────── Options ───────────────────────────────────────

/// Partition configuration.
///
/// `division_count` sections per axis cover `[0, extent]`; 0 means a single
/// section. Every output index is shifted by `offset`; a shifted index past
/// `u32::MAX` fails the partition with [`EarclipError::InvalidOptions`]. When
/// `max_edge_length` is set, triangles are bisected until no side exceeds it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PartitionOptions {
    pub division_count: u32,
    pub extent: Real,
    pub offset: u32,
    pub max_edge_length: Option<Real>,
}

impl Default for PartitionOptions {
    fn default() -> Self {
        PartitionOptions {
            division_count: 0,
            extent: DEFAULT_EXTENT,
            offset: 0,
            max_edge_length: None,
        }
    }
}

impl PartitionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_division_count(mut self, division_count: u32) -> Self {
        self.division_count = division_count;
        self
    }

    pub fn with_extent(mut self, extent: Real) -> Self {
        self.extent = extent;
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_max_edge_length(mut self, max_edge_length: Real) -> Self {
        self.max_edge_length = Some(max_edge_length);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.extent.is_finite() || self.extent <= 0.0 {
            return Err(EarclipError::InvalidOptions(format!(
                "extent must be finite and positive, got {}",
                self.extent
            )));
        }
        if let Some(max_len) = self.max_edge_length {
            if !max_len.is_finite() || max_len <= 0.0 {
                return Err(EarclipError::InvalidOptions(format!(
                    "max_edge_length must be finite and positive, got {}",
                    max_len
                )));
            }
        }
        Ok(())
    }
}

// ─────────────────────────────── Input ─────────────────────────────────────────

/// Outer ring counter-clockwise, holes clockwise; zero-area rings are left
/// out. A zero-area outer ring leaves nothing to partition.
fn normalize_winding(polygon: &[Ring]) -> Polygon {
    let mut rings = Vec::with_capacity(polygon.len());
    for (k, ring) in polygon.iter().enumerate() {
        let area = ring_signed_area(ring);
        if area == 0.0 {
            trace!("skipping zero-area ring {}", k);
            if k == 0 {
                return Vec::new();
            }
            continue;
        }
        let mut ring = ring.clone();
        if (area > 0.0) != (k == 0) {
            ring.reverse();
        }
        rings.push(ring);
    }
    rings
}

// ─────────────────────────────── Partitioner ───────────────────────────────────

/// Splits polygons along a uniform section grid and triangulates each
/// section with `T`.
#[derive(Clone, Debug)]
pub struct Partitioner<T = Earcut> {
    options: PartitionOptions,
    grid: SectionGrid,
    triangulator: T,
}

impl Default for Partitioner<Earcut> {
    fn default() -> Self {
        let options = PartitionOptions::default();
        Partitioner {
            grid: SectionGrid::new(options.division_count, options.extent),
            options,
            triangulator: Earcut,
        }
    }
}

impl Partitioner<Earcut> {
    pub fn new(options: PartitionOptions) -> Result<Self> {
        Self::with_triangulator(options, Earcut)
    }
}

impl<T: Triangulator> Partitioner<T> {
    pub fn with_triangulator(options: PartitionOptions, triangulator: T) -> Result<Self> {
        options.validate()?;
        Ok(Partitioner {
            grid: SectionGrid::new(options.division_count, options.extent),
            options,
            triangulator,
        })
    }

    pub fn options(&self) -> &PartitionOptions {
        &self.options
    }

    pub fn grid(&self) -> &SectionGrid {
        &self.grid
    }

    fn check_coordinates(&self, polygon: &[Ring]) -> Result<()> {
        let range = 0.0..=self.grid.extent();
        for (r, ring) in polygon.iter().enumerate() {
            for (index, p) in ring.iter().enumerate() {
                if !p.is_finite() || !range.contains(&p.s) || !range.contains(&p.t) {
                    return Err(EarclipError::InvalidCoordinate {
                        ring: r,
                        index,
                        s: p.s,
                        t: p.t,
                    });
                }
            }
        }
        Ok(())
    }

    /// The closed per-section rings of `polygon`, before triangulation, in
    /// section insertion order.
    pub fn sections(&self, polygon: &[Ring]) -> Result<Vec<SectionPolygon>> {
        self.check_coordinates(polygon)?;
        let rings = normalize_winding(polygon);
        if rings.is_empty() {
            return Ok(Vec::new());
        }

        let mut map = SectionMap::new();
        for (k, ring) in rings.iter().enumerate() {
            merge_ring(&mut map, slice_ring(&self.grid, ring, k == 0));
        }
        debug!("sliced {} rings into {} sections", rings.len(), map.len());

        for (&section, group) in map.iter_mut() {
            let stitched = stitch_section(&self.grid, section, group.take())?;
            group.replace(settle(stitched));
        }
        map.retain(|_, group| !group.is_empty());

        let enclosed = enclose_orphan_holes(&self.grid, &mut map);
        let filled = add_inner_squares(&self.grid, &mut map, &rings);
        debug!(
            "stitched {} sections ({} enclosing holes, {} interior)",
            map.len(),
            enclosed,
            filled
        );

        Ok(map
            .iter()
            .flat_map(|(&section, group)| section_polygons(section, group))
            .collect())
    }

    /// Triangulates every section, indices starting at 0.
    fn assemble(&self, polygon: &[Ring]) -> Result<Mesh> {
        let sections = self.sections(polygon)?;
        let mut assembler = MeshAssembler::new(&self.triangulator)
            .with_max_edge_length(self.options.max_edge_length);
        for section in &sections {
            assembler.add(section)?;
        }
        let mesh = assembler.finish(0)?;
        debug!(
            "{} section polygons -> {} triangles, {} vertices",
            sections.len(),
            mesh.triangle_count(),
            mesh.vertex_count()
        );
        Ok(mesh)
    }

    /// Partitions and triangulates one polygon. Ring 0 is the outer boundary,
    /// the other rings are holes; rings may be open or closed.
    ///
    /// With a single section the result equals triangulating the flattened
    /// input directly, provided the outer ring is counter-clockwise and the
    /// holes clockwise. Rings wound the other way are reversed first, so
    /// their vertices come out in reverse order.
    pub fn partition(&self, polygon: &[Ring]) -> Result<Mesh> {
        self.assemble(polygon)?.with_offset(self.options.offset)
    }

    /// Partitions several polygons into one mesh. Each polygon's indices
    /// follow the vertices of the polygons before it.
    #[cfg(not(feature = "parallel"))]
    pub fn partition_many(&self, polygons: &[Polygon]) -> Result<Mesh> {
        let meshes = polygons
            .iter()
            .map(|polygon| self.assemble(polygon))
            .collect::<Result<Vec<_>>>()?;
        self.merge(meshes)
    }

    /// Partitions several polygons into one mesh. Each polygon's indices
    /// follow the vertices of the polygons before it. Polygons are
    /// partitioned in parallel; when several fail, which error is returned
    /// is unspecified.
    #[cfg(feature = "parallel")]
    pub fn partition_many(&self, polygons: &[Polygon]) -> Result<Mesh>
    where
        T: Sync,
    {
        use rayon::prelude::*;

        let meshes = polygons
            .par_iter()
            .map(|polygon| self.assemble(polygon))
            .collect::<Result<Vec<_>>>()?;
        self.merge(meshes)
    }

    fn merge(&self, meshes: Vec<Mesh>) -> Result<Mesh> {
        let mut merged = Mesh::new();
        for mesh in meshes {
            merged.append(mesh)?;
        }
        merged.with_offset(self.options.offset)
    }
}

/// Partitions `polygon` with the default triangulator.
pub fn partition(polygon: &[Ring], options: &PartitionOptions) -> Result<Mesh> {
    Partitioner::new(*options)?.partition(polygon)
}
