// sectioned-earclip: grid-sectioned polygon triangulation for tiled meshes
// Copyright 2025 Lars Brubaker
// License: MIT

pub mod classify;
pub mod error;
pub mod fragment;
pub mod gap;
pub mod geom;
pub mod grid;
pub mod mesh;
pub mod partition;
pub mod slice;
pub mod stitch;
pub mod triangulate;

pub use classify::SectionPolygon;
pub use error::{EarclipError, Result};
pub use geom::{Point, Polygon, Real, Ring};
pub use grid::{SectionGrid, SectionId};
pub use mesh::{flatten, Mesh};
pub use partition::{partition, PartitionOptions, Partitioner, DEFAULT_EXTENT};
pub use stitch::MAX_CORNER_HOPS;
pub use triangulate::{Earcut, Triangulator};
