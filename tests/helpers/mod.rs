// Copyright 2025 Lars Brubaker
// Shared test utilities for sectioned-earclip tests.

#![allow(dead_code)]

use sectioned_earclip::{Mesh, Point, Real, Ring};

/// Builds a ring from (s, t) pairs.
pub fn ring(points: &[(Real, Real)]) -> Ring {
    points.iter().map(|&p| Point::from(p)).collect()
}

/// Closed counter-clockwise axis-aligned rectangle.
pub fn rect(left: Real, bottom: Real, right: Real, top: Real) -> Ring {
    ring(&[
        (left, bottom),
        (right, bottom),
        (right, top),
        (left, top),
        (left, bottom),
    ])
}

/// Closed clockwise axis-aligned rectangle, for holes.
pub fn rect_cw(left: Real, bottom: Real, right: Real, top: Real) -> Ring {
    ring(&[
        (left, bottom),
        (left, top),
        (right, top),
        (right, bottom),
        (left, bottom),
    ])
}

/// Star-shaped ring around `center`: vertex k sits at `radii[k]` along
/// angle `phase + 2πk/n`. Counter-clockwise and never self-intersecting.
pub fn star(center: (Real, Real), radii: &[Real], phase: Real) -> Ring {
    let n = radii.len() as Real;
    radii
        .iter()
        .enumerate()
        .map(|(k, r)| {
            let a = phase + std::f64::consts::TAU * k as Real / n;
            Point::new(center.0 + r * a.cos(), center.1 + r * a.sin())
        })
        .collect()
}

/// Signed shoelace area of a ring (closing duplicate allowed).
pub fn ring_area(ring: &[Point]) -> Real {
    let n = ring.len();
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += ring[i].s * ring[j].t - ring[j].s * ring[i].t;
    }
    area * 0.5
}

/// Area of the outer ring minus the holes.
pub fn polygon_area(polygon: &[Ring]) -> Real {
    let mut rings = polygon.iter();
    let outer = rings.next().map_or(0.0, |r| ring_area(r).abs());
    outer - rings.map(|r| ring_area(r).abs()).sum::<Real>()
}

/// Signed area of a triangle given 3 vertices.
pub fn triangle_area(a: &Point, b: &Point, c: &Point) -> Real {
    0.5 * ((b.s - a.s) * (c.t - a.t) - (c.s - a.s) * (b.t - a.t))
}

/// Triangle corners of `mesh`, whose indices were shifted by `offset`.
pub fn triangles(mesh: &Mesh, offset: u32) -> Vec<[Point; 3]> {
    mesh.indices
        .chunks_exact(3)
        .map(|tri| {
            let v = |i: u32| {
                let i = (i - offset) as usize;
                Point::new(mesh.vertices[i * 2], mesh.vertices[i * 2 + 1])
            };
            [v(tri[0]), v(tri[1]), v(tri[2])]
        })
        .collect()
}

/// Total absolute triangle area.
pub fn mesh_area(mesh: &Mesh, offset: u32) -> Real {
    triangles(mesh, offset)
        .iter()
        .map(|[a, b, c]| triangle_area(a, b, c).abs())
        .sum()
}

pub fn centroid([a, b, c]: &[Point; 3]) -> Point {
    Point::new((a.s + b.s + c.s) / 3.0, (a.t + b.t + c.t) / 3.0)
}

/// Indices form whole triangles and all reference existing vertices.
pub fn assert_valid_mesh(mesh: &Mesh, offset: u32) {
    assert_eq!(mesh.vertices.len() % 2, 0, "odd vertex buffer length");
    assert_eq!(mesh.indices.len() % 3, 0, "indices are not whole triangles");
    let count = (mesh.vertices.len() / 2) as u32;
    for &i in &mesh.indices {
        assert!(
            i >= offset && i - offset < count,
            "index {} out of range [{}, {})",
            i,
            offset,
            offset + count
        );
    }
}

/// Asserts `actual` is within `rel` relative tolerance of `expected`.
pub fn assert_area(actual: Real, expected: Real, rel: Real) {
    let tol = rel * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tol,
        "area {} differs from {} by more than {}",
        actual,
        expected,
        tol
    );
}
