// Copyright 2025 Lars Brubaker
// End-to-end partition scenarios on small grids with hand-checked results.

mod helpers;

use helpers::{assert_valid_mesh, mesh_area, rect, rect_cw, ring, ring_area};
use sectioned_earclip::{flatten, PartitionOptions, Partitioner, SectionId};

fn partitioner(division_count: u32, extent: f64) -> Partitioner {
    Partitioner::new(
        PartitionOptions::new()
            .with_division_count(division_count)
            .with_extent(extent),
    )
    .expect("valid options")
}

#[test]
fn single_section_square() {
    let polygon = vec![rect(0.0, 0.0, 4.0, 4.0)];
    let mesh = partitioner(1, 4.0).partition(&polygon).unwrap();
    assert_valid_mesh(&mesh, 0);
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.triangle_count(), 2);
    assert!((mesh_area(&mesh, 0) - 16.0).abs() < 1e-9);
}

#[test]
fn square_split_into_four_sections() {
    let polygon = vec![rect(0.0, 0.0, 4.0, 4.0)];
    let p = partitioner(2, 4.0);

    let sections = p.sections(&polygon).unwrap();
    assert_eq!(sections.len(), 4);
    for section in &sections {
        let b = p.grid().section_bounds(section.section);
        assert_eq!(section.outer.len(), 4);
        for v in &section.outer {
            assert!(v.s == b.left || v.s == b.right, "{:?} not a corner of {:?}", v, b);
            assert!(v.t == b.bottom || v.t == b.top, "{:?} not a corner of {:?}", v, b);
        }
    }

    let mesh = p.partition(&polygon).unwrap();
    assert_valid_mesh(&mesh, 0);
    assert_eq!(mesh.triangle_count(), 8);
    assert_eq!(mesh.vertex_count(), 16);
    assert!((mesh_area(&mesh, 0) - 16.0).abs() < 1e-9);
}

#[test]
fn single_section_square_with_hole() {
    let polygon = vec![
        ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]),
        ring(&[(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0), (1.0, 1.0)]),
    ];
    let p = partitioner(1, 4.0);

    let sections = p.sections(&polygon).unwrap();
    assert_eq!(sections.len(), 1);
    let (vertices, hole_indices) = flatten(sections[0].rings());
    assert_eq!(vertices.len(), 16);
    assert_eq!(hole_indices, vec![4]);

    let mesh = p.partition(&polygon).unwrap();
    assert_valid_mesh(&mesh, 0);
    assert_eq!(mesh.vertex_count(), 8);
    assert!((mesh_area(&mesh, 0) - 12.0).abs() < 1e-9);
}

#[test]
fn strip_across_three_sections_needs_no_corners() {
    let polygon = vec![rect(0.2, 1.2, 2.8, 1.8)];
    let p = partitioner(3, 3.0);

    let sections = p.sections(&polygon).unwrap();
    let ids: Vec<SectionId> = sections.iter().map(|s| s.section).collect();
    assert_eq!(
        ids,
        vec![SectionId::new(0, 1), SectionId::new(1, 1), SectionId::new(2, 1)]
    );
    for section in &sections {
        assert_eq!(section.outer.len(), 4);
        // every vertex keeps t from the strip, so no section corner was added
        assert!(section.outer.iter().all(|v| v.t == 1.2 || v.t == 1.8));
    }

    let mesh = p.partition(&polygon).unwrap();
    assert_eq!(mesh.triangle_count(), 6);
    assert!((mesh_area(&mesh, 0) - 2.6 * 0.6).abs() < 1e-9);
}

#[test]
fn ring_around_a_section_fills_its_interior() {
    let polygon = vec![rect(0.5, 0.5, 2.5, 2.5)];
    let p = partitioner(3, 3.0);

    let sections = p.sections(&polygon).unwrap();
    assert_eq!(sections.len(), 9);
    // the untouched centre comes last, as a full square
    let centre = sections.last().unwrap();
    assert_eq!(centre.section, SectionId::new(1, 1));
    assert_eq!(centre.outer.len(), 4);

    let mesh = p.partition(&polygon).unwrap();
    assert_valid_mesh(&mesh, 0);
    assert!((mesh_area(&mesh, 0) - 4.0).abs() < 1e-9);
}

#[test]
fn edge_section_takes_two_corners() {
    let polygon = vec![rect(0.5, 0.5, 2.5, 2.5)];
    let p = partitioner(3, 3.0);
    let sections = p.sections(&polygon).unwrap();
    let bottom = sections
        .iter()
        .find(|s| s.section == SectionId::new(1, 0))
        .unwrap();
    let mut outer: Vec<(f64, f64)> = bottom.outer.iter().map(|v| (v.s, v.t)).collect();
    outer.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(outer, vec![(1.0, 0.5), (1.0, 1.0), (2.0, 0.5), (2.0, 1.0)]);
}

#[test]
fn two_outers_in_one_section() {
    // Arch: both legs reach down into the lower section separately.
    let polygon = vec![ring(&[
        (300.0, 300.0),
        (800.0, 300.0),
        (800.0, 3000.0),
        (1500.0, 3000.0),
        (1500.0, 300.0),
        (1900.0, 300.0),
        (1900.0, 3500.0),
        (300.0, 3500.0),
    ])];
    let p = partitioner(2, 4096.0);

    let sections = p.sections(&polygon).unwrap();
    let lower: Vec<_> = sections
        .iter()
        .filter(|s| s.section == SectionId::new(0, 0))
        .collect();
    assert_eq!(lower.len(), 2);
    let upper: Vec<_> = sections
        .iter()
        .filter(|s| s.section == SectionId::new(0, 1))
        .collect();
    assert_eq!(upper.len(), 1);

    let mesh = p.partition(&polygon).unwrap();
    let expected = 1600.0 * 3200.0 - 700.0 * 2700.0;
    assert!((mesh_area(&mesh, 0) - expected).abs() < 1e-6 * expected);
}

#[test]
fn hole_across_a_grid_line() {
    let polygon = vec![rect(0.5, 0.5, 3.5, 3.5), rect_cw(1.5, 1.5, 2.5, 2.5)];
    let p = partitioner(2, 4.0);
    let mesh = p.partition(&polygon).unwrap();
    assert_valid_mesh(&mesh, 0);
    assert!((mesh_area(&mesh, 0) - 8.0).abs() < 1e-9);
    // each quadrant carries a notch, so none is a plain square
    for section in p.sections(&polygon).unwrap() {
        assert!(section.holes.is_empty());
        assert_eq!(section.outer.len(), 6);
    }
}

#[test]
fn hole_touching_section_walls_is_cut_out_of_its_section() {
    // Inside section (1, 1) = [2, 4] x [2, 4]; the hole's vertices lie on the
    // section's bottom, top and right walls.
    let hole = ring(&[(2.5, 2.0), (2.5, 4.0), (4.0, 3.5)]);
    let polygon = vec![rect(0.0, 0.0, 8.0, 8.0), hole.clone()];
    let p = partitioner(4, 8.0);

    let sections = p.sections(&polygon).unwrap();
    let inner: Vec<_> = sections
        .iter()
        .filter(|s| s.section == SectionId::new(1, 1))
        .collect();
    assert_eq!(inner.len(), 3);
    for section in &inner {
        assert!(section.holes.is_empty());
        let mut outer = section.outer.clone();
        outer.sort_by(|a, b| a.s.total_cmp(&b.s).then(a.t.total_cmp(&b.t)));
        let mut triangle = hole.clone();
        triangle.sort_by(|a, b| a.s.total_cmp(&b.s).then(a.t.total_cmp(&b.t)));
        assert_ne!(outer, triangle, "section (1, 1) emitted the hole itself");
    }
    let inner_area: f64 = inner.iter().map(|s| ring_area(&s.outer)).sum();
    assert!((inner_area - 2.5).abs() < 1e-12);

    let mesh = p.partition(&polygon).unwrap();
    assert_valid_mesh(&mesh, 0);
    assert!((mesh_area(&mesh, 0) - 62.5).abs() < 1e-9);
}
