//! End-to-end tests for the strip generation pipeline.

use tristrip::prelude::*;

/// Two triangles of a `w` x `h` quad grid per cell, consistently wound.
fn grid(w: u16, h: u16) -> Vec<Triangle> {
    let mut tris = Vec::new();
    for y in 0..h {
        for x in 0..w {
            let v00 = y * (w + 1) + x;
            let v10 = v00 + 1;
            let v01 = v00 + w + 1;
            let v11 = v01 + 1;
            tris.push(Triangle::new(v00, v10, v11, 0));
            tris.push(Triangle::new(v00, v11, v01, 0));
        }
    }
    tris
}

fn grid_vertices(w: u16, h: u16) -> usize {
    (w as usize + 1) * (h as usize + 1)
}

#[test]
fn test_shared_edge_pair_makes_one_strip() {
    let tris = vec![Triangle::new(0, 1, 2, 0), Triangle::new(2, 1, 3, 0)];
    let meshes = build_tristrips(&tris, 4, 1, &StripifyOptions::default()).unwrap();

    assert_eq!(meshes.primitive, PrimitiveType::TriangleStrip);
    assert_eq!(meshes.meshes.len(), 1);
    // One strip of two triangles: four indices and no stitch degenerates.
    assert_eq!(meshes.meshes[0].indices, vec![0, 1, 2, 3]);
    assert_eq!(strip_triangles(&meshes.meshes[0].indices).count(), 2);

    verify_meshes(&tris, &meshes).unwrap();
}

#[test]
fn test_disjoint_triangles_are_stitched() {
    let tris = vec![Triangle::new(0, 1, 2, 0), Triangle::new(3, 4, 5, 0)];
    let meshes = build_tristrips(&tris, 6, 1, &StripifyOptions::default()).unwrap();

    // Two 3-index runs plus a 2-index stitch between them.
    let indices = &meshes.meshes[0].indices;
    assert_eq!(indices.len(), 8);
    let decoded: Vec<_> = strip_triangles(indices).collect();
    assert_eq!(decoded.len(), 2);

    // The stitch duplicates the previous run's last index and the next
    // run's first index, so no seam triple decodes to a triangle.
    assert_eq!(indices[3], indices[2]);
    assert_eq!(indices[4], indices[5]);

    verify_meshes(&tris, &meshes).unwrap();
}

#[test]
fn test_materials_without_triangles_get_empty_meshes() {
    let tris = vec![Triangle::new(0, 1, 2, 2)];
    let meshes = build_tristrips(&tris, 3, 4, &StripifyOptions::default()).unwrap();

    assert_eq!(meshes.meshes.len(), 4);
    for (material, mesh) in meshes.meshes.iter().enumerate() {
        assert_eq!(mesh.material as usize, material);
        if material != 2 {
            assert!(mesh.indices.is_empty());
        }
    }
    assert_eq!(meshes.meshes[2].indices, vec![0, 1, 2]);
}

#[test]
fn test_single_triangle() {
    let tris = vec![Triangle::new(5, 6, 7, 0)];
    let meshes = build_tristrips(&tris, 8, 1, &StripifyOptions::default()).unwrap();
    assert_eq!(meshes.meshes[0].indices, vec![5, 6, 7]);
    verify_meshes(&tris, &meshes).unwrap();
}

#[test]
fn test_out_of_range_vertex_is_rejected() {
    let tris = vec![Triangle::new(0, 1, 2, 0), Triangle::new(1, 2, 4, 0)];
    let err = build_tristrips(&tris, 4, 1, &StripifyOptions::default()).unwrap_err();
    assert!(err.is_invalid_mesh());
    assert!(matches!(
        err,
        StripError::InvalidVertexIndex {
            triangle: 1,
            vertex: 4,
            ..
        }
    ));
}

#[test]
fn test_out_of_range_material_is_rejected() {
    let tris = vec![Triangle::new(0, 1, 2, 3)];
    let err = build_tristrips(&tris, 3, 3, &StripifyOptions::default()).unwrap_err();
    assert!(err.is_invalid_mesh());
}

#[test]
fn test_grid_round_trips_with_and_without_tunnel() {
    let tris = grid(5, 4);
    let nv = grid_vertices(5, 4);

    for tunnel in [false, true] {
        let options = StripifyOptions::default().with_tunnel(tunnel);
        let meshes = build_tristrips(&tris, nv, 1, &options).unwrap();
        verify_meshes(&tris, &meshes).unwrap();

        let decoded: Vec<_> = strip_triangles(&meshes.meshes[0].indices).collect();
        assert_eq!(decoded.len(), tris.len());
    }
}

#[test]
fn test_tunnel_never_lengthens_grid_stream() {
    let tris = grid(6, 6);
    let nv = grid_vertices(6, 6);

    let without = build_tristrips(
        &tris,
        nv,
        1,
        &StripifyOptions::default().with_tunnel(false),
    )
    .unwrap();
    let with = build_tristrips(&tris, nv, 1, &StripifyOptions::default()).unwrap();

    assert!(with.total_indices() <= without.total_indices());
}

#[test]
fn test_trace_strip_counts_never_increase() {
    use std::sync::{Arc, Mutex};

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let trace = Trace::new(move |e| sink.lock().unwrap().push(*e));

    let tris = grid(4, 3);
    let nv = grid_vertices(4, 3);
    build_tristrips_with_trace(&tris, nv, 1, &StripifyOptions::default(), &trace).unwrap();

    let events = events.lock().unwrap();
    let built = events.iter().find_map(|e| match e {
        TraceEvent::StripsBuilt { strips, .. } => Some(*strips),
        _ => None,
    });
    let done = events.iter().find_map(|e| match e {
        TraceEvent::TunnelDone { strips, .. } => Some(*strips),
        _ => None,
    });
    assert!(done.unwrap() <= built.unwrap());
}

#[test]
fn test_trilist_and_strip_encode_same_triangles() {
    let canon = |t: &Triangle| {
        let v = t.v;
        let rotations = [v, [v[1], v[2], v[0]], [v[2], v[0], v[1]]];
        (t.material, rotations.into_iter().min().unwrap())
    };

    let tris = grid(3, 3);
    let nv = grid_vertices(3, 3);
    let strips = build_tristrips(&tris, nv, 1, &StripifyOptions::default()).unwrap();
    let lists = build_trilist(&tris, nv, 1).unwrap();

    let mut from_strips: Vec<_> = strips.triangles().iter().map(canon).collect();
    let mut from_lists: Vec<_> = lists.triangles().iter().map(canon).collect();
    from_strips.sort_unstable();
    from_lists.sort_unstable();
    assert_eq!(from_strips, from_lists);
}

#[test]
fn test_fan_round_trips() {
    // A triangle fan is a single dual-graph path; the whole fan fits in
    // one run with no stitch.
    let tris: Vec<Triangle> = (0..10).map(|i| Triangle::new(0, i + 1, i + 2, 0)).collect();
    let meshes = build_tristrips(&tris, 12, 1, &StripifyOptions::default()).unwrap();
    verify_meshes(&tris, &meshes).unwrap();

    let decoded: Vec<_> = strip_triangles(&meshes.meshes[0].indices).collect();
    assert_eq!(decoded.len(), tris.len());
}

#[test]
fn test_empty_input() {
    let meshes = build_tristrips(&[], 0, 2, &StripifyOptions::default()).unwrap();
    assert_eq!(meshes.meshes.len(), 2);
    assert_eq!(meshes.total_indices(), 0);
    verify_meshes(&[], &meshes).unwrap();
}
