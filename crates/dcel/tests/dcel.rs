use planar_dcel::{Dcel, FaceId, HalfEdgeId, VertexId};

/// Three unbounded cells meeting at one vertex, each edge clipped to a box.
///
/// ```
///  \  B  /
///   \   /
///  A  o  C
///     |
/// ```
/// One centre vertex, three box vertices, three edges (six half-edges).
fn three_way_fan() -> (Dcel<(f64, f64), char>, VertexId, [FaceId; 3], [(HalfEdgeId, HalfEdgeId); 3]) {
    let mut dcel: Dcel<(f64, f64), char> = Dcel::new();

    let a = dcel.add_face('A');
    let b = dcel.add_face('B');
    let c = dcel.add_face('C');

    let centre = dcel.add_vertex((0.0, 0.0));
    let up_left = dcel.add_vertex((-1.0, 1.0));
    let up_right = dcel.add_vertex((1.0, 1.0));
    let down = dcel.add_vertex((0.0, -1.0));

    // Edge between A and B runs from the centre to the upper left.
    let ab = dcel.add_half_edge(a);
    let ba = dcel.add_half_edge(b);
    dcel.set_twins(ab, ba);
    dcel.set_origin(ab, up_left);
    dcel.set_destination(ab, centre);
    dcel.set_origin(ba, centre);
    dcel.set_destination(ba, up_left);

    let bc = dcel.add_half_edge(b);
    let cb = dcel.add_half_edge(c);
    dcel.set_twins(bc, cb);
    dcel.set_origin(bc, up_right);
    dcel.set_destination(bc, centre);
    dcel.set_origin(cb, centre);
    dcel.set_destination(cb, up_right);

    let ca = dcel.add_half_edge(c);
    let ac = dcel.add_half_edge(a);
    dcel.set_twins(ca, ac);
    dcel.set_origin(ca, down);
    dcel.set_destination(ca, centre);
    dcel.set_origin(ac, centre);
    dcel.set_destination(ac, down);

    // Each cell turns at the centre.
    dcel.set_next(ab, ac);
    dcel.set_next(bc, ba);
    dcel.set_next(ca, cb);

    (dcel, centre, [a, b, c], [(ab, ba), (bc, cb), (ca, ac)])
}

#[test]
fn counts_are_correct() {
    let (dcel, _, _, _) = three_way_fan();
    assert_eq!(dcel.num_vertices(), 4);
    assert_eq!(dcel.num_half_edges(), 6);
    assert_eq!(dcel.num_faces(), 3);
}

#[test]
fn twins_are_symmetric() {
    let (dcel, _, _, edges) = three_way_fan();
    for (u, v) in edges {
        assert_eq!(dcel.half_edge(u).twin, Some(v));
        assert_eq!(dcel.half_edge(v).twin, Some(u));
        assert_eq!(dcel.half_edge(u).origin, dcel.half_edge(v).destination);
    }
}

#[test]
fn unbounded_faces_have_open_chains_through_the_centre() {
    let (dcel, centre, faces, _) = three_way_fan();
    for face in faces {
        let entry = dcel.face(face).half_edge.unwrap();
        let chain: Vec<_> = dcel.face_chain(entry).collect();
        assert_eq!(chain.len(), 2);
        assert!(!dcel.is_closed_chain(entry));
        assert_eq!(dcel.half_edge(chain[0]).destination, Some(centre));
        assert_eq!(dcel.half_edge(chain[1]).origin, Some(centre));
    }
}

#[test]
fn face_payload_and_membership() {
    let (dcel, _, [a, b, c], _) = three_way_fan();
    assert_eq!(dcel.face(a).data, 'A');
    assert_eq!(dcel.face(b).data, 'B');
    assert_eq!(dcel.face(c).data, 'C');
    for face in [a, b, c] {
        assert_eq!(dcel.face(face).half_edges.len(), 2);
        for &he in &dcel.face(face).half_edges {
            assert_eq!(dcel.half_edge(he).face, face);
        }
    }
}

#[test]
fn unlinked_half_edge_is_its_own_chain() {
    let mut dcel: Dcel<(f64, f64), ()> = Dcel::new();
    let face = dcel.add_face(());
    let he = dcel.add_half_edge(face);
    assert_eq!(dcel.face_chain(he).collect::<Vec<_>>(), vec![he]);
    assert!(!dcel.half_edge(he).is_resolved());
}
