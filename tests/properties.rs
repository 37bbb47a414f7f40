//! Structural and geometric invariants on larger generated inputs.

mod support;

use fortune_voronoi::{compute, Diagram, EventLog, FortuneSweep, MetricKind, SiteId, VertexKind, VoronoiOutput};
use geo::Coord;
use support::points::{distance, jittered_grid, random_points};

fn sweep(points: &[Coord<f64>]) -> VoronoiOutput {
    compute(points).unwrap()
}

/// Longer side of the bounding box of the sites.
fn site_span(diagram: &Diagram) -> f64 {
    let mut lo = Coord { x: f64::INFINITY, y: f64::INFINITY };
    let mut hi = Coord { x: f64::NEG_INFINITY, y: f64::NEG_INFINITY };
    for site in diagram.sites() {
        lo = Coord { x: lo.x.min(site.point.x), y: lo.y.min(site.point.y) };
        hi = Coord { x: hi.x.max(site.point.x), y: hi.y.max(site.point.y) };
    }
    (hi.x - lo.x).max(hi.y - lo.y)
}

/// Each convergence vertex is equidistant from at least three sites and
/// no site is closer.
fn assert_empty_circles(diagram: &Diagram) {
    let span = site_span(diagram);
    for (id, vertex) in diagram.vertices() {
        if vertex.kind != VertexKind::Convergence { continue }
        let nearest = diagram.nearest_site(vertex.point).unwrap();
        let radius = distance(vertex.point, diagram.site_point(nearest));
        let tolerance = 1e-7 * (span + radius);
        let on_circle = diagram.sites_within(vertex.point, radius + tolerance);
        assert!(on_circle.len() >= 3, "vertex {id} at {:?} touches {} sites", vertex.point, on_circle.len());
    }
}

/// Twins run in opposite directions and chained half-edges meet.
fn assert_topology(diagram: &Diagram) {
    for (id, he) in diagram.half_edges() {
        let twin = he.twin.expect("every half-edge has a twin");
        let back = diagram.half_edge(twin);
        assert_eq!(back.twin, Some(id));
        assert_eq!(he.origin, back.destination, "{id}");
        assert_eq!(he.destination, back.origin, "{id}");
        assert_ne!(diagram.face_site(he.face), diagram.face_site(back.face));

        if let Some(next) = he.next {
            assert_eq!(he.destination, diagram.half_edge(next).origin, "{id} -> {next}");
            assert_eq!(diagram.half_edge(next).prev, Some(id));
        }
    }
}

/// Every face boundary is one closed chain, or open chains running from
/// the clip rectangle back to it.  Only a strip between parallel edges has
/// more than one.
fn assert_cells(diagram: &Diagram) {
    for i in 0..diagram.num_sites() {
        let site = SiteId(i);
        let chains = diagram.face_chains(site);
        let total: usize = chains.iter().map(Vec::len).sum();
        assert_eq!(total, diagram.face_half_edges(site).len(), "site {i} lost a half-edge");
        if diagram.is_bounded(site) {
            assert_eq!(chains.len(), 1, "site {i}");
            continue;
        }
        assert!(chains.len() <= 2, "site {i} has {} chains", chains.len());

        for chain in &chains {
            let first = diagram.half_edge(chain[0]).origin.unwrap();
            let last = diagram.half_edge(*chain.last().unwrap()).destination.unwrap();
            assert_eq!(diagram.vertex(first).kind, VertexKind::Clipped, "site {i}");
            assert_eq!(diagram.vertex(last).kind, VertexKind::Clipped, "site {i}");
        }
    }
}

fn assert_diagram(output: &VoronoiOutput) {
    let diagram = &output.diagram;
    assert_eq!(diagram.unresolved_half_edges(), 0);
    assert_eq!(diagram.count_vertices(VertexKind::Convergence), output.stats.convergence_vertices);
    assert_eq!(diagram.count_vertices(VertexKind::Clipped), output.stats.clipped_vertices);
    assert_eq!(output.stats.circle_events_processed, output.stats.convergence_vertices);
    assert_eq!(
        output.stats.circle_events_scheduled,
        output.stats.circle_events_processed + output.stats.circle_events_discarded,
    );
    assert_topology(diagram);
    assert_cells(diagram);
    assert_empty_circles(diagram);
}

#[test]
fn random_inputs_give_valid_diagrams() {
    for (n, seed) in [(2, 1), (3, 2), (10, 3), (100, 4), (500, 5)] {
        let points = random_points(n, 100.0, seed);
        let output = sweep(&points);
        assert_eq!(output.diagram.num_sites(), n);
        assert_eq!(output.stats.site_events, n);
        assert_diagram(&output);
    }
}

#[test]
fn random_inputs_are_valid_at_any_scale() {
    let unit = random_points(300, 1.0, 17);
    let reference = sweep(&unit);
    assert_diagram(&reference);

    for scale in [1e-4, 1e-3, 1e5] {
        let points: Vec<_> = unit.iter().map(|p| Coord { x: p.x * scale, y: p.y * scale }).collect();
        let output = sweep(&points);
        assert_diagram(&output);
        assert_eq!(
            output.stats.convergence_vertices, reference.stats.convergence_vertices,
            "scale {scale}",
        );
        assert_eq!(output.diagram.num_half_edges(), reference.diagram.num_half_edges(), "scale {scale}");
    }

    for (n, seed) in [(10, 3), (100, 4), (500, 5)] {
        for scale in [1e-4, 1e-3] {
            let points: Vec<_> = random_points(n, 100.0, seed).into_iter()
                .map(|p| Coord { x: p.x * scale, y: p.y * scale })
                .collect();
            assert_diagram(&sweep(&points));
        }
    }
}

#[test]
fn jittered_grid_gives_valid_diagram() {
    let points = jittered_grid(12, 9, 0.05, 7);
    let output = sweep(&points);
    assert_diagram(&output);

    // Interior sites are enclosed by their neighbours.
    for j in 1..8 {
        for i in 1..11 {
            assert!(output.diagram.is_bounded(SiteId(j * 12 + i)), "site ({i}, {j})");
        }
    }
}

#[test]
fn nearest_site_agrees_with_cells() {
    let points = random_points(60, 10.0, 11);
    let output = sweep(&points);
    let diagram = &output.diagram;

    for i in 0..diagram.num_sites() {
        let site = SiteId(i);
        if !diagram.is_bounded(site) { continue }
        let ring = diagram.cell_polygon(site);
        let n = ring.len() as f64;
        let centroid = Coord {
            x: ring.iter().map(|p| p.x).sum::<f64>() / n,
            y: ring.iter().map(|p| p.y).sum::<f64>() / n,
        };
        assert_eq!(diagram.nearest_site(centroid), Some(site));
    }
}

#[test]
fn bounded_cells_are_convex_and_counter_clockwise() {
    let points = random_points(200, 50.0, 21);
    let output = sweep(&points);
    let diagram = &output.diagram;

    let mut bounded = 0;
    for i in 0..diagram.num_sites() {
        let site = SiteId(i);
        if !diagram.is_bounded(site) { continue }
        bounded += 1;
        let ring = diagram.cell_polygon(site);
        assert!(ring.len() >= 3);
        for k in 0..ring.len() {
            let (a, b, c) = (ring[k], ring[(k + 1) % ring.len()], ring[(k + 2) % ring.len()]);
            let turn = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
            assert!(turn > -1e-6, "site {i} turns clockwise at {b:?}");
        }
    }
    assert!(bounded > 100);
}

#[test]
fn repeated_runs_are_identical() {
    let points = random_points(300, 20.0, 99);

    let mut first = EventLog::new();
    let a = FortuneSweep::new(&points, MetricKind::Euclidean).unwrap().construct_observed(&mut first);
    let mut second = EventLog::new();
    let b = FortuneSweep::new(&points, MetricKind::Euclidean).unwrap().construct_observed(&mut second);

    assert_eq!(first.entries, second.entries);
    assert_eq!(a.stats, b.stats);
    assert_eq!(a.diagram.segments(), b.diagram.segments());
}

#[test]
fn top_row_ties_are_handled() {
    // Several sites share the highest y, the rest are scattered below.
    let mut points: Vec<_> = (0..6).map(|i| Coord { x: i as f64 * 3.0, y: 20.0 }).collect();
    points.extend(random_points(40, 8.0, 5).into_iter().map(|p| Coord { x: p.x + 7.5, y: p.y }));
    let output = sweep(&points);
    assert_diagram(&output);
}
