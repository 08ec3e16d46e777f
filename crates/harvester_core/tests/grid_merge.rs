use std::sync::Once;

use harvester_core::{
    grid, merge_by_identity, Coordinate, LocatedVideo, NormalizedItem, EARTH_RADIUS_KM,
    MAX_GRID_STEPS,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn located(id: &str, title: &str) -> NormalizedItem {
    NormalizedItem::Located(LocatedVideo {
        video_id: id.to_string(),
        title: title.to_string(),
        url: harvester_core::watch_url(id),
        channel: String::new(),
        views: String::new(),
        published_time: String::new(),
        origin: None,
    })
}

fn title(item: &NormalizedItem) -> &str {
    match item {
        NormalizedItem::Located(v) => &v.title,
        _ => "",
    }
}

#[test]
fn grid_respects_radius_and_includes_center() {
    init_logging();
    let center = Coordinate::new(37.0, -122.0);
    let points = grid(center, 5.0, 10.0);

    assert!(points.iter().all(|p| p.offset_km <= 10.0 + 1e-9));
    assert!(points.iter().any(|p| p.dx == 0 && p.dy == 0));
    // dx, dy in -2..=2 with dx^2 + dy^2 <= 4
    assert_eq!(points.len(), 13);
}

#[test]
fn grid_is_deterministic() {
    init_logging();
    let center = Coordinate::new(51.5, -0.12);
    assert_eq!(grid(center, 3.0, 7.5), grid(center, 3.0, 7.5));
}

#[test]
fn grid_offsets_follow_equirectangular_projection() {
    init_logging();
    let center = Coordinate::new(0.0, 10.0);
    let points = grid(center, 10.0, 10.0);
    let north = points.iter().find(|p| p.dx == 1 && p.dy == 0).expect("north point");
    let expected = (10.0 / EARTH_RADIUS_KM).to_degrees();
    assert!((north.lat - expected).abs() < 1e-9);
    assert!((north.lng - 10.0).abs() < 1e-9);
}

#[test]
fn zero_radius_or_bad_step_yields_only_center() {
    init_logging();
    let center = Coordinate::new(10.0, 20.0);
    assert_eq!(grid(center, 5.0, 0.0).len(), 1);
    assert_eq!(grid(center, 0.0, 10.0).len(), 1);
    assert_eq!(grid(center, f64::NAN, 10.0).len(), 1);
    assert_eq!(grid(center, 5.0, 0.0)[0].location(), "10.000000,20.000000");
}

#[test]
fn merge_keeps_first_position_and_last_value() {
    init_logging();
    let merged = merge_by_identity(vec![
        vec![located("a", "a1"), located("b", "b1")],
        vec![located("c", "c1"), located("a", "a2")],
        vec![located("b", "b3")],
    ]);
    let ids: Vec<_> = merged.iter().map(NormalizedItem::identity).collect();
    let titles: Vec<_> = merged.iter().map(title).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(titles, vec!["a2", "b3", "c1"]);
}

#[test]
fn grid_is_symmetric_about_the_center() {
    init_logging();
    let points = grid(Coordinate::new(0.0, 0.0), 10.0, 25.0);
    for point in &points {
        assert!(point.offset_km <= 25.0);
        assert!(
            points.iter().any(|p| p.dx == -point.dx && p.dy == -point.dy),
            "no mirror for ({}, {})",
            point.dx,
            point.dy
        );
    }
    assert_eq!(points, grid(Coordinate::new(0.0, 0.0), 10.0, 25.0));
}

#[test]
fn oversized_lattice_collapses_to_the_center() {
    init_logging();
    let center = Coordinate::new(10.0, 10.0);
    let points = grid(center, 0.01, 500.0);
    assert_eq!(points.len(), 1);
    assert_eq!((points[0].dx, points[0].dy), (0, 0));
    assert_eq!((points[0].lat, points[0].lng), (10.0, 10.0));
}

#[test]
fn lattice_at_the_step_cap_stays_within_radius() {
    init_logging();
    let radius = f64::from(MAX_GRID_STEPS);
    let points = grid(Coordinate::new(0.0, 0.0), 1.0, radius);
    assert!(points.len() > 1);
    assert!(points.iter().all(|p| p.offset_km <= radius));
    assert!(points.iter().any(|p| p.dx == MAX_GRID_STEPS as i32 && p.dy == 0));
}
